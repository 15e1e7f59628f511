//! 应用上下文
//!
//! 整个客户端状态放在一个 `RwSignal<ClientState>` 里，通过 Context 在组件间共享。
//! 组件只读取状态、调用 [`AppClient`] 的操作，从不直接修改状态。

use crate::api::ApiGateway;
use crate::config::ClientConfig;
use crate::state::{Client, ClientState, StateCell};
use crate::web::FetchHttpClient;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

pub type AppClient = Client<RwSignal<ClientState>, FetchHttpClient>;

impl StateCell for RwSignal<ClientState> {
    fn read_state<R>(&self, f: impl FnOnce(&ClientState) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut ClientState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// 按配置创建客户端；会话从空白状态开始
pub fn create_client(config: &ClientConfig) -> AppClient {
    log::info!("[App] API base url: {}", config.api_base_url);
    let state = RwSignal::new(ClientState::default());
    let api = ApiGateway::new(config.api_base_url.clone(), FetchHttpClient);
    Client::new(state, api)
}

pub fn provide_client(client: AppClient) {
    provide_context(client);
}

/// 从 Context 获取客户端
pub fn use_client() -> AppClient {
    use_context::<AppClient>().expect("AppClient should be provided")
}

/// 状态信号，用于在视图中做细粒度读取
pub fn use_state() -> RwSignal<ClientState> {
    *use_client().state()
}

/// 在后台执行一个客户端操作
pub fn spawn_action<F, Fut>(client: &AppClient, action: F)
where
    F: FnOnce(AppClient) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    spawn_local(action(client.clone()));
}
