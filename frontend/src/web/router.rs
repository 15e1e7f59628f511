//! 路由服务模块
//!
//! 视图完全由会话和导航状态推导（见 [`View::resolve`]），这里不维护第二份路由状态。
//! 未登录时任何导航请求都在状态层被拒绝，出口只会渲染登录页。

use crate::context::{AppClient, provide_client, use_state};
use crate::state::route::View;
use leptos::prelude::*;

/// 当前视图信号
///
/// 状态每次变化都会重算，但只有视图本身变化时才通知订阅者，
/// 因此表单输入不会导致整页重建。
pub fn use_view() -> Memo<View> {
    let state = use_state();
    Memo::new(move |_| state.with(|s| s.view()))
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供客户端上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 应用客户端
    client: AppClient,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_client(client);

    let view = use_view();
    Effect::new(move |_| {
        log::debug!("[Router] rendering {:?}", view.get());
    });

    children()
}

/// 路由出口组件
///
/// 根据当前视图渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前视图，返回对应组件
    matcher: fn(View) -> AnyView,
) -> impl IntoView {
    let view = use_view();

    move || matcher(view.get())
}
