//! MeetPoint 前端应用
//!
//! 采用状态与视图分离的架构：
//! - `state`: 客户端状态控制器（会话、导航、各屏幕的实体与表单），不依赖 DOM
//! - `api`: 类型化的 API 网关
//! - `web::router`: 视图路由，从状态推导当前视图
//! - `context`: 通过 Leptos Context 共享客户端
//! - `components`: UI 组件层

mod api;
mod config;
mod context;
mod components {
    pub mod layout;
    pub mod login;
    pub mod marketplace;
    pub mod meetings;
    pub mod menu;
    pub mod profile;
    pub mod recommendations;
}
pub mod state;

use crate::components::login::LoginPage;
use crate::components::marketplace::MarketplacePage;
use crate::components::meetings::MeetingsPage;
use crate::components::menu::MenuPage;
use crate::components::profile::ProfilePage;
use crate::components::recommendations::RecommendationsPage;
use crate::config::ClientConfig;
use crate::context::create_client;
use crate::state::route::View;

use leptos::prelude::*;

// 浏览器 API 封装模块
pub(crate) mod web {
    mod http;
    pub mod router;
    mod storage;

    pub use http::{FetchHttpClient, HttpClient, HttpError, HttpRequest};
    #[cfg(test)]
    pub use http::MockHttpClient;
    pub use storage::LocalStorage;
}

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 View 枚举返回对应的视图组件。
fn route_matcher(current: View) -> AnyView {
    match current {
        View::Login => view! { <LoginPage /> }.into_any(),
        View::Menu => view! { <MenuPage /> }.into_any(),
        View::Meetings(action) => view! { <MeetingsPage action=action /> }.into_any(),
        View::Profile => view! { <ProfilePage /> }.into_any(),
        View::Recommendations => view! { <RecommendationsPage /> }.into_any(),
        View::Marketplace => view! { <MarketplacePage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 加载配置（LocalStorage / 编译期环境变量 / 默认值）
    let config = ClientConfig::load();

    // 2. 创建客户端，会话从未登录开始
    let client = create_client(&config);

    view! {
        // 3. 路由器组件：提供客户端上下文
        <Router client=client>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
