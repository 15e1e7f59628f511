//! 客户端状态控制器
//!
//! [`ClientState`] 持有会话、导航状态以及每个屏幕的控制器。
//! 所有状态变化要么来自用户操作，要么来自请求的落定；
//! 跨屏幕的变化只有两种：离开屏幕和会话结束，二者都在这里以一次同步修改完成。
//!
//! 每个屏幕有一个 [`Epoch`]，离开屏幕或会话结束时递增。
//! 请求发出时记下当时的 epoch（[`Ticket`]），落定时 epoch 已变则结果被丢弃。

/// 为屏幕控制器实现 [`Scoped`]：重置即回到默认值，并进入下一个 epoch
///
/// 控制器需要实现 `Default`，并有一个名为 `epoch` 的字段。
macro_rules! impl_scoped {
    ($screen:ty) => {
        impl Scoped for $screen {
            fn epoch(&self) -> Epoch {
                self.epoch
            }

            fn reset(&mut self) {
                *self = Self {
                    epoch: self.epoch.next(),
                    ..Self::default()
                };
            }
        }
    };
}

pub mod client;
pub mod login;
pub mod marketplace;
pub mod meetings;
pub mod profile;
pub mod recommendations;
pub mod remote;
pub mod route;
pub mod session;

#[cfg(test)]
mod tests;

use crate::api::ApiError;
use login::LoginScreen;
use marketplace::MarketplaceScreen;
use meetings::MeetingsScreens;
use profile::ProfileScreen;
use recommendations::RecommendationsScreen;
use route::{MeetingsAction, NavigationState, Screen, View};
use session::Session;
use std::cell::RefCell;
use std::rc::Rc;

pub use client::Client;
pub use remote::{LoadPolicy, RemoteEntity, RemoteStatus};

/// 屏幕控制器的生命周期编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Epoch(u64);

impl Epoch {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// 拥有独立生命周期的屏幕控制器
pub trait Scoped {
    fn epoch(&self) -> Epoch;
    /// 丢弃全部实体和草稿，开启新的生命周期
    fn reset(&mut self);
}

/// 请求结果归属的作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    MeetingsList,
    MeetingsCreate,
    MeetingsJoin,
    Profile,
    Recommendations,
    Marketplace,
}

/// 已认证请求发出时的凭据和作用域快照
pub struct Ticket {
    pub token: String,
    pub scope: Scope,
    pub epoch: Epoch,
}

#[derive(Debug, Default)]
pub struct ClientState {
    session: Session,
    nav: NavigationState,
    pub login: LoginScreen,
    pub meetings: MeetingsScreens,
    pub profile: ProfileScreen,
    pub recommendations: RecommendationsScreen,
    pub marketplace: MarketplaceScreen,
}

impl ClientState {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn view(&self) -> View {
        View::resolve(self.session.is_authenticated(), &self.nav)
    }

    // =========================================================
    // 会话
    // =========================================================

    /// 登录成功：保存 Token，回到菜单
    pub fn login(&mut self, token: String) {
        self.session.open(token);
        self.nav.reset();
        self.login.reset();
        log::info!("[Session] logged in");
    }

    /// 注销：清除 Token，回到菜单，所有屏幕的实体都不保留
    pub fn logout(&mut self) {
        let was_authenticated = self.session.close();
        self.nav.reset();
        self.reset_all_screens();
        if was_authenticated {
            log::info!("[Session] logged out");
        }
    }

    /// 服务端拒绝了当前 Token
    pub fn expire(&mut self) {
        log::warn!("[Session] token rejected by server, session closed");
        self.logout();
        self.login.session_expired = true;
    }

    fn reset_all_screens(&mut self) {
        self.login.reset();
        self.meetings.reset_all();
        self.profile.reset();
        self.recommendations.reset();
        self.marketplace.reset();
    }

    // =========================================================
    // 导航
    // =========================================================

    /// 切换到顶层屏幕，未登录时拒绝
    pub fn go_to(&mut self, screen: Screen) -> bool {
        if !self.session.is_authenticated() {
            log::warn!("[Router] Access Denied: {} requires login.", screen);
            return false;
        }
        if let Some(left) = self.nav.enter(screen) {
            log::debug!("[Router] {} -> {}", left, screen);
            self.reset_screen(left);
        }
        true
    }

    /// 切换会议子操作，必要时先进入会议屏幕
    pub fn go_to_meetings_action(&mut self, action: MeetingsAction) -> bool {
        if !self.go_to(Screen::Meetings) {
            return false;
        }
        if let Some(left) = self.nav.select(action) {
            self.meetings.reset_action(left);
        }
        true
    }

    /// 从任意屏幕回到菜单
    pub fn back(&mut self) -> bool {
        self.go_to(Screen::Menu)
    }

    fn reset_screen(&mut self, screen: Screen) {
        match screen {
            Screen::Menu => {}
            Screen::Meetings => self.meetings.reset_all(),
            Screen::Profile => self.profile.reset(),
            Screen::Recommendations => self.recommendations.reset(),
            Screen::Marketplace => self.marketplace.reset(),
        }
    }

    // =========================================================
    // 请求生命周期
    // =========================================================

    pub fn epoch(&self, scope: Scope) -> Epoch {
        match scope {
            Scope::MeetingsList => self.meetings.list.epoch(),
            Scope::MeetingsCreate => self.meetings.create.epoch(),
            Scope::MeetingsJoin => self.meetings.join.epoch(),
            Scope::Profile => self.profile.epoch(),
            Scope::Recommendations => self.recommendations.epoch(),
            Scope::Marketplace => self.marketplace.epoch(),
        }
    }

    /// 为已认证请求签发票据；未登录时返回 None
    pub fn ticket(&self, scope: Scope) -> Option<Ticket> {
        let token = self.session.token()?;
        Some(Ticket {
            token: token.to_string(),
            scope,
            epoch: self.epoch(scope),
        })
    }

    /// 落定一个已认证请求
    ///
    /// 401 且 Token 仍是当前 Token 时终止会话；作用域已更替时丢弃结果；
    /// 否则交给 `apply`。
    pub fn settle<T>(
        &mut self,
        ticket: &Ticket,
        result: Result<T, ApiError>,
        apply: impl FnOnce(&mut Self, Result<T, ApiError>),
    ) {
        if let Err(err) = &result {
            if err.is_unauthorized() && self.session.token() == Some(ticket.token.as_str()) {
                self.expire();
                return;
            }
        }
        if self.epoch(ticket.scope) != ticket.epoch {
            log::debug!("[State] dropping stale {:?} response", ticket.scope);
            return;
        }
        apply(self, result);
    }

    /// 落定登录请求（含注册后的自动登录）
    pub fn finish_login(&mut self, epoch: Epoch, result: Result<String, ApiError>) {
        if self.login.epoch() != epoch {
            log::debug!("[State] dropping stale login response");
            return;
        }
        match result {
            Ok(token) => self.login(token),
            Err(err) => self.login.login_failed(&err),
        }
    }

    pub fn finish_signup_failure(&mut self, epoch: Epoch, err: ApiError) {
        if self.login.epoch() == epoch {
            self.login.signup_failed(&err);
        }
    }
}

// =========================================================
// 状态容器抽象
// =========================================================

/// 状态容器
///
/// 应用中是 Leptos 的 `RwSignal<ClientState>`，测试中是 `Rc<RefCell<_>>`。
/// 容器已销毁时返回 None，此时在途请求的结果被丢弃。
pub trait StateCell: Clone + 'static {
    fn read_state<R>(&self, f: impl FnOnce(&ClientState) -> R) -> Option<R>;
    fn update_state<R>(&self, f: impl FnOnce(&mut ClientState) -> R) -> Option<R>;
}

impl StateCell for Rc<RefCell<ClientState>> {
    fn read_state<R>(&self, f: impl FnOnce(&ClientState) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut ClientState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}
