//! 路由定义模块 - 领域模型
//!
//! 纯粹的状态机，不依赖于 DOM。
//! 定义了所有屏幕、会议子操作及其导航规则。

use std::fmt::Display;

/// 顶层屏幕
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// 菜单 (登录后的默认屏幕)
    #[default]
    Menu,
    Meetings,
    Profile,
    Recommendations,
    Marketplace,
}

impl Screen {
    /// 菜单中列出的目标屏幕
    pub const DESTINATIONS: [Screen; 4] = [
        Screen::Meetings,
        Screen::Profile,
        Screen::Recommendations,
        Screen::Marketplace,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Menu => "Menu",
            Screen::Meetings => "Meetings",
            Screen::Profile => "Profile",
            Screen::Recommendations => "Recommended contacts",
            Screen::Marketplace => "Marketplace",
        }
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// 会议屏幕内的子操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeetingsAction {
    #[default]
    List,
    Create,
    Join,
}

impl MeetingsAction {
    pub const ALL: [MeetingsAction; 3] = [
        MeetingsAction::List,
        MeetingsAction::Create,
        MeetingsAction::Join,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MeetingsAction::List => "List",
            MeetingsAction::Create => "Create",
            MeetingsAction::Join => "Join",
        }
    }
}

/// 导航状态
///
/// `meetings_action` 仅在 `screen == Meetings` 时有意义。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    screen: Screen,
    meetings_action: MeetingsAction,
}

impl NavigationState {
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn meetings_action(&self) -> MeetingsAction {
        self.meetings_action
    }

    /// 切换屏幕，返回被离开的屏幕（若确有变化）
    pub(super) fn enter(&mut self, screen: Screen) -> Option<Screen> {
        if self.screen == screen {
            return None;
        }
        let left = self.screen;
        if left == Screen::Meetings {
            self.meetings_action = MeetingsAction::default();
        }
        self.screen = screen;
        Some(left)
    }

    /// 切换会议子操作，返回被离开的子操作（若确有变化）
    pub(super) fn select(&mut self, action: MeetingsAction) -> Option<MeetingsAction> {
        if self.meetings_action == action {
            return None;
        }
        let left = self.meetings_action;
        self.meetings_action = action;
        Some(left)
    }

    pub(super) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 实际渲染的视图
///
/// 由会话状态和导航状态共同决定，供路由出口做穷尽匹配。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Menu,
    Meetings(MeetingsAction),
    Profile,
    Recommendations,
    Marketplace,
}

impl View {
    pub fn resolve(authenticated: bool, nav: &NavigationState) -> Self {
        if !authenticated {
            return View::Login;
        }
        match nav.screen {
            Screen::Menu => View::Menu,
            Screen::Meetings => View::Meetings(nav.meetings_action),
            Screen::Profile => View::Profile,
            Screen::Recommendations => View::Recommendations,
            Screen::Marketplace => View::Marketplace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_reports_left_screen() {
        let mut nav = NavigationState::default();
        assert_eq!(nav.enter(Screen::Profile), Some(Screen::Menu));
        assert_eq!(nav.enter(Screen::Profile), None);
        assert_eq!(nav.screen(), Screen::Profile);
    }

    #[test]
    fn leaving_meetings_resets_action() {
        let mut nav = NavigationState::default();
        nav.enter(Screen::Meetings);
        nav.select(MeetingsAction::Join);
        nav.enter(Screen::Menu);
        assert_eq!(nav.meetings_action(), MeetingsAction::List);
    }

    #[test]
    fn unauthenticated_view_is_always_login() {
        let mut nav = NavigationState::default();
        nav.enter(Screen::Marketplace);
        assert_eq!(View::resolve(false, &nav), View::Login);
        assert_eq!(View::resolve(true, &nav), View::Marketplace);
    }
}
