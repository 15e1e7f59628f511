//! 登录/注册屏幕

use super::{Epoch, Scoped};
use crate::api::ApiError;
use meetpoint_shared::{LoginForm, SignupRequest};
use std::fmt;

/// 互斥的两种模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

/// 表单草稿
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginDraft {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl fmt::Debug for LoginDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginDraft")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// 一次提交所需的全部信息
pub struct Submission {
    pub mode: AuthMode,
    pub draft: LoginDraft,
    pub epoch: Epoch,
}

impl Submission {
    pub fn login_form(&self) -> LoginForm {
        LoginForm {
            username: self.draft.email.clone(),
            password: self.draft.password.clone(),
        }
    }

    pub fn signup_request(&self) -> SignupRequest {
        SignupRequest {
            email: self.draft.email.clone(),
            password: self.draft.password.clone(),
            name: self.draft.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginScreen {
    pub mode: AuthMode,
    pub draft: LoginDraft,
    /// 登录或注册被拒绝
    pub wrong_credentials: bool,
    /// 上一个会话因 401 被终止
    pub session_expired: bool,
    pub submitting: bool,
    epoch: Epoch,
}

impl LoginScreen {
    pub fn switch_mode(&mut self, mode: AuthMode) {
        if self.mode != mode {
            self.mode = mode;
            self.wrong_credentials = false;
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting
            && !self.draft.email.trim().is_empty()
            && !self.draft.password.is_empty()
    }

    /// 开始提交；已有请求在途或必填项为空时返回 None
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }
        self.submitting = true;
        self.wrong_credentials = false;
        self.session_expired = false;

        let mut draft = self.draft.clone();
        draft.email = draft.email.trim().to_string();
        Some(Submission {
            mode: self.mode,
            draft,
            epoch: self.epoch,
        })
    }

    /// 登录被拒绝：清空密码，保留邮箱供修改
    pub fn login_failed(&mut self, err: &ApiError) {
        log::info!("[Auth] login rejected: {}", err);
        self.submitting = false;
        self.wrong_credentials = true;
        self.draft.password.clear();
    }

    /// 注册被拒绝：沿用同一个提示，表单保持原样
    pub fn signup_failed(&mut self, err: &ApiError) {
        log::info!("[Auth] signup rejected: {}", err);
        self.submitting = false;
        self.wrong_credentials = true;
    }
}

impl_scoped!(LoginScreen);

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> LoginScreen {
        let mut screen = LoginScreen::default();
        screen.draft.email = " a@b.com ".to_string();
        screen.draft.password = "pw".to_string();
        screen
    }

    #[test]
    fn submit_requires_email_and_password() {
        let mut screen = LoginScreen::default();
        assert!(screen.begin_submit().is_none());

        screen.draft.email = "a@b.com".to_string();
        assert!(screen.begin_submit().is_none());
    }

    #[test]
    fn submission_is_exclusive_and_trims_email() {
        let mut screen = filled();
        let submission = screen.begin_submit().unwrap();
        assert_eq!(submission.login_form().username, "a@b.com");
        assert!(screen.begin_submit().is_none());
    }

    #[test]
    fn login_failure_clears_password_only() {
        let mut screen = filled();
        screen.begin_submit();
        screen.login_failed(&ApiError::Authentication { status: 401 });

        assert!(screen.wrong_credentials);
        assert!(!screen.submitting);
        assert!(screen.draft.password.is_empty());
        assert_eq!(screen.draft.email, " a@b.com ");
    }

    #[test]
    fn switching_mode_hides_stale_error() {
        let mut screen = filled();
        screen.wrong_credentials = true;
        screen.switch_mode(AuthMode::Signup);
        assert!(!screen.wrong_credentials);
        assert_eq!(screen.mode, AuthMode::Signup);
    }

    #[test]
    fn reset_starts_new_epoch() {
        let mut screen = filled();
        let before = screen.epoch();
        screen.reset();
        assert_ne!(screen.epoch(), before);
        assert!(screen.draft.email.is_empty());
    }
}
