//! 会话存储
//!
//! 只保存不透明的 Bearer Token。Token 的有效性不在本地校验，
//! 只有网关收到 401 时才会发现失效。

use std::fmt;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(super) fn open(&mut self, token: String) {
        self.token = Some(token);
    }

    /// 清除 Token，返回之前是否处于登录状态
    pub(super) fn close(&mut self) -> bool {
        self.token.take().is_some()
    }
}

// Token 不进入日志
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_and_close() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());

        session.open("T".to_string());
        assert_eq!(session.token(), Some("T"));

        assert!(session.close());
        assert!(!session.close());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn debug_output_hides_token() {
        let mut session = Session::default();
        session.open("secret-token".to_string());
        let printed = format!("{:?}", session);
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("authenticated: true"));
    }
}
