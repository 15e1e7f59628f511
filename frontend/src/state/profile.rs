//! 个人资料屏幕

use super::remote::RemoteEntity;
use super::{Epoch, Scoped};
use crate::api::ApiError;
use meetpoint_shared::{AddInterestsRequest, UserProfile};

#[derive(Debug, Clone, Default)]
pub struct ProfileScreen {
    pub user: RemoteEntity<UserProfile>,
    pub interest_draft: String,
    /// 最近一次追加兴趣失败
    pub interest_failed: bool,
    epoch: Epoch,
}

impl ProfileScreen {
    /// 取出输入框内容；无论之后成功与否，输入框都已清空
    pub fn take_interest(&mut self) -> Option<AddInterestsRequest> {
        let draft = std::mem::take(&mut self.interest_draft);
        let interest = draft.trim();
        if interest.is_empty() {
            return None;
        }
        self.interest_failed = false;
        Some(AddInterestsRequest {
            interests: vec![interest.to_string()],
        })
    }

    /// 服务端返回的资料整体替换本地实体
    pub fn finish_add_interest(&mut self, result: Result<UserProfile, ApiError>) {
        match result {
            Ok(user) => self.user = RemoteEntity::Loaded(user),
            Err(err) => {
                log::info!("[Profile] add interest failed: {}", err);
                self.interest_failed = true;
            }
        }
    }
}

impl_scoped!(ProfileScreen);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_interest_is_not_sent_but_still_cleared() {
        let mut screen = ProfileScreen {
            interest_draft: "   ".to_string(),
            ..Default::default()
        };
        assert!(screen.take_interest().is_none());
        assert!(screen.interest_draft.is_empty());
    }

    #[test]
    fn failure_keeps_previous_user() {
        let user = UserProfile {
            email: "a@b.com".to_string(),
            name: None,
            points: 5,
            interests: vec!["go".to_string()],
        };
        let mut screen = ProfileScreen {
            user: RemoteEntity::Loaded(user.clone()),
            interest_draft: "chess".to_string(),
            ..Default::default()
        };

        let request = screen.take_interest().unwrap();
        assert_eq!(request.interests, vec!["chess"]);
        screen.finish_add_interest(Err(ApiError::Request { status: 500 }));

        assert!(screen.interest_failed);
        assert_eq!(screen.user.value(), Some(&user));
        assert!(screen.interest_draft.is_empty());
    }
}
