//! 推荐联系人屏幕，只读

use super::remote::RemoteEntity;
use super::{Epoch, Scoped};
use meetpoint_shared::RecommendedUser;

#[derive(Debug, Clone, Default)]
pub struct RecommendationsScreen {
    pub users: RemoteEntity<Vec<RecommendedUser>>,
    epoch: Epoch,
}

impl_scoped!(RecommendationsScreen);
