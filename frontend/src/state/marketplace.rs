//! 积分市场屏幕

use super::remote::RemoteEntity;
use super::{Epoch, Scoped};
use crate::api::ApiError;
use meetpoint_shared::UserProfile;

/// 购买结果的两个标志相互独立，每次购买开始时同时清零
#[derive(Debug, Clone, Default)]
pub struct MarketplaceScreen {
    pub balance: RemoteEntity<UserProfile>,
    pub success: bool,
    pub error: bool,
    epoch: Epoch,
}

impl MarketplaceScreen {
    pub fn points(&self) -> Option<i64> {
        self.balance.value().map(|user| user.points)
    }

    pub fn begin_purchase(&mut self) {
        self.success = false;
        self.error = false;
    }

    pub fn finish_purchase(&mut self, result: Result<(), ApiError>) {
        match result {
            Ok(()) => self.success = true,
            Err(err) => {
                log::info!("[Market] purchase failed: {}", err);
                self.error = true;
            }
        }
    }
}

impl_scoped!(MarketplaceScreen);
