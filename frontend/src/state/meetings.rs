//! 会议屏幕：列表 / 创建 / 加入
//!
//! 三个子操作各自拥有独立的状态和生命周期，切换子操作时被离开的那个会被重置。

use super::remote::RemoteEntity;
use super::route::MeetingsAction;
use super::{Epoch, Scoped};
use crate::api::ApiError;
use meetpoint_shared::{CreateMeetingForm, JoinMeetingRequest, Meeting};

#[derive(Debug, Clone, Default)]
pub struct MeetingsScreens {
    pub list: MeetingListScreen,
    pub create: MeetingCreateScreen,
    pub join: MeetingJoinScreen,
}

impl MeetingsScreens {
    pub fn reset_action(&mut self, action: MeetingsAction) {
        match action {
            MeetingsAction::List => self.list.reset(),
            MeetingsAction::Create => self.create.reset(),
            MeetingsAction::Join => self.join.reset(),
        }
    }

    pub fn reset_all(&mut self) {
        for action in MeetingsAction::ALL {
            self.reset_action(action);
        }
    }
}

// =========================================================
// 列表
// =========================================================

/// 只在用户显式刷新时拉取，保持服务端顺序
#[derive(Debug, Clone, Default)]
pub struct MeetingListScreen {
    pub meetings: RemoteEntity<Vec<Meeting>>,
    epoch: Epoch,
}

impl_scoped!(MeetingListScreen);

// =========================================================
// 创建
// =========================================================

/// 表单草稿；`hours` 保留输入框原文，提交时才解析
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingDraft {
    pub hours: String,
    pub location: String,
    pub subject: String,
}

impl MeetingDraft {
    /// 距开始的小时数，必须是有限的非负数，允许小数
    pub fn parsed_hours(&self) -> Option<f64> {
        self.hours
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|hours| hours.is_finite() && *hours >= 0.0)
    }
}

/// `result` 兼作子状态：`Loaded` 即"已创建"，其余情况显示表单
#[derive(Debug, Clone, Default)]
pub struct MeetingCreateScreen {
    pub draft: MeetingDraft,
    pub result: RemoteEntity<Meeting>,
    /// 上次提交时小时数无法解析或为负
    pub invalid_hours: bool,
    epoch: Epoch,
}

impl MeetingCreateScreen {
    pub fn created(&self) -> Option<&Meeting> {
        self.result.value()
    }

    pub fn begin_submit(&mut self) -> Option<CreateMeetingForm> {
        if self.result.is_loading() || self.created().is_some() {
            return None;
        }
        let Some(hours) = self.draft.parsed_hours() else {
            self.invalid_hours = true;
            return None;
        };
        self.invalid_hours = false;
        self.result = RemoteEntity::Loading;
        Some(CreateMeetingForm {
            hours,
            location: self.draft.location.clone(),
            subject: self.draft.subject.clone(),
        })
    }

    pub fn finish_submit(&mut self, result: Result<Meeting, ApiError>) {
        match result {
            Ok(meeting) => {
                log::info!("[Meetings] created {}", meeting.id);
                self.draft = MeetingDraft::default();
                self.result = RemoteEntity::Loaded(meeting);
            }
            Err(err) => {
                log::info!("[Meetings] create failed: {}", err);
                self.result = RemoteEntity::Failed;
            }
        }
    }

    /// 离开"已创建"子状态，回到空表单
    pub fn leave(&mut self) {
        self.result.reset();
        self.invalid_hours = false;
        self.draft = MeetingDraft::default();
    }
}

impl_scoped!(MeetingCreateScreen);

// =========================================================
// 加入
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinFailure {
    NotFound,
    Other,
}

impl JoinFailure {
    pub fn message(&self) -> &'static str {
        match self {
            JoinFailure::NotFound => "No meeting with that id.",
            JoinFailure::Other => "Could not join the meeting.",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MeetingJoinScreen {
    pub meeting_id: String,
    pub result: RemoteEntity<Meeting>,
    pub failure: Option<JoinFailure>,
    epoch: Epoch,
}

impl MeetingJoinScreen {
    pub fn joined(&self) -> Option<&Meeting> {
        self.result.value()
    }

    pub fn begin_submit(&mut self) -> Option<JoinMeetingRequest> {
        let meeting_id = self.meeting_id.trim();
        if meeting_id.is_empty() || self.result.is_loading() || self.joined().is_some() {
            return None;
        }
        let request = JoinMeetingRequest {
            meeting_id: meeting_id.to_string(),
        };
        self.failure = None;
        self.result = RemoteEntity::Loading;
        Some(request)
    }

    pub fn finish_submit(&mut self, result: Result<Meeting, ApiError>) {
        match result {
            Ok(meeting) => {
                log::info!("[Meetings] joined {}", meeting.id);
                self.meeting_id.clear();
                self.result = RemoteEntity::Loaded(meeting);
            }
            Err(err) => {
                log::info!("[Meetings] join failed: {}", err);
                self.failure = Some(if err.is_not_found() {
                    JoinFailure::NotFound
                } else {
                    JoinFailure::Other
                });
                self.result = RemoteEntity::Failed;
            }
        }
    }

    pub fn leave(&mut self) {
        self.result.reset();
        self.failure = None;
        self.meeting_id.clear();
    }
}

impl_scoped!(MeetingJoinScreen);
