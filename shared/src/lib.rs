use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;

pub use protocol::{ApiRequest, BodyEncoding, HttpMethod};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// 市场中披萨的价格（积分），仅用于展示，实际扣费由服务端决定
pub const PIZZA_PRICE_POINTS: i64 = 10;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// `POST /token` 的返回值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// 用户资料
///
/// 服务端在不同端点返回的字段并不一致（`GET /user` 不带积分），
/// 因此除 email 外全部可缺省。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// 会议
///
/// 创建/加入端点只返回 `{id, location, subject}`，列表端点额外带起止时间。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    #[serde(default)]
    pub datetime_start: Option<String>,
    #[serde(default)]
    pub datetime_end: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub subject: String,
}

/// 推荐联系人
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

// =========================================================
// 请求体 (Request Bodies)
// =========================================================

/// 登录表单，字段名沿用 OAuth2 password flow 的 `username`
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// 注册请求
#[derive(Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// 创建会议表单
///
/// `hours` 是距开始的小时数，可以是小数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMeetingForm {
    pub hours: f64,
    pub location: String,
    pub subject: String,
}

/// 追加兴趣：请求体直接是兴趣列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddInterestsRequest {
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinMeetingRequest {
    #[serde(skip)]
    pub meeting_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_tolerates_missing_optional_fields() {
        let user: UserProfile = serde_json::from_str(r#"{"email":"a@b.com","name":null}"#).unwrap();
        assert_eq!(user.points, 0);
        assert!(user.interests.is_empty());
        assert_eq!(user.display_name(), "a@b.com");
    }

    #[test]
    fn created_meeting_has_no_time_window() {
        let meeting: Meeting =
            serde_json::from_str(r#"{"id":"m1","location":"Room A","subject":"Sync"}"#).unwrap();
        assert_eq!(meeting.id, "m1");
        assert_eq!(meeting.datetime_start, None);
    }

    #[test]
    fn token_type_defaults_to_bearer() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token":"T"}"#).unwrap();
        assert_eq!(token.token_type, "bearer");
    }

    #[test]
    fn interests_serialize_as_plain_list() {
        let body = AddInterestsRequest {
            interests: vec!["chess".to_string()],
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"["chess"]"#);
    }
}
