use crate::{
    AddInterestsRequest, CreateMeetingForm, JoinMeetingRequest, LoginForm, Meeting,
    RecommendedUser, SignupRequest, TokenResponse, UserProfile,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the request value is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// No body at all.
    Empty,
    /// `serde_json` serialization of the request value.
    Json,
    /// `application/x-www-form-urlencoded` built from [`ApiRequest::form_pairs`].
    Form,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path. Dynamic paths override [`ApiRequest::segments`].
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    const ENCODING: BodyEncoding = BodyEncoding::Empty;
    /// Whether the bearer token is attached. False only for the endpoints that issue it.
    const AUTHENTICATED: bool = true;

    /// Path segments, unescaped. The gateway percent-encodes each one.
    fn segments(&self) -> Vec<String> {
        Self::PATH
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn form_pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn parse_response(body: &str) -> serde_json::Result<Self::Response> {
        serde_json::from_str(body)
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// Exchange credentials for a bearer token
impl ApiRequest for LoginForm {
    type Response = TokenResponse;
    const PATH: &'static str = "/token";
    const METHOD: HttpMethod = HttpMethod::Post;
    const ENCODING: BodyEncoding = BodyEncoding::Form;
    const AUTHENTICATED: bool = false;

    fn form_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.username.clone()),
            ("password", self.password.clone()),
        ]
    }
}

/// Register a new account. Does not yield a token.
///
/// Success is the status code alone; the body is ignored.
impl ApiRequest for SignupRequest {
    type Response = ();
    const PATH: &'static str = "/user";
    const METHOD: HttpMethod = HttpMethod::Post;
    const ENCODING: BodyEncoding = BodyEncoding::Json;
    const AUTHENTICATED: bool = false;

    fn parse_response(_body: &str) -> serde_json::Result<()> {
        Ok(())
    }
}

/// Append interests; the server answers with the updated profile
impl ApiRequest for AddInterestsRequest {
    type Response = UserProfile;
    const PATH: &'static str = "/user/interests";
    const METHOD: HttpMethod = HttpMethod::Post;
    const ENCODING: BodyEncoding = BodyEncoding::Json;
}

/// Meetings the caller takes part in, in server order
#[derive(Debug, Serialize, Deserialize)]
pub struct ListMeetingsRequest;

impl ApiRequest for ListMeetingsRequest {
    type Response = Vec<Meeting>;
    const PATH: &'static str = "/meetings";
    const METHOD: HttpMethod = HttpMethod::Get;
}

impl ApiRequest for CreateMeetingForm {
    type Response = Meeting;
    const PATH: &'static str = "/meetings";
    const METHOD: HttpMethod = HttpMethod::Post;
    const ENCODING: BodyEncoding = BodyEncoding::Form;

    fn form_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("hours", self.hours.to_string()),
            ("location", self.location.clone()),
            ("subject", self.subject.clone()),
        ]
    }
}

impl ApiRequest for JoinMeetingRequest {
    type Response = Meeting;
    const PATH: &'static str = "/meetings/{id}/join";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn segments(&self) -> Vec<String> {
        vec![
            "meetings".to_string(),
            self.meeting_id.clone(),
            "join".to_string(),
        ]
    }
}

/// Points endpoint.
///
/// The screens use it to read the profile together with the balance. Whether
/// calling it also redeems points server-side is up to the service.
#[derive(Debug, Serialize, Deserialize)]
pub struct PointsRequest;

impl ApiRequest for PointsRequest {
    type Response = UserProfile;
    const PATH: &'static str = "/points";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationsRequest;

impl ApiRequest for RecommendationsRequest {
    type Response = Vec<RecommendedUser>;
    const PATH: &'static str = "/recommendations";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Buy a pizza. Success is the status code alone; the body is ignored.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuyPizzaRequest;

impl ApiRequest for BuyPizzaRequest {
    type Response = ();
    const PATH: &'static str = "/buy/pizza";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn parse_response(_body: &str) -> serde_json::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_paths_split_into_segments() {
        assert_eq!(BuyPizzaRequest.segments(), vec!["buy", "pizza"]);
        assert_eq!(LoginForm::PATH, "/token");
    }

    #[test]
    fn join_path_carries_meeting_id() {
        let req = JoinMeetingRequest {
            meeting_id: "m 1".to_string(),
        };
        assert_eq!(req.segments(), vec!["meetings", "m 1", "join"]);
    }

    #[test]
    fn only_token_endpoints_skip_auth() {
        assert!(!LoginForm::AUTHENTICATED);
        assert!(!SignupRequest::AUTHENTICATED);
        assert!(PointsRequest::AUTHENTICATED);
        assert!(AddInterestsRequest::AUTHENTICATED);
    }

    #[test]
    fn meeting_form_keeps_field_order() {
        let form = CreateMeetingForm {
            hours: 2.0,
            location: "Room A".to_string(),
            subject: "Sync".to_string(),
        };
        assert_eq!(
            form.form_pairs(),
            vec![
                ("hours", "2".to_string()),
                ("location", "Room A".to_string()),
                ("subject", "Sync".to_string()),
            ]
        );

        let half = CreateMeetingForm { hours: 1.5, ..form };
        assert_eq!(half.form_pairs()[0], ("hours", "1.5".to_string()));
    }

    #[test]
    fn purchase_ignores_body() {
        assert!(BuyPizzaRequest::parse_response("").is_ok());
        assert!(BuyPizzaRequest::parse_response("not json").is_ok());
    }

    #[test]
    fn signup_ignores_body() {
        assert!(SignupRequest::parse_response("").is_ok());
        assert!(SignupRequest::parse_response(r#"{"id": 7}"#).is_ok());
    }
}
