use super::login::AuthMode;
use super::route::{MeetingsAction, Screen, View};
use super::*;
use crate::api::ApiGateway;
use crate::web::MockHttpClient;
use meetpoint_shared::{HttpMethod, UserProfile};
use serde_json::json;
use url::Url;

const BASE: &str = "http://api.test";

type TestClient = Client<Rc<RefCell<ClientState>>, MockHttpClient>;

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn client() -> TestClient {
    let gateway = ApiGateway::new(Url::parse(BASE).unwrap(), MockHttpClient::new());
    Client::new(Rc::new(RefCell::new(ClientState::default())), gateway)
}

fn http(client: &TestClient) -> &MockHttpClient {
    client.api().http()
}

fn logged_in() -> TestClient {
    let client = client();
    client.state().borrow_mut().login("T".to_string());
    client
}

fn profile_json(points: i64, interests: &[&str]) -> serde_json::Value {
    json!({"email": "a@b.com", "name": "Ann", "points": points, "interests": interests})
}

fn fill_credentials(client: &TestClient, email: &str, password: &str) {
    let mut state = client.state().borrow_mut();
    state.login.draft.email = email.to_string();
    state.login.draft.password = password.to_string();
}

// =========================================================
// Navigation & session
// =========================================================

#[test]
fn navigation_is_refused_without_token() {
    let client = client();
    for screen in Screen::DESTINATIONS {
        assert!(!client.go_to(screen));
    }
    assert!(!client.go_to_meetings_action(MeetingsAction::Join));

    let state = client.state().borrow();
    assert_eq!(state.nav().screen(), Screen::Menu);
    assert_eq!(state.view(), View::Login);
}

#[test]
fn navigation_sequences_never_leave_menu_while_logged_out() {
    let client = logged_in();
    let check = |client: &TestClient| {
        let state = client.state().borrow();
        if !state.session().is_authenticated() {
            assert_eq!(state.nav().screen(), Screen::Menu);
            assert_eq!(state.view(), View::Login);
        }
    };

    client.go_to(Screen::Profile);
    check(&client);
    client.go_to_meetings_action(MeetingsAction::Create);
    check(&client);
    client.logout();
    check(&client);
    client.go_to(Screen::Marketplace);
    check(&client);
    client.go_to_meetings_action(MeetingsAction::Join);
    check(&client);
    client.back();
    check(&client);
}

#[test]
fn meetings_actions_and_back() {
    let client = logged_in();
    assert!(client.go_to_meetings_action(MeetingsAction::Create));
    assert_eq!(
        client.state().borrow().view(),
        View::Meetings(MeetingsAction::Create)
    );

    assert!(client.back());
    assert_eq!(client.state().borrow().view(), View::Menu);

    // 重新进入会议屏幕时从列表开始
    assert!(client.go_to(Screen::Meetings));
    assert_eq!(
        client.state().borrow().view(),
        View::Meetings(MeetingsAction::List)
    );
}

#[test]
fn logout_from_any_screen_resets_everything() {
    let client = logged_in();
    {
        let mut state = client.state().borrow_mut();
        state.profile.user = RemoteEntity::Loaded(serde_json::from_value(profile_json(3, &[])).unwrap());
        state.recommendations.users = RemoteEntity::Loaded(Vec::new());
        state.marketplace.balance = RemoteEntity::Failed;
        state.meetings.list.meetings = RemoteEntity::Loaded(Vec::new());
        state.meetings.create.draft.subject = "Sync".to_string();
        state.meetings.join.result = RemoteEntity::Loading;
    }
    client.go_to(Screen::Marketplace);
    client.logout();

    let state = client.state().borrow();
    assert!(!state.session().is_authenticated());
    assert_eq!(state.nav().screen(), Screen::Menu);
    assert!(state.profile.user.is_not_loaded());
    assert!(state.recommendations.users.is_not_loaded());
    assert!(state.marketplace.balance.is_not_loaded());
    assert!(state.meetings.list.meetings.is_not_loaded());
    assert!(state.meetings.join.result.is_not_loaded());
    assert!(state.meetings.create.draft.subject.is_empty());
}

#[test]
fn leaving_a_screen_discards_its_entities() {
    let client = logged_in();
    client.go_to(Screen::Profile);
    client.state().borrow_mut().profile.interest_draft = "chess".to_string();
    client.state().borrow_mut().profile.user = RemoteEntity::Failed;

    client.back();
    let state = client.state().borrow();
    assert!(state.profile.user.is_not_loaded());
    assert!(state.profile.interest_draft.is_empty());
}

// =========================================================
// Login / signup
// =========================================================

#[tokio::test]
async fn login_stores_token_and_lands_on_menu() {
    let client = client();
    http(&client).mock_response(HttpMethod::Post, &url("/token"), 200, json!({"access_token": "T"}));
    fill_credentials(&client, "a@b.com", "pw");

    client.submit_credentials().await;

    let state = client.state().borrow();
    assert_eq!(state.session().token(), Some("T"));
    assert_eq!(state.view(), View::Menu);
    assert!(state.login.draft.email.is_empty());
    assert!(state.login.draft.password.is_empty());
    assert!(!state.login.wrong_credentials);

    let (_, _, headers, body) = http(&client).last_request().unwrap();
    assert!(headers.iter().all(|(k, _)| k != "Authorization"));
    assert_eq!(body.as_deref(), Some("username=a%40b.com&password=pw"));
}

#[tokio::test]
async fn rejected_login_clears_password_and_flags() {
    let client = client();
    http(&client).mock_response(HttpMethod::Post, &url("/token"), 401, json!({"detail": "no"}));
    fill_credentials(&client, "a@b.com", "bad");

    client.submit_credentials().await;

    let state = client.state().borrow();
    assert_eq!(state.session().token(), None);
    assert!(state.login.wrong_credentials);
    assert!(state.login.draft.password.is_empty());
    assert!(!state.login.submitting);
}

#[tokio::test]
async fn signup_logs_in_with_same_credentials() {
    let client = client();
    http(&client).mock_response(HttpMethod::Post, &url("/user"), 200, json!({"email": "a@b.com", "name": null}));
    http(&client).mock_response(HttpMethod::Post, &url("/token"), 200, json!({"access_token": "T2"}));
    {
        let mut state = client.state().borrow_mut();
        state.login.switch_mode(AuthMode::Signup);
        state.login.draft.name = "Ann".to_string();
    }
    fill_credentials(&client, "a@b.com", "pw");

    client.submit_credentials().await;

    assert_eq!(client.state().borrow().session().token(), Some("T2"));
    assert_eq!(http(&client).count(HttpMethod::Post, &url("/token")), 1);
}

#[tokio::test]
async fn signup_success_is_decided_by_status_alone() {
    let client = client();
    http(&client).mock_raw(HttpMethod::Post, &url("/user"), 201, "");
    http(&client).mock_response(HttpMethod::Post, &url("/token"), 200, json!({"access_token": "T3"}));
    client.state().borrow_mut().login.switch_mode(AuthMode::Signup);
    fill_credentials(&client, "a@b.com", "pw");

    client.submit_credentials().await;

    let state = client.state().borrow();
    assert_eq!(state.session().token(), Some("T3"));
    assert!(!state.login.wrong_credentials);
    assert_eq!(http(&client).count(HttpMethod::Post, &url("/token")), 1);
}

#[tokio::test]
async fn signup_then_rejected_login_surfaces_login_failure() {
    let client = client();
    http(&client).mock_response(HttpMethod::Post, &url("/user"), 200, json!({"email": "a@b.com"}));
    http(&client).mock_response(HttpMethod::Post, &url("/token"), 401, json!({}));
    client.state().borrow_mut().login.switch_mode(AuthMode::Signup);
    fill_credentials(&client, "a@b.com", "pw");

    client.submit_credentials().await;

    let state = client.state().borrow();
    assert!(!state.session().is_authenticated());
    assert!(state.login.wrong_credentials);
    assert!(state.login.draft.password.is_empty());
}

#[tokio::test]
async fn rejected_signup_never_requests_token() {
    let client = client();
    http(&client).mock_response(HttpMethod::Post, &url("/user"), 400, json!({}));
    client.state().borrow_mut().login.switch_mode(AuthMode::Signup);
    fill_credentials(&client, "a@b.com", "pw");

    client.submit_credentials().await;

    let state = client.state().borrow();
    assert!(state.login.wrong_credentials);
    assert_eq!(state.login.draft.password, "pw");
    assert_eq!(http(&client).count(HttpMethod::Post, &url("/token")), 0);
}

// =========================================================
// Meetings
// =========================================================

#[tokio::test]
async fn meetings_are_fetched_only_on_refresh_and_keep_order() {
    let client = logged_in();
    client.go_to(Screen::Meetings);
    assert_eq!(http(&client).requests.borrow().len(), 0);

    http(&client).mock_response(
        HttpMethod::Get,
        &url("/meetings"),
        200,
        json!([
            {"id": "b", "datetime_start": "2021-03-01T10:00:00", "datetime_end": "2021-03-01T11:00:00", "location": "L2", "subject": "S2"},
            {"id": "a", "datetime_start": "2021-03-01T09:00:00", "datetime_end": "2021-03-01T09:30:00", "location": "L1", "subject": "S1"}
        ]),
    );
    client.refresh_meetings().await;

    let state = client.state().borrow();
    let ids: Vec<_> = state
        .meetings
        .list
        .meetings
        .value()
        .unwrap()
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[tokio::test]
async fn creating_a_meeting_shows_created_then_leave_resets() {
    let client = logged_in();
    client.go_to_meetings_action(MeetingsAction::Create);
    http(&client).mock_response(
        HttpMethod::Post,
        &url("/meetings"),
        200,
        json!({"id": "m1", "location": "Room A", "subject": "Sync"}),
    );
    {
        let mut state = client.state().borrow_mut();
        state.meetings.create.draft.hours = "2".to_string();
        state.meetings.create.draft.location = "Room A".to_string();
        state.meetings.create.draft.subject = "Sync".to_string();
    }

    client.create_meeting().await;
    {
        let state = client.state().borrow();
        let created = state.meetings.create.created().unwrap();
        assert_eq!(
            (created.id.as_str(), created.location.as_str(), created.subject.as_str()),
            ("m1", "Room A", "Sync")
        );
    }
    let (_, _, _, body) = http(&client).last_request().unwrap();
    assert_eq!(body.as_deref(), Some("hours=2&location=Room+A&subject=Sync"));

    client.leave_created_meeting();
    let state = client.state().borrow();
    assert!(state.meetings.create.created().is_none());
    assert_eq!(state.meetings.create.draft, meetings::MeetingDraft::default());
}

#[tokio::test]
async fn invalid_hours_are_never_sent() {
    let client = logged_in();
    client.go_to_meetings_action(MeetingsAction::Create);
    {
        let mut state = client.state().borrow_mut();
        state.meetings.create.draft.hours = "soon".to_string();
        state.meetings.create.draft.location = "Room A".to_string();
    }

    client.create_meeting().await;
    {
        let state = client.state().borrow();
        assert!(state.meetings.create.invalid_hours);
        assert_eq!(state.meetings.create.draft.hours, "soon");
    }
    assert_eq!(http(&client).count(HttpMethod::Post, &url("/meetings")), 0);

    http(&client).mock_response(
        HttpMethod::Post,
        &url("/meetings"),
        200,
        json!({"id": "m2", "location": "Room A", "subject": ""}),
    );
    client.state().borrow_mut().meetings.create.draft.hours = "1.5".to_string();
    client.create_meeting().await;

    let (_, _, _, body) = http(&client).last_request().unwrap();
    assert_eq!(body.as_deref(), Some("hours=1.5&location=Room+A&subject="));
    assert!(!client.state().borrow().meetings.create.invalid_hours);
}

#[tokio::test]
async fn joining_unknown_meeting_reports_not_found() {
    let client = logged_in();
    client.go_to_meetings_action(MeetingsAction::Join);
    client.state().borrow_mut().meetings.join.meeting_id = "zzz".to_string();

    client.join_meeting().await;

    let state = client.state().borrow();
    assert_eq!(state.meetings.join.failure, Some(meetings::JoinFailure::NotFound));
    assert_eq!(state.meetings.join.meeting_id, "zzz");
    assert!(state.session().is_authenticated());
}

#[tokio::test]
async fn joining_a_meeting() {
    let client = logged_in();
    client.go_to_meetings_action(MeetingsAction::Join);
    http(&client).mock_response(
        HttpMethod::Post,
        &url("/meetings/m1/join"),
        200,
        json!({"id": "m1", "location": "Room A", "subject": "Sync"}),
    );
    client.state().borrow_mut().meetings.join.meeting_id = "m1".to_string();

    client.join_meeting().await;

    let (_, _, headers, _) = http(&client).last_request().unwrap();
    assert!(headers.contains(&("Authorization".to_string(), "Bearer T".to_string())));
    assert_eq!(
        client.state().borrow().meetings.join.joined().map(|m| m.id.clone()),
        Some("m1".to_string())
    );
}

// =========================================================
// Profile / recommendations / marketplace
// =========================================================

#[tokio::test]
async fn profile_loads_once_per_visit() {
    let client = logged_in();
    client.go_to(Screen::Profile);
    http(&client).mock_response(HttpMethod::Post, &url("/points"), 200, profile_json(7, &[]));

    client.load_profile(LoadPolicy::Once).await;
    client.load_profile(LoadPolicy::Once).await;
    assert_eq!(http(&client).count(HttpMethod::Post, &url("/points")), 1);
    assert_eq!(
        client.state().borrow().profile.user.value().map(|u| u.points),
        Some(7)
    );

    // 离开再回来会重新加载
    client.back();
    client.go_to(Screen::Profile);
    client.load_profile(LoadPolicy::Once).await;
    assert_eq!(http(&client).count(HttpMethod::Post, &url("/points")), 2);
}

#[test]
fn mount_while_loading_issues_no_second_request() {
    let client = logged_in();
    let first = client
        .state()
        .borrow_mut()
        .profile
        .user
        .begin(LoadPolicy::Once);
    assert!(first);

    // 第二次挂载发生在第一次请求落定之前
    let mut state = client.state().borrow_mut();
    assert!(state.ticket(Scope::Profile).is_some());
    assert!(!state.profile.user.begin(LoadPolicy::Once));
}

#[tokio::test]
async fn adding_an_interest_replaces_user() {
    let client = logged_in();
    client.go_to(Screen::Profile);
    http(&client).mock_response(HttpMethod::Post, &url("/points"), 200, profile_json(1, &["go"]));
    http(&client).mock_response(HttpMethod::Post, &url("/user/interests"), 200, profile_json(1, &["chess"]));
    client.load_profile(LoadPolicy::Once).await;

    client.state().borrow_mut().profile.interest_draft = "chess".to_string();
    client.add_interest().await;

    let state = client.state().borrow();
    assert_eq!(
        state.profile.user.value().unwrap().interests,
        vec!["chess".to_string()]
    );
    assert!(state.profile.interest_draft.is_empty());
    let (_, _, _, body) = http(&client).last_request().unwrap();
    assert_eq!(body.as_deref(), Some(r#"["chess"]"#));
}

#[tokio::test]
async fn recommendations_load_once_and_fail_quietly() {
    let client = logged_in();
    client.go_to(Screen::Recommendations);
    http(&client).mock_response(HttpMethod::Get, &url("/recommendations"), 503, json!(null));

    client.load_recommendations(LoadPolicy::Once).await;
    client.load_recommendations(LoadPolicy::Once).await;
    assert!(client.state().borrow().recommendations.users.is_failed());
    assert_eq!(http(&client).count(HttpMethod::Get, &url("/recommendations")), 1);

    client.load_recommendations(LoadPolicy::Retry).await;
    assert_eq!(http(&client).count(HttpMethod::Get, &url("/recommendations")), 2);
}

#[tokio::test]
async fn failed_purchase_sets_error_and_refreshes_balance() {
    let client = logged_in();
    client.go_to(Screen::Marketplace);
    http(&client).mock_response(HttpMethod::Post, &url("/points"), 200, profile_json(3, &[]));
    http(&client).mock_response(HttpMethod::Post, &url("/buy/pizza"), 400, json!({"detail": "not enough"}));
    client.load_balance(LoadPolicy::Once).await;

    client.buy_pizza().await;

    let state = client.state().borrow();
    assert!(state.marketplace.error);
    assert!(!state.marketplace.success);
    assert_eq!(http(&client).count(HttpMethod::Post, &url("/points")), 2);
}

#[tokio::test]
async fn successful_purchase_shows_new_balance() {
    let client = logged_in();
    client.go_to(Screen::Marketplace);
    http(&client).mock_response(HttpMethod::Post, &url("/points"), 200, profile_json(30, &[]));
    http(&client).mock_response(HttpMethod::Post, &url("/points"), 200, profile_json(20, &[]));
    http(&client).mock_raw(HttpMethod::Post, &url("/buy/pizza"), 204, "");
    client.load_balance(LoadPolicy::Once).await;
    assert_eq!(client.state().borrow().marketplace.points(), Some(30));

    client.buy_pizza().await;

    let state = client.state().borrow();
    assert!(state.marketplace.success);
    assert!(!state.marketplace.error);
    assert_eq!(state.marketplace.points(), Some(20));
}

// =========================================================
// Failure handling across controllers
// =========================================================

#[tokio::test]
async fn unauthorized_response_expires_session() {
    let client = logged_in();
    client.go_to(Screen::Recommendations);
    http(&client).mock_response(HttpMethod::Get, &url("/recommendations"), 401, json!({}));

    client.load_recommendations(LoadPolicy::Once).await;

    let state = client.state().borrow();
    assert!(!state.session().is_authenticated());
    assert_eq!(state.view(), View::Login);
    assert!(state.login.session_expired);
    assert!(state.recommendations.users.is_not_loaded());
}

#[tokio::test]
async fn network_failure_is_recoverable() {
    let client = logged_in();
    client.go_to(Screen::Profile);
    http(&client).go_offline();

    client.load_profile(LoadPolicy::Once).await;

    let state = client.state().borrow();
    assert!(state.profile.user.is_failed());
    assert!(state.session().is_authenticated());
}

#[test]
fn stale_response_after_leaving_is_dropped() {
    let client = logged_in();
    client.go_to(Screen::Profile);
    let ticket = {
        let mut state = client.state().borrow_mut();
        state.profile.user.begin(LoadPolicy::Once);
        state.ticket(Scope::Profile).unwrap()
    };

    client.back();
    client.go_to(Screen::Profile);

    let user: UserProfile = serde_json::from_value(profile_json(9, &[])).unwrap();
    client
        .state()
        .borrow_mut()
        .settle(&ticket, Ok(user), |s, r| s.profile.user.resolve(r));
    assert!(client.state().borrow().profile.user.is_not_loaded());
}

#[test]
fn stale_unauthorized_from_previous_session_is_ignored() {
    let client = logged_in();
    client.go_to(Screen::Marketplace);
    let ticket = client.state().borrow().ticket(Scope::Marketplace).unwrap();

    client.logout();
    client.state().borrow_mut().login("T-new".to_string());
    client.state().borrow_mut().settle(
        &ticket,
        Err::<(), _>(ApiError::Request { status: 401 }),
        |s, r| s.marketplace.finish_purchase(r),
    );

    let state = client.state().borrow();
    assert_eq!(state.session().token(), Some("T-new"));
    assert!(!state.marketplace.error);
}

#[test]
fn concurrent_refreshes_last_write_wins() {
    let client = logged_in();
    client.go_to(Screen::Meetings);
    let (first, second) = {
        let mut state = client.state().borrow_mut();
        state.meetings.list.meetings.begin(LoadPolicy::Refresh);
        let first = state.ticket(Scope::MeetingsList).unwrap();
        state.meetings.list.meetings.begin(LoadPolicy::Refresh);
        let second = state.ticket(Scope::MeetingsList).unwrap();
        (first, second)
    };

    let mut state = client.state().borrow_mut();
    state.settle(&second, Ok(Vec::new()), |s, r| s.meetings.list.meetings.resolve(r));
    state.settle(&first, Err(ApiError::Request { status: 500 }), |s, r| {
        s.meetings.list.meetings.resolve(r)
    });
    assert!(state.meetings.list.meetings.is_failed());
}

#[test]
fn every_screen_reset_starts_a_new_epoch() {
    let mut state = ClientState::default();
    let scopes = [
        Scope::MeetingsList,
        Scope::MeetingsCreate,
        Scope::MeetingsJoin,
        Scope::Profile,
        Scope::Recommendations,
        Scope::Marketplace,
    ];
    let before: Vec<Epoch> = scopes.iter().map(|&scope| state.epoch(scope)).collect();
    let login_before = state.login.epoch();

    state.meetings.create.draft.location = "Room A".to_string();
    state.marketplace.error = true;
    state.logout();

    for (scope, epoch) in scopes.iter().zip(before) {
        assert_ne!(state.epoch(*scope), epoch, "{scope:?}");
    }
    assert_ne!(state.login.epoch(), login_before);
    assert!(state.meetings.create.draft.location.is_empty());
    assert!(!state.marketplace.error);
}
