//! 客户端驱动
//!
//! 把用户操作翻译成"签发票据 -> 调用网关 -> 落定结果"三步。
//! 每个操作都是一次独立的请求，不取消、不去重；同一实体的并发请求以后落定者为准。

use super::route::{MeetingsAction, Screen};
use super::{ClientState, LoadPolicy, Scope, StateCell, Ticket};
use crate::api::{ApiError, ApiGateway};
use crate::web::HttpClient;
use meetpoint_shared::protocol::{
    BuyPizzaRequest, ListMeetingsRequest, PointsRequest, RecommendationsRequest,
};
use meetpoint_shared::{LoginForm, TokenResponse};

use super::login::AuthMode;

#[derive(Clone)]
pub struct Client<S, H> {
    state: S,
    api: ApiGateway<H>,
}

impl<S: StateCell, H: HttpClient> Client<S, H> {
    pub fn new(state: S, api: ApiGateway<H>) -> Self {
        Self { state, api }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn api(&self) -> &ApiGateway<H> {
        &self.api
    }

    /// 签发票据并执行 `start`；未登录或 `start` 拒绝时返回 None
    fn begin<T>(
        &self,
        scope: Scope,
        start: impl FnOnce(&mut ClientState) -> Option<T>,
    ) -> Option<(Ticket, T)> {
        self.state
            .update_state(|s| {
                let ticket = s.ticket(scope)?;
                let value = start(s)?;
                Some((ticket, value))
            })
            .flatten()
    }

    fn settle<T>(
        &self,
        ticket: &Ticket,
        result: Result<T, ApiError>,
        apply: impl FnOnce(&mut ClientState, Result<T, ApiError>),
    ) {
        self.state.update_state(|s| s.settle(ticket, result, apply));
    }

    // =========================================================
    // 会话与导航（同步）
    // =========================================================

    pub fn logout(&self) {
        self.state.update_state(ClientState::logout);
    }

    pub fn go_to(&self, screen: Screen) -> bool {
        self.state
            .update_state(|s| s.go_to(screen))
            .unwrap_or(false)
    }

    pub fn go_to_meetings_action(&self, action: MeetingsAction) -> bool {
        self.state
            .update_state(|s| s.go_to_meetings_action(action))
            .unwrap_or(false)
    }

    pub fn back(&self) -> bool {
        self.state.update_state(ClientState::back).unwrap_or(false)
    }

    // =========================================================
    // 登录 / 注册
    // =========================================================

    async fn request_token(&self, form: &LoginForm) -> Result<String, ApiError> {
        self.api
            .call(None, form)
            .await
            .map(|TokenResponse { access_token, .. }| access_token)
    }

    /// 按当前模式提交登录或注册
    ///
    /// 注册本身不签发 Token，成功后用同一组凭据再登录一次；
    /// 这次登录失败时呈现的是登录失败状态。
    pub async fn submit_credentials(&self) {
        let Some(submission) = self
            .state
            .update_state(|s| s.login.begin_submit())
            .flatten()
        else {
            return;
        };

        if submission.mode == AuthMode::Signup {
            if let Err(err) = self.api.call(None, &submission.signup_request()).await {
                self.state
                    .update_state(|s| s.finish_signup_failure(submission.epoch, err));
                return;
            }
            log::info!("[Auth] signup accepted, logging in");
        }

        let result = self.request_token(&submission.login_form()).await;
        self.state
            .update_state(|s| s.finish_login(submission.epoch, result));
    }

    // =========================================================
    // 会议
    // =========================================================

    pub async fn refresh_meetings(&self) {
        let Some((ticket, ())) = self.begin(Scope::MeetingsList, |s| {
            s.meetings.list.meetings.begin(LoadPolicy::Refresh);
            Some(())
        }) else {
            return;
        };
        let result = self.api.call(Some(&ticket.token), &ListMeetingsRequest).await;
        self.settle(&ticket, result, |s, r| s.meetings.list.meetings.resolve(r));
    }

    pub async fn create_meeting(&self) {
        let Some((ticket, form)) =
            self.begin(Scope::MeetingsCreate, |s| s.meetings.create.begin_submit())
        else {
            return;
        };
        let result = self.api.call(Some(&ticket.token), &form).await;
        self.settle(&ticket, result, |s, r| s.meetings.create.finish_submit(r));
    }

    pub async fn join_meeting(&self) {
        let Some((ticket, request)) =
            self.begin(Scope::MeetingsJoin, |s| s.meetings.join.begin_submit())
        else {
            return;
        };
        let result = self.api.call(Some(&ticket.token), &request).await;
        self.settle(&ticket, result, |s, r| s.meetings.join.finish_submit(r));
    }

    pub fn leave_created_meeting(&self) {
        self.state.update_state(|s| s.meetings.create.leave());
    }

    pub fn leave_joined_meeting(&self) {
        self.state.update_state(|s| s.meetings.join.leave());
    }

    // =========================================================
    // 个人资料
    // =========================================================

    pub async fn load_profile(&self, policy: LoadPolicy) {
        let Some((ticket, ())) = self.begin(Scope::Profile, |s| {
            s.profile.user.begin(policy).then_some(())
        }) else {
            return;
        };
        log::debug!("[Profile] loading profile through the points endpoint");
        let result = self.api.call(Some(&ticket.token), &PointsRequest).await;
        self.settle(&ticket, result, |s, r| s.profile.user.resolve(r));
    }

    pub async fn add_interest(&self) {
        let Some((ticket, request)) =
            self.begin(Scope::Profile, |s| s.profile.take_interest())
        else {
            return;
        };
        let result = self.api.call(Some(&ticket.token), &request).await;
        self.settle(&ticket, result, |s, r| s.profile.finish_add_interest(r));
    }

    // =========================================================
    // 推荐
    // =========================================================

    pub async fn load_recommendations(&self, policy: LoadPolicy) {
        let Some((ticket, ())) = self.begin(Scope::Recommendations, |s| {
            s.recommendations.users.begin(policy).then_some(())
        }) else {
            return;
        };
        let result = self
            .api
            .call(Some(&ticket.token), &RecommendationsRequest)
            .await;
        self.settle(&ticket, result, |s, r| s.recommendations.users.resolve(r));
    }

    // =========================================================
    // 市场
    // =========================================================

    pub async fn load_balance(&self, policy: LoadPolicy) {
        let Some((ticket, ())) = self.begin(Scope::Marketplace, |s| {
            s.marketplace.balance.begin(policy).then_some(())
        }) else {
            return;
        };
        log::debug!("[Market] loading balance through the points endpoint");
        let result = self.api.call(Some(&ticket.token), &PointsRequest).await;
        self.settle(&ticket, result, |s, r| s.marketplace.balance.resolve(r));
    }

    /// 购买后无论结果如何都刷新余额，但只在仍处于同一个市场屏幕生命周期时
    pub async fn buy_pizza(&self) {
        let Some((ticket, ())) = self.begin(Scope::Marketplace, |s| {
            s.marketplace.begin_purchase();
            Some(())
        }) else {
            return;
        };
        let result = self.api.call(Some(&ticket.token), &BuyPizzaRequest).await;
        self.settle(&ticket, result, |s, r| s.marketplace.finish_purchase(r));

        let same_scope = self
            .state
            .read_state(|s| s.epoch(Scope::Marketplace) == ticket.epoch)
            .unwrap_or(false);
        if same_scope {
            self.load_balance(LoadPolicy::Refresh).await;
        }
    }
}
