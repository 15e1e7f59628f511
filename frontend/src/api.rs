//! API 网关
//!
//! 负责：拼接 URL、按端点编码请求体、附加 Bearer Token、
//! 把非 2xx 响应翻译成 [`ApiError`]。不重试，不缓存，每次调用至多发出一个请求。

use crate::web::{HttpClient, HttpError, HttpRequest};
use meetpoint_shared::{
    ApiRequest, BodyEncoding, CONTENT_TYPE_FORM, CONTENT_TYPE_JSON, HEADER_AUTHORIZATION,
};
use thiserror::Error;
use url::Url;


/// 网关错误
///
/// 失败响应的响应体不做解析，只保留状态码。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 登录/注册被拒绝
    #[error("credentials rejected (status {status})")]
    Authentication { status: u16 },
    /// 已认证请求返回非 2xx
    #[error("request failed with status {status}")]
    Request { status: u16 },
    /// 网络层失败
    #[error(transparent)]
    Transport(#[from] HttpError),
    /// 2xx 但响应体与模型不符
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Authentication { status } | ApiError::Request { status } => Some(*status),
            _ => None,
        }
    }

    /// 已认证请求被服务端以 401 拒绝，意味着 Token 失效
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Request { status: 401 })
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiGateway<H> {
    base_url: Url,
    http: H,
}

impl<H: HttpClient> ApiGateway<H> {
    pub fn new(base_url: Url, http: H) -> Self {
        Self { base_url, http }
    }

    #[cfg(test)]
    pub fn http(&self) -> &H {
        &self.http
    }

    /// 拼接端点 URL，每个路径段单独转义
    fn url(&self, segments: &[String]) -> Result<String, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Encode(format!("{} cannot be a base url", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    /// 构建传输层请求
    pub fn build_request<R: ApiRequest>(
        &self,
        token: Option<&str>,
        request: &R,
    ) -> Result<HttpRequest, ApiError> {
        let url = self.url(&request.segments())?;
        let mut http_request = HttpRequest::new(&url, R::METHOD);

        if R::AUTHENTICATED {
            if let Some(token) = token {
                http_request =
                    http_request.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
            }
        }

        match R::ENCODING {
            BodyEncoding::Empty => {}
            BodyEncoding::Json => {
                let body =
                    serde_json::to_string(request).map_err(|e| ApiError::Encode(e.to_string()))?;
                http_request = http_request
                    .with_header("Content-Type", CONTENT_TYPE_JSON)
                    .with_body(body);
            }
            BodyEncoding::Form => {
                let body = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(request.form_pairs())
                    .finish();
                http_request = http_request
                    .with_header("Content-Type", CONTENT_TYPE_FORM)
                    .with_body(body);
            }
        }

        Ok(http_request)
    }

    /// 调用端点
    pub async fn call<R: ApiRequest>(
        &self,
        token: Option<&str>,
        request: &R,
    ) -> Result<R::Response, ApiError> {
        let http_request = self.build_request(token, request)?;
        log::debug!("[Api] {} {}", R::METHOD, R::PATH);

        let response = self.http.send(http_request).await.map_err(|e| {
            log::warn!("[Api] {} {} transport failure: {}", R::METHOD, R::PATH, e);
            ApiError::from(e)
        })?;

        if !response.ok() {
            log::info!("[Api] {} {} -> {}", R::METHOD, R::PATH, response.status);
            let status = response.status;
            return Err(if R::AUTHENTICATED {
                ApiError::Request { status }
            } else {
                ApiError::Authentication { status }
            });
        }

        R::parse_response(&response.body).map_err(|e| {
            log::warn!("[Api] {} {} decode failure: {}", R::METHOD, R::PATH, e);
            ApiError::Decode(e.to_string())
        })
    }
}
