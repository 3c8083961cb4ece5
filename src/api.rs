// API client module: a small blocking HTTP client that talks to the
// actions service. One request is in flight at a time.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::model::{Action, AuthRequest, AuthResponse, ErrorResponse, QueryParam};

const AUTH_PATH: &str = "auth";
const REGISTER_PATH: &str = "register";
const ITEM_PATH: &str = "api/item";

/// Client context: the reqwest blocking client, the base URL of the
/// service and the bearer token used for authenticated calls.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client for `base_url`. A trailing `/` is expected so that
    /// endpoint paths resolve below it.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let client = Client::builder().build()?;
        Ok(ApiClient {
            client,
            base_url,
            token: None,
        })
    }

    /// Store a token for subsequent authenticated requests.
    pub fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    fn auth_headers(&self) -> Result<HeaderMap, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::Unauthenticated)?;
        let mut headers = HeaderMap::new();
        let val = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| ApiError::Unauthenticated)?;
        headers.insert(AUTHORIZATION, val);
        Ok(headers)
    }

    fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let req = req.build()?;
        debug!(method = %req.method(), url = %req.url(), "sending request");
        let res = self.client.execute(req)?;
        debug!(status = %res.status(), "received response");
        Ok(res)
    }

    /// Log in and return the token. An empty token means the credentials
    /// were rejected; 400, 401 and 403 all count as a rejection.
    pub fn login(&self, req: &AuthRequest) -> Result<String, ApiError> {
        let url = self.url(AUTH_PATH)?;
        let res = self.send(self.client.post(url).json(req))?;
        if matches!(res.status(), StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Ok(String::new());
        }
        let resp: AuthResponse = decode(res)?;
        Ok(resp.token)
    }

    /// Register a new user.
    pub fn register(&self, req: &AuthRequest) -> Result<(), ApiError> {
        let url = self.url(REGISTER_PATH)?;
        let res = self.send(self.client.post(url).json(req))?;
        check_status(res).map(|_| ())
    }

    /// `GET /api/item`, optionally filtered by exactly one parameter.
    pub fn list_actions(&self, filter: Option<&QueryParam>) -> Result<Vec<Action>, ApiError> {
        let headers = self.auth_headers()?;
        let mut req = self.client.get(self.url(ITEM_PATH)?).headers(headers);
        if let Some(param) = filter {
            req = req.query(&[(param.name(), param.value())]);
        }
        let res = self.send(req)?;
        let actions: Option<Vec<Action>> = decode(res)?;
        Ok(actions.unwrap_or_default())
    }

    /// Fetch one action by id. `None` when the service has no such record.
    pub fn get_action(&self, id: &str) -> Result<Option<Action>, ApiError> {
        let headers = self.auth_headers()?;
        let param = QueryParam::Id(id.to_string());
        let req = self
            .client
            .get(self.url(ITEM_PATH)?)
            .headers(headers)
            .query(&[(param.name(), param.value())]);
        let res = self.send(req)?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let action: Option<Action> = decode(res)?;
        Ok(action.filter(|a| !a.is_empty()))
    }

    /// `POST /api/item`. Creates the action, or replaces it when `id` is set.
    pub fn save_action(&self, action: &Action) -> Result<Action, ApiError> {
        let headers = self.auth_headers()?;
        let req = self.client.post(self.url(ITEM_PATH)?).headers(headers).json(action);
        let res = self.send(req)?;
        decode(res)
    }
}

/// Map non-success statuses to errors. A 400 body is decoded as the
/// service's error record.
fn check_status(res: Response) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().unwrap_or_default();
    if status == StatusCode::BAD_REQUEST {
        let err: ErrorResponse = serde_json::from_str(&body).unwrap_or_default();
        let message = match err.text() {
            m if m.is_empty() => body,
            m => m,
        };
        return Err(ApiError::BadRequest { message });
    }
    Err(ApiError::Status { status, body })
}

fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
    let res = check_status(res)?;
    let body = res.text()?;
    // An empty body decodes like JSON null.
    let body = if body.trim().is_empty() { "null" } else { body.as_str() };
    Ok(serde_json::from_str(body)?)
}
