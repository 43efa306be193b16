use serde::Serialize;
use serde_json::Value;

/// Decoded response body. Transient; lives for one call.
pub type Payload = serde_json::Map<String, Value>;

pub const STATUS_CODE_KEY: &str = "statusCode";
pub const MESSAGE_KEY: &str = "message";

/// Optional field extraction over a decoded payload.
///
/// Absent keys and type mismatches both come back as `None`.
pub trait PayloadExt {
    fn string_field(&self, key: &str) -> Option<String>;
    fn i64_field(&self, key: &str) -> Option<i64>;
}

impl PayloadExt for Payload {
    fn string_field(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::as_str).map(str::to_string)
    }

    fn i64_field(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl BaseResponse {
    pub fn from_payload(payload: &Payload) -> Self {
        Self {
            status_code: payload.string_field(STATUS_CODE_KEY),
            message: payload.string_field(MESSAGE_KEY),
        }
    }

    pub fn status_code(&self) -> Option<&str> {
        self.status_code.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(flatten)]
    base: BaseResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_in: Option<i64>,
}

impl LoginResponse {
    pub fn from_payload(payload: &Payload) -> Self {
        Self {
            base: BaseResponse::from_payload(payload),
            access_token: payload.string_field("accessToken"),
            refresh_token: payload.string_field("refreshToken"),
            user_id: payload.string_field("userId"),
            expires_in: payload.i64_field("expiresIn"),
        }
    }

    pub fn base(&self) -> &BaseResponse {
        &self.base
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Token lifetime in seconds.
    pub fn expires_in(&self) -> Option<i64> {
        self.expires_in
    }
}

/// Which response variant a router expects on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    #[default]
    Base,
    Login,
}

impl ResponseKind {
    pub fn build(self, payload: &Payload) -> ResponseModel {
        match self {
            ResponseKind::Base => ResponseModel::Base(BaseResponse::from_payload(payload)),
            ResponseKind::Login => ResponseModel::Login(LoginResponse::from_payload(payload)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseModel {
    Base(BaseResponse),
    Login(LoginResponse),
}

impl ResponseModel {
    pub fn kind(&self) -> ResponseKind {
        match self {
            ResponseModel::Base(_) => ResponseKind::Base,
            ResponseModel::Login(_) => ResponseKind::Login,
        }
    }

    pub fn base(&self) -> &BaseResponse {
        match self {
            ResponseModel::Base(base) => base,
            ResponseModel::Login(login) => login.base(),
        }
    }

    pub fn status_code(&self) -> Option<&str> {
        self.base().status_code()
    }

    pub fn message(&self) -> Option<&str> {
        self.base().message()
    }

    pub fn as_login(&self) -> Option<&LoginResponse> {
        match self {
            ResponseModel::Login(login) => Some(login),
            ResponseModel::Base(_) => None,
        }
    }
}
