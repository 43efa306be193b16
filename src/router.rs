use crate::domain::model::ResponseKind;
use crate::domain::ports::Router;
use crate::domain::request::{HttpMethod, RequestDescriptor};

/// Endpoints exposed by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRouter {
    Login { email: String, password: String },
}

impl ApiRouter {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        ApiRouter::Login {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Router for ApiRouter {
    fn descriptor(&self) -> RequestDescriptor {
        match self {
            ApiRouter::Login { email, password } => {
                RequestDescriptor::new(HttpMethod::Post, "login")
                    .with_parameter("email", email.as_str())
                    .with_parameter("password", password.as_str())
            }
        }
    }

    fn response_kind(&self) -> ResponseKind {
        match self {
            ApiRouter::Login { .. } => ResponseKind::Login,
        }
    }
}
