pub const SUCCESS_CODE: &str = "HH200";
pub const SESSION_EXPIRED_CODE: &str = "HH101";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Success,
    Failure,
    SessionExpired,
}

impl Classification {
    pub fn is_success(self) -> bool {
        self == Classification::Success
    }
}

pub fn classify(status_code: &str) -> Classification {
    if status_code == SESSION_EXPIRED_CODE {
        return Classification::SessionExpired;
    }
    if status_code == SUCCESS_CODE {
        Classification::Success
    } else {
        Classification::Failure
    }
}
