pub mod classify;
pub mod normalize;
pub mod request;
