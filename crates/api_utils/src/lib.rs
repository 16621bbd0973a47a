pub mod claims;
pub mod context;
pub mod notify;
pub mod request;
pub mod subscription;
pub mod utils;

/// Name of the auth cookie the frontend sets after login.
pub static AUTH_COOKIE_NAME: &str = "jwt";
