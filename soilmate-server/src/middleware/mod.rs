//! HTTP middleware

mod attribution;

pub use attribution::{append_set_cookies, attribution_middleware, cookie_jar};
