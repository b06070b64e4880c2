//! Request and response bodies for the admin API.

pub mod request;
pub mod response;
