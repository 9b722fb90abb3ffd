//! HTTP request handlers.
//!
//! One module per capability group: authentication, predict, history,
//! search, plus the public health check.

pub mod authentication;
pub mod health;
pub mod history;
pub mod predict;
pub mod search;
