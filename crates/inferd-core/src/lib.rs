//! Core types shared across the inferd service.
//!
//! This crate provides the caller identity carried in bearer tokens and the
//! strongly-typed identifiers used by the prediction store.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod identity;
pub mod ids;

pub use identity::{Credentials, Identity};
pub use ids::{IdError, PredictionId};
