//! Client for the guestbook / visitor-count service.
//!
//! Every operation comes in two flavours: a `try_*` method that reports the
//! exact failure as an [`ApiError`], and a public adapter that logs the
//! failure and hands back a fallback value instead. Callers rendering a page
//! use the adapters and never see an error.

pub mod client;
pub mod config;
pub mod error;

pub use client::{ApiClient, FALLBACK_VISITOR_COUNT};
pub use config::{API_URL_VAR, ApiConfig};
pub use error::{ApiError, FailureKind};
