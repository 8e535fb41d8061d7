//! Shared models for the homepage data-access layer.
//!
//! `models` holds the resources both data paths hand out (guestbook entries,
//! visitor counts, blog posts). `api` holds the request/response bodies that
//! only exist on the wire.

pub mod api;
pub mod models;

pub use api::{HealthStatus, NewGuestbookEntry};
pub use models::{BlogPost, GuestbookEntry, VisitorCount, VisitorCountSnapshot};
