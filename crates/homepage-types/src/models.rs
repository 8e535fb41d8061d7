use serde::{Deserialize, Serialize};

/// A signed guestbook entry.
/// `id` and `created_at` are assigned by the server, so entries taken from the
/// static snapshot usually carry neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub message: String,
    /// Display date, e.g. "Jan 2".
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Singleton counter resource. The server bumps it on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorCount {
    pub id: i64,
    pub count: i64,
}

/// Shape of the bundled visitor-count fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorCountSnapshot {
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
    pub excerpt: String,
    pub content: String,
}
