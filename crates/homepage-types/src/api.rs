use serde::{Deserialize, Serialize};

// -- Guestbook --

/// Body of `POST /guestbook`. The server fills in id, date and created_at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGuestbookEntry {
    pub name: String,
    pub message: String,
}

impl NewGuestbookEntry {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

// -- Health --

/// Body of `GET /health`: `{"status":"ok"}` when the service is up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
