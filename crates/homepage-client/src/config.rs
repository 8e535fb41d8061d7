use crate::error::ApiError;

/// Environment variable holding the service base URL.
pub const API_URL_VAR: &str = "HOMEPAGE_API_URL";

/// Where the guestbook service lives. A missing base URL is a normal state
/// (static builds, previews), not an error: the client just never dials out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Option<String>,
}

impl ApiConfig {
    /// Blank URLs count as "not configured".
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        Self {
            base_url: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        }
    }

    pub fn unconfigured() -> Self {
        Self { base_url: None }
    }

    /// Read the base URL from `HOMEPAGE_API_URL`. Unset and blank both yield an
    /// unconfigured client.
    pub fn from_env() -> Self {
        std::env::var(API_URL_VAR)
            .map(Self::new)
            .unwrap_or_else(|_| Self::unconfigured())
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Full URL for an endpoint path such as `/guestbook`.
    pub fn endpoint(&self, path: &str) -> Result<String, ApiError> {
        let base = self.base_url.as_deref().ok_or(ApiError::NotConfigured)?;
        Ok(format!("{}{}", base, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn joins_base_and_path() {
        let config = ApiConfig::new("http://pi.local:8080");
        assert_eq!(config.endpoint("/guestbook").unwrap(), "http://pi.local:8080/guestbook");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ApiConfig::new("http://pi.local:8080/");
        assert_eq!(config.base_url(), Some("http://pi.local:8080"));
        assert_eq!(
            config.endpoint("/visitor-count").unwrap(),
            "http://pi.local:8080/visitor-count"
        );
    }

    #[test]
    fn blank_url_is_unconfigured() {
        assert!(!ApiConfig::new("").is_configured());
        assert!(!ApiConfig::new("   ").is_configured());
        assert_eq!(ApiConfig::new(""), ApiConfig::unconfigured());
    }

    #[test]
    fn unconfigured_endpoint_fails_fast() {
        let err = ApiConfig::unconfigured().endpoint("/guestbook").unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotConfigured);
    }
}
