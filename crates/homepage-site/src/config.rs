use std::path::PathBuf;

use clap::ValueEnum;
use tracing::warn;

use homepage_client::ApiConfig;

use crate::cli::Cli;

pub const MODE_VAR: &str = "HOMEPAGE_MODE";
pub const CONTENT_DIR_VAR: &str = "HOMEPAGE_CONTENT_DIR";

/// Live talks to the guestbook service; static serves the bundled snapshots.
/// Blog posts always come from fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Live,
    Static,
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub api: ApiConfig,
    pub content_dir: Option<PathBuf>,
    pub mode: Mode,
}

impl SiteConfig {
    /// Environment first, then command-line overrides on top.
    pub fn load(cli: &Cli) -> Self {
        let api = match &cli.api_url {
            Some(url) => ApiConfig::new(url.as_str()),
            None => ApiConfig::from_env(),
        };

        let content_dir = cli.content.clone().or_else(|| {
            std::env::var(CONTENT_DIR_VAR)
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
        });

        let mode = cli
            .mode
            .unwrap_or_else(|| resolve_mode(std::env::var(MODE_VAR).ok().as_deref(), &api));

        if mode == Mode::Live && !api.is_configured() {
            warn!("Live mode without an API URL; guestbook and visitor count will use fallbacks");
        }

        Self {
            api,
            content_dir,
            mode,
        }
    }
}

/// An explicit mode wins; otherwise live when an API URL is configured.
fn resolve_mode(raw: Option<&str>, api: &ApiConfig) -> Mode {
    if let Some(raw) = raw.filter(|r| !r.trim().is_empty()) {
        match Mode::from_str(raw.trim(), true) {
            Ok(mode) => return mode,
            Err(_) => warn!("Ignoring unknown {} value {:?}", MODE_VAR, raw),
        }
    }
    if api.is_configured() { Mode::Live } else { Mode::Static }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_defaults_follow_api_config() {
        assert_eq!(resolve_mode(None, &ApiConfig::new("http://pi:8080")), Mode::Live);
        assert_eq!(resolve_mode(None, &ApiConfig::unconfigured()), Mode::Static);
        assert_eq!(resolve_mode(Some(""), &ApiConfig::unconfigured()), Mode::Static);
    }

    #[test]
    fn explicit_mode_wins() {
        assert_eq!(resolve_mode(Some("static"), &ApiConfig::new("http://pi:8080")), Mode::Static);
        assert_eq!(resolve_mode(Some(" LIVE "), &ApiConfig::unconfigured()), Mode::Live);
        assert_eq!(resolve_mode(Some("Static"), &ApiConfig::new("http://pi:8080")), Mode::Static);
    }

    #[test]
    fn unknown_mode_falls_back_to_default() {
        assert_eq!(resolve_mode(Some("demo"), &ApiConfig::new("http://pi:8080")), Mode::Live);
    }
}
