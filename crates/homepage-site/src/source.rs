use anyhow::{Context, Result, anyhow, bail};
use tracing::info;

use homepage_client::ApiClient;
use homepage_content::{ContentStore, DirFixtures};
use homepage_types::{BlogPost, GuestbookEntry};

use crate::config::{Mode, SiteConfig};

enum Content {
    Bundled,
    Loaded(ContentStore),
}

/// What a page sees: blog posts from fixtures, plus guestbook and visitor data
/// from either the API (live) or the fixture snapshots (static).
pub struct SiteData {
    content: Content,
    api: Option<ApiClient>,
}

impl SiteData {
    pub fn open(config: &SiteConfig) -> Result<Self> {
        let content = match &config.content_dir {
            Some(dir) => {
                let fixtures = DirFixtures::new(dir);
                let store = ContentStore::open(&fixtures).with_context(|| {
                    format!("Failed to load content from {}", fixtures.root().display())
                })?;
                Content::Loaded(store)
            }
            None => Content::Bundled,
        };

        let api = match config.mode {
            Mode::Live => Some(ApiClient::new(config.api.clone())),
            Mode::Static => None,
        };

        info!(
            "Site data ready (mode: {:?}, api: {})",
            config.mode,
            api.as_ref()
                .and_then(|api| api.config().base_url())
                .unwrap_or("none")
        );
        Ok(Self { content, api })
    }

    pub fn content(&self) -> &ContentStore {
        match &self.content {
            Content::Bundled => ContentStore::bundled(),
            Content::Loaded(store) => store,
        }
    }

    pub fn is_live(&self) -> bool {
        self.api.is_some()
    }

    // -- Blog --

    pub fn posts(&self) -> &[BlogPost] {
        self.content().blog_posts()
    }

    pub fn post(&self, slug: &str) -> Result<&BlogPost> {
        self.content()
            .post_by_slug(slug)
            .ok_or_else(|| anyhow!("Blog post not found: {}", slug))
    }

    // -- Guestbook / visitors --

    pub async fn guestbook_entries(&self) -> Vec<GuestbookEntry> {
        match &self.api {
            Some(api) => api.guestbook_entries().await,
            None => self.content().guestbook_entries().to_vec(),
        }
    }

    pub async fn visitor_count(&self) -> i64 {
        match &self.api {
            Some(api) => api.visitor_count().await,
            None => self.content().visitor_count(),
        }
    }

    pub async fn sign(&self, name: &str, message: &str) -> Result<GuestbookEntry> {
        let Some(api) = &self.api else {
            bail!("Signing the guestbook needs live mode");
        };
        api.add_guestbook_entry(name, message)
            .await
            .ok_or_else(|| anyhow!("Failed to add guestbook entry"))
    }

    /// `None` in static mode, where there is no service to ask.
    pub async fn healthy(&self) -> Option<bool> {
        match &self.api {
            Some(api) => Some(api.is_healthy().await),
            None => None,
        }
    }
}
