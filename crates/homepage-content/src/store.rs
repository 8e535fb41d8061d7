use std::collections::HashSet;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use homepage_types::{BlogPost, GuestbookEntry, VisitorCountSnapshot};

use crate::fixtures::{BundledFixtures, Fixture, FixtureSource};

static FIXTURE_LOADS: AtomicUsize = AtomicUsize::new(0);

static BUNDLED: OnceLock<ContentStore> = OnceLock::new();

/// How many times fixtures have been loaded in this process.
pub fn fixture_loads() -> usize {
    FIXTURE_LOADS.load(Ordering::Relaxed)
}

/// Parsed, sorted content. Read-only once built.
#[derive(Debug, Default)]
pub struct ContentStore {
    posts: Vec<BlogPost>,
    guestbook: Vec<GuestbookEntry>,
    visitor_count: i64,
}

impl ContentStore {
    /// Load and parse every fixture from `source`. Posts end up newest first;
    /// posts sharing a date keep the source's order.
    pub fn open(source: &impl FixtureSource) -> Result<Self> {
        FIXTURE_LOADS.fetch_add(1, Ordering::Relaxed);

        let posts = load_posts(source.blog_posts()?)?;
        let guestbook: Vec<GuestbookEntry> = parse(&source.guestbook()?)?;
        let snapshot: VisitorCountSnapshot = parse(&source.visitor_count()?)?;

        info!(
            "Content loaded: {} posts, {} guestbook entries",
            posts.len(),
            guestbook.len()
        );
        Ok(Self {
            posts,
            guestbook,
            visitor_count: snapshot.count,
        })
    }

    /// The process-wide store built from [`BundledFixtures`].
    ///
    /// Built on first call and never rebuilt; concurrent first callers wait
    /// for the same load. Bundled fixtures that fail to parse leave an empty
    /// store behind (and an error in the log).
    pub fn bundled() -> &'static ContentStore {
        BUNDLED.get_or_init(|| {
            ContentStore::open(&BundledFixtures).unwrap_or_else(|e| {
                error!("Failed to load bundled content: {:#}", e);
                ContentStore::default()
            })
        })
    }

    // -- Blog --

    pub fn blog_posts(&self) -> &[BlogPost] {
        &self.posts
    }

    pub fn post_by_id(&self, id: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn post_by_slug(&self, slug: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|post| post.slug == slug)
    }

    /// Slugs of every post in display order: the set of post pages to prerender.
    pub fn post_slugs(&self) -> impl Iterator<Item = &str> {
        self.posts.iter().map(|post| post.slug.as_str())
    }

    // -- Snapshots --

    pub fn guestbook_entries(&self) -> &[GuestbookEntry] {
        &self.guestbook
    }

    pub fn visitor_count(&self) -> i64 {
        self.visitor_count
    }
}

fn parse<T: DeserializeOwned>(fixture: &Fixture) -> Result<T> {
    serde_json::from_str(&fixture.contents)
        .with_context(|| format!("Malformed fixture {}", fixture.name))
}

fn load_posts(fixtures: Vec<Fixture>) -> Result<Vec<BlogPost>> {
    let mut dated = fixtures
        .iter()
        .map(|fixture| {
            let post: BlogPost = parse(fixture)?;
            let date = parse_post_date(&post.date).ok_or_else(|| {
                anyhow!(
                    "Blog post '{}' ({}) has unsupported date {:?}, expected YYYY-MM-DD",
                    post.id,
                    fixture.name,
                    post.date
                )
            })?;
            Ok((date, post))
        })
        .collect::<Result<Vec<_>>>()?;

    // sort_by is stable, so equal dates keep fixture order.
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let mut ids = HashSet::new();
    let mut slugs = HashSet::new();
    for (_, post) in &dated {
        if !ids.insert(post.id.as_str()) {
            warn!("Duplicate blog post id '{}', only the newest is reachable", post.id);
        }
        if !slugs.insert(post.slug.as_str()) {
            warn!("Duplicate blog post slug '{}', only the newest is reachable", post.slug);
        }
    }

    Ok(dated.into_iter().map(|(_, post)| post).collect())
}

/// `YYYY-MM-DD` is read as midnight UTC; full RFC 3339 timestamps are also
/// accepted. Anything else is rejected rather than guessed at.
fn parse_post_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory source for tests.
    struct MemoryFixtures {
        posts: Vec<Fixture>,
        guestbook: &'static str,
        visitor_count: &'static str,
    }

    impl MemoryFixtures {
        fn with_posts(posts: Vec<Fixture>) -> Self {
            Self {
                posts,
                guestbook: "[]",
                visitor_count: r#"{"count": 7}"#,
            }
        }
    }

    impl FixtureSource for MemoryFixtures {
        fn blog_posts(&self) -> Result<Vec<Fixture>> {
            Ok(self.posts.clone())
        }

        fn guestbook(&self) -> Result<Fixture> {
            Ok(Fixture::new("guestbook.json", self.guestbook))
        }

        fn visitor_count(&self) -> Result<Fixture> {
            Ok(Fixture::new("visitor-count.json", self.visitor_count))
        }
    }

    fn post(id: &str, date: &str) -> Fixture {
        let json = serde_json::json!({
            "id": id,
            "title": format!("Post {}", id),
            "slug": format!("{}-slug", id),
            "date": date,
            "excerpt": "",
            "content": "",
        });
        Fixture::new(format!("{}.json", id), json.to_string())
    }

    fn dates(store: &ContentStore) -> Vec<&str> {
        store.blog_posts().iter().map(|p| p.date.as_str()).collect()
    }

    #[test]
    fn posts_sorted_newest_first() {
        let source = MemoryFixtures::with_posts(vec![
            post("a", "2024-01-01"),
            post("b", "2024-03-01"),
            post("c", "2024-02-01"),
        ]);
        let store = ContentStore::open(&source).unwrap();
        assert_eq!(dates(&store), ["2024-03-01", "2024-02-01", "2024-01-01"]);
    }

    #[test]
    fn same_date_keeps_fixture_order() {
        let source = MemoryFixtures::with_posts(vec![
            post("first", "2024-05-05"),
            post("older", "2024-01-01"),
            post("second", "2024-05-05"),
        ]);
        let store = ContentStore::open(&source).unwrap();
        let ids: Vec<&str> = store.blog_posts().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "older"]);
    }

    #[test]
    fn rfc3339_dates_sort_with_plain_dates() {
        let source = MemoryFixtures::with_posts(vec![
            post("midnight", "2024-02-01"),
            post("afternoon", "2024-02-01T15:30:00Z"),
        ]);
        let store = ContentStore::open(&source).unwrap();
        assert_eq!(store.blog_posts()[0].id, "afternoon");
    }

    #[test]
    fn lookups_by_id_and_slug() {
        let source = MemoryFixtures::with_posts(vec![post("a", "2024-01-01"), post("b", "2024-02-01")]);
        let store = ContentStore::open(&source).unwrap();

        assert_eq!(store.post_by_id("a").unwrap().slug, "a-slug");
        assert_eq!(store.post_by_slug("b-slug").unwrap().id, "b");
        assert!(store.post_by_slug("missing").is_none());
        assert!(store.post_by_id("missing").is_none());
        assert_eq!(store.post_slugs().collect::<Vec<_>>(), ["b-slug", "a-slug"]);
    }

    #[test]
    fn non_iso_date_is_rejected() {
        let source = MemoryFixtures::with_posts(vec![post("a", "2024-01-01"), post("bad", "March 3rd")]);
        let err = ContentStore::open(&source).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'bad'"), "{}", msg);
        assert!(msg.contains("bad.json"), "{}", msg);
    }

    #[test]
    fn malformed_fixture_names_the_file() {
        let source = MemoryFixtures::with_posts(vec![Fixture::new("broken.json", "{\"id\": ")]);
        let err = ContentStore::open(&source).unwrap_err();
        assert_eq!(err.to_string(), "Malformed fixture broken.json");
    }

    #[test]
    fn snapshots_pass_through() {
        let source = MemoryFixtures {
            posts: vec![],
            guestbook: r#"[{"name":"Peggy","message":"hi","date":"Jan 20"}]"#,
            visitor_count: r#"{"count": 0}"#,
        };
        let store = ContentStore::open(&source).unwrap();
        assert_eq!(store.guestbook_entries().len(), 1);
        assert_eq!(store.guestbook_entries()[0].name, "Peggy");
        // No fallback substitution on the static path.
        assert_eq!(store.visitor_count(), 0);
    }

    #[test]
    fn bundled_fixtures_load() {
        let store = ContentStore::open(&BundledFixtures).unwrap();
        assert_eq!(store.blog_posts().len(), 3);
        assert_eq!(store.blog_posts()[0].slug, "building-a-retro-ui");
        assert_eq!(store.guestbook_entries().len(), 3);
        assert_eq!(store.visitor_count(), 1337);
    }

    #[test]
    fn open_counts_loads() {
        let before = fixture_loads();
        ContentStore::open(&BundledFixtures).unwrap();
        assert!(fixture_loads() > before);
    }

    #[test]
    fn parse_post_date_formats() {
        assert!(parse_post_date("2024-01-01").is_some());
        assert!(parse_post_date("2024-01-01T00:00:00+02:00").is_some());
        assert!(parse_post_date("01/02/2024").is_none());
        assert!(parse_post_date("").is_none());
    }
}
