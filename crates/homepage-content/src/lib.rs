//! Static site content: blog posts plus guestbook / visitor-count snapshots,
//! read from JSON fixtures once and served from memory afterwards.
//!
//! The free functions below read from the bundled store, which is built on
//! first use and kept for the life of the process.

pub mod fixtures;
pub mod store;

use homepage_types::{BlogPost, GuestbookEntry};

pub use fixtures::{BundledFixtures, DirFixtures, Fixture, FixtureSource};
pub use store::{ContentStore, fixture_loads};

/// Bundled blog posts, newest first.
pub fn blog_posts() -> &'static [BlogPost] {
    ContentStore::bundled().blog_posts()
}

pub fn post_by_id(id: &str) -> Option<&'static BlogPost> {
    ContentStore::bundled().post_by_id(id)
}

pub fn post_by_slug(slug: &str) -> Option<&'static BlogPost> {
    ContentStore::bundled().post_by_slug(slug)
}

/// Guestbook snapshot used when the site runs without the API.
pub fn guestbook_entries() -> &'static [GuestbookEntry] {
    ContentStore::bundled().guestbook_entries()
}

pub fn visitor_count() -> i64 {
    ContentStore::bundled().visitor_count()
}
