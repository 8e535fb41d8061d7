use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// A raw JSON document plus the name it was loaded under (used in errors).
#[derive(Debug, Clone)]
pub struct Fixture {
    pub name: String,
    pub contents: Cow<'static, str>,
}

impl Fixture {
    pub fn new(name: impl Into<String>, contents: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Where content fixtures come from. Implementations only hand out raw
/// documents; parsing and ordering happen in [`crate::ContentStore`].
pub trait FixtureSource {
    /// One document per post. The returned order is the tie-break order for
    /// posts sharing a date.
    fn blog_posts(&self) -> Result<Vec<Fixture>>;

    /// Array of guestbook entries.
    fn guestbook(&self) -> Result<Fixture>;

    /// `{"count": n}`
    fn visitor_count(&self) -> Result<Fixture>;
}

// -- Bundled --

// Compiled into the binary. New posts go in content/blog-posts/ and must be
// listed here.
const BUNDLED_POSTS: &[(&str, &str)] = &[
    (
        "2024-01-15-hello-world.json",
        include_str!("../content/blog-posts/2024-01-15-hello-world.json"),
    ),
    (
        "2024-02-20-raspberry-pi-server.json",
        include_str!("../content/blog-posts/2024-02-20-raspberry-pi-server.json"),
    ),
    (
        "2024-03-10-building-a-retro-ui.json",
        include_str!("../content/blog-posts/2024-03-10-building-a-retro-ui.json"),
    ),
];

const BUNDLED_GUESTBOOK: &str = include_str!("../content/guestbook.json");
const BUNDLED_VISITOR_COUNT: &str = include_str!("../content/visitor-count.json");

/// Fixtures embedded at build time from this crate's `content/` directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledFixtures;

impl FixtureSource for BundledFixtures {
    fn blog_posts(&self) -> Result<Vec<Fixture>> {
        Ok(BUNDLED_POSTS
            .iter()
            .map(|(name, contents)| Fixture::new(*name, *contents))
            .collect())
    }

    fn guestbook(&self) -> Result<Fixture> {
        Ok(Fixture::new("guestbook.json", BUNDLED_GUESTBOOK))
    }

    fn visitor_count(&self) -> Result<Fixture> {
        Ok(Fixture::new("visitor-count.json", BUNDLED_VISITOR_COUNT))
    }
}

// -- Directory --

/// Fixtures read from disk, laid out like the bundled set:
///
/// ```text
/// <root>/blog-posts/*.json
/// <root>/guestbook.json
/// <root>/visitor-count.json
/// ```
#[derive(Debug, Clone)]
pub struct DirFixtures {
    root: PathBuf,
}

impl DirFixtures {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, relative: &str) -> Result<Fixture> {
        let path = self.root.join(relative);
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        Ok(Fixture::new(relative, contents))
    }
}

impl FixtureSource for DirFixtures {
    /// Posts come back sorted by file name so tie order is stable across runs.
    fn blog_posts(&self) -> Result<Vec<Fixture>> {
        let dir = self.root.join("blog-posts");
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&dir)
            .with_context(|| format!("Failed to list {}", dir.display()))?
        {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .into_iter()
            .map(|path| {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read fixture {}", path.display()))?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Ok(Fixture::new(format!("blog-posts/{}", name), contents))
            })
            .collect()
    }

    fn guestbook(&self) -> Result<Fixture> {
        self.read("guestbook.json")
    }

    fn visitor_count(&self) -> Result<Fixture> {
        self.read("visitor-count.json")
    }
}
