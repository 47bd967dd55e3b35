use crate::error::{CoreError, CoreResult};
use crate::story::Story;

/// A story bundled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Short name used on the command line, e.g. `corgi-quest`.
    pub slug: &'static str,
    /// Human-readable title, matching the story's own title.
    pub title: &'static str,
    source: &'static str,
}

const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        slug: "demo",
        title: "Demo",
        source: include_str!("../stories/demo.json"),
    },
    CatalogEntry {
        slug: "corgi-quest",
        title: "Corgi Quest",
        source: include_str!("../stories/corgi-quest.json"),
    },
];

/// Slug of the story played when none is requested.
pub const DEFAULT_STORY: &str = "demo";

/// All bundled stories.
pub fn list() -> &'static [CatalogEntry] {
    ENTRIES
}

/// Load and validate a bundled story by slug (case-insensitive).
pub fn load(slug: &str) -> CoreResult<Story> {
    let entry = ENTRIES
        .iter()
        .find(|e| e.slug.eq_ignore_ascii_case(slug.trim()))
        .ok_or_else(|| CoreError::UnknownStory(slug.to_string()))?;
    Story::from_json(entry.source)
}
