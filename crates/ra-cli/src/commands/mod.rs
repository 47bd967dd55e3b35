pub mod check;
pub mod play;
pub mod scores;
pub mod stories;

use std::path::Path;

use ra_core::Story;

/// Read and validate a story file.
fn load_story_file(path: &Path) -> Result<Story, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    Story::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
}
