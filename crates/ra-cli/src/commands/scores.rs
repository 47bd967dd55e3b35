use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use crate::store;

pub fn run(path: &Path, story: Option<&str>) -> Result<(), String> {
    let mut records = store::load(path).map_err(|e| e.to_string())?;

    if let Some(title) = story {
        records.retain(|r| r.story_title.eq_ignore_ascii_case(title));
    }

    if records.is_empty() {
        println!("  No scores recorded.");
        return Ok(());
    }

    records.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.recorded_at.cmp(&b.recorded_at))
    });

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Player", "Story", "Score", "Date"]);

    for record in &records {
        table.add_row(vec![
            record.display_name.clone(),
            record.story_title.clone(),
            record.score.to_string(),
            record.recorded_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} scores", records.len());

    Ok(())
}
