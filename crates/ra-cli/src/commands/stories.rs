use comfy_table::{ContentArrangement, Table};
use ra_core::catalog;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Slug", "Title", "Scenes", "Endings"]);

    for entry in catalog::list() {
        let story = catalog::load(entry.slug).map_err(|e| e.to_string())?;
        table.add_row(vec![
            entry.slug.to_string(),
            entry.title.to_string(),
            story.len().to_string(),
            story.endings().count().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} stories", catalog::list().len());

    Ok(())
}
