use std::path::Path;

pub fn run(file: &Path) -> Result<(), String> {
    let story = super::load_story_file(file)?;

    let items: usize = story.scenes().iter().map(|s| s.items().len()).sum();
    println!("  All checks passed for '{}'.", story.title());
    println!(
        "  {} scenes, {} endings, {} items",
        story.len(),
        story.endings().count(),
        items
    );

    Ok(())
}
