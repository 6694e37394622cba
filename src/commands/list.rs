//! List blog posts

use anyhow::Result;

use crate::content::{ContentLoader, PostMeta};
use crate::Folio;

/// Print posts, newest first; drafts only with `include_drafts`
pub fn run(folio: &Folio, include_drafts: bool) -> Result<()> {
    let loader = ContentLoader::new(folio);
    let posts = loader.load_posts_filtered(include_drafts)?;

    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!("  {}", format_entry(post));
    }

    Ok(())
}

fn format_entry(post: &PostMeta) -> String {
    let draft = if post.published { "" } else { " (draft)" };
    format!(
        "{}  {}  [{}]  {}{}",
        post.date.format("%Y-%m-%d"),
        post.title,
        post.slug,
        post.read_time,
        draft
    )
}
