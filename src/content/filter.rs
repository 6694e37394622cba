//! Free-text filtering of the post listing

use super::PostMeta;

/// Keep the posts whose title, description or any tag contains `query`,
/// ignoring case. Relative order is preserved; an empty query keeps everything.
///
/// The query is matched as typed, surrounding whitespace included.
pub fn filter_posts<'a>(posts: &'a [PostMeta], query: &str) -> Vec<&'a PostMeta> {
    if query.is_empty() {
        return posts.iter().collect();
    }

    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| matches_query(post, &needle))
        .collect()
}

/// `needle` must already be lowercase
fn matches_query(post: &PostMeta, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.description.to_lowercase().contains(needle)
        || post
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}
