//! Post records

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Metadata of a blog post, as listed on the blog page and the data endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    /// File stem of the source file
    pub slug: String,

    /// Post title
    pub title: String,

    /// Short description shown in listings
    pub description: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Estimated reading time, e.g. "4 min read"
    pub read_time: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Whether the post is published
    pub published: bool,
}

impl PostMeta {
    /// Create a record with the defaults used for missing front-matter fields
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: "Untitled".to_string(),
            description: String::new(),
            date: Local::now(),
            read_time: String::new(),
            tags: Vec::new(),
            published: true,
        }
    }

    /// URL path of the post page
    pub fn path(&self) -> String {
        format!("/blog/{}", self.slug)
    }
}

/// A full blog post: metadata plus the raw MDX body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub meta: PostMeta,

    /// Raw body text after the front-matter
    pub content: String,
}

impl Post {
    pub fn new(meta: PostMeta, content: impl Into<String>) -> Self {
        Self {
            meta,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let meta = PostMeta::new("hello");
        assert_eq!(meta.slug, "hello");
        assert_eq!(meta.title, "Untitled");
        assert!(meta.description.is_empty());
        assert!(meta.tags.is_empty());
        assert!(meta.published);
        assert_eq!(meta.path(), "/blog/hello");
    }

    #[test]
    fn test_json_shape() {
        let mut meta = PostMeta::new("hello");
        meta.date = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        meta.read_time = "2 min read".to_string();

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["slug"], "hello");
        assert_eq!(json["readTime"], "2 min read");
        assert_eq!(json["published"], true);
        assert!(json["date"].as_str().unwrap().starts_with("2024-01-01T00:00:00"));
        assert!(json.get("read_time").is_none());
    }

    #[test]
    fn test_post_flattens_meta() {
        let post = Post::new(PostMeta::new("a"), "body");
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["slug"], "a");
        assert_eq!(json["content"], "body");
    }
}
