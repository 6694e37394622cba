//! Content module - loads, filters and renders blog posts

mod error;
mod filter;
mod frontmatter;
pub mod highlight;
pub mod loader;
mod markdown;
mod post;
pub mod reading_time;

pub use error::ContentError;
pub use filter::filter_posts;
pub use frontmatter::FrontMatter;
pub use highlight::Highlighter;
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostMeta};
