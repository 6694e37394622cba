//! Content loader - loads blog posts from the content directory

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::reading_time::{reading_time, DEFAULT_WORDS_PER_MINUTE};
use super::{ContentError, FrontMatter, Post, PostMeta};
use crate::Folio;

/// Loads posts from a flat directory of MDX/Markdown files.
///
/// Nothing is cached: every call reads the files again, so edits show up on
/// the next request.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    content_dir: PathBuf,
    extensions: Vec<String>,
    words_per_minute: usize,
}

impl ContentLoader {
    /// Create a loader for the site's configured content directory
    pub fn new(folio: &Folio) -> Self {
        Self {
            content_dir: folio.content_dir.clone(),
            extensions: folio.config.extensions.clone(),
            words_per_minute: folio.config.words_per_minute,
        }
    }

    /// Create a loader for an arbitrary directory with default settings
    pub fn from_dir<P: Into<PathBuf>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.into(),
            extensions: vec!["mdx".to_string(), "md".to_string()],
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Load metadata of all published posts, newest first.
    ///
    /// A missing content directory is created and yields an empty list.
    pub fn load_posts(&self) -> Result<Vec<PostMeta>> {
        self.load_posts_filtered(false)
    }

    /// Like [`load_posts`](Self::load_posts), optionally keeping unpublished drafts
    pub fn load_posts_filtered(&self, include_drafts: bool) -> Result<Vec<PostMeta>> {
        if !self.content_dir.exists() {
            fs::create_dir_all(&self.content_dir)?;
            tracing::info!("Created content directory {:?}", self.content_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                // The directory itself could not be read
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !self.is_post_source(path) {
                continue;
            }

            match self.read_post(path) {
                Ok(post) => {
                    if post.meta.published || include_drafts {
                        posts.push(post.meta);
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to load post: {}", e);
                }
            }
        }

        // Sort by date descending (newest first)
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), self.content_dir);

        Ok(posts)
    }

    /// Resolve a single published post by slug.
    ///
    /// Missing, unreadable, unparsable and unpublished posts all come back as
    /// `None`.
    pub fn find_post(&self, slug: &str) -> Option<Post> {
        if !is_valid_slug(slug) {
            tracing::debug!("Rejected slug {:?}", slug);
            return None;
        }

        for ext in &self.extensions {
            let path = self.content_dir.join(format!("{}.{}", slug, ext));
            if !path.is_file() {
                continue;
            }
            match self.read_post(&path) {
                Ok(post) if post.meta.published => return Some(post),
                Ok(_) => {
                    tracing::debug!("Post {:?} is not published", slug);
                    return None;
                }
                Err(e) if e.is_not_found() => continue,
                Err(e) => {
                    tracing::debug!("Post {:?} not resolvable: {}", slug, e);
                    return None;
                }
            }
        }

        None
    }

    /// Read and parse a single content file
    fn read_post(&self, path: &Path) -> Result<Post, ContentError> {
        let raw = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        let (fm, body) =
            FrontMatter::parse(&raw).map_err(|e| ContentError::front_matter(path, e.to_string()))?;

        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let date = match fm.parse_date() {
            Some(date) => date,
            None => {
                if let Some(raw_date) = &fm.date {
                    tracing::warn!("Unrecognized date {:?} in {:?}", raw_date, path);
                }
                Local::now()
            }
        };

        let mut meta = PostMeta::new(slug);
        if let Some(title) = fm.title.filter(|t| !t.trim().is_empty()) {
            meta.title = title;
        }
        meta.description = fm.description.unwrap_or_default();
        meta.date = date;
        meta.read_time = reading_time(body, self.words_per_minute);
        meta.tags = fm.tags;
        meta.published = fm.published;

        Ok(Post::new(meta, body))
    }

    /// Whether `path` is the file `find_post` resolves for its stem.
    ///
    /// The stem must be a valid slug and the extension must match a configured
    /// one exactly. When a stem exists under several extensions only the first
    /// configured one is the post.
    fn is_post_source(&self, path: &Path) -> bool {
        let (Some(stem), Some(ext)) = (
            path.file_stem().and_then(|s| s.to_str()),
            path.extension().and_then(|e| e.to_str()),
        ) else {
            return false;
        };
        if !is_valid_slug(stem) {
            return false;
        }

        let Some(rank) = self.extensions.iter().position(|known| known == ext) else {
            return false;
        };
        !self.extensions[..rank]
            .iter()
            .any(|earlier| self.content_dir.join(format!("{}.{}", stem, earlier)).is_file())
    }
}

/// A slug must name a file directly inside the content directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\', '\0'])
}
