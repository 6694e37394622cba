//! Generator module - exports the site as static files

use anyhow::Result;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::content::{ContentLoader, MarkdownRenderer, Post, PostMeta};
use crate::templates::TemplateRenderer;
use crate::Folio;

/// Number of posts listed on the home page
const RECENT_POSTS: usize = 3;

/// Static site generator using the built-in templates
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            folio: folio.clone(),
            renderer: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::with_theme(&folio.config.highlight.theme),
        })
    }

    /// Generate the entire site, returns the number of exported posts
    pub fn generate(&self) -> Result<usize> {
        fs::create_dir_all(&self.folio.public_dir)?;

        let loader = ContentLoader::new(&self.folio);
        let posts = loader.load_posts()?;
        let config = &self.folio.config;

        let recent: Vec<PostMeta> = posts.iter().take(RECENT_POSTS).cloned().collect();
        self.write_page("index.html", &self.renderer.render_home(config, &recent)?)?;
        self.write_page(
            "projects/index.html",
            &self.renderer.render_projects(config)?,
        )?;

        let all: Vec<&PostMeta> = posts.iter().collect();
        self.write_page(
            "blog/index.html",
            &self.renderer.render_blog(config, &all, "")?,
        )?;

        let mut exported = 0;
        for meta in &posts {
            // Re-resolve by slug so export and server share one visibility rule
            let Some(post) = loader.find_post(&meta.slug) else {
                tracing::warn!("Skipping {}: could not be resolved", meta.slug);
                continue;
            };
            self.generate_post_page(&post)?;
            exported += 1;
        }

        self.generate_post_index(&posts)?;
        self.write_page("404.html", &self.renderer.render_not_found(config)?)?;
        self.copy_static_assets()?;

        Ok(exported)
    }

    fn generate_post_page(&self, post: &Post) -> Result<()> {
        let body = self.markdown.render(&post.content);
        let html = self
            .renderer
            .render_post(&self.folio.config, &post.meta, &body)?;
        self.write_page(&format!("blog/{}/index.html", post.meta.slug), &html)?;
        tracing::debug!("Generated post: {}", post.meta.slug);
        Ok(())
    }

    /// Same payload as the `/api/posts` endpoint
    fn generate_post_index(&self, posts: &[PostMeta]) -> Result<()> {
        let json = serde_json::to_string_pretty(posts)?;
        self.write_page("api/posts.json", &json)?;
        tracing::info!("Generated api/posts.json");
        Ok(())
    }

    fn write_page(&self, relative: &str, contents: &str) -> Result<()> {
        let output_path = self.folio.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, contents)?;
        Ok(())
    }

    /// Copy the static directory to public/static
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.folio.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }
        copy_dir(static_dir, &self.folio.public_dir.join("static"))
    }
}

fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from).follow_links(true) {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let dest = to.join(path.strip_prefix(from)?);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)?;
    }
    Ok(())
}
