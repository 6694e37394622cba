//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary; pages get precomputed data structs
//! so the templates only lay things out.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::{Project, SiteConfig, SocialLink, WorkEntry};
use crate::content::PostMeta;
use crate::helpers::{date_xml, display_date, escape_html, pluralize};

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("projects.html", include_str!("site/projects.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("not_found.html", include_str!("site/not_found.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Home page: intro, tech stack, work history, links
    pub fn render_home(&self, config: &SiteConfig, recent: &[PostMeta]) -> Result<String> {
        let mut context = base_context(config, "home", &config.title);
        let recent: Vec<PostData> = recent.iter().map(PostData::from).collect();
        context.insert("recent_posts", &recent);
        self.render("home.html", &context)
    }

    /// Projects page
    pub fn render_projects(&self, config: &SiteConfig) -> Result<String> {
        let context = base_context(config, "projects", "projects");
        self.render("projects.html", &context)
    }

    /// Blog listing, optionally narrowed by a search query
    pub fn render_blog(
        &self,
        config: &SiteConfig,
        posts: &[&PostMeta],
        query: &str,
    ) -> Result<String> {
        let mut context = base_context(config, "blog", "blog");
        let listing = ListingData {
            posts: posts.iter().map(|p| PostData::from(*p)).collect(),
            count_label: pluralize(posts.len(), "post", "posts"),
            query: query.to_string(),
        };
        context.insert("listing", &listing);
        self.render("blog.html", &context)
    }

    /// A single post with its rendered body
    pub fn render_post(&self, config: &SiteConfig, post: &PostMeta, body: &str) -> Result<String> {
        let mut context = base_context(config, "blog", &post.title);
        context.insert("post", &PostData::from(post));
        context.insert("content", body);
        self.render("post.html", &context)
    }

    /// Not-found page
    pub fn render_not_found(&self, config: &SiteConfig) -> Result<String> {
        let context = base_context(config, "", "not found");
        self.render("not_found.html", &context)
    }
}

/// Context shared by every page
fn base_context(config: &SiteConfig, nav: &str, page_title: &str) -> Context {
    let mut context = Context::new();
    context.insert("site", &SiteData::from(config));
    context.insert("nav", nav);
    context.insert("page_title", page_title);
    context
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub location: String,
    pub role: String,
    pub bio: String,
    pub url: String,
    pub tech_stack: Vec<String>,
    pub work: Vec<WorkEntry>,
    pub projects: Vec<Project>,
    pub links: Vec<SocialLink>,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            location: config.location.clone(),
            role: config.role.clone(),
            bio: config.bio.clone(),
            url: config.url.clone(),
            tech_stack: config.tech_stack.clone(),
            work: config.work.clone(),
            projects: config.projects.clone(),
            links: config.links.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub slug: String,
    /// Attribute-escaped URL path
    pub path: String,
    pub title: String,
    pub description: String,
    /// Display date, e.g. "december 15, 2024"
    pub date: String,
    /// ISO date for the `datetime` attribute
    pub datetime: String,
    pub read_time: String,
    pub tags: Vec<String>,
    /// Lowercase tags, newline separated, for the listing's in-page filter
    pub search_tags: String,
}

impl From<&PostMeta> for PostData {
    fn from(post: &PostMeta) -> Self {
        Self {
            slug: post.slug.clone(),
            path: escape_html(&post.path()),
            title: post.title.clone(),
            description: post.description.clone(),
            date: display_date(&post.date),
            datetime: date_xml(&post.date),
            read_time: post.read_time.clone(),
            tags: post.tags.clone(),
            search_tags: post
                .tags
                .iter()
                .map(|tag| tag.to_lowercase())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingData {
    pub posts: Vec<PostData>,
    pub count_label: String,
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn post(slug: &str, title: &str) -> PostMeta {
        let mut meta = PostMeta::new(slug);
        meta.title = title.to_string();
        meta.description = format!("about {}", title);
        meta.date = Local.with_ymd_and_hms(2024, 12, 15, 0, 0, 0).unwrap();
        meta.read_time = "3 min read".to_string();
        meta.tags = vec!["rust".to_string()];
        meta
    }

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.title = "Jane Dev".to_string();
        config.tech_stack = vec!["rust".to_string(), "postgresql".to_string()];
        config.projects = vec![Project {
            name: "folio".to_string(),
            url: None,
            repo: Some("https://github.com/example/folio".to_string()),
            description: "this site".to_string(),
            tags: vec!["rust".to_string()],
        }];
        config
    }

    #[test]
    fn test_render_home() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_home(&config(), &[post("hello", "Hello")])
            .unwrap();
        assert!(html.contains("Jane Dev"));
        assert!(html.contains("postgresql"));
        assert!(html.contains(r#"href="/blog/hello""#));
    }

    #[test]
    fn test_render_projects() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render_projects(&config()).unwrap();
        assert!(html.contains("folio"));
        assert!(html.contains("https://github.com/example/folio"));
    }

    #[test]
    fn test_render_blog_listing() {
        let renderer = TemplateRenderer::new().unwrap();
        let a = post("a", "First");
        let b = post("b", "Second");
        let html = renderer.render_blog(&config(), &[&a, &b], "").unwrap();
        assert!(html.contains("2 posts"));
        assert!(html.contains("december 15, 2024"));
        assert!(html.contains(r#"href="/blog/b""#));
        assert!(!html.contains(r#"matching "<span class="query">"#));
        assert!(html.contains("<div class=\"empty\" data-empty hidden>"));
    }

    #[test]
    fn test_render_blog_listing_with_query() {
        let renderer = TemplateRenderer::new().unwrap();
        let a = post("a", "First");
        let html = renderer.render_blog(&config(), &[&a], "fir").unwrap();
        assert!(html.contains("1 post"));
        assert!(html.contains("matching"));
        assert!(html.contains("fir"));

        let html = renderer.render_blog(&config(), &[], "zzz").unwrap();
        assert!(html.contains("<div class=\"empty\" data-empty>"));
        assert!(html.contains("no posts found matching"));
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render_blog(&config(), &[], "rust ").unwrap();
        assert!(html.contains(r#"value="rust ""#));
    }

    #[test]
    fn test_listing_entries_carry_filter_data() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut a = post("a", "Hello World");
        a.tags = vec!["React".to_string(), "Web Dev".to_string()];
        let html = renderer.render_blog(&config(), &[&a], "").unwrap();
        assert!(html.contains(r#"data-title="hello world""#));
        assert!(html.contains(r#"data-description="about hello world""#));
        assert!(html.contains("data-tags=\"react\nweb dev\""));
        assert!(html.contains("new URLSearchParams(window.location.search)"));
    }

    #[test]
    fn test_query_is_escaped() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_blog(&config(), &[], "<script>alert(1)</script>")
            .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_post_keeps_body_html() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_post(&config(), &post("a", "First"), "<p class=\"post-paragraph\">hi</p>")
            .unwrap();
        assert!(html.contains("<p class=\"post-paragraph\">hi</p>"));
        assert!(html.contains("3 min read"));
        assert!(html.contains("<title>First"));
    }

    #[test]
    fn test_render_not_found() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render_not_found(&config()).unwrap();
        assert!(html.contains("404"));
    }
}
