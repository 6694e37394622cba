//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub location: String,
    pub role: String,
    pub bio: String,
    pub url: String,

    // Home page
    pub tech_stack: Vec<String>,
    pub work: Vec<WorkEntry>,
    pub links: Vec<SocialLink>,

    // Projects page
    pub projects: Vec<Project>,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub static_dir: String,
    pub extensions: Vec<String>,

    // Writing
    pub words_per_minute: usize,
    pub highlight: HighlightConfig,

    // Server
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "folio".to_string(),
            description: "Personal portfolio and blog".to_string(),
            author: "John Doe".to_string(),
            location: String::new(),
            role: String::new(),
            bio: String::new(),
            url: "http://localhost:3000".to_string(),

            tech_stack: Vec::new(),
            work: Vec::new(),
            links: Vec::new(),

            projects: Vec::new(),

            content_dir: "content/blog".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),
            extensions: vec!["mdx".to_string(), "md".to_string()],

            words_per_minute: 200,
            highlight: HighlightConfig::default(),

            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// A position listed in the home page work section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkEntry {
    pub name: String,
    pub url: Option<String>,
    pub role: String,
    pub period: String,
    pub summary: String,
}

/// A project shown on the projects page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub url: Option<String>,
    pub repo: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
}

/// External profile link (github, mail, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

/// Development server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}
