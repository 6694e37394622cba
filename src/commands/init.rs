//! Initialize a new folio site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: my corner of the internet
description: notes on software, systems and whatever else
author: Your Name
location: Somewhere, Earth
role: software engineer
bio: I build things for the web and write about it here.
url: http://localhost:3000

tech_stack:
  - rust
  - typescript
  - postgresql

work:
  - name: Acme Corp
    url: https://example.com
    role: senior engineer
    period: 2022 - present
    summary: building the platform team's internal tooling.

projects:
  - name: folio
    repo: https://github.com/you/folio
    description: this site, a portfolio and blog served from markdown files.
    tags: [rust, axum]

links:
  - name: github
    url: https://github.com/you
  - name: email
    url: mailto:you@example.com

# Directories
content_dir: content/blog
public_dir: public
static_dir: static
extensions: [mdx, md]

# Writing
words_per_minute: 200
highlight:
  theme: base16-ocean.dark

# Server
server:
  ip: localhost
  port: 3000
"#;

const SITE_CSS: &str = include_str!("../templates/site/site.css");

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already exists, refusing to overwrite", config_path);
    }

    // Create directory structure
    fs::create_dir_all(target_dir.join("content/blog"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    fs::write(&config_path, DEFAULT_CONFIG)?;

    let css_path = target_dir.join("static/site.css");
    if !css_path.exists() {
        fs::write(&css_path, SITE_CSS)?;
    }

    // Create a sample post
    let post_path = target_dir.join("content/blog/hello-world.mdx");
    if !post_path.exists() {
        let now = chrono::Local::now();
        let sample_post = format!(
            r#"---
title: Hello World
description: the first post on this site
date: {}
tags: [meta]
published: true
---

# Hello World

Welcome! Posts live in `content/blog` as `.mdx` or `.md` files with YAML
front matter. Set `published: false` to keep a draft off the site.

## Create a new post

```bash
folio new "My New Post"
```

## Run the server

```bash
folio server
```

## Export static files

```bash
folio generate
```
"#,
            now.format("%Y-%m-%d %H:%M:%S")
        );
        fs::write(&post_path, sample_post)?;
    }

    tracing::debug!("Scaffolded site in {:?}", target_dir);
    Ok(())
}
