//! Front-matter parsing

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut tags = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                tags.push(item);
            }
            Ok(tags)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter header of a blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    /// Only an explicit `published: false` hides a post
    #[serde(deserialize_with = "published_flag", default = "default_published")]
    pub published: bool,

    /// Keys the site does not use (layout hints for MDX components, etc.)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

fn default_published() -> bool {
    true
}

/// Any value other than the boolean `false` (strings, `null`, ...) publishes
fn published_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(!matches!(value, serde_yaml::Value::Bool(false)))
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            date: None,
            tags: Vec::new(),
            published: true,
            extra: HashMap::new(),
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from a content file.
    /// Returns (front_matter, body). Files without a `---` block get defaults
    /// and keep their whole text as body.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let Some((yaml, body)) = split_yaml_block(content) else {
            return Ok((FrontMatter::default(), content));
        };

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        // A leading thematic break followed by prose is body text, not YAML
        if !has_yaml_structure(yaml) {
            return Ok((FrontMatter::default(), content));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml)?;
        Ok((fm, body))
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Split `---\n<yaml>\n---\n<body>` into its two halves
fn split_yaml_block(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let newline = rest.find('\n')?;
    if !rest[..newline].trim().is_empty() {
        return None;
    }

    let block = &rest[newline + 1..];
    let mut offset = 0;
    for line in block.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let body = &block[offset + line.len()..];
            return Some((&block[..offset], body.trim_start_matches(['\n', '\r'])));
        }
        offset += line.len();
    }

    None
}

/// At least one line must look like `key: value` (or `key:`)
fn has_yaml_structure(yaml: &str) -> bool {
    yaml.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    // RFC 3339 / ISO 8601 with an explicit offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&dt).earliest();
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Local.from_local_datetime(&dt).earliest();
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
description: first post
date: 2024-01-15 10:30:00
tags:
  - rust
  - mdx
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.description.as_deref(), Some("first post"));
        assert_eq!(fm.tags, vec!["rust", "mdx"]);
        assert!(fm.published);
        assert_eq!(body, "This is the content.\n");
    }

    #[test]
    fn test_unpublished_flag() {
        let content = "---\ntitle: Draft\npublished: false\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert!(!fm.published);
    }

    #[test]
    fn test_only_boolean_false_unpublishes() {
        for value in ["\"false\"", "no", "0", "~", "yes", "true"] {
            let content = format!("---\ntitle: T\npublished: {}\n---\nbody", value);
            let (fm, _) = FrontMatter::parse(&content).unwrap();
            assert!(fm.published, "published: {}", value);
        }
    }

    #[test]
    fn test_single_string_tag() {
        let content = "---\ntitle: One Tag\ntags: notes\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["notes"]);
    }

    #[test]
    fn test_missing_frontmatter_uses_defaults() {
        let (fm, body) = FrontMatter::parse("# Just markdown\n\ntext").unwrap();
        assert!(fm.title.is_none());
        assert!(fm.tags.is_empty());
        assert!(fm.published);
        assert!(body.starts_with("# Just markdown"));
    }

    #[test]
    fn test_empty_frontmatter_block() {
        let (fm, body) = FrontMatter::parse("---\n---\nbody text").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, "body text");
    }

    #[test]
    fn test_extra_keys_are_kept() {
        let content = "---\ntitle: X\ncover: /img/x.png\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert!(fm.extra.contains_key("cover"));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\ndate: 2024-01-01\n---\nbody";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_thematic_break_is_not_frontmatter() {
        let content = r#"---

Check out https://example.com/path and some prose

---
More content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert!(body.contains("https://example.com"));
        assert!(body.contains("More content."));
    }

    #[test]
    fn test_unterminated_block_is_body() {
        let content = "---\ntitle: never closed\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_parse_date_formats() {
        for s in [
            "2024-01-15",
            "2024/01/15",
            "2024-01-15 10:30",
            "2024-01-15 10:30:00",
            "2024-01-15T10:30:00",
        ] {
            let dt = parse_date_string(s).unwrap_or_else(|| panic!("failed on {s}"));
            assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15");
        }
        assert!(parse_date_string("2024-01-15T10:30:00+00:00").is_some());
        assert!(parse_date_string("next tuesday").is_none());
    }

    #[test]
    fn test_parse_date_from_frontmatter() {
        let fm = FrontMatter {
            date: Some("2024-01-15 10:30:00".to_string()),
            ..Default::default()
        };
        let dt = fm.parse_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");
    }
}
