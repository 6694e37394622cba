//! Markdown/MDX body rendering

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag};

use super::highlight::{fence_language, Highlighter};
use crate::helpers::escape_html;

/// Body elements that get site-specific markup.
///
/// Every other tag (tables, images, footnotes, ...) is left to
/// pulldown-cmark's default HTML.
#[derive(Debug, Clone, PartialEq)]
enum Element {
    Heading {
        level: HeadingLevel,
        id: Option<String>,
    },
    Paragraph,
    List {
        ordered: bool,
        start: Option<u64>,
    },
    Item,
    BlockQuote,
    Link {
        href: String,
        title: String,
    },
    Emphasis,
    Strong,
}

impl Element {
    fn from_tag(tag: &Tag) -> Option<Self> {
        let element = match tag {
            Tag::Heading { level, id, .. } => Element::Heading {
                level: *level,
                id: id.as_ref().map(|id| id.to_string()),
            },
            Tag::Paragraph => Element::Paragraph,
            Tag::List(start) => Element::List {
                ordered: start.is_some(),
                start: *start,
            },
            Tag::Item => Element::Item,
            Tag::BlockQuote(_) => Element::BlockQuote,
            Tag::Link {
                dest_url, title, ..
            } => Element::Link {
                href: dest_url.to_string(),
                title: title.to_string(),
            },
            Tag::Emphasis => Element::Emphasis,
            Tag::Strong => Element::Strong,
            _ => return None,
        };
        Some(element)
    }

    fn open(&self) -> String {
        match self {
            Element::Heading { level, id } => {
                let id_attr = id
                    .as_ref()
                    .map(|id| format!(r#" id="{}""#, escape_html(id)))
                    .unwrap_or_default();
                let marker = if *level == HeadingLevel::H1 {
                    r#"<span class="heading-mark">*</span> "#
                } else {
                    ""
                };
                format!(
                    r#"<{level}{id_attr} class="post-heading post-{level}">{marker}"#,
                    level = level,
                    id_attr = id_attr,
                    marker = marker
                )
            }
            Element::Paragraph => r#"<p class="post-paragraph">"#.to_string(),
            Element::List { ordered: true, start } => match start {
                Some(n) if *n != 1 => format!(r#"<ol class="post-list" start="{}">"#, n),
                _ => r#"<ol class="post-list">"#.to_string(),
            },
            Element::List { ordered: false, .. } => r#"<ul class="post-list">"#.to_string(),
            Element::Item => r#"<li class="post-list-item">"#.to_string(),
            Element::BlockQuote => r#"<blockquote class="post-quote">"#.to_string(),
            Element::Link { href, title } => {
                let title_attr = if title.is_empty() {
                    String::new()
                } else {
                    format!(r#" title="{}""#, escape_html(title))
                };
                let target_attr = if is_external(href) {
                    r#" target="_blank" rel="noopener noreferrer""#
                } else {
                    ""
                };
                format!(
                    r#"<a class="post-link" href="{}"{}{}>"#,
                    escape_html(href),
                    title_attr,
                    target_attr
                )
            }
            Element::Emphasis => r#"<em class="post-em">"#.to_string(),
            Element::Strong => r#"<strong class="post-strong">"#.to_string(),
        }
    }

    fn close(&self) -> String {
        match self {
            Element::Heading { level, .. } => format!("</{}>\n", level),
            Element::Paragraph => "</p>\n".to_string(),
            Element::List { ordered: true, .. } => "</ol>\n".to_string(),
            Element::List { ordered: false, .. } => "</ul>\n".to_string(),
            Element::Item => "</li>\n".to_string(),
            Element::BlockQuote => "</blockquote>\n".to_string(),
            Element::Link { .. } => "</a>".to_string(),
            Element::Emphasis => "</em>".to_string(),
            Element::Strong => "</strong>".to_string(),
        }
    }
}

fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    highlighter: Highlighter,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            highlighter: Highlighter::default(),
        }
    }

    /// Create with a specific highlighting theme
    pub fn with_theme(theme: &str) -> Self {
        Self {
            highlighter: Highlighter::new(theme),
        }
    }

    /// Render a post body to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is split off by FrontMatter::parse, never parsed here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        // One slot per open tag, Some when we emitted custom markup for it
        let mut open: Vec<Option<Element>> = Vec::new();
        // (language, collected code) while inside a code block
        let mut code_block: Option<(String, String)> = None;

        for event in parser {
            if code_block.is_some() {
                match event {
                    Event::Text(text) => {
                        if let Some((_, code)) = code_block.as_mut() {
                            code.push_str(&text);
                        }
                    }
                    Event::End(_) => {
                        if let Some((lang, code)) = code_block.take() {
                            let html = self.render_code_block(&code, &lang);
                            events.push(Event::Html(CowStr::from(html)));
                        }
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => fence_language(&info),
                        CodeBlockKind::Indented => "text".to_string(),
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Start(tag) => match Element::from_tag(&tag) {
                    Some(element) => {
                        events.push(Event::Html(CowStr::from(element.open())));
                        open.push(Some(element));
                    }
                    None => {
                        open.push(None);
                        events.push(Event::Start(tag));
                    }
                },
                Event::End(end) => match open.pop().flatten() {
                    Some(element) => events.push(Event::Html(CowStr::from(element.close()))),
                    None => events.push(Event::End(end)),
                },
                Event::Code(code) => {
                    let html = format!(
                        r#"<code class="post-inline-code">{}</code>"#,
                        escape_html(&code)
                    );
                    events.push(Event::Html(CowStr::from(html)));
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Code block frame: language label, copy button, highlighted code
    fn render_code_block(&self, code: &str, lang: &str) -> String {
        let highlighted = self.highlighter.highlight(code, lang);
        format!(
            concat!(
                r#"<div class="code-block">"#,
                r#"<div class="code-block-header">"#,
                r#"<span class="code-block-lang">{lang}</span>"#,
                r#"<button class="code-block-copy" type="button" data-code="{raw}">copy</button>"#,
                "</div>{body}</div>\n"
            ),
            lang = escape_html(lang),
            raw = escape_html(code.trim()),
            body = highlighted
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
