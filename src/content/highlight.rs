//! Syntax highlighting for fenced code blocks

use lazy_static::lazy_static;
use regex::Regex;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::helpers::escape_html;

lazy_static! {
    /// Leading language token of a fence info string (`rust,ignore` -> `rust`)
    static ref LANG_TOKEN: Regex = Regex::new(r"^[A-Za-z0-9_+#.-]+").unwrap();
}

/// Language names blog posts use that syntect's default set knows under
/// another token
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("javascript", "js"),
    ("jsx", "js"),
    ("typescript", "js"),
    ("ts", "js"),
    ("tsx", "js"),
    ("shell", "bash"),
    ("sh", "bash"),
    ("zsh", "bash"),
    ("console", "bash"),
    ("yml", "yaml"),
    ("py", "python"),
    ("rs", "rust"),
    ("golang", "go"),
    ("md", "markdown"),
    ("mdx", "markdown"),
];

/// Languages rendered without highlighting
const PLAIN_LANGUAGES: &[&str] = &["", "text", "plain", "plaintext", "txt"];

/// Extract the language of a fenced block from its info string
pub fn fence_language(info: &str) -> String {
    LANG_TOKEN
        .find(info.trim())
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_else(|| "text".to_string())
}

/// Code highlighter backed by syntect's bundled syntaxes and themes
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl Highlighter {
    pub fn new(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Highlight `code` as `lang`.
    ///
    /// Unknown languages and highlighting failures produce the escaped code in
    /// a plain `<pre><code>`.
    pub fn highlight(&self, code: &str, lang: &str) -> String {
        let lang = lang.trim().to_lowercase();
        if PLAIN_LANGUAGES.contains(&lang.as_str()) {
            return plain_block(code, "text");
        }

        let (Some(syntax), Some(theme)) = (self.find_syntax(&lang), self.theme()) else {
            tracing::debug!("No syntax for language {:?}, rendering plain", lang);
            return plain_block(code, &lang);
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => highlighted.replacen(
                "<pre",
                &format!(r#"<pre class="highlight language-{}""#, escape_html(&lang)),
                1,
            ),
            Err(e) => {
                tracing::warn!("Failed to highlight {}: {}", lang, e);
                plain_block(code, &lang)
            }
        }
    }

    fn find_syntax(&self, lang: &str) -> Option<&SyntaxReference> {
        let token = LANGUAGE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == lang)
            .map(|(_, token)| *token)
            .unwrap_or(lang);

        self.syntax_set
            .find_syntax_by_token(token)
            .or_else(|| self.syntax_set.find_syntax_by_extension(token))
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new("base16-ocean.dark")
    }
}

/// Unstyled code block
fn plain_block(code: &str, lang: &str) -> String {
    format!(
        r#"<pre class="plain"><code class="language-{}">{}</code></pre>"#,
        escape_html(lang),
        escape_html(code)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_language() {
        assert_eq!(fence_language("rust"), "rust");
        assert_eq!(fence_language("rust,ignore"), "rust");
        assert_eq!(fence_language("TypeScript title=\"a.ts\""), "typescript");
        assert_eq!(fence_language("c++"), "c++");
        assert_eq!(fence_language(""), "text");
        assert_eq!(fence_language("{.rust}"), "text");
    }

    #[test]
    fn test_highlight_known_language() {
        let highlighter = Highlighter::default();
        let html = highlighter.highlight("fn main() {}\n", "rust");
        assert!(html.contains("language-rust"));
        assert!(html.contains("<span style="));
    }

    #[test]
    fn test_aliases_resolve() {
        let highlighter = Highlighter::default();
        for lang in ["js", "tsx", "shell", "yml", "py"] {
            assert!(highlighter.find_syntax(lang).is_some(), "{lang} should resolve");
            assert!(highlighter.highlight("x\n", lang).contains("<span style="), "{lang}");
        }
    }

    #[test]
    fn test_unknown_language_renders_literal_text() {
        let highlighter = Highlighter::default();
        let code = "some ~~ weird :: syntax\n";
        let html = highlighter.highlight(code, "nosuchlang");
        assert_eq!(
            html,
            r#"<pre class="plain"><code class="language-nosuchlang">some ~~ weird :: syntax
</code></pre>"#
        );
        assert!(!html.contains("<span"));
    }

    #[test]
    fn test_plain_text_is_escaped() {
        let highlighter = Highlighter::default();
        let html = highlighter.highlight("<b>&</b>", "text");
        assert!(html.contains("&lt;b&gt;&amp;&lt;/b&gt;"));
        assert!(html.contains("language-text"));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let highlighter = Highlighter::new("no-such-theme");
        let html = highlighter.highlight("let x = 1;\n", "rust");
        assert!(html.contains("<span style="));
    }
}
