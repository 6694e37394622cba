//! HTML helper functions

/// Escape HTML special characters (safe for text and quoted attributes)
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Singular or plural noun for a count, e.g. "1 post" / "3 posts"
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(0, "post", "posts"), "0 posts");
        assert_eq!(pluralize(1, "post", "posts"), "1 post");
        assert_eq!(pluralize(2, "post", "posts"), "2 posts");
    }
}
