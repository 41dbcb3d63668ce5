//! Markup escaping and post-render correction
//!
//! Interpolated values are escaped as XML entities, which turns `'` into
//! [`ESCAPED_QUOTE`]. The markup entry file must not keep that entity, so it
//! is normalized back to a literal quote after rendering.

/// Entity produced for `'` by [`escape_markup`]
pub const ESCAPED_QUOTE: &str = "&apos;";

/// Escape function registered with the template engine
pub fn escape_markup(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str(ESCAPED_QUOTE),
            _ => out.push(c),
        }
    }
    out
}

/// Replace every escaped-quote marker with a literal `'`
pub fn normalize_quotes(rendered: &str) -> String {
    rendered.replace(ESCAPED_QUOTE, "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_replaces_every_marker() {
        let fixture = "<title>Bob&apos;s &amp; Al&apos;s</title>\n<p ng-include=\"&apos;views/main.html&apos;\"></p>";
        assert_eq!(
            normalize_quotes(fixture),
            "<title>Bob's &amp; Al's</title>\n<p ng-include=\"'views/main.html'\"></p>"
        );
    }

    #[test]
    fn test_normalize_leaves_other_text_alone() {
        let fixture = "&amp;apos; &quot; &lt;a&gt; apos; &apos";
        assert_eq!(normalize_quotes(fixture), "&amp;apos; &quot; &lt;a&gt; apos; &apos");
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_markup(r#"<a href="x">Bob's & co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Bob&apos;s &amp; co&lt;/a&gt;"
        );
    }
}
