//! HTML-to-text reduction helpers.
//!
//! Shared by the web search and page crawl backends, which both need to turn
//! markup into something a language model can read.

use regex::Regex;

/// Reduce an HTML document to readable text.
///
/// Removes script and style blocks entirely, strips the remaining tags,
/// decodes the common entities, and collapses whitespace runs.
pub fn html_to_text(html: &str) -> String {
    let without_scripts = Regex::new(r"(?is)<script[^>]*>.*?</script>")
        .expect("valid regex")
        .replace_all(html, " ");
    let without_styles = Regex::new(r"(?is)<style[^>]*>.*?</style>")
        .expect("valid regex")
        .replace_all(&without_scripts, " ");

    strip_tags(&without_styles)
}

/// Strip tags from an HTML fragment and normalize the text.
///
/// Unlike [`html_to_text`] this does not remove script/style blocks, so it
/// is only suitable for fragments that cannot contain them (titles,
/// snippets).
pub fn strip_tags(fragment: &str) -> String {
    let text = Regex::new(r"<[^>]+>")
        .expect("valid regex")
        .replace_all(fragment, " ");

    collapse_whitespace(&decode_entities(&text))
}

/// Decode the handful of entities that show up in search results and page
/// text. Not a full entity table; unknown entities pass through unchanged.
pub fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<b>bold</b> and <i>italic</i>"), "bold and italic");
        assert_eq!(strip_tags("no markup"), "no markup");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("it&#x27;s"), "it's");
    }

    #[test]
    fn test_html_to_text_removes_scripts_and_styles() {
        let html = r#"<html><head><style>body { color: red; }</style></head>
            <body><script>alert("hi");</script><p>Hello   world</p></body></html>"#;
        assert_eq!(html_to_text(html), "Hello world");
    }

    #[test]
    fn test_html_to_text_collapses_whitespace() {
        assert_eq!(html_to_text("<p>a</p>\n\n  <p>b</p>"), "a b");
    }
}
