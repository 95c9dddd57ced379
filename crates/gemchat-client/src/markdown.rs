// crates/gemchat-client/src/markdown.rs
// Markdown to HTML for assistant replies

use pulldown_cmark::{Options, Parser, html};

/// Render a reply as HTML.
///
/// Raw HTML in the reply is escaped rather than passed through, since the
/// result is injected with `inner_html`.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(text, options).map(|event| match event {
        pulldown_cmark::Event::Html(raw) | pulldown_cmark::Event::InlineHtml(raw) => {
            pulldown_cmark::Event::Text(raw)
        }
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph() {
        assert_eq!(render_markdown("Hi there"), "<p>Hi there</p>\n");
    }

    #[test]
    fn test_code_block() {
        let html = render_markdown("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre><code class=\"language-rust\">"));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn test_emphasis_and_lists() {
        let html = render_markdown("**bold** and *em*\n\n- one\n- two");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>em</em>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn test_raw_html_escaped() {
        let html = render_markdown("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
