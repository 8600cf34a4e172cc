//! Markdown rendering for conversation messages

use leptos::prelude::*;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Whether a link or image destination may be emitted as-is: http(s),
/// mailto, or a scheme-less relative reference.
pub fn is_safe_url(url: &str) -> bool {
    let url: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    let end = url.find(['/', '?', '#']).unwrap_or(url.len());
    match url[..end].find(':') {
        None => true,
        Some(colon) => SAFE_SCHEMES
            .iter()
            .any(|scheme| url[..colon].eq_ignore_ascii_case(scheme)),
    }
}

fn neutralize(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) {
        url
    } else {
        CowStr::Borrowed("#")
    }
}

/// Render markdown to HTML. Raw HTML in the source is escaped and link or
/// image destinations with other schemes (`javascript:`, `data:`, ...) are
/// replaced by `#`.
pub fn render_markdown(content: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(content, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: neutralize(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: neutralize(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Render message content as markdown
#[component]
pub fn MessageContent(content: String) -> impl IntoView {
    let rendered = render_markdown(&content);
    view! { <div class="prose prose-invert max-w-none break-words" inner_html=rendered></div> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_renders_basic_markdown() {
        let html = render_markdown("**bold** and `code`");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_code_blocks_keep_language() {
        let html = render_markdown("```rust\nfn main() {}\n```");
        assert!(html.contains("language-rust"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("hi <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[rstest]
    #[case("[click me](javascript:alert(localStorage.getItem('token')))")]
    #[case("[x](JavaScript:alert(1))")]
    #[case("<javascript:alert(1)>")]
    #[case("[x](data:text/html;base64,PHNjcmlwdD4=)")]
    #[case("![img](javascript:alert(1))")]
    #[case("[x][ref]\n\n[ref]: vbscript:msgbox(1)")]
    fn test_dangerous_link_targets_are_neutralized(#[case] source: &str) {
        let html = render_markdown(source);
        let lower = html.to_ascii_lowercase();
        for scheme in ["javascript:", "data:", "vbscript:"] {
            assert!(!lower.contains(&format!("href=\"{}", scheme)), "{}", html);
            assert!(!lower.contains(&format!("src=\"{}", scheme)), "{}", html);
        }
        assert!(lower.contains("href=\"#\"") || lower.contains("src=\"#\""), "{}", html);
    }

    #[rstest]
    #[case("[docs](https://example.com/a?b=c)", "https://example.com/a?b=c")]
    #[case("[mail](mailto:me@example.com)", "mailto:me@example.com")]
    #[case("[local](/conversation/3)", "/conversation/3")]
    #[case("[anchor](#top)", "#top")]
    #[case("[rel](notes/a:b)", "notes/a:b")]
    fn test_safe_link_targets_are_kept(#[case] source: &str, #[case] href: &str) {
        let html = render_markdown(source);
        assert!(html.contains(&format!("href=\"{}\"", href)), "{}", html);
    }
}
