use dioxus::prelude::*;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Replace link targets with a scheme other than http, https or mailto by `#`.
/// Relative targets are kept.
fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let scheme_end = url.find(|c| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(i) if url[i..].starts_with(':') => {
            let scheme = url[..i].to_ascii_lowercase();
            if SAFE_SCHEMES.contains(&scheme.as_str()) {
                url
            } else {
                CowStr::Borrowed("#")
            }
        }
        _ => url,
    }
}

/// Render Markdown to HTML. Raw HTML in the source is escaped and unsafe link
/// targets are dropped, since model replies end up here too.
pub fn render_markdown(source: &str) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(source, opts).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
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
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Published posts, newest first.
#[component]
pub fn BlogList() -> Element {
    let posts = use_resource(move || api::list_published_posts());

    let view = match &*posts.read() {
        None => rsx! { p { class: "muted", "Loading posts..." } },
        Some(Err(e)) => {
            tracing::error!("Failed to load posts: {}", e);
            rsx! { p { class: "error", "Posts are unavailable right now." } }
        }
        Some(Ok(list)) if list.is_empty() => rsx! { p { class: "muted", "No posts yet." } },
        Some(Ok(list)) => rsx! {
            div {
                class: "posts",
                for post in list.iter().cloned() {
                    article {
                        key: "{post.id}",
                        id: "{post.slug}",
                        class: "card",
                        h3 { "{post.title}" }
                        if let Some(date) = post.published_at.clone() {
                            p { class: "muted", "{date}" }
                        }
                        div { dangerous_inner_html: render_markdown(&post.summary) }
                    }
                }
            }
        },
    };
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_basic_markdown() {
        let html = render_markdown("Some **bold** text");
        assert_eq!(html, "<p>Some <strong>bold</strong> text</p>\n");
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("hi <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_lists_render() {
        let html = render_markdown("- one\n- two\n");
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<li>two</li>"));
    }

    #[test]
    fn test_script_links_are_neutralized() {
        let html = render_markdown("[x](javascript:alert(1)) ![i](JavaScript:alert(2))");
        assert!(!html.to_lowercase().contains("javascript:"));
        assert!(html.contains(r##"href="#""##));
        assert!(html.contains(r##"src="#""##));

        let html = render_markdown("[d](data:text/html;base64,PHNjcmlwdD4=)");
        assert!(html.contains(r##"href="#""##));
    }

    #[test]
    fn test_safe_links_are_kept() {
        let html = render_markdown(
            "[a](https://example.com/x?y=1) [b](mailto:me@example.com) [c](/blog#top)",
        );
        assert!(html.contains(r#"href="https://example.com/x?y=1""#));
        assert!(html.contains(r#"href="mailto:me@example.com""#));
        assert!(html.contains(r#"href="/blog#top""#));
    }
}
