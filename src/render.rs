use chrono::NaiveDateTime;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use pulldown_cmark::{html as cmark_html, Event, Options, Parser};

use crate::article::Article;

/// Markdown body of an article as HTML.
pub fn content_html(article: &Article) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(article.content(), options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        _ => event,
    });

    let mut body_html = String::new();
    cmark_html::push_html(&mut body_html, parser);
    body_html
}

fn timestamp(label: &str, class: &str, value: Option<NaiveDateTime>) -> Markup {
    html! {
        @if let Some(dt) = value {
            span.(class) {
                (label) " "
                time datetime=(dt.format("%Y-%m-%dT%H:%M:%S").to_string()) {
                    (dt.format("%Y-%m-%d %H:%M").to_string())
                }
            }
        }
    }
}

/// Standalone HTML page for one article.
pub fn article_page(article: &Article, blog_name: &str) -> String {
    let meta = article.metadata();
    let title = article.display_title();

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title {
                    (title)
                    @if !blog_name.is_empty() {
                        " - " (blog_name)
                    }
                }
            }
            body {
                article id=(article.id()) {
                    header {
                        h1 { (title) }
                        @if let Some(author) = &meta.author {
                            span.author { (author) }
                        }
                        (timestamp("Published", "published", meta.published))
                        (timestamp("Last edited", "last-edited", meta.last_edited))
                        @if !meta.tags.is_empty() {
                            ul.tags {
                                @for tag in &meta.tags {
                                    li { a href=(format!("/tags/{tag}.html")) { (tag) } }
                                }
                            }
                        }
                    }
                    (PreEscaped(content_html(article)))
                }
            }
        }
    }
    .into_string()
}
