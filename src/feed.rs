use atom_syndication::{
    CategoryBuilder, ContentBuilder, Entry, EntryBuilder, Feed, FeedBuilder, FixedDateTime,
    LinkBuilder, PersonBuilder,
};
use chrono::{NaiveDateTime, Utc};

use crate::{article::Article, config::Config, library::Library, render::content_html};

fn as_fixed(dt: NaiveDateTime) -> FixedDateTime {
    dt.and_utc().into()
}

fn entry(article: &Article, config: &Config) -> Entry {
    let meta = article.metadata();
    let url = config.article_url(article.id());
    let updated = meta
        .last_edited
        .or(meta.published)
        .map(as_fixed)
        .unwrap_or_else(|| Utc::now().into());

    EntryBuilder::default()
        .id(url.clone())
        .title(article.display_title().to_string())
        .updated(updated)
        .published(meta.published.map(as_fixed))
        .authors(
            meta.author
                .iter()
                .map(|name| PersonBuilder::default().name(name.clone()).build())
                .collect::<Vec<_>>(),
        )
        .categories(
            meta.tags
                .iter()
                .map(|tag| CategoryBuilder::default().term(tag.clone()).build())
                .collect::<Vec<_>>(),
        )
        .links(vec![LinkBuilder::default().href(url).build()])
        .content(Some(
            ContentBuilder::default()
                .value(Some(content_html(article)))
                .content_type(Some("html".to_string()))
                .build(),
        ))
        .build()
}

/// Atom feed with one entry per article, in library order.
pub fn build_feed(library: &Library, config: &Config) -> Feed {
    let entries: Vec<Entry> = library
        .articles()
        .iter()
        .map(|a| entry(a, config))
        .collect();
    let updated = entries
        .iter()
        .map(|e| e.updated)
        .max()
        .unwrap_or_else(|| Utc::now().into());

    FeedBuilder::default()
        .title(config.blog_name.clone())
        .id(config.blog_url.clone())
        .updated(updated)
        .links(vec![LinkBuilder::default().href(config.blog_url.clone()).build()])
        .entries(entries)
        .build()
}
