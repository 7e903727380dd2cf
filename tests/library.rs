use std::{fs, path::Path};

use postmeta::{ArticleParser, Error, FormatIssue, FsSource, Library, LoadOptions};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "2020-01-01-hello.md",
        "<!--\ntitle: Hello World\nauthor: Jane\ntags: intro news\n-->\nBody text.\n",
    );
    write(
        dir.path(),
        "2021/second.md",
        "<!--\ntitle: Second\npublished: 2021-02-03 10:00\ntags: news news\n-->\nMore.\n",
    );
    write(
        dir.path(),
        "first.md",
        "<!--\ntitle: First\npublished: 2020-05-06\n-->\nEarlier.\n",
    );
    write(dir.path(), "notes.txt", "not an article");
    dir
}

#[test]
fn parses_a_file_from_disk() {
    let dir = fixture();
    let article = ArticleParser::new(FsSource)
        .parse_article(&dir.path().join("2020-01-01-hello.md"))
        .unwrap();
    assert_eq!(article.id(), "2020-01-01-hello");
    assert_eq!(article.metadata().title.as_deref(), Some("Hello World"));
    assert_eq!(article.content(), "Body text.");
}

#[test]
fn loads_recursively_and_orders_newest_first() {
    let dir = fixture();
    let parser = ArticleParser::new(FsSource);
    let library = Library::load(&parser, dir.path(), &LoadOptions::default()).unwrap();

    let ids: Vec<_> = library.articles().iter().map(|a| a.id()).collect();
    assert_eq!(ids, vec!["second", "first", "2020-01-01-hello"]);
    assert!(library.get("first").is_some());
    assert!(library.get("notes").is_none());
}

#[test]
fn tag_index_lists_each_article_once() {
    let dir = fixture();
    let parser = ArticleParser::new(FsSource);
    let library = Library::load(&parser, dir.path(), &LoadOptions::default()).unwrap();

    let tags = library.tags();
    let news: Vec<_> = tags["news"].iter().map(|a| a.id()).collect();
    assert_eq!(news, vec!["second", "2020-01-01-hello"]);
    assert_eq!(tags.keys().copied().collect::<Vec<_>>(), vec!["intro", "news"]);
}

#[test]
fn other_extensions_can_be_selected() {
    let dir = fixture();
    write(dir.path(), "page.txt", "<!--\n-->\ntext page\n");
    let parser = ArticleParser::new(FsSource);
    let options = LoadOptions {
        extension: "txt".to_string(),
        skip_invalid: true,
    };
    let library = Library::load(&parser, dir.path(), &options).unwrap();
    let ids: Vec<_> = library.articles().iter().map(|a| a.id()).collect();
    assert_eq!(ids, vec!["page"]);
}

#[test]
fn invalid_article_fails_unless_skipped() {
    let dir = fixture();
    write(dir.path(), "broken.md", "<!--\ntitle: never closed\n");
    let parser = ArticleParser::new(FsSource);

    let err = Library::load(&parser, dir.path(), &LoadOptions::default()).unwrap_err();
    assert_eq!(err.format_issue(), Some(FormatIssue::MissingCloseFence));
    assert!(matches!(err, Error::Format { ref path, .. } if path.ends_with("broken.md")));

    let options = LoadOptions {
        skip_invalid: true,
        ..LoadOptions::default()
    };
    let library = Library::load(&parser, dir.path(), &options).unwrap();
    assert_eq!(library.articles().len(), 3);
}

#[cfg(unix)]
#[test]
fn directory_symlinks_are_not_followed() {
    let dir = fixture();
    std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();
    let parser = ArticleParser::new(FsSource);
    let library = Library::load(&parser, dir.path(), &LoadOptions::default()).unwrap();

    let ids: Vec<_> = library.articles().iter().map(|a| a.id()).collect();
    assert_eq!(ids, vec!["second", "first", "2020-01-01-hello"]);
}
