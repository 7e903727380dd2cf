use std::{
    cmp::Ordering,
    collections::{BTreeMap, VecDeque},
    path::Path,
};

use log::{debug, info, warn};

use crate::{
    article::{Article, ArticleParser},
    error::{Error, Result},
    source::StreamSource,
};

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Extension of article files. A leading dot is ignored.
    pub extension: String,
    /// Log and skip files that are not valid articles instead of failing.
    pub skip_invalid: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            extension: "md".to_string(),
            skip_invalid: false,
        }
    }
}

/// All articles found below one directory, newest first.
#[derive(Debug, Clone, Default)]
pub struct Library {
    articles: Vec<Article>,
}

impl Library {
    pub fn load<S: StreamSource>(
        parser: &ArticleParser<S>,
        root: &Path,
        options: &LoadOptions,
    ) -> Result<Self> {
        let mut articles = vec![];

        let mut q = VecDeque::new();
        q.push_back(root.to_path_buf());
        while let Some(dir) = q.pop_front() {
            debug!("Scanning {dir:?}...");
            let dir_err = |e: std::io::Error| Error::io(dir.to_string_lossy(), e);

            let mut entries = std::fs::read_dir(&dir)
                .map_err(dir_err)?
                .collect::<std::io::Result<Vec<_>>>()
                .map_err(dir_err)?;
            entries.sort_by_key(|e| e.path());

            for entry in entries {
                let path = entry.path();
                // symlinked directories are not followed
                if entry.file_type().map_err(dir_err)?.is_dir() {
                    q.push_back(path);
                    continue;
                }
                if !path.is_file() || !has_extension(&path, &options.extension) {
                    debug!("Ignoring {path:?}");
                    continue;
                }

                match parser.parse_article(&path) {
                    Ok(article) => articles.push(article),
                    Err(e @ Error::Format { .. }) if options.skip_invalid => {
                        warn!("Skipping invalid article: {e}");
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        info!("Loaded {} articles from {root:?}", articles.len());
        Ok(Self::from_articles(articles))
    }

    pub fn from_articles(mut articles: Vec<Article>) -> Self {
        articles.sort_by(sort_article);
        Self { articles }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn get(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id() == id)
    }

    /// Tag index, each article listed once per tag in library order.
    pub fn tags(&self) -> BTreeMap<&str, Vec<&Article>> {
        let mut tags: BTreeMap<&str, Vec<&Article>> = BTreeMap::new();
        for article in self.articles.iter() {
            for tag in article.metadata().tags.iter() {
                let tag_entries = tags.entry(tag.as_str()).or_default();
                if !tag_entries.iter().any(|a| std::ptr::eq(*a, article)) {
                    tag_entries.push(article);
                }
            }
        }
        tags
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    let extension = extension.trim_start_matches('.');
    path.extension().is_some_and(|e| e == extension)
}

/// Newest first. Undated articles go last, ordered by title then id.
pub fn sort_article(a: &Article, b: &Article) -> Ordering {
    let (ma, mb) = (a.metadata(), b.metadata());
    match (ma.published, mb.published) {
        (Some(ref a_date), Some(ref b_date)) => b_date.cmp(a_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.display_title().cmp(b.display_title()))
    .then_with(|| a.id().cmp(b.id()))
}
