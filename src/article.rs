use std::{io::Read, path::Path};

use serde::Serialize;

use crate::{
    error::{Error, FormatIssue, Result},
    metadata::{parse_metadata, ArticleMetadata},
    source::{self, StreamSource},
};

/// A parsed article. The content is trimmed and never empty.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Article {
    metadata: ArticleMetadata,
    content: String,
}

impl Article {
    pub fn metadata(&self) -> &ArticleMetadata {
        &self.metadata
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn id(&self) -> &str {
        self.metadata.id.as_deref().unwrap_or_default()
    }

    /// Title, or the identifier when the header has none.
    pub fn display_title(&self) -> &str {
        self.metadata.title.as_deref().unwrap_or_else(|| self.id())
    }

    pub fn into_parts(self) -> (ArticleMetadata, String) {
        (self.metadata, self.content)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArticleParser<S> {
    source: S,
}

impl<S: StreamSource> ArticleParser<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn parse_article(&self, path: &Path) -> Result<Article> {
        let Some(name) = source::base_name(path) else {
            return Err(Error::InvalidArgument(format!(
                "{:?} does not name a file",
                path
            )));
        };
        let label = source::display_path(path);

        // dropped on every return below
        let mut reader = self
            .source
            .open_for_read(path)
            .map_err(|e| Error::io(&*label, e))?;

        let mut metadata = parse_metadata(&mut reader, &label)?;

        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| Error::io(&*label, e))?;
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::format(&*label, FormatIssue::NoContent));
        }

        metadata.id = Some(derive_id(&name, &source::extension(path)));

        Ok(Article {
            metadata,
            content: content.to_string(),
        })
    }
}

/// Identifier of an article file: its name with every occurrence of the
/// extension text removed, e.g. `post.md.draft.md` -> `post.draft`.
pub fn derive_id(file_name: &str, extension: &str) -> String {
    if extension.is_empty() {
        return file_name.to_string();
    }
    file_name.replace(extension, "")
}
