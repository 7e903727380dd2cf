use std::io::BufRead;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, FormatIssue, Result};

pub const OPEN_FENCE: &str = "<!--";
pub const CLOSE_FENCE: &str = "-->";

#[derive(serde::Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleMetadata {
    pub id: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub published: Option<NaiveDateTime>,
    pub last_edited: Option<NaiveDateTime>,
    pub tags: Vec<String>,
}

/// Keys understood inside the metadata block. Anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetadataKey {
    Title,
    Author,
    Published,
    LastEdited,
    Tags,
}

impl MetadataKey {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "title" => Some(Self::Title),
            "author" => Some(Self::Author),
            "published" => Some(Self::Published),
            "lastedited" => Some(Self::LastEdited),
            "tags" => Some(Self::Tags),
            _ => None,
        }
    }

    fn apply(self, metadata: &mut ArticleMetadata, value: &str) {
        match self {
            Self::Title => metadata.title = Some(value.to_string()),
            Self::Author => metadata.author = Some(value.to_string()),
            // unparseable dates are dropped without touching the field
            Self::Published => {
                if let Some(dt) = parse_timestamp(value) {
                    metadata.published = Some(dt);
                }
            }
            Self::LastEdited => {
                if let Some(dt) = parse_timestamp(value) {
                    metadata.last_edited = Some(dt);
                }
            }
            Self::Tags => {
                metadata.tags = value
                    .split(' ')
                    .filter(|t| !t.is_empty())
                    .map(|t| t.to_string())
                    .collect();
            }
        }
    }
}

/// Reads the fenced `key: value` block at the start of `reader`.
///
/// The reader is left positioned right after the closing fence, so the rest
/// of the stream is the article body. `label` is only used in error messages.
/// The returned metadata has no `id`; assigning it is up to the caller.
pub fn parse_metadata<R: BufRead>(reader: R, label: &str) -> Result<ArticleMetadata> {
    let mut lines = reader.lines();

    match lines.next() {
        Some(Ok(line)) if line == OPEN_FENCE => {}
        Some(Err(e)) => return Err(Error::io(label, e)),
        _ => return Err(Error::format(label, FormatIssue::MissingOpenFence)),
    }

    let mut metadata = ArticleMetadata::default();
    for line in lines {
        let line = line.map_err(|e| Error::io(label, e))?;
        if line == CLOSE_FENCE {
            return Ok(metadata);
        }

        // lines without a colon carry nothing
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        if let Some(key) = MetadataKey::from_key(&key) {
            key.apply(&mut metadata, value.trim());
        }
    }

    Err(Error::format(label, FormatIssue::MissingCloseFence))
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %:z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%A, %B %d, %Y",
];

/// Lenient, locale-independent date/time parsing.
///
/// Values carrying an offset are converted to UTC. Date-only values are midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.naive_utc());
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|f| DateTime::parse_from_str(value, f).ok())
        .map(|dt| dt.naive_utc())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(value, f).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}
