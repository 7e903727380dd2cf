//! Parses article files made of a fenced `key: value` header and a body.
//!
//! ```text
//! <!--
//! title: Hello World
//! author: Jane
//! published: 2020-01-01 09:00
//! tags: intro news
//! -->
//! Body text.
//! ```

pub mod article;
pub mod config;
pub mod error;
pub mod feed;
pub mod library;
pub mod metadata;
pub mod render;
pub mod source;

pub use article::{derive_id, Article, ArticleParser};
pub use error::{Error, FormatIssue, Result};
pub use library::{Library, LoadOptions};
pub use metadata::{parse_metadata, parse_timestamp, ArticleMetadata};
pub use source::{FsSource, StreamSource};
