use std::path::PathBuf;

use crate::library::LoadOptions;

/// Settings assembled by the command line front end.
#[derive(Debug, Clone)]
pub struct Config {
    pub article_dir: PathBuf,
    pub blog_name: String,
    pub blog_url: String,
    pub load: LoadOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            article_dir: PathBuf::from("posts"),
            blog_name: String::new(),
            blog_url: "http://localhost/".to_string(),
            load: LoadOptions::default(),
        }
    }
}

impl Config {
    /// Absolute URL of an article page.
    pub fn article_url(&self, id: &str) -> String {
        format!("{}/{id}.html", self.blog_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_url_joins_once() {
        let mut config = Config::default();
        assert_eq!(config.article_url("a"), "http://localhost/a.html");
        config.blog_url = "https://example.org/blog".to_string();
        assert_eq!(config.article_url("a"), "https://example.org/blog/a.html");
    }
}
