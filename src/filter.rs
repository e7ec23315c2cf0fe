//! Keyword filtering of extracted articles.

use crate::models::ArticleRecord;

/// Case-insensitive keywords matched as substrings.
///
/// An empty set matches every article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// The lower-cased keywords, in the order they were given.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True when any keyword occurs in the title, the preview text, or any tag.
    pub fn matches(&self, article: &ArticleRecord) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        let title = article.title.to_lowercase();
        let preview = article.preview_text.to_lowercase();
        let tags: Vec<String> = article.tags.iter().map(|t| t.to_lowercase()).collect();

        self.keywords.iter().any(|kw| {
            title.contains(kw.as_str())
                || preview.contains(kw.as_str())
                || tags.iter().any(|t| t.contains(kw.as_str()))
        })
    }

    /// Keep only the matching articles, preserving order.
    pub fn filter(&self, articles: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
        if self.keywords.is_empty() {
            return articles;
        }
        articles.into_iter().filter(|a| self.matches(a)).collect()
    }
}
