//! Extraction of [`ArticleRecord`]s from Habr HTML.
//!
//! A listing page holds one `article.tm-articles-list__item` per story. Each
//! field is read from a fixed tag + class pair inside that element. Title,
//! timestamp and link are required; everything else degrades to an empty or
//! null value when the page leaves it out.

use crate::error::{Result, ScrapeError};
use crate::models::ArticleRecord;
use crate::scrapers::join_site_path;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};
use url::Url;

const ARTICLE: &str = "article.tm-articles-list__item";
const TITLE: &str = "h2.tm-title_h2";
const TIME: &str = "time";
const LINK: &str = "a.tm-title__link";
const BODY: &str = "div.article-formatted-body";
const PARAGRAPH: &str = "p";
const AUTHOR: &str = "a.tm-user-info__username";
const LEAD_IMAGE: &str = "img.tm-article-snippet__lead-image";
const HUB: &str = "a.tm-publication-hub__link";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{css}: {e}")))
}

struct Selectors {
    article: Selector,
    title: Selector,
    time: Selector,
    link: Selector,
    body: Selector,
    paragraph: Selector,
    author: Selector,
    lead_image: Selector,
    hub: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            article: selector(ARTICLE)?,
            title: selector(TITLE)?,
            time: selector(TIME)?,
            link: selector(LINK)?,
            body: selector(BODY)?,
            paragraph: selector(PARAGRAPH)?,
            author: selector(AUTHOR)?,
            lead_image: selector(LEAD_IMAGE)?,
            hub: selector(HUB)?,
        })
    }
}

/// Turns listing-page HTML into article records for one site domain.
pub struct ArticleExtractor {
    domain: Url,
    selectors: Selectors,
}

impl ArticleExtractor {
    pub fn new(domain: &Url) -> Result<Self> {
        Ok(Self {
            domain: domain.clone(),
            selectors: Selectors::new()?,
        })
    }

    /// Extract every article of a listing page.
    ///
    /// A block missing a required element is logged and skipped; its siblings
    /// are still returned.
    #[instrument(level = "info", skip_all, fields(domain = %self.domain))]
    pub fn extract_articles(&self, html: &str) -> Vec<ArticleRecord> {
        let document = Html::parse_document(html);
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for (index, element) in document.select(&self.selectors.article).enumerate() {
            match self.extract_article(element) {
                Ok(record) => {
                    debug!(index, title = %record.title, url = %record.url, "Extracted article");
                    records.push(record);
                }
                Err(e) => {
                    skipped += 1;
                    warn!(index, error = %e, "Skipping malformed article block");
                }
            }
        }

        debug!(extracted = records.len(), skipped, "Listing page parsed");
        records
    }

    /// Extract one `<article>` element.
    pub fn extract_article(&self, article: ElementRef<'_>) -> Result<ArticleRecord> {
        Ok(ArticleRecord {
            title: self.extract_title(article)?,
            published_at: self.extract_datetime(article)?,
            url: self.extract_url(article)?,
            preview_text: self.extract_preview_text(article),
            full_text: None,
            author: self.extract_author(article),
            preview_image_url: self.extract_preview_image(article),
            tags: self.extract_tags(article),
        })
    }

    fn extract_title(&self, article: ElementRef<'_>) -> Result<String> {
        let title = article
            .select(&self.selectors.title)
            .next()
            .map(|el| element_text(el).trim().to_string())
            .ok_or(ScrapeError::MissingElement { field: "title" })?;
        if title.is_empty() {
            return Err(ScrapeError::MissingElement { field: "title" });
        }
        Ok(title)
    }

    fn extract_datetime(&self, article: ElementRef<'_>) -> Result<String> {
        article
            .select(&self.selectors.time)
            .next()
            .and_then(|el| el.value().attr("datetime"))
            .map(str::to_string)
            .ok_or(ScrapeError::MissingElement { field: "time" })
    }

    fn extract_url(&self, article: ElementRef<'_>) -> Result<String> {
        let href = article
            .select(&self.selectors.link)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .ok_or(ScrapeError::MissingElement { field: "url" })?;
        let url = if href.starts_with('/') && !href.starts_with("//") {
            join_site_path(&self.domain, href)?
        } else {
            self.domain.join(href)?
        };
        Ok(url.to_string())
    }

    fn extract_preview_text(&self, article: ElementRef<'_>) -> String {
        match article.select(&self.selectors.body).next() {
            Some(body) => body
                .select(&self.selectors.paragraph)
                .map(element_text)
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string(),
            None => String::new(),
        }
    }

    fn extract_author(&self, article: ElementRef<'_>) -> String {
        article
            .select(&self.selectors.author)
            .next()
            .map(|el| element_text(el).trim().to_string())
            .unwrap_or_default()
    }

    fn extract_preview_image(&self, article: ElementRef<'_>) -> Option<String> {
        article
            .select(&self.selectors.lead_image)
            .next()
            .and_then(|el| el.value().attr("src"))
            .map(str::to_string)
    }

    fn extract_tags(&self, article: ElementRef<'_>) -> Vec<String> {
        article
            .select(&self.selectors.hub)
            .map(|el| element_text(el).replace('*', "").trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// Read the body of a single article page.
    pub fn extract_full_text(&self, html: &str) -> Result<String> {
        let document = Html::parse_document(html);
        let body = document
            .select(&self.selectors.body)
            .next()
            .ok_or(ScrapeError::MissingElement { field: "full_text" })?;
        Ok(body.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" "))
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
<html><body>
<article class="tm-articles-list__item">
  <h2 class="tm-title tm-title_h2">
    <a class="tm-title__link" href="/ru/articles/700001/"><span>Как мы переписали web-сервис</span></a>
  </h2>
  <a class="tm-user-info__username" href="/ru/users/alice/"> alice </a>
  <time datetime="2024-03-01T10:00:00.000Z">1 мар</time>
  <span class="tm-publication-hub__link-container">
    <a class="tm-publication-hub__link" href="/ru/hubs/webdev/"><span>Веб-разработка</span><span> *</span></a>
    <a class="tm-publication-hub__link" href="/ru/hubs/web/"><span>web</span></a>
  </span>
  <img class="tm-article-snippet__lead-image" src="https://habrastorage.org/lead.png">
  <div class="article-formatted-body">
    <p>Первый абзац.</p>
    <p>Второй абзац.</p>
  </div>
</article>
<article class="tm-articles-list__item">
  <h2 class="tm-title tm-title_h2">
    <a class="tm-title__link" href="/ru/articles/700002/"><span>Компиляторы изнутри</span></a>
  </h2>
  <a class="tm-user-info__username" href="/ru/users/bob/">bob</a>
  <time datetime="2024-03-02T11:30:00.000Z">2 мар</time>
  <a class="tm-publication-hub__link" href="/ru/hubs/compilers/"><span>Компиляторы</span><span> *</span></a>
  <div class="article-formatted-body"><p>Про LLVM.</p></div>
</article>
</body></html>
"#;

    fn extractor() -> ArticleExtractor {
        ArticleExtractor::new(&Url::parse("https://habr.com").unwrap()).unwrap()
    }

    #[test]
    fn test_extracts_all_fields() {
        let records = extractor().extract_articles(LISTING);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.title, "Как мы переписали web-сервис");
        assert_eq!(first.published_at, "2024-03-01T10:00:00.000Z");
        assert_eq!(first.url, "https://habr.com/ru/articles/700001/");
        assert_eq!(first.preview_text, "Первый абзац. Второй абзац.");
        assert_eq!(first.author, "alice");
        assert_eq!(first.preview_image_url.as_deref(), Some("https://habrastorage.org/lead.png"));
        assert_eq!(first.tags, vec!["Веб-разработка", "web"]);
        assert_eq!(first.full_text, None);
    }

    #[test]
    fn test_missing_lead_image_is_none() {
        let records = extractor().extract_articles(LISTING);
        assert_eq!(records[1].preview_image_url, None);
        assert_eq!(records[1].tags, vec!["Компиляторы"]);
    }

    #[test]
    fn test_block_without_required_field_is_skipped() {
        let html = r#"
<article class="tm-articles-list__item">
  <h2 class="tm-title_h2"><a class="tm-title__link" href="/ru/articles/1/">No time here</a></h2>
</article>
<article class="tm-articles-list__item">
  <time datetime="2024-01-01T00:00:00.000Z"></time>
  <a class="tm-title__link" href="/ru/articles/2/">no title element</a>
</article>
<article class="tm-articles-list__item">
  <h2 class="tm-title_h2"><a class="tm-title__link" href="/ru/articles/3/">Complete</a></h2>
  <time datetime="2024-01-03T00:00:00.000Z"></time>
</article>
"#;
        let records = extractor().extract_articles(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Complete");
        assert_eq!(records[0].author, "");
        assert_eq!(records[0].preview_text, "");
        assert!(records[0].tags.is_empty());
    }

    #[test]
    fn test_missing_link_is_an_error() {
        let html = r#"<article class="tm-articles-list__item">
  <h2 class="tm-title_h2">Title only</h2>
  <time datetime="2024-01-01T00:00:00.000Z"></time>
</article>"#;
        let ex = extractor();
        let document = Html::parse_document(html);
        let element = document.select(&ex.selectors.article).next().unwrap();
        let err = ex.extract_article(element).unwrap_err();
        assert!(matches!(err, ScrapeError::MissingElement { field: "url" }));
    }

    #[test]
    fn test_absolute_href_is_kept() {
        let html = r#"<article class="tm-articles-list__item">
  <h2 class="tm-title_h2"><a class="tm-title__link" href="https://habr.com/en/news/5/">Abs</a></h2>
  <time datetime="2024-01-01T00:00:00.000Z"></time>
</article>"#;
        let records = extractor().extract_articles(html);
        assert_eq!(records[0].url, "https://habr.com/en/news/5/");
    }

    #[test]
    fn test_links_stay_under_domain_path() {
        let html = r#"<article class="tm-articles-list__item">
  <h2 class="tm-title_h2"><a class="tm-title__link" href="/ru/articles/9/">Mirrored</a></h2>
  <time datetime="2024-01-01T00:00:00.000Z"></time>
</article>"#;
        let ex = ArticleExtractor::new(&Url::parse("https://mirror.example.org/habr").unwrap()).unwrap();
        let records = ex.extract_articles(html);
        assert_eq!(records[0].url, "https://mirror.example.org/habr/ru/articles/9/");
    }

    #[test]
    fn test_page_without_articles_is_empty() {
        assert!(extractor().extract_articles("<html><body><p>nothing</p></body></html>").is_empty());
    }

    #[test]
    fn test_full_text() {
        let page = r#"<html><body><div class="article-formatted-body">
  <p>Полный   текст</p>
  <p>статьи.</p>
</div></body></html>"#;
        assert_eq!(extractor().extract_full_text(page).unwrap(), "Полный текст статьи.");
    }

    #[test]
    fn test_full_text_missing_body() {
        let err = extractor().extract_full_text("<html></html>").unwrap_err();
        assert!(matches!(err, ScrapeError::MissingElement { field: "full_text" }));
    }
}
