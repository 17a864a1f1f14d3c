// Typed shapes of the two API responses and their decoders.
//
// Decoding never aborts the program: every decoder returns a
// `DecodeError` the caller can log and turn into an "empty" message.

use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed search response: {0}")]
    Search(#[source] serde_json::Error),
    #[error("malformed article response: {0}")]
    Article(#[source] serde_json::Error),
}

/// Opensearch result: `[echo, titles, descriptions, links]` with the echo
/// dropped. The three sequences are parallel but the service does not
/// guarantee equal lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResponse {
    pub titles: Vec<String>,
    pub descriptions: Vec<String>,
    pub links: Vec<String>,
}

/// One row of a `SearchResponse`, borrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub index: usize,
    pub title: &'a str,
    pub description: &'a str,
    pub link: &'a str,
}

impl SearchResponse {
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// One hit per title. A description or link missing from a shorter
    /// sequence reads as the empty string.
    pub fn hits(&self) -> impl Iterator<Item = SearchHit<'_>> {
        self.titles.iter().enumerate().map(move |(index, title)| SearchHit {
            index,
            title,
            description: self.descriptions.get(index).map_or("", String::as_str),
            link: self.links.get(index).map_or("", String::as_str),
        })
    }
}

pub fn decode_search(body: &[u8]) -> Result<SearchResponse, DecodeError> {
    type Raw = (IgnoredAny, Vec<String>, Vec<String>, Vec<String>);
    let (_echo, titles, descriptions, links): Raw =
        serde_json::from_slice(body).map_err(DecodeError::Search)?;
    Ok(SearchResponse {
        titles,
        descriptions,
        links,
    })
}

/// `query.pageids` of an article response: the page-ids in the order the
/// service returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArticlePageIndex {
    #[serde(default)]
    pub pageids: Vec<String>,
}

impl ArticlePageIndex {
    pub fn first(&self) -> Option<&str> {
        self.pageids.first().map(String::as_str)
    }
}

/// The fields of a page this client reads. A missing page has neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArticlePage {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub extract: String,
}

/// `query.pages`, keyed by page-id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArticlePages {
    #[serde(default)]
    pub pages: HashMap<String, ArticlePage>,
}

impl ArticlePages {
    pub fn get(&self, page_id: &str) -> Option<&ArticlePage> {
        self.pages.get(page_id)
    }

    /// The page named by the first id in `index`. Any further ids are
    /// ignored.
    pub fn first_in<'a>(&'a self, index: &ArticlePageIndex) -> Option<&'a ArticlePage> {
        index.first().and_then(|id| self.get(id))
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    query: T,
}

pub fn decode_page_index(body: &[u8]) -> Result<ArticlePageIndex, DecodeError> {
    let envelope: Envelope<ArticlePageIndex> =
        serde_json::from_slice(body).map_err(DecodeError::Article)?;
    Ok(envelope.query)
}

pub fn decode_pages(body: &[u8]) -> Result<ArticlePages, DecodeError> {
    let envelope: Envelope<ArticlePages> =
        serde_json::from_slice(body).map_err(DecodeError::Article)?;
    Ok(envelope.query)
}

/// Decode both views of an article response and return the first page.
pub fn decode_article(body: &[u8]) -> Result<Option<ArticlePage>, DecodeError> {
    let index = decode_page_index(body)?;
    let pages = decode_pages(body)?;
    Ok(pages.first_in(&index).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"["rust",
        ["Rust", "Rust (programming language)"],
        ["Iron oxide", "A systems language"],
        ["https://en.wikipedia.org/wiki/Rust", "https://en.wikipedia.org/wiki/Rust_(programming_language)"]]"#;

    const ARTICLE_BODY: &str = r#"{
        "batchcomplete": "",
        "query": {
            "pageids": ["26301", "42"],
            "pages": {
                "42": {"pageid": 42, "ns": 0, "title": "Other", "extract": "other text"},
                "26301": {"pageid": 26301, "ns": 0, "title": "Rust", "extract": "Rust is an iron oxide."}
            }
        }
    }"#;

    #[test]
    fn decode_search_reads_positions_one_to_three() {
        let res = decode_search(SEARCH_BODY.as_bytes()).unwrap();
        assert_eq!(res.titles, vec!["Rust", "Rust (programming language)"]);
        assert_eq!(res.descriptions[1], "A systems language");
        assert_eq!(res.links[0], "https://en.wikipedia.org/wiki/Rust");
        assert_eq!(res.len(), 2);
    }

    #[test]
    fn decode_search_rejects_malformed_bodies() {
        for body in [
            r#"{"error": "nope"}"#,
            r#"["rust", ["Rust"], ["Iron oxide"]]"#,
            r#"["rust", "Rust", [], []]"#,
            "<html>busy</html>",
            "",
        ] {
            assert!(decode_search(body.as_bytes()).is_err(), "accepted {body:?}");
        }
    }

    #[test]
    fn empty_result_set_decodes_as_empty() {
        let res = decode_search(br#"["zzzxq", [], [], []]"#).unwrap();
        assert!(res.is_empty());
        assert_eq!(res.hits().count(), 0);
    }

    #[test]
    fn hits_tolerate_short_parallel_sequences() {
        let res = decode_search(br#"["a", ["A", "B"], ["first"], []]"#).unwrap();
        let hits: Vec<_> = res.hits().collect();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].description, "first");
        assert_eq!(hits[1].description, "");
        assert_eq!(hits[1].link, "");
    }

    #[test]
    fn page_index_keeps_service_order() {
        let index = decode_page_index(ARTICLE_BODY.as_bytes()).unwrap();
        assert_eq!(index.pageids, vec!["26301", "42"]);
        assert_eq!(index.first(), Some("26301"));
    }

    #[test]
    fn article_resolves_first_page_only() {
        let page = decode_article(ARTICLE_BODY.as_bytes()).unwrap().unwrap();
        assert_eq!(page.title, "Rust");
        assert_eq!(page.extract, "Rust is an iron oxide.");
    }

    #[test]
    fn missing_page_has_empty_fields() {
        let body = br#"{"query": {"pageids": ["-1"], "pages": {"-1": {"ns": 0, "title": "Nope", "missing": ""}}}}"#;
        let page = decode_article(body).unwrap().unwrap();
        assert_eq!(page.title, "Nope");
        assert!(page.extract.is_empty());
    }

    #[test]
    fn article_without_page_ids_yields_nothing() {
        let body = br#"{"query": {"pages": {"1": {"title": "A", "extract": "a"}}}}"#;
        assert_eq!(decode_article(body).unwrap(), None);
    }

    #[test]
    fn article_without_query_is_an_error() {
        assert!(decode_article(br#"{"error": {"code": "badvalue"}}"#).is_err());
        assert!(decode_article(b"not json").is_err());
    }
}
