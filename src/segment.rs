//! Segmentation of legal text into numbered articles.
//!
//! Statute-style documents mark each article with a line such as
//! `Art. 5º ...`. The segmenter slices the document at those markers and
//! produces one addressable unit per article.

use lazy_static::lazy_static;
use regex::Regex;

/// Label assigned when a matched span yields no numeric token.
pub const NUMBER_UNKNOWN: &str = "Unknown";
/// Label assigned to the single whole-text article produced when the
/// document carries no article markers at all.
pub const NUMBER_COMPLETE: &str = "Complete";

lazy_static! {
    // Line-anchored so occurrences of "art." inside a sentence never open
    // a span. Accepts the ordinal suffixes used in Brazilian statutes
    // ("Art. 1º", "Art. 2o").
    static ref ARTICLE_MARKER: Regex =
        Regex::new(r"(?mi)^[ \t]*art\.\s*(\d+)[ºo°]?\.?").unwrap();
}

/// One segmented unit of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Extracted article label, numeric for marked articles or one of the
    /// sentinels ([`NUMBER_UNKNOWN`], [`NUMBER_COMPLETE`]).
    pub number: String,
    /// Whitespace-collapsed article body, never empty.
    pub text: String,
    /// Position in the document, dense from 0.
    pub ordinal: usize,
}

/// Split a document into ordered articles.
///
/// Each article runs from one line-start `Art. <n>` marker up to the next
/// marker or the end of the text. A non-empty document without any marker
/// yields a single article labelled [`NUMBER_COMPLETE`] holding the whole
/// text; empty input yields an empty list. This function does not fail.
pub fn segment_articles(text: &str) -> Vec<Article> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let marks: Vec<(usize, String)> = ARTICLE_MARKER
        .captures_iter(text)
        .map(|caps| {
            let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
            let number = caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| NUMBER_UNKNOWN.to_string());
            (start, number)
        })
        .collect();

    if marks.is_empty() {
        return vec![Article {
            number: NUMBER_COMPLETE.to_string(),
            text: collapse_whitespace(text),
            ordinal: 0,
        }];
    }

    let mut articles = Vec::with_capacity(marks.len());
    for (i, (start, number)) in marks.iter().enumerate() {
        let end = marks.get(i + 1).map(|(s, _)| *s).unwrap_or(text.len());
        let body = collapse_whitespace(&text[*start..end]);
        if body.is_empty() {
            continue;
        }
        articles.push(Article {
            number: number.clone(),
            text: body,
            ordinal: articles.len(),
        });
    }

    articles
}

/// Normalize whitespace: trim and collapse internal runs to single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}
