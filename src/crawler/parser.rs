//! HTML link extraction and child-link filtering
//!
//! This module handles:
//! - Pulling raw `href` values out of `<a>` tags
//! - Deciding which of them are followable child pages
//! - Building child URLs from the current page URL

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Suffix a child link must carry to be followed
const FOLLOWED_SUFFIX: &str = ".html";

/// Extracts the raw `href` attribute of every `<a>` tag, in document order
///
/// Values are returned untouched; no resolution or filtering happens here.
///
/// # Example
///
/// ```no_run
/// use kanji_kana_scraper::crawler::extract_hrefs;
///
/// let html = r#"<html><body><a href="news.html">News</a></body></html>"#;
/// assert_eq!(extract_hrefs(html), vec!["news.html".to_string()]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Decides whether an `href` names a followable child page
///
/// Only relative links are followed, so absolute same-site links are
/// skipped as well, along with protocol-relative (`//host/...`) and
/// scheme-bearing (`mailto:...`) ones. Fragments and parent-relative paths
/// are rejected and the target must end in `.html`.
pub fn is_followable(href: &str) -> bool {
    !href.is_empty()
        && !href.starts_with("http")
        && !href.starts_with("//")
        && !href.starts_with('#')
        && !href.starts_with("..")
        && href.ends_with(FOLLOWED_SUFFIX)
        && Url::parse(href).is_err()
}

/// Builds the URL of a child page from its parent's URL and a filtered href
///
/// The parent URL is treated as a directory, so `https://www.a.jp` and
/// `page.html` give `https://www.a.jp/page.html`. Leading slashes are
/// dropped, so `/page.html` also lands under the parent. A result that
/// would leave the parent's origin, or a parent that does not parse as a
/// URL, falls back to joining the two parts with a `/` as-is.
pub fn child_url(page_url: &str, href: &str) -> String {
    let relative = href.trim_start_matches('/');
    let directory = format!("{}/", page_url.trim_end_matches('/'));

    let joined = Url::parse(&directory)
        .and_then(|base| base.join(relative).map(|url| (base, url)));

    match joined {
        Ok((base, url)) if url.origin() == base.origin() => url.to_string(),
        _ => format!("{}/{}", page_url, relative),
    }
}

/// Extracts, filters and deduplicates the child links of one page
///
/// Duplicates are removed within this page only; first occurrence order is
/// kept.
pub fn extract_child_links(page_url: &str, html: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    extract_hrefs(html)
        .into_iter()
        .filter(|href| {
            let keep = is_followable(href);
            if !keep {
                tracing::trace!("Skipping link {:?} on {}", href, page_url);
            }
            keep
        })
        .map(|href| child_url(page_url, &href))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
