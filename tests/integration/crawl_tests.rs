//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! fetch, count and follow cycle end-to-end.

use kanji_kana_scraper::config::ScraperConfig;
use kanji_kana_scraper::crawler::{Crawler, HttpFetcher};
use kanji_kana_scraper::output::{OutputHandler, TextOutput};
use kanji_kana_scraper::{ScriptClass, VisitState};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a sequential crawler backed by a real HTTP client
fn http_crawler() -> Crawler {
    let fetcher = HttpFetcher::from_config(&ScraperConfig::default())
        .expect("Failed to build HTTP client");
    Crawler::new(Arc::new(fetcher))
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html; charset=utf-8")
}

async fn mount_page(server: &MockServer, route: &str, body: &str, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_two_page_site() {
    let mock_server = MockServer::start().await;

    // 日 x3, 本 x2, 語 x1
    mount_page(
        &mock_server,
        "/",
        r#"<p>日本語 日本 日</p><a href="child.html">next</a>"#,
        1,
    )
    .await;

    // の x2, は x1
    mount_page(&mock_server, "/child.html", "<p>のはの</p>", 1).await;

    let report = http_crawler().run(&mock_server.uri(), 1).await;
    let summary = report.summary;

    assert!(report.completed);
    assert_eq!(report.pages_fetched(), 2);
    assert_eq!(summary.kanji_unique_count, 3);
    assert_eq!(summary.hiragana_unique_count, 2);
    assert_eq!(summary.katakana_unique_count, 0);
    assert_eq!(summary.kana_unique_count, 2);
    assert_eq!(summary.unique_count, 5);
    assert_eq!(summary.total_classified_count, 6 + 3);

    assert_eq!(report.counter.count_of(ScriptClass::Kanji, '日'), 3);
    assert_eq!(report.counter.count_of(ScriptClass::Kanji, '本'), 2);
    assert_eq!(report.counter.count_of(ScriptClass::Kanji, '語'), 1);
    assert_eq!(report.counter.count_of(ScriptClass::Hiragana, 'の'), 2);
}

#[tokio::test]
async fn test_depth_zero_fetches_only_root() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<p>山</p><a href="a.html">a</a><a href="b.html">b</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/a.html", "<p>川</p>", 0).await;
    mount_page(&mock_server, "/b.html", "<p>海</p>", 0).await;

    let report = http_crawler().run(&mock_server.uri(), 0).await;

    assert_eq!(report.visits.len(), 1);
    assert_eq!(report.summary.kanji_unique_count, 1);

    // Wiremock verifies the expected hit counts when mock_server drops
}

#[tokio::test]
async fn test_only_relative_html_links_followed() {
    let mock_server = MockServer::start().await;

    let root = format!(
        r##"
        <a href="page2.html">2</a>
        <a href="sub/page3.html">3</a>
        <a href="{uri}/absolute.html">absolute</a>
        <a href="//{authority}/protocol.html">protocol relative</a>
        <a href="/rooted.html">root relative</a>
        <a href="#section">fragment</a>
        <a href="../parent.html">parent</a>
        <a href="page.htm">htm</a>
        <a href="">empty</a>
        "##,
        uri = mock_server.uri(),
        authority = mock_server.address()
    );
    mount_page(&mock_server, "/", &root, 1).await;
    mount_page(&mock_server, "/page2.html", "<p>二</p>", 1).await;
    mount_page(&mock_server, "/sub/page3.html", "<p>三</p>", 1).await;
    mount_page(&mock_server, "/rooted.html", "<p>根</p>", 1).await;
    mount_page(&mock_server, "/absolute.html", "<p>外</p>", 0).await;
    mount_page(&mock_server, "/protocol.html", "<p>他</p>", 0).await;
    mount_page(&mock_server, "/parent.html", "<p>親</p>", 0).await;
    mount_page(&mock_server, "/page.htm", "<p>違</p>", 0).await;

    let report = http_crawler().run(&mock_server.uri(), 1).await;

    assert_eq!(report.pages_fetched(), 4);
    assert_eq!(report.summary.kanji_unique_count, 3);
    for visit in &report.visits {
        assert!(visit.url.starts_with(&mock_server.uri()));
    }
}

#[tokio::test]
async fn test_failed_branch_is_isolated() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<p>東京都</p><a href="broken.html">x</a><a href="good.html">y</a>"#,
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/broken.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/good.html",
        r#"<p>テレビ</p><a href="deeper.html">z</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/good.html/deeper.html", "<p>ひらがな</p>", 1).await;

    let report = http_crawler().run(&mock_server.uri(), 2).await;

    assert!(report.completed);
    assert_eq!(report.pages_fetched(), 3);
    assert_eq!(report.pages_failed(), 1);

    assert_eq!(report.summary.kanji_unique_count, 3);
    assert_eq!(report.summary.katakana_unique_count, 3);
    assert_eq!(report.summary.hiragana_unique_count, 4);

    let broken = report
        .visits
        .iter()
        .find(|v| v.url.ends_with("/broken.html"))
        .expect("broken page should be recorded");
    assert_eq!(broken.state, VisitState::Aborted);
    assert_eq!(broken.error.as_deref(), Some("HTTP 500"));
}

#[tokio::test]
async fn test_deadline_cuts_slow_crawl_short() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<p>早</p><a href="slow.html">slow</a>"#,
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/slow.html"))
        .respond_with(html("<p>遅</p>").set_delay(Duration::from_secs(10)))
        .mount(&mock_server)
        .await;

    let report = http_crawler()
        .with_timeout(Some(Duration::from_millis(500)))
        .run(&mock_server.uri(), 1)
        .await;

    assert!(!report.completed);
    assert!(report.elapsed < Duration::from_secs(5));
    assert_eq!(report.counter.count_of(ScriptClass::Kanji, '早'), 1);
    assert_eq!(report.counter.count_of(ScriptClass::Kanji, '遅'), 0);
}

#[tokio::test]
async fn test_concurrent_crawl_matches_sequential() {
    let mock_server = MockServer::start().await;

    let links: String = (1..=6)
        .map(|i| format!(r#"<a href="p{}.html">{}</a>"#, i, i))
        .collect();
    mount_page(&mock_server, "/", &format!("<p>始</p>{}", links), 2).await;
    for (i, body) in ["一あ", "二い", "三う", "四ア", "五イ", "六ウ"].iter().enumerate() {
        mount_page(&mock_server, &format!("/p{}.html", i + 1), body, 2).await;
    }

    let sequential = http_crawler().run(&mock_server.uri(), 1).await;
    let parallel = http_crawler()
        .with_max_concurrent_fetches(4)
        .run(&mock_server.uri(), 1)
        .await;

    assert_eq!(sequential.summary, parallel.summary);
    assert_eq!(parallel.summary.kanji_unique_count, 7);
    assert_eq!(parallel.summary.kana_unique_count, 6);
    for class in ScriptClass::ALL {
        assert_eq!(
            sequential.counter.counts(class),
            parallel.counter.counts(class)
        );
    }
}

#[tokio::test]
async fn test_text_report_for_crawl() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<p>カタカナ</p>", 1).await;

    let report = http_crawler().run(&mock_server.uri(), 0).await;

    let mut buffer = Vec::new();
    TextOutput
        .write_report(&report, 100, &mut buffer)
        .expect("Failed to render report");
    let text = String::from_utf8(buffer).expect("Report is not UTF-8");

    assert!(text.contains("All Japanese characters found: 4"));
    assert!(text.contains("Katakana unique count: 3"));
    assert!(text.contains("   1. カ [ka] (2)"));
}
