//! Crawl loop: drains the frontier through the policy gate, renderer,
//! extractors, and store
//!
//! Per-URL failures are logged and skipped; only storage errors and the
//! initial domain registration abort the run.

use crate::analyze::KeywordAnalyzer;
use crate::crawler::frontier::Frontier;
use crate::crawler::renderer::PageRenderer;
use crate::extract;
use crate::links::{LinkClassifier, LinkScope};
use crate::policy::PolicyGate;
use crate::storage::{InsightRecord, InsightStore};
use crate::Result;
use url::Url;

/// Parameters of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Bare domain name being crawled, e.g. `example.com`
    pub domain: String,

    /// Scheme+host prefix every policy fetch and seed is built from
    pub origin: String,

    /// Maximum number of pages to persist
    pub max_pages: usize,
}

impl CrawlOptions {
    /// Builds options for a production crawl of `https://{domain}`
    pub fn for_domain(domain: impl Into<String>, max_pages: usize) -> Self {
        let domain = domain.into();
        let origin = format!("https://{}", domain);
        Self {
            domain,
            origin,
            max_pages,
        }
    }
}

/// Outcome counters for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Pages rendered, analyzed, and persisted
    pub pages_persisted: usize,

    /// URLs skipped by the robots.txt gate
    pub skipped: usize,

    /// URLs that failed to render
    pub failed: usize,
}

/// Drives one crawl run over borrowed collaborators
pub struct Coordinator<'a, R: PageRenderer, S: InsightStore> {
    options: CrawlOptions,
    gate: PolicyGate,
    renderer: &'a R,
    store: &'a mut S,
    frontier: Frontier,
    classifier: LinkClassifier,
    analyzer: &'a KeywordAnalyzer,
}

impl<'a, R: PageRenderer, S: InsightStore> Coordinator<'a, R, S> {
    pub fn new(
        options: CrawlOptions,
        gate: PolicyGate,
        renderer: &'a R,
        store: &'a mut S,
        analyzer: &'a KeywordAnalyzer,
    ) -> Self {
        let frontier = Frontier::new(options.max_pages);
        let classifier = LinkClassifier::new(options.domain.clone());
        Self {
            options,
            gate,
            renderer,
            store,
            frontier,
            classifier,
            analyzer,
        }
    }

    /// Loads the initial frontier in order
    pub fn seed(&mut self, urls: Vec<String>) {
        self.frontier.seed(urls);
    }

    /// Runs the crawl to budget or frontier exhaustion
    pub async fn run(&mut self) -> Result<CrawlReport> {
        let domain_id = self.store.ensure_domain(&self.options.domain)?;
        let mut report = CrawlReport::default();

        while !self.frontier.budget_reached() {
            let Some(url) = self.frontier.pop() else {
                break;
            };

            // Duplicates are enqueued freely and discarded here
            if self.frontier.is_visited(&url) {
                continue;
            }
            self.frontier.mark_visited(&url);

            if !self.gate.can_fetch(&url) {
                tracing::warn!("skipping {} (disallowed by robots.txt)", url);
                report.skipped += 1;
                continue;
            }

            let rendered = match self.renderer.render(&url).await {
                Ok(rendered) => rendered,
                Err(e) => {
                    tracing::error!("failed to render {}: {}", url, e);
                    report.failed += 1;
                    continue;
                }
            };

            let page_url = match Url::parse(&url) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::error!("unparseable frontier URL {}: {}", url, e);
                    report.failed += 1;
                    continue;
                }
            };

            let signals = extract::extract(&rendered.html);

            let mut internal_links = 0usize;
            let mut external_links = 0usize;
            for href in &signals.anchors {
                let Some(link) = self.classifier.classify(href, &page_url) else {
                    continue;
                };
                match link.scope {
                    LinkScope::Internal => {
                        internal_links += 1;
                        if !self.frontier.is_visited(&link.url) {
                            self.frontier.enqueue(link.url);
                        }
                    }
                    LinkScope::External => external_links += 1,
                }
            }

            let summary = self.analyzer.analyze(&signals.text);

            let page_id = self
                .store
                .create_page(domain_id, &url, rendered.status_code)?;
            self.store.create_insight(
                page_id,
                &InsightRecord {
                    title: signals.title,
                    meta_description: signals.meta_description,
                    h1: signals.h1,
                    h2: signals.h2,
                    h3: signals.h3,
                    p_count: signals.p_count,
                    image_count: signals.image_count,
                    internal_links,
                    external_links,
                    keywords: summary.keywords,
                },
            )?;

            self.frontier.record_persisted();
            report.pages_persisted = self.frontier.persisted();
            tracing::info!("crawled ({}): {}", report.pages_persisted, url);
        }

        tracing::info!(
            "crawl finished: {} pages persisted, {} skipped, {} failed",
            report.pages_persisted,
            report.skipped,
            report.failed
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::renderer::RenderedPage;
    use crate::storage::SqliteStore;
    use crate::{LensError, Result};
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Serves canned HTML keyed by URL; unknown URLs fail to render
    struct CannedRenderer {
        pages: HashMap<String, RenderedPage>,
    }

    impl CannedRenderer {
        fn new() -> Self {
            Self {
                pages: HashMap::new(),
            }
        }

        fn page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(
                url.to_string(),
                RenderedPage {
                    html: html.to_string(),
                    status_code: 200,
                },
            );
            self
        }

        fn page_with_status(mut self, url: &str, html: &str, status_code: u16) -> Self {
            self.pages.insert(
                url.to_string(),
                RenderedPage {
                    html: html.to_string(),
                    status_code,
                },
            );
            self
        }
    }

    #[async_trait]
    impl PageRenderer for CannedRenderer {
        async fn render(&self, url: &str) -> Result<RenderedPage> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| LensError::NavigationTimeout {
                    url: url.to_string(),
                })
        }
    }

    fn options(max_pages: usize) -> CrawlOptions {
        CrawlOptions::for_domain("example.com", max_pages)
    }

    #[tokio::test]
    async fn test_single_page_is_persisted_with_signals() {
        let renderer = CannedRenderer::new().page(
            "https://example.com/",
            r#"<html><head><title>Home</title></head>
               <body><h1>Welcome</h1><p>rust rust crawling</p>
               <a href="/about">about</a>
               <a href="https://other.com/x">out</a></body></html>"#,
        );
        let mut store = SqliteStore::new_in_memory().unwrap();
        let analyzer = KeywordAnalyzer::new();

        let mut coordinator = Coordinator::new(
            options(1),
            PolicyGate::permissive(),
            &renderer,
            &mut store,
            &analyzer,
        );
        coordinator.seed(vec!["https://example.com/".to_string()]);
        let report = coordinator.run().await.unwrap();

        assert_eq!(report.pages_persisted, 1);
        let page = store
            .get_page_by_url("https://example.com/")
            .unwrap()
            .unwrap();
        assert_eq!(page.status_code, 200);

        let insight = store.get_insight(page.id).unwrap().unwrap();
        assert_eq!(insight.title.as_deref(), Some("Home"));
        assert_eq!(insight.h1, vec!["Welcome"]);
        assert_eq!(insight.internal_links, 1);
        assert_eq!(insight.external_links, 1);
        assert_eq!(insight.keywords[0].keyword, "rust");
    }

    #[tokio::test]
    async fn test_budget_caps_persisted_pages() {
        let renderer = CannedRenderer::new()
            .page(
                "https://example.com/",
                r#"<a href="/a">a</a><a href="/b">b</a><a href="/c">c</a>"#,
            )
            .page("https://example.com/a", "<p>alpha</p>")
            .page("https://example.com/b", "<p>beta</p>")
            .page("https://example.com/c", "<p>gamma</p>");
        let mut store = SqliteStore::new_in_memory().unwrap();
        let analyzer = KeywordAnalyzer::new();

        let mut coordinator = Coordinator::new(
            options(2),
            PolicyGate::permissive(),
            &renderer,
            &mut store,
            &analyzer,
        );
        coordinator.seed(vec!["https://example.com/".to_string()]);
        let report = coordinator.run().await.unwrap();

        assert_eq!(report.pages_persisted, 2);
        assert_eq!(store.count_pages().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_links_persist_at_most_once() {
        let renderer = CannedRenderer::new()
            .page(
                "https://example.com/",
                r#"<a href="/about">a</a><a href="/about">b</a><a href="/about">c</a>"#,
            )
            .page("https://example.com/about", "<p>about</p>");
        let mut store = SqliteStore::new_in_memory().unwrap();
        let analyzer = KeywordAnalyzer::new();

        let mut coordinator = Coordinator::new(
            options(10),
            PolicyGate::permissive(),
            &renderer,
            &mut store,
            &analyzer,
        );
        coordinator.seed(vec!["https://example.com/".to_string()]);
        let report = coordinator.run().await.unwrap();

        assert_eq!(report.pages_persisted, 2);
        assert_eq!(
            store
                .count_pages_with_url("https://example.com/about")
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_robots_disallowed_url_never_persisted() {
        let renderer = CannedRenderer::new()
            .page(
                "https://example.com/",
                r#"<a href="/private/report">p</a><a href="/public">ok</a>"#,
            )
            .page("https://example.com/private/report", "<p>secret</p>")
            .page("https://example.com/public", "<p>open</p>");
        let mut store = SqliteStore::new_in_memory().unwrap();
        let analyzer = KeywordAnalyzer::new();

        let mut coordinator = Coordinator::new(
            options(10),
            PolicyGate::from_rules("User-agent: *\nDisallow: /private"),
            &renderer,
            &mut store,
            &analyzer,
        );
        coordinator.seed(vec!["https://example.com/".to_string()]);
        let report = coordinator.run().await.unwrap();

        assert_eq!(report.skipped, 1);
        assert_eq!(report.pages_persisted, 2);
        assert_eq!(
            store
                .count_pages_with_url("https://example.com/private/report")
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_render_failure_does_not_halt_run() {
        // /broken has no canned page, so rendering it fails
        let renderer = CannedRenderer::new()
            .page(
                "https://example.com/",
                r#"<a href="/broken">x</a><a href="/fine">y</a>"#,
            )
            .page("https://example.com/fine", "<p>fine</p>");
        let mut store = SqliteStore::new_in_memory().unwrap();
        let analyzer = KeywordAnalyzer::new();

        let mut coordinator = Coordinator::new(
            options(10),
            PolicyGate::permissive(),
            &renderer,
            &mut store,
            &analyzer,
        );
        coordinator.seed(vec!["https://example.com/".to_string()]);
        let report = coordinator.run().await.unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.pages_persisted, 2);
        assert!(store
            .get_page_by_url("https://example.com/fine")
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_non_success_status_is_persisted_verbatim() {
        let renderer = CannedRenderer::new().page_with_status(
            "https://example.com/gone",
            "<html><body><h1>Not Found</h1></body></html>",
            404,
        );
        let mut store = SqliteStore::new_in_memory().unwrap();
        let analyzer = KeywordAnalyzer::new();

        let mut coordinator = Coordinator::new(
            options(1),
            PolicyGate::permissive(),
            &renderer,
            &mut store,
            &analyzer,
        );
        coordinator.seed(vec!["https://example.com/gone".to_string()]);
        let report = coordinator.run().await.unwrap();

        assert_eq!(report.pages_persisted, 1);
        let page = store
            .get_page_by_url("https://example.com/gone")
            .unwrap()
            .unwrap();
        assert_eq!(page.status_code, 404);
    }

    #[tokio::test]
    async fn test_external_links_are_counted_not_enqueued() {
        let renderer = CannedRenderer::new().page(
            "https://example.com/",
            r#"<a href="https://other.com/a">a</a>
               <a href="https://blog.example.com/post">sub</a>"#,
        );
        let mut store = SqliteStore::new_in_memory().unwrap();
        let analyzer = KeywordAnalyzer::new();

        let mut coordinator = Coordinator::new(
            options(10),
            PolicyGate::permissive(),
            &renderer,
            &mut store,
            &analyzer,
        );
        coordinator.seed(vec!["https://example.com/".to_string()]);
        let report = coordinator.run().await.unwrap();

        // Subdomain counts as external and nothing further is crawled
        assert_eq!(report.pages_persisted, 1);
        let page = store
            .get_page_by_url("https://example.com/")
            .unwrap()
            .unwrap();
        let insight = store.get_insight(page.id).unwrap().unwrap();
        assert_eq!(insight.internal_links, 0);
        assert_eq!(insight.external_links, 2);
    }

    #[tokio::test]
    async fn test_seed_order_is_crawl_order() {
        let renderer = CannedRenderer::new()
            .page("https://example.com/first", "<p>one</p>")
            .page("https://example.com/second", "<p>two</p>");
        let mut store = SqliteStore::new_in_memory().unwrap();
        let analyzer = KeywordAnalyzer::new();

        let mut coordinator = Coordinator::new(
            options(1),
            PolicyGate::permissive(),
            &renderer,
            &mut store,
            &analyzer,
        );
        coordinator.seed(vec![
            "https://example.com/first".to_string(),
            "https://example.com/second".to_string(),
        ]);
        coordinator.run().await.unwrap();

        // Budget of one: only the first seed is persisted
        assert!(store
            .get_page_by_url("https://example.com/first")
            .unwrap()
            .is_some());
        assert!(store
            .get_page_by_url("https://example.com/second")
            .unwrap()
            .is_none());
    }
}
