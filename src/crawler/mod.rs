//! Crawl orchestration: frontier, headless rendering, and the run loop

mod coordinator;
mod frontier;
mod renderer;

pub use coordinator::{Coordinator, CrawlOptions, CrawlReport};
pub use frontier::Frontier;
pub use renderer::{ChromeRenderer, PageRenderer, RenderedPage, NAVIGATION_TIMEOUT};

use crate::analyze::KeywordAnalyzer;
use crate::policy::PolicyGate;
use crate::storage::SqliteStore;
use crate::Result;
use std::path::Path;

/// User agent sent with robots.txt and sitemap.xml fetches
const USER_AGENT: &str = concat!("sitelens/", env!("CARGO_PKG_VERSION"));

/// Runs one full crawl of the configured domain
///
/// Loads policy, seeds the frontier, launches the browser, and drains the
/// frontier to budget or exhaustion. A browser that fails to launch is the
/// only startup error that aborts the run.
pub async fn crawl(options: CrawlOptions, db_path: &Path) -> Result<CrawlReport> {
    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

    let gate = PolicyGate::load(&client, &options.origin).await;
    let seeds = PolicyGate::initial_frontier(&client, &options.origin).await;

    let mut store = SqliteStore::new(db_path)?;
    let analyzer = KeywordAnalyzer::new();
    let renderer = ChromeRenderer::launch().await?;

    let mut coordinator = Coordinator::new(options, gate, &renderer, &mut store, &analyzer);
    coordinator.seed(seeds);
    let report = coordinator.run().await;

    renderer.close().await;
    report
}
