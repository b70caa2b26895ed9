//! Crawl policy: robots.txt compliance and sitemap seeding
//!
//! The policy gate is loaded once per crawl. Robots failures degrade to a
//! permissive gate (logged as a warning, not an error); sitemap failures
//! fall back to seeding from the domain root. Neither can abort a run.

mod robots;
mod sitemap;

pub use robots::RobotsPolicy;

use reqwest::Client;
use std::time::Duration;

/// Timeout for the robots.txt and sitemap.xml fetches
const POLICY_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Robots-based allow/deny gate for one domain
pub struct PolicyGate {
    robots: RobotsPolicy,
}

impl PolicyGate {
    /// Fetches and parses `{origin}/robots.txt`
    ///
    /// Any fetch or parse failure produces a permissive gate that allows
    /// every URL; the degradation is logged as a warning. `origin` is the
    /// scheme+host prefix, `https://{domain}` in production.
    pub async fn load(client: &Client, origin: &str) -> Self {
        let robots_url = format!("{}/robots.txt", origin);

        let body = match client
            .get(&robots_url)
            .timeout(POLICY_FETCH_TIMEOUT)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response.text().await.ok(),
            _ => None,
        };

        match body {
            Some(content) => {
                tracing::info!("robots.txt loaded from {}", robots_url);
                Self {
                    robots: RobotsPolicy::from_content(&content),
                }
            }
            None => {
                tracing::warn!("no valid robots.txt at {}, crawling all URLs", robots_url);
                Self::permissive()
            }
        }
    }

    /// A gate that allows everything
    pub fn permissive() -> Self {
        Self {
            robots: RobotsPolicy::allow_all(),
        }
    }

    /// A gate built from raw robots.txt rules (used by tests)
    pub fn from_rules(content: &str) -> Self {
        Self {
            robots: RobotsPolicy::from_content(content),
        }
    }

    /// Checks whether the wildcard agent may fetch `url`
    ///
    /// Always true when the gate is permissive.
    pub fn can_fetch(&self, url: &str) -> bool {
        self.robots.is_allowed(url, "*")
    }

    /// Builds the initial frontier for a crawl
    ///
    /// Attempts `{origin}/sitemap.xml`; on HTTP 200 every `<loc>` entry is
    /// collected in document order and, when non-empty, becomes the entire
    /// seed set. Otherwise the single seed is the domain root.
    pub async fn initial_frontier(client: &Client, origin: &str) -> Vec<String> {
        let seeds = sitemap::seed_urls(client, origin, POLICY_FETCH_TIMEOUT).await;
        if !seeds.is_empty() {
            tracing::info!("seeded {} URLs from sitemap.xml", seeds.len());
            return seeds;
        }

        let root = format!("{}/", origin);
        tracing::info!("no sitemap seeds, falling back to root {}", root);
        vec![root]
    }
}
