//! Robots.txt rule matching
//!
//! Thin wrapper around the robotstxt crate's matcher with an explicit
//! allow-all mode for the permissive fallback.

use robotstxt::DefaultMatcher;

/// Parsed robots.txt rules for one domain
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    /// Raw robots.txt content (empty means allow all)
    content: String,
    /// Explicit allow-all mode, used when robots.txt is unavailable
    allow_all: bool,
}

impl RobotsPolicy {
    /// Creates a policy from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Creates a permissive policy that allows everything
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Checks if a URL is allowed for the given user agent
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.allow_all || self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_all() {
        let robots = RobotsPolicy::allow_all();
        assert!(robots.is_allowed("https://example.com/any/path", "*"));
        assert!(robots.is_allowed("https://example.com/admin", "*"));
    }

    #[test]
    fn test_disallow_all() {
        let robots = RobotsPolicy::from_content("User-agent: *\nDisallow: /");
        assert!(!robots.is_allowed("https://example.com/", "*"));
        assert!(!robots.is_allowed("https://example.com/page", "*"));
    }

    #[test]
    fn test_disallow_specific_path() {
        let robots = RobotsPolicy::from_content("User-agent: *\nDisallow: /private");
        assert!(robots.is_allowed("https://example.com/", "*"));
        assert!(robots.is_allowed("https://example.com/public", "*"));
        assert!(!robots.is_allowed("https://example.com/private", "*"));
        assert!(!robots.is_allowed("https://example.com/private/users", "*"));
    }

    #[test]
    fn test_allow_overrides_disallow() {
        let robots =
            RobotsPolicy::from_content("User-agent: *\nDisallow: /private\nAllow: /private/public");
        assert!(!robots.is_allowed("https://example.com/private", "*"));
        assert!(robots.is_allowed("https://example.com/private/public", "*"));
    }

    #[test]
    fn test_garbage_content_allows() {
        let robots = RobotsPolicy::from_content("This is not valid robots.txt {{{");
        assert!(robots.is_allowed("https://example.com/any", "*"));
    }

    #[test]
    fn test_empty_content_allows() {
        let robots = RobotsPolicy::from_content("");
        assert!(robots.is_allowed("https://example.com/any", "*"));
    }
}
