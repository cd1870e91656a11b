//! Robots.txt parsing via the robotstxt crate

use robotstxt::DefaultMatcher;

/// Parsed robots.txt rules for one origin
///
/// Thin wrapper over the robotstxt crate: the raw content is kept and matched
/// on demand, with an explicit allow-all variant for the fail-open default.
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content (empty means no restrictions)
    content: String,
    /// When true, every check passes without consulting the content
    allow_all: bool,
}

impl ParsedRobots {
    /// Creates parsed rules from raw robots.txt content.
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Creates permissive rules that allow everything.
    ///
    /// Used when an origin has no usable robots.txt.
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Checks whether the given user-agent may fetch the given URL.
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
        let robots = ParsedRobots::allow_all();
        assert!(robots.is_allowed("https://a.test/any/path", "TestBot"));
        assert!(robots.is_allowed("https://a.test/admin", "TestBot"));
    }

    #[test]
    fn test_empty_content_allows() {
        let robots = ParsedRobots::from_content("");
        assert!(robots.is_allowed("https://a.test/any", "TestBot"));
    }

    #[test]
    fn test_disallow_all() {
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /");
        assert!(!robots.is_allowed("https://a.test/", "TestBot"));
        assert!(!robots.is_allowed("https://a.test/page", "TestBot"));
    }

    #[test]
    fn test_disallow_prefix() {
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /admin");
        assert!(robots.is_allowed("https://a.test/", "TestBot"));
        assert!(robots.is_allowed("https://a.test/page", "TestBot"));
        assert!(!robots.is_allowed("https://a.test/admin", "TestBot"));
        assert!(!robots.is_allowed("https://a.test/admin/users", "TestBot"));
    }

    #[test]
    fn test_allow_overrides_disallow() {
        let robots = ParsedRobots::from_content(
            "User-agent: *\nDisallow: /private\nAllow: /private/public",
        );
        assert!(!robots.is_allowed("https://a.test/private", "TestBot"));
        assert!(robots.is_allowed("https://a.test/private/public", "TestBot"));
    }

    #[test]
    fn test_specific_user_agent() {
        let robots = ParsedRobots::from_content(
            "User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nAllow: /",
        );
        assert!(robots.is_allowed("https://a.test/page", "GoodBot"));
        assert!(!robots.is_allowed("https://a.test/page", "BadBot"));
    }

    #[test]
    fn test_garbage_content_allows() {
        let robots = ParsedRobots::from_content("This is not valid robots.txt {{{");
        assert!(robots.is_allowed("https://a.test/any", "TestBot"));
    }
}
