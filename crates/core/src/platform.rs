//! Publishing platform detection.
//!
//! A [`PlatformRule`] pairs a URL pattern with the CSS selector that locates
//! the article body on that site. [`PlatformMatcher`] walks an ordered list of
//! rules and returns the first whose pattern matches the URL.
//!
//! # Example
//!
//! ```rust
//! use articast_core::match_platform;
//!
//! let rule = match_platform("https://mp.weixin.qq.com/s/abc").unwrap();
//! assert_eq!(rule.name(), "WeChat public account");
//! assert_eq!(rule.body_selector(), "#js_content");
//!
//! assert!(match_platform("https://example.com/post").is_none());
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::{ArticastError, Result};

/// Built-in (name, URL pattern, body selector) table, in match order.
const BUILTIN_RULES: &[(&str, &str, &str)] = &[
    ("WeChat public account", r"mp\.weixin\.qq\.com/", "#js_content"),
    (
        "Zhihu column",
        r"zhuanlan\.zhihu\.com/",
        ".Post-RichTextContainer, .RichText ztext",
    ),
    (
        "Baidu Baijiahao",
        r"baijiahao\.baidu\.com/",
        ".article-content, .article-title, .index-module_articleContent_2jMn7",
    ),
    ("CSDN blog", r"csdn\.net/", "#article_content, .blog-content-box"),
    ("Jianshu", r"jianshu\.com/", ".article, .show-content"),
    ("Toutiao", r"toutiao\.com/", ".article-content, .article-title"),
    ("Sina News", r"sina\.com\.cn/", "#artibody, .article"),
    ("NetEase News", r"163\.com/", ".post_body, #endText"),
];

static DEFAULT_MATCHER: LazyLock<PlatformMatcher> = LazyLock::new(PlatformMatcher::new);

/// How to recognize one publishing site and where its article body lives.
#[derive(Debug, Clone)]
pub struct PlatformRule {
    name: String,
    url_pattern: Regex,
    body_selector: String,
}

impl PlatformRule {
    /// Creates a rule, compiling `pattern` as an unanchored regular expression.
    ///
    /// # Errors
    ///
    /// Returns [`ArticastError::InvalidPattern`] if `pattern` does not compile.
    pub fn new(name: impl Into<String>, pattern: &str, body_selector: impl Into<String>) -> Result<Self> {
        let url_pattern = Regex::new(pattern).map_err(|e| ArticastError::InvalidPattern(e.to_string()))?;

        Ok(Self { name: name.into(), url_pattern, body_selector: body_selector.into() })
    }

    /// Human-readable platform name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// CSS selector for the article body.
    pub fn body_selector(&self) -> &str {
        &self.body_selector
    }

    /// The URL pattern source.
    pub fn pattern(&self) -> &str {
        self.url_pattern.as_str()
    }

    /// Returns true if the pattern matches anywhere in `url`.
    pub fn matches(&self, url: &str) -> bool {
        self.url_pattern.is_match(url)
    }
}

/// Ordered list of platform rules; the first match wins.
///
/// The matcher performs no URL validation. Callers reject malformed URLs
/// before asking which platform they belong to.
#[derive(Debug, Clone)]
pub struct PlatformMatcher {
    rules: Vec<PlatformRule>,
}

impl PlatformMatcher {
    /// Creates a matcher over the built-in platform table.
    pub fn new() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|(name, pattern, selector)| {
                PlatformRule::new(*name, pattern, *selector).expect("built-in platform patterns are valid")
            })
            .collect();

        Self { rules }
    }

    /// Creates a matcher over a caller-supplied rule list.
    pub fn with_rules(rules: Vec<PlatformRule>) -> Self {
        Self { rules }
    }

    /// Finds the first rule whose pattern matches `url`.
    pub fn match_url(&self, url: &str) -> Option<&PlatformRule> {
        self.rules.iter().find(|rule| rule.matches(url))
    }

    /// All rules, in match order.
    pub fn rules(&self) -> &[PlatformRule] {
        &self.rules
    }
}

impl Default for PlatformMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Matches `url` against the built-in platform table.
pub fn match_platform(url: &str) -> Option<&'static PlatformRule> {
    DEFAULT_MATCHER.match_url(url)
}

/// The built-in platform table, in match order.
pub fn supported_platforms() -> &'static [PlatformRule] {
    DEFAULT_MATCHER.rules()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://mp.weixin.qq.com/s/abc", "WeChat public account", "#js_content")]
    #[case("https://zhuanlan.zhihu.com/p/123456", "Zhihu column", ".Post-RichTextContainer, .RichText ztext")]
    #[case(
        "https://baijiahao.baidu.com/s?id=1700000000",
        "Baidu Baijiahao",
        ".article-content, .article-title, .index-module_articleContent_2jMn7"
    )]
    #[case("https://blog.csdn.net/user/article/details/1", "CSDN blog", "#article_content, .blog-content-box")]
    #[case("https://www.jianshu.com/p/abcdef", "Jianshu", ".article, .show-content")]
    #[case("https://www.toutiao.com/article/7000/", "Toutiao", ".article-content, .article-title")]
    #[case("https://news.sina.com.cn/c/2024-01-01/doc.shtml", "Sina News", "#artibody, .article")]
    #[case("https://www.163.com/news/article/ABC.html", "NetEase News", ".post_body, #endText")]
    fn test_builtin_rules_match(#[case] url: &str, #[case] name: &str, #[case] selector: &str) {
        let rule = match_platform(url).unwrap();
        assert_eq!(rule.name(), name);
        assert_eq!(rule.body_selector(), selector);

        let others = supported_platforms().iter().filter(|r| r.matches(url)).count();
        assert_eq!(others, 1, "{url} should match exactly one platform");
    }

    #[rstest]
    #[case("https://example.com/post/1")]
    #[case("https://medium.com/@someone/story")]
    #[case("https://weixin.qq.com/")]
    #[case("https://zhihu.com/question/1")]
    #[case("")]
    fn test_unknown_urls_do_not_match(#[case] url: &str) {
        assert!(match_platform(url).is_none());
    }

    #[test]
    fn test_pattern_matches_anywhere_in_url() {
        let rule = match_platform("http://127.0.0.1:8080/mp.weixin.qq.com/s/abc").unwrap();
        assert_eq!(rule.name(), "WeChat public account");
    }

    #[test]
    fn test_first_match_wins() {
        let matcher = PlatformMatcher::with_rules(vec![
            PlatformRule::new("first", r"example\.com/", "#a").unwrap(),
            PlatformRule::new("second", r"example\.com/blog", "#b").unwrap(),
        ]);

        let rule = matcher.match_url("https://example.com/blog/1").unwrap();
        assert_eq!(rule.name(), "first");
    }

    #[test]
    fn test_invalid_pattern() {
        let result = PlatformRule::new("broken", r"(unclosed", "p");
        assert!(matches!(result, Err(ArticastError::InvalidPattern(_))));
    }

    #[test]
    fn test_supported_platforms_order() {
        let names: Vec<&str> = supported_platforms().iter().map(PlatformRule::name).collect();
        assert_eq!(names.first(), Some(&"WeChat public account"));
        assert_eq!(names.len(), BUILTIN_RULES.len());
    }
}
