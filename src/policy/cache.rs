//! Content-type driven cache policy.
//!
//! The table is an ordered list of substring rules. Matching is a plain
//! case-sensitive `contains` check and the first matching rule wins, so
//! `image/svg+xml` is cached as an image rather than as XML.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

/// Cache-Control directive emitted for a content category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheDirective {
    /// One day, never revalidated.
    ImmutableLong,
    /// Five minutes.
    Short,
    /// Ten minutes.
    Medium,
    NoCache,
}

impl CacheDirective {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheDirective::ImmutableLong => "public, max-age=86400, immutable",
            CacheDirective::Short => "public, max-age=300",
            CacheDirective::Medium => "public, max-age=600",
            CacheDirective::NoCache => "no-cache",
        }
    }

    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from_static(self.as_str())
    }
}

/// A single row of the policy table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheRule {
    /// Substrings; the rule matches if any of them occurs in the content type.
    pub contains: Vec<String>,
    pub directive: CacheDirective,
}

impl CacheRule {
    pub fn new<I, S>(contains: I, directive: CacheDirective) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            contains: contains.into_iter().map(Into::into).collect(),
            directive,
        }
    }

    /// Media before JSON before the XML family.
    pub fn defaults() -> Vec<CacheRule> {
        vec![
            CacheRule::new(["image", "video"], CacheDirective::ImmutableLong),
            CacheRule::new(["application/json"], CacheDirective::Short),
            CacheRule::new(
                ["text/xml", "application/xml", "text/vtt"],
                CacheDirective::Medium,
            ),
        ]
    }

    pub fn matches(&self, content_type: &str) -> bool {
        self.contains
            .iter()
            .any(|needle| content_type.contains(needle.as_str()))
    }
}

/// Immutable, ordered cache policy table.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    rules: Vec<CacheRule>,
}

impl CachePolicy {
    pub fn new(rules: Vec<CacheRule>) -> Self {
        Self { rules }
    }

    /// Directive for a resolved content type; [`CacheDirective::NoCache`] if no rule matches.
    pub fn select(&self, content_type: &str) -> CacheDirective {
        self.rules
            .iter()
            .find(|rule| rule.matches(content_type))
            .map(|rule| rule.directive)
            .unwrap_or(CacheDirective::NoCache)
    }

    pub fn rules(&self) -> &[CacheRule] {
        &self.rules
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::new(CacheRule::defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let policy = CachePolicy::default();
        assert_eq!(policy.select("image/png"), CacheDirective::ImmutableLong);
        assert_eq!(policy.select("video/mp4"), CacheDirective::ImmutableLong);
        assert_eq!(policy.select("application/json"), CacheDirective::Short);
        assert_eq!(
            policy.select("application/json; charset=utf-8"),
            CacheDirective::Short
        );
        assert_eq!(policy.select("text/xml"), CacheDirective::Medium);
        assert_eq!(policy.select("application/xml"), CacheDirective::Medium);
        assert_eq!(policy.select("text/vtt"), CacheDirective::Medium);
        assert_eq!(policy.select("text/plain"), CacheDirective::NoCache);
        assert_eq!(
            policy.select("application/octet-stream"),
            CacheDirective::NoCache
        );
    }

    #[test]
    fn test_first_match_wins() {
        let policy = CachePolicy::default();
        // Would also match the XML rule.
        assert_eq!(policy.select("image/svg+xml"), CacheDirective::ImmutableLong);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let policy = CachePolicy::default();
        assert_eq!(policy.select("Image/PNG"), CacheDirective::NoCache);
        assert_eq!(policy.select("APPLICATION/JSON"), CacheDirective::NoCache);
    }

    #[test]
    fn test_custom_table() {
        let policy = CachePolicy::new(vec![
            CacheRule::new(["text/csv"], CacheDirective::Medium),
            CacheRule::new(["text"], CacheDirective::Short),
        ]);
        assert_eq!(policy.select("text/csv"), CacheDirective::Medium);
        assert_eq!(policy.select("text/html"), CacheDirective::Short);
        assert_eq!(policy.select("image/png"), CacheDirective::NoCache);
    }

    #[test]
    fn test_empty_table_never_caches() {
        let policy = CachePolicy::new(Vec::new());
        assert_eq!(policy.select("image/png"), CacheDirective::NoCache);
    }

    #[test]
    fn test_header_values() {
        assert_eq!(
            CacheDirective::ImmutableLong.header_value(),
            "public, max-age=86400, immutable"
        );
        assert_eq!(CacheDirective::Short.header_value(), "public, max-age=300");
        assert_eq!(CacheDirective::Medium.header_value(), "public, max-age=600");
        assert_eq!(CacheDirective::NoCache.header_value(), "no-cache");
    }
}
