//! Path pattern parsing and matching (`SPEC_FULL.md` §4.9/spec §4.9: "a
//! route is a (path pattern, render root, optional destroy hook) triple
//! ... dynamic path segments bind to named parameters"). Trailing slashes
//! are insignificant on both sides.

use rustc_hash::FxHashMap;

pub type RouteParams = FxHashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed route path, e.g. `/:id/test` -> `[Param("id"), Literal("test")]`.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = split_segments(pattern)
            .into_iter()
            .map(|raw| match raw.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(raw.to_string()),
            })
            .collect();
        Self { raw: pattern.to_string(), segments }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Count of literal (non-parameter) segments. Used to prefer a more
    /// specific match (`/users/new` over `/users/:id`) when both match.
    pub fn specificity(&self) -> usize {
        self.segments.iter().filter(|s| matches!(s, Segment::Literal(_))).count()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Match `path` against this pattern, returning bound parameters on
    /// success. Trailing slashes are stripped from both sides first.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let path_segments = split_segments(path);
        if path_segments.len() != self.segments.len() {
            return None;
        }
        let mut params = RouteParams::default();
        for (pattern_segment, actual) in self.segments.iter().zip(path_segments.iter()) {
            match pattern_segment {
                Segment::Literal(expected) => {
                    if expected != actual {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), (*actual).to_string());
                }
            }
        }
        Some(params)
    }

    /// True if `path`'s segments start with this pattern's segments,
    /// treating every one of this pattern's segments as literal (layout
    /// prefixes don't carry parameters, spec §4.9's "path prefix").
    pub fn is_prefix_of(prefix: &str, path: &str) -> bool {
        let prefix_segments = split_segments(prefix);
        let path_segments = split_segments(path);
        if prefix_segments.len() > path_segments.len() {
            return false;
        }
        prefix_segments.iter().zip(path_segments.iter()).all(|(a, b)| a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_pattern_matches_with_or_without_trailing_slash() {
        let pattern = PathPattern::parse("/test");
        assert_eq!(pattern.matches("/test"), Some(RouteParams::default()));
        assert_eq!(pattern.matches("/test/"), Some(RouteParams::default()));
    }

    #[test]
    fn dynamic_segment_binds_named_parameter() {
        let pattern = PathPattern::parse("/:id/test");
        let params = pattern.matches("/123/test").unwrap();
        assert_eq!(params.get("id"), Some(&"123".to_string()));
    }

    #[test]
    fn root_pattern_matches_only_root() {
        let pattern = PathPattern::parse("/");
        assert_eq!(pattern.matches("/"), Some(RouteParams::default()));
        assert_eq!(pattern.matches("/x"), None);
    }

    #[test]
    fn mismatched_segment_count_does_not_match() {
        let pattern = PathPattern::parse("/a/b");
        assert_eq!(pattern.matches("/a"), None);
    }

    #[test]
    fn specificity_counts_literal_segments_only() {
        assert_eq!(PathPattern::parse("/users/:id").specificity(), 1);
        assert_eq!(PathPattern::parse("/users/new").specificity(), 2);
    }

    #[test]
    fn prefix_matching_ignores_trailing_slash() {
        assert!(PathPattern::is_prefix_of("/admin", "/admin/users/5"));
        assert!(!PathPattern::is_prefix_of("/admin", "/adminx"));
    }
}
