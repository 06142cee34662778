use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Rule identifier used in reports.
pub const RULE_ID: &str = "prefer-hooks-in-order";

/// Lifecycle hook kinds in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookKind {
    BeforeAll,
    BeforeEach,
    AfterEach,
    AfterAll,
}

impl HookKind {
    /// All kinds, ordered by rank.
    pub const ALL: [HookKind; 4] = [
        Self::BeforeAll,
        Self::BeforeEach,
        Self::AfterEach,
        Self::AfterAll,
    ];

    /// Returns the member name used at call sites (`test.<name>(...)`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeforeAll => "beforeAll",
            Self::BeforeEach => "beforeEach",
            Self::AfterEach => "afterEach",
            Self::AfterAll => "afterAll",
        }
    }

    /// Fixed position in the canonical order.
    pub fn rank(&self) -> u8 {
        match self {
            Self::BeforeAll => 0,
            Self::BeforeEach => 1,
            Self::AfterEach => 2,
            Self::AfterAll => 3,
        }
    }

    /// Exact, case-sensitive lookup of a member name.
    pub fn from_member(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HookKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_member(s).ok_or_else(|| {
            format!(
                "Invalid hook '{}'. Valid values: beforeAll, beforeEach, afterEach, afterAll",
                s
            )
        })
    }
}

/// Source location of a node start. Line and column are both 1-based;
/// the column counts characters, not bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// How to move an out-of-order hook statement so it precedes the hook it
/// conflicts with. Offsets are byte offsets into the checked source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reorder {
    /// Whole-line span of the offending statement, trailing newline included.
    pub remove: Range<usize>,
    /// Line start of the first hook in the same scope that ranks higher.
    pub insert_at: usize,
}

impl Reorder {
    /// Smallest byte range covering both the removal and the insertion point.
    pub fn footprint(&self) -> Range<usize> {
        self.insert_at.min(self.remove.start)..self.insert_at.max(self.remove.end)
    }
}

/// A hook whose rank is lower than the highest rank already seen in its scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub current: HookKind,
    pub previous: HookKind,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder: Option<Reorder>,
}

impl Violation {
    /// User-facing diagnostic text.
    pub fn message(&self) -> String {
        format!(
            "`{}` hooks should be before any `{}` hooks",
            self.current, self.previous
        )
    }

    pub fn is_fixable(&self) -> bool {
        self.reorder.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_follow_canonical_order() {
        let ranks: Vec<u8> = HookKind::ALL.iter().map(HookKind::rank).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert!(HookKind::BeforeAll < HookKind::AfterAll);
    }

    #[test]
    fn test_from_member_is_case_sensitive() {
        assert_eq!(HookKind::from_member("afterEach"), Some(HookKind::AfterEach));
        assert_eq!(HookKind::from_member("AfterEach"), None);
        assert_eq!(HookKind::from_member("afterEach "), None);
        assert_eq!(HookKind::from_member("describe"), None);
    }

    #[test]
    fn test_from_str_reports_valid_values() {
        let err = "before".parse::<HookKind>().unwrap_err();
        assert!(err.contains("beforeAll, beforeEach, afterEach, afterAll"));
        assert_eq!("afterAll".parse::<HookKind>(), Ok(HookKind::AfterAll));
    }

    #[test]
    fn test_message_template() {
        let violation = Violation {
            current: HookKind::BeforeAll,
            previous: HookKind::AfterAll,
            position: Position { line: 2, column: 1 },
            reorder: None,
        };
        assert_eq!(
            violation.message(),
            "`beforeAll` hooks should be before any `afterAll` hooks"
        );
        assert!(!violation.is_fixable());
    }

    #[test]
    fn test_serde_uses_call_site_names() {
        let json = serde_json::to_string(&HookKind::BeforeEach).unwrap();
        assert_eq!(json, "\"beforeEach\"");
        let kind: HookKind = serde_json::from_str("\"afterAll\"").unwrap();
        assert_eq!(kind, HookKind::AfterAll);
    }

    #[test]
    fn test_reorder_footprint_spans_both_ends() {
        let forward = Reorder {
            remove: 40..60,
            insert_at: 10,
        };
        assert_eq!(forward.footprint(), 10..60);
        let backward = Reorder {
            remove: 5..20,
            insert_at: 30,
        };
        assert_eq!(backward.footprint(), 5..30);
    }
}
