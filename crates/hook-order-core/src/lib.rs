//! Lexical ordering check for test lifecycle hooks.
//!
//! Within every function body of a test file, hooks must appear in the order
//! `beforeAll → beforeEach → afterEach → afterAll`.

pub mod alias;
pub mod error;
pub mod fix;
pub mod recognizer;
pub mod syntax;
pub mod tracker;
pub mod types;

pub use alias::{AliasTable, CANONICAL_ROOT};
pub use error::LintError;
pub use fix::{FixOutcome, FixReport, apply_fixes, fix_source};
pub use recognizer::HookRecognizer;
pub use syntax::{SourceLanguage, SourceTree, parse_source};
pub use tracker::{CheckOptions, OrderPolicy, check_source, check_tree};
pub use types::{HookKind, Position, RULE_ID, Reorder, Violation};
