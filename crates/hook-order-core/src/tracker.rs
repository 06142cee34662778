//! Scope-aware hook order validation.
//!
//! Every function body (and the program itself) is an independent ordering
//! scope. Within a scope the ranks of hook calls must never drop below the
//! highest rank seen so far; each drop yields one [`Violation`].

use serde::{Deserialize, Serialize};
use tracing::debug;
use tree_sitter::Node;

use crate::alias::AliasTable;
use crate::error::LintError;
use crate::recognizer::HookRecognizer;
use crate::syntax::{self, SourceLanguage, SourceTree, parse_source};
use crate::types::{HookKind, Position, Reorder, Violation};

/// What a non-hook call does to the ordering of its scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderPolicy {
    /// Only function-literal boundaries separate hooks; other calls are transparent.
    #[default]
    Lexical,
    /// Any non-hook call in the scope's own statements resets the high-water
    /// mark, so hooks separated by a test or a grouping call are unrelated.
    ResetOnCall,
}

impl OrderPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::ResetOnCall => "reset-on-call",
        }
    }
}

impl std::fmt::Display for OrderPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lexical" => Ok(Self::Lexical),
            "reset-on-call" => Ok(Self::ResetOnCall),
            other => Err(format!(
                "Invalid policy '{}'. Valid values: lexical, reset-on-call",
                other
            )),
        }
    }
}

/// Inputs to a single check run. Immutable for the duration of the run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub aliases: AliasTable,
    pub policy: OrderPolicy,
}

/// Parse `source` and check it.
pub fn check_source(
    source: &str,
    language: SourceLanguage,
    options: &CheckOptions,
) -> Result<Vec<Violation>, LintError> {
    let tree = parse_source(source, language)?;
    Ok(check_tree(&tree, options))
}

/// Check an already parsed tree. Violations come back in traversal order.
pub fn check_tree(tree: &SourceTree<'_>, options: &CheckOptions) -> Vec<Violation> {
    if tree.has_syntax_errors() {
        debug!(language = %tree.language(), "source has syntax errors, checking recovered tree");
    }
    let mut tracker = ScopeOrderTracker::new(tree, options);
    tracker.run();
    debug!(
        language = %tree.language(),
        scopes = tracker.scopes_opened,
        hooks = tracker.hooks_seen,
        violations = tracker.violations.len(),
        "hook order check finished"
    );
    tracker.violations
}

/// Where a hook statement sits, when it can be moved as whole lines.
#[derive(Clone, Debug)]
struct StatementSlot {
    /// Id of the node holding the statement list.
    list: usize,
    lines: std::ops::Range<usize>,
}

#[derive(Debug)]
struct PlacedHook {
    kind: HookKind,
    slot: Option<StatementSlot>,
}

#[derive(Debug)]
struct Scope {
    high_water: Option<HookKind>,
    hooks: Vec<PlacedHook>,
    /// Nesting depth of hook calls currently being visited in this scope.
    hook_depth: usize,
    opened_at: Position,
}

impl Scope {
    fn new(opened_at: Position) -> Self {
        Self {
            high_water: None,
            hooks: Vec::new(),
            hook_depth: 0,
            opened_at,
        }
    }

    /// Line start of the first hook that outranks `kind`, if the offender
    /// can be moved in front of it.
    fn reorder_for(&self, kind: HookKind, slot: Option<&StatementSlot>) -> Option<Reorder> {
        let slot = slot?;
        let anchor = self
            .hooks
            .iter()
            .find(|placed| placed.kind.rank() > kind.rank())?
            .slot
            .as_ref()?;
        if anchor.list != slot.list {
            return None;
        }
        Some(Reorder {
            remove: slot.lines.clone(),
            insert_at: anchor.lines.start,
        })
    }
}

struct ScopeOrderTracker<'a, 'src> {
    tree: &'a SourceTree<'src>,
    recognizer: HookRecognizer<'a>,
    policy: OrderPolicy,
    scopes: Vec<Scope>,
    violations: Vec<Violation>,
    scopes_opened: usize,
    hooks_seen: usize,
}

impl<'a, 'src> ScopeOrderTracker<'a, 'src> {
    fn new(tree: &'a SourceTree<'src>, options: &'a CheckOptions) -> Self {
        Self {
            tree,
            recognizer: HookRecognizer::new(&options.aliases),
            policy: options.policy,
            scopes: Vec::new(),
            violations: Vec::new(),
            scopes_opened: 0,
            hooks_seen: 0,
        }
    }

    fn run(&mut self) {
        let root = self.tree.root();
        self.push_scope(root);
        self.visit_children(root);
        self.scopes.pop();
    }

    fn push_scope(&mut self, node: Node<'a>) {
        self.scopes_opened += 1;
        self.scopes.push(Scope::new(self.tree.position_of(node)));
    }

    fn current(&mut self) -> &mut Scope {
        // The program scope lives for the whole run.
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    fn visit(&mut self, node: Node<'a>) {
        let kind = node.kind();
        if syntax::is_function_boundary(kind) {
            self.push_scope(node);
            self.visit_children(node);
            self.scopes.pop();
            return;
        }

        if kind == "call_expression" {
            if let Some(hook) = self.recognizer.classify_call(node, self.tree) {
                self.observe(hook, node);
                self.current().hook_depth += 1;
                self.visit_children(node);
                self.current().hook_depth -= 1;
            } else {
                self.barrier();
                self.visit_children(node);
                self.barrier();
            }
            return;
        }

        self.visit_children(node);
    }

    fn visit_children(&mut self, node: Node<'a>) {
        for child in syntax::children(node) {
            self.visit(child);
        }
    }

    fn observe(&mut self, hook: HookKind, call: Node<'a>) {
        self.hooks_seen += 1;
        let position = self.tree.position_of(call);
        let slot = statement_slot(call, self.tree.source());
        let scope = self.current();
        let high_water = scope.high_water;

        match high_water {
            Some(previous) if hook.rank() < previous.rank() => {
                let reorder = scope.reorder_for(hook, slot.as_ref());
                debug!(
                    %position,
                    current = %hook,
                    %previous,
                    scope = %scope.opened_at,
                    "hook out of order"
                );
                scope.hooks.push(PlacedHook { kind: hook, slot });
                self.violations.push(Violation {
                    current: hook,
                    previous,
                    position,
                    reorder,
                });
            }
            _ => {
                scope.high_water = Some(hook);
                scope.hooks.push(PlacedHook { kind: hook, slot });
            }
        }
    }

    /// Under `ResetOnCall`, forget the scope's hooks on both entry to and exit
    /// from a non-hook call, so hooks before and after sibling calls such as
    /// `test.describe(...)` never chain.
    fn barrier(&mut self) {
        if self.policy != OrderPolicy::ResetOnCall {
            return;
        }
        let scope = self.current();
        if scope.hook_depth > 0 {
            return;
        }
        scope.high_water = None;
        scope.hooks.clear();
    }
}

/// Whole-line span of the statement wrapping `call`, when the call is a
/// standalone statement directly inside a function body or the program.
fn statement_slot(call: Node<'_>, source: &str) -> Option<StatementSlot> {
    let statement = call.parent()?;
    if statement.kind() != "expression_statement" {
        return None;
    }
    let list = statement.parent()?;
    let in_body = match list.kind() {
        "program" => true,
        "statement_block" => list
            .parent()
            .is_some_and(|owner| syntax::is_function_boundary(owner.kind())),
        _ => false,
    };
    if !in_body {
        return None;
    }
    let lines = full_lines(source, statement.start_byte(), statement.end_byte())?;
    Some(StatementSlot {
        list: list.id(),
        lines,
    })
}

/// Extend `start..end` to whole lines, trailing newline included. Returns
/// `None` if other code shares a line with the range.
fn full_lines(source: &str, start: usize, end: usize) -> Option<std::ops::Range<usize>> {
    let line_start = source.get(..start)?.rfind('\n').map_or(0, |i| i + 1);
    if !source.get(line_start..start)?.chars().all(|c| c == ' ' || c == '\t') {
        return None;
    }
    let rest = source.get(end..)?;
    let trailing = rest.len() - rest.trim_start_matches([' ', '\t', '\r']).len();
    let after = &rest[trailing..];
    let line_end = if after.is_empty() {
        source.len()
    } else if after.starts_with('\n') {
        end + trailing + 1
    } else {
        return None;
    };
    Some(line_start..line_end)
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
