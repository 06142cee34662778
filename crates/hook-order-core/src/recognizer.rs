//! Classifies call expressions as lifecycle hook invocations.

use tree_sitter::Node;

use crate::alias::AliasTable;
use crate::syntax::SourceTree;
use crate::types::HookKind;

/// Decides whether a call is `<root>.<hook>(...)` for an accepted root.
#[derive(Clone, Copy, Debug)]
pub struct HookRecognizer<'a> {
    aliases: &'a AliasTable,
}

impl<'a> HookRecognizer<'a> {
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self { aliases }
    }

    /// Classify a callee given as plain identifier text.
    pub fn classify(&self, root: &str, member: &str) -> Option<HookKind> {
        if !self.aliases.accepts_root(root) {
            return None;
        }
        HookKind::from_member(member)
    }

    /// Classify a tree-sitter `call_expression` node.
    ///
    /// Only a bare identifier root and a plain property name qualify:
    /// computed access (`test["beforeAll"]`) and longer chains
    /// (`test.describe.beforeAll`) are not hooks.
    pub fn classify_call(&self, call: Node<'_>, tree: &SourceTree<'_>) -> Option<HookKind> {
        if call.kind() != "call_expression" {
            return None;
        }
        let callee = call.child_by_field_name("function")?;
        if callee.kind() != "member_expression" {
            return None;
        }
        let object = callee.child_by_field_name("object")?;
        let property = callee.child_by_field_name("property")?;
        if object.kind() != "identifier" || property.kind() != "property_identifier" {
            return None;
        }
        self.classify(tree.text(object)?, tree.text(property)?)
    }
}

#[cfg(test)]
#[path = "recognizer_tests.rs"]
mod tests;
