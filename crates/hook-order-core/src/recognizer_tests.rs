use tree_sitter::Node;

use crate::syntax::{SourceLanguage, parse_source};

use super::*;

fn first_call<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.kind() == "call_expression" {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_call)
}

fn classify_source(source: &str, aliases: &AliasTable) -> Option<HookKind> {
    let tree = parse_source(source, SourceLanguage::TypeScript).unwrap();
    let call = first_call(tree.root()).expect("source contains a call");
    HookRecognizer::new(aliases).classify_call(call, &tree)
}

// -- Identifier-level classification ----------------------------------------

#[test]
fn test_classifies_all_four_hooks_on_canonical_root() {
    let aliases = AliasTable::new();
    let recognizer = HookRecognizer::new(&aliases);
    for kind in HookKind::ALL {
        assert_eq!(recognizer.classify("test", kind.as_str()), Some(kind));
    }
}

#[test]
fn test_rejects_non_hook_members() {
    let aliases = AliasTable::new();
    let recognizer = HookRecognizer::new(&aliases);
    assert_eq!(recognizer.classify("test", "describe"), None);
    assert_eq!(recognizer.classify("test", "only"), None);
    assert_eq!(recognizer.classify("test", "beforeall"), None);
    assert_eq!(recognizer.classify("test", "BeforeAll"), None);
}

#[test]
fn test_unknown_root_is_not_a_hook_without_alias() {
    let aliases = AliasTable::new();
    let recognizer = HookRecognizer::new(&aliases);
    assert_eq!(recognizer.classify("it", "beforeAll"), None);
    assert_eq!(recognizer.classify("describe", "afterEach"), None);
}

#[test]
fn test_alias_root_is_equivalent_to_canonical() {
    let aliases = AliasTable::with_aliases("test", ["it"]);
    let recognizer = HookRecognizer::new(&aliases);
    for kind in HookKind::ALL {
        assert_eq!(
            recognizer.classify("it", kind.as_str()),
            recognizer.classify("test", kind.as_str())
        );
    }
}

#[test]
fn test_alias_never_renames_hook_members() {
    let aliases = AliasTable::with_aliases("test", ["it"]);
    let recognizer = HookRecognizer::new(&aliases);
    assert_eq!(recognizer.classify("test", "it"), None);
}

// -- Call-node classification -----------------------------------------------

#[test]
fn test_classify_call_member_shape() {
    let aliases = AliasTable::new();
    assert_eq!(
        classify_source("test.afterEach(() => {});", &aliases),
        Some(HookKind::AfterEach)
    );
}

#[test]
fn test_classify_call_rejects_plain_and_grouping_calls() {
    let aliases = AliasTable::new();
    assert_eq!(classify_source("test('works', () => {});", &aliases), None);
    assert_eq!(classify_source("test.describe('g', () => {});", &aliases), None);
    assert_eq!(classify_source("beforeAll(() => {});", &aliases), None);
}

#[test]
fn test_classify_call_rejects_computed_and_chained_access() {
    let aliases = AliasTable::new();
    assert_eq!(classify_source("test['beforeAll'](() => {});", &aliases), None);
    assert_eq!(
        classify_source("test.describe.beforeAll(() => {});", &aliases),
        None
    );
    assert_eq!(classify_source("this.test.beforeAll(() => {});", &aliases), None);
}

#[test]
fn test_classify_call_honours_aliases() {
    let empty = AliasTable::new();
    let with_it = AliasTable::with_aliases("test", ["it"]);
    assert_eq!(classify_source("it.beforeAll(() => {});", &empty), None);
    assert_eq!(
        classify_source("it.beforeAll(() => {});", &with_it),
        Some(HookKind::BeforeAll)
    );
}
