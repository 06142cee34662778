//! Adapter onto the tree-sitter JavaScript / TypeScript grammars.
//!
//! Parse errors are not surfaced as failures: tree-sitter keeps `ERROR`
//! nodes in the tree and the walkers treat them like any other node.

use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use crate::error::LintError;
use crate::types::Position;

/// Grammar used to parse a test file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
}

impl SourceLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::Jsx => "jsx",
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
        }
    }

    /// Maps a file extension (without the dot) to a grammar.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            "jsx" => Some(Self::Jsx),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, LintError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        Self::from_extension(ext).ok_or_else(|| LintError::UnsupportedExtension(ext.to_string()))
    }

    fn grammar(&self) -> tree_sitter::Language {
        match self {
            // The JavaScript grammar parses JSX natively.
            Self::JavaScript | Self::Jsx => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed source file together with the text it was parsed from.
pub struct SourceTree<'src> {
    source: &'src str,
    tree: Tree,
    language: SourceLanguage,
}

/// Parse `source` with the grammar for `language`.
pub fn parse_source(source: &str, language: SourceLanguage) -> Result<SourceTree<'_>, LintError> {
    let mut parser = Parser::new();
    parser
        .set_language(&language.grammar())
        .map_err(|e| LintError::GrammarLoad {
            language: language.as_str(),
            message: e.to_string(),
        })?;
    let tree = parser.parse(source, None).ok_or(LintError::NoTree {
        language: language.as_str(),
    })?;
    Ok(SourceTree {
        source,
        tree,
        language,
    })
}

impl<'src> SourceTree<'src> {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn language(&self) -> SourceLanguage {
        self.language
    }

    pub fn has_syntax_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Identifier text of a node, if it is valid UTF-8.
    pub fn text(&self, node: Node<'_>) -> Option<&'src str> {
        self.source.get(node.start_byte()..node.end_byte())
    }

    /// 1-based line and character column of the node start.
    pub fn position_of(&self, node: Node<'_>) -> Position {
        let point = node.start_position();
        let byte = node.start_byte();
        let line_start = byte.saturating_sub(point.column);
        let column = self
            .source
            .get(line_start..byte)
            .map_or(point.column, |prefix| prefix.chars().count());
        Position {
            line: point.row + 1,
            column: column + 1,
        }
    }
}

/// Children of `node` in source order.
pub(crate) fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Node kinds that open a new function body (and therefore a new ordering scope).
pub(crate) fn is_function_boundary(kind: &str) -> bool {
    matches!(
        kind,
        "arrow_function"
            | "function"
            | "function_expression"
            | "function_declaration"
            | "generator_function"
            | "generator_function_declaration"
            | "method_definition"
            | "class_static_block"
    )
}
