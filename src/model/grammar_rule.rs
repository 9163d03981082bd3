//! Grammar rules and their semantic actions — the output of Pass 5 (§4.6),
//! consumed by Pass 6, Pass 7, and the emitter.

use super::TypedPart;

/// A position within a production's right-hand side (1-based, matching the
/// `$1`, `$2`, ... convention of the emitted grammar actions) paired with
/// the typed part occupying it.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RuleArg {
    pub position: usize,
    pub part: TypedPart,
}

#[derive(Debug, Clone, serde::Serialize)]
pub enum Action {
    /// Build `ast_class` from the arguments at their recorded positions.
    AstConstruction { ast_class: String, args: Vec<RuleArg>, fingerprint: String },
    /// Reduce straight through to another grammar key's value.
    Ref { position: usize, part: TypedPart },
    /// Reduce an enum literal to its member name.
    EnumValue { member: String },
    /// Seed a fresh list of `elem_type`.
    ListInit { elem_type: TypedPart },
    /// Push one more element onto list number `list_num`.
    ListPush { list_num: usize, elem_type: TypedPart, has_leading_separator: bool },
    /// The single production rooted at the start symbol.
    Start { part: TypedPart },
}

/// One alternative of a grammar production: its right-hand-side token
/// sequence (grammar keys, already excluding `WS`) and the action attached
/// to a successful reduction.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GrammarRule {
    pub tokens: Vec<String>,
    pub action: Action,
}
