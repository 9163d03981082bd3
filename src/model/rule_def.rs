//! Rule definitions: the intermediate record Pass 4 (§4.5) builds for each
//! AST/list alternative before Pass 5 lowers it into a [`super::GrammarRule`].

use super::TypedPart;

/// What an `AstDef`'s alternative ultimately produces.
#[derive(Debug, Clone, serde::Serialize)]
pub enum RuleTarget {
    /// The alternative's identifier named (or defaulted to) a concrete
    /// class; this alternative constructs it.
    Construct(String),
    /// The alternative's identifier resolved to another AST grammar; this
    /// alternative just reduces through to that grammar's value.
    Reference(TypedPart),
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct AstRuleDef {
    /// The class named by the enclosing `ast` declaration's `TypeDecl`.
    pub base_class: String,
    pub target: RuleTarget,
    /// Raw identifiers in source order, including a possible `WS` marker;
    /// used to build the fingerprint and the production's token list.
    pub raw_tokens: Vec<String>,
    /// Resolved parts in source order, one per `raw_tokens` entry that is
    /// not itself a separator consumed elsewhere.
    pub parts: Vec<TypedPart>,
    pub fingerprint: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ListRuleDef {
    pub inner: AstRuleDef,
    pub sep_before: Option<String>,
    pub sep_after: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub enum RuleDef {
    Ast(AstRuleDef),
    List(ListRuleDef),
}

/// The fingerprint scheme (§4.5): non-WS, non-separator tokens joined by
/// `_`, terminated with `_S`. Shared by constructor dedup (Pass 6) and
/// printer-case indexing (Pass 7).
pub fn fingerprint(tokens: &[String]) -> String {
    let mut out = tokens
        .iter()
        .filter(|t| t.as_str() != "WS")
        .cloned()
        .collect::<Vec<_>>()
        .join("_");
    out.push_str("_S");
    out
}
