//! The typed-part algebra (§4.1): a resolved reference to a token, primitive,
//! enum, AST class, or list, tagged with its variant.
//!
//! Equality is defined over `(tag, alias)` only, matching invariant 4 in
//! §3 ("member M has the same TypedPart across all rules mentioning M") —
//! two occurrences of the same aliased reference are the same member even if
//! the underlying identifier metadata differs cosmetically.

use super::PrimType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Tag {
    Token,
    Prim,
    Enum,
    Ast,
    List,
}

#[derive(Debug, Clone, serde::Serialize)]
pub enum TypedPart {
    Token {
        identifier: String,
        alias: Option<String>,
    },
    Prim {
        prim_type: PrimType,
        identifier: String,
        alias: Option<String>,
    },
    Enum {
        identifier: String,
        alias: Option<String>,
        enum_key: String,
    },
    Ast {
        identifier: String,
        alias: Option<String>,
        ast_class: String,
    },
    List {
        identifier: String,
        alias: Option<String>,
        element_type: Box<TypedPart>,
        separator: Box<TypedPart>,
        sep_between: bool,
    },
}

impl TypedPart {
    pub fn tag(&self) -> Tag {
        match self {
            TypedPart::Token { .. } => Tag::Token,
            TypedPart::Prim { .. } => Tag::Prim,
            TypedPart::Enum { .. } => Tag::Enum,
            TypedPart::Ast { .. } => Tag::Ast,
            TypedPart::List { .. } => Tag::List,
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            TypedPart::Token { identifier, .. }
            | TypedPart::Prim { identifier, .. }
            | TypedPart::Enum { identifier, .. }
            | TypedPart::Ast { identifier, .. }
            | TypedPart::List { identifier, .. } => identifier,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            TypedPart::Token { alias, .. }
            | TypedPart::Prim { alias, .. }
            | TypedPart::Enum { alias, .. }
            | TypedPart::Ast { alias, .. }
            | TypedPart::List { alias, .. } => alias.as_deref(),
        }
    }

    /// The grammar token this part produces when emitted into a production's
    /// right-hand side, or `None` when it is the `WS` sentinel (never added
    /// to the grammar; see GLOSSARY "WS sentinel").
    pub fn grammar_token(&self) -> Option<String> {
        if self.identifier() == "WS" {
            return None;
        }
        Some(format!("{}_T", self.identifier().to_uppercase()))
    }

    /// Returns this part with `alias` attached, used when an `AstPart` gives
    /// an occurrence its own name (`identifier: alias`).
    pub fn with_alias(self, alias: Option<String>) -> Self {
        match self {
            TypedPart::Token { identifier, .. } => TypedPart::Token { identifier, alias },
            TypedPart::Prim { prim_type, identifier, .. } => TypedPart::Prim { prim_type, identifier, alias },
            TypedPart::Enum { identifier, enum_key, .. } => TypedPart::Enum { identifier, alias, enum_key },
            TypedPart::Ast { identifier, ast_class, .. } => TypedPart::Ast { identifier, alias, ast_class },
            TypedPart::List { identifier, element_type, separator, sep_between, .. } => {
                TypedPart::List { identifier, alias, element_type, separator, sep_between }
            }
        }
    }

    /// Member-key derivation (§4.7): the alias if present and distinct from
    /// the identifier; otherwise the identifier, with its first letter
    /// lowercased for Enum/Ast parts (a stylistic convention carried over
    /// from the reference implementation, see DESIGN.md).
    pub fn member_key(&self) -> String {
        if let Some(alias) = self.alias() {
            if alias != self.identifier() {
                return alias.to_string();
            }
        }
        match self.tag() {
            Tag::Enum | Tag::Ast => lowercase_first(self.identifier()),
            _ => self.identifier().to_string(),
        }
    }
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

impl PartialEq for TypedPart {
    fn eq(&self, other: &Self) -> bool {
        self.tag() == other.tag() && self.alias() == other.alias()
    }
}
impl Eq for TypedPart {}

/// Built-in token fallback table (§4.1), consulted by Pass 2 once a
/// reference fails to resolve against user-declared tokens/grammars.
pub fn builtin_token(identifier: &str) -> Option<(PrimType, &'static str)> {
    Some(match identifier {
        "LPAREN" => (PrimType::None, r"\("),
        "RPAREN" => (PrimType::None, r"\)"),
        "LBRACE" => (PrimType::None, r"\{"),
        "RBRACE" => (PrimType::None, r"\}"),
        "COMMA" => (PrimType::None, r"\,"),
        "SEMICOLON" => (PrimType::None, r"\;"),
        "EQUAL" => (PrimType::None, r"\="),
        "intConst" => (PrimType::Int, r"[1-9][0-9]*"),
        "identifier" => (PrimType::String, r"[_a-zA-Z][0-9_a-zA-Z]*"),
        "WS" => (PrimType::None, " "),
        _ => return None,
    })
}
