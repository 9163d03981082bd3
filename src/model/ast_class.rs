//! The synthesized class hierarchy (Pass 6, §4.7) and enum tables.

use super::grammar_rule::RuleArg;
use super::TypedPart;

#[derive(Debug, Clone, serde::Serialize)]
pub struct AstClassConstructor {
    pub args: Vec<RuleArg>,
    pub fingerprint: String,
}

#[derive(Debug, Clone, serde::Serialize, Default)]
pub struct AstClass {
    pub name: String,
    pub extends: Option<String>,
    /// Insertion-ordered: member declaration order in the emitted class
    /// header follows first-seen order across the rules that built it.
    pub member_order: Vec<String>,
    pub members: std::collections::HashMap<String, TypedPart>,
    pub constructors: Vec<AstClassConstructor>,
    /// Insertion-ordered direct subclasses.
    pub sub_classes: Vec<String>,
}

impl AstClass {
    pub fn new(name: impl Into<String>) -> Self {
        AstClass { name: name.into(), ..Default::default() }
    }

    pub fn has_subclasses(&self) -> bool {
        !self.sub_classes.is_empty()
    }

    /// Ensures `member` is present with `part`'s type. Returns the existing
    /// part if the member was already declared, for the caller to compare
    /// against (invariant 4, §3 — "member has different type").
    pub fn ensure_member(&mut self, member: &str, part: TypedPart) -> Option<&TypedPart> {
        if !self.members.contains_key(member) {
            self.member_order.push(member.to_string());
            self.members.insert(member.to_string(), part);
            None
        } else {
            self.members.get(member)
        }
    }

    pub fn constructor_with_fingerprint(&self, fingerprint: &str) -> Option<&AstClassConstructor> {
        self.constructors.iter().find(|c| c.fingerprint == fingerprint)
    }
}

#[derive(Debug, Clone, serde::Serialize, Default)]
pub struct AstEnum {
    pub name: String,
    /// Insertion-ordered (member, literal value) pairs, reflected verbatim
    /// in the emitted `switch` (§5 ordering guarantee).
    pub members: Vec<(String, String)>,
}

impl AstEnum {
    pub fn new(name: impl Into<String>) -> Self {
        AstEnum { name: name.into(), members: Vec::new() }
    }
}
