//! `LanguageModel`: the single owned value threaded through passes 1–7 by
//! the orchestrator in [`crate::passes`]. There is no global/static state —
//! see the "Global mutable state" design note in SPEC_FULL.md §9.

use std::collections::HashMap;

use super::ast_class::{AstClass, AstEnum};
use super::rule_def::RuleDef;
use super::{GrammarRule, PrimType, TypedPart};

/// A `Vec`-backed map that preserves first-insertion order, used everywhere
/// the model needs "register or fetch" semantics (mirroring the original
/// implementation's `ensureX` accessors) while keeping emission order
/// deterministic and equal to description-source order, per the ordering
/// guarantee in SPEC_FULL.md §5.
#[derive(Debug, Clone, serde::Serialize, Default)]
pub struct OrderedMap<V> {
    order: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    values: Vec<V>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self { order: Vec::new(), index: HashMap::new(), values: Vec::new() }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.values[i])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.index.get(key).map(|&i| &mut self.values[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        if let Some(&i) = self.index.get(&key) {
            self.values[i] = value;
        } else {
            self.index.insert(key.clone(), self.values.len());
            self.order.push(key);
            self.values.push(value);
        }
    }

    pub fn ensure(&mut self, key: &str, make: impl FnOnce() -> V) -> &mut V {
        if !self.index.contains_key(key) {
            self.insert(key.to_string(), make());
        }
        self.get_mut(key).expect("just inserted")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.order.iter().map(move |k| (k.as_str(), self.get(k).expect("indexed key present")))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct TokenData {
    pub identifier: String,
    pub prim_type: PrimType,
    pub regex: String,
}

#[derive(Debug, Clone, serde::Serialize, Default)]
pub struct EnumGrammar {
    pub enum_key: String,
    pub rules: Vec<GrammarRule>,
}

#[derive(Debug, Clone, serde::Serialize, Default)]
pub struct AstGrammar {
    pub ast_class: String,
    pub rule_defs: Vec<RuleDef>,
    pub rules: Vec<GrammarRule>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ListGrammar {
    pub element_type: Option<TypedPart>,
    pub separator: Option<TypedPart>,
    pub sep_between: bool,
    pub rule_defs: Vec<RuleDef>,
    pub rules: Vec<GrammarRule>,
}

impl Default for ListGrammar {
    fn default() -> Self {
        ListGrammar {
            element_type: None,
            separator: None,
            sep_between: true,
            rule_defs: Vec::new(),
            rules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, Default)]
pub struct LanguageModel {
    pub token_data: OrderedMap<TokenData>,
    pub token_types_in_use: Vec<PrimType>,
    pub enum_grammars: OrderedMap<EnumGrammar>,
    pub ast_grammars: OrderedMap<AstGrammar>,
    pub list_grammars: OrderedMap<ListGrammar>,
    pub ast_classes: OrderedMap<AstClass>,
    pub ast_enums: OrderedMap<AstEnum>,
    pub start_key: Option<String>,
    pub start_rule: Option<GrammarRule>,
    /// Printer-case indices built by Pass 7 (§4.8).
    pub class_cases: OrderedMap<Vec<String>>,
    pub keyed_cases: OrderedMap<OrderedMap<Vec<String>>>,
}

impl LanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note_prim_type_in_use(&mut self, prim_type: PrimType) {
        if prim_type != PrimType::None && !self.token_types_in_use.contains(&prim_type) {
            self.token_types_in_use.push(prim_type);
        }
    }

    pub fn ensure_class(&mut self, name: &str) -> &mut AstClass {
        self.ast_classes.ensure(name, || AstClass::new(name))
    }

    pub fn ensure_enum(&mut self, name: &str) -> &mut AstEnum {
        self.ast_enums.ensure(name, || AstEnum::new(name))
    }

    pub fn ensure_enum_grammar(&mut self, key: &str) -> &mut EnumGrammar {
        self.enum_grammars.ensure(key, EnumGrammar::default)
    }

    pub fn ensure_ast_grammar(&mut self, key: &str) -> &mut AstGrammar {
        self.ast_grammars.ensure(key, AstGrammar::default)
    }

    pub fn ensure_list_grammar(&mut self, key: &str) -> &mut ListGrammar {
        self.list_grammars.ensure(key, ListGrammar::default)
    }

    /// Ensures the sub/base-class relation between `base_class` and
    /// `sub_class`, returning the subclass name's own `AstClass`. If the two
    /// names are equal, returns the base unchanged — the class is its own
    /// "subclass" for this rule (§4.2 original `ensureSubRelation`).
    pub fn ensure_sub_relation(&mut self, base_class: &str, sub_class: &str) -> crate::error::Result<()> {
        self.ensure_class(base_class);
        if sub_class == base_class {
            return Ok(());
        }
        self.ensure_class(sub_class);
        {
            let sub = self.ast_classes.get_mut(sub_class).expect("just ensured");
            if let Some(existing) = &sub.extends {
                if existing != base_class {
                    return Err(crate::error::CompileError::ReparentConflict {
                        class: sub_class.to_string(),
                        existing: existing.clone(),
                        attempted: base_class.to_string(),
                    });
                }
            }
            sub.extends = Some(base_class.to_string());
        }
        let base = self.ast_classes.get_mut(base_class).expect("just ensured");
        if !base.sub_classes.iter().any(|s| s == sub_class) {
            base.sub_classes.push(sub_class.to_string());
        }
        Ok(())
    }

    /// Presence check used by Pass 2 (§4.3): true once `identifier` names a
    /// registered token or grammar, regardless of whether a list grammar's
    /// element type has itself been resolved yet.
    pub fn is_known(&self, identifier: &str) -> bool {
        self.token_data.contains(identifier)
            || self.enum_grammars.contains(identifier)
            || self.ast_grammars.contains(identifier)
            || self.list_grammars.contains(identifier)
    }

    /// The typed-part resolver (§4.1), consulting user-registered tokens and
    /// grammars only — built-in fallback is Pass 2's job, not this
    /// function's, so unresolved built-ins surface as `None` here too.
    pub fn resolve(&self, identifier: &str) -> Option<TypedPart> {
        if let Some(token) = self.token_data.get(identifier) {
            return Some(match token.prim_type {
                PrimType::None => TypedPart::Token { identifier: token.identifier.clone(), alias: None },
                other => TypedPart::Prim { prim_type: other, identifier: token.identifier.clone(), alias: None },
            });
        }
        if let Some(enum_grammar) = self.enum_grammars.get(identifier) {
            return Some(TypedPart::Enum {
                identifier: identifier.to_string(),
                alias: None,
                enum_key: enum_grammar.enum_key.clone(),
            });
        }
        if let Some(ast_grammar) = self.ast_grammars.get(identifier) {
            return Some(TypedPart::Ast {
                identifier: identifier.to_string(),
                alias: None,
                ast_class: ast_grammar.ast_class.clone(),
            });
        }
        if let Some(list_grammar) = self.list_grammars.get(identifier) {
            if let (Some(elem), Some(sep)) = (&list_grammar.element_type, &list_grammar.separator) {
                return Some(TypedPart::List {
                    identifier: identifier.to_string(),
                    alias: None,
                    element_type: Box::new(elem.clone()),
                    separator: Box::new(sep.clone()),
                    sep_between: list_grammar.sep_between,
                });
            }
            return None;
        }
        None
    }
}
