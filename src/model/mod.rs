//! The Language Model: the fully cross-linked representation built by
//! passes 1–7 out of the Description Model (§3).

pub mod ast_class;
pub mod grammar_rule;
pub mod language_model;
pub mod rule_def;
pub mod typed_part;

pub use crate::description::PrimType;
pub use ast_class::{AstClass, AstClassConstructor, AstEnum};
pub use grammar_rule::{Action, GrammarRule, RuleArg};
pub use language_model::{AstGrammar, EnumGrammar, LanguageModel, ListGrammar, TokenData};
pub use rule_def::{AstRuleDef, ListRuleDef, RuleDef};
pub use typed_part::{Tag, TypedPart};
