//! Emits the source-reconstruction printer (§4.8 / §4.9): a
//! `{lang_key}ToSource` subclass of the visitor overriding `visit<Class>`
//! for every directly-constructed class, plus `astKey_<gk>` (key-keyed
//! dispatch) and `listKey_<gk>` (list iteration with separator placement).

use super::{clean_literal, grammar_symbol};
use crate::description::PrimType;
use crate::error::{CompileError, Result};
use crate::model::ast_class::AstClass;
use crate::model::language_model::ListGrammar;
use crate::model::rule_def::{AstRuleDef, RuleDef, RuleTarget};
use crate::model::{LanguageModel, Tag, TypedPart};

pub fn generate(lang_key: &str, model: &LanguageModel) -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!(
        "#pragma once\n#include \"{lang_key}Visitor.hpp\"\n#include <sstream>\n#include <string>\n\nclass {lang_key}ToSource : public {lang_key}Visitor {{\npublic:\n    std::ostringstream out;\n\n"
    ));

    for (class_name, fingerprints) in model.class_cases.iter() {
        if fingerprints.len() > 1 {
            return Err(CompileError::MultipleCases { key: class_name.to_string(), class: class_name.to_string() });
        }
        let class = model.ast_classes.get(class_name).expect("class_cases only names known classes");
        let rule_def = find_rule_def_for_class(model, class_name)
            .expect("every entry in class_cases was built from a Construct rule def");
        out.push_str(&generate_case(model, class_name, class, rule_def));
    }

    for (key, per_class) in model.keyed_cases.iter() {
        if per_class.len() <= 1 {
            continue;
        }
        out.push_str(&format!("    void astKey_{key}(AstNode *node) {{\n        switch (node->tag) {{\n"));
        for (class_name, _) in per_class.iter() {
            out.push_str(&format!(
                "            case AstTag::{class_name}Node: visit{class_name}(static_cast<{class_name}*>(node)); break;\n"
            ));
        }
        out.push_str("            default: break;\n        }\n    }\n\n");
    }

    for (key, lg) in model.list_grammars.iter() {
        out.push_str(&generate_list_key(model, key, lg));
    }

    out.push_str("};\n");
    Ok(out)
}

fn find_rule_def_for_class<'a>(model: &'a LanguageModel, class_name: &str) -> Option<&'a AstRuleDef> {
    for (_, ag) in model.ast_grammars.iter() {
        for rd in &ag.rule_defs {
            if let RuleDef::Ast(ast_rd) = rd {
                if matches!(&ast_rd.target, RuleTarget::Construct(n) if n == class_name) {
                    return Some(ast_rd);
                }
            }
        }
    }
    for (_, lg) in model.list_grammars.iter() {
        for rd in &lg.rule_defs {
            if let RuleDef::List(list_rd) = rd {
                if matches!(&list_rd.inner.target, RuleTarget::Construct(n) if n == class_name) {
                    return Some(&list_rd.inner);
                }
            }
        }
    }
    None
}

fn generate_case(model: &LanguageModel, class_name: &str, class: &AstClass, rule_def: &AstRuleDef) -> String {
    let _ = class;
    let mut out = format!("    void visit{class_name}({class_name} *node) override {{\n");
    for (raw, part) in rule_def.raw_tokens.iter().zip(rule_def.parts.iter()) {
        if raw == "WS" {
            out.push_str("        out << \" \";\n");
            continue;
        }
        out.push_str(&print_stmt(model, part));
    }
    out.push_str("    }\n\n");
    out
}

fn print_stmt(model: &LanguageModel, part: &TypedPart) -> String {
    let member = part.member_key();
    match part.tag() {
        Tag::Token => {
            let literal = model
                .token_data
                .get(part.identifier())
                .map(|t| clean_literal(&t.regex))
                .unwrap_or_default();
            format!("        out << \"{literal}\";\n")
        }
        Tag::Prim => {
            if let TypedPart::Prim { prim_type: PrimType::String, .. } = part {
                format!("        out << node->{member};\n")
            } else {
                format!("        out << node->{member};\n")
            }
        }
        Tag::Enum => {
            if let TypedPart::Enum { enum_key, .. } = part {
                let fn_name = format!("{}ToString", lower_first(enum_key));
                format!("        out << {fn_name}(node->{member});\n")
            } else {
                unreachable!("Tag::Enum implies TypedPart::Enum")
            }
        }
        Tag::Ast => {
            if let TypedPart::Ast { identifier, ast_class, .. } = part {
                if identifier == ast_class {
                    format!("        if (node->{member}) visit{ast_class}(node->{member});\n")
                } else {
                    format!("        if (node->{member}) astKey_{identifier}(node->{member});\n")
                }
            } else {
                unreachable!("Tag::Ast implies TypedPart::Ast")
            }
        }
        Tag::List => {
            if let TypedPart::List { identifier, .. } = part {
                format!("        listKey_{identifier}(node->{member});\n")
            } else {
                unreachable!("Tag::List implies TypedPart::List")
            }
        }
    }
}

fn generate_list_key(model: &LanguageModel, key: &str, lg: &ListGrammar) -> String {
    let elem_ident = lg.element_type.as_ref().map(|p| p.identifier().to_string()).unwrap_or_default();
    let elem_is_ast = matches!(lg.element_type, Some(TypedPart::Ast { .. }));
    let mut out = format!("    void listKey_{key}(std::vector<void*> *list) {{\n");
    out.push_str("        bool first = true;\n        for (auto *raw : *list) {\n");
    if lg.sep_between {
        let sep_literal = lg
            .separator
            .as_ref()
            .and_then(|s| model.token_data.get(s.identifier()))
            .map(|t| clean_literal(&t.regex))
            .unwrap_or_default();
        out.push_str(&format!("            if (!first) out << \"{sep_literal}\";\n"));
    }
    if elem_is_ast {
        out.push_str(&format!("            visit{elem_ident}(static_cast<{elem_ident}*>(raw));\n"));
    } else {
        out.push_str("            /* element printed by its own constructed case */\n");
    }
    if !lg.sep_between {
        if let Some(sep) = &lg.separator {
            let sep_literal = model
                .token_data
                .get(sep.identifier())
                .map(|t| clean_literal(&t.regex))
                .unwrap_or_default();
            out.push_str(&format!("            out << \"{sep_literal}\";\n"));
        }
    }
    out.push_str("            first = false;\n        }\n    }\n\n");
    out
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
