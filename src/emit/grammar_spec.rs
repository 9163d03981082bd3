//! Emits the shift-reduce grammar spec (§4.9 / §6): union of in-use
//! primitive types, `%token`/`%type` declarations, the `start` rule, then
//! productions for every enum/ast/list grammar.

use super::grammar_symbol;
use crate::description::PrimType;
use crate::model::{Action, GrammarRule, LanguageModel};

pub fn generate(lang_key: &str, model: &LanguageModel) -> String {
    let mut out = String::new();
    out.push_str(&format!("%{{\n#include \"{lang_key}.hpp\"\nstatic void *result;\n%}}\n\n"));

    out.push_str("%union {\n");
    for prim_type in &model.token_types_in_use {
        match prim_type {
            PrimType::String => out.push_str("    char *sval;\n"),
            PrimType::Int => out.push_str("    int ival;\n"),
            PrimType::Float => out.push_str("    double dval;\n"),
            PrimType::None => {}
        }
    }
    out.push_str("    void *ptr;\n}\n\n");

    for (key, token) in model.token_data.iter() {
        if key == "WS" {
            continue;
        }
        let field = match token.prim_type {
            PrimType::None => String::new(),
            PrimType::String => "<sval>".to_string(),
            PrimType::Int => "<ival>".to_string(),
            PrimType::Float => "<dval>".to_string(),
        };
        out.push_str(&format!("%token{field} {}_T\n", key.to_uppercase()));
    }
    out.push('\n');

    for key in model.enum_grammars.keys() {
        out.push_str(&format!("%type<ival> {key}\n"));
    }
    for key in model.ast_grammars.keys() {
        out.push_str(&format!("%type<ptr> {key}\n"));
    }
    for key in model.list_grammars.keys() {
        out.push_str(&format!("%type<ptr> {key}\n"));
    }

    out.push_str("\n%%\n\n");

    if let Some(rule) = &model.start_rule {
        let rhs = symbols(model, &rule.tokens);
        out.push_str(&format!("start:\n    {rhs} {{ result = $1; }}\n    ;\n\n"));
    }

    for (key, eg) in model.enum_grammars.iter() {
        out.push_str(&production(model, key, &eg.rules));
    }
    for (key, ag) in model.ast_grammars.iter() {
        out.push_str(&production(model, key, &ag.rules));
    }
    for (key, lg) in model.list_grammars.iter() {
        out.push_str(&production(model, key, &lg.rules));
    }

    out.push_str("%%\n");
    out
}

fn symbols(model: &LanguageModel, tokens: &[String]) -> String {
    tokens.iter().map(|t| grammar_symbol(model, t)).collect::<Vec<_>>().join(" ")
}

fn production(model: &LanguageModel, key: &str, rules: &[GrammarRule]) -> String {
    if rules.is_empty() {
        return String::new();
    }
    let mut out = format!("{key}:\n");
    let alts: Vec<String> = rules
        .iter()
        .map(|rule| {
            let rhs = if rule.tokens.is_empty() { "/* empty */".to_string() } else { symbols(model, &rule.tokens) };
            format!("    {rhs} {{ {} }}", action_code(&rule.action))
        })
        .collect();
    out.push_str(&alts.join("\n  | "));
    out.push_str("\n    ;\n\n");
    out
}

fn action_code(action: &Action) -> String {
    match action {
        Action::AstConstruction { ast_class, args, .. } => {
            let ctor_args =
                args.iter().map(|a| format!("${}", a.position)).collect::<Vec<_>>().join(", ");
            format!("$$ = new {ast_class}({ctor_args});")
        }
        Action::Ref { position, .. } => format!("$$ = ${position};"),
        Action::EnumValue { member } => format!("$$ = {member};"),
        Action::ListInit { .. } => "$$ = new std::vector<void*>();".to_string(),
        Action::ListPush { has_leading_separator, .. } => {
            let elem_pos = if *has_leading_separator { 3 } else { 2 };
            format!("((std::vector<void*>*)$1)->push_back((void*)${elem_pos}); $$ = $1;")
        }
        Action::Start { .. } => "$$ = $1;".to_string(),
    }
}
