//! Pass 5 (§4.6): lower rule definitions into grammar rules with actions.

use crate::error::{CompileError, Result};
use crate::model::rule_def::{AstRuleDef, RuleDef, RuleTarget};
use crate::model::{Action, GrammarRule, LanguageModel, RuleArg, TypedPart};

pub fn run(model: &mut LanguageModel) -> Result<()> {
    build_enum_rules(model);
    build_ast_rules(model)?;
    build_list_rules(model)?;
    build_start_rule(model)?;
    Ok(())
}

fn build_enum_rules(model: &mut LanguageModel) {
    let keys: Vec<String> = model.enum_grammars.keys().map(String::from).collect();
    for key in keys {
        let enum_key = model.enum_grammars.get(&key).expect("just listed").enum_key.clone();
        let members = model.ast_enums.get(&enum_key).map(|e| e.members.clone()).unwrap_or_default();
        let rules = members
            .into_iter()
            .map(|(member, _literal)| GrammarRule {
                tokens: vec![member.clone()],
                action: Action::EnumValue { member },
            })
            .collect();
        model.enum_grammars.get_mut(&key).expect("just listed").rules = rules;
    }
}

fn build_ast_rules(model: &mut LanguageModel) -> Result<()> {
    let keys: Vec<String> = model.ast_grammars.keys().map(String::from).collect();
    for key in keys {
        let rule_defs = model.ast_grammars.get(&key).expect("just listed").rule_defs.clone();
        let mut rules = Vec::with_capacity(rule_defs.len());
        for rd in rule_defs {
            if let RuleDef::Ast(ast_rd) = rd {
                rules.push(build_ast_grammar_rule(&ast_rd));
            }
        }
        model.ast_grammars.get_mut(&key).expect("just listed").rules = rules;
    }
    Ok(())
}

fn build_ast_grammar_rule(rd: &AstRuleDef) -> GrammarRule {
    match &rd.target {
        RuleTarget::Reference(part) => GrammarRule {
            tokens: vec![part.identifier().to_string()],
            action: Action::Ref { position: 1, part: part.clone() },
        },
        RuleTarget::Construct(class_name) => {
            let mut tokens = Vec::new();
            let mut args = Vec::new();
            let mut position = 0usize;
            for (raw, part) in rd.raw_tokens.iter().zip(rd.parts.iter()) {
                if raw == "WS" {
                    continue;
                }
                position += 1;
                tokens.push(raw.clone());
                args.push(RuleArg { position, part: part.clone() });
            }
            GrammarRule {
                tokens,
                action: Action::AstConstruction {
                    ast_class: class_name.clone(),
                    args,
                    fingerprint: rd.fingerprint.clone(),
                },
            }
        }
    }
}

fn build_list_rules(model: &mut LanguageModel) -> Result<()> {
    let keys: Vec<String> = model.list_grammars.keys().map(String::from).collect();
    for key in keys {
        let lg = model.list_grammars.get(&key).expect("just listed").clone();
        let elem_type = lg
            .element_type
            .clone()
            .expect("pass 3 resolves every list grammar's element type before pass 5 runs");
        let mut rules = vec![GrammarRule { tokens: vec![], action: Action::ListInit { elem_type: elem_type.clone() } }];

        if lg.rule_defs.is_empty() {
            let sep = lg
                .separator
                .clone()
                .expect("pass 3 resolves a shorthand list's separator before pass 5 runs");
            let elem_tokens = vec![elem_type.identifier().to_string()];
            if lg.sep_between {
                rules.push(list_push_rule(&key, &elem_tokens, None, None, elem_type.clone()));
                rules.push(list_push_rule(
                    &key,
                    &elem_tokens,
                    Some(sep.identifier().to_string()),
                    None,
                    elem_type.clone(),
                ));
            } else {
                rules.push(list_push_rule(
                    &key,
                    &elem_tokens,
                    None,
                    Some(sep.identifier().to_string()),
                    elem_type.clone(),
                ));
            }
        } else {
            for rd in &lg.rule_defs {
                if let RuleDef::List(list_rd) = rd {
                    let elem_tokens: Vec<String> =
                        list_rd.inner.raw_tokens.iter().filter(|t| t.as_str() != "WS").cloned().collect();
                    rules.push(list_push_rule(
                        &key,
                        &elem_tokens,
                        list_rd.sep_before.clone(),
                        list_rd.sep_after.clone(),
                        elem_type.clone(),
                    ));
                }
            }
        }
        model.list_grammars.get_mut(&key).expect("just listed").rules = rules;
    }
    Ok(())
}

fn list_push_rule(
    list_key: &str,
    elem_tokens: &[String],
    sep_before: Option<String>,
    sep_after: Option<String>,
    elem_type: TypedPart,
) -> GrammarRule {
    let mut tokens = vec![list_key.to_string()];
    let has_leading_separator = sep_before.is_some();
    if let Some(sep) = sep_before {
        tokens.push(sep);
    }
    tokens.extend(elem_tokens.iter().cloned());
    if let Some(sep) = sep_after {
        tokens.push(sep);
    }
    GrammarRule { tokens, action: Action::ListPush { list_num: 1, elem_type, has_leading_separator } }
}

fn build_start_rule(model: &mut LanguageModel) -> Result<()> {
    let start_key = model
        .start_key
        .clone()
        .ok_or_else(|| CompileError::UnresolvedReference { identifier: "start".to_string() })?;
    let part = model
        .resolve(&start_key)
        .ok_or_else(|| CompileError::UnresolvedReference { identifier: start_key.clone() })?;
    model.start_rule = Some(GrammarRule { tokens: vec![start_key], action: Action::Start { part } });
    Ok(())
}
