//! Pass 7 (§4.8): index printer cases by class and by (grammar key, class),
//! so the emitter can later decide class-keyed vs. key-keyed dispatch and
//! detect the "multiple cases" limitation up front.

use crate::error::{CompileError, Result};
use crate::model::language_model::OrderedMap;
use crate::model::rule_def::RuleDef;
use crate::model::{Action, LanguageModel};

pub fn run(model: &mut LanguageModel) -> Result<()> {
    let keys: Vec<String> = model.ast_grammars.keys().map(String::from).collect();
    for key in keys {
        let rules = model.ast_grammars.get(&key).expect("just listed").rules.clone();
        for rule in rules {
            if let Action::AstConstruction { ast_class, fingerprint, .. } = rule.action {
                model.class_cases.ensure(&ast_class, Vec::new).push(fingerprint.clone());

                let per_key = model.keyed_cases.ensure(&key, OrderedMap::new);
                let existing = per_key.ensure(&ast_class, Vec::new);
                if !existing.is_empty() {
                    return Err(CompileError::MultipleCases { key: key.clone(), class: ast_class });
                }
                existing.push(fingerprint);
            }
        }
    }

    // List-grammar alternatives also construct classes (expanded-list
    // elements); they feed the same global per-class uniqueness check but
    // never an astKey_ dispatcher, which is ast-grammar specific.
    let list_keys: Vec<String> = model.list_grammars.keys().map(String::from).collect();
    for key in list_keys {
        let rule_defs = model.list_grammars.get(&key).expect("just listed").rule_defs.clone();
        for rd in rule_defs {
            if let RuleDef::List(list_rd) = rd {
                if let crate::model::rule_def::RuleTarget::Construct(class_name) = &list_rd.inner.target {
                    model.class_cases.ensure(class_name, Vec::new).push(list_rd.inner.fingerprint.clone());
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::parser::read;
    use crate::passes::{ast_classes, builtin_tokens, grammar_rules, register_keys, resolve_lists, rule_defs};

    fn model_for(src_text: &str) -> Result<LanguageModel> {
        let src = read(src_text).unwrap();
        let mut model = LanguageModel::new();
        register_keys::run(&src, &mut model)?;
        builtin_tokens::run(&src, &mut model)?;
        resolve_lists::run(&src, &mut model)?;
        rule_defs::run(&src, &mut model)?;
        grammar_rules::run(&mut model)?;
        ast_classes::run(&mut model)?;
        run(&mut model)?;
        Ok(model)
    }

    #[test]
    fn indexes_one_case_per_class_and_key() {
        let model = model_for(
            r#"
            ast Expr { IntExpr(intConst), IdExpr(identifier) }
            start Expr
            "#,
        )
        .unwrap();
        assert_eq!(model.class_cases.get("IntExpr").unwrap().len(), 1);
        assert_eq!(model.keyed_cases.get("Expr").unwrap().get("IntExpr").unwrap().len(), 1);
    }

    #[test]
    fn two_alternatives_for_the_same_class_under_one_key_is_an_error() {
        let err = model_for(
            r#"
            ast Expr { Lit(intConst), Lit(identifier) }
            start Expr
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::MultipleCases { .. }));
    }
}
