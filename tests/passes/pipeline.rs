//! Runs the full seven-pass pipeline over the on-disk fixtures and checks
//! the shape of the resulting `LanguageModel`, as opposed to the inline
//! per-pass unit tests which only ever see one pass's slice of it.

use std::fs;

use pretty_assertions::assert_eq;

use langforge::description::parser::read;
use langforge::passes;

fn model_for_fixture(name: &str) -> langforge::LanguageModel {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let text = fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading fixture {path}: {e}"));
    let source = read(&text).unwrap();
    passes::run_all(&source).unwrap()
}

#[test]
fn minimal_fixture_has_one_class_and_a_start_rule() {
    let model = model_for_fixture("minimal.lang");
    assert!(model.ast_classes.contains("Expr"));
    assert!(model.ast_classes.contains("IntExpr"));
    assert!(model.start_rule.is_some());
}

#[test]
fn arith_fixture_builds_the_full_expression_hierarchy() {
    let model = model_for_fixture("arith.lang");

    let expr = model.ast_classes.get("Expr").unwrap();
    for sub in ["IntExpr", "IdExpr", "BinExpr", "ParenExpr"] {
        assert!(expr.sub_classes.contains(&sub.to_string()), "Expr.sub_classes missing {sub}");
        assert_eq!(model.ast_classes.get(sub).unwrap().extends.as_deref(), Some("Expr"));
    }

    let bin_expr = model.ast_classes.get("BinExpr").unwrap();
    assert!(bin_expr.members.contains_key("left"));
    assert!(bin_expr.members.contains_key("right"));
    assert!(bin_expr.members.contains_key("op"));

    let args = model.list_grammars.get("Args").unwrap();
    assert_eq!(args.sep_between, false);

    let call = model.ast_classes.get("CallExpr").unwrap();
    assert!(call.members.contains_key("Args"));
    assert!(call.members.contains_key("callee"));

    assert!(model.ast_enums.contains("Op"));
    assert_eq!(model.ast_enums.get("Op").unwrap().members.len(), 2);
}

#[test]
fn emitting_the_arith_fixture_produces_all_five_artifacts_in_memory() {
    let model = model_for_fixture("arith.lang");
    let class_header = langforge::emit::class_header::generate("arith", &model);
    let visitor = langforge::emit::visitor::generate("arith", &model);
    let printer = langforge::emit::printer::generate("arith", &model).unwrap();
    let lexer = langforge::emit::lexer_spec::generate(&model);
    let grammar = langforge::emit::grammar_spec::generate("arith", &model);

    assert!(class_header.contains("class BinExpr"));
    assert!(visitor.contains("visitBinExpr"));
    assert!(printer.contains("visitBinExpr"));
    assert!(lexer.contains("%%"));
    assert!(grammar.contains("start:"));
}
