//! Integration coverage for `langforge::description` reading real fixture
//! files from disk, as opposed to the inline unit tests in the module
//! itself which only exercise in-memory snippets.

use std::fs;

use langforge::description::parser::read;
use langforge::description::Decl;
use langforge::CompileError;

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading fixture {path}: {e}"))
}

#[test]
fn reads_the_minimal_fixture_into_three_decls() {
    let source = read(&fixture("minimal.lang")).unwrap();
    assert_eq!(source.decls.len(), 3);
    assert!(matches!(source.decls[0], Decl::Token { .. }));
    assert!(matches!(source.decls[1], Decl::Ast { .. }));
    assert!(matches!(source.decls[2], Decl::Start { .. }));
}

#[test]
fn reads_the_arith_fixture_with_enum_ast_list_and_recursive_alternatives() {
    let source = read(&fixture("arith.lang")).unwrap();

    let enum_decl = source.decls.iter().find(|d| matches!(d, Decl::Enum { .. })).expect("enum decl present");
    match enum_decl {
        Decl::Enum { type_decl, members } => {
            assert_eq!(type_decl.identifier, "Op");
            assert_eq!(type_decl.alias.as_deref(), Some("OpKind"));
            assert_eq!(members.len(), 2);
        }
        _ => unreachable!(),
    }

    let expr_decl = source.decls.iter().find(|d| matches!(d, Decl::Ast { type_decl, .. } if type_decl.identifier == "Expr"));
    match expr_decl.expect("Expr ast decl present") {
        Decl::Ast { defs, .. } => {
            assert_eq!(defs.len(), 4);
            let bin_expr = defs.iter().find(|d| d.identifier.as_deref() == Some("BinExpr")).expect("BinExpr alt");
            assert_eq!(bin_expr.parts.len(), 3);
            assert_eq!(bin_expr.parts[0].alias.as_deref(), Some("left"));
        }
        _ => unreachable!(),
    }

    assert!(source.decls.iter().any(|d| matches!(d, Decl::List { .. })));
}

#[test]
fn unexpected_token_reports_the_reader_error_variant() {
    let err = read("ast 123").unwrap_err();
    assert!(matches!(err, CompileError::Reader { .. }));
    assert!(err.to_string().contains("Parse error"));
}

#[test]
fn unterminated_string_literal_is_a_reader_error() {
    let err = read(r#"token INT int "[0-9]+"#).unwrap_err();
    assert!(matches!(err, CompileError::Reader { .. }));
}
