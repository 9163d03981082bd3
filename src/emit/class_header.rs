//! Emits the class header (§4.9): a node-tag enum, enum-to-string
//! functions, the `AstNode` base, and every synthesized `AstClass` in
//! dependency order (parents before children).

use crate::model::ast_class::AstClass;
use crate::model::LanguageModel;

pub fn generate(lang_key: &str, model: &LanguageModel) -> String {
    let mut out = String::new();
    out.push_str(&format!("#pragma once\n// Generated class header for '{lang_key}'. Do not edit by hand.\n\n"));

    out.push_str("enum class AstTag {\n");
    for (name, _) in model.ast_classes.iter() {
        out.push_str(&format!("    {name}Node,\n"));
    }
    out.push_str("};\n\n");

    for (name, ast_enum) in model.ast_enums.iter() {
        out.push_str(&format!("enum class {name} {{\n"));
        for (member, _) in &ast_enum.members {
            out.push_str(&format!("    {member},\n"));
        }
        out.push_str("};\n\n");

        out.push_str(&format!("inline const char *{name_lower}ToString({name} v) {{\n", name_lower = lower_first(name)));
        out.push_str("    switch (v) {\n");
        for (member, literal) in &ast_enum.members {
            out.push_str(&format!("        case {name}::{member}: return \"{literal}\";\n"));
        }
        out.push_str("        default: return \"\";\n    }\n}\n\n");
    }

    out.push_str("class AstNode {\npublic:\n    AstTag tag;\n    explicit AstNode(AstTag tag) : tag(tag) {}\n    virtual ~AstNode() = default;\n};\n\n");

    for name in topo_order(model) {
        out.push_str(&generate_class(&name, model.ast_classes.get(&name).expect("topo order only lists known classes")));
    }

    out.push_str(&format!(
        "inline AstNode *load{lang_key}(const char *path);\n// Parses `path` with the generated {lang_key} parser and returns its root.\n"
    ));
    out
}

fn generate_class(name: &str, class: &AstClass) -> String {
    let mut out = String::new();
    let base = class.extends.as_deref().unwrap_or("AstNode");
    out.push_str(&format!("class {name} : public {base} {{\npublic:\n"));
    for member in &class.member_order {
        let part = class.members.get(member).expect("member_order and members stay in sync");
        out.push_str(&format!("    {} {};\n", cpp_type(part), member));
    }
    for ctor in &class.constructors {
        let params = ctor
            .args
            .iter()
            .map(|arg| format!("{} {}", cpp_type(&arg.part), arg.part.member_key()))
            .collect::<Vec<_>>()
            .join(", ");
        let inits = ctor
            .args
            .iter()
            .map(|arg| {
                let key = arg.part.member_key();
                format!("{key}({key})")
            })
            .collect::<Vec<_>>()
            .join(", ");
        let tag_init = format!("{name}Node");
        out.push_str(&format!(
            "    {name}({params}) : {base}(AstTag::{tag_init}){}{} {{}}\n",
            if inits.is_empty() { "" } else { ", " },
            inits
        ));
    }
    if class.has_subclasses() {
        out.push_str(&format!("protected:\n    explicit {name}(AstTag tag) : {base}(tag) {{}}\n"));
    }
    out.push_str("};\n\n");
    out
}

fn cpp_type(part: &crate::model::TypedPart) -> String {
    use crate::description::PrimType;
    use crate::model::TypedPart;
    match part {
        TypedPart::Token { .. } => "void*".to_string(),
        TypedPart::Prim { prim_type: PrimType::String, .. } => "char*".to_string(),
        TypedPart::Prim { prim_type: PrimType::Int, .. } => "int".to_string(),
        TypedPart::Prim { prim_type: PrimType::Float, .. } => "double".to_string(),
        TypedPart::Prim { prim_type: PrimType::None, .. } => "void*".to_string(),
        TypedPart::Enum { enum_key, .. } => enum_key.clone(),
        TypedPart::Ast { ast_class, .. } => format!("{ast_class}*"),
        TypedPart::List { .. } => "std::vector<void*>*".to_string(),
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Parents before children: repeatedly emit any class whose `extends` is
/// `None` or already emitted.
fn topo_order(model: &LanguageModel) -> Vec<String> {
    let mut emitted: Vec<String> = Vec::new();
    let mut remaining: Vec<String> = model.ast_classes.keys().map(String::from).collect();
    while !remaining.is_empty() {
        let mut progressed = false;
        remaining.retain(|name| {
            let class = model.ast_classes.get(name).expect("listed from ast_classes");
            let ready = match &class.extends {
                None => true,
                Some(parent) => emitted.contains(parent),
            };
            if ready {
                emitted.push(name.clone());
                progressed = true;
            }
            !ready
        });
        if !progressed {
            // A cycle would violate invariant 3 (§3); emit whatever's left
            // in declaration order rather than looping forever.
            emitted.extend(remaining.drain(..));
            break;
        }
    }
    emitted
}
