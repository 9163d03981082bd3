//! Emits the base visitor (§4.9): one `visit<Class>` per `AstClass`. A
//! class with subclasses switches on the node tag and dispatches; a leaf
//! class recurses into its Ast members and iterates its list members.

use crate::model::{LanguageModel, Tag, TypedPart};

pub fn generate(lang_key: &str, model: &LanguageModel) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "#pragma once\n#include \"{lang_key}.hpp\"\n\nclass {lang_key}Visitor {{\npublic:\n    virtual ~{lang_key}Visitor() = default;\n\n"
    ));

    for (name, class) in model.ast_classes.iter() {
        out.push_str(&format!("    virtual void visit{name}({name} *node) {{\n"));
        if class.has_subclasses() {
            out.push_str("        switch (node->tag) {\n");
            for sub in &class.sub_classes {
                out.push_str(&format!(
                    "            case AstTag::{sub}Node: visit{sub}(static_cast<{sub}*>(node)); break;\n"
                ));
            }
            out.push_str("            default: break;\n        }\n");
        } else {
            for member in &class.member_order {
                let part = class.members.get(member).expect("member_order and members stay in sync");
                match part {
                    TypedPart::Ast { ast_class, .. } => {
                        out.push_str(&format!("        if (node->{member}) visit{ast_class}(node->{member});\n"));
                    }
                    TypedPart::List { .. } => {
                        out.push_str(&format!(
                            "        for (auto *elem : *node->{member}) {{ visitListElement(elem); }}\n"
                        ));
                    }
                    _ => {}
                }
            }
        }
        out.push_str("    }\n\n");
    }

    out.push_str("protected:\n    virtual void visitListElement(void *) {}\n");
    out.push_str("};\n");
    out
}
