//! Pass 1 (§4.2): register tokens, enum/ast/list grammar keys.

use crate::description::{Decl, PrimType as DescPrimType, Source};
use crate::error::Result;
use crate::model::language_model::TokenData;
use crate::model::LanguageModel;

pub fn run(source: &Source, model: &mut LanguageModel) -> Result<()> {
    for decl in &source.decls {
        match decl {
            Decl::Token { identifier, prim_type, regex } => {
                model.token_data.insert(
                    identifier.clone(),
                    TokenData { identifier: identifier.clone(), prim_type: *prim_type, regex: regex.clone() },
                );
                model.note_prim_type_in_use(*prim_type);
            }
            Decl::Enum { type_decl, members } => {
                let key = type_decl.key().to_string();
                let enum_grammar = model.ensure_enum_grammar(&key);
                enum_grammar.enum_key = type_decl.identifier.clone();
                let ast_enum = model.ensure_enum(&type_decl.identifier);
                for member in members {
                    ast_enum.members.push((member.identifier.clone(), member.literal.clone()));
                }
                for member in members {
                    model.token_data.insert(
                        member.identifier.clone(),
                        TokenData {
                            identifier: member.identifier.clone(),
                            prim_type: DescPrimType::None,
                            regex: member.literal.clone(),
                        },
                    );
                }
            }
            Decl::Ast { type_decl, .. } => {
                let key = type_decl.key().to_string();
                let ast_grammar = model.ensure_ast_grammar(&key);
                ast_grammar.ast_class = type_decl.identifier.clone();
            }
            Decl::List { type_decl, .. } => {
                let key = type_decl.key().to_string();
                model.ensure_list_grammar(&key);
            }
            Decl::Start { identifier } => {
                model.start_key = Some(identifier.clone());
            }
        }
    }
    Ok(())
}
