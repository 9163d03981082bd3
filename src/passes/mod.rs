//! The seven analysis passes (§4.2–§4.8) run in fixed order by [`run_all`]
//! (§5's cross-pass ordering guarantee): register keys, add built-in
//! tokens, resolve list element types, build rule definitions, build
//! grammar rules, build AST classes, build printer cases.

pub mod ast_classes;
pub mod builtin_tokens;
pub mod grammar_rules;
pub mod printer_cases;
pub mod register_keys;
pub mod resolve_lists;
pub mod rule_defs;

use crate::description::Source;
use crate::error::Result;
use crate::model::LanguageModel;

pub fn run_all(source: &Source) -> Result<LanguageModel> {
    let mut model = LanguageModel::new();

    log::debug!("pass 1: registering keys");
    register_keys::run(source, &mut model)?;

    log::debug!("pass 2: adding built-in tokens");
    builtin_tokens::run(source, &mut model)?;

    log::debug!("pass 3: resolving list element types");
    resolve_lists::run(source, &mut model)?;

    log::debug!("pass 4: building rule definitions");
    rule_defs::run(source, &mut model)?;

    log::debug!("pass 5: building grammar rules");
    grammar_rules::run(&mut model)?;

    log::debug!("pass 6: building ast classes");
    ast_classes::run(&mut model)?;

    log::debug!("pass 7: building printer cases");
    printer_cases::run(&mut model)?;

    Ok(model)
}
