//! Emits the lexer spec (§4.9 / §6): one line per token, excluding `WS`,
//! pushing matched text into the typed union field selected by the token's
//! primitive type.

use crate::description::PrimType;
use crate::model::LanguageModel;

pub fn generate(model: &LanguageModel) -> String {
    let mut out = String::new();
    out.push_str("%{\n#include \"tokens.h\"\n%}\n\n%%\n\n");
    for (key, token) in model.token_data.iter() {
        if key == "WS" {
            continue;
        }
        let action = match token.prim_type {
            PrimType::None => format!("{{ return {}_T; }}", key.to_uppercase()),
            PrimType::String => format!("{{ yylval.sval = strdup(yytext); return {}_T; }}", key.to_uppercase()),
            PrimType::Int => format!("{{ yylval.ival = atoi(yytext); return {}_T; }}", key.to_uppercase()),
            PrimType::Float => format!("{{ yylval.dval = atof(yytext); return {}_T; }}", key.to_uppercase()),
        };
        out.push_str(&format!("{}\t{}\n", token.regex, action));
    }
    out.push_str("\n%%\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::parser::read;
    use crate::passes;

    #[test]
    fn skips_ws_and_returns_every_other_token() {
        let src = read(r#"token INT int "[0-9]+" start INT"#).unwrap();
        let model = passes::run_all(&src).unwrap();
        let spec = generate(&model);
        assert!(spec.contains("[0-9]+"));
        assert!(spec.contains("INT_T"));
        assert!(!spec.contains("\" \"\t{ return WS_T; }"));
    }
}
