//! Step 1.a: tokenization of `.lang` source text.
//!
//! This is a direct hand-scanned lexer, not built on the `regex` crate: the
//! token set is tiny and fixed, and reaching for a regex engine to lex the
//! regex engine's own input format would be circular. `regex` is still used
//! downstream, by the description reader's *output* consumers, to match the
//! built-in and user tokens it registers.

use crate::error::{CompileError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tok {
    KwToken,
    KwEnum,
    KwAst,
    KwList,
    KwStart,
    KwString,
    KwInt,
    KwFloat,
    Ident(String),
    StringLit(String),
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Semicolon,
    Eof,
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub tok: Tok,
    pub line: usize,
}

pub fn tokenize(text: &str) -> Result<Vec<Spanned>> {
    let mut out = Vec::new();
    let bytes: Vec<char> = text.chars().collect();
    let mut i = 0usize;
    let mut line = 1usize;

    while i < bytes.len() {
        let c = bytes[i];
        match c {
            '\n' => {
                line += 1;
                i += 1;
            }
            c if c.is_whitespace() => {
                i += 1;
            }
            '/' if bytes.get(i + 1) == Some(&'/') => {
                while i < bytes.len() && bytes[i] != '\n' {
                    i += 1;
                }
            }
            '(' => {
                out.push(Spanned { tok: Tok::LParen, line });
                i += 1;
            }
            ')' => {
                out.push(Spanned { tok: Tok::RParen, line });
                i += 1;
            }
            '{' => {
                out.push(Spanned { tok: Tok::LBrace, line });
                i += 1;
            }
            '}' => {
                out.push(Spanned { tok: Tok::RBrace, line });
                i += 1;
            }
            ',' => {
                out.push(Spanned { tok: Tok::Comma, line });
                i += 1;
            }
            ':' => {
                out.push(Spanned { tok: Tok::Colon, line });
                i += 1;
            }
            ';' => {
                out.push(Spanned { tok: Tok::Semicolon, line });
                i += 1;
            }
            '"' => {
                let start_line = line;
                i += 1;
                let mut s = String::new();
                loop {
                    match bytes.get(i) {
                        None => {
                            return Err(CompileError::Reader {
                                line: start_line,
                                message: "unterminated string literal".to_string(),
                            })
                        }
                        Some('"') => {
                            i += 1;
                            break;
                        }
                        Some('\\') => {
                            i += 1;
                            match bytes.get(i) {
                                Some('"') => s.push('"'),
                                Some('\\') => s.push('\\'),
                                Some(other) => s.push(*other),
                                None => {
                                    return Err(CompileError::Reader {
                                        line: start_line,
                                        message: "unterminated escape in string literal".to_string(),
                                    })
                                }
                            }
                            i += 1;
                        }
                        Some(ch) => {
                            if *ch == '\n' {
                                line += 1;
                            }
                            s.push(*ch);
                            i += 1;
                        }
                    }
                }
                out.push(Spanned { tok: Tok::StringLit(s), line: start_line });
            }
            c if c == '_' || c.is_ascii_alphabetic() => {
                let start = i;
                while i < bytes.len() && (bytes[i] == '_' || bytes[i].is_ascii_alphanumeric()) {
                    i += 1;
                }
                let word: String = bytes[start..i].iter().collect();
                let tok = match word.as_str() {
                    "token" => Tok::KwToken,
                    "enum" => Tok::KwEnum,
                    "ast" => Tok::KwAst,
                    "list" => Tok::KwList,
                    "start" => Tok::KwStart,
                    "string" => Tok::KwString,
                    "int" => Tok::KwInt,
                    "float" => Tok::KwFloat,
                    _ => Tok::Ident(word),
                };
                out.push(Spanned { tok, line });
            }
            other => {
                return Err(CompileError::Reader {
                    line,
                    message: format!("unexpected character '{other}'"),
                })
            }
        }
    }
    out.push(Spanned { tok: Tok::Eof, line });
    Ok(out)
}
