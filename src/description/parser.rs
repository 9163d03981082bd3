//! Step 1.b: recursive-descent parsing of the token stream into a [`Source`]
//! tree. No error recovery: the first unexpected token aborts the whole read.

use super::lexer::{tokenize, Spanned, Tok};
use super::{AstDef, AstPart, Decl, EnumMember, ListBody, ListDef, PrimType, Source, TypeDecl};
use crate::error::{CompileError, Result};

pub fn read(text: &str) -> Result<Source> {
    let toks = tokenize(text)?;
    let mut p = Parser { toks, pos: 0 };
    p.parse_source()
}

struct Parser {
    toks: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Tok {
        &self.toks[self.pos].tok
    }

    fn line(&self) -> usize {
        self.toks[self.pos].line
    }

    fn advance(&mut self) -> Tok {
        let t = self.toks[self.pos].tok.clone();
        if self.pos + 1 < self.toks.len() {
            self.pos += 1;
        }
        t
    }

    fn err(&self, expected: &str) -> CompileError {
        CompileError::Reader {
            line: self.line(),
            message: format!("expected {expected}, found {:?}", self.peek()),
        }
    }

    fn expect(&mut self, tok: &Tok, expected: &str) -> Result<()> {
        if self.peek() == tok {
            self.advance();
            Ok(())
        } else {
            Err(self.err(expected))
        }
    }

    fn expect_ident(&mut self) -> Result<String> {
        match self.peek().clone() {
            Tok::Ident(s) => {
                self.advance();
                Ok(s)
            }
            _ => Err(self.err("identifier")),
        }
    }

    fn expect_string(&mut self) -> Result<String> {
        match self.peek().clone() {
            Tok::StringLit(s) => {
                self.advance();
                Ok(s)
            }
            _ => Err(self.err("string literal")),
        }
    }

    fn parse_source(&mut self) -> Result<Source> {
        let mut decls = Vec::new();
        while self.peek() != &Tok::Eof {
            decls.push(self.parse_decl()?);
        }
        Ok(Source { decls })
    }

    fn parse_decl(&mut self) -> Result<Decl> {
        match self.peek().clone() {
            Tok::KwToken => self.parse_token_decl(),
            Tok::KwEnum => self.parse_enum_decl(),
            Tok::KwAst => self.parse_ast_decl(),
            Tok::KwList => self.parse_list_decl(),
            Tok::KwStart => self.parse_start_decl(),
            _ => Err(self.err("'token', 'enum', 'ast', 'list' or 'start'")),
        }
    }

    fn parse_token_decl(&mut self) -> Result<Decl> {
        self.advance(); // token
        let identifier = self.expect_ident()?;
        let prim_type = match self.peek().clone() {
            Tok::KwString => {
                self.advance();
                PrimType::String
            }
            Tok::KwInt => {
                self.advance();
                PrimType::Int
            }
            Tok::KwFloat => {
                self.advance();
                PrimType::Float
            }
            _ => PrimType::None,
        };
        let regex = self.expect_string()?;
        Ok(Decl::Token { identifier, prim_type, regex })
    }

    fn parse_type_decl(&mut self) -> Result<TypeDecl> {
        let identifier = self.expect_ident()?;
        let alias = if self.peek() == &Tok::LParen {
            self.advance();
            let alias = self.expect_ident()?;
            self.expect(&Tok::RParen, "')'")?;
            Some(alias)
        } else {
            None
        };
        Ok(TypeDecl { identifier, alias })
    }

    fn parse_enum_decl(&mut self) -> Result<Decl> {
        self.advance(); // enum
        let type_decl = self.parse_type_decl()?;
        self.expect(&Tok::LBrace, "'{'")?;
        let mut members = Vec::new();
        if self.peek() != &Tok::RBrace {
            loop {
                let identifier = self.expect_ident()?;
                let literal = self.expect_string()?;
                members.push(EnumMember { identifier, literal });
                if self.peek() == &Tok::Comma {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.expect(&Tok::RBrace, "'}'")?;
        Ok(Decl::Enum { type_decl, members })
    }

    fn parse_ast_part(&mut self) -> Result<AstPart> {
        let identifier = self.expect_ident()?;
        let alias = if self.peek() == &Tok::Colon {
            self.advance();
            Some(self.expect_ident()?)
        } else {
            None
        };
        Ok(AstPart { identifier, alias })
    }

    fn parse_ast_def(&mut self) -> Result<AstDef> {
        let identifier = match self.peek().clone() {
            Tok::Ident(s) => {
                self.advance();
                Some(s)
            }
            _ => None,
        };
        self.expect(&Tok::LParen, "'('")?;
        let mut parts = Vec::new();
        if self.peek() != &Tok::RParen {
            loop {
                parts.push(self.parse_ast_part()?);
                if self.peek() == &Tok::Comma {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.expect(&Tok::RParen, "')'")?;
        Ok(AstDef { identifier, parts })
    }

    fn parse_ast_decl(&mut self) -> Result<Decl> {
        self.advance(); // ast
        let type_decl = self.parse_type_decl()?;
        self.expect(&Tok::LBrace, "'{'")?;
        let mut defs = Vec::new();
        if self.peek() != &Tok::RBrace {
            loop {
                defs.push(self.parse_ast_def()?);
                if self.peek() == &Tok::Comma {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.expect(&Tok::RBrace, "'}'")?;
        Ok(Decl::Ast { type_decl, defs })
    }

    fn parse_list_decl(&mut self) -> Result<Decl> {
        self.advance(); // list
        let type_decl = self.parse_type_decl()?;
        if self.peek() == &Tok::LBrace {
            self.advance();
            let mut defs = Vec::new();
            if self.peek() != &Tok::RBrace {
                loop {
                    let sep_before = match self.peek().clone() {
                        Tok::Ident(_) if self.is_bare_ident_then_ident() => {
                            Some(self.expect_ident()?)
                        }
                        _ => None,
                    };
                    let inner = self.parse_ast_def()?;
                    let sep_after = if self.peek() == &Tok::Comma || self.peek() == &Tok::RBrace {
                        None
                    } else if let Tok::Ident(_) = self.peek().clone() {
                        Some(self.expect_ident()?)
                    } else {
                        None
                    };
                    defs.push(ListDef { inner, sep_before, sep_after });
                    if self.peek() == &Tok::Comma {
                        self.advance();
                        continue;
                    }
                    break;
                }
            }
            self.expect(&Tok::RBrace, "'}'")?;
            Ok(Decl::List { type_decl, body: ListBody::Expanded(defs) })
        } else {
            let ast_key = self.expect_ident()?;
            let token_sep = self.expect_ident()?;
            Ok(Decl::List { type_decl, body: ListBody::Shorthand { ast_key, token_sep } })
        }
    }

    /// Lookahead used only to decide whether a bare identifier preceding an
    /// AST alternative is a leading separator rather than the alternative's
    /// own name: a separator is followed by another identifier and then '(',
    /// whereas an alternative name is followed directly by '('.
    fn is_bare_ident_then_ident(&self) -> bool {
        matches!(self.toks.get(self.pos + 1).map(|s| &s.tok), Some(Tok::Ident(_)))
    }

    fn parse_start_decl(&mut self) -> Result<Decl> {
        self.advance(); // start
        let identifier = self.expect_ident()?;
        Ok(Decl::Start { identifier })
    }
}
