//! The surface language.
//!
//! This is the concrete syntax that users type: parenthesized lambda
//! terms in the style of `((fn x x) (fn y y))`.

use crate::lang::Located;
use crate::reporting::LexerError;

mod lexer;

#[allow(clippy::all, unused_parens)]
mod grammar {
    include!(concat!(env!("OUT_DIR"), "/lang/surface/grammar.rs"));
}

pub type Term<S> = Located<TermData<S>>;

/// Terms in the surface language.
#[derive(Debug, Clone)]
pub enum TermData<S> {
    /// Names.
    Name(S),
    /// Function terms (lambda abstractions).
    FunctionTerm(Located<S>, Box<Term<S>>),
    /// Function eliminations (function application).
    FunctionElim(Box<Term<S>>, Box<Term<S>>),
    /// Error sentinel.
    Error,
}

type ParseError<'input> = lalrpop_util::ParseError<usize, lexer::Token<'input>, LexerError>;

impl<'input> Term<&'input str> {
    /// Parse a term from an input string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'input str) -> Result<Term<&'input str>, ParseError<'input>> {
        let tokens = lexer::tokens(input);
        grammar::TermParser::new().parse(tokens)
    }
}
