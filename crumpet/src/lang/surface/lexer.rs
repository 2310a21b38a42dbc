use logos::Logos;
use std::fmt;

use crate::reporting::LexerError;

/// Tokens in the surface language.
#[derive(Debug, Clone, Logos)]
pub enum Token<'a> {
    #[regex(r"[a-z]+")]
    Name(&'a str),

    #[token("fn")]
    Fn,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    #[error]
    #[regex(r"\p{Whitespace}", logos::skip)]
    #[regex(r"--(.*)\n", logos::skip)]
    Error,
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Name(s) => write!(f, "{}", s),

            Token::Fn => write!(f, "fn"),

            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),

            Token::Error => write!(f, "<error>"),
        }
    }
}

pub type Spanned<Tok, Loc, Error> = Result<(Loc, Tok, Loc), Error>;

pub fn tokens<'a>(
    source: &'a str,
) -> impl 'a + Iterator<Item = Spanned<Token<'a>, usize, LexerError>> {
    Token::lexer(source)
        .spanned()
        .map(|(token, range)| match token {
            Token::Error => Err(LexerError::InvalidToken { range }),
            token => Ok((range.start, token, range.end)),
        })
}

#[test]
fn behavior_after_error() {
    let starts_with_invalid = "@x";
    // [Err(...), Ok(Token::Name)]
    let from_lex: Vec<_> = tokens(starts_with_invalid).collect();
    let result: Vec<_> = from_lex.iter().map(Result::is_ok).collect();
    assert_eq!(result, vec![false, true]);
}

#[test]
fn keywords_do_not_swallow_names() {
    let from_lex: Vec<_> = tokens("fn fnord").map(Result::unwrap).collect();
    assert!(matches!(from_lex[0].1, Token::Fn));
    assert!(matches!(from_lex[1].1, Token::Name("fnord")));
}
