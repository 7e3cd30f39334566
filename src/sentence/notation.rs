//! Compact disjunct notation.
//!
//! A disjunct is written as `&`-separated connector atoms. Each atom is an
//! optional `@` (multi), an uppercase head with optional lowercase/wildcard
//! suffix, and a direction sign: `+` points right, `-` points left.
//!
//! ```text
//! "S- & O+"        a left S and a right O
//! "@Sa*- & Xc+"    a multi left Sa* and a right Xc
//! ""               the empty disjunct
//! ```
//!
//! Atoms on each side are kept in order of appearance, head first.

use logos::Logos;

use super::builder::BuildError;
use super::connector::ConnectorSpec;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
enum NotationToken {
    #[token("&")]
    Amp,

    #[token("@")]
    At,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[regex(r"[A-Z]+[a-z*^]*")]
    Name,
}

/// Connector specs of one disjunct, split by direction.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ParsedDisjunct {
    pub left: Vec<ConnectorSpec>,
    pub right: Vec<ConnectorSpec>,
}

pub(crate) fn parse_disjunct(expr: &str) -> Result<ParsedDisjunct, BuildError> {
    let mut lexer = NotationToken::lexer(expr);
    let mut parsed = ParsedDisjunct::default();
    let mut first = true;

    loop {
        let Some(token) = next_token(&mut lexer, expr)? else {
            if first {
                return Ok(parsed);
            }
            return Err(BuildError::UnexpectedEnd {
                expr: expr.to_string(),
            });
        };

        // Between atoms, `&` is required except before the first.
        let token = if first {
            first = false;
            token
        } else {
            if token != NotationToken::Amp {
                return Err(unexpected(&lexer, expr));
            }
            match next_token(&mut lexer, expr)? {
                Some(t) => t,
                None => {
                    return Err(BuildError::UnexpectedEnd {
                        expr: expr.to_string(),
                    });
                }
            }
        };

        let (multi, name) = match token {
            NotationToken::At => match next_token(&mut lexer, expr)? {
                Some(NotationToken::Name) => (true, lexer.slice().to_string()),
                _ => return Err(unexpected(&lexer, expr)),
            },
            NotationToken::Name => (false, lexer.slice().to_string()),
            _ => return Err(unexpected(&lexer, expr)),
        };

        let mut spec = ConnectorSpec::new(&name);
        if multi {
            spec = spec.multi();
        }

        match next_token(&mut lexer, expr)? {
            Some(NotationToken::Plus) => parsed.right.push(spec),
            Some(NotationToken::Minus) => parsed.left.push(spec),
            _ => {
                return Err(BuildError::MissingDirection { name });
            }
        }

        // Peek for end of input by looping; `first` is now false.
        if lexer.clone().next().is_none() {
            return Ok(parsed);
        }
    }
}

fn next_token(
    lexer: &mut logos::Lexer<'_, NotationToken>,
    expr: &str,
) -> Result<Option<NotationToken>, BuildError> {
    match lexer.next() {
        None => Ok(None),
        Some(Ok(token)) => Ok(Some(token)),
        Some(Err(())) => Err(unexpected(lexer, expr)),
    }
}

fn unexpected(lexer: &logos::Lexer<'_, NotationToken>, expr: &str) -> BuildError {
    BuildError::UnexpectedToken {
        expr: expr.to_string(),
        found: lexer.slice().to_string(),
    }
}
