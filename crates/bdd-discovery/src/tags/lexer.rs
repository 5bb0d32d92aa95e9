//! Splits tag expressions into tokens.
//!
//! A tag starts with `@` and runs until whitespace or a parenthesis. A
//! backslash escapes the following character, so `@a\(b\)` names the tag
//! `@a(b)`. Keywords are case-insensitive.

use std::iter::Peekable;
use std::str::CharIndices;

use super::ast::TagExprError;

/// A token and the byte offset it starts at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Token {
    pub(super) kind: TokenKind,
    pub(super) offset: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum TokenKind {
    Tag(String),
    And,
    Or,
    Not,
    Open,
    Close,
    End,
}

impl TokenKind {
    /// How the token reads in error messages.
    pub(super) fn label(&self) -> String {
        let text = match self {
            Self::Tag(tag) => return tag.clone(),
            Self::And => "'and'",
            Self::Or => "'or'",
            Self::Not => "'not'",
            Self::Open => "'('",
            Self::Close => "')'",
            Self::End => "<end>",
        };
        text.to_string()
    }
}

/// Tokenise `input`, always finishing with a [`TokenKind::End`] token.
pub(super) fn tokenize(input: &str) -> Result<Vec<Token>, TagExprError> {
    let mut chars = input.char_indices().peekable();
    let mut tokens = Vec::new();
    while let Some(&(offset, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        let kind = match ch {
            '(' => {
                chars.next();
                TokenKind::Open
            }
            ')' => {
                chars.next();
                TokenKind::Close
            }
            '@' => {
                chars.next();
                read_tag(&mut chars, offset)?
            }
            c if c.is_alphabetic() => read_keyword(&mut chars, input, offset)?,
            other => {
                return Err(TagExprError::new(
                    offset,
                    format!("unexpected character '{other}'"),
                ));
            }
        };
        tokens.push(Token { kind, offset });
    }
    tokens.push(Token {
        kind: TokenKind::End,
        offset: input.len(),
    });
    Ok(tokens)
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || ch == '(' || ch == ')'
}

fn read_tag(chars: &mut Peekable<CharIndices<'_>>, at: usize) -> Result<TokenKind, TagExprError> {
    let mut name = String::new();
    while let Some((offset, ch)) = chars.next_if(|&(_, ch)| !is_delimiter(ch)) {
        if ch != '\\' {
            name.push(ch);
            continue;
        }
        let Some((_, escaped)) = chars.next() else {
            return Err(TagExprError::new(
                offset + 1,
                "expected character after '\\'",
            ));
        };
        name.push(escaped);
    }
    if name.is_empty() {
        return Err(TagExprError::new(at + 1, "expected tag name after '@'"));
    }
    Ok(TokenKind::Tag(format!("@{name}")))
}

fn read_keyword(
    chars: &mut Peekable<CharIndices<'_>>,
    input: &str,
    at: usize,
) -> Result<TokenKind, TagExprError> {
    let mut end = at;
    while let Some((offset, ch)) = chars.next_if(|&(_, ch)| !is_delimiter(ch)) {
        end = offset + ch.len_utf8();
    }
    let word = input.get(at..end).unwrap_or_default();
    if word.eq_ignore_ascii_case("and") {
        Ok(TokenKind::And)
    } else if word.eq_ignore_ascii_case("or") {
        Ok(TokenKind::Or)
    } else if word.eq_ignore_ascii_case("not") {
        Ok(TokenKind::Not)
    } else {
        Err(TagExprError::new(
            at,
            format!("unexpected identifier '{word}'"),
        ))
    }
}
