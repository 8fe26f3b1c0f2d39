//! Markup tokenizer.
//!
//! # Syntax
//! Style commands are bracketed tags wrapping the text they affect,
//! optionally with an `=` argument:
//!
//! `a plain [b]bold[/b] word`
//!
//! `[color=#ff0000]red [size=32]and big[/size][/color]`
//!
//! Line breaks are explicit `\n` characters; there is no automatic
//! wrapping. A `[` that does not form a valid tag is literal text.

use logos::Logos;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Logos)]
enum RawToken {
    #[token("\n")]
    Newline,

    #[regex(r"\[/[a-zA-Z0-9]+\]")]
    CloseTag,

    #[regex(r"\[[a-zA-Z0-9]+(=[^\]\n]*)?\]")]
    OpenTag,

    #[regex(r"[^\[\n]+")]
    Text,

    #[error]
    Error,
}

/// One token of markup, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of literal text.
    Text(String),
    /// An opening style command, e.g. `[b]` or `[color=#ff0000]`.
    Open {
        name: String,
        argument: Option<String>,
    },
    /// A closing style command, e.g. `[/b]`.
    Close { name: String },
    /// An explicit line break.
    Newline,
}

/// Tokenizes a markup string left to right.
///
/// Tokenizing never fails; malformed brackets degrade to literal text.
/// Tag matching is checked later by the layout engine.
pub fn tokenize(markup: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for (raw, span) in RawToken::lexer(markup).spanned() {
        let slice = &markup[span];
        match raw {
            RawToken::Newline => tokens.push(Token::Newline),
            RawToken::OpenTag => {
                let inner = &slice[1..slice.len() - 1];
                let (name, argument) = match inner.split_once('=') {
                    Some((name, arg)) => (name, Some(arg.to_owned())),
                    None => (inner, None),
                };
                tokens.push(Token::Open {
                    name: name.to_owned(),
                    argument,
                });
            }
            RawToken::CloseTag => tokens.push(Token::Close {
                name: slice[2..slice.len() - 1].to_owned(),
            }),
            RawToken::Text | RawToken::Error => push_text(&mut tokens, slice),
        }
    }

    tokens
}

/// Appends a text run, merging with a preceding run so that stray
/// brackets don't fragment the output.
fn push_text(tokens: &mut Vec<Token>, slice: &str) {
    if let Some(Token::Text(text)) = tokens.last_mut() {
        text.push_str(slice);
    } else {
        tokens.push(Token::Text(slice.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Token {
        Token::Text(s.to_owned())
    }

    fn open(name: &str, argument: Option<&str>) -> Token {
        Token::Open {
            name: name.to_owned(),
            argument: argument.map(str::to_owned),
        }
    }

    fn close(name: &str) -> Token {
        Token::Close {
            name: name.to_owned(),
        }
    }

    #[test]
    fn plain() {
        assert_eq!(tokenize(" basic text  "), vec![text(" basic text  ")]);
    }

    #[test]
    fn simple_pair() {
        assert_eq!(
            tokenize("a plain [b]bold[/b] word"),
            vec![
                text("a plain "),
                open("b", None),
                text("bold"),
                close("b"),
                text(" word"),
            ]
        );
    }

    #[test]
    fn arguments() {
        assert_eq!(
            tokenize("[color=#ff0000]red[/color]"),
            vec![open("color", Some("#ff0000")), text("red"), close("color")]
        );
        assert_eq!(
            tokenize("[size=32][/size]"),
            vec![open("size", Some("32")), close("size")]
        );
    }

    #[test]
    fn newlines() {
        assert_eq!(
            tokenize("one\ntwo\n"),
            vec![text("one"), Token::Newline, text("two"), Token::Newline]
        );
    }

    #[test]
    fn nested() {
        assert_eq!(
            tokenize("[b][i]x[/i][/b]"),
            vec![open("b", None), open("i", None), text("x"), close("i"), close("b")]
        );
    }

    #[test]
    fn stray_brackets_are_text() {
        assert_eq!(tokenize("a [ b"), vec![text("a [ b")]);
        assert_eq!(tokenize("profit [100%]"), vec![text("profit [100%]")]);
    }
}
