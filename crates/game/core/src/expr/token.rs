//! Tokenizer for pool formulas and conditions.

use super::ExprError;

/// A lexical token with its byte offset in the source text.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Number(f64),
    /// `@a.b.c` reference, stored as its dotted segments.
    Reference(Vec<String>),
    /// Bare identifier, possibly dotted (`min`, `Math.floor`, `true`).
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
    Bang,
    Gt,
    Ge,
    Lt,
    Le,
    EqEq,
    NotEq,
    AndAnd,
    OrOr,
}

impl TokenKind {
    /// Short text used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Reference(path) => format!("@{}", path.join(".")),
            Self::Ident(name) => name.clone(),
            Self::Plus => "+".into(),
            Self::Minus => "-".into(),
            Self::Star => "*".into(),
            Self::Slash => "/".into(),
            Self::LParen => "(".into(),
            Self::RParen => ")".into(),
            Self::Comma => ",".into(),
            Self::Bang => "!".into(),
            Self::Gt => ">".into(),
            Self::Ge => ">=".into(),
            Self::Lt => "<".into(),
            Self::Le => "<=".into(),
            Self::EqEq => "==".into(),
            Self::NotEq => "!=".into(),
            Self::AndAnd => "&&".into(),
            Self::OrOr => "||".into(),
        }
    }
}

/// Splits source text into tokens.
///
/// Anything outside the grammar (`;`, quotes, brackets, assignment) is
/// rejected here, before a parser ever sees it.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ExprError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let ch = bytes[pos];
        let start = pos;

        if ch.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let kind = match ch {
            b'0'..=b'9' | b'.' => {
                pos = scan_number(bytes, pos);
                let text = &source[start..pos];
                let value = text
                    .parse::<f64>()
                    .map_err(|_| ExprError::InvalidNumber(text.to_string()))?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    offset: start,
                });
                continue;
            }
            b'@' => {
                pos += 1;
                let end = scan_path(bytes, pos);
                if end == pos {
                    return Err(ExprError::UnexpectedChar { ch: '@', offset: start });
                }
                let path = source[pos..end].split('.').map(str::to_string).collect();
                pos = end;
                tokens.push(Token {
                    kind: TokenKind::Reference(path),
                    offset: start,
                });
                continue;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                pos = scan_path(bytes, pos);
                tokens.push(Token {
                    kind: TokenKind::Ident(source[start..pos].to_string()),
                    offset: start,
                });
                continue;
            }
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            b'>' if next_is(bytes, pos, b'=') => {
                pos += 1;
                TokenKind::Ge
            }
            b'>' => TokenKind::Gt,
            b'<' if next_is(bytes, pos, b'=') => {
                pos += 1;
                TokenKind::Le
            }
            b'<' => TokenKind::Lt,
            b'=' if next_is(bytes, pos, b'=') => {
                pos += 1;
                // `===` is accepted as a spelling of `==`.
                if next_is(bytes, pos, b'=') {
                    pos += 1;
                }
                TokenKind::EqEq
            }
            b'!' if next_is(bytes, pos, b'=') => {
                pos += 1;
                if next_is(bytes, pos, b'=') {
                    pos += 1;
                }
                TokenKind::NotEq
            }
            b'!' => TokenKind::Bang,
            b'&' if next_is(bytes, pos, b'&') => {
                pos += 1;
                TokenKind::AndAnd
            }
            b'|' if next_is(bytes, pos, b'|') => {
                pos += 1;
                TokenKind::OrOr
            }
            _ => {
                let ch = source[start..].chars().next().unwrap_or('?');
                return Err(ExprError::UnexpectedChar { ch, offset: start });
            }
        };

        pos += 1;
        tokens.push(Token { kind, offset: start });
    }

    Ok(tokens)
}

fn next_is(bytes: &[u8], pos: usize, expected: u8) -> bool {
    bytes.get(pos + 1) == Some(&expected)
}

fn scan_number(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
        pos += 1;
    }
    pos
}

/// Scans `ident(.ident)*` and returns the end offset.
fn scan_path(bytes: &[u8], mut pos: usize) -> usize {
    let is_ident = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    while pos < bytes.len() {
        if is_ident(bytes[pos]) {
            pos += 1;
        } else if bytes[pos] == b'.' && bytes.get(pos + 1).is_some_and(|b| is_ident(*b)) {
            pos += 1;
        } else {
            break;
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn tokenizes_references_and_operators() {
        assert_eq!(
            kinds("@level + @stats.cha.mod >= 2"),
            vec![
                TokenKind::Reference(vec!["level".into()]),
                TokenKind::Plus,
                TokenKind::Reference(vec!["stats".into(), "cha".into(), "mod".into()]),
                TokenKind::Ge,
                TokenKind::Number(2.0),
            ]
        );
    }

    #[test]
    fn dotted_function_names_stay_one_identifier() {
        assert_eq!(
            kinds("Math.floor(1.5)"),
            vec![
                TokenKind::Ident("Math.floor".into()),
                TokenKind::LParen,
                TokenKind::Number(1.5),
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn strict_equality_spellings_are_accepted() {
        assert_eq!(kinds("1 === 1"), kinds("1 == 1"));
        assert_eq!(kinds("1 !== 2"), kinds("1 != 2"));
    }

    #[test]
    fn rejects_statement_separators() {
        let err = tokenize("1; DROP TABLE").unwrap_err();
        assert_eq!(err, ExprError::UnexpectedChar { ch: ';', offset: 1 });
    }

    #[test]
    fn rejects_single_ampersand_and_assignment() {
        assert!(tokenize("1 & 2").is_err());
        assert!(tokenize("a = 2").is_err());
    }

    #[test]
    fn malformed_number_is_an_error() {
        assert_eq!(
            tokenize("1.2.3").unwrap_err(),
            ExprError::InvalidNumber("1.2.3".into())
        );
    }
}
