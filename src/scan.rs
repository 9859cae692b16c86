//! Escape-aware single pass over a format mask.
//!
//! The scanner knows nothing about dates. It walks the mask once, tracks whether
//! the previous character was the escape character, and hands token positions to
//! a caller-supplied resolver that decides what to emit.
//!
//! ```
//! use dafo::scan::{Replacement, scan};
//!
//! let out = scan("--%Y%M%D--", '%', |mask: &str, cursor: usize| {
//!     let c = mask[cursor..].chars().next()?;
//!     "YMD".contains(c).then(|| Replacement::from(c.to_ascii_lowercase().to_string()))
//! });
//! assert_eq!(out, "--ymd--");
//! ```

use crate::consts::MAX_ALIAS_DEPTH;
use crate::prelude::*;

/// Text emitted for a resolved token and how many bytes of the mask it covers.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub struct Replacement {
    pub text:     String,
    /// Bytes of the mask consumed, starting at the cursor. Always at least one character.
    pub consumed: usize,
}

impl From<String> for Replacement {
    /// A single-character token.
    fn from(text: String) -> Self {
        Self { text, consumed: 1 }
    }
}

impl From<&str> for Replacement {
    fn from(text: &str) -> Self {
        Self::from(text.to_owned())
    }
}

/// Which mask positions are offered to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Only the position right after an escape character (`%Y` style). A declined
    /// position is copied without its escape character.
    Escaped,
    /// Every position that is not escaped (`Y` style); an escape character makes
    /// the following character literal.
    Unescaped,
}

/// Scans `mask`, resolving the character after each `escape` (`%Y` style).
///
/// The resolver receives the whole mask and the byte offset of the escaped
/// character. Returning `None` copies that character literally, so `%%` yields
/// `%` and `%q` yields `q`. A trailing lone escape character is dropped.
pub fn scan<F>(mask: &str, escape: char, resolve: F) -> String
where
    F: FnMut(&str, usize) -> Option<Replacement>,
{
    scan_with(mask, escape, Trigger::Escaped, resolve)
}

/// Scans `mask` offering the positions selected by `trigger` to `resolve`.
pub fn scan_with<F>(mask: &str, escape: char, trigger: Trigger, mut resolve: F) -> String
where
    F: FnMut(&str, usize) -> Option<Replacement>,
{
    let mut output = String::with_capacity(mask.len());
    let mut cursor = 0;
    let mut escaped = false;

    while let Some(c) = mask[cursor..].chars().next() {
        let is_token = match trigger {
            Trigger::Escaped => escaped,
            Trigger::Unescaped => !escaped && c != escape,
        };

        if is_token {
            escaped = false;
            match resolve(mask, cursor) {
                Some(replacement) => {
                    output.push_str(&replacement.text);
                    cursor = advance(mask, cursor, replacement.consumed);
                },
                None => {
                    output.push(c);
                    cursor += c.len_utf8();
                },
            }
        } else if escaped {
            escaped = false;
            output.push(c);
            cursor += c.len_utf8();
        } else if c == escape {
            escaped = true;
            cursor += c.len_utf8();
        } else {
            output.push(c);
            cursor += c.len_utf8();
        }
    }

    output
}

/// Entry of a single-character token table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<R> {
    /// Rendered directly.
    Render(R),
    /// Rendered as whatever the named token renders to.
    Alias(char),
}

/// Follows aliases from `token` through `table` until a renderer is found.
///
/// Returns `None` for characters the table does not know and for alias chains
/// longer than [`MAX_ALIAS_DEPTH`] hops, which covers self-referential tables.
pub fn resolve_alias<R, T>(token: char, table: T) -> Option<R>
where
    T: Fn(char) -> Option<Token<R>>,
{
    let mut current = token;
    for _ in 0..=MAX_ALIAS_DEPTH {
        match table(current)? {
            Token::Render(render) => return Some(render),
            Token::Alias(next) => current = next,
        }
    }
    log::warn!("Token '{token}' exceeds {MAX_ALIAS_DEPTH} alias hops, treated as unknown");
    None
}

/// Moves past `consumed` bytes, at least one character, landing on a character boundary.
fn advance(mask: &str, cursor: usize, consumed: usize) -> usize {
    let mut next = (cursor + consumed.max(1)).min(mask.len());
    while !mask.is_char_boundary(next) {
        next += 1;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower_ymd(mask: &str, cursor: usize) -> Option<Replacement> {
        let c = mask[cursor..].chars().next()?;
        ['Y', 'M', 'D']
            .contains(&c)
            .then(|| Replacement::from(c.to_ascii_lowercase().to_string()))
    }

    #[test]
    fn test_basic() {
        assert_eq!(scan("--%Y%M%D--", '%', lower_ymd), "--ymd--");
    }

    #[test]
    fn test_empty() {
        assert_eq!(scan("", '%', |_: &str, _: usize| None), "");
    }

    #[test]
    fn test_declined_escapes_drop_escape_char() {
        assert_eq!(scan("%Y%M%D", '%', |_: &str, _: usize| None), "YMD");
    }

    #[test]
    fn test_escape_sequence_made_of_escape_chars() {
        assert_eq!(scan("%Y%%M%D", '%', lower_ymd), "y%Md");
    }

    #[test]
    fn test_trailing_escape_is_dropped() {
        assert_eq!(scan("abc%", '%', lower_ymd), "abc");
    }

    #[test]
    fn test_multi_character_tokens() {
        let fields = [("year", "1997"), ("month", "7"), ("date", "1")];
        let out = scan("%year/%month/%date", '%', |mask: &str, cursor: usize| {
            fields.iter().find_map(|(name, value)| {
                mask[cursor..]
                    .starts_with(name)
                    .then(|| Replacement::from(((*value).to_owned(), name.len())))
            })
        });
        assert_eq!(out, "1997/7/1");
    }

    #[test]
    fn test_zero_consumed_still_advances() {
        let out = scan("%Y!", '%', |_: &str, _: usize| Some(Replacement::from((String::from("x"), 0))));
        assert_eq!(out, "x!");
    }

    #[test]
    fn test_multibyte_literals() {
        assert_eq!(scan("年%Y月%é", '%', lower_ymd), "年y月é");
    }

    #[test]
    fn test_unescaped_trigger() {
        let out = scan_with("Y-\\Y-M\\\\", '\\', Trigger::Unescaped, lower_ymd);
        assert_eq!(out, "y-Y-m\\");
    }

    #[test]
    fn test_resolve_alias() {
        let table = |c: char| match c {
            'S' => Some(Token::Render(2)),
            's' => Some(Token::Alias('S')),
            'x' => Some(Token::Alias('s')),
            _ => None,
        };
        assert_eq!(resolve_alias('S', table), Some(2));
        assert_eq!(resolve_alias('s', table), Some(2));
        assert_eq!(resolve_alias('x', table), Some(2));
        assert_eq!(resolve_alias('q', table), None);
    }

    #[test]
    fn test_resolve_alias_depth_limit() {
        let cycle = |c: char| match c {
            'a' => Some(Token::<u8>::Alias('b')),
            'b' => Some(Token::Alias('a')),
            'z' => Some(Token::Alias('z')),
            _ => None,
        };
        assert_eq!(resolve_alias('a', cycle), None);
        assert_eq!(resolve_alias('z', cycle), None);

        // Four hops resolve, five do not
        let chain = |c: char| match c {
            '0' => Some(Token::Render("end")),
            '1'..='9' => Some(Token::Alias(char::from(c as u8 - 1))),
            _ => None,
        };
        assert_eq!(resolve_alias('4', chain), Some("end"));
        assert_eq!(resolve_alias('5', chain), None);
    }

    #[test]
    fn test_unescaped_trigger_passes_unknown_through() {
        let out = scan_with("Q Y", '\\', Trigger::Unescaped, lower_ymd);
        assert_eq!(out, "Q y");
    }
}
