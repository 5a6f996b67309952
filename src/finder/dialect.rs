//! Regex dialects
//!
//! `-regex` patterns are written in one of several dialects and rewritten
//! into the syntax of the `regex` crate before compiling. The dialects
//! differ mainly in whether grouping, alternation and repetition
//! operators need a backslash.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::errors::{FindError, FindResult};

/// Regex syntax families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegexDialect {
    /// `\(` `\)` `\|` `\+` `\?` `\{` `\}` are operators, the bare characters are literals
    #[default]
    Basic,
    /// `(` `)` `|` `+` `?` `{` `}` are operators, escaped forms are literals
    Extended,
    /// Python `re` syntax, close enough to the `regex` crate to pass through
    Python,
}

/// Dialect names accepted by `-regextype`
pub const DIALECTS: &[(&str, RegexDialect)] = &[
    ("findutils-default", RegexDialect::Basic),
    ("posix", RegexDialect::Basic),
    ("posix-basic", RegexDialect::Basic),
    ("sed", RegexDialect::Basic),
    ("grep", RegexDialect::Basic),
    ("posix-extended", RegexDialect::Extended),
    ("posix-egrep", RegexDialect::Extended),
    ("egrep", RegexDialect::Extended),
    ("awk", RegexDialect::Extended),
    ("posix-awk", RegexDialect::Extended),
    ("py", RegexDialect::Python),
];

impl RegexDialect {
    /// Look up a dialect by its `-regextype` name
    pub fn from_name(name: &str) -> FindResult<Self> {
        DIALECTS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, d)| *d)
            .ok_or_else(|| FindError::InvalidDialect(name.to_string()))
    }

    /// Rewrite `pattern` into `regex` crate syntax.
    ///
    /// Invalid input is not rejected here; it yields a pattern the regex
    /// compiler refuses.
    pub fn translate(&self, pattern: &str) -> String {
        match self {
            RegexDialect::Python => pattern.to_string(),
            RegexDialect::Basic | RegexDialect::Extended => self.translate_posix(pattern),
        }
    }

    fn translate_posix(&self, pattern: &str) -> String {
        let mut out = String::with_capacity(pattern.len() + 8);
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('<') | Some('>') => out.push_str(r"\b"),
                    Some(n) if is_operator(n) => {
                        if *self == RegexDialect::Basic {
                            out.push(n);
                        } else {
                            push_literal(&mut out, n);
                        }
                    }
                    Some(n) if n.is_ascii_alphanumeric() => {
                        out.push('\\');
                        out.push(n);
                    }
                    Some(n) => push_literal(&mut out, n),
                    None => out.push_str(r"\\"),
                },
                '[' => translate_bracket(&mut chars, &mut out),
                c if is_operator(c) && *self == RegexDialect::Basic => push_literal(&mut out, c),
                c => out.push(c),
            }
        }

        out
    }
}

impl fmt::Display for RegexDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegexDialect::Basic => "posix-basic",
            RegexDialect::Extended => "posix-extended",
            RegexDialect::Python => "py",
        };
        f.write_str(name)
    }
}

fn is_operator(c: char) -> bool {
    matches!(c, '(' | ')' | '|' | '+' | '?' | '{' | '}')
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

/// Copy a POSIX bracket expression (the `[` is already consumed).
///
/// Backslash is literal inside POSIX brackets, and `[`, `&`, `~` and a
/// doubled `-` would be read as nesting or set operators by the `regex`
/// crate, so those get escaped.
fn translate_bracket(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    out.push('[');
    if chars.peek() == Some(&'^') {
        chars.next();
        out.push('^');
    }
    if chars.peek() == Some(&']') {
        chars.next();
        out.push_str(r"\]");
    }

    let mut prev_dash = false;
    while let Some(c) = chars.next() {
        match c {
            ']' => {
                out.push(']');
                return;
            }
            '[' if chars.peek() == Some(&':') => {
                out.push('[');
                for class_char in chars.by_ref() {
                    out.push(class_char);
                    if class_char == ']' {
                        break;
                    }
                }
            }
            '[' | '\\' | '&' | '~' => {
                out.push('\\');
                out.push(c);
            }
            '-' if prev_dash => out.push_str(r"\-"),
            c => out.push(c),
        }
        prev_dash = c == '-';
    }
}
