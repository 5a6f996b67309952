//! Pattern matchers
//!
//! This module provides the compiled matchers behind the predicate leaves
//! of an expression: shell globs, dialect-translated regexes and entry
//! type sets. Every matcher is compiled once when the expression is parsed.

use glob::{MatchOptions, Pattern};
use regex::{Regex, RegexBuilder};

use super::dialect::RegexDialect;
use super::entry::{EntryKind, VisitedEntry};
use crate::errors::{FindError, FindResult};

/// Trait for compiled entry tests
pub trait FileFilter {
    /// Check if the entry matches the filter
    fn matches(&self, entry: &VisitedEntry) -> bool;

    /// Get the filter description
    fn description(&self) -> String;
}

/// Which projection of the entry a glob is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobTarget {
    /// The basename (`-name`)
    Name,
    /// The full reported path (`-path`, `-wholename`)
    Path,
}

/// Shell-style wildcard matcher
#[derive(Debug, Clone)]
pub struct GlobFilter {
    pattern: Pattern,
    original_pattern: String,
    target: GlobTarget,
    ignore_case: bool,
}

impl GlobFilter {
    /// Create a new case-sensitive GlobFilter
    pub fn new(pattern: &str, target: GlobTarget) -> FindResult<Self> {
        let compiled_pattern = Pattern::new(&to_glob_syntax(pattern))
            .map_err(|e| FindError::PatternCompile {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            pattern: compiled_pattern,
            original_pattern: pattern.to_string(),
            target,
            ignore_case: false,
        })
    }

    /// Create a new case-insensitive GlobFilter
    pub fn new_ignore_case(pattern: &str, target: GlobTarget) -> FindResult<Self> {
        let mut filter = Self::new(pattern, target)?;
        filter.ignore_case = true;
        Ok(filter)
    }

    /// Match a raw string, ignoring the target projection
    pub fn matches_str(&self, text: &str) -> bool {
        // `*` and `?` cross `/` here; a basename holds no separator anyway
        let options = MatchOptions {
            case_sensitive: !self.ignore_case,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };
        self.pattern.matches_with(text, options)
    }
}

impl FileFilter for GlobFilter {
    fn matches(&self, entry: &VisitedEntry) -> bool {
        match self.target {
            GlobTarget::Name => self.matches_str(entry.name()),
            GlobTarget::Path => self.matches_str(&entry.path_str()),
        }
    }

    fn description(&self) -> String {
        let flag = match (self.target, self.ignore_case) {
            (GlobTarget::Name, false) => "-name",
            (GlobTarget::Name, true) => "-iname",
            (GlobTarget::Path, false) => "-path",
            (GlobTarget::Path, true) => "-ipath",
        };
        format!("{} '{}'", flag, self.original_pattern)
    }
}

/// Rewrite fnmatch-style syntax into what `glob::Pattern` accepts.
///
/// `glob` has no backslash escapes, spells negation `[!...]` and gives `**`
/// a meaning of its own, so `\c` becomes `[c]`, `[^` becomes `[!` and runs
/// of `*` collapse to one.
fn to_glob_syntax(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        if in_class {
            out.push(c);
            if c == ']' {
                in_class = false;
            }
            continue;
        }
        match c {
            '\\' => match chars.next() {
                Some(n @ ('*' | '?' | '[' | ']')) => {
                    out.push('[');
                    out.push(n);
                    out.push(']');
                }
                Some(n) => out.push(n),
                None => out.push('\\'),
            },
            '*' => {
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
                out.push('*');
            }
            '[' => {
                in_class = true;
                out.push('[');
                if matches!(chars.peek(), Some('^') | Some('!')) {
                    chars.next();
                    out.push('!');
                }
                // a leading `]` is part of the set
                if chars.peek() == Some(&']') {
                    chars.next();
                    out.push(']');
                }
            }
            c => out.push(c),
        }
    }

    out
}

/// Whole-path regex matcher
#[derive(Debug, Clone)]
pub struct RegexFilter {
    regex: Regex,
    original_pattern: String,
    dialect: RegexDialect,
}

impl RegexFilter {
    /// Compile `pattern` under `dialect`; the match is anchored at both ends.
    pub fn new(pattern: &str, dialect: RegexDialect, ignore_case: bool) -> FindResult<Self> {
        let anchored = format!(r"\A(?:{})\z", dialect.translate(pattern));
        let regex = RegexBuilder::new(&anchored)
            .case_insensitive(ignore_case)
            .build()
            .map_err(|e| FindError::PatternCompile {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            regex,
            original_pattern: pattern.to_string(),
            dialect,
        })
    }

    pub fn dialect(&self) -> RegexDialect {
        self.dialect
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl FileFilter for RegexFilter {
    fn matches(&self, entry: &VisitedEntry) -> bool {
        self.is_match(&entry.path_str())
    }

    fn description(&self) -> String {
        format!("-regex '{}' ({})", self.original_pattern, self.dialect)
    }
}

/// Filter for matching entry types
#[derive(Debug, Clone)]
pub struct TypeFilter {
    kinds: Vec<EntryKind>,
    type_codes: String,
}

impl TypeFilter {
    /// Create a new TypeFilter from a code or a comma-separated list of codes
    pub fn new(type_codes: &str) -> FindResult<Self> {
        let mut kinds = Vec::new();
        for code in type_codes.split(',') {
            let kind = match code {
                "f" => EntryKind::File,
                "d" => EntryKind::Directory,
                "l" => EntryKind::Symlink,
                "p" => EntryKind::Fifo,
                "s" => EntryKind::Socket,
                "b" => EntryKind::BlockDevice,
                "c" => EntryKind::CharDevice,
                _ => return Err(FindError::InvalidTypeCode(code.to_string())),
            };
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }

        Ok(Self {
            kinds,
            type_codes: type_codes.to_string(),
        })
    }
}

impl FileFilter for TypeFilter {
    fn matches(&self, entry: &VisitedEntry) -> bool {
        self.kinds.contains(&entry.kind())
    }

    fn description(&self) -> String {
        format!("-type {}", self.type_codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> VisitedEntry {
        let name = path.rsplit('/').next().unwrap_or(path);
        VisitedEntry::new(path, name, EntryKind::File, 1)
    }

    fn dir(path: &str) -> VisitedEntry {
        let name = path.rsplit('/').next().unwrap_or(path);
        VisitedEntry::new(path, name, EntryKind::Directory, 1)
    }

    #[test]
    fn test_name_filter() -> FindResult<()> {
        let filter = GlobFilter::new("file?.txt", GlobTarget::Name)?;
        assert!(filter.matches(&file("./file1.txt")));
        assert!(!filter.matches(&file("./file10.txt")));
        assert!(!filter.matches(&file("./dir1/dirfile1-1.txt")));

        let filter = GlobFilter::new("*.rs", GlobTarget::Name)?;
        assert!(!filter.matches(&file("./file1.txt")));

        Ok(())
    }

    #[test]
    fn test_name_filter_case_insensitive() -> FindResult<()> {
        let entry = file("./Test.TXT");

        let filter = GlobFilter::new("*.txt", GlobTarget::Name)?;
        assert!(!filter.matches(&entry));

        let filter = GlobFilter::new_ignore_case("*.txt", GlobTarget::Name)?;
        assert!(filter.matches(&entry));

        Ok(())
    }

    #[test]
    fn test_path_filter_crosses_separators() -> FindResult<()> {
        let filter = GlobFilter::new("*/dir1/*.txt", GlobTarget::Path)?;
        assert!(filter.matches(&file("./dir1/dirfile1-1.txt")));
        assert!(!filter.matches(&file("./dir2/dirfile2-1.txt")));

        let filter = GlobFilter::new("./*", GlobTarget::Path)?;
        assert!(filter.matches(&file("./dir1/dirfile1-1.txt")));

        Ok(())
    }

    #[test]
    fn test_glob_syntax_translation() -> FindResult<()> {
        assert_eq!(to_glob_syntax(r"\*.txt"), "[*].txt");
        assert_eq!(to_glob_syntax("[^a]b"), "[!a]b");
        assert_eq!(to_glob_syntax("a**b"), "a*b");
        assert_eq!(to_glob_syntax("[]x]"), "[]x]");

        let filter = GlobFilter::new(r"\*.txt", GlobTarget::Name)?;
        assert!(filter.matches(&file("./*.txt")));
        assert!(!filter.matches(&file("./a.txt")));

        let filter = GlobFilter::new("[^f]*", GlobTarget::Name)?;
        assert!(filter.matches(&dir("./dir1")));
        assert!(!filter.matches(&file("./file1.txt")));

        Ok(())
    }

    #[test]
    fn test_invalid_glob() {
        let result = GlobFilter::new("[", GlobTarget::Name);
        assert!(matches!(result, Err(FindError::PatternCompile { .. })));
    }

    #[test]
    fn test_regex_filter_is_anchored() -> FindResult<()> {
        let filter = RegexFilter::new("file", RegexDialect::Extended, false)?;
        assert!(!filter.matches(&file("./file1.txt")));

        let filter = RegexFilter::new(".*file[0-9].txt", RegexDialect::Extended, false)?;
        assert!(filter.matches(&file("./file1.txt")));

        Ok(())
    }

    #[test]
    fn test_regex_dialects_agree() -> FindResult<()> {
        let sed = RegexFilter::new(r".*[/]\([f-i]\+\)le[1-3].txt", RegexDialect::Basic, false)?;
        let egrep = RegexFilter::new(r".*[/]([f-i]+)le[1-3].txt", RegexDialect::Extended, false)?;
        let py = RegexFilter::new(r".*[/]([f-i]+)le[1-3].txt", RegexDialect::Python, false)?;

        for path in ["./file1.txt", "./file3.txt"] {
            assert!(sed.matches(&file(path)));
            assert!(egrep.matches(&file(path)));
            assert!(py.matches(&file(path)));
        }
        for path in ["./file4.txt", "./dir1/dirfile1-1.txt"] {
            assert!(!sed.matches(&file(path)));
            assert!(!egrep.matches(&file(path)));
            assert!(!py.matches(&file(path)));
        }

        Ok(())
    }

    #[test]
    fn test_regex_ignore_case() -> FindResult<()> {
        let filter = RegexFilter::new(".*FILE1.TXT", RegexDialect::Basic, true)?;
        assert!(filter.matches(&file("./file1.txt")));
        Ok(())
    }

    #[test]
    fn test_invalid_regex() {
        let result = RegexFilter::new("a(b", RegexDialect::Extended, false);
        assert!(matches!(result, Err(FindError::PatternCompile { .. })));

        // backreferences are not supported by the regex engine
        let result = RegexFilter::new(r"\(a\)\1", RegexDialect::Basic, false);
        assert!(matches!(result, Err(FindError::PatternCompile { .. })));
    }

    #[test]
    fn test_type_filter() -> FindResult<()> {
        let file_filter = TypeFilter::new("f")?;
        assert!(file_filter.matches(&file("./a")));
        assert!(!file_filter.matches(&dir("./b")));

        let dir_filter = TypeFilter::new("d")?;
        assert!(!dir_filter.matches(&file("./a")));
        assert!(dir_filter.matches(&dir("./b")));

        let either = TypeFilter::new("f,d")?;
        assert!(either.matches(&file("./a")));
        assert!(either.matches(&dir("./b")));
        assert_eq!(either.description(), "-type f,d");

        Ok(())
    }

    #[test]
    fn test_invalid_type_code() {
        assert!(matches!(
            TypeFilter::new("x"),
            Err(FindError::InvalidTypeCode(code)) if code == "x"
        ));
        assert!(matches!(TypeFilter::new(""), Err(FindError::InvalidTypeCode(_))));
    }
}
