//! Path pattern compilation and matching.

use regex::Regex;

use crate::error::{PatternError, Result};
use crate::params::PathParams;

/// A compiled path pattern for matching URLs.
#[derive(Debug, Clone)]
pub struct PathPattern {
    /// The original pattern string.
    pattern: String,
    /// Compiled regex for matching.
    regex: Regex,
    /// Variable names in order of appearance.
    variables: Vec<String>,
}

impl PathPattern {
    /// Compiles a path pattern string.
    ///
    /// Pattern syntax:
    /// - `/users` - Literal path, matched case-sensitively
    /// - `/users/{id}` - Variable matching one segment
    /// - `/users/{id:\d+}` - Variable with a custom regex
    /// - `/users/:id` - Shorthand for `{id}` at the start of a segment
    /// - `/files/{*path}` - Wildcard variable (matches rest of path)
    /// - `/posts[/{page}]` - Optional trailing part, may nest
    ///
    /// # Example
    ///
    /// ```
    /// use switchyard_match::PathPattern;
    ///
    /// let pattern = PathPattern::new("/posts/{id}/comments[/{comment_id}]").unwrap();
    /// let params = pattern.match_path("/posts/123/comments/456").unwrap();
    /// assert_eq!(params.get("id"), Some("123"));
    /// assert_eq!(params.get("comment_id"), Some("456"));
    /// assert!(pattern.match_path("/posts/123/comments").is_some());
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        let mut compiler = Compiler::new(pattern);
        compiler.run()?;

        let regex = Regex::new(&compiler.regex).map_err(|source| PatternError::Regex {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            variables: compiler.variables,
        })
    }

    /// Attempts to match a path against this pattern.
    ///
    /// Returns extracted parameters if the path matches. Variables inside
    /// an optional part that did not participate are absent.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let caps = self.regex.captures(path)?;

        let mut params = PathParams::new();
        for name in &self.variables {
            if let Some(value) = caps.name(name) {
                params.insert(name.clone(), value.as_str());
            }
        }

        Some(params)
    }

    /// Returns the original pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the variable names.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

/// Single pass translating pattern syntax into an anchored regex.
struct Compiler<'p> {
    pattern: &'p str,
    regex: String,
    variables: Vec<String>,
    open_optionals: usize,
    closed_optional: bool,
}

impl<'p> Compiler<'p> {
    fn new(pattern: &'p str) -> Self {
        Self {
            pattern,
            regex: String::from("^"),
            variables: Vec::new(),
            open_optionals: 0,
            closed_optional: false,
        }
    }

    fn run(&mut self) -> Result<()> {
        let bytes = self.pattern.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() {
            let c = bytes[pos];
            if self.closed_optional && c != b']' {
                return Err(PatternError::OptionalNotTrailing {
                    pattern: self.pattern.to_string(),
                });
            }

            match c {
                b'[' => {
                    if bytes.get(pos + 1) == Some(&b']') {
                        return Err(PatternError::EmptyOptional {
                            pattern: self.pattern.to_string(),
                        });
                    }
                    self.open_optionals += 1;
                    self.regex.push_str("(?:");
                    pos += 1;
                }
                b']' => {
                    if self.open_optionals == 0 {
                        return Err(self.unbalanced());
                    }
                    self.open_optionals -= 1;
                    self.closed_optional = true;
                    self.regex.push_str(")?");
                    pos += 1;
                }
                b'{' => pos = self.braced_variable(pos)?,
                b':' if pos == 0 || bytes[pos - 1] == b'/' => pos = self.colon_variable(pos)?,
                _ => {
                    // Advance a whole UTF-8 character so multi-byte literals stay intact.
                    let ch = self.pattern[pos..].chars().next().unwrap_or_default();
                    self.regex.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4])));
                    pos += ch.len_utf8();
                }
            }
        }

        if self.open_optionals != 0 {
            return Err(self.unbalanced());
        }
        self.regex.push('$');
        Ok(())
    }

    /// Handles `{name}`, `{name:regex}` and `{*name}`; returns the position after `}`.
    fn braced_variable(&mut self, start: usize) -> Result<usize> {
        let bytes = self.pattern.as_bytes();
        let mut depth = 0usize;
        let mut end = None;
        for (i, &b) in bytes.iter().enumerate().skip(start) {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }
        let end = end.ok_or_else(|| PatternError::UnterminatedVariable {
            pattern: self.pattern.to_string(),
        })?;

        let body = &self.pattern[start + 1..end];
        let (name, expr) = if let Some(name) = body.strip_prefix('*') {
            (name.trim(), ".+?")
        } else if let Some((name, expr)) = body.split_once(':') {
            (name.trim(), expr.trim())
        } else {
            (body.trim(), "[^/]+")
        };

        self.push_variable(name, expr)?;
        Ok(end + 1)
    }

    /// Handles `:name` at the start of a segment; returns the position after the name.
    fn colon_variable(&mut self, start: usize) -> Result<usize> {
        let rest = &self.pattern[start + 1..];
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        self.push_variable(&rest[..len], "[^/]+")?;
        Ok(start + 1 + len)
    }

    fn push_variable(&mut self, name: &str, expr: &str) -> Result<()> {
        if !is_identifier(name) {
            return Err(PatternError::InvalidVariable {
                pattern: self.pattern.to_string(),
                name: name.to_string(),
            });
        }
        if self.variables.iter().any(|v| v == name) {
            return Err(PatternError::DuplicateVariable {
                pattern: self.pattern.to_string(),
                name: name.to_string(),
            });
        }

        self.regex.push_str("(?P<");
        self.regex.push_str(name);
        self.regex.push('>');
        self.regex.push_str(expr);
        self.regex.push(')');
        self.variables.push(name.to_string());
        Ok(())
    }

    fn unbalanced(&self) -> PatternError {
        PatternError::UnbalancedOptional {
            pattern: self.pattern.to_string(),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
