//! Stylesheet compiler.
//!
//! A sheet is a sequence of definitions:
//!
//! ```text
//! sheet       = definition*
//! definition  = selector ("," selector)* "{" declaration* "}"
//! declaration = name ":" value ";"
//! ```
//!
//! `/* ... */` comments are blanked out before compiling, keeping every byte
//! offset (and so every reported line and column) unchanged. Inside a
//! declaration value `//` also starts a comment that runs to the end of the
//! line.

pub(crate) mod cursor;
mod declarations;

pub use declarations::{DeclarationError, apply_declaration, expand_edges, parse_coord};

use boxwood_dom::{ElementTree, NodeId};

use crate::block::StyleBlock;
use crate::error::{Diagnostics, ErrorCallback, SheetError, StyleError};
use crate::selector::{Selector, Specificity};
use cursor::Cursor;
use declarations::compile_block;

/// A cascade rule: alternative selectors sharing one style block.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    /// The rule applies if any of these match.
    pub selectors: Vec<Selector>,
    /// The declared properties.
    pub block: StyleBlock,
}

impl Definition {
    /// Check whether any selector matches `node`.
    #[must_use]
    pub fn check(&self, tree: &ElementTree, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.check(tree, node))
    }

    /// The highest specificity among the selectors that match `node`, or
    /// `None` if none does.
    #[must_use]
    pub fn matched_specificity(&self, tree: &ElementTree, node: NodeId) -> Option<Specificity> {
        self.selectors
            .iter()
            .filter(|s| s.check(tree, node))
            .map(Selector::specificity)
            .max()
    }

    fn compile(cursor: &mut Cursor<'_>, diag: &mut Diagnostics<'_>) -> Option<Self> {
        let mut selectors = Vec::new();
        loop {
            cursor.skip_whitespace();
            selectors.push(Selector::compile(cursor, diag)?);

            cursor.skip_whitespace();
            if cursor.eat(',') {
                continue;
            }
            if cursor.starts_with("{") {
                break;
            }
            diag.fail("expected ',' or '{'", cursor.offset());
            return None;
        }

        let block = compile_block(cursor, diag)?;
        Some(Self { selectors, block })
    }
}

/// A compiled stylesheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    definitions: Vec<Definition>,
    text: String,
}

impl Sheet {
    /// Compile `source`, sending diagnostics to `errors`.
    ///
    /// Always returns a sheet: after a structural error it holds the
    /// definitions compiled before that point.
    pub fn compile(source: &str, errors: &mut dyn ErrorCallback) -> Self {
        let text = match preprocess(source) {
            Ok(text) => text,
            Err(offset) => {
                Diagnostics::new(source, errors).fail("unterminated comment", offset);
                return Self {
                    definitions: Vec::new(),
                    text: source.to_string(),
                };
            }
        };

        let mut definitions = Vec::new();
        {
            let mut diag = Diagnostics::new(&text, errors);
            let mut cursor = Cursor::new(&text);
            loop {
                cursor.skip_whitespace();
                if cursor.is_empty() {
                    break;
                }
                match Definition::compile(&mut cursor, &mut diag) {
                    Some(definition) if !diag.had_error() => definitions.push(definition),
                    _ => break,
                }
            }
        }

        Self { definitions, text }
    }

    /// Compile `source`, failing if anything was reported.
    ///
    /// # Errors
    ///
    /// Returns a [`SheetError`] holding every diagnostic when compilation
    /// reported at least one.
    pub fn parse(source: &str) -> Result<Self, SheetError> {
        let mut diagnostics: Vec<StyleError> = Vec::new();
        let sheet = Self::compile(source, &mut diagnostics);
        match diagnostics.first() {
            None => Ok(sheet),
            Some(first) => Err(SheetError {
                first: first.clone(),
                diagnostics,
            }),
        }
    }

    /// Definitions in source order.
    #[must_use]
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    /// The source with block comments blanked out.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check whether the sheet has no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Blank out `/* ... */` comments, keeping newlines and byte offsets.
///
/// Returns the offset of the opening `/*` of an unterminated comment.
fn preprocess(source: &str) -> Result<String, usize> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        let body = &rest[start..];
        let Some(end) = body[2..].find("*/").map(|i| i + 4) else {
            return Err(source.len() - body.len());
        };
        for c in body[..end].chars() {
            if c == '\n' {
                out.push('\n');
            } else {
                out.extend(std::iter::repeat_n(' ', c.len_utf8()));
            }
        }
        rest = &body[end..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_keeps_offsets() {
        let source = "a /* x\ny */ { }";
        let text = preprocess(source).unwrap();
        assert_eq!(text.len(), source.len());
        assert_eq!(text, "a     \n     { }");
    }

    #[test]
    fn test_preprocess_unterminated() {
        assert_eq!(preprocess("a { } /* open"), Err(6));
    }

    #[test]
    fn test_preprocess_multibyte_comment() {
        let source = "/* é */x";
        let text = preprocess(source).unwrap();
        assert_eq!(text.len(), source.len());
        assert!(text.ends_with('x'));
    }
}
