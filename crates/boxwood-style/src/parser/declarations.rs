//! Declaration blocks: `{ name: value; ... }`.

use std::str::FromStr;

use boxwood_common::warning::warn_once;

use super::cursor::{Cursor, is_ident_char};
use crate::block::{FONT_WEIGHT_BOLD, FONT_WEIGHT_NORMAL, FontWeight, StyleBlock};
use crate::coord::{Coord, CoordUnit};
use crate::error::Diagnostics;

/// Why a declaration was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationError {
    /// The property name is not known. Skipped without a diagnostic.
    UnknownProperty,
    /// The property is known but the value does not parse.
    InvalidValue,
}

/// Compile a `{ ... }` block starting at the cursor.
///
/// Returns `None` after a structural error; the caller stops compiling.
pub(crate) fn compile_block(cursor: &mut Cursor<'_>, diag: &mut Diagnostics<'_>) -> Option<StyleBlock> {
    if !cursor.eat('{') {
        diag.fail("expected '{'", cursor.offset());
        return None;
    }

    let mut block = StyleBlock::default();
    loop {
        cursor.skip_whitespace();
        if cursor.eat('}') {
            return Some(block);
        }
        if cursor.is_empty() {
            diag.fail("expected '}'", cursor.offset());
            return None;
        }

        let name_offset = cursor.offset();
        let name = cursor.take_while(is_ident_char);
        if name.is_empty() {
            diag.fail("expected property name", name_offset);
            return None;
        }

        cursor.skip_whitespace();
        if !cursor.eat(':') {
            diag.fail("expected ':'", cursor.offset());
            return None;
        }
        cursor.skip_whitespace();

        let value_offset = cursor.offset();
        let value = take_value(cursor);
        match apply_declaration(&mut block, name, value.trim()) {
            Ok(()) => {}
            Err(DeclarationError::UnknownProperty) => {
                warn_once("Style", &format!("unknown property '{name}'"));
            }
            Err(DeclarationError::InvalidValue) => {
                diag.report(&format!("failed to parse '{name}' value"), value_offset);
            }
        }

        // The value scan stops at ';', '}' or the end of the text.
        if !cursor.eat(';') && !cursor.starts_with("}") {
            diag.fail("expected ';'", cursor.offset());
            return None;
        }
    }
}

/// Collect a value up to the next `;` or `}`, dropping `//` line comments.
fn take_value(cursor: &mut Cursor<'_>) -> String {
    let mut value = String::new();
    while let Some(c) = cursor.peek() {
        if c == ';' || c == '}' {
            break;
        }
        if cursor.eat_str("//") {
            let _ = cursor.take_while(|c| c != '\n');
            continue;
        }
        let _ = cursor.consume();
        value.push(c);
    }
    value
}

/// Apply one `name: value` pair to `block`.
///
/// # Errors
///
/// [`DeclarationError::UnknownProperty`] for a name this engine does not
/// style, [`DeclarationError::InvalidValue`] for a value that does not parse.
pub fn apply_declaration(block: &mut StyleBlock, name: &str, value: &str) -> Result<(), DeclarationError> {
    match name {
        "presence" => block.presence = parse_keyword(value)?,
        "layout" => block.layout = parse_keyword(value)?,
        "stacking-direction" => block.stacking_direction = parse_keyword(value)?,
        "edge" => block.edge = parse_keyword(value)?,
        "box-sizing" => block.box_sizing = parse_keyword(value)?,

        "width" => block.width = parse_coord(value, true)?,
        "height" => block.height = parse_coord(value, true)?,
        "min-width" => block.min_width = parse_coord(value, true)?,
        "min-height" => block.min_height = parse_coord(value, true)?,
        "max-width" => block.max_width = parse_coord(value, true)?,
        "max-height" => block.max_height = parse_coord(value, true)?,

        "left" => block.left = parse_coord(value, true)?,
        "right" => block.right = parse_coord(value, true)?,
        "top" => block.top = parse_coord(value, true)?,
        "bottom" => block.bottom = parse_coord(value, true)?,

        "margin" => {
            let [top, right, bottom, left] = parse_shorthand(value)?;
            block.set_margin(top, right, bottom, left);
        }
        "margin-left" => block.margin_left = parse_coord(value, false)?,
        "margin-right" => block.margin_right = parse_coord(value, false)?,
        "margin-top" => block.margin_top = parse_coord(value, false)?,
        "margin-bottom" => block.margin_bottom = parse_coord(value, false)?,

        "padding" => {
            let [top, right, bottom, left] = parse_shorthand(value)?;
            block.set_padding(top, right, bottom, left);
        }
        "padding-left" => block.padding_left = parse_coord(value, false)?,
        "padding-right" => block.padding_right = parse_coord(value, false)?,
        "padding-top" => block.padding_top = parse_coord(value, false)?,
        "padding-bottom" => block.padding_bottom = parse_coord(value, false)?,

        "font-size" => block.font_size = parse_coord(value, false)?,
        "font-weight" => block.font_weight = parse_font_weight(value)?,
        "font-style" => block.font_style = parse_keyword(value)?,

        _ => return Err(DeclarationError::UnknownProperty),
    }
    Ok(())
}

fn parse_keyword<T: FromStr>(value: &str) -> Result<T, DeclarationError> {
    value.parse().map_err(|_| DeclarationError::InvalidValue)
}

/// Parse a coordinate: `inherit`, `auto` (when allowed), or a number with
/// an optional `px`, `%` or `fr` suffix. A bare number is pixels.
///
/// # Errors
///
/// [`DeclarationError::InvalidValue`] when the text is none of those.
pub fn parse_coord(value: &str, allow_auto: bool) -> Result<Coord, DeclarationError> {
    match value {
        "inherit" => return Ok(Coord::INHERIT),
        "auto" if allow_auto => return Ok(Coord::AUTO),
        _ => {}
    }

    let unit_start = value
        .find(|c: char| c.is_ascii_alphabetic() || c == '%')
        .unwrap_or(value.len());
    let (number, suffix) = value.split_at(unit_start);
    let number: f32 = number.parse().map_err(|_| DeclarationError::InvalidValue)?;
    if !number.is_finite() {
        return Err(DeclarationError::InvalidValue);
    }

    let unit = match suffix {
        "" | "px" => CoordUnit::Pixels,
        "%" => CoordUnit::Percent,
        "fr" => CoordUnit::Fraction,
        _ => return Err(DeclarationError::InvalidValue),
    };
    Ok(Coord {
        value: number,
        unit,
    })
}

/// Expand a 1 to 4 value edge shorthand into `[top, right, bottom, left]`.
fn parse_shorthand(value: &str) -> Result<[Coord; 4], DeclarationError> {
    let coords = value
        .split_whitespace()
        .map(|part| parse_coord(part, false))
        .collect::<Result<Vec<_>, _>>()?;
    expand_edges(&coords).ok_or(DeclarationError::InvalidValue)
}

/// Expand 1 to 4 edge values in CSS shorthand order into
/// `[top, right, bottom, left]`. Any other count yields `None`.
#[must_use]
pub fn expand_edges(values: &[Coord]) -> Option<[Coord; 4]> {
    match *values {
        [all] => Some([all; 4]),
        [vertical, horizontal] => Some([vertical, horizontal, vertical, horizontal]),
        [top, horizontal, bottom] => Some([top, horizontal, bottom, horizontal]),
        [top, right, bottom, left] => Some([top, right, bottom, left]),
        _ => None,
    }
}

fn parse_font_weight(value: &str) -> Result<FontWeight, DeclarationError> {
    match value {
        "inherit" => Ok(FontWeight::Inherit),
        "normal" => Ok(FontWeight::Weight(FONT_WEIGHT_NORMAL)),
        "bold" => Ok(FontWeight::Weight(FONT_WEIGHT_BOLD)),
        _ => match value.parse::<u16>() {
            Ok(weight) if (100..=900).contains(&weight) => Ok(FontWeight::Weight(weight)),
            _ => Err(DeclarationError::InvalidValue),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BoxSizing, Layout};

    #[test]
    fn test_parse_coord_units() {
        assert_eq!(parse_coord("10", false), Ok(Coord::px(10.0)));
        assert_eq!(parse_coord("10px", false), Ok(Coord::px(10.0)));
        assert_eq!(parse_coord("-2.5px", false), Ok(Coord::px(-2.5)));
        assert_eq!(parse_coord("50%", false), Ok(Coord::percent(50.0)));
        assert_eq!(parse_coord("1fr", false), Ok(Coord::fraction(1.0)));
        assert_eq!(parse_coord("inherit", false), Ok(Coord::INHERIT));
        assert_eq!(parse_coord("auto", true), Ok(Coord::AUTO));
    }

    #[test]
    fn test_parse_coord_rejects_garbage() {
        assert_eq!(parse_coord("auto", false), Err(DeclarationError::InvalidValue));
        assert_eq!(parse_coord("10em", false), Err(DeclarationError::InvalidValue));
        assert_eq!(parse_coord("px", false), Err(DeclarationError::InvalidValue));
        assert_eq!(parse_coord("", false), Err(DeclarationError::InvalidValue));
        assert_eq!(parse_coord("wide", true), Err(DeclarationError::InvalidValue));
    }

    #[test]
    fn test_shorthand_expansion() {
        let mut block = StyleBlock::default();
        apply_declaration(&mut block, "padding", "1 2 3").unwrap();
        assert_eq!(block.padding_top, Coord::px(1.0));
        assert_eq!(block.padding_right, Coord::px(2.0));
        assert_eq!(block.padding_bottom, Coord::px(3.0));
        assert_eq!(block.padding_left, Coord::px(2.0));

        apply_declaration(&mut block, "margin", "4 5").unwrap();
        assert_eq!(block.margin_top, Coord::px(4.0));
        assert_eq!(block.margin_left, Coord::px(5.0));

        assert_eq!(
            apply_declaration(&mut block, "margin", "1 2 3 4 5"),
            Err(DeclarationError::InvalidValue)
        );
    }

    #[test]
    fn test_keywords_and_unknown_names() {
        let mut block = StyleBlock::default();
        apply_declaration(&mut block, "layout", "stack-expand").unwrap();
        apply_declaration(&mut block, "box-sizing", "border-box").unwrap();
        assert_eq!(block.layout, Layout::StackExpand);
        assert_eq!(block.box_sizing, BoxSizing::BorderBox);

        assert_eq!(
            apply_declaration(&mut block, "layout", "grid"),
            Err(DeclarationError::InvalidValue)
        );
        assert_eq!(
            apply_declaration(&mut block, "color", "red"),
            Err(DeclarationError::UnknownProperty)
        );
    }

    #[test]
    fn test_font_weight_values() {
        assert_eq!(parse_font_weight("bold"), Ok(FontWeight::BOLD));
        assert_eq!(parse_font_weight("300"), Ok(FontWeight::Weight(300)));
        assert_eq!(parse_font_weight("1000"), Err(DeclarationError::InvalidValue));
    }

    #[test]
    fn test_take_value_strips_line_comments() {
        let mut cursor = Cursor::new("10 // the width\n ;");
        assert_eq!(take_value(&mut cursor).trim(), "10");
        assert!(cursor.eat(';'));
    }
}
