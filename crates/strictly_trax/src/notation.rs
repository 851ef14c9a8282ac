//! Move notation.
//!
//! A move is an optional cell reference followed by one orientation symbol:
//!
//! ```text
//! move   := [ cell ] piece
//! cell   := ( "@" | [a-z]+ ) [0-9]+
//! piece  := "+" | "/" | "\"
//! ```
//!
//! Column `@` is index 0; `a`..`z` are 1..26, then `aa`, `ab`, ... continue
//! in bijective base 26.

use crate::error::{TraxError, TraxErrorKind};
use crate::types::Piece;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Column/row reference as written in move notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct NotationCell {
    /// Column index (`@` = 0).
    pub column: u32,
    /// Row number, growing upward.
    pub row: u32,
}

impl NotationCell {
    /// Cell reference of the very first move.
    pub const ORIGIN: NotationCell = NotationCell { column: 0, row: 0 };
}

impl std::fmt::Display for NotationCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", column_label(self.column), self.row)
    }
}

/// A move in notation form, not yet tied to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedMove {
    /// Cell reference, absent for a bare first move.
    pub cell: Option<NotationCell>,
    /// Chosen orientation.
    pub piece: Piece,
}

impl std::fmt::Display for ParsedMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(cell) = self.cell {
            write!(f, "{cell}")?;
        }
        write!(f, "{}", self.piece)
    }
}

/// Formats a column index as letters.
pub fn column_label(mut column: u32) -> String {
    if column == 0 {
        return "@".to_string();
    }
    let mut letters = Vec::new();
    while column > 0 {
        column -= 1;
        letters.push(char::from(b'a' + (column % 26) as u8));
        column /= 26;
    }
    letters.iter().rev().collect()
}

/// Parses column letters back into an index.
pub fn parse_column(label: &str) -> Option<u32> {
    if label == "@" {
        return Some(0);
    }
    if label.is_empty() {
        return None;
    }
    label.chars().try_fold(0u32, |acc, c| {
        if !c.is_ascii_lowercase() {
            return None;
        }
        let digit = u32::from(c) - u32::from('a') + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}

/// Parses a move string.
///
/// # Errors
///
/// Returns `MalformedNotation` if the input does not match the grammar.
#[instrument]
pub fn parse_move(input: &str) -> Result<ParsedMove, TraxError> {
    let malformed = || TraxError::new(TraxErrorKind::MalformedNotation(input.to_string()));

    let mut chars = input.chars();
    let piece = chars
        .next_back()
        .and_then(Piece::from_symbol)
        .ok_or_else(malformed)?;
    let reference = chars.as_str();
    if reference.is_empty() {
        return Ok(ParsedMove { cell: None, piece });
    }

    let split = reference
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(malformed)?;
    let (letters, digits) = reference.split_at(split);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }
    let column = parse_column(letters).ok_or_else(malformed)?;
    let row = digits.parse::<u32>().map_err(|_| malformed())?;

    Ok(ParsedMove {
        cell: Some(NotationCell::new(column, row)),
        piece,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_labels() {
        assert_eq!(column_label(0), "@");
        assert_eq!(column_label(1), "a");
        assert_eq!(column_label(26), "z");
        assert_eq!(column_label(27), "aa");
        assert_eq!(column_label(52), "az");
        assert_eq!(column_label(53), "ba");
        for n in 0..2000 {
            assert_eq!(parse_column(&column_label(n)), Some(n));
        }
    }

    #[test]
    fn test_parse_first_move() {
        let mv = parse_move("@0+").unwrap();
        assert_eq!(mv.cell, Some(NotationCell::ORIGIN));
        assert_eq!(mv.piece, Piece::Straight);

        let mv = parse_move("/").unwrap();
        assert_eq!(mv.cell, None);
        assert_eq!(mv.piece, Piece::Slash);
    }

    #[test]
    fn test_parse_multi_letter_column() {
        let mv = parse_move("ab12\\").unwrap();
        assert_eq!(mv.cell, Some(NotationCell::new(28, 12)));
        assert_eq!(mv.piece, Piece::Backslash);
        assert_eq!(mv.to_string(), "ab12\\");
    }

    #[test]
    fn test_malformed() {
        for input in ["", "a1", "a+", "1+", "A1+", "@a1+", "a1b+", "a-1+", "@@0+", "a1++", " a1+"] {
            let err = parse_move(input).unwrap_err();
            assert!(
                matches!(err.kind(), TraxErrorKind::MalformedNotation(_)),
                "{input:?}"
            );
        }
    }
}
