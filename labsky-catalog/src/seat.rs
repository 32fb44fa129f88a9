use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::catalog::{COLUMNS, EMERGENCY_ROWS, ROW_COUNT};

/// A seat of the modeled aircraft, e.g. row 10 column `F` is "10F"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Seat {
    row: u8,
    column: char,
}

impl Seat {
    /// Build a seat without range checks. Only used to lay out the static catalog.
    pub(crate) const fn at(row: u8, column: char) -> Self {
        Self { row, column }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn column(&self) -> char {
        self.column
    }

    pub fn is_emergency_row(&self) -> bool {
        EMERGENCY_ROWS.contains(&self.row)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

impl Serialize for Seat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Trim and uppercase a client supplied seat code.
pub fn normalize_seat_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatParseError {
    #[error("Seat code is empty")]
    Empty,

    #[error("Malformed seat code: {0}")]
    Malformed(String),

    #[error("Row out of range in seat code: {0}")]
    RowOutOfRange(String),

    #[error("Column out of range in seat code: {0}")]
    ColumnOutOfRange(String),
}

impl FromStr for Seat {
    type Err = SeatParseError;

    /// Strict `<row><column>` parse: decimal row without leading zeros followed
    /// by exactly one column letter. Case-insensitive.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let code = normalize_seat_code(raw);
        if code.is_empty() {
            return Err(SeatParseError::Empty);
        }

        let split = code
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| SeatParseError::Malformed(code.clone()))?;
        let (digits, rest) = code.split_at(split);

        if digits.is_empty() || digits.starts_with('0') {
            return Err(SeatParseError::Malformed(code.clone()));
        }

        let mut letters = rest.chars();
        let column = match (letters.next(), letters.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => c,
            _ => return Err(SeatParseError::Malformed(code.clone())),
        };

        let row = digits
            .parse::<u8>()
            .ok()
            .filter(|row| (1..=ROW_COUNT).contains(row))
            .ok_or_else(|| SeatParseError::RowOutOfRange(code.clone()))?;

        if !COLUMNS.contains(&column) {
            return Err(SeatParseError::ColumnOutOfRange(code));
        }

        Ok(Seat { row, column })
    }
}
