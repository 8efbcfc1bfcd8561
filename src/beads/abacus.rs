//! The abacus frame: a fixed-width row of rods.
//!
//! Rods are stored most significant first. Construction places any
//! supplied rods against the right edge and fills the rest with zeros,
//! and the rod count never changes afterwards.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::beads::arith::ArithError;
use crate::beads::rod::{BeadStateError, Rod};

/// A soroban: an ordered, fixed-width sequence of [`Rod`]s.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Abacus {
    /// Rods from most significant (index 0) to least significant.
    rods: Vec<Rod>,
}

impl Abacus {
    /// Width used when the caller does not ask for one.
    pub const DEFAULT_SIZE: usize = 5;

    /// A cleared abacus of [`DEFAULT_SIZE`](Self::DEFAULT_SIZE) rods.
    pub fn new() -> Self {
        Self::with_size(&[], Self::DEFAULT_SIZE)
    }

    /// Default-width abacus with `rods` pushed to the right.
    pub fn with_rods(rods: &[Rod]) -> Self {
        Self::with_size(rods, Self::DEFAULT_SIZE)
    }

    /// Abacus of `max(size, rods.len())` rods with `rods` pushed to the
    /// right, in order. The last rod supplied is the ones place.
    pub fn with_size(rods: &[Rod], size: usize) -> Self {
        let size = size.max(rods.len());
        let mut all = vec![Rod::zero(); size];
        all[size - rods.len()..].copy_from_slice(rods);
        Self { rods: all }
    }

    /// Abacus showing `value`, at least `size` rods wide.
    ///
    /// Grows past `size` when `value` has more digits, the same way
    /// [`with_size`](Self::with_size) grows to fit its rods.
    pub fn from_u128(value: u128, size: usize) -> Self {
        let mut digits = Vec::new();
        let mut rest = value;
        while rest > 0 {
            digits.push(Rod::from_digit_unchecked((rest % 10) as u8));
            rest /= 10;
        }
        digits.reverse();
        Self::with_size(&digits, size)
    }

    /// Parse a string of decimal digits, one rod per digit.
    ///
    /// Leading zeros are kept as rods, so `"007"` is three rods wide.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::Empty);
        }

        let rods = s
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|d| Rod::from_digit_unchecked(d as u8))
                    .ok_or(ParseError::InvalidChar(c))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rods })
    }

    /// Number of rods.
    #[inline]
    pub fn len(&self) -> usize {
        self.rods.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rods.is_empty()
    }

    /// The rods, most significant first.
    #[inline]
    pub fn rods(&self) -> &[Rod] {
        &self.rods
    }

    /// Mutable access to the rods. The slice cannot change the width.
    #[inline]
    pub fn rods_mut(&mut self) -> &mut [Rod] {
        &mut self.rods
    }

    /// Rod at `index` (0 = most significant).
    #[inline]
    pub fn get(&self, index: usize) -> Option<Rod> {
        self.rods.get(index).copied()
    }

    /// Replace the rod at `index` (0 = most significant).
    pub fn set(&mut self, index: usize, rod: Rod) -> Result<(), AbacusError> {
        let len = self.rods.len();
        let slot = self
            .rods
            .get_mut(index)
            .ok_or(AbacusError::RodIndex { index, len })?;
        *slot = rod;
        Ok(())
    }

    /// Push every bead back to its resting position.
    pub fn clear(&mut self) {
        for rod in &mut self.rods {
            *rod = Rod::zero();
        }
    }

    /// Check if every rod shows 0.
    pub fn is_zero(&self) -> bool {
        self.rods.iter().all(Rod::is_zero)
    }

    /// Integer value, leftmost rod most significant.
    ///
    /// Fails only if the significant digits do not fit in a `u128`
    /// (more than 38 of them, or 39 large ones).
    pub fn to_u128(&self) -> Result<u128, AbacusError> {
        self.rods
            .iter()
            .try_fold(0u128, |acc, rod| {
                acc.checked_mul(10)?.checked_add(rod.digit() as u128)
            })
            .ok_or(AbacusError::ValueOverflow { width: self.len() })
    }

    /// The digits shown on the rods, leading zeros included.
    pub fn to_digits(&self) -> String {
        self.rods
            .iter()
            .map(|rod| char::from(b'0' + rod.digit()))
            .collect()
    }

    fn row(&self, cell: impl Fn(&Rod) -> &'static str) -> String {
        self.rods.iter().map(cell).collect::<Vec<_>>().join(" ")
    }
}

impl Default for Abacus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Abacus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.rods).finish()
    }
}

/// Bead picture: two heaven rows, the bar, then one row per earth-bead
/// slot. `|` marks the empty stretch of rod where the beads have parted.
impl fmt::Display for Abacus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.row(|r| if r.upper_beads_up() == 1 { "O" } else { "|" }))?;
        writeln!(f, "{}", self.row(|r| if r.upper_beads_up() == 1 { "|" } else { "O" }))?;
        write!(f, "{}", "-".repeat((self.rods.len() * 2).saturating_sub(1)))?;

        for slot in 0..=Rod::LOWER_BEADS {
            let line = self.row(|r| if r.lower_beads_up() as usize == slot { "|" } else { "O" });
            write!(f, "\n{}", line)?;
        }

        Ok(())
    }
}

impl FromStr for Abacus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<Rod>> for Abacus {
    /// An abacus exactly as wide as `rods`.
    fn from(rods: Vec<Rod>) -> Self {
        Self { rods }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur when parsing digit strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty digit string")]
    Empty,

    #[error("invalid digit character: '{0}' (expected 0-9)")]
    InvalidChar(char),
}

/// Any error raised while building, reading, or computing on an abacus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbacusError {
    #[error("invalid bead state: {0}")]
    BeadState(#[from] BeadStateError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("precondition violation: {0}")]
    Arith(#[from] ArithError),

    #[error("rod index {index} out of range (abacus has {len} rods)")]
    RodIndex { index: usize, len: usize },

    #[error("value on a {width}-rod abacus does not fit in 128 bits")]
    ValueOverflow { width: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rod(upper: i32, lower: i32) -> Rod {
        Rod::new(upper, lower).unwrap()
    }

    #[test]
    fn test_default_abacus() {
        let abacus = Abacus::new();
        assert_eq!(abacus.len(), 5);
        assert_eq!(format!("{:?}", abacus), "[(1, 0), (1, 0), (1, 0), (1, 0), (1, 0)]");
        assert_eq!(abacus.to_u128().unwrap(), 0);
        assert!(abacus.is_zero());
    }

    #[test]
    fn test_rods_pushed_right() {
        let abacus = Abacus::with_rods(&[rod(1, 1)]);
        assert_eq!(abacus.rods()[4], rod(1, 1));
        assert_eq!(abacus.get(0), Some(Rod::zero()));

        let abacus = Abacus::with_rods(&[rod(0, 1), rod(1, 3)]);
        assert_eq!(format!("{:?}", abacus), "[(1, 0), (1, 0), (1, 0), (0, 1), (1, 3)]");
    }

    #[test]
    fn test_size_grows_to_fit_rods() {
        let rods = vec![rod(1, 1); 7];
        let abacus = Abacus::with_size(&rods, 3);
        assert_eq!(abacus.len(), 7);
        assert_eq!(abacus.to_u128().unwrap(), 1_111_111);

        assert_eq!(Abacus::with_size(&[], 0).len(), 0);
    }

    #[test]
    fn test_to_u128() {
        assert_eq!(Abacus::with_rods(&[rod(1, 1)]).to_u128().unwrap(), 1);
        assert_eq!(Abacus::with_rods(&[rod(1, 1), rod(1, 1)]).to_u128().unwrap(), 11);
        assert_eq!(Abacus::with_rods(&[rod(0, 1), rod(1, 1)]).to_u128().unwrap(), 61);
        assert_eq!(
            Abacus::with_rods(&[rod(0, 1), rod(0, 3), rod(0, 2)]).to_u128().unwrap(),
            687
        );
    }

    #[test]
    fn test_to_u128_overflow() {
        let nines = vec![rod(0, 4); 40];
        let abacus = Abacus::with_size(&nines, 40);
        assert_eq!(abacus.to_u128(), Err(AbacusError::ValueOverflow { width: 40 }));

        // Leading zeros do not count against the limit
        let wide = Abacus::with_size(&[rod(0, 4)], 100);
        assert_eq!(wide.to_u128().unwrap(), 9);
    }

    #[test]
    fn test_render_default() {
        let expected = "\
O O O O O
| | | | |
---------
| | | | |
O O O O O
O O O O O
O O O O O
O O O O O";
        assert_eq!(Abacus::new().to_string(), expected);
    }

    #[test]
    fn test_render_one() {
        let expected = "\
O O O O O
| | | | |
---------
| | | | O
O O O O |
O O O O O
O O O O O
O O O O O";
        assert_eq!(Abacus::with_rods(&[rod(1, 1)]).to_string(), expected);
    }

    #[test]
    fn test_render_heaven_bead_down() {
        let expected = "\
O O O | O
| | | O |
---------
| | | O O
O O O | O
O O O O O
O O O O |
O O O O O";
        assert_eq!(Abacus::with_rods(&[rod(0, 1), rod(1, 3)]).to_string(), expected);

        let expected = "\
O O O | O
| | | O |
---------
| | | O O
O O O | O
O O O O O
O O O O O
O O O O |";
        assert_eq!(Abacus::with_rods(&[rod(0, 1), rod(1, 4)]).to_string(), expected);
    }

    #[test]
    fn test_render_has_eight_lines() {
        let text = Abacus::from_u128(1234567, 9).to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[2], "-".repeat(17));
    }

    #[test]
    fn test_from_u128() {
        let abacus = Abacus::from_u128(687, 5);
        assert_eq!(format!("{:?}", abacus), "[(1, 0), (1, 0), (0, 1), (0, 3), (0, 2)]");

        let wide = Abacus::from_u128(123_456, 5);
        assert_eq!(wide.len(), 6);
        assert_eq!(wide.to_digits(), "123456");

        assert_eq!(Abacus::from_u128(0, 3).to_digits(), "000");
    }

    #[test]
    fn test_parse() {
        let abacus: Abacus = "0687".parse().unwrap();
        assert_eq!(abacus.len(), 4);
        assert_eq!(abacus.to_u128().unwrap(), 687);

        assert_eq!(Abacus::parse("  "), Err(ParseError::Empty));
        assert_eq!(Abacus::parse("12a"), Err(ParseError::InvalidChar('a')));
        assert_eq!(Abacus::parse("-1"), Err(ParseError::InvalidChar('-')));
    }

    #[test]
    fn test_set_and_clear() {
        let mut abacus = Abacus::new();
        abacus.set(4, rod(0, 2)).unwrap();
        assert_eq!(abacus.to_u128().unwrap(), 7);

        abacus.rods_mut()[0].set_lower_beads_up(3).unwrap();
        assert_eq!(abacus.to_u128().unwrap(), 30_007);

        assert_eq!(
            abacus.set(5, Rod::zero()),
            Err(AbacusError::RodIndex { index: 5, len: 5 })
        );

        abacus.clear();
        assert!(abacus.is_zero());
        assert_eq!(abacus.len(), 5);
    }

    #[test]
    fn test_serde_roundtrip() {
        let abacus = Abacus::from_u128(42, 3);
        let json = serde_json::to_string(&abacus).unwrap();
        let back: Abacus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, abacus);

        let bad = r#"{"rods":[{"upper_beads_up":1,"lower_beads_up":9}]}"#;
        assert!(serde_json::from_str::<Abacus>(bad).is_err());
    }
}
