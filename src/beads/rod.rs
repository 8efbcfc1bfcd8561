//! A single soroban rod.
//!
//! One rod holds one base-10 digit:
//! - one heaven bead, worth 5 when pushed **down** to the reckoning bar
//! - four earth beads, worth 1 each when pushed **up** to the bar

use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// A single rod, stored as the physical position of its beads.
///
/// Both fields are validated on every construction and update path, so a
/// `Rod` always encodes a digit in `0..=9`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RodState", into = "RodState")]
pub struct Rod {
    upper_beads_up: u8,
    lower_beads_up: u8,
}

impl Rod {
    /// Number of earth beads on a rod.
    pub const LOWER_BEADS: usize = 4;

    /// The canonical bead state for every digit, indexed by digit.
    pub const ALL: [Rod; 10] = [
        Rod::from_digit_unchecked(0),
        Rod::from_digit_unchecked(1),
        Rod::from_digit_unchecked(2),
        Rod::from_digit_unchecked(3),
        Rod::from_digit_unchecked(4),
        Rod::from_digit_unchecked(5),
        Rod::from_digit_unchecked(6),
        Rod::from_digit_unchecked(7),
        Rod::from_digit_unchecked(8),
        Rod::from_digit_unchecked(9),
    ];

    /// Create a rod from raw bead positions.
    ///
    /// `upper_beads_up` is 1 when the heaven bead rests away from the bar,
    /// 0 when it is pushed down. `lower_beads_up` counts earth beads
    /// touching the bar.
    pub fn new(upper_beads_up: i32, lower_beads_up: i32) -> Result<Self, BeadStateError> {
        Ok(Self {
            upper_beads_up: check_upper(upper_beads_up)?,
            lower_beads_up: check_lower(lower_beads_up)?,
        })
    }

    /// The resting rod: heaven bead up, no earth beads at the bar.
    #[inline]
    pub const fn zero() -> Self {
        Self { upper_beads_up: 1, lower_beads_up: 0 }
    }

    /// Bead state for a digit, or `None` if the digit is above 9.
    pub fn from_digit(digit: u8) -> Option<Self> {
        (digit <= 9).then(|| Self::from_digit_unchecked(digit))
    }

    /// Caller guarantees `digit <= 9`.
    #[inline]
    pub(crate) const fn from_digit_unchecked(digit: u8) -> Self {
        Self {
            upper_beads_up: if digit >= 5 { 0 } else { 1 },
            lower_beads_up: digit % 5,
        }
    }

    #[inline]
    pub const fn upper_beads_up(&self) -> u8 {
        self.upper_beads_up
    }

    #[inline]
    pub const fn lower_beads_up(&self) -> u8 {
        self.lower_beads_up
    }

    /// Move the heaven bead. Rejects anything but 0 or 1 and leaves the
    /// rod untouched on error.
    pub fn set_upper_beads_up(&mut self, value: i32) -> Result<(), BeadStateError> {
        self.upper_beads_up = check_upper(value)?;
        Ok(())
    }

    /// Move the earth beads. Rejects anything outside `0..=4` and leaves
    /// the rod untouched on error.
    pub fn set_lower_beads_up(&mut self, value: i32) -> Result<(), BeadStateError> {
        self.lower_beads_up = check_lower(value)?;
        Ok(())
    }

    /// Digit value of the current bead positions.
    #[inline]
    pub const fn digit(&self) -> u8 {
        let heaven = if self.upper_beads_up == 0 { 5 } else { 0 };
        heaven + self.lower_beads_up
    }

    /// Reposition the beads to show `digit`.
    pub fn set_digit(&mut self, digit: u8) -> Result<(), BeadStateError> {
        *self = Self::from_digit(digit).ok_or(BeadStateError::Digit(digit))?;
        Ok(())
    }

    /// Returns true if this rod shows 0.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.digit() == 0
    }

    /// Add two rods plus an incoming carry (0 or 1).
    ///
    /// Returns the rod for `(a + b + carry) mod 10` and the outgoing carry.
    #[inline]
    pub const fn full_add(self, other: Self, carry_in: u8) -> (Self, u8) {
        let sum = self.digit() + other.digit() + carry_in;
        (Self::from_digit_unchecked(sum % 10), sum / 10)
    }

    /// Subtract `other` and an incoming borrow (0 or 1) from this rod.
    ///
    /// Returns the rod for the difference, taken mod 10, and the
    /// outgoing borrow.
    #[inline]
    pub const fn full_sub(self, other: Self, borrow_in: u8) -> (Self, u8) {
        let diff = self.digit() as i8 - other.digit() as i8 - borrow_in as i8;
        if diff < 0 {
            (Self::from_digit_unchecked((diff + 10) as u8), 1)
        } else {
            (Self::from_digit_unchecked(diff as u8), 0)
        }
    }
}

fn check_upper(value: i32) -> Result<u8, BeadStateError> {
    match value {
        0 | 1 => Ok(value as u8),
        _ => Err(BeadStateError::Upper(value)),
    }
}

fn check_lower(value: i32) -> Result<u8, BeadStateError> {
    match value {
        0..=4 => Ok(value as u8),
        _ => Err(BeadStateError::Lower(value)),
    }
}

impl Default for Rod {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for Rod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.upper_beads_up, self.lower_beads_up)
    }
}

impl fmt::Display for Rod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl TryFrom<u8> for Rod {
    type Error = BeadStateError;

    fn try_from(digit: u8) -> Result<Self, Self::Error> {
        Self::from_digit(digit).ok_or(BeadStateError::Digit(digit))
    }
}

impl From<Rod> for u8 {
    fn from(rod: Rod) -> Self {
        rod.digit()
    }
}

/// Wire form of a rod; converted through [`Rod::new`] so bad input is
/// rejected on deserialization.
#[derive(Serialize, Deserialize)]
struct RodState {
    upper_beads_up: i32,
    lower_beads_up: i32,
}

impl TryFrom<RodState> for Rod {
    type Error = BeadStateError;

    fn try_from(state: RodState) -> Result<Self, Self::Error> {
        Rod::new(state.upper_beads_up, state.lower_beads_up)
    }
}

impl From<Rod> for RodState {
    fn from(rod: Rod) -> Self {
        Self {
            upper_beads_up: rod.upper_beads_up as i32,
            lower_beads_up: rod.lower_beads_up as i32,
        }
    }
}

/// Invalid bead state on a rod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BeadStateError {
    #[error("upperBeadsUp must be 0 or 1")]
    Upper(i32),

    #[error("lowerBeadsUp must be between 0 and 4")]
    Lower(i32),

    #[error("digit {0} cannot be shown on one rod (must be 0-9)")]
    Digit(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_form() {
        assert_eq!(format!("{:?}", Rod::new(0, 1).unwrap()), "(0, 1)");
        assert_eq!(format!("{:?}", Rod::new(1, 3).unwrap()), "(1, 3)");
        assert_eq!(Rod::new(1, 3).unwrap().to_string(), "(1, 3)");
    }

    #[test]
    fn test_default_is_zero() {
        let rod = Rod::default();
        assert_eq!(rod.upper_beads_up(), 1);
        assert_eq!(rod.lower_beads_up(), 0);
        assert_eq!(rod.digit(), 0);
    }

    #[test]
    fn test_upper_validation() {
        let err = Rod::new(2, 1).unwrap_err();
        assert_eq!(err, BeadStateError::Upper(2));
        assert_eq!(err.to_string(), "upperBeadsUp must be 0 or 1");

        assert_eq!(Rod::new(-1, 1).unwrap_err(), BeadStateError::Upper(-1));
    }

    #[test]
    fn test_lower_validation() {
        let err = Rod::new(0, 5).unwrap_err();
        assert_eq!(err, BeadStateError::Lower(5));
        assert_eq!(err.to_string(), "lowerBeadsUp must be between 0 and 4");

        assert_eq!(Rod::new(0, -1).unwrap_err(), BeadStateError::Lower(-1));
    }

    #[test]
    fn test_digit_values() {
        assert_eq!(Rod::new(1, 0).unwrap().digit(), 0);
        assert_eq!(Rod::new(1, 1).unwrap().digit(), 1);
        assert_eq!(Rod::new(0, 3).unwrap().digit(), 8);
        assert_eq!(Rod::new(1, 4).unwrap().digit(), 4);
        assert_eq!(Rod::new(0, 4).unwrap().digit(), 9);

        for upper in 0..=1 {
            for lower in 0..=4 {
                let expected = (if upper == 1 { 0 } else { 5 }) + lower as u8;
                assert_eq!(Rod::new(upper, lower).unwrap().digit(), expected);
            }
        }
    }

    #[test]
    fn test_setters_revalidate() {
        let mut rod = Rod::new(1, 2).unwrap();

        assert!(rod.set_upper_beads_up(3).is_err());
        assert!(rod.set_lower_beads_up(7).is_err());
        assert_eq!(rod, Rod::new(1, 2).unwrap(), "failed update must not change the rod");

        rod.set_upper_beads_up(0).unwrap();
        rod.set_lower_beads_up(4).unwrap();
        assert_eq!(rod.digit(), 9);
    }

    #[test]
    fn test_every_digit_has_one_state() {
        for (digit, rod) in Rod::ALL.iter().enumerate() {
            assert_eq!(rod.digit() as usize, digit);
        }
        for upper in 0..=1 {
            for lower in 0..=4 {
                let rod = Rod::new(upper, lower).unwrap();
                assert_eq!(Rod::ALL[rod.digit() as usize], rod);
            }
        }
        assert_eq!(Rod::from_digit(10), None);
    }

    #[test]
    fn test_set_digit() {
        let mut rod = Rod::zero();
        rod.set_digit(7).unwrap();
        assert_eq!(format!("{:?}", rod), "(0, 2)");
        assert_eq!(rod.set_digit(12), Err(BeadStateError::Digit(12)));
        assert_eq!(rod.digit(), 7);
    }

    #[test]
    fn test_full_add() {
        let five = Rod::new(0, 0).unwrap();
        assert_eq!(five.full_add(five, 0), (Rod::zero(), 1));

        let nine = Rod::new(0, 4).unwrap();
        assert_eq!(nine.full_add(nine, 1), (nine, 1));

        let two = Rod::new(1, 2).unwrap();
        assert_eq!(two.full_add(two, 0).0.digit(), 4);
    }

    #[test]
    fn test_full_sub() {
        let five = Rod::new(0, 0).unwrap();
        let two = Rod::new(1, 2).unwrap();
        assert_eq!(five.full_sub(two, 0), (Rod::from_digit(3).unwrap(), 0));

        // 0 - 1 borrows and leaves 9
        assert_eq!(Rod::zero().full_sub(Rod::ALL[1], 0), (Rod::ALL[9], 1));
        assert_eq!(Rod::zero().full_sub(Rod::zero(), 1), (Rod::ALL[9], 1));
    }

    #[test]
    fn test_serde_revalidates() {
        let rod = Rod::new(0, 3).unwrap();
        let json = serde_json::to_string(&rod).unwrap();
        assert_eq!(json, r#"{"upper_beads_up":0,"lower_beads_up":3}"#);
        assert_eq!(serde_json::from_str::<Rod>(&json).unwrap(), rod);

        let bad = serde_json::from_str::<Rod>(r#"{"upper_beads_up":2,"lower_beads_up":0}"#);
        assert!(bad.is_err());
    }
}
