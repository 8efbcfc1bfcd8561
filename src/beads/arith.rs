//! Rod-by-rod arithmetic.
//!
//! Addition and subtraction work the way they do on a physical soroban:
//! one pass from the ones rod leftwards, passing a single carry or borrow
//! to the next rod.

use thiserror::Error;
use tracing::{debug, trace};
use crate::beads::Abacus;

/// Add two abacuses of equal width, returning (result, carry_out).
///
/// The result has the same width as the operands; `carry_out` is 1 when
/// the sum did not fit.
pub fn add_with_carry(a: &Abacus, b: &Abacus) -> Result<(Abacus, u8), ArithError> {
    check_width(a, b)?;

    let mut result = a.clone();
    let mut carry = 0;

    for i in (0..a.len()).rev() {
        let (rod, carry_out) = a.rods()[i].full_add(b.rods()[i], carry);
        trace!(rod = i, digit = rod.digit(), carry = carry_out, "add step");
        result.rods_mut()[i] = rod;
        carry = carry_out;
    }

    Ok((result, carry))
}

/// Subtract two abacuses of equal width (a - b), returning (result, borrow_out).
///
/// When `borrow_out` is 1 the result is the ten's complement of the
/// difference at this width, e.g. `00 - 01` gives `99`.
pub fn sub_with_borrow(a: &Abacus, b: &Abacus) -> Result<(Abacus, u8), ArithError> {
    check_width(a, b)?;

    let mut result = a.clone();
    let mut borrow = 0;

    for i in (0..a.len()).rev() {
        let (rod, borrow_out) = a.rods()[i].full_sub(b.rods()[i], borrow);
        trace!(rod = i, digit = rod.digit(), borrow = borrow_out, "sub step");
        result.rods_mut()[i] = rod;
        borrow = borrow_out;
    }

    Ok((result, borrow))
}

/// Add two abacuses of equal width.
///
/// A carry out of the leftmost rod has nowhere to go and is dropped, so
/// the result wraps at the abacus width.
pub fn add(a: &Abacus, b: &Abacus) -> Result<Abacus, ArithError> {
    let (result, carry) = add_with_carry(a, b)?;
    if carry != 0 {
        debug!(width = a.len(), "carry dropped past the leftmost rod");
    }
    Ok(result)
}

/// Subtract `b` from `a`.
///
/// Fails with [`ArithError::Underflow`] instead of wrapping when `b` is
/// larger than `a`; use [`sub_with_borrow`] for the wrapped result.
pub fn sub(a: &Abacus, b: &Abacus) -> Result<Abacus, ArithError> {
    let (result, borrow) = sub_with_borrow(a, b)?;
    if borrow != 0 {
        debug!(width = a.len(), "borrow out of the leftmost rod");
        return Err(ArithError::Underflow {
            minuend: a.to_digits(),
            subtrahend: b.to_digits(),
        });
    }
    Ok(result)
}

fn check_width(a: &Abacus, b: &Abacus) -> Result<(), ArithError> {
    if a.len() != b.len() {
        return Err(ArithError::WidthMismatch { left: a.len(), right: b.len() });
    }
    Ok(())
}

impl Abacus {
    /// Add `other` onto this abacus. Leaves `self` unchanged on error.
    pub fn add_in_place(&mut self, other: &Abacus) -> Result<(), ArithError> {
        *self = add(self, other)?;
        Ok(())
    }

    /// Subtract `other` from this abacus. Leaves `self` unchanged on error.
    pub fn sub_in_place(&mut self, other: &Abacus) -> Result<(), ArithError> {
        *self = sub(self, other)?;
        Ok(())
    }
}

/// Arithmetic called outside its preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithError {
    #[error("operand widths differ: {left} rods vs {right} rods")]
    WidthMismatch { left: usize, right: usize },

    #[error("{minuend} - {subtrahend} is negative")]
    Underflow { minuend: String, subtrahend: String },
}
