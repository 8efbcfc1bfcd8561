//! Soroban primitives.
//!
//! This module provides the core types for working with bead-encoded digits:
//! - [`Rod`] - one base-10 digit held as heaven/earth bead positions
//! - [`Abacus`] - a fixed-width row of rods, most significant first
//! - [`arith`] - rod-by-rod addition and subtraction with carry/borrow

mod rod;
mod abacus;
pub mod arith;

pub use rod::{Rod, BeadStateError};
pub use abacus::{Abacus, AbacusError, ParseError};
pub use arith::{add, sub, add_with_carry, sub_with_borrow, ArithError};
