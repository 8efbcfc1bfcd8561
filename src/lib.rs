//! # Soroban
//!
//! A simulation of the Japanese soroban abacus.
//!
//! Every rod stores its digit as the physical position of one heaven bead
//! and four earth beads. Addition and subtraction move beads rod by rod,
//! carrying and borrowing between neighbours the way a hand on a real
//! frame would.

pub mod beads;

// Re-export commonly used types
pub use beads::{Rod, Abacus, AbacusError, ArithError, BeadStateError, ParseError};
pub use beads::{add, sub, add_with_carry, sub_with_borrow};
