//! Integer arithmetic for the pool engine.
//!
//! - [`div_round`]: `u128` division with an explicit [`Rounding`](crate::domain::Rounding).
//! - [`mul_div`]: multiply-then-divide through a 256-bit intermediate.
//! - [`CheckedArithmetic`]: `Result`-returning add/sub for quantity types.
//! - [`curve`]: the constant-product formulas shared by quotes and
//!   executions.

mod checked;
pub mod curve;
mod mul_div;
mod rounding;

pub use checked::CheckedArithmetic;
pub use mul_div::{mul_div, narrow, wide_product, U256};
pub use rounding::div_round;
