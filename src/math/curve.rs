//! Constant-product curve formulas.
//!
//! Pure functions over raw reserves.  They never touch pool state; the
//! engine calls them to build a transition and the quote methods call
//! them directly, which is what keeps quotes and executions identical.

use super::mul_div::{mul_div, narrow, wide_product, U256};
use crate::domain::{Amount, Decimals, FeeTier, Rounding, Shares};
use crate::error::AmmError;

/// Fixed-point scale of spot prices: 18 decimals.
pub const PRICE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Counterpart deposit keeping the current ratio:
/// `floor(amount_x * reserve_y / reserve_x)`.
///
/// # Errors
///
/// - [`AmmError::InvalidAmount`] if `amount_x` is zero.
/// - [`AmmError::EmptyPool`] if either reserve is zero.
/// - [`AmmError::Overflow`] if the result exceeds `u128`.
pub fn deposit_counterpart(
    amount_x: Amount,
    reserve_x: Amount,
    reserve_y: Amount,
) -> Result<Amount, AmmError> {
    if amount_x.is_zero() {
        return Err(AmmError::InvalidAmount("deposit amount must be positive"));
    }
    if reserve_x.is_zero() || reserve_y.is_zero() {
        return Err(AmmError::EmptyPool);
    }
    amount_x.mul_div(reserve_y.get(), reserve_x.get(), Rounding::Down)
}

/// Shares minted by the first deposit into an empty pool:
/// `amount_a` rescaled to 18 decimals, divided by `divisor`.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `divisor` is zero.
/// - [`AmmError::InvalidAmount`] if the result truncates to zero.
/// - [`AmmError::Overflow`] if rescaling overflows.
pub fn initial_shares(
    amount_a: Amount,
    decimals_a: Decimals,
    divisor: u128,
) -> Result<Shares, AmmError> {
    let normalized = decimals_a.normalize(amount_a.get())?;
    let minted = crate::math::div_round(normalized, divisor, Rounding::Down)
        .ok_or(AmmError::DivisionByZero)?;
    if minted == 0 {
        return Err(AmmError::InvalidAmount("deposit too small to mint a share"));
    }
    Ok(Shares::new(minted))
}

/// Shares minted by a deposit into a funded pool: `total * amount_a /
/// reserve_a`, truncated.  The token B side is the ratio-derived amount, so
/// token A alone sets the proportion.
///
/// # Errors
///
/// - [`AmmError::EmptyPool`] if `reserve_a` or `total` is zero.
/// - [`AmmError::InvalidAmount`] if the result truncates to zero.
pub fn proportional_shares(
    total: Shares,
    amount_a: Amount,
    reserve_a: Amount,
) -> Result<Shares, AmmError> {
    if total.is_zero() || reserve_a.is_zero() {
        return Err(AmmError::EmptyPool);
    }
    let minted = mul_div(total.get(), amount_a.get(), reserve_a.get(), Rounding::Down)?;
    if minted == 0 {
        return Err(AmmError::InvalidAmount("deposit too small to mint a share"));
    }
    Ok(Shares::new(minted))
}

/// Output of a swap and the fee withheld from its input.
///
/// The fee is `ceil(amount_in * bps / 10_000)`.  The remaining input is
/// priced against the curve and the post-trade output reserve is rounded
/// up, so `(reserve_in + amount_in) * (reserve_out - out)` is never below
/// `reserve_in * reserve_out`.
///
/// # Errors
///
/// - [`AmmError::InvalidAmount`] if `amount_in` is zero or the fee
///   consumes all of it.
/// - [`AmmError::EmptyPool`] if either reserve is zero.
/// - [`AmmError::InsufficientOutput`] if the output rounds to zero.
/// - [`AmmError::Overflow`] if `reserve_in + amount_in` exceeds `u128`.
pub fn swap_output(
    reserve_in: Amount,
    reserve_out: Amount,
    amount_in: Amount,
    fee_tier: FeeTier,
) -> Result<(Amount, Amount), AmmError> {
    if amount_in.is_zero() {
        return Err(AmmError::InvalidAmount("swap amount must be positive"));
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::EmptyPool);
    }
    let fee = fee_tier.fee_on(amount_in)?;
    let net_in = amount_in
        .checked_sub(&fee)
        .filter(|net| !net.is_zero())
        .ok_or(AmmError::InvalidAmount("swap amount does not cover the fee"))?;
    if reserve_in.checked_add(&amount_in).is_none() {
        return Err(AmmError::Overflow("input reserve overflow"));
    }

    let priced_in = reserve_in
        .checked_add(&net_in)
        .ok_or(AmmError::Overflow("input reserve overflow"))?;
    let k = wide_product(reserve_in.get(), reserve_out.get());
    let (quotient, remainder) = k.div_mod(U256::from(priced_in.get()));
    let kept = if remainder.is_zero() {
        quotient
    } else {
        quotient + U256::one()
    };
    let kept = Amount::new(narrow(kept)?);

    let out = reserve_out
        .checked_sub(&kept)
        .ok_or(AmmError::InvariantViolation("post-trade reserve above pre-trade"))?;
    if out.is_zero() || out >= reserve_out {
        return Err(AmmError::InsufficientOutput);
    }
    Ok((out, fee))
}

/// Token amounts redeemed by burning `shares` out of `total`:
/// `floor(reserve * shares / total)` per side.
///
/// # Errors
///
/// - [`AmmError::EmptyPool`] if `total` is zero.
/// - [`AmmError::InsufficientShares`] if `shares` exceeds `total`.
pub fn withdrawal_amounts(
    reserve_a: Amount,
    reserve_b: Amount,
    total: Shares,
    shares: Shares,
) -> Result<(Amount, Amount), AmmError> {
    if total.is_zero() {
        return Err(AmmError::EmptyPool);
    }
    if shares > total {
        return Err(AmmError::InsufficientShares {
            requested: shares,
            available: total,
        });
    }
    let amount_a = reserve_a.mul_div(shares.get(), total.get(), Rounding::Down)?;
    let amount_b = reserve_b.mul_div(shares.get(), total.get(), Rounding::Down)?;
    Ok((amount_a, amount_b))
}

/// `reserve_quote / reserve_base` as an 18-decimal fixed-point value,
/// truncated.
///
/// # Errors
///
/// Returns [`AmmError::EmptyPool`] if `reserve_base` is zero.
pub fn spot_price(reserve_base: Amount, reserve_quote: Amount) -> Result<Amount, AmmError> {
    if reserve_base.is_zero() {
        return Err(AmmError::EmptyPool);
    }
    reserve_quote.mul_div(PRICE_SCALE, reserve_base.get(), Rounding::Down)
}
