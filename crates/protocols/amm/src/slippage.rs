//! Slippage bounds
//!
//! Exact integer bounds passed to the swap transaction. The contract enforces
//! them; this module only computes them.

use num_bigint::BigUint;
use num_traits::Zero;
use route_core::{Amount, RouteError, SwapDirection};
use rust_decimal::Decimal;

/// Minimum acceptable output: `floor(amount * (1 - rate))`
pub fn slippage_min(amount: &Amount, rate: Decimal) -> Result<Amount, RouteError> {
    let (numerator, scale) = rate_parts(rate)?;
    let factor = &scale - numerator;
    Ok(Amount::from(amount.as_biguint() * factor / scale))
}

/// Maximum acceptable input: `ceil(amount * (1 + rate))`
pub fn slippage_max(amount: &Amount, rate: Decimal) -> Result<Amount, RouteError> {
    let (numerator, scale) = rate_parts(rate)?;
    let factor = &scale + numerator;
    let product = amount.as_biguint() * factor;
    Ok(Amount::from(div_ceil(product, &scale)))
}

/// Bound matching the fixed side of the swap: minimum output for exact-in,
/// maximum input for exact-out
pub fn apply_slippage(
    amount: &Amount,
    rate: Decimal,
    direction: SwapDirection,
) -> Result<Amount, RouteError> {
    match direction {
        SwapDirection::ExactIn => slippage_min(amount, rate),
        SwapDirection::ExactOut => slippage_max(amount, rate),
    }
}

/// Validate a rate and split it into `mantissa / 10^scale`
fn rate_parts(rate: Decimal) -> Result<(BigUint, BigUint), RouteError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(RouteError::invalid(format!(
            "slippage rate {} is outside [0, 1]",
            rate
        )));
    }

    let mantissa = rate.mantissa().unsigned_abs();
    let scale = BigUint::from(10u32).pow(rate.scale());
    Ok((BigUint::from(mantissa), scale))
}

fn div_ceil(numerator: BigUint, denominator: &BigUint) -> BigUint {
    let quotient = &numerator / denominator;
    if (numerator % denominator).is_zero() {
        quotient
    } else {
        quotient + 1u32
    }
}
