//! AMM Calculator
//!
//! Constant product swap math (x * y = k) for offline simulation.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Fee numerator for a 0.3% pool
pub const FEE_NUM: u32 = 997;

/// Fee denominator
pub const FEE_DENOM: u32 = 1000;

/// Calculate swap output using constant product formula
///
/// Formula: output = (reserves_out * input * fee_num) / (reserves_in * fee_denom + input * fee_num)
///
/// Returns `None` when the pool is empty or the input is zero.
pub fn calculate_output(
    reserves_in: &BigUint,
    reserves_out: &BigUint,
    input_amount: &BigUint,
) -> Option<BigUint> {
    if reserves_in.is_zero() || reserves_out.is_zero() || input_amount.is_zero() {
        return None;
    }

    let input_with_fee = input_amount * FEE_NUM;
    let numerator = &input_with_fee * reserves_out;
    let denominator = reserves_in * FEE_DENOM + input_with_fee;

    Some(numerator / denominator)
}

/// Calculate required input for desired output (reverse calculation)
///
/// Formula: input = (reserves_in * output * fee_denom) / ((reserves_out - output) * fee_num) + 1
///
/// Returns `None` if the output would drain the pool.
pub fn calculate_input(
    reserves_in: &BigUint,
    reserves_out: &BigUint,
    output_amount: &BigUint,
) -> Option<BigUint> {
    if reserves_in.is_zero() || reserves_out.is_zero() || output_amount.is_zero() {
        return None;
    }
    if output_amount >= reserves_out {
        return None;
    }

    let numerator = reserves_in * output_amount * FEE_DENOM;
    let denominator = (reserves_out - output_amount) * FEE_NUM;

    // Round up
    Some(numerator / denominator + BigUint::one())
}
