//! Fee accounting for the ColorGrid game.
//!
//! Every function here is pure integer maths so the contract can run the
//! whole computation before it touches storage.

use crate::Balance;

// =========================================================================
// CONSTANTS
// =========================================================================

/// Basis-point denominator for the price step.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Time bank receives 8/10 of every accepted payment.
pub const TIME_BANK_NUMERATOR: u128 = 8;

/// Denominator of the pool split. The color bank takes the remainder.
pub const SPLIT_DENOMINATOR: u128 = 10;

// =========================================================================
// POOL SPLIT
// =========================================================================

/// Split of one accepted payment between the two pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSplit {
    pub time_bank: Balance,
    pub color_bank: Balance,
}

/// Splits `amount` 80/20 with truncating division.
///
/// `amount = 10q + r` gives `floor(8·amount / 10) = 8q + floor(8r / 10)`, so
/// the time share never needs the overflowing product `8 · amount`. The color
/// share is the remainder, which keeps `time_bank + color_bank == amount`.
pub fn split_payment(amount: Balance) -> PoolSplit {
    let quotient = amount / SPLIT_DENOMINATOR;
    let remainder = amount % SPLIT_DENOMINATOR;
    let time_bank = quotient * TIME_BANK_NUMERATOR + remainder * TIME_BANK_NUMERATOR / SPLIT_DENOMINATOR;

    PoolSplit {
        time_bank,
        color_bank: amount - time_bank,
    }
}

// =========================================================================
// PRICING
// =========================================================================

/// Price after one accepted paint.
///
/// Grows by `step_bps` of the current price, never by less than one unit.
/// Returns `None` when the next price would not fit in a `Balance`.
pub fn next_price(price: Balance, step_bps: u32) -> Option<Balance> {
    let step_bps = u128::from(step_bps);
    let increment = (price / BPS_DENOMINATOR)
        .checked_mul(step_bps)?
        .checked_add(price % BPS_DENOMINATOR * step_bps / BPS_DENOMINATOR)?
        .max(1);
    price.checked_add(increment)
}

// =========================================================================
// PRO-RATA SHARES
// =========================================================================

/// `floor(reward · strokes / total_strokes)` without the wide product.
///
/// Returns zero for an empty `total_strokes`. Callers pass
/// `strokes <= total_strokes`, which keeps the result at most `reward`.
pub fn pro_rata_share(reward: Balance, strokes: u32, total_strokes: u32) -> Balance {
    if total_strokes == 0 {
        return 0;
    }
    let strokes = u128::from(strokes);
    let total = u128::from(total_strokes);

    // reward = q·total + r  =>  reward·s/total = q·s + r·s/total
    let quotient = reward / total;
    let remainder = reward % total;
    quotient * strokes + remainder * strokes / total
}
