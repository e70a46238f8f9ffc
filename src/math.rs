#[cfg(feature = "std")]
pub fn floor(amount: f64) -> f64 {
    amount.floor()
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub fn floor(amount: f64) -> f64 {
    libm::floor(amount)
}

/// Floors `amount` and clamps it into `usize`.
#[expect(
    clippy::cast_precision_loss,
    reason = "f64 has sufficient precision for card and chip counts"
)]
pub fn floor_to_usize(amount: f64) -> usize {
    let floored = floor(amount);
    if floored <= 0.0 {
        0
    } else if floored >= usize::MAX as f64 {
        usize::MAX
    } else {
        floored as usize
    }
}
