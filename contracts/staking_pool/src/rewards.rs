//! Pure arithmetic for the proportional reward formula.

/// Reward for a position of `staked` tokens when the pool holds
/// `total_staked` against a boundary of `boundary_supply`:
///
/// ```text
/// reward = staked * reward_percentage * total_staked / (100 * boundary_supply)
/// ```
///
/// The numerator is multiplied out in full before the one flooring
/// division, so a `total_staked / boundary_supply` ratio below one scales
/// the payout down instead of truncating it to zero. Returns `None` on
/// overflow or a non-positive `boundary_supply`.
pub fn compute_reward(
    staked: i128,
    reward_percentage: u32,
    total_staked: i128,
    boundary_supply: i128,
) -> Option<i128> {
    if boundary_supply <= 0 {
        return None;
    }
    let numerator = staked
        .checked_mul(i128::from(reward_percentage))?
        .checked_mul(total_staked)?;
    let denominator = 100i128.checked_mul(boundary_supply)?;
    numerator.checked_div(denominator)
}

/// Seconds elapsed since `since`, clamped at zero for clocks that moved
/// backwards.
pub fn elapsed(now: u64, since: u64) -> u64 {
    now.saturating_sub(since)
}
