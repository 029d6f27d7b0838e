//! Proportional split of a reward pool by power.

use crate::error::OperatorError;

/// Split `pool` across `weights` in proportion to each weight, rounding
/// every share down.
///
/// `pool` is the funding new to this cycle. Unclaimed amounts from earlier
/// roots are still owed to their accounts and must not be part of it; they
/// are added back per account by [`WeightManifest::allocate`]. The rounding
/// remainder is smaller than the number of non-zero weights and stays in the
/// pool contract.
///
/// [`WeightManifest::allocate`]: crate::manifest::WeightManifest::allocate
pub fn proportional<K: Clone>(
    pool: i128,
    weights: &[(K, u128)],
) -> Result<Vec<(K, i128)>, OperatorError> {
    if pool < 0 {
        return Err(OperatorError::NegativePool(pool));
    }
    let total = weights
        .iter()
        .try_fold(0u128, |acc, (_, weight)| acc.checked_add(*weight))
        .ok_or(OperatorError::Overflow)?;
    if total == 0 {
        return Err(OperatorError::ZeroWeight);
    }

    let pool_units = pool as u128;
    let shares = weights
        .iter()
        .map(|(key, weight)| {
            let share = pool_units
                .checked_mul(*weight)
                .ok_or(OperatorError::Overflow)?
                / total;
            let share = i128::try_from(share).map_err(|_| OperatorError::Overflow)?;
            Ok((key.clone(), share))
        })
        .collect::<Result<Vec<_>, OperatorError>>()?;

    let paid: i128 = shares.iter().map(|(_, share)| share).sum();
    tracing::debug!(pool, total_weight = %total, paid, dust = pool - paid, "split reward pool");
    Ok(shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_split() {
        let shares = proportional(1_000, &[("a", 1), ("b", 3)]).unwrap();
        assert_eq!(shares, vec![("a", 250), ("b", 750)]);
    }

    #[test]
    fn test_zero_weight_member_gets_nothing() {
        let shares = proportional(10, &[("a", 0), ("b", 7)]).unwrap();
        assert_eq!(shares, vec![("a", 0), ("b", 10)]);
    }

    #[test]
    fn test_rejects_degenerate_inputs() {
        assert!(matches!(
            proportional(10, &[("a", 0)]),
            Err(OperatorError::ZeroWeight)
        ));
        assert!(matches!(
            proportional::<&str>(10, &[]),
            Err(OperatorError::ZeroWeight)
        ));
        assert!(matches!(
            proportional(-1, &[("a", 1)]),
            Err(OperatorError::NegativePool(-1))
        ));
        assert!(matches!(
            proportional(i128::MAX, &[("a", u128::MAX / 2), ("b", u128::MAX / 2)]),
            Err(OperatorError::Overflow)
        ));
    }

    proptest! {
        #[test]
        fn dust_is_below_member_count(
            pool in 0i128..1_000_000_000_000,
            weights in proptest::collection::vec(1u128..1_000_000_000_000_000, 1..12),
        ) {
            let keyed: Vec<(usize, u128)> = weights.into_iter().enumerate().collect();
            let shares = proportional(pool, &keyed).unwrap();
            let paid: i128 = shares.iter().map(|(_, share)| share).sum();
            prop_assert!(paid <= pool);
            prop_assert!(pool - paid < keyed.len() as i128);
        }
    }
}
