//! Power accrual arithmetic.
//!
//! Power is never updated on a schedule. The stored state of a position is
//! advanced on demand by walking the accrual periods that completed since it
//! was last advanced.

use soroban_sdk::{Env, Vec};

use crate::storage;
use crate::types::{
    Position, ScheduleEpoch, ACCRUAL_PERIOD, BASE_POINTS, BASE_POWER_INCREASE, PERIODS_PER_YEAR,
};

/// Every version of the levelling schedule, loaded once per invocation.
pub struct Schedule {
    epochs: Vec<ScheduleEpoch>,
}

impl Schedule {
    pub fn load(env: &Env) -> Self {
        Self {
            epochs: storage::schedule(env),
        }
    }

    pub fn latest(&self) -> Option<ScheduleEpoch> {
        self.epochs.last()
    }

    /// Latest version that took effect before `at`. Times before the second
    /// version use the first.
    pub fn in_force(&self, at: u64) -> Option<ScheduleEpoch> {
        let mut current = self.epochs.first();
        for epoch in self.epochs.iter().skip(1) {
            if epoch.effective_from >= at {
                break;
            }
            current = Some(epoch);
        }
        current
    }

    pub fn increase_factor(&self, year: u32) -> u32 {
        self.latest().map_or(0, |epoch| epoch.increase_factor(year))
    }

    pub fn base_factor(&self, year: u32) -> u32 {
        self.latest().map_or(0, |epoch| epoch.base_factor(year))
    }
}

impl ScheduleEpoch {
    pub fn increase_factor(&self, year: u32) -> u32 {
        factor_at(&self.increase, year)
    }

    pub fn base_factor(&self, year: u32) -> u32 {
        factor_at(&self.base, year)
    }
}

/// Years past the end of a table reuse its last entry.
fn factor_at(table: &Vec<u32>, year: u32) -> u32 {
    table
        .get(year)
        .or_else(|| table.last())
        .unwrap_or(0)
}

/// The mutable accrual fields of a [`Position`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Accrual {
    pub level: u32,
    pub power: u128,
    pub remaining: u64,
    pub accumulated: u128,
}

impl Accrual {
    pub fn of(position: &Position) -> Self {
        Self {
            level: position.level,
            power: position.power,
            remaining: position.remaining_duration,
            accumulated: position.accumulated_power,
        }
    }

    /// Accrue the `elapsed` seconds of custody that follow `from`, levelling
    /// up at every completed accrual period.
    pub fn advance(&mut self, schedule: &Schedule, from: u64, mut elapsed: u64) {
        let mut clock = from;
        while elapsed >= self.remaining {
            self.accumulated += u128::from(self.remaining) * self.power;
            elapsed -= self.remaining;
            clock = clock.saturating_add(self.remaining);
            self.level_up(schedule.in_force(clock));
            self.remaining = ACCRUAL_PERIOD;
        }
        self.accumulated += u128::from(elapsed) * self.power;
        self.remaining -= elapsed;
    }

    fn level_up(&mut self, epoch: Option<ScheduleEpoch>) {
        // `level` starts at 1, so after this period completes it equals the
        // number of completed periods.
        let completed = self.level;
        let year = completed / PERIODS_PER_YEAR;
        if completed % PERIODS_PER_YEAR == 0 {
            let factor = epoch.map_or(0, |epoch| epoch.base_factor(year));
            let rebased = self.power * u128::from(factor) / u128::from(BASE_POINTS);
            self.power = self.power.max(rebased);
        } else {
            let factor = epoch.map_or(0, |epoch| epoch.increase_factor(year));
            self.power += BASE_POWER_INCREASE * u128::from(factor) / u128::from(BASE_POINTS);
        }
        self.level += 1;
    }

    pub fn store_into(&self, position: &mut Position) {
        position.level = self.level;
        position.power = self.power;
        position.remaining_duration = self.remaining;
        position.accumulated_power = self.accumulated;
    }
}

/// Accrual state of `position` projected to `now`. Positions at rest do not
/// accrue.
pub fn project(position: &Position, schedule: &Schedule, now: u64) -> Accrual {
    let mut accrual = Accrual::of(position);
    if position.depositor.is_some() {
        accrual.advance(
            schedule,
            position.last_accrual_time,
            now.saturating_sub(position.last_accrual_time),
        );
    }
    accrual
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BASE_POWER;
    use soroban_sdk::vec;

    fn default_schedule(env: &Env) -> Schedule {
        Schedule {
            epochs: vec![
                env,
                ScheduleEpoch {
                    effective_from: 0,
                    increase: vec![env, 10_000, 15_000, 20_000],
                    base: vec![env, 0, 15_000, 20_000],
                },
            ],
        }
    }

    fn fresh() -> Accrual {
        Accrual {
            level: 1,
            power: BASE_POWER,
            remaining: ACCRUAL_PERIOD,
            accumulated: 0,
        }
    }

    #[test]
    fn test_partial_period_accrues_at_base_rate() {
        let env = Env::default();
        let schedule = default_schedule(&env);
        let mut accrual = fresh();
        accrual.advance(&schedule, 0, 1_000);
        assert_eq!(accrual.accumulated, 1_000 * BASE_POWER);
        assert_eq!(accrual.power, BASE_POWER);
        assert_eq!(accrual.level, 1);
        assert_eq!(accrual.remaining, ACCRUAL_PERIOD - 1_000);
    }

    #[test]
    fn test_exact_period_levels_up() {
        let env = Env::default();
        let schedule = default_schedule(&env);
        let mut accrual = fresh();
        accrual.advance(&schedule, 0, ACCRUAL_PERIOD);
        assert_eq!(accrual.accumulated, u128::from(ACCRUAL_PERIOD) * BASE_POWER);
        assert_eq!(accrual.power, BASE_POWER + BASE_POWER_INCREASE);
        assert_eq!(accrual.level, 2);
        assert_eq!(accrual.remaining, ACCRUAL_PERIOD);
    }

    #[test]
    fn test_seconds_past_period_use_new_rate() {
        let env = Env::default();
        let schedule = default_schedule(&env);
        let mut accrual = fresh();
        accrual.advance(&schedule, 0, ACCRUAL_PERIOD + 3);
        assert_eq!(
            accrual.accumulated,
            u128::from(ACCRUAL_PERIOD) * BASE_POWER + 3 * (BASE_POWER + BASE_POWER_INCREASE)
        );
        assert_eq!(accrual.remaining, ACCRUAL_PERIOD - 3);
    }

    #[test]
    fn test_split_advance_matches_single_advance() {
        let env = Env::default();
        let schedule = default_schedule(&env);
        let mut whole = fresh();
        whole.advance(&schedule, 0, 5 * ACCRUAL_PERIOD + 17);

        let mut split = fresh();
        split.advance(&schedule, 0, 2 * ACCRUAL_PERIOD - 40);
        split.advance(&schedule, 2 * ACCRUAL_PERIOD - 40, 3 * ACCRUAL_PERIOD + 57);
        assert_eq!(whole, split);
    }

    #[test]
    fn test_year_boundary_never_lowers_power() {
        let env = Env::default();
        let schedule = default_schedule(&env);
        let mut accrual = fresh();
        let mut previous = accrual.power;
        for _ in 0..40 {
            accrual.advance(&schedule, 0, ACCRUAL_PERIOD);
            assert!(accrual.power >= previous);
            previous = accrual.power;
        }
        assert_eq!(accrual.level, 41);
    }

    #[test]
    fn test_second_year_uses_second_increase_factor() {
        let env = Env::default();
        let schedule = default_schedule(&env);
        let mut accrual = fresh();
        accrual.advance(&schedule, 0, 12 * ACCRUAL_PERIOD);
        let at_year = accrual.power;
        // 11 increments in year 0, then the year boundary re-bases.
        let eleven = BASE_POWER + 11 * BASE_POWER_INCREASE;
        assert_eq!(at_year, eleven.max(eleven * 15_000 / 10_000));

        accrual.advance(&schedule, 0, ACCRUAL_PERIOD);
        assert_eq!(accrual.power, at_year + BASE_POWER_INCREASE * 15_000 / 10_000);
    }

    #[test]
    fn test_factor_lookup_clamps_to_last_entry() {
        let env = Env::default();
        let schedule = default_schedule(&env);
        assert_eq!(schedule.increase_factor(0), 10_000);
        assert_eq!(schedule.increase_factor(2), 20_000);
        assert_eq!(schedule.increase_factor(9), 20_000);
        assert_eq!(schedule.base_factor(0), 0);
    }

    #[test]
    fn test_period_levels_up_under_version_in_force_at_completion() {
        let env = Env::default();
        let mut schedule = default_schedule(&env);
        schedule.epochs.push_back(ScheduleEpoch {
            effective_from: ACCRUAL_PERIOD,
            increase: vec![&env, 30_000],
            base: vec![&env, 0],
        });

        let mut accrual = fresh();
        accrual.advance(&schedule, 0, 2 * ACCRUAL_PERIOD);
        // The first period completed as the new version took effect.
        assert_eq!(
            accrual.power,
            BASE_POWER + BASE_POWER_INCREASE + BASE_POWER_INCREASE * 30_000 / 10_000
        );
    }

    #[test]
    fn test_version_lookup() {
        let env = Env::default();
        let mut schedule = default_schedule(&env);
        schedule.epochs.push_back(ScheduleEpoch {
            effective_from: 500,
            increase: vec![&env, 12_000],
            base: vec![&env, 0],
        });
        let factor = |at: u64| schedule.in_force(at).map(|epoch| epoch.increase_factor(0));
        assert_eq!(factor(0), Some(10_000));
        assert_eq!(factor(500), Some(10_000));
        assert_eq!(factor(501), Some(12_000));
        assert_eq!(schedule.increase_factor(0), 12_000);
        assert_eq!(Schedule { epochs: Vec::new(&env) }.in_force(10), None);
    }
}
