//! The fire-control planner.
//!
//! Enumerates weapon subsets under a heat budget with a dynamic program
//! over discrete heat levels, evaluates torso-twist options, and picks the
//! best plan for a shooter/target pair or across every enemy on the board.

use vanguard_core::config::FireControlWeights;
use vanguard_core::constants::HEAT_OVERFLOW_ALLOWANCE;
use vanguard_core::enums::PhysicalKind;
use vanguard_core::game::Game;
use vanguard_core::unit::Unit;

use crate::physical::PhysicalInfo;
use crate::plan::{FiringPlan, PhysicalPlan};
use crate::shot::{Target, WeaponFireInfo};
use crate::state::EntityState;

#[derive(Debug, Clone, Default)]
pub struct FireControl {
    pub weights: FireControlWeights,
}

impl FireControl {
    pub fn new(weights: FireControlWeights) -> Self {
        Self { weights }
    }

    /// Scalar utility of a weapon plan. Physical plans use
    /// `physical_utility`; they carry no overheat term.
    pub fn utility(&self, plan: &FiringPlan, overheat_threshold: i32) -> f64 {
        let overheat = (plan.heat() as i32 - overheat_threshold).max(0) as f64;
        self.weights.damage * plan.expected_damage()
            + self.weights.critical * plan.expected_criticals()
            + self.weights.kill * plan.kill_probability()
            - self.weights.overheat * overheat
    }

    pub fn physical_utility(&self, info: &PhysicalInfo) -> f64 {
        self.weights.damage * info.expected_damage()
            + self.weights.critical * info.expected_criticals
            + self.weights.kill * info.kill_probability
    }

    /// Heat the shooter can take on this turn before the overheat
    /// disutility starts biting.
    pub fn overheat_threshold(&self, shooter: &Unit, shooter_state: &EntityState) -> i32 {
        (shooter.heat_capacity - shooter_state.heat).max(0)
    }

    /// Heat budget handed to the subset search: dissipation headroom plus
    /// a small overflow allowance the utility term can veto.
    pub fn heat_budget(&self, shooter: &Unit, shooter_state: &EntityState) -> u32 {
        (shooter.heat_capacity - shooter_state.heat + HEAT_OVERFLOW_ALLOWANCE).max(0) as u32
    }

    /// Best weapon subset at heat <= `heat_budget`, as a DP over heat
    /// levels. Zero-heat weapons are always included. The DP prevents
    /// weapon reuse with an explicit membership check rather than a formal
    /// exclusion structure, so it approximates the exact knapsack optimum.
    pub fn best_plan_under_heat(
        &self,
        game: &Game,
        shooter: &Unit,
        shooter_state: &EntityState,
        target: &Target<'_>,
        target_state: &EntityState,
        heat_budget: u32,
        twist: i8,
    ) -> FiringPlan {
        let overheat_threshold = self.overheat_threshold(shooter, shooter_state);

        let mut zero_heat: Vec<WeaponFireInfo> = Vec::new();
        let mut hot: Vec<WeaponFireInfo> = Vec::new();
        for index in 0..shooter.weapons.len() {
            if let Some(shot) = WeaponFireInfo::estimate(
                game,
                shooter,
                shooter_state,
                index,
                target,
                target_state,
            ) {
                if shot.heat == 0 {
                    zero_heat.push(shot);
                } else {
                    hot.push(shot);
                }
            }
        }

        let mut base = FiringPlan::new(twist);
        for shot in zero_heat {
            base.push(shot);
        }
        base.utility = self.utility(&base, overheat_threshold);

        let budget = heat_budget as usize;
        let mut table: Vec<FiringPlan> = Vec::with_capacity(budget + 1);
        table.push(base);

        for level in 1..=budget {
            let mut best = table[level - 1].clone();
            for shot in &hot {
                let cost = shot.heat as usize;
                if cost > level {
                    continue;
                }
                let prior = &table[level - cost];
                if prior.contains_weapon(shot.weapon_index) {
                    continue;
                }
                let mut candidate = prior.clone();
                candidate.push(shot.clone());
                candidate.utility = self.utility(&candidate, overheat_threshold);
                if candidate.utility > best.utility {
                    best = candidate;
                }
            }
            table.push(best);
        }

        table.pop().unwrap_or_default()
    }

    /// Best plan across the twist options the chassis supports. The twist
    /// winner is chosen by raw expected damage, not utility.
    pub fn best_plan_with_twist(
        &self,
        game: &Game,
        shooter: &Unit,
        shooter_state: &EntityState,
        target: &Target<'_>,
        target_state: &EntityState,
    ) -> FiringPlan {
        let heat_budget = self.heat_budget(shooter, shooter_state);
        let mut best = self.best_plan_under_heat(
            game,
            shooter,
            shooter_state,
            target,
            target_state,
            heat_budget,
            0,
        );

        if shooter.can_twist {
            for twist in [-1i8, 1] {
                let mut twisted_state = shooter_state.clone();
                twisted_state.set_secondary_facing(shooter_state.facing.twisted(twist));
                let plan = self.best_plan_under_heat(
                    game,
                    shooter,
                    &twisted_state,
                    target,
                    target_state,
                    heat_budget,
                    twist,
                );
                if plan.expected_damage() > best.expected_damage() {
                    best = plan;
                }
            }
        }

        best
    }

    /// Best plan across every deployed enemy and every strategic target.
    /// Ties keep the earliest (lowest-id) candidate.
    pub fn best_plan_among(
        &self,
        game: &Game,
        shooter: &Unit,
        shooter_state: &EntityState,
    ) -> FiringPlan {
        let mut best = FiringPlan::default();

        for enemy in game.enemies_of(shooter.owner) {
            let Some(enemy_state) = EntityState::from_unit(enemy) else {
                continue;
            };
            let plan = self.best_plan_with_twist(
                game,
                shooter,
                shooter_state,
                &Target::Unit(enemy),
                &enemy_state,
            );
            if plan.utility > best.utility {
                best = plan;
            }
        }

        for hex in &game.strategic_targets {
            let target_state = EntityState::stationary_at(*hex);
            let plan = self.best_plan_with_twist(
                game,
                shooter,
                shooter_state,
                &Target::Hex(*hex),
                &target_state,
            );
            if plan.utility > best.utility {
                best = plan;
            }
        }

        if !best.is_empty() {
            tracing::trace!(shooter = %shooter.id, "{}", best.describe());
        }
        best
    }

    /// Best physical attack across adjacent enemies, or `None`.
    pub fn best_physical(
        &self,
        game: &Game,
        shooter: &Unit,
        shooter_state: &EntityState,
    ) -> Option<PhysicalPlan> {
        let mut best: Option<PhysicalPlan> = None;
        for enemy in game.enemies_of(shooter.owner) {
            let Some(enemy_state) = EntityState::from_unit(enemy) else {
                continue;
            };
            for kind in [PhysicalKind::Kick, PhysicalKind::Punch] {
                let Some(attack) = PhysicalInfo::estimate(
                    game,
                    shooter,
                    shooter_state,
                    kind,
                    enemy,
                    &enemy_state,
                ) else {
                    continue;
                };
                let utility = self.physical_utility(&attack);
                if best.as_ref().map_or(true, |b| utility > b.utility) {
                    best = Some(PhysicalPlan { attack, utility });
                }
            }
        }
        best
    }
}
