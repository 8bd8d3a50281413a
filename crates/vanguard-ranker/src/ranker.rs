//! The path ranking heuristic.

use std::collections::BTreeMap;
use std::fmt::Write;

use vanguard_core::config::BehaviorSettings;
use vanguard_core::constants::{
    AERO_CRASH_RANK, AERO_RETURN_RANK, AERO_STALL_RANK, FACING_ESCAPE_MOD,
    FACING_PENALTY_PER_STEP, IMPOSSIBLE_FALL_PENALTY, UNMOVED_FIRE_DISCOUNT, VTOL_RETURN_RANK,
};
use vanguard_core::enums::{AttackDirection, PhysicalKind, UnitKind};
use vanguard_core::game::Game;
use vanguard_core::rules::attack_direction;
use vanguard_core::types::{HexCoord, UnitId};
use vanguard_core::unit::Unit;
use vanguard_fire_control::physical::PhysicalInfo;
use vanguard_fire_control::planner::FireControl;
use vanguard_fire_control::shot::Target;
use vanguard_fire_control::state::EntityState;
use vanguard_pathing::path::MovePath;

use crate::ranked::RankedPath;

/// A movement-path ranking strategy.
pub trait PathRanker {
    /// Refresh per-turn caches before ranking one unit's candidate paths.
    fn init_unit_turn(&mut self, game: &Game, unit: &Unit);

    /// Utility of one candidate path, with a diagnostic breakdown.
    fn rank_path(&self, game: &Game, unit: &Unit, path: &MovePath) -> RankedPath;

    /// The best-ranked candidate. Equal ranks break on the path's stable
    /// hash, so the answer never depends on candidate order.
    fn best_path(&self, game: &Game, unit: &Unit, paths: &[MovePath]) -> Option<RankedPath> {
        paths
            .iter()
            .map(|path| self.rank_path(game, unit, path))
            .max()
    }
}

/// Offensive and defensive damage estimates for one mover/enemy pair.
struct DamageExchange {
    my_damage: f64,
    my_physical: f64,
    their_damage: f64,
}

/// The standard ranking heuristic: expected damage traded with every
/// enemy, shaded by the behavioral bias settings.
#[derive(Debug, Clone)]
pub struct BasicPathRanker {
    fire_control: FireControl,
    settings: BehaviorSettings,
    /// Per enemy, the most damage that enemy could do to the
    /// best-positioned friendly unit. Populated once per unit turn;
    /// callers use it to judge whether the mover is drawing fire.
    best_damage_by_enemies: BTreeMap<UnitId, f64>,
}

impl BasicPathRanker {
    pub fn new(settings: BehaviorSettings, fire_control: FireControl) -> Self {
        Self {
            fire_control,
            settings,
            best_damage_by_enemies: BTreeMap::new(),
        }
    }

    pub fn settings(&self) -> &BehaviorSettings {
        &self.settings
    }

    pub fn best_damage_by_enemies(&self) -> &BTreeMap<UnitId, f64> {
        &self.best_damage_by_enemies
    }

    /// Offense and return fire against one enemy that has already moved
    /// (or cannot move): both directions go through fire control, and an
    /// adjacent enemy gets a kick-retaliation estimate on top.
    fn evaluate_moved_enemy(
        &self,
        game: &Game,
        mover: &Unit,
        mover_state: &EntityState,
        enemy: &Unit,
        enemy_state: &EntityState,
    ) -> DamageExchange {
        let my_plan = self.fire_control.best_plan_with_twist(
            game,
            mover,
            mover_state,
            &Target::Unit(enemy),
            enemy_state,
        );
        let their_plan = self.fire_control.best_plan_with_twist(
            game,
            enemy,
            enemy_state,
            &Target::Unit(mover),
            mover_state,
        );

        let mut their_damage = their_plan.expected_damage();
        if let Some(kick) =
            PhysicalInfo::estimate(game, enemy, enemy_state, PhysicalKind::Kick, mover, mover_state)
        {
            their_damage += kick.expected_damage();
        }

        DamageExchange {
            my_damage: my_plan.expected_damage(),
            my_physical: self.best_physical_damage(game, mover, mover_state, enemy, enemy_state),
            their_damage,
        }
    }

    /// Offense and return fire against an enemy that has not moved yet.
    /// Their reply is a heuristic: if the mover's destination sits within
    /// one body turn plus a twist of the enemy's current facing, charge a
    /// discounted share of their full firepower. An enemy close enough to
    /// step behind the mover also charges a discounted kick.
    fn evaluate_unmoved_enemy(
        &self,
        game: &Game,
        mover: &Unit,
        mover_state: &EntityState,
        enemy: &Unit,
        enemy_state: &EntityState,
    ) -> DamageExchange {
        let my_plan = self.fire_control.best_plan_with_twist(
            game,
            mover,
            mover_state,
            &Target::Unit(enemy),
            enemy_state,
        );

        let range = enemy_state.position.distance(&mover_state.position);
        let toward_mover = enemy_state.position.direction_to(&mover_state.position);

        let mut their_damage = 0.0;
        // One turn of the torso on top of the projected body facing.
        if enemy_state.facing.rotation_distance(toward_mover) <= 2 {
            their_damage += UNMOVED_FIRE_DISCOUNT * enemy.max_damage_at(range);
        }
        if range <= enemy.max_mp() + 1 && self.exposes_flank(mover_state, &enemy_state.position) {
            their_damage += UNMOVED_FIRE_DISCOUNT * enemy.kick_damage();
        }

        DamageExchange {
            my_damage: my_plan.expected_damage(),
            my_physical: self.best_physical_damage(game, mover, mover_state, enemy, enemy_state),
            their_damage,
        }
    }

    /// Whether an enemy reaching `from` would find the mover's rear or
    /// flank facing it.
    fn exposes_flank(&self, mover_state: &EntityState, from: &HexCoord) -> bool {
        let toward_enemy = mover_state.position.direction_to(from);
        attack_direction(mover_state.facing, toward_enemy) != AttackDirection::Front
    }

    /// Best single physical attack the mover could land on this enemy.
    fn best_physical_damage(
        &self,
        game: &Game,
        mover: &Unit,
        mover_state: &EntityState,
        enemy: &Unit,
        enemy_state: &EntityState,
    ) -> f64 {
        [PhysicalKind::Kick, PhysicalKind::Punch]
            .into_iter()
            .filter_map(|kind| {
                PhysicalInfo::estimate(game, mover, mover_state, kind, enemy, enemy_state)
            })
            .map(|info| info.expected_damage())
            .fold(0.0, f64::max)
    }

    /// Angular distance, in hexside steps, between the path's final
    /// facing and the direction toward the nearest enemy (board center
    /// when no enemy is on the board).
    fn facing_bucket(&self, game: &Game, unit: &Unit, mover_state: &EntityState) -> u8 {
        let focus = game
            .enemies_of(unit.owner)
            .into_iter()
            .filter_map(|e| e.position)
            .min_by_key(|pos| (mover_state.position.distance(pos), *pos))
            .unwrap_or_else(|| game.board.center());
        if focus == mover_state.position {
            return 0;
        }
        mover_state
            .facing
            .rotation_distance(mover_state.position.direction_to(&focus))
    }
}

impl PathRanker for BasicPathRanker {
    /// Record, per enemy, the most damage that enemy could put on any
    /// friendly unit from current positions.
    fn init_unit_turn(&mut self, game: &Game, unit: &Unit) {
        self.best_damage_by_enemies.clear();
        let friends = game.friends_of(unit.owner);
        for enemy in game.enemies_of(unit.owner) {
            let Some(enemy_pos) = enemy.position else {
                continue;
            };
            let worst = friends
                .iter()
                .filter_map(|f| f.position)
                .map(|pos| enemy.max_damage_at(enemy_pos.distance(&pos)))
                .fold(0.0, f64::max);
            self.best_damage_by_enemies.insert(enemy.id, worst);
        }
    }

    fn rank_path(&self, game: &Game, unit: &Unit, path: &MovePath) -> RankedPath {
        // Flight short-circuits: these paths are verdicts, not tradeoffs.
        if unit.kind == UnitKind::Aerospace {
            if path.below_min_altitude {
                return RankedPath::new(path.clone(), AERO_CRASH_RANK, "crash".to_string());
            }
            if path.ends_at_zero_velocity {
                return RankedPath::new(path.clone(), AERO_STALL_RANK, "stall".to_string());
            }
        }
        if path.off_board_return {
            let rank = if unit.kind == UnitKind::Vtol {
                VTOL_RETURN_RANK
            } else {
                AERO_RETURN_RANK
            };
            return RankedPath::new(path.clone(), rank, "board return".to_string());
        }

        let Some(mover_state) = EntityState::from_path(unit, path) else {
            // No resolvable final position: hard facing penalty, surfaced
            // immediately as the rank.
            return RankedPath::new(
                path.clone(),
                -FACING_ESCAPE_MOD,
                "unresolvable final position".to_string(),
            );
        };

        let success = path.success_probability();
        let fall_mod = if success == 0.0 {
            IMPOSSIBLE_FALL_PENALTY
        } else {
            (1.0 - success) * self.settings.fall_shame
        };
        let mut utility = -fall_mod;

        let mut max_my_damage = 0.0f64;
        let mut max_my_physical = 0.0f64;
        let mut total_enemy_damage = 0.0;

        for enemy in game.enemies_of(unit.owner) {
            let Some(enemy_state) = EntityState::from_unit(enemy) else {
                continue;
            };
            let exchange = if enemy.moved || enemy.immobile {
                self.evaluate_moved_enemy(game, unit, &mover_state, enemy, &enemy_state)
            } else {
                self.evaluate_unmoved_enemy(game, unit, &mover_state, enemy, &enemy_state)
            };
            max_my_damage = max_my_damage.max(exchange.my_damage);
            max_my_physical = max_my_physical.max(exchange.my_physical);
            // Worst-case aggregate on defense, best case on offense.
            total_enemy_damage += exchange.their_damage;
        }

        for hex in &game.strategic_targets {
            let target_state = EntityState::stationary_at(*hex);
            let plan = self.fire_control.best_plan_with_twist(
                game,
                unit,
                &mover_state,
                &Target::Hex(*hex),
                &target_state,
            );
            max_my_damage = max_my_damage.max(plan.expected_damage());
        }

        if game.no_physical_player == Some(unit.owner) {
            max_my_physical = 0.0;
        }

        let bravery_mod =
            success * ((max_my_damage + max_my_physical) * self.settings.bravery - total_enemy_damage);
        utility += bravery_mod;

        // Aircraft skip the ground-bias terms.
        let mut aggression_mod = 0.0;
        let mut herding_mod = 0.0;
        if !unit.kind.is_airborne() {
            let closest = game
                .enemies_of(unit.owner)
                .into_iter()
                .filter_map(|e| e.position)
                .map(|pos| mover_state.position.distance(&pos))
                .min()
                .unwrap_or(0);
            aggression_mod = closest as f64 * self.settings.hyper_aggression;
            utility -= aggression_mod;

            if let Some(centroid) = game.friendly_centroid(unit.owner, Some(unit.id)) {
                let spread = mover_state.position.to_cartesian().distance(centroid);
                herding_mod = spread * self.settings.herd_mentality;
                utility -= herding_mod;
            }
        }

        let bucket = self.facing_bucket(game, unit, &mover_state);
        let facing_mod = (FACING_PENALTY_PER_STEP * (bucket as f64 - 1.0)).max(0.0);
        if facing_mod == FACING_ESCAPE_MOD {
            return RankedPath::new(path.clone(), -FACING_ESCAPE_MOD, "facing".to_string());
        }
        utility -= facing_mod;

        let mut preservation_mod = 0.0;
        if unit.crippled {
            if let Some(edge) = unit.home_edge {
                let retreat = game.board.distance_to_edge(&mover_state.position, edge);
                preservation_mod = retreat as f64 * self.settings.self_preservation;
                utility -= preservation_mod;
            }
        }

        let mut reason = format!(
            "fall {fall_mod:.2}; bravery {bravery_mod:.2} \
             (damage {max_my_damage:.2}, physical {max_my_physical:.2}, \
             taken {total_enemy_damage:.2})"
        );
        let _ = write!(
            reason,
            "; aggression {aggression_mod:.2}; herding {herding_mod:.2}; \
             facing {facing_mod:.2}; preservation {preservation_mod:.2}"
        );
        tracing::trace!(unit = %unit.id, rank = utility, "ranked path");

        RankedPath::new(path.clone(), utility, reason)
    }
}
