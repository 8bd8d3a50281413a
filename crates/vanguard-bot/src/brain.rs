//! The decision facade.

use std::sync::{Arc, RwLock};

use vanguard_core::config::{BehaviorSettings, FireControlWeights};
use vanguard_core::events::GameEvent;
use vanguard_core::game::Game;
use vanguard_core::types::UnitId;
use vanguard_fire_control::plan::{FiringPlan, PhysicalPlan};
use vanguard_fire_control::planner::FireControl;
use vanguard_fire_control::shot::Target;
use vanguard_fire_control::state::EntityState;
use vanguard_pathing::precognition::Precognition;
use vanguard_pathing::reachable::enumerate_paths;
use vanguard_ranker::ranked::RankedPath;
use vanguard_ranker::ranker::{BasicPathRanker, PathRanker};

/// One bot's decision-making state for one game session. Owns the
/// background precomputation worker; dropping the brain stops it.
pub struct Brain {
    game: Arc<RwLock<Game>>,
    precognition: Precognition,
    fire_control: FireControl,
    ranker: BasicPathRanker,
}

impl Brain {
    pub fn new(
        game: Arc<RwLock<Game>>,
        settings: BehaviorSettings,
        weights: FireControlWeights,
    ) -> Self {
        let precognition = Precognition::spawn(Arc::clone(&game));
        let fire_control = FireControl::new(weights);
        let ranker = BasicPathRanker::new(settings, fire_control.clone());
        Self {
            game,
            precognition,
            fire_control,
            ranker,
        }
    }

    /// Forward a game-state-change event to the precomputation engine.
    pub fn notify(&self, event: GameEvent) {
        self.precognition.notify(event);
    }

    /// Direct access to the precomputation engine, mostly for inspection.
    pub fn precognition(&self) -> &Precognition {
        &self.precognition
    }

    /// The highest-ranked legal movement path for a unit this turn.
    /// `None` when the unit is missing, off board, or poisoned locks make
    /// the game state unreadable.
    pub fn best_path(&mut self, unit: UnitId) -> Option<RankedPath> {
        self.precognition.ensure_up_to_date();
        let game = self.game.read().ok()?;
        let mover = game.unit(unit)?;
        let paths = enumerate_paths(&game, mover);
        self.ranker.init_unit_turn(&game, mover);
        let best = self.ranker.best_path(&game, mover, &paths);
        if let Some(ranked) = &best {
            tracing::debug!(unit = %unit, rank = ranked.rank, "best path chosen");
        }
        best
    }

    /// The best firing plan for a shooter across every target on the
    /// board. Empty when the shooter is missing or has nothing to shoot.
    pub fn best_firing_plan(&self, shooter: UnitId) -> FiringPlan {
        let Ok(game) = self.game.read() else {
            return FiringPlan::default();
        };
        let Some(unit) = game.unit(shooter) else {
            return FiringPlan::default();
        };
        let Some(state) = EntityState::from_unit(unit) else {
            return FiringPlan::default();
        };
        self.fire_control.best_plan_among(&game, unit, &state)
    }

    /// The best firing plan against one specific target.
    pub fn best_firing_plan_against(&self, shooter: UnitId, target: UnitId) -> FiringPlan {
        let Ok(game) = self.game.read() else {
            return FiringPlan::default();
        };
        let (Some(unit), Some(enemy)) = (game.unit(shooter), game.unit(target)) else {
            return FiringPlan::default();
        };
        let (Some(state), Some(enemy_state)) =
            (EntityState::from_unit(unit), EntityState::from_unit(enemy))
        else {
            return FiringPlan::default();
        };
        self.fire_control
            .best_plan_with_twist(&game, unit, &state, &Target::Unit(enemy), &enemy_state)
    }

    /// The best physical attack for a shooter, or `None` when no kick or
    /// punch is possible.
    pub fn best_physical_attack(&self, shooter: UnitId) -> Option<PhysicalPlan> {
        let game = self.game.read().ok()?;
        let unit = game.unit(shooter)?;
        let state = EntityState::from_unit(unit)?;
        self.fire_control.best_physical(&game, unit, &state)
    }
}
