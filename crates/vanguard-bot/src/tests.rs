#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use vanguard_core::config::{BehaviorSettings, FireControlWeights};
    use vanguard_core::enums::GamePhase;
    use vanguard_core::events::GameEvent;
    use vanguard_core::game::Game;
    use vanguard_core::types::{Facing, UnitId};

    use crate::brain::Brain;
    use crate::scenario::{generate, ScenarioConfig};

    fn brain_for(game: Game) -> Brain {
        Brain::new(
            Arc::new(RwLock::new(game)),
            BehaviorSettings::default(),
            FireControlWeights::default(),
        )
    }

    #[test]
    fn test_scenario_generation_is_reproducible() {
        let config = ScenarioConfig {
            seed: 42,
            ..ScenarioConfig::default()
        };
        let first = generate(&config);
        let second = generate(&config);

        assert_eq!(first.units.len(), 8);
        for (a, b) in first.units().zip(second.units()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.position, b.position);
            assert_eq!(a.gunnery, b.gunnery);
            assert_eq!(a.piloting, b.piloting);
        }

        let different = generate(&ScenarioConfig {
            seed: 43,
            ..config
        });
        let moved = first
            .units()
            .zip(different.units())
            .any(|(a, b)| a.position != b.position || a.gunnery != b.gunnery);
        assert!(moved, "different seeds should produce different setups");
    }

    #[test]
    fn test_best_path_is_deterministic_across_brains() {
        let config = ScenarioConfig {
            seed: 7,
            ..ScenarioConfig::default()
        };
        let mut first = brain_for(generate(&config));
        let mut second = brain_for(generate(&config));

        let a = first.best_path(UnitId(1)).expect("unit 1 should move");
        let b = second.best_path(UnitId(1)).expect("unit 1 should move");
        assert_eq!(a.path.key(), b.path.key());
        assert_eq!(a.rank.to_bits(), b.rank.to_bits());
    }

    #[test]
    fn test_best_path_converges_cache_to_live_state() {
        let game = Arc::new(RwLock::new(generate(&ScenarioConfig {
            seed: 3,
            ..ScenarioConfig::default()
        })));
        let mut brain = Brain::new(
            Arc::clone(&game),
            BehaviorSettings::default(),
            FireControlWeights::default(),
        );
        brain.notify(GameEvent::PhaseChanged {
            phase: GamePhase::Movement,
        });

        // Shuffle a unit and report it.
        {
            let mut game = game.write().unwrap();
            let unit = game.units.get_mut(&UnitId(2)).unwrap();
            let position = unit.position.unwrap();
            unit.position = Some(position.neighbor(unit.facing));
            unit.facing = Facing::new(2);
        }
        brain.notify(GameEvent::UnitChanged { unit: UnitId(2) });

        // best_path runs the drain barrier before ranking.
        brain.best_path(UnitId(1)).expect("unit 1 should move");

        let cache = brain.precognition().cache();
        let cache = cache.read().unwrap();
        let game = game.read().unwrap();
        for unit in game.units() {
            let expected = unit.position.map(|p| (p, unit.facing));
            assert_eq!(
                cache.last_known.get(&unit.id).copied(),
                expected,
                "stale cache for {}",
                unit.id
            );
        }
    }

    #[test]
    fn test_firing_plan_respects_heat_budget() {
        let mut game = generate(&ScenarioConfig {
            seed: 11,
            board_height: 8,
            ..ScenarioConfig::default()
        });
        game.phase = GamePhase::Firing;
        let brain = brain_for(game);

        for id in 1..=8u32 {
            let plan = brain.best_firing_plan(UnitId(id));
            // Capacity 10, heat 0, overflow allowance 4.
            assert!(plan.heat() <= 14, "unit {id} over budget: {}", plan.heat());
        }
    }

    #[test]
    fn test_firing_plan_against_missing_unit_is_empty() {
        let brain = brain_for(generate(&ScenarioConfig::default()));
        let plan = brain.best_firing_plan_against(UnitId(1), UnitId(99));
        assert!(plan.is_empty());
        assert!(brain.best_firing_plan(UnitId(99)).is_empty());
        assert!(brain.best_physical_attack(UnitId(99)).is_none());
    }

    #[test]
    fn test_physical_attack_requires_adjacency() {
        // Opposite-edge deployment on a tall board: nobody starts adjacent.
        let brain = brain_for(generate(&ScenarioConfig {
            seed: 5,
            ..ScenarioConfig::default()
        }));
        for id in 1..=8u32 {
            assert!(brain.best_physical_attack(UnitId(id)).is_none());
        }
    }
}
