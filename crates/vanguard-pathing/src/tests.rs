#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use vanguard_core::board::{Board, Hex};
    use vanguard_core::enums::{GamePhase, MovementKind, UnitKind};
    use vanguard_core::events::GameEvent;
    use vanguard_core::game::Game;
    use vanguard_core::types::{Facing, HexCoord, UnitId};
    use vanguard_core::unit::Unit;

    use crate::path::MovePath;
    use crate::precognition::Precognition;
    use crate::reachable::{compute_movable_area, enumerate_paths, AERO_MIN_ALTITUDE};

    fn open_game() -> Game {
        let mut game = Game::new(Board::new(20, 20));
        game.phase = GamePhase::Movement;
        game
    }

    fn deployed_unit(id: u32, owner: u32, q: i32, r: i32) -> Unit {
        let mut unit = Unit::new(id, owner, "Trooper", UnitKind::Mek);
        unit.position = Some(HexCoord::new(q, r));
        unit
    }

    #[test]
    fn test_movable_area_bounded_by_run_mp() {
        let game = open_game();
        let unit = deployed_unit(1, 0, 10, 5);
        let area = compute_movable_area(&game, &unit).unwrap();

        let start = unit.position.unwrap();
        assert!(area.contains(&start));
        for coord in &area.coords {
            assert!(
                start.distance(coord) <= unit.run_mp,
                "{coord:?} beyond run MP"
            );
        }
        // Straight ahead (north, facing 0) the full run distance is free
        // of turn costs, so it must be reachable.
        let mut ahead = start;
        for _ in 0..unit.run_mp {
            ahead = ahead.neighbor(Facing::new(0));
        }
        assert!(area.contains(&ahead));
    }

    #[test]
    fn test_immobile_unit_owns_only_its_hex() {
        let game = open_game();
        let mut unit = deployed_unit(1, 0, 4, 4);
        unit.immobile = true;
        let area = compute_movable_area(&game, &unit).unwrap();
        assert_eq!(area.coords.len(), 1);
        assert_eq!(area.locations.len(), 1);
    }

    #[test]
    fn test_woods_slow_movement() {
        let mut game = open_game();
        // Wall of heavy woods directly north of the unit
        let start = HexCoord::new(10, 10);
        let north = start.neighbor(Facing::new(0));
        game.board.set_hex(
            north,
            Hex {
                woods: 2,
                ..Hex::default()
            },
        );
        let mut unit = deployed_unit(1, 0, 10, 10);
        unit.walk_mp = 2;
        unit.run_mp = 3;

        let area = compute_movable_area(&game, &unit).unwrap();
        // Entering the woods hex costs 3 MP, so north two hexes is out of
        // reach while the clear flank is not.
        let two_north = north.neighbor(Facing::new(0));
        assert!(area.contains(&north));
        assert!(!area.contains(&two_north));
    }

    #[test]
    fn test_enumerate_paths_includes_stationary_and_kinds() {
        let game = open_game();
        let mut unit = deployed_unit(1, 0, 10, 10);
        unit.jump_mp = 3;
        let paths = enumerate_paths(&game, &unit);

        assert!(paths
            .iter()
            .any(|p| p.kind == MovementKind::StandStill && p.steps.is_empty()));
        assert!(paths.iter().any(|p| p.kind == MovementKind::Walk));
        assert!(paths.iter().any(|p| p.kind == MovementKind::Run));
        assert!(paths.iter().any(|p| p.kind == MovementKind::Jump));

        for path in &paths {
            assert_eq!(path.unit, unit.id);
            assert!(path.final_coords().is_some());
        }
    }

    #[test]
    fn test_vtol_overflies_buildings_and_gets_exit_candidate() {
        let mut game = open_game();
        let start = HexCoord::new(10, 10);
        let north = start.neighbor(Facing::new(0));
        game.board.set_hex(
            north,
            Hex {
                building: true,
                ..Hex::default()
            },
        );

        let mut vtol = deployed_unit(1, 0, 10, 10);
        vtol.kind = UnitKind::Vtol;
        let area = compute_movable_area(&game, &vtol).unwrap();
        assert!(area.contains(&north), "VTOL blocked by a building");

        let paths = enumerate_paths(&game, &vtol);
        assert!(paths.iter().any(|p| p.off_board_return));

        // Ground units neither overfly nor leave the map.
        let mek = deployed_unit(2, 0, 10, 10);
        let mek_area = compute_movable_area(&game, &mek).unwrap();
        assert!(!mek_area.contains(&north));
        assert!(enumerate_paths(&game, &mek).iter().all(|p| !p.off_board_return));
    }

    #[test]
    fn test_aero_paths_carry_flight_flags() {
        let game = open_game();
        // Three offset rows from the north edge, heading straight at it.
        let mut aero = deployed_unit(1, 0, 10, -2);
        aero.kind = UnitKind::Aerospace;
        aero.velocity = 3;
        aero.altitude = AERO_MIN_ALTITUDE;
        aero.facing = Facing::new(0);

        let paths = enumerate_paths(&game, &aero);
        assert!(!paths.is_empty());
        // Velocity 3 cannot be shed in one turn: no stall candidate.
        assert!(paths.iter().all(|p| !p.ends_at_zero_velocity));
        assert!(paths.iter().all(|p| !p.below_min_altitude));
        // Hold/gain/shed one point, along up to three headings.
        for path in paths.iter().filter(|p| !p.off_board_return) {
            assert!((2..=4).contains(&path.hexes_moved()), "{:?}", path.key());
        }
        // Gaining a point and holding course crosses the north edge.
        assert!(paths.iter().any(|p| p.off_board_return));
        let exit = paths.iter().find(|p| p.off_board_return).unwrap();
        assert_eq!(exit.final_coords(), None);
    }

    #[test]
    fn test_aero_stall_and_low_altitude_candidates() {
        let game = open_game();
        let mut aero = deployed_unit(1, 0, 10, 10);
        aero.kind = UnitKind::Aerospace;
        aero.velocity = 1;
        aero.altitude = 0;

        let paths = enumerate_paths(&game, &aero);
        assert!(paths.iter().any(|p| p.ends_at_zero_velocity));
        assert!(paths.iter().all(|p| p.below_min_altitude));
    }

    #[test]
    fn test_path_success_probability() {
        let unit = deployed_unit(1, 0, 5, 5);
        let mut path = MovePath::stationary(&unit).unwrap();
        assert_eq!(path.success_probability(), 1.0);

        path.psr_targets = vec![7];
        assert_eq!(path.success_probability(), 21.0 / 36.0);

        path.psr_targets = vec![7, 13];
        assert_eq!(path.success_probability(), 0.0);
    }

    #[test]
    fn test_stable_hash_is_deterministic_and_discriminating() {
        let unit = deployed_unit(1, 0, 5, 5);
        let a = MovePath::stationary(&unit).unwrap();
        let b = MovePath::stationary(&unit).unwrap();
        assert_eq!(a.stable_hash(), b.stable_hash());

        let other = deployed_unit(2, 0, 5, 5);
        let c = MovePath::stationary(&other).unwrap();
        assert_ne!(a.stable_hash(), c.stable_hash());
    }

    // --- Precognition ---

    fn spawn_with(game: Game) -> (Arc<RwLock<Game>>, Precognition) {
        let shared = Arc::new(RwLock::new(game));
        let precog = Precognition::spawn(Arc::clone(&shared));
        (shared, precog)
    }

    #[test]
    fn test_movement_phase_start_fills_cache() {
        let mut game = open_game();
        game.add_unit(deployed_unit(1, 0, 3, 3));
        game.add_unit(deployed_unit(2, 1, 12, 12));
        let (_shared, precog) = spawn_with(game);

        precog.notify(GameEvent::PhaseChanged {
            phase: GamePhase::Movement,
        });
        precog.ensure_up_to_date();

        let cache = precog.cache();
        let cache = cache.read().unwrap();
        assert_eq!(cache.movable_areas.len(), 2);
        assert_eq!(cache.potential_locations.len(), 2);
        assert_eq!(cache.last_known.len(), 2);
    }

    #[test]
    fn test_cache_converges_after_moves() {
        let mut game = open_game();
        game.add_unit(deployed_unit(1, 0, 3, 3));
        game.add_unit(deployed_unit(2, 1, 12, 12));
        let (shared, precog) = spawn_with(game);

        precog.notify(GameEvent::PhaseChanged {
            phase: GamePhase::Movement,
        });

        // Shuffle unit 1 around a few times, notifying each move.
        for step in 0..4 {
            {
                let mut game = shared.write().unwrap();
                let unit = game.units.get_mut(&UnitId(1)).unwrap();
                unit.position = Some(HexCoord::new(3 + step, 3));
                unit.facing = Facing::new(step as u8);
            }
            precog.notify(GameEvent::UnitChanged { unit: UnitId(1) });
        }
        precog.ensure_up_to_date();

        let cache = precog.cache();
        let cache = cache.read().unwrap();
        let game = shared.read().unwrap();
        for unit in game.units() {
            let live = (unit.position.unwrap(), unit.facing);
            assert_eq!(
                cache.last_known.get(&unit.id).copied(),
                Some(live),
                "cache for {} diverged",
                unit.id
            );
        }
    }

    #[test]
    fn test_vanished_unit_is_purged_everywhere() {
        let mut game = open_game();
        game.add_unit(deployed_unit(1, 0, 3, 3));
        game.add_unit(deployed_unit(2, 1, 12, 12));
        let (shared, precog) = spawn_with(game);

        precog.notify(GameEvent::PhaseChanged {
            phase: GamePhase::Movement,
        });
        precog.ensure_up_to_date();

        {
            let mut game = shared.write().unwrap();
            game.remove_unit(UnitId(2));
        }
        precog.notify(GameEvent::UnitChanged { unit: UnitId(2) });
        precog.ensure_up_to_date();

        let cache = precog.cache();
        let cache = cache.read().unwrap();
        assert!(!cache.movable_areas.contains_key(&UnitId(2)));
        assert!(!cache.potential_locations.contains_key(&UnitId(2)));
        assert!(!cache.last_known.contains_key(&UnitId(2)));
    }

    #[test]
    fn test_removed_unit_purged_even_outside_movement_phase() {
        let mut game = open_game();
        game.add_unit(deployed_unit(1, 0, 3, 3));
        game.add_unit(deployed_unit(2, 1, 12, 12));
        let (shared, precog) = spawn_with(game);

        precog.notify(GameEvent::PhaseChanged {
            phase: GamePhase::Movement,
        });
        precog.ensure_up_to_date();

        // The removal lands during the firing phase, where unit-changed
        // events are dropped. The drain barrier must still sweep the dead
        // entries out of the cache.
        {
            let mut game = shared.write().unwrap();
            game.phase = GamePhase::Firing;
            game.remove_unit(UnitId(2));
        }
        precog.notify(GameEvent::UnitChanged { unit: UnitId(2) });
        precog.ensure_up_to_date();

        let cache = precog.cache();
        let cache = cache.read().unwrap();
        assert!(!cache.movable_areas.contains_key(&UnitId(2)));
        assert!(!cache.potential_locations.contains_key(&UnitId(2)));
        assert!(!cache.last_known.contains_key(&UnitId(2)));
        // The survivor's entries are untouched.
        assert!(cache.movable_areas.contains_key(&UnitId(1)));
    }

    #[test]
    fn test_events_outside_movement_phase_are_ignored() {
        let mut game = open_game();
        game.phase = GamePhase::Firing;
        game.add_unit(deployed_unit(1, 0, 3, 3));
        let (_shared, precog) = spawn_with(game);

        precog.notify(GameEvent::UnitChanged { unit: UnitId(1) });
        precog.ensure_up_to_date();

        // Nothing was marked dirty by the event; the drain's reconcile
        // still brings the deployed unit up to date, which is the barrier's
        // functional contract.
        let cache = precog.cache();
        let cache = cache.read().unwrap();
        assert!(cache.last_known.contains_key(&UnitId(1)));
    }

    #[test]
    fn test_bystander_whose_area_covers_mover_is_refreshed() {
        let mut game = open_game();
        // Unit 2 sits inside unit 1's movable area.
        game.add_unit(deployed_unit(1, 0, 5, 5));
        game.add_unit(deployed_unit(2, 1, 5, 7));
        let (shared, precog) = spawn_with(game);

        precog.notify(GameEvent::PhaseChanged {
            phase: GamePhase::Movement,
        });
        precog.ensure_up_to_date();

        // Move unit 2 out from under unit 1.
        {
            let mut game = shared.write().unwrap();
            let unit = game.units.get_mut(&UnitId(2)).unwrap();
            unit.position = Some(HexCoord::new(15, 15));
        }
        precog.notify(GameEvent::UnitChanged { unit: UnitId(2) });
        precog.ensure_up_to_date();

        let cache = precog.cache();
        let cache = cache.read().unwrap();
        assert_eq!(
            cache.last_known.get(&UnitId(2)).map(|(c, _)| *c),
            Some(HexCoord::new(15, 15))
        );
        // Unit 1's cache was recomputed too (still present and current).
        assert!(cache.movable_areas.contains_key(&UnitId(1)));
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let game = open_game();
        let (_shared, mut precog) = spawn_with(game);
        precog.shutdown();
        precog.shutdown();
    }
}
