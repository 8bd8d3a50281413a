#[cfg(test)]
mod tests {
    use vanguard_core::board::Board;
    use vanguard_core::config::BehaviorSettings;
    use vanguard_core::enums::{GamePhase, MovementKind, UnitKind};
    use vanguard_core::game::Game;
    use vanguard_core::rules::probability_of_roll;
    use vanguard_core::types::{Facing, HexCoord};
    use vanguard_core::unit::{Unit, Weapon};
    use vanguard_fire_control::planner::FireControl;
    use vanguard_pathing::path::{MovePath, MoveStep};

    use crate::ranked::RankedPath;
    use crate::ranker::{BasicPathRanker, PathRanker};

    fn ranker() -> BasicPathRanker {
        BasicPathRanker::new(BehaviorSettings::default(), FireControl::default())
    }

    fn game_20x20() -> Game {
        let mut game = Game::new(Board::new(20, 20));
        game.phase = GamePhase::Movement;
        game
    }

    fn deployed(id: u32, owner: u32, kind: UnitKind, q: i32, r: i32) -> Unit {
        let mut unit = Unit::new(id, owner, "unit", kind);
        unit.position = Some(HexCoord::new(q, r));
        unit
    }

    #[test]
    fn test_aero_return_rank_is_exact() {
        let mut game = game_20x20();
        let mover = deployed(1, 0, UnitKind::Aerospace, 5, 5);
        // Enemies on the board must not perturb the short-circuit.
        let mut enemy = deployed(2, 1, UnitKind::Mek, 6, 5);
        enemy.weapons.push(Weapon::new("Medium Laser", 3, 5.0, 5, 10, 15));
        game.add_unit(mover.clone());
        game.add_unit(enemy);

        let mut path = MovePath::stationary(&mover).unwrap();
        path.off_board_return = true;
        let ranked = ranker().rank_path(&game, &mover, &path);
        assert_eq!(ranked.rank, -5.0);
    }

    #[test]
    fn test_vtol_return_rank_is_larger() {
        let game = game_20x20();
        let mover = deployed(1, 0, UnitKind::Vtol, 5, 5);
        let mut path = MovePath::stationary(&mover).unwrap();
        path.off_board_return = true;
        let ranked = ranker().rank_path(&game, &mover, &path);
        assert_eq!(ranked.rank, -10.0);
    }

    #[test]
    fn test_aero_stall_and_crash_ranks() {
        let game = game_20x20();
        let mover = deployed(1, 0, UnitKind::Aerospace, 5, 5);

        let mut stall = MovePath::stationary(&mover).unwrap();
        stall.ends_at_zero_velocity = true;
        assert_eq!(ranker().rank_path(&game, &mover, &stall).rank, -1000.0);

        let mut crash = stall.clone();
        crash.below_min_altitude = true;
        assert_eq!(ranker().rank_path(&game, &mover, &crash).rank, -10000.0);
    }

    #[test]
    fn test_impossible_piloting_roll_dominates() {
        // Alone at board center: every other term is zero, so the rank is
        // the hard fall penalty and nothing else.
        let mut game = game_20x20();
        let center = game.board.center();
        let mover = deployed(1, 0, UnitKind::Mek, center.q, center.r);
        game.add_unit(mover.clone());

        let mut path = MovePath::stationary(&mover).unwrap();
        path.psr_targets.push(13);
        assert_eq!(path.success_probability(), 0.0);

        let ranked = ranker().rank_path(&game, &mover, &path);
        assert_eq!(ranked.rank, -1000.0);
    }

    #[test]
    fn test_fall_shame_scales_with_failure_chance() {
        let mut game = game_20x20();
        let center = game.board.center();
        let mover = deployed(1, 0, UnitKind::Mek, center.q, center.r);
        game.add_unit(mover.clone());

        let mut path = MovePath::stationary(&mover).unwrap();
        path.psr_targets.push(7);
        let p = probability_of_roll(7);

        let ranked = ranker().rank_path(&game, &mover, &path);
        assert!((ranked.rank - (-(1.0 - p) * 50.0)).abs() < 1e-9);
    }

    #[test]
    fn test_enemy_damage_sums_across_moved_and_unmoved() {
        let mut game = game_20x20();
        // Unarmed mover facing north; it deals nothing and kicks nothing.
        let mover = deployed(1, 0, UnitKind::Mek, 10, 10);

        // Moved enemy three hexes north, facing the mover.
        let mut moved = deployed(2, 1, UnitKind::Mek, 10, 7);
        moved.facing = Facing::new(3);
        moved.moved = true;
        moved.weapons.push(Weapon::new("Medium Laser", 3, 5.0, 5, 10, 15));

        // Unmoved enemy three hexes south, already facing the mover.
        let mut unmoved = deployed(3, 1, UnitKind::Mek, 10, 13);
        unmoved.facing = Facing::new(0);
        unmoved.weapons.push(Weapon::new("Medium Laser", 3, 5.0, 5, 10, 15));

        game.add_unit(mover.clone());
        game.add_unit(moved);
        game.add_unit(unmoved);

        let path = MovePath::stationary(&mover).unwrap();
        let ranked = ranker().rank_path(&game, &mover, &path);

        // Moved enemy: full fire-control estimate. Gunnery 4, short range,
        // both sides stationary.
        let moved_fire = probability_of_roll(4) * 5.0;
        // Unmoved enemy: discounted firepower plus a discounted kick at
        // the mover's exposed rear.
        let unmoved_fire = 0.5 * 5.0;
        let flank_kick = 0.5 * 10.0;
        // Aggression: closest enemy at range 3, default weight 1.0.
        let expected = -(moved_fire + unmoved_fire + flank_kick) - 3.0;
        assert!(
            (ranked.rank - expected).abs() < 1e-9,
            "rank {} != expected {expected}",
            ranked.rank
        );
    }

    #[test]
    fn test_aircraft_skip_aggression_and_herding() {
        for (kind, near_rank_minus_far) in
            [(UnitKind::Vtol, 0.0), (UnitKind::Mek, 3.0)]
        {
            let mut near_game = game_20x20();
            let mut far_game = game_20x20();
            // Unarmed unmoved enemy straight north; mover faces it so the
            // facing term stays zero in every case.
            near_game.add_unit(deployed(9, 1, UnitKind::Mek, 10, 8));
            far_game.add_unit(deployed(9, 1, UnitKind::Mek, 10, 5));

            let mover = deployed(1, 0, kind, 10, 10);
            near_game.add_unit(mover.clone());
            far_game.add_unit(mover.clone());
            let path = MovePath::stationary(&mover).unwrap();

            let near = ranker().rank_path(&near_game, &mover, &path).rank;
            let far = ranker().rank_path(&far_game, &mover, &path).rank;
            assert!(
                (near - far - near_rank_minus_far).abs() < 1e-9,
                "{kind:?}: near {near}, far {far}"
            );
        }
    }

    #[test]
    fn test_crippled_unit_pays_for_distance_from_home() {
        let mut game = game_20x20();
        let mut mover = deployed(1, 0, UnitKind::Mek, 10, 10);
        mover.crippled = true;
        mover.home_edge = Some(vanguard_core::enums::BoardEdge::North);
        game.add_unit(mover.clone());

        let path = MovePath::stationary(&mover).unwrap();
        let with_retreat = ranker().rank_path(&game, &mover, &path).rank;

        let mut healthy = mover.clone();
        healthy.crippled = false;
        let baseline = ranker().rank_path(&game, &healthy, &path).rank;

        // Fifteen offset rows from the north edge, default weight 2.0.
        assert!((baseline - with_retreat - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_path_prefers_facing_the_enemy() {
        let mut game = game_20x20();
        let mover = deployed(1, 0, UnitKind::Mek, 10, 10);
        game.add_unit(mover.clone());
        game.add_unit(deployed(2, 1, UnitKind::Mek, 10, 7));

        let toward = MovePath::stationary(&mover).unwrap();
        let mut away = toward.clone();
        away.kind = MovementKind::Walk;
        away.steps.push(MoveStep {
            hex: HexCoord::new(10, 10),
            facing: Facing::new(3),
            mp_cost: 1,
        });

        let mut ranker = ranker();
        ranker.init_unit_turn(&game, &mover);
        let best = ranker
            .best_path(&game, &mover, &[away, toward.clone()])
            .unwrap();
        assert_eq!(best.path, toward);
    }

    #[test]
    fn test_init_unit_turn_records_enemy_threat() {
        let mut game = game_20x20();
        let mover = deployed(1, 0, UnitKind::Mek, 10, 10);
        let mut near_enemy = deployed(2, 1, UnitKind::Mek, 10, 7);
        near_enemy.weapons.push(Weapon::new("Medium Laser", 3, 5.0, 5, 10, 15));
        let mut far_enemy = deployed(3, 1, UnitKind::Mek, 10, 0);
        far_enemy.weapons.push(Weapon::new("Small Laser", 1, 3.0, 1, 2, 3));

        game.add_unit(mover.clone());
        game.add_unit(near_enemy.clone());
        game.add_unit(far_enemy.clone());

        let mut ranker = ranker();
        ranker.init_unit_turn(&game, &mover);
        let threats = ranker.best_damage_by_enemies();
        assert_eq!(threats.get(&near_enemy.id), Some(&5.0));
        // Out of range of every friendly unit.
        assert_eq!(threats.get(&far_enemy.id), Some(&0.0));
    }

    #[test]
    fn test_tie_break_is_transitive() {
        let mover = deployed(1, 0, UnitKind::Mek, 10, 10);
        let base = MovePath::stationary(&mover).unwrap();

        let ranked: Vec<RankedPath> = Facing::ALL[..3]
            .iter()
            .map(|facing| {
                let mut path = base.clone();
                path.steps.push(MoveStep {
                    hex: HexCoord::new(10, 10),
                    facing: *facing,
                    mp_cost: 1,
                });
                RankedPath::new(path, 1.0, String::new())
            })
            .collect();

        for a in &ranked {
            for b in &ranked {
                for c in &ranked {
                    if a < b && b < c {
                        assert!(a < c);
                    }
                }
            }
        }
        // Equal ranks still order deterministically by stable hash.
        let mut sorted = ranked.clone();
        sorted.sort();
        let mut again = ranked;
        again.reverse();
        again.sort();
        for (x, y) in sorted.iter().zip(again.iter()) {
            assert_eq!(x.path, y.path);
        }
    }

    #[test]
    fn test_rank_path_is_deterministic() {
        let mut game = game_20x20();
        let mut mover = deployed(1, 0, UnitKind::Mek, 10, 10);
        mover.weapons.push(Weapon::new("Medium Laser", 3, 5.0, 5, 10, 15));
        let mut enemy = deployed(2, 1, UnitKind::Mek, 10, 7);
        enemy.facing = Facing::new(3);
        enemy.moved = true;
        enemy.weapons.push(Weapon::new("PPC", 10, 10.0, 6, 12, 18));
        game.add_unit(mover.clone());
        game.add_unit(enemy);

        let path = MovePath::stationary(&mover).unwrap();
        let first = ranker().rank_path(&game, &mover, &path).rank;
        let second = ranker().rank_path(&game, &mover, &path).rank;
        assert_eq!(first.to_bits(), second.to_bits());
    }
}
