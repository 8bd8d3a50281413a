//! Seeded scenario generation for tests and demos.
//!
//! Builds a random but reproducible battlefield: scattered terrain and two
//! lances deployed on opposite board edges, facing each other.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use vanguard_core::board::{Board, Hex};
use vanguard_core::enums::{BoardEdge, GamePhase, UnitKind};
use vanguard_core::game::Game;
use vanguard_core::types::{Facing, HexCoord};
use vanguard_core::unit::{Unit, Weapon};

#[derive(Debug, Clone, Copy)]
pub struct ScenarioConfig {
    pub seed: u64,
    pub board_width: i32,
    pub board_height: i32,
    pub units_per_side: u32,
    /// Chance that any given hex carries light woods.
    pub woods_chance: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            board_width: 20,
            board_height: 20,
            units_per_side: 4,
            woods_chance: 0.1,
        }
    }
}

/// Generate a battlefield. The same config always yields the same game.
pub fn generate(config: &ScenarioConfig) -> Game {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut game = Game::new(Board::new(config.board_width, config.board_height));
    game.phase = GamePhase::Movement;

    scatter_woods(&mut game, &mut rng, config.woods_chance);
    let mut next_id = 1;
    for player in 0..2u32 {
        deploy_lance(&mut game, &mut rng, config, player, &mut next_id);
    }
    game
}

fn scatter_woods(game: &mut Game, rng: &mut ChaCha8Rng, chance: f64) {
    let (width, height) = (game.board.width(), game.board.height());
    for col in 0..width {
        for row in 0..height {
            if rng.gen_bool(chance) {
                let coord = axial(col, row);
                game.board.set_hex(
                    coord,
                    Hex {
                        woods: 1,
                        ..Hex::default()
                    },
                );
            }
        }
    }
}

/// Deploy one player's units along their home edge (player 0 north,
/// player 1 south), facing the opposition.
fn deploy_lance(
    game: &mut Game,
    rng: &mut ChaCha8Rng,
    config: &ScenarioConfig,
    player: u32,
    next_id: &mut u32,
) {
    let (row, facing, home) = if player == 0 {
        (1, Facing::new(3), BoardEdge::North)
    } else {
        (config.board_height - 2, Facing::new(0), BoardEdge::South)
    };

    for _ in 0..config.units_per_side {
        let mut unit = standard_mek(*next_id, player, rng);
        *next_id += 1;

        // Find a free deployment hex on the home row.
        let position = loop {
            let col = rng.gen_range(0..config.board_width);
            let coord = axial(col, row);
            let occupied = game.units().any(|u| u.position == Some(coord));
            if !occupied {
                break coord;
            }
        };
        unit.position = Some(position);
        unit.facing = facing;
        unit.home_edge = Some(home);
        game.add_unit(unit);
    }
}

/// A line mek with a mixed laser loadout and slightly randomized skills.
fn standard_mek(id: u32, owner: u32, rng: &mut ChaCha8Rng) -> Unit {
    let mut unit = Unit::new(id, owner, &format!("Mek {id}"), UnitKind::Mek);
    unit.gunnery = rng.gen_range(3..=5);
    unit.piloting = rng.gen_range(4..=6);
    unit.weapons.push(Weapon::new("Large Laser", 8, 8.0, 5, 10, 15));
    unit.weapons.push(Weapon::new("Medium Laser", 3, 5.0, 3, 6, 9));
    unit.weapons.push(Weapon::new("Medium Laser", 3, 5.0, 3, 6, 9));
    unit
}

/// Axial coordinate for an odd-q offset (col, row).
fn axial(col: i32, row: i32) -> HexCoord {
    HexCoord::new(col, row - (col - (col & 1)) / 2)
}
