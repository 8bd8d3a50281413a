//! Reachable-area computation.
//!
//! A uniform-cost search over (hex, facing) nodes: turning in place costs
//! one MP, entering a hex costs one MP plus terrain. Jump movement is
//! overlaid afterward since it ignores terrain and lands at any facing.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use serde::{Deserialize, Serialize};

use vanguard_core::enums::{MovementKind, UnitKind};
use vanguard_core::game::Game;
use vanguard_core::types::{Facing, HexCoord};
use vanguard_core::unit::Unit;

use crate::path::{MovePath, MoveStep};

/// Everywhere a unit could end its movement this turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovableArea {
    /// Reachable hexes.
    pub coords: BTreeSet<HexCoord>,
    /// Reachable (hex, facing) pairs.
    pub locations: BTreeSet<(HexCoord, Facing)>,
}

impl MovableArea {
    pub fn contains(&self, coord: &HexCoord) -> bool {
        self.coords.contains(coord)
    }
}

type Node = (HexCoord, Facing);

struct Search {
    dist: BTreeMap<Node, u32>,
    parent: BTreeMap<Node, (Node, MoveStep)>,
}

/// MP cost to enter a hex, `None` if impassable. Airborne units overfly
/// ground obstructions at a flat cost.
fn entry_cost(game: &Game, unit: &Unit, from_level: i8, hex: &HexCoord) -> Option<u32> {
    let terrain = game.board.hex(hex)?;
    if unit.kind.is_airborne() {
        return Some(1);
    }
    if terrain.building {
        return None;
    }
    if unit.kind == UnitKind::Vehicle && terrain.water_depth > 0 {
        return None;
    }
    let level_diff = (terrain.level - from_level).unsigned_abs() as u32;
    if level_diff > 2 {
        return None;
    }
    Some(1 + terrain.woods as u32 + terrain.water_depth as u32 + level_diff)
}

fn ground_search(game: &Game, unit: &Unit, start: Node, budget: u32) -> Search {
    let mut dist: BTreeMap<Node, u32> = BTreeMap::new();
    let mut parent: BTreeMap<Node, (Node, MoveStep)> = BTreeMap::new();
    let mut heap: BinaryHeap<Reverse<(u32, Node)>> = BinaryHeap::new();

    dist.insert(start, 0);
    heap.push(Reverse((0, start)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if dist.get(&node).copied() != Some(cost) {
            continue;
        }
        let (hex, facing) = node;
        let level = game.board.hex(&hex).map_or(0, |h| h.level);

        let mut relax = |next: Node, step_cost: u32| {
            let next_cost = cost + step_cost;
            if next_cost > budget {
                return;
            }
            if dist.get(&next).map_or(true, |d| next_cost < *d) {
                dist.insert(next, next_cost);
                parent.insert(
                    next,
                    (
                        node,
                        MoveStep {
                            hex: next.0,
                            facing: next.1,
                            mp_cost: step_cost,
                        },
                    ),
                );
                heap.push(Reverse((next_cost, next)));
            }
        };

        // Turn in place
        relax((hex, facing.turn_left()), 1);
        relax((hex, facing.turn_right()), 1);

        // Step forward
        let ahead = hex.neighbor(facing);
        if let Some(step_cost) = entry_cost(game, unit, level, &ahead) {
            relax((ahead, facing), step_cost);
        }
    }

    Search { dist, parent }
}

/// Compute everywhere the unit can end its movement. `None` if the unit is
/// not on the board.
pub fn compute_movable_area(game: &Game, unit: &Unit) -> Option<MovableArea> {
    let position = unit.position?;
    let mut area = MovableArea::default();
    area.coords.insert(position);
    area.locations.insert((position, unit.facing));

    if unit.prone || unit.immobile || unit.shutdown {
        return Some(area);
    }

    let search = ground_search(game, unit, (position, unit.facing), unit.run_mp);
    for (hex, facing) in search.dist.keys() {
        area.coords.insert(*hex);
        area.locations.insert((*hex, *facing));
    }

    // Jump overlay: any on-board, non-building hex in radius, any facing.
    if unit.jump_mp > 0 {
        for (hex, _) in jump_landings(game, unit, position) {
            area.coords.insert(hex);
            for facing in Facing::ALL {
                area.locations.insert((hex, facing));
            }
        }
    }

    Some(area)
}

fn jump_landings(game: &Game, unit: &Unit, position: HexCoord) -> Vec<(HexCoord, u32)> {
    let radius = unit.jump_mp as i32;
    let mut out = Vec::new();
    for dq in -radius..=radius {
        for dr in -radius..=radius {
            let hex = HexCoord::new(position.q + dq, position.r + dr);
            let range = position.distance(&hex);
            if range == 0 || range > unit.jump_mp {
                continue;
            }
            match game.board.hex(&hex) {
                Some(terrain) if !terrain.building => out.push((hex, range)),
                _ => {}
            }
        }
    }
    out
}

/// Aircraft below this altitude band are in crash territory.
pub const AERO_MIN_ALTITUDE: i32 = 1;

/// Enumerate candidate paths: the cheapest ground path to every reachable
/// (hex, facing), jump paths to every landing hex, and standing still.
/// Aerospace units get straight-line flight candidates instead; VTOLs
/// additionally get a board-exit candidate.
pub fn enumerate_paths(game: &Game, unit: &Unit) -> Vec<MovePath> {
    let Some(position) = unit.position else {
        return Vec::new();
    };
    if unit.kind == UnitKind::Aerospace {
        return flight_paths(game, unit, position);
    }
    let mut paths = Vec::new();
    if let Some(stand) = MovePath::stationary(unit) {
        paths.push(stand);
    }
    if unit.prone || unit.immobile || unit.shutdown {
        return paths;
    }

    let start: Node = (position, unit.facing);
    let search = ground_search(game, unit, start, unit.run_mp);

    for (node, cost) in &search.dist {
        if *node == start {
            continue;
        }
        let mut steps = Vec::new();
        let mut cursor = *node;
        while cursor != start {
            let (prev, step) = search.parent[&cursor];
            steps.push(step);
            cursor = prev;
        }
        steps.reverse();

        let kind = if *cost <= unit.walk_mp {
            MovementKind::Walk
        } else {
            MovementKind::Run
        };
        let mut path = MovePath {
            unit: unit.id,
            start_hex: position,
            start_facing: unit.facing,
            steps,
            kind,
            psr_targets: Vec::new(),
            ends_at_zero_velocity: false,
            below_min_altitude: false,
            off_board_return: false,
        };
        path.psr_targets = psr_targets(game, unit, &path);
        paths.push(path);
    }

    if unit.jump_mp > 0 {
        for (hex, range) in jump_landings(game, unit, position) {
            for facing in Facing::ALL {
                let mut path = MovePath {
                    unit: unit.id,
                    start_hex: position,
                    start_facing: unit.facing,
                    steps: vec![MoveStep {
                        hex,
                        facing,
                        mp_cost: range,
                    }],
                    kind: MovementKind::Jump,
                    psr_targets: Vec::new(),
                    ends_at_zero_velocity: false,
                    below_min_altitude: false,
                    off_board_return: false,
                };
                path.psr_targets = psr_targets(game, unit, &path);
                paths.push(path);
            }
        }
    }

    if unit.kind == UnitKind::Vtol {
        paths.push(board_exit(unit, position));
    }

    paths
}

/// Flight candidates for an aerospace unit: hold, gain, or shed one point
/// of velocity along the current heading or one hexside off it. A run
/// that crosses the board edge becomes an edge return; shedding the last
/// point of velocity ends in a stall. Altitude below the minimum band
/// flags every candidate, since nothing here models climbing out of it.
fn flight_paths(game: &Game, unit: &Unit, position: HexCoord) -> Vec<MovePath> {
    let below_min = unit.altitude < AERO_MIN_ALTITUDE;
    let mut velocities = vec![unit.velocity + 1];
    if unit.velocity > 0 {
        velocities.push(unit.velocity);
    }
    if unit.velocity > 1 {
        velocities.push(unit.velocity - 1);
    }

    let mut paths = Vec::new();
    for facing in [unit.facing, unit.facing.turn_left(), unit.facing.turn_right()] {
        for &velocity in &velocities {
            let mut steps = Vec::new();
            let mut hex = position;
            let mut exited = false;
            for _ in 0..velocity {
                hex = hex.neighbor(facing);
                if !game.board.contains(&hex) {
                    exited = true;
                    break;
                }
                steps.push(MoveStep {
                    hex,
                    facing,
                    mp_cost: 1,
                });
            }
            paths.push(MovePath {
                unit: unit.id,
                start_hex: position,
                start_facing: unit.facing,
                steps,
                kind: MovementKind::Walk,
                psr_targets: Vec::new(),
                ends_at_zero_velocity: false,
                below_min_altitude: below_min,
                off_board_return: exited,
            });
        }
    }

    // Shedding the last point of velocity is legal but ends in a stall.
    if unit.velocity <= 1 {
        paths.push(MovePath {
            unit: unit.id,
            start_hex: position,
            start_facing: unit.facing,
            steps: Vec::new(),
            kind: MovementKind::Walk,
            psr_targets: Vec::new(),
            ends_at_zero_velocity: true,
            below_min_altitude: below_min,
            off_board_return: false,
        });
    }
    paths
}

/// A candidate that simply leaves the map, for units allowed to return
/// later.
fn board_exit(unit: &Unit, position: HexCoord) -> MovePath {
    MovePath {
        unit: unit.id,
        start_hex: position,
        start_facing: unit.facing,
        steps: Vec::new(),
        kind: MovementKind::Walk,
        psr_targets: Vec::new(),
        ends_at_zero_velocity: false,
        below_min_altitude: false,
        off_board_return: true,
    }
}

/// Piloting rolls a path will demand.
fn psr_targets(game: &Game, unit: &Unit, path: &MovePath) -> Vec<i32> {
    let mut targets = Vec::new();
    if path.kind == MovementKind::Run {
        for step in &path.steps {
            if let Some(hex) = game.board.hex(&step.hex) {
                if hex.water_depth >= 1 {
                    targets.push(unit.piloting + hex.water_depth as i32);
                }
            }
        }
    }
    if path.kind == MovementKind::Jump && unit.leg_destroyed.iter().any(|d| *d) {
        targets.push(unit.piloting + 3);
    }
    targets
}
