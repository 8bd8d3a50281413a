//! Background path-precomputation engine.
//!
//! A dedicated worker thread keeps every unit's reachable-area cache
//! consistent with the shared game state, recomputing dirty units during
//! otherwise-idle time so the decision loop rarely has to wait. The worker
//! exclusively owns its dirty set; everything reaches it through one
//! channel. `ensure_up_to_date` is a request/ack round trip, so there is
//! no pause-flag polling anywhere.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::mpsc;
use std::sync::{Arc, RwLock};
use std::thread;

use vanguard_core::enums::GamePhase;
use vanguard_core::events::GameEvent;
use vanguard_core::game::Game;
use vanguard_core::types::{Facing, HexCoord, UnitId};

use crate::reachable::compute_movable_area;

/// Shared reachable-area cache. Readers take the read lock; only the
/// worker writes.
#[derive(Debug, Default)]
pub struct PathCache {
    /// Reachable hexes per unit.
    pub movable_areas: BTreeMap<UnitId, BTreeSet<HexCoord>>,
    /// Reachable (hex, facing) pairs per unit.
    pub potential_locations: BTreeMap<UnitId, BTreeSet<(HexCoord, Facing)>>,
    /// Position and facing each cache entry was computed from.
    pub last_known: BTreeMap<UnitId, (HexCoord, Facing)>,
}

impl PathCache {
    /// Remove every entry for a unit.
    pub fn purge(&mut self, unit: UnitId) {
        self.movable_areas.remove(&unit);
        self.potential_locations.remove(&unit);
        self.last_known.remove(&unit);
    }

    pub fn clear(&mut self) {
        self.movable_areas.clear();
        self.potential_locations.clear();
        self.last_known.clear();
    }
}

enum Message {
    Event(GameEvent),
    Drain(mpsc::Sender<()>),
    Shutdown,
}

/// Handle to the precomputation worker. Dropping it shuts the worker down.
pub struct Precognition {
    tx: mpsc::Sender<Message>,
    cache: Arc<RwLock<PathCache>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Precognition {
    /// Spawn the worker thread against a shared game state.
    pub fn spawn(game: Arc<RwLock<Game>>) -> Self {
        let cache = Arc::new(RwLock::new(PathCache::default()));
        let (tx, rx) = mpsc::channel();
        let worker_cache = Arc::clone(&cache);
        let handle = thread::Builder::new()
            .name("vanguard-precognition".into())
            .spawn(move || {
                Worker {
                    game,
                    cache: worker_cache,
                    dirty: BTreeSet::new(),
                    rx,
                }
                .run();
            })
            .expect("Failed to spawn precognition thread");

        Self {
            tx,
            cache,
            handle: Some(handle),
        }
    }

    /// Enqueue a game-state-change event. Non-blocking; wakes the worker.
    pub fn notify(&self, event: GameEvent) {
        let _ = self.tx.send(Message::Event(event));
    }

    /// Block until every pending event is processed and every dirty unit
    /// recomputed. The barrier the decision loop calls before ranking.
    pub fn ensure_up_to_date(&self) {
        let (ack_tx, ack_rx) = mpsc::channel();
        if self.tx.send(Message::Drain(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }

    /// Shared handle to the cache for readers.
    pub fn cache(&self) -> Arc<RwLock<PathCache>> {
        Arc::clone(&self.cache)
    }

    /// Signal the worker to finish its current unit of work and exit.
    pub fn shutdown(&mut self) {
        let _ = self.tx.send(Message::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Precognition {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct Worker {
    game: Arc<RwLock<Game>>,
    cache: Arc<RwLock<PathCache>>,
    dirty: BTreeSet<UnitId>,
    rx: mpsc::Receiver<Message>,
}

impl Worker {
    fn run(mut self) {
        loop {
            // Process everything pending, in enqueue order.
            loop {
                match self.rx.try_recv() {
                    Ok(message) => {
                        if !self.handle_message(message) {
                            return;
                        }
                    }
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => return,
                }
            }

            // Idle time: chew through one dirty unit, then look for
            // messages again.
            if let Some(unit) = self.dirty.pop_first() {
                self.recompute(unit);
                continue;
            }

            // Nothing to do; block until woken.
            match self.rx.recv() {
                Ok(message) => {
                    if !self.handle_message(message) {
                        return;
                    }
                }
                Err(_) => return,
            }
        }
    }

    /// Returns false when the worker should exit.
    fn handle_message(&mut self, message: Message) -> bool {
        match message {
            Message::Event(GameEvent::UnitChanged { unit }) => {
                self.handle_unit_changed(unit);
                true
            }
            Message::Event(GameEvent::PhaseChanged { phase }) => {
                if phase == GamePhase::Movement {
                    self.handle_movement_phase_start();
                }
                true
            }
            Message::Drain(ack) => {
                self.reconcile();
                while let Some(unit) = self.dirty.pop_first() {
                    self.recompute(unit);
                }
                let _ = ack.send(());
                true
            }
            Message::Shutdown => false,
        }
    }

    fn handle_unit_changed(&mut self, id: UnitId) {
        let (phase, live) = {
            let Ok(game) = self.game.read() else { return };
            (
                game.phase,
                game.unit(id).map(|u| (u.position, u.facing)),
            )
        };
        // Outside the movement phase nothing we cache can change.
        if phase != GamePhase::Movement {
            return;
        }
        if let Some((position, facing)) = live {
            let cached = {
                let Ok(cache) = self.cache.read() else { return };
                cache.last_known.get(&id).copied()
            };
            if position.is_some() && cached == position.map(|p| (p, facing)) {
                return; // nothing actually moved
            }
        }
        self.mark_dirty(id);
    }

    fn handle_movement_phase_start(&mut self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
        self.dirty.clear();
        let Ok(game) = self.game.read() else { return };
        for unit in game.units() {
            if unit.is_deployed() {
                self.dirty.insert(unit.id);
            }
        }
    }

    /// Mark a unit's cache stale, along with any unit whose cached
    /// reachable area covers the mover's old or new location.
    fn mark_dirty(&mut self, id: UnitId) {
        let Ok(game) = self.game.read() else { return };

        let Some(unit) = game.unit(id) else {
            // The unit left the game: its cache entries are garbage.
            drop(game);
            if let Ok(mut cache) = self.cache.write() {
                cache.purge(id);
            }
            self.dirty.remove(&id);
            return;
        };

        let new_location = unit.position;
        let selectable = unit.is_selectable();
        let facing = unit.facing;

        let affected: Vec<UnitId> = {
            let Ok(cache) = self.cache.read() else { return };
            let old_location = cache.last_known.get(&id).map(|(c, _)| *c);
            cache
                .movable_areas
                .iter()
                .filter(|(other, area)| {
                    **other != id
                        && (old_location.map_or(false, |c| area.contains(&c))
                            || new_location.map_or(false, |c| area.contains(&c)))
                })
                .map(|(other, _)| *other)
                .collect()
        };

        for other in affected {
            // A stale cache for a unit that can't be selected this turn is
            // harmless; recomputing it now would be wasted work.
            if game.unit(other).map_or(false, |u| u.is_selectable()) {
                self.dirty.insert(other);
            }
        }

        if selectable {
            self.dirty.insert(id);
        } else if let Some(position) = new_location {
            drop(game);
            if let Ok(mut cache) = self.cache.write() {
                cache.last_known.insert(id, (position, facing));
            }
        }
    }

    /// Mark every deployed unit whose live position/facing disagrees with
    /// the cached baseline, and purge cache entries whose unit is no
    /// longer in the game. Removal events that arrived outside the
    /// movement phase are dropped by `handle_unit_changed`, so the
    /// barrier has to sweep for the dead entries itself.
    fn reconcile(&mut self) {
        let (live, present): (Vec<(UnitId, HexCoord, Facing)>, BTreeSet<UnitId>) = {
            let Ok(game) = self.game.read() else { return };
            (
                game.units()
                    .filter(|u| u.is_deployed())
                    .filter_map(|u| u.position.map(|p| (u.id, p, u.facing)))
                    .collect(),
                game.units().map(|u| u.id).collect(),
            )
        };
        let (stale, vanished): (Vec<UnitId>, BTreeSet<UnitId>) = {
            let Ok(cache) = self.cache.read() else { return };
            let stale = live
                .iter()
                .filter(|(id, pos, facing)| {
                    cache.last_known.get(id).copied() != Some((*pos, *facing))
                })
                .map(|(id, _, _)| *id)
                .collect();
            let vanished = cache
                .movable_areas
                .keys()
                .chain(cache.potential_locations.keys())
                .chain(cache.last_known.keys())
                .filter(|id| !present.contains(id))
                .copied()
                .collect();
            (stale, vanished)
        };
        for id in vanished {
            self.dirty.remove(&id);
            if let Ok(mut cache) = self.cache.write() {
                cache.purge(id);
            }
        }
        for id in stale {
            self.mark_dirty(id);
        }
    }

    fn recompute(&mut self, id: UnitId) {
        let computed = {
            let Ok(game) = self.game.read() else { return };
            match game.unit(id) {
                // Vanished mid-queue: nothing to do, purge.
                None => None,
                Some(unit) => compute_movable_area(&game, unit)
                    .and_then(|area| unit.position.map(|p| (area, p, unit.facing))),
            }
        };

        match computed {
            Some((area, position, facing)) => {
                if let Ok(mut cache) = self.cache.write() {
                    cache.movable_areas.insert(id, area.coords);
                    cache.potential_locations.insert(id, area.locations);
                    cache.last_known.insert(id, (position, facing));
                }
            }
            None => {
                tracing::debug!("unit {id} has no computable movable area; purging");
                if let Ok(mut cache) = self.cache.write() {
                    cache.purge(id);
                }
            }
        }
    }
}
