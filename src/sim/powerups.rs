//! Power-up spawning and lifecycle
//!
//! Power-ups occupy one of a fixed set of slots. At most `max_active` exist at
//! once; spawning at the cap evicts the oldest (by spawn order). Every timed
//! step of a power-up's life (expiry, bomb detonation, disposal grace) is a
//! single pending entry in the spawner's own [`Timers`], cancelled whenever the
//! power-up leaves the board some other way.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::effects::SessionEffects;
use super::state::{GameEvent, GameMode, PowerUpId, PowerUpKind, RemovalReason, display_seconds};
use super::timers::{TimerId, Timers};
use crate::audio::SoundEffect;
use crate::tuning::{SpawnChances, Tuning};

/// Reference slot layout (canvas-local, origin at the tap button)
pub const DEFAULT_SLOT_ANCHORS: [Vec2; 8] = [
    Vec2::new(-362.0, 100.0),
    Vec2::new(362.0, -70.0),
    Vec2::new(180.0, -160.0),
    Vec2::new(-180.0, -160.0),
    Vec2::new(-362.0, -70.0),
    Vec2::new(-362.0, 19.0),
    Vec2::new(362.0, 19.0),
    Vec2::new(362.0, 100.0),
];

/// Where a power-up is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Multiplier/FreezeTime waiting to be tapped before it expires
    Waiting,
    /// Bomb counting down; `shown_seconds` is the last displayed value
    Armed { shown_seconds: u32 },
    /// Bomb tapped in time, removed once the grace delay ends
    Disposed,
}

/// A power-up on the board
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: PowerUpId,
    pub kind: PowerUpKind,
    pub slot: usize,
    pub spawned_at: f32,
    pub lifecycle: Lifecycle,
    /// The one pending timed step for this power-up
    timer: TimerId,
}

/// A spatial anchor that holds at most one power-up
#[derive(Debug, Clone)]
pub struct Slot {
    pub anchor: Vec2,
    occupant: Option<PowerUpId>,
}

impl Slot {
    pub fn occupant(&self) -> Option<PowerUpId> {
        self.occupant
    }

    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PowerUpTimer {
    Expire(PowerUpId),
    Detonate(PowerUpId),
    FinishDisposal(PowerUpId),
}

#[derive(Debug, Clone)]
struct Rules {
    max_active: usize,
    display_duration: f32,
    chances: SpawnChances,
    bomb_countdown: f32,
    bomb_penalty: f32,
    bomb_dispose_grace: f32,
    multiplier_factor: u32,
    multiplier_duration: f32,
    multiplier_endless_bonus: f32,
    freeze_duration: f32,
}

impl From<&Tuning> for Rules {
    fn from(t: &Tuning) -> Self {
        Self {
            max_active: t.max_active_power_ups,
            display_duration: t.display_duration,
            chances: t.spawn_chances,
            bomb_countdown: t.bomb_countdown,
            bomb_penalty: t.bomb_penalty,
            bomb_dispose_grace: t.bomb_dispose_grace,
            multiplier_factor: t.multiplier_factor,
            multiplier_duration: t.multiplier_duration,
            multiplier_endless_bonus: t.multiplier_endless_bonus,
            freeze_duration: t.freeze_duration,
        }
    }
}

/// Map a uniform roll in [0, 1) onto a kind, or nothing for the remainder
pub fn draw_kind(roll: f32, chances: &SpawnChances) -> Option<PowerUpKind> {
    if roll < chances.multiplier {
        Some(PowerUpKind::Multiplier)
    } else if roll < chances.multiplier + chances.freeze {
        Some(PowerUpKind::FreezeTime)
    } else if roll < chances.multiplier + chances.freeze + chances.bomb {
        Some(PowerUpKind::Bomb)
    } else {
        None
    }
}

/// Owns the slots, the active power-ups and their pending timed steps
#[derive(Debug, Clone)]
pub struct PowerUpSpawner {
    slots: Vec<Slot>,
    /// Oldest first
    active: Vec<PowerUp>,
    timers: Timers<PowerUpTimer>,
    rng: Pcg32,
    /// Set while a challenge runs
    suppressed: bool,
    next_id: u32,
    rules: Rules,
}

impl PowerUpSpawner {
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        Self::with_anchors(tuning, seed, &DEFAULT_SLOT_ANCHORS)
    }

    pub fn with_anchors(tuning: &Tuning, seed: u64, anchors: &[Vec2]) -> Self {
        Self {
            slots: anchors
                .iter()
                .map(|&anchor| Slot {
                    anchor,
                    occupant: None,
                })
                .collect(),
            active: Vec::new(),
            timers: Timers::new(),
            rng: Pcg32::seed_from_u64(seed),
            suppressed: false,
            next_id: 1,
            rules: Rules::from(tuning),
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Active power-ups, oldest first
    pub fn active(&self) -> &[PowerUp] {
        &self.active
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn get(&self, id: PowerUpId) -> Option<&PowerUp> {
        self.active.iter().find(|p| p.id == id)
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Block spawning (challenge running) or allow it again
    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    /// Seconds until an armed bomb goes off
    pub fn bomb_time_left(&self, id: PowerUpId, now: f32) -> Option<f32> {
        let power_up = self.get(id)?;
        match power_up.lifecycle {
            Lifecycle::Armed { .. } => self.timers.remaining(power_up.timer, now),
            _ => None,
        }
    }

    /// Random spawn attempt after a level-up. Evicts the oldest power-up at
    /// the cap even when the roll then produces nothing.
    pub fn try_spawn(&mut self, fx: &mut impl SessionEffects) -> Option<PowerUpId> {
        if self.suppressed {
            return None;
        }
        self.evict_if_full(fx);

        let roll: f32 = self.rng.random();
        let kind = draw_kind(roll, &self.rules.chances)?;
        self.place(kind, fx)
    }

    /// Spawn a specific kind, skipping the roll. Same cap and slot rules.
    pub fn spawn(&mut self, kind: PowerUpKind, fx: &mut impl SessionEffects) -> Option<PowerUpId> {
        if self.suppressed {
            return None;
        }
        self.evict_if_full(fx);
        self.place(kind, fx)
    }

    /// Player tapped a power-up. Multiplier/FreezeTime apply and vanish; a
    /// live bomb is disposed. Returns false if nothing happened.
    pub fn interact(&mut self, id: PowerUpId, fx: &mut impl SessionEffects) -> bool {
        let Some(idx) = self.active.iter().position(|p| p.id == id) else {
            return false;
        };
        let power_up = &self.active[idx];

        match (power_up.kind, power_up.lifecycle) {
            (_, Lifecycle::Disposed) => false,
            (PowerUpKind::Bomb, _) => {
                let timer = power_up.timer;
                self.timers.cancel(timer);
                let grace = self.timers.schedule(
                    fx.now(),
                    self.rules.bomb_dispose_grace,
                    PowerUpTimer::FinishDisposal(id),
                );
                let power_up = &mut self.active[idx];
                power_up.lifecycle = Lifecycle::Disposed;
                power_up.timer = grace;

                log::debug!("Bomb {:?} disposed", id);
                fx.emit(GameEvent::BombDisposed { id });
                fx.emit(GameEvent::PlaySound(SoundEffect::BombDisposed));
                true
            }
            (kind, _) => {
                self.apply_effect(kind, fx);
                self.remove_power_up(id, RemovalReason::Activated, fx);
                true
            }
        }
    }

    /// Run due timed steps and refresh bomb countdown displays
    pub fn update(&mut self, fx: &mut impl SessionEffects) {
        while let Some((_, action)) = self.timers.pop_due(fx.now()) {
            match action {
                PowerUpTimer::Expire(id) => {
                    self.remove_power_up(id, RemovalReason::Expired, fx);
                }
                PowerUpTimer::Detonate(id) => {
                    log::debug!("Bomb {:?} detonated", id);
                    fx.reduce_timer(self.rules.bomb_penalty);
                    fx.emit(GameEvent::PlaySound(SoundEffect::BombExplode));
                    self.remove_power_up(id, RemovalReason::Detonated, fx);
                }
                PowerUpTimer::FinishDisposal(id) => {
                    self.remove_power_up(id, RemovalReason::Disposed, fx);
                }
            }
        }

        let now = fx.now();
        for power_up in &mut self.active {
            if let Lifecycle::Armed { shown_seconds } = &mut power_up.lifecycle {
                let Some(left) = self.timers.remaining(power_up.timer, now) else {
                    continue;
                };
                let seconds = display_seconds(left);
                if seconds != *shown_seconds {
                    *shown_seconds = seconds;
                    fx.emit(GameEvent::BombCountdown {
                        id: power_up.id,
                        seconds,
                    });
                }
            }
        }
    }

    /// Take a power-up off the board and free its slot. Safe to call with a
    /// handle that is already gone.
    pub fn remove_power_up(
        &mut self,
        id: PowerUpId,
        reason: RemovalReason,
        fx: &mut impl SessionEffects,
    ) -> bool {
        let Some(idx) = self.active.iter().position(|p| p.id == id) else {
            return false;
        };
        let power_up = self.active.remove(idx);
        self.timers.cancel(power_up.timer);
        if let Some(slot) = self.slots.get_mut(power_up.slot) {
            slot.occupant = None;
        }

        log::debug!("{:?} {:?} removed: {:?}", power_up.kind, id, reason);
        fx.emit(GameEvent::PowerUpRemoved { id, reason });
        true
    }

    /// Clear the board: every power-up removed, every slot free, every
    /// pending timed step dropped
    pub fn hide_all(&mut self, fx: &mut impl SessionEffects) {
        self.timers.clear();
        for slot in &mut self.slots {
            slot.occupant = None;
        }
        for power_up in self.active.drain(..) {
            fx.emit(GameEvent::PowerUpRemoved {
                id: power_up.id,
                reason: RemovalReason::Cleared,
            });
        }
    }

    fn evict_if_full(&mut self, fx: &mut impl SessionEffects) {
        if self.active.len() >= self.rules.max_active {
            if let Some(oldest) = self.active.first().map(|p| p.id) {
                self.remove_power_up(oldest, RemovalReason::Evicted, fx);
            }
        }
    }

    fn place(&mut self, kind: PowerUpKind, fx: &mut impl SessionEffects) -> Option<PowerUpId> {
        let free: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_free())
            .map(|(i, _)| i)
            .collect();
        if free.is_empty() {
            log::debug!("No free slot for {:?}, spawn discarded", kind);
            return None;
        }
        let slot = free[self.rng.random_range(0..free.len())];

        let id = PowerUpId(self.next_id);
        self.next_id += 1;
        let now = fx.now();

        let (lifecycle, timer) = match kind {
            PowerUpKind::Bomb => (
                Lifecycle::Armed {
                    shown_seconds: display_seconds(self.rules.bomb_countdown),
                },
                self.timers
                    .schedule(now, self.rules.bomb_countdown, PowerUpTimer::Detonate(id)),
            ),
            PowerUpKind::Multiplier | PowerUpKind::FreezeTime => (
                Lifecycle::Waiting,
                self.timers
                    .schedule(now, self.rules.display_duration, PowerUpTimer::Expire(id)),
            ),
        };

        self.slots[slot].occupant = Some(id);
        self.active.push(PowerUp {
            id,
            kind,
            slot,
            spawned_at: now,
            lifecycle,
            timer,
        });

        log::debug!("Spawned {:?} {:?} in slot {}", kind, id, slot);
        fx.emit(GameEvent::PowerUpSpawned { id, kind, slot });
        if let Lifecycle::Armed { shown_seconds } = lifecycle {
            fx.emit(GameEvent::BombCountdown {
                id,
                seconds: shown_seconds,
            });
        }
        Some(id)
    }

    fn apply_effect(&self, kind: PowerUpKind, fx: &mut impl SessionEffects) {
        match kind {
            PowerUpKind::Multiplier => {
                fx.boost_multiplier(self.rules.multiplier_factor, self.rules.multiplier_duration);
                if fx.is_active() && fx.mode() == GameMode::Endless {
                    fx.add_time(self.rules.multiplier_endless_bonus);
                }
                fx.emit(GameEvent::PlaySound(SoundEffect::Multiplier));
            }
            PowerUpKind::FreezeTime => {
                fx.freeze_timer(Some(self.rules.freeze_duration));
                fx.emit(GameEvent::PlaySound(SoundEffect::FreezeTime));
            }
            PowerUpKind::Bomb => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Session double that records what power-ups do to it
    #[derive(Debug, Default)]
    struct FakeSession {
        now: f32,
        mode: GameMode,
        time: f32,
        multiplier: u32,
        multiplier_until: f32,
        freezes: Vec<Option<f32>>,
        events: Vec<GameEvent>,
    }

    impl FakeSession {
        fn new() -> Self {
            Self {
                time: 30.0,
                multiplier: 1,
                ..Default::default()
            }
        }

        fn removed(&self) -> Vec<(PowerUpId, RemovalReason)> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    GameEvent::PowerUpRemoved { id, reason } => Some((*id, *reason)),
                    _ => None,
                })
                .collect()
        }
    }

    impl SessionEffects for FakeSession {
        fn now(&self) -> f32 {
            self.now
        }
        fn mode(&self) -> GameMode {
            self.mode
        }
        fn is_active(&self) -> bool {
            true
        }
        fn total_taps(&self) -> u32 {
            0
        }
        fn boost_multiplier(&mut self, factor: u32, duration: f32) {
            self.multiplier = factor;
            self.multiplier_until = self.now + duration;
        }
        fn freeze_timer(&mut self, duration: Option<f32>) {
            self.freezes.push(duration);
        }
        fn unfreeze_timer(&mut self) {}
        fn reduce_timer(&mut self, amount: f32) {
            self.time = (self.time - amount).max(0.0);
        }
        fn add_time(&mut self, amount: f32) {
            self.time += amount;
        }
        fn emit(&mut self, event: GameEvent) {
            self.events.push(event);
        }
    }

    fn tuning_always(kind: PowerUpKind) -> Tuning {
        let mut tuning = Tuning::default();
        tuning.spawn_chances = match kind {
            PowerUpKind::Multiplier => SpawnChances {
                multiplier: 1.0,
                freeze: 0.0,
                bomb: 0.0,
            },
            PowerUpKind::FreezeTime => SpawnChances {
                multiplier: 0.0,
                freeze: 1.0,
                bomb: 0.0,
            },
            PowerUpKind::Bomb => SpawnChances {
                multiplier: 0.0,
                freeze: 0.0,
                bomb: 1.0,
            },
        };
        tuning
    }

    fn advance(spawner: &mut PowerUpSpawner, fx: &mut FakeSession, dt: f32) {
        fx.now += dt;
        spawner.update(fx);
    }

    #[test]
    fn test_draw_kind_thresholds() {
        let chances = SpawnChances::default();
        assert_eq!(draw_kind(0.0, &chances), Some(PowerUpKind::Multiplier));
        assert_eq!(draw_kind(0.29, &chances), Some(PowerUpKind::Multiplier));
        assert_eq!(draw_kind(0.3, &chances), Some(PowerUpKind::FreezeTime));
        assert_eq!(draw_kind(0.49, &chances), Some(PowerUpKind::FreezeTime));
        assert_eq!(draw_kind(0.55, &chances), Some(PowerUpKind::Bomb));
        assert_eq!(draw_kind(0.61, &chances), None);
        assert_eq!(draw_kind(0.99, &chances), None);
    }

    #[test]
    fn test_spawn_occupies_a_free_slot() {
        let mut fx = FakeSession::new();
        let mut spawner = PowerUpSpawner::new(&tuning_always(PowerUpKind::Multiplier), 7);

        let id = spawner.try_spawn(&mut fx).unwrap();
        let power_up = spawner.get(id).unwrap();
        assert_eq!(power_up.kind, PowerUpKind::Multiplier);
        assert_eq!(spawner.slots()[power_up.slot].occupant(), Some(id));
        assert_eq!(spawner.slots().iter().filter(|s| !s.is_free()).count(), 1);
    }

    #[test]
    fn test_no_spawn_when_roll_misses() {
        let mut tuning = Tuning::default();
        tuning.spawn_chances = SpawnChances {
            multiplier: 0.0,
            freeze: 0.0,
            bomb: 0.0,
        };
        let mut fx = FakeSession::new();
        let mut spawner = PowerUpSpawner::new(&tuning, 1);
        for _ in 0..20 {
            assert!(spawner.try_spawn(&mut fx).is_none());
        }
        assert_eq!(spawner.active_count(), 0);
    }

    #[test]
    fn test_suppressed_spawner_does_nothing() {
        let mut fx = FakeSession::new();
        let mut spawner = PowerUpSpawner::new(&tuning_always(PowerUpKind::Bomb), 1);
        spawner.set_suppressed(true);
        assert!(spawner.try_spawn(&mut fx).is_none());
        assert!(spawner.spawn(PowerUpKind::Multiplier, &mut fx).is_none());
        assert!(fx.events.is_empty());
    }

    #[test]
    fn test_cap_evicts_oldest_by_spawn_order() {
        let mut fx = FakeSession::new();
        let mut spawner = PowerUpSpawner::new(&tuning_always(PowerUpKind::Multiplier), 3);

        let first = spawner.try_spawn(&mut fx).unwrap();
        advance(&mut spawner, &mut fx, 1.0);
        let second = spawner.try_spawn(&mut fx).unwrap();
        advance(&mut spawner, &mut fx, 1.0);
        let third = spawner.try_spawn(&mut fx).unwrap();
        advance(&mut spawner, &mut fx, 0.5);

        let fourth = spawner.try_spawn(&mut fx).unwrap();
        assert_eq!(spawner.active_count(), 3);
        assert!(spawner.get(first).is_none());
        assert_eq!(fx.removed(), vec![(first, RemovalReason::Evicted)]);

        let ids: Vec<_> = spawner.active().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second, third, fourth]);
    }

    #[test]
    fn test_eviction_happens_even_if_roll_misses() {
        let mut fx = FakeSession::new();
        let mut spawner = PowerUpSpawner::new(&Tuning::default(), 11);
        for _ in 0..3 {
            spawner.spawn(PowerUpKind::FreezeTime, &mut fx);
        }
        spawner.rules.chances = SpawnChances {
            multiplier: 0.0,
            freeze: 0.0,
            bomb: 0.0,
        };
        assert!(spawner.try_spawn(&mut fx).is_none());
        assert_eq!(spawner.active_count(), 2);
    }

    #[test]
    fn test_full_slots_discard_the_spawn() {
        let mut fx = FakeSession::new();
        let mut tuning = tuning_always(PowerUpKind::Multiplier);
        tuning.max_active_power_ups = 5;
        let anchors = [Vec2::ZERO, Vec2::X];
        let mut spawner = PowerUpSpawner::with_anchors(&tuning, 5, &anchors);

        assert!(spawner.try_spawn(&mut fx).is_some());
        assert!(spawner.try_spawn(&mut fx).is_some());
        assert!(spawner.try_spawn(&mut fx).is_none());
        assert_eq!(spawner.active_count(), 2);
    }

    #[test]
    fn test_multiplier_activation_applies_and_frees_slot() {
        let mut fx = FakeSession::new();
        let mut spawner = PowerUpSpawner::new(&Tuning::default(), 9);
        let id = spawner.spawn(PowerUpKind::Multiplier, &mut fx).unwrap();

        assert!(spawner.interact(id, &mut fx));
        assert_eq!(fx.multiplier, 2);
        assert_eq!(fx.multiplier_until, 1.5);
        assert_eq!(spawner.active_count(), 0);
        assert!(spawner.slots().iter().all(|s| s.is_free()));
        assert!(fx.events.contains(&GameEvent::PlaySound(SoundEffect::Multiplier)));

        // Handle is gone now
        assert!(!spawner.interact(id, &mut fx));
    }

    #[test]
    fn test_multiplier_grants_bonus_time_in_endless() {
        let mut fx = FakeSession::new();
        fx.mode = GameMode::Endless;
        let mut spawner = PowerUpSpawner::new(&Tuning::default(), 9);
        let id = spawner.spawn(PowerUpKind::Multiplier, &mut fx).unwrap();
        spawner.interact(id, &mut fx);
        assert_eq!(fx.time, 31.0);
    }

    #[test]
    fn test_freeze_activation_freezes_for_two_seconds() {
        let mut fx = FakeSession::new();
        let mut spawner = PowerUpSpawner::new(&Tuning::default(), 9);
        let id = spawner.spawn(PowerUpKind::FreezeTime, &mut fx).unwrap();
        spawner.interact(id, &mut fx);
        assert_eq!(fx.freezes, vec![Some(2.0)]);
    }

    #[test]
    fn test_untapped_power_up_expires_without_effect() {
        let mut fx = FakeSession::new();
        let mut spawner = PowerUpSpawner::new(&Tuning::default(), 2);
        let id = spawner.spawn(PowerUpKind::Multiplier, &mut fx).unwrap();

        advance(&mut spawner, &mut fx, 2.5);
        assert!(spawner.get(id).is_some());
        advance(&mut spawner, &mut fx, 0.5);
        assert!(spawner.get(id).is_none());
        assert_eq!(fx.removed(), vec![(id, RemovalReason::Expired)]);
        assert_eq!(fx.multiplier, 1);
    }

    #[test]
    fn test_bomb_detonates_once_with_penalty() {
        let mut fx = FakeSession::new();
        let mut spawner = PowerUpSpawner::new(&Tuning::default(), 4);
        let id = spawner.spawn(PowerUpKind::Bomb, &mut fx).unwrap();

        for _ in 0..9 {
            advance(&mut spawner, &mut fx, 0.5);
        }
        assert_eq!(fx.time, 30.0);
        advance(&mut spawner, &mut fx, 0.5);
        assert_eq!(fx.time, 20.0);
        assert!(spawner.get(id).is_none());

        // Gone for good: no second penalty, no disposal
        for _ in 0..10 {
            advance(&mut spawner, &mut fx, 0.5);
        }
        assert!(!spawner.interact(id, &mut fx));
        assert_eq!(fx.time, 20.0);
        assert_eq!(fx.removed(), vec![(id, RemovalReason::Detonated)]);
    }

    #[test]
    fn test_disposed_bomb_never_penalises() {
        let mut fx = FakeSession::new();
        let mut spawner = PowerUpSpawner::new(&Tuning::default(), 4);
        let id = spawner.spawn(PowerUpKind::Bomb, &mut fx).unwrap();

        advance(&mut spawner, &mut fx, 4.5);
        assert!(spawner.interact(id, &mut fx));
        assert_eq!(spawner.get(id).unwrap().lifecycle, Lifecycle::Disposed);
        // Second tap on the trash can is ignored
        assert!(!spawner.interact(id, &mut fx));

        // Slot still held during the grace delay
        advance(&mut spawner, &mut fx, 0.25);
        assert!(spawner.get(id).is_some());
        advance(&mut spawner, &mut fx, 0.25);
        assert!(spawner.get(id).is_none());

        for _ in 0..20 {
            advance(&mut spawner, &mut fx, 0.5);
        }
        assert_eq!(fx.time, 30.0);
        assert_eq!(fx.removed(), vec![(id, RemovalReason::Disposed)]);
    }

    #[test]
    fn test_bomb_countdown_display() {
        let mut fx = FakeSession::new();
        let mut spawner = PowerUpSpawner::new(&Tuning::default(), 4);
        let id = spawner.spawn(PowerUpKind::Bomb, &mut fx).unwrap();
        for _ in 0..4 {
            advance(&mut spawner, &mut fx, 1.0);
        }
        let shown: Vec<u32> = fx
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::BombCountdown { id: bomb, seconds } if *bomb == id => Some(*seconds),
                _ => None,
            })
            .collect();
        assert_eq!(shown, vec![5, 4, 3, 2, 1]);
        assert_eq!(spawner.bomb_time_left(id, fx.now), Some(1.0));
    }

    #[test]
    fn test_evicted_bomb_never_detonates() {
        let mut fx = FakeSession::new();
        let mut tuning = Tuning::default();
        tuning.max_active_power_ups = 1;
        let mut spawner = PowerUpSpawner::new(&tuning, 4);
        let bomb = spawner.spawn(PowerUpKind::Bomb, &mut fx).unwrap();
        spawner.spawn(PowerUpKind::FreezeTime, &mut fx).unwrap();

        for _ in 0..12 {
            advance(&mut spawner, &mut fx, 0.5);
        }
        assert_eq!(fx.time, 30.0);
        assert_eq!(fx.removed()[0], (bomb, RemovalReason::Evicted));
    }

    #[test]
    fn test_hide_all_clears_board_and_timers() {
        let mut fx = FakeSession::new();
        let mut spawner = PowerUpSpawner::new(&Tuning::default(), 8);
        spawner.spawn(PowerUpKind::Bomb, &mut fx);
        spawner.spawn(PowerUpKind::Multiplier, &mut fx);
        spawner.spawn(PowerUpKind::Bomb, &mut fx);

        spawner.hide_all(&mut fx);
        assert_eq!(spawner.active_count(), 0);
        assert!(spawner.slots().iter().all(|s| s.is_free()));

        for _ in 0..20 {
            advance(&mut spawner, &mut fx, 0.5);
        }
        assert_eq!(fx.time, 30.0);
        assert_eq!(
            fx.removed().iter().filter(|(_, r)| *r == RemovalReason::Cleared).count(),
            3
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut fx = FakeSession::new();
        let mut spawner = PowerUpSpawner::new(&Tuning::default(), 8);
        let id = spawner.spawn(PowerUpKind::Multiplier, &mut fx).unwrap();
        assert!(spawner.remove_power_up(id, RemovalReason::Cleared, &mut fx));
        assert!(!spawner.remove_power_up(id, RemovalReason::Cleared, &mut fx));
        assert!(!spawner.remove_power_up(PowerUpId(999), RemovalReason::Cleared, &mut fx));
    }

    #[test]
    fn test_same_seed_same_placement() {
        let tuning = Tuning::default();
        let mut a = PowerUpSpawner::new(&tuning, 42);
        let mut b = PowerUpSpawner::new(&tuning, 42);
        let mut fx_a = FakeSession::new();
        let mut fx_b = FakeSession::new();
        for _ in 0..30 {
            a.try_spawn(&mut fx_a);
            b.try_spawn(&mut fx_b);
        }
        assert_eq!(fx_a.events, fx_b.events);
    }

    #[derive(Debug, Clone)]
    enum Op {
        TrySpawn,
        Interact(usize),
        Advance(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::TrySpawn),
            1 => (0usize..4).prop_map(Op::Interact),
            2 => (1u8..8).prop_map(Op::Advance),
        ]
    }

    proptest! {
        #[test]
        fn prop_cap_and_slot_exclusivity_hold(
            seed in any::<u64>(),
            ops in proptest::collection::vec(op_strategy(), 1..80)
        ) {
            let tuning = Tuning::default();
            let mut fx = FakeSession::new();
            let mut spawner = PowerUpSpawner::new(&tuning, seed);

            for op in ops {
                match op {
                    Op::TrySpawn => {
                        spawner.try_spawn(&mut fx);
                    }
                    Op::Interact(i) => {
                        if let Some(id) = spawner.active().get(i).map(|p| p.id) {
                            spawner.interact(id, &mut fx);
                        }
                    }
                    Op::Advance(quarters) => advance(&mut spawner, &mut fx, quarters as f32 * 0.25),
                }

                prop_assert!(spawner.active_count() <= tuning.max_active_power_ups);
                let occupied: Vec<_> = spawner.slots().iter().filter_map(|s| s.occupant()).collect();
                prop_assert_eq!(occupied.len(), spawner.active_count());
                for power_up in spawner.active() {
                    prop_assert_eq!(spawner.slots()[power_up.slot].occupant(), Some(power_up.id));
                }
            }
        }
    }
}
