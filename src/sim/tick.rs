//! Frame tick
//!
//! Applies the input gathered during a frame, then advances the session.

use super::game::GameSession;
use super::powerups::Lifecycle;
use super::state::PowerUpId;

/// Input gathered during one frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Taps on the main button
    pub taps: u32,
    /// Power-ups the player touched, in order
    pub pressed: Vec<PowerUpId>,
}

/// Advance the game by one frame: input first, then the timed step
pub fn tick(game: &mut GameSession, input: &TickInput, dt: f32) {
    for &id in &input.pressed {
        game.press_power_up(id);
    }
    for _ in 0..input.taps {
        game.on_tap();
    }
    game.update(dt);
}

/// Idle/demo player: taps at a steady rate and grabs every power-up after a
/// reaction delay (bombs included, so it never eats a penalty unless the
/// reaction delay exceeds the bomb countdown)
#[derive(Debug, Clone)]
pub struct Autopilot {
    pub taps_per_second: f32,
    pub reaction_time: f32,
    carry: f32,
}

impl Autopilot {
    pub fn new(taps_per_second: f32, reaction_time: f32) -> Self {
        Self {
            taps_per_second: taps_per_second.max(0.0),
            reaction_time: reaction_time.max(0.0),
            carry: 0.0,
        }
    }

    /// Input for the next frame of length `dt`
    pub fn plan(&mut self, game: &GameSession, dt: f32) -> TickInput {
        if !game.is_active() {
            return TickInput::default();
        }

        self.carry += self.taps_per_second * dt;
        let taps = self.carry.floor();
        self.carry -= taps;

        let now = game.now();
        let pressed = game
            .spawner()
            .active()
            .iter()
            .filter(|p| p.lifecycle != Lifecycle::Disposed)
            .filter(|p| now - p.spawned_at >= self.reaction_time)
            .map(|p| p.id)
            .collect();

        TickInput {
            taps: taps as u32,
            pressed,
        }
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(8.0, 0.4)
    }
}
