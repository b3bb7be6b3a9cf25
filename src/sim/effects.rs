//! Narrow interface power-ups and challenges use to act on the session

use super::state::{GameEvent, GameMode};

/// Everything a collaborator may read from or do to the running session.
/// Implemented by [`super::Session`]; tests can substitute a fake.
pub trait SessionEffects {
    /// Session clock in seconds
    fn now(&self) -> f32;
    fn mode(&self) -> GameMode;
    fn is_active(&self) -> bool;
    fn total_taps(&self) -> u32;

    /// Multiply taps by `factor` for `duration` seconds. A new boost restarts
    /// the window instead of stacking.
    fn boost_multiplier(&mut self, factor: u32, duration: f32);

    /// Stop timer decay. `None` holds until [`SessionEffects::unfreeze_timer`];
    /// a new call replaces any pending auto-unfreeze.
    fn freeze_timer(&mut self, duration: Option<f32>);
    fn unfreeze_timer(&mut self);

    /// Floors at zero
    fn reduce_timer(&mut self, amount: f32);
    fn add_time(&mut self, amount: f32);

    fn emit(&mut self, event: GameEvent);
}
