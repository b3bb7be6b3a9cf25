//! Presentation model
//!
//! [`Hud`] folds the core's events into what a screen would show. It never
//! talks back to the core.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::leaderboard::LeaderboardStore;
use crate::sim::{GameEvent, GameMode, PowerUpId, PowerUpKind, RemovalReason, Screen};

/// Challenge overlay contents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChallengeHud {
    pub goal: u32,
    pub taps: u32,
    pub time_left: f32,
}

/// A power-up button on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUpHud {
    pub kind: PowerUpKind,
    pub slot: usize,
    /// Bomb countdown text
    pub countdown: Option<u32>,
    /// Bomb shown as a trash can
    pub disposed: bool,
}

/// Everything currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub screen: Screen,
    pub timer: u32,
    pub taps: u32,
    pub goal: u32,
    /// Race target; hidden in Endless
    pub overall_goal: Option<u32>,
    pub multiplier: u32,
    pub frozen: bool,
    pub challenge: Option<ChallengeHud>,
    pub power_ups: BTreeMap<PowerUpId, PowerUpHud>,
    /// Last score saved, with its rank if it made the table
    pub last_score: Option<(GameMode, u32, Option<usize>)>,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            screen: Screen::MainMenu,
            timer: 0,
            taps: 0,
            goal: 0,
            overall_goal: None,
            multiplier: 1,
            frozen: false,
            challenge: None,
            power_ups: BTreeMap::new(),
            last_score: None,
        }
    }
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::TimerChanged { seconds } => self.timer = seconds,
            GameEvent::TapCountChanged { total } => self.taps = total,
            GameEvent::GoalChanged { goal } => self.goal = goal,
            GameEvent::OverallGoalShown { goal } => self.overall_goal = Some(goal),
            GameEvent::ScreenChanged(screen) => {
                if screen != Screen::Gameplay || self.screen != Screen::Gameplay {
                    self.challenge = None;
                    self.power_ups.clear();
                }
                if matches!(screen, Screen::MainMenu) {
                    self.overall_goal = None;
                }
                self.screen = screen;
            }
            GameEvent::FreezeChanged { frozen } => self.frozen = frozen,
            GameEvent::MultiplierChanged { factor } => self.multiplier = factor,
            GameEvent::PowerUpSpawned { id, kind, slot } => {
                self.power_ups.insert(
                    id,
                    PowerUpHud {
                        kind,
                        slot,
                        countdown: None,
                        disposed: false,
                    },
                );
            }
            GameEvent::PowerUpRemoved { id, .. } => {
                self.power_ups.remove(&id);
            }
            GameEvent::BombDisposed { id } => {
                if let Some(p) = self.power_ups.get_mut(&id) {
                    p.disposed = true;
                    p.countdown = None;
                }
            }
            GameEvent::BombCountdown { id, seconds } => {
                if let Some(p) = self.power_ups.get_mut(&id) {
                    p.countdown = Some(seconds);
                }
            }
            GameEvent::ChallengeStarted { goal, time_limit } => {
                self.challenge = Some(ChallengeHud {
                    goal,
                    taps: 0,
                    time_left: time_limit,
                });
            }
            GameEvent::ChallengeProgress { taps, goal } => {
                if let Some(c) = &mut self.challenge {
                    c.taps = taps;
                    c.goal = goal;
                }
            }
            GameEvent::ChallengeTimer { time_left } => {
                if let Some(c) = &mut self.challenge {
                    c.time_left = time_left;
                }
            }
            GameEvent::ChallengeEnded { .. } => self.challenge = None,
            GameEvent::ScoreSaved { mode, score, rank } => {
                self.last_score = Some((mode, score, rank));
            }
            GameEvent::PlaySound(_) => {}
        }
    }

    /// One-line status for headless runs
    pub fn status_line(&self) -> String {
        let mut line = format!("time {:>3}s  taps {:>4}  goal {:>4}", self.timer, self.taps, self.goal);
        if let Some(goal) = self.overall_goal {
            let _ = write!(line, "/{goal}");
        }
        if self.multiplier > 1 {
            let _ = write!(line, "  x{}", self.multiplier);
        }
        if self.frozen {
            line.push_str("  [frozen]");
        }
        if let Some(c) = &self.challenge {
            let _ = write!(line, "  CHALLENGE {}/{} ({:.1}s)", c.taps, c.goal, c.time_left);
        }
        line
    }
}

/// Text block for one mode's leaderboard
pub fn format_leaderboard(mode: GameMode, scores: &[u32], max_display: usize) -> String {
    let mut text = format!("{} Mode Leaderboard:\n", mode.as_str());
    if scores.is_empty() {
        text.push_str("No scores yet\n");
        return text;
    }
    for (i, score) in scores.iter().take(max_display).enumerate() {
        let _ = writeln!(text, "{}. {}", i + 1, score);
    }
    text
}

/// Both modes, Endless first
pub fn leaderboard_screen(store: &LeaderboardStore) -> String {
    [GameMode::Endless, GameMode::Race]
        .iter()
        .map(|&mode| format_leaderboard(mode, &store.get_leaderboard(mode), store.max_entries()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable reason, for logs
pub fn removal_label(reason: RemovalReason) -> &'static str {
    match reason {
        RemovalReason::Activated => "collected",
        RemovalReason::Expired => "expired",
        RemovalReason::Evicted => "evicted",
        RemovalReason::Detonated => "exploded",
        RemovalReason::Disposed => "binned",
        RemovalReason::Cleared => "cleared",
    }
}
