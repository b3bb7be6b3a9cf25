//! Tap Rush headless runner
//!
//! Plays one session with the autopilot at a fixed timestep, logs what the
//! HUD would show and prints both leaderboards at the end.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::path::PathBuf;

    use clap::Parser;
    use directories::ProjectDirs;

    use tap_rush::audio::{AudioSink, LogAudio};
    use tap_rush::consts::SIM_DT;
    use tap_rush::persistence::{FileStore, MemoryStore};
    use tap_rush::sim::{Autopilot, GameEvent, GameMode, GameSession, tick};
    use tap_rush::ui::{Hud, leaderboard_screen, removal_label};
    use tap_rush::{LeaderboardStore, Tuning};

    /// timed tap-counting arcade game, played by an autopilot
    #[derive(Parser, Debug, Clone)]
    #[clap(version, about)]
    pub struct Cli {
        /// game mode to play: race or endless
        #[clap(short = 'm', long, default_value = "race")]
        mode: GameMode,

        /// RNG seed for power-up spawns (random if omitted)
        #[clap(short = 's', long)]
        seed: Option<u64>,

        /// JSON file overriding the default tuning
        #[clap(short = 't', long)]
        tuning: Option<PathBuf>,

        /// directory for leaderboard files
        #[clap(long)]
        data_dir: Option<PathBuf>,

        /// keep scores in memory only
        #[clap(long)]
        no_save: bool,

        /// autopilot tap rate
        #[clap(long, default_value_t = 8.0)]
        taps_per_second: f32,

        /// autopilot delay before touching a power-up
        #[clap(long, default_value_t = 0.4)]
        reaction_time: f32,

        /// stop the run after this much simulated time
        #[clap(long, default_value_t = 600.0)]
        max_seconds: f32,

        /// print a HUD line every simulated second
        #[clap(long)]
        verbose: bool,
    }

    fn leaderboard(cli: &Cli, tuning: &Tuning) -> LeaderboardStore {
        if cli.no_save {
            return LeaderboardStore::from_tuning(MemoryStore::new(), tuning);
        }
        let dir = cli.data_dir.clone().or_else(|| {
            ProjectDirs::from("", "", "tap-rush").map(|pd| pd.data_local_dir().to_path_buf())
        });
        match dir {
            Some(dir) => {
                log::info!("Leaderboards stored in {}", dir.display());
                LeaderboardStore::from_tuning(FileStore::new(dir), tuning)
            }
            None => {
                log::warn!("No data directory available, scores will not persist");
                LeaderboardStore::from_tuning(MemoryStore::new(), tuning)
            }
        }
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let cli = Cli::parse();

        let tuning = match &cli.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        let seed = cli.seed.unwrap_or_else(rand::random);
        let store = leaderboard(&cli, &tuning);

        log::info!("Tap Rush starting, seed {}", seed);
        let mut game = GameSession::new(tuning, store, seed);
        let mut pilot = Autopilot::new(cli.taps_per_second, cli.reaction_time);
        let mut audio = LogAudio::new();
        let mut hud = Hud::new();

        game.start_game(cli.mode);
        let mut next_report = 1.0;
        while game.is_active() && game.now() < cli.max_seconds {
            let input = pilot.plan(&game, SIM_DT);
            tick(&mut game, &input, SIM_DT);

            for event in game.drain_events() {
                match event {
                    GameEvent::PlaySound(effect) => audio.play(effect),
                    GameEvent::PowerUpRemoved { id, reason } => {
                        log::debug!("Power-up {:?} {}", id, removal_label(reason));
                    }
                    GameEvent::ChallengeEnded { success } => {
                        log::info!("Challenge {}", if success { "beaten" } else { "failed" });
                    }
                    _ => {}
                }
                hud.apply(&event);
            }

            if cli.verbose && game.now() >= next_report {
                println!("{}", hud.status_line());
                next_report += 1.0;
            }
        }

        if game.is_active() {
            log::info!("Stopping after {:.0}s of simulated time", game.now());
            game.game_over();
            for event in game.drain_events() {
                hud.apply(&event);
            }
        }

        println!("{}", hud.status_line());
        match hud.last_score {
            Some((mode, score, Some(rank))) => {
                println!("{} score {} placed #{}", mode.as_str(), score, rank);
            }
            Some((mode, score, None)) => {
                println!("{} score {} did not make the table", mode.as_str(), score);
            }
            None => {}
        }
        println!("{} sound cues played\n", audio.played());
        print!("{}", leaderboard_screen(game.leaderboard()));
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives GameSession through the library API
}
