//! Background scheduler: one thread owns the live game and ticks it at a
//! fixed wall-clock cadence; any thread may copy out a consistent view.
//!
//! The live [`Game`] sits behind a single mutex. The loop holds it for the
//! whole of decide + tick, and `get_state` holds it for the whole copy, so
//! readers only ever observe states between completed ticks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use lanewar_core::constants::MAX_TICK_LAG;
use lanewar_core::spec::GameSpec;
use lanewar_sim::{Decider, Game, SimError};

use crate::state::{SimConfig, SimulationError};

/// Friendly then enemy.
type Deciders = [Box<dyn Decider>; 2];

struct LoopHandle {
    stop: Arc<AtomicBool>,
    thread: JoinHandle<Deciders>,
}

/// A game plus the two deciders that play it.
pub struct Simulation {
    config: SimConfig,
    tick_duration: Duration,
    game: Arc<Mutex<Game>>,
    /// Parked here while stopped; owned by the loop thread while running.
    deciders: Option<Deciders>,
    running: Option<LoopHandle>,
}

impl Simulation {
    pub fn new(
        spec: Arc<GameSpec>,
        friendly: impl Decider + 'static,
        enemy: impl Decider + 'static,
        config: SimConfig,
    ) -> Result<Self, SimulationError> {
        let tick_duration = config.tick_duration()?;
        let game = Game::new(spec).map_err(SimError::from)?;
        let friendly: Box<dyn Decider> = Box::new(friendly);
        let enemy: Box<dyn Decider> = Box::new(enemy);
        Ok(Self {
            config,
            tick_duration,
            game: Arc::new(Mutex::new(game)),
            deciders: Some([friendly, enemy]),
            running: None,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Spawn the loop thread. Ticking begins immediately.
    pub fn start(&mut self) -> Result<(), SimulationError> {
        if self.running.is_some() {
            return Err(SimulationError::AlreadyRunning);
        }
        let deciders = self.deciders.take().ok_or(SimulationError::LoopPanicked)?;

        let stop = Arc::new(AtomicBool::new(false));
        let game = Arc::clone(&self.game);
        let loop_stop = Arc::clone(&stop);
        let config = self.config;
        let tick_duration = self.tick_duration;

        let thread = std::thread::Builder::new()
            .name("lanewar-game-loop".into())
            .spawn(move || run_game_loop(&game, deciders, &loop_stop, config, tick_duration))
            .map_err(SimulationError::ThreadSpawn)?;

        info!(
            timestep_secs = config.timestep_secs,
            fair = config.fair,
            "Simulation started"
        );
        self.running = Some(LoopHandle { stop, thread });
        Ok(())
    }

    /// Stop ticking and wait for the loop thread to exit. A tick already
    /// in progress completes; no further tick begins. Stopping a stopped
    /// simulation does nothing.
    pub fn stop(&mut self) -> Result<(), SimulationError> {
        let Some(LoopHandle { stop, thread }) = self.running.take() else {
            return Ok(());
        };
        stop.store(true, Ordering::Release);
        let deciders = thread.join().map_err(|_| SimulationError::LoopPanicked)?;
        self.deciders = Some(deciders);
        info!("Simulation stopped");
        Ok(())
    }

    /// Copy the live state into `scratch` and return it.
    ///
    /// An empty `scratch` is filled with a fresh copy; an existing one is
    /// overwritten in place, so it must come from the same spec.
    pub fn get_state<'a>(&self, scratch: &'a mut Option<Game>) -> Result<&'a Game, SimulationError> {
        let live = self.game.lock().map_err(|_| SimulationError::LockPoisoned)?;
        if let Some(game) = scratch.as_mut() {
            game.copy_from(&live)?;
        }
        let game: &'a Game = scratch.get_or_insert_with(|| live.clone());
        Ok(game)
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            error!("Failed to stop simulation cleanly: {err}");
        }
    }
}

/// What the loop does after a tick, given when the next one is due.
#[derive(Debug, PartialEq, Eq)]
enum Pace {
    /// Early: wait this long.
    Sleep(Duration),
    /// Late, but within `MAX_TICK_LAG` periods; run the next tick now.
    Behind,
    /// More than `MAX_TICK_LAG` periods late; restart the cadence from now
    /// instead of catching up.
    Reset(Duration),
}

fn pace(next_tick_time: Instant, now: Instant, period: Duration) -> Pace {
    if next_tick_time > now {
        Pace::Sleep(next_tick_time - now)
    } else if now - next_tick_time > period * MAX_TICK_LAG {
        Pace::Reset(now - next_tick_time)
    } else {
        Pace::Behind
    }
}

/// The game loop. Runs until `stop` is set, then hands the deciders back.
fn run_game_loop(
    game: &Mutex<Game>,
    mut deciders: Deciders,
    stop: &AtomicBool,
    config: SimConfig,
    tick_duration: Duration,
) -> Deciders {
    let dt = config.timestep_secs;
    let mut next_tick_time = Instant::now();

    while !stop.load(Ordering::Acquire) {
        // 1. Decide and tick under one lock
        {
            let Ok(mut game) = game.lock() else {
                error!("Game state lock poisoned; game loop exiting");
                break;
            };
            let [friendly, enemy] = &mut deciders;
            let friendly = friendly.decide(&game);
            let enemy = enemy.decide(&game);
            if config.fair && game.time.tick % 2 == 1 {
                game.tick_mirrored(dt, friendly.as_ref(), enemy.as_ref());
            } else {
                game.tick(dt, friendly.as_ref(), enemy.as_ref());
            }
        }

        // 2. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        match pace(next_tick_time, now, tick_duration) {
            Pace::Sleep(wait) => std::thread::sleep(wait),
            Pace::Behind => {}
            Pace::Reset(behind) => {
                warn!(
                    behind_ms = behind.as_millis() as u64,
                    max_lag_ticks = MAX_TICK_LAG,
                    "Game loop fell behind its cadence; skipping missed ticks"
                );
                next_tick_time = now;
            }
        }
    }
    deciders
}
