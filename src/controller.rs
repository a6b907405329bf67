//! Session lifecycle and frame pacing
//!
//! Idle → Running on `start`, Running → Won when the last item goes down,
//! Won → Running on `replay`. The frame callback only keeps itself scheduled
//! while Running.

use crate::config::GameConfig;
use crate::sim::{GameEvent, GamePhase, GameState, SimError, TickInput, tick};

/// Lifecycle state visible to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    /// Start overlay shown, no session yet
    Idle,
    Running,
    /// Win overlay shown, simulation halted
    Won,
}

/// Result of one display-refresh callback
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    pub events: Vec<GameEvent>,
    /// Request another frame
    pub keep_running: bool,
}

/// Owns the only mutable session
#[derive(Debug)]
pub struct GameController {
    config: GameConfig,
    session: Option<GameState>,
    /// Timestamp of the previous frame (ms)
    last_time: f64,
}

impl GameController {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            session: None,
            last_time: 0.0,
        }
    }

    pub fn phase(&self) -> ControllerPhase {
        match self.session.as_ref().map(|s| s.phase) {
            None => ControllerPhase::Idle,
            Some(GamePhase::Running) => ControllerPhase::Running,
            Some(GamePhase::Won) => ControllerPhase::Won,
        }
    }

    /// Read-only view for rendering
    pub fn session(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    /// Begin a fresh session, discarding any previous one
    pub fn start(&mut self, seed: u64, now_ms: f64) {
        self.session = Some(GameState::new(&self.config, seed));
        self.last_time = now_ms;
    }

    /// Identical to `start`; kept separate for the overlay's replay button
    pub fn replay(&mut self, seed: u64, now_ms: f64) {
        log::info!("Replay requested");
        self.start(seed, now_ms);
    }

    /// Advance by the time elapsed since the previous frame
    pub fn frame(&mut self, now_ms: f64, input: &TickInput) -> Result<FrameOutcome, SimError> {
        let dt = ((now_ms - self.last_time) / 1000.0) as f32;
        self.last_time = now_ms;

        let Some(state) = self.session.as_mut() else {
            return Ok(FrameOutcome::default());
        };
        if state.phase != GamePhase::Running {
            return Ok(FrameOutcome::default());
        }

        let outcome = tick(state, input, dt).inspect_err(|e| {
            log::error!("Simulation invariant broken: {}", e);
        })?;
        Ok(FrameOutcome {
            events: outcome.events,
            keep_running: !outcome.won,
        })
    }
}
