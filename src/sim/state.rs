//! Session state and level flow
//!
//! A `GameState` is one player's session: the current level attempt (ship,
//! pad, explosion), unlock progress and the queue of events for the
//! presentation layer. Nothing here is global; the frame driver and the
//! platform layer pass it around explicitly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::explosion::Explosion;
use super::landing::{LandingOutcome, LandingReport};
use super::pad::Pad;
use super::vehicle::{Controls, Vehicle};
use super::viewport::Viewport;
use crate::consts::*;
use crate::levels::{Level, get_level, next_level};
use crate::progress::Progress;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing loaded yet
    Menu,
    /// Level loaded, waiting for the first thrust
    Ready,
    /// Ship in flight
    Playing,
    /// Flight suspended
    Paused,
    /// Landed successfully, waiting to continue
    Won,
    /// Crashed or missed, waiting to retry
    Lost,
    /// Last level beaten
    Complete,
}

impl GamePhase {
    /// Phases in which the level is shown with the ship in play
    pub fn shows_flight(self) -> bool {
        matches!(self, GamePhase::Ready | GamePhase::Playing | GamePhase::Paused)
    }
}

/// Notifications for renderer, HUD and audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A level attempt was (re)loaded
    LevelLoaded { level: u32 },
    /// First thrust left the Ready phase
    Launched { level: u32 },
    /// Engine started or stopped firing
    ThrustChanged { thrusting: bool },
    /// Touchdown was judged
    Landed(LandingReport),
    /// Success pushed the high-water mark; persist it
    ProgressUnlocked { highest: u32 },
    /// The last explosion particle burned out
    ExplosionFinished,
    /// Result message is due (fires once per landing)
    ShowResult {
        level: u32,
        outcome: LandingOutcome,
    },
    /// Every level beaten
    GameComplete,
}

/// A result message waiting for its delay to pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingResult {
    /// Wall-clock second at which to show it
    pub due_at: f64,
    pub level: u32,
    pub outcome: LandingOutcome,
}

impl PendingResult {
    pub fn new(report: &LandingReport, landed_at: f64) -> Self {
        let delay = match report.outcome {
            LandingOutcome::Success => SUCCESS_RESULT_DELAY,
            LandingOutcome::Crashed => CRASH_RESULT_DELAY,
            LandingOutcome::MissedPad | LandingOutcome::BadAngle => DISTRESS_RESULT_DELAY,
        };
        Self {
            due_at: landed_at + delay,
            level: report.level,
            outcome: report.outcome,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Current level id
    pub level_id: u32,
    pub level: &'static Level,
    pub viewport: Viewport,
    pub vehicle: Vehicle,
    pub pad: Pad,
    pub explosion: Explosion,
    pub progress: Progress,
    /// Control intents latched for the flight (cleared on level load and touchdown)
    pub controls: Controls,
    /// Frames simulated in the current attempt
    pub flight_ticks: u64,
    pending_result: Option<PendingResult>,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session showing the menu
    pub fn new(seed: u64, viewport: Viewport, progress: Progress) -> Self {
        let level = get_level(1);
        let pad = Pad::layout(&viewport, &level.env);
        let mut vehicle = Vehicle::new(viewport.width / 2.0, SHIP_SPAWN_Y);
        vehicle.set_scale(viewport.scale_factor);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            level_id: 1,
            level,
            viewport,
            vehicle,
            pad,
            explosion: Explosion::new(),
            progress,
            controls: Controls::default(),
            flight_ticks: 0,
            pending_result: None,
            events: Vec::new(),
        }
    }

    /// Take queued events (oldest first)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn pending_result(&self) -> Option<&PendingResult> {
        self.pending_result.as_ref()
    }

    /// Load a level attempt and wait for the first thrust
    pub fn load_level(&mut self, level_id: u32) {
        self.cut_engine();
        self.level = get_level(level_id);
        self.level_id = self.level.id;

        self.pad = Pad::layout(&self.viewport, &self.level.env);
        self.explosion.clear();

        self.vehicle
            .reset(self.viewport.width / 2.0, SHIP_SPAWN_Y, self.level.env.start_fuel);
        self.vehicle.set_scale(self.viewport.scale_factor);

        self.controls = Controls::default();
        self.flight_ticks = 0;
        self.pending_result = None;
        self.phase = GamePhase::Ready;

        log::info!("Loaded level {} ({})", self.level_id, self.level.name);
        self.emit(GameEvent::LevelLoaded {
            level: self.level_id,
        });
    }

    /// Start from the first level
    pub fn start_game(&mut self) {
        self.load_level(1);
    }

    /// Start at a chosen level. Locked levels are refused.
    pub fn select_level(&mut self, level_id: u32) -> bool {
        if !self.progress.is_unlocked(level_id) || get_level(level_id).id != level_id {
            log::warn!("Level {} is locked", level_id);
            return false;
        }
        self.load_level(level_id);
        true
    }

    /// Try the current level again
    pub fn retry_level(&mut self) {
        self.load_level(self.level_id);
    }

    /// Leave a result screen: next level after a win, retry after a loss
    pub fn continue_after_result(&mut self) {
        match self.phase {
            GamePhase::Won => match next_level(self.level_id) {
                Some(next) => self.load_level(next.id),
                None => {
                    self.phase = GamePhase::Complete;
                    log::info!("All levels complete");
                    self.emit(GameEvent::GameComplete);
                }
            },
            GamePhase::Lost => self.retry_level(),
            _ => {}
        }
    }

    /// Ready → Playing on the first thrust
    pub fn launch(&mut self) {
        if self.phase == GamePhase::Ready {
            self.phase = GamePhase::Playing;
            self.emit(GameEvent::Launched {
                level: self.level_id,
            });
        }
    }

    /// Toggle between Playing and Paused. The engine stops while paused.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.cut_engine();
                self.controls = Controls::default();
                self.phase = GamePhase::Paused;
            }
            GamePhase::Paused => self.phase = GamePhase::Playing,
            _ => {}
        }
    }

    /// Abandon the current attempt and show the title screen
    pub fn return_to_menu(&mut self) {
        self.cut_engine();
        self.controls = Controls::default();
        self.pending_result = None;
        self.explosion.clear();
        self.phase = GamePhase::Menu;
        log::info!("Back to menu from level {}", self.level_id);
    }

    /// Viewport changed: keep the world consistent with the new ground line
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        self.vehicle.set_scale(self.viewport.scale_factor);
        let x = self.pad.x - self.pad.base_x;
        self.pad = Pad::layout(&self.viewport, &self.level.env);
        if self.pad.is_moving() {
            self.pad.x = self.pad.base_x + x.clamp(-self.pad.move_range, self.pad.move_range);
        }
    }

    /// Apply a landing verdict: phase change, progress, explosion, timer
    pub(crate) fn resolve_landing(&mut self, report: LandingReport, now: f64) {
        self.controls = Controls::default();
        self.cut_engine();

        match report.outcome {
            LandingOutcome::Success => {
                self.phase = GamePhase::Won;
                log::info!(
                    "Level {} landed at speed {:.2}, tilt {:.1} after {} frames",
                    report.level,
                    report.touchdown.speed,
                    report.touchdown.tilt,
                    self.flight_ticks
                );
                if self.progress.record_success(report.level) {
                    log::info!("Unlocked level {}", self.progress.highest_unlocked());
                    self.emit(GameEvent::ProgressUnlocked {
                        highest: self.progress.highest_unlocked(),
                    });
                }
            }
            outcome => {
                self.phase = GamePhase::Lost;
                log::info!(
                    "Level {} failed after {} frames: {:?}",
                    report.level,
                    self.flight_ticks,
                    outcome
                );
                if outcome.is_destructive() {
                    let origin = self.vehicle.pos;
                    self.explosion.start(origin, &mut self.rng);
                }
            }
        }

        self.pending_result = Some(PendingResult::new(&report, now));
        self.emit(GameEvent::Landed(report));
    }

    /// Deliver the delayed result message once its time has come
    pub fn poll_result(&mut self, now: f64) -> Option<PendingResult> {
        let due = self.pending_result.is_some_and(|p| now >= p.due_at);
        if !due {
            return None;
        }
        let result = self.pending_result.take()?;
        self.emit(GameEvent::ShowResult {
            level: result.level,
            outcome: result.outcome,
        });
        Some(result)
    }

    /// Stop the engine, announcing it if it was firing
    fn cut_engine(&mut self) {
        if self.vehicle.is_thrusting() {
            self.vehicle.cut_engine();
            self.emit(GameEvent::ThrustChanged { thrusting: false });
        }
    }

    /// Endpoints of the ship-to-pad guide line, or None when hidden
    pub fn guide_line(&self) -> Option<(Vec2, Vec2)> {
        if !self.phase.shows_flight() || self.explosion.is_active() {
            return None;
        }
        Some((
            self.vehicle.pos,
            Vec2::new(self.pad.center_x(), self.pad.y),
        ))
    }
}
