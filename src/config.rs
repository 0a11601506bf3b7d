/// Tunables for the simulation.
///
/// Everything the game needs at compile time lives here: the logical play
/// area, entity speeds and lifetimes, and the `Rules` that gate the score
/// economy.  Runtime settings (frame rate, seed, logging) come from the
/// command line and are checked by `FrameRate::new`.

use std::time::Duration;

use thiserror::Error;

// ── Play area ─────────────────────────────────────────────────────────────────

/// Logical width of the play area.  The terminal viewport scales this down.
pub const WIDTH: f32 = 1100.0;
/// Logical height of the play area.
pub const HEIGHT: f32 = 650.0;

// ── Bird ──────────────────────────────────────────────────────────────────────

pub const BIRD_START: (f32, f32) = (900.0, 400.0);
pub const BIRD_SIZE: (f32, f32) = (60.0, 50.0);
pub const BIRD_SPEED: f32 = 10.0;
pub const BIRD_BOOST_SPEED: f32 = 20.0;
/// Frames a reaction sprite stays on screen after a kill or a shot.
pub const REACTION_FRAMES: u32 = 8;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const BEAM_SIZE: (f32, f32) = (40.0, 12.0);
pub const BEAM_SPEED: f32 = 10.0;
/// Beams in one NeoBeam fan.
pub const NEOBEAM_COUNT: usize = 5;

pub const BOMB_MIN_SIZE: u32 = 30;
pub const BOMB_MAX_SIZE: u32 = 80;
pub const BOSS_BOMB_SIZE: f32 = 40.0;
pub const BOSS_BOMB_SPEED: f32 = 15.0;
pub const BOSS_VOLLEY: [f32; 5] = [-30.0, -15.0, 0.0, 15.0, 30.0];

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: (f32, f32) = (64.0, 48.0);
pub const ENEMY_DESCENT_SPEED: f32 = 6.0;
pub const ENEMY_STOP_MIN: u32 = 50;
pub const ENEMY_INTERVAL_RANGE: (u32, u32) = (50, 300);
/// Stage-1 spawn period in frames.
pub const ENEMY_SPAWN_EVERY: u64 = 200;
/// Stage-2 spawn period in frames.
pub const BOSS_STAGE_SPAWN_EVERY: u64 = 150;
pub const BOSS_STAGE_MAX_ENEMIES: usize = 3;

pub const BOSS_SIZE: (f32, f32) = (180.0, 120.0);
pub const BOSS_SPEED: f32 = 2.0;
pub const BOSS_ATTACK_INTERVAL: u32 = 30;

// ── Effects ───────────────────────────────────────────────────────────────────

pub const EXPLOSION_SIZE: (f32, f32) = (70.0, 70.0);
pub const ENEMY_EXPLOSION_LIFE: i32 = 100;
pub const BOMB_EXPLOSION_LIFE: i32 = 50;
pub const BOSS_EXPLOSION_LIFE: i32 = 200;

pub const SHIELD_THICKNESS: f32 = 20.0;
pub const SHIELD_LIFE: i32 = 400;
pub const GRAVITY_SIZE: (f32, f32) = (500.0, 500.0);
pub const GRAVITY_LIFE: i32 = 400;
pub const HYPER_FRAMES: u32 = 50;
/// The EMP overlay flashes once every this many frames.
pub const EMP_FLASH_EVERY: u32 = 5;

// ── Score economy ─────────────────────────────────────────────────────────────

/// Costs and thresholds that gate the score economy.
#[derive(Clone, Debug, PartialEq)]
pub struct Rules {
    pub shield_cost: u32,
    pub gravity_cost: u32,
    pub hyper_cost: u32,
    pub emp_cost: u32,
    pub enemy_points: u32,
    pub bomb_points: u32,
    /// Below this score enemies drop single bombs.
    pub triple_fan_score: u32,
    /// At or above this score enemies drop five-bomb fans.
    pub quintuple_fan_score: u32,
    pub stage_clear_kills: u32,
    pub boss_health: i32,
    pub neobeam_kills: u32,
    pub neobeam_uses: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            shield_cost: 50,
            gravity_cost: 100,
            hyper_cost: 50,
            emp_cost: 20,
            enemy_points: 10,
            bomb_points: 1,
            triple_fan_score: 50,
            quintuple_fan_score: 100,
            stage_clear_kills: 15,
            boss_health: 30,
            neobeam_kills: 3,
            neobeam_uses: 3,
        }
    }
}

// ── Runtime settings ──────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("frame rate must be between 1 and {max}, got {got}")]
    FrameRate { got: u32, max: u32 },
    #[error("terminal is {cols}x{rows}, need at least {min_cols}x{min_rows}")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },
}

pub const DEFAULT_FPS: u32 = 50;
pub const MAX_FPS: u32 = 240;

/// A validated simulation rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRate(u32);

impl FrameRate {
    pub fn new(fps: u32) -> Result<Self, ConfigError> {
        if fps == 0 || fps > MAX_FPS {
            return Err(ConfigError::FrameRate { got: fps, max: MAX_FPS });
        }
        Ok(FrameRate(fps))
    }

    pub fn fps(&self) -> u32 {
        self.0
    }

    pub fn period(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.0 as u64)
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate(DEFAULT_FPS)
    }
}
