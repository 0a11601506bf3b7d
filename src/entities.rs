/// All game entity types.
///
/// Entities are plain data owned by per-kind collections in `GameSession`.
/// The only behaviour kept here is the small state enums and their
/// transition functions; movement, spawning and collisions live in
/// `compute`.

use crate::config::{Rules, REACTION_FRAMES};
use crate::geometry::Rect;
use crate::stage::{Score, StageManager};

/// Session-unique handle used by the collision pass.
pub type EntityId = u64;

// ── Facing ────────────────────────────────────────────────────────────────────

/// The eight directions the bird can face.  Per-direction sprite tables are
/// `[T; 8]` arrays indexed by `Direction::index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::UpRight,
        Direction::Up,
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
    ];

    /// Screen-space delta (y grows downward).  Each component is −1, 0 or 1.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::UpRight => (1, -1),
            Direction::Up => (0, -1),
            Direction::UpLeft => (-1, -1),
            Direction::Left => (-1, 0),
            Direction::DownLeft => (-1, 1),
            Direction::Down => (0, 1),
            Direction::DownRight => (1, 1),
        }
    }

    /// Inverse of `delta`; `None` for a zero (or oversized) vector.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.delta() == (dx, dy))
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

// ── Bird ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BirdState {
    Normal,
    /// Invulnerable; reverts to `Normal` once the countdown runs out.
    Hyper { frames_left: u32 },
}

impl BirdState {
    pub fn is_hyper(&self) -> bool {
        matches!(self, BirdState::Hyper { .. })
    }

    /// One frame of the hyper countdown.
    pub fn countdown(self) -> BirdState {
        match self {
            BirdState::Hyper { frames_left: 0 } => BirdState::Normal,
            BirdState::Hyper { frames_left } => BirdState::Hyper {
                frames_left: frames_left - 1,
            },
            BirdState::Normal => BirdState::Normal,
        }
    }
}

/// Transient sprite swaps shown for a few frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reaction {
    Firing,
    /// After shooting down an enemy.
    Singing,
    /// After shooting down a bomb.
    Happy,
}

#[derive(Clone, Debug)]
pub struct Bird {
    pub rect: Rect,
    pub facing: Direction,
    pub speed: f32,
    pub state: BirdState,
    pub reaction: Option<(Reaction, u32)>,
}

impl Bird {
    /// Swaps in the reaction sprite for the next `REACTION_FRAMES` frames.
    pub fn react(&mut self, reaction: Reaction) {
        self.reaction = Some((reaction, REACTION_FRAMES));
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombKind {
    /// Dropped by a stopped enemy.
    Enemy,
    /// Part of a boss volley.
    Boss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombState {
    Active,
    /// Disabled by an EMP: harmless and worth nothing.
    Inactive,
}

#[derive(Clone, Debug)]
pub struct Bomb {
    pub id: EntityId,
    pub rect: Rect,
    /// Unit travel direction, fixed at creation.
    pub dir: (f32, f32),
    pub speed: f32,
    pub state: BombState,
    pub kind: BombKind,
}

impl Bomb {
    pub fn is_active(&self) -> bool {
        self.state == BombState::Active
    }
}

#[derive(Clone, Debug)]
pub struct Beam {
    pub id: EntityId,
    pub rect: Rect,
    /// Unit velocity derived from `angle`.
    pub dir: (f32, f32),
    pub speed: f32,
    /// Firing angle in degrees, counter-clockwise from +x.
    pub angle: f32,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Descending,
    Stopped,
}

impl EnemyState {
    /// One-way transition: once stopped, an enemy never descends again.
    pub fn advance(self, past_stop_altitude: bool) -> EnemyState {
        match self {
            EnemyState::Descending if past_stop_altitude => EnemyState::Stopped,
            other => other,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: EntityId,
    pub rect: Rect,
    pub vy: f32,
    /// Centre-y at which the enemy halts.
    pub stop_altitude: f32,
    pub state: EnemyState,
    /// Frames between bomb drops; `None` while disabled by an EMP.
    pub interval: Option<u32>,
    pub disabled: bool,
    /// Which of the three alien sprites to draw.
    pub variant: u8,
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub id: EntityId,
    pub rect: Rect,
    pub health: i32,
    pub speed: f32,
    /// +1 moving right, −1 moving left.
    pub direction: f32,
    pub attack_interval: u32,
    pub timer: u32,
}

// ── Effects ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Explosion {
    pub id: EntityId,
    pub rect: Rect,
    pub life: i32,
}

impl Explosion {
    /// Alternates between the two explosion images every ten frames.
    pub fn image_frame(&self) -> usize {
        (self.life.max(0) / 10 % 2) as usize
    }
}

#[derive(Clone, Debug)]
pub struct Shield {
    pub id: EntityId,
    pub rect: Rect,
    pub life: i32,
}

#[derive(Clone, Debug)]
pub struct Gravity {
    pub id: EntityId,
    pub rect: Rect,
    pub life: i32,
}

#[derive(Clone, Debug, Default)]
pub struct Emp {
    pub active: bool,
    /// Drives the flashing overlay while active.
    pub timer: u32,
}

impl Emp {
    /// True on the frames the overlay is drawn.
    pub fn flashing(&self) -> bool {
        self.active && self.timer == 0
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    /// Stage 1 is done; waits for confirmation before stage 2.
    StageClear,
    GameClear,
    GameOver,
}

/// One play session.  Restarting builds a fresh value with
/// `compute::init_state` instead of clearing fields in place.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub bird: Bird,
    pub beams: Vec<Beam>,
    pub bombs: Vec<Bomb>,
    pub enemies: Vec<Enemy>,
    pub bosses: Vec<Boss>,
    pub explosions: Vec<Explosion>,
    pub shields: Vec<Shield>,
    pub gravities: Vec<Gravity>,
    pub emp: Emp,
    pub score: Score,
    pub stage: StageManager,
    pub status: GameStatus,
    pub frame: u64,
    pub next_id: EntityId,
    pub rules: Rules,
}

impl GameSession {
    pub fn alloc_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
