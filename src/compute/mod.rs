/// Game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameSession` (and, where needed, an RNG handle) and returns a brand-new
/// `GameSession`.  Side effects are limited to the injected RNG and
/// `tracing` events.

pub mod abilities;
pub mod collision;
pub mod spawn;

use rand::Rng;

use crate::config::{
    Rules, BIRD_START, BOSS_STAGE_MAX_ENEMIES, BOSS_STAGE_SPAWN_EVERY, EMP_FLASH_EVERY,
    ENEMY_SPAWN_EVERY, NEOBEAM_COUNT, WIDTH,
};
use crate::entities::{Direction, EnemyState, GameSession, GameStatus, Reaction};
use crate::geometry::fully_in_bounds;
use crate::stage::{Score, StageManager};

pub use abilities::{deploy_gravity, deploy_shield, enter_hyper, toggle_emp};
pub use collision::{apply_collisions, resolve_collisions, CollisionEvent, Outcome};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session: bird at its start position, everything else empty.
pub fn init_state(rules: Rules) -> GameSession {
    tracing::info!("new session");
    GameSession {
        bird: spawn::bird(BIRD_START),
        beams: Vec::new(),
        bombs: Vec::new(),
        enemies: Vec::new(),
        bosses: Vec::new(),
        explosions: Vec::new(),
        shields: Vec::new(),
        gravities: Vec::new(),
        emp: Default::default(),
        score: Score::default(),
        stage: StageManager::default(),
        status: GameStatus::Playing,
        frame: 0,
        next_id: 0,
        rules,
    }
}

/// Full reset after a game over or game clear.  Only the rules survive.
pub fn reset(state: &GameSession) -> GameSession {
    init_state(state.rules.clone())
}

/// Leave the stage-clear screen and carry on in the next stage.
pub fn resume_stage(state: &GameSession) -> GameSession {
    let mut next = state.clone();
    if next.status == GameStatus::StageClear {
        next.status = GameStatus::Playing;
        tracing::info!(stage = next.stage.stage, "stage start");
    }
    next
}

// ── Input-driven state transitions ───────────────────────────────────────────

/// Move the bird by the summed key deltas `(dx, dy)`.
///
/// A move that would leave the bird even partly outside the play area is
/// undone as a whole.  Any non-zero intent still turns the bird.
pub fn move_bird(state: &GameSession, dx: i32, dy: i32, boost: bool) -> GameSession {
    let mut next = state.clone();
    let bird = &mut next.bird;
    bird.speed = spawn::bird_speed(boost);

    let (mx, my) = (bird.speed * dx as f32, bird.speed * dy as f32);
    bird.rect.translate(mx, my);
    if !fully_in_bounds(&bird.rect) {
        bird.rect.translate(-mx, -my);
    }
    if let Some(facing) = Direction::from_delta(dx.signum(), dy.signum()) {
        bird.facing = facing;
    }
    next
}

/// Fire one beam toward `pointer`.
pub fn fire_beam(state: &GameSession, pointer: (f32, f32)) -> GameSession {
    let mut next = state.clone();
    let id = next.alloc_id();
    let beam = spawn::beam(id, &next.bird, pointer, 0.0);
    next.beams.push(beam);
    next.bird.react(Reaction::Firing);
    next
}

/// Fire a NeoBeam fan if a use is available.
pub fn fire_neo_beam(state: &GameSession, pointer: (f32, f32)) -> GameSession {
    let mut next = state.clone();
    if !next.stage.use_neobeam() {
        tracing::trace!("neobeam not ready");
        return next;
    }
    let beams = spawn::neo_beam(&mut next.next_id, &next.bird, pointer, NEOBEAM_COUNT);
    next.beams.extend(beams);
    next.bird.react(Reaction::Firing);
    tracing::debug!(uses_left = next.stage.neobeam_uses, "neobeam fired");
    next
}

// ── Difficulty ───────────────────────────────────────────────────────────────

/// `(bombs per drop, bomb speed)` for the current score.
pub fn bomb_pattern(score: u32, boss_spawned: bool, rules: &Rules) -> (usize, f32) {
    if score < rules.triple_fan_score || boss_spawned {
        (1, 6.0)
    } else if score < rules.quintuple_fan_score {
        (3, 8.0)
    } else {
        (5, 10.0)
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (tests use a seeded RNG).
///
/// Outside `Playing` the session is returned unchanged.
pub fn tick(state: &GameSession, rng: &mut impl Rng) -> GameSession {
    let mut next = state.clone();
    if next.status != GameStatus::Playing {
        return next;
    }

    // ── 1. Spawns ────────────────────────────────────────────────────────────
    spawn_wave(&mut next, rng);
    drop_bombs(&mut next, rng);

    // ── 2. Collisions ────────────────────────────────────────────────────────
    let events = resolve_collisions(&next);
    apply_collisions(&mut next, &events);
    if next.status == GameStatus::GameOver {
        return next;
    }

    // ── 3. Stage / game clear ────────────────────────────────────────────────
    if next.stage.stage_one_cleared(&next.rules) {
        next.enemies.clear();
        next.stage.advance_stage();
        next.status = GameStatus::StageClear;
        tracing::info!(score = next.score.value, "stage 1 clear");
        return next;
    }
    if next.stage.game_cleared() {
        next.status = GameStatus::GameClear;
        tracing::info!(score = next.score.value, frame = next.frame, "game clear");
        return next;
    }

    // ── 4. Advance every collection ──────────────────────────────────────────
    advance_bird(&mut next);
    advance_projectiles(&mut next);
    advance_enemies(&mut next);
    advance_bosses(&mut next);
    advance_effects(&mut next);

    next.frame += 1;
    next
}

fn spawn_wave(state: &mut GameSession, rng: &mut impl Rng) {
    let frame = state.frame;
    if state.stage.stage == 1 {
        if frame % ENEMY_SPAWN_EVERY == 0 {
            let id = state.alloc_id();
            state.enemies.push(spawn::enemy(id, rng));
        }
        return;
    }

    if !state.stage.boss_spawned {
        let id = state.alloc_id();
        state.bosses.push(spawn::boss(id, state.rules.boss_health));
        state.stage.boss_spawned = true;
        tracing::info!(health = state.rules.boss_health, "boss spawned");
    }
    if frame % BOSS_STAGE_SPAWN_EVERY == 0 && state.enemies.len() < BOSS_STAGE_MAX_ENEMIES {
        let id = state.alloc_id();
        state.enemies.push(spawn::enemy(id, rng));
    }
}

/// Stopped enemies drop bombs every `interval` frames.
fn drop_bombs(state: &mut GameSession, rng: &mut impl Rng) {
    let frame = state.frame;
    let droppers: Vec<_> = state
        .enemies
        .iter()
        .filter(|e| e.state == EnemyState::Stopped)
        .filter(|e| matches!(e.interval, Some(n) if n > 0 && frame % n as u64 == 0))
        .map(|e| e.rect)
        .collect();
    if droppers.is_empty() {
        return;
    }

    let (count, speed) = bomb_pattern(state.score.value, state.stage.boss_spawned, &state.rules);
    let target = state.bird.rect;
    for enemy in droppers {
        let bombs = if count == 1 {
            let id = state.alloc_id();
            vec![spawn::bomb(id, &enemy, &target, speed, 0.0, rng)]
        } else {
            spawn::bomb_projectile(&mut state.next_id, &enemy, &target, count, speed, rng)
        };
        state.bombs.extend(bombs);
    }
}

fn advance_bird(state: &mut GameSession) {
    let bird = &mut state.bird;
    bird.state = bird.state.countdown();
    bird.reaction = match bird.reaction {
        Some((reaction, frames)) if frames > 0 => Some((reaction, frames - 1)),
        _ => None,
    };
}

/// Beams and bombs fly in a straight line and vanish once they are no longer
/// fully inside the play area.
fn advance_projectiles(state: &mut GameSession) {
    for beam in &mut state.beams {
        beam.rect.translate(beam.speed * beam.dir.0, beam.speed * beam.dir.1);
    }
    state.beams.retain(|b| fully_in_bounds(&b.rect));

    for bomb in &mut state.bombs {
        bomb.rect.translate(bomb.speed * bomb.dir.0, bomb.speed * bomb.dir.1);
    }
    state.bombs.retain(|b| fully_in_bounds(&b.rect));
}

fn advance_enemies(state: &mut GameSession) {
    for enemy in &mut state.enemies {
        let past = enemy.rect.center().1 > enemy.stop_altitude;
        enemy.state = enemy.state.advance(past);
        if enemy.state == EnemyState::Stopped {
            enemy.vy = 0.0;
        }
        enemy.rect.translate(0.0, enemy.vy);
    }
}

/// Bosses bounce between the side walls and fire a volley every
/// `attack_interval` frames.
fn advance_bosses(state: &mut GameSession) {
    let target = state.bird.rect;
    let mut volleys = Vec::new();
    for boss in &mut state.bosses {
        boss.rect.translate(boss.speed * boss.direction, 0.0);
        if boss.rect.left() < 0.0 || boss.rect.right() > WIDTH {
            boss.direction = -boss.direction;
        }
        boss.timer += 1;
        if boss.timer >= boss.attack_interval {
            boss.timer = 0;
            volleys.push(boss.rect);
        }
    }
    for boss in volleys {
        let bombs = spawn::boss_volley(&mut state.next_id, &boss, &target);
        state.bombs.extend(bombs);
    }
}

fn advance_effects(state: &mut GameSession) {
    for explosion in &mut state.explosions {
        explosion.life -= 1;
    }
    state.explosions.retain(|e| e.life >= 0);

    for gravity in &mut state.gravities {
        gravity.life -= 1;
    }
    state.gravities.retain(|g| g.life >= 0);

    for shield in &mut state.shields {
        shield.life -= 1;
    }
    state.shields.retain(|s| s.life >= 0);

    if state.emp.active {
        state.emp.timer = (state.emp.timer + 1) % EMP_FLASH_EVERY;
    }
}
