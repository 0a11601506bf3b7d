/// Entity constructors and fan spawners.
///
/// Constructors read whatever positions they need (bird, enemy, boss) at
/// creation time and keep no reference afterwards.  Ids are drawn from the
/// session counter passed in as `next_id`.

use rand::Rng;

use crate::config::{
    BEAM_SIZE, BEAM_SPEED, BIRD_BOOST_SPEED, BIRD_SIZE, BIRD_SPEED, BOMB_MAX_SIZE,
    BOMB_MIN_SIZE, BOSS_ATTACK_INTERVAL, BOSS_BOMB_SIZE, BOSS_BOMB_SPEED, BOSS_SIZE,
    BOSS_SPEED, BOSS_VOLLEY, ENEMY_DESCENT_SPEED, ENEMY_INTERVAL_RANGE, ENEMY_SIZE,
    ENEMY_STOP_MIN, EXPLOSION_SIZE, GRAVITY_LIFE, GRAVITY_SIZE, HEIGHT, SHIELD_LIFE,
    SHIELD_THICKNESS, WIDTH,
};
use crate::entities::{
    Beam, Bird, BirdState, Bomb, BombKind, BombState, Boss, Direction, Enemy, EnemyState,
    EntityId, Explosion, Gravity, Shield,
};
use crate::geometry::{fan_angles, orientation, rotated_size, Rect};

pub fn take_id(next_id: &mut EntityId) -> EntityId {
    let id = *next_id;
    *next_id += 1;
    id
}

/// Speed for the current frame given whether the boost modifier is held.
pub fn bird_speed(boost: bool) -> f32 {
    if boost {
        BIRD_BOOST_SPEED
    } else {
        BIRD_SPEED
    }
}

pub fn bird(center: (f32, f32)) -> Bird {
    Bird {
        rect: Rect::from_center(center, BIRD_SIZE),
        facing: Direction::Right,
        speed: BIRD_SPEED,
        state: BirdState::Normal,
        reaction: None,
    }
}

// ── Beams ─────────────────────────────────────────────────────────────────────

/// Angle (degrees, counter-clockwise from +x) from the bird toward `pointer`.
pub fn aim_angle(bird: &Bird, pointer: (f32, f32)) -> f32 {
    let (cx, cy) = bird.rect.center();
    90.0 + (cx - pointer.0).atan2(cy - pointer.1).to_degrees()
}

/// A beam aimed at `pointer`, turned by `offset` degrees.
pub fn beam(id: EntityId, bird: &Bird, pointer: (f32, f32), offset: f32) -> Beam {
    let angle = aim_angle(bird, pointer) + offset;
    let rad = angle.to_radians();
    let dir = (rad.cos(), -rad.sin());
    let (cx, cy) = bird.rect.center();
    let center = (cx + bird.rect.w * dir.0, cy + bird.rect.h * dir.1);
    Beam {
        id,
        rect: Rect::from_center(center, rotated_size(BEAM_SIZE.0, BEAM_SIZE.1, angle)),
        dir,
        speed: BEAM_SPEED,
        angle,
    }
}

/// NeoBeam: `num` beams fanned across ±50° around the aim direction.
pub fn neo_beam(next_id: &mut EntityId, bird: &Bird, pointer: (f32, f32), num: usize) -> Vec<Beam> {
    fan_angles(num)
        .into_iter()
        .map(|offset| beam(take_id(next_id), bird, pointer, offset))
        .collect()
}

// ── Bombs ─────────────────────────────────────────────────────────────────────

/// A bomb dropped by `enemy` toward `target`, turned by `offset` degrees.
pub fn bomb(
    id: EntityId,
    enemy: &Rect,
    target: &Rect,
    speed: f32,
    offset: f32,
    rng: &mut impl Rng,
) -> Bomb {
    let size = rng.gen_range(BOMB_MIN_SIZE..=BOMB_MAX_SIZE) as f32;
    let (bx, by) = orientation(enemy, target);
    let angle = by.atan2(bx).to_degrees() + offset;
    let rad = angle.to_radians();
    let dir = (rad.cos(), rad.sin());
    let (cx, cy) = enemy.center();
    let center = (cx + enemy.w * dir.0, cy + enemy.h * dir.1);
    Bomb {
        id,
        rect: Rect::from_center(center, (size, size)),
        dir,
        speed,
        state: BombState::Active,
        kind: BombKind::Enemy,
    }
}

/// BombProjectile: `count` bombs fanned across ±50°.
pub fn bomb_projectile(
    next_id: &mut EntityId,
    enemy: &Rect,
    target: &Rect,
    count: usize,
    speed: f32,
    rng: &mut impl Rng,
) -> Vec<Bomb> {
    fan_angles(count)
        .into_iter()
        .map(|offset| bomb(take_id(next_id), enemy, target, speed, offset, rng))
        .collect()
}

/// The boss's five-way volley, centred on the boss and aimed at `target`.
pub fn boss_volley(next_id: &mut EntityId, boss: &Rect, target: &Rect) -> Vec<Bomb> {
    let (cx, cy) = boss.center();
    let (tx, ty) = target.center();
    let base = (ty - cy).atan2(tx - cx);
    BOSS_VOLLEY
        .iter()
        .map(|offset| {
            let rad = base + offset.to_radians();
            Bomb {
                id: take_id(next_id),
                rect: Rect::from_center((cx, cy), (BOSS_BOMB_SIZE, BOSS_BOMB_SIZE)),
                dir: (rad.cos(), rad.sin()),
                speed: BOSS_BOMB_SPEED,
                state: BombState::Active,
                kind: BombKind::Boss,
            }
        })
        .collect()
}

// ── Enemies ───────────────────────────────────────────────────────────────────

pub fn random_interval(rng: &mut impl Rng) -> u32 {
    rng.gen_range(ENEMY_INTERVAL_RANGE.0..=ENEMY_INTERVAL_RANGE.1)
}

/// A fresh enemy entering at the top edge.
pub fn enemy(id: EntityId, rng: &mut impl Rng) -> Enemy {
    let x = rng.gen_range(0..=WIDTH as u32) as f32;
    let stop_altitude = rng.gen_range(ENEMY_STOP_MIN..=(HEIGHT / 2.0) as u32) as f32;
    Enemy {
        id,
        rect: Rect::from_center((x, 0.0), ENEMY_SIZE),
        vy: ENEMY_DESCENT_SPEED,
        stop_altitude,
        state: EnemyState::Descending,
        interval: Some(random_interval(rng)),
        disabled: false,
        variant: rng.gen_range(0..3),
    }
}

pub fn boss(id: EntityId, health: i32) -> Boss {
    Boss {
        id,
        rect: Rect::from_center((WIDTH / 2.0, HEIGHT / 4.0), BOSS_SIZE),
        health,
        speed: BOSS_SPEED,
        direction: 1.0,
        attack_interval: BOSS_ATTACK_INTERVAL,
        timer: 0,
    }
}

// ── Effects ───────────────────────────────────────────────────────────────────

pub fn explosion(id: EntityId, center: (f32, f32), life: i32) -> Explosion {
    Explosion {
        id,
        rect: Rect::from_center(center, EXPLOSION_SIZE),
        life,
    }
}

/// A barrier just ahead of the bird, turned to its facing.
pub fn shield(id: EntityId, bird: &Bird) -> Shield {
    let (dx, dy) = bird.facing.delta();
    let (dx, dy) = (dx as f32, dy as f32);
    let angle = (-dy).atan2(dx).to_degrees();
    let size = rotated_size(SHIELD_THICKNESS, bird.rect.w * 2.0, angle);
    let (cx, cy) = bird.rect.center();
    let center = (cx + bird.rect.w * dx, cy + bird.rect.h * dy);
    Shield {
        id,
        rect: Rect::from_center(center, size),
        life: SHIELD_LIFE,
    }
}

/// A gravity field centred on the bird.
pub fn gravity(id: EntityId, bird: &Bird) -> Gravity {
    Gravity {
        id,
        rect: Rect::from_center(bird.rect.center(), GRAVITY_SIZE),
        life: GRAVITY_LIFE,
    }
}
