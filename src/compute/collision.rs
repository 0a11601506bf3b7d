/// Collision resolution.
///
/// `resolve_collisions` scans every pairing against a read-only session and
/// produces `(entity id, outcome)` events; `apply_collisions` then mutates
/// the collections.  Pairings run in a fixed order and an entity consumed by
/// an earlier pairing is invisible to the later ones, so a bomb shot down by
/// a beam cannot also hit the bird in the same frame.

use std::collections::HashSet;

use crate::config::{BOMB_EXPLOSION_LIFE, BOSS_EXPLOSION_LIFE, ENEMY_EXPLOSION_LIFE};
use crate::entities::{
    Beam, Bomb, Boss, Enemy, EntityId, GameSession, GameStatus, Gravity, Reaction, Shield,
};
use crate::geometry::Rect;

use super::spawn;

/// Anything with an id and a hit box.
pub trait Body {
    fn id(&self) -> EntityId;
    fn rect(&self) -> &Rect;
}

macro_rules! impl_body {
    ($($ty:ty),*) => {
        $(impl Body for $ty {
            fn id(&self) -> EntityId {
                self.id
            }
            fn rect(&self) -> &Rect {
                &self.rect
            }
        })*
    };
}

impl_body!(Beam, Bomb, Boss, Enemy, Gravity, Shield);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Enemy destroyed by a beam.
    EnemyShot,
    /// Beam used up by whatever it hit.
    BeamSpent,
    BombShot,
    /// Bomb stopped by a shield.
    BombBlocked,
    ShieldSpent,
    /// Active bomb touched the bird while in hyper mode.
    BombAbsorbed,
    /// EMP-disabled bomb touched the bird.
    BombDefused,
    /// Active bomb touched the unprotected bird.
    PlayerHit,
    EnemyCrushed,
    BombCrushed,
    /// One beam hit on the boss.
    BossHit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionEvent {
    pub id: EntityId,
    pub outcome: Outcome,
}

impl CollisionEvent {
    fn new(id: EntityId, outcome: Outcome) -> Self {
        CollisionEvent { id, outcome }
    }
}

/// For every live `a`, the ids of the live `b`s overlapping it.  Pairs with
/// no overlap are left out.
fn collide<A: Body, B: Body>(
    a: &[A],
    b: &[B],
    gone: &HashSet<EntityId>,
) -> Vec<(EntityId, Vec<EntityId>)> {
    a.iter()
        .filter(|x| !gone.contains(&x.id()))
        .filter_map(|x| {
            let hits: Vec<EntityId> = b
                .iter()
                .filter(|y| !gone.contains(&y.id()) && x.rect().overlaps(y.rect()))
                .map(|y| y.id())
                .collect();
            (!hits.is_empty()).then_some((x.id(), hits))
        })
        .collect()
}

/// Marks both sides of each pair as gone.  `b_outcome` of `None` leaves the
/// `b` side in play.
fn consume(
    pairs: Vec<(EntityId, Vec<EntityId>)>,
    a_outcome: Outcome,
    b_outcome: Option<Outcome>,
    gone: &mut HashSet<EntityId>,
    events: &mut Vec<CollisionEvent>,
) {
    for (a, bs) in pairs {
        if gone.insert(a) {
            events.push(CollisionEvent::new(a, a_outcome));
        }
        let Some(b_outcome) = b_outcome else {
            continue;
        };
        for b in bs {
            if gone.insert(b) {
                events.push(CollisionEvent::new(b, b_outcome));
            }
        }
    }
}

/// Scans every pairing and returns the events in application order.
pub fn resolve_collisions(state: &GameSession) -> Vec<CollisionEvent> {
    let mut gone: HashSet<EntityId> = HashSet::new();
    let mut events = Vec::new();

    // beam ↔ enemy: every enemy touching any beam, every beam touching any enemy.
    let pairs = collide(&state.enemies, &state.beams, &gone);
    consume(pairs, Outcome::EnemyShot, Some(Outcome::BeamSpent), &mut gone, &mut events);

    // beam ↔ bomb
    let pairs = collide(&state.bombs, &state.beams, &gone);
    consume(pairs, Outcome::BombShot, Some(Outcome::BeamSpent), &mut gone, &mut events);

    // bomb ↔ shield
    let pairs = collide(&state.bombs, &state.shields, &gone);
    consume(pairs, Outcome::BombBlocked, Some(Outcome::ShieldSpent), &mut gone, &mut events);

    // bomb ↔ bird
    let bird = &state.bird;
    let touching: Vec<&Bomb> = state
        .bombs
        .iter()
        .filter(|b| !gone.contains(&b.id) && b.rect.overlaps(&bird.rect))
        .collect();
    for bomb in touching {
        let outcome = if !bomb.is_active() {
            Outcome::BombDefused
        } else if bird.state.is_hyper() {
            Outcome::BombAbsorbed
        } else {
            Outcome::PlayerHit
        };
        gone.insert(bomb.id);
        events.push(CollisionEvent::new(bomb.id, outcome));
    }

    // gravity ↔ enemy, gravity ↔ bomb: the field is never consumed.
    let pairs = collide(&state.enemies, &state.gravities, &gone);
    consume(pairs, Outcome::EnemyCrushed, None, &mut gone, &mut events);
    let pairs = collide(&state.bombs, &state.gravities, &gone);
    consume(pairs, Outcome::BombCrushed, None, &mut gone, &mut events);

    // beam ↔ boss: one hit per beam, the boss itself stays in play.
    for (boss, beams) in collide(&state.bosses, &state.beams, &gone) {
        for beam in beams {
            if gone.insert(beam) {
                events.push(CollisionEvent::new(beam, Outcome::BeamSpent));
                events.push(CollisionEvent::new(boss, Outcome::BossHit));
            }
        }
    }

    events
}

fn take<T: Body>(items: &mut Vec<T>, id: EntityId) -> Option<T> {
    let index = items.iter().position(|item| item.id() == id)?;
    Some(items.remove(index))
}

/// Applies the events from `resolve_collisions`: removals, explosions,
/// score, kill counters and the game-over transition.
pub fn apply_collisions(state: &mut GameSession, events: &[CollisionEvent]) {
    for event in events {
        match event.outcome {
            Outcome::EnemyShot => {
                if let Some(enemy) = take(&mut state.enemies, event.id) {
                    add_explosion(state, enemy.rect.center(), ENEMY_EXPLOSION_LIFE);
                    state.score.add(state.rules.enemy_points);
                    state.bird.react(Reaction::Singing);
                    state.stage.record_kill(&state.rules);
                }
            }
            Outcome::BeamSpent => {
                take(&mut state.beams, event.id);
            }
            Outcome::BombShot => {
                if let Some(bomb) = take(&mut state.bombs, event.id) {
                    if bomb.is_active() {
                        add_explosion(state, bomb.rect.center(), BOMB_EXPLOSION_LIFE);
                        state.score.add(state.rules.bomb_points);
                        state.bird.react(Reaction::Happy);
                    }
                }
            }
            Outcome::BombBlocked => {
                if let Some(bomb) = take(&mut state.bombs, event.id) {
                    if bomb.is_active() {
                        add_explosion(state, bomb.rect.center(), BOMB_EXPLOSION_LIFE);
                    }
                }
            }
            Outcome::ShieldSpent => {
                take(&mut state.shields, event.id);
            }
            Outcome::BombAbsorbed => {
                if let Some(bomb) = take(&mut state.bombs, event.id) {
                    add_explosion(state, bomb.rect.center(), BOMB_EXPLOSION_LIFE);
                    state.score.add(state.rules.bomb_points);
                }
            }
            Outcome::BombDefused => {
                take(&mut state.bombs, event.id);
            }
            Outcome::PlayerHit => {
                take(&mut state.bombs, event.id);
                if state.status == GameStatus::Playing {
                    tracing::info!(score = state.score.value, stage = state.stage.stage, "game over");
                }
                state.status = GameStatus::GameOver;
            }
            Outcome::EnemyCrushed => {
                if let Some(enemy) = take(&mut state.enemies, event.id) {
                    add_explosion(state, enemy.rect.center(), ENEMY_EXPLOSION_LIFE);
                }
            }
            Outcome::BombCrushed => {
                if let Some(bomb) = take(&mut state.bombs, event.id) {
                    add_explosion(state, bomb.rect.center(), BOMB_EXPLOSION_LIFE);
                }
            }
            Outcome::BossHit => {
                let Some(boss) = state.bosses.iter_mut().find(|b| b.id == event.id) else {
                    continue;
                };
                boss.health -= 1;
                if boss.health <= 0 {
                    if let Some(boss) = take(&mut state.bosses, event.id) {
                        add_explosion(state, boss.rect.center(), BOSS_EXPLOSION_LIFE);
                        state.stage.boss_defeated = true;
                        tracing::info!(score = state.score.value, "boss defeated");
                    }
                }
            }
        }
    }
}

fn add_explosion(state: &mut GameSession, center: (f32, f32), life: i32) {
    let id = state.alloc_id();
    state.explosions.push(spawn::explosion(id, center, life));
}
