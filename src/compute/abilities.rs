/// Score-gated special abilities.
///
/// Each ability checks its cost before deducting it.  A refused activation
/// returns an unchanged copy of the session.

use rand::Rng;

use crate::config::HYPER_FRAMES;
use crate::entities::{BirdState, BombState, GameSession};

use super::spawn;

pub fn deploy_shield(state: &GameSession) -> GameSession {
    let mut next = state.clone();
    if !next.score.try_spend(next.rules.shield_cost) {
        tracing::trace!(score = state.score.value, "shield refused");
        return next;
    }
    let id = next.alloc_id();
    next.shields.push(spawn::shield(id, &next.bird));
    tracing::debug!(score = next.score.value, "shield deployed");
    next
}

pub fn deploy_gravity(state: &GameSession) -> GameSession {
    let mut next = state.clone();
    if !next.score.try_spend(next.rules.gravity_cost) {
        tracing::trace!(score = state.score.value, "gravity refused");
        return next;
    }
    let id = next.alloc_id();
    next.gravities.push(spawn::gravity(id, &next.bird));
    tracing::debug!(score = next.score.value, "gravity field deployed");
    next
}

pub fn enter_hyper(state: &GameSession) -> GameSession {
    let mut next = state.clone();
    if !next.score.try_spend(next.rules.hyper_cost) {
        tracing::trace!(score = state.score.value, "hyper refused");
        return next;
    }
    next.bird.state = BirdState::Hyper {
        frames_left: HYPER_FRAMES,
    };
    tracing::debug!(score = next.score.value, "hyper mode");
    next
}

/// Switches the EMP on (paying for it) or off (free).
pub fn toggle_emp(state: &GameSession, rng: &mut impl Rng) -> GameSession {
    let mut next = state.clone();
    if next.emp.active {
        deactivate_emp(&mut next, rng);
    } else if next.score.try_spend(next.rules.emp_cost) {
        activate_emp(&mut next);
    } else {
        tracing::trace!(score = state.score.value, "emp refused");
    }
    next
}

/// Disables every enemy and bomb that exists right now.  Anything spawned
/// later is unaffected.
fn activate_emp(state: &mut GameSession) {
    state.emp.active = true;
    state.emp.timer = 0;
    for enemy in &mut state.enemies {
        enemy.interval = None;
        enemy.disabled = true;
    }
    for bomb in &mut state.bombs {
        if bomb.state == BombState::Active {
            bomb.speed /= 2.0;
            bomb.state = BombState::Inactive;
        }
    }
    tracing::debug!(
        enemies = state.enemies.len(),
        bombs = state.bombs.len(),
        "emp on"
    );
}

/// Reverts exactly what `activate_emp` changed.
fn deactivate_emp(state: &mut GameSession, rng: &mut impl Rng) {
    state.emp.active = false;
    for enemy in state.enemies.iter_mut().filter(|e| e.disabled) {
        enemy.interval = Some(spawn::random_interval(rng));
        enemy.disabled = false;
    }
    for bomb in &mut state.bombs {
        if bomb.state == BombState::Inactive {
            bomb.speed *= 2.0;
            bomb.state = BombState::Active;
        }
    }
    tracing::debug!("emp off");
}
