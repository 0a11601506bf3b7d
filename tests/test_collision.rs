use kokaton_musou::compute::*;
use kokaton_musou::config::*;
use kokaton_musou::entities::*;
use kokaton_musou::geometry::Rect;

fn make_state() -> GameSession {
    let mut s = init_state(Rules::default());
    s.frame = 1;
    s
}

fn enemy_at(s: &mut GameSession, center: (f32, f32)) -> EntityId {
    let id = s.alloc_id();
    s.enemies.push(Enemy {
        id,
        rect: Rect::from_center(center, ENEMY_SIZE),
        vy: 0.0,
        stop_altitude: 100.0,
        state: EnemyState::Stopped,
        interval: None,
        disabled: false,
        variant: 2,
    });
    id
}

fn beam_at(s: &mut GameSession, center: (f32, f32)) -> EntityId {
    let id = s.alloc_id();
    s.beams.push(Beam {
        id,
        rect: Rect::from_center(center, BEAM_SIZE),
        dir: (1.0, 0.0),
        speed: BEAM_SPEED,
        angle: 0.0,
    });
    id
}

fn bomb_at(s: &mut GameSession, center: (f32, f32), state: BombState) -> EntityId {
    let id = s.alloc_id();
    s.bombs.push(Bomb {
        id,
        rect: Rect::from_center(center, (30.0, 30.0)),
        dir: (0.0, 1.0),
        speed: 6.0,
        state,
        kind: BombKind::Enemy,
    });
    id
}

fn event(id: EntityId, outcome: Outcome) -> CollisionEvent {
    CollisionEvent { id, outcome }
}

// ── resolve_collisions ────────────────────────────────────────────────────────

#[test]
fn nothing_touching_no_events() {
    let mut s = make_state();
    enemy_at(&mut s, (100.0, 100.0));
    beam_at(&mut s, (500.0, 500.0));
    assert!(resolve_collisions(&s).is_empty());
}

#[test]
fn beam_spent_on_enemy_cannot_hit_bomb() {
    let mut s = make_state();
    let enemy = enemy_at(&mut s, (300.0, 200.0));
    let bomb = bomb_at(&mut s, (310.0, 200.0), BombState::Active);
    let beam = beam_at(&mut s, (305.0, 200.0));

    let events = resolve_collisions(&s);
    assert_eq!(
        events,
        vec![event(enemy, Outcome::EnemyShot), event(beam, Outcome::BeamSpent)]
    );
    assert!(!events.iter().any(|e| e.id == bomb));
}

#[test]
fn bomb_shot_down_cannot_hit_bird() {
    let mut s = make_state();
    let center = s.bird.rect.center();
    let bomb = bomb_at(&mut s, center, BombState::Active);
    let beam = beam_at(&mut s, center);

    let events = resolve_collisions(&s);
    assert_eq!(
        events,
        vec![event(bomb, Outcome::BombShot), event(beam, Outcome::BeamSpent)]
    );

    apply_collisions(&mut s, &events);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.score.value, 1);
    assert_eq!(s.bird.reaction.map(|(r, _)| r), Some(Reaction::Happy));
}

#[test]
fn shield_is_spent_by_the_bombs_it_blocks() {
    let mut s = make_state();
    let id = s.alloc_id();
    s.shields.push(Shield {
        id,
        rect: Rect::new(100.0, 100.0, 20.0, 120.0),
        life: SHIELD_LIFE,
    });
    let a = bomb_at(&mut s, (110.0, 120.0), BombState::Active);
    let b = bomb_at(&mut s, (110.0, 200.0), BombState::Active);

    let events = resolve_collisions(&s);
    assert_eq!(
        events,
        vec![
            event(a, Outcome::BombBlocked),
            event(id, Outcome::ShieldSpent),
            event(b, Outcome::BombBlocked),
        ]
    );

    apply_collisions(&mut s, &events);
    assert!(s.shields.is_empty());
    assert!(s.bombs.is_empty());
    assert_eq!(s.explosions.len(), 2);
    assert_eq!(s.score.value, 0);
}

#[test]
fn gravity_field_is_never_consumed() {
    let mut s = make_state();
    let id = s.alloc_id();
    s.gravities.push(Gravity {
        id,
        rect: Rect::from_center((300.0, 300.0), GRAVITY_SIZE),
        life: GRAVITY_LIFE,
    });
    let e1 = enemy_at(&mut s, (200.0, 200.0));
    let e2 = enemy_at(&mut s, (400.0, 200.0));
    let bomb = bomb_at(&mut s, (300.0, 400.0), BombState::Active);

    let events = resolve_collisions(&s);
    assert_eq!(
        events,
        vec![
            event(e1, Outcome::EnemyCrushed),
            event(e2, Outcome::EnemyCrushed),
            event(bomb, Outcome::BombCrushed),
        ]
    );

    apply_collisions(&mut s, &events);
    assert_eq!(s.gravities.len(), 1);
    assert!(s.enemies.is_empty());
    assert!(s.bombs.is_empty());
    assert_eq!(s.explosions.len(), 3);
    // Crushed enemies are not beam kills
    assert_eq!(s.score.value, 0);
    assert_eq!(s.stage.enemy_kill_count, 0);
}

// ── inactive bombs ────────────────────────────────────────────────────────────

#[test]
fn inactive_bomb_is_harmless_to_bird() {
    let mut s = make_state();
    let center = s.bird.rect.center();
    let bomb = bomb_at(&mut s, center, BombState::Inactive);

    let events = resolve_collisions(&s);
    assert_eq!(events, vec![event(bomb, Outcome::BombDefused)]);

    apply_collisions(&mut s, &events);
    assert_eq!(s.status, GameStatus::Playing);
    assert!(s.bombs.is_empty());
    assert!(s.explosions.is_empty());
}

#[test]
fn inactive_bomb_shot_scores_nothing() {
    let mut s = make_state();
    bomb_at(&mut s, (300.0, 300.0), BombState::Inactive);
    beam_at(&mut s, (300.0, 300.0));

    let events = resolve_collisions(&s);
    apply_collisions(&mut s, &events);
    assert!(s.bombs.is_empty());
    assert!(s.beams.is_empty());
    assert!(s.explosions.is_empty());
    assert_eq!(s.score.value, 0);
}

// ── bird hits ─────────────────────────────────────────────────────────────────

#[test]
fn active_bomb_ends_the_game() {
    let mut s = make_state();
    let center = s.bird.rect.center();
    let bomb = bomb_at(&mut s, center, BombState::Active);

    let events = resolve_collisions(&s);
    assert_eq!(events, vec![event(bomb, Outcome::PlayerHit)]);
    apply_collisions(&mut s, &events);
    assert_eq!(s.status, GameStatus::GameOver);
}

#[test]
fn hyper_turns_hit_into_absorb() {
    let mut s = make_state();
    s.bird.state = BirdState::Hyper { frames_left: 5 };
    let center = s.bird.rect.center();
    let bomb = bomb_at(&mut s, center, BombState::Active);

    let events = resolve_collisions(&s);
    assert_eq!(events, vec![event(bomb, Outcome::BombAbsorbed)]);
}

// ── boss ──────────────────────────────────────────────────────────────────────

#[test]
fn boss_hit_once_per_beam() {
    let mut s = make_state();
    let id = s.alloc_id();
    s.bosses.push(kokaton_musou::compute::spawn::boss(id, 3));
    let center = s.bosses[0].rect.center();
    let b1 = beam_at(&mut s, center);
    let b2 = beam_at(&mut s, (center.0 - 40.0, center.1));

    let events = resolve_collisions(&s);
    assert_eq!(
        events,
        vec![
            event(b1, Outcome::BeamSpent),
            event(id, Outcome::BossHit),
            event(b2, Outcome::BeamSpent),
            event(id, Outcome::BossHit),
        ]
    );

    apply_collisions(&mut s, &events);
    assert_eq!(s.bosses[0].health, 1);
    assert!(!s.stage.boss_defeated);
}
