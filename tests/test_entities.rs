use kokaton_musou::compute::init_state;
use kokaton_musou::config::{Rules, REACTION_FRAMES};
use kokaton_musou::entities::*;
use kokaton_musou::geometry::Rect;

#[test]
fn entity_clone_and_eq() {
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_ne!(BombState::Active, BombState::Inactive);
    assert_ne!(BombKind::Enemy, BombKind::Boss);
    assert_ne!(Reaction::Singing, Reaction::Happy);

    let state = BirdState::Hyper { frames_left: 3 };
    assert_eq!(state.clone(), BirdState::Hyper { frames_left: 3 });
}

// ── Direction ─────────────────────────────────────────────────────────────────

#[test]
fn direction_table_is_indexed_in_order() {
    for (i, dir) in Direction::ALL.iter().enumerate() {
        assert_eq!(dir.index(), i);
    }
}

#[test]
fn direction_deltas() {
    assert_eq!(Direction::Right.delta(), (1, 0));
    assert_eq!(Direction::Up.delta(), (0, -1));
    assert_eq!(Direction::DownLeft.delta(), (-1, 1));
    assert_eq!(Direction::UpRight.delta(), (1, -1));
}

#[test]
fn from_delta_inverts_delta() {
    for dir in Direction::ALL {
        let (dx, dy) = dir.delta();
        assert_eq!(Direction::from_delta(dx, dy), Some(dir));
    }
    assert_eq!(Direction::from_delta(0, 0), None);
    assert_eq!(Direction::from_delta(2, 0), None);
}

// ── State transitions ─────────────────────────────────────────────────────────

#[test]
fn bird_hyper_countdown() {
    let s = BirdState::Hyper { frames_left: 2 };
    assert!(s.is_hyper());
    let s = s.countdown();
    assert_eq!(s, BirdState::Hyper { frames_left: 1 });
    let s = s.countdown().countdown();
    assert_eq!(s, BirdState::Normal);
    assert!(!s.is_hyper());
    assert_eq!(s.countdown(), BirdState::Normal);
}

#[test]
fn react_shows_for_fixed_frames() {
    let mut s = init_state(Rules::default());
    assert_eq!(s.bird.reaction, None);
    s.bird.react(Reaction::Happy);
    assert_eq!(s.bird.reaction, Some((Reaction::Happy, REACTION_FRAMES)));
}

#[test]
fn enemy_state_is_one_way() {
    let s = EnemyState::Descending;
    assert_eq!(s.advance(false), EnemyState::Descending);
    let s = s.advance(true);
    assert_eq!(s, EnemyState::Stopped);
    assert_eq!(s.advance(false), EnemyState::Stopped);
    assert_eq!(s.advance(true), EnemyState::Stopped);
}

#[test]
fn bomb_is_active_follows_state() {
    let mut bomb = Bomb {
        id: 0,
        rect: Rect::new(0.0, 0.0, 30.0, 30.0),
        dir: (0.0, 1.0),
        speed: 6.0,
        state: BombState::Active,
        kind: BombKind::Enemy,
    };
    assert!(bomb.is_active());
    bomb.state = BombState::Inactive;
    assert!(!bomb.is_active());
}

#[test]
fn explosion_alternates_every_ten_frames() {
    let mut e = Explosion {
        id: 0,
        rect: Rect::new(0.0, 0.0, 70.0, 70.0),
        life: 100,
    };
    assert_eq!(e.image_frame(), 0);
    e.life = 95;
    assert_eq!(e.image_frame(), 1);
    e.life = 89;
    assert_eq!(e.image_frame(), 0);
    e.life = -1;
    assert_eq!(e.image_frame(), 0);
}

#[test]
fn emp_flashes_only_while_active() {
    let mut emp = Emp::default();
    assert!(!emp.flashing());
    emp.active = true;
    assert!(emp.flashing());
    emp.timer = 3;
    assert!(!emp.flashing());
}

// ── GameSession ───────────────────────────────────────────────────────────────

#[test]
fn alloc_id_is_unique() {
    let mut s = init_state(Rules::default());
    let a = s.alloc_id();
    let b = s.alloc_id();
    assert_ne!(a, b);
    assert_eq!(s.next_id, b + 1);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(Rules::default());
    let mut copy = original.clone();
    copy.score.add(40);
    copy.bird.rect.translate(10.0, 0.0);
    copy.explosions.push(Explosion {
        id: 7,
        rect: Rect::new(0.0, 0.0, 70.0, 70.0),
        life: 50,
    });

    assert_eq!(original.score.value, 0);
    assert!(original.explosions.is_empty());
    assert_ne!(original.bird.rect, copy.bird.rect);
}
