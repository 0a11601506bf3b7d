/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game session.  No game logic is performed; this module only translates
/// state into terminal commands, scaling logical positions through the
/// `Viewport`.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use kokaton_musou::entities::{
    Beam, Bird, BirdState, Bomb, BombKind, Boss, Enemy, Explosion, GameSession, GameStatus,
    Reaction,
};
use kokaton_musou::geometry::Rect;
use kokaton_musou::viewport::Viewport;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_BORDER_EMP: Color = Color::Yellow;
const C_HUD_SCORE: Color = Color::Blue;
const C_HUD_STAGE: Color = Color::Red;
const C_NEO_READY: Color = Color::Green;
const C_NEO_WAIT: Color = Color::Red;
const C_BIRD: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_ENEMY_DISABLED: Color = Color::DarkGrey;
const C_BOSS: Color = Color::Red;
const C_BEAM: Color = Color::Cyan;
const C_BOMB: Color = Color::Magenta;
const C_BOSS_BOMB: Color = Color::Red;
const C_BOMB_INACTIVE: Color = Color::DarkGrey;
const C_SHIELD: Color = Color::Blue;
const C_GRAVITY: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Indexed by `Direction::index`.
const BIRD_GLYPHS: [&str; 8] = ["▶", "◥", "▲", "◤", "◀", "◣", "▼", "◢"];
const ENEMY_GLYPHS: [&str; 3] = ["«▼»", "(◎)", "{◆}"];
const EXPLOSION_GLYPHS: [(&str, Color); 2] = [("✶", Color::Yellow), ("✺", Color::Red)];
const BOSS_SPRITE: [&str; 3] = ["╔═◉═◉═╗", "╠█████╣", "╚╦═══╦╝"];

const CONTROLS_HINT: &str =
    "WASD:Move  Click/SPACE:Beam  RClick/N:NeoBeam  L:Shield  ENTER:Gravity  H:Hyper  E:EMP  Q:Quit";

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameSession, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, state, view)?;
    draw_hud(out, state, view)?;

    for gravity in &state.gravities {
        fill_rect(out, view, &gravity.rect, "░", C_GRAVITY)?;
    }
    for shield in &state.shields {
        fill_rect(out, view, &shield.rect, "█", C_SHIELD)?;
    }
    for enemy in &state.enemies {
        draw_enemy(out, view, enemy)?;
    }
    for boss in &state.bosses {
        draw_boss(out, view, boss)?;
    }
    for bomb in &state.bombs {
        draw_bomb(out, view, bomb)?;
    }
    for beam in &state.beams {
        draw_beam(out, view, beam)?;
    }
    for explosion in &state.explosions {
        draw_explosion(out, view, explosion)?;
    }

    draw_bird(out, view, &state.bird, state.frame)?;
    draw_controls_hint(out, view)?;

    match state.status {
        GameStatus::Playing => {}
        GameStatus::StageClear => draw_stage_clear(out, view)?,
        GameStatus::GameClear => draw_game_clear(out, state, view)?,
        GameStatus::GameOver => draw_game_over(out, state, view)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, state: &GameSession, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    // The EMP pulses the frame around the play area.
    let color = if state.emp.flashing() { C_BORDER_EMP } else { C_BORDER };
    out.queue(style::SetForegroundColor(color))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameSession, view: &Viewport) -> std::io::Result<()> {
    // Left: score and status flags
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(state.score.label()))?;
    if state.bird.state.is_hyper() {
        out.queue(style::SetForegroundColor(Color::Magenta))?;
        out.queue(Print("  HYPER"))?;
    }
    if state.emp.active {
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print("  EMP"))?;
    }

    // Centre: NeoBeam status
    let (neo, neo_color) = if state.stage.neobeam_ready {
        (format!("NeoBeam: ready ({} left)", state.stage.neobeam_uses), C_NEO_READY)
    } else {
        let remaining = state.stage.kills_until_neobeam(&state.rules);
        (format!("NeoBeam: {} more kills", remaining), C_NEO_WAIT)
    };
    let nx = (view.cols / 2).saturating_sub(neo.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(nx, 0))?;
    out.queue(style::SetForegroundColor(neo_color))?;
    out.queue(Print(&neo))?;

    // Right: stage progress
    let progress = match (state.stage.stage, state.bosses.first()) {
        (1, _) => format!("Left: {}", state.stage.kills_until_clear(&state.rules)),
        (_, Some(boss)) => format!("Boss HP: {}", boss.health.max(0)),
        (_, None) => "Boss".to_string(),
    };
    let right = format!("{}  Stage {}", progress, state.stage.stage);
    let rx = view.cols.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_STAGE))?;
    out.queue(Print(&right))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn put<W: Write>(
    out: &mut W,
    view: &Viewport,
    center: (f32, f32),
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let (col, row) = view.to_cell(center);
    // Multi-cell sprites are centred on the cell, but never over the wall.
    let half = glyph.chars().count() as u16 / 2;
    let col = col.saturating_sub(half).max(1);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let (left, top, right, bottom) = view.cell_span(rect);
    let line = glyph.repeat((right - left + 1) as usize);
    out.queue(style::SetForegroundColor(color))?;
    for row in top..=bottom {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_bird<W: Write>(out: &mut W, view: &Viewport, bird: &Bird, frame: u64) -> std::io::Result<()> {
    let glyph = match bird.reaction {
        Some((Reaction::Firing, _)) => "✦",
        Some((Reaction::Singing, _)) => "♪",
        Some((Reaction::Happy, _)) => "☺",
        None => BIRD_GLYPHS[bird.facing.index()],
    };
    // Hyper mode flickers between two colours.
    let color = match bird.state {
        BirdState::Hyper { .. } if frame % 4 < 2 => Color::Magenta,
        BirdState::Hyper { .. } => Color::Cyan,
        BirdState::Normal => C_BIRD,
    };
    put(out, view, bird.rect.center(), glyph, color)
}

fn draw_enemy<W: Write>(out: &mut W, view: &Viewport, enemy: &Enemy) -> std::io::Result<()> {
    let glyph = ENEMY_GLYPHS[enemy.variant as usize % ENEMY_GLYPHS.len()];
    let color = if enemy.disabled { C_ENEMY_DISABLED } else { C_ENEMY };
    put(out, view, enemy.rect.center(), glyph, color)
}

fn draw_boss<W: Write>(out: &mut W, view: &Viewport, boss: &Boss) -> std::io::Result<()> {
    let (col, row) = view.to_cell(boss.rect.center());
    let top = row.saturating_sub(1).max(2);
    out.queue(style::SetForegroundColor(C_BOSS))?;
    for (i, line) in BOSS_SPRITE.iter().enumerate() {
        let left = col.saturating_sub(line.chars().count() as u16 / 2).max(1);
        out.queue(cursor::MoveTo(left, top + i as u16))?;
        out.queue(Print(*line))?;
    }
    Ok(())
}

fn draw_bomb<W: Write>(out: &mut W, view: &Viewport, bomb: &Bomb) -> std::io::Result<()> {
    let (glyph, color) = match (bomb.is_active(), bomb.kind) {
        (false, _) => ("○", C_BOMB_INACTIVE),
        (true, BombKind::Enemy) => ("●", C_BOMB),
        (true, BombKind::Boss) => ("◉", C_BOSS_BOMB),
    };
    put(out, view, bomb.rect.center(), glyph, color)
}

fn draw_beam<W: Write>(out: &mut W, view: &Viewport, beam: &Beam) -> std::io::Result<()> {
    // Pick the line character closest to the beam's heading.
    let heading = beam.angle.rem_euclid(180.0);
    let glyph = match heading {
        h if !(22.5..157.5).contains(&h) => "─",
        h if h < 67.5 => "╱",
        h if h < 112.5 => "│",
        _ => "╲",
    };
    put(out, view, beam.rect.center(), glyph, C_BEAM)
}

fn draw_explosion<W: Write>(out: &mut W, view: &Viewport, explosion: &Explosion) -> std::io::Result<()> {
    let (glyph, color) = EXPLOSION_GLYPHS[explosion.image_frame()];
    put(out, view, explosion.rect.center(), glyph, color)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let hint: String = CONTROLS_HINT.chars().take(view.cols as usize - 2).collect();
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

/// Prints `lines` centred on the screen, one per row.
pub fn draw_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_stage_clear<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    draw_centered(
        out,
        view,
        &[
            ("╔════════════════════╗", Color::Green),
            ("║  STAGE 1  CLEAR!   ║", Color::Green),
            ("╚════════════════════╝", Color::Green),
            ("The boss is coming...", Color::Red),
            ("ENTER - Next stage", Color::White),
        ],
    )
}

fn draw_game_clear<W: Write>(out: &mut W, state: &GameSession, view: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.score.value);
    draw_centered(
        out,
        view,
        &[
            ("☺ ╔════════════════════╗ ☺", Color::Yellow),
            ("  ║    GAME  CLEAR!    ║  ", Color::Yellow),
            ("  ╚════════════════════╝  ", Color::Yellow),
            (score_line.as_str(), Color::Yellow),
            ("B - Back to title", Color::White),
        ],
    )
}

fn draw_game_over<W: Write>(out: &mut W, state: &GameSession, view: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.score.value);
    draw_centered(
        out,
        view,
        &[
            ("╔════════════════════╗", Color::Red),
            ("║    GAME  OVER      ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
            ("(T_T)", Color::White),
            (score_line.as_str(), Color::Yellow),
            ("B - Back to title", Color::White),
        ],
    )
}
