mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use kokaton_musou::compute::{
    deploy_gravity, deploy_shield, enter_hyper, fire_beam, fire_neo_beam, init_state, move_bird,
    reset, resume_stage, tick, toggle_emp,
};
use kokaton_musou::config::{FrameRate, Rules, DEFAULT_FPS};
use kokaton_musou::entities::{GameSession, GameStatus};
use kokaton_musou::viewport::Viewport;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "kokaton_musou")]
#[command(about = "Terminal arcade shooter: beam down the aliens, then the boss")]
struct Args {
    /// Simulation frames per second.
    #[arg(long, env = "KOKATON_FPS", default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Seed for a reproducible run.
    #[arg(long, env = "KOKATON_SEED")]
    seed: Option<u64>,

    /// Write tracing output to this file (the terminal itself is in use).
    #[arg(long, env = "KOKATON_LOG")]
    log_file: Option<PathBuf>,

    /// Tracing filter, e.g. `info` or `kokaton_musou=debug`.
    #[arg(long, env = "KOKATON_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&args.log_level)
        .with_context(|| format!("invalid log filter {:?}", args.log_level))?;
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
        }
    }
    Ok(())
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Frames a movement key stays live after its last press or repeat.  Six
/// frames is about 120 ms at 50 FPS, longer than the gap between OS key
/// repeats, so a held key never flickers off on terminals without release
/// events.
const HOLD_WINDOW: u64 = 6;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

const UP: [KeyCode; 3] = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN: [KeyCode; 3] = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const LEFT: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
/// Upper-case movement keys mean Shift is down.
const BOOST: [KeyCode; 4] = [
    KeyCode::Char('W'),
    KeyCode::Char('A'),
    KeyCode::Char('S'),
    KeyCode::Char('D'),
];

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Blocks until one of `keys` is pressed.  Returns `false` on a quit key or
/// if the input thread has gone away.
fn wait_for_key(rx: &mpsc::Receiver<Event>, keys: &[KeyCode]) -> bool {
    while let Ok(ev) = rx.recv() {
        if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) = ev {
            if is_quit(code, modifiers) {
                return false;
            }
            if keys.contains(&code) {
                return true;
            }
        }
    }
    false
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    view: &Viewport,
) -> std::io::Result<MenuResult> {
    loop {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        display::draw_centered(
            out,
            view,
            &[
                ("★  SHIN! SHIN! KOKATON MUSOU  ★", Color::Yellow),
                ("", Color::Reset),
                ("S - Start", Color::Red),
                ("I - How to play", Color::Green),
                ("X - Quit", Color::Magenta),
            ],
        )?;
        out.queue(style::ResetColor)?;
        out.flush()?;

        // Block until the user makes a choice
        loop {
            let Ok(ev) = rx.recv() else {
                return Ok(MenuResult::Quit);
            };
            let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) = ev else {
                continue;
            };
            match code {
                KeyCode::Char('s') | KeyCode::Char('S') => return Ok(MenuResult::Start),
                KeyCode::Char('x') | KeyCode::Char('X') => return Ok(MenuResult::Quit),
                KeyCode::Char('i') | KeyCode::Char('I') => {
                    if !show_instructions(out, rx, view)? {
                        return Ok(MenuResult::Quit);
                    }
                    break; // redraw the title
                }
                _ if is_quit(code, modifiers) => return Ok(MenuResult::Quit),
                _ => {}
            }
        }
    }
}

/// Returns `false` if the player quit from the instructions screen.
fn show_instructions<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    view: &Viewport,
) -> std::io::Result<bool> {
    let rules = Rules::default();
    let gravity = format!("ENTER        : Gravity field ({} points)", rules.gravity_cost);
    let hyper = format!("H            : Hyper mode ({} points)", rules.hyper_cost);
    let shield = format!("L            : Shield ({} points)", rules.shield_cost);
    let emp = format!("E            : EMP on/off ({} points)", rules.emp_cost);
    let neo = format!(
        "Right click/N: NeoBeam (unlocked every {} kills)",
        rules.neobeam_kills
    );

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    display::draw_centered(
        out,
        view,
        &[
            ("How to play", Color::Yellow),
            ("", Color::Reset),
            ("WASD / arrows: Move (Shift: faster)", Color::White),
            ("Click / SPACE: Beam toward the pointer", Color::White),
            (neo.as_str(), Color::White),
            (gravity.as_str(), Color::White),
            (hyper.as_str(), Color::White),
            (shield.as_str(), Color::White),
            (emp.as_str(), Color::White),
            ("", Color::Reset),
            ("B - Back", Color::Red),
        ],
    )?;
    out.queue(style::ResetColor)?;
    out.flush()?;

    Ok(wait_for_key(rx, &[KeyCode::Char('b'), KeyCode::Char('B')]))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Where beams aim: the mouse pointer if we have seen one, otherwise a point
/// straight ahead of the bird.
fn aim_point(state: &GameSession, pointer: Option<(f32, f32)>) -> (f32, f32) {
    pointer.unwrap_or_else(|| {
        let (cx, cy) = state.bird.rect.center();
        let (dx, dy) = state.bird.facing.delta();
        (cx + 100.0 * dx as f32, cy + 100.0 * dy as f32)
    })
}

/// Returns `true` → quit program,  `false` → back to the title screen.
///
/// Input model: one-shot actions (fire, abilities) act on the press event;
/// movement keys are tracked in `key_frame`, which records the frame of the
/// last press/repeat for every key, and every frame applies all keys that
/// are still "fresh".  Keyboard-enhanced terminals also send releases, which
/// drop the key immediately.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameSession,
    rx: &mpsc::Receiver<Event>,
    view: &mut Viewport,
    rng: &mut StdRng,
    rate: FrameRate,
) -> std::io::Result<bool> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut shift_frame: Option<u64> = None;
    let mut pointer: Option<(f32, f32)> = None;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        if is_quit(code, modifiers) {
                            return Ok(true);
                        }
                        key_frame.insert(code, frame);
                        if modifiers.contains(KeyModifiers::SHIFT) {
                            shift_frame = Some(frame);
                        }
                        let aim = aim_point(state, pointer);
                        *state = match code {
                            KeyCode::Char(' ') => fire_beam(state, aim),
                            KeyCode::Char('n') | KeyCode::Char('N') => fire_neo_beam(state, aim),
                            KeyCode::Char('l') | KeyCode::Char('L') => deploy_shield(state),
                            KeyCode::Enter => deploy_gravity(state),
                            KeyCode::Char('h') | KeyCode::Char('H') => enter_hyper(state),
                            KeyCode::Char('e') | KeyCode::Char('E') => toggle_emp(state, rng),
                            _ => continue,
                        };
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                        if modifiers.contains(KeyModifiers::SHIFT) {
                            shift_frame = Some(frame);
                        }
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                    pointer = Some(view.to_logical(column, row));
                    let aim = aim_point(state, pointer);
                    match kind {
                        MouseEventKind::Down(MouseButton::Left) => *state = fire_beam(state, aim),
                        MouseEventKind::Down(MouseButton::Right) => {
                            *state = fire_neo_beam(state, aim)
                        }
                        _ => {}
                    }
                }
                Event::Resize(cols, rows) => match Viewport::new(cols, rows) {
                    Ok(resized) => *view = resized,
                    Err(err) => tracing::warn!(%err, "keeping previous layout"),
                },
                _ => {}
            }
        }

        // ── Apply held movement keys ──────────────────────────────────────────
        let dx = any_held(&key_frame, &RIGHT, frame) as i32 - any_held(&key_frame, &LEFT, frame) as i32;
        let dy = any_held(&key_frame, &DOWN, frame) as i32 - any_held(&key_frame, &UP, frame) as i32;
        let boost = any_held(&key_frame, &BOOST, frame)
            || shift_frame.is_some_and(|last| frame.saturating_sub(last) <= HOLD_WINDOW);
        if dx != 0 || dy != 0 {
            *state = move_bird(state, dx, dy, boost);
        }

        *state = tick(state, rng);
        display::render(out, state, view)?;

        // ── Blocking transitions ──────────────────────────────────────────────
        match state.status {
            GameStatus::Playing => {}
            GameStatus::StageClear => {
                let keys = [
                    KeyCode::Enter,
                    KeyCode::Char(' '),
                    KeyCode::Char('s'),
                    KeyCode::Char('S'),
                ];
                if !wait_for_key(rx, &keys) {
                    return Ok(true);
                }
                key_frame.clear();
                *state = resume_stage(state);
            }
            GameStatus::GameOver | GameStatus::GameClear => {
                let back = wait_for_key(rx, &[KeyCode::Char('b'), KeyCode::Char('B')]);
                *state = reset(state);
                return Ok(!back);
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < rate.period() {
            std::thread::sleep(rate.period() - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let rate = FrameRate::new(args.fps)?;
    init_logging(&args)?;

    let (cols, rows) = terminal::size().context("cannot read terminal size")?;
    let view = Viewport::new(cols, rows)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Release events make movement stop on key-up.  Terminals without the
    // kitty protocol fall back to HOLD_WINDOW expiry.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads happen on their own thread; the loop only polls the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(fps = rate.fps(), seed = ?args.seed, cols, rows, "starting");

    let result = run(&mut out, &rx, view, &mut rng, rate);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(style::ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal i/o failed")
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut view: Viewport,
    rng: &mut StdRng,
    rate: FrameRate,
) -> std::io::Result<()> {
    loop {
        match show_menu(out, rx, &view)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let mut state = init_state(Rules::default());
                let quit = game_loop(out, &mut state, rx, &mut view, rng, rate)?;
                if quit {
                    break;
                }
                // Otherwise loop back to the title screen
            }
        }
    }
    Ok(())
}
