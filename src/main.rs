/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use rand::rngs::StdRng;
use rand::SeedableRng;

use config::GameConfig;
use domain::entity::FrameInput;
use sim::event::GameEvent;
use sim::step;
use sim::world::{Phase, WorldState};
use ui::input::InputState;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

fn main() {
    let config = GameConfig::load();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {e}");
        return;
    }

    let mut rng = StdRng::from_entropy();
    let mut world = WorldState::new(&config, &mut rng);

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut world, &mut renderer, &mut rng, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    if world.phase == Phase::Finished {
        println!("All levels cleared — thanks for playing Jungle Maze Adventure!");
    } else {
        println!("Thanks for playing Jungle Maze Adventure!");
    }
    println!("High Score: {}", world.tracker.high_score());
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    rng: &mut StdRng,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(1000 / config.frame_rate);

    loop {
        kb.drain_events();
        if kb.interrupted() || kb.any_pressed(KEYS_QUIT) {
            break;
        }

        if last_tick.elapsed() >= tick_rate {
            let frame = FrameInput {
                up: kb.any_held(KEYS_UP),
                down: kb.any_held(KEYS_DOWN),
                left: kb.any_held(KEYS_LEFT),
                right: kb.any_held(KEYS_RIGHT),
            };
            let events = step::step(world, frame, rng);
            apply_messages(world, &events);
            last_tick = Instant::now();
        }

        renderer.render(world)?;

        if world.phase == Phase::Finished {
            break; // final frame drawn; exit cleanly
        }
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

/// Map step events to transient HUD messages.
fn apply_messages(world: &mut WorldState, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::LevelCleared { level } => {
                world.set_message(&format!("Level {} cleared!", level + 1), 60);
            }
            GameEvent::GameCompleted => {
                world.set_message("All levels cleared!", 60);
            }
            GameEvent::CoinCollected { .. } => {}
        }
    }
}
