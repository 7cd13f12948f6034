/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Player movement + coin pickup
///   2. Finish-cell check / level progression
///   3. HUD message timer
///
/// Pure with respect to the terminal: no input polling, no drawing.
/// The RNG is threaded in explicitly so level generation stays
/// deterministic under a seeded generator.

use rand::Rng;

use crate::domain::cell::Cell;
use crate::domain::entity::FrameInput;
use super::event::GameEvent;
use super::world::{Phase, WorldState};

pub fn step(world: &mut WorldState, input: FrameInput, rng: &mut impl Rng) -> Vec<GameEvent> {
    if world.phase != Phase::Playing {
        return vec![];
    }

    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;

    resolve_player_move(world, input, &mut events);
    resolve_finish(world, rng, &mut events);

    if world.message_timer > 0 {
        world.message_timer -= 1;
        if world.message_timer == 0 {
            world.message.clear();
        }
    }

    events
}

// ══════════════════════════════════════════════════════════════
// Movement + coin pickup
// ══════════════════════════════════════════════════════════════

/// Both axes contribute independently, so two held keys produce a
/// diagonal candidate. The move commits only onto Floor; a Coin cell
/// blocks the move for this tick, but the pickup below clears it so the
/// cell is enterable next tick.
fn resolve_player_move(world: &mut WorldState, input: FrameInput, events: &mut Vec<GameEvent>) {
    let (dx, dy) = input.delta();
    if (dx, dy) == (0, 0) {
        return;
    }

    let cx = world.player.x as i32 + dx;
    let cy = world.player.y as i32 + dy;
    // Out-of-range candidates are rejected before any grid access.
    if cx < 0 || cy < 0 || cx as usize >= world.maze.cols || cy as usize >= world.maze.rows {
        return;
    }
    let (cx, cy) = (cx as usize, cy as usize);

    if world.maze.cell_at(cx, cy) == Cell::Floor {
        world.player.place_at(cx, cy);
    }

    // The pickup check runs on the candidate cell whether or not the
    // move committed.
    if world.maze.cell_at(cx, cy).is_coin() {
        world.maze.collect_coin(cx, cy);
        world.player.score += world.coin_value;
        world.player.coins_collected += 1;
        events.push(GameEvent::CoinCollected { x: cx, y: cy });
    }
}

// ══════════════════════════════════════════════════════════════
// Finish check / level progression
// ══════════════════════════════════════════════════════════════

fn resolve_finish(world: &mut WorldState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    if !world.maze.is_finish(world.player.x, world.player.y) {
        return;
    }

    let finish_value = world.finish_value;
    world.tracker.add_points(finish_value);
    world.player.reset_score();
    events.push(GameEvent::LevelCleared { level: world.level });

    let next = world.level + 1;
    if next >= world.total_levels {
        world.phase = Phase::Finished;
        events.push(GameEvent::GameCompleted);
    } else {
        world.enter_level(next, rng);
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::maze::Maze;
    use crate::sim::score::ScoreTracker;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;

    fn scratch_tracker(name: &str) -> ScoreTracker {
        let path: PathBuf = std::env::temp_dir()
            .join(format!("junglemaze_step_{}_{}", std::process::id(), name));
        let _ = std::fs::remove_file(&path);
        ScoreTracker::load(path)
    }

    fn world_from(rows: &[&str], name: &str) -> WorldState {
        WorldState::for_test(Maze::from_rows(rows), scratch_tracker(name))
    }

    fn press(dir: &str) -> FrameInput {
        FrameInput {
            up: dir.contains("up"),
            down: dir.contains("down"),
            left: dir.contains("left"),
            right: dir.contains("right"),
        }
    }

    #[test]
    fn wall_blocks_movement() {
        let mut world = world_from(&[
            "#####",
            "#.S##",
            "#####",
        ], "wall_block");
        let mut rng = StdRng::seed_from_u64(0);
        step(&mut world, press("right"), &mut rng);
        assert_eq!((world.player.x, world.player.y), (2, 1));
    }

    #[test]
    fn floor_commits_movement() {
        let mut world = world_from(&[
            "#####",
            "#S..#",
            "#####",
        ], "floor_move");
        let mut rng = StdRng::seed_from_u64(0);
        step(&mut world, press("right"), &mut rng);
        assert_eq!((world.player.x, world.player.y), (2, 1));
    }

    #[test]
    fn diagonal_moves_both_axes_in_one_tick() {
        let mut world = world_from(&[
            "#####",
            "#S..#",
            "#...#",
            "#####",
        ], "diagonal");
        let mut rng = StdRng::seed_from_u64(0);
        step(&mut world, press("right down"), &mut rng);
        assert_eq!((world.player.x, world.player.y), (2, 2));
    }

    /// A coin on the candidate cell is scooped up even though the move
    /// onto it is rejected for this tick; the next tick walks onto the
    /// now-cleared floor.
    #[test]
    fn coin_collected_while_move_is_rejected() {
        let mut world = world_from(&[
            "#####",
            "#So.#",
            "#####",
        ], "coin_quirk");
        let mut rng = StdRng::seed_from_u64(0);

        let events = step(&mut world, press("right"), &mut rng);
        assert_eq!((world.player.x, world.player.y), (1, 1), "move must be rejected");
        assert_eq!(world.player.score, 50);
        assert_eq!(world.player.coins_collected, 1);
        assert_eq!(events, vec![GameEvent::CoinCollected { x: 2, y: 1 }]);
        assert!(world.maze.coins.is_empty());

        let events = step(&mut world, press("right"), &mut rng);
        assert_eq!((world.player.x, world.player.y), (2, 1), "cell cleared, move commits");
        assert!(events.is_empty());
    }

    #[test]
    fn out_of_bounds_candidate_is_a_no_op() {
        let mut world = world_from(&[
            "S.",
            "..",
        ], "oob");
        let mut rng = StdRng::seed_from_u64(0);
        step(&mut world, press("left"), &mut rng);
        assert_eq!((world.player.x, world.player.y), (0, 0));
        step(&mut world, press("up left"), &mut rng);
        assert_eq!((world.player.x, world.player.y), (0, 0));
    }

    #[test]
    fn finish_advances_level_and_resets_player() {
        let mut world = world_from(&[
            "#####",
            "#SoF#",
            "#####",
        ], "finish");
        let mut rng = StdRng::seed_from_u64(3);

        // Draw the coin (move rejected), enter its cell, reach the finish.
        step(&mut world, press("right"), &mut rng);
        step(&mut world, press("right"), &mut rng);
        assert_eq!(world.player.score, 50);
        let events = step(&mut world, press("right"), &mut rng);

        assert!(events.contains(&GameEvent::LevelCleared { level: 0 }));
        assert_eq!(world.level, 1);
        assert_eq!(world.phase, Phase::Playing);
        assert_eq!(world.tracker.score(), 100);
        assert_eq!(world.player.score, 0, "per-level score resets");
        assert_eq!(world.player.coins_collected, 0);
        assert_eq!(
            (world.player.x, world.player.y),
            world.maze.start,
            "player respawns at the next maze's start"
        );
    }

    #[test]
    fn clearing_last_level_finishes_the_game() {
        let mut world = world_from(&[
            "####",
            "#SF#",
            "####",
        ], "last_level");
        world.total_levels = 1;
        let mut rng = StdRng::seed_from_u64(0);

        let events = step(&mut world, press("right"), &mut rng);
        assert_eq!(world.phase, Phase::Finished);
        assert!(events.contains(&GameEvent::GameCompleted));
        assert_eq!(world.tracker.score(), 100);

        // Terminal state: further steps are inert.
        let events = step(&mut world, press("left"), &mut rng);
        assert!(events.is_empty());
        assert_eq!((world.player.x, world.player.y), (2, 1));
    }
}
