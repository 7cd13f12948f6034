/// WorldState: the complete snapshot of a running game.
///
/// Owns the current maze, the player, the score tracker, and the level
/// progression. The simulation (`sim::step`) is the only mutator during
/// play; the renderer only reads.

use rand::Rng;

use crate::config::GameConfig;
use crate::domain::entity::Player;
use crate::domain::maze::{Maze, MazeParams};
use crate::sim::score::ScoreTracker;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    Finished,
}

pub struct WorldState {
    pub maze: Maze,
    pub player: Player,
    pub tracker: ScoreTracker,

    // ── Level progression ──
    pub level: usize,
    pub total_levels: usize,
    pub phase: Phase,

    // ── Generation / scoring parameters ──
    pub params: MazeParams,
    pub coin_value: u32,
    pub finish_value: u32,

    // ── Meta ──
    pub tick: u64,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
}

impl WorldState {
    /// Build the initial world: level 0 generated, player at its start,
    /// high score loaded from storage.
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Self {
        let params = config.maze_params();
        let maze = Maze::generate(params, rng);
        let player = Player::new(maze.start.0, maze.start.1);
        WorldState {
            maze,
            player,
            tracker: ScoreTracker::load(config.high_score_path.clone()),
            level: 0,
            total_levels: config.level_count,
            phase: Phase::Playing,
            params,
            coin_value: config.coin_value,
            finish_value: config.finish_value,
            tick: 0,
            message: String::new(),
            message_timer: 0,
        }
    }

    /// Generate and enter the given level; the player respawns at its
    /// start cell.
    pub fn enter_level(&mut self, level: usize, rng: &mut impl Rng) {
        self.level = level;
        self.maze = Maze::generate(self.params, rng);
        self.player.place_at(self.maze.start.0, self.maze.start.1);
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }
}

#[cfg(test)]
impl WorldState {
    /// World over a hand-built maze, with default scoring values.
    pub(crate) fn for_test(maze: Maze, tracker: ScoreTracker) -> Self {
        let params = MazeParams {
            cols: maze.cols,
            rows: maze.rows,
            finish_count: 0,
            coin_draws: 0,
        };
        let player = Player::new(maze.start.0, maze.start.1);
        WorldState {
            maze,
            player,
            tracker,
            level: 0,
            total_levels: 2,
            phase: Phase::Playing,
            params,
            coin_value: 50,
            finish_value: 100,
            tick: 0,
            message: String::new(),
            message_timer: 0,
        }
    }
}
