/// Maze grid and its randomized recursive-backtracking generator.
///
/// Generation order (reproduced from the original game):
///   1. Fill the grid with Wall.
///   2. Place finish cells in the right half, forced to Floor.
///   3. Draw coin positions over the interior; a draw that lands on an
///      already-cleared cell is skipped outright, so the realized coin
///      count may undershoot the configured draw count.
///   4. Carve corridors from (1,1) by depth-first backtracking.
///   5. Force the start cell to Floor.
///
/// Finish and coin cells are placed *before* carving and are therefore
/// not guaranteed reachable from the start on every seed.

use rand::seq::SliceRandom;
use rand::Rng;

use super::cell::Cell;

/// Generation parameters, derived from config at startup.
#[derive(Clone, Copy, Debug)]
pub struct MazeParams {
    pub cols: usize,
    pub rows: usize,
    pub finish_count: usize,
    pub coin_draws: usize,
}

pub struct Maze {
    pub grid: Vec<Vec<Cell>>,
    pub cols: usize,
    pub rows: usize,
    pub start: (usize, usize),
    pub finishes: Vec<(usize, usize)>,
    /// Coin positions still present on the board, for the renderer.
    /// Pruned as coins are collected.
    pub coins: Vec<(usize, usize)>,
}

const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

impl Maze {
    /// Generate a level. `params.cols` and `params.rows` must already have
    /// passed config validation (>= 3 each).
    pub fn generate(params: MazeParams, rng: &mut impl Rng) -> Self {
        let MazeParams { cols, rows, finish_count, coin_draws } = params;
        let mut grid = vec![vec![Cell::Wall; cols]; rows];
        let start = (1, 1);

        let mut finishes = Vec::with_capacity(finish_count);
        for _ in 0..finish_count {
            let x = rng.gen_range(cols / 2..=cols - 2);
            let y = rng.gen_range(1..=rows - 2);
            grid[y][x] = Cell::Floor;
            finishes.push((x, y));
        }

        let mut coins = Vec::with_capacity(coin_draws);
        for _ in 0..coin_draws {
            let x = rng.gen_range(1..=cols - 2);
            let y = rng.gen_range(1..=rows - 2);
            if grid[y][x] != Cell::Wall {
                continue; // collides with start/finish/earlier coin: skip, no redraw
            }
            grid[y][x] = Cell::Coin;
            coins.push((x, y));
        }

        carve_from(&mut grid, start.0, start.1, rng);
        grid[start.1][start.0] = Cell::Floor;

        Maze { grid, cols, rows, start, finishes, coins }
    }

    /// Cell at (x, y); out of bounds reads as Wall.
    #[inline]
    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        if x < self.cols && y < self.rows {
            self.grid[y][x]
        } else {
            Cell::Wall
        }
    }

    /// Guarded write; out of bounds is a no-op.
    #[inline]
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.cols && y < self.rows {
            self.grid[y][x] = cell;
        }
    }

    /// Clear a collected coin: the grid cell reverts to Floor and the
    /// position leaves the render list.
    pub fn collect_coin(&mut self, x: usize, y: usize) {
        self.set_cell(x, y, Cell::Floor);
        self.coins.retain(|&p| p != (x, y));
    }

    pub fn is_finish(&self, x: usize, y: usize) -> bool {
        self.finishes.contains(&(x, y))
    }
}

/// Depth-first carve: visit the four directions in random order; for each,
/// the cell two steps away; if in bounds and still Wall, clear both the
/// intermediate and destination cells and recurse from the destination.
/// Recursion depth is bounded by the number of carvable cells.
fn carve_from(grid: &mut [Vec<Cell>], cx: usize, cy: usize, rng: &mut impl Rng) {
    let rows = grid.len();
    let cols = grid[0].len();
    let mut dirs = DIRECTIONS;
    dirs.shuffle(rng);
    for (dx, dy) in dirs {
        let nx = cx as i32 + dx * 2;
        let ny = cy as i32 + dy * 2;
        if nx < 0 || ny < 0 || nx as usize >= cols || ny as usize >= rows {
            continue;
        }
        let (nx, ny) = (nx as usize, ny as usize);
        if grid[ny][nx] == Cell::Wall {
            grid[(cy as i32 + dy) as usize][(cx as i32 + dx) as usize] = Cell::Floor;
            grid[ny][nx] = Cell::Floor;
            carve_from(grid, nx, ny, rng);
        }
    }
}

// ── Test scaffolding ──

#[cfg(test)]
impl Maze {
    /// Build a maze from a character map.
    ///   '#' = Wall   '.' = Floor   'o' = Coin
    ///   'S' = start (Floor)        'F' = finish (Floor)
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let h = rows.len();
        let w = rows[0].len();
        let mut grid = vec![vec![Cell::Wall; w]; h];
        let mut start = (1, 1);
        let mut finishes = vec![];
        let mut coins = vec![];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                grid[y][x] = match ch {
                    '#' => Cell::Wall,
                    'o' => {
                        coins.push((x, y));
                        Cell::Coin
                    }
                    'S' => {
                        start = (x, y);
                        Cell::Floor
                    }
                    'F' => {
                        finishes.push((x, y));
                        Cell::Floor
                    }
                    _ => Cell::Floor,
                };
            }
        }
        Maze { grid, cols: w, rows: h, start, finishes, coins }
    }
}
