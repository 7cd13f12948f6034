/// Entities: the player avatar and the per-tick input sample.

/// One frame of directional input, sampled from held keys.
/// The four axes are independent: opposing keys cancel, and a
/// horizontal + vertical pair sums into a diagonal candidate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl FrameInput {
    /// Summed axis deltas for this frame.
    pub fn delta(self) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if self.left { dx -= 1; }
        if self.right { dx += 1; }
        if self.up { dy -= 1; }
        if self.down { dy += 1; }
        (dx, dy)
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: usize,
    pub y: usize,
    /// Coin points earned within the current level.
    pub score: u32,
    pub coins_collected: u32,
}

impl Player {
    pub fn new(x: usize, y: usize) -> Self {
        Player { x, y, score: 0, coins_collected: 0 }
    }

    /// Respawn at a level's start cell.
    pub fn place_at(&mut self, x: usize, y: usize) {
        self.x = x;
        self.y = y;
    }

    /// Zero the per-level counters. Called on every level clear.
    pub fn reset_score(&mut self) {
        self.score = 0;
        self.coins_collected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_axis_delta() {
        let input = FrameInput { right: true, ..Default::default() };
        assert_eq!(input.delta(), (1, 0));
    }

    #[test]
    fn diagonal_sums_both_axes() {
        let input = FrameInput { right: true, down: true, ..Default::default() };
        assert_eq!(input.delta(), (1, 1));
    }

    #[test]
    fn opposing_keys_cancel() {
        let input = FrameInput { left: true, right: true, up: true, ..Default::default() };
        assert_eq!(input.delta(), (0, -1));
    }

    #[test]
    fn reset_score_zeroes_counters() {
        let mut p = Player::new(1, 1);
        p.score = 150;
        p.coins_collected = 3;
        p.reset_score();
        assert_eq!(p.score, 0);
        assert_eq!(p.coins_collected, 0);
    }
}
