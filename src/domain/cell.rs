/// Cell states of the maze grid.
/// Properties are queried via methods, not stored as flags,
/// so cell semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Wall,
    Floor,
    Coin,
}

impl Cell {
    /// Can the player occupy this cell?
    pub fn is_walkable(self) -> bool {
        !matches!(self, Cell::Wall)
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }

    pub fn is_coin(self) -> bool {
        matches!(self, Cell::Coin)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Wall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_blocks_floor_and_coin_walkable() {
        assert!(!Cell::Wall.is_walkable());
        assert!(Cell::Floor.is_walkable());
        assert!(Cell::Coin.is_walkable());
    }

    #[test]
    fn default_is_wall() {
        assert_eq!(Cell::default(), Cell::Wall);
    }
}
