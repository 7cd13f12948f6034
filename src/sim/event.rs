/// Events emitted during a simulation step.
/// The presentation layer consumes these for HUD messages.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    CoinCollected { x: usize, y: usize },
    LevelCleared { level: usize },
    GameCompleted,
}
