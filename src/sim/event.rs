/// Events emitted during a simulation step.
/// The session logs these; nothing in the simulation reads them back.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PlayerMoved { x: usize, y: usize },
    /// A directional command ran into the border and was dropped.
    PlayerBlocked { x: usize, y: usize },
    HazardReversed { id: usize, x: usize, y: usize },
    HazardWrapped { id: usize, x: usize },
    PlayerCaught { id: usize, x: usize, y: usize },
    FinishReached { x: usize, y: usize },
}
