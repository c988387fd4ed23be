//! Simulation module
//!
//! Every game rule lives here, free of rendering and platform code:
//! - Seeded RNG only
//! - State is owned by one view or session, never global
//! - Time comes in as arguments (ticks, frame timestamps)

pub mod autopilot;
pub mod collision;
pub mod grid;
pub mod pursuit;
pub mod shooter;
pub mod snake;

pub use collision::Aabb;
pub use grid::{Board, Cell, Direction};
pub use pursuit::{Ghost, Pellet, PursuitState, TargetMode};
pub use shooter::{
    Bullet, Enemy, FrameOutcome, SessionPhase, Ship, ShooterInput, ShooterState,
};
pub use snake::{CrashKind, SnakePhase, SnakeState, TickOutcome};
