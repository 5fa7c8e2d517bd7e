//! Rules of the territory-capture game: board generation, the capture
//! cascade, scoring, win detection and turn order for a single room.

pub mod board;
pub mod capture;
pub mod game;
pub mod scoring;
pub mod shapes;
pub mod turn;

pub use board::{Board, BoardConfig};
pub use capture::apply_move;
pub use game::{GameState, MoveOutcome};
pub use scoring::Scores;
pub use turn::TurnScheduler;
