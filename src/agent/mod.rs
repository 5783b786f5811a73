pub mod evaluators;
pub mod ordering;
pub mod scalars;
pub mod search;
pub mod searchargs;
pub mod table;
pub mod variation;

pub use scalars::*;
pub use search::*;
pub use searchargs::*;
pub use table::*;
pub use variation::*;

/// The rules of a two-player, zero-sum game as seen by the search.
///
/// The search never inspects a position directly; everything it needs to know goes through here.
pub trait Game: Clone + Send + 'static
{
    type Move: Clone + Eq + std::fmt::Debug + Send + Sync + 'static;

    /// Whether a move captures something. Used only for ordering.
    fn is_capture(&self, mv: &Self::Move) -> bool;

    /// Whether the game is over in this position, for whatever reason.
    fn is_terminal(&self) -> bool;

    /// Fills `moves` with every legal move for the side to move.
    fn generate_moves(&self, moves: &mut Vec<Self::Move>);

    /// Applies a legal move.
    fn play(&mut self, mv: &Self::Move);

    /// Reverts the most recent `play`.
    fn undo(&mut self);

    /// A stable 64-bit identity for this position.
    fn zobrist(&self) -> u64;
}

/// A scoring oracle for positions of a particular game.
///
/// Scores are from the perspective of the side to move, and must account for finished games:
/// a side to move that has lost scores `-MATE`, and a draw scores zero.
pub trait Evaluator<G: Game>: Send + Sync
{
    fn evaluate(&self, state: &G) -> i32;
}
