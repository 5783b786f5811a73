use crate::prelude::*;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a stored score relates to the true score of its position.
pub enum TTBound
{
    /// The true score is at most the stored score (fail-low).
    Upper = 1,
    /// The true score is at least the stored score (fail-high).
    Lower = 2,
    Exact = 3,
}

impl TTBound
{
    /// Classifies a search result against the window it was searched with.
    ///
    /// The window must be the one handed in, not whatever alpha drifted to during the move loop.
    pub fn classify(score: i32, alpha: i32, beta: i32) -> TTBound
    {
        if score <= alpha
        {
            TTBound::Upper
        }
        else if score >= beta
        {
            TTBound::Lower
        }
        else
        {
            TTBound::Exact
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Data associated with the most recent completed search of a particular position.
pub struct TTEntry<M>
{
    pub depth:     Depth,
    pub score:     i32,
    pub bound:     TTBound,
    pub best_move: Option<M>,
}

#[derive(Clone, Debug)]
/// An entry along with the full key it was stored under, since slots are shared in a bounded table.
pub(super) struct TTSlot<M>
{
    pub key:   u64,
    pub entry: TTEntry<M>,
}
