use crate::prelude::*;

pub mod consts
{
    use super::*;

    /// Stands in for an unbounded score; strictly outside every real evaluation.
    pub const INF: i32 = 1_000_000;

    /// The score of delivering checkmate, from the perspective of the side that delivered it.
    pub const MATE: i32 = 100_000;

    /// Anything at least this large is a forced win embedded with its distance from the root.
    pub const MINIMUM_WIN: i32 = MATE - scalars::MAXIMUM_PLY as i32;
}

pub use consts::*;

/// Embed the ply into winning or losing scores.
pub fn normalize(score: i32, ply: usize) -> i32
{
    if score >= MINIMUM_WIN
    {
        score - ply as i32
    }
    else if score <= -MINIMUM_WIN
    {
        score + ply as i32
    }
    else
    {
        score
    }
}

/// Extract the score from an embedded score.
pub fn reconstruct(score: i32, ply: usize) -> i32
{
    if score >= MINIMUM_WIN
    {
        score + ply as i32
    }
    else if score <= -MINIMUM_WIN
    {
        score - ply as i32
    }
    else
    {
        score
    }
}
