use arrayvec::ArrayVec;

use crate::prelude::*;

#[derive(Clone, Debug)]
/// A particular line taken by the search, which is a continuation and a corresponding score.
pub struct Variation<M>
{
    pub moves: ArrayVec<M, { scalars::MAXIMUM_PLY }>,
    pub score: i32,
}

impl<M> Default for Variation<M>
{
    fn default() -> Self
    {
        Variation {
            moves: ArrayVec::new(),
            score: 0,
        }
    }
}

impl<M: Clone> Variation<M>
{
    /// Replaces this variation with `mv` followed by `rest`, truncating anything past the maximum ply.
    pub fn load(&mut self, mv: M, rest: &Variation<M>)
    {
        self.moves.clear();
        self.moves.push(mv);
        let room = self.moves.remaining_capacity().min(rest.moves.len());
        self.moves.extend(rest.moves[.. room].iter().cloned());
        self.score = rest.score;
    }

    /// The first move of the line, if any.
    pub fn first(&self) -> Option<&M>
    {
        self.moves.first()
    }
}
