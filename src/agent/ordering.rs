use crate::prelude::*;

/// Orders moves so that the likeliest refutations come first.
///
/// A hint (normally the best move from the transposition table) goes first if it is among the moves;
/// captures come before quiet moves after that. Anything else keeps its generated order.
pub fn order<G: Game>(state: &G, moves: &mut [G::Move], hint: Option<&G::Move>)
{
    let mut start = 0;

    if let Some(hint) = hint
    {
        if let Some(index) = moves.iter().position(|mv| mv == hint)
        {
            moves[..= index].rotate_right(1);
            start = 1;
        }
    }

    // Stable, so captures and quiets each keep their generated order.
    moves[start ..].sort_by_key(|mv| !state.is_capture(mv));
}

/// Generates and orders every legal move in a position.
pub fn ordered_moves<G: Game>(state: &G, hint: Option<&G::Move>) -> Vec<G::Move>
{
    let mut moves = Vec::new();
    state.generate_moves(&mut moves);
    order(state, &mut moves, hint);
    moves
}
