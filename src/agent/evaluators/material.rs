use shakmaty::{Position, Role};

use crate::prelude::*;

const VALUE_PAWN: i32 = 100;
const VALUE_KNIGHT: i32 = 320;
const VALUE_BISHOP: i32 = 330;
const VALUE_ROOK: i32 = 500;
const VALUE_QUEEN: i32 = 900;

/// Kings are never captured, so this only matters for symmetry with the other roles.
const VALUE_KING: i32 = 20000;

/// Gives a baseline value for a piece.
fn role_value(role: Role) -> i32
{
    match role
    {
        | Role::Pawn => VALUE_PAWN,
        | Role::Knight => VALUE_KNIGHT,
        | Role::Bishop => VALUE_BISHOP,
        | Role::Rook => VALUE_ROOK,
        | Role::Queen => VALUE_QUEEN,
        | Role::King => VALUE_KING,
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Scores a chess position by material balance alone.
pub struct Material;

impl Evaluator<ChessBoard> for Material
{
    fn evaluate(&self, state: &ChessBoard) -> i32
    {
        let position = state.position();

        if position.is_checkmate()
        {
            return -MATE;
        }

        if state.is_terminal()
        {
            return 0;
        }

        let board = position.board();
        let mut score = 0;

        for role in Role::ALL
        {
            let ours = (board.by_role(role) & board.by_color(position.turn())).count() as i32;
            let theirs = (board.by_role(role) & board.by_color(!position.turn())).count() as i32;
            score += role_value(role) * (ours - theirs);
        }

        score
    }
}
