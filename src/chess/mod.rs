use shakmaty::{
    fen::Fen,
    zobrist::{Zobrist64, ZobristHash},
    CastlingMode,
    Chess,
    EnPassantMode,
    Move,
    Position,
};

use crate::prelude::*;

/// The halfmove clock at which the fifty-move rule ends a game.
const FIFTY_MOVE_HALFMOVES: u32 = 100;

#[derive(Clone, Debug)]
/// A chess position with enough history to take moves back and to spot repetitions.
///
/// The rules themselves come from shakmaty; this only keeps the bookkeeping the search needs.
pub struct ChessBoard
{
    /// The position as it stands.
    position: Chess,

    /// Every position before the current one, most recent last.
    past: Vec<Chess>,

    /// The zobrist keys of every position so far, including the current one.
    keys: Vec<u64>,
}

impl Default for ChessBoard
{
    fn default() -> Self
    {
        ChessBoard::from_position(Chess::default())
    }
}

impl PartialEq for ChessBoard
{
    fn eq(&self, other: &Self) -> bool
    {
        self.fen() == other.fen()
    }
}

impl Eq for ChessBoard {}

impl FromStr for ChessBoard
{
    type Err = Error;

    /// Parses a board from FEN.
    fn from_str(s: &str) -> std::prelude::v1::Result<Self, Self::Err>
    {
        let fen = s.parse::<Fen>().map_err(|e| Error::for_parse::<Fen>(s.into()).chain(Error::new(Kind::InvalidPosition, e.to_string())))?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| Error::for_parse::<Chess>(s.into()).chain(Error::new(Kind::InvalidPosition, e.to_string())))?;

        Ok(ChessBoard::from_position(position))
    }
}

impl std::fmt::Display for ChessBoard
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{}", self.fen())
    }
}

impl ChessBoard
{
    /// The FEN of the current position.
    pub fn fen(&self) -> String
    {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    /// Starts a history at the given position.
    pub fn from_position(position: Chess) -> Self
    {
        let key = Self::key(&position);
        ChessBoard {
            position,
            past: Vec::new(),
            keys: vec![key],
        }
    }

    /// Finds the legal move with the given UCI notation.
    pub fn parse_move(&self, s: &str) -> Result<Move>
    {
        self.position
            .legal_moves()
            .into_iter()
            .find(|mv| Self::uci(mv) == s)
            .ok_or_else(|| Error::new(Kind::IllegalMove, format!("'{}' is not legal in {}.", s, self.fen())))
    }

    /// Plays a move given in UCI notation, if it is legal.
    pub fn play_uci(&mut self, s: &str) -> Result<()>
    {
        let mv = self.parse_move(s)?;
        self.play(&mv);
        Ok(())
    }

    /// The underlying shakmaty position.
    pub fn position(&self) -> &Chess
    {
        &self.position
    }

    /// Whether the current position has occurred at least three times.
    pub fn is_threefold(&self) -> bool
    {
        let current = self.zobrist();
        self.keys.iter().filter(|key| **key == current).count() >= 3
    }

    /// Formats a move in UCI notation.
    pub fn uci(mv: &Move) -> String
    {
        mv.to_uci(CastlingMode::Standard).to_string()
    }

    /// Whether white is to move.
    pub fn white_to_move(&self) -> bool
    {
        self.position.turn().is_white()
    }

    fn key(position: &Chess) -> u64
    {
        position.zobrist_hash::<Zobrist64>(EnPassantMode::Legal).0
    }
}

impl Game for ChessBoard
{
    type Move = Move;

    fn is_capture(&self, mv: &Move) -> bool
    {
        mv.is_capture()
    }

    fn is_terminal(&self) -> bool
    {
        self.position.is_game_over() || self.position.halfmoves() >= FIFTY_MOVE_HALFMOVES || self.is_threefold()
    }

    fn generate_moves(&self, moves: &mut Vec<Move>)
    {
        moves.extend(self.position.legal_moves());
    }

    fn play(&mut self, mv: &Move)
    {
        let mut next = self.position.clone();
        next.play_unchecked(mv);

        let key = Self::key(&next);
        self.past.push(std::mem::replace(&mut self.position, next));
        self.keys.push(key);
    }

    fn undo(&mut self)
    {
        if let Some(prev) = self.past.pop()
        {
            self.position = prev;
            self.keys.pop();
        }
    }

    fn zobrist(&self) -> u64
    {
        self.keys.last().copied().unwrap_or_else(|| Self::key(&self.position))
    }
}
