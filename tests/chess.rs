mod common;
use common::*;

#[cfg(test)]
mod chess
{
    use super::*;
    use chessmind::prelude::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn default_is_start()
    {
        let _setup = setup::setup();
        let board = ChessBoard::default();
        assert_eq!(board.fen(), START);
        assert!(board.white_to_move());

        let mut moves = Vec::new();
        board.generate_moves(&mut moves);
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn fen_round_trip()
    {
        let _setup = setup::setup();
        let fen = "r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1";
        let board: ChessBoard = fen.parse().unwrap();
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn bad_fen()
    {
        let _setup = setup::setup();
        let err = "not a fen".parse::<ChessBoard>().unwrap_err();
        assert_eq!(err.kind, Kind::InvalidPosition);
        // No black king.
        let err = "8/8/8/8/8/8/8/4K3 w - - 0 1".parse::<ChessBoard>().unwrap_err();
        assert_eq!(err.kind, Kind::InvalidPosition);
    }

    #[test]
    fn play_and_undo()
    {
        let _setup = setup::setup();
        let mut board = ChessBoard::default();
        let start_key = board.zobrist();

        board.play_uci("e2e4").unwrap();
        assert!(!board.white_to_move());
        assert_ne!(board.zobrist(), start_key);

        board.undo();
        assert_eq!(board.fen(), START);
        assert_eq!(board.zobrist(), start_key);
    }

    #[test]
    fn illegal_moves_are_refused()
    {
        let _setup = setup::setup();
        let mut board = ChessBoard::default();

        assert_eq!(board.play_uci("e2e5").unwrap_err().kind, Kind::IllegalMove);
        assert!(board.play_uci("garbage").is_err());
        assert_eq!(board.fen(), START);
    }

    #[test]
    fn castling_and_promotion_notation()
    {
        let _setup = setup::setup();
        let mut board: ChessBoard = "4k3/1P6/8/8/8/8/8/4K2R w K - 0 1".parse().unwrap();

        board.play_uci("e1g1").unwrap();
        board.play_uci("e8d7").unwrap();
        board.play_uci("b7b8q").unwrap();
        assert_eq!(board.fen(), "1Q6/3k4/8/8/8/8/8/5RK1 b - - 0 2");
    }

    #[test]
    fn transpositions_share_a_key()
    {
        let _setup = setup::setup();
        let mut a = ChessBoard::default();
        let mut b = ChessBoard::default();
        for mv in ["g1f3", "g8f6", "b1c3"]
        {
            a.play_uci(mv).unwrap();
        }
        for mv in ["b1c3", "g8f6", "g1f3"]
        {
            b.play_uci(mv).unwrap();
        }
        assert_eq!(a.zobrist(), b.zobrist());
    }

    #[test]
    fn threefold_is_terminal()
    {
        let _setup = setup::setup();
        let mut board = ChessBoard::default();
        assert!(!board.is_terminal());

        for _ in 0 .. 2
        {
            for mv in ["g1f3", "g8f6", "f3g1", "f6g8"]
            {
                board.play_uci(mv).unwrap();
            }
        }
        assert!(board.is_threefold());
        assert!(board.is_terminal());
    }

    #[test]
    fn fifty_move_rule_is_terminal()
    {
        let _setup = setup::setup();
        let fresh: ChessBoard = "4k3/8/8/8/8/8/8/4K2R w - - 99 80".parse().unwrap();
        assert!(!fresh.is_terminal());

        let mut board = fresh.clone();
        board.play_uci("h1h2").unwrap();
        assert!(board.is_terminal());
        assert_eq!(evaluators::Material.evaluate(&board), 0);
    }

    #[test]
    fn mate_and_stalemate_are_terminal()
    {
        let _setup = setup::setup();
        let mate: ChessBoard = "R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1".parse().unwrap();
        let stalemate: ChessBoard = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();

        assert!(mate.is_terminal());
        assert!(stalemate.is_terminal());
        assert_eq!(evaluators::Material.evaluate(&mate), -MATE);
        assert_eq!(evaluators::Material.evaluate(&stalemate), 0);
    }

    #[test]
    fn material_is_side_relative()
    {
        let _setup = setup::setup();
        let white: ChessBoard = "4k3/8/8/8/8/8/8/3QK3 w - - 0 1".parse().unwrap();
        let black: ChessBoard = "4k3/8/8/8/8/8/8/3QK3 b - - 0 1".parse().unwrap();

        assert_eq!(evaluators::Material.evaluate(&white), 900);
        assert_eq!(evaluators::Material.evaluate(&black), -900);
        assert_eq!(evaluators::Material.evaluate(&ChessBoard::default()), 0);
    }
}
