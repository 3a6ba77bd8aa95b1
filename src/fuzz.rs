use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashSet;

use crate::{board::Board, fen::Fen, movement::Lan, piece::PieceKind, square::Square};

/// Games are cut here when neither side manages to finish.
pub const MAX_PLIES: u32 = 300;

impl From<chess::Piece> for PieceKind {
    fn from(value: chess::Piece) -> Self {
        match value {
            chess::Piece::Pawn => PieceKind::Pawn,
            chess::Piece::Knight => PieceKind::Knight,
            chess::Piece::Bishop => PieceKind::Bishop,
            chess::Piece::Rook => PieceKind::Rook,
            chess::Piece::Queen => PieceKind::Queen,
            chess::Piece::King => PieceKind::King,
        }
    }
}
impl From<chess::Square> for Square {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, reason = "indices are below 8")]
    fn from(value: chess::Square) -> Self {
        Square::new(
            value.get_file().to_index() as i8,
            value.get_rank().to_index() as i8,
        )
    }
}
impl From<chess::ChessMove> for Lan {
    fn from(value: chess::ChessMove) -> Self {
        Lan {
            origin: value.get_source().into(),
            destination: value.get_dest().into(),
            promotion: value.get_promotion().map(Into::into),
        }
    }
}

/// Disagreement between this crate and the `chess` crate on one position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FuzzError {
    /// The `chess` crate refused the exported FEN.
    Unparsable { fen: String },
    /// A move generated here that the `chess` crate considers illegal.
    Extra { fen: String, lan: Lan },
    /// A legal move that was not generated here.
    Missing { fen: String, lan: Lan },
}
impl Display for FuzzError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FuzzError::Unparsable { fen } => write!(f, "`chess` crate could not parse {fen}")?,
            FuzzError::Extra { fen, lan } => {
                write!(f, "found {lan} but it's not a legal move on {fen}")?;
            }
            FuzzError::Missing { fen, lan } => write!(f, "{lan} not found on {fen}")?,
        }
        Ok(())
    }
}
impl Error for FuzzError {}

/// Compares the legal moves of `board` against the `chess` crate.
pub fn compare(board: &Board) -> Result<FxHashSet<Lan>, FuzzError> {
    let fen = Fen(board.clone()).to_string();
    let moves: FxHashSet<Lan> = board
        .all_legal_moves()
        .into_iter()
        .map(|movement| movement.lan())
        .collect();
    let Ok(reference) = fen.parse::<chess::Board>() else {
        return Err(FuzzError::Unparsable { fen });
    };
    let reference: FxHashSet<Lan> = chess::MoveGen::new_legal(&reference)
        .map(Into::into)
        .collect();
    if let Some(lan) = moves.difference(&reference).next() {
        return Err(FuzzError::Extra { fen, lan: *lan });
    }
    if let Some(lan) = reference.difference(&moves).next() {
        return Err(FuzzError::Missing { fen, lan: *lan });
    }
    Ok(moves)
}
/// Plays `games` random games from the starting position, checking every
/// position on the way. Returns the number of positions checked.
pub fn fuzz(games: u32, seed: u64) -> Result<u64, FuzzError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut positions = 0;
    for _ in 0..games {
        let mut board = Board::starting_position();
        for _ in 0..MAX_PLIES {
            let moves: Box<[_]> = compare(&board)?.into_iter().collect();
            positions += 1;
            if moves.is_empty() {
                break;
            }
            let lan = moves[rng.random_range(0..moves.len())];
            let Ok(movement) = board.resolve(lan) else {
                break;
            };
            board = board.play_move(movement);
        }
    }
    Ok(positions)
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        fen::Fen,
        fuzz::{compare, fuzz},
        movement::Lan,
        square,
    };

    #[test]
    fn square_conversion() {
        assert_eq!(
            crate::square::Square::from(chess::Square::E4),
            square!("e4")
        );
        assert_eq!(
            crate::square::Square::from(chess::Square::H8),
            square!("h8")
        );
    }
    #[test]
    fn agrees_on_tricky_positions() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
        ] {
            let fen: Fen = fen.parse().unwrap();
            if let Err(err) = compare(&fen.0) {
                panic!("{err}");
            }
        }
    }
    #[test]
    fn en_passant_is_compared() {
        let fen: Fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"
            .parse()
            .unwrap();
        let moves = compare(&fen.0).unwrap();
        assert!(moves.contains(&"e5d6".parse::<Lan>().unwrap()));
    }
    #[test]
    fn random_games() {
        match fuzz(2, 0x5eed) {
            Ok(positions) => assert!(positions > 0),
            Err(err) => panic!("{err}"),
        }
        assert!(compare(&Board::starting_position()).is_ok());
    }
}
