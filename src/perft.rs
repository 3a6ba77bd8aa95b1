use std::{
    fmt::{self, Display, Formatter},
    ops::AddAssign,
};

use crate::{
    board::Board,
    movement::Move,
    piece::{Cell, PieceKind},
};

/// Tallies of the leaf moves of a perft run. Every field except `nodes`
/// describes the move that reached the leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}
impl PerftCounts {
    fn leaf(board: &Board, movement: Move) -> Self {
        let moving = board.piece_at(movement.from());
        let next = board.play_move(movement);
        let check = next.in_check(next.active_player());
        PerftCounts {
            nodes: 1,
            captures: u64::from(
                movement.is_en_passant()
                    || matches!(board.piece_at(movement.to()), Cell::Occupied(_)),
            ),
            en_passant: u64::from(movement.is_en_passant()),
            castles: u64::from(
                moving.has_kind(PieceKind::King)
                    && movement.castle_side(board.active_player()).is_some(),
            ),
            promotions: u64::from(movement.promotion_kind().is_some()),
            checks: u64::from(check),
            checkmates: u64::from(check && !next.has_legal_move()),
        }
    }
}
impl AddAssign for PerftCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}
impl Display for PerftCounts {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes:      {}", self.nodes)?;
        writeln!(f, "captures:   {}", self.captures)?;
        writeln!(f, "en passant: {}", self.en_passant)?;
        writeln!(f, "castles:    {}", self.castles)?;
        writeln!(f, "promotions: {}", self.promotions)?;
        writeln!(f, "checks:     {}", self.checks)?;
        write!(f, "checkmates: {}", self.checkmates)?;
        Ok(())
    }
}
/// Number of leaf positions `depth` plies away.
pub fn perft(board: &Board, depth: u32) -> u64 {
    match depth {
        0 => 1,
        1 => board.all_legal_moves().len() as u64,
        depth => board
            .all_legal_moves()
            .into_iter()
            .map(|movement| perft(&board.play_move(movement), depth - 1))
            .sum(),
    }
}
/// Same walk as [`perft`] but classifying every leaf move.
pub fn perft_counts(board: &Board, depth: u32) -> PerftCounts {
    let mut counts = PerftCounts::default();
    match depth {
        0 => counts.nodes = 1,
        1 => {
            for movement in board.all_legal_moves() {
                counts += PerftCounts::leaf(board, movement);
            }
        }
        depth => {
            for movement in board.all_legal_moves() {
                counts += perft_counts(&board.play_move(movement), depth - 1);
            }
        }
    }
    counts
}
/// Leaf counts split by root move, for narrowing down a wrong total.
pub fn divide(board: &Board, depth: u32) -> Vec<(Move, u64)> {
    board
        .all_legal_moves()
        .into_iter()
        .map(|movement| {
            let count = perft(&board.play_move(movement), depth.saturating_sub(1));
            (movement, count)
        })
        .collect()
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        fen::Fen,
        perft::{PerftCounts, divide, perft, perft_counts},
    };

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn board(fen: &str) -> Board {
        let fen: Fen = fen.parse().unwrap();
        fen.0
    }
    #[test]
    fn starting_position() {
        let board = Board::starting_position();
        assert_eq!(perft(&board, 0), 1);
        assert_eq!(perft(&board, 1), 20);
        assert_eq!(perft(&board, 2), 400);
        assert_eq!(
            perft_counts(&board, 3),
            PerftCounts {
                nodes: 8902,
                captures: 34,
                checks: 12,
                ..PerftCounts::default()
            }
        );
    }
    #[test]
    fn kiwipete() {
        let board = board(KIWIPETE);
        assert_eq!(
            perft_counts(&board, 1),
            PerftCounts {
                nodes: 48,
                captures: 8,
                castles: 2,
                ..PerftCounts::default()
            }
        );
        assert_eq!(
            perft_counts(&board, 2),
            PerftCounts {
                nodes: 2039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                checks: 3,
                ..PerftCounts::default()
            }
        );
    }
    #[test]
    fn position_3() {
        let board = board(POSITION_3);
        assert_eq!(perft(&board, 1), 14);
        assert_eq!(perft(&board, 2), 191);
        let counts = perft_counts(&board, 3);
        assert_eq!(counts.nodes, 2812);
        assert_eq!(counts.en_passant, 2);
        assert_eq!(counts.captures, 209);
        assert_eq!(counts.checks, 267);
    }
    #[test]
    fn position_4() {
        let board = board(POSITION_4);
        assert_eq!(perft(&board, 1), 6);
        assert_eq!(
            perft_counts(&board, 2),
            PerftCounts {
                nodes: 264,
                captures: 87,
                castles: 6,
                promotions: 48,
                checks: 10,
                ..PerftCounts::default()
            }
        );
        assert_eq!(perft(&board, 3), 9467);
    }
    #[test]
    fn position_5() {
        let board = board(POSITION_5);
        assert_eq!(perft(&board, 1), 44);
        assert_eq!(perft(&board, 2), 1486);
    }
    #[test]
    fn divide_sums_to_perft() {
        let board = board(KIWIPETE);
        let divided = divide(&board, 2);
        assert_eq!(divided.len(), 48);
        assert_eq!(divided.iter().map(|(_, count)| count).sum::<u64>(), 2039);
    }
}
