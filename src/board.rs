use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{
    castling_right::{CastlingRights, CastlingSide},
    color::Color,
    end_state::EndState,
    movement::{Lan, Move},
    piece::{Cell, Piece, PieceKind},
    square::{Square, Vector},
};

/// A move rejected by [`Board::apply_move`] or [`Board::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IllegalMove(pub Lan);

impl Display for IllegalMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} is an invalid move", self.0)?;
        Ok(())
    }
}
impl Error for IllegalMove {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidPosition {
    MissingKing(Color),
    ExceededKings(Color),
    NonPlayerInCheck,
    InvalidCastlingRight,
    InvalidEnPassantTarget,
}
impl Display for InvalidPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidPosition::MissingKing(color) => write!(f, "no {color} king found")?,
            InvalidPosition::ExceededKings(color) => write!(f, "found more than 1 {color} kings")?,
            InvalidPosition::NonPlayerInCheck => write!(f, "non-player in check")?,
            InvalidPosition::InvalidCastlingRight => write!(f, "invalid castling right")?,
            InvalidPosition::InvalidEnPassantTarget => write!(f, "invalid en passant target")?,
        }
        Ok(())
    }
}
impl Error for InvalidPosition {}

/// What changed on the board after a move, for observers mirroring the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveApplied {
    pub movement: Move,
    pub piece: Piece,
    pub captured: Option<(Square, Piece)>,
    /// Rook origin and destination when the move was a castle.
    pub rook: Option<(Square, Square)>,
    /// Whether the player now to move is in check.
    pub check: bool,
}
impl Display for MoveApplied {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} from {} to {}",
            self.piece,
            self.movement.from(),
            self.movement
        )?;
        if let Some((square, piece)) = self.captured {
            write!(f, ", captures {piece} on {square}")?;
        }
        if let Some((origin, destination)) = self.rook {
            write!(f, ", rook from {origin} to {destination}")?;
        }
        if self.check {
            write!(f, ", check")?;
        }
        Ok(())
    }
}

pub type Grid = [[Option<Piece>; 8]; 8];

/// Indexed `[rank][file]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    board: Grid,
    active_player: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
    white_in_check: bool,
    black_in_check: bool,
}
impl Board {
    pub fn starting_position() -> Self {
        let mut board = [[None; 8]; 8];
        board[0] = PieceKind::STARTING_CONFIGURATION.map(|kind| Some(Piece::new(Color::White, kind)));
        board[1] = [Some(Piece::new(Color::White, PieceKind::Pawn)); 8];
        board[6] = [Some(Piece::new(Color::Black, PieceKind::Pawn)); 8];
        board[7] = PieceKind::STARTING_CONFIGURATION.map(|kind| Some(Piece::new(Color::Black, kind)));
        Board {
            board,
            active_player: Color::White,
            castling_rights: CastlingRights::all(),
            en_passant_target: None,
            white_in_check: false,
            black_in_check: false,
        }
    }
    /// Builds an arbitrary position, rejecting ones that cannot arise from
    /// legal play in ways the engine relies on.
    pub fn from_parts(
        board: Grid,
        active_player: Color,
        castling_rights: CastlingRights,
        en_passant_target: Option<Square>,
    ) -> Result<Self, InvalidPosition> {
        let mut new = Board {
            board,
            active_player,
            castling_rights,
            en_passant_target,
            white_in_check: false,
            black_in_check: false,
        };
        for color in Color::ALL {
            let mut kings = new
                .pieces(color)
                .filter(|(_, piece)| piece.kind == PieceKind::King);
            if kings.next().is_none() {
                return Err(InvalidPosition::MissingKing(color));
            }
            if kings.next().is_some() {
                return Err(InvalidPosition::ExceededKings(color));
            }
            for side in CastlingSide::ALL {
                if castling_rights.get(color, side)
                    && !(new
                        .piece_at(CastlingSide::king_origin(color))
                        .has_piece(Piece::new(color, PieceKind::King))
                        && new
                            .piece_at(side.rook_origin(color))
                            .has_piece(Piece::new(color, PieceKind::Rook)))
                {
                    return Err(InvalidPosition::InvalidCastlingRight);
                }
            }
        }
        if let Some(target) = en_passant_target {
            // the pawn that just moved belongs to the player who is not to move
            let mover = !active_player;
            let forward = Vector::pawn_single_move(mover);
            if !(target.is_on_board()
                && target.rank() == mover.pawn_home_rank() + mover.pawn_direction()
                && new.piece_at(target).is_empty()
                && new
                    .piece_at(target.move_by(forward))
                    .has_piece(Piece::new(mover, PieceKind::Pawn)))
            {
                return Err(InvalidPosition::InvalidEnPassantTarget);
            }
        }
        new.update_check();
        if new.in_check(!active_player) {
            return Err(InvalidPosition::NonPlayerInCheck);
        }
        Ok(new)
    }
    pub fn active_player(&self) -> Color {
        self.active_player
    }
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }
    pub fn white_in_check(&self) -> bool {
        self.white_in_check
    }
    pub fn black_in_check(&self) -> bool {
        self.black_in_check
    }
    /// Check flag as recorded after the last applied move.
    pub fn in_check(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_in_check,
            Color::Black => self.black_in_check,
        }
    }
    pub fn grid(&self) -> &Grid {
        &self.board
    }
    /// Never fails, squares off the grid are reported as [`Cell::Outside`].
    pub fn piece_at(&self, square: Square) -> Cell {
        if square.is_on_board() {
            self.board[rank_index(square)][file_index(square)].into()
        } else {
            Cell::Outside
        }
    }
    fn cell_mut(&mut self, square: Square) -> &mut Option<Piece> {
        debug_assert!(square.is_on_board(), "{square} is outside of the board");
        &mut self.board[rank_index(square)][file_index(square)]
    }
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| {
            self.piece_at(square)
                .piece()
                .filter(|piece| piece.color == color)
                .map(|piece| (square, piece))
        })
    }
    pub fn king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }
    fn step_moves(
        &self,
        origin: Square,
        color: Color,
        offsets: &'static [Vector],
    ) -> impl Iterator<Item = Move> + '_ {
        offsets
            .iter()
            .map(move |offset| origin.move_by(*offset))
            .filter(move |destination| self.piece_at(*destination).is_reachable_by(color))
            .map(move |destination| Move::new(origin, destination))
    }
    fn ray_moves(
        &self,
        origin: Square,
        color: Color,
        directions: &'static [Vector],
    ) -> impl Iterator<Item = Move> + '_ {
        directions.iter().flat_map(move |direction| {
            let mut stop_next = false;
            (1..)
                .map(move |distance| origin.move_by(*direction * distance))
                .take_while(move |destination| {
                    if stop_next {
                        return false;
                    }
                    match self.piece_at(*destination) {
                        Cell::Empty => true,
                        Cell::Occupied(piece) => {
                            stop_next = true;
                            piece.color != color
                        }
                        Cell::Outside => false,
                    }
                })
                .map(move |destination| Move::new(origin, destination))
        })
    }
    fn pawn_moves(&self, origin: Square, color: Color) -> Vec<Move> {
        let forward = Vector::pawn_single_move(color);
        let mut destinations = Vec::with_capacity(4);

        let single = origin.move_by(forward);
        if self.piece_at(single).is_empty() {
            destinations.push((single, false));
            let double = single.move_by(forward);
            if origin.rank() == color.pawn_home_rank() && self.piece_at(double).is_empty() {
                destinations.push((double, false));
            }
        }
        for attack in Vector::pawn_attacks(color) {
            let destination = origin.move_by(attack);
            if self.piece_at(destination).has_color(!color) {
                destinations.push((destination, false));
            } else if Some(destination) == self.en_passant_target
                && self
                    .piece_at(destination.move_by(-forward))
                    .has_piece(Piece::new(!color, PieceKind::Pawn))
            {
                destinations.push((destination, true));
            }
        }
        let mut moves = Vec::with_capacity(destinations.len());
        for (destination, en_passant) in destinations {
            if destination.rank() == color.promotion_rank() {
                moves.extend(
                    PieceKind::PROMOTION_CHOICES
                        .map(|kind| Move::promotion(origin, destination, kind)),
                );
            } else if en_passant {
                moves.push(Move::en_passant(origin, destination));
            } else {
                moves.push(Move::new(origin, destination));
            }
        }
        moves
    }
    /// Castles offered to a king on its home square. The attack probes run
    /// with castling suppressed, which is what keeps this from recursing.
    fn castling_moves(&self, origin: Square, color: Color) -> impl Iterator<Item = Move> + '_ {
        CastlingSide::ALL
            .into_iter()
            .filter(move |side| {
                self.castling_rights.get(color, *side)
                    && origin == CastlingSide::king_origin(color)
                    && self
                        .piece_at(side.rook_origin(color))
                        .has_piece(Piece::new(color, PieceKind::Rook))
                    && side
                        .squares_between(color)
                        .all(|square| self.piece_at(square).is_empty())
                    && [origin, side.king_passes(color)]
                        .into_iter()
                        .all(|square| !self.is_square_attacked(square, !color))
            })
            .map(move |side| Move::new(origin, side.king_destination(color)))
    }
    /// Pseudo-legal moves of the piece on `square`, these may leave its own
    /// king in check.
    pub fn possible_moves(&self, square: Square, suppress_castling: bool) -> Vec<Move> {
        let Cell::Occupied(piece) = self.piece_at(square) else {
            return Vec::new();
        };
        let color = piece.color;
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(square, color),
            PieceKind::Knight => self
                .step_moves(square, color, &Vector::KNIGHT_MOVES)
                .collect(),
            PieceKind::Bishop => self
                .ray_moves(square, color, &Vector::BISHOP_DIRECTIONS)
                .collect(),
            PieceKind::Rook => self
                .ray_moves(square, color, &Vector::ROOK_DIRECTIONS)
                .collect(),
            PieceKind::Queen => self
                .ray_moves(square, color, &Vector::QUEEN_DIRECTIONS)
                .collect(),
            PieceKind::King => {
                let mut moves: Vec<_> = self
                    .step_moves(square, color, &Vector::KING_MOVES)
                    .collect();
                if !suppress_castling {
                    moves.extend(self.castling_moves(square, color));
                }
                moves
            }
        }
    }
    /// Whether any piece of `by` could reach `target`. Pawns count their
    /// diagonals even when `target` is empty.
    pub fn is_attacked(&self, target: Square, by: Color, suppress_castling: bool) -> bool {
        self.pieces(by).any(|(origin, piece)| {
            if piece.kind == PieceKind::Pawn {
                Vector::pawn_attacks(by)
                    .into_iter()
                    .any(|attack| origin.move_by(attack) == target)
            } else {
                self.possible_moves(origin, suppress_castling)
                    .into_iter()
                    .any(|movement| movement.to() == target)
            }
        })
    }
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        self.is_attacked(square, by, true)
    }
    pub fn is_in_check(&self, color: Color, suppress_castling: bool) -> bool {
        self.king(color)
            .is_some_and(|king| self.is_attacked(king, !color, suppress_castling))
    }
    /// Moves of the active player's piece on `square` that do not leave its
    /// king in check, found by playing each candidate on a copy.
    pub fn legal_moves(&self, square: Square) -> Vec<Move> {
        let mover = self.active_player;
        if !self.piece_at(square).has_color(mover) {
            return Vec::new();
        }
        self.possible_moves(square, false)
            .into_iter()
            .filter(|movement| !self.play_move(*movement).in_check(mover))
            .collect()
    }
    pub fn all_legal_moves(&self) -> Vec<Move> {
        self.pieces(self.active_player)
            .flat_map(|(square, _)| self.legal_moves(square))
            .collect()
    }
    pub fn has_legal_move(&self) -> bool {
        self.pieces(self.active_player)
            .any(|(square, _)| !self.legal_moves(square).is_empty())
    }
    /// Finds the legal move written as `lan`.
    pub fn resolve(&self, lan: Lan) -> Result<Move, IllegalMove> {
        self.legal_moves(lan.origin)
            .into_iter()
            .find(|movement| lan.matches(*movement))
            .ok_or(IllegalMove(lan))
    }
    /// Applies `movement` after checking it against [`Board::legal_moves`].
    /// An illegal move leaves the board untouched.
    pub fn apply_move(&mut self, movement: Move) -> Result<MoveApplied, IllegalMove> {
        if !self.legal_moves(movement.from()).contains(&movement) {
            return Err(IllegalMove(movement.lan()));
        }
        self.apply_unchecked(movement)
            .ok_or(IllegalMove(movement.lan()))
    }
    /// A copy of the board with `movement` applied without legality checks,
    /// the receiver is never touched.
    pub fn play_move(&self, movement: Move) -> Self {
        let mut new = self.clone();
        new.apply_unchecked(movement);
        new
    }
    fn apply_unchecked(&mut self, movement: Move) -> Option<MoveApplied> {
        let origin = movement.from();
        let destination = movement.to();
        if !origin.is_on_board() || !destination.is_on_board() {
            return None;
        }
        let piece = self.cell_mut(origin).take()?;
        let color = piece.color;
        let forward = Vector::pawn_single_move(color);

        let captured = if movement.is_en_passant() {
            let square = destination.move_by(-forward);
            self.cell_mut(square).take().map(|piece| (square, piece))
        } else {
            self.cell_mut(destination).map(|piece| (destination, piece))
        };
        let placed = match movement.promotion_kind() {
            Some(kind) => Piece::new(color, kind),
            None => piece,
        };
        *self.cell_mut(destination) = Some(placed);

        let rook = if piece.kind == PieceKind::King {
            movement.castle_side(color).map(|side| {
                let (rook_origin, rook_destination) =
                    (side.rook_origin(color), side.rook_destination(color));
                let rook = self.cell_mut(rook_origin).take();
                *self.cell_mut(rook_destination) = rook;
                (rook_origin, rook_destination)
            })
        } else {
            None
        };

        self.en_passant_target = (piece.kind == PieceKind::Pawn
            && destination - origin == Vector::pawn_double_move(color))
        .then_some(origin.move_by(forward));
        self.castling_rights.remove_for_square(origin);
        self.castling_rights.remove_for_square(destination);
        self.active_player = !self.active_player;
        self.update_check();

        Some(MoveApplied {
            movement,
            piece,
            captured,
            rook,
            check: self.in_check(self.active_player),
        })
    }
    fn update_check(&mut self) {
        self.white_in_check = self.is_in_check(Color::White, true);
        self.black_in_check = self.is_in_check(Color::Black, true);
    }
    pub fn is_checkmate(&self, color: Color) -> bool {
        color == self.active_player && self.is_in_check(color, true) && !self.has_legal_move()
    }
    pub fn is_stalemate(&self, color: Color) -> bool {
        color == self.active_player && !self.is_in_check(color, true) && !self.has_legal_move()
    }
    pub fn end_state(&self) -> Option<EndState> {
        if self.has_legal_move() {
            None
        } else if self.is_in_check(self.active_player, true) {
            Some(EndState::Checkmate(self.active_player))
        } else {
            Some(EndState::Stalemate)
        }
    }
}
impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}
impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.board.iter().rev() {
            for cell in row {
                match cell {
                    Some(piece) => write!(f, "{}", piece.fen())?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "{} plays", self.active_player)?;
        Ok(())
    }
}
#[allow(clippy::cast_sign_loss, reason = "callers check the square is on board")]
fn rank_index(square: Square) -> usize {
    square.rank() as usize
}
#[allow(clippy::cast_sign_loss, reason = "callers check the square is on board")]
fn file_index(square: Square) -> usize {
    square.file() as usize
}
