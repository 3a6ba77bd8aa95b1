use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    pub const PROMOTION_CHOICES: [Self; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];
    pub const STARTING_CONFIGURATION: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    pub fn uppercase(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
    pub fn lowercase(self) -> char {
        self.uppercase().to_ascii_lowercase()
    }
    pub fn is_promotion_choice(self) -> bool {
        PieceKind::PROMOTION_CHOICES.contains(&self)
    }
}
impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn")?,
            PieceKind::Knight => write!(f, "knight")?,
            PieceKind::Bishop => write!(f, "bishop")?,
            PieceKind::Rook => write!(f, "rook")?,
            PieceKind::Queen => write!(f, "queen")?,
            PieceKind::King => write!(f, "king")?,
        }
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsePieceKindError {
    Empty,
    UnknownSymbol(char),
    UnexpectedSymbol(char),
}
impl Display for ParsePieceKindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParsePieceKindError::Empty => write!(f, "expected one character, found none instead")?,
            ParsePieceKindError::UnknownSymbol(c) => write!(
                f,
                "found `{c}`, expected one of `p`, `n`, `b`, `r`, `q`, `k`, or uppercase forms of these letters"
            )?,
            ParsePieceKindError::UnexpectedSymbol(c) => {
                write!(f, "unexpected `{c}`, only one character is expected")?;
            }
        }
        Ok(())
    }
}
impl Error for ParsePieceKindError {}

impl TryFrom<char> for PieceKind {
    type Error = ParsePieceKindError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let piece = match value {
            'p' | 'P' => PieceKind::Pawn,
            'n' | 'N' => PieceKind::Knight,
            'b' | 'B' => PieceKind::Bishop,
            'r' | 'R' => PieceKind::Rook,
            'q' | 'Q' => PieceKind::Queen,
            'k' | 'K' => PieceKind::King,
            c => return Err(ParsePieceKindError::UnknownSymbol(c)),
        };
        Ok(piece)
    }
}
impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut characters = s.chars();
        let piece = characters
            .next()
            .ok_or(ParsePieceKindError::Empty)?
            .try_into()?;

        if let Some(c) = characters.next() {
            return Err(ParsePieceKindError::UnexpectedSymbol(c));
        }
        Ok(piece)
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}
impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }
    pub fn fen(self) -> char {
        match self.color {
            Color::White => self.kind.uppercase(),
            Color::Black => self.kind.lowercase(),
        }
    }
    pub fn from_fen(c: char) -> Result<Self, ParsePieceKindError> {
        let kind = PieceKind::try_from(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Piece::new(color, kind))
    }
    pub fn figurine(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
}
impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)?;
        Ok(())
    }
}
/// Result of looking up a square on the board.
///
/// `Outside` is only ever produced by lookups, the board itself stores
/// `Option<Piece>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Piece),
    Outside,
}
impl Cell {
    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Occupied(piece) => Some(piece),
            Cell::Empty | Cell::Outside => None,
        }
    }
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
    pub fn has_color(self, color: Color) -> bool {
        matches!(self, Cell::Occupied(piece) if piece.color == color)
    }
    pub fn has_kind(self, kind: PieceKind) -> bool {
        matches!(self, Cell::Occupied(piece) if piece.kind == kind)
    }
    pub fn has_piece(self, piece: Piece) -> bool {
        self == Cell::Occupied(piece)
    }
    /// Whether a piece of `color` may land here: empty or holding an opponent.
    pub fn is_reachable_by(self, color: Color) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Occupied(piece) => piece.color != color,
            Cell::Outside => false,
        }
    }
}
impl From<Option<Piece>> for Cell {
    fn from(value: Option<Piece>) -> Self {
        match value {
            Some(piece) => Cell::Occupied(piece),
            None => Cell::Empty,
        }
    }
}
impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, "empty")?,
            Cell::Occupied(piece) => write!(f, "{piece}")?,
            Cell::Outside => write!(f, "outside")?,
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        piece::{Cell, ParsePieceKindError, Piece, PieceKind},
    };

    #[test]
    fn cell_predicates() {
        let rook = Cell::Occupied(Piece::new(Color::Black, PieceKind::Rook));
        assert!(rook.has_color(Color::Black));
        assert!(!rook.has_color(Color::White));
        assert!(rook.has_kind(PieceKind::Rook));
        assert!(rook.is_reachable_by(Color::White));
        assert!(!rook.is_reachable_by(Color::Black));
        assert!(Cell::Empty.is_reachable_by(Color::Black));
        assert!(!Cell::Outside.is_reachable_by(Color::White));
        assert!(!Cell::Outside.has_color(Color::White));
        assert!(!Cell::Empty.has_kind(PieceKind::Pawn));
    }
    #[test]
    fn fen_characters() {
        assert_eq!(
            Piece::from_fen('q'),
            Ok(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(Piece::new(Color::White, PieceKind::Knight).fen(), 'N');
        assert_eq!(
            Piece::from_fen('x'),
            Err(ParsePieceKindError::UnknownSymbol('x'))
        );
    }
    #[test]
    fn promotion_choices_exclude_pawn_and_king() {
        assert!(!PieceKind::Pawn.is_promotion_choice());
        assert!(!PieceKind::King.is_promotion_choice());
        assert!(PieceKind::Knight.is_promotion_choice());
    }
}
