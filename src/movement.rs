use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    castling_right::CastlingSide,
    color::Color,
    piece::{ParsePieceKindError, PieceKind},
    square::{ParseSquareError, Square},
};

/// A state transition, immutable once built.
///
/// Castling is not stored, it is recognized from the king's home square and the
/// two castle destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    en_passant: bool,
    promotion: Option<PieceKind>,
}
impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            en_passant: false,
            promotion: None,
        }
    }
    pub fn en_passant(from: Square, to: Square) -> Self {
        Move {
            en_passant: true,
            ..Move::new(from, to)
        }
    }
    pub fn promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        debug_assert!(kind.is_promotion_choice(), "cannot promote to {kind}");
        Move {
            promotion: Some(kind),
            ..Move::new(from, to)
        }
    }
    pub fn from(self) -> Square {
        self.from
    }
    pub fn to(self) -> Square {
        self.to
    }
    pub fn is_en_passant(self) -> bool {
        self.en_passant
    }
    pub fn promotion_kind(self) -> Option<PieceKind> {
        self.promotion
    }
    pub fn is_castle(self, color: Color, side: CastlingSide) -> bool {
        self.from == CastlingSide::king_origin(color) && self.to == side.king_destination(color)
    }
    pub fn is_queenside_castle(self, color: Color) -> bool {
        self.is_castle(color, CastlingSide::Queenside)
    }
    pub fn is_kingside_castle(self, color: Color) -> bool {
        self.is_castle(color, CastlingSide::Kingside)
    }
    /// Only meaningful when the moving piece is known to be the king.
    pub fn castle_side(self, color: Color) -> Option<CastlingSide> {
        CastlingSide::ALL
            .into_iter()
            .find(|side| self.is_castle(color, *side))
    }
    pub fn lan(self) -> Lan {
        Lan {
            origin: self.from,
            destination: self.to,
            promotion: self.promotion,
        }
    }
}
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.uppercase())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseLanError {
    InvalidChar,
    ParseSquareError(ParseSquareError),
    ParsePieceKindError(ParsePieceKindError),
    Unexpected(char),
}
impl From<ParseSquareError> for ParseLanError {
    fn from(value: ParseSquareError) -> Self {
        ParseLanError::ParseSquareError(value)
    }
}
impl From<ParsePieceKindError> for ParseLanError {
    fn from(value: ParsePieceKindError) -> Self {
        ParseLanError::ParsePieceKindError(value)
    }
}
impl Display for ParseLanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseLanError::InvalidChar => write!(f, "provided string contains invalid character")?,
            ParseLanError::ParseSquareError(err) => write!(f, "{err}")?,
            ParseLanError::ParsePieceKindError(err) => write!(f, "{err}")?,
            ParseLanError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseLanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseLanError::ParseSquareError(err) => Some(err),
            ParseLanError::ParsePieceKindError(err) => Some(err),
            _ => None,
        }
    }
}

/// Long algebraic notation: `e2e4`, `e7e8q`, `e1g1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lan {
    pub origin: Square,
    pub destination: Square,
    pub promotion: Option<PieceKind>,
}
impl Lan {
    pub fn matches(self, movement: Move) -> bool {
        self == movement.lan()
    }
}
impl Display for Lan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.lowercase())?;
        }
        Ok(())
    }
}
impl FromStr for Lan {
    type Err = ParseLanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let origin = s.get(0..2).ok_or(ParseLanError::InvalidChar)?.parse()?;
        let destination = s.get(2..4).ok_or(ParseLanError::InvalidChar)?.parse()?;
        let mut rest = s.get(4..).ok_or(ParseLanError::InvalidChar)?.chars();
        let promotion = rest.next().map(PieceKind::try_from).transpose()?;

        if let Some(c) = rest.next() {
            return Err(ParseLanError::Unexpected(c));
        }
        Ok(Lan {
            origin,
            destination,
            promotion,
        })
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        movement::{Lan, Move, ParseLanError},
        piece::PieceKind,
        square,
        square::ParseSquareError,
    };

    #[test]
    fn castle_predicates() {
        let white_big = Move::new(square!("e1"), square!("c1"));
        assert!(white_big.is_queenside_castle(Color::White));
        assert!(!white_big.is_kingside_castle(Color::White));
        assert!(!white_big.is_queenside_castle(Color::Black));

        let black_small = Move::new(square!("e8"), square!("g8"));
        assert!(black_small.is_kingside_castle(Color::Black));
        assert!(!black_small.is_kingside_castle(Color::White));

        let plain = Move::new(square!("e2"), square!("e4"));
        assert_eq!(plain.castle_side(Color::White), None);
    }
    #[test]
    fn display_is_destination_and_promotion() {
        assert_eq!(Move::new(square!("e2"), square!("e4")).to_string(), "e4");
        assert_eq!(
            Move::promotion(square!("b7"), square!("b8"), PieceKind::Knight).to_string(),
            "b8N"
        );
    }
    #[test]
    fn lan_text() {
        let lan: Lan = "e7e8q".parse().unwrap();
        assert_eq!(lan.origin, square!("e7"));
        assert_eq!(lan.destination, square!("e8"));
        assert_eq!(lan.promotion, Some(PieceKind::Queen));
        assert_eq!(lan.to_string(), "e7e8q");
        assert!(lan.matches(Move::promotion(
            square!("e7"),
            square!("e8"),
            PieceKind::Queen
        )));
        assert!(!lan.matches(Move::new(square!("e7"), square!("e8"))));
    }
    #[test]
    fn lan_errors() {
        assert_eq!("e2".parse::<Lan>(), Err(ParseLanError::InvalidChar));
        assert_eq!(
            "e2z4".parse::<Lan>(),
            Err(ParseLanError::ParseSquareError(
                ParseSquareError::InvalidFile('z')
            ))
        );
        assert_eq!("e7e8qq".parse::<Lan>(), Err(ParseLanError::Unexpected('q')));
    }
}
