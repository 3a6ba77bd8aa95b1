use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::{Mul, Neg, Sub},
    str::FromStr,
};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseSquareError {
    InvalidFile(char),
    InvalidRank(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParseSquareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseSquareError::InvalidFile(file) => write!(
                f,
                "found `{file}`, characters from `a` to `h` were expected instead"
            )?,
            ParseSquareError::InvalidRank(rank) => write!(
                f,
                "found `{rank}`, characters from `1` to `8` were expected instead"
            )?,
            ParseSquareError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParseSquareError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseSquareError {}

/// An address on the grid, file 0 is `a` and rank 0 is `1`.
///
/// Offsetting is unchecked so a square may point outside of the board, lookups
/// on the board report those as [`Cell::Outside`](crate::piece::Cell::Outside).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: i8,
    rank: i8,
}
impl Square {
    pub const A1: Self = Square::new(0, 0);
    pub const C1: Self = Square::new(2, 0);
    pub const E1: Self = Square::new(4, 0);
    pub const G1: Self = Square::new(6, 0);
    pub const H1: Self = Square::new(7, 0);
    pub const A8: Self = Square::new(0, 7);
    pub const C8: Self = Square::new(2, 7);
    pub const E8: Self = Square::new(4, 7);
    pub const G8: Self = Square::new(6, 7);
    pub const H8: Self = Square::new(7, 7);

    pub const fn new(file: i8, rank: i8) -> Self {
        Square { file, rank }
    }
    /// Parses algebraic text at compile time, panics on malformed input.
    pub const fn from_literal(text: &str) -> Self {
        let bytes = text.as_bytes();
        assert!(bytes.len() == 2, "square literal must have 2 characters");
        assert!(bytes[0] >= b'a' && bytes[0] <= b'h', "invalid file");
        assert!(bytes[1] >= b'1' && bytes[1] <= b'8', "invalid rank");
        Square::new((bytes[0] - b'a') as i8, (bytes[1] - b'1') as i8)
    }
    pub fn from_chars(file: char, rank: char) -> Result<Self, ParseSquareError> {
        let file = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(ParseSquareError::InvalidFile(file)),
        };
        let rank = match rank {
            '1'..='8' => rank as u8 - b'1',
            _ => return Err(ParseSquareError::InvalidRank(rank)),
        };
        #[allow(clippy::cast_possible_wrap, reason = "values are below 8")]
        let square = Square::new(file as i8, rank as i8);
        Ok(square)
    }
    pub fn file(self) -> i8 {
        self.file
    }
    pub fn rank(self) -> i8 {
        self.rank
    }
    pub fn is_on_board(self) -> bool {
        (0..8).contains(&self.file) && (0..8).contains(&self.rank)
    }
    /// Saturates at the `i8` limits, a square far off the board stays off it.
    pub fn offset(self, file: i8, rank: i8) -> Self {
        Square::new(self.file.saturating_add(file), self.rank.saturating_add(rank))
    }
    pub fn move_by(self, movement: Vector) -> Self {
        self.offset(movement.file, movement.rank)
    }
    /// Every square of the board, rank by rank starting from `a1`.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Square::new(file, rank)))
    }
    pub fn color(self) -> Color {
        if (self.file + self.rank) % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }
}
impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            #[allow(clippy::cast_sign_loss, reason = "square is on the board")]
            let file = (self.file as u8 + b'a') as char;
            write!(f, "{file}{}", self.rank + 1)?;
        } else {
            write!(f, "({}, {})", self.file, self.rank)?;
        }
        Ok(())
    }
}
impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(file) = chars.next() else {
            return Err(ParseSquareError::NotEnoughCharacter(0));
        };
        let Some(rank) = chars.next() else {
            return Err(ParseSquareError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseSquareError::Unexpected(c));
        }
        Square::from_chars(file, rank)
    }
}
impl Sub<Self> for Square {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            file: self.file - rhs.file,
            rank: self.rank - rhs.rank,
        }
    }
}
#[macro_export]
macro_rules! square {
    ($text:literal) => {
        const { $crate::square::Square::from_literal($text) }
    };
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub file: i8,
    pub rank: i8,
}
impl Vector {
    pub const KNIGHT_MOVES: [Self; 8] = [
        Vector { file: -1, rank: -2 },
        Vector { file: 1, rank: -2 },
        Vector { file: -1, rank: 2 },
        Vector { file: 1, rank: 2 },
        Vector { file: -2, rank: -1 },
        Vector { file: 2, rank: -1 },
        Vector { file: -2, rank: 1 },
        Vector { file: 2, rank: 1 },
    ];
    pub const KING_MOVES: [Self; 8] = [
        Vector { file: -1, rank: -1 },
        Vector { file: 0, rank: -1 },
        Vector { file: 1, rank: -1 },
        Vector { file: -1, rank: 0 },
        Vector { file: 1, rank: 0 },
        Vector { file: -1, rank: 1 },
        Vector { file: 0, rank: 1 },
        Vector { file: 1, rank: 1 },
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector { file: -1, rank: 0 },
        Vector { file: 1, rank: 0 },
        Vector { file: 0, rank: -1 },
        Vector { file: 0, rank: 1 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector { file: -1, rank: -1 },
        Vector { file: 1, rank: -1 },
        Vector { file: -1, rank: 1 },
        Vector { file: 1, rank: 1 },
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = Vector::KING_MOVES;

    pub fn pawn_single_move(color: Color) -> Self {
        Vector {
            file: 0,
            rank: color.pawn_direction(),
        }
    }
    pub fn pawn_double_move(color: Color) -> Self {
        Vector::pawn_single_move(color) * 2
    }
    pub fn pawn_attacks(color: Color) -> [Self; 2] {
        [-1, 1].map(|file| Vector {
            file,
            rank: color.pawn_direction(),
        })
    }
}
impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        Vector {
            file: -self.file,
            rank: -self.rank,
        }
    }
}
impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector {
            file: self.file * rhs,
            rank: self.rank * rhs,
        }
    }
}
#[cfg(test)]
mod test {
    use crate::square::{ParseSquareError, Square, Vector};

    #[test]
    fn algebraic_round_trip() {
        let square: Square = "e4".parse().unwrap();
        assert_eq!(square, Square::new(4, 3));
        assert_eq!(square.to_string(), "e4");
        assert_eq!(square!("h8"), Square::H8);
    }
    #[test]
    fn rejects_malformed_text() {
        assert_eq!(
            "".parse::<Square>(),
            Err(ParseSquareError::NotEnoughCharacter(0))
        );
        assert_eq!(
            "e".parse::<Square>(),
            Err(ParseSquareError::NotEnoughCharacter(1))
        );
        assert_eq!(
            "e44".parse::<Square>(),
            Err(ParseSquareError::Unexpected('4'))
        );
        assert_eq!(
            "i4".parse::<Square>(),
            Err(ParseSquareError::InvalidFile('i'))
        );
        assert_eq!(
            "e9".parse::<Square>(),
            Err(ParseSquareError::InvalidRank('9'))
        );
        assert_eq!(
            "e0".parse::<Square>(),
            Err(ParseSquareError::InvalidRank('0'))
        );
    }
    #[test]
    fn offset_is_unchecked() {
        let square = square!("a1").offset(-1, 0);
        assert!(!square.is_on_board());
        assert_eq!(square.offset(1, 0), Square::A1);
        assert_eq!(
            square!("e2").move_by(Vector { file: 0, rank: 2 }),
            square!("e4")
        );
        let far = Square::new(120, -120).offset(10, -10);
        assert!(!far.is_on_board());
        assert_eq!(far, Square::new(i8::MAX, i8::MIN));
    }
    #[test]
    fn square_color() {
        assert_eq!(square!("a1").color(), crate::color::Color::Black);
        assert_eq!(square!("h1").color(), crate::color::Color::White);
    }
    #[test]
    fn all_squares_are_on_board() {
        assert_eq!(Square::all().count(), 64);
        assert!(Square::all().all(Square::is_on_board));
    }
}
