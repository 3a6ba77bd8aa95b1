use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::RangeInclusive,
    str::FromStr,
};

use crate::{color::Color, square::Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidCastlingCharacter(pub char);

impl Display for InvalidCastlingCharacter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found {}, expected one of `k`, `q`, `-`, or uppercase forms of these letters",
            self.0
        )?;
        Ok(())
    }
}
impl Error for InvalidCastlingCharacter {}

/// Queenside is the "big" castle, kingside the "small" one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Queenside,
    Kingside,
}
impl CastlingSide {
    pub const ALL: [Self; 2] = [CastlingSide::Queenside, CastlingSide::Kingside];
    /// The square the king crosses is also where the rook lands.
    fn rook_destination_file(self) -> i8 {
        match self {
            CastlingSide::Queenside => 3,
            CastlingSide::Kingside => 5,
        }
    }
    fn files_between(self) -> RangeInclusive<i8> {
        match self {
            CastlingSide::Queenside => 1..=3,
            CastlingSide::Kingside => 5..=6,
        }
    }
    pub fn king_origin(color: Color) -> Square {
        match color {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        }
    }
    pub fn king_destination(self, color: Color) -> Square {
        match (color, self) {
            (Color::White, CastlingSide::Queenside) => Square::C1,
            (Color::White, CastlingSide::Kingside) => Square::G1,
            (Color::Black, CastlingSide::Queenside) => Square::C8,
            (Color::Black, CastlingSide::Kingside) => Square::G8,
        }
    }
    pub fn king_passes(self, color: Color) -> Square {
        Square::new(self.rook_destination_file(), color.home_rank())
    }
    pub fn rook_origin(self, color: Color) -> Square {
        match (color, self) {
            (Color::White, CastlingSide::Queenside) => Square::A1,
            (Color::White, CastlingSide::Kingside) => Square::H1,
            (Color::Black, CastlingSide::Queenside) => Square::A8,
            (Color::Black, CastlingSide::Kingside) => Square::H8,
        }
    }
    pub fn rook_destination(self, color: Color) -> Square {
        Square::new(self.rook_destination_file(), color.home_rank())
    }
    /// Squares strictly between the king and the rook.
    pub fn squares_between(self, color: Color) -> impl Iterator<Item = Square> {
        self.files_between()
            .map(move |file| Square::new(file, color.home_rank()))
    }
    pub fn of_rook_home(square: Square) -> Option<(Color, Self)> {
        Color::ALL.into_iter().find_map(|color| {
            CastlingSide::ALL
                .into_iter()
                .find(|side| side.rook_origin(color) == square)
                .map(|side| (color, side))
        })
    }
}
impl Display for CastlingSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CastlingSide::Queenside => write!(f, "queenside")?,
            CastlingSide::Kingside => write!(f, "kingside")?,
        }
        Ok(())
    }
}

/// Four independent flags. A flag only ever goes from `true` to `false` during
/// play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    white_kingside: bool,
    white_queenside: bool,
    black_kingside: bool,
    black_queenside: bool,
}
impl CastlingRights {
    pub fn all() -> Self {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }
    pub fn none() -> Self {
        CastlingRights {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }
    fn flag_mut(&mut self, color: Color, side: CastlingSide) -> &mut bool {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => &mut self.white_kingside,
            (Color::White, CastlingSide::Queenside) => &mut self.white_queenside,
            (Color::Black, CastlingSide::Kingside) => &mut self.black_kingside,
            (Color::Black, CastlingSide::Queenside) => &mut self.black_queenside,
        }
    }
    pub fn get(self, color: Color, side: CastlingSide) -> bool {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => self.white_kingside,
            (Color::White, CastlingSide::Queenside) => self.white_queenside,
            (Color::Black, CastlingSide::Kingside) => self.black_kingside,
            (Color::Black, CastlingSide::Queenside) => self.black_queenside,
        }
    }
    pub fn add(&mut self, color: Color, side: CastlingSide) {
        *self.flag_mut(color, side) = true;
    }
    pub fn remove(&mut self, color: Color, side: CastlingSide) {
        *self.flag_mut(color, side) = false;
    }
    pub fn clear(&mut self, color: Color) {
        for side in CastlingSide::ALL {
            self.remove(color, side);
        }
    }
    /// Drops the rights tied to a square the moment anything leaves or lands
    /// on it: the king home clears both sides, a rook home clears its side.
    pub fn remove_for_square(&mut self, square: Square) {
        for color in Color::ALL {
            if square == CastlingSide::king_origin(color) {
                self.clear(color);
            }
        }
        if let Some((color, side)) = CastlingSide::of_rook_home(square) {
            self.remove(color, side);
        }
    }
    pub fn any(self) -> bool {
        self != CastlingRights::none()
    }
}
impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::all()
    }
}
impl Display for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut written = false;
        for (color, side, c) in [
            (Color::White, CastlingSide::Kingside, 'K'),
            (Color::White, CastlingSide::Queenside, 'Q'),
            (Color::Black, CastlingSide::Kingside, 'k'),
            (Color::Black, CastlingSide::Queenside, 'q'),
        ] {
            if self.get(color, side) {
                written = true;
                write!(f, "{c}")?;
            }
        }
        if !written {
            write!(f, "-")?;
        }
        Ok(())
    }
}
impl FromStr for CastlingRights {
    type Err = InvalidCastlingCharacter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut castling_rights = CastlingRights::none();
        for c in s.chars() {
            match c {
                'K' => castling_rights.add(Color::White, CastlingSide::Kingside),
                'Q' => castling_rights.add(Color::White, CastlingSide::Queenside),
                'k' => castling_rights.add(Color::Black, CastlingSide::Kingside),
                'q' => castling_rights.add(Color::Black, CastlingSide::Queenside),
                '-' => (),
                c => return Err(InvalidCastlingCharacter(c)),
            }
        }
        Ok(castling_rights)
    }
}
#[cfg(test)]
mod test {
    use crate::{
        castling_right::{CastlingRights, CastlingSide},
        color::Color,
        square,
    };

    #[test]
    fn king_home_clears_both_sides() {
        let mut rights = CastlingRights::all();
        rights.remove_for_square(square!("e8"));
        assert!(!rights.get(Color::Black, CastlingSide::Kingside));
        assert!(!rights.get(Color::Black, CastlingSide::Queenside));
        assert!(rights.get(Color::White, CastlingSide::Kingside));
        assert_eq!(rights.to_string(), "KQ");
    }
    #[test]
    fn rook_home_clears_one_side() {
        let mut rights = CastlingRights::all();
        rights.remove_for_square(square!("a1"));
        assert!(!rights.get(Color::White, CastlingSide::Queenside));
        assert!(rights.get(Color::White, CastlingSide::Kingside));
        rights.remove_for_square(square!("d4"));
        assert_eq!(rights.to_string(), "Kkq");
    }
    #[test]
    fn fen_form() {
        assert_eq!("KQkq".parse(), Ok(CastlingRights::all()));
        assert_eq!("-".parse(), Ok(CastlingRights::none()));
        assert_eq!(CastlingRights::none().to_string(), "-");
        assert!("X".parse::<CastlingRights>().is_err());
    }
    #[test]
    fn castle_geometry() {
        assert_eq!(
            CastlingSide::Queenside.king_destination(Color::White),
            square!("c1")
        );
        assert_eq!(CastlingSide::king_origin(Color::Black), square!("e8"));
        assert_eq!(
            CastlingSide::Kingside.king_destination(Color::Black),
            square!("g8")
        );
        assert_eq!(
            CastlingSide::Queenside.rook_origin(Color::Black),
            square!("a8")
        );
        assert_eq!(
            CastlingSide::Kingside.rook_origin(Color::White),
            square!("h1")
        );
        assert_eq!(
            CastlingSide::Kingside.king_passes(Color::White),
            square!("f1")
        );
        assert_eq!(
            CastlingSide::Kingside.rook_destination(Color::Black),
            square!("f8")
        );
        let between: Vec<_> = CastlingSide::Queenside
            .squares_between(Color::Black)
            .collect();
        assert_eq!(between, [square!("b8"), square!("c8"), square!("d8")]);
    }
}
