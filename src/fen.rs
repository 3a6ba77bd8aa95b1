use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    iter::{Peekable, once, repeat},
    str::FromStr,
};

use crate::{
    board::{Board, InvalidPosition},
    castling_right::InvalidCastlingCharacter,
    color::ParseColorError,
    piece::{ParsePieceKindError, Piece},
    square::ParseSquareError,
};

/// Forsyth-Edwards notation of a [`Board`]. The move counters are accepted
/// on import and written as `0 1` on export.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fen(pub Board);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseFenError {
    NotEnoughSquaresOnRow,
    ExceedingSquaresOnRow,
    NotEnoughRows,
    ExceedingRows,
    UnexpectedEol,
    Unexpected(String),
    InvalidPiece(ParsePieceKindError),
    InvalidColor(ParseColorError),
    InvalidCastlingRight(InvalidCastlingCharacter),
    InvalidEnPassantTarget(ParseSquareError),
    InvalidCounter,
    InvalidPosition(InvalidPosition),
}
impl From<ParsePieceKindError> for ParseFenError {
    fn from(value: ParsePieceKindError) -> Self {
        ParseFenError::InvalidPiece(value)
    }
}
impl From<ParseColorError> for ParseFenError {
    fn from(value: ParseColorError) -> Self {
        ParseFenError::InvalidColor(value)
    }
}
impl From<InvalidCastlingCharacter> for ParseFenError {
    fn from(value: InvalidCastlingCharacter) -> Self {
        ParseFenError::InvalidCastlingRight(value)
    }
}
impl From<ParseSquareError> for ParseFenError {
    fn from(value: ParseSquareError) -> Self {
        ParseFenError::InvalidEnPassantTarget(value)
    }
}
impl From<InvalidPosition> for ParseFenError {
    fn from(value: InvalidPosition) -> Self {
        ParseFenError::InvalidPosition(value)
    }
}
impl Display for ParseFenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseFenError::NotEnoughSquaresOnRow => write!(f, "not enough squares on a row")?,
            ParseFenError::ExceedingSquaresOnRow => write!(f, "too many squares on a row")?,
            ParseFenError::NotEnoughRows => write!(f, "expected 8 rows")?,
            ParseFenError::ExceedingRows => write!(f, "found more than 8 rows")?,
            ParseFenError::UnexpectedEol => write!(f, "unexpected end of line")?,
            ParseFenError::Unexpected(text) => write!(f, "unexpected `{text}`")?,
            ParseFenError::InvalidPiece(err) => write!(f, "{err}")?,
            ParseFenError::InvalidColor(err) => write!(f, "{err}")?,
            ParseFenError::InvalidCastlingRight(err) => write!(f, "{err}")?,
            ParseFenError::InvalidEnPassantTarget(err) => write!(f, "{err}")?,
            ParseFenError::InvalidCounter => write!(f, "move counters must be numbers")?,
            ParseFenError::InvalidPosition(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseFenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseFenError::InvalidPiece(err) => Some(err),
            ParseFenError::InvalidColor(err) => Some(err),
            ParseFenError::InvalidCastlingRight(err) => Some(err),
            ParseFenError::InvalidEnPassantTarget(err) => Some(err),
            ParseFenError::InvalidPosition(err) => Some(err),
            _ => None,
        }
    }
}
fn parse_row(text: &str) -> Result<[Option<Piece>; 8], ParseFenError> {
    let mut row = [None; 8];
    let mut file: u8 = 0;
    for c in text.chars() {
        if let Some(space) = c.to_digit(10).filter(|space| (1..=8).contains(space)) {
            #[allow(clippy::cast_possible_truncation, reason = "digit is at most 8")]
            let space = space as u8;
            file += space;
            if file > 8 {
                return Err(ParseFenError::ExceedingSquaresOnRow);
            }
        } else {
            let cell = row
                .get_mut(file as usize)
                .ok_or(ParseFenError::ExceedingSquaresOnRow)?;
            *cell = Some(Piece::from_fen(c)?);
            file += 1;
        }
    }
    if file < 8 {
        return Err(ParseFenError::NotEnoughSquaresOnRow);
    }
    Ok(row)
}
impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let placement = fields.next().ok_or(ParseFenError::UnexpectedEol)?;

        let mut board = [[None; 8]; 8];
        let mut rows = placement.split('/');
        // FEN starts from rank 8
        for rank in board.iter_mut().rev() {
            *rank = parse_row(rows.next().ok_or(ParseFenError::NotEnoughRows)?)?;
        }
        if rows.next().is_some() {
            return Err(ParseFenError::ExceedingRows);
        }
        let active_player = fields.next().ok_or(ParseFenError::UnexpectedEol)?.parse()?;
        let castling_rights = fields.next().ok_or(ParseFenError::UnexpectedEol)?.parse()?;
        let en_passant_target = match fields.next().ok_or(ParseFenError::UnexpectedEol)? {
            "-" => None,
            square => Some(square.parse()?),
        };
        for counter in fields.by_ref().take(2) {
            counter
                .parse::<u32>()
                .map_err(|_| ParseFenError::InvalidCounter)?;
        }
        if let Some(text) = fields.next() {
            return Err(ParseFenError::Unexpected(text.to_owned()));
        }
        let board = Board::from_parts(board, active_player, castling_rights, en_passant_target)?;
        Ok(Fen(board))
    }
}
impl Display for Fen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let board = &self.0;
        for (row, first) in board.grid().iter().rev().zip(once(true).chain(repeat(false))) {
            if !first {
                write!(f, "/")?;
            }
            for token in Tokens(row.iter().copied().peekable()) {
                write!(f, "{token}")?;
            }
        }
        write!(f, " {}", board.active_player().lowercase())?;
        write!(f, " {}", board.castling_rights())?;
        if let Some(square) = board.en_passant_target() {
            write!(f, " {square}")?;
        } else {
            write!(f, " -")?;
        }
        write!(f, " 0 1")?;
        Ok(())
    }
}

/// One FEN token of a row: a piece letter or a run of empty squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Token {
    Piece(Piece),
    Gap(u8),
}
impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Piece(piece) => write!(f, "{}", piece.fen())?,
            Token::Gap(len) => write!(f, "{len}")?,
        }
        Ok(())
    }
}
struct Tokens<T>(Peekable<T>)
where
    T: Iterator;

impl<T> Iterator for Tokens<T>
where
    T: Iterator<Item = Option<Piece>>,
{
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let piece = self.0.next()?;
        if let Some(piece) = piece {
            return Some(Token::Piece(piece));
        }
        let mut len = 1;
        while self.0.next_if(Option::is_none).is_some() {
            len += 1;
        }
        Some(Token::Gap(len))
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::{Board, InvalidPosition},
        color::Color,
        fen::{Fen, ParseFenError},
        piece::{Piece, PieceKind},
        square,
    };

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn starting_position() {
        let fen = Fen(Board::starting_position()).to_string();
        assert_eq!(
            fen,
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
        let parsed: Fen = fen.parse().unwrap();
        assert_eq!(parsed.0, Board::starting_position());
    }
    #[test]
    fn export_matches_import() {
        let fen: Fen = KIWIPETE.parse().unwrap();
        assert_eq!(fen.to_string(), KIWIPETE);
        assert!(
            fen.0
                .piece_at(square!("e5"))
                .has_piece(Piece::new(Color::White, PieceKind::Knight))
        );
    }
    #[test]
    fn en_passant_target() {
        let fen: Fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"
            .parse()
            .unwrap();
        assert_eq!(fen.0.en_passant_target(), Some(square!("d6")));
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidPosition(
                InvalidPosition::InvalidEnPassantTarget
            ))
        );
    }
    #[test]
    fn counters_are_optional() {
        let fen: Fen = "4k3/8/8/8/8/8/8/4K3 b - -".parse().unwrap();
        assert_eq!(fen.0.active_player(), Color::Black);
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 b - - x 1".parse::<Fen>(),
            Err(ParseFenError::InvalidCounter)
        );
    }
    #[test]
    fn malformed() {
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K2 w - -".parse::<Fen>(),
            Err(ParseFenError::NotEnoughSquaresOnRow)
        );
        assert_eq!(
            "4k4/8/8/8/8/8/8/4K3 w - -".parse::<Fen>(),
            Err(ParseFenError::ExceedingSquaresOnRow)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/4K3 w - -".parse::<Fen>(),
            Err(ParseFenError::NotEnoughRows)
        );
        assert_eq!(
            "8/8/8/8/8/8/8/4K3 w - -".parse::<Fen>(),
            Err(ParseFenError::InvalidPosition(InvalidPosition::MissingKing(
                Color::Black
            )))
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra".parse::<Fen>(),
            Err(ParseFenError::Unexpected("extra".to_owned()))
        );
        assert_eq!(
            "4k3/4R3/8/8/8/8/8/4K3 w - -".parse::<Fen>(),
            Err(ParseFenError::InvalidPosition(
                InvalidPosition::NonPlayerInCheck
            ))
        );
    }
}
