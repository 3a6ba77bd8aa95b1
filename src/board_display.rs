use std::fmt::{self, Display, Formatter};

use chess_rules::{board::Board, color::Color, piece::Piece, square::Square};

const LIGHT: &str = "\x1b[30;107m";
const DARK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const CHECKED: &str = "\x1b[30;101m";
const RESET: &str = "\x1b[0m";

/// Renders the board with figurines, `info` lines are printed beside it.
pub struct BoardDisplay<'a> {
    pub board: &'a Board,
    pub view: Color,
    pub highlighted: &'a [Square],
    pub info: &'a str,
}
impl Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        let checked: Vec<_> = Color::ALL
            .into_iter()
            .filter(|color| self.board.in_check(*color))
            .filter_map(|color| self.board.king(color))
            .collect();
        for row in 0..8 {
            let rank = match self.view {
                Color::White => 7 - row,
                Color::Black => row,
            };
            for column in 0..8 {
                let file = match self.view {
                    Color::White => column,
                    Color::Black => 7 - column,
                };
                let square = Square::new(file, rank);
                let background = if self.highlighted.contains(&square) {
                    HIGHLIGHTED
                } else if checked.contains(&square) {
                    CHECKED
                } else {
                    match square.color() {
                        Color::White => LIGHT,
                        Color::Black => DARK,
                    }
                };
                let figurine = self
                    .board
                    .piece_at(square)
                    .piece()
                    .map_or(' ', Piece::figurine);
                write!(f, "{background}{figurine} {RESET}")?;
            }
            write!(f, "{}", rank + 1)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.view {
            Color::White => write!(f, "a b c d e f g h")?,
            Color::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use chess_rules::{board::Board, color::Color, square::Square};

    use crate::board_display::BoardDisplay;

    fn plain(text: &str) -> String {
        let mut plain = String::new();
        let mut escape = false;
        for c in text.chars() {
            match c {
                '\x1b' => escape = true,
                'm' if escape => escape = false,
                c if !escape => plain.push(c),
                _ => (),
            }
        }
        plain
    }
    #[test]
    fn white_view_has_rank_8_on_top() {
        let board = Board::starting_position();
        let text = BoardDisplay {
            board: &board,
            view: Color::White,
            highlighted: &[],
            info: "white plays",
        }
        .to_string();
        let text = plain(&text);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8 white plays"));
        assert_eq!(lines.last(), Some("a b c d e f g h"));
    }
    #[test]
    fn black_view_is_flipped() {
        let board = Board::starting_position();
        let highlighted = [Square::new(4, 3)];
        let text = BoardDisplay {
            board: &board,
            view: Color::Black,
            highlighted: &highlighted,
            info: "",
        }
        .to_string();
        let text = plain(&text);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("♖ ♘ ♗ ♔ ♕ ♗ ♘ ♖ 1"));
        assert_eq!(lines.last(), Some("h g f e d c b a"));
    }
}
