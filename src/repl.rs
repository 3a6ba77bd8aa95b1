use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    num::ParseIntError,
    str::FromStr,
};

use chess_rules::{
    board::Board,
    color::Color,
    fen::{Fen, ParseFenError},
    fuzz::fuzz,
    game::Game,
    movement::{Lan, ParseLanError},
    perft::perft_counts,
    square::Square,
};

use crate::{board_display::BoardDisplay, misc::strip_prefix_token};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Input {
    Help,
    Flip,
    Restart,
    Quit,
    Undo,
    Import(Fen),
    ExportFen,
    History,
    Replay(String),
    Perft(u32),
    Fuzz(u32),
    Square(Square),
    Move(Lan),
}
impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Help => write!(f, "help")?,
            Input::Flip => write!(f, "flip")?,
            Input::Restart => write!(f, "restart")?,
            Input::Quit => write!(f, "quit")?,
            Input::Undo => write!(f, "undo")?,
            Input::Import(fen) => write!(f, "import {fen}")?,
            Input::ExportFen => write!(f, "fen")?,
            Input::History => write!(f, "history")?,
            Input::Replay(transcript) => write!(f, "replay {transcript}")?,
            Input::Perft(depth) => write!(f, "perft {depth}")?,
            Input::Fuzz(games) => write!(f, "fuzz {games}")?,
            Input::Square(square) => write!(f, "{square}")?,
            Input::Move(movement) => write!(f, "{movement}")?,
        }
        Ok(())
    }
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "restart" => Ok(Input::Restart),
            "quit" => Ok(Input::Quit),
            "undo" => Ok(Input::Undo),
            "fen" => Ok(Input::ExportFen),
            "history" => Ok(Input::History),
            s => {
                if let Some(s) = strip_prefix_token(s, "import") {
                    Ok(Input::Import(s.parse()?))
                } else if let Some(s) = strip_prefix_token(s, "replay") {
                    Ok(Input::Replay(s.to_owned()))
                } else if let Some(s) = strip_prefix_token(s, "perft") {
                    Ok(Input::Perft(s.parse()?))
                } else if let Some(s) = strip_prefix_token(s, "fuzz") {
                    Ok(Input::Fuzz(s.parse()?))
                } else if let Ok(square) = s.parse() {
                    Ok(Input::Square(square))
                } else {
                    Ok(Input::Move(s.parse()?))
                }
            }
        }
    }
}
fn board_info(board: &Board) -> String {
    match board.end_state() {
        Some(end_state) => format!("{end_state}\n"),
        None if board.in_check(board.active_player()) => {
            format!("{} plays, in check\n", board.active_player())
        }
        None => format!("{} plays\n", board.active_player()),
    }
}
#[allow(
    clippy::too_many_lines,
    reason = "further decomposition could potentially hurt readability"
)]
pub fn repl() -> io::Result<()> {
    let input = stdin().lock();
    let mut output = stdout().lock();
    let mut error = stderr().lock();

    let mut lines = input.lines();

    let mut game = Game::new();
    let mut highlighted = Vec::new();
    let mut update = true;
    let mut view = Color::White;
    let mut first_time = true;
    loop {
        if update {
            let mut info = board_info(game.board());
            if first_time {
                info.push_str("type `help` for instructions\n");
                first_time = false;
            }
            writeln!(
                output,
                "{}",
                BoardDisplay {
                    board: game.board(),
                    view,
                    highlighted: &highlighted,
                    info: &info,
                },
            )?;
        }
        update = true;
        write!(output, "> ")?;
        output.flush()?;
        let Some(text) = lines.next().transpose()? else {
            return Ok(());
        };
        let input = match text.trim().parse() {
            Ok(input) => input,
            Err(err) => {
                writeln!(error, "Error: {err}")?;
                writeln!(error, "for available command, enter `help`")?;
                update = false;
                continue;
            }
        };
        match input {
            Input::Help => {
                writeln!(output, "flip             - flip the board")?;
                writeln!(output, "restart          - reset to starting position")?;
                writeln!(output, "quit             - quit the game")?;
                writeln!(output, "undo             - take back the last move")?;
                writeln!(output, "import <fen>     - import a position")?;
                writeln!(output, "fen              - export the position as fen")?;
                writeln!(output, "history          - print the moves played so far")?;
                writeln!(output, "replay <moves>   - play space separated moves")?;
                writeln!(output, "perft <depth>    - count positions up to a depth")?;
                writeln!(output, "fuzz <games>     - compare move generation with `chess`")?;
                writeln!(output, "e2               - view legal moves")?;
                writeln!(output, "e2e4             - play the move")?;
                writeln!(output, "e7e8q            - move and promote")?;
                writeln!(output, "e1g1             - perform castling")?;
                update = false;
            }
            Input::Flip => {
                view = !view;
            }
            Input::Restart => {
                game = Game::new();
                highlighted.clear();
            }
            Input::Quit => return Ok(()),
            Input::Undo => {
                if game.undo().is_none() {
                    writeln!(error, "Error: no move to take back")?;
                    update = false;
                }
                highlighted.clear();
            }
            Input::Import(fen) => {
                game = Game::from_board(fen.0);
                highlighted.clear();
            }
            Input::ExportFen => {
                writeln!(output, "{}", Fen(game.board().clone()))?;
                update = false;
            }
            Input::History => {
                writeln!(output, "{}", game.transcript())?;
                update = false;
            }
            Input::Replay(transcript) => {
                if let Err(err) = game.replay_moves(&transcript) {
                    writeln!(error, "Error: {err}")?;
                }
                highlighted.clear();
            }
            Input::Perft(depth) => {
                writeln!(output, "{}", perft_counts(game.board(), depth))?;
                update = false;
            }
            Input::Fuzz(games) => {
                match fuzz(games, rand::random()) {
                    Ok(positions) => writeln!(output, "{positions} positions agree")?,
                    Err(err) => writeln!(error, "Error: {err}")?,
                }
                update = false;
            }
            Input::Square(square) => {
                let board = game.board();
                let Some(piece) = board.piece_at(square).piece() else {
                    writeln!(error, "Error: No piece found on {square}")?;
                    update = false;
                    continue;
                };
                if piece.color != board.active_player() {
                    writeln!(error, "Error: It is {}'s turn", board.active_player())?;
                    update = false;
                    continue;
                }
                highlighted.clear();
                highlighted.extend(board.legal_moves(square).into_iter().map(|movement| movement.to()));
            }
            Input::Move(lan) => match game.play_lan(lan) {
                Ok(applied) => {
                    writeln!(output, "{applied}")?;
                    highlighted.clear();
                    highlighted.push(lan.origin);
                    highlighted.push(lan.destination);
                }
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    update = false;
                }
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseInputError {
    Fen(ParseFenError),
    Move(ParseLanError),
    Int(ParseIntError),
}
impl From<ParseFenError> for ParseInputError {
    fn from(value: ParseFenError) -> Self {
        ParseInputError::Fen(value)
    }
}
impl From<ParseLanError> for ParseInputError {
    fn from(value: ParseLanError) -> Self {
        ParseInputError::Move(value)
    }
}
impl From<ParseIntError> for ParseInputError {
    fn from(value: ParseIntError) -> Self {
        ParseInputError::Int(value)
    }
}
impl Display for ParseInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseInputError::Fen(err) => write!(f, "{err}")?,
            ParseInputError::Move(err) => write!(f, "{err}")?,
            ParseInputError::Int(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseInputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseInputError::Fen(err) => Some(err),
            ParseInputError::Move(err) => Some(err),
            ParseInputError::Int(err) => Some(err),
        }
    }
}
