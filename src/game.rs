use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{
    board::{Board, IllegalMove, MoveApplied},
    end_state::EndState,
    movement::{Lan, Move, ParseLanError},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReplayErrorKind {
    Parse(ParseLanError),
    Illegal(IllegalMove),
}
/// A transcript that could not be replayed, `ply` counts from 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReplayError {
    pub ply: usize,
    pub kind: ReplayErrorKind,
}
impl Display for ReplayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ply {}: ", self.ply)?;
        match &self.kind {
            ReplayErrorKind::Parse(err) => write!(f, "{err}")?,
            ReplayErrorKind::Illegal(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ReplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ReplayErrorKind::Parse(err) => Some(err),
            ReplayErrorKind::Illegal(err) => Some(err),
        }
    }
}

/// The position a game started from plus every move applied since, the
/// board is always the result of playing the history on the initial board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Game {
    initial: Board,
    board: Board,
    history: Vec<Move>,
}
impl Game {
    pub fn new() -> Self {
        Game::from_board(Board::starting_position())
    }
    pub fn from_board(board: Board) -> Self {
        Game {
            initial: board.clone(),
            board,
            history: Vec::new(),
        }
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn initial_board(&self) -> &Board {
        &self.initial
    }
    pub fn history(&self) -> &[Move] {
        &self.history
    }
    pub fn end_state(&self) -> Option<EndState> {
        self.board.end_state()
    }
    pub fn play(&mut self, movement: Move) -> Result<MoveApplied, IllegalMove> {
        let applied = self.board.apply_move(movement)?;
        self.history.push(movement);
        Ok(applied)
    }
    pub fn play_lan(&mut self, lan: Lan) -> Result<MoveApplied, IllegalMove> {
        let movement = self.board.resolve(lan)?;
        self.play(movement)
    }
    /// Takes back the last move by replaying the rest of the history.
    pub fn undo(&mut self) -> Option<Move> {
        let movement = self.history.pop()?;
        let mut board = self.initial_board().clone();
        for movement in &self.history {
            board = board.play_move(*movement);
        }
        self.board = board;
        Some(movement)
    }
    pub fn transcript(&self) -> Transcript<'_> {
        Transcript(&self.history)
    }
    /// Plays a space separated list of long algebraic moves from the standard
    /// starting position.
    pub fn replay(transcript: &str) -> Result<Self, ReplayError> {
        let mut game = Game::new();
        game.replay_moves(transcript)?;
        Ok(game)
    }
    /// Plays every move of `transcript` in order. On error the moves before
    /// the failing one stay applied.
    pub fn replay_moves(&mut self, transcript: &str) -> Result<(), ReplayError> {
        for text in transcript.split_whitespace() {
            let ply = self.history.len() + 1;
            let lan = text.parse().map_err(|err| ReplayError {
                ply,
                kind: ReplayErrorKind::Parse(err),
            })?;
            self.play_lan(lan).map_err(|err| ReplayError {
                ply,
                kind: ReplayErrorKind::Illegal(err),
            })?;
        }
        Ok(())
    }
}
impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

pub struct Transcript<'a>(&'a [Move]);

impl Display for Transcript<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, movement) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", movement.lan())?;
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        end_state::EndState,
        fen::Fen,
        game::{Game, ReplayError, ReplayErrorKind},
        movement::Move,
        square,
    };

    #[test]
    fn transcript_replays_to_same_board() {
        let mut game = Game::new();
        for lan in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"] {
            game.play_lan(lan.parse().unwrap()).unwrap();
        }
        let transcript = game.transcript().to_string();
        assert_eq!(transcript, "e2e4 e7e5 g1f3 b8c6 f1c4 g8f6 e1g1");
        let replayed = Game::replay(&transcript).unwrap();
        assert_eq!(replayed.board(), game.board());
        assert_eq!(replayed.history(), game.history());
    }
    #[test]
    fn scholars_mate() {
        let game = Game::replay("e2e4 e7e5 f1c4 b8c6 d1h5 g8f6 h5f7").unwrap();
        assert_eq!(game.end_state(), Some(EndState::Checkmate(Color::Black)));
        assert_eq!(
            game.end_state().and_then(EndState::winner),
            Some(Color::White)
        );
    }
    #[test]
    fn replay_reports_failing_ply() {
        assert_eq!(
            Game::replay("e2e4 e7e5 e4e5"),
            Err(ReplayError {
                ply: 3,
                kind: ReplayErrorKind::Illegal(crate::board::IllegalMove(
                    "e4e5".parse().unwrap()
                )),
            })
        );
        assert!(matches!(
            Game::replay("e2e4 x"),
            Err(ReplayError {
                ply: 2,
                kind: ReplayErrorKind::Parse(_)
            })
        ));
    }
    #[test]
    fn illegal_move_is_not_recorded() {
        let mut game = Game::new();
        assert!(
            game.play(Move::new(square!("e2"), square!("e5")))
                .is_err()
        );
        assert!(game.history().is_empty());
        assert_eq!(game.board(), &Board::starting_position());
    }
    #[test]
    fn undo() {
        let mut game = Game::replay("e2e4 d7d5 e4d5").unwrap();
        assert_eq!(
            game.undo(),
            Some(Move::new(square!("e4"), square!("d5")))
        );
        assert_eq!(game.board(), Game::replay("e2e4 d7d5").unwrap().board());
        assert_eq!(game.board().en_passant_target(), Some(square!("d6")));
        game.undo();
        game.undo();
        assert_eq!(game.undo(), None);
        assert_eq!(game.board(), &Board::starting_position());
    }
    #[test]
    fn from_position() {
        let fen: Fen = "4k3/8/8/8/8/8/4p3/K7 b - - 0 1".parse().unwrap();
        let mut game = Game::from_board(fen.0.clone());
        game.replay_moves("e2e1q").unwrap();
        assert_eq!(game.transcript().to_string(), "e2e1q");
        assert_eq!(game.initial_board(), &fen.0);
        assert_eq!(game.board().active_player(), Color::White);
        assert!(game.board().white_in_check());
    }
}
