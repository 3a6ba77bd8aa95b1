use std::fmt::{self, Display, Formatter};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndState {
    /// The contained color is mated.
    Checkmate(Color),
    Stalemate,
}
impl EndState {
    pub fn winner(self) -> Option<Color> {
        match self {
            EndState::Checkmate(color) => Some(!color),
            EndState::Stalemate => None,
        }
    }
}
impl Display for EndState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EndState::Checkmate(color) => write!(f, "{color} is checkmated, {} wins", !*color)?,
            EndState::Stalemate => write!(f, "stalemate, draw")?,
        }
        Ok(())
    }
}
