#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod board;
pub mod castling_right;
pub mod color;
pub mod end_state;
pub mod fen;
pub mod fuzz;
pub mod game;
pub mod movement;
pub mod perft;
pub mod piece;
pub mod square;
