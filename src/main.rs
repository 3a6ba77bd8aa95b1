#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::io;

mod board_display;
mod misc;
mod repl;

fn main() -> io::Result<()> {
    repl::repl()
}
