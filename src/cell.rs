use std::fmt::Display;

use anyhow::Result;
use thiserror::Error;
use tracing::debug;

use crate::player::Player;
use crate::term::Console;

/// Why a line of input was rejected as a coordinate pair. Rejections are
/// always recovered by re-prompting; they never leave the input loop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordError {
    #[error("expected two coordinates, got {0} token(s)")]
    TokenCount(usize),
    #[error("{0:?} is not a non-negative integer")]
    NotANumber(String),
    #[error("coordinate {0} is outside the field")]
    OutOfRange(usize),
}

/// A position on the field plus its occupant, if any. The field's cells get
/// their coordinates at construction and keep them; only `filled_by`
/// changes, exactly once per game. A default cell at (0, 0) doubles as the
/// scratch target for coordinate input.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    x: usize,
    y: usize,
    filled_by: Option<Player>,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            filled_by: None,
        }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn filled_by(&self) -> Option<Player> {
        self.filled_by
    }

    /// Unvalidated write; the game checks occupancy before calling this.
    pub fn fill(&mut self, player: Player) {
        self.filled_by = Some(player);
    }

    /// Single-shot coordinate input. Reads one line (with an optional
    /// prompt) and accepts it only as exactly two space-separated
    /// non-negative integers below `field_size`, first token x, second y.
    /// On success overwrites this cell's coordinates and returns true; on
    /// rejection returns false and leaves the cell untouched.
    pub fn read(
        &mut self,
        console: &mut impl Console,
        prompt: Option<&str>,
        field_size: usize,
    ) -> Result<bool> {
        let line = console.read_line(prompt)?;
        match parse_coords(&line, field_size) {
            Ok((x, y)) => {
                self.x = x;
                self.y = y;
                Ok(true)
            }
            Err(err) => {
                debug!(%err, line, "rejected coordinate input");
                Ok(false)
            }
        }
    }

    /// Looped variant: retry the single-shot read, printing `err_msg` after
    /// each rejection, until a valid pair lands in the cell.
    pub fn read_looped(
        &mut self,
        console: &mut impl Console,
        prompt: Option<&str>,
        err_msg: Option<&str>,
        field_size: usize,
    ) -> Result<()> {
        loop {
            if self.read(console, prompt, field_size)? {
                return Ok(());
            }
            if let Some(msg) = err_msg {
                console.write_line(msg)?;
            }
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(x = {}, y = {})", self.x, self.y)
    }
}

fn parse_coords(line: &str, field_size: usize) -> Result<(usize, usize), CoordError> {
    // split on single spaces: doubled spaces produce empty tokens, which
    // fail the integer parse just like any other junk
    let tokens: Vec<&str> = line.split(' ').collect();
    if tokens.len() != 2 {
        return Err(CoordError::TokenCount(tokens.len()));
    }
    let mut coords = [0usize; 2];
    for (slot, token) in coords.iter_mut().zip(&tokens) {
        let value: usize = token
            .parse()
            .map_err(|_| CoordError::NotANumber(token.to_string()))?;
        if value >= field_size {
            return Err(CoordError::OutOfRange(value));
        }
        *slot = value;
    }
    Ok((coords[0], coords[1]))
}
