use std::fmt::Display;

use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::cell::Cell;
use crate::player::Player;
use crate::term::Console;

pub const FIELD_SIZE: usize = 3;

const WIN_COMBINATION_COUNT: usize = 2 * FIELD_SIZE + 2;

/// The orchestrator: owns the field, the win-combination table, both
/// players, and the derived flags, and drives the turn loop from `start`
/// to a win or a draw. A finished game is thrown away; restarting means
/// constructing a fresh one.
pub struct Game {
    field: [[Cell; FIELD_SIZE]; FIELD_SIZE],
    win_combinations: [[(usize, usize); FIELD_SIZE]; WIN_COMBINATION_COUNT],
    players: [Player; 2],
    active_player: Option<usize>,
    filled_cells: usize,
    started: bool,
    win: bool,
    draw: bool,
}

impl Game {
    pub fn new() -> Self {
        let field = std::array::from_fn(|x| std::array::from_fn(|y| Cell::new(x, y)));
        let win_combinations = [
            // columns
            [(0, 0), (0, 1), (0, 2)],
            [(1, 0), (1, 1), (1, 2)],
            [(2, 0), (2, 1), (2, 2)],
            // rows
            [(0, 0), (1, 0), (2, 0)],
            [(0, 1), (1, 1), (2, 1)],
            [(0, 2), (1, 2), (2, 2)],
            // diagonals
            [(0, 0), (1, 1), (2, 2)],
            [(2, 0), (1, 1), (0, 2)],
        ];
        Self {
            field,
            win_combinations,
            players: [Player::new("Cross", 'x'), Player::new("Zero", 'o')],
            active_player: None,
            filled_cells: 0,
            started: false,
            win: false,
            draw: false,
        }
    }

    pub fn active_player(&self) -> Option<&Player> {
        self.active_player.map(|id| &self.players[id])
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_win(&self) -> bool {
        self.win
    }

    pub fn is_draw(&self) -> bool {
        self.draw
    }

    pub fn filled_cells(&self) -> usize {
        self.filled_cells
    }

    pub fn status(&self) -> String {
        match self.active_player() {
            None => "Game isn't started".to_string(),
            Some(player) if self.win => format!("{} is winner!", player.name()),
            Some(_) if self.draw => "Draw!".to_string(),
            Some(player) => format!("{}'s turn", player.name()),
        }
    }

    /// Activate the game and run the turn loop to completion. Blocks on
    /// the console until a win or a draw; the only error path out is the
    /// console itself failing (closed input included).
    pub fn start(&mut self, console: &mut impl Console) -> Result<()> {
        self.active_player = Some(0);
        self.started = true;
        self.game_loop(console)
    }

    fn game_loop(&mut self, console: &mut impl Console) -> Result<()> {
        loop {
            console.write_line(&self.to_string())?;
            let (x, y) = self.input_turn(console)?;
            let Some(mover) = self.active_player().copied() else {
                bail!("turn loop running without an active player");
            };
            self.field[x][y].fill(mover);
            self.filled_cells += 1;
            self.update_statuses();
            debug!(x, y, player = %mover, filled = self.filled_cells, "cell filled");
            console.write_line("")?;
            if self.win || self.draw {
                info!(status = %self.status(), "game concluded");
                console.write_line(&self.to_string())?;
                console.write_line("")?;
                return Ok(());
            }
            self.switch_active_player();
        }
    }

    /// Request a move: looped coordinate input, then the occupancy check on
    /// top of it. An occupied cell restarts the whole request.
    fn input_turn(&self, console: &mut impl Console) -> Result<(usize, usize)> {
        let mut entered = Cell::default();
        loop {
            entered.read_looped(
                console,
                Some("Enter X and Y via space: "),
                Some("Error! Try again!"),
                FIELD_SIZE,
            )?;
            let chosen = &self.field[entered.x()][entered.y()];
            if chosen.filled_by().is_none() {
                return Ok((entered.x(), entered.y()));
            }
            console.write_line(&format!("Cell {chosen} is already filled! Try again!"))?;
        }
    }

    /// Recompute `win`/`draw` from scratch. Only the active player's lines
    /// are scanned: nobody else can have completed one on this move.
    fn update_statuses(&mut self) {
        self.win = false;
        self.draw = false;
        if !self.started {
            return;
        }
        let Some(active) = self.active_player().copied() else {
            return;
        };
        for combination in self.win_combinations {
            if combination
                .iter()
                .all(|&(x, y)| self.field[x][y].filled_by() == Some(active))
            {
                self.win = true;
                return;
            }
        }
        if self.filled_cells == FIELD_SIZE * FIELD_SIZE {
            self.draw = true;
        }
    }

    fn switch_active_player(&mut self) {
        if let Some(id) = self.active_player {
            self.active_player = Some((id + 1) % self.players.len());
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let separator = "+-".repeat(FIELD_SIZE) + "+";
        writeln!(f, "{separator}")?;
        // y is the printed row, x the printed column
        for y in 0..FIELD_SIZE {
            write!(f, "|")?;
            for x in 0..FIELD_SIZE {
                match self.field[x][y].filled_by() {
                    Some(player) => write!(f, "{player}|")?,
                    None => write!(f, " |")?,
                }
            }
            writeln!(f)?;
            writeln!(f, "{separator}")?;
        }
        write!(f, "{}", self.status())
    }
}
