use rand::prelude::*;

use crate::board::{BOARD_HEIGHT, Board};
use crate::generator::PieceGenerator;
use crate::scoring::Stats;
use crate::shape::Piece;

mod movement;

pub use movement::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Paused,
    GameOver,
}

// One play session: the board, the falling piece, the preview and the counters.
pub struct Game {
    pub(crate) board: Board,
    pub(crate) active: Piece, // falling tetromino
    generator: PieceGenerator,
    stats: Stats,
    status: Status,
    last_drop: Option<u64>, // timestamp (ms) the drop timer counts from
}

impl Default for Game {
    fn default() -> Game {
        Game::with_seed(rand::rng().random())
    }
}

impl Game {
    pub fn with_seed(seed: u64) -> Self {
        let mut generator = PieceGenerator::new(seed);
        let active = generator.next();
        Game {
            board: Board::default(),
            active,
            generator,
            stats: Stats::default(),
            status: Status::Running,
            last_drop: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn preview(&self) -> &Piece {
        self.generator.preview()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn drop_interval_ms(&self) -> u64 {
        self.stats.drop_interval_ms()
    }

    // Advance the clock to `now_ms`. Once more than a drop interval has passed since the
    // last drop the piece moves down a row, locking if it can't. Returns true if a drop
    // was attempted.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.status != Status::Running {
            return false;
        }
        let last = *self.last_drop.get_or_insert(now_ms);
        if now_ms.saturating_sub(last) > self.drop_interval_ms() {
            self.try_move(Move::Down);
            self.last_drop = Some(now_ms);
            return true;
        }
        false
    }

    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            Status::Running => Status::Paused,
            Status::Paused => {
                // the paused stretch must not count towards the next drop
                self.last_drop = None;
                Status::Running
            }
            Status::GameOver => Status::GameOver,
        };
    }

    pub fn restart(&mut self) {
        self.board.reset();
        self.stats = Stats::default();
        self.status = Status::Running;
        self.last_drop = None;
        self.generator.refresh();
        self.spawn();
    }

    // write the active piece into the board, then clear lines and bring in the next piece.
    // A piece still poking out above the board ends the game without touching the board.
    pub(crate) fn lock_piece(&mut self) {
        let piece = self.active;
        if piece.cells().any(|(row, _)| row < 0) {
            self.status = Status::GameOver;
            return;
        }
        for (row, col) in piece.cells() {
            self.board.set_cell(row as usize, col as usize, piece.kind);
        }
        let cleared = self.clear_lines();
        self.stats.record_clear(cleared);
        self.spawn();
    }

    // scan bottom-up, re-checking a row after clearing it since the row above moved in
    fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut row = BOARD_HEIGHT;
        while row > 0 {
            if self.board.is_row_complete(row - 1) {
                self.board.clear_row(row - 1);
                cleared += 1;
            } else {
                row -= 1;
            }
        }
        cleared
    }

    fn spawn(&mut self) {
        self.active = self.generator.next();
        if self.board.collides(&self.active, 0, 0, None) {
            self.status = Status::GameOver;
        }
    }
}
