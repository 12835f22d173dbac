use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

use crate::game::{Game, Move, Status};

// A press shorter than this rotates.
pub const TAP_MAX_MS: u64 = 200;
// A press longer than this hard-drops.
pub const LONG_PRESS_MIN_MS: u64 = 500;
// Terminal columns a drag has to cover to shift the piece (one board cell is two columns).
pub const DRAG_COLS: i32 = 2;
pub const DRAG_ROWS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    Restart,
}

pub fn command_for_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Down => Some(Command::SoftDrop),
        KeyCode::Up => Some(Command::Rotate),
        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        _ => None,
    }
}

impl Game {
    // Run a player command. Returns false when nothing happened: everything but restart
    // after game over, everything but the pause toggle while paused, and moves or rotations
    // that are blocked. A blocked soft drop still counts since it locks the piece.
    pub fn apply(&mut self, command: Command) -> bool {
        match (command, self.status()) {
            (Command::Restart, _) => {
                self.restart();
                true
            }
            (_, Status::GameOver) => false,
            (Command::TogglePause, _) => {
                self.toggle_pause();
                true
            }
            (_, Status::Paused) => false,
            (Command::MoveLeft, _) => self.try_move(Move::Left),
            (Command::MoveRight, _) => self.try_move(Move::Right),
            (Command::Rotate, _) => self.try_move(Move::Rotate),
            (Command::SoftDrop, _) => {
                self.try_move(Move::Down);
                true
            }
            (Command::HardDrop, _) => {
                self.hard_drop();
                true
            }
        }
    }
}

// Turns left-button press/drag/release sequences into commands, the way a touch screen
// would: drags shift or drop the piece, a quick tap rotates, a long press hard-drops.
#[derive(Debug, Default)]
pub struct TouchTracker {
    start: Option<Touch>,
}

#[derive(Debug)]
struct Touch {
    column: i32,
    row: i32,
    pressed_at: u64,
    dragged: bool,
}

impl TouchTracker {
    pub fn on_mouse(&mut self, event: MouseEvent, now_ms: u64) -> Option<Command> {
        let (column, row) = (i32::from(event.column), i32::from(event.row));
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.press(column, row, now_ms);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => self.drag(column, row),
            MouseEventKind::Up(MouseButton::Left) => self.release(now_ms),
            _ => None,
        }
    }

    pub fn press(&mut self, column: i32, row: i32, now_ms: u64) {
        self.start = Some(Touch {
            column,
            row,
            pressed_at: now_ms,
            dragged: false,
        });
    }

    pub fn drag(&mut self, column: i32, row: i32) -> Option<Command> {
        let touch = self.start.as_mut()?;
        let dx = column - touch.column;
        let dy = row - touch.row;
        let command = if dx.abs() >= DRAG_COLS {
            touch.column = column;
            Some(if dx > 0 {
                Command::MoveRight
            } else {
                Command::MoveLeft
            })
        } else if dy.abs() >= DRAG_ROWS {
            touch.row = row;
            Some(if dy > 0 {
                Command::SoftDrop
            } else {
                Command::Rotate
            })
        } else {
            None
        };
        touch.dragged |= command.is_some();
        command
    }

    pub fn release(&mut self, now_ms: u64) -> Option<Command> {
        let touch = self.start.take()?;
        if touch.dragged {
            return None;
        }
        let held = now_ms.saturating_sub(touch.pressed_at);
        if held < TAP_MAX_MS {
            Some(Command::Rotate)
        } else if held > LONG_PRESS_MIN_MS {
            Some(Command::HardDrop)
        } else {
            None
        }
    }
}
