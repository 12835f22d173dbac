use std::io::{Stdout, Write, stdout};

use anyhow::Result;
use crossterm::{
    QueueableCommand, cursor, event,
    style::{self, StyledContent, Stylize},
    terminal,
};

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, Board};
use crate::game::Status;
use crate::scoring::Stats;
use crate::shape::{Kind, Piece};

const PANEL_X: u16 = BOARD_WIDTH as u16 * 2 + 4;
const PREVIEW_Y: u16 = 4;
const STATS_Y: u16 = 11;

// Everything the game loop needs from a display.
pub trait Render {
    // Locked cells with the falling piece on top.
    fn draw_playfield(&mut self, board: &Board, active: &Piece) -> Result<()>;
    // The next piece inside a 4x4 area.
    fn draw_preview(&mut self, preview: &Piece) -> Result<()>;
    fn draw_stats(&mut self, stats: &Stats, status: Status) -> Result<()>;
    fn draw_game_over(&mut self, final_score: u32) -> Result<()>;
    // Push the queued frame out.
    fn present(&mut self) -> Result<()>;
}

pub fn enter_terminal() -> Result<()> {
    crossterm::queue!(
        stdout(),
        style::ResetColor,
        terminal::EnterAlternateScreen,
        terminal::Clear(terminal::ClearType::All),
        event::EnableMouseCapture,
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    terminal::enable_raw_mode()?;
    Ok(())
}

pub fn leave_terminal() -> Result<()> {
    crossterm::queue!(
        stdout(),
        style::ResetColor,
        terminal::Clear(terminal::ClearType::All),
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        cursor::MoveTo(0, 0)
    )?;
    stdout().flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

fn block(cell: Option<Kind>) -> StyledContent<&'static str> {
    match cell {
        None => "  ".white(),
        Some(Kind::I) => "  ".on_cyan(),
        Some(Kind::O) => "  ".on_yellow(),
        Some(Kind::T) => "  ".on_magenta(),
        Some(Kind::S) => "  ".on_green(),
        Some(Kind::Z) => "  ".on_red(),
        Some(Kind::J) => "  ".on_blue(),
        Some(Kind::L) => "  ".on_dark_yellow(),
    }
}

pub struct TerminalRenderer {
    stdout: Stdout,
    framed: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        TerminalRenderer {
            stdout: stdout(),
            framed: false,
        }
    }
}

impl TerminalRenderer {
    fn box_(&mut self, x: u16, y: u16, width: u16, height: u16) -> Result<()> {
        const TOP_LEFT: &str = "\u{250f}";
        const TOP_RIGHT: &str = "\u{2513}";
        const BOTTOM_LEFT: &str = "\u{2517}";
        const BOTTOM_RIGHT: &str = "\u{251b}";
        const VERTICAL: &str = "\u{2503}";
        const HORIZONTAL: &str = "\u{2501}";

        self.stdout
            .queue(cursor::MoveTo(x, y))?
            .queue(style::PrintStyledContent(TOP_LEFT.white()))?
            .queue(cursor::MoveTo(x + width, y))?
            .queue(style::PrintStyledContent(TOP_RIGHT.white()))?
            .queue(cursor::MoveTo(x, y + height))?
            .queue(style::PrintStyledContent(BOTTOM_LEFT.white()))?
            .queue(cursor::MoveTo(x + width, y + height))?
            .queue(style::PrintStyledContent(BOTTOM_RIGHT.white()))?;

        for i in 1..width {
            crossterm::queue!(
                self.stdout,
                cursor::MoveTo(x + i, y),
                style::PrintStyledContent(HORIZONTAL.white()),
                cursor::MoveTo(x + i, y + height),
                style::PrintStyledContent(HORIZONTAL.white())
            )?;
        }
        for i in 1..height {
            crossterm::queue!(
                self.stdout,
                cursor::MoveTo(x, y + i),
                style::PrintStyledContent(VERTICAL.white()),
                cursor::MoveTo(x + width, y + i),
                style::PrintStyledContent(VERTICAL.white())
            )?;
        }
        Ok(())
    }

    // frames and labels only need drawing once
    fn draw_frames(&mut self) -> Result<()> {
        if self.framed {
            return Ok(());
        }
        self.box_(0, 0, BOARD_WIDTH as u16 * 2 + 1, BOARD_HEIGHT as u16 + 1)?;
        self.box_(PANEL_X, PREVIEW_Y - 1, 9, 5)?;
        crossterm::queue!(
            self.stdout,
            cursor::MoveTo(PANEL_X, 1),
            style::PrintStyledContent("Blockfall".cyan().bold()),
            cursor::MoveTo(PANEL_X + 2, PREVIEW_Y - 1),
            style::PrintStyledContent("Next".yellow()),
            cursor::MoveTo(PANEL_X, STATS_Y + 6),
            style::PrintStyledContent("\u{2190}\u{2192} move  \u{2191} rotate".dark_grey()),
            cursor::MoveTo(PANEL_X, STATS_Y + 7),
            style::PrintStyledContent("\u{2193} soft  space hard drop".dark_grey()),
            cursor::MoveTo(PANEL_X, STATS_Y + 8),
            style::PrintStyledContent("p pause  r restart  q quit".dark_grey()),
        )?;
        self.framed = true;
        Ok(())
    }
}

impl Render for TerminalRenderer {
    fn draw_playfield(&mut self, board: &Board, active: &Piece) -> Result<()> {
        self.draw_frames()?;
        let mut cells = [[None; BOARD_WIDTH]; BOARD_HEIGHT];
        for (y, row) in cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = board.cell_at(y, x);
            }
        }
        for (y, x) in active.cells() {
            if (0..BOARD_HEIGHT as i32).contains(&y) && (0..BOARD_WIDTH as i32).contains(&x) {
                cells[y as usize][x as usize] = Some(active.kind);
            }
        }

        for (y, row) in cells.iter().enumerate() {
            crossterm::queue!(self.stdout, cursor::MoveTo(1, y as u16 + 1))?;
            for &cell in row {
                self.stdout.queue(style::PrintStyledContent(block(cell)))?;
            }
        }
        Ok(())
    }

    fn draw_preview(&mut self, preview: &Piece) -> Result<()> {
        let shape = preview.shape;
        for r in 0..4u8 {
            crossterm::queue!(self.stdout, cursor::MoveTo(PANEL_X + 1, PREVIEW_Y + r as u16))?;
            for c in 0..4u8 {
                let filled = r < shape.size() && c < shape.size() && shape.is_set(r, c);
                let cell = filled.then_some(preview.kind);
                self.stdout.queue(style::PrintStyledContent(block(cell)))?;
            }
        }
        Ok(())
    }

    fn draw_stats(&mut self, stats: &Stats, status: Status) -> Result<()> {
        let status_line = match status {
            Status::Running => "         ".white(),
            Status::Paused => "PAUSED   ".yellow().bold(),
            Status::GameOver => "GAME OVER".red().bold(),
        };
        crossterm::queue!(
            self.stdout,
            cursor::MoveTo(PANEL_X, STATS_Y),
            style::PrintStyledContent(format!("Score : {:<8}", stats.score).bold().white()),
            cursor::MoveTo(PANEL_X, STATS_Y + 1),
            style::PrintStyledContent(format!("Lines : {:<8}", stats.lines).bold().white()),
            cursor::MoveTo(PANEL_X, STATS_Y + 2),
            style::PrintStyledContent(format!("Level : {:<8}", stats.level).bold().white()),
            cursor::MoveTo(PANEL_X, STATS_Y + 3),
            style::PrintStyledContent(status_line),
            cursor::MoveTo(PANEL_X, STATS_Y + 4),
            terminal::Clear(terminal::ClearType::UntilNewLine),
        )?;
        Ok(())
    }

    fn draw_game_over(&mut self, final_score: u32) -> Result<()> {
        crossterm::queue!(
            self.stdout,
            cursor::MoveTo(PANEL_X, STATS_Y + 4),
            style::PrintStyledContent(format!("Final score {final_score}").red()),
        )?;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}
