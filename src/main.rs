use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, poll, read};

mod board;
mod game;
mod game_loop;
mod generator;
mod input;
mod render;
mod scoring;
mod shape;

use crate::game::Game;
use crate::game_loop::{FRAME_PERIOD, FrameScheduler, GameLoop};
use crate::input::{TouchTracker, command_for_key};
use crate::render::TerminalRenderer;
use crate::scoring::Stats;

// how long to wait for input while no tick is pending (paused / game over)
const IDLE_POLL: Duration = Duration::from_millis(250);

fn runloop(game_loop: &mut GameLoop<FrameScheduler, TerminalRenderer>) -> Result<()> {
    let epoch = Instant::now();
    let mut touch = TouchTracker::default();
    game_loop.start()?;

    loop {
        let now = Instant::now();
        if game_loop.scheduler_mut().take_due(now) {
            game_loop.on_frame(millis_since(epoch))?;
            continue;
        }

        let timeout = game_loop.scheduler().time_until_due(now).unwrap_or(IDLE_POLL);
        if !poll(timeout)? {
            continue;
        }
        let command = match read()? {
            Event::Key(KeyEvent {
                code: KeyCode::Char('q') | KeyCode::Esc,
                kind: KeyEventKind::Press,
                ..
            }) => return Ok(()),
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => command_for_key(code),
            Event::Mouse(event) => touch.on_mouse(event, millis_since(epoch)),
            _ => None,
        };
        if let Some(command) = command {
            game_loop.on_command(command)?;
        }
    }
}

fn millis_since(epoch: Instant) -> u64 {
    epoch.elapsed().as_millis().try_into().unwrap_or(u64::MAX)
}

fn main() -> Result<()> {
    let mut game_loop = GameLoop::new(
        Game::default(),
        FrameScheduler::new(FRAME_PERIOD),
        TerminalRenderer::default(),
    );

    render::enter_terminal()?;
    let result = runloop(&mut game_loop);
    // always try to hand the terminal back, even when the loop failed
    let restored = render::leave_terminal();
    result?;
    restored?;

    let Stats {
        score,
        lines,
        level,
    } = *game_loop.game().stats();
    println!("Score: {score}; Lines: {lines}; Level: {level}");
    Ok(())
}
