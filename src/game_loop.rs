use std::time::{Duration, Instant};

use anyhow::Result;

use crate::game::{Game, Status};
use crate::input::Command;
use crate::render::Render;

pub const FRAME_PERIOD: Duration = Duration::from_millis(16);

// Cooperative single-shot tick source: at most one tick is pending at a time.
pub trait Scheduler {
    fn schedule_next_tick(&mut self);
    fn cancel_scheduled_tick(&mut self);
}

// Display-refresh style scheduler: a requested tick becomes due one frame period later.
pub struct FrameScheduler {
    period: Duration,
    due: Option<Instant>,
}

impl FrameScheduler {
    pub fn new(period: Duration) -> Self {
        FrameScheduler { period, due: None }
    }

    // How long until the pending tick is due, `None` when nothing is scheduled.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }

    // Consume the pending tick if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

impl Scheduler for FrameScheduler {
    fn schedule_next_tick(&mut self) {
        if self.due.is_none() {
            self.due = Some(Instant::now() + self.period);
        }
    }

    fn cancel_scheduled_tick(&mut self) {
        self.due = None;
    }
}

// Owns a session and drives it: ticks from the scheduler, commands from the player,
// and a full redraw after each of them.
pub struct GameLoop<S: Scheduler, R: Render> {
    game: Game,
    scheduler: S,
    renderer: R,
}

impl<S: Scheduler, R: Render> GameLoop<S, R> {
    pub fn new(game: Game, scheduler: S, renderer: R) -> Self {
        GameLoop {
            game,
            scheduler,
            renderer,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn start(&mut self) -> Result<()> {
        self.sync_schedule(true);
        self.redraw()
    }

    // A scheduled tick fired at `now_ms`.
    pub fn on_frame(&mut self, now_ms: u64) -> Result<()> {
        if !self.game.is_running() {
            return Ok(());
        }
        self.game.tick(now_ms);
        self.redraw()?;
        self.sync_schedule(false);
        Ok(())
    }

    // commands leave the pending tick alone unless the session changed state
    pub fn on_command(&mut self, command: Command) -> Result<()> {
        let before = self.game.status();
        if !self.game.apply(command) {
            return Ok(());
        }
        if before != self.game.status() || command == Command::Restart {
            self.sync_schedule(true);
        }
        self.redraw()
    }

    // keep exactly one tick pending while running, none otherwise
    fn sync_schedule(&mut self, resumed: bool) {
        if self.game.is_running() {
            if resumed {
                self.scheduler.cancel_scheduled_tick();
            }
            self.scheduler.schedule_next_tick();
        } else {
            self.scheduler.cancel_scheduled_tick();
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let game = &self.game;
        self.renderer.draw_playfield(game.board(), game.active())?;
        self.renderer.draw_preview(game.preview())?;
        self.renderer.draw_stats(game.stats(), game.status())?;
        if game.status() == Status::GameOver {
            self.renderer.draw_game_over(game.stats().score)?;
        }
        self.renderer.present()
    }
}
