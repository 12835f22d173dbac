// Points for clearing 0..=4 lines with a single lock, before the level multiplier.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];
pub const LINES_PER_LEVEL: u32 = 10;
pub const BASE_DROP_INTERVAL_MS: u64 = 1000;
pub const DROP_INTERVAL_STEP_MS: u64 = 100;
pub const MIN_DROP_INTERVAL_MS: u64 = 100;

pub fn line_score(cleared: u32, level: u32) -> u32 {
    LINE_SCORES[cleared.min(4) as usize] * level
}

pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

pub fn drop_interval_ms(level: u32) -> u64 {
    let faster = u64::from(level.saturating_sub(1)) * DROP_INTERVAL_STEP_MS;
    BASE_DROP_INTERVAL_MS
        .saturating_sub(faster)
        .max(MIN_DROP_INTERVAL_MS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
}

impl Default for Stats {
    fn default() -> Stats {
        Stats {
            score: 0,
            lines: 0,
            level: 1,
        }
    }
}

impl Stats {
    // Account for one lock that cleared `cleared` lines; returns the points awarded.
    // Points use the level the lock happened at, the level is recomputed afterwards.
    pub fn record_clear(&mut self, cleared: u32) -> u32 {
        if cleared == 0 {
            return 0;
        }
        let cleared = cleared.min(4);
        let points = line_score(cleared, self.level);
        self.score += points;
        self.lines += cleared;
        self.level = level_for_lines(self.lines);
        points
    }

    pub fn drop_interval_ms(&self) -> u64 {
        drop_interval_ms(self.level)
    }
}
