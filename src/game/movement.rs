use super::Game;

pub enum Move {
    Left,
    Right,
    Down,
    Rotate,
}

impl Game {
    // move tetromino if it does not hit anything; a blocked Down locks it in place
    pub fn try_move(&mut self, m: Move) -> bool {
        let (dx, dy) = match m {
            Move::Left => (-1, 0),
            Move::Right => (1, 0),
            Move::Down => (0, 1),
            Move::Rotate => {
                let rotated = self.active.shape.rotated();
                if self.board.collides(&self.active, 0, 0, Some(rotated)) {
                    return false;
                }
                self.active.shape = rotated;
                return true;
            }
        };

        if self.board.collides(&self.active, dx, dy, None) {
            if dy > 0 {
                self.lock_piece();
            }
            return false;
        }
        self.active.x += dx;
        self.active.y += dy;
        true
    }

    pub fn hard_drop(&mut self) {
        while self.try_move(Move::Down) {
            continue;
        }
    }
}
