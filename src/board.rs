use crate::shape::{Kind, Piece, Shape};

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Locked cells, row 0 at the top. Indexing outside the grid panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [[Option<Kind>; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Board {
        Board {
            rows: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }
}

impl Board {
    pub fn cell_at(&self, row: usize, col: usize) -> Option<Kind> {
        self.rows[row][col]
    }

    pub fn set_cell(&mut self, row: usize, col: usize, kind: Kind) {
        self.rows[row][col] = Some(kind)
    }

    pub fn is_row_complete(&self, row: usize) -> bool {
        self.rows[row].iter().all(|v| v.is_some())
    }

    // drop everything above `row` by one and open an empty row at the top
    pub fn clear_row(&mut self, row: usize) {
        for i in (0..row).rev() {
            self.rows[i + 1] = self.rows[i];
        }
        self.rows[0].fill(None);
    }

    pub fn reset(&mut self) {
        for row in self.rows.iter_mut() {
            row.fill(None);
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_none())
    }

    // Would `piece`, shifted by (`dx`, `dy`) and optionally given `shape` instead of its
    // own, leave the side walls, pass the floor, or overlap a locked cell?
    // Cells above the top edge only have to stay between the walls.
    pub fn collides(&self, piece: &Piece, dx: i32, dy: i32, shape: Option<Shape>) -> bool {
        let shape = shape.unwrap_or(piece.shape);
        shape.cells().into_iter().any(|(r, c)| {
            let row = piece.y + r as i32 + dy;
            let col = piece.x + c as i32 + dx;
            if col < 0 || col >= BOARD_WIDTH as i32 || row >= BOARD_HEIGHT as i32 {
                return true;
            }
            row >= 0 && self.rows[row as usize][col as usize].is_some()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, row: usize, kind: Kind) {
        for col in 0..BOARD_WIDTH {
            board.set_cell(row, col, kind);
        }
    }

    fn patterned() -> Board {
        let mut board = Board::default();
        for row in 5..BOARD_HEIGHT {
            for col in 0..BOARD_WIDTH {
                if (row + col) % 3 != 0 {
                    board.set_cell(row, col, Kind::ALL[(row + col) % 7]);
                }
            }
        }
        board
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::default();
        assert!(board.is_empty());
        assert_eq!(board.cell_at(BOARD_HEIGHT - 1, BOARD_WIDTH - 1), None);
    }

    #[test]
    fn set_and_get() {
        let mut board = Board::default();
        board.set_cell(10, 5, Kind::T);
        assert_eq!(board.cell_at(10, 5), Some(Kind::T));
        assert_eq!(board.cell_at(10, 4), None);
    }

    #[test]
    #[should_panic]
    fn out_of_range_row_panics() {
        Board::default().cell_at(BOARD_HEIGHT, 0);
    }

    #[test]
    #[should_panic]
    fn out_of_range_col_panics() {
        Board::default().set_cell(0, BOARD_WIDTH, Kind::I);
    }

    #[test]
    fn row_completeness() {
        let mut board = Board::default();
        for col in 1..BOARD_WIDTH {
            board.set_cell(19, col, Kind::S);
        }
        assert!(!board.is_row_complete(19));
        board.set_cell(19, 0, Kind::J);
        assert!(board.is_row_complete(19));
        assert!(!board.is_row_complete(18));
    }

    #[test]
    fn clear_row_shifts_rows_above_and_keeps_rows_below() {
        for cleared in [0, 7, 12, BOARD_HEIGHT - 1] {
            let before = patterned();
            let mut board = before.clone();
            board.clear_row(cleared);

            for col in 0..BOARD_WIDTH {
                assert_eq!(board.cell_at(0, col), None);
            }
            for row in cleared + 1..BOARD_HEIGHT {
                for col in 0..BOARD_WIDTH {
                    assert_eq!(board.cell_at(row, col), before.cell_at(row, col));
                }
            }
            for row in 1..=cleared {
                for col in 0..BOARD_WIDTH {
                    assert_eq!(board.cell_at(row, col), before.cell_at(row - 1, col));
                }
            }
        }
    }

    #[test]
    fn reset_empties_everything() {
        let mut board = patterned();
        fill_row(&mut board, 0, Kind::Z);
        board.reset();
        assert!(board.is_empty());
    }

    #[test]
    fn collides_with_walls_and_floor_in_every_orientation() {
        let board = Board::default();
        for kind in Kind::ALL {
            let mut piece = Piece::spawn(kind);
            for _ in 0..4 {
                let cells: Vec<_> = piece.cells().collect();
                let min_col = cells.iter().map(|&(_, c)| c).min().unwrap();
                let max_col = cells.iter().map(|&(_, c)| c).max().unwrap();
                let max_row = cells.iter().map(|&(r, _)| r).max().unwrap();

                assert!(!board.collides(&piece, 0, 0, None), "{kind:?}");
                assert!(board.collides(&piece, -min_col - 1, 0, None), "{kind:?}");
                assert!(!board.collides(&piece, -min_col, 0, None), "{kind:?}");
                assert!(board.collides(&piece, BOARD_WIDTH as i32 - max_col, 0, None));
                assert!(!board.collides(&piece, BOARD_WIDTH as i32 - 1 - max_col, 0, None));
                assert!(board.collides(&piece, 0, BOARD_HEIGHT as i32 - max_row, None));
                assert!(!board.collides(&piece, 0, BOARD_HEIGHT as i32 - 1 - max_row, None));

                piece.shape = piece.shape.rotated();
            }
        }
    }

    #[test]
    fn cells_above_the_top_never_collide() {
        let mut board = Board::default();
        fill_row(&mut board, 0, Kind::L);
        let mut piece = Piece::spawn(Kind::O);
        piece.y = -2;
        assert!(!board.collides(&piece, 0, 0, None));
        assert!(board.collides(&piece, 0, 1, None));
        // still bounded by the walls up there
        assert!(board.collides(&piece, -5, 0, None));
    }

    #[test]
    fn collides_with_locked_cells() {
        let mut board = Board::default();
        board.set_cell(2, 4, Kind::I);
        let piece = Piece::spawn(Kind::T);
        // T occupies (1,3) (1,4) (1,5) at spawn
        assert!(!board.collides(&piece, 0, 0, None));
        assert!(board.collides(&piece, 0, 1, None));
        // the rotated T reaches down into (2,4)
        assert!(board.collides(&piece, 0, 0, Some(piece.shape.rotated())));
    }
}
