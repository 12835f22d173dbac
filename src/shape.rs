// Tetrominos - packed into 16-bit numbers.
// Each shape lives in the top-left corner of a 4x4 block: row r is the nibble at bit 4*r,
// bit c of that nibble marks column c as occupied. `size` is the side of the square
// bit-grid the shape rotates in (2 for O, 4 for I, 3 for the rest).
const BLOCK: [(u8, u16); 7] = [
    (4, 0x00f0), // I
    (2, 0x0033), // O
    (3, 0x0072), // T
    (3, 0x0036), // S
    (3, 0x0063), // Z
    (3, 0x0071), // J
    (3, 0x0074), // L
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Kind {
    pub const ALL: [Kind; 7] = [
        Kind::I,
        Kind::O,
        Kind::T,
        Kind::S,
        Kind::Z,
        Kind::J,
        Kind::L,
    ];

    // Canonical (spawn) orientation.
    pub const fn shape(self) -> Shape {
        let (size, bits) = BLOCK[self as usize];
        Shape { size, bits }
    }

    // Column of the bit-grid's left edge at spawn, centering the piece on a 10-wide board.
    pub const fn spawn_x(self) -> i32 {
        match self {
            Kind::O => 4,
            _ => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    bits: u16,
}

impl Shape {
    pub const fn size(&self) -> u8 {
        self.size
    }

    pub const fn is_set(&self, row: u8, col: u8) -> bool {
        (self.bits >> (row * 4 + col) as u32) & 1 == 1
    }

    // rotate 90 degrees clockwise: row r of the result is column r read bottom-up
    pub const fn rotated(&self) -> Shape {
        let n = self.size;
        let mut bits = 0u16;
        let mut r = 0;
        while r < n {
            let mut c = 0;
            while c < n {
                if self.is_set(n - 1 - c, r) {
                    bits |= 1 << (r * 4 + c) as u32;
                }
                c += 1;
            }
            r += 1;
        }
        Shape { size: n, bits }
    }

    // every tetromino has 4 blocks on - return (row, col) of those four blocks
    pub const fn cells(&self) -> [(u8, u8); 4] {
        let mut a = [(0, 0); 4];
        let mut i = 0;
        let mut bit = 0;
        while bit < 16 && i < a.len() {
            if (self.bits >> bit) & 1 == 1 {
                a[i] = ((bit / 4) as u8, (bit % 4) as u8);
                i += 1;
            }
            bit += 1;
        }
        a
    }
}

// A tetromino with a position: the grid coordinates of its bit-grid's top-left corner.
// `y` may be negative while part of the piece is above the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: Kind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub const fn spawn(kind: Kind) -> Self {
        Piece {
            kind,
            shape: kind.shape(),
            x: kind.spawn_x(),
            y: 0,
        }
    }

    // Absolute (row, col) of the occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .into_iter()
            .map(|(r, c)| (self.y + r as i32, self.x + c as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(shape: Shape) -> Vec<Vec<bool>> {
        let n = shape.size();
        (0..n)
            .map(|r| (0..n).map(|c| shape.is_set(r, c)).collect())
            .collect()
    }

    #[test]
    fn catalog_matches_canonical_grids() {
        assert_eq!(
            grid(Kind::T.shape()),
            vec![
                vec![false, true, false],
                vec![true, true, true],
                vec![false, false, false],
            ]
        );
        assert_eq!(grid(Kind::O.shape()), vec![vec![true, true], vec![true, true]]);
        assert_eq!(grid(Kind::I.shape())[1], vec![true, true, true, true]);
        assert_eq!(
            grid(Kind::L.shape())[0..2],
            [vec![false, false, true], vec![true, true, true]]
        );
    }

    #[test]
    fn every_shape_has_four_cells_in_every_orientation() {
        for kind in Kind::ALL {
            let mut shape = kind.shape();
            for _ in 0..4 {
                let n = shape.size();
                let count = (0..n)
                    .flat_map(|r| (0..n).map(move |c| (r, c)))
                    .filter(|&(r, c)| shape.is_set(r, c))
                    .count();
                assert_eq!(count, 4, "{kind:?}");
                for (r, c) in shape.cells() {
                    assert!(shape.is_set(r, c));
                }
                shape = shape.rotated();
            }
        }
    }

    #[test]
    fn four_rotations_come_back_around() {
        for kind in Kind::ALL {
            let shape = kind.shape();
            let half = shape.rotated().rotated();
            assert_eq!(half.rotated().rotated(), shape, "{kind:?}");
        }
    }

    #[test]
    fn rotation_is_clockwise() {
        // T pointing up turns to point right
        assert_eq!(
            grid(Kind::T.shape().rotated()),
            vec![
                vec![false, true, false],
                vec![false, true, true],
                vec![false, true, false],
            ]
        );
        // horizontal I in row 1 becomes vertical I in column 2
        let i = Kind::I.shape().rotated();
        for r in 0..4 {
            assert!(i.is_set(r, 2));
        }
    }

    #[test]
    fn spawn_positions() {
        assert_eq!(Piece::spawn(Kind::O).x, 4);
        for kind in Kind::ALL.into_iter().filter(|&k| k != Kind::O) {
            let piece = Piece::spawn(kind);
            assert_eq!((piece.x, piece.y), (3, 0));
        }
    }

    #[test]
    fn piece_cells_are_absolute() {
        let mut piece = Piece::spawn(Kind::O);
        piece.y = 18;
        let mut cells: Vec<_> = piece.cells().collect();
        cells.sort();
        assert_eq!(cells, vec![(18, 4), (18, 5), (19, 4), (19, 5)]);
    }
}
