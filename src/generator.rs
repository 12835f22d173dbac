use rand::prelude::*;
use rand::rngs::StdRng;

use crate::shape::{Kind, Piece};

// Uniform, independent piece draws with a single preview slot.
pub struct PieceGenerator {
    rng: StdRng,
    preview: Piece,
}

impl PieceGenerator {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let preview = Self::draw(&mut rng);
        PieceGenerator { rng, preview }
    }

    fn draw(rng: &mut StdRng) -> Piece {
        Piece::spawn(Kind::ALL[rng.random_range(0..Kind::ALL.len())])
    }

    pub fn preview(&self) -> &Piece {
        &self.preview
    }

    // Hand out the previewed piece and draw its successor.
    pub fn next(&mut self) -> Piece {
        let fresh = Self::draw(&mut self.rng);
        std::mem::replace(&mut self.preview, fresh)
    }

    // Replace the preview with a fresh draw.
    pub fn refresh(&mut self) {
        self.preview = Self::draw(&mut self.rng);
    }
}
