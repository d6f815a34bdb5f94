use crate::types::Shape;

/// Occupancy grid for one packing attempt.
///
/// `place` and `unplace` are exact inverses and must be called in pairs around
/// each placement the search tries.
#[derive(Debug, Clone)]
pub struct Region {
    width: usize,
    height: usize,
    occupied: Vec<bool>,
}

impl Region {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            occupied: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.index(x, y).is_some_and(|i| self.occupied[i])
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&o| o).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.occupied.iter().any(|&o| o)
    }

    /// True if every cell of `shape` shifted by `(x, y)` is inside the region and free.
    pub fn can_place(&self, shape: &Shape, x: usize, y: usize) -> bool {
        shape.cells().iter().all(|c| {
            self.index(x + c.x, y + c.y)
                .is_some_and(|i| !self.occupied[i])
        })
    }

    pub fn place(&mut self, shape: &Shape, x: usize, y: usize) {
        self.mark(shape, x, y, true);
    }

    pub fn unplace(&mut self, shape: &Shape, x: usize, y: usize) {
        self.mark(shape, x, y, false);
    }

    fn mark(&mut self, shape: &Shape, x: usize, y: usize, value: bool) {
        for c in shape.cells() {
            if let Some(i) = self.index(x + c.x, y + c.y) {
                debug_assert_ne!(self.occupied[i], value, "unpaired place/unplace");
                self.occupied[i] = value;
            }
        }
    }
}
