use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// A single occupied cell of a shape, relative to the shape's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("shape {0} has no cells")]
    Empty(usize),
}

/// A polyomino with its cells normalized so the bounding box starts at (0, 0).
///
/// The cell list is kept sorted, so two shapes covering the same cells compare
/// equal no matter how they were produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    pub index: usize,
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Shape {
    pub fn new(index: usize, cells: impl IntoIterator<Item = Cell>) -> Result<Self, ShapeError> {
        let mut cells: Vec<Cell> = cells.into_iter().collect();
        if cells.is_empty() {
            return Err(ShapeError::Empty(index));
        }

        let min_x = cells.iter().map(|c| c.x).min().unwrap_or(0);
        let min_y = cells.iter().map(|c| c.y).min().unwrap_or(0);
        for c in &mut cells {
            c.x -= min_x;
            c.y -= min_y;
        }
        cells.sort();
        cells.dedup();

        let width = cells.iter().map(|c| c.x + 1).max().unwrap_or(0);
        let height = cells.iter().map(|c| c.y + 1).max().unwrap_or(0);
        Ok(Self {
            index,
            cells,
            width,
            height,
        })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Quarter turn: `(x, y) -> (y, -x)`, shifted back into the positive quadrant.
    pub fn rotated(&self) -> Self {
        self.transformed(|c| Cell::new(c.y, self.width - 1 - c.x))
    }

    /// Mirror across the vertical axis.
    pub fn flipped(&self) -> Self {
        self.transformed(|c| Cell::new(self.width - 1 - c.x, c.y))
    }

    fn transformed(&self, f: impl Fn(&Cell) -> Cell) -> Self {
        // Both transforms map a non-empty cell set to a non-empty cell set.
        Self::new(self.index, self.cells.iter().map(f)).unwrap_or_else(|_| self.clone())
    }

    /// All distinct orientations under rotation and reflection, in discovery
    /// order starting with the shape itself. Symmetric shapes yield fewer than 8.
    pub fn orientations(&self) -> Vec<Shape> {
        let mut seen: HashSet<Vec<Cell>> = HashSet::new();
        let mut orientations = Vec::new();

        let mut current = self.clone();
        for _flip in 0..2 {
            for _rot in 0..4 {
                if seen.insert(current.cells.clone()) {
                    orientations.push(current.clone());
                }
                current = current.rotated();
            }
            current = current.flipped();
        }
        orientations
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rows = vec![vec!['.'; self.width]; self.height];
        for c in &self.cells {
            rows[c.y][c.x] = '#';
        }
        writeln!(f, "{}:", self.index)?;
        for row in rows {
            writeln!(f, "{}", row.into_iter().collect::<String>())?;
        }
        Ok(())
    }
}

/// A region line from the input: the rectangle and how many of each shape it must hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSpec {
    pub width: usize,
    pub height: usize,
    pub piece_counts: Vec<u32>,
}

impl RegionSpec {
    pub fn new(width: usize, height: usize, piece_counts: Vec<u32>) -> Self {
        Self {
            width,
            height,
            piece_counts,
        }
    }

    /// Cell count of the rectangle, saturating at `u64::MAX`.
    pub fn area(&self) -> u64 {
        (self.width as u64)
            .checked_mul(self.height as u64)
            .unwrap_or(u64::MAX)
    }
}

impl std::fmt::Display for RegionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}:", self.width, self.height)?;
        for c in &self.piece_counts {
            write!(f, " {}", c)?;
        }
        Ok(())
    }
}

/// One placed piece: which shape, which of its orientations, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub shape: usize,
    pub orientation: usize,
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every piece was placed.
    Feasible,
    /// The search tried every placement and found none.
    Exhausted,
    /// The pieces cover more cells than the region has.
    TooLarge,
    /// The time budget ran out before an answer was found.
    TimedOut,
    /// The region asks for a shape that was never defined.
    UnknownShape,
}

impl Outcome {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Outcome::Feasible)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionReport {
    pub width: usize,
    pub height: usize,
    pub piece_counts: Vec<u32>,
    pub outcome: Outcome,
    pub placements: Vec<Placement>,
    pub nodes: u64,
    pub elapsed_us: u64,
}

impl RegionReport {
    pub fn new(
        spec: &RegionSpec,
        outcome: Outcome,
        placements: Vec<Placement>,
        nodes: u64,
        elapsed: Duration,
    ) -> Self {
        Self {
            width: spec.width,
            height: spec.height,
            piece_counts: spec.piece_counts.clone(),
            outcome,
            placements,
            nodes,
            elapsed_us: elapsed.as_micros() as u64,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub regions: Vec<RegionReport>,
    pub feasible: usize,
}

impl Summary {
    pub fn new(regions: Vec<RegionReport>) -> Self {
        let feasible = regions.iter().filter(|r| r.outcome.is_feasible()).count();
        Self { regions, feasible }
    }

    pub fn timed_out(&self) -> usize {
        self.regions
            .iter()
            .filter(|r| r.outcome == Outcome::TimedOut)
            .count()
    }
}
