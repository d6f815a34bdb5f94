use std::cmp::Reverse;
use std::time::{Duration, Instant};

use crate::region::Region;
use crate::types::{Outcome, Placement, RegionReport, RegionSpec, Shape, Summary};

/// Per-region search budget used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// The deadline is only consulted once every this many search nodes.
const TIMEOUT_CHECK_INTERVAL: u64 = 64;

/// Result of one packing attempt.
#[derive(Debug, Clone)]
pub struct Packing {
    pub outcome: Outcome,
    pub placements: Vec<Placement>,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Shape catalog plus the search settings shared by every region.
pub struct Solver {
    orientations: Vec<Vec<Shape>>,
    sizes: Vec<usize>,
    timeout: Option<Duration>,
}

impl Solver {
    /// `timeout` of `None` searches every region to completion.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            orientations: Vec::new(),
            sizes: Vec::new(),
            timeout,
        }
    }

    pub fn with_shapes(shapes: &[Shape], timeout: Option<Duration>) -> Self {
        let mut solver = Self::new(timeout);
        for shape in shapes {
            solver.add_shape(shape);
        }
        solver
    }

    /// Registers `shape` under its index, replacing any earlier shape with the same index.
    pub fn add_shape(&mut self, shape: &Shape) {
        let idx = shape.index;
        if idx >= self.orientations.len() {
            self.orientations.resize(idx + 1, Vec::new());
            self.sizes.resize(idx + 1, 0);
        }
        if !self.orientations[idx].is_empty() {
            tracing::warn!(index = idx, "shape defined twice, keeping the later one");
        }
        self.orientations[idx] = shape.orientations();
        self.sizes[idx] = shape.cell_count();
    }

    pub fn has_shape(&self, index: usize) -> bool {
        self.orientations.get(index).is_some_and(|o| !o.is_empty())
    }

    pub fn orientations(&self, index: usize) -> &[Shape] {
        self.orientations.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn orientation(&self, index: usize, orientation: usize) -> Option<&Shape> {
        self.orientations(index).get(orientation)
    }

    fn size_of(&self, index: usize) -> usize {
        self.sizes.get(index).copied().unwrap_or(0)
    }

    /// Total cells covered by every piece the region asks for.
    pub fn required_cells(&self, spec: &RegionSpec) -> u64 {
        spec.piece_counts
            .iter()
            .enumerate()
            .map(|(i, &count)| (count as u64).saturating_mul(self.size_of(i) as u64))
            .fold(0, u64::saturating_add)
    }

    /// One shape index per required piece, largest shapes first.
    ///
    /// Placing big pieces first leaves them the fewest positions to try, so
    /// dead ends surface early. Ties keep shape-index order.
    pub fn expand_pieces(&self, spec: &RegionSpec) -> Vec<usize> {
        let mut pieces = Vec::new();
        for (i, &count) in spec.piece_counts.iter().enumerate() {
            if !self.has_shape(i) {
                continue;
            }
            for _ in 0..count {
                pieces.push(i);
            }
        }
        pieces.sort_by_key(|&i| Reverse(self.size_of(i)));
        pieces
    }

    pub fn can_fit(&self, spec: &RegionSpec) -> bool {
        self.pack(spec).outcome.is_feasible()
    }

    /// Decides whether every piece the region asks for fits without overlap.
    ///
    /// Counts past the highest defined shape index are ignored; a positive
    /// count for an undefined index below it makes the region infeasible.
    pub fn pack(&self, spec: &RegionSpec) -> Packing {
        let start = Instant::now();
        let done = |outcome, placements, nodes| Packing {
            outcome,
            placements,
            nodes,
            elapsed: start.elapsed(),
        };

        if let Some(missing) = spec
            .piece_counts
            .iter()
            .enumerate()
            .take(self.orientations.len())
            .find(|&(i, &count)| count > 0 && !self.has_shape(i))
            .map(|(i, _)| i)
        {
            tracing::warn!(region = %spec, shape = missing, "region needs an undefined shape");
            return done(Outcome::UnknownShape, Vec::new(), 0);
        }

        if self.required_cells(spec) > spec.area() {
            return done(Outcome::TooLarge, Vec::new(), 0);
        }

        let pieces = self.expand_pieces(spec);
        if pieces.is_empty() {
            return done(Outcome::Feasible, Vec::new(), 0);
        }

        let mut search = PackingSearch {
            catalog: &self.orientations,
            pieces: &pieces,
            region: Region::new(spec.width, spec.height),
            deadline: self.timeout.map(|t| start + t),
            nodes: 0,
            timed_out: false,
            placed: Vec::with_capacity(pieces.len()),
        };
        let found = search.solve(0);
        debug_assert!(search.region.is_empty(), "search left cells occupied");

        let outcome = if found {
            Outcome::Feasible
        } else if search.timed_out {
            tracing::trace!(region = %spec, nodes = search.nodes, "search timed out");
            Outcome::TimedOut
        } else {
            Outcome::Exhausted
        };
        let placements = if found { search.placed } else { Vec::new() };
        done(outcome, placements, search.nodes)
    }

    /// Packs every region in order and collects the per-region reports.
    pub fn solve_all(&self, regions: &[RegionSpec]) -> Summary {
        let reports = regions
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let packing = self.pack(spec);
                tracing::debug!(
                    region = i,
                    spec = %spec,
                    outcome = ?packing.outcome,
                    nodes = packing.nodes,
                    elapsed_us = packing.elapsed.as_micros() as u64,
                    "region packed"
                );
                RegionReport::new(
                    spec,
                    packing.outcome,
                    packing.placements,
                    packing.nodes,
                    packing.elapsed,
                )
            })
            .collect();
        Summary::new(reports)
    }
}

/// Depth-first backtracking over the ordered piece list of one region.
struct PackingSearch<'a> {
    catalog: &'a [Vec<Shape>],
    pieces: &'a [usize],
    region: Region,
    deadline: Option<Instant>,
    nodes: u64,
    timed_out: bool,
    placed: Vec<Placement>,
}

impl PackingSearch<'_> {
    fn deadline_passed(&self) -> bool {
        self.nodes % TIMEOUT_CHECK_INTERVAL == 0
            && self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn solve(&mut self, idx: usize) -> bool {
        if idx == self.pieces.len() {
            return true;
        }
        if self.deadline_passed() {
            self.timed_out = true;
            return false;
        }
        self.nodes += 1;

        let shape = self.pieces[idx];
        let catalog = self.catalog;
        let (width, height) = (self.region.width(), self.region.height());

        for (oi, orient) in catalog[shape].iter().enumerate() {
            if orient.width() > width || orient.height() > height {
                continue;
            }
            for y in 0..=height - orient.height() {
                for x in 0..=width - orient.width() {
                    if !self.region.can_place(orient, x, y) {
                        continue;
                    }

                    self.region.place(orient, x, y);
                    self.placed.push(Placement {
                        shape,
                        orientation: oi,
                        x,
                        y,
                    });
                    let found = self.solve(idx + 1);
                    self.region.unplace(orient, x, y);

                    if found {
                        return true;
                    }
                    self.placed.pop();
                    if self.timed_out {
                        return false;
                    }
                }
            }
        }
        false
    }
}
