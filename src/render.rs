use crate::solver::Solver;
use crate::types::Placement;

const LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Draws a packed region: `.` for free cells, one letter per placed piece.
///
/// Labels cycle once more than 52 pieces are placed.
pub fn render_region(
    width: usize,
    height: usize,
    placements: &[Placement],
    solver: &Solver,
) -> String {
    if width == 0 || height == 0 {
        return String::new();
    }

    let mut grid = vec![vec!['.'; width]; height];
    for (i, p) in placements.iter().enumerate() {
        let Some(orient) = solver.orientation(p.shape, p.orientation) else {
            continue;
        };
        let label = LABELS[i % LABELS.len()] as char;
        for c in orient.cells() {
            let (x, y) = (p.x + c.x, p.y + c.y);
            if x < width && y < height {
                grid[y][x] = label;
            }
        }
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(&line);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, RegionSpec, Shape};

    #[test]
    fn test_render_packed_region() {
        let bar = Shape::new(0, [Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]).unwrap();
        let solver = Solver::with_shapes(&[bar], None);
        let spec = RegionSpec::new(3, 3, vec![2]);
        let packing = solver.pack(&spec);
        assert!(packing.outcome.is_feasible());

        let output = render_region(spec.width, spec.height, &packing.placements, &solver);
        assert_eq!(output.lines().count(), 3);
        assert_eq!(output.chars().filter(|&c| c == 'A').count(), 3);
        assert_eq!(output.chars().filter(|&c| c == 'B').count(), 3);
        assert_eq!(output.chars().filter(|&c| c == '.').count(), 3);
    }

    #[test]
    fn test_render_exact_layout() {
        let single = Shape::new(0, [Cell::new(0, 0)]).unwrap();
        let solver = Solver::with_shapes(&[single], None);
        let placements = [
            Placement { shape: 0, orientation: 0, x: 1, y: 0 },
            Placement { shape: 0, orientation: 0, x: 0, y: 1 },
        ];
        assert_eq!(render_region(2, 2, &placements, &solver), ".A\nB.\n");
    }

    #[test]
    fn test_render_empty() {
        let solver = Solver::new(None);
        assert_eq!(render_region(3, 1, &[], &solver), "...\n");
        assert_eq!(render_region(0, 4, &[], &solver), "");
    }
}
