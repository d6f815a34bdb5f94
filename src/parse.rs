//! Reader for the puzzle input: numbered `#`/`.` shape blocks followed by
//! `WxH: c0 c1 ...` region lines.
//!
//! Parsing is best effort. A block that fails its checks is recorded in
//! [`Puzzle::skipped`], logged, and the rest of the input is still read.

use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::{Cell, RegionSpec, Shape};

/// Highest shape index accepted; the solver keeps a catalog slot per index.
pub const MAX_SHAPE_INDEX: usize = 1 << 16;

/// Largest region, in cells, the solver will allocate a grid for.
pub const MAX_REGION_CELLS: usize = 1 << 24;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: shape index '{text}' is out of range")]
    ShapeIndex {
        line: usize,
        text: String,
        #[source]
        source: ParseIntError,
    },
    #[error("line {line}: shape index {index} exceeds the limit of {limit}", limit = MAX_SHAPE_INDEX)]
    ShapeIndexTooLarge { line: usize, index: usize },
    #[error("line {line}: shape {index} has no cells")]
    EmptyShape { line: usize, index: usize },
    #[error("line {line}: expected '<width>x<height>:', got '{text}'")]
    RegionDimensions { line: usize, text: String },
    #[error(
        "line {line}: region {width}x{height} exceeds the limit of {limit} cells",
        limit = MAX_REGION_CELLS
    )]
    RegionTooLarge {
        line: usize,
        width: usize,
        height: usize,
    },
    #[error("line {line}: invalid piece count in '{text}'")]
    RegionCount {
        line: usize,
        text: String,
        #[source]
        source: ParseIntError,
    },
    #[error("line {line}: region '{text}' lists no piece counts")]
    NoCounts { line: usize, text: String },
    #[error("line {line}: unrecognized line '{text}'")]
    Unrecognized { line: usize, text: String },
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read input file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Default)]
pub struct Puzzle {
    pub shapes: Vec<Shape>,
    pub regions: Vec<RegionSpec>,
    pub skipped: Vec<ParseError>,
}

impl Puzzle {
    fn skip(&mut self, err: ParseError) {
        tracing::warn!(%err, "skipping malformed block");
        self.skipped.push(err);
    }
}

pub fn read_input(path: &Path) -> Result<Puzzle, InputError> {
    let input = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_input(&input))
}

pub fn parse_input(input: &str) -> Puzzle {
    let lines: Vec<&str> = input.lines().map(str::trim).collect();
    let mut puzzle = Puzzle::default();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let line_no = i + 1;
        i += 1;

        if line.is_empty() {
            continue;
        }

        if let Some(index) = shape_header(line) {
            let mut cells = Vec::new();
            let mut row = 0;
            while let Some(&pattern) = lines.get(i) {
                if !is_pattern_row(pattern) {
                    break;
                }
                cells.extend(
                    pattern
                        .chars()
                        .enumerate()
                        .filter(|&(_, ch)| ch == '#')
                        .map(|(col, _)| Cell::new(col, row)),
                );
                row += 1;
                i += 1;
            }

            let index = match index.parse::<usize>() {
                Ok(index) => index,
                Err(source) => {
                    puzzle.skip(ParseError::ShapeIndex {
                        line: line_no,
                        text: index.to_string(),
                        source,
                    });
                    continue;
                }
            };
            if index > MAX_SHAPE_INDEX {
                puzzle.skip(ParseError::ShapeIndexTooLarge {
                    line: line_no,
                    index,
                });
                continue;
            }
            match Shape::new(index, cells) {
                Ok(shape) => puzzle.shapes.push(shape),
                Err(_) => puzzle.skip(ParseError::EmptyShape {
                    line: line_no,
                    index,
                }),
            }
            continue;
        }

        if let Some((dims, _)) = line.split_once(':')
            && dims.contains('x')
        {
            match parse_region(line_no, line) {
                Ok(region) => puzzle.regions.push(region),
                Err(err) => puzzle.skip(err),
            }
            continue;
        }

        puzzle.skip(ParseError::Unrecognized {
            line: line_no,
            text: line.to_string(),
        });
    }

    puzzle
}

/// The digits of a `<index>:` header line.
fn shape_header(line: &str) -> Option<&str> {
    let digits = line.strip_suffix(':')?.trim_end();
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
}

fn is_pattern_row(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|ch| ch == '#' || ch == '.')
}

fn parse_dimension(s: &str) -> Option<usize> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_region(line_no: usize, line: &str) -> Result<RegionSpec, ParseError> {
    let dims_err = || ParseError::RegionDimensions {
        line: line_no,
        text: line.to_string(),
    };

    let (dims, counts) = line.split_once(':').ok_or_else(dims_err)?;
    let (width, height) = dims.split_once('x').ok_or_else(dims_err)?;
    let width = parse_dimension(width).ok_or_else(dims_err)?;
    let height = parse_dimension(height).ok_or_else(dims_err)?;
    if width
        .checked_mul(height)
        .is_none_or(|cells| cells > MAX_REGION_CELLS)
    {
        return Err(ParseError::RegionTooLarge {
            line: line_no,
            width,
            height,
        });
    }

    let piece_counts = counts
        .split_whitespace()
        .map(|c| c.parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ParseError::RegionCount {
            line: line_no,
            text: line.to_string(),
            source,
        })?;
    if piece_counts.is_empty() {
        return Err(ParseError::NoCounts {
            line: line_no,
            text: line.to_string(),
        });
    }

    Ok(RegionSpec::new(width, height, piece_counts))
}
