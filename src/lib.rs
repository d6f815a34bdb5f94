//! Decides which rectangular regions can hold their required polyomino
//! presents, by backtracking over every rotation and reflection of each shape.

pub mod parse;
pub mod region;
pub mod render;
pub mod solver;
pub mod types;
