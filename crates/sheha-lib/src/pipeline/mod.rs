pub mod refine;
pub mod retrieve;
pub mod turn;
