pub use direction::*;
pub use game::*;
pub use grid::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod direction;
mod game;
mod grid;
mod visualization;
