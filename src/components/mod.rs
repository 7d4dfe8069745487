//! UI components.

pub mod hero_grid;
