pub mod board;
pub mod formats;
pub mod game;
pub mod generate;
pub mod params;
pub mod rng;
pub mod solve;
