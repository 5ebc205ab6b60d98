// lib.rs - Conway's Game of Life on a bounded grid, with a compact text codec
// and a generation history that reseeds the board when it falls into a short cycle

pub mod codec;
pub mod config;
pub mod grid;
pub mod history;
pub mod patterns;

pub use codec::{DecodeError, decode, encode, try_decode};
pub use config::{ConfigError, LifeConfig};
pub use grid::Board;
pub use history::{Action, Session, Step};
pub use patterns::{PATTERNS, Pattern};
