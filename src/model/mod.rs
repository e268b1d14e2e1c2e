pub mod board;
pub mod config;
pub mod item;
pub mod workspace;

pub use board::*;
pub use config::*;
pub use item::*;
pub use workspace::*;
