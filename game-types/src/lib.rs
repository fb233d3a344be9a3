pub mod board;
pub mod errors;
pub mod game;
pub mod messages;

// Re-export all types
pub use board::*;
pub use errors::*;
pub use game::*;
pub use messages::*;
