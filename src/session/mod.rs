//! Game session: rounds, input, scoring and history wired together.

pub mod game;

pub use game::{GameSession, InputRejection};
