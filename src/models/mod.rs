pub mod common;
pub mod matchup;
pub mod settings;
pub mod sync;
pub mod week;
