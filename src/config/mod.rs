pub mod pool;
pub mod schedule_source;
pub mod settings;
