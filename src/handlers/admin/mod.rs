pub mod settings_handler;
pub mod sync_handler;
pub mod week_handler;
