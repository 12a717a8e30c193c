pub mod draw;
pub mod logging;
pub mod settings;
pub mod settings_store;
