// Presentation layer - View state, console rendering and the refresh loop
pub mod app_state;
pub mod console;
pub mod refresh;
