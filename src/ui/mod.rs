pub mod app;
pub mod components;
pub mod handler;
pub mod input;
pub mod layout;
pub mod message;
pub mod state;
pub mod theme;
pub mod tui;
