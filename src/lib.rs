pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod http;
pub mod logging;
pub mod model;
pub mod server;
pub mod ui;
pub mod util;
