// Library interface for glimpse (the binary and integration tests build on it)
pub mod api;
pub mod app;
pub mod components;
pub mod config;

#[macro_use]
pub mod logging;

pub mod server_config;
pub mod session;
pub mod storage;
pub mod terminal;
pub mod text_wrapper;
pub mod ui;
