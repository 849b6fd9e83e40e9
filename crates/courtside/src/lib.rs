// Library root: exposes every module so integration tests can drive the
// controllers and the app loop directly.

pub mod api;
pub mod app;
pub mod builder;
pub mod config;
pub mod protocol;
pub mod roster;
pub mod table;
pub mod tui;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;
