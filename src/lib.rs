#![allow(clippy::implicit_hasher)]
#![allow(unknown_lints)]

pub mod models;
pub mod components;
pub mod constants;
pub mod logging;
pub mod time;
pub mod timetable;
pub mod phase;
pub mod depot;
pub mod frame;
pub mod clock;

pub use components::app::App;
