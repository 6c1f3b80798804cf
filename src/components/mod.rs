#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod clock_controls;
pub mod map_canvas;
