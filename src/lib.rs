//! A raffle wheel for the terminal: type the names, spin, and a uniformly random winner is
//! revealed once the wheel stops.

pub mod app;
pub mod celebrate;
pub mod config;
pub mod draw;
pub mod headless;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod wheel;
