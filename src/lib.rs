pub mod anim;
pub mod app;
pub mod autotile;
pub mod compose;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod ui;
pub mod world;
