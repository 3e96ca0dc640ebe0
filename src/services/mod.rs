// src/services/mod.rs
pub mod catalog;
pub mod clipboard;
pub mod health;
pub mod links;
pub mod locale;
pub mod renderer;
