// src/middleware/mod.rs
pub mod cache;
pub mod security;
