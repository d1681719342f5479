// src/exchange/mod.rs
pub mod client;
pub mod models;
