// src/ui/mod.rs
pub mod controls;
pub mod histogram;
