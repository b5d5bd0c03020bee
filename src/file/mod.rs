// src/file/mod.rs
pub mod export;

pub use export::ExportFile;
