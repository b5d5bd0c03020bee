// src/error.rs
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("no data to export: run a simulation first")]
    NoData,

    #[error("sampled value {value} falls outside the {bins} configured bins")]
    OutOfRange { value: u32, bins: usize },
}

pub type SimResult<T> = std::result::Result<T, SimError>;
