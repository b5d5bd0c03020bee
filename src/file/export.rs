// src/file/export.rs

use std::path::Path;
use std::fs;
use anyhow::{Result, Context};
use chrono::prelude::*;
use csv::Writer;
use crate::config::DistributionKind;
use crate::error::SimError;

pub const CSV_HEADER: [&str; 2] = ["sample_index", "value"];

/// Serializes the sample log as `sample_index,value` rows, 1-based.
pub fn samples_to_csv(samples: &[u32]) -> Result<Vec<u8>> {
    if samples.is_empty() {
        return Err(SimError::NoData.into());
    }

    let mut writer = Writer::from_writer(Vec::with_capacity(samples.len() * 8));
    writer.write_record(CSV_HEADER)?;
    for (i, value) in samples.iter().enumerate() {
        writer.write_record(&[(i + 1).to_string(), value.to_string()])?;
    }

    writer.into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush CSV buffer")
}

pub fn export_file_name(kind: DistributionKind, timestamp: DateTime<Local>) -> String {
    format!("{}_samples_{}.csv", kind.name(), timestamp.format("%Y%m%d_%H%M%S"))
}

#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn new(kind: DistributionKind, samples: &[u32]) -> Result<Self> {
        Ok(Self {
            file_name: export_file_name(kind, Local::now()),
            bytes: samples_to_csv(samples)?,
        })
    }

    pub fn row_count(&self) -> usize {
        self.bytes.iter().filter(|&&b| b == b'\n').count().saturating_sub(1)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create export directory: {}", parent.display()))?;
        }
        fs::write(path, &self.bytes)
            .with_context(|| format!("Failed to write export file: {}", path.display()))
    }
}
