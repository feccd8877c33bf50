use std::fs;
use std::path::{Path, PathBuf};

use super::conversion_model::ConversionResult;
use crate::errors::Result;

/// Destination of conversion results.
pub trait ResultWriterTrait: Send + Sync {
    fn write(&self, result: &ConversionResult) -> Result<()>;

    /// Human readable location, for log lines.
    fn location(&self) -> String;
}

/// Writes the latest result as pretty JSON, replacing the previous one.
#[derive(Debug, Clone)]
pub struct JsonResultWriter {
    path: PathBuf,
}

impl JsonResultWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultWriterTrait for JsonResultWriter {
    fn write(&self, result: &ConversionResult) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(result)?;
        fs::write(&self.path, json)?;
        log::debug!("Wrote conversion result to {}", self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
