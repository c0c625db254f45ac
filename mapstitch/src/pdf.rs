//! PDF export through ImageMagick.
//!
//! The stitched raster is handed to `magick` at the paper density so the
//! resulting PDF page has the physical size the raster was computed for.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// ImageMagick 7 entry point.
pub const DEFAULT_PROGRAM: &str = "magick";

/// Errors from the external conversion.
#[derive(Debug, Error)]
pub enum PdfError {
    /// The converter could not be started
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The converter ran but reported failure
    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Converts a raster image to a single-page PDF.
#[derive(Debug, Clone)]
pub struct PdfConverter {
    program: String,
}

impl Default for PdfConverter {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl PdfConverter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Path of the PDF written for `image`: same stem, `.pdf` extension.
    pub fn output_path(image: &Path) -> PathBuf {
        image.with_extension("pdf")
    }

    /// Arguments passed to the converter.
    ///
    /// Landscape rasters are rotated so the page comes out portrait.
    pub fn arguments(image: &Path, ppi: u32, landscape: bool) -> Vec<String> {
        let mut args = vec![
            image.display().to_string(),
            "-density".to_string(),
            ppi.to_string(),
        ];
        if landscape {
            args.push("-rotate".to_string());
            args.push("90".to_string());
        }
        args.push(Self::output_path(image).display().to_string());
        args
    }

    /// Runs the conversion and returns the PDF path.
    pub fn convert(
        &self,
        image: &Path,
        ppi: u32,
        (width, height): (u32, u32),
    ) -> Result<PathBuf, PdfError> {
        let args = Self::arguments(image, ppi, width > height);
        tracing::debug!(program = %self.program, ?args, "Converting to PDF");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| PdfError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(PdfError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(Self::output_path(image))
    }
}
