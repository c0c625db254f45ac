//! Output size parsing and paper-size conversion.
//!
//! A size is either a literal pixel pair (`2048x1536`) or an ISO A-series
//! paper size with orientation (`a4-landscape`). Paper sizes are converted to
//! pixels at a given density.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Long edge of the rank-0 reference sheet, in inches.
const REFERENCE_LONG_INCHES: f64 = 46.77;

/// Short edge of the rank-0 reference sheet, in inches.
const REFERENCE_SHORT_INCHES: f64 = 33.07;

/// Largest accepted canvas edge in pixels (the JPEG limit).
pub const MAX_DIMENSION: u32 = 65_535;

/// Errors produced while interpreting a size specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaperError {
    /// Matches neither `WIDTHxHEIGHT` nor `a<rank>-<orientation>`, or a side
    /// falls outside 1..=MAX_DIMENSION pixels
    #[error("Invalid size '{0}' - expected 'WIDTHxHEIGHT' (e.g. 2048x2048) or 'a<rank>-<orientation>' (e.g. a4-landscape), each side 1 to 65535 px")]
    InvalidSizeSpec(String),

    /// Orientation label is not portrait or landscape
    #[error("Invalid orientation '{0}' - expected 'portrait' or 'landscape'")]
    InvalidOrientation(String),
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl FromStr for Orientation {
    type Err = PaperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            _ => Err(PaperError::InvalidOrientation(s.to_string())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => write!(f, "portrait"),
            Self::Landscape => write!(f, "landscape"),
        }
    }
}

/// A physical paper size at a given pixel density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaperSpec {
    /// Size rank: 0 is the largest sheet, each step halves the area
    pub rank: u32,
    pub orientation: Orientation,
    /// Pixels per inch
    pub ppi: u32,
}

impl PaperSpec {
    pub fn new(rank: u32, orientation: Orientation, ppi: u32) -> Self {
        Self {
            rank,
            orientation,
            ppi,
        }
    }

    /// Pixel dimensions `(width, height)` of this sheet.
    pub fn pixel_size(&self) -> Result<(u32, u32), PaperError> {
        pixel_size(self.rank, self.orientation, self.ppi)
    }
}

impl fmt::Display for PaperSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}-{} @ {}ppi", self.rank, self.orientation, self.ppi)
    }
}

/// Converts a paper rank, orientation and density to pixel dimensions.
///
/// The rank-0 sheet measures 46.77 × 33.07 inches and every rank halves the
/// area, so each edge shrinks by `2^(rank/2)`. Rounding is half-to-even.
///
/// # Errors
///
/// Returns [`PaperError::InvalidSizeSpec`] when an edge rounds to zero or
/// exceeds [`MAX_DIMENSION`].
///
/// # Example
///
/// ```
/// use mapstitch::paper::{pixel_size, Orientation};
///
/// assert_eq!(pixel_size(4, Orientation::Landscape, 150), Ok((1754, 1240)));
/// assert_eq!(pixel_size(4, Orientation::Portrait, 150), Ok((1240, 1754)));
/// assert!(pixel_size(40, Orientation::Landscape, 150).is_err());
/// ```
pub fn pixel_size(
    rank: u32,
    orientation: Orientation,
    ppi: u32,
) -> Result<(u32, u32), PaperError> {
    let factor = 2.0_f64.powf(f64::from(rank) / 2.0);
    let ppi = f64::from(ppi);

    let edge = |inches: f64| {
        let px = (ppi * inches / factor).round_ties_even();
        if (1.0..=f64::from(MAX_DIMENSION)).contains(&px) {
            Ok(px as u32)
        } else {
            Err(PaperError::InvalidSizeSpec(format!("a{}-{}", rank, orientation)))
        }
    };
    let long_side = edge(REFERENCE_LONG_INCHES)?;
    let short_side = edge(REFERENCE_SHORT_INCHES)?;

    Ok(match orientation {
        Orientation::Landscape => (long_side, short_side),
        Orientation::Portrait => (short_side, long_side),
    })
}

/// Requested output dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSize {
    /// Literal pixel dimensions
    Pixels { width: u32, height: u32 },
    /// A paper sheet at a density
    Paper(PaperSpec),
}

impl OutputSize {
    /// Parses a size string.
    ///
    /// `ppi` is only used for paper sizes.
    ///
    /// # Example
    ///
    /// ```
    /// use mapstitch::paper::OutputSize;
    ///
    /// let size = OutputSize::parse("a4-portrait", 150).unwrap();
    /// assert_eq!(size.dimensions(), Ok((1240, 1754)));
    ///
    /// let size = OutputSize::parse("800x600", 150).unwrap();
    /// assert_eq!(size.dimensions(), Ok((800, 600)));
    /// ```
    pub fn parse(s: &str, ppi: u32) -> Result<Self, PaperError> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();

        if let Some(rest) = lower.strip_prefix('a') {
            if let Some((rank, orientation)) = rest.split_once('-') {
                if let Ok(rank) = rank.parse::<u32>() {
                    if ppi == 0 {
                        return Err(PaperError::InvalidSizeSpec(s.to_string()));
                    }
                    let orientation = orientation.parse()?;
                    let size = Self::Paper(PaperSpec::new(rank, orientation, ppi));
                    size.dimensions()?;
                    return Ok(size);
                }
            }
        }

        let (width, height) = lower
            .split_once('x')
            .ok_or_else(|| PaperError::InvalidSizeSpec(s.to_string()))?;
        let width: u32 = width
            .trim()
            .parse()
            .map_err(|_| PaperError::InvalidSizeSpec(s.to_string()))?;
        let height: u32 = height
            .trim()
            .parse()
            .map_err(|_| PaperError::InvalidSizeSpec(s.to_string()))?;

        let size = Self::Pixels { width, height };
        size.dimensions().map_err(|_| PaperError::InvalidSizeSpec(s.to_string()))?;
        Ok(size)
    }

    /// Pixel dimensions `(width, height)`.
    ///
    /// Fails when a side is zero or larger than [`MAX_DIMENSION`], which can
    /// only happen for sizes built directly rather than through [`parse`].
    ///
    /// [`parse`]: OutputSize::parse
    pub fn dimensions(&self) -> Result<(u32, u32), PaperError> {
        match self {
            Self::Pixels { width, height } => {
                let valid = |side: u32| (1..=MAX_DIMENSION).contains(&side);
                if valid(*width) && valid(*height) {
                    Ok((*width, *height))
                } else {
                    Err(PaperError::InvalidSizeSpec(format!("{}x{}", width, height)))
                }
            }
            Self::Paper(paper) => paper.pixel_size(),
        }
    }

    /// Paper spec, if this size came from one.
    pub fn paper(&self) -> Option<&PaperSpec> {
        match self {
            Self::Paper(paper) => Some(paper),
            Self::Pixels { .. } => None,
        }
    }
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.dimensions()) {
            (Self::Pixels { width, height }, _) => write!(f, "{}x{}", width, height),
            (Self::Paper(paper), Ok((width, height))) => {
                write!(f, "{} ({}x{})", paper, width, height)
            }
            (Self::Paper(paper), Err(_)) => write!(f, "{}", paper),
        }
    }
}
