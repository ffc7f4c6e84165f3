use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NupError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Output device error: {0}")]
    Surface(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[cfg(feature = "pdfium")]
    #[error("Pdfium error: {0}")]
    Pdfium(String),
    #[error("No pages to lay out")]
    NoPages,
    /// A print job stopped partway; sheets before the failure were already emitted
    #[error("Print job aborted after {sheets_printed} of {total_sheets} sheets: {source}")]
    PrintAborted {
        sheets_printed: usize,
        total_sheets: usize,
        source: Box<NupError>,
    },
}

pub type Result<T> = std::result::Result<T, NupError>;

/// Output sheet orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Portrait: height >= width
    #[default]
    Portrait,
    /// Landscape: width >= height
    Landscape,
}

impl Orientation {
    /// Orientation implied by a page's own shape. Square pages count as portrait.
    pub fn of_page(width_pt: f32, height_pt: f32) -> Self {
        if width_pt > height_pt {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

impl FromStr for Orientation {
    type Err = NupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            other => Err(NupError::Config(format!("Unknown orientation: {}", other))),
        }
    }
}

/// Named output page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageSize {
    A0,
    A1,
    A2,
    A3,
    #[default]
    A4,
    A5,
    A6,
    Letter,
    Legal,
    Tabloid,
}

impl PageSize {
    pub const ALL: [PageSize; 10] = [
        PageSize::A0,
        PageSize::A1,
        PageSize::A2,
        PageSize::A3,
        PageSize::A4,
        PageSize::A5,
        PageSize::A6,
        PageSize::Letter,
        PageSize::Legal,
        PageSize::Tabloid,
    ];

    /// Base dimensions in points, always portrait (width < height)
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PageSize::A0 => (2384.0, 3370.0),
            PageSize::A1 => (1684.0, 2384.0),
            PageSize::A2 => (1191.0, 1684.0),
            PageSize::A3 => (842.0, 1191.0),
            PageSize::A4 => (595.0, 842.0),
            PageSize::A5 => (420.0, 595.0),
            PageSize::A6 => (298.0, 420.0),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Tabloid => (792.0, 1224.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PageSize::A0 => "A0",
            PageSize::A1 => "A1",
            PageSize::A2 => "A2",
            PageSize::A3 => "A3",
            PageSize::A4 => "A4",
            PageSize::A5 => "A5",
            PageSize::A6 => "A6",
            PageSize::Letter => "Letter",
            PageSize::Legal => "Legal",
            PageSize::Tabloid => "Tabloid",
        }
    }

    /// Look up a size by name, case-insensitively. Unknown names resolve to A4.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|size| size.name().eq_ignore_ascii_case(name))
            .unwrap_or(PageSize::A4)
    }
}

impl FromStr for PageSize {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

/// User rotation applied to every drawn page, clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    /// Parse one of the supported angles (0, 90, 180, 270)
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Clockwise90),
            180 => Some(Rotation::Clockwise180),
            270 => Some(Rotation::Clockwise270),
            _ => None,
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::Rotation;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    // Rotation is stored as its angle so config files read naturally
    impl Serialize for Rotation {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_i32(self.degrees())
        }
    }

    impl<'de> Deserialize<'de> for Rotation {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let degrees = i32::deserialize(deserializer)?;
            Rotation::from_degrees(degrees).ok_or_else(|| {
                serde::de::Error::custom(format!("Unsupported rotation angle: {}", degrees))
            })
        }
    }
}

/// Counts describing how a document is split into sheets
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayoutStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Configured pages per sheet
    pub pages_per_sheet: usize,
    /// Grid rows used for every sheet
    pub rows: usize,
    /// Grid columns used for every sheet
    pub cols: usize,
    /// Number of output sheets
    pub output_sheets: usize,
    /// Cells that receive a source page
    pub filled_cells: usize,
    /// Cells left blank (trailing sheet, or grid larger than the count)
    pub blank_cells: usize,
}
