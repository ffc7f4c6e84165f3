use crate::constants::{MAX_CUSTOM_ZOOM_PERCENT, MIN_CUSTOM_ZOOM_PERCENT};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Session view configuration read by every layout computation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewState {
    // Content
    /// Content zoom applied inside each cell (1.0 = 100%)
    pub scale_factor: f32,
    pub rotation: Rotation,

    // Layout
    pub pages_per_sheet: usize,
    /// N-up grouping on; when off every view shows one page
    pub adaptive_mode: bool,

    // Output page
    pub page_size: PageSize,
    pub orientation: Orientation,

    // Screen only
    /// Final resize of the composed screen raster (fit to window)
    pub display_scale_factor: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            rotation: Rotation::None,
            pages_per_sheet: 1,
            adaptive_mode: true,
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            display_scale_factor: 1.0,
        }
    }
}

impl ViewState {
    /// Load a view configuration from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let view: ViewState = serde_json::from_slice(&bytes)
            .map_err(|e| NupError::Config(format!("Failed to parse config: {}", e)))?;
        view.validate()?;
        Ok(view)
    }

    /// Save the view configuration to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| NupError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Unsupported `pages_per_sheet` values are accepted: they lay out as a
    /// single page per sheet.
    pub fn validate(&self) -> Result<()> {
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(NupError::Config(format!(
                "Zoom must be positive, got {}",
                self.scale_factor
            )));
        }
        if !(self.display_scale_factor.is_finite() && self.display_scale_factor > 0.0) {
            return Err(NupError::Config(format!(
                "Display scale must be positive, got {}",
                self.display_scale_factor
            )));
        }
        Ok(())
    }

    /// Current zoom as a percentage
    pub fn zoom_percent(&self) -> f32 {
        self.scale_factor * 100.0
    }

    /// Set the content zoom from a percentage (preset or custom entry)
    pub fn set_zoom_percent(&mut self, percent: f32) -> Result<()> {
        if !(MIN_CUSTOM_ZOOM_PERCENT..=MAX_CUSTOM_ZOOM_PERCENT).contains(&percent) {
            return Err(NupError::Config(format!(
                "Zoom {}% is outside {}%..{}%",
                percent, MIN_CUSTOM_ZOOM_PERCENT, MAX_CUSTOM_ZOOM_PERCENT
            )));
        }
        self.scale_factor = percent / 100.0;
        Ok(())
    }

    /// Pages drawn per view: the configured count in adaptive mode, else 1
    pub fn effective_pages_per_sheet(&self) -> usize {
        if self.adaptive_mode {
            self.pages_per_sheet.max(1)
        } else {
            1
        }
    }

    /// Reset per-document state after a new document is opened.
    ///
    /// Orientation follows the first page's shape and the zoom returns to 100%.
    pub fn reset_for_document(&mut self, first_page_size: Option<(f32, f32)>) {
        if let Some((width, height)) = first_page_size {
            self.orientation = Orientation::of_page(width, height);
        }
        self.scale_factor = 1.0;
    }
}
