//! Target frame sizes and the current frame selection.
//!
//! A frame is a fixed output pixel size required by a downstream asset store.
//! The catalog is external configuration; the editor only checks that every
//! entry has non-zero dimensions.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::geometry::Size;

/// A catalog entry describing a required output size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub id: String,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub description: String,
}

impl FrameSize {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        width: u32,
        height: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            width,
            height,
            description: description.into(),
        }
    }

    /// Frame dimensions as a floating-point size.
    pub fn size(&self) -> Size {
        Size::from((self.width, self.height))
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigurationError::InvalidFrame {
                id: self.id.clone(),
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Ordered, immutable list of frame sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FrameSize>", into = "Vec<FrameSize>")]
pub struct FrameCatalog {
    frames: Vec<FrameSize>,
}

impl FrameCatalog {
    /// Build a catalog, rejecting entries with a zero width or height.
    pub fn new(frames: Vec<FrameSize>) -> Result<Self, ConfigurationError> {
        for frame in &frames {
            frame.validate()?;
        }
        Ok(Self { frames })
    }

    /// Find a frame by id.
    pub fn get(&self, id: &str) -> Option<&FrameSize> {
        self.frames.iter().find(|f| f.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameSize> {
        self.frames.iter()
    }

    pub fn as_slice(&self) -> &[FrameSize] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Microsoft Edge Add-ons store promotional tile and screenshot sizes.
impl Default for FrameCatalog {
    fn default() -> Self {
        Self {
            frames: vec![
                FrameSize::new(
                    "small-tile",
                    "Small Promotional Tile",
                    440,
                    280,
                    "440x280px - Microsoft Edge Add-ons small promotional tile",
                ),
                FrameSize::new(
                    "large-tile",
                    "Large Promotional Tile",
                    1400,
                    560,
                    "1400x560px - Microsoft Edge Add-ons large promotional tile",
                ),
                FrameSize::new(
                    "screenshot-1280",
                    "Screenshot (1280x800)",
                    1280,
                    800,
                    "1280x800px - Microsoft Edge Add-ons screenshot",
                ),
                FrameSize::new(
                    "screenshot-640",
                    "Screenshot (640x400)",
                    640,
                    400,
                    "640x400px - Microsoft Edge Add-ons screenshot",
                ),
            ],
        }
    }
}

impl TryFrom<Vec<FrameSize>> for FrameCatalog {
    type Error = ConfigurationError;

    fn try_from(frames: Vec<FrameSize>) -> Result<Self, Self::Error> {
        Self::new(frames)
    }
}

impl From<FrameCatalog> for Vec<FrameSize> {
    fn from(catalog: FrameCatalog) -> Self {
        catalog.frames
    }
}

/// Zero or one selected frame. Independent of the view transform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSelection {
    selected: Option<FrameSize>,
}

impl FrameSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&FrameSize> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_ref().is_some_and(|f| f.id == id)
    }

    pub fn select(&mut self, frame: FrameSize) {
        self.selected = Some(frame);
    }

    pub fn set(&mut self, frame: Option<FrameSize>) {
        self.selected = frame;
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Select `frame`, or deselect it if it is already the selected frame.
    ///
    /// Returns the selection after the toggle.
    pub fn toggle(&mut self, frame: &FrameSize) -> Option<&FrameSize> {
        if self.is_selected(&frame.id) {
            self.selected = None;
        } else {
            self.selected = Some(frame.clone());
        }
        self.selected.as_ref()
    }
}
