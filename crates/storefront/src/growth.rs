//! Plant growth animation.
//!
//! The explore-collection partial pairs scroll markers
//! (`.growth-stage[data-stage]`) with plant images (`.plant-image[data-stage]`).
//! When a marker is at least half visible, the image for its stage becomes the
//! only active one. The browser script reports visibility; this module owns
//! the rule and the server-side initial render (stage 1 active).

use crate::dom::{Document, Element};

/// Fraction of a marker that must be visible to switch stages.
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// Stage shown before any marker has been seen.
pub const DEFAULT_STAGE: &str = "1";

/// Class on scroll markers.
pub const MARKER_CLASS: &str = "growth-stage";

/// Class on plant images.
pub const IMAGE_CLASS: &str = "plant-image";

/// Class marking the visible plant image.
pub const ACTIVE_CLASS: &str = "active";

/// The growth animation bound to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowthAnimation {
    markers: Vec<String>,
    images: Vec<String>,
    active: String,
}

impl GrowthAnimation {
    /// Bind to the markers and images in `document`.
    ///
    /// Returns `None` (and logs a warning) if the page has no markers or no
    /// plant images.
    #[must_use]
    pub fn activate(document: &Document) -> Option<Self> {
        let markers = stages(&document.elements_with_class(MARKER_CLASS));
        let images = stages(&document.elements_with_class(IMAGE_CLASS));

        if markers.is_empty() || images.is_empty() {
            tracing::warn!(
                markers = markers.len(),
                images = images.len(),
                "Growth animation skipped: page has no markers or plant images"
            );
            return None;
        }

        Some(Self {
            markers,
            images,
            active: DEFAULT_STAGE.to_string(),
        })
    }

    /// The currently active stage.
    #[must_use]
    pub fn active_stage(&self) -> &str {
        &self.active
    }

    /// Stages of the scroll markers, in page order.
    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Stages of the plant images, in page order.
    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// A marker's visible fraction changed.
    ///
    /// Returns `true` if the active stage changed. Markers re-trigger freely:
    /// scrolling back up to an earlier marker re-activates its stage.
    pub fn on_marker_visible(&mut self, stage: &str, visible_ratio: f64) -> bool {
        if visible_ratio < VISIBILITY_THRESHOLD || stage == self.active {
            return false;
        }
        if !self.markers.iter().any(|m| m == stage) {
            return false;
        }
        self.active = stage.to_string();
        true
    }

    /// Mark the active stage's image(s) active and every other image inactive.
    ///
    /// Returns the number of plant images touched.
    pub fn apply(&self, document: &mut Document) -> usize {
        document.set_class_where(ACTIVE_CLASS, |element| {
            element
                .has_class(IMAGE_CLASS)
                .then(|| element.data("stage") == Some(self.active.as_str()))
        })
    }
}

fn stages(elements: &[Element]) -> Vec<String> {
    elements
        .iter()
        .filter_map(|e| e.data("stage").map(String::from))
        .collect()
}
