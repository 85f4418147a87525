//! How the rebuild passes degrade on malformed marker sequences.
//!
//! Authoring mistakes are never errors. Whatever the passes do with them is
//! decided here, so the scanning code stays the same if a stricter mode
//! is ever added.

/// What to do with a `details-content` marker that has no summary before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrayContent {
    /// Remove the marker and its content.
    #[default]
    Drop,
    /// Keep the content as a plain paragraph in place.
    KeepAsParagraph,
}

/// Degradation policy for the rebuild passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub stray_details_content: StrayContent,
    /// Summary text for an accordion item synthesised for a panel that has
    /// no heading before it.
    pub accordion_fallback_label: String,
}

impl Policy {
    /// Silent degradation: stray content is dropped, missing headings get a
    /// default label, unexpected content closes the scope.
    pub fn lenient() -> Self {
        Self {
            stray_details_content: StrayContent::Drop,
            accordion_fallback_label: "Details".to_string(),
        }
    }

    pub fn with_stray_details_content(mut self, stray: StrayContent) -> Self {
        self.stray_details_content = stray;
        self
    }

    pub fn with_accordion_fallback_label(mut self, label: impl Into<String>) -> Self {
        self.accordion_fallback_label = label.into();
        self
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::lenient()
    }
}
