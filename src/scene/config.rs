//! Scene metrics.
//!
//! Every constant the layout composition uses, in one struct injected at
//! construction. `Default` carries the reference metrics; [`SceneMetrics::compact`]
//! scales them down for an ordinary terminal window.

use crate::types::{EdgeInsets, Inset, ProfileScale};

#[derive(Clone, Debug, PartialEq)]
pub struct SceneMetrics {
    /// Gap between the profile glyph and the information block.
    pub content_spacing: f32,
    /// Insets of the pin button. Top is unbounded so the button hugs the bottom.
    pub pin_button_insets: EdgeInsets,
    /// Top inset of the content region, added to the safe-area top.
    pub container_inset_top: f32,
    /// Left and right inset of the content region.
    pub container_inset_horizontal: f32,
    /// Top inset of the dismiss button, added to the safe-area top.
    pub dismiss_inset_top: f32,
    pub dismiss_inset_left: f32,
    pub button_content_insets: EdgeInsets,
    pub button_border: f32,
    pub profile_scale: ProfileScale,
}

impl Default for SceneMetrics {
    fn default() -> Self {
        Self {
            content_spacing: 20.0,
            pin_button_insets: EdgeInsets::new(f32::INFINITY, 80.0, 60.0, 80.0),
            container_inset_top: 80.0,
            container_inset_horizontal: 40.0,
            dismiss_inset_top: 30.0,
            dismiss_inset_left: 30.0,
            button_content_insets: EdgeInsets::uniform(10.0),
            button_border: 2.0,
            profile_scale: ProfileScale::Large,
        }
    }
}

impl SceneMetrics {
    /// Metrics sized for an 80x24 terminal.
    pub fn compact() -> Self {
        Self {
            content_spacing: 1.0,
            pin_button_insets: EdgeInsets::new(f32::INFINITY, 8.0, 1.0, 8.0),
            container_inset_top: 4.0,
            container_inset_horizontal: 4.0,
            dismiss_inset_top: 1.0,
            dismiss_inset_left: 2.0,
            button_content_insets: EdgeInsets::new(0.0, 1.0, 0.0, 1.0),
            button_border: 1.0,
            profile_scale: ProfileScale::Small,
        }
    }

    /// Insets of the scrollable content region. Bottom is unbounded.
    pub fn container_insets(&self, safe_area: &EdgeInsets) -> EdgeInsets {
        EdgeInsets {
            top: Inset::Fixed(self.container_inset_top + safe_area.top_or_zero()),
            left: Inset::Fixed(self.container_inset_horizontal),
            bottom: Inset::Unbounded,
            right: Inset::Fixed(self.container_inset_horizontal),
        }
    }

    /// Insets of the dismiss button inside its top-start corner.
    pub fn dismiss_insets(&self, safe_area: &EdgeInsets) -> EdgeInsets {
        EdgeInsets {
            top: Inset::Fixed(self.dismiss_inset_top + safe_area.top_or_zero()),
            left: Inset::Fixed(self.dismiss_inset_left),
            bottom: Inset::Fixed(0.0),
            right: Inset::Fixed(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_insets_follow_safe_area() {
        let metrics = SceneMetrics::default();
        let insets = metrics.container_insets(&EdgeInsets::new(44.0, 0.0, 34.0, 0.0));
        assert_eq!(insets.top, Inset::Fixed(124.0));
        assert_eq!(insets.left, Inset::Fixed(40.0));
        assert!(insets.bottom.is_unbounded());
    }

    #[test]
    fn test_unbounded_safe_area_top_counts_as_zero() {
        let metrics = SceneMetrics::default();
        let safe = EdgeInsets::new(f32::INFINITY, 0.0, 0.0, 0.0);
        assert_eq!(metrics.dismiss_insets(&safe).top, Inset::Fixed(30.0));
    }
}
