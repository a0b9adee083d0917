//! Core Types
//!
//! Value types shared by the reactive core, the node tree and the layout
//! function: view-state snapshots, commands, navigation signals, insets and
//! control flags.

// =============================================================================
// Scene identity
// =============================================================================

/// Identifier of the repository shown by a scene. Fixed at construction.
pub type RepositoryId = i64;

// =============================================================================
// View state (Presenter → View)
// =============================================================================

/// Immutable snapshot of what the scene should currently display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Owner avatar reference.
    pub profile_url: Option<String>,
    pub title: String,
    pub description: String,
    pub is_pinned: bool,
}

impl ViewState {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = Some(url.into());
        self
    }

    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = is_pinned;
        self
    }
}

// =============================================================================
// Commands (View → Interactor)
// =============================================================================

/// Intent sent from the scene to business logic.
///
/// The intent kind (pin toggle, dismiss request) is given by the sink the
/// command is delivered to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Command {
    pub repository_id: RepositoryId,
}

impl Command {
    pub fn new(repository_id: RepositoryId) -> Self {
        Self { repository_id }
    }
}

// =============================================================================
// Navigation (Router → Host)
// =============================================================================

/// Request to tear down the hosting presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dismiss {
    /// Scene that asked to be dismissed.
    pub scene: RepositoryId,
}

// =============================================================================
// Insets
// =============================================================================

/// One edge of an inset quadruple.
///
/// `Unbounded` means "no constraint on this edge", not a very large number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Inset {
    Fixed(f32),
    Unbounded,
}

impl Inset {
    pub fn is_unbounded(self) -> bool {
        matches!(self, Inset::Unbounded)
    }

    /// Numeric value, treating an unbounded edge as zero.
    pub fn or_zero(self) -> f32 {
        match self {
            Inset::Fixed(v) => v,
            Inset::Unbounded => 0.0,
        }
    }
}

impl Default for Inset {
    fn default() -> Self {
        Inset::Fixed(0.0)
    }
}

impl From<f32> for Inset {
    /// `f32::INFINITY` (or NaN) maps to `Unbounded`.
    fn from(value: f32) -> Self {
        if value.is_finite() {
            Inset::Fixed(value)
        } else {
            Inset::Unbounded
        }
    }
}

/// Top/left/bottom/right insets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: Inset,
    pub left: Inset,
    pub bottom: Inset,
    pub right: Inset,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: Inset::Fixed(0.0),
        left: Inset::Fixed(0.0),
        bottom: Inset::Fixed(0.0),
        right: Inset::Fixed(0.0),
    };

    /// Build from raw numbers; non-finite values become `Inset::Unbounded`.
    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top: top.into(),
            left: left.into(),
            bottom: bottom.into(),
            right: right.into(),
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Top edge as a number, zero when unbounded.
    pub fn top_or_zero(&self) -> f32 {
        self.top.or_zero()
    }
}

// =============================================================================
// Node flags
// =============================================================================

bitflags::bitflags! {
    /// Directions a scroll container may scroll in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ScrollDirections: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const VERTICAL = Self::UP.bits() | Self::DOWN.bits();
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

bitflags::bitflags! {
    /// Control state of a button.
    ///
    /// An empty set is the normal state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ControlState: u8 {
        const SELECTED = 1 << 0;
        const DISABLED = 1 << 1;
    }
}

/// Size preset for the profile glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProfileScale {
    Small,
    #[default]
    Large,
}

/// Horizontal alignment of a text block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infinite_inset_is_unbounded() {
        assert_eq!(Inset::from(f32::INFINITY), Inset::Unbounded);
        assert_eq!(Inset::from(12.0), Inset::Fixed(12.0));
        assert_eq!(Inset::Unbounded.or_zero(), 0.0);
    }

    #[test]
    fn test_edge_insets_new() {
        let insets = EdgeInsets::new(f32::INFINITY, 80.0, 60.0, 80.0);
        assert!(insets.top.is_unbounded());
        assert_eq!(insets.left, Inset::Fixed(80.0));
        assert_eq!(insets.top_or_zero(), 0.0);
    }

    #[test]
    fn test_scroll_directions() {
        let dirs = ScrollDirections::UP | ScrollDirections::DOWN;
        assert_eq!(dirs, ScrollDirections::VERTICAL);
        assert!(!dirs.intersects(ScrollDirections::HORIZONTAL));
    }

    #[test]
    fn test_view_state_builder() {
        let state = ViewState::new("A", "desc").pinned(true);
        assert_eq!(state.title, "A");
        assert!(state.is_pinned);
        assert_eq!(state.profile_url, None);
    }
}
