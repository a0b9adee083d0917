//! Button - a bordered label that emits taps.
//!
//! Taps are a hot stream of unit events. The button never looks at who is
//! listening; binding taps to commands is the scene's job.

use std::rc::Rc;

use crate::layout::{string_width, truncate_text, Content, Element, LayoutInvalidation, NodeId};
use crate::reactive::HotStream;
use crate::types::{ControlState, EdgeInsets};

use super::node::{Node, NodeHandle};
use super::property::Property;

pub struct ButtonNode {
    handle: NodeHandle,
    title: String,
    selected_title: Option<String>,
    content_insets: EdgeInsets,
    border: f32,
    pub state: Property<ControlState>,
    taps: HotStream<()>,
}

impl ButtonNode {
    pub fn new(id: NodeId, title: impl Into<String>, owner: &Rc<LayoutInvalidation>) -> Self {
        Self {
            handle: NodeHandle::new(id, owner),
            title: title.into(),
            selected_title: None,
            content_insets: EdgeInsets::ZERO,
            border: 0.0,
            state: Property::new(ControlState::empty()),
            taps: HotStream::new(),
        }
    }

    /// Label shown while selected.
    pub fn with_selected_title(mut self, title: impl Into<String>) -> Self {
        self.selected_title = Some(title.into());
        self
    }

    pub fn with_content_insets(mut self, insets: EdgeInsets) -> Self {
        self.content_insets = insets;
        self
    }

    pub fn with_border(mut self, width: f32) -> Self {
        self.border = width;
        self
    }

    pub fn is_selected(&self) -> bool {
        self.state.get().contains(ControlState::SELECTED)
    }

    pub fn set_selected(&self, selected: bool) {
        let mut state = self.state.get();
        state.set(ControlState::SELECTED, selected);
        self.state.set(state);
    }

    pub fn set_enabled(&self, enabled: bool) {
        let mut state = self.state.get();
        state.set(ControlState::DISABLED, !enabled);
        self.state.set(state);
    }

    /// Label for the current state.
    pub fn label(&self) -> &str {
        match (&self.selected_title, self.is_selected()) {
            (Some(selected), true) => selected,
            _ => &self.title,
        }
    }

    /// Current label cut to `width` cells, with an ellipsis when it overflows.
    pub fn label_within(&self, width: usize) -> String {
        truncate_text(self.label(), width)
    }

    /// Emit a tap. Ignored while disabled.
    pub fn tap(&self) {
        if self.state.get().contains(ControlState::DISABLED) {
            return;
        }
        self.taps.emit(());
    }

    /// Tap events (hot).
    pub fn taps(&self) -> HotStream<()> {
        self.taps.clone()
    }

    fn widest_label(&self) -> &str {
        std::iter::once(&self.title)
            .chain(self.selected_title.as_ref())
            .max_by_key(|label| string_width(label))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Outer width: widest label plus content insets and border.
    pub fn intrinsic_width(&self) -> f32 {
        string_width(self.widest_label()) as f32
            + self.content_insets.left.or_zero()
            + self.content_insets.right.or_zero()
            + 2.0 * self.border
    }
}

impl Node for ButtonNode {
    fn handle(&self) -> &NodeHandle {
        &self.handle
    }

    /// Sized for the wider of both labels, so toggling selection never
    /// changes geometry.
    fn element(&self) -> Element {
        Element::new(self.id(), Content::Text(vec![self.widest_label().to_string()]))
            .padding(self.content_insets)
            .border(self.border)
    }
}
