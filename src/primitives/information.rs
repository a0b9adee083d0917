//! Information block - repository title over its description.

use std::rc::Rc;

use crate::layout::{string_width, wrap_text, Content, Element, LayoutInvalidation, NodeId};
use crate::types::TextAlign;

use super::node::{Node, NodeHandle};
use super::property::Property;

pub struct InformationNode {
    handle: NodeHandle,
    align: TextAlign,
    pub title: Property<String>,
    pub subtitle: Property<String>,
}

impl InformationNode {
    pub fn new(id: NodeId, align: TextAlign, owner: &Rc<LayoutInvalidation>) -> Self {
        Self {
            handle: NodeHandle::new(id, owner),
            align,
            title: Property::new(String::new()),
            subtitle: Property::new(String::new()),
        }
    }

    pub fn align(&self) -> TextAlign {
        self.align
    }

    /// Title and subtitle wrapped to `width` and aligned, ready to draw.
    pub fn render_lines(&self, width: usize) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in [self.title.get(), self.subtitle.get()] {
            for line in wrap_text(&paragraph, width) {
                lines.push(align_line(&line, width, self.align));
            }
        }
        lines
    }
}

fn align_line(line: &str, width: usize, align: TextAlign) -> String {
    let free = width.saturating_sub(string_width(line));
    let left = match align {
        TextAlign::Left => 0,
        TextAlign::Center => free / 2,
        TextAlign::Right => free,
    };
    format!("{}{}", " ".repeat(left), line)
}

impl Node for InformationNode {
    fn handle(&self) -> &NodeHandle {
        &self.handle
    }

    fn element(&self) -> Element {
        Element::new(
            self.id(),
            Content::Text(vec![self.title.get(), self.subtitle.get()]),
        )
    }
}
