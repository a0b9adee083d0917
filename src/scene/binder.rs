//! Binder - view-state fields onto node properties.
//!
//! Each field gets its own subscription: project, drop consecutive
//! duplicates, write to exactly one property. Fields whose value changes the
//! node's size also mark the node as needing layout.

use crate::primitives::{Node, NodeHandle};
use crate::reactive::{DisposalSet, DistinctUntilChanged, HotStream, Map, Observable};
use crate::types::ViewState;

use super::container::SceneNodes;

/// Projection of one field, deduplicated.
fn field<V, F>(state: &HotStream<ViewState>, selector: F) -> DistinctUntilChanged<Map<HotStream<ViewState>, F, V>>
where
    F: Fn(&ViewState) -> V + 'static,
    V: Clone + PartialEq + 'static,
{
    state.clone().map(selector).distinct_until_changed()
}

/// Wrap a mutator so every write also invalidates `node`'s layout.
fn with_relayout<V>(node: NodeHandle, mut mutator: impl FnMut(V)) -> impl FnMut(V) {
    move |value| {
        mutator(value);
        node.set_needs_layout();
    }
}

/// Bind every displayed field of `state` into `nodes`, storing the
/// subscriptions in `bag`.
pub fn bind_state(nodes: &SceneNodes, state: &HotStream<ViewState>, bag: &mut DisposalSet) {
    let profile = nodes.profile.clone();
    bag.insert(
        field(state, |s| s.profile_url.clone()).bind_to(move |url| profile.url.set(url)),
    );

    let info = nodes.information.clone();
    bag.insert(field(state, |s| s.title.clone()).bind_to(with_relayout(
        info.handle().clone(),
        move |title| info.title.set(title),
    )));

    let info = nodes.information.clone();
    bag.insert(field(state, |s| s.description.clone()).bind_to(with_relayout(
        info.handle().clone(),
        move |desc| info.subtitle.set(desc),
    )));

    let profile = nodes.profile.clone();
    bag.insert(field(state, |s| s.is_pinned).bind_to(with_relayout(
        profile.handle().clone(),
        move |pinned| profile.is_pinned.set(pinned),
    )));

    let pin_button = nodes.pin_button.clone();
    bag.insert(
        field(state, |s| s.is_pinned).bind_to(move |pinned| pin_button.set_selected(pinned)),
    );
}
