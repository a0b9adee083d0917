//! Event emitter - button taps into interactor commands.

use tracing::trace;

use crate::reactive::{DisposalSet, Observable};
use crate::types::{Command, RepositoryId};

use super::container::SceneNodes;
use super::interactor::InteractorLogic;

/// Forward pin and dismiss taps to the interactor, stamped with the scene's
/// repository id.
pub fn bind_action(
    nodes: &SceneNodes,
    repository_id: RepositoryId,
    interactor: &dyn InteractorLogic,
    bag: &mut DisposalSet,
) {
    bag.insert(
        nodes
            .pin_button
            .taps()
            .map(move |_: &()| {
                trace!(repository_id, "pin tapped");
                Command::new(repository_id)
            })
            .forward_to(interactor.did_tap_pin()),
    );

    bag.insert(
        nodes
            .dismiss_button
            .taps()
            .map(move |_: &()| {
                trace!(repository_id, "dismiss tapped");
                Command::new(repository_id)
            })
            .forward_to(interactor.did_tap_dismiss_button()),
    );
}
