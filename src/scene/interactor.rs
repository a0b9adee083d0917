//! Interactor-facing contract.
//!
//! The scene only knows two named sinks. Whatever sits behind them (a
//! business-logic thread, a test) receives [`Command`]s in send order per sink.

use std::sync::mpsc::Receiver;

use crate::reactive::{channel, Publisher};
use crate::types::Command;

/// Sinks the scene forwards user intents to.
pub trait InteractorLogic {
    /// Pin-toggle intent.
    fn did_tap_pin(&self) -> Publisher<Command>;
    /// Dismiss intent.
    fn did_tap_dismiss_button(&self) -> Publisher<Command>;
}

/// Channel-backed [`InteractorLogic`].
#[derive(Clone, Debug)]
pub struct InteractorSinks {
    pin: Publisher<Command>,
    dismiss: Publisher<Command>,
}

/// Receiving ends matching an [`InteractorSinks`].
#[derive(Debug)]
pub struct InteractorInbox {
    pub pin: Receiver<Command>,
    pub dismiss: Receiver<Command>,
}

/// Create connected sinks and inbox.
pub fn interactor_channel() -> (InteractorSinks, InteractorInbox) {
    let (pin, pin_rx) = channel();
    let (dismiss, dismiss_rx) = channel();
    (
        InteractorSinks { pin, dismiss },
        InteractorInbox {
            pin: pin_rx,
            dismiss: dismiss_rx,
        },
    )
}

impl InteractorLogic for InteractorSinks {
    fn did_tap_pin(&self) -> Publisher<Command> {
        self.pin.clone()
    }

    fn did_tap_dismiss_button(&self) -> Publisher<Command> {
        self.dismiss.clone()
    }
}
