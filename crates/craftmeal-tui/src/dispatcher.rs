/// Central dispatcher for the flux architecture.
/// Receives Actions and forwards them to Stores and Effects.
use crate::actions::Action;
use tokio::sync::mpsc;

/// Routes Actions to all registered handlers through an unbounded channel
#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Action>,
}

impl Dispatcher {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// The single entry point for all state changes
    pub fn dispatch(&self, action: Action) {
        if let Err(e) = self.tx.send(action) {
            log::error!("Failed to dispatch action: {}", e);
        }
    }
}

/// Pulls actions off the channel for the main loop
pub struct ActionReceiver {
    rx: mpsc::UnboundedReceiver<Action>,
}

impl ActionReceiver {
    pub fn new(rx: mpsc::UnboundedReceiver<Action>) -> Self {
        Self { rx }
    }

    pub async fn recv(&mut self) -> Option<Action> {
        self.rx.recv().await
    }
}
