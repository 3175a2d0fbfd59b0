//! Stop generating.

use super::App;

impl App {
    /// Ask the in-flight send to stop.
    ///
    /// The network task answers with `Error("cancelled by user")`, which
    /// settles the placeholder through the normal message path. Returns
    /// `false` when nothing is streaming or a cancel was already requested.
    pub fn cancel_active_stream(&mut self) -> bool {
        let Some(send) = self.active_send.as_mut() else {
            return false;
        };
        let Some(cancel_tx) = send.cancel_tx.take() else {
            return false;
        };

        tracing::info!("User cancelled send {}", send.send_id);
        // The task may have finished already; its terminal event is queued
        let _ = cancel_tx.send(());
        self.mark_dirty();
        true
    }
}
