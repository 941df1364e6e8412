use crossbeam_channel::Sender;

use crate::engine::action_consumer::ActionConsumer;
use crate::shared::gesture::GestureEvent;

/// Forwards events to another thread so the tick thread never blocks on
/// downstream work.
pub struct ChannelActionConsumer {
    tx: Sender<GestureEvent>,
}

impl ChannelActionConsumer {
    pub fn new(tx: Sender<GestureEvent>) -> Self {
        Self { tx }
    }
}

impl ActionConsumer for ChannelActionConsumer {
    fn on_gesture(&mut self, event: GestureEvent) {
        if self.tx.send(event).is_err() {
            log::debug!("No receiver for {}; event discarded", event.code());
        }
    }
}
