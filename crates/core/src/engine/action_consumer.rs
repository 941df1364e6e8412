use crate::shared::gesture::GestureEvent;

/// Receives emitted gestures.
///
/// Invoked synchronously on the tick thread that produced the event, so
/// implementations must return promptly and must not call back into the
/// engine.
pub trait ActionConsumer: Send {
    fn on_gesture(&mut self, event: GestureEvent);
}

impl<F> ActionConsumer for F
where
    F: FnMut(GestureEvent) + Send,
{
    fn on_gesture(&mut self, event: GestureEvent) {
        self(event)
    }
}
