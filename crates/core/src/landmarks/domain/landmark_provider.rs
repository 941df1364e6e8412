use thiserror::Error;

use crate::landmarks::domain::frame::Frame;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// No further frames will ever be produced (e.g. end of a recording).
    #[error("landmark stream exhausted")]
    Exhausted,
    #[error("landmark estimation failed: {0}")]
    Estimation(String),
    #[error("failed to read landmark stream: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed landmark record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl ProviderError {
    /// Whether the scheduler should stop rather than retry next tick.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProviderError::Exhausted)
    }
}

/// Produces one landmark frame per tick.
///
/// `next_frame` may block for an unbounded, provider-dependent time; it is
/// the only suspension point of the tick loop. Implementations are stateful
/// (camera handles, file cursors), hence `&mut self`.
pub trait LandmarkProvider: Send {
    fn next_frame(&mut self) -> Result<Frame, ProviderError>;
}
