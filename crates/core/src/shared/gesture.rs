use serde::{Deserialize, Serialize};

/// Monotonic milliseconds.
pub type Timestamp = u64;

/// The closed output vocabulary of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GestureCode {
    NextSong,
    PreviousSong,
    NextSection,
    PreviousSection,
}

impl GestureCode {
    pub const ALL: &[GestureCode] = &[
        GestureCode::NextSong,
        GestureCode::PreviousSong,
        GestureCode::NextSection,
        GestureCode::PreviousSection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NextSong => "NEXT_SONG",
            Self::PreviousSong => "PREVIOUS_SONG",
            Self::NextSection => "NEXT_SECTION",
            Self::PreviousSection => "PREVIOUS_SECTION",
        }
    }
}

impl std::fmt::Display for GestureCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A gesture accepted by the debounce gate. Created once per emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureEvent {
    code: GestureCode,
    fired_at: Timestamp,
}

impl GestureEvent {
    pub fn new(code: GestureCode, fired_at: Timestamp) -> Self {
        Self { code, fired_at }
    }

    pub fn code(&self) -> GestureCode {
        self.code
    }

    pub fn fired_at(&self) -> Timestamp {
        self.fired_at
    }
}
