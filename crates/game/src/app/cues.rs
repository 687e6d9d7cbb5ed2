use tracing::debug;

/// Fire-and-forget audio trigger names raised by the fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cue {
    Jump,
    Swing,
    Impact,
    Pickup,
    Fanfare,
}

impl Cue {
    pub(crate) fn as_token(self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::Swing => "swing",
            Self::Impact => "impact",
            Self::Pickup => "pickup",
            Self::Fanfare => "fanfare",
        }
    }
}

/// Seam for audio playback. The shipped sink only logs; a real backend
/// implements this trait without the fight code changing.
pub(crate) trait CueSink {
    fn play(&mut self, cue: Cue);
}

pub(crate) struct LogCueSink;

impl CueSink for LogCueSink {
    fn play(&mut self, cue: Cue) {
        debug!(cue = cue.as_token(), "cue");
    }
}

#[cfg(test)]
pub(crate) struct RecordingCueSink {
    pub(crate) played: Vec<Cue>,
}

#[cfg(test)]
impl RecordingCueSink {
    pub(crate) fn new() -> Self {
        Self { played: Vec::new() }
    }
}

#[cfg(test)]
impl CueSink for RecordingCueSink {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}
