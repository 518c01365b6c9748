//! Audio sink interface. The simulation reports what should be heard; the
//! frontend decides how to play it.

use brigantine_core::events::AudioEvent;

pub trait AudioSink {
    fn play(&mut self, event: AudioEvent);
}

/// Buffer events for the next snapshot.
impl AudioSink for Vec<AudioEvent> {
    fn play(&mut self, event: AudioEvent) {
        self.push(event);
    }
}

/// Drop every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _event: AudioEvent) {}
}
