//! Audio tour sequencer: a simulated playback clock that counts whole
//! seconds and advances chapters. Deliberately not a decoder; a real media
//! timeline can replace the tick source while keeping the same
//! chapter-advance contract.

use crate::catalog::AudioTour;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Stopped,
    Playing { chapter: usize, elapsed: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    /// A new chapter began; the scene should jump to its viewpoint.
    ChapterStarted(usize),
    /// The last chapter ran out; playback stopped.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSequencer {
    phase: Phase,
}

impl Default for AudioSequencer {
    fn default() -> Self {
        Self {
            phase: Phase::Stopped,
        }
    }
}

impl AudioSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn chapter(&self) -> Option<usize> {
        match self.phase {
            Phase::Playing { chapter, .. } => Some(chapter),
            Phase::Stopped => None,
        }
    }

    pub fn elapsed(&self) -> u32 {
        match self.phase {
            Phase::Playing { elapsed, .. } => elapsed,
            Phase::Stopped => 0,
        }
    }

    /// Begin playback from the first chapter.
    pub fn start(&mut self) {
        self.phase = Phase::Playing {
            chapter: 0,
            elapsed: 0,
        };
    }

    pub fn stop(&mut self) {
        self.phase = Phase::Stopped;
    }

    /// Jump straight to chapter `index`, bypassing the duration check.
    /// Out-of-range indices are ignored.
    pub fn seek(&mut self, index: usize, tour: &AudioTour) -> bool {
        if index >= tour.chapters.len() {
            return false;
        }
        self.phase = Phase::Playing {
            chapter: index,
            elapsed: 0,
        };
        true
    }

    /// Manual next-chapter control; no-op at the last chapter.
    pub fn next(&mut self, tour: &AudioTour) -> Option<usize> {
        let chapter = self.chapter()?;
        if chapter + 1 >= tour.chapters.len() {
            return None;
        }
        self.seek(chapter + 1, tour).then_some(chapter + 1)
    }

    /// Manual previous-chapter control; no-op at the first chapter.
    pub fn previous(&mut self, tour: &AudioTour) -> Option<usize> {
        let chapter = self.chapter()?;
        if chapter == 0 {
            return None;
        }
        self.seek(chapter - 1, tour).then_some(chapter - 1)
    }

    /// Advance the simulated clock by one second. When the current chapter's
    /// duration runs out, either move to the next chapter or stop after the
    /// last one.
    pub fn tick(&mut self, tour: &AudioTour) -> Option<SequencerEvent> {
        let Phase::Playing { chapter, elapsed } = self.phase else {
            return None;
        };
        let duration = tour.chapters.get(chapter)?.duration;
        let elapsed = elapsed + 1;
        if elapsed < duration {
            self.phase = Phase::Playing { chapter, elapsed };
            return None;
        }
        if chapter + 1 < tour.chapters.len() {
            self.phase = Phase::Playing {
                chapter: chapter + 1,
                elapsed: 0,
            };
            Some(SequencerEvent::ChapterStarted(chapter + 1))
        } else {
            self.phase = Phase::Stopped;
            Some(SequencerEvent::Finished)
        }
    }
}

/// mm:ss clock label for a chapter position.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
