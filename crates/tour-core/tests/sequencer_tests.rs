// Tests for the audio tour sequencer state machine.

use tour_core::{format_time, AudioChapter, AudioSequencer, AudioTour, Narrator, Phase, SequencerEvent};

fn chapter(id: &str, duration: u32, viewpoint: &str, order: u32) -> AudioChapter {
    AudioChapter {
        id: id.to_owned(),
        title: id.to_owned(),
        audio_url: format!("/audio/{id}.mp3"),
        duration,
        viewpoint_id: viewpoint.to_owned(),
        transcript: String::new(),
        order,
    }
}

fn make_tour() -> AudioTour {
    AudioTour {
        title: "Test Tour".to_owned(),
        duration: 12,
        chapters: vec![
            chapter("one", 5, "gate", 1),
            chapter("two", 3, "court", 2),
            chapter("three", 4, "garden", 3),
        ],
        narrator: Narrator {
            name: "Narrator".to_owned(),
            bio: String::new(),
        },
    }
}

#[test]
fn five_second_chapter_advances_after_five_ticks() {
    let tour = make_tour();
    let mut seq = AudioSequencer::new();
    seq.start();
    for _ in 0..4 {
        assert_eq!(seq.tick(&tour), None);
    }
    assert_eq!(seq.tick(&tour), Some(SequencerEvent::ChapterStarted(1)));
    assert_eq!(seq.phase(), Phase::Playing { chapter: 1, elapsed: 0 });
}

#[test]
fn last_chapter_finishes_to_stopped() {
    let tour = make_tour();
    let mut seq = AudioSequencer::new();
    seq.seek(2, &tour);
    for _ in 0..3 {
        assert_eq!(seq.tick(&tour), None);
    }
    assert_eq!(seq.tick(&tour), Some(SequencerEvent::Finished));
    assert_eq!(seq.phase(), Phase::Stopped);
}

#[test]
fn tick_while_stopped_does_nothing() {
    let tour = make_tour();
    let mut seq = AudioSequencer::new();
    assert_eq!(seq.tick(&tour), None);
    assert_eq!(seq.phase(), Phase::Stopped);
}

#[test]
fn seek_bypasses_the_duration_check() {
    let tour = make_tour();
    let mut seq = AudioSequencer::new();
    seq.start();
    assert_eq!(seq.tick(&tour), None); // one second into a 5s chapter
    assert!(seq.seek(2, &tour));
    assert_eq!(seq.phase(), Phase::Playing { chapter: 2, elapsed: 0 });
}

#[test]
fn seek_out_of_range_is_ignored() {
    let tour = make_tour();
    let mut seq = AudioSequencer::new();
    seq.start();
    assert!(!seq.seek(3, &tour));
    assert_eq!(seq.chapter(), Some(0));
}

#[test]
fn manual_controls_are_noops_at_the_boundaries() {
    let tour = make_tour();
    let mut seq = AudioSequencer::new();
    seq.start();
    assert_eq!(seq.previous(&tour), None); // already at the first chapter
    assert_eq!(seq.next(&tour), Some(1));
    assert_eq!(seq.next(&tour), Some(2));
    assert_eq!(seq.next(&tour), None); // already at the last chapter
    assert_eq!(seq.chapter(), Some(2));
    assert_eq!(seq.previous(&tour), Some(1));
}

#[test]
fn manual_next_restarts_elapsed() {
    let tour = make_tour();
    let mut seq = AudioSequencer::new();
    seq.start();
    seq.tick(&tour);
    seq.tick(&tour);
    assert_eq!(seq.elapsed(), 2);
    seq.next(&tour);
    assert_eq!(seq.elapsed(), 0);
}

#[test]
fn stop_then_start_restarts_from_the_beginning() {
    let tour = make_tour();
    let mut seq = AudioSequencer::new();
    seq.seek(2, &tour);
    seq.stop();
    seq.start();
    assert_eq!(seq.phase(), Phase::Playing { chapter: 0, elapsed: 0 });
}

#[test]
fn format_time_renders_mm_ss() {
    assert_eq!(format_time(0), "0:00");
    assert_eq!(format_time(59), "0:59");
    assert_eq!(format_time(60), "1:00");
    assert_eq!(format_time(300), "5:00");
    assert_eq!(format_time(2100), "35:00");
}
