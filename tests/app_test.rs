//! Form behavior tests
//!
//! Drives the application through its buttons with fake speech and
//! playback, the way a user would.

mod common;

use common::Harness;
use std::time::Duration;
use voicegen::audio::PlaybackToken;
use voicegen::state::{AppEvent, Phase, PhraseStatus};

#[test]
fn test_generate_all_creates_one_record_per_line() {
    let mut h = Harness::new();
    h.generate("Hallo\n\n  Wie geht's?  \n");

    let records = h.app.registry.records();
    assert_eq!(records.len(), 2);
    assert_eq!((records[0].id, records[0].text.as_str()), (1, "Hallo"));
    assert_eq!((records[1].id, records[1].text.as_str()), (2, "Wie geht's?"));
    assert!(records.iter().all(|r| r.status == PhraseStatus::Generated));
    assert!(records.iter().all(|r| r.has_audio()));
    assert_eq!(h.app.status(), "Successfully generated 2/2 phrases!");
}

#[test]
fn test_generate_all_requests_phrases_in_order() {
    let mut h = Harness::new();
    h.generate("eins\nzwei\ndrei");

    let audio: Vec<String> = h
        .app
        .registry
        .iter()
        .map(|r| String::from_utf8(r.audio.clone().unwrap()).unwrap())
        .collect();
    assert_eq!(audio, vec!["eins#1", "zwei#2", "drei#3"]);
}

#[test]
fn test_generate_all_rejects_blank_input() {
    let mut h = Harness::new();
    h.generate("eins");

    h.app.input.set_text("   \n\t\n");
    h.app.generate_all();

    assert_eq!(
        h.alert(),
        Some(("Error".to_string(), "Please enter some German text!".to_string()))
    );
    // Previous results are untouched
    assert_eq!(h.app.registry.len(), 1);
    assert_eq!(*h.app.phase(), Phase::Idle);
}

#[test]
fn test_failed_phrase_keeps_batch_going() {
    let mut h = Harness::new();
    h.generate("Eins\nFAIL zwei\nDrei");

    let statuses: Vec<PhraseStatus> = h.app.registry.iter().map(|r| r.status.clone()).collect();
    assert_eq!(statuses[0], PhraseStatus::Generated);
    assert_eq!(
        statuses[1],
        PhraseStatus::Failed("Speech synthesis error: simulated failure".to_string())
    );
    assert_eq!(statuses[2], PhraseStatus::Generated);
    assert!(!h.app.registry.get(1).unwrap().has_audio());
    assert_eq!(h.app.status(), "Successfully generated 2/3 phrases!");
}

#[test]
fn test_play_all_skips_records_without_audio() {
    let mut h = Harness::new();
    h.generate("Eins\nFAIL zwei\nDrei");

    h.app.play_all();
    h.settle();

    assert_eq!(h.played_texts(), vec!["Eins", "Drei"]);
    assert_eq!(h.app.status(), "Finished playing all phrases");
}

#[test]
fn test_play_all_without_phrases() {
    let mut h = Harness::new();
    h.app.play_all();

    assert_eq!(
        h.alert(),
        Some(("Error".to_string(), "No phrases generated yet!".to_string()))
    );
    assert!(h.played_texts().is_empty());
}

#[test]
fn test_clear_empties_everything() {
    let mut h = Harness::new();
    h.generate("Hallo\nTschüss");
    h.app.select(Some(1));

    h.app.clear();

    assert!(h.app.registry.is_empty());
    assert!(h.app.input.is_empty());
    assert_eq!(h.app.selected(), None);
    assert_eq!(h.app.status(), "Cleared input and results");
    assert!(h.stops.load(std::sync::atomic::Ordering::SeqCst) >= 1);
}

#[test]
fn test_clear_abandons_generation_in_flight() {
    let mut h = Harness::with_delay(Duration::from_millis(50));
    h.app.input.set_text("eins\nzwei");
    h.app.generate_all();
    assert!(h.app.is_busy());

    h.app.clear();
    assert_eq!(*h.app.phase(), Phase::Idle);

    // The late result belongs to the abandoned batch
    std::thread::sleep(Duration::from_millis(200));
    h.app.pump_events();
    assert!(h.app.registry.is_empty());
    assert_eq!(h.app.status(), "Cleared input and results");
}

#[test]
fn test_busy_form_refuses_other_buttons() {
    let mut h = Harness::with_delay(Duration::from_millis(50));
    h.app.input.set_text("eins\nzwei");
    h.app.generate_all();

    h.app.play_all();
    assert_eq!(
        h.alert(),
        Some((
            "Error".to_string(),
            "Please wait for the current operation to finish!".to_string()
        ))
    );

    h.settle();
    assert_eq!(h.app.registry.len(), 2);
    assert!(h.played_texts().is_empty());
}

#[test]
fn test_regenerate_replaces_only_selected_record() {
    let mut h = Harness::new();
    h.generate("Hallo\nWie geht's?");
    let first = h.app.registry.get(0).unwrap().clone();
    let before = h.app.registry.get(1).unwrap().audio.clone();

    h.app.select(Some(1));
    h.app.regenerate_selected();
    h.settle();

    let second = h.app.registry.get(1).unwrap();
    assert_eq!(second.status, PhraseStatus::Regenerated);
    assert_ne!(second.audio, before);
    assert_eq!(second.audio.as_deref(), Some(&b"Wie geht's?#3"[..]));
    assert_eq!(h.app.registry.get(0).unwrap(), &first);
    assert_eq!(h.app.status(), "Regeneration successful!");
}

#[test]
fn test_regenerate_failure_marks_record() {
    let mut h = Harness::new();
    h.generate("FAIL eins");
    h.app.select(Some(0));

    h.app.regenerate_selected();
    h.settle();

    let record = h.app.registry.get(0).unwrap();
    assert!(matches!(record.status, PhraseStatus::Failed(_)));
    let (title, message) = h.alert().unwrap();
    assert_eq!(title, "Error");
    assert!(message.starts_with("Error regenerating: "));
}

#[test]
fn test_selection_buttons_need_a_selection() {
    let mut h = Harness::new();
    h.app.play_selected();
    assert_eq!(h.alert().unwrap().1, "No phrases generated yet!");
    h.app.handlers.clear();

    h.generate("Hallo");
    h.app.save_selected();
    assert_eq!(h.alert().unwrap().1, "Please select a phrase!");
}

#[test]
fn test_play_selected_without_audio() {
    let mut h = Harness::new();
    h.generate("FAIL");
    h.app.select(Some(0));

    h.app.play_selected();

    assert_eq!(h.alert().unwrap().1, "No audio for this phrase!");
    assert!(h.played_texts().is_empty());
}

#[test]
fn test_play_selected_plays_one_clip() {
    let mut h = Harness::new();
    h.generate("Hallo\nTschüss");
    h.app.select(Some(1));

    h.app.play_selected();
    assert!(h.app.status().starts_with("Playing: \"Tschüss"));
    h.settle();

    assert_eq!(h.played_texts(), vec!["Tschüss"]);
    assert_eq!(h.app.status(), "Ready");
}

#[test]
fn test_selection_is_clamped_to_registry() {
    let mut h = Harness::new();
    h.generate("a1\nb2\nc3");

    h.app.select(Some(7));
    assert_eq!(h.app.selected(), None);

    h.app.move_selection(1);
    assert_eq!(h.app.selected(), Some(0));
    h.app.move_selection(10);
    assert_eq!(h.app.selected(), Some(2));
    h.app.move_selection(-10);
    assert_eq!(h.app.selected(), Some(0));
}

#[test]
fn test_save_all_writes_numbered_files() {
    let mut h = Harness::new();
    h.generate("Eins\nFAIL zwei\nDrei");
    let out = h.dir.path().join("out");

    let report = h.app.save_all_to(out.to_str().unwrap()).unwrap();

    assert_eq!((report.saved, report.total), (2, 3));
    assert_eq!(
        std::fs::read(out.join("german_phrase_1.mp3")).unwrap(),
        b"Eins#1"
    );
    assert!(!out.join("german_phrase_2.mp3").exists());
    assert!(out.join("german_phrase_3.mp3").exists());
    assert_eq!(
        h.alert(),
        Some(("Success".to_string(), "Saved 2 MP3 files!".to_string()))
    );
}

#[test]
fn test_save_all_cancelled_by_empty_answer() {
    let mut h = Harness::new();
    h.generate("Eins");
    assert!(h.app.save_all_to("").is_none());
    assert!(h.alert().is_none());
}

#[test]
fn test_save_selected_adds_extension() {
    let mut h = Harness::new();
    h.generate("Hallo");
    let target = h.dir.path().join("gruss");

    let saved = h
        .app
        .save_selected_to(0, 1, target.to_str().unwrap())
        .unwrap();

    assert_eq!(saved, h.dir.path().join("gruss.mp3"));
    assert_eq!(std::fs::read(&saved).unwrap(), b"Hallo#1");
    assert_eq!(h.app.status(), "Saved: gruss.mp3");
}

#[test]
fn test_save_selected_after_clear_writes_nothing() {
    let mut h = Harness::new();
    h.generate("Hallo");
    h.app.clear();
    let target = h.dir.path().join("gruss.mp3");

    assert!(h.app.save_selected_to(0, 1, target.to_str().unwrap()).is_none());
    assert!(!target.exists());
    assert_eq!(h.alert().unwrap().1, "The selected phrase no longer exists!");
}

#[test]
fn test_regenerate_without_selection_changes_nothing() {
    let mut h = Harness::new();
    h.generate("eins\nzwei");
    let before = h.app.registry.clone();

    h.app.regenerate_selected();

    assert_eq!(h.alert().unwrap().1, "Please select a phrase!");
    assert_eq!(*h.app.phase(), Phase::Idle);
    assert_eq!(h.app.registry.records(), before.records());
}

#[test]
fn test_failed_regeneration_keeps_previous_audio() {
    let mut h = Harness::new();
    h.generate("Hallo");
    let before = h.app.registry.get(0).unwrap().audio.clone();
    assert!(before.is_some());

    // The next request for this record fails
    h.app.registry.get_mut(0).unwrap().text = "Hallo FAIL".to_string();
    h.app.select(Some(0));
    h.app.regenerate_selected();
    h.settle();

    let record = h.app.registry.get(0).unwrap();
    assert!(matches!(record.status, PhraseStatus::Failed(_)));
    assert!(record.has_audio());
    assert_eq!(record.audio, before);

    h.app.handlers.clear();
    h.app.play_selected();
    assert!(h.alert().is_none());
    assert_eq!(h.played_texts(), vec!["Hallo"]);
}

#[test]
fn test_play_all_ignores_completion_of_other_clips() {
    let mut h = Harness::new();
    h.generate("eins\nzwei\ndrei");
    h.hold_playback();

    h.app.play_all();
    let first = h.current_token().unwrap();
    assert_eq!(h.played_texts(), vec!["eins"]);

    h.app
        .handle_event(AppEvent::PlaybackFinished(PlaybackToken(first.0 + 100)));
    assert!(matches!(h.app.phase(), Phase::PlayingAll { token, .. } if *token == first));
    assert_eq!(h.played_texts(), vec!["eins"]);

    h.app.handle_event(AppEvent::PlaybackFinished(first));
    let second = h.current_token().unwrap();
    assert_ne!(second, first);
    assert_eq!(h.played_texts(), vec!["eins", "zwei"]);

    // A repeated event for the finished clip changes nothing
    h.app.handle_event(AppEvent::PlaybackFinished(first));
    assert_eq!(h.current_token(), Some(second));
    assert_eq!(h.played_texts(), vec!["eins", "zwei"]);

    h.app.handle_event(AppEvent::PlaybackFinished(second));
    let third = h.current_token().unwrap();
    h.app.handle_event(AppEvent::PlaybackFinished(third));
    assert_eq!(*h.app.phase(), Phase::Idle);
    assert_eq!(h.played_texts(), vec!["eins", "zwei", "drei"]);
    assert_eq!(h.app.status(), "Finished playing all phrases");
}

#[test]
fn test_replaced_clip_does_not_reset_status() {
    let mut h = Harness::new();
    h.generate("Hallo\nTschüss");
    h.hold_playback();

    h.app.select(Some(0));
    h.app.play_selected();
    let first = h.current_token().unwrap();

    h.app.select(Some(1));
    h.app.play_selected();
    let second = h.current_token().unwrap();
    assert_ne!(first, second);

    h.app.handle_event(AppEvent::PlaybackFinished(first));
    assert_eq!(*h.app.phase(), Phase::Playing(second));
    assert!(h.app.status().starts_with("Playing: \"Tschüss"));

    h.app.handle_event(AppEvent::PlaybackFinished(second));
    assert_eq!(*h.app.phase(), Phase::Idle);
    assert_eq!(h.app.status(), "Ready");
}

#[test]
fn test_exit_stops_playback() {
    let mut h = Harness::new();
    h.generate("Hallo");
    h.hold_playback();
    h.app.select(Some(0));
    h.app.play_selected();
    assert!(h.current_token().is_some());

    let before = h.stop_count();
    h.app.exit();

    assert!(h.stop_count() > before);
    assert!(h.app.should_quit());
}
