use cloudyvents_journal::{event, event_marker_text, scan_events, TracingSink};
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;
use tracing::Level;

#[test]
fn test_events_survive_tracing_formatter() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tracing.log");
    let file = fs::File::create(&path).unwrap();

    let subscriber = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::TRACE)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        tracing::debug!("something");
        event("unittest", "TRIAL1", &TracingSink::default(), None).unwrap();
        tracing::warn!(attempt = 3, "something not an event");
        let marker = event_marker_text("unittest", "TRIAL2", None).unwrap();
        tracing::info!("cruft2 {marker}");
    });

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.lines().count() >= 4);

    let events = scan_events(&path, None, None).unwrap();
    let names: Vec<_> = events.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["TRIAL1", "TRIAL2"]);
}
