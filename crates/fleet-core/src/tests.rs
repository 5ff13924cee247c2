use crate::contacts::{ContactError, ContactRegistry};
use crate::log::{LogBook, LogEntry};
use crate::types::{AgentTag, LogKind};

fn entry(at_ms: u64, msg: &str) -> LogEntry {
    LogEntry::new(at_ms, AgentTag::Master, LogKind::Info, msg)
}

#[test]
fn log_book_stays_bounded_and_newest_first() {
    let mut book = LogBook::new(50);
    for i in 0..120u64 {
        book.push(entry(i, &format!("entry {i}")));
    }
    assert_eq!(book.len(), 50);

    let times: Vec<u64> = book.iter().map(|e| e.at_ms).collect();
    assert_eq!(times[0], 119);
    assert!(times.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn recent_for_vehicle_honors_window() {
    let mut book = LogBook::new(50);
    book.push(entry(1_000, "anomaly").for_vehicle("EV-103"));

    assert!(book.recent_for_vehicle("EV-103", 3_000, 5_000));
    assert!(!book.recent_for_vehicle("EV-103", 6_001, 5_000));
    assert!(!book.recent_for_vehicle("EV-104", 3_000, 5_000));
}

#[test]
fn untagged_entries_never_suppress() {
    let mut book = LogBook::new(50);
    book.push(entry(1_000, "general chatter"));
    assert!(!book.recent_for_vehicle("EV-100", 1_500, 5_000));
}

#[test]
fn registry_rejects_blank_fields() {
    let mut reg = ContactRegistry::new();
    assert_eq!(reg.add("", "Spouse", "+1 555"), Err(ContactError::MissingName));
    assert_eq!(reg.add("Dana", "Spouse", "  "), Err(ContactError::MissingPhone));
    assert!(reg.is_empty());

    let added = reg.add("Dana", "Spouse", "+1 555").unwrap();
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.list()[0].id, added.id);
}

#[test]
fn registry_remove_is_lenient() {
    let mut reg = ContactRegistry::new();
    let kept = reg.add("Dana", "Spouse", "+1 555").unwrap();
    let gone = reg.add("Riley", "Friend", "+1 666").unwrap();

    reg.remove(gone.id);
    reg.remove(gone.id); // already gone, no-op
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.joined_names(), "Dana");
    let _ = kept;
}
