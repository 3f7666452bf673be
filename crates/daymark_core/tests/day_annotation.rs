use chrono::NaiveDate;
use daymark_core::{
    AnnotationError, CalendarSource, DailyNoteSource, DateKey, DayMetadata, MemoryDocumentRepository,
    NoActiveDocument, RepoError, Settings, SharedActiveDocument, CLASS_ACTIVE, CLASS_HAS_NOTE,
};
use std::sync::Arc;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

fn words(count: usize) -> String {
    vec!["word"; count].join(" ")
}

fn source_with(
    repo: &Arc<MemoryDocumentRepository>,
    words_per_dot: f64,
) -> DailyNoteSource<MemoryDocumentRepository, SharedActiveDocument> {
    DailyNoteSource::new(
        Arc::clone(repo),
        SharedActiveDocument::new(),
        Settings::with_words_per_dot(words_per_dot),
    )
}

#[tokio::test]
async fn hundred_words_and_one_task_yield_two_filled_one_hollow() {
    let repo = Arc::new(MemoryDocumentRepository::new());
    // The task line adds five whitespace tokens, for 100 in total.
    let content = format!("{}\n- [ ] buy milk", words(95));
    repo.insert_note(day(1), content);
    let source = source_with(&repo, 50.0);

    let metadata = source.get_metadata(day(1)).await.unwrap();
    assert_eq!(metadata.dots.len(), 3);
    assert_eq!(metadata.solid_dot_count(), 2);
    assert_eq!(metadata.hollow_dot_count(), 1);
    assert!(metadata.dots[0].is_filled && metadata.dots[1].is_filled);
    assert!(!metadata.dots[2].is_filled);
}

#[tokio::test]
async fn missing_note_yields_empty_metadata_without_reads() {
    let repo = Arc::new(MemoryDocumentRepository::new());
    let source = source_with(&repo, 50.0);

    let metadata = source.get_metadata(day(2)).await.unwrap();
    assert_eq!(*metadata, DayMetadata::empty());
    assert!(metadata.classes.is_empty());
    assert!(metadata.data_attributes.is_empty());
    assert!(metadata.dots.is_empty());
    assert_eq!(repo.read_count(), 0);
}

#[tokio::test]
async fn empty_note_still_shows_one_filled_dot() {
    let repo = Arc::new(MemoryDocumentRepository::new());
    repo.insert_note(day(3), "");
    let source = source_with(&repo, 10.0);

    let metadata = source.get_metadata(day(3)).await.unwrap();
    assert_eq!(metadata.solid_dot_count(), 1);
    assert_eq!(metadata.hollow_dot_count(), 0);
    assert!(metadata.has_class(CLASS_HAS_NOTE));
}

#[tokio::test]
async fn disabled_scaling_keeps_only_hollow_dots() {
    let repo = Arc::new(MemoryDocumentRepository::new());
    repo.insert_note(day(4), format!("{}\n- [ ] a\n* [ ] b", words(500)));
    let source = source_with(&repo, 0.0);

    let metadata = source.get_metadata(day(4)).await.unwrap();
    assert_eq!(metadata.solid_dot_count(), 0);
    assert_eq!(metadata.hollow_dot_count(), 2);
}

#[tokio::test]
async fn active_note_gets_both_classes() {
    let repo = Arc::new(MemoryDocumentRepository::new());
    let note = repo.insert_note(day(5), "today");
    let active = SharedActiveDocument::new();
    active.set(Some(&note));
    let source = DailyNoteSource::new(Arc::clone(&repo), active.clone(), Settings::default());

    let metadata = source.get_metadata(day(5)).await.unwrap();
    assert!(metadata.has_class(CLASS_HAS_NOTE));
    assert!(metadata.has_class(CLASS_ACTIVE));
    assert_eq!(metadata.classes.len(), 2);
}

#[tokio::test]
async fn active_status_compares_identity_not_content() {
    let repo = Arc::new(MemoryDocumentRepository::new());
    let focused = repo.insert_note(day(6), "same text");
    repo.insert_note(day(7), "same text");
    let active = SharedActiveDocument::new();
    active.set(Some(&focused));
    let source = DailyNoteSource::new(Arc::clone(&repo), active, Settings::default());

    let other = source.get_metadata(day(7)).await.unwrap();
    assert!(other.has_class(CLASS_HAS_NOTE));
    assert!(!other.has_class(CLASS_ACTIVE));
}

#[tokio::test]
async fn header_tags_become_data_attributes_without_marker() {
    let repo = Arc::new(MemoryDocumentRepository::new());
    repo.insert_note_with_tags(
        day(8),
        "body",
        Some(vec!["#work".to_string(), "#personal".to_string()]),
    );
    repo.insert_note(day(9), "---\ntags: [focus, focus]\n---\nbody");
    let source = source_with(&repo, 50.0);

    let tagged = source.get_metadata(day(8)).await.unwrap();
    assert_eq!(tagged.data_attributes, vec!["work", "personal"]);
    let from_header = source.get_metadata(day(9)).await.unwrap();
    assert_eq!(from_header.data_attributes, vec!["focus", "focus"]);
}

#[tokio::test]
async fn second_request_is_served_from_cache() {
    let repo = Arc::new(MemoryDocumentRepository::new());
    repo.insert_note(day(10), words(120));
    let source = source_with(&repo, 50.0);

    let first = source.get_metadata(day(10)).await.unwrap();
    let second = source.get_metadata(day(10)).await.unwrap();

    assert_eq!(*first, *second);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(repo.read_count(), 1);
    assert!(source.cache().contains(&DateKey::from_date(day(10))));
}

#[tokio::test]
async fn cached_record_is_not_refreshed_until_invalidated() {
    let repo = Arc::new(MemoryDocumentRepository::new());
    repo.insert_note(day(11), words(10));
    let source = source_with(&repo, 10.0);

    assert_eq!(source.get_metadata(day(11)).await.unwrap().solid_dot_count(), 1);
    repo.update_content(day(11), words(40));
    assert_eq!(source.get_metadata(day(11)).await.unwrap().solid_dot_count(), 1);

    assert!(source.invalidate(day(11)));
    assert_eq!(source.get_metadata(day(11)).await.unwrap().solid_dot_count(), 4);
    assert_eq!(repo.read_count(), 2);
}

#[tokio::test]
async fn read_failure_propagates_and_is_not_cached() {
    let repo = Arc::new(MemoryDocumentRepository::new());
    repo.insert_note(day(12), "content");
    repo.fail_reads(day(12), "disk unplugged");
    let source = source_with(&repo, 50.0);

    let err = source.get_metadata(day(12)).await.unwrap_err();
    assert!(matches!(
        err,
        AnnotationError::ContentRead { date, .. } if date == day(12)
    ));
    assert!(err.to_string().contains("disk unplugged"));
    assert!(matches!(err.into_repo_error(), RepoError::Io { .. }));
    assert!(source.cache().is_empty());

    repo.clear_read_failure(day(12));
    let recovered = source.get_metadata(day(12)).await.unwrap();
    assert!(recovered.has_class(CLASS_HAS_NOTE));
    assert_eq!(repo.read_count(), 2);
}

#[tokio::test]
async fn concurrent_misses_agree() {
    let repo = Arc::new(MemoryDocumentRepository::new());
    repo.insert_note(day(13), format!("{}\n- [ ] x", words(300)));
    let source = source_with(&repo, 100.0);

    let (left, right) = tokio::join!(source.get_metadata(day(13)), source.get_metadata(day(13)));
    assert_eq!(*left.unwrap(), *right.unwrap());
    assert_eq!(source.cache().len(), 1);
}

#[tokio::test]
async fn sources_are_usable_behind_trait_objects() {
    let repo = Arc::new(MemoryDocumentRepository::new());
    repo.insert_note(day(14), "note");
    let sources: Vec<Box<dyn CalendarSource>> = vec![
        Box::new(DailyNoteSource::new(
            Arc::clone(&repo),
            NoActiveDocument,
            Settings::default(),
        )),
        Box::new(DailyNoteSource::new(
            repo.clone() as Arc<dyn daymark_core::DocumentRepository>,
            NoActiveDocument,
            Settings::with_words_per_dot(-1.0),
        )),
    ];

    let mut solid = Vec::new();
    for source in &sources {
        solid.push(source.get_metadata(day(14)).await.unwrap().solid_dot_count());
    }
    assert_eq!(solid, vec![1, 0]);
}
