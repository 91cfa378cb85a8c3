use quicknote_core::{
    ControllerError, JsonNoteStore, KeyValueStore, KvError, MemoryKeyValueStore, MemorySurface,
    NoteController, NoteList, NoteStore, NoticeLevel, RowControl, SqliteKeyValueStore, StoreError,
    StoreResult, UiEvent, NOTES_STORAGE_KEY,
};
use rusqlite::Connection;
use std::cell::Cell;

/// Note store whose loads or saves can be switched to fail.
struct FlakyStore<'kv> {
    inner: JsonNoteStore<&'kv MemoryKeyValueStore>,
    fail_load: Cell<bool>,
    fail_save: Cell<bool>,
}

impl<'kv> FlakyStore<'kv> {
    fn new(kv: &'kv MemoryKeyValueStore) -> Self {
        Self {
            inner: JsonNoteStore::new(kv),
            fail_load: Cell::new(false),
            fail_save: Cell::new(false),
        }
    }
}

fn backend_down() -> StoreError {
    StoreError::Kv(KvError::MissingRequiredTable("kv_entries"))
}

impl NoteStore for FlakyStore<'_> {
    fn load(&self) -> StoreResult<NoteList> {
        if self.fail_load.get() {
            return Err(backend_down());
        }
        self.inner.load()
    }

    fn save(&self, notes: &NoteList) -> StoreResult<()> {
        if self.fail_save.get() {
            return Err(backend_down());
        }
        self.inner.save(notes)
    }
}

fn seeded(kv: &MemoryKeyValueStore, texts: &[&str]) {
    JsonNoteStore::new(kv)
        .save(&NoteList::from_texts(texts.iter().copied()))
        .unwrap();
}

fn stored_texts(kv: &MemoryKeyValueStore) -> Vec<String> {
    JsonNoteStore::new(kv)
        .load()
        .unwrap()
        .texts()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn ready_controller(
    kv: &MemoryKeyValueStore,
) -> NoteController<JsonNoteStore<&MemoryKeyValueStore>, MemorySurface> {
    let mut controller = NoteController::new(JsonNoteStore::new(kv), MemorySurface::new());
    controller.handle_event(UiEvent::Ready).unwrap();
    controller
}

#[test]
fn initial_render_shows_stored_notes_in_order() {
    let kv = MemoryKeyValueStore::new();
    seeded(&kv, &["a", "b", "c"]);

    let controller = ready_controller(&kv);
    assert_eq!(controller.surface().row_texts(), vec!["a", "b", "c"]);
    assert!(controller.surface().notices().is_empty());
}

#[test]
fn initial_render_replaces_previous_rows() {
    let kv = MemoryKeyValueStore::new();
    seeded(&kv, &["a"]);
    let mut controller = ready_controller(&kv);

    seeded(&kv, &["b", "c"]);
    controller.initial_render().unwrap();
    assert_eq!(controller.surface().row_texts(), vec!["b", "c"]);
}

#[test]
fn add_appends_saves_renders_and_clears_input() {
    let kv = MemoryKeyValueStore::new();
    seeded(&kv, &["a", "b"]);
    let mut controller = ready_controller(&kv);

    controller.surface_mut().set_input("c");
    controller.handle_event(UiEvent::AddTriggered).unwrap();

    assert_eq!(stored_texts(&kv), vec!["a", "b", "c"]);
    assert_eq!(controller.surface().row_texts(), vec!["a", "b", "c"]);
    assert_eq!(controller.surface().input(), "");
}

#[test]
fn whitespace_input_is_ignored_and_input_kept() {
    let kv = MemoryKeyValueStore::new();
    seeded(&kv, &["a"]);
    let mut controller = ready_controller(&kv);
    let raw_before = kv.get_item(NOTES_STORAGE_KEY).unwrap();

    controller.surface_mut().set_input("   ");
    assert!(!controller.add_note().unwrap());

    assert_eq!(kv.get_item(NOTES_STORAGE_KEY).unwrap(), raw_before);
    assert_eq!(controller.surface().row_texts(), vec!["a"]);
    assert_eq!(controller.surface().input(), "   ");
}

#[test]
fn add_trims_surrounding_whitespace() {
    let kv = MemoryKeyValueStore::new();
    let mut controller = ready_controller(&kv);

    controller.surface_mut().set_input("  hello  ");
    assert!(controller.add_note().unwrap());

    assert_eq!(stored_texts(&kv), vec!["hello"]);
    assert_eq!(controller.surface().row_texts(), vec!["hello"]);
}

#[test]
fn delete_removes_the_clicked_note() {
    let kv = MemoryKeyValueStore::new();
    seeded(&kv, &["x", "y", "z"]);
    let mut controller = ready_controller(&kv);

    let event = controller.surface().delete_event(1).unwrap();
    controller.handle_event(event).unwrap();

    assert_eq!(stored_texts(&kv), vec!["x", "z"]);
    assert_eq!(controller.surface().row_texts(), vec!["x", "z"]);
}

#[test]
fn deleting_either_duplicate_leaves_exactly_one() {
    for clicked in [0, 1] {
        let kv = MemoryKeyValueStore::new();
        seeded(&kv, &["dup", "dup"]);
        let mut controller = ready_controller(&kv);
        let survivor = controller.surface().rows()[1 - clicked].id;

        let event = controller.surface().delete_event(clicked).unwrap();
        controller.handle_event(event).unwrap();

        assert_eq!(stored_texts(&kv), vec!["dup"]);
        let rows = controller.surface().rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, survivor);
    }
}

#[test]
fn delete_of_externally_removed_note_is_a_noop() {
    let kv = MemoryKeyValueStore::new();
    seeded(&kv, &["x", "y"]);
    let mut controller = ready_controller(&kv);
    let stale = controller.surface().rows()[0].id;

    seeded(&kv, &["other"]);
    assert!(!controller.delete_note(stale).unwrap());

    assert_eq!(stored_texts(&kv), vec!["other"]);
    assert_eq!(controller.surface().row_texts(), vec!["other"]);
}

#[test]
fn container_clicks_outside_delete_controls_are_ignored() {
    let kv = MemoryKeyValueStore::new();
    seeded(&kv, &["x"]);
    let mut controller = ready_controller(&kv);
    let id = controller.surface().rows()[0].id;

    controller
        .handle_event(UiEvent::ContainerActivated { target: None })
        .unwrap();
    controller
        .handle_event(UiEvent::ContainerActivated {
            target: Some(RowControl::Text(id)),
        })
        .unwrap();

    assert_eq!(stored_texts(&kv), vec!["x"]);
    assert_eq!(controller.surface().row_texts(), vec!["x"]);
}

#[test]
fn corrupt_store_renders_empty_with_warning() {
    let kv = MemoryKeyValueStore::new();
    kv.set_item(NOTES_STORAGE_KEY, "{broken").unwrap();

    let mut controller = NoteController::new(JsonNoteStore::new(&kv), MemorySurface::new());
    controller.handle_event(UiEvent::Ready).unwrap();

    assert!(controller.surface().rows().is_empty());
    let notices = controller.surface().notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);

    controller.surface_mut().set_input("fresh start");
    controller.add_note().unwrap();
    assert_eq!(stored_texts(&kv), vec!["fresh start"]);
    assert_eq!(controller.surface().row_texts(), vec!["fresh start"]);
}

#[test]
fn legacy_string_array_rows_stay_deletable() {
    let kv = MemoryKeyValueStore::new();
    kv.set_item(NOTES_STORAGE_KEY, r#"["one","two","one"]"#).unwrap();
    let mut controller = ready_controller(&kv);
    assert_eq!(controller.surface().row_texts(), vec!["one", "two", "one"]);

    let event = controller.surface().delete_event(2).unwrap();
    assert!(matches!(event, UiEvent::ContainerActivated { .. }));
    controller.handle_event(event).unwrap();
    assert_eq!(stored_texts(&kv), vec!["one", "two"]);

    controller.surface_mut().set_input("three");
    controller.add_note().unwrap();
    let event = controller.surface().delete_event(0).unwrap();
    controller.handle_event(event).unwrap();
    assert_eq!(stored_texts(&kv), vec!["two", "three"]);
    assert_eq!(controller.surface().row_texts(), vec!["two", "three"]);
}

#[test]
fn failed_save_on_add_keeps_input_rows_and_storage() {
    let kv = MemoryKeyValueStore::new();
    seeded(&kv, &["a", "b"]);
    let mut controller = NoteController::new(FlakyStore::new(&kv), MemorySurface::new());
    controller.handle_event(UiEvent::Ready).unwrap();
    let rows_before = controller.surface().rows().to_vec();

    controller.service().store().fail_save.set(true);
    controller.surface_mut().set_input("c");
    let err = controller.add_note().unwrap_err();

    assert!(matches!(err, ControllerError::Service(_)));
    assert_eq!(controller.surface().input(), "c");
    assert_eq!(controller.surface().rows(), rows_before.as_slice());
    assert_eq!(stored_texts(&kv), vec!["a", "b"]);
    let notices = controller.surface().notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
}

#[test]
fn failed_load_on_delete_keeps_rows_and_storage() {
    let kv = MemoryKeyValueStore::new();
    seeded(&kv, &["x", "y"]);
    let mut controller = NoteController::new(FlakyStore::new(&kv), MemorySurface::new());
    controller.handle_event(UiEvent::Ready).unwrap();
    let rows_before = controller.surface().rows().to_vec();

    controller.service().store().fail_load.set(true);
    let event = controller.surface().delete_event(0).unwrap();
    assert!(controller.handle_event(event).is_err());

    assert_eq!(controller.surface().rows(), rows_before.as_slice());
    assert_eq!(stored_texts(&kv), vec!["x", "y"]);
    let notices = controller.surface().notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
}

#[test]
fn failed_save_on_delete_keeps_rows_and_storage() {
    let kv = MemoryKeyValueStore::new();
    seeded(&kv, &["x", "y"]);
    let mut controller = NoteController::new(FlakyStore::new(&kv), MemorySurface::new());
    controller.handle_event(UiEvent::Ready).unwrap();
    let doomed = controller.surface().rows()[1].id;

    controller.service().store().fail_save.set(true);
    assert!(controller.delete_note(doomed).is_err());

    assert_eq!(controller.surface().row_texts(), vec!["x", "y"]);
    assert_eq!(stored_texts(&kv), vec!["x", "y"]);
    assert_eq!(controller.surface().notices()[0].level, NoticeLevel::Error);
}

#[test]
fn non_text_sqlite_value_degrades_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");
    {
        let kv = SqliteKeyValueStore::open(&path).unwrap();
        drop(kv);
        let conn = Connection::open(&path).unwrap();
        conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES ('notes', X'FF00FE');",
            [],
        )
        .unwrap();
    }

    let kv = SqliteKeyValueStore::open(&path).unwrap();
    let mut controller = NoteController::new(JsonNoteStore::new(&kv), MemorySurface::new());
    controller.handle_event(UiEvent::Ready).unwrap();
    assert!(controller.surface().rows().is_empty());
    assert_eq!(controller.surface().notices()[0].level, NoticeLevel::Warning);

    controller.surface_mut().set_input("fresh");
    controller.handle_event(UiEvent::AddTriggered).unwrap();
    assert_eq!(controller.surface().row_texts(), vec!["fresh"]);
    assert_eq!(
        JsonNoteStore::new(&kv).load().unwrap().texts(),
        vec!["fresh"]
    );
    assert!(controller
        .surface()
        .notices()
        .iter()
        .all(|notice| notice.level == NoticeLevel::Warning));
}
