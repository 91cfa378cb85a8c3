//! JSON encoding of the note list over a key-value backend.
//!
//! Stored shape: a JSON array of `{"id": "<uuid>", "text": "..."}` objects.
//! Bare strings inside the array are accepted on read, so values written as a
//! plain array of strings keep loading. Their ids are derived from position
//! and text, which keeps them stable across loads until the next save
//! rewrites the list in full form.

use super::{json_category, CorruptDataError, NoteStore, StoreError, StoreResult};
use crate::kv::{KeyValueStore, KvError};
use crate::model::note::{Note, NoteId, NoteList};
use log::{debug, warn};
use serde::Deserialize;
use uuid::Uuid;

/// Fixed key the note list is persisted under.
pub const NOTES_STORAGE_KEY: &str = "notes";

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredNote {
    Full(Note),
    Text(String),
}

impl StoredNote {
    fn into_note(self, index: usize) -> Note {
        match self {
            Self::Full(note) => note,
            Self::Text(text) => {
                let name = format!("{index}:{text}");
                let id = NoteId::from_uuid(Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()));
                Note::with_id(id, text)
            }
        }
    }
}

/// `NoteStore` writing the whole list as one JSON blob under a fixed key.
pub struct JsonNoteStore<K: KeyValueStore> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> JsonNoteStore<K> {
    /// Creates a store persisting under `NOTES_STORAGE_KEY`.
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, NOTES_STORAGE_KEY)
    }

    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// Deletes the persisted list, leaving the store empty.
    pub fn clear(&self) -> StoreResult<()> {
        self.kv.remove_item(&self.key)?;
        debug!("event=store_clear module=store status=ok");
        Ok(())
    }
}

impl<K: KeyValueStore> NoteStore for JsonNoteStore<K> {
    fn load(&self) -> StoreResult<NoteList> {
        let raw = match self.kv.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=store_load module=store status=ok source=absent count=0");
                return Ok(NoteList::new());
            }
            Err(KvError::InvalidValue { reason, .. }) => {
                warn!(
                    "event=store_load module=store status=error error_code=corrupt_data category=not_text reason={}",
                    reason
                );
                return Err(CorruptDataError::not_text(self.key.as_str(), reason).into());
            }
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            debug!("event=store_load module=store status=ok source=blank count=0");
            return Ok(NoteList::new());
        }

        let stored: Vec<StoredNote> = serde_json::from_str(&raw).map_err(|err| {
            warn!(
                "event=store_load module=store status=error error_code=corrupt_data category={} line={} column={} bytes={}",
                json_category(&err),
                err.line(),
                err.column(),
                raw.len()
            );
            CorruptDataError::json(self.key.as_str(), err)
        })?;

        let notes: NoteList = stored
            .into_iter()
            .enumerate()
            .map(|(index, entry)| entry.into_note(index))
            .collect::<Vec<_>>()
            .into();
        debug!(
            "event=store_load module=store status=ok source=stored count={}",
            notes.len()
        );
        Ok(notes)
    }

    fn save(&self, notes: &NoteList) -> StoreResult<()> {
        let encoded = serde_json::to_string(notes).map_err(StoreError::Encode)?;
        self.kv.set_item(&self.key, &encoded)?;
        debug!(
            "event=store_save module=store status=ok count={} bytes={}",
            notes.len(),
            encoded.len()
        );
        Ok(())
    }
}
