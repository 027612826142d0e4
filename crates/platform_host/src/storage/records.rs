//! Persisted file records and the library CRUD layer over the key-value store.

use std::rc::Rc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::files::{FileKind, RawFile};
use crate::metadata::MetadataRecord;
use crate::storage::kv::KeyValueStore;
use crate::time::{next_monotonic_timestamp_ms, now_rfc3339};

/// Single logical key holding the JSON-serialized record collection.
pub const FILE_LIBRARY_KEY: &str = "viewer.files.v1";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure modes of the persisted file library.
pub enum StoreError {
    /// The source file could not be read into memory.
    #[error("failed to read file: {0}")]
    Read(String),
    /// The backing store rejected the write, typically on its size quota.
    #[error("storage rejected the write: {0}")]
    QuotaExceeded(String),
    /// A persisted payload is not a valid data URL for its record.
    #[error("stored payload is corrupt")]
    CorruptRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One previously opened file, persisted with its encoded content.
///
/// Records are immutable after insertion except for `last_accessed_at`.
pub struct StoredFileRecord {
    /// Unique identifier: monotonic unix-ms stamp plus a random hex suffix.
    pub id: String,
    /// Original file name.
    pub name: String,
    /// MIME type declared by the source file.
    pub mime_type: String,
    /// Content length in bytes; the payload decodes to exactly this many.
    pub size_bytes: u64,
    /// Document or image classification, decided once at validation time.
    pub kind: FileKind,
    /// Full content as a self-describing data URL (`data:<mime>;base64,...`).
    pub payload: String,
    /// Extracted metadata, absent when extraction failed.
    #[serde(default)]
    pub metadata: Option<MetadataRecord>,
    /// RFC 3339 insertion time.
    pub created_at: String,
    /// RFC 3339 time of the most recent open.
    pub last_accessed_at: String,
}

impl StoredFileRecord {
    /// Returns whether the record was reopened after its initial insertion.
    pub fn reopened(&self) -> bool {
        self.last_accessed_at != self.created_at
    }
}

/// Persisted file library over an injected [`KeyValueStore`].
///
/// The whole collection lives under [`FILE_LIBRARY_KEY`] and every mutation
/// is a read-modify-write of that one value. Two browser tabs mutating the
/// library race as last-writer-wins; acceptable for a single-user local tool
/// and kept deliberately, matching the storage model this layer wraps.
#[derive(Clone)]
pub struct FileLibrary {
    store: Rc<dyn KeyValueStore>,
}

impl FileLibrary {
    /// Creates a library over the injected store capability.
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns every persisted record in storage order.
    ///
    /// An absent key or unparseable collection yields an empty list;
    /// availability is preferred over surfacing a corrupt store.
    pub fn list(&self) -> Vec<StoredFileRecord> {
        let Some(raw) = self.store.get(FILE_LIBRARY_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    /// Encodes `file` and appends a new record to the persisted collection.
    ///
    /// Deduplication is the caller's policy; see [`FileLibrary::is_known`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::QuotaExceeded`] when the backing store rejects
    /// the write.
    pub fn insert(
        &self,
        file: &RawFile,
        kind: FileKind,
        metadata: Option<MetadataRecord>,
    ) -> Result<StoredFileRecord, StoreError> {
        let stamp = now_rfc3339();
        let record = StoredFileRecord {
            id: new_record_id(),
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
            size_bytes: file.size_bytes(),
            kind,
            payload: file.to_data_url(),
            metadata,
            created_at: stamp.clone(),
            last_accessed_at: stamp,
        };

        let mut records = self.list();
        records.push(record.clone());
        self.persist(&records)?;
        Ok(record)
    }

    /// Stamps `last_accessed_at` on the matching record and persists.
    ///
    /// Unknown ids leave the collection unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::QuotaExceeded`] when the backing store rejects
    /// the write.
    pub fn touch(&self, id: &str) -> Result<Vec<StoredFileRecord>, StoreError> {
        let mut records = self.list();
        let mut dirty = false;
        for record in &mut records {
            if record.id == id {
                record.last_accessed_at = now_rfc3339();
                dirty = true;
            }
        }
        if dirty {
            self.persist(&records)?;
        }
        Ok(records)
    }

    /// Removes the record with the matching id; idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::QuotaExceeded`] when the backing store rejects
    /// the write.
    pub fn remove(&self, id: &str) -> Result<Vec<StoredFileRecord>, StoreError> {
        let mut records = self.list();
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() != before {
            self.persist(&records)?;
        }
        Ok(records)
    }

    /// Deletes the entire persisted collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::QuotaExceeded`] when the backing store rejects
    /// the delete.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store
            .remove(FILE_LIBRARY_KEY)
            .map_err(StoreError::QuotaExceeded)
    }

    /// Decodes a record's payload back into an in-memory file carrying the
    /// original name and MIME type.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CorruptRecord`] when the payload is not a valid
    /// data URL or does not decode to `size_bytes` bytes.
    pub fn materialize(&self, record: &StoredFileRecord) -> Result<RawFile, StoreError> {
        let bytes = decode_payload(&record.payload)?;
        if bytes.len() as u64 != record.size_bytes {
            return Err(StoreError::CorruptRecord);
        }
        Ok(RawFile::new(
            record.name.clone(),
            record.mime_type.clone(),
            None,
            bytes,
        ))
    }

    /// Returns whether a record with the same name and byte size already
    /// exists.
    ///
    /// This is the name+size deduplication heuristic: there is no content
    /// hash, so two distinct files sharing both are treated as one. A known
    /// limitation, preserved on purpose.
    pub fn is_known(&self, name: &str, size_bytes: u64) -> bool {
        self.list()
            .iter()
            .any(|record| record.name == name && record.size_bytes == size_bytes)
    }

    fn persist(&self, records: &[StoredFileRecord]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records)
            .map_err(|err| StoreError::QuotaExceeded(err.to_string()))?;
        self.store
            .set(FILE_LIBRARY_KEY, &raw)
            .map_err(StoreError::QuotaExceeded)
    }
}

/// Sorts records for display, most recently opened first.
pub fn sort_recent_first(records: &mut [StoredFileRecord]) {
    records.sort_by(|a, b| {
        let a = rfc3339_ms(&a.last_accessed_at);
        let b = rfc3339_ms(&b.last_accessed_at);
        b.cmp(&a)
    });
}

fn rfc3339_ms(raw: &str) -> i64 {
    DateTime::parse_from_rfc3339(raw)
        .map(|stamp| stamp.timestamp_millis())
        .unwrap_or(0)
}

fn decode_payload(payload: &str) -> Result<Vec<u8>, StoreError> {
    let rest = payload.strip_prefix("data:").ok_or(StoreError::CorruptRecord)?;
    let (_, data) = rest
        .split_once(";base64,")
        .ok_or(StoreError::CorruptRecord)?;
    BASE64.decode(data).map_err(|_| StoreError::CorruptRecord)
}

fn new_record_id() -> String {
    format!("{}-{:08x}", next_monotonic_timestamp_ms(), random_component())
}

fn random_component() -> u32 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * f64::from(u32::MAX)) as u32
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::collections::hash_map::RandomState;
        use std::hash::{BuildHasher, Hasher};
        RandomState::new().build_hasher().finish() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryKeyValueStore;

    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), String> {
            Err("quota exceeded".to_string())
        }

        fn remove(&self, _key: &str) -> Result<(), String> {
            Ok(())
        }
    }

    fn library() -> FileLibrary {
        FileLibrary::new(Rc::new(MemoryKeyValueStore::default()))
    }

    fn sample_file(name: &str, len: usize) -> RawFile {
        RawFile::new(name, "application/pdf", None, vec![7u8; len])
    }

    #[test]
    fn insert_then_materialize_round_trips_the_file() {
        let library = library();
        let file = RawFile::new("a.png", "image/png", Some(5), vec![1, 2, 3, 250]);

        let record = library
            .insert(&file, FileKind::Image, None)
            .expect("insert");
        assert_eq!(record.size_bytes, 4);
        assert!(record.payload.starts_with("data:image/png;base64,"));
        assert_eq!(record.created_at, record.last_accessed_at);

        let restored = library.materialize(&record).expect("materialize");
        assert_eq!(restored.name, file.name);
        assert_eq!(restored.mime_type, file.mime_type);
        assert_eq!(restored.bytes(), file.bytes());
    }

    #[test]
    fn list_is_empty_for_absent_or_corrupt_store() {
        let store = MemoryKeyValueStore::default();
        let library = FileLibrary::new(Rc::new(store.clone()));
        assert!(library.list().is_empty());

        store.set(FILE_LIBRARY_KEY, "{not json").expect("set");
        assert!(library.list().is_empty());
    }

    #[test]
    fn record_ids_are_unique_within_a_burst() {
        let library = library();
        let file = sample_file("a.pdf", 3);
        let mut ids = std::collections::HashSet::new();
        for _ in 0..32 {
            let record = library.insert(&file, FileKind::Document, None).expect("insert");
            assert!(ids.insert(record.id.clone()), "duplicate id {}", record.id);
        }
    }

    #[test]
    fn touch_updates_only_the_matching_record() {
        let library = library();
        let first = library
            .insert(&sample_file("a.pdf", 1), FileKind::Document, None)
            .expect("insert a");
        let second = library
            .insert(&sample_file("b.pdf", 2), FileKind::Document, None)
            .expect("insert b");

        // Let the wall clock advance past the insertion millisecond.
        std::thread::sleep(std::time::Duration::from_millis(5));

        let records = library.touch(&first.id).expect("touch");
        let touched = records.iter().find(|r| r.id == first.id).expect("present");
        let untouched = records.iter().find(|r| r.id == second.id).expect("present");
        assert!(touched.last_accessed_at >= touched.created_at);
        assert!(touched.reopened());
        assert!(!untouched.reopened());
    }

    #[test]
    fn touch_with_unknown_id_is_a_no_op() {
        let library = library();
        library
            .insert(&sample_file("a.pdf", 1), FileKind::Document, None)
            .expect("insert");
        let before = library.list();
        let after = library.touch("missing").expect("touch");
        assert_eq!(before, after);
    }

    #[test]
    fn remove_is_idempotent() {
        let library = library();
        let record = library
            .insert(&sample_file("a.pdf", 1), FileKind::Document, None)
            .expect("insert");

        let after_first = library.remove(&record.id).expect("remove");
        assert!(after_first.is_empty());
        let after_second = library.remove(&record.id).expect("remove again");
        assert!(after_second.is_empty());
    }

    #[test]
    fn clear_empties_a_populated_store() {
        let library = library();
        for name in ["a.pdf", "b.pdf", "c.pdf"] {
            library
                .insert(&sample_file(name, 2), FileKind::Document, None)
                .expect("insert");
        }
        assert_eq!(library.list().len(), 3);

        library.clear().expect("clear");
        assert!(library.list().is_empty());
    }

    #[test]
    fn is_known_matches_on_name_and_size_only() {
        let library = library();
        library
            .insert(&sample_file("a.pdf", 8), FileKind::Document, None)
            .expect("insert");

        assert!(library.is_known("a.pdf", 8));
        assert!(!library.is_known("a.pdf", 9));
        assert!(!library.is_known("b.pdf", 8));
    }

    #[test]
    fn quota_rejection_surfaces_as_quota_exceeded() {
        let library = FileLibrary::new(Rc::new(FullStore));
        let err = library
            .insert(&sample_file("a.pdf", 1), FileKind::Document, None)
            .expect_err("insert should fail");
        assert!(matches!(err, StoreError::QuotaExceeded(_)));
    }

    #[test]
    fn materialize_rejects_malformed_payloads() {
        let library = library();
        let mut record = library
            .insert(&sample_file("a.pdf", 4), FileKind::Document, None)
            .expect("insert");

        record.payload = "not a data url".to_string();
        assert_eq!(
            library.materialize(&record).expect_err("corrupt"),
            StoreError::CorruptRecord
        );

        record.payload = "data:application/pdf;base64,@@@".to_string();
        assert_eq!(
            library.materialize(&record).expect_err("bad base64"),
            StoreError::CorruptRecord
        );
    }

    #[test]
    fn materialize_rejects_length_mismatch() {
        let library = library();
        let mut record = library
            .insert(&sample_file("a.pdf", 4), FileKind::Document, None)
            .expect("insert");
        record.size_bytes = 5;
        assert_eq!(
            library.materialize(&record).expect_err("length mismatch"),
            StoreError::CorruptRecord
        );
    }

    #[test]
    fn recency_sort_puts_the_latest_open_first() {
        let mut records = vec![
            StoredFileRecord {
                id: "1".into(),
                name: "old.pdf".into(),
                mime_type: "application/pdf".into(),
                size_bytes: 1,
                kind: FileKind::Document,
                payload: String::new(),
                metadata: None,
                created_at: "2026-01-01T00:00:00.000Z".into(),
                last_accessed_at: "2026-01-01T00:00:00.000Z".into(),
            },
            StoredFileRecord {
                id: "2".into(),
                name: "new.pdf".into(),
                mime_type: "application/pdf".into(),
                size_bytes: 1,
                kind: FileKind::Document,
                payload: String::new(),
                metadata: None,
                created_at: "2026-01-01T00:00:00.000Z".into(),
                last_accessed_at: "2026-03-01T00:00:00.000Z".into(),
            },
        ];
        sort_recent_first(&mut records);
        assert_eq!(records[0].name, "new.pdf");
    }
}
