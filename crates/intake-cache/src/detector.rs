//! Per-source change detection.
//!
//! Modification time is the cheap signal and always wins when it moved. Only
//! when it did not move is the content hashed, which catches rewrites that
//! kept the old timestamp. A file rewritten with the same timestamp and the
//! same bytes is indistinguishable from an untouched one, which is correct.
//!
//! A tracked digest is refreshed whenever the cache loads the source, so an
//! mtime-driven reload does not leave the previous content's digest behind.

use std::collections::BTreeMap;

use intake_ingest::TabularStore;
use intake_model::SourceFingerprint;
use sha2::{Digest, Sha256};

/// What one look at a source found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// No fingerprint was recorded yet.
    FirstSeen,
    MtimeChanged,
    /// Same modification time, different (or first hashed) content.
    DigestChanged,
    Unchanged,
    /// The source does not exist. Reported by the loader, not here.
    Absent,
    /// Metadata or content could not be read; counts as unchanged.
    Unreadable(String),
}

impl Observation {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        matches!(
            self,
            Self::FirstSeen | Self::MtimeChanged | Self::DigestChanged
        )
    }
}

/// SHA-256 of `bytes`, hex encoded.
#[must_use]
pub fn content_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[derive(Debug, Default)]
pub struct ChangeDetector {
    fingerprints: BTreeMap<String, SourceFingerprint>,
}

impl ChangeDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look at `name` and update its fingerprint.
    pub fn observe(&mut self, store: &dyn TabularStore, name: &str) -> Observation {
        let meta = match store.metadata(name) {
            Ok(Some(meta)) => meta,
            Ok(None) => return Observation::Absent,
            Err(error) => return Observation::Unreadable(error.to_string()),
        };

        let Some(fingerprint) = self.fingerprints.get_mut(name) else {
            self.fingerprints
                .insert(name.to_string(), SourceFingerprint::new(name, meta.modified));
            return Observation::FirstSeen;
        };

        if fingerprint.modified != meta.modified {
            fingerprint.modified = meta.modified;
            return Observation::MtimeChanged;
        }

        let digest = match store.content(name) {
            Ok(bytes) => content_digest(&bytes),
            Err(error) => return Observation::Unreadable(error.to_string()),
        };
        if fingerprint.digest.as_deref() == Some(digest.as_str()) {
            return Observation::Unchanged;
        }
        fingerprint.digest = Some(digest);
        Observation::DigestChanged
    }

    /// Refresh the digest of `name` after its content was loaded.
    ///
    /// Sources without a digest are left alone, so their first same-mtime
    /// check still hashes once. A failed content read keeps the old digest.
    pub fn record_load(&mut self, store: &dyn TabularStore, name: &str) {
        if let Some(fingerprint) = self.fingerprints.get_mut(name)
            && fingerprint.digest.is_some()
            && let Ok(bytes) = store.content(name)
        {
            fingerprint.digest = Some(content_digest(&bytes));
        }
    }

    #[must_use]
    pub fn fingerprint(&self, name: &str) -> Option<&SourceFingerprint> {
        self.fingerprints.get(name)
    }

    pub fn fingerprints(&self) -> impl Iterator<Item = &SourceFingerprint> {
        self.fingerprints.values()
    }

    pub fn clear(&mut self) {
        self.fingerprints.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use intake_ingest::{MemoryStore, Table};

    use super::*;

    const SOURCE: &str = "B_Alunos.csv";

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn table(name: &str) -> Table {
        Table::new(["Nome do Estudante"], [[name]])
    }

    #[test]
    fn absent_source_is_unchanged() {
        let store = MemoryStore::new();
        let mut detector = ChangeDetector::new();
        assert_eq!(detector.observe(&store, SOURCE), Observation::Absent);
        assert!(!Observation::Absent.is_changed());
        assert!(detector.fingerprint(SOURCE).is_none());
    }

    #[test]
    fn first_observation_is_a_change() {
        let store = MemoryStore::new();
        store.put_with_modified(SOURCE, table("Ana"), at(10));
        let mut detector = ChangeDetector::new();
        assert_eq!(detector.observe(&store, SOURCE), Observation::FirstSeen);
        let fingerprint = detector.fingerprint(SOURCE).unwrap();
        assert_eq!(fingerprint.modified, at(10));
        assert_eq!(fingerprint.digest, None);
    }

    #[test]
    fn touched_mtime_is_a_change_without_hashing() {
        let store = MemoryStore::new();
        store.put_with_modified(SOURCE, table("Ana"), at(10));
        let mut detector = ChangeDetector::new();
        detector.observe(&store, SOURCE);

        store.set_modified(SOURCE, at(20));
        store.set_unreadable(SOURCE, Some("locked"));
        assert_eq!(detector.observe(&store, SOURCE), Observation::MtimeChanged);
        assert_eq!(detector.fingerprint(SOURCE).unwrap().modified, at(20));
    }

    #[test]
    fn same_mtime_falls_back_to_digest() {
        let store = MemoryStore::new();
        store.put_with_modified(SOURCE, table("Ana"), at(10));
        let mut detector = ChangeDetector::new();
        detector.observe(&store, SOURCE);

        // No digest recorded yet, so the first hash seeds it.
        assert_eq!(detector.observe(&store, SOURCE), Observation::DigestChanged);
        assert_eq!(detector.observe(&store, SOURCE), Observation::Unchanged);

        store.put_with_modified(SOURCE, table("Bia"), at(10));
        assert_eq!(detector.observe(&store, SOURCE), Observation::DigestChanged);
        assert_eq!(detector.observe(&store, SOURCE), Observation::Unchanged);
    }

    #[test]
    fn recorded_load_keeps_the_digest_current_across_mtime_changes() {
        let store = MemoryStore::new();
        store.put_with_modified(SOURCE, table("Ana"), at(10));
        let mut detector = ChangeDetector::new();
        detector.observe(&store, SOURCE);

        detector.record_load(&store, SOURCE);
        assert_eq!(detector.fingerprint(SOURCE).unwrap().digest, None);
        assert_eq!(detector.observe(&store, SOURCE), Observation::DigestChanged);

        store.put_with_modified(SOURCE, table("Bia"), at(20));
        assert_eq!(detector.observe(&store, SOURCE), Observation::MtimeChanged);
        detector.record_load(&store, SOURCE);
        assert_eq!(
            detector.fingerprint(SOURCE).unwrap().digest.as_deref(),
            Some(content_digest(&store.content(SOURCE).unwrap()).as_str())
        );
        assert_eq!(detector.observe(&store, SOURCE), Observation::Unchanged);
    }

    #[test]
    fn hashing_failure_is_unreadable_and_unchanged() {
        let store = MemoryStore::new();
        store.put_with_modified(SOURCE, table("Ana"), at(10));
        let mut detector = ChangeDetector::new();
        detector.observe(&store, SOURCE);

        store.set_unreadable(SOURCE, Some("locked by another program"));
        let observation = detector.observe(&store, SOURCE);
        assert!(matches!(observation, Observation::Unreadable(ref message) if message.contains("locked")));
        assert!(!observation.is_changed());
        assert_eq!(detector.fingerprint(SOURCE).unwrap().digest, None);
    }

    #[test]
    fn clear_forgets_everything() {
        let store = MemoryStore::new();
        store.put(SOURCE, table("Ana"));
        let mut detector = ChangeDetector::new();
        detector.observe(&store, SOURCE);
        detector.clear();
        assert_eq!(detector.fingerprints().count(), 0);
        assert_eq!(detector.observe(&store, SOURCE), Observation::FirstSeen);
    }

    #[test]
    fn digest_is_sha256_hex() {
        assert_eq!(
            content_digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
