//! Flat JSON record store.
//!
//! One JSON document per collection, rooted at a data directory. Reads that
//! fail (missing file, parse error) degrade to the collection's
//! empty-equivalent value instead of failing the caller. Writes replace the
//! whole document. Read-modify-write sequences on mutable collections are
//! serialized behind an in-process per-collection mutex so concurrent
//! handlers inside one process cannot lose each other's writes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

use crate::messages::Locale;

pub const LANGUAGES: &str = "languages";
pub const ADMINS: &str = "admins";
pub const FAQ: &str = "faq";
pub const COURT_INFO: &str = "court_info";
pub const COURT_SCHEDULE: &str = "court_schedule";
pub const CONTACTS: &str = "contacts";
pub const APPOINTMENTS: &str = "appointments";

/// Errors from collection reads and writes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read collection '{collection}': {source}")]
    Read {
        collection: &'static str,
        source: std::io::Error,
    },
    #[error("failed to parse collection '{collection}': {source}")]
    Parse {
        collection: &'static str,
        source: serde_json::Error,
    },
    #[error("failed to serialize collection '{collection}': {source}")]
    Serialize {
        collection: &'static str,
        source: serde_json::Error,
    },
    #[error("failed to write collection '{collection}': {source}")]
    Write {
        collection: &'static str,
        source: std::io::Error,
    },
}

/// Static court information for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtInfo {
    pub address: String,
    pub work_time: String,
    pub phone: String,
    pub email: String,
}

/// A booked consultation slot. Appended by the booking flow's terminal step,
/// never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub user_id: i64,
    pub name: String,
    pub time: String,
}

/// One court hearing in the public schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HearingEntry {
    pub date: String,
    pub case: String,
    pub time: String,
    pub judge: String,
}

/// Contact of another institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEntry {
    pub org: String,
    pub phone: String,
}

/// JSON-file-per-collection record store.
pub struct RecordStore {
    dir: PathBuf,
    lang_lock: Mutex<()>,
    appt_lock: Mutex<()>,
}

impl RecordStore {
    /// Open the store, creating the data directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            lang_lock: Mutex::new(()),
            appt_lock: Mutex::new(()),
        })
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    /// Load a collection, degrading to the empty-equivalent value on any
    /// failure. Missing and malformed documents both log at warning level.
    fn load_doc<T: DeserializeOwned + Default>(&self, collection: &'static str) -> T {
        match self.load_doc_strict(collection) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(collection, error = %e, "collection unavailable, using empty default");
                T::default()
            }
        }
    }

    /// Load a collection, propagating read and parse failures to the caller.
    fn load_doc_strict<T: DeserializeOwned>(
        &self,
        collection: &'static str,
    ) -> Result<T, StoreError> {
        let raw = fs::read_to_string(self.path_for(collection))
            .map_err(|source| StoreError::Read { collection, source })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Parse { collection, source })
    }

    /// Overwrite a collection with the serialized document.
    fn save_doc<T: Serialize>(&self, collection: &'static str, doc: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(doc)
            .map_err(|source| StoreError::Serialize { collection, source })?;
        fs::write(self.path_for(collection), raw)
            .map_err(|source| StoreError::Write { collection, source })
    }

    /// Language preference for a user, defaulting to Ukrainian.
    pub fn language_for(&self, user_id: i64) -> Locale {
        let languages: HashMap<String, Locale> = self.load_doc(LANGUAGES);
        languages
            .get(&user_id.to_string())
            .copied()
            .unwrap_or_default()
    }

    /// Store a user's language preference, overwriting any previous choice.
    pub fn set_language(&self, user_id: i64, locale: Locale) -> Result<(), StoreError> {
        let _guard = self.lang_lock.lock().unwrap();
        let mut languages: HashMap<String, Locale> = self.load_doc(LANGUAGES);
        languages.insert(user_id.to_string(), locale);
        self.save_doc(LANGUAGES, &languages)
    }

    /// Whether a user is on the admin allow list. An unreadable list means
    /// nobody is an admin.
    pub fn is_admin(&self, user_id: i64) -> bool {
        let admins: Vec<i64> = self.load_doc(ADMINS);
        admins.contains(&user_id)
    }

    /// Admin allow list with load failures surfaced to the caller, for paths
    /// that must distinguish "empty list" from "list unavailable".
    pub fn try_admins(&self) -> Result<Vec<i64>, StoreError> {
        self.load_doc_strict(ADMINS)
    }

    /// FAQ questions for a locale, in stable order.
    pub fn faq_questions(&self, locale: Locale) -> Vec<String> {
        let faq: HashMap<Locale, BTreeMap<String, String>> = self.load_doc(FAQ);
        faq.get(&locale)
            .map(|per_locale| per_locale.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Answer for an exact FAQ question string.
    pub fn faq_answer(&self, locale: Locale, question: &str) -> Option<String> {
        let faq: HashMap<Locale, BTreeMap<String, String>> = self.load_doc(FAQ);
        faq.get(&locale)?.get(question).cloned()
    }

    /// Court information record for a locale.
    pub fn court_info(&self, locale: Locale) -> Option<CourtInfo> {
        let info: HashMap<Locale, CourtInfo> = self.load_doc(COURT_INFO);
        info.get(&locale).cloned()
    }

    /// Public hearing schedule.
    pub fn court_schedule(&self) -> Vec<HearingEntry> {
        self.load_doc(COURT_SCHEDULE)
    }

    /// Contacts of other institutions for a locale.
    pub fn contacts(&self, locale: Locale) -> Vec<ContactEntry> {
        let contacts: HashMap<Locale, Vec<ContactEntry>> = self.load_doc(CONTACTS);
        contacts.get(&locale).cloned().unwrap_or_default()
    }

    /// Append an appointment to the ordered record. No uniqueness constraint:
    /// two users may book the identical slot.
    pub fn append_appointment(&self, appointment: Appointment) -> Result<(), StoreError> {
        let _guard = self.appt_lock.lock().unwrap();
        let mut appointments: Vec<Appointment> = self.load_doc(APPOINTMENTS);
        appointments.push(appointment);
        self.save_doc(APPOINTMENTS, &appointments)
    }

    /// All appointments in insertion order. Deliberately unfiltered: the
    /// per-user view shows every occupied slot.
    pub fn appointments(&self) -> Vec<Appointment> {
        self.load_doc(APPOINTMENTS)
    }
}
