//! Credential storage and management
//!
//! Loads the `name,password` table from a CSV file and answers lookups by name.

use log::{info, warn};
use std::fs;
use std::io;
use std::path::Path;

use crate::error::AuthError;

const NAME_COLUMN: &str = "name";
const PASSWORD_COLUMN: &str = "password";

/// A stored `(name, password)` pair, whitespace-trimmed at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub name: String,
    pub password: String,
}

impl CredentialRecord {
    pub fn new(name: &str, password: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            password: password.trim().to_string(),
        }
    }
}

/// In-memory credential table, read-only after load.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    records: Vec<CredentialRecord>,
}

impl CredentialStore {
    pub fn from_records(records: Vec<CredentialRecord>) -> Self {
        Self { records }
    }

    /// Loads the table from `path`.
    ///
    /// Never fails hard: a missing or unusable file yields an empty store
    /// together with the error to surface to the user.
    pub fn load(path: &Path) -> (Self, Option<AuthError>) {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return (Self::default(), Some(AuthError::MissingStore(path.into())));
            }
            Err(e) => {
                return (
                    Self::default(),
                    Some(AuthError::MalformedStore {
                        path: path.into(),
                        reason: e.to_string(),
                    }),
                );
            }
        };

        match Self::parse(&contents) {
            Ok(store) => {
                info!(
                    "Loaded {} credential record(s) from {}",
                    store.len(),
                    path.display()
                );
                (store, None)
            }
            Err(reason) => (
                Self::default(),
                Some(AuthError::MalformedStore {
                    path: path.into(),
                    reason,
                }),
            ),
        }
    }

    /// Parses CSV text whose header names at least the `name` and `password` columns.
    ///
    /// A leading UTF-8 byte order mark is ignored.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let contents = contents.trim_start_matches('\u{feff}');
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(contents.as_bytes());

        let header = reader.headers().map_err(|e| e.to_string())?.clone();
        if header.is_empty() {
            return Err("file is empty".to_string());
        }

        let column = |wanted: &str| {
            header
                .iter()
                .position(|h| h == wanted)
                .ok_or_else(|| format!("missing column '{}'", wanted))
        };
        let name_idx = column(NAME_COLUMN)?;
        let password_idx = column(PASSWORD_COLUMN)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    warn!("Skipping unreadable credential row: {}", e);
                    continue;
                }
            };
            match (row.get(name_idx), row.get(password_idx)) {
                (Some(name), Some(password)) => {
                    records.push(CredentialRecord::new(name, password))
                }
                _ => warn!(
                    "Skipping credential row {}: too few fields",
                    row.position().map_or(0, |p| p.line())
                ),
            }
        }

        Ok(Self { records })
    }

    /// Returns the first record whose name equals the trimmed query (case-sensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&CredentialRecord> {
        let name = name.trim();
        self.records.iter().find(|record| record.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
