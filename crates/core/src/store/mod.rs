//! Documentation store: canonical identifier -> raw documentation text.

mod fragment;
mod scanner;

pub use fragment::parameter_fragment;
pub use scanner::{MemberScanner, SyntaxError};

use crate::config::StoreConfig;
use crate::docid;
use crate::error::{DocIdError, MemberdocError, StoreError};
use dashmap::DashMap;
use memberdoc_api::models::{MemberDescriptor, Symbol};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

static GLOBAL: Lazy<DocumentationStore> = Lazy::new(DocumentationStore::default);

#[derive(Debug, Default)]
struct LoadState {
    consumed: HashSet<String>,
    owners: HashSet<PathBuf>,
    parses: usize,
}

/// Loads are serialised by one mutex so that the consumed-source check,
/// the parse and the map writes happen as a unit. Lookups read the map
/// without taking it.
#[derive(Debug)]
pub struct DocumentationStore {
    config: StoreConfig,
    state: Mutex<LoadState>,
    entries: DashMap<String, String>,
}

impl Default for DocumentationStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl DocumentationStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            state: Mutex::new(LoadState::default()),
            entries: DashMap::new(),
        }
    }

    /// Process-wide store with default configuration.
    pub fn global() -> &'static DocumentationStore {
        &GLOBAL
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn lock_state(&self) -> MutexGuard<'_, LoadState> {
        // The state is only mutated after a successful parse, so a panic
        // elsewhere cannot leave it half-written.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Load a documentation file. Loading the same path again is a no-op.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let mut state = self.lock_state();
        self.load_file_locked(&mut state, path).map(|_| ())
    }

    /// Load documentation text from memory, keyed by `label` for idempotence.
    pub fn load_str(&self, label: &str, text: &str) -> Result<(), StoreError> {
        let mut state = self.lock_state();
        if state.consumed.contains(label) {
            tracing::debug!("Documentation source {} already loaded", label);
            return Ok(());
        }
        self.ingest(&mut state, label.to_string(), text)?;
        Ok(())
    }

    fn load_file_locked(&self, state: &mut LoadState, path: &Path) -> Result<usize, StoreError> {
        let key = source_key(path)?;
        if state.consumed.contains(&key) {
            tracing::debug!("Documentation source {} already loaded", key);
            return Ok(0);
        }
        if !path.is_file() {
            return Err(StoreError::MissingSource {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path)?;
        let text = decode_source(&key, bytes)?;
        self.ingest(state, key, &text)
    }

    /// Parse everything first so a malformed source inserts nothing.
    fn ingest(&self, state: &mut LoadState, key: String, text: &str) -> Result<usize, StoreError> {
        let parsed = MemberScanner::new(text, &self.config.member_element)
            .scan()
            .map_err(|e| StoreError::MalformedSource {
                source_name: key.clone(),
                line: e.line,
                reason: e.reason,
            })?;

        state.parses += 1;
        let count = parsed.len();
        for (name, body) in parsed {
            self.entries.insert(name, body);
        }
        tracing::debug!("Loaded {} documentation entries from {}", count, key);
        state.consumed.insert(key);
        Ok(count)
    }

    /// Best-effort load of the documentation file that sits next to `owner`
    /// (same stem, configured extension). Each owner is attempted once; a
    /// missing file just means the owner is undocumented.
    pub fn get_or_load_for_owner(&self, owner: &Path) -> Result<(), StoreError> {
        let mut state = self.lock_state();
        if state.owners.contains(owner) {
            return Ok(());
        }

        let path = owner_documentation_path(owner, &self.config.documentation_extension);
        let outcome = if path.is_file() {
            self.load_file_locked(&mut state, &path).map(|_| ())
        } else {
            tracing::debug!(
                "No documentation for {} at {}",
                owner.display(),
                path.display()
            );
            Ok(())
        };

        match outcome {
            Err(err @ StoreError::MalformedSource { .. }) if !self.config.strict_owner_sources => {
                tracing::warn!("Ignoring documentation for {}: {}", owner.display(), err);
            }
            Err(err) => return Err(err),
            Ok(()) => {}
        }
        state.owners.insert(owner.to_path_buf());
        Ok(())
    }

    pub fn lookup(&self, identifier: &str) -> Option<String> {
        self.entries.get(identifier).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// `source` is a `load_str` label or a file path; paths are compared in
    /// absolute form.
    pub fn is_loaded(&self, source: &str) -> bool {
        let state = self.lock_state();
        state.consumed.contains(source)
            || source_key(Path::new(source)).is_ok_and(|key| state.consumed.contains(&key))
    }

    /// Number of sources actually parsed since creation or the last `clear`.
    pub fn parses_performed(&self) -> usize {
        self.lock_state().parses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        let mut state = self.lock_state();
        state.consumed.clear();
        state.owners.clear();
        state.parses = 0;
        self.entries.clear();
        tracing::info!("Cleared documentation store");
    }

    pub fn documentation(&self, symbol: &Symbol) -> Result<Option<String>, DocIdError> {
        Ok(self.lookup(&docid::symbol_id(symbol)?))
    }

    pub fn member_documentation(
        &self,
        member: &MemberDescriptor,
    ) -> Result<Option<String>, DocIdError> {
        Ok(self.lookup(&docid::member_id(member)?))
    }

    /// The `<param>` fragment for `parameter`, or `None` when either the
    /// member or the fragment is undocumented.
    pub fn parameter_documentation(
        &self,
        member: &MemberDescriptor,
        parameter: &str,
    ) -> Result<Option<String>, DocIdError> {
        Ok(self
            .member_documentation(member)?
            .and_then(|doc| parameter_fragment(&doc, parameter)))
    }

    pub fn documentation_for_owner(
        &self,
        owner: &Path,
        symbol: &Symbol,
    ) -> Result<Option<String>, MemberdocError> {
        self.get_or_load_for_owner(owner)?;
        Ok(self.documentation(symbol)?)
    }
}

/// Consumed-source key: the absolute path, with `.` components dropped.
fn source_key(path: &Path) -> Result<String, StoreError> {
    Ok(std::path::absolute(path)?.to_string_lossy().into_owned())
}

/// Undecodable text is a malformed source, not an I/O failure.
fn decode_source(key: &str, bytes: Vec<u8>) -> Result<String, StoreError> {
    String::from_utf8(bytes).map_err(|err| {
        let valid = &err.as_bytes()[..err.utf8_error().valid_up_to()];
        StoreError::MalformedSource {
            source_name: key.to_string(),
            line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
            reason: format!("not valid UTF-8: {}", err.utf8_error()),
        }
    })
}

/// `<dir>/<stem>.<extension>` for a compiled unit at `owner`.
pub fn owner_documentation_path(owner: &Path, extension: &str) -> PathBuf {
    owner.with_extension(extension)
}
