//! BoardContext - collaborators and the current view snapshot
//!
//! The context gives operations access to the host's collaborators and to the
//! inputs of the next build. It holds no board state of its own: every build
//! starts again from the records and persisted options stored here.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use boardview_fields::FieldTypeRegistry;
use boardview_operations::LogEntry;
use tracing::debug;

use crate::builder::BoardDataBuilder;
use crate::colors::ColorAssignments;
use crate::options::BoardOptions;
use crate::resolver::ValueResolver;
use crate::store::{NewRecordEntry, RecordStore, ValueIndex};
use crate::types::{BoardViewData, Record, ViewStateChange};

/// Host collaborators, injected once. Optional capabilities are decided here
/// and never probed again.
#[derive(Clone)]
pub struct BoardServices {
    pub store: Arc<dyn RecordStore>,
    pub index: Option<Arc<dyn ValueIndex>>,
    pub registry: Arc<dyn FieldTypeRegistry>,
    pub new_record: Option<Arc<dyn NewRecordEntry>>,
}

impl BoardServices {
    pub fn new(store: Arc<dyn RecordStore>, registry: Arc<dyn FieldTypeRegistry>) -> Self {
        Self {
            store,
            index: None,
            registry,
            new_record: None,
        }
    }

    pub fn with_index(mut self, index: Arc<dyn ValueIndex>) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_new_record_entry(mut self, entry: Arc<dyn NewRecordEntry>) -> Self {
        self.new_record = Some(entry);
        self
    }

    pub fn resolver(&self) -> ValueResolver<'_> {
        ValueResolver::new(self.index.as_deref(), self.registry.as_ref())
    }
}

/// Context passed to every operation
pub struct BoardContext {
    services: BoardServices,
    records: RwLock<Vec<Record>>,
    options: RwLock<BoardOptions>,
    colors: RwLock<ColorAssignments>,
    activity: Mutex<Vec<LogEntry>>,
}

impl BoardContext {
    pub fn new(services: BoardServices) -> Self {
        Self {
            services,
            records: RwLock::new(Vec::new()),
            options: RwLock::new(BoardOptions::default()),
            colors: RwLock::new(ColorAssignments::default()),
            activity: Mutex::new(Vec::new()),
        }
    }

    pub fn services(&self) -> &BoardServices {
        &self.services
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Replace the current result set.
    pub fn set_records(&self, records: Vec<Record>) {
        debug!(count = records.len(), "records replaced");
        *self.records.write().unwrap_or_else(PoisonError::into_inner) = records;
    }

    pub fn records(&self) -> Vec<Record> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Install view options, clearing grouping fields that are no longer
    /// eligible. Returns the clears the host must persist.
    pub fn set_options(&self, mut options: BoardOptions) -> Vec<ViewStateChange> {
        let changes = options.sanitize(&self.services.resolver());
        *self.options.write().unwrap_or_else(PoisonError::into_inner) = options;
        changes
    }

    pub fn options(&self) -> BoardOptions {
        self.options
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_colors(&self, colors: ColorAssignments) {
        *self.colors.write().unwrap_or_else(PoisonError::into_inner) = colors;
    }

    pub fn colors(&self) -> ColorAssignments {
        self.colors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Mirror a persisted change into the local snapshot.
    pub fn apply(&self, change: &ViewStateChange) {
        match change {
            ViewStateChange::ColumnColor { key, color } => self
                .colors
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert_raw(key.clone(), color.clone()),
            other => self
                .options
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .apply(other),
        }
    }

    // =========================================================================
    // Builds
    // =========================================================================

    /// A fresh snapshot from the current inputs.
    pub fn build_board(&self) -> BoardViewData {
        let records = self.records();
        let options = self.options();
        BoardDataBuilder::new(self.services.resolver())
            .with_colors(self.colors())
            .build(&records, &options)
    }

    // =========================================================================
    // Activity
    // =========================================================================

    pub fn append_activity(&self, entry: LogEntry) {
        self.activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    /// Logged operations, newest first.
    pub fn activity(&self) -> Vec<LogEntry> {
        let entries = self.activity.lock().unwrap_or_else(PoisonError::into_inner);
        entries.iter().rev().cloned().collect()
    }
}
