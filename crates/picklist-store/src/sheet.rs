//! CSV-backed sheets: `<root>/<table>/<subsheet>.csv`.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use picklist_model::{CellUpdate, Column, OrderRow};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::{MemoryTable, TableStore};

/// Where the sheets live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConnection {
    pub root: PathBuf,
}

impl StoreConnection {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn sheet_path(&self, table: &str, subsheet: &str) -> PathBuf {
        self.root.join(table).join(format!("{subsheet}.csv"))
    }

    /// Opens an existing sheet and loads it.
    pub fn open(&self, table: &str, subsheet: &str) -> Result<CsvSheetStore, StoreError> {
        if !self.root.is_dir() {
            return Err(StoreError::connection(&self.root, "store root is not a directory"));
        }
        let table_dir = self.root.join(table);
        if !table_dir.is_dir() {
            return Err(StoreError::connection(table_dir, "table not found"));
        }
        let path = self.sheet_path(table, subsheet);
        if !path.is_file() {
            return Err(StoreError::connection(path, "sheet not found"));
        }
        CsvSheetStore::load(path)
    }

    /// Creates or replaces a sheet with `rows`. The table directory is created
    /// when missing; the store root must exist.
    pub fn write_sheet(
        &self,
        table: &str,
        subsheet: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<CsvSheetStore, StoreError> {
        if !self.root.is_dir() {
            return Err(StoreError::connection(&self.root, "store root is not a directory"));
        }
        let table_dir = self.root.join(table);
        fs::create_dir_all(&table_dir)
            .map_err(|e| StoreError::io("create directory", &table_dir, e))?;
        CsvSheetStore::create(self.sheet_path(table, subsheet), rows)
    }
}

/// A sheet file loaded into memory. Every mutation is written back before it returns.
#[derive(Debug)]
pub struct CsvSheetStore {
    path: PathBuf,
    grid: MemoryTable,
}

impl CsvSheetStore {
    pub fn load(path: PathBuf) -> Result<Self, StoreError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| csv_error(&path, &e))?;
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| csv_error(&path, &e))?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }
        if let Some(first) = rows.first_mut().and_then(|row| row.first_mut()) {
            *first = first.trim_start_matches('\u{feff}').to_string();
        }
        debug!(path = %path.display(), rows = rows.len(), "sheet loaded");
        Ok(Self {
            path,
            grid: MemoryTable::from_rows(rows),
        })
    }

    /// Writes `rows` to `path`, replacing any existing file.
    pub fn create(path: PathBuf, rows: Vec<Vec<String>>) -> Result<Self, StoreError> {
        let store = Self {
            path,
            grid: MemoryTable::from_rows(rows),
        };
        store.persist()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn grid(&self) -> &MemoryTable {
        &self.grid
    }

    /// Writes the grid to a sibling temp file, then renames it over the sheet.
    fn persist(&self) -> Result<(), StoreError> {
        let temp_path = self.path.with_extension("csv.tmp");
        let file = File::create(&temp_path).map_err(|e| StoreError::io("create", &temp_path, e))?;
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);
        for row in self.grid.rows() {
            writer
                .write_record(row)
                .map_err(|e| csv_error(&temp_path, &e))?;
        }
        let file = writer
            .into_inner()
            .map_err(|e| StoreError::io("write", &temp_path, e.into_error()))?;
        file.sync_all()
            .map_err(|e| StoreError::io("sync", &temp_path, e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::io("replace", &self.path, e))?;
        info!(path = %self.path.display(), rows = self.grid.rows().len(), "sheet saved");
        Ok(())
    }

    fn commit<F>(&mut self, operation: &'static str, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut MemoryTable) -> Result<(), StoreError>,
    {
        let mut next = self.grid.clone();
        change(&mut next)?;
        let previous = std::mem::replace(&mut self.grid, next);
        if let Err(err) = self.persist() {
            self.grid = previous;
            return Err(StoreError::Write {
                operation,
                message: err.to_string(),
            });
        }
        Ok(())
    }
}

fn csv_error(path: &Path, error: &csv::Error) -> StoreError {
    StoreError::Csv {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

impl TableStore for CsvSheetStore {
    fn read_column(&self, column: Column) -> Result<Vec<String>, StoreError> {
        self.grid.read_column(column)
    }

    fn batch_write_cells(&mut self, updates: &[CellUpdate]) -> Result<(), StoreError> {
        self.commit("update", |grid| grid.batch_write_cells(updates))
    }

    fn append_rows(&mut self, rows: &[OrderRow]) -> Result<(), StoreError> {
        self.commit("append", |grid| grid.append_rows(rows))
    }

    fn clear_rows(&mut self, rows: &BTreeSet<usize>) -> Result<(), StoreError> {
        self.commit("clear", |grid| grid.clear_rows(rows))
    }
}
