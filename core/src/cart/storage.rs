// duka/src/cart/storage.rs

//! The single durable slot backing the cart.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One string-keyed slot of durable storage. No transactions, no schema
/// versioning; concurrent writers are last-write-wins.
pub trait StorageSlot: Send + Sync {
  /// Returns the slot contents, or `None` when the slot is absent.
  fn load(&self) -> Result<Option<String>>;

  /// Replaces the slot contents.
  fn store(&self, payload: &str) -> Result<()>;

  /// Deletes the slot. Deleting an absent slot is a no-op.
  fn clear(&self) -> Result<()>;
}

/// File-backed slot: one JSON document on disk, rewritten in full on every
/// mutation.
#[derive(Debug)]
pub struct FileSlot {
  path: PathBuf,
}

impl FileSlot {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl StorageSlot for FileSlot {
  fn load(&self) -> Result<Option<String>> {
    match fs::read_to_string(&self.path) {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e).with_context(|| format!("reading cart slot {}", self.path.display())),
    }
  }

  fn store(&self, payload: &str) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("creating cart directory {}", parent.display()))?;
    }
    fs::write(&self.path, payload).with_context(|| format!("writing cart slot {}", self.path.display()))
  }

  fn clear(&self) -> Result<()> {
    match fs::remove_file(&self.path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e).with_context(|| format!("deleting cart slot {}", self.path.display())),
    }
  }
}

/// In-memory slot for tests and the offline demo backend.
#[derive(Debug, Default)]
pub struct MemorySlot {
  cell: Mutex<Option<String>>,
}

impl MemorySlot {
  pub fn new() -> Self {
    Self::default()
  }
}

impl StorageSlot for MemorySlot {
  fn load(&self) -> Result<Option<String>> {
    Ok(self.cell.lock().clone())
  }

  fn store(&self, payload: &str) -> Result<()> {
    *self.cell.lock() = Some(payload.to_string());
    Ok(())
  }

  fn clear(&self) -> Result<()> {
    *self.cell.lock() = None;
    Ok(())
  }
}
