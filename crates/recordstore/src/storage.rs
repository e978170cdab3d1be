//! Storage seam for the backing text and its implementations

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

/// Read/write access to the backing delimited text. Callers go through
/// `append_record`/`load_dataset` and never touch the file directly.
pub trait RecordStore: Send + Sync {
    fn read_text(&self) -> io::Result<String>;
    fn write_text(&mut self, text: &str) -> io::Result<()>;
}

impl<T: RecordStore + ?Sized> RecordStore for Box<T> {
    fn read_text(&self) -> io::Result<String> {
        (**self).read_text()
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        (**self).write_text(text)
    }
}

/// In-memory store (for testing and demos). `None` behaves like a missing file.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRecordStore {
    text: Option<String>,
}

impl InMemoryRecordStore {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }

    pub fn missing() -> Self {
        Self { text: None }
    }

    pub fn contents(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn read_text(&self) -> io::Result<String> {
        self.text
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no backing text"))
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.text = Some(text.to_string());
        Ok(())
    }
}

/// Backing file on disk. Writes go to a sibling `<name>.tmp` file which is
/// then renamed over the original, so a failed write never truncates it.
/// A symlinked path is resolved first, so the link survives and the target is
/// replaced; the target's permissions are carried over to the new file.
#[derive(Clone, Debug)]
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file actually written: the symlink target when the path is a link.
    fn target(&self) -> PathBuf {
        fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone())
    }

    pub fn tmp_path(&self) -> PathBuf {
        let target = self.target();
        let mut name = target
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        target.with_file_name(name)
    }
}

impl RecordStore for FileRecordStore {
    fn read_text(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let target = self.target();
        let tmp = self.tmp_path();
        let perms = fs::metadata(&target).ok().map(|m| m.permissions());

        let written = File::create(&tmp).and_then(|mut f| {
            f.write_all(text.as_bytes())?;
            f.sync_all()?;
            match perms {
                Some(p) => f.set_permissions(p),
                None => Ok(()),
            }
        });
        if let Err(e) = written.and_then(|_| fs::rename(&tmp, &target)) {
            if tmp.is_file() {
                let _ = fs::remove_file(&tmp);
            }
            return Err(e);
        }
        Ok(())
    }
}
