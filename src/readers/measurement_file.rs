use crate::error::Result;
use memmap2::Mmap;
use std::fs::File;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-only view of a whole measurements file, backed by a memory map.
///
/// The mapping is shared by every partition worker and released when the
/// value is dropped.
pub struct MeasurementFile {
    path: PathBuf,
    mmap: Option<Mmap>,
}

impl MeasurementFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        // mmap(2) rejects zero-length mappings.
        let mmap = if len == 0 {
            None
        } else {
            // SAFETY: the map is read-only and the file is not modified while
            // it is being aggregated.
            let mmap = unsafe { Mmap::map(&file)? };
            #[cfg(unix)]
            if let Err(e) = mmap.advise(memmap2::Advice::Sequential) {
                debug!(error = %e, "madvise(SEQUENTIAL) not applied");
            }
            Some(mmap)
        };

        debug!(path = %path.display(), bytes = len, "opened measurement file");

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Deref for MeasurementFile {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_bytes()
    }
}
