use crate::error::{Result, SpiderError};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, error, trace};

/// Write `bytes` to `path`, creating the parent directory if it does not exist yet.
pub async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    // ensure the directory exists
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        trace!("checking directory path: {:?}", dir);
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|err| SpiderError::io(dir, err))?;
    }

    tokio::fs::write(path, bytes)
        .await
        .map_err(|err| SpiderError::io(path, err))?;
    trace!("{} bytes written to {:?}", bytes.len(), path);

    Ok(())
}

/// Read a file as UTF-8 text; invalid sequences become U+FFFD rather than failing the read.
pub async fn read_text(path: &Path) -> Result<String> {
    trace!("reading file path: {:?}", path);
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| SpiderError::io(path, err))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// A single temporary file, reused by every download of a scan.
///
/// The file lives inside the run's temp directory and is removed by [`ScratchFile::close`],
/// or on drop if the scan never gets that far.
#[derive(Debug)]
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    pub async fn create_in(dir: &Path) -> Result<Self> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|err| SpiderError::io(dir, err))?;

        let file = tempfile::Builder::new()
            .prefix("tmpfile")
            .suffix(".xml")
            .tempfile_in(dir)
            .map_err(|err| SpiderError::io(dir, err))?;
        debug!("scratch file created at {:?}", file.path());

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Replace the file's contents with `bytes`.
    pub async fn overwrite(&self, bytes: &[u8]) -> Result<()> {
        write_file(self.path(), bytes).await
    }

    pub async fn read_text(&self) -> Result<String> {
        read_text(self.path()).await
    }

    /// Delete the file, reporting the deletion.
    pub fn close(self, tui: bool) -> Result<PathBuf> {
        let path = self.file.path().to_path_buf();
        self.file.close().map_err(|err| {
            error!("failed to delete temporary file {:?}, error({err})", path);
            SpiderError::io(&path, err)
        })?;

        debug!("deleted temporary file {:?}", path);
        if tui {
            println!(
                "{}",
                format!("Deleted temporary file: {}", path.display()).green()
            );
        }

        Ok(path)
    }
}
