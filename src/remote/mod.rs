//! Fetching the upstream snapshot
//!
//! GitHub serves every branch as `{repo}/archive/refs/heads/{branch}.tar.gz`,
//! a gzipped tarball whose entries all live under `{name}-{branch}/`. The
//! fetcher downloads that archive and unpacks it so the extraction directory
//! holds the tree itself, without the wrapping directory.

use flate2::read::GzDecoder;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tar::Archive;

use crate::config::UpstreamConfig;
use crate::error::{Result, SyncError};
use crate::utils::{move_path, path_exists, remove_path};

/// Produces the upstream tree inside an empty directory
pub trait SourceFetcher {
    /// Populate `dest` with the upstream tree's contents
    fn fetch(&self, dest: &Path) -> Result<()>;
}

/// Downloads a branch snapshot over HTTP(S)
#[derive(Debug, Clone)]
pub struct ArchiveFetcher {
    url: String,
    name: String,
    branch: String,
}

impl ArchiveFetcher {
    pub fn new(url: impl Into<String>, name: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            branch: branch.into(),
        }
    }

    pub fn from_config(upstream: &UpstreamConfig) -> Self {
        Self::new(&upstream.url, &upstream.name, &upstream.branch)
    }

    pub fn archive_url(&self) -> String {
        let base = self.url.trim_end_matches('/');
        let base = base.strip_suffix(".git").unwrap_or(base);
        format!("{}/archive/refs/heads/{}.tar.gz", base, self.branch)
    }
}

impl SourceFetcher for ArchiveFetcher {
    fn fetch(&self, dest: &Path) -> Result<()> {
        let url = self.archive_url();
        tracing::info!("Start downloading source code from {}", url);

        let response = ureq::get(&url).call().map_err(|e| SyncError::Download {
            url: url.clone(),
            source: Box::new(e),
        })?;

        unpack_archive(response.into_reader(), &self.name, &self.branch, dest)?;
        tracing::info!("Download completed: {}", url);
        Ok(())
    }
}

/// Unpack a gzipped tarball into `dest`, then replace `dest` with the
/// archive's `{name}-{branch}` top-level directory.
pub fn unpack_archive<R: Read>(reader: R, name: &str, branch: &str, dest: &Path) -> Result<()> {
    let extract_err = |source: io::Error| SyncError::Extract {
        path: dest.to_path_buf(),
        source,
    };

    fs::create_dir_all(dest).map_err(extract_err)?;
    // `unpack` refuses entries that would escape `dest`
    Archive::new(GzDecoder::new(reader))
        .unpack(dest)
        .map_err(extract_err)?;

    let extracted = dest.join(format!("{name}-{branch}"));
    if !extracted.is_dir() {
        return Err(extract_err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("archive has no top-level directory {name}-{branch}"),
        )));
    }

    let staging = staging_path(dest);
    if path_exists(&staging) {
        remove_path(&staging).map_err(extract_err)?;
    }
    move_path(&extracted, &staging).map_err(extract_err)?;
    remove_path(dest).map_err(extract_err)?;
    move_path(&staging, dest).map_err(extract_err)?;

    tracing::debug!("Extraction completed: {}", dest.display());
    Ok(())
}

/// Sibling of `dest` used while swapping the extracted tree into place
fn staging_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push("_temp");
    dest.with_file_name(name)
}
