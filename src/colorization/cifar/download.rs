//! Downloads and unpacks the CIFAR-10 binary distribution.

use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::{info, instrument, warn};

use crate::colorization::cifar::binary::RECORD_BYTES;
use crate::colorization::cifar::types::Split;
use crate::colorization::common::error::{ColorizeError, Result};

/// Location of the binary CIFAR-10 archive.
pub const CIFAR10_URL: &str = "https://www.cs.toronto.edu/~kriz/cifar-10-binary.tar.gz";

/// Directory created by unpacking the archive.
pub(crate) const BATCHES_DIR: &str = "cifar-10-batches-bin";

/// Scratch directory the archive is unpacked into before it is moved in place.
const STAGING_DIR: &str = ".cifar-10-partial";

/// Every batch file of both splits.
fn expected_files() -> Vec<String> {
    let mut files = Split::Train.batch_files();
    files.extend(Split::Test.batch_files());
    files
}

/// True when every batch file is present and holds whole records.
pub(crate) fn is_complete(batches: &Path) -> bool {
    expected_files().iter().all(|name| {
        std::fs::metadata(batches.join(name))
            .map(|m| m.is_file() && m.len() > 0 && m.len() % RECORD_BYTES as u64 == 0)
            .unwrap_or(false)
    })
}

/// Returns the directory holding the batch files, fetching the archive first
/// if a complete copy is not already unpacked under `root`.
///
/// The archive is unpacked into a scratch directory and only renamed to
/// `cifar-10-batches-bin` once every batch file is there, so an interrupted
/// download never looks like a finished one.
#[instrument(skip(root), fields(root = %root.display()))]
pub fn ensure_downloaded(root: &Path, download: bool) -> Result<PathBuf> {
    let batches = root.join(BATCHES_DIR);
    if is_complete(&batches) {
        return Ok(batches);
    }

    if !download {
        return Err(ColorizeError::DatasetReadError(format!(
            "{} does not contain a complete CIFAR-10 copy and downloading is disabled",
            root.display()
        )));
    }

    let staging = root.join(STAGING_DIR);
    if staging.exists() {
        std::fs::remove_dir_all(&staging)?;
    }
    std::fs::create_dir_all(&staging)?;
    info!(url = CIFAR10_URL, "Downloading CIFAR-10");

    let response = ureq::get(CIFAR10_URL)
        .call()
        .map_err(|e| ColorizeError::DownloadError(e.to_string()))?;

    let mut archive = tar::Archive::new(GzDecoder::new(response.into_reader()));
    archive
        .unpack(&staging)
        .map_err(|e| ColorizeError::DownloadError(format!("unpacking archive: {}", e)))?;

    let unpacked = staging.join(BATCHES_DIR);
    if !is_complete(&unpacked) {
        return Err(ColorizeError::DownloadError(format!(
            "archive did not contain a complete {} directory",
            BATCHES_DIR
        )));
    }

    if batches.exists() {
        warn!("Replacing incomplete {}", batches.display());
        std::fs::remove_dir_all(&batches)?;
    }
    std::fs::rename(&unpacked, &batches)?;
    std::fs::remove_dir_all(&staging)?;

    info!("CIFAR-10 unpacked to {}", batches.display());
    Ok(batches)
}
