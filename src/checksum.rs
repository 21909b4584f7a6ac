//! Checksum computation and table rendering for release artifacts.

use crate::error::{ReleaseError, Result};
use crate::types::ChecksumAlgorithm;
use sha2::{Digest, Sha256, Sha512};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Digest of one release artifact
#[derive(Debug, Clone)]
pub struct ChecksumEntry {
    pub file_name: String,
    pub digest: String,
}

/// Compute the hex digest of a file, streaming its contents
pub fn file_digest(path: &Path, algorithm: ChecksumAlgorithm) -> Result<String> {
    let mut file = File::open(path)?;
    let digest = match algorithm {
        ChecksumAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            io::copy(&mut file, &mut hasher)?;
            hex_string(&hasher.finalize())
        }
        ChecksumAlgorithm::Sha512 => {
            let mut hasher = Sha512::new();
            io::copy(&mut file, &mut hasher)?;
            hex_string(&hasher.finalize())
        }
    };
    Ok(digest)
}

fn hex_string(digest: &[u8]) -> String {
    digest.iter().map(|byte| format!("{:02x}", byte)).collect()
}

/// Compute digests for a list of artifacts, in the given order
pub fn checksum_files(paths: &[PathBuf], algorithm: ChecksumAlgorithm) -> Result<Vec<ChecksumEntry>> {
    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        let file_name = path
            .file_name()
            .ok_or_else(|| ReleaseError::general(format!("Path has no file name: {:?}", path)))?
            .to_string_lossy()
            .to_string();
        entries.push(ChecksumEntry {
            file_name,
            digest: file_digest(path, algorithm)?,
        });
    }
    Ok(entries)
}

/// Collect the zip archives in a directory, sorted by name.
/// Used by the standalone `checksum` subcommand.
pub fn collect_archives(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ReleaseError::general(format!(
            "Archive directory not found: {:?}",
            dir
        )));
    }

    let mut archives = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "zip") {
            archives.push(path);
        }
    }

    if archives.is_empty() {
        return Err(ReleaseError::general(format!(
            "No zip archives found in {:?}",
            dir
        )));
    }

    archives.sort();
    Ok(archives)
}

/// Render the checksum table, `<digest>  <file>` per line with a header
pub fn render_table(entries: &[ChecksumEntry], algorithm: ChecksumAlgorithm) -> String {
    let mut table = format!("{} checksums:\n", algorithm);
    for entry in entries {
        table.push_str(&format!("{}  {}\n", entry.digest, entry.file_name));
    }
    table
}
