use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::SyncError;
use crate::types::PurchaseItem;

/// Entry extensions the completion check counts as audio tracks inside an
/// archive.
const AUDIO_EXTENSIONS: [&str; 6] = ["flac", "mp3", "m4a", "ogg", "wav", "aiff"];

/// Downloaded extensions that get the track-count audit instead of a plain
/// existence check.
const ARCHIVE_EXTENSIONS: [&str; 1] = ["zip"];

/// Inspects the output directory to decide which purchases still need
/// downloading. The directory itself is the only ledger; there is no
/// manifest or database that could drift away from the actual files.
pub struct LibraryManager {
    dir: PathBuf,
}

impl LibraryManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LibraryManager { dir: dir.into() }
    }

    /// Decides whether a purchase already has a complete download on disk,
    /// deleting a stale archive as a side effect.
    ///
    /// A file whose name carries the `({id})` marker claims the purchase.
    /// Zip archives are audited against the server-reported track count,
    /// because the platform silently appends bonus tracks to already
    /// purchased releases; an archive with too few audio entries is
    /// removed so the caller downloads it again. A matching non-archive
    /// file is trusted as-is: a truncated single-file download is
    /// indistinguishable from a complete one without a stored size or
    /// checksum, which this tool deliberately does not keep.
    pub async fn is_complete(&self, item: &PurchaseItem) -> Result<bool, SyncError> {
        let Some(path) = self.find_download(item.id)? else {
            return Ok(false);
        };

        if !is_archive(&path) {
            return Ok(true);
        }

        let tracks = count_audio_entries(&path)?;
        if (tracks as u32) < item.track_count {
            log::info!(
                "{} holds {} of {} tracks, discarding",
                path.display(),
                tracks,
                item.track_count
            );
            async_fs::remove_file(&path).await?;
            return Ok(false);
        }

        Ok(true)
    }

    fn find_download(&self, id: u64) -> Result<Option<PathBuf>, SyncError> {
        let marker = format!("({})", id);

        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_name().to_string_lossy().contains(&marker) {
                return Ok(Some(entry.path()));
            }
        }

        Ok(None)
    }
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            ARCHIVE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn count_audio_entries(path: &Path) -> Result<usize, SyncError> {
    let file = File::open(path)?;
    let archive = zip::ZipArchive::new(file)?;

    let tracks = archive
        .file_names()
        .filter(|name| {
            let name = name.to_lowercase();
            AUDIO_EXTENSIONS
                .iter()
                .any(|ext| name.ends_with(&format!(".{}", ext)))
        })
        .count();

    Ok(tracks)
}
