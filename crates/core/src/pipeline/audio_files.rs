use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// True if `path` names a file with the given extension (exact match,
/// leading dot optional).
pub fn has_audio_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.');
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == wanted)
        .unwrap_or(false)
}

/// Lists the files in `dir` carrying `extension`, sorted by file name so the
/// batch order is stable across platforms. Symlinks to files count.
pub fn list_audio_files(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if has_audio_extension(&path, extension) && path.is_file() {
            files.push(path);
        } else {
            log::debug!("Skipping {}", path.display());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
