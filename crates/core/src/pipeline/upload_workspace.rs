use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const AUDIO_FILE_NAME: &str = "audio.bin";
const TEXT_FILE_NAME: &str = "reference.txt";

/// Private on-disk copies of one run's uploads.
///
/// The directory and everything in it is removed when the workspace is
/// dropped, whichever way the run ends.
#[derive(Debug)]
pub struct UploadWorkspace {
    dir: TempDir,
    audio_path: PathBuf,
    text_path: PathBuf,
}

impl UploadWorkspace {
    /// Stage both uploads under a fresh directory in `root` (or the system
    /// temp dir when `None`).
    pub fn stage(audio: &[u8], reference_text: &str, root: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("readcheck-");
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        let audio_path = dir.path().join(AUDIO_FILE_NAME);
        let text_path = dir.path().join(TEXT_FILE_NAME);
        fs::write(&audio_path, audio)?;
        fs::write(&text_path, reference_text)?;
        log::debug!("Staged uploads in {}", dir.path().display());

        Ok(Self {
            dir,
            audio_path,
            text_path,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn audio_path(&self) -> &Path {
        &self.audio_path
    }

    pub fn text_path(&self) -> &Path {
        &self.text_path
    }

    pub fn read_reference_text(&self) -> io::Result<String> {
        fs::read_to_string(&self.text_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_writes_both_files() {
        let root = tempfile::tempdir().unwrap();
        let workspace = UploadWorkspace::stage(b"RIFF....", "bir iki üç", Some(root.path())).unwrap();

        assert_eq!(fs::read(workspace.audio_path()).unwrap(), b"RIFF....");
        assert_eq!(workspace.read_reference_text().unwrap(), "bir iki üç");
        assert!(workspace.path().starts_with(root.path()));
        assert!(workspace.text_path().exists());
    }

    #[test]
    fn test_drop_removes_directory() {
        let root = tempfile::tempdir().unwrap();
        let staged_dir = {
            let workspace = UploadWorkspace::stage(b"data", "metin", Some(root.path())).unwrap();
            workspace.path().to_path_buf()
        };
        assert!(!staged_dir.exists());
        assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_runs_get_separate_directories() {
        let root = tempfile::tempdir().unwrap();
        let a = UploadWorkspace::stage(b"a", "a", Some(root.path())).unwrap();
        let b = UploadWorkspace::stage(b"b", "b", Some(root.path())).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_missing_root_is_error() {
        let result = UploadWorkspace::stage(b"a", "a", Some(Path::new("/nonexistent/root")));
        assert!(result.is_err());
    }
}
