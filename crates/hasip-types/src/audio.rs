use std::path::PathBuf;

/// Audio file produced for playback to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtsAudio {
    /// Location of the WAV file.
    pub path: PathBuf,
    /// `true` when the file is a temporary the caller must delete after
    /// playback. `false` for bundled assets, which must never be deleted.
    pub owned: bool,
}

impl TtsAudio {
    /// A freshly created temporary file.
    pub fn owned(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            owned: true,
        }
    }

    /// A static asset shipped with the application.
    pub fn bundled(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            owned: false,
        }
    }

    /// Deletes the file if it is owned. Bundled assets are left untouched.
    pub fn release(self) -> std::io::Result<()> {
        if !self.owned {
            return Ok(());
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
