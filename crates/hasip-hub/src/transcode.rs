use crate::error::HubError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// Decodes compressed audio into a WAV file by running an external decoder.
///
/// The binary is invoked ffmpeg-style:
/// `<binary> -hide_banner -loglevel error -y -i <input> -f wav <output>`.
#[derive(Debug, Clone)]
pub struct Transcoder {
    binary: PathBuf,
    timeout: Duration,
}

impl Transcoder {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Transcodes `input` into a WAV container at `output`.
    ///
    /// Fails if the decoder cannot be started, exits non-zero, runs past the
    /// timeout, or leaves something at `output` that is not RIFF/WAVE.
    pub async fn to_wav(&self, input: &Path, output: &Path) -> Result<(), HubError> {
        let mut command = Command::new(&self.binary);
        command
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-y")
            .arg("-i")
            .arg(input)
            .arg("-f")
            .arg("wav")
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| {
            HubError::Transcode(format!("failed to spawn {:?}: {}", self.binary, e))
        })?;

        let output_status = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                HubError::Transcode(format!(
                    "decoder timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| HubError::Transcode(format!("failed to wait for decoder: {}", e)))?;

        if !output_status.status.success() {
            let stderr = String::from_utf8_lossy(&output_status.stderr);
            return Err(HubError::Transcode(format!(
                "decoder exited with {}: {}",
                output_status.status,
                stderr.trim()
            )));
        }

        if !is_wav(output).await? {
            return Err(HubError::Transcode(format!(
                "decoder output {:?} is not a WAV file",
                output
            )));
        }

        Ok(())
    }
}

/// Checks for the `RIFF....WAVE` container header.
pub async fn is_wav(path: &Path) -> Result<bool, HubError> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut header = [0u8; 12];
    let mut filled = 0;
    while filled < header.len() {
        let n = file.read(&mut header[filled..]).await?;
        if n == 0 {
            return Ok(false);
        }
        filled += n;
    }
    Ok(&header[0..4] == b"RIFF" && &header[8..12] == b"WAVE")
}
