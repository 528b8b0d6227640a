//! Speech synthesis service with last-request-wins cancellation
//!
//! Long text is split into provider-safe chunks; each chunk is synthesized in
//! original order and its raw MP3 bytes appended to one scratch file (MP3
//! frames tolerate plain concatenation). Only one synthesis is "current"
//! process-wide: the coordinator cancels the in-flight operation when a newer
//! request arrives, and the cancelled caller receives `Superseded` rather than
//! an error. Scratch files are temp-file handles, deleted on every exit path.

use std::{
    fmt, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use ai_speech::{TextToSpeech, chunker::split_text};
use tempfile::{NamedTempFile, TempPath};
use tokio::{
    fs::File,
    io::AsyncWriteExt,
    sync::{mpsc, oneshot},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;

/// Result of a synthesis request
#[derive(Debug)]
pub enum SynthesisOutcome {
    /// Synthesis ran to completion; the audio file is ready to stream
    Completed(SynthesizedAudio),
    /// A newer request cancelled this one before it finished
    Superseded,
}

/// A finished synthesis output backed by a scratch file
///
/// The file is deleted when this value is dropped.
pub struct SynthesizedAudio {
    path: TempPath,
}

impl fmt::Debug for SynthesizedAudio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynthesizedAudio")
            .field("path", &&*self.path)
            .finish()
    }
}

impl SynthesizedAudio {
    /// Path of the scratch file holding the audio
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the audio bytes, deleting the scratch file afterwards
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read.
    pub async fn into_bytes(self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

/// Service synthesizing text into a single audio file
#[derive(Clone)]
pub struct SynthesisService {
    tts: Arc<dyn TextToSpeech>,
    scratch_dir: Option<PathBuf>,
}

impl fmt::Debug for SynthesisService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynthesisService")
            .field("scratch_dir", &self.scratch_dir)
            .finish_non_exhaustive()
    }
}

impl SynthesisService {
    /// Create a new synthesis service using the system temp directory
    pub fn new(tts: Arc<dyn TextToSpeech>) -> Self {
        Self {
            tts,
            scratch_dir: None,
        }
    }

    /// Place scratch files in a specific directory
    #[must_use]
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    fn make_scratch(&self) -> io::Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("tts-").suffix(".mp3");
        match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
    }

    /// Synthesize text into one scratch MP3 file, chunk by chunk
    ///
    /// Chunks are synthesized and appended strictly in original order.
    /// Cancellation is observed between provider calls; a cancelled run
    /// returns `Superseded` and its partial output file is deleted on drop.
    ///
    /// # Errors
    ///
    /// Provider failures propagate as `ApplicationError::Speech`, scratch
    /// file failures as `ApplicationError::Io`.
    #[instrument(skip(self, text, cancel), fields(text_len = text.len()))]
    pub async fn synthesize_to_file(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<SynthesisOutcome, ApplicationError> {
        let chunks = split_text(text);
        debug!(chunk_count = chunks.len(), "Starting chunked synthesis");

        let scratch = self.make_scratch()?;
        let mut out = File::from_std(scratch.reopen()?);

        for (index, chunk) in chunks.iter().enumerate() {
            let audio = tokio::select! {
                () = cancel.cancelled() => {
                    debug!(chunk = index, "Synthesis superseded, discarding partial output");
                    return Ok(SynthesisOutcome::Superseded);
                }
                result = self.tts.synthesize(chunk) => result?,
            };

            out.write_all(audio.data()).await?;
        }

        out.flush().await?;

        debug!("Synthesis complete");
        Ok(SynthesisOutcome::Completed(SynthesizedAudio {
            path: scratch.into_temp_path(),
        }))
    }
}

struct SynthesisJob {
    text: String,
    reply: oneshot::Sender<Result<SynthesisOutcome, ApplicationError>>,
}

/// Single-slot coordinator for synthesis requests
///
/// Owns the "current synthesis" handle inside one actor task: accepting a new
/// job cancels the previous one before spawning the next, so only the most
/// recently requested utterance is ever produced.
#[derive(Debug, Clone)]
pub struct SynthesisCoordinator {
    tx: mpsc::Sender<SynthesisJob>,
}

impl SynthesisCoordinator {
    /// Spawn the coordinator actor
    pub fn spawn(service: SynthesisService) -> Self {
        let (tx, mut rx) = mpsc::channel::<SynthesisJob>(16);

        tokio::spawn(async move {
            let mut current: Option<CancellationToken> = None;

            while let Some(job) = rx.recv().await {
                if let Some(previous) = current.take() {
                    previous.cancel();
                }

                let cancel = CancellationToken::new();
                current = Some(cancel.clone());

                let service = service.clone();
                tokio::spawn(async move {
                    let result = service.synthesize_to_file(&job.text, &cancel).await;
                    // The requester may have disconnected; the scratch file
                    // is dropped with the result in that case.
                    if job.reply.send(result).is_err() {
                        warn!("Synthesis requester went away before the result was ready");
                    }
                });
            }
        });

        Self { tx }
    }

    /// Request synthesis of `text`, cancelling any in-flight synthesis
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Internal` if the coordinator task is gone,
    /// otherwise the outcome or error of the synthesis itself.
    pub async fn synthesize(
        &self,
        text: impl Into<String>,
    ) -> Result<SynthesisOutcome, ApplicationError> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send(SynthesisJob {
                text: text.into(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| ApplicationError::Internal("synthesis worker is not running".to_string()))?;

        reply_rx
            .await
            .map_err(|_| ApplicationError::Internal("synthesis worker dropped the request".to_string()))?
    }
}
