//! Background screen recording of a page session.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cdp::{PageSession, ScreenshotFormat};

const FRAME_QUALITY: u8 = 70;

/// Periodically captures JPEG frames of a page into a directory.
///
/// Purely diagnostic: capture failures are logged and skipped.
pub struct ScreenRecorder {
    dir: PathBuf,
    cancel: CancellationToken,
    handle: JoinHandle<usize>,
}

impl ScreenRecorder {
    /// Start capturing one frame every `interval` into `dir`.
    pub fn start(page: Arc<PageSession>, dir: PathBuf, interval: Duration) -> Self {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(record(page, dir.clone(), interval, cancel.clone()));
        info!(dir = %dir.display(), interval_ms = interval.as_millis() as u64, "Screen recording started");
        Self {
            dir,
            cancel,
            handle,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stop recording and return the number of frames written.
    pub async fn stop(self) -> usize {
        self.cancel.cancel();
        let frames = match self.handle.await {
            Ok(frames) => frames,
            Err(e) => {
                warn!(error = %e, "Screen recording task failed");
                0
            }
        };
        info!(frames, dir = %self.dir.display(), "Screen recording stopped");
        frames
    }
}

pub(crate) fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("frame_{:05}.jpg", index))
}

async fn record(
    page: Arc<PageSession>,
    dir: PathBuf,
    interval: Duration,
    cancel: CancellationToken,
) -> usize {
    if let Err(e) = tokio::fs::create_dir_all(&dir).await {
        warn!(dir = %dir.display(), error = %e, "Cannot create recording directory");
        return 0;
    }

    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frames = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let bytes = match page.screenshot(ScreenshotFormat::Jpeg, Some(FRAME_QUALITY)).await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        debug!(error = %e, "Skipping frame");
                        continue;
                    }
                };
                let path = frame_path(&dir, frames);
                match tokio::fs::write(&path, bytes).await {
                    Ok(()) => frames += 1,
                    Err(e) => warn!(path = %path.display(), error = %e, "Failed to write frame"),
                }
            }
        }
    }

    frames
}
