//! Sink: persists finished images under the output directory.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::time::timeout;

use crate::config::LimitsConfig;
use crate::entity::Image;
use crate::error::{PipelineError, PipelineResult};
use crate::observe::{PipelineEvent, PipelineObserver};

/// Writes each image to `<dir>/<base_name>.<extension>`.
pub struct Sink {
    dir: Option<PathBuf>,
    timeout_ms: u64,
    observer: Arc<dyn PipelineObserver>,
}

impl Sink {
    /// Create a sink. With no directory, files land in the working directory.
    pub fn new(
        dir: Option<PathBuf>,
        limits: &LimitsConfig,
        observer: Arc<dyn PipelineObserver>,
    ) -> Self {
        Self {
            dir,
            timeout_ms: limits.save_timeout_ms,
            observer,
        }
    }

    /// Path the image will be written to.
    pub fn destination(&self, image: &Image) -> PathBuf {
        match &self.dir {
            Some(dir) => dir.join(image.file_name()),
            None => PathBuf::from(image.file_name()),
        }
    }

    /// Write the image's buffer, replacing any existing file of the same name.
    ///
    /// A half-written file is left in place on failure.
    pub async fn save(&self, image: &Image) -> PipelineResult<PathBuf> {
        let dest = self.destination(image);

        let result = match timeout(Duration::from_millis(self.timeout_ms), self.write(image, &dest))
            .await
        {
            Ok(Ok(())) => Ok(dest),
            Ok(Err(e)) => Err(PipelineError::Save {
                path: image.source_path().to_path_buf(),
                message: format!("{}: {}", dest.display(), e),
            }),
            Err(_) => Err(PipelineError::Timeout {
                path: image.source_path().to_path_buf(),
                stage: "save".to_string(),
                timeout_ms: self.timeout_ms,
            }),
        };

        match &result {
            Ok(dest) => self.observer.record(PipelineEvent::Saved {
                source: image.source_path(),
                dest,
            }),
            Err(error) => self.observer.record(PipelineEvent::SaveFailed { error }),
        }
        result
    }

    async fn write(&self, image: &Image, dest: &std::path::Path) -> std::io::Result<()> {
        if let Some(dir) = self.dir.as_ref().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        let mut file = tokio::fs::File::create(dest).await?;
        file.write_all(image.buffer()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::testing::RecordingObserver;
    use std::path::Path;

    #[tokio::test]
    async fn test_save_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("results").join("nested");
        let observer = Arc::new(RecordingObserver::default());
        let sink = Sink::new(
            Some(out_dir.clone()),
            &LimitsConfig::default(),
            observer.clone(),
        );

        let image = Image::new(Path::new("/in/test1.png"), vec![1, 2, 3, 4]);
        let written = sink.save(&image).await.unwrap();

        assert_eq!(written, out_dir.join("test1.png"));
        assert_eq!(std::fs::read(&written).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(observer.count("saved"), 1);
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("photo.webp");
        std::fs::write(&target, vec![0u8; 64]).unwrap();

        let sink = Sink::new(
            Some(dir.path().to_path_buf()),
            &LimitsConfig::default(),
            Arc::new(RecordingObserver::default()),
        );
        let image = Image::new(Path::new("photo.webp"), vec![7, 7]);
        sink.save(&image).await.unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), vec![7, 7]);
    }

    #[tokio::test]
    async fn test_save_reports_error_with_source_path() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the output directory should be
        let blocker = dir.path().join("results");
        std::fs::write(&blocker, b"file").unwrap();

        let observer = Arc::new(RecordingObserver::default());
        let sink = Sink::new(Some(blocker), &LimitsConfig::default(), observer.clone());
        let image = Image::new(Path::new("in/a.png"), vec![1]);

        let err = sink.save(&image).await.unwrap_err();
        assert_eq!(err.stage(), "save");
        assert_eq!(err.path(), Path::new("in/a.png"));
        assert_eq!(observer.count("save_failed"), 1);
    }

    #[tokio::test]
    async fn test_save_timeout_fails_each_image_independently() {
        let dir = tempfile::tempdir().unwrap();
        let limits = LimitsConfig {
            save_timeout_ms: 1,
            ..LimitsConfig::default()
        };
        let observer = Arc::new(RecordingObserver::default());
        let sink = Sink::new(Some(dir.path().join("out")), &limits, observer.clone());

        for name in ["first.png", "second.png"] {
            let image = Image::new(Path::new(name), vec![0u8; 64 * 1024 * 1024]);
            let err = sink.save(&image).await.unwrap_err();
            assert!(matches!(err, PipelineError::Timeout { timeout_ms: 1, .. }));
            assert_eq!(err.stage(), "save");
            assert_eq!(err.path(), Path::new(name));
        }
        assert_eq!(observer.count("save_failed"), 2);
        assert_eq!(observer.count("saved"), 0);
    }
}
