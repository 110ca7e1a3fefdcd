//! Post-processing hook applied to freshly generated avatars.

use async_trait::async_trait;
use std::time::Duration;

/// Transforms a generated image reference before it is committed.
///
/// Implementations must be idempotent: processing an already processed
/// reference yields the same reference.
#[async_trait]
pub trait ImagePostProcessor: Send + Sync {
    async fn process(&self, image_uri: &str) -> String;
}

/// Returns the input unchanged after a fixed delay.
///
/// Stands in for background removal, which the remote model already covers
/// by painting a flat background.
#[derive(Debug, Clone, Default)]
pub struct PassthroughPostProcessor {
    delay: Duration,
}

impl PassthroughPostProcessor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ImagePostProcessor for PassthroughPostProcessor {
    async fn process(&self, image_uri: &str) -> String {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        image_uri.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_passthrough_is_idempotent() {
        let processor = PassthroughPostProcessor::new(Duration::from_millis(1000));
        let uri = "data:image/png;base64,AAAA";

        let start = tokio::time::Instant::now();
        let once = processor.process(uri).await;
        let twice = processor.process(&once).await;

        assert_eq!(once, uri);
        assert_eq!(twice, once);
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}
