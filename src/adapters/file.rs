use crate::adapters::memory::InMemoryProvider;
use crate::domain::model::{Dataset, Review, VenueId, VenueProfile};
use crate::domain::ports::VenueProvider;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Venue data read once from a JSON fixture file.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
    inner: InMemoryProvider,
}

impl FileProvider {
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        tracing::info!("Loading venue data from {}", path.display());

        let content = tokio::fs::read_to_string(&path).await?;
        let dataset = Dataset::from_json_str(&content)?;
        let inner = InMemoryProvider::from_dataset(dataset)?;

        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl VenueProvider for FileProvider {
    async fn venues(&self) -> Result<Vec<VenueProfile>> {
        self.inner.venues().await
    }

    async fn reviews_for_venue(&self, id: &VenueId) -> Result<Vec<Review>> {
        self.inner.reviews_for_venue(id).await
    }
}
