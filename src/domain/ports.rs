use crate::domain::model::MarsProperty;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote source of listings. One operation: fetch everything.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn get_properties(&self) -> Result<Vec<MarsProperty>>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
}
