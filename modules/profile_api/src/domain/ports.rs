use async_trait::async_trait;

use crate::domain::error::FactError;

/// Outbound port for the external fact dependency.
///
/// `Ok(None)` means the upstream answered successfully but carried no usable
/// `fact` field; that is not an error and must not be logged as one.
#[async_trait]
pub trait FactSource: Send + Sync {
    async fn fetch_fact(&self) -> Result<Option<String>, FactError>;
}
