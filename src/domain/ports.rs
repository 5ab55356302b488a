use async_trait::async_trait;

use super::customer::{CustomerCollection, NewCustomer};
use super::errors::DirectoryError;

/// Read and create operations of the directory endpoint.
#[async_trait]
pub trait DirectoryApi: Send + Sync + 'static {
    async fn list_customers(&self) -> Result<CustomerCollection, DirectoryError>;
    async fn create_customer(&self, customer: &NewCustomer) -> Result<(), DirectoryError>;
}
