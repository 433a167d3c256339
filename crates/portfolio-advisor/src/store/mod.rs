//! Investment Storage
//!
//! The seam to the storage collaborator: per-user investment collections
//! with full-record updates and a live change subscription that triggers
//! aggregate recomputation.

mod memory;

pub use memory::MemoryInvestmentStore;

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{InvestmentAsset, NewInvestment, PortfolioSnapshot};

/// Storage client trait (Strategy pattern)
///
/// Implement this per backend: in-memory, Firestore, SQLite, etc. The
/// core consumes the resulting collections only; it never constructs
/// queries or manages connections. Consistency under concurrent edits is
/// the implementation's concern (last-write-wins is acceptable).
#[async_trait]
pub trait InvestmentStore: Send + Sync {
    /// All investments owned by a user
    async fn list(&self, user_id: &str) -> Result<Vec<InvestmentAsset>>;

    /// A single investment by id, if the user owns it
    async fn get(&self, user_id: &str, id: Uuid) -> Result<Option<InvestmentAsset>>;

    /// Persist a new investment and return the stored record
    async fn create(&self, user_id: &str, input: NewInvestment) -> Result<InvestmentAsset>;

    /// Replace an existing record in full (edits are never partial)
    async fn update(&self, user_id: &str, id: Uuid, input: NewInvestment)
        -> Result<InvestmentAsset>;

    /// Remove an investment
    async fn delete(&self, user_id: &str, id: Uuid) -> Result<()>;

    /// Historical valuations for a user, oldest first
    async fn snapshots(&self, user_id: &str) -> Result<Vec<PortfolioSnapshot>>;

    /// Append a valuation produced by the external snapshot process
    async fn record_snapshot(&self, user_id: &str, snapshot: PortfolioSnapshot) -> Result<()>;

    /// Subscribe to change notifications.
    ///
    /// The receiver observes a counter bumped after every successful
    /// mutation; subscribers react by re-reading the collection and
    /// recomputing derived metrics. The notification carries no payload
    /// on purpose: the full current collection is always re-fetched.
    fn subscribe(&self) -> watch::Receiver<u64>;
}
