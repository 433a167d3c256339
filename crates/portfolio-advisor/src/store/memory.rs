//! In-Memory Investment Store
//!
//! Process-local store used by the server and tests. Holds per-user
//! collections behind an `RwLock` and notifies watchers after every
//! mutation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{watch, RwLock};
use uuid::Uuid;

use super::InvestmentStore;
use crate::error::{AdvisorError, Result};
use crate::model::{InvestmentAsset, NewInvestment, PortfolioSnapshot};

/// In-memory store keyed by user id
pub struct MemoryInvestmentStore {
    assets: RwLock<HashMap<String, Vec<InvestmentAsset>>>,
    snapshots: RwLock<HashMap<String, Vec<PortfolioSnapshot>>>,
    changes: watch::Sender<u64>,
}

impl Default for MemoryInvestmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryInvestmentStore {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            assets: RwLock::new(HashMap::new()),
            snapshots: RwLock::new(HashMap::new()),
            changes,
        }
    }

    /// Bump the change counter; receivers re-read the collection
    fn notify(&self) {
        self.changes.send_modify(|n| *n += 1);
    }
}

#[async_trait]
impl InvestmentStore for MemoryInvestmentStore {
    async fn list(&self, user_id: &str) -> Result<Vec<InvestmentAsset>> {
        let assets = self.assets.read().await;
        Ok(assets.get(user_id).cloned().unwrap_or_default())
    }

    async fn get(&self, user_id: &str, id: Uuid) -> Result<Option<InvestmentAsset>> {
        let assets = self.assets.read().await;
        Ok(assets
            .get(user_id)
            .and_then(|list| list.iter().find(|a| a.id == id))
            .cloned())
    }

    async fn create(&self, user_id: &str, input: NewInvestment) -> Result<InvestmentAsset> {
        input.validate()?;

        let asset = input.into_asset(user_id, Uuid::new_v4());
        {
            let mut assets = self.assets.write().await;
            assets
                .entry(user_id.to_string())
                .or_default()
                .push(asset.clone());
        }

        self.notify();
        Ok(asset)
    }

    async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        input: NewInvestment,
    ) -> Result<InvestmentAsset> {
        input.validate()?;

        let updated = {
            let mut assets = self.assets.write().await;
            let list = assets
                .get_mut(user_id)
                .ok_or(AdvisorError::NotFound(id))?;
            let slot = list
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or(AdvisorError::NotFound(id))?;

            *slot = input.into_asset(user_id, id);
            slot.clone()
        };

        self.notify();
        Ok(updated)
    }

    async fn delete(&self, user_id: &str, id: Uuid) -> Result<()> {
        {
            let mut assets = self.assets.write().await;
            let list = assets
                .get_mut(user_id)
                .ok_or(AdvisorError::NotFound(id))?;
            let before = list.len();
            list.retain(|a| a.id != id);
            if list.len() == before {
                return Err(AdvisorError::NotFound(id));
            }
        }

        self.notify();
        Ok(())
    }

    async fn snapshots(&self, user_id: &str) -> Result<Vec<PortfolioSnapshot>> {
        let snapshots = self.snapshots.read().await;
        Ok(snapshots.get(user_id).cloned().unwrap_or_default())
    }

    async fn record_snapshot(&self, user_id: &str, snapshot: PortfolioSnapshot) -> Result<()> {
        {
            let mut snapshots = self.snapshots.write().await;
            snapshots
                .entry(user_id.to_string())
                .or_default()
                .push(snapshot);
        }

        self.notify();
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssetType;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn input(name: &str) -> NewInvestment {
        NewInvestment {
            name: name.into(),
            asset_type: AssetType::Equity,
            purchase_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            purchase_price: dec!(150),
            current_price: Some(dec!(175.25)),
            quantity: dec!(10),
            brokerage: "TestBroker".into(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_scoped_by_user() {
        let store = MemoryInvestmentStore::new();
        store.create("alice", input("AAPL")).await.unwrap();
        store.create("bob", input("MSFT")).await.unwrap();

        let alice = store.list("alice").await.unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].name, "AAPL");
        assert_eq!(alice[0].user_id, "alice");

        assert_eq!(store.list("bob").await.unwrap().len(), 1);
        assert!(store.list("carol").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_record_update() {
        let store = MemoryInvestmentStore::new();
        let created = store.create("alice", input("AAPL")).await.unwrap();

        let mut edit = input("AAPL");
        edit.current_price = Some(dec!(180));
        edit.notes = Some("added on dip".into());

        let updated = store.update("alice", created.id, edit).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.current_price, Some(dec!(180)));
        assert_eq!(updated.notes.as_deref(), Some("added on dip"));
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = MemoryInvestmentStore::new();
        let err = store
            .update("alice", Uuid::new_v4(), input("AAPL"))
            .await
            .unwrap_err();
        assert!(matches!(err, AdvisorError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryInvestmentStore::new();
        let created = store.create("alice", input("AAPL")).await.unwrap();

        store.delete("alice", created.id).await.unwrap();
        assert!(store.list("alice").await.unwrap().is_empty());

        let err = store.delete("alice", created.id).await.unwrap_err();
        assert!(matches!(err, AdvisorError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_input_rejected() {
        let store = MemoryInvestmentStore::new();
        let mut bad = input("AAPL");
        bad.quantity = Decimal::ZERO;

        let err = store.create("alice", bad).await.unwrap_err();
        assert!(matches!(err, AdvisorError::Validation(_)));
        assert!(store.list("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mutations_notify_subscribers() {
        let store = MemoryInvestmentStore::new();
        let mut rx = store.subscribe();
        let initial = *rx.borrow_and_update();

        let created = store.create("alice", input("AAPL")).await.unwrap();
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update() > initial);

        store.delete("alice", created.id).await.unwrap();
        rx.changed().await.unwrap();
    }

    #[tokio::test]
    async fn test_snapshots_append_only() {
        let store = MemoryInvestmentStore::new();
        for (day, value) in [(1, dec!(45000)), (2, dec!(46500))] {
            store
                .record_snapshot(
                    "alice",
                    PortfolioSnapshot {
                        date: NaiveDate::from_ymd_opt(2023, 1, day).unwrap(),
                        total_value: value,
                    },
                )
                .await
                .unwrap();
        }

        let snaps = store.snapshots("alice").await.unwrap();
        assert_eq!(snaps.len(), 2);
        assert_eq!(snaps[0].total_value, dec!(45000));
    }
}
