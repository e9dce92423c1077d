use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::timeout;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::ToolModel;

/// A tool record slot. `None` is the tombstone left by delete, so a
/// mutation still holding a handle observes the removal instead of
/// resurrecting the record.
type Slot = Arc<RwLock<Option<ToolModel>>>;

#[derive(Default)]
struct Arena {
    slots: HashMap<Uuid, Slot>,
    order: Vec<Uuid>,
}

/// The shared tool collection. Each record is guarded by its own lock:
/// mutations on one id serialize while distinct ids proceed in parallel,
/// and reads never observe a torn record. Every lock acquisition is
/// bounded by `lock_wait` and surfaces as `AppError::Timeout` rather
/// than hanging the caller.
pub struct ToolStore {
    arena: RwLock<Arena>,
    lock_wait: Duration,
}

impl ToolStore {
    pub fn new(lock_wait: Duration) -> Self {
        Self {
            arena: RwLock::new(Arena::default()),
            lock_wait,
        }
    }

    fn not_found(id: Uuid) -> AppError {
        AppError::NotFound(format!("Tool {} not found", id))
    }

    async fn slot(&self, id: Uuid) -> AppResult<Slot> {
        let arena = self.arena.read().await;
        arena
            .slots
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    pub async fn insert(&self, tool: ToolModel) {
        let mut arena = self.arena.write().await;
        arena.order.push(tool.id);
        arena
            .slots
            .insert(tool.id, Arc::new(RwLock::new(Some(tool))));
    }

    pub async fn get(&self, id: Uuid) -> AppResult<ToolModel> {
        let slot = self.slot(id).await?;
        let guard = timeout(self.lock_wait, slot.read())
            .await
            .map_err(|_| AppError::Timeout)?;
        guard.clone().ok_or_else(|| Self::not_found(id))
    }

    /// Snapshot of every live record in insertion order. A fresh query
    /// per call; each record is read under its own lock.
    pub async fn list(&self) -> AppResult<Vec<ToolModel>> {
        let slots: Vec<Slot> = {
            let arena = self.arena.read().await;
            arena
                .order
                .iter()
                .filter_map(|id| arena.slots.get(id).cloned())
                .collect()
        };
        let mut tools = Vec::with_capacity(slots.len());
        for slot in slots {
            let guard = timeout(self.lock_wait, slot.read())
                .await
                .map_err(|_| AppError::Timeout)?;
            if let Some(tool) = guard.as_ref() {
                tools.push(tool.clone());
            }
        }
        Ok(tools)
    }

    pub async fn list_assigned_to(&self, user_id: Uuid) -> AppResult<Vec<ToolModel>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|t| t.assigned_to == Some(user_id))
            .collect())
    }

    /// The single mutation primitive: `f` validates preconditions against
    /// the current record and rewrites a copy, which is committed only
    /// when `f` succeeds. A rejected operation is a strict no-op, and the
    /// invariant set is re-checked before anything is written back.
    pub async fn update_with<F>(&self, id: Uuid, f: F) -> AppResult<ToolModel>
    where
        F: FnOnce(&mut ToolModel) -> AppResult<()>,
    {
        let slot = self.slot(id).await?;
        let mut guard = timeout(self.lock_wait, slot.write())
            .await
            .map_err(|_| AppError::Timeout)?;
        let current = guard.as_ref().ok_or_else(|| Self::not_found(id))?;
        let mut next = current.clone();
        f(&mut next)?;
        next.check_invariants()?;
        next.updated_at = chrono::Utc::now();
        *guard = Some(next.clone());
        Ok(next)
    }

    /// Unconditional removal, even of a currently assigned tool. The slot
    /// is tombstoned under its own lock before being unlinked.
    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        let slot = self.slot(id).await?;
        let mut guard = timeout(self.lock_wait, slot.write())
            .await
            .map_err(|_| AppError::Timeout)?;
        guard.take().ok_or_else(|| Self::not_found(id))?;

        let mut arena = self.arena.write().await;
        arena.slots.remove(&id);
        arena.order.retain(|t| *t != id);
        Ok(())
    }
}
