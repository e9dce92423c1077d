use std::sync::Arc;

use uuid::Uuid;

use crate::auth::{AuthGate, Identity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateToolReq, Role, ToolModel, ToolStatus, UpdateToolReq};
use crate::response::ApiResponse;
use crate::store::{ToolStore, UserDirectory};

/// Mutations reserved for administrators.
const ADMIN_ONLY: &[Role] = &[Role::Admin];
/// Operations open to any authenticated caller.
const ANY_ROLE: &[Role] = &[Role::Admin, Role::Worker];

/// The checkout ledger operation surface. Every method authenticates the
/// bearer token and checks its declared role set before any tool state
/// is touched; an unauthorized call never reaches the store.
pub struct ToolsService {
    gate: AuthGate,
    store: Arc<ToolStore>,
    users: Arc<UserDirectory>,
}

impl ToolsService {
    pub fn new(gate: AuthGate, store: Arc<ToolStore>, users: Arc<UserDirectory>) -> Self {
        Self { gate, store, users }
    }

    fn guard(&self, bearer: Option<&str>, required: &[Role]) -> AppResult<Identity> {
        let identity = self.gate.authenticate(bearer)?;
        self.gate.authorize(&identity, required)?;
        Ok(identity)
    }

    pub async fn list_tools(&self, bearer: Option<&str>) -> AppResult<Vec<ToolModel>> {
        self.guard(bearer, ANY_ROLE)?;
        self.store.list().await
    }

    pub async fn get_tool(&self, bearer: Option<&str>, id: Uuid) -> AppResult<ToolModel> {
        self.guard(bearer, ANY_ROLE)?;
        self.store.get(id).await
    }

    /// Tools currently checked out by the caller.
    pub async fn my_tools(&self, bearer: Option<&str>) -> AppResult<Vec<ToolModel>> {
        let identity = self.guard(bearer, ANY_ROLE)?;
        self.store.list_assigned_to(identity.id).await
    }

    pub async fn create_tool(
        &self,
        bearer: Option<&str>,
        req: CreateToolReq,
    ) -> AppResult<ToolModel> {
        self.guard(bearer, ADMIN_ONLY)?;
        let tool = ToolModel::new(req)?;
        self.store.insert(tool.clone()).await;
        tracing::info!(tool_id = %tool.id, name = %tool.name, quantity = tool.total_quantity, "tool created");
        Ok(tool)
    }

    pub async fn update_tool(
        &self,
        bearer: Option<&str>,
        id: Uuid,
        patch: UpdateToolReq,
    ) -> AppResult<ToolModel> {
        self.guard(bearer, ADMIN_ONLY)?;
        let tool = self
            .store
            .update_with(id, |tool| tool.apply_patch(patch))
            .await?;
        tracing::info!(tool_id = %id, "tool updated");
        Ok(tool)
    }

    pub async fn delete_tool(&self, bearer: Option<&str>, id: Uuid) -> AppResult<()> {
        self.guard(bearer, ADMIN_ONLY)?;
        self.store.remove(id).await?;
        tracing::info!(tool_id = %id, "tool removed");
        Ok(())
    }

    /// Check a unit out to `user_id`. One holder per tool at a time: a
    /// tool that already has a holder has no unit free for assignment,
    /// so concurrent assigns on the last unit resolve to exactly one
    /// winner.
    pub async fn assign_tool(
        &self,
        bearer: Option<&str>,
        id: Uuid,
        user_id: Uuid,
    ) -> AppResult<ToolModel> {
        self.guard(bearer, ADMIN_ONLY)?;
        let tool = self
            .store
            .update_with(id, |tool| {
                if tool.status == ToolStatus::Damaged {
                    return Err(AppError::Validation(
                        "tool is marked damaged".to_string(),
                    ));
                }
                if tool.assigned_to.is_some() || tool.available_quantity == 0 {
                    return Err(AppError::InsufficientAvailability);
                }
                if !self.users.contains(user_id) {
                    return Err(AppError::UserNotFound(user_id.to_string()));
                }
                tool.available_quantity -= 1;
                tool.assigned_to = Some(user_id);
                tool.status = ToolStatus::InUse;
                Ok(())
            })
            .await?;
        if let Some(user) = self.users.lookup(user_id) {
            tracing::info!(tool_id = %id, user_id = %user_id, "tool assigned to {}", user.name);
        }
        Ok(tool)
    }

    /// Hand a checked-out unit back. Open to any authenticated caller,
    /// matching the walk-up return desk.
    pub async fn return_tool(&self, bearer: Option<&str>, id: Uuid) -> AppResult<ToolModel> {
        self.guard(bearer, ANY_ROLE)?;
        let tool = self
            .store
            .update_with(id, |tool| {
                if tool.assigned_to.is_none() {
                    return Err(AppError::NotAssigned);
                }
                tool.assigned_to = None;
                tool.available_quantity += 1;
                tool.status = ToolStatus::Available;
                Ok(())
            })
            .await?;
        tracing::info!(tool_id = %id, "tool returned");
        Ok(tool)
    }

    /// Caller-facing envelope for an assign, carrying the holder's name
    /// in the confirmation message.
    pub async fn assign_tool_response(
        &self,
        bearer: Option<&str>,
        id: Uuid,
        user_id: Uuid,
    ) -> ApiResponse<ToolModel> {
        match self.assign_tool(bearer, id, user_id).await {
            Ok(tool) => {
                let holder = self
                    .users
                    .lookup(user_id)
                    .map(|u| u.name.clone())
                    .unwrap_or_default();
                ApiResponse::ok_with_message(tool, format!("Tool assigned to {}", holder))
            }
            Err(err) => ApiResponse::error(&err),
        }
    }

    pub async fn return_tool_response(
        &self,
        bearer: Option<&str>,
        id: Uuid,
    ) -> ApiResponse<ToolModel> {
        match self.return_tool(bearer, id).await {
            Ok(tool) => ApiResponse::ok_with_message(tool, "Tool returned successfully"),
            Err(err) => ApiResponse::error(&err),
        }
    }

    pub async fn delete_tool_response(&self, bearer: Option<&str>, id: Uuid) -> ApiResponse<()> {
        match self.delete_tool(bearer, id).await {
            Ok(()) => ApiResponse::ok_with_message((), "Tool removed successfully"),
            Err(err) => ApiResponse::error(&err),
        }
    }
}
