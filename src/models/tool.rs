use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ToolCategory {
    #[serde(rename = "Hand Tools")]
    HandTools,
    #[serde(rename = "Power Tools")]
    PowerTools,
    #[serde(rename = "Measuring Tools")]
    MeasuringTools,
    #[serde(rename = "Safety Equipment")]
    SafetyEquipment,
    #[default]
    #[serde(rename = "Other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolCondition {
    New,
    #[default]
    Good,
    Fair,
    Poor,
    Damaged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ToolStatus {
    #[default]
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "in-use")]
    InUse,
    #[serde(rename = "damaged")]
    Damaged,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolModel {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: ToolCategory,
    pub total_quantity: u32,
    pub available_quantity: u32,
    pub location: String,
    pub condition: ToolCondition,
    pub image_url: Option<String>,
    pub status: ToolStatus,
    pub assigned_to: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateToolReq {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub category: ToolCategory,
    pub quantity: u32,
    pub location: String,
    #[serde(default)]
    pub condition: ToolCondition,
    pub image_url: Option<String>,
}

/// Administrative field patch. Absent fields are left untouched;
/// quantity bookkeeping is re-validated after the patch is applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateToolReq {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ToolCategory>,
    pub total_quantity: Option<u32>,
    pub location: Option<String>,
    pub condition: Option<ToolCondition>,
    pub image_url: Option<String>,
    pub status: Option<ToolStatus>,
}

impl ToolModel {
    pub fn new(req: CreateToolReq) -> AppResult<Self> {
        if req.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }
        if req.location.trim().is_empty() {
            return Err(AppError::Validation("location is required".to_string()));
        }
        if req.quantity == 0 {
            return Err(AppError::Validation("quantity must be positive".to_string()));
        }

        let now = Utc::now();
        Ok(ToolModel {
            id: Uuid::new_v4(),
            name: req.name,
            description: req.description,
            category: req.category,
            total_quantity: req.quantity,
            available_quantity: req.quantity,
            location: req.location,
            condition: req.condition,
            image_url: req.image_url,
            status: ToolStatus::Available,
            assigned_to: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Consistency conditions the ledger commits under:
    /// `available <= total`, `in-use <=> held`, and a held unit must be
    /// accounted for in the counters.
    pub fn check_invariants(&self) -> AppResult<()> {
        if self.available_quantity > self.total_quantity {
            return Err(AppError::Validation(
                "availableQuantity exceeds totalQuantity".to_string(),
            ));
        }
        match (self.status, self.assigned_to.is_some()) {
            (ToolStatus::InUse, false) => {
                return Err(AppError::Validation("in-use tool has no holder".to_string()));
            }
            (ToolStatus::Available, true) | (ToolStatus::Damaged, true) => {
                return Err(AppError::Validation(
                    "tool has a holder but is not in use".to_string(),
                ));
            }
            _ => {}
        }
        if self.assigned_to.is_some() && self.available_quantity >= self.total_quantity {
            return Err(AppError::Validation(
                "counters do not account for the checked-out unit".to_string(),
            ));
        }
        Ok(())
    }

    pub fn apply_patch(&mut self, patch: UpdateToolReq) -> AppResult<()> {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("name is required".to_string()));
            }
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(total) = patch.total_quantity {
            if total == 0 {
                return Err(AppError::Validation(
                    "totalQuantity must be positive".to_string(),
                ));
            }
            // The units currently out stay out; the new total must still
            // cover them, and availability is rebuilt from the remainder.
            let units_out = self.total_quantity.saturating_sub(self.available_quantity);
            if total < units_out {
                return Err(AppError::Validation(
                    "totalQuantity cannot drop below the checked-out units".to_string(),
                ));
            }
            self.total_quantity = total;
            self.available_quantity = total - units_out;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(condition) = patch.condition {
            self.condition = condition;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.check_invariants()
    }
}
