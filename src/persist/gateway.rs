//! Contract the engine requires from durable visit storage.
//!
//! The engine never assumes a toggle succeeded: it updates optimistically
//! and reconciles against the [`ToggleResult`] the gateway eventually
//! returns. Results carry the province id and attempted action so a stale
//! completion can be recognized and discarded.

use crate::core::province::ProvinceId;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One visit record per (user, province) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub id: u64,
    pub user: String,
    pub province: ProvinceId,
    pub notes: Option<String>,
    /// Unix milliseconds
    pub created_at: u64,
    pub updated_at: u64,
}

impl VisitRecord {
    /// Whether the record carries content worth a detail surface.
    pub fn has_detail(&self) -> bool {
        self.notes.as_deref().map(|n| !n.is_empty()).unwrap_or(false)
    }
}

/// A photo attached to a visit record. Cascade-deleted with its record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvincePhoto {
    pub id: u64,
    pub record_id: u64,
    pub url: String,
    pub title: Option<String>,
    pub note: Option<String>,
}

/// Payload for attaching a photo to a visit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPhoto {
    pub url: String,
    pub title: Option<String>,
    pub note: Option<String>,
}

/// Direction of a toggle attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Add,
    Remove,
}

impl fmt::Display for ToggleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleAction::Add => write!(f, "add"),
            ToggleAction::Remove => write!(f, "remove"),
        }
    }
}

/// Tagged outcome of a toggle attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ToggleResult {
    Added { record: VisitRecord },
    Removed { province: ProvinceId, record_id: u64 },
    Failed {
        province: ProvinceId,
        action: ToggleAction,
        reason: String,
    },
}

impl ToggleResult {
    pub fn province(&self) -> &ProvinceId {
        match self {
            ToggleResult::Added { record } => &record.province,
            ToggleResult::Removed { province, .. } => province,
            ToggleResult::Failed { province, .. } => province,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ToggleResult::Failed { .. })
    }
}

/// Async seam to durable visit storage.
///
/// Safe to call concurrently for different provinces; two concurrent
/// toggles on the same province must not both succeed — the second
/// observes the new state and short-circuits.
#[async_trait]
pub trait VisitGateway: Send + Sync {
    /// Current snapshot of the user's visit records; called once at mount.
    async fn fetch_visited(&self, user: &str) -> Result<Vec<VisitRecord>>;

    /// Attempts to flip a province's visited state. Failure is a value,
    /// not an error: the caller reverts its optimistic state from it.
    async fn toggle(&self, user: &str, province: &ProvinceId, action: ToggleAction)
        -> ToggleResult;

    /// Attaches a photo to an existing visit record (detail surface only).
    async fn attach_photo(&self, record_id: u64, photo: NewPhoto) -> Result<ProvincePhoto>;

    /// Photos attached to a visit record (detail surface only).
    async fn list_photos(&self, record_id: u64) -> Result<Vec<ProvincePhoto>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_result_province() {
        let result = ToggleResult::Failed {
            province: ProvinceId::from("HaNoi"),
            action: ToggleAction::Add,
            reason: "offline".to_string(),
        };
        assert_eq!(result.province().as_str(), "HaNoi");
        assert!(result.is_failure());
    }

    #[test]
    fn test_toggle_result_wire_shape() {
        let result = ToggleResult::Removed {
            province: ProvinceId::from("DaNang"),
            record_id: 7,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"], "removed");
        assert_eq!(json["province"], "DaNang");
        assert_eq!(json["record_id"], 7);
    }

    #[test]
    fn test_record_detail_flag() {
        let mut record = VisitRecord {
            id: 1,
            user: "u1".to_string(),
            province: ProvinceId::from("HoChiMinh"),
            notes: None,
            created_at: 0,
            updated_at: 0,
        };
        assert!(!record.has_detail());
        record.notes = Some("street food tour".to_string());
        assert!(record.has_detail());
    }
}
