//! In-memory [`VisitGateway`] used by tests and headless sessions.

use crate::core::province::ProvinceId;
use crate::persist::gateway::{
    NewPhoto, ProvincePhoto, ToggleAction, ToggleResult, VisitGateway, VisitRecord,
};
use crate::prelude::{Duration, HashMap};
use crate::{MapError, Result};
use async_trait::async_trait;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

#[derive(Default)]
struct GatewayState {
    next_id: u64,
    records: HashMap<(String, ProvinceId), VisitRecord>,
    photos: HashMap<u64, Vec<ProvincePhoto>>,
    fail_toggles: bool,
}

/// Mutex-serialized store: concurrent toggles on the same province are
/// ordered by the lock, so the second observes the first's result.
pub struct InMemoryGateway {
    state: Mutex<GatewayState>,
    /// Simulated network latency before each operation touches state.
    latency: Option<Duration>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GatewayState::default()),
            latency: None,
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            state: Mutex::new(GatewayState::default()),
            latency: Some(latency),
        }
    }

    /// Makes every subsequent toggle fail, for revert-path tests.
    pub async fn set_fail_toggles(&self, fail: bool) {
        self.state.lock().await.fail_toggles = fail;
    }

    /// Seeds a visit record directly, bypassing the toggle protocol.
    pub async fn seed_record(&self, user: &str, province: &str, notes: Option<&str>) -> u64 {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let id = state.next_id;
        let record = VisitRecord {
            id,
            user: user.to_string(),
            province: ProvinceId::from(province),
            notes: notes.map(str::to_string),
            created_at: now_millis(),
            updated_at: now_millis(),
        };
        state
            .records
            .insert((user.to_string(), record.province.clone()), record);
        id
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisitGateway for InMemoryGateway {
    async fn fetch_visited(&self, user: &str) -> Result<Vec<VisitRecord>> {
        self.simulate_latency().await;
        let state = self.state.lock().await;
        Ok(state
            .records
            .values()
            .filter(|r| r.user == user)
            .cloned()
            .collect())
    }

    async fn toggle(
        &self,
        user: &str,
        province: &ProvinceId,
        action: ToggleAction,
    ) -> ToggleResult {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;

        if state.fail_toggles {
            return ToggleResult::Failed {
                province: province.clone(),
                action,
                reason: "injected failure".to_string(),
            };
        }

        let key = (user.to_string(), province.clone());
        match action {
            ToggleAction::Add => {
                if let Some(existing) = state.records.get_mut(&key) {
                    // One record per (user, province): upsert idempotently.
                    existing.updated_at = now_millis();
                    let record = existing.clone();
                    return ToggleResult::Added { record };
                }
                state.next_id += 1;
                let record = VisitRecord {
                    id: state.next_id,
                    user: user.to_string(),
                    province: province.clone(),
                    notes: None,
                    created_at: now_millis(),
                    updated_at: now_millis(),
                };
                state.records.insert(key, record.clone());
                ToggleResult::Added { record }
            }
            ToggleAction::Remove => match state.records.remove(&key) {
                Some(record) => {
                    // Photos belong to the record and go with it.
                    state.photos.remove(&record.id);
                    ToggleResult::Removed {
                        province: province.clone(),
                        record_id: record.id,
                    }
                }
                None => ToggleResult::Failed {
                    province: province.clone(),
                    action,
                    reason: "no visit record to remove".to_string(),
                },
            },
        }
    }

    async fn attach_photo(&self, record_id: u64, photo: NewPhoto) -> Result<ProvincePhoto> {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;
        if !state.records.values().any(|r| r.id == record_id) {
            return Err(MapError::Persistence(format!(
                "no visit record with id {record_id}"
            )));
        }
        state.next_id += 1;
        let photo = ProvincePhoto {
            id: state.next_id,
            record_id,
            url: photo.url,
            title: photo.title,
            note: photo.note,
        };
        state.photos.entry(record_id).or_default().push(photo.clone());
        Ok(photo)
    }

    async fn list_photos(&self, record_id: u64) -> Result<Vec<ProvincePhoto>> {
        self.simulate_latency().await;
        let state = self.state.lock().await;
        Ok(state.photos.get(&record_id).cloned().unwrap_or_default())
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
