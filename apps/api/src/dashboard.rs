//! In-memory usage statistics. Counters and a recent-activity list only —
//! generated resumes themselves are never persisted.

use std::sync::{Arc, Mutex};

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

/// How many recent activities the stats endpoint reports.
const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    ResumeGeneration,
    ResumeOptimization,
}

#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct UsageData {
    total_resumes: u64,
    total_optimizations: u64,
    activities: Vec<Activity>,
}

/// Process-wide activity log shared across handlers.
#[derive(Clone, Default)]
pub struct DashboardManager {
    usage: Arc<Mutex<UsageData>>,
}

#[derive(Debug, Serialize)]
pub struct UsageStatsResponse {
    pub total_resumes: u64,
    pub total_optimizations: u64,
    pub recent_activities: Vec<Activity>,
}

impl DashboardManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_resume_generation(&self, user_id: &str) {
        self.log(user_id, ActivityKind::ResumeGeneration);
    }

    pub fn log_resume_optimization(&self, user_id: &str) {
        self.log(user_id, ActivityKind::ResumeOptimization);
    }

    fn log(&self, user_id: &str, kind: ActivityKind) {
        let mut usage = self.usage.lock().expect("dashboard lock poisoned");
        match kind {
            ActivityKind::ResumeGeneration => usage.total_resumes += 1,
            ActivityKind::ResumeOptimization => usage.total_optimizations += 1,
        }
        usage.activities.push(Activity {
            user_id: user_id.to_string(),
            kind,
            timestamp: Utc::now(),
        });
    }

    pub fn usage_stats(&self) -> UsageStatsResponse {
        let usage = self.usage.lock().expect("dashboard lock poisoned");
        let recent_activities = usage
            .activities
            .iter()
            .rev()
            .take(RECENT_ACTIVITY_LIMIT)
            .rev()
            .cloned()
            .collect();

        UsageStatsResponse {
            total_resumes: usage.total_resumes,
            total_optimizations: usage.total_optimizations,
            recent_activities,
        }
    }
}

/// GET /dashboard/usage-stats
///
/// Returns overall usage counters and the last few activities.
pub async fn handle_usage_stats(State(state): State<AppState>) -> Json<UsageStatsResponse> {
    Json(state.dashboard.usage_stats())
}
