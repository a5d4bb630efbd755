use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Summary block produced by the backend's AI pass. Either the whole block
/// is present or the email has not been processed yet; there is no partial
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSummary {
    pub topic: String,
    pub key_points: String,
    pub action_required: String,
}

/// One email as returned by `GET /api/emails` on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub id: i64,
    pub sender: String,
    pub subject: String,
    pub received_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<EmailSummary>,
}

impl EmailRecord {
    /// Whether the summary marks this email as needing action. The backend
    /// writes `action_required` as free text, so the convention is a
    /// case-insensitive substring test for "yes" or "action"; anything else,
    /// including a literal "no", counts as non-actionable.
    pub fn is_actionable(&self) -> bool {
        self.summary.as_ref().map_or(false, |s| {
            let text = s.action_required.to_lowercase();
            text.contains("yes") || text.contains("action")
        })
    }

    /// Parses `received_at` into local time. Returns `None` for timestamps
    /// that don't parse; callers exclude such records from date filters
    /// instead of failing.
    pub fn received_local(&self) -> Option<DateTime<Local>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.received_at) {
            return Some(dt.with_timezone(&Local));
        }
        // The backend also emits naive timestamps like "2025-08-07 09:15:00".
        let formats = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
        for format in &formats {
            if let Ok(naive) = NaiveDateTime::parse_from_str(&self.received_at, format) {
                return Local.from_local_datetime(&naive).single();
            }
        }
        None
    }
}

/// Response body of `GET /api/emails`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailsResponse {
    pub emails: Vec<EmailRecord>,
    pub count: usize,
}

/// Response body of `GET /api/stats`, passed through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxStats {
    pub total_emails: i64,
    pub total_summaries: i64,
    pub today_emails: i64,
    pub summary_rate: f64,
}

fn default_hours() -> i64 {
    24
}

fn default_summarize() -> bool {
    true
}

/// Request body of `POST /api/fetch-emails`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchEmailsRequest {
    #[serde(default = "default_hours")]
    pub hours: i64,
    #[serde(default = "default_summarize")]
    pub summarize: bool,
}
