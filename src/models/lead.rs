use serde::{Deserialize, Serialize};
use crate::models::PipelineStage;

/// Lead model
///
/// A prospective client tracked through the sales pipeline. A lead belongs
/// to exactly one stage at any instant; the board mutates only `stage` and
/// `last_contacted_ts`, full-field edits go through the editor form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: Option<i64>,
    pub uuid: String,
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub stage: PipelineStage,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub last_contacted_ts: Option<i64>,
    pub created_ts: i64,
}

impl Lead {
    /// Create a new lead in the first pipeline stage
    pub fn new(name: String) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id: None,
            uuid: uuid::Uuid::new_v4().to_string(),
            name,
            company: None,
            email: None,
            phone: None,
            stage: PipelineStage::NewLead,
            source: None,
            notes: None,
            last_contacted_ts: None,
            created_ts: now,
        }
    }

    /// Short label for board cards: "name (company)" when a company is set
    pub fn card_label(&self) -> String {
        match &self.company {
            Some(company) => format!("{} ({})", self.name, company),
            None => self.name.clone(),
        }
    }
}
