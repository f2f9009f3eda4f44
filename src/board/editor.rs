use anyhow::Result;
use crate::models::{Lead, PipelineStage};
use crate::store::LeadStore;

/// Lead editor form
///
/// Collaborator invoked by the board for create (seeded with an initial
/// stage) and edit (pre-populated from an existing lead). After a
/// successful submit the caller reloads the board; there is no optimistic
/// insert on the create path.
pub struct LeadForm {
    pub lead: Lead,
    is_edit: bool,
}

impl LeadForm {
    /// New-lead form pre-seeded with the stage it was opened from
    pub fn create(initial_stage: PipelineStage) -> Self {
        let mut lead = Lead::new(String::new());
        lead.stage = initial_stage;
        Self {
            lead,
            is_edit: false,
        }
    }

    /// Edit form pre-populated with an existing lead's record
    pub fn edit(lead: Lead) -> Self {
        Self {
            lead,
            is_edit: true,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.is_edit
    }

    /// Validate and persist the form. Returns the stored lead.
    pub fn submit(&self, store: &impl LeadStore) -> Result<Lead> {
        if self.lead.name.trim().is_empty() {
            anyhow::bail!("Lead name cannot be empty");
        }

        if self.is_edit {
            store.update_lead(&self.lead)?;
            Ok(self.lead.clone())
        } else {
            Ok(store.insert_lead(&self.lead)?)
        }
    }
}
