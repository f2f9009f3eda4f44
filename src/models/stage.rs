use serde::{Deserialize, Serialize};

/// Pipeline stage (sales funnel position)
///
/// The funnel is a fixed, ordered sequence. Won and Lost sit at the end of
/// the ordering but are ordinary stages: a lead can be dragged out of them
/// again, so nothing here is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    NewLead,
    Contacted,
    Qualified,
    ProposalSent,
    Negotiation,
    Won,
    Lost,
}

impl PipelineStage {
    /// All stages in funnel order. Grouping and rendering iterate this list,
    /// so every stage gets a column even when it holds zero leads.
    pub const ALL: [PipelineStage; 7] = [
        PipelineStage::NewLead,
        PipelineStage::Contacted,
        PipelineStage::Qualified,
        PipelineStage::ProposalSent,
        PipelineStage::Negotiation,
        PipelineStage::Won,
        PipelineStage::Lost,
    ];

    /// Storage slug (database column value, CLI argument form)
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::NewLead => "new_lead",
            PipelineStage::Contacted => "contacted",
            PipelineStage::Qualified => "qualified",
            PipelineStage::ProposalSent => "proposal_sent",
            PipelineStage::Negotiation => "negotiation",
            PipelineStage::Won => "won",
            PipelineStage::Lost => "lost",
        }
    }

    /// Human-readable name for board headers and notifications
    pub fn display_name(&self) -> &'static str {
        match self {
            PipelineStage::NewLead => "New Lead",
            PipelineStage::Contacted => "Contacted",
            PipelineStage::Qualified => "Qualified",
            PipelineStage::ProposalSent => "Proposal Sent",
            PipelineStage::Negotiation => "Negotiation",
            PipelineStage::Won => "Won",
            PipelineStage::Lost => "Lost",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "new_lead" => Some(PipelineStage::NewLead),
            "contacted" => Some(PipelineStage::Contacted),
            "qualified" => Some(PipelineStage::Qualified),
            "proposal_sent" => Some(PipelineStage::ProposalSent),
            "negotiation" => Some(PipelineStage::Negotiation),
            "won" => Some(PipelineStage::Won),
            "lost" => Some(PipelineStage::Lost),
            _ => None,
        }
    }

    /// Zero-based position in the funnel ordering
    pub fn position(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}
