// Pipeline board: the state container behind the kanban view
//
// The board owns the in-memory lead set and performs optimistic stage
// transitions against a LeadStore. A drop is split into two discrete
// events: `drop_lead` applies the local mutation synchronously and hands
// back a ticket describing the store request, and `resolve_drop` consumes
// the store call's result, either confirming the move or rolling the lead
// back to its snapshotted record. The front-end (CLI here) drives the
// store call between the two, so the board itself never blocks and the
// visible state always reflects the most recent gesture immediately.

pub mod editor;

pub use editor::*;

use std::collections::HashSet;
use crate::models::{Lead, PipelineStage};
use crate::store::{LeadStore, StoreError};

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A toast-style message queued by board operations and drained by the
/// front-end. Strings are UI copy, not part of any contract.
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

/// Drag interaction state: idle, or holding one lead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging { lead_id: i64 },
}

/// One rendered column: a stage and the leads currently in it
#[derive(Debug)]
pub struct StageColumn<'a> {
    pub stage: PipelineStage,
    pub leads: Vec<&'a Lead>,
}

/// Pending drop transaction
///
/// Captures the store request parameters plus the affected lead's full
/// pre-drop record. Rollback restores exactly this record, so a failed
/// drop never touches any other lead's state (including another drop's
/// optimistic update that landed while this one was in flight).
#[derive(Debug, Clone)]
pub struct DropTicket {
    pub lead_id: i64,
    pub target: PipelineStage,
    pub last_contacted_ts: i64,
    snapshot: Lead,
}

/// Result of requesting a drop
#[derive(Debug)]
pub enum DropOutcome {
    /// Lead is not in the board's set
    NotFound,
    /// Dropped onto its current stage; nothing to do, no store call
    SameStage,
    /// A previous drop on this lead has not resolved yet
    Busy,
    /// Optimistic mutation applied; issue the store update described by
    /// the ticket and feed the result to `resolve_drop`
    Pending(DropTicket),
}

/// In-memory pipeline board
pub struct PipelineBoard {
    leads: Vec<Lead>,
    drag: DragState,
    in_flight: HashSet<i64>,
    notifications: Vec<Notification>,
}

impl PipelineBoard {
    pub fn new() -> Self {
        Self {
            leads: Vec::new(),
            drag: DragState::Idle,
            in_flight: HashSet::new(),
            notifications: Vec::new(),
        }
    }

    /// The full lead set in load order (newest first)
    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn find_lead(&self, lead_id: i64) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == Some(lead_id))
    }

    /// Drain queued notifications (oldest first)
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Replace the lead set from the store. On failure the set is cleared,
    /// an error notification is queued, and the board stays interactive;
    /// there is no automatic retry.
    pub fn load(&mut self, store: &impl LeadStore) {
        match store.list_leads() {
            Ok(leads) => {
                log::debug!("board loaded {} leads", leads.len());
                self.leads = leads;
            }
            Err(e) => {
                self.leads.clear();
                self.notify(
                    "Failed to load leads",
                    &e.to_string(),
                    Severity::Error,
                );
            }
        }
    }

    /// Partition the lead set by stage, one column per configured stage in
    /// funnel order. Pure read: every lead lands in exactly one column,
    /// empty stages still get a column, load order is preserved within
    /// each column.
    pub fn group_by_stage(&self) -> Vec<StageColumn<'_>> {
        PipelineStage::ALL
            .iter()
            .map(|&stage| StageColumn {
                stage,
                leads: self.leads.iter().filter(|l| l.stage == stage).collect(),
            })
            .collect()
    }

    /// Start dragging a lead. Refused (returning false) when the lead is
    /// unknown or still has a drop in flight.
    pub fn begin_drag(&mut self, lead_id: i64) -> bool {
        if self.find_lead(lead_id).is_none() || self.in_flight.contains(&lead_id) {
            return false;
        }
        self.drag = DragState::Dragging { lead_id };
        true
    }

    pub fn cancel_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Drop the currently dragged lead onto a stage
    pub fn drop_dragged(&mut self, target: PipelineStage) -> DropOutcome {
        match self.drag {
            DragState::Dragging { lead_id } => self.drop_lead(lead_id, target),
            DragState::Idle => DropOutcome::NotFound,
        }
    }

    /// Request a stage transition for one lead.
    ///
    /// Applies the optimistic mutation (stage and last-contacted refresh)
    /// synchronously before any store traffic, so callers render the move
    /// instantly. The drag subject is cleared whatever the outcome.
    pub fn drop_lead(&mut self, lead_id: i64, target: PipelineStage) -> DropOutcome {
        self.drag = DragState::Idle;

        let lead = match self.leads.iter_mut().find(|l| l.id == Some(lead_id)) {
            Some(lead) => lead,
            None => return DropOutcome::NotFound,
        };

        if lead.stage == target {
            return DropOutcome::SameStage;
        }
        if self.in_flight.contains(&lead_id) {
            return DropOutcome::Busy;
        }

        let snapshot = lead.clone();
        let now = chrono::Utc::now().timestamp();
        lead.stage = target;
        lead.last_contacted_ts = Some(now);

        self.in_flight.insert(lead_id);
        DropOutcome::Pending(DropTicket {
            lead_id,
            target,
            last_contacted_ts: now,
            snapshot,
        })
    }

    /// Completion event for a pending drop.
    ///
    /// Success keeps the optimistically updated state (no reload needed)
    /// and queues a confirmation. Failure restores the ticket's snapshot
    /// in place and queues the store's error detail. Either way the
    /// lead's in-flight guard is released.
    pub fn resolve_drop(&mut self, ticket: DropTicket, result: Result<(), StoreError>) {
        self.in_flight.remove(&ticket.lead_id);

        match result {
            Ok(()) => {
                self.notify(
                    "Lead moved",
                    &format!(
                        "{} moved to {}",
                        ticket.snapshot.name,
                        ticket.target.display_name()
                    ),
                    Severity::Success,
                );
            }
            Err(e) => {
                if let Some(lead) = self
                    .leads
                    .iter_mut()
                    .find(|l| l.id == Some(ticket.lead_id))
                {
                    *lead = ticket.snapshot.clone();
                }
                self.notify(
                    "Failed to move lead",
                    &format!("{}: {}", ticket.snapshot.name, e),
                    Severity::Error,
                );
            }
        }
    }

    /// Drive a full drop against the store: optimistic apply, persistence
    /// request, resolve. This is the CLI path; interactive front-ends run
    /// the two phases themselves. Returns true when the move persisted.
    pub fn move_lead(
        &mut self,
        store: &impl LeadStore,
        lead_id: i64,
        target: PipelineStage,
    ) -> bool {
        match self.drop_lead(lead_id, target) {
            DropOutcome::Pending(ticket) => {
                let result =
                    store.update_lead_stage(ticket.lead_id, ticket.target, ticket.last_contacted_ts);
                let ok = result.is_ok();
                self.resolve_drop(ticket, result);
                ok
            }
            DropOutcome::SameStage => {
                self.notify(
                    "No change",
                    "Lead is already in that stage",
                    Severity::Info,
                );
                false
            }
            DropOutcome::Busy => {
                self.notify(
                    "Move in progress",
                    "This lead already has a pending move",
                    Severity::Info,
                );
                false
            }
            DropOutcome::NotFound => {
                self.notify("Lead not found", "No such lead on the board", Severity::Error);
                false
            }
        }
    }

    fn notify(&mut self, title: &str, description: &str, severity: Severity) {
        self.notifications.push(Notification {
            title: title.to_string(),
            description: description.to_string(),
            severity,
        });
    }
}

impl Default for PipelineBoard {
    fn default() -> Self {
        Self::new()
    }
}
