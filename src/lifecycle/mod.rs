//! Campaign status lifecycle
//!
//! Gates which status transitions an admin may request and enforces that
//! the terminal completed transition carries a report artifact. Local
//! state is never mutated optimistically: the updated record comes back
//! from the server, and listings are patched with a pure reducer after
//! confirmation.

use crate::api::{ApiClient, FileDownload};
use crate::models::{Campaign, CampaignStatus};
use crate::state::events::{AppEvent, EventBus};
use crate::utils::errors::{CampaignHubError, Result};
use crate::utils::logging::log_status_change;

impl CampaignStatus {
    /// Targets an admin may request from this state
    pub fn allowed_targets(self) -> &'static [CampaignStatus] {
        match self {
            CampaignStatus::Pending => &[CampaignStatus::Processing, CampaignStatus::Rejected],
            CampaignStatus::Processing => &[CampaignStatus::Completed, CampaignStatus::Rejected],
            CampaignStatus::Completed => &[],
            CampaignStatus::Rejected => &[],
        }
    }

    pub fn can_transition_to(self, target: CampaignStatus) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// Locked states render no transition controls
    pub fn is_terminal(self) -> bool {
        self.allowed_targets().is_empty()
    }
}

/// Completion report artifact to attach when marking a campaign completed
#[derive(Debug, Clone)]
pub struct ReportUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ReportUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Controller for admin-requested status transitions
#[derive(Debug, Clone)]
pub struct LifecycleController {
    api: ApiClient,
    events: EventBus,
}

impl LifecycleController {
    pub fn new(api: ApiClient, events: EventBus) -> Self {
        Self { api, events }
    }

    /// Request a transition for `campaign` to `target`.
    ///
    /// Illegal transitions fail locally before any network call, and
    /// re-requesting the current status falls under the same check.
    /// The completed target requires a non-empty report and is submitted
    /// as a single upload; every other target is a single status PATCH.
    /// On confirmation a credit-invalidation event is broadcast, since a
    /// rejection may have triggered a server-side refund.
    pub async fn request_transition(
        &self,
        campaign: &Campaign,
        target: CampaignStatus,
        report: Option<ReportUpload>,
    ) -> Result<Campaign> {
        if !campaign.status.can_transition_to(target) {
            return Err(CampaignHubError::InvalidStateTransition {
                from: campaign.status.to_string(),
                to: target.to_string(),
            });
        }

        let updated = if target == CampaignStatus::Completed {
            let report = report.ok_or(CampaignHubError::ReportRequired)?;
            if report.is_empty() {
                return Err(CampaignHubError::ReportRequired);
            }
            self.api.upload_report(&campaign.id, report).await?
        } else {
            self.api.set_campaign_status(&campaign.id, target).await?
        };

        log_status_change(&campaign.id, campaign.status.as_str(), updated.status.as_str());
        self.events.emit(AppEvent::CreditsInvalidated);
        Ok(updated)
    }

    /// Resolve the stored report artifact for on-demand viewing; never
    /// cached beyond the viewing session.
    pub async fn view_report(&self, campaign: &Campaign) -> Result<FileDownload> {
        let report = campaign.report.as_ref().ok_or_else(|| {
            CampaignHubError::InvalidInput(format!("Campaign {} has no stored report", campaign.id))
        })?;
        self.api.status_file(&report.file_key).await
    }
}

/// Patch a fetched listing with a server-confirmed record.
///
/// Pure reducer applied only after the backend accepted the mutation.
pub fn apply_status_update(rows: &mut [Campaign], updated: &Campaign) {
    for row in rows.iter_mut() {
        if row.id == updated.id {
            *row = updated.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn campaign(id: &str, status: CampaignStatus) -> Campaign {
        Campaign {
            id: id.to_string(),
            campaign_name: "Summer Sale".to_string(),
            message: "50% off".to_string(),
            phone_numbers: vec!["9876543210".to_string()],
            media: vec![],
            status,
            report: None,
            owner: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn transition_table_matches_lifecycle() {
        use CampaignStatus::*;
        assert_eq!(Pending.allowed_targets(), &[Processing, Rejected]);
        assert_eq!(Processing.allowed_targets(), &[Completed, Rejected]);
        assert!(Completed.allowed_targets().is_empty());
        assert!(Rejected.allowed_targets().is_empty());
    }

    #[test]
    fn terminal_states_are_locked() {
        assert!(CampaignStatus::Completed.is_terminal());
        assert!(CampaignStatus::Rejected.is_terminal());
        assert!(!CampaignStatus::Pending.is_terminal());
        assert!(!CampaignStatus::Processing.is_terminal());
    }

    #[test]
    fn pending_cannot_jump_straight_to_completed() {
        assert!(!CampaignStatus::Pending.can_transition_to(CampaignStatus::Completed));
    }

    #[test]
    fn repeating_the_current_status_is_rejected() {
        // Re-applying a state is never in the allowed set, so a duplicate
        // request cannot double-apply server-side side effects.
        use CampaignStatus::*;
        for status in [Pending, Processing, Completed, Rejected] {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn reducer_patches_only_the_matching_row() {
        let mut rows = vec![
            campaign("a", CampaignStatus::Pending),
            campaign("b", CampaignStatus::Processing),
        ];
        let updated = campaign("b", CampaignStatus::Rejected);
        apply_status_update(&mut rows, &updated);
        assert_eq!(rows[0].status, CampaignStatus::Pending);
        assert_eq!(rows[1].status, CampaignStatus::Rejected);
    }

    #[test]
    fn reducer_ignores_unknown_ids() {
        let mut rows = vec![campaign("a", CampaignStatus::Pending)];
        let updated = campaign("missing", CampaignStatus::Rejected);
        apply_status_update(&mut rows, &updated);
        assert_eq!(rows[0].status, CampaignStatus::Pending);
    }
}
