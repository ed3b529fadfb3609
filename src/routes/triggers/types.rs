use crate::{
    domain::{ActionConfiguration, FormDefinition, FormEntry},
    reconciler::{ReconcileError, ReconcileOutcome},
};

/// What the host pipeline sends when a form with an AWeber action is submitted.
#[derive(serde::Deserialize, Debug)]
pub struct TriggerPayload {
    pub action: ActionConfiguration,
    pub entry: FormEntry,
    #[serde(default)]
    pub form: FormDefinition,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Skipped,
    Created,
    Updated,
    Unchanged,
    Invalid,
    Failed,
}

impl From<&Result<ReconcileOutcome, ReconcileError>> for OutcomeKind {
    fn from(result: &Result<ReconcileOutcome, ReconcileError>) -> Self {
        match result {
            Ok(ReconcileOutcome::Skipped(_)) => OutcomeKind::Skipped,
            Ok(ReconcileOutcome::Created(_)) => OutcomeKind::Created,
            Ok(ReconcileOutcome::Updated(_)) => OutcomeKind::Updated,
            Ok(ReconcileOutcome::Unchanged(_)) => OutcomeKind::Unchanged,
            Err(ReconcileError::MissingEmail { .. }) => OutcomeKind::Invalid,
            Err(ReconcileError::Api(_)) => OutcomeKind::Failed,
        }
    }
}

/// Tells the host this submission was handled and its default AWeber handler
/// must not run for it.
#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct TriggerResponse {
    pub handled: bool,
    pub suppress_default: bool,
    pub outcome: OutcomeKind,
}
