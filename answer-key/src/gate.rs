//! Overwrite-confirmation gate.
//!
//! Every destructive call first asks the backend how many answer records
//! already exist. Zero proceeds on its own; anything else waits for an
//! explicit confirmation from the operator. The count is fetched fresh on
//! every pass through the gate.
//!
//! The check and the following write are separate requests, so a second
//! operator can still store records in between.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use crate::api::AnswerKeyBackend;
use crate::error::ApiError;
use crate::payload::ExamMetadata;

/// Asks the operator whether existing records may be replaced.
#[async_trait::async_trait]
pub trait OverwriteConfirm: Send + Sync {
    /// `true` to proceed, `false` to cancel.
    async fn confirm_overwrite(&self, existing: u64) -> bool;
}

/// Outcome of passing through the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Nothing stored yet, or the operator confirmed.
    Proceed { existing: u64 },
    /// The operator declined; nothing may be written.
    Cancelled { existing: u64 },
}

impl GateDecision {
    #[must_use]
    pub fn proceeds(self) -> bool {
        matches!(self, Self::Proceed { .. })
    }
}

/// Run the existence check and, when records exist, the confirmation.
///
/// # Errors
///
/// Propagates the backend error from the existence check.
pub async fn overwrite_gate(
    backend: &dyn AnswerKeyBackend,
    confirm: &dyn OverwriteConfirm,
    metadata: &ExamMetadata,
) -> Result<GateDecision, ApiError> {
    let existing = backend.check_existing(metadata).await?;
    if existing == 0 {
        return Ok(GateDecision::Proceed { existing });
    }
    tracing::debug!(existing, "existing answer records, asking for confirmation");
    if confirm.confirm_overwrite(existing).await {
        Ok(GateDecision::Proceed { existing })
    } else {
        tracing::info!(existing, "overwrite cancelled");
        Ok(GateDecision::Cancelled { existing })
    }
}
