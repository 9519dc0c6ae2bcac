use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::{
    Branch, BranchStatistics, CandidateProfile, JobPosting, Month, PlacementRecord,
    PlacementSubmission, RecordedOffer, StudentId,
};
use super::eligibility::{self, EligibilityDecision, EligibilityError};
use super::repository::{PlacementCommit, PlacementRepository, RepositoryError};
use super::statistics::{self, StatisticsError};

/// Service composing the aggregator, evaluator, and repository into the
/// placement recording and application workflows.
///
/// Both workflows compute their new state in memory and hand the repository a
/// single [`PlacementCommit`]; atomicity and per-branch serialization are the
/// repository's contract, so a [`RepositoryError::Conflict`] here means the
/// caller may retry the whole operation.
pub struct PlacementRecordingService<R> {
    repository: Arc<R>,
}

impl<R> PlacementRecordingService<R>
where
    R: PlacementRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Register a candidate profile so placements can be recorded against it.
    pub fn register_candidate(
        &self,
        profile: CandidateProfile,
    ) -> Result<CandidateProfile, PlacementServiceError> {
        if !(profile.cgpa.is_finite() && (0.0..=10.0).contains(&profile.cgpa)) {
            return Err(EligibilityError::CgpaOutOfRange { cgpa: profile.cgpa }.into());
        }
        self.repository.register_candidate(profile.clone())?;
        Ok(profile)
    }

    /// Record one placement event and return the state the commit persisted.
    pub fn record_placement(
        &self,
        submission: PlacementSubmission,
    ) -> Result<PlacementOutcome, PlacementServiceError> {
        let month = Month::from_two_digit(&submission.month)
            .ok_or_else(|| PlacementServiceError::InvalidMonth(submission.month.clone()))?;

        let mut candidate = self
            .repository
            .candidate(&submission.student_id)?
            .ok_or_else(|| PlacementServiceError::UnknownStudent(submission.student_id.clone()))?;

        let statistics = match submission.offer {
            RecordedOffer::FullTime { ctc_lpa } => {
                let offer_slab = eligibility::classify_slab(ctc_lpa)?;
                let existing = self.repository.branch_statistics(candidate.branch)?;
                let updated =
                    statistics::record_offer(existing, candidate.branch, ctc_lpa, month)?;

                candidate.full_time_eligible = false;
                // Slabs never move down, even if a lower offer is recorded
                // out of band.
                candidate.slab =
                    Some(candidate.slab.map_or(offer_slab, |held| held.max(offer_slab)));

                Some(updated)
            }
            RecordedOffer::Internship { monthly_stipend } => {
                if !(monthly_stipend.is_finite() && monthly_stipend > 0.0) {
                    return Err(PlacementServiceError::InvalidStipend { monthly_stipend });
                }
                candidate.internship_eligible = false;
                None
            }
        };

        let record = PlacementRecord {
            student_id: candidate.student_id.clone(),
            company: submission.company,
            branch: candidate.branch,
            offer: submission.offer,
            month,
            recorded_on: submission.recorded_on,
        };

        self.repository.commit(PlacementCommit {
            record: record.clone(),
            candidate: candidate.clone(),
            statistics: statistics.clone(),
        })?;

        Ok(PlacementOutcome {
            record,
            candidate,
            statistics,
        })
    }

    /// Evaluate whether a registered candidate may apply to a posting.
    pub fn evaluate_application(
        &self,
        student_id: &StudentId,
        posting: &JobPosting,
    ) -> Result<EligibilityDecision, PlacementServiceError> {
        let candidate = self
            .repository
            .candidate(student_id)?
            .ok_or_else(|| PlacementServiceError::UnknownStudent(student_id.clone()))?;
        Ok(eligibility::evaluate(&candidate, posting)?)
    }

    pub fn candidate(
        &self,
        student_id: &StudentId,
    ) -> Result<CandidateProfile, PlacementServiceError> {
        self.repository
            .candidate(student_id)?
            .ok_or_else(|| PlacementServiceError::UnknownStudent(student_id.clone()))
    }

    /// Per-branch statistics; a branch with no placements yet is the base
    /// case, not an error.
    pub fn branch_statistics(
        &self,
        branch: Branch,
    ) -> Result<Option<BranchStatistics>, PlacementServiceError> {
        Ok(self.repository.branch_statistics(branch)?)
    }

    pub fn statistics_overview(&self) -> Result<Vec<BranchStatistics>, PlacementServiceError> {
        Ok(self.repository.statistics_snapshot()?)
    }
}

/// Everything one successful recording persisted, echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementOutcome {
    pub record: PlacementRecord,
    pub candidate: CandidateProfile,
    pub statistics: Option<BranchStatistics>,
}

/// Error raised by the placement workflows.
#[derive(Debug, thiserror::Error)]
pub enum PlacementServiceError {
    #[error("no candidate registered for student '{0}'")]
    UnknownStudent(StudentId),
    #[error("invalid month code '{0}', expected \"01\"..\"12\"")]
    InvalidMonth(String),
    #[error("stipend must be a positive figure, got {monthly_stipend}")]
    InvalidStipend { monthly_stipend: f64 },
    #[error(transparent)]
    Statistics(#[from] StatisticsError),
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl PlacementServiceError {
    /// Whether the caller may retry the same operation unchanged.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlacementServiceError::Repository(RepositoryError::Conflict)
        )
    }
}
