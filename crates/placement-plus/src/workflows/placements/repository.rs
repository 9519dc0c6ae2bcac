use serde::{Deserialize, Serialize};

use super::domain::{
    Branch, BranchStatistics, CandidateProfile, PlacementRecord, StudentId,
};

/// The atomic write bundle for one placement event: the durable record, the
/// mutated candidate, and (for full-time offers) the mutated branch
/// statistics. All three land together or not at all.
///
/// `candidate` and `statistics` carry the `version` they were read at; a
/// store whose versions have moved rejects the whole bundle with
/// [`RepositoryError::Conflict`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementCommit {
    pub record: PlacementRecord,
    pub candidate: CandidateProfile,
    pub statistics: Option<BranchStatistics>,
}

/// Storage abstraction so the recording service can be exercised in isolation.
///
/// Implementations own the serialization contract: commits against the same
/// branch or candidate must not interleave (row lock or optimistic-version
/// retry, surfaced as `Conflict`), while different branches never contend.
pub trait PlacementRepository: Send + Sync {
    fn register_candidate(&self, profile: CandidateProfile) -> Result<(), RepositoryError>;
    fn candidate(&self, id: &StudentId) -> Result<Option<CandidateProfile>, RepositoryError>;
    fn branch_statistics(&self, branch: Branch)
        -> Result<Option<BranchStatistics>, RepositoryError>;
    /// Snapshot of every branch with recorded placements, for reporting.
    fn statistics_snapshot(&self) -> Result<Vec<BranchStatistics>, RepositoryError>;
    fn commit(&self, commit: PlacementCommit) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Optimistic-concurrency conflict: another writer won the race. Retryable
    /// by the caller; the workflow itself never retries.
    #[error("concurrent update conflict, retry the operation")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record already exists")]
    Duplicate,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
