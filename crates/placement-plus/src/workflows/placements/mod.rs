//! Placement recording, statistics aggregation, and application eligibility.
//!
//! The aggregator and evaluator are pure functions over small in-memory
//! state; all persistence and the atomicity/serialization contract sit behind
//! [`repository::PlacementRepository`], which the surrounding transaction
//! owns.

pub mod domain;
pub mod eligibility;
pub mod repository;
pub mod router;
pub mod service;
pub mod statistics;

#[cfg(test)]
mod tests;

pub use domain::{
    Branch, BranchStatistics, CandidateProfile, CompensationRecord, JobPosting, Month,
    OpportunityType, PlacementRecord, PlacementSubmission, RecordedOffer, Slab, StudentId,
};
pub use eligibility::{
    classify_slab, evaluate, is_eligible, EligibilityDecision, EligibilityError,
    IneligibilityReason,
};
pub use repository::{PlacementCommit, PlacementRepository, RepositoryError};
pub use router::{placement_router, BranchStatisticsView, EligibilityRequest, EligibilityView};
pub use service::{PlacementOutcome, PlacementRecordingService, PlacementServiceError};
pub use statistics::{record_offer, StatisticsError};
