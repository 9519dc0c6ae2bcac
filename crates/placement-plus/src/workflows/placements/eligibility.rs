//! Eligibility evaluation for application attempts.
//!
//! Pure decision logic: [`evaluate`] never mutates the candidate or posting
//! and is re-run fresh on every application attempt. Exclusivity gates run
//! before the academic criteria so the reported reason matches placement-cell
//! policy order.

use serde::Serialize;

use super::domain::{CandidateProfile, JobPosting, Slab};

/// Outcome of evaluating a candidate against a posting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EligibilityDecision {
    Eligible,
    Ineligible(IneligibilityReason),
}

impl EligibilityDecision {
    pub const fn is_eligible(&self) -> bool {
        matches!(self, EligibilityDecision::Eligible)
    }

    pub fn summary(&self) -> String {
        match self {
            EligibilityDecision::Eligible => "eligible to apply".to_string(),
            EligibilityDecision::Ineligible(reason) => reason.summary(),
        }
    }
}

/// Enumerates why an application attempt is blocked, to support user-facing
/// rejection notices composed by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IneligibilityReason {
    InternshipExhausted,
    SlabNotExceeded { posting_slab: Slab, current_slab: Slab },
    BatchNotEligible { batch: u16 },
    CgpaBelowCutoff { required: f64, actual: f64 },
    BranchNotEligible { branch: &'static str },
}

impl IneligibilityReason {
    pub fn summary(&self) -> String {
        match self {
            IneligibilityReason::InternshipExhausted => {
                "already holds an internship offer".to_string()
            }
            IneligibilityReason::SlabNotExceeded {
                posting_slab,
                current_slab,
            } => format!(
                "posting slab {} does not exceed current slab {}",
                posting_slab.rank(),
                current_slab.rank()
            ),
            IneligibilityReason::BatchNotEligible { batch } => {
                format!("batch {batch} is not eligible for this posting")
            }
            IneligibilityReason::CgpaBelowCutoff { required, actual } => {
                format!("CGPA {actual:.2} below required {required:.2}")
            }
            IneligibilityReason::BranchNotEligible { branch } => {
                format!("branch {branch} is not eligible for this posting")
            }
        }
    }
}

/// Input failures that stop evaluation before a decision can be made.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EligibilityError {
    #[error("posting '{company}' offers full-time work but carries no CTC")]
    MissingCompensation { company: String },
    #[error("CTC must be a positive LPA figure, got {ctc_lpa}")]
    InvalidCompensation { ctc_lpa: f64 },
    #[error("CGPA must lie in [0, 10], got {cgpa}")]
    CgpaOutOfRange { cgpa: f64 },
}

/// Map a CTC figure onto its compensation slab.
///
/// Zero, negative, and non-finite figures are validation errors rather than a
/// guessed tier. Callers gating on slabs must validate the posting carries a
/// CTC before reaching this point; a missing figure is a precondition
/// violation surfaced through [`EligibilityError::MissingCompensation`].
pub fn classify_slab(ctc_lpa: f64) -> Result<Slab, EligibilityError> {
    if !(ctc_lpa.is_finite() && ctc_lpa > 0.0) {
        return Err(EligibilityError::InvalidCompensation { ctc_lpa });
    }

    let slab = if ctc_lpa <= 8.0 {
        Slab::Tier0
    } else if ctc_lpa <= 12.0 {
        Slab::Tier1
    } else if ctc_lpa <= 18.0 {
        Slab::Tier2
    } else if ctc_lpa <= 25.0 {
        Slab::Tier3
    } else {
        Slab::Tier4
    };
    Ok(slab)
}

/// Decide whether `candidate` may apply to `posting`.
pub fn evaluate(
    candidate: &CandidateProfile,
    posting: &JobPosting,
) -> Result<EligibilityDecision, EligibilityError> {
    if !(candidate.cgpa.is_finite() && (0.0..=10.0).contains(&candidate.cgpa)) {
        return Err(EligibilityError::CgpaOutOfRange {
            cgpa: candidate.cgpa,
        });
    }

    if posting.opportunity.includes_internship() && !candidate.internship_eligible {
        return Ok(EligibilityDecision::Ineligible(
            IneligibilityReason::InternshipExhausted,
        ));
    }

    if posting.opportunity.includes_full_time() && !candidate.full_time_eligible {
        let ctc_lpa = posting
            .ctc_lpa
            .ok_or_else(|| EligibilityError::MissingCompensation {
                company: posting.company.clone(),
            })?;
        let posting_slab = classify_slab(ctc_lpa)?;
        // A first full-time offer is never slab-gated; a candidate holding one
        // may only trade up to a strictly higher tier.
        let current_slab = candidate.slab.unwrap_or(Slab::Tier0);
        if posting_slab <= current_slab {
            return Ok(EligibilityDecision::Ineligible(
                IneligibilityReason::SlabNotExceeded {
                    posting_slab,
                    current_slab,
                },
            ));
        }
    }

    if !posting.eligible_batches.contains(&candidate.batch) {
        return Ok(EligibilityDecision::Ineligible(
            IneligibilityReason::BatchNotEligible {
                batch: candidate.batch,
            },
        ));
    }

    if candidate.cgpa < posting.cgpa_criteria {
        return Ok(EligibilityDecision::Ineligible(
            IneligibilityReason::CgpaBelowCutoff {
                required: posting.cgpa_criteria,
                actual: candidate.cgpa,
            },
        ));
    }

    if !posting.eligible_branches.contains(&candidate.branch) {
        return Ok(EligibilityDecision::Ineligible(
            IneligibilityReason::BranchNotEligible {
                branch: candidate.branch.label(),
            },
        ));
    }

    Ok(EligibilityDecision::Eligible)
}

/// Boolean contract required by the application workflow.
pub fn is_eligible(
    candidate: &CandidateProfile,
    posting: &JobPosting,
) -> Result<bool, EligibilityError> {
    evaluate(candidate, posting).map(|decision| decision.is_eligible())
}
