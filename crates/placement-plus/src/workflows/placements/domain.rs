use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for enrolled students.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Academic branches tracked by the placement cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Branch {
    ComputerScience,
    InformationTechnology,
    Electronics,
    Electrical,
    Mechanical,
    Civil,
    Chemical,
}

impl Branch {
    pub const fn label(self) -> &'static str {
        match self {
            Branch::ComputerScience => "CSE",
            Branch::InformationTechnology => "IT",
            Branch::Electronics => "ECE",
            Branch::Electrical => "EE",
            Branch::Mechanical => "ME",
            Branch::Civil => "CE",
            Branch::Chemical => "CHE",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|branch| branch.label().eq_ignore_ascii_case(label))
    }

    pub fn ordered() -> Vec<Self> {
        vec![
            Branch::ComputerScience,
            Branch::InformationTechnology,
            Branch::Electronics,
            Branch::Electrical,
            Branch::Mechanical,
            Branch::Civil,
            Branch::Chemical,
        ]
    }
}

/// Calendar month an offer was recorded in, constructed from the two-digit
/// codes the surrounding system submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// Parse a zero-padded two-digit month code ("01".."12").
    pub fn from_two_digit(code: &str) -> Option<Self> {
        let month = match code {
            "01" => Month::January,
            "02" => Month::February,
            "03" => Month::March,
            "04" => Month::April,
            "05" => Month::May,
            "06" => Month::June,
            "07" => Month::July,
            "08" => Month::August,
            "09" => Month::September,
            "10" => Month::October,
            "11" => Month::November,
            "12" => Month::December,
            _ => return None,
        };
        Some(month)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

/// What a posting is hiring for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpportunityType {
    Internship,
    FullTime,
    Both,
}

impl OpportunityType {
    pub const fn includes_internship(self) -> bool {
        matches!(self, OpportunityType::Internship | OpportunityType::Both)
    }

    pub const fn includes_full_time(self) -> bool {
        matches!(self, OpportunityType::FullTime | OpportunityType::Both)
    }
}

/// Compensation tier a full-time offer falls in. Once a candidate holds an
/// offer in a tier, later applications must target a strictly higher tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Slab {
    Tier0,
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

impl Slab {
    pub const fn rank(self) -> u8 {
        match self {
            Slab::Tier0 => 0,
            Slab::Tier1 => 1,
            Slab::Tier2 => 2,
            Slab::Tier3 => 3,
            Slab::Tier4 => 4,
        }
    }
}

/// One accepted full-time compensation figure; immutable once recorded and
/// owned by the branch statistics it contributed to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompensationRecord {
    pub ctc_lpa: f64,
    pub month: Month,
}

/// Running placement aggregates for one branch.
///
/// Invariants held after every aggregator update: `avg_package` is the mean of
/// `ctc_values`, `median_package` their median, `max_package` their maximum,
/// and `placed_students` their count. `total_students` is the branch's
/// registered enrollment, maintained by the repository as candidates register.
/// `version` is the optimistic-concurrency token checked on commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchStatistics {
    pub branch: Branch,
    pub avg_package: f64,
    pub median_package: f64,
    pub max_package: f64,
    pub total_students: u32,
    pub placed_students: u32,
    pub ctc_values: Vec<CompensationRecord>,
    pub version: u64,
}

/// Academic profile the evaluator and recording workflow operate on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub student_id: StudentId,
    pub name: String,
    pub cgpa: f64,
    pub branch: Branch,
    pub batch: u16,
    pub internship_eligible: bool,
    pub full_time_eligible: bool,
    pub slab: Option<Slab>,
    pub version: u64,
}

/// Criteria snapshot of a company posting; immutable once published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub company: String,
    pub opportunity: OpportunityType,
    pub ctc_lpa: Option<f64>,
    pub monthly_stipend: Option<f64>,
    pub cgpa_criteria: f64,
    pub eligible_branches: BTreeSet<Branch>,
    pub eligible_batches: BTreeSet<u16>,
}

/// The offer being recorded for a student.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RecordedOffer {
    FullTime { ctc_lpa: f64 },
    Internship { monthly_stipend: f64 },
}

impl RecordedOffer {
    pub const fn is_full_time(self) -> bool {
        matches!(self, RecordedOffer::FullTime { .. })
    }
}

/// Inbound payload from the placement recording workflow. The month arrives as
/// the two-digit code used throughout the surrounding product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementSubmission {
    pub student_id: StudentId,
    pub company: String,
    pub offer: RecordedOffer,
    pub month: String,
    pub recorded_on: NaiveDate,
}

/// Durable record of one placement event. Each recording produces a distinct
/// record, including repeat offers with identical terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub student_id: StudentId,
    pub company: String,
    pub branch: Branch,
    pub offer: RecordedOffer,
    pub month: Month,
    pub recorded_on: NaiveDate,
}
