//! Before/after comparisons for the labor reform.
//!
//! Every calculator is a pure function of its inputs. Profiles reaching this
//! crate have already passed form validation (positive salary and daily
//! hours, non-negative seniority); sector averages are validated when the
//! [`SectorTable`] is loaded.

use serde::Serialize;
use shared::domain::{SectorReference, UserProfile};
use tracing::debug;

pub mod dues;
pub mod format;
pub mod overtime;
pub mod sectors;
pub mod severance;
pub mod summary;
pub mod trial;
pub mod vacation;

pub use dues::UnionDuesComparison;
pub use overtime::OvertimeComparison;
pub use sectors::{ReferenceError, SectorTable};
pub use severance::{SeveranceComparison, SeveranceFloor, SeveranceInput};
pub use summary::PersonalSummary;
pub use trial::{TrialPeriodStatus, TrialStatus};

/// All four comparisons for one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReformComparison {
    pub sector: SectorReference,
    pub severance: SeveranceComparison,
    /// Weekly illustration: five weekday overtime hours.
    pub overtime: OvertimeComparison,
    pub trial_period: TrialPeriodStatus,
    pub union_dues: UnionDuesComparison,
}

#[derive(Debug, Clone)]
pub struct ReformCalculator {
    sectors: SectorTable,
}

impl ReformCalculator {
    pub fn new(sectors: SectorTable) -> Self {
        Self { sectors }
    }

    pub fn sectors(&self) -> &SectorTable {
        &self.sectors
    }

    pub fn severance_input(&self, profile: &UserProfile) -> SeveranceInput {
        SeveranceInput {
            base_salary: profile.base_salary,
            variable_pay: profile.variable_pay,
            seniority_years: profile.seniority_years,
            sector_average_wage: self.sectors.lookup(profile.sector).average_agreement_wage,
        }
    }

    pub fn compare(&self, profile: &UserProfile) -> ReformComparison {
        let sector = self.sectors.lookup(profile.sector).clone();
        let severance = severance::compare(&self.severance_input(profile));
        let overtime = overtime::compare(
            profile.base_salary,
            profile.daily_hours,
            overtime::WEEKLY_EXAMPLE_HOURS,
            overtime::OvertimeDay::Weekday,
        );
        let trial_period = trial::classify_seniority(profile.seniority_years);
        let union_dues = dues::compare(
            profile.base_salary,
            profile.sector,
            profile.is_union_member,
        );

        debug!(
            sector = %profile.sector,
            severance_difference = severance.difference,
            cap_applied = severance.after.cap_applied,
            trial = ?trial_period.status,
            "computed reform comparison"
        );

        ReformComparison {
            sector,
            severance,
            overtime,
            trial_period,
            union_dues,
        }
    }

    pub fn summary(&self, profile: &UserProfile) -> PersonalSummary {
        summary::build(profile, &self.compare(profile))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
