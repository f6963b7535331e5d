//! Severance pay under the previous regime and under the reform.
//!
//! Previous regime: one month of the *full* remuneration per year of service,
//! where full means salary plus the proportional share of the extra-month
//! bonus, of annual leave, and of other non-monthly benefits.
//!
//! Reform: one month of the *monthly* remuneration per year, capped at three
//! times the sector's agreement average, with two floors (67% of the uncapped
//! amount, and never less than one month of pay).

use serde::Serialize;

use crate::vacation::{vacation_days, vacation_factor};

/// Proportional extra-month bonus (one twelfth of a salary).
pub const BONUS_FACTOR: f64 = 0.0833;
/// Other non-monthly benefits (awards, gratuities).
pub const OTHER_BENEFITS_FACTOR: f64 = 0.03;
pub const CAP_MULTIPLIER: f64 = 3.0;
pub const PROPORTIONAL_FLOOR: f64 = 0.67;
pub const INSTALLMENTS: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeveranceInput {
    pub base_salary: f64,
    pub variable_pay: f64,
    pub seniority_years: f64,
    pub sector_average_wage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeveranceFloor {
    None,
    SixtySevenPercent,
    OneMonth,
}

impl SeveranceFloor {
    pub fn label(self) -> Option<&'static str> {
        match self {
            SeveranceFloor::None => None,
            SeveranceFloor::SixtySevenPercent => Some("67%"),
            SeveranceFloor::OneMonth => Some("1 mes"),
        }
    }
}

/// Concepts that used to count towards the base and no longer do.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseBreakdown {
    pub basic: f64,
    pub variable: f64,
    pub bonus_share: f64,
    pub vacation_share: f64,
    pub other_share: f64,
    pub vacation_days: u32,
    pub vacation_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeveranceBefore {
    pub monthly_pay: f64,
    pub full_base: f64,
    pub years_counted: f64,
    pub total: f64,
    pub breakdown: BaseBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeveranceAfter {
    pub monthly_pay: f64,
    pub cap: f64,
    pub base_used: f64,
    pub cap_applied: bool,
    pub floor_applied: SeveranceFloor,
    pub years_counted: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeveranceComparison {
    pub before: SeveranceBefore,
    pub after: SeveranceAfter,
    pub difference: f64,
    /// Share of the previous amount that is lost, in percent.
    pub percent_lost: f64,
    /// Difference expressed in monthly base salaries.
    pub salaries_lost: f64,
    /// Amount per month if the reformed severance is paid in 12 installments.
    pub monthly_installment: f64,
    /// Base salary alone already exceeds the sector cap.
    pub salary_exceeds_cap: bool,
}

fn years_counted(seniority_years: f64) -> f64 {
    seniority_years.max(1.0)
}

fn breakdown(input: &SeveranceInput) -> BaseBreakdown {
    let monthly = input.base_salary + input.variable_pay;
    let factor = vacation_factor(input.seniority_years);
    BaseBreakdown {
        basic: input.base_salary,
        variable: input.variable_pay,
        bonus_share: monthly * BONUS_FACTOR,
        vacation_share: monthly * factor,
        other_share: monthly * OTHER_BENEFITS_FACTOR,
        vacation_days: vacation_days(input.seniority_years),
        vacation_factor: factor,
    }
}

pub fn before(input: &SeveranceInput) -> SeveranceBefore {
    let monthly_pay = input.base_salary + input.variable_pay;
    let breakdown = breakdown(input);
    let full_base = monthly_pay
        * (1.0 + BONUS_FACTOR + breakdown.vacation_factor + OTHER_BENEFITS_FACTOR);
    let years = years_counted(input.seniority_years);

    SeveranceBefore {
        monthly_pay,
        full_base,
        years_counted: years,
        total: full_base * years,
        breakdown,
    }
}

/// Assumes a positive sector average; `SectorTable` rejects anything else.
pub fn after(input: &SeveranceInput) -> SeveranceAfter {
    let monthly_pay = input.base_salary + input.variable_pay;
    let years = years_counted(input.seniority_years);
    let cap = input.sector_average_wage * CAP_MULTIPLIER;

    let (base_used, cap_applied) = if monthly_pay > cap {
        (cap, true)
    } else {
        (monthly_pay, false)
    };

    let mut total = base_used * years;
    let mut floor_applied = SeveranceFloor::None;

    let proportional_floor = monthly_pay * PROPORTIONAL_FLOOR * years;
    if total < proportional_floor {
        total = proportional_floor;
        floor_applied = SeveranceFloor::SixtySevenPercent;
    }

    if total < monthly_pay {
        total = monthly_pay;
        floor_applied = SeveranceFloor::OneMonth;
    }

    SeveranceAfter {
        monthly_pay,
        cap,
        base_used,
        cap_applied,
        floor_applied,
        years_counted: years,
        total,
    }
}

pub fn compare(input: &SeveranceInput) -> SeveranceComparison {
    let before = before(input);
    let after = after(input);
    let difference = before.total - after.total;
    let percent_lost = if before.total > 0.0 {
        difference / before.total * 100.0
    } else {
        0.0
    };

    SeveranceComparison {
        difference,
        percent_lost,
        salaries_lost: difference / input.base_salary,
        monthly_installment: after.total / INSTALLMENTS,
        salary_exceeds_cap: input.base_salary > after.cap,
        before,
        after,
    }
}
