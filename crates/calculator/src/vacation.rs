//! Statutory annual leave by seniority.
//!
//! Brackets use a strict lower-bound convention: exactly 5, 10 and 20 years
//! already belong to the higher bracket. The severance calculator reads the
//! same scale so both views agree at the boundaries.

use serde::Serialize;

pub const DAYS_PER_YEAR: f64 = 365.0;
/// Divisor used to derive a daily wage from a monthly salary.
pub const WORKING_DAYS_PER_MONTH: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VacationBracket {
    Proportional,
    UpToFive,
    UpToTen,
    UpToTwenty,
    OverTwenty,
}

impl VacationBracket {
    pub fn for_seniority(years: f64) -> Self {
        if years < 0.5 {
            VacationBracket::Proportional
        } else if years < 5.0 {
            VacationBracket::UpToFive
        } else if years < 10.0 {
            VacationBracket::UpToTen
        } else if years < 20.0 {
            VacationBracket::UpToTwenty
        } else {
            VacationBracket::OverTwenty
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            VacationBracket::Proportional => "1 día por cada 20 trabajados",
            VacationBracket::UpToFive => "Hasta 5 años de antigüedad",
            VacationBracket::UpToTen => "Más de 5 y hasta 10 años",
            VacationBracket::UpToTwenty => "Más de 10 y hasta 20 años",
            VacationBracket::OverTwenty => "Más de 20 años de antigüedad",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VacationEntitlement {
    pub days: u32,
    pub bracket: VacationBracket,
    pub description: &'static str,
}

pub fn vacation_days(years: f64) -> u32 {
    let years = years.max(0.0);
    match VacationBracket::for_seniority(years) {
        // Roughly one day per 20 worked, approximated per month of tenure.
        VacationBracket::Proportional => (years * 12.0 * 1.5).floor() as u32,
        VacationBracket::UpToFive => 14,
        VacationBracket::UpToTen => 21,
        VacationBracket::UpToTwenty => 28,
        VacationBracket::OverTwenty => 35,
    }
}

/// Share of a yearly salary that the leave represents (`days / 365`).
pub fn vacation_factor(years: f64) -> f64 {
    f64::from(vacation_days(years)) / DAYS_PER_YEAR
}

pub fn entitlement(years: f64) -> VacationEntitlement {
    let bracket = VacationBracket::for_seniority(years.max(0.0));
    VacationEntitlement {
        days: vacation_days(years),
        bracket,
        description: bracket.description(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclaredVacationCheck {
    pub statutory: VacationEntitlement,
    pub declared_days: u32,
    pub difference: i64,
    pub message: String,
}

/// Compares the days a worker says they get with the statutory minimum.
pub fn check_declared(years: f64, declared_days: u32) -> DeclaredVacationCheck {
    let statutory = entitlement(years);
    let difference = i64::from(declared_days) - i64::from(statutory.days);
    let message = if difference != 0 {
        format!(
            "Según la ley te corresponden {} días, pero indicaste {}.",
            statutory.days, declared_days
        )
    } else {
        format!("Correcto: te corresponden {} días.", statutory.days)
    };

    DeclaredVacationCheck {
        statutory,
        declared_days,
        difference,
        message,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextIncrease {
    /// `None` once the top bracket is reached.
    pub in_years: Option<f64>,
    pub current_days: u32,
    pub future_days: u32,
    pub increase: u32,
}

pub fn next_increase(years: f64) -> NextIncrease {
    let (threshold, current_days, future_days) = if years < 5.0 {
        (Some(5.0), 14, 21)
    } else if years < 10.0 {
        (Some(10.0), 21, 28)
    } else if years < 20.0 {
        (Some(20.0), 28, 35)
    } else {
        (None, 35, 35)
    };

    NextIncrease {
        in_years: threshold.map(|limit| limit - years),
        current_days,
        future_days,
        increase: future_days - current_days,
    }
}

/// Payout owed for leave days not taken (`salary / 25` per day).
pub fn untaken_days_payout(monthly_salary: f64, untaken_days: u32) -> f64 {
    monthly_salary / WORKING_DAYS_PER_MONTH * f64::from(untaken_days)
}

/// Reference scale as shown in the guide.
pub fn scale() -> [(&'static str, u32); 4] {
    [
        ("6 meses a 5 años", 14),
        ("5 a 10 años", 21),
        ("10 a 20 años", 28),
        ("Más de 20 años", 35),
    ]
}
