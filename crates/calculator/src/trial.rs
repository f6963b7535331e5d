//! Trial-period classification: three months before the reform, six after.

use serde::Serialize;

pub const TRIAL_MONTHS_BEFORE: f64 = 3.0;
pub const TRIAL_MONTHS_AFTER: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialStatus {
    InTrialUnderBoth,
    /// Past the old three-month window but still inside the new one.
    ExitedOldStillInNew,
    PastTrial,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialPeriodStatus {
    pub tenure_months: f64,
    pub status: TrialStatus,
    pub in_trial: bool,
    pub remaining_months: f64,
    pub message: String,
}

pub fn classify(tenure_months: f64) -> TrialPeriodStatus {
    let months = tenure_months.max(0.0);

    if months >= TRIAL_MONTHS_AFTER {
        return TrialPeriodStatus {
            tenure_months: months,
            status: TrialStatus::PastTrial,
            in_trial: false,
            remaining_months: 0.0,
            message: format!(
                "Ya pasaste el período de prueba (tenés más de {TRIAL_MONTHS_AFTER} meses)."
            ),
        };
    }

    let remaining = TRIAL_MONTHS_AFTER - months;
    let (status, message) = if months >= TRIAL_MONTHS_BEFORE {
        (
            TrialStatus::ExitedOldStillInNew,
            format!(
                "Con la ley anterior, ya habrías salido del período de prueba. Con la nueva ley, todavía te quedan {remaining} meses."
            ),
        )
    } else {
        (
            TrialStatus::InTrialUnderBoth,
            format!(
                "Estás en período de prueba. Te quedan {remaining} meses hasta que se confirme tu puesto."
            ),
        )
    };

    TrialPeriodStatus {
        tenure_months: months,
        status,
        in_trial: true,
        remaining_months: remaining,
        message,
    }
}

pub fn classify_seniority(seniority_years: f64) -> TrialPeriodStatus {
    classify(seniority_years * 12.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialRegime {
    pub duration: &'static str,
    pub features: Vec<&'static str>,
}

/// Side-by-side description of both regimes.
pub fn regimes() -> (TrialRegime, TrialRegime) {
    let common = vec![
        "Despido sin causa permitido",
        "Sin indemnización",
        "Derechos laborales básicos",
        "Una sola vez por empleador",
    ];
    let mut reformed = common.clone();
    reformed.push("Doble de tiempo de incertidumbre");

    (
        TrialRegime {
            duration: "3 meses",
            features: common,
        },
        TrialRegime {
            duration: "6 meses",
            features: reformed,
        },
    )
}
