//! Overtime paid with a premium versus overtime banked as time off.

use serde::Serialize;

/// Average working days in a month.
pub const WORKING_DAYS_PER_MONTH: f64 = 21.75;
pub const WEEKDAY_MULTIPLIER: f64 = 1.5;
pub const HOLIDAY_MULTIPLIER: f64 = 2.0;
/// Overtime hours used for the weekly illustration.
pub const WEEKLY_EXAMPLE_HOURS: f64 = 5.0;
pub const DEFAULT_MONTHLY_OVERTIME_HOURS: f64 = 20.0;
const HOLIDAY_SHARE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeDay {
    Weekday,
    Holiday,
}

impl OvertimeDay {
    pub fn multiplier(self) -> f64 {
        match self {
            OvertimeDay::Weekday => WEEKDAY_MULTIPLIER,
            OvertimeDay::Holiday => HOLIDAY_MULTIPLIER,
        }
    }
}

pub fn hourly_rate(monthly_salary: f64, daily_hours: f64) -> f64 {
    monthly_salary / (daily_hours * WORKING_DAYS_PER_MONTH)
}

pub fn premium_pay(hourly_rate: f64, hours: f64, day: OvertimeDay) -> f64 {
    hourly_rate * day.multiplier() * hours
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OvertimeComparison {
    pub hourly_rate: f64,
    pub overtime_hours: f64,
    pub day: OvertimeDay,
    /// Cash paid under the previous regime.
    pub paid_before: f64,
    /// Hours of time off accrued under the hour bank (1:1, unpaid).
    pub banked_hours_after: f64,
    /// Cash no longer paid.
    pub forgone: f64,
}

pub fn compare(
    monthly_salary: f64,
    daily_hours: f64,
    overtime_hours: f64,
    day: OvertimeDay,
) -> OvertimeComparison {
    let rate = hourly_rate(monthly_salary, daily_hours);
    let paid_before = premium_pay(rate, overtime_hours, day);
    OvertimeComparison {
        hourly_rate: rate,
        overtime_hours,
        day,
        paid_before,
        banked_hours_after: overtime_hours,
        forgone: paid_before,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyExample {
    pub weekly_hours: f64,
    pub comparison: OvertimeComparison,
    pub explanation: String,
}

/// A five-day week with [`WEEKLY_EXAMPLE_HOURS`] of weekday overtime.
pub fn weekly_example(monthly_salary: f64, daily_hours: f64) -> WeeklyExample {
    let comparison = compare(
        monthly_salary,
        daily_hours,
        WEEKLY_EXAMPLE_HOURS,
        OvertimeDay::Weekday,
    );
    WeeklyExample {
        weekly_hours: daily_hours * 5.0 + WEEKLY_EXAMPLE_HOURS,
        explanation: format!("{} horas de tiempo libre", comparison.banked_hours_after),
        comparison,
    }
}

pub fn scenarios(monthly_salary: f64, daily_hours: f64) -> Vec<OvertimeComparison> {
    [
        (2.0, OvertimeDay::Weekday),
        (5.0, OvertimeDay::Weekday),
        (8.0, OvertimeDay::Weekday),
        (4.0, OvertimeDay::Holiday),
    ]
    .into_iter()
    .map(|(hours, day)| compare(monthly_salary, daily_hours, hours, day))
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyImpact {
    pub overtime_hours: f64,
    pub paid_before: f64,
    pub banked_hours_after: f64,
    pub monthly_loss: f64,
    pub annual_loss: f64,
}

/// Monthly overtime split 80/20 between weekdays and holidays.
pub fn monthly_impact(monthly_salary: f64, daily_hours: f64, overtime_hours: f64) -> MonthlyImpact {
    let rate = hourly_rate(monthly_salary, daily_hours);
    let holiday_hours = overtime_hours * HOLIDAY_SHARE;
    let weekday_hours = overtime_hours - holiday_hours;
    let paid_before = premium_pay(rate, weekday_hours, OvertimeDay::Weekday)
        + premium_pay(rate, holiday_hours, OvertimeDay::Holiday);

    MonthlyImpact {
        overtime_hours,
        paid_before,
        banked_hours_after: overtime_hours,
        monthly_loss: paid_before,
        annual_loss: paid_before * 12.0,
    }
}
