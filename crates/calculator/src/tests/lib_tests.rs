use super::*;
use crate::{
    format::{
        format_argentine_number, format_currency, format_percent, format_whole_percent,
        parse_argentine_number,
    },
    overtime::OvertimeDay,
    vacation::{check_declared, next_increase, untaken_days_payout, vacation_days},
};
use shared::domain::SectorKey;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

fn input(salary: f64, years: f64, sector_average: f64) -> SeveranceInput {
    SeveranceInput {
        base_salary: salary,
        variable_pay: 0.0,
        seniority_years: years,
        sector_average_wage: sector_average,
    }
}

#[test]
fn severance_reference_case_ten_years() {
    let result = severance::compare(&input(1_000_000.0, 10.0, 500_000.0));

    let expected_before = 1_000_000.0 * (1.0 + 0.0833 + 28.0 / 365.0 + 0.03) * 10.0;
    assert_close(result.before.total, expected_before);
    assert!((result.before.total - 11_900_000.0).abs() / 11_900_000.0 < 1e-4);
    assert_eq!(result.before.breakdown.vacation_days, 28);

    assert_close(result.after.cap, 1_500_000.0);
    assert!(!result.after.cap_applied);
    assert_eq!(result.after.floor_applied, SeveranceFloor::None);
    assert_close(result.after.total, 10_000_000.0);

    assert_close(result.difference, expected_before - 10_000_000.0);
    assert!((result.difference - 1_900_000.0).abs() < 200.0);
    assert_close(result.monthly_installment, 10_000_000.0 / 12.0);
    assert!(!result.salary_exceeds_cap);
}

#[test]
fn severance_cap_limits_the_base() {
    let result = severance::compare(&input(2_000_000.0, 10.0, 500_000.0));

    assert!(result.after.cap_applied);
    assert_close(result.after.base_used, 1_500_000.0);
    assert_close(result.after.total, 15_000_000.0);
    assert_eq!(result.after.floor_applied, SeveranceFloor::None);
    assert!(result.salary_exceeds_cap);
}

#[test]
fn proportional_floor_raises_capped_amount() {
    let result = severance::after(&input(5_000_000.0, 10.0, 500_000.0));

    assert!(result.cap_applied);
    assert_eq!(result.floor_applied, SeveranceFloor::SixtySevenPercent);
    assert_close(result.total, 5_000_000.0 * 0.67 * 10.0);
    assert_eq!(result.floor_applied.label(), Some("67%"));
}

#[test]
fn one_month_floor_dominates_short_tenure() {
    let result = severance::after(&input(5_000_000.0, 0.0, 500_000.0));

    assert!(result.cap_applied);
    assert_eq!(result.years_counted, 1.0);
    assert_eq!(result.floor_applied, SeveranceFloor::OneMonth);
    assert_close(result.total, 5_000_000.0);
}

#[test]
fn variable_pay_counts_in_both_regimes() {
    let mut with_variables = input(1_000_000.0, 3.0, 900_000.0);
    with_variables.variable_pay = 200_000.0;
    let result = severance::compare(&with_variables);

    assert_close(result.after.monthly_pay, 1_200_000.0);
    assert_close(result.after.total, 3_600_000.0);
    assert_close(result.before.breakdown.bonus_share, 1_200_000.0 * 0.0833);
    assert_eq!(result.before.breakdown.vacation_days, 14);
}

#[test]
fn vacation_brackets_use_strict_lower_bounds() {
    assert_eq!(vacation_days(0.0), 0);
    assert_eq!(vacation_days(0.25), 4);
    assert_eq!(vacation_days(0.5), 14);
    assert_eq!(vacation_days(4.99), 14);
    assert_eq!(vacation_days(5.0), 21);
    assert_eq!(vacation_days(9.5), 21);
    assert_eq!(vacation_days(10.0), 28);
    assert_eq!(vacation_days(19.0), 28);
    assert_eq!(vacation_days(20.0), 35);
    assert_eq!(vacation_days(32.0), 35);
}

#[test]
fn vacation_helpers() {
    let increase = next_increase(7.0);
    assert_eq!(increase.in_years, Some(3.0));
    assert_eq!((increase.current_days, increase.future_days), (21, 28));
    assert_eq!(next_increase(25.0).in_years, None);
    assert_eq!(next_increase(25.0).increase, 0);

    let check = check_declared(12.0, 21);
    assert_eq!(check.difference, -7);
    assert!(check.message.contains("28 días"));
    assert_eq!(check_declared(12.0, 28).difference, 0);

    assert_close(untaken_days_payout(1_000_000.0, 5), 200_000.0);
}

#[test]
fn overtime_premium_versus_hour_bank() {
    let weekday = overtime::compare(1_740_000.0, 8.0, 5.0, OvertimeDay::Weekday);
    assert_close(weekday.hourly_rate, 10_000.0);
    assert_close(weekday.paid_before, 75_000.0);
    assert_close(weekday.banked_hours_after, 5.0);
    assert_close(weekday.forgone, 75_000.0);

    let holiday = overtime::compare(1_740_000.0, 8.0, 4.0, OvertimeDay::Holiday);
    assert_close(holiday.paid_before, 80_000.0);

    let weekly = overtime::weekly_example(1_740_000.0, 8.0);
    assert_close(weekly.weekly_hours, 45.0);
    assert_eq!(weekly.explanation, "5 horas de tiempo libre");

    let impact = overtime::monthly_impact(1_740_000.0, 8.0, 20.0);
    assert_close(impact.paid_before, 320_000.0);
    assert_close(impact.annual_loss, 3_840_000.0);

    let scenarios = overtime::scenarios(1_740_000.0, 8.0);
    assert_eq!(scenarios.len(), 4);
    assert_eq!(scenarios[3].day, OvertimeDay::Holiday);
}

#[test]
fn trial_period_classification() {
    let early = trial::classify(2.0);
    assert_eq!(early.status, TrialStatus::InTrialUnderBoth);
    assert_eq!(early.remaining_months, 4.0);

    let affected = trial::classify(4.0);
    assert_eq!(affected.status, TrialStatus::ExitedOldStillInNew);
    assert!(affected.in_trial);
    assert_eq!(affected.remaining_months, 2.0);
    assert!(affected.message.contains("te quedan 2 meses"));

    assert_eq!(trial::classify(3.0).status, TrialStatus::ExitedOldStillInNew);
    assert_eq!(trial::classify(6.0).status, TrialStatus::PastTrial);

    let past = trial::classify(7.0);
    assert_eq!(past.status, TrialStatus::PastTrial);
    assert_eq!(past.remaining_months, 0.0);
    assert!(!past.in_trial);

    assert_eq!(
        trial::classify_seniority(0.25).status,
        TrialStatus::ExitedOldStillInNew
    );
}

#[test]
fn union_dues_for_members_only() {
    let member = dues::compare(1_000_000.0, SectorKey::Comercio, true);
    assert_close(member.rate, 0.02);
    assert_close(member.monthly, 20_000.0);
    assert_close(member.annual, 260_000.0);
    assert_eq!(member.after, dues::DuesRegime::Voluntary);

    let non_member = dues::compare(1_000_000.0, SectorKey::Comercio, false);
    assert_eq!(non_member.monthly, 0.0);
    assert_eq!(non_member.annual, 0.0);

    assert_close(dues::dues_rate(SectorKey::Construccion), 0.03);
    assert_close(dues::dues_rate(SectorKey::Bancario), 0.025);
    assert_eq!(dues::union_info(SectorKey::Construccion).agreement, "76/75");
    assert_eq!(
        dues::deaffiliation_impact(30.0),
        "Impacto significativo en el poder de negociación colectiva"
    );
}

#[test]
fn bundled_sector_table_loads() {
    let table = SectorTable::bundled().expect("bundled sectors");
    for key in SectorKey::ALL {
        assert!(table.contains(key), "missing {key}");
        assert!(table.lookup(key).average_agreement_wage > 0.0);
    }
}

#[test]
fn sector_lookup_falls_back_to_otros() {
    let table = SectorTable::from_json(
        r#"{
            "comercio": {"nombre": "Comercio", "sindicato": "SEC", "convenio": "130/75", "salarioPromedio": 900000},
            "otros": {"nombre": "General", "sindicato": "-", "convenio": "-", "salarioPromedio": 700000}
        }"#,
    )
    .expect("table");

    assert_eq!(table.lookup(SectorKey::Bancario).display_name, "General");
    assert_eq!(table.lookup(SectorKey::Comercio).agreement_id.as_str(), "130/75");
}

#[test]
fn sector_table_rejects_zero_average() {
    let err = SectorTable::from_json(
        r#"{"otros": {"nombre": "General", "sindicato": "-", "convenio": "-", "salarioPromedio": 0}}"#,
    )
    .expect_err("zero average must be rejected");
    assert!(matches!(err, ReferenceError::InvalidAverageWage { .. }));

    let err = SectorTable::from_json(
        r#"{"comercio": {"nombre": "Comercio", "sindicato": "SEC", "convenio": "130/75", "salarioPromedio": 1}}"#,
    )
    .expect_err("fallback required");
    assert!(matches!(err, ReferenceError::MissingFallback));

    assert!(matches!(
        SectorTable::from_json("not json"),
        Err(ReferenceError::Malformed(_))
    ));
}

#[test]
fn full_comparison_is_idempotent() {
    let calculator = ReformCalculator::new(SectorTable::bundled().expect("sectors"));
    let profile = UserProfile::example();

    let first = calculator.compare(&profile);
    let second = calculator.compare(&profile);
    assert_eq!(first, second);
    assert_eq!(first.severance.before.total.to_bits(), second.severance.before.total.to_bits());
    assert_eq!(first.sector.display_name, "Comercio");
    assert_eq!(first.trial_period.status, TrialStatus::PastTrial);
}

#[test]
fn summary_for_example_profile() {
    let calculator = ReformCalculator::new(SectorTable::bundled().expect("sectors"));
    let summary = calculator.summary(&UserProfile::example());

    assert_eq!(summary.display_name, "trabajador");
    assert!(summary.severance_difference.starts_with("Perdés $ "));
    let percent = summary
        .severance_difference
        .rsplit_once('(')
        .and_then(|(_, rest)| rest.strip_suffix("% menos)"))
        .expect("percent lost");
    assert!(percent.chars().all(|c| c.is_ascii_digit()), "{percent}");
    assert!(summary.hours.contains("Trabajás 9 horas"));
    assert!(summary.hours.contains("Esas 1 horas extra"));
    assert!(summary.union_dues.contains("$ 24.000/mes"));
    assert!(summary.agreement.contains("Comercio"));
    assert_eq!(
        summary.alerts,
        vec![
            "Prestá atención si te piden firmar algo sobre la cuota sindical".to_string(),
            "Seguí de cerca las negociaciones del convenio de empresa".to_string(),
        ]
    );
}

#[test]
fn summary_flags_large_severance_loss() {
    let calculator = ReformCalculator::new(SectorTable::bundled().expect("sectors"));
    let mut profile = UserProfile::example();
    profile.base_salary = 10_000_000.0;
    profile.seniority_years = 15.0;
    profile.is_union_member = false;
    profile.has_company_agreement = false;

    let summary = calculator.summary(&profile);
    assert_eq!(
        summary.alerts,
        vec!["Tu indemnización podría reducirse significativamente".to_string()]
    );
    assert!(summary.union_dues.starts_with("No estás afiliado"));
}

#[test]
fn argentine_number_formatting() {
    assert_eq!(format_argentine_number(0), "0");
    assert_eq!(format_argentine_number(999), "999");
    assert_eq!(format_argentine_number(1_000), "1.000");
    assert_eq!(format_argentine_number(1_234_567), "1.234.567");

    assert_eq!(parse_argentine_number("$ 1.200.000"), 1_200_000);
    assert_eq!(parse_argentine_number("abc"), 0);
    assert_eq!(parse_argentine_number(""), 0);
    assert_eq!(parse_argentine_number("99.999.999.999.999.999.999.999"), u64::MAX);

    assert_eq!(format_currency(1_199_999.6), "$ 1.200.000");
    assert_eq!(format_currency(-500.4), "-$ 500");

    assert_eq!(format_percent(2.5), "2.5%");
    assert_eq!(format_whole_percent(15.4), "15%");
}
