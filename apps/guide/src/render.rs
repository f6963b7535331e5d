//! Plain-text rendering for terminal output.

use std::fmt::Write;

use calculator::{
    dues,
    format::{format_currency, format_percent},
    overtime,
    vacation::{self, check_declared, next_increase},
    PersonalSummary, ReformComparison, SectorTable,
};
use navigator::{InMemoryHost, StepNavigator};
use shared::{domain::UserProfile, protocol::GuideEvent};

pub fn comparison_report(
    profile: &UserProfile,
    comparison: &ReformComparison,
    summary: &PersonalSummary,
) -> String {
    let mut out = String::new();
    let severance = &comparison.severance;

    let _ = writeln!(
        out,
        "{} | {} ({}){}",
        summary.display_name,
        comparison.sector.display_name,
        comparison.sector.agreement_id,
        if profile.is_example_data {
            " | datos de ejemplo"
        } else {
            ""
        }
    );

    let _ = writeln!(out, "\nIndemnización");
    let _ = writeln!(out, "  antes:   {}", format_currency(severance.before.total));
    let _ = writeln!(out, "  después: {}", format_currency(severance.after.total));
    if severance.after.cap_applied {
        let _ = writeln!(
            out,
            "  tope aplicado: {} por año",
            format_currency(severance.after.cap)
        );
    }
    if let Some(label) = severance.after.floor_applied.label() {
        let _ = writeln!(out, "  piso aplicado: {label}");
    }
    let _ = writeln!(out, "  {}", summary.severance_difference);
    let _ = writeln!(
        out,
        "  en 12 cuotas: {}/mes",
        format_currency(severance.monthly_installment)
    );

    let overtime = &comparison.overtime;
    let _ = writeln!(out, "\nHoras extra ({} h por semana)", overtime.overtime_hours);
    let _ = writeln!(out, "  antes:   {}", format_currency(overtime.paid_before));
    let _ = writeln!(
        out,
        "  después: {} horas de tiempo libre",
        overtime.banked_hours_after
    );
    let impact = overtime::monthly_impact(
        profile.base_salary,
        profile.daily_hours,
        overtime::DEFAULT_MONTHLY_OVERTIME_HOURS,
    );
    let _ = writeln!(
        out,
        "  con {} h por mes dejarías de cobrar {} al año",
        impact.overtime_hours,
        format_currency(impact.annual_loss)
    );

    let _ = writeln!(out, "\nPeríodo de prueba");
    let _ = writeln!(out, "  {}", comparison.trial_period.message);

    let dues = &comparison.union_dues;
    let _ = writeln!(out, "\nCuota sindical ({})", format_percent(dues.rate_percent()));
    let _ = writeln!(out, "  {}", summary.union_dues);
    if dues.is_member {
        let _ = writeln!(out, "  al año: {}", format_currency(dues.annual));
    }

    let _ = writeln!(out, "\nJornada\n  {}", summary.hours);
    let _ = writeln!(out, "\nConvenio\n  {}", summary.agreement);

    if !summary.alerts.is_empty() {
        let _ = writeln!(out, "\nAtención");
        for alert in &summary.alerts {
            let _ = writeln!(out, "  - {alert}");
        }
    }
    out
}

pub fn vacation_report(years: f64, declared: Option<u32>) -> String {
    let mut out = String::new();
    let entitlement = vacation::entitlement(years);
    let _ = writeln!(
        out,
        "{} años de antigüedad: {} días ({})",
        years, entitlement.days, entitlement.description
    );

    let increase = next_increase(years);
    match increase.in_years {
        Some(in_years) => {
            let _ = writeln!(
                out,
                "En {in_years} años pasás a {} días (+{})",
                increase.future_days, increase.increase
            );
        }
        None => {
            let _ = writeln!(out, "Ya estás en el tramo máximo");
        }
    }

    if let Some(declared) = declared {
        let _ = writeln!(out, "{}", check_declared(years, declared).message);
    }

    let _ = writeln!(out, "\nEscala");
    for (range, days) in vacation::scale() {
        let _ = writeln!(out, "  {range:<24} {days} días");
    }
    out
}

pub fn sectors_report(table: &SectorTable) -> String {
    let mut out = String::new();
    for (key, reference) in table.iter() {
        let _ = writeln!(
            out,
            "{:<13} {:<14} CCT {:<20} promedio {:>14}  cuota {}",
            key.as_str(),
            reference.display_name,
            reference.agreement_id,
            format_currency(reference.average_agreement_wage),
            format_percent(dues::dues_rate(key) * 100.0)
        );
    }
    out
}

pub fn event_line(event: &GuideEvent) -> String {
    match event {
        GuideEvent::StepChanged {
            current_index,
            previous_index,
            section_id,
        } => format!(
            "paso {} -> {} ({section_id})",
            previous_index + 1,
            current_index + 1
        ),
        GuideEvent::ProfileChanged { is_example } => {
            if *is_example {
                "perfil de ejemplo cargado".to_string()
            } else {
                "perfil actualizado".to_string()
            }
        }
        GuideEvent::ProfileCleared => "perfil borrado".to_string(),
    }
}

pub fn navigation_status(navigator: &StepNavigator<InMemoryHost>) -> String {
    let section = navigator.current_section();
    let dots: String = navigator
        .progress_dots()
        .iter()
        .map(|dot| {
            if dot.active {
                '●'
            } else if dot.completed {
                '•'
            } else {
                '○'
            }
        })
        .collect();

    let mut out = format!(
        "{dots}  {} {}  {}",
        section.id,
        section.title,
        navigator.host().current_url()
    );
    if let Some(controls) = navigator.controls_for(navigator.current_index()) {
        let _ = write!(out, "  [{}]", controls.label);
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
