//! Personalized closing summary of what changes for one profile.

use serde::Serialize;
use shared::domain::UserProfile;

use crate::{
    format::{format_currency, format_whole_percent},
    ReformComparison,
};

const STANDARD_DAILY_HOURS: f64 = 8.0;
/// Severance loss above this many salaries raises an alert.
const SIGNIFICANT_LOSS_SALARIES: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalSummary {
    pub display_name: String,
    pub severance_before: String,
    pub severance_after: String,
    pub severance_difference: String,
    pub hours: String,
    pub union_dues: String,
    pub agreement: String,
    pub alerts: Vec<String>,
}

pub fn build(profile: &UserProfile, comparison: &ReformComparison) -> PersonalSummary {
    let severance = &comparison.severance;
    let sector_name = &comparison.sector.display_name;

    let severance_difference = if severance.difference > 0.0 {
        format!(
            "Perdés {} ({} menos)",
            format_currency(severance.difference),
            format_whole_percent(severance.percent_lost)
        )
    } else {
        "Sin cambio significativo por el mínimo garantizado".to_string()
    };

    let hours = if profile.daily_hours > STANDARD_DAILY_HOURS {
        format!(
            "Trabajás {} horas por día. Esas {} horas extra antes se pagaban al 50-100%. Ahora podrían compensarte con tiempo libre en vez de plata.",
            profile.daily_hours,
            profile.daily_hours - STANDARD_DAILY_HOURS
        )
    } else {
        "Trabajás 8 horas por día. Si te piden horas extra, ahora podrían compensarte con tiempo libre en vez de pagártelas.".to_string()
    };

    let union_dues = if profile.is_union_member {
        format!(
            "Estás afiliado. Los ~{}/mes que te descuentan ahora son voluntarios. Tu empleador podría preguntarte si querés seguir aportando.",
            format_currency(comparison.union_dues.monthly)
        )
    } else {
        "No estás afiliado, no te descuentan cuota. Pero esto debilita al sindicato de tu sector, lo que puede afectarte en futuras negociaciones.".to_string()
    };

    let agreement = if profile.has_company_agreement {
        format!(
            "Tu empresa tiene convenio propio. Ahora prevalece sobre el nacional. Podrían negociar condiciones distintas a las del CCT de {sector_name}."
        )
    } else {
        format!(
            "Te rige el CCT de {sector_name}. Pero ahora podrían crear un convenio de empresa con condiciones diferentes."
        )
    };

    let mut alerts = Vec::new();
    if severance.difference > profile.base_salary * SIGNIFICANT_LOSS_SALARIES {
        alerts.push("Tu indemnización podría reducirse significativamente".to_string());
    }
    if profile.is_union_member {
        alerts.push("Prestá atención si te piden firmar algo sobre la cuota sindical".to_string());
    }
    if profile.has_company_agreement {
        alerts.push("Seguí de cerca las negociaciones del convenio de empresa".to_string());
    }

    PersonalSummary {
        display_name: profile.display_name().to_string(),
        severance_before: format_currency(severance.before.total),
        severance_after: format_currency(severance.after.total),
        severance_difference,
        hours,
        union_dues,
        agreement,
        alerts,
    }
}
