//! Union dues: the amount does not change, withholding becomes opt-in.

use serde::Serialize;
use shared::domain::SectorKey;

pub const DEFAULT_DUES_RATE: f64 = 0.02;
/// Dues are withheld on twelve salaries plus the extra-month bonus.
pub const PAID_MONTHS_PER_YEAR: f64 = 13.0;

pub fn dues_rate(sector: SectorKey) -> f64 {
    match sector {
        SectorKey::Metalurgico | SectorKey::Bancario => 0.025,
        SectorKey::Construccion | SectorKey::Transporte => 0.03,
        SectorKey::Comercio
        | SectorKey::Gastronomico
        | SectorKey::Salud
        | SectorKey::Educacion
        | SectorKey::Informatica
        | SectorKey::Otros => DEFAULT_DUES_RATE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuesRegime {
    Automatic,
    Voluntary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionDuesComparison {
    pub is_member: bool,
    pub rate: f64,
    pub monthly: f64,
    pub annual: f64,
    pub before: DuesRegime,
    pub after: DuesRegime,
}

impl UnionDuesComparison {
    pub fn rate_percent(&self) -> f64 {
        self.rate * 100.0
    }
}

pub fn compare(salary: f64, sector: SectorKey, is_member: bool) -> UnionDuesComparison {
    let rate = dues_rate(sector);
    let monthly = if is_member { salary * rate } else { 0.0 };
    UnionDuesComparison {
        is_member,
        rate,
        monthly,
        annual: monthly * PAID_MONTHS_PER_YEAR,
        before: DuesRegime::Automatic,
        after: DuesRegime::Voluntary,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnionInfo {
    pub name: &'static str,
    pub members: &'static str,
    pub agreement: &'static str,
}

pub fn union_info(sector: SectorKey) -> UnionInfo {
    let (name, members, agreement) = match sector {
        SectorKey::Comercio => (
            "Sindicato de Empleados de Comercio (SEC)",
            "~1.2 millones",
            "130/75",
        ),
        SectorKey::Metalurgico => ("Unión Obrera Metalúrgica (UOM)", "~250.000", "260/75"),
        SectorKey::Construccion => ("UOCRA", "~400.000", "76/75"),
        SectorKey::Gastronomico => ("UTHGRA", "~300.000", "389/04"),
        SectorKey::Bancario => ("Asociación Bancaria", "~90.000", "18/75"),
        SectorKey::Transporte => ("UTA / Camioneros", "~200.000", "40/89"),
        SectorKey::Salud => ("FATSA", "~150.000", "122/75"),
        SectorKey::Educacion => ("CTERA / UDA", "~350.000", "Paritaria Nacional"),
        SectorKey::Informatica => (
            "Sin sindicato mayoritario",
            "Baja sindicalización",
            "Sin CCT específico",
        ),
        SectorKey::Otros => ("Según actividad", "Variable", "Variable"),
    };
    UnionInfo {
        name,
        members,
        agreement,
    }
}

/// Illustrative effect of a share of members opting out.
pub fn deaffiliation_impact(percent_leaving: f64) -> &'static str {
    if percent_leaving <= 10.0 {
        "Impacto menor en la capacidad de negociación"
    } else if percent_leaving <= 25.0 {
        "Reducción moderada de recursos y representatividad"
    } else if percent_leaving <= 50.0 {
        "Impacto significativo en el poder de negociación colectiva"
    } else {
        "Severa reducción de la capacidad de presión sindical"
    }
}
