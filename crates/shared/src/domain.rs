use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(SectionId);
id_newtype!(AgreementId);

/// Section id of the personal-data form. The form section has no "next"
/// button and swallows keyboard and swipe navigation.
pub const FORM_SECTION_ID: &str = "formulario";

/// One narrative step of the guide. The ordered list is fixed once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub order: usize,
    pub title: String,
}

impl Section {
    pub fn new(id: impl Into<String>, order: usize, title: impl Into<String>) -> Self {
        Self {
            id: SectionId::new(id),
            order,
            title: title.into(),
        }
    }

    pub fn is_form(&self) -> bool {
        self.id.as_str() == FORM_SECTION_ID
    }
}

/// Activity sector the worker belongs to. Unknown keys collapse to `Otros`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectorKey {
    Comercio,
    Metalurgico,
    Construccion,
    Gastronomico,
    Bancario,
    Transporte,
    Salud,
    Educacion,
    Informatica,
    #[default]
    Otros,
}

impl SectorKey {
    pub const ALL: [SectorKey; 10] = [
        SectorKey::Comercio,
        SectorKey::Metalurgico,
        SectorKey::Construccion,
        SectorKey::Gastronomico,
        SectorKey::Bancario,
        SectorKey::Transporte,
        SectorKey::Salud,
        SectorKey::Educacion,
        SectorKey::Informatica,
        SectorKey::Otros,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectorKey::Comercio => "comercio",
            SectorKey::Metalurgico => "metalurgico",
            SectorKey::Construccion => "construccion",
            SectorKey::Gastronomico => "gastronomico",
            SectorKey::Bancario => "bancario",
            SectorKey::Transporte => "transporte",
            SectorKey::Salud => "salud",
            SectorKey::Educacion => "educacion",
            SectorKey::Informatica => "informatica",
            SectorKey::Otros => "otros",
        }
    }

    pub fn parse_lenient(raw: &str) -> Self {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or(SectorKey::Otros)
    }
}

impl fmt::Display for SectorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SectorKey {
    fn from(value: String) -> Self {
        SectorKey::parse_lenient(&value)
    }
}

impl From<SectorKey> for String {
    fn from(value: SectorKey) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployerSize {
    Micro,
    Pyme,
    Grande,
    #[default]
    NoSabe,
}

impl FromStr for EmployerSize {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "micro" => EmployerSize::Micro,
            "pyme" => EmployerSize::Pyme,
            "grande" => EmployerSize::Grande,
            _ => EmployerSize::NoSabe,
        })
    }
}

/// Personal data entered on the form. Replaced wholesale on every submission.
///
/// Field names on the wire match the payload the guide has always written to
/// local storage, so previously saved profiles keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(default)]
    pub sector: SectorKey,
    #[serde(rename = "antiguedad", default)]
    pub seniority_years: f64,
    #[serde(rename = "salario")]
    pub base_salary: f64,
    #[serde(rename = "variables", default)]
    pub variable_pay: f64,
    #[serde(rename = "horas", default = "default_daily_hours")]
    pub daily_hours: f64,
    #[serde(rename = "tipoEmpresa", default)]
    pub employer_size: EmployerSize,
    #[serde(rename = "afiliado", default)]
    pub is_union_member: bool,
    #[serde(rename = "convenio", default)]
    pub has_company_agreement: bool,
    #[serde(rename = "isExample", default)]
    pub is_example_data: bool,
}

pub const DEFAULT_DAILY_HOURS: f64 = 8.0;

fn default_daily_hours() -> f64 {
    DEFAULT_DAILY_HOURS
}

impl UserProfile {
    /// Canonical profile used by the "continue without personalizing" path:
    /// a mid-seniority retail worker.
    pub fn example() -> Self {
        Self {
            name: String::new(),
            sector: SectorKey::Comercio,
            seniority_years: 8.0,
            base_salary: 1_200_000.0,
            variable_pay: 0.0,
            daily_hours: 9.0,
            employer_size: EmployerSize::Pyme,
            is_union_member: true,
            has_company_agreement: true,
            is_example_data: true,
        }
    }

    /// Salary plus monthly variable pay.
    pub fn monthly_pay(&self) -> f64 {
        self.base_salary + self.variable_pay
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "trabajador"
        } else {
            self.name.trim()
        }
    }
}

/// Collective-agreement reference data for one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorReference {
    #[serde(rename = "nombre")]
    pub display_name: String,
    #[serde(rename = "sindicato")]
    pub union_name: String,
    #[serde(rename = "salarioPromedio")]
    pub average_agreement_wage: f64,
    #[serde(rename = "convenio")]
    pub agreement_id: AgreementId,
}
