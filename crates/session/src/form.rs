//! Raw form values and their conversion into a [`UserProfile`].

use calculator::format::parse_argentine_number;
use serde::Deserialize;
use shared::{
    domain::{EmployerSize, SectorKey, UserProfile, DEFAULT_DAILY_HOURS},
    error::{ErrorCode, ValidationError},
};

pub const SALARY_REQUIRED_MESSAGE: &str = "Ingresá tu salario para personalizar la información";

/// Field values as the form submits them. Money fields may carry the display
/// mask (`1.200.000`); checkboxes arrive already resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormInput {
    #[serde(rename = "nombre")]
    pub name: String,
    pub sector: String,
    #[serde(rename = "antiguedad")]
    pub seniority: String,
    #[serde(rename = "salario")]
    pub salary: String,
    #[serde(rename = "variables")]
    pub variable_pay: String,
    #[serde(rename = "horas")]
    pub daily_hours: String,
    #[serde(rename = "tipo-empresa")]
    pub employer_size: String,
    #[serde(rename = "afiliado")]
    pub union_member: bool,
    #[serde(rename = "convenio")]
    pub company_agreement: bool,
}

impl FormInput {
    pub fn parse(&self) -> Result<UserProfile, ValidationError> {
        let salary = parse_argentine_number(&self.salary);
        if salary == 0 {
            let code = if self.salary.trim().is_empty() {
                ErrorCode::Missing
            } else {
                ErrorCode::NonPositive
            };
            return Err(ValidationError::new("salario", code, SALARY_REQUIRED_MESSAGE));
        }

        let seniority_years = parse_number(&self.seniority, "antiguedad")?.unwrap_or(0.0);
        if seniority_years < 0.0 {
            return Err(ValidationError::new(
                "antiguedad",
                ErrorCode::NonPositive,
                "La antigüedad no puede ser negativa",
            ));
        }

        let daily_hours = parse_number(&self.daily_hours, "horas")?.unwrap_or(DEFAULT_DAILY_HOURS);
        if daily_hours <= 0.0 {
            return Err(ValidationError::new(
                "horas",
                ErrorCode::NonPositive,
                "Las horas diarias deben ser mayores a cero",
            ));
        }

        let sector = SectorKey::parse_lenient(&self.sector);
        let employer_size = self
            .employer_size
            .parse::<EmployerSize>()
            .unwrap_or_default();

        Ok(UserProfile {
            name: self.name.trim().to_string(),
            sector,
            seniority_years,
            base_salary: salary as f64,
            variable_pay: parse_argentine_number(&self.variable_pay) as f64,
            daily_hours,
            employer_size,
            is_union_member: self.union_member,
            has_company_agreement: self.company_agreement,
            is_example_data: false,
        })
    }
}

fn parse_number(raw: &str, field: &str) -> Result<Option<f64>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.replace(',', ".").parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(ValidationError::new(
            field,
            ErrorCode::Malformed,
            format!("\"{trimmed}\" no es un número"),
        )),
    }
}
