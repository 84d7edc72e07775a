//! Company record model and the field table used to apply updates by name.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::FieldError;

/// Loosely typed value for descriptive fields.
///
/// The source data is not consistent about shapes (`year_founded` may be a
/// number or null, `full_time_employees` a number or a string), so these
/// fields keep whatever JSON shape they were given.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Convert an arbitrary JSON value, rejecting objects and non-string lists.
    fn from_json(field: CompanyField, value: Value) -> Result<Self, FieldError> {
        let mismatch = |found| FieldError::TypeMismatch {
            field: field.wire_name(),
            expected: "null, bool, number, string or list of strings",
            found,
        };

        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Integer(i)),
                None => n.as_f64().map(Self::Float).ok_or_else(|| mismatch("number")),
            },
            Value::String(s) => Ok(Self::Text(s)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(mismatch("mixed array")),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            Value::Object(_) => Err(mismatch("object")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One company record as stored in the JSON document.
///
/// Unknown properties are dropped on load; missing ones default to absent.
/// Numbers and booleans found in the text fields are read as their JSON text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    #[serde(deserialize_with = "scalar_text")]
    pub company_name_id: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub company_name: Option<String>,
    pub url: FieldValue,
    pub year_founded: FieldValue,
    pub city: FieldValue,
    pub state: FieldValue,
    pub country: FieldValue,
    pub zip_code: FieldValue,
    pub full_time_employees: FieldValue,
    pub company_type: FieldValue,
    pub company_category: FieldValue,
    pub revenue_source: FieldValue,
    pub business_model: FieldValue,
    pub social_impact: FieldValue,
    #[serde(deserialize_with = "scalar_text")]
    pub description: Option<String>,
    pub description_short: FieldValue,
    pub source_count: FieldValue,
    pub data_types: FieldValue,
    pub example_uses: FieldValue,
    pub financial_info: FieldValue,
    pub last_updated: FieldValue,
}

impl Company {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            company_name_id: Some(id.into()),
            company_name: Some(name.into()),
            description: Some(description.into()),
            ..Default::default()
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.company_name_id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Assign `value` to `field`.
    ///
    /// Text fields take a string or null. Descriptive fields take any
    /// [`FieldValue`] shape without checking it against the field's usual type.
    pub fn set(&mut self, field: CompanyField, value: Value) -> Result<(), FieldError> {
        use CompanyField::*;

        let slot = match field {
            CompanyNameId => return set_text(&mut self.company_name_id, field, value),
            CompanyName => return set_text(&mut self.company_name, field, value),
            Description => return set_text(&mut self.description, field, value),
            Url => &mut self.url,
            YearFounded => &mut self.year_founded,
            City => &mut self.city,
            State => &mut self.state,
            Country => &mut self.country,
            ZipCode => &mut self.zip_code,
            FullTimeEmployees => &mut self.full_time_employees,
            CompanyType => &mut self.company_type,
            CompanyCategory => &mut self.company_category,
            RevenueSource => &mut self.revenue_source,
            BusinessModel => &mut self.business_model,
            SocialImpact => &mut self.social_impact,
            DescriptionShort => &mut self.description_short,
            SourceCount => &mut self.source_count,
            DataTypes => &mut self.data_types,
            ExampleUses => &mut self.example_uses,
            FinancialInfo => &mut self.financial_info,
            LastUpdated => &mut self.last_updated,
        };

        *slot = FieldValue::from_json(field, value)?;
        Ok(())
    }
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Integer(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

fn set_text(slot: &mut Option<String>, field: CompanyField, value: Value) -> Result<(), FieldError> {
    *slot = match value {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => {
            return Err(FieldError::TypeMismatch {
                field: field.wire_name(),
                expected: "string or null",
                found: json_kind(&other),
            })
        }
    };
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Every updatable field of [`Company`], addressable by wire name or camelCase alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanyField {
    CompanyNameId,
    CompanyName,
    Url,
    YearFounded,
    City,
    State,
    Country,
    ZipCode,
    FullTimeEmployees,
    CompanyType,
    CompanyCategory,
    RevenueSource,
    BusinessModel,
    SocialImpact,
    Description,
    DescriptionShort,
    SourceCount,
    DataTypes,
    ExampleUses,
    FinancialInfo,
    LastUpdated,
}

impl CompanyField {
    pub const ALL: [CompanyField; 21] = [
        Self::CompanyNameId,
        Self::CompanyName,
        Self::Url,
        Self::YearFounded,
        Self::City,
        Self::State,
        Self::Country,
        Self::ZipCode,
        Self::FullTimeEmployees,
        Self::CompanyType,
        Self::CompanyCategory,
        Self::RevenueSource,
        Self::BusinessModel,
        Self::SocialImpact,
        Self::Description,
        Self::DescriptionShort,
        Self::SourceCount,
        Self::DataTypes,
        Self::ExampleUses,
        Self::FinancialInfo,
        Self::LastUpdated,
    ];

    /// Property name in the JSON document.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::CompanyNameId => "company_name_id",
            Self::CompanyName => "company_name",
            Self::Url => "url",
            Self::YearFounded => "year_founded",
            Self::City => "city",
            Self::State => "state",
            Self::Country => "country",
            Self::ZipCode => "zip_code",
            Self::FullTimeEmployees => "full_time_employees",
            Self::CompanyType => "company_type",
            Self::CompanyCategory => "company_category",
            Self::RevenueSource => "revenue_source",
            Self::BusinessModel => "business_model",
            Self::SocialImpact => "social_impact",
            Self::Description => "description",
            Self::DescriptionShort => "description_short",
            Self::SourceCount => "source_count",
            Self::DataTypes => "data_types",
            Self::ExampleUses => "example_uses",
            Self::FinancialInfo => "financial_info",
            Self::LastUpdated => "last_updated",
        }
    }

    /// camelCase name accepted in update requests alongside the wire name.
    pub const fn alias(self) -> &'static str {
        match self {
            Self::CompanyNameId => "companyNameId",
            Self::CompanyName => "companyName",
            Self::Url => "url",
            Self::YearFounded => "yearFounded",
            Self::City => "city",
            Self::State => "state",
            Self::Country => "country",
            Self::ZipCode => "zipCode",
            Self::FullTimeEmployees => "fullTimeEmployees",
            Self::CompanyType => "companyType",
            Self::CompanyCategory => "companyCategory",
            Self::RevenueSource => "revenueSource",
            Self::BusinessModel => "businessModel",
            Self::SocialImpact => "socialImpact",
            Self::Description => "description",
            Self::DescriptionShort => "descriptionShort",
            Self::SourceCount => "sourceCount",
            Self::DataTypes => "dataTypes",
            Self::ExampleUses => "exampleUses",
            Self::FinancialInfo => "financialInfo",
            Self::LastUpdated => "lastUpdated",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name() == name || field.alias() == name)
    }
}

impl fmt::Display for CompanyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_lookup_accepts_wire_name_and_alias() {
        assert_eq!(CompanyField::from_name("company_name"), Some(CompanyField::CompanyName));
        assert_eq!(CompanyField::from_name("companyName"), Some(CompanyField::CompanyName));
        assert_eq!(CompanyField::from_name("zipCode"), Some(CompanyField::ZipCode));
        assert_eq!(CompanyField::from_name("data_impacts"), None);
        assert_eq!(CompanyField::from_name("CompanyName"), None);
    }

    #[test]
    fn test_field_table_covers_every_wire_property() {
        let value = serde_json::to_value(Company::default()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), CompanyField::ALL.len());
        for field in CompanyField::ALL {
            assert!(object.contains_key(field.wire_name()), "missing {field}");
        }
    }

    #[test]
    fn test_deserialize_keeps_heterogeneous_shapes() {
        let company: Company = serde_json::from_value(json!({
            "company_name_id": "acme",
            "company_name": "Acme",
            "year_founded": 1999,
            "full_time_employees": "1,001-5,000",
            "source_count": 4.5,
            "data_types": ["Financial", "Geospatial"],
            "data_impacts": {"ignored": true}
        }))
        .unwrap();

        assert_eq!(company.id(), Some("acme"));
        assert_eq!(company.year_founded, FieldValue::Integer(1999));
        assert_eq!(company.full_time_employees, FieldValue::from("1,001-5,000"));
        assert_eq!(company.source_count, FieldValue::Float(4.5));
        assert_eq!(
            company.data_types,
            FieldValue::List(vec!["Financial".into(), "Geospatial".into()])
        );
        assert!(company.description.is_none());
        assert!(company.city.is_null());
    }

    #[test]
    fn test_deserialize_reads_scalar_text_fields_as_text() {
        let company: Company = serde_json::from_value(json!({
            "company_name_id": 42,
            "company_name": true,
            "description": null
        }))
        .unwrap();

        assert_eq!(company.id(), Some("42"));
        assert_eq!(company.name(), Some("true"));
        assert!(company.description().is_none());

        let nested = serde_json::from_value::<Company>(json!({"company_name": {"x": 1}}));
        assert!(nested.is_err());
    }

    #[test]
    fn test_set_descriptive_field_accepts_any_shape() {
        let mut company = Company::new("1", "Company A", "A tech company.");

        company.set(CompanyField::YearFounded, json!("two thousand")).unwrap();
        assert_eq!(company.year_founded.as_str(), Some("two thousand"));

        company.set(CompanyField::City, json!(42)).unwrap();
        assert_eq!(company.city, FieldValue::Integer(42));

        company.set(CompanyField::City, Value::Null).unwrap();
        assert!(company.city.is_null());
    }

    #[test]
    fn test_set_rejects_unsupported_shapes() {
        let mut company = Company::new("1", "Company A", "A tech company.");

        let err = company.set(CompanyField::CompanyName, json!(7)).unwrap_err();
        assert_eq!(
            err,
            FieldError::TypeMismatch {
                field: "company_name",
                expected: "string or null",
                found: "number",
            }
        );
        assert_eq!(company.name(), Some("Company A"));

        assert!(company.set(CompanyField::Url, json!({"href": "x"})).is_err());
        assert!(company.set(CompanyField::DataTypes, json!(["a", 1])).is_err());
    }

    #[test]
    fn test_set_text_field_to_null_clears_it() {
        let mut company = Company::new("1", "Company A", "A tech company.");
        company.set(CompanyField::Description, Value::Null).unwrap();
        assert!(company.description().is_none());
    }
}
