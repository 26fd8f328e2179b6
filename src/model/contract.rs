//! Contract records and typed field access

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Contract category
///
/// Early data sets used free text for the type, so unknown labels are kept
/// in `Other` instead of failing to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContractType {
    ServiceAgreement,
    Nda,
    Employment,
    Other(String),
}

impl ContractType {
    pub fn all() -> Vec<ContractType> {
        vec![
            ContractType::Nda,
            ContractType::ServiceAgreement,
            ContractType::Employment,
            ContractType::Other("Other".to_string()),
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            ContractType::ServiceAgreement => "Service Agreement",
            ContractType::Nda => "NDA",
            ContractType::Employment => "Employment",
            ContractType::Other(label) => label,
        }
    }
}

impl From<String> for ContractType {
    fn from(label: String) -> Self {
        match label.trim().to_lowercase().as_str() {
            "service agreement" | "service" => ContractType::ServiceAgreement,
            "nda" => ContractType::Nda,
            "employment" | "employment contract" => ContractType::Employment,
            _ => ContractType::Other(label),
        }
    }
}

impl From<ContractType> for String {
    fn from(contract_type: ContractType) -> Self {
        contract_type.label().to_string()
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Lifecycle status of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    Active,
    Pending,
    Draft,
    Processing,
    Uploaded,
}

impl ContractStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ContractStatus::Active => "Active",
            ContractStatus::Pending => "Pending",
            ContractStatus::Draft => "Draft",
            ContractStatus::Processing => "Processing",
            ContractStatus::Uploaded => "Uploaded",
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A contract record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub contract_type: ContractType,
    pub date_uploaded: NaiveDate,
    pub status: ContractStatus,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub parties: Option<Vec<String>>,
    #[serde(default)]
    pub restrictions: Option<String>,
    #[serde(default)]
    pub terms: BTreeMap<String, String>,
}

/// Ids of the record fields; `terms` keys may not reuse them
pub const RECORD_FIELDS: [&str; 9] = [
    "id",
    "name",
    "type",
    "dateUploaded",
    "status",
    "currency",
    "value",
    "parties",
    "restrictions",
];

/// A field value looked up by column or filter id
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    List(Vec<String>),
}

/// Date format used in tables and exports, e.g. "Feb 20, 2024"
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

impl FieldValue {
    /// Stringified value used for comparisons and sorting
    pub fn sort_key(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => format_plain_number(*n),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            FieldValue::List(items) => items.join(","),
        }
    }

    /// Human readable value for table cells and detail panels
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => format_grouped_number(*n),
            FieldValue::Date(d) => d.format(DISPLAY_DATE_FORMAT).to_string(),
            FieldValue::List(items) => items.join(", "),
        }
    }
}

/// Shortest plain form of a number: 50000.0 -> "50000", 1.5 -> "1.5"
pub fn format_plain_number(n: f64) -> String {
    format!("{}", n)
}

/// Number with thousands separators: 125000.5 -> "125,000.5"
pub fn format_grouped_number(n: f64) -> String {
    let plain = format_plain_number(n.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (plain, None),
    };

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if n < 0.0 { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

impl Contract {
    /// Look up a field by id
    ///
    /// Ids that are not record fields are looked up in `terms`, so extra
    /// labelled terms can be shown, filtered and sorted like columns.
    pub fn field(&self, id: &str) -> Option<FieldValue> {
        match id {
            "id" => Some(FieldValue::Number(f64::from(self.id))),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "type" => Some(FieldValue::Text(self.contract_type.label().to_string())),
            "dateUploaded" => Some(FieldValue::Date(self.date_uploaded)),
            "status" => Some(FieldValue::Text(self.status.label().to_string())),
            "currency" => self.currency.clone().map(FieldValue::Text),
            "value" => self.value.map(FieldValue::Number),
            "parties" => self.parties.clone().map(FieldValue::List),
            "restrictions" => self.restrictions.clone().map(FieldValue::Text),
            other => self.terms.get(other).cloned().map(FieldValue::Text),
        }
    }

    /// Display text for a cell, "-" when the field is absent or empty
    pub fn cell_text(&self, id: &str) -> String {
        match self.field(id).map(|v| v.display()) {
            Some(text) if !text.is_empty() => text,
            _ => "-".to_string(),
        }
    }

    /// Glyph for the status badge
    pub fn status_icon(&self) -> &'static str {
        match self.status {
            ContractStatus::Active => "●",
            ContractStatus::Pending => "◐",
            ContractStatus::Draft => "○",
            ContractStatus::Processing => "⏳",
            ContractStatus::Uploaded => "↑",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> Contract {
        Contract {
            id: 7,
            name: "Lease - Harbor Office".to_string(),
            contract_type: ContractType::Other("Lease".to_string()),
            date_uploaded: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
            status: ContractStatus::Pending,
            currency: Some("USD".to_string()),
            value: Some(1250000.0),
            parties: Some(vec!["Harbor LLC".to_string(), "Acme Corp".to_string()]),
            restrictions: None,
            terms: BTreeMap::from([("Notice Period".to_string(), "60 days".to_string())]),
        }
    }

    #[test]
    fn test_field_lookup_covers_record_fields_and_terms() {
        let c = contract();
        assert_eq!(c.field("name"), Some(FieldValue::Text("Lease - Harbor Office".to_string())));
        assert_eq!(c.field("type"), Some(FieldValue::Text("Lease".to_string())));
        assert_eq!(c.field("value"), Some(FieldValue::Number(1250000.0)));
        assert_eq!(
            c.field("Notice Period"),
            Some(FieldValue::Text("60 days".to_string()))
        );
        assert_eq!(c.field("restrictions"), None);
        assert_eq!(c.field("unknown"), None);
    }

    #[test]
    fn test_display_formats() {
        let c = contract();
        assert_eq!(c.cell_text("dateUploaded"), "Feb 5, 2024");
        assert_eq!(c.cell_text("value"), "1,250,000");
        assert_eq!(c.cell_text("parties"), "Harbor LLC, Acme Corp");
        assert_eq!(c.cell_text("restrictions"), "-");
    }

    #[test]
    fn test_sort_keys_are_plain_strings() {
        let c = contract();
        assert_eq!(c.field("dateUploaded").unwrap().sort_key(), "2024-02-05");
        assert_eq!(c.field("value").unwrap().sort_key(), "1250000");
        assert_eq!(c.field("parties").unwrap().sort_key(), "Harbor LLC,Acme Corp");
    }

    #[test]
    fn test_grouped_number_keeps_fraction_and_sign() {
        assert_eq!(format_grouped_number(999.0), "999");
        assert_eq!(format_grouped_number(1000.0), "1,000");
        assert_eq!(format_grouped_number(-45000.25), "-45,000.25");
    }

    #[test]
    fn test_contract_type_from_free_text() {
        assert_eq!(ContractType::from("nda".to_string()), ContractType::Nda);
        assert_eq!(
            ContractType::from("Employment Contract".to_string()),
            ContractType::Employment
        );
        assert_eq!(
            ContractType::from("Lease".to_string()),
            ContractType::Other("Lease".to_string())
        );
    }

    #[test]
    fn test_deserialize_camel_case_record() {
        let json = r#"{
            "id": 2,
            "name": "NDA - Project Phoenix",
            "type": "NDA",
            "dateUploaded": "2024-02-19",
            "status": "Pending",
            "parties": ["Phoenix Labs"]
        }"#;
        let c: Contract = serde_json::from_str(json).unwrap();
        assert_eq!(c.contract_type, ContractType::Nda);
        assert_eq!(c.status, ContractStatus::Pending);
        assert_eq!(c.date_uploaded, NaiveDate::from_ymd_opt(2024, 2, 19).unwrap());
        assert!(c.terms.is_empty());
        assert!(c.value.is_none());
    }
}
