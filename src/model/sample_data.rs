//! Built-in sample contracts
//!
//! Used when no dataset file is given on the command line.

use super::contract::{Contract, ContractStatus, ContractType};
use chrono::NaiveDate;
use std::collections::BTreeMap;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn terms(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn parties(names: &[&str]) -> Option<Vec<String>> {
    Some(names.iter().map(|n| n.to_string()).collect())
}

/// The sample dataset, in insertion order
pub fn sample_contracts() -> Vec<Contract> {
    vec![
        Contract {
            id: 1,
            name: "Service Agreement - Tech Solutions Inc".to_string(),
            contract_type: ContractType::ServiceAgreement,
            date_uploaded: date(2024, 2, 20),
            status: ContractStatus::Active,
            currency: Some("USD".to_string()),
            value: Some(50000.0),
            parties: parties(&["Tech Solutions Inc", "Acme Corp"]),
            restrictions: Some("Non-compete for 12 months after termination".to_string()),
            terms: terms(&[
                ("Effective Date", "March 1, 2024"),
                (
                    "Governing Law",
                    "This agreement shall be governed by the laws of the State of California.",
                ),
                (
                    "Confidentiality",
                    "All information shared between parties shall be kept strictly confidential.",
                ),
                ("Expiration Date", "2025-02-28"),
            ]),
        },
        Contract {
            id: 2,
            name: "NDA - Project Phoenix".to_string(),
            contract_type: ContractType::Nda,
            date_uploaded: date(2024, 2, 19),
            status: ContractStatus::Pending,
            currency: None,
            value: None,
            parties: parties(&["Phoenix Labs", "Acme Corp"]),
            restrictions: Some("Disclosure limited to named project staff".to_string()),
            terms: terms(&[
                ("Effective Date", "February 19, 2024"),
                ("Term", "Three years from the effective date"),
            ]),
        },
        Contract {
            id: 3,
            name: "Employment Contract - Jane Smith".to_string(),
            contract_type: ContractType::Employment,
            date_uploaded: date(2024, 2, 18),
            status: ContractStatus::Draft,
            currency: Some("USD".to_string()),
            value: Some(95000.0),
            parties: parties(&["Jane Smith", "Acme Corp"]),
            restrictions: None,
            terms: terms(&[
                ("Start Date", "April 1, 2024"),
                ("Probation Period", "90 days"),
            ]),
        },
        Contract {
            id: 4,
            name: "Software License - CloudBase".to_string(),
            contract_type: ContractType::ServiceAgreement,
            date_uploaded: date(2024, 1, 30),
            status: ContractStatus::Active,
            currency: Some("EUR".to_string()),
            value: Some(120000.0),
            parties: parties(&["CloudBase GmbH", "Acme Corp"]),
            restrictions: Some("Use limited to 250 named seats".to_string()),
            terms: terms(&[
                ("Effective Date", "February 1, 2024"),
                ("Expiration Date", "2025-01-31"),
                ("Renewal", "Automatic annual renewal unless cancelled 60 days prior"),
            ]),
        },
        Contract {
            id: 5,
            name: "Consulting Agreement - Brightline Partners".to_string(),
            contract_type: ContractType::Other("Other".to_string()),
            date_uploaded: date(2024, 1, 12),
            status: ContractStatus::Processing,
            currency: Some("GBP".to_string()),
            value: Some(18500.0),
            parties: parties(&["Brightline Partners LLP", "Acme Corp"]),
            restrictions: None,
            terms: BTreeMap::new(),
        },
        Contract {
            id: 6,
            name: "NDA - Vendor Onboarding".to_string(),
            contract_type: ContractType::Nda,
            date_uploaded: date(2023, 12, 4),
            status: ContractStatus::Uploaded,
            currency: None,
            value: None,
            parties: parties(&["Northwind Traders", "Acme Corp"]),
            restrictions: None,
            terms: BTreeMap::new(),
        },
    ]
}
