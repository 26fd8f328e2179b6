//! Contract dataset loading

use crate::model::contract::{Contract, RECORD_FIELDS};
use crate::model::domain::DatasetSource;
use crate::model::sample_data::sample_contracts;
use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a JSON array of contract records
pub fn parse_contracts(contents: &str) -> Result<Vec<Contract>> {
    let contracts: Vec<Contract> =
        serde_json::from_str(contents).context("Dataset is not a JSON array of contracts")?;

    let mut seen = HashSet::new();
    for contract in &contracts {
        if !seen.insert(contract.id) {
            bail!("Duplicate contract id {}", contract.id);
        }
        if let Some(key) = contract
            .terms
            .keys()
            .find(|key| RECORD_FIELDS.iter().any(|f| f.eq_ignore_ascii_case(key.trim())))
        {
            bail!(
                "Contract {} has a term named '{}', which clashes with a record field",
                contract.id,
                key
            );
        }
    }
    Ok(contracts)
}

/// Load contracts from a JSON file
pub fn load_contracts<P: AsRef<Path>>(path: P) -> Result<Vec<Contract>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    parse_contracts(&contents).with_context(|| format!("Failed to load {}", path.display()))
}

/// Load the given file, or the built-in sample data when no file is given
pub fn load_dataset(path: Option<&Path>) -> Result<(Vec<Contract>, DatasetSource)> {
    match path {
        Some(path) => {
            let contracts = load_contracts(path)?;
            tracing::info!(count = contracts.len(), path = %path.display(), "loaded dataset");
            Ok((contracts, DatasetSource::File(path.to_path_buf())))
        }
        None => {
            tracing::debug!("no dataset given, using sample contracts");
            Ok((sample_contracts(), DatasetSource::Sample))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contracts_array() {
        let json = r#"[
            {
                "id": 10,
                "name": "Lease - Harbor Office",
                "type": "Lease",
                "dateUploaded": "2024-03-01",
                "status": "Draft",
                "value": 1200,
                "currency": "USD",
                "terms": { "Notice Period": "60 days" }
            },
            {
                "id": 11,
                "name": "NDA - Orion",
                "type": "NDA",
                "dateUploaded": "2024-03-02",
                "status": "Active"
            }
        ]"#;
        let contracts = parse_contracts(json).unwrap();
        assert_eq!(contracts.len(), 2);
        assert_eq!(contracts[0].terms["Notice Period"], "60 days");
        assert_eq!(contracts[0].value, Some(1200.0));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let json = r#"[
            { "id": 1, "name": "A", "type": "NDA", "dateUploaded": "2024-01-01", "status": "Active" },
            { "id": 1, "name": "B", "type": "NDA", "dateUploaded": "2024-01-02", "status": "Draft" }
        ]"#;
        let err = parse_contracts(json).unwrap_err();
        assert!(err.to_string().contains("Duplicate contract id 1"));
    }

    #[test]
    fn test_terms_shadowing_record_fields_are_rejected() {
        let json = r#"[{
            "id": 1, "name": "A", "type": "NDA", "dateUploaded": "2024-01-01", "status": "Active",
            "terms": { "status": "Renewal pending", "Governing Law": "Delaware" }
        }]"#;
        let err = parse_contracts(json).unwrap_err();
        assert!(err.to_string().contains("term named 'status'"));

        let json = r#"[{
            "id": 2, "name": "B", "type": "NDA", "dateUploaded": "2024-01-01", "status": "Draft",
            "terms": { "Name": "Alias" }
        }]"#;
        assert!(parse_contracts(json).is_err());

        let sample = serde_json::to_string(&sample_contracts()).unwrap();
        assert_eq!(parse_contracts(&sample).unwrap().len(), 6);
    }

    #[test]
    fn test_malformed_dataset_reports_error() {
        assert!(parse_contracts("{\"id\": 1}").is_err());
        assert!(parse_contracts(r#"[{"id": 1, "name": "A"}]"#).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_contracts("/definitely/not/here.json").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read dataset"));
    }

    #[test]
    fn test_no_path_uses_sample_data() {
        let (contracts, source) = load_dataset(None).unwrap();
        assert_eq!(source, DatasetSource::Sample);
        assert_eq!(contracts.len(), 6);
    }
}
