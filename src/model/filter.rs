//! Structured filters over contract records
//!
//! A `FilterGroup` holds conditions (or nested groups) folded left to right.
//! Each condition tests one field with one operator. Evaluation never fails:
//! an unknown field, a missing value or a value that cannot be coerced simply
//! does not match.

use super::contract::{Contract, FieldValue, DISPLAY_DATE_FORMAT};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

// ═══════════════════════════════════════════════════════════════════════════════
// Fields & Operators
// ═══════════════════════════════════════════════════════════════════════════════

/// Kind of a filterable field, decides which operators are offered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Select,
    Number,
    Date,
}

/// A field offered by the filter builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

pub const FILTER_FIELDS: [FilterField; 5] = [
    FilterField { id: "name", label: "Contract Name", kind: FieldKind::Text },
    FilterField { id: "type", label: "Contract Type", kind: FieldKind::Select },
    FilterField { id: "status", label: "Status", kind: FieldKind::Select },
    FilterField { id: "value", label: "Value", kind: FieldKind::Number },
    FilterField { id: "dateUploaded", label: "Upload Date", kind: FieldKind::Date },
];

/// Kind of a field id; ids outside `FILTER_FIELDS` (extra terms) are text
pub fn field_kind(id: &str) -> FieldKind {
    FILTER_FIELDS
        .iter()
        .find(|f| f.id == id)
        .map(|f| f.kind)
        .unwrap_or(FieldKind::Text)
}

/// Display label of a field id, falling back to the id itself
pub fn field_label(id: &str) -> &str {
    FILTER_FIELDS
        .iter()
        .find(|f| f.id == id)
        .map(|f| f.label)
        .unwrap_or(id)
}

/// Resolve user input (an id or a label, any case) to a field id
pub fn resolve_field(input: &str) -> String {
    let needle = input.trim();
    FILTER_FIELDS
        .iter()
        .find(|f| f.id.eq_ignore_ascii_case(needle) || f.label.eq_ignore_ascii_case(needle))
        .map(|f| f.id.to_string())
        .unwrap_or_else(|| needle.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    #[default]
    Equals,
    Contains,
    GreaterThan,
    LessThan,
    Between,
    In,
}

impl FilterOperator {
    pub fn all() -> Vec<FilterOperator> {
        vec![
            FilterOperator::Equals,
            FilterOperator::Contains,
            FilterOperator::GreaterThan,
            FilterOperator::LessThan,
            FilterOperator::Between,
            FilterOperator::In,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "Equals",
            FilterOperator::Contains => "Contains",
            FilterOperator::GreaterThan => "Greater than",
            FilterOperator::LessThan => "Less than",
            FilterOperator::Between => "Between",
            FilterOperator::In => "Is any of",
        }
    }

    pub fn applies_to(&self, kind: FieldKind) -> bool {
        match self {
            FilterOperator::Equals => true,
            FilterOperator::Contains => kind == FieldKind::Text,
            FilterOperator::GreaterThan | FilterOperator::LessThan | FilterOperator::Between => {
                matches!(kind, FieldKind::Number | FieldKind::Date)
            }
            FilterOperator::In => matches!(kind, FieldKind::Text | FieldKind::Select),
        }
    }

    /// Operators the builder offers for a field kind
    pub fn applicable(kind: FieldKind) -> Vec<FilterOperator> {
        Self::all()
            .into_iter()
            .filter(|op| op.applies_to(kind))
            .collect()
    }
}

/// How a condition or group combines with what came before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Logic {
    #[default]
    And,
    Or,
}

impl Logic {
    pub fn toggled(self) -> Logic {
        match self {
            Logic::And => Logic::Or,
            Logic::Or => Logic::And,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Condition Values
// ═══════════════════════════════════════════════════════════════════════════════

/// Right-hand side of a condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl Default for FilterValue {
    fn default() -> Self {
        FilterValue::Text(String::new())
    }
}

impl FilterValue {
    pub fn as_text(&self) -> String {
        match self {
            FilterValue::Number(n) => format!("{}", n),
            FilterValue::Text(s) => s.clone(),
            FilterValue::List(items) => items.join(","),
        }
    }

    /// Items for set membership; text is split on commas
    pub fn as_list(&self) -> Vec<String> {
        match self {
            FilterValue::Number(n) => vec![format!("{}", n)],
            FilterValue::Text(s) => s
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
            FilterValue::List(items) => items.clone(),
        }
    }

    /// Range bounds; text may be written `a..b` or `a,b`
    pub fn as_range(&self) -> Option<(String, String)> {
        let parts: Vec<String> = match self {
            FilterValue::List(items) => items.clone(),
            FilterValue::Text(s) if s.contains("..") => {
                s.split("..").map(|p| p.trim().to_string()).collect()
            }
            FilterValue::Text(s) => s.split(',').map(|p| p.trim().to_string()).collect(),
            FilterValue::Number(_) => return None,
        };
        match parts.as_slice() {
            [lo, hi] if !lo.is_empty() && !hi.is_empty() => Some((lo.clone(), hi.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::List(items) => write!(f, "{}", items.join(", ")),
            other => write!(f, "{}", other.as_text()),
        }
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().replace(',', "").parse::<f64>().ok()
}

/// Parse a date written as ISO (`2024-02-20`) or display form (`Feb 20, 2024`)
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, DISPLAY_DATE_FORMAT))
        .or_else(|_| NaiveDate::parse_from_str(s, "%b %d, %Y"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%B %d, %Y"))
        .ok()
}

/// Order a field value against a bound, coercing the bound to the field's type
fn compare_to(value: &FieldValue, bound: &str) -> Option<Ordering> {
    match value {
        FieldValue::Date(d) => parse_date(bound).map(|b| d.cmp(&b)),
        FieldValue::Number(n) => parse_number(bound).and_then(|b| n.partial_cmp(&b)),
        FieldValue::Text(s) => match (parse_number(s), parse_date(s)) {
            (Some(left), _) => parse_number(bound).and_then(|b| left.partial_cmp(&b)),
            (None, Some(left)) => parse_date(bound).map(|b| left.cmp(&b)),
            (None, None) => None,
        },
        FieldValue::List(_) => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Conditions & Groups
// ═══════════════════════════════════════════════════════════════════════════════

/// A single field/operator/value test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub field: String,
    pub operator: FilterOperator,
    pub value: FilterValue,
    /// Combination with the previous entry; falls back to the group logic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<Logic>,
}

impl FilterCondition {
    pub fn new(field: &str, operator: FilterOperator, value: FilterValue) -> Self {
        Self {
            field: field.to_string(),
            operator,
            value,
            logic: None,
        }
    }

    /// Shorthand for the simple select filters (type, status, upload date)
    pub fn equals(field: &str, value: &str) -> Self {
        Self::new(field, FilterOperator::Equals, FilterValue::Text(value.to_string()))
    }

    #[cfg(test)]
    pub fn with_logic(mut self, logic: Logic) -> Self {
        self.logic = Some(logic);
        self
    }

    /// Test the condition against a record
    pub fn matches(&self, contract: &Contract) -> bool {
        let Some(value) = contract.field(&self.field) else {
            return false;
        };

        match self.operator {
            FilterOperator::Equals => self.matches_equals(&value),
            FilterOperator::Contains => {
                let needle = self.value.as_text().to_lowercase();
                value.sort_key().to_lowercase().contains(&needle)
                    || value.display().to_lowercase().contains(&needle)
            }
            FilterOperator::GreaterThan => {
                compare_to(&value, &self.value.as_text()) == Some(Ordering::Greater)
            }
            FilterOperator::LessThan => {
                compare_to(&value, &self.value.as_text()) == Some(Ordering::Less)
            }
            FilterOperator::Between => {
                let Some((lo, hi)) = self.value.as_range() else {
                    return false;
                };
                let (Some(to_lo), Some(to_hi)) = (compare_to(&value, &lo), compare_to(&value, &hi))
                else {
                    return false;
                };
                // Inclusive, and tolerant of reversed bounds
                (to_lo != Ordering::Less && to_hi != Ordering::Greater)
                    || (to_hi != Ordering::Less && to_lo != Ordering::Greater)
            }
            FilterOperator::In => {
                let options: Vec<String> =
                    self.value.as_list().iter().map(|o| o.to_lowercase()).collect();
                match &value {
                    FieldValue::List(items) => items
                        .iter()
                        .any(|item| options.contains(&item.to_lowercase())),
                    other => {
                        options.contains(&other.sort_key().to_lowercase())
                            || options.contains(&other.display().to_lowercase())
                    }
                }
            }
        }
    }

    fn matches_equals(&self, value: &FieldValue) -> bool {
        let wanted = self.value.as_text();
        match value {
            FieldValue::Date(d) => match parse_date(&wanted) {
                Some(w) => *d == w,
                None => value.sort_key().eq_ignore_ascii_case(wanted.trim()),
            },
            FieldValue::Number(n) => match parse_number(&wanted) {
                Some(w) => *n == w,
                None => false,
            },
            FieldValue::List(items) => items
                .iter()
                .any(|item| item.to_lowercase() == wanted.trim().to_lowercase()),
            FieldValue::Text(s) => s.to_lowercase() == wanted.trim().to_lowercase(),
        }
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            field_label(&self.field),
            self.operator.label().to_lowercase(),
            self.value
        )
    }
}

/// An entry in a filter group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterNode {
    Condition(FilterCondition),
    Group(FilterGroup),
}

impl FilterNode {
    pub fn matches(&self, contract: &Contract) -> bool {
        match self {
            FilterNode::Condition(c) => c.matches(contract),
            FilterNode::Group(g) => g.matches(contract),
        }
    }

    fn own_logic(&self) -> Option<Logic> {
        match self {
            FilterNode::Condition(c) => c.logic,
            FilterNode::Group(_) => None,
        }
    }
}

/// Conditions combined by one logic operator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterGroup {
    pub logic: Logic,
    pub conditions: Vec<FilterNode>,
}

impl FilterGroup {
    pub fn new(logic: Logic) -> Self {
        Self {
            logic,
            conditions: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_condition(mut self, condition: FilterCondition) -> Self {
        self.conditions.push(FilterNode::Condition(condition));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Fold the entries left to right; an empty group matches everything
    pub fn matches(&self, contract: &Contract) -> bool {
        let mut nodes = self.conditions.iter();
        let Some(first) = nodes.next() else {
            return true;
        };

        let mut result = first.matches(contract);
        for node in nodes {
            result = match node.own_logic().unwrap_or(self.logic) {
                Logic::And => result && node.matches(contract),
                Logic::Or => result || node.matches(contract),
            };
        }
        result
    }
}

/// Case-insensitive substring match of the free-text query against the name
pub fn matches_query(contract: &Contract, query: &str) -> bool {
    query.is_empty() || contract.name.to_lowercase().contains(&query.to_lowercase())
}

/// Whether a record is displayed: the query and the group must both match
pub fn record_matches(contract: &Contract, query: &str, group: &FilterGroup) -> bool {
    matches_query(contract, query) && group.matches(contract)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Quick Syntax
// ═══════════════════════════════════════════════════════════════════════════════

/// `field op value` with a symbol operator; the field stops at the first symbol
static SYMBOL_CONDITION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<field>[^=~<>]+?)\s*(?P<op>[=~<>])\s*(?P<value>.+?)\s*$").unwrap()
});

/// `field between low..high` or `field in a, b`
static WORD_CONDITION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?P<field>.+?)\s+(?P<op>between|in)\s+(?P<value>.+?)\s*$").unwrap()
});

const SYNTAX_HINT: &str = "Expected: <field> <op> <value>  (ops: = ~ > < between in)";

impl FilterCondition {
    /// Parse the quick condition syntax used by the filter builder
    ///
    /// Symbol operators win over `between`/`in`, so a field name may contain
    /// those words. Comparison bounds must read as a number or date.
    pub fn parse(input: &str) -> Result<FilterCondition, String> {
        let caps = SYMBOL_CONDITION_REGEX
            .captures(input)
            .or_else(|| WORD_CONDITION_REGEX.captures(input))
            .ok_or_else(|| SYNTAX_HINT.to_string())?;

        let field = resolve_field(&caps["field"]);
        let raw_value = caps["value"].trim().to_string();
        if raw_value.starts_with(['=', '~', '<', '>']) {
            return Err(format!(
                "Unsupported operator '{}{}'. {}",
                &caps["op"],
                &raw_value[..1],
                SYNTAX_HINT
            ));
        }

        let operator = match caps["op"].to_lowercase().as_str() {
            "=" => FilterOperator::Equals,
            "~" => FilterOperator::Contains,
            ">" => FilterOperator::GreaterThan,
            "<" => FilterOperator::LessThan,
            "between" => FilterOperator::Between,
            _ => FilterOperator::In,
        };
        FilterCondition::from_parts(&field, operator, &raw_value)
    }

    /// Build a condition from a field id, an operator and the typed value
    pub fn from_parts(
        field: &str,
        operator: FilterOperator,
        raw_value: &str,
    ) -> Result<FilterCondition, String> {
        let raw_value = raw_value.trim().to_string();
        let value = match operator {
            FilterOperator::Between => {
                let (lo, hi) = FilterValue::Text(raw_value.clone())
                    .as_range()
                    .ok_or_else(|| format!("Range must look like 'low..high', got '{}'", raw_value))?;
                check_bound(field, &lo)?;
                check_bound(field, &hi)?;
                FilterValue::List(vec![lo, hi])
            }
            FilterOperator::In => FilterValue::List(FilterValue::Text(raw_value).as_list()),
            FilterOperator::GreaterThan | FilterOperator::LessThan => {
                check_bound(field, &raw_value)?;
                match parse_number(&raw_value) {
                    Some(n) if field_kind(field) != FieldKind::Date => FilterValue::Number(n),
                    _ => FilterValue::Text(raw_value),
                }
            }
            FilterOperator::Equals | FilterOperator::Contains => FilterValue::Text(raw_value),
        };

        Ok(FilterCondition::new(field, operator, value))
    }
}

/// A comparison bound must coerce to the field's kind; terms accept either
fn check_bound(field: &str, bound: &str) -> Result<(), String> {
    let (ok, expected) = match field_kind(field) {
        FieldKind::Number => (parse_number(bound).is_some(), "number"),
        FieldKind::Date => (parse_date(bound).is_some(), "date"),
        FieldKind::Text | FieldKind::Select => (
            parse_number(bound).is_some() || parse_date(bound).is_some(),
            "number or date",
        ),
    };
    if ok {
        Ok(())
    } else {
        Err(format!("'{}' is not a {} for {}", bound, expected, field_label(field)))
    }
}
