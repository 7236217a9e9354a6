use std::fmt;
use std::str::FromStr;

use crate::domain::entities::customer::Customer;
use crate::domain::entities::deal::Deal;
use crate::domain::entities::lead::Lead;
use crate::domain::entities::record::ValidationError;
use crate::domain::entities::report::Report;
use crate::domain::entities::sale::Sale;
use crate::domain::entities::task::Task;
use crate::domain::entities::vehicle::Vehicle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Name,
    Email,
    Phone,
    Source,
    Status,
    Assignee,
    Make,
    Model,
    Year,
    Vin,
    Customer,
    Vehicle,
    Salesperson,
    Title,
    RelatedTo,
}

impl SearchField {
    pub fn label(self) -> &'static str {
        match self {
            SearchField::Name => "Name",
            SearchField::Email => "Email",
            SearchField::Phone => "Phone",
            SearchField::Source => "Source",
            SearchField::Status => "Status",
            SearchField::Assignee => "Assigned To",
            SearchField::Make => "Make",
            SearchField::Model => "Model",
            SearchField::Year => "Year",
            SearchField::Vin => "VIN",
            SearchField::Customer => "Customer",
            SearchField::Vehicle => "Vehicle",
            SearchField::Salesperson => "Salesperson",
            SearchField::Title => "Title",
            SearchField::RelatedTo => "Related To",
        }
    }
}

/// Which fields a query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchCriteria {
    #[default]
    All,
    Field(SearchField),
}

impl fmt::Display for SearchCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchCriteria::All => f.write_str("All Fields"),
            SearchCriteria::Field(field) => f.write_str(field.label()),
        }
    }
}

impl FromStr for SearchCriteria {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") || value.eq_ignore_ascii_case("All Fields") {
            return Ok(SearchCriteria::All);
        }
        ALL_FIELDS
            .into_iter()
            .find(|field| field.label().eq_ignore_ascii_case(value))
            .map(SearchCriteria::Field)
            .ok_or_else(|| ValidationError::new("criteria", format!("unknown search field '{value}'")))
    }
}

const ALL_FIELDS: [SearchField; 15] = [
    SearchField::Name,
    SearchField::Email,
    SearchField::Phone,
    SearchField::Source,
    SearchField::Status,
    SearchField::Assignee,
    SearchField::Make,
    SearchField::Model,
    SearchField::Year,
    SearchField::Vin,
    SearchField::Customer,
    SearchField::Vehicle,
    SearchField::Salesperson,
    SearchField::Title,
    SearchField::RelatedTo,
];

/// Records that expose named fields to search.
pub trait Searchable {
    /// Fields searched by [`SearchCriteria::All`], in display order.
    const FIELDS: &'static [SearchField];

    fn field_value(&self, field: SearchField) -> Option<String>;
}

pub fn matches<T: Searchable>(record: &T, criteria: SearchCriteria, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    match criteria {
        SearchCriteria::All => T::FIELDS
            .iter()
            .any(|field| field_matches(record, *field, query)),
        SearchCriteria::Field(field) => field_matches(record, field, query),
    }
}

pub fn search<T: Searchable>(records: Vec<T>, criteria: SearchCriteria, query: &str) -> Vec<T> {
    if query.trim().is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| matches(record, criteria, query))
        .collect()
}

fn field_matches<T: Searchable>(record: &T, field: SearchField, query: &str) -> bool {
    let Some(value) = record.field_value(field) else {
        return false;
    };
    if field == SearchField::Phone {
        let wanted = digits(query);
        return !wanted.is_empty() && digits(&value).contains(&wanted);
    }
    value.to_lowercase().contains(&query.to_lowercase())
}

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

impl Searchable for Vehicle {
    const FIELDS: &'static [SearchField] = &[
        SearchField::Make,
        SearchField::Model,
        SearchField::Year,
        SearchField::Vin,
        SearchField::Status,
    ];

    fn field_value(&self, field: SearchField) -> Option<String> {
        match field {
            SearchField::Make => Some(self.make.clone()),
            SearchField::Model => Some(self.model.clone()),
            SearchField::Year => Some(self.year.to_string()),
            SearchField::Vin => Some(self.vin.clone()),
            SearchField::Status => Some(self.status.to_string()),
            _ => None,
        }
    }
}

impl Searchable for Customer {
    const FIELDS: &'static [SearchField] = &[SearchField::Name, SearchField::Email, SearchField::Phone];

    fn field_value(&self, field: SearchField) -> Option<String> {
        match field {
            SearchField::Name => Some(self.full_name()),
            SearchField::Email => Some(self.email.clone()),
            SearchField::Phone => Some(self.phone.clone()),
            _ => None,
        }
    }
}

impl Searchable for Lead {
    const FIELDS: &'static [SearchField] = &[
        SearchField::Name,
        SearchField::Email,
        SearchField::Phone,
        SearchField::Source,
        SearchField::Status,
        SearchField::Assignee,
    ];

    fn field_value(&self, field: SearchField) -> Option<String> {
        match field {
            SearchField::Name => Some(self.full_name()),
            SearchField::Email => Some(self.email.clone()),
            SearchField::Phone => Some(self.phone.clone()),
            SearchField::Source => Some(self.source.clone()),
            SearchField::Status => Some(self.status.to_string()),
            SearchField::Assignee => Some(self.assigned_to.clone()),
            _ => None,
        }
    }
}

impl Searchable for Deal {
    const FIELDS: &'static [SearchField] = &[SearchField::Customer, SearchField::Vehicle, SearchField::Status];

    fn field_value(&self, field: SearchField) -> Option<String> {
        match field {
            SearchField::Customer => Some(self.customer.clone()),
            SearchField::Vehicle => Some(self.vehicle.clone()),
            SearchField::Status => Some(self.status.to_string()),
            _ => None,
        }
    }
}

impl Searchable for Sale {
    const FIELDS: &'static [SearchField] = &[
        SearchField::Customer,
        SearchField::Vehicle,
        SearchField::Salesperson,
    ];

    fn field_value(&self, field: SearchField) -> Option<String> {
        match field {
            SearchField::Customer => Some(self.customer.clone()),
            SearchField::Vehicle => Some(self.vehicle.clone()),
            SearchField::Salesperson => Some(self.salesperson.clone()),
            _ => None,
        }
    }
}

impl Searchable for Task {
    const FIELDS: &'static [SearchField] = &[
        SearchField::Title,
        SearchField::Assignee,
        SearchField::Status,
        SearchField::RelatedTo,
    ];

    fn field_value(&self, field: SearchField) -> Option<String> {
        match field {
            SearchField::Title => Some(self.title.clone()),
            SearchField::Assignee => Some(self.assigned_to.clone()),
            SearchField::Status => Some(self.status.to_string()),
            SearchField::RelatedTo => Some(self.related_to.clone()),
            _ => None,
        }
    }
}

impl Searchable for Report {
    const FIELDS: &'static [SearchField] = &[SearchField::Name];

    fn field_value(&self, field: SearchField) -> Option<String> {
        match field {
            SearchField::Name => Some(self.name.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(first: &str, email: &str, phone: &str) -> Lead {
        let mut lead = Lead::new(first, "Smith", email);
        lead.phone = phone.to_string();
        lead
    }

    #[test]
    fn field_search_is_case_insensitive_substring() {
        let record = lead("John", "john@example.com", "");
        assert!(matches(&record, SearchCriteria::Field(SearchField::Name), "JOHN s"));
        assert!(!matches(&record, SearchCriteria::Field(SearchField::Email), "jane"));
    }

    #[test]
    fn phone_search_ignores_formatting_on_both_sides() {
        let record = lead("John", "", "(555) 123-4567");
        let criteria = SearchCriteria::Field(SearchField::Phone);
        assert!(matches(&record, criteria, "555.123"));
        assert!(matches(&record, criteria, "1234567"));
        assert!(!matches(&record, criteria, "999"));
    }

    #[test]
    fn all_fields_ors_every_predicate_without_phone_false_positives() {
        let records = vec![
            lead("John", "john@example.com", "555-0100"),
            lead("Jane", "jane@example.com", "555-0199"),
        ];
        let by_name = search(records.clone(), SearchCriteria::All, "jane");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].first_name, "Jane");

        let by_phone = search(records.clone(), SearchCriteria::All, "0199");
        assert_eq!(by_phone.len(), 1);

        assert!(search(records, SearchCriteria::All, "nobody").is_empty());
    }

    #[test]
    fn empty_query_matches_everything() {
        let records = vec![lead("John", "", ""), lead("Jane", "", "")];
        assert_eq!(search(records, SearchCriteria::Field(SearchField::Email), "  ").len(), 2);
    }

    #[test]
    fn unsupported_field_never_matches() {
        let vehicle = Vehicle::new(2022, "Honda", "Civic", 21000.0);
        assert!(!matches(&vehicle, SearchCriteria::Field(SearchField::Email), "honda"));
        assert!(matches(&vehicle, SearchCriteria::All, "civ"));
    }

    #[test]
    fn criteria_parse_from_labels() {
        assert_eq!("all".parse::<SearchCriteria>(), Ok(SearchCriteria::All));
        assert_eq!(
            "vin".parse::<SearchCriteria>(),
            Ok(SearchCriteria::Field(SearchField::Vin))
        );
    }
}
