use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::criteria::{CriteriaChange, PassengerType, SearchCriteria, TripType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Origin,
    Destination,
    ReturnDate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Origin => "origin",
            Field::Destination => "destination",
            Field::ReturnDate => "returnDate",
        };
        f.write_str(name)
    }
}

/// Validation messages keyed by the field they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

/// Check `criteria` against every submit rule.
pub fn validate(criteria: &SearchCriteria) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if criteria.origin.as_deref().unwrap_or_default().is_empty() {
        errors.insert(Field::Origin, "Origin airport is required.");
    }
    if criteria.destination.as_deref().unwrap_or_default().is_empty() {
        errors.insert(Field::Destination, "Destination airport is required.");
    }
    if criteria.trip_type == TripType::Return {
        match criteria.return_date {
            None => errors.insert(Field::ReturnDate, "Return date is required for a return trip."),
            Some(return_date) if criteria.depart_date > return_date => {
                errors.insert(Field::ReturnDate, "Return date must be after departure date.")
            }
            Some(_) => {}
        }
    }

    errors
}

/// Session-scoped search form: live criteria, last validation errors and the
/// snapshot frozen by the last successful submit.
#[derive(Debug, Clone)]
pub struct SearchForm {
    criteria: SearchCriteria,
    errors: FieldErrors,
    submitted: Option<SearchCriteria>,
}

impl SearchForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            criteria: SearchCriteria::new(today),
            errors: FieldErrors::default(),
            submitted: None,
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Criteria frozen by the last successful submit, if any.
    pub fn submitted(&self) -> Option<&SearchCriteria> {
        self.submitted.as_ref()
    }

    pub fn apply(&mut self, change: CriteriaChange) {
        debug!(?change, "Applying criteria change");
        self.criteria = self.criteria.clone().apply(change);
    }

    pub fn increment_passengers(&mut self, kind: PassengerType) {
        self.criteria.passengers.increment(kind);
    }

    pub fn decrement_passengers(&mut self, kind: PassengerType) -> bool {
        self.criteria.passengers.decrement(kind)
    }

    /// Mirrors the enabled state of the search button.
    pub fn can_submit(&self) -> bool {
        let c = &self.criteria;
        c.origin.is_some()
            && c.destination.is_some()
            && (c.trip_type != TripType::Return || c.return_date.is_some())
    }

    pub fn validate_and_submit(&mut self) -> Result<SearchCriteria, FieldErrors> {
        let errors = validate(&self.criteria);
        if !errors.is_empty() {
            debug!(errors = errors.len(), "Search rejected");
            self.errors = errors.clone();
            self.submitted = None;
            return Err(errors);
        }

        self.errors = FieldErrors::default();
        self.submitted = Some(self.criteria.clone());
        Ok(self.criteria.clone())
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }
}
