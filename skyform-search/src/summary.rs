use std::fmt;

use serde::Serialize;
use skyform_core::format::{airport_name, format_date};
use skyform_core::Airport;

use crate::criteria::{SearchCriteria, TripType};

/// Display-ready rendering of a submitted search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSummary {
    pub trip_type: String,
    pub route: String,
    pub depart: String,
    pub return_date: Option<String>,
    pub passengers: String,
}

impl SearchSummary {
    pub fn from_criteria(criteria: &SearchCriteria, airports: &[Airport]) -> Self {
        let origin = criteria.origin.as_deref().unwrap_or_default();
        let destination = criteria.destination.as_deref().unwrap_or_default();

        let return_date = match criteria.trip_type {
            TripType::Return => criteria.return_date.map(|d| format_date(Some(d))),
            TripType::OneWay => None,
        };

        Self {
            trip_type: criteria.trip_type.label().to_string(),
            route: format!(
                "{} → {}",
                airport_name(origin, airports),
                airport_name(destination, airports)
            ),
            depart: format_date(Some(criteria.depart_date)),
            return_date,
            passengers: criteria.passengers.describe(),
        }
    }
}

impl fmt::Display for SearchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.trip_type, self.route, self.depart)?;
        if let Some(return_date) = &self.return_date {
            write!(f, " | Return: {}", return_date)?;
        }
        write!(f, " | {}", self.passengers)
    }
}
