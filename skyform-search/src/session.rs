use std::sync::Arc;

use chrono::NaiveDate;
use skyform_core::Airport;
use skyform_store::{AirportDirectory, Clock, DirectoryError};
use tracing::{debug, info};

use crate::criteria::{CriteriaChange, PassengerType, Passengers, TripType};
use crate::form::{FieldErrors, SearchForm};
use crate::summary::SearchSummary;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Unknown airport: {0}")]
    UnknownAirport(String),

    #[error("Select an origin airport first")]
    OriginNotSelected,

    #[error("{destination} is not reachable from {origin}")]
    DestinationUnavailable { origin: String, destination: String },

    #[error(transparent)]
    Validation(#[from] FieldErrors),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Composition root for one search form: owns the form state and shares the
/// airport directory handed in by the caller.
pub struct SearchSession {
    directory: Arc<AirportDirectory>,
    clock: Arc<dyn Clock>,
    form: SearchForm,
    summary: Option<SearchSummary>,
}

impl SearchSession {
    pub fn new(directory: Arc<AirportDirectory>, clock: Arc<dyn Clock>) -> Self {
        let form = SearchForm::new(clock.today());
        Self { directory, clock, form, summary: None }
    }

    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    pub fn directory(&self) -> &Arc<AirportDirectory> {
        &self.directory
    }

    pub async fn load_airports(&self, force_refresh: bool) -> SessionResult<Arc<Vec<Airport>>> {
        Ok(self.directory.ensure_loaded(force_refresh).await?)
    }

    /// Every airport that may be picked as origin.
    pub async fn origins(&self) -> Arc<Vec<Airport>> {
        self.directory.airports().await
    }

    /// Destinations allowed for the current origin, `None` until one is picked.
    pub async fn destinations(&self) -> Option<Arc<Vec<Airport>>> {
        let origin = self.form.criteria().origin.as_deref()?;
        Some(self.directory.destinations_for(origin).await)
    }

    pub async fn select_origin(&mut self, code: &str) -> SessionResult<()> {
        if self.directory.find(code).await.is_none() {
            return Err(SessionError::UnknownAirport(code.to_string()));
        }
        self.form.apply(CriteriaChange::Origin(Some(code.to_string())));
        Ok(())
    }

    pub fn clear_origin(&mut self) {
        self.form.apply(CriteriaChange::Origin(None));
    }

    pub async fn select_destination(&mut self, code: &str) -> SessionResult<()> {
        let origin = self
            .form
            .criteria()
            .origin
            .clone()
            .ok_or(SessionError::OriginNotSelected)?;

        let allowed = self.directory.destinations_for(&origin).await;
        if !allowed.iter().any(|a| a.code == code) {
            debug!(%origin, destination = code, "Rejected unconnected destination");
            return Err(SessionError::DestinationUnavailable {
                origin,
                destination: code.to_string(),
            });
        }

        self.form.apply(CriteriaChange::Destination(Some(code.to_string())));
        Ok(())
    }

    pub fn clear_destination(&mut self) {
        self.form.apply(CriteriaChange::Destination(None));
    }

    pub fn set_trip_type(&mut self, trip_type: TripType) {
        self.form.apply(CriteriaChange::TripType(trip_type));
    }

    pub fn set_depart_date(&mut self, date: NaiveDate) {
        self.form.apply(CriteriaChange::DepartDate(date));
    }

    pub fn set_return_date(&mut self, date: Option<NaiveDate>) {
        self.form.apply(CriteriaChange::ReturnDate(date));
    }

    pub fn set_passengers(&mut self, passengers: Passengers) {
        self.form.apply(CriteriaChange::Passengers(passengers));
    }

    pub fn increment_passengers(&mut self, kind: PassengerType) {
        self.form.increment_passengers(kind);
    }

    pub fn decrement_passengers(&mut self, kind: PassengerType) -> bool {
        self.form.decrement_passengers(kind)
    }

    /// Validate the form and, on success, render the frozen criteria.
    ///
    /// The summary is rendered once here; later directory refreshes do not
    /// change it.
    pub async fn submit(&mut self) -> SessionResult<SearchSummary> {
        let criteria = match self.form.validate_and_submit() {
            Ok(criteria) => criteria,
            Err(errors) => {
                self.summary = None;
                return Err(errors.into());
            }
        };
        let airports = self.directory.airports().await;
        let summary = SearchSummary::from_criteria(&criteria, &airports);
        info!("Search submitted: {}", summary);
        self.summary = Some(summary.clone());
        Ok(summary)
    }

    /// Summary of the last successful submit, until the next reset.
    pub fn summary(&self) -> Option<&SearchSummary> {
        self.summary.as_ref()
    }

    pub fn reset(&mut self) {
        self.form.reset(self.clock.today());
        self.summary = None;
    }
}
