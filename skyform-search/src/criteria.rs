use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use skyform_core::format::{format_passenger_count, total_travellers};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TripType {
    #[default]
    OneWay,
    Return,
}

impl TripType {
    pub fn label(&self) -> &'static str {
        match self {
            TripType::OneWay => "One way",
            TripType::Return => "Return",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassengerType {
    Adult,
    Child,
    Infant,
}

impl PassengerType {
    /// Lowest count a decrement may reach.
    pub fn floor(&self) -> u32 {
        match self {
            PassengerType::Adult => 1,
            PassengerType::Child | PassengerType::Infant => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Passengers {
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

impl Default for Passengers {
    fn default() -> Self {
        Self { adults: 1, children: 0, infants: 0 }
    }
}

impl Passengers {
    pub fn count(&self, kind: PassengerType) -> u32 {
        match kind {
            PassengerType::Adult => self.adults,
            PassengerType::Child => self.children,
            PassengerType::Infant => self.infants,
        }
    }

    fn count_mut(&mut self, kind: PassengerType) -> &mut u32 {
        match kind {
            PassengerType::Adult => &mut self.adults,
            PassengerType::Child => &mut self.children,
            PassengerType::Infant => &mut self.infants,
        }
    }

    pub fn increment(&mut self, kind: PassengerType) {
        let count = self.count_mut(kind);
        *count = count.saturating_add(1);
    }

    /// Remove one passenger of `kind`. At the floor this is a no-op and
    /// returns `false`.
    pub fn decrement(&mut self, kind: PassengerType) -> bool {
        if !self.can_decrement(kind) {
            return false;
        }
        *self.count_mut(kind) -= 1;
        true
    }

    pub fn can_decrement(&self, kind: PassengerType) -> bool {
        self.count(kind) > kind.floor()
    }

    /// Raise every count to at least its floor.
    pub fn clamped(self) -> Self {
        Self {
            adults: self.adults.max(PassengerType::Adult.floor()),
            children: self.children.max(PassengerType::Child.floor()),
            infants: self.infants.max(PassengerType::Infant.floor()),
        }
    }

    pub fn describe(&self) -> String {
        format_passenger_count(self.adults, self.children, self.infants)
    }

    pub fn travellers(&self) -> String {
        total_travellers(self.adults, self.children, self.infants)
    }
}

/// In-progress flight search selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub trip_type: TripType,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub depart_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub passengers: Passengers,
}

/// A single user edit to the criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaChange {
    Origin(Option<String>),
    Destination(Option<String>),
    TripType(TripType),
    DepartDate(NaiveDate),
    ReturnDate(Option<NaiveDate>),
    Passengers(Passengers),
}

impl SearchCriteria {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            trip_type: TripType::OneWay,
            origin: None,
            destination: None,
            depart_date: today,
            return_date: None,
            passengers: Passengers::default(),
        }
    }

    /// Apply one change and every dependent field update it implies.
    ///
    /// Destination depends on origin, and the return date must stay on or
    /// after the depart date of a return trip.
    pub fn apply(mut self, change: CriteriaChange) -> Self {
        match change {
            CriteriaChange::Origin(code) => {
                self.origin = non_empty(code);
                self.destination = None;
            }
            CriteriaChange::Destination(code) => {
                self.destination = non_empty(code);
            }
            CriteriaChange::TripType(trip_type) => {
                self.trip_type = trip_type;
                if trip_type != TripType::Return {
                    self.return_date = None;
                }
            }
            CriteriaChange::DepartDate(date) => {
                self.depart_date = date;
                if self.return_date.is_some_and(|r| date > r) {
                    self.return_date = None;
                }
            }
            CriteriaChange::ReturnDate(date) => {
                self.return_date = date;
            }
            CriteriaChange::Passengers(passengers) => {
                self.passengers = passengers.clamped();
            }
        }
        self
    }
}

fn non_empty(code: Option<String>) -> Option<String> {
    code.filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, d).unwrap()
    }

    #[test]
    fn test_defaults() {
        let criteria = SearchCriteria::new(day(1));
        assert_eq!(criteria.trip_type, TripType::OneWay);
        assert_eq!(criteria.origin, None);
        assert_eq!(criteria.destination, None);
        assert_eq!(criteria.depart_date, day(1));
        assert_eq!(criteria.return_date, None);
        assert_eq!(criteria.passengers, Passengers { adults: 1, children: 0, infants: 0 });
    }

    #[test]
    fn test_origin_change_clears_destination_only() {
        let criteria = SearchCriteria::new(day(1))
            .apply(CriteriaChange::TripType(TripType::Return))
            .apply(CriteriaChange::Origin(Some("JFK".into())))
            .apply(CriteriaChange::Destination(Some("LAX".into())))
            .apply(CriteriaChange::ReturnDate(Some(day(9))))
            .apply(CriteriaChange::Passengers(Passengers { adults: 2, children: 1, infants: 0 }))
            .apply(CriteriaChange::Origin(Some("LAX".into())));

        assert_eq!(criteria.origin.as_deref(), Some("LAX"));
        assert_eq!(criteria.destination, None);
        assert_eq!(criteria.return_date, Some(day(9)));
        assert_eq!(criteria.passengers.adults, 2);
    }

    #[test]
    fn test_empty_codes_are_unset() {
        let criteria = SearchCriteria::new(day(1)).apply(CriteriaChange::Origin(Some(String::new())));
        assert_eq!(criteria.origin, None);
    }

    #[test]
    fn test_leaving_return_trip_clears_return_date() {
        let criteria = SearchCriteria::new(day(1))
            .apply(CriteriaChange::TripType(TripType::Return))
            .apply(CriteriaChange::ReturnDate(Some(day(5))));
        assert_eq!(criteria.return_date, Some(day(5)));

        let criteria = criteria.apply(CriteriaChange::TripType(TripType::OneWay));
        assert_eq!(criteria.return_date, None);
    }

    #[test]
    fn test_depart_after_return_clears_return() {
        let criteria = SearchCriteria::new(day(1))
            .apply(CriteriaChange::TripType(TripType::Return))
            .apply(CriteriaChange::ReturnDate(Some(day(5))));

        let same_day = criteria.clone().apply(CriteriaChange::DepartDate(day(5)));
        assert_eq!(same_day.return_date, Some(day(5)));

        let later = criteria.apply(CriteriaChange::DepartDate(day(6)));
        assert_eq!(later.depart_date, day(6));
        assert_eq!(later.return_date, None);
    }

    #[test]
    fn test_passenger_floors() {
        let mut passengers = Passengers::default();

        assert!(!passengers.decrement(PassengerType::Adult));
        assert!(!passengers.decrement(PassengerType::Child));
        assert!(!passengers.decrement(PassengerType::Infant));
        assert_eq!(passengers, Passengers { adults: 1, children: 0, infants: 0 });

        passengers.increment(PassengerType::Adult);
        passengers.increment(PassengerType::Child);
        assert!(passengers.can_decrement(PassengerType::Adult));
        assert!(passengers.decrement(PassengerType::Child));
        assert_eq!(passengers, Passengers { adults: 2, children: 0, infants: 0 });
    }

    #[test]
    fn test_passengers_below_floor_are_clamped() {
        let criteria = SearchCriteria::new(day(1))
            .apply(CriteriaChange::Passengers(Passengers { adults: 0, children: 2, infants: 0 }));
        assert_eq!(criteria.passengers, Passengers { adults: 1, children: 2, infants: 0 });
    }

    #[test]
    fn test_passenger_description() {
        let passengers = Passengers { adults: 2, children: 1, infants: 1 };
        assert_eq!(passengers.describe(), "2 Adults, 1 Child, 1 Infant");
        assert_eq!(passengers.travellers(), "4 Travellers");
    }

    #[test]
    fn test_criteria_serialization() {
        let criteria = SearchCriteria::new(day(25)).apply(CriteriaChange::Origin(Some("JFK".into())));
        let value = serde_json::to_value(&criteria).unwrap();
        assert_eq!(value["tripType"], "oneWay");
        assert_eq!(value["origin"], "JFK");
        assert_eq!(value["departDate"], "2024-12-25");
    }
}
