pub mod criteria;
pub mod form;
pub mod session;
pub mod summary;

pub use criteria::{CriteriaChange, PassengerType, Passengers, SearchCriteria, TripType};
pub use form::{Field, FieldErrors, SearchForm};
pub use session::{SearchSession, SessionError};
pub use summary::SearchSummary;
