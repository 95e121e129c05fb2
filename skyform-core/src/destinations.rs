use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::airport::Airport;

/// Airports reachable directly from `origin`, in the order they appear in
/// `airports`. An unknown origin yields an empty list.
pub fn filter_destinations(origin: &str, airports: &[Airport]) -> Vec<Airport> {
    let Some(origin_airport) = airports.iter().find(|a| a.code == origin) else {
        return Vec::new();
    };

    let allowed: HashSet<&str> = origin_airport
        .connections
        .iter()
        .map(|c| c.code.as_str())
        .collect();

    airports
        .iter()
        .filter(|a| allowed.contains(a.code.as_str()))
        .cloned()
        .collect()
}

/// Memoizes [`filter_destinations`] for a single directory snapshot.
///
/// Results are keyed by origin code. Presenting a snapshot that differs by
/// value from the remembered one drops every cached entry first, so results
/// never leak across snapshots.
#[derive(Debug, Default)]
pub struct DestinationFilter {
    snapshot: Option<Arc<Vec<Airport>>>,
    cache: HashMap<String, Arc<Vec<Airport>>>,
    scans: u64,
}

impl DestinationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&mut self, origin: &str, airports: &Arc<Vec<Airport>>) -> Arc<Vec<Airport>> {
        let same_snapshot = self
            .snapshot
            .as_ref()
            .is_some_and(|s| Arc::ptr_eq(s, airports) || **s == **airports);

        if !same_snapshot {
            self.invalidate();
            self.snapshot = Some(Arc::clone(airports));
        }

        if let Some(hit) = self.cache.get(origin) {
            return Arc::clone(hit);
        }

        self.scans += 1;
        let result = Arc::new(filter_destinations(origin, airports));
        debug!(origin, destinations = result.len(), "Computed destinations");
        self.cache.insert(origin.to_string(), Arc::clone(&result));
        result
    }

    /// Forget the remembered snapshot and every cached result.
    pub fn invalidate(&mut self) {
        self.snapshot = None;
        self.cache.clear();
    }

    /// Number of full scans performed (cache misses).
    pub fn scan_count(&self) -> u64 {
        self.scans
    }

    pub fn cached_origins(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::AirportConnection;

    fn airport(code: &str, connections: &[&str]) -> Airport {
        Airport {
            code: code.to_string(),
            name: format!("{} Airport", code),
            currency: "USD".to_string(),
            country_code: "US".to_string(),
            restricted_on_departure: false,
            restricted_on_destination: false,
            connections: connections
                .iter()
                .map(|c| AirportConnection {
                    code: c.to_string(),
                    name: format!("{} Airport", c),
                    currency: "USD".to_string(),
                    country_code: "US".to_string(),
                    restricted_on_departure: false,
                    restricted_on_destination: false,
                })
                .collect(),
        }
    }

    fn codes(airports: &[Airport]) -> Vec<&str> {
        airports.iter().map(|a| a.code.as_str()).collect()
    }

    #[test]
    fn test_filter_preserves_directory_order() {
        let airports = vec![
            airport("JFK", &["SFO", "LAX"]),
            airport("LAX", &["JFK"]),
            airport("ORD", &[]),
            airport("SFO", &[]),
        ];

        // Connection order is SFO, LAX but the directory order wins.
        assert_eq!(codes(&filter_destinations("JFK", &airports)), vec!["LAX", "SFO"]);
        assert_eq!(codes(&filter_destinations("LAX", &airports)), vec!["JFK"]);
        assert!(filter_destinations("ORD", &airports).is_empty());
    }

    #[test]
    fn test_unknown_origin_is_empty() {
        let airports = vec![airport("JFK", &["LAX"]), airport("LAX", &[])];
        assert!(filter_destinations("XXX", &airports).is_empty());
        assert!(filter_destinations("jfk", &airports).is_empty());
        assert!(filter_destinations("", &airports).is_empty());
    }

    #[test]
    fn test_dangling_connections_are_ignored() {
        let airports = vec![airport("JFK", &["LAX", "NOWHERE"]), airport("LAX", &[])];
        assert_eq!(codes(&filter_destinations("JFK", &airports)), vec!["LAX"]);
    }

    #[test]
    fn test_connections_are_directional() {
        let airports = vec![airport("JFK", &["LAX"]), airport("LAX", &[])];
        assert!(filter_destinations("LAX", &airports).is_empty());
    }

    #[test]
    fn test_memo_hit_skips_scan() {
        let airports = Arc::new(vec![airport("JFK", &["LAX"]), airport("LAX", &[])]);
        let mut filter = DestinationFilter::new();

        let first = filter.filter("JFK", &airports);
        let second = filter.filter("JFK", &airports);

        assert_eq!(first, second);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(filter.scan_count(), 1);

        filter.filter("LAX", &airports);
        assert_eq!(filter.scan_count(), 2);
        assert_eq!(filter.cached_origins(), 2);
    }

    #[test]
    fn test_equal_snapshot_reuses_cache() {
        let mut filter = DestinationFilter::new();
        let a = Arc::new(vec![airport("JFK", &["LAX"]), airport("LAX", &[])]);
        let b = Arc::new(vec![airport("JFK", &["LAX"]), airport("LAX", &[])]);

        filter.filter("JFK", &a);
        filter.filter("JFK", &b);
        assert_eq!(filter.scan_count(), 1);
    }

    #[test]
    fn test_new_snapshot_drops_stale_results() {
        let mut filter = DestinationFilter::new();
        let old = Arc::new(vec![airport("JFK", &["LAX"]), airport("LAX", &[])]);
        let new = Arc::new(vec![
            airport("JFK", &["LHR"]),
            airport("LAX", &[]),
            airport("LHR", &[]),
        ]);

        assert_eq!(codes(&filter.filter("JFK", &old)), vec!["LAX"]);
        assert_eq!(codes(&filter.filter("JFK", &new)), vec!["LHR"]);
        assert_eq!(filter.scan_count(), 2);
        assert_eq!(filter.cached_origins(), 1);
    }

    #[test]
    fn test_invalidate_forces_rescan() {
        let airports = Arc::new(vec![airport("JFK", &["LAX"]), airport("LAX", &[])]);
        let mut filter = DestinationFilter::new();

        filter.filter("JFK", &airports);
        filter.invalidate();
        filter.filter("JFK", &airports);
        assert_eq!(filter.scan_count(), 2);
    }
}
