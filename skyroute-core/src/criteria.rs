use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::airport::normalize_code;
use crate::{CabinClass, CoreError, CoreResult};

/// What the traveller asked for. A return date makes it a round-trip search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub origin_code: String,
    pub destination_code: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub cabin_preference: Option<CabinClass>,
}

impl SearchCriteria {
    pub fn one_way(origin: &str, destination: &str, departure_date: NaiveDate) -> Self {
        Self {
            origin_code: origin.to_string(),
            destination_code: destination.to_string(),
            departure_date,
            return_date: None,
            cabin_preference: None,
        }
    }

    pub fn round_trip(
        origin: &str,
        destination: &str,
        departure_date: NaiveDate,
        return_date: NaiveDate,
    ) -> Self {
        Self {
            return_date: Some(return_date),
            ..Self::one_way(origin, destination, departure_date)
        }
    }

    pub fn is_round_trip(&self) -> bool {
        self.return_date.is_some()
    }

    /// Returns a copy with upper-cased codes, or the first problem found.
    pub fn validated(&self) -> CoreResult<Self> {
        let origin_code = normalize_code(&self.origin_code).map_err(into_criteria_error)?;
        let destination_code = normalize_code(&self.destination_code).map_err(into_criteria_error)?;

        if origin_code == destination_code {
            return Err(CoreError::InvalidSearchCriteria(format!(
                "origin and destination are both {}",
                origin_code
            )));
        }
        if let Some(return_date) = self.return_date {
            if return_date < self.departure_date {
                return Err(CoreError::InvalidSearchCriteria(format!(
                    "return date {} is before departure date {}",
                    return_date, self.departure_date
                )));
            }
        }

        Ok(Self {
            origin_code,
            destination_code,
            ..self.clone()
        })
    }
}

fn into_criteria_error(err: CoreError) -> CoreError {
    match err {
        CoreError::ValidationError(msg) => CoreError::InvalidSearchCriteria(msg),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_codes_normalised() {
        let c = SearchCriteria::one_way("lhr", "jfk", date(1)).validated().unwrap();
        assert_eq!(c.origin_code, "LHR");
        assert_eq!(c.destination_code, "JFK");
        assert!(!c.is_round_trip());
    }

    #[test]
    fn test_same_origin_and_destination_rejected() {
        let err = SearchCriteria::one_way("LHR", "lhr", date(1)).validated().unwrap_err();
        assert!(matches!(err, CoreError::InvalidSearchCriteria(_)));
    }

    #[test]
    fn test_bad_code_rejected() {
        let err = SearchCriteria::one_way("LONDON", "JFK", date(1)).validated().unwrap_err();
        assert!(matches!(err, CoreError::InvalidSearchCriteria(_)));
    }

    #[test]
    fn test_return_before_departure_rejected() {
        let err = SearchCriteria::round_trip("LHR", "JFK", date(5), date(4)).validated().unwrap_err();
        assert!(matches!(err, CoreError::InvalidSearchCriteria(_)));
        assert!(SearchCriteria::round_trip("LHR", "JFK", date(5), date(5)).validated().is_ok());
    }
}
