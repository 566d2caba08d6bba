use serde::{Deserialize, Serialize};

use crate::{is_three_letter_code, CoreError, CoreResult};

/// Airport reference data keyed by IATA code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AirportRecord")]
pub struct Airport {
    code: String,
    name: String,
    city: String,
    country: String,
}

#[derive(Deserialize)]
struct AirportRecord {
    code: String,
    name: String,
    city: String,
    country: String,
}

impl TryFrom<AirportRecord> for Airport {
    type Error = CoreError;

    fn try_from(r: AirportRecord) -> CoreResult<Self> {
        Airport::new(&r.code, r.name, r.city, r.country)
    }
}

impl Airport {
    pub fn new(
        code: &str,
        name: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> CoreResult<Self> {
        let code = normalize_code(code)?;
        Ok(Self {
            code,
            name: name.into(),
            city: city.into(),
            country: country.into(),
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

/// Upper-cases and checks a 3-letter airport code.
pub fn normalize_code(code: &str) -> CoreResult<String> {
    let code = code.trim().to_ascii_uppercase();
    if !is_three_letter_code(&code) {
        return Err(CoreError::ValidationError(format!(
            "airport code must be 3 letters, got '{}'",
            code
        )));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_uppercased() {
        let jfk = Airport::new("jfk", "John F. Kennedy", "New York", "US").unwrap();
        assert_eq!(jfk.code(), "JFK");
        assert_eq!(jfk.city(), "New York");
    }

    #[test]
    fn test_invalid_codes_rejected() {
        assert!(Airport::new("JF", "x", "y", "z").is_err());
        assert!(Airport::new("JFK1", "x", "y", "z").is_err());
        assert!(Airport::new("J-K", "x", "y", "z").is_err());
    }
}
