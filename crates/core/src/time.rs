//! Timezone helpers over `chrono-tz`.

use chrono_tz::Tz;

use crate::error::CohortError;

/// Parse an IANA zone id like "America/Chicago" into a [`Tz`].
pub fn parse_zone(id: &str) -> Result<Tz, CohortError> {
    id.parse()
        .map_err(|_| CohortError::InvalidTimezone(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_zones() {
        assert_eq!(parse_zone("UTC").unwrap(), Tz::UTC);
        assert_eq!(
            parse_zone("America/Chicago").unwrap(),
            Tz::America__Chicago
        );
    }

    #[test]
    fn rejects_unknown_zone() {
        let err = parse_zone("Mars/Olympus").unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }
}
