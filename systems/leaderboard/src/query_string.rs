//! Session identity parsed from the sign-in query string.

use mole_rush_core::SeatIdentity;

/// Identity of the session derived from the sign-in URL.
///
/// Every component is optional: a spectator may open the experience without
/// signing into an event or a seat. Absence is logged, never fatal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionIdentity {
    section: Option<String>,
    row: Option<String>,
    seat: Option<String>,
    event_id: Option<String>,
}

impl SessionIdentity {
    /// Parses the identity from a query string such as
    /// `?section=104&row=C&seat=12&event=finals`.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let identity = Self {
            section: parameter(query, "section"),
            row: parameter(query, "row"),
            seat: parameter(query, "seat"),
            event_id: parameter(query, "event"),
        };

        if identity.event_id.is_none() {
            log::warn!("did not sign into an event");
        }
        if identity.section.is_none() || identity.row.is_none() || identity.seat.is_none() {
            log::warn!("did not sign into a unique seat");
        }

        identity
    }

    /// Builds an identity from already-resolved components.
    #[must_use]
    pub fn from_parts(
        section: Option<String>,
        row: Option<String>,
        seat: Option<String>,
        event_id: Option<String>,
    ) -> Self {
        Self {
            section,
            row,
            seat,
            event_id,
        }
    }

    /// Event the session signed into, if any.
    #[must_use]
    pub fn event_id(&self) -> Option<&str> {
        self.event_id.as_deref()
    }

    /// The complete seat identity, available only when every component was
    /// present in the query string.
    #[must_use]
    pub fn seat_identity(&self) -> Option<SeatIdentity> {
        match (&self.section, &self.row, &self.seat) {
            (Some(section), Some(row), Some(seat)) => {
                Some(SeatIdentity::new(section.clone(), row.clone(), seat.clone()))
            }
            _ => None,
        }
    }
}

/// Extracts one named parameter from the query string, percent-decoded.
fn parameter(query: &str, name: &str) -> Option<String> {
    let trimmed = query.strip_prefix('?').unwrap_or(query);
    for pair in trimmed.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if key == name && !value.is_empty() {
            return Some(percent_decode(value));
        }
    }
    None
}

fn percent_decode(value: &str) -> String {
    let mut decoded = String::with_capacity(value.len());
    let mut bytes = value.bytes();
    while let Some(byte) = bytes.next() {
        match byte {
            b'+' => decoded.push(' '),
            b'%' => {
                let high = bytes.next();
                let low = bytes.next();
                match (high.and_then(hex_value), low.and_then(hex_value)) {
                    (Some(high), Some(low)) => decoded.push(char::from(high << 4 | low)),
                    // Malformed escapes pass through untouched.
                    _ => {
                        decoded.push('%');
                        for byte in [high, low].into_iter().flatten() {
                            decoded.push(char::from(byte));
                        }
                    }
                }
            }
            other => decoded.push(char::from(other)),
        }
    }
    decoded
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_query_string() {
        let identity = SessionIdentity::from_query("?section=104&row=C&seat=12&event=finals");
        assert_eq!(identity.event_id(), Some("finals"));
        assert_eq!(
            identity.seat_identity(),
            Some(SeatIdentity::new("104", "C", "12")),
        );
    }

    #[test]
    fn missing_components_yield_a_partial_identity() {
        let identity = SessionIdentity::from_query("?event=finals");
        assert_eq!(identity.event_id(), Some("finals"));
        assert_eq!(identity.seat_identity(), None);
    }

    #[test]
    fn empty_values_count_as_missing() {
        let identity = SessionIdentity::from_query("?section=&row=C&seat=12");
        assert_eq!(identity.seat_identity(), None);
    }

    #[test]
    fn plus_and_percent_escapes_are_decoded() {
        let identity = SessionIdentity::from_query("section=upper+deck&row=C&seat=12%20a");
        let seat = identity.seat_identity().expect("seat identity");
        assert_eq!(seat.section, "upper deck");
        assert_eq!(seat.seat, "12 a");
    }
}
