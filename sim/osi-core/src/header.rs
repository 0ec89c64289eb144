//! The textual headers prepended by the session, network and data link
//! layers.
//!
//! A header is a comma separated list of `KEY:value` fields ended by `|`:
//!
//! ```text
//! IP_SRC:192.23.12.12,IP_DST:192.36.14.12|<payload>
//! ```

use crate::codec::DecodeError;

/// Ends every header.
pub const HEADER_DELIMITER: char = '|';

/// The ordered field names of one kind of header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFormat {
    keys: &'static [&'static str],
}

/// `SESSION_ID:<token>|`
pub const SESSION: HeaderFormat = HeaderFormat {
    keys: &["SESSION_ID"],
};

/// `IP_SRC:<address>,IP_DST:<address>|`
pub const NETWORK: HeaderFormat = HeaderFormat {
    keys: &["IP_SRC", "IP_DST"],
};

/// `MAC_SRC:<address>,MAC_DST:<address>|`
pub const DATA_LINK: HeaderFormat = HeaderFormat {
    keys: &["MAC_SRC", "MAC_DST"],
};

impl HeaderFormat {
    pub fn keys(&self) -> &'static [&'static str] {
        self.keys
    }

    /// Prepends a header built from `values` to `payload`. Values are paired
    /// with keys in order.
    pub fn prepend(&self, values: &[impl AsRef<str>], payload: &str) -> String {
        let fields: Vec<String> = self
            .keys
            .iter()
            .zip(values)
            .map(|(key, value)| format!("{key}:{}", value.as_ref()))
            .collect();
        format!("{}{HEADER_DELIMITER}{payload}", fields.join(","))
    }

    /// Splits `value` at the first `|` and checks the part before it against
    /// this format. Returns the field values and the payload.
    pub fn strip<'a>(&self, value: &'a str) -> Result<(Vec<&'a str>, &'a str), DecodeError> {
        let first_key = self.keys.first().copied().unwrap_or_default();
        let (header, payload) = value
            .split_once(HEADER_DELIMITER)
            .ok_or(DecodeError::MissingHeaderDelimiter { header: first_key })?;

        let fields: Vec<&str> = header.split(',').collect();
        if fields.len() != self.keys.len() {
            Err(DecodeError::HeaderFieldCount {
                expected: self.keys.len(),
                actual: fields.len(),
            })?
        }

        let values = self
            .keys
            .iter()
            .zip(fields)
            .map(|(&key, field)| {
                field
                    .strip_prefix(key)
                    .and_then(|rest| rest.strip_prefix(':'))
                    .ok_or_else(|| DecodeError::UnexpectedField {
                        expected: key,
                        found: field.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((values, payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepend_network() {
        assert_eq!(
            NETWORK.prepend(&["192.23.12.12", "192.36.14.12"], "payload"),
            "IP_SRC:192.23.12.12,IP_DST:192.36.14.12|payload"
        );
    }

    #[test]
    fn strip_keeps_everything_after_first_delimiter() {
        let (values, payload) = DATA_LINK
            .strip("MAC_SRC:24-88-90-0-ff-ab,MAC_DST:aa-cd-ef-0-aa-54|IP_SRC:a,IP_DST:b|x|y")
            .unwrap();
        assert_eq!(values, ["24-88-90-0-ff-ab", "aa-cd-ef-0-aa-54"]);
        assert_eq!(payload, "IP_SRC:a,IP_DST:b|x|y");
    }

    #[test]
    fn strip_session() {
        let (values, payload) = SESSION.strip("SESSION_ID:k3y|0101").unwrap();
        assert_eq!(values, ["k3y"]);
        assert_eq!(payload, "0101");
    }

    #[test]
    fn strip_rejects_malformed_headers() {
        assert_eq!(
            SESSION.strip("SESSION_ID:k3y"),
            Err(DecodeError::MissingHeaderDelimiter {
                header: "SESSION_ID"
            })
        );
        assert_eq!(
            NETWORK.strip("IP_SRC:a|rest"),
            Err(DecodeError::HeaderFieldCount {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            NETWORK.strip("MAC_SRC:a,MAC_DST:b|rest"),
            Err(DecodeError::UnexpectedField {
                expected: "IP_SRC",
                found: "MAC_SRC:a".into()
            })
        );
    }
}
