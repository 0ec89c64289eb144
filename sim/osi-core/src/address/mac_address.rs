use super::AddressParseError;
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// A link-layer address.
///
/// Written as six lowercase hex bytes separated by `-`, without zero
/// padding, so `0x00` prints as `0` and `0x0f` as `f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const fn new(address: [u8; 6]) -> Self {
        Self(address)
    }
}

impl Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{byte:x}")?;
        }
        Ok(())
    }
}

impl FromStr for MacAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 6 {
            Err(AddressParseError::PartCount {
                expected: 6,
                actual: parts.len(),
            })?
        }
        let mut bytes = [0u8; 6];
        for (byte, part) in bytes.iter_mut().zip(parts) {
            *byte = u8::from_str_radix(part, 16)
                .map_err(|_| AddressParseError::InvalidPart(part.to_string()))?;
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_drops_zero_padding() {
        let mac = MacAddress::new([0x24, 0x88, 0x90, 0x00, 0xff, 0xab]);
        assert_eq!(mac.to_string(), "24-88-90-0-ff-ab");
    }

    #[test]
    fn parse_then_display_keeps_catalog_form() {
        for text in ["aa-cd-ef-0-aa-54", "25-48-b0-0-ff-ab", "32-a8-9f-0-ff-56"] {
            let mac: MacAddress = text.parse().unwrap();
            assert_eq!(mac.to_string(), text);
        }
    }

    #[test]
    fn rejects_bad_parts() {
        assert!(matches!(
            "24-88-90-0-ff".parse::<MacAddress>(),
            Err(AddressParseError::PartCount { actual: 5, .. })
        ));
        assert_eq!(
            "24-88-90-0-ff-zz".parse::<MacAddress>(),
            Err(AddressParseError::InvalidPart("zz".into()))
        );
    }
}
