use crate::imports::*;

/// Hints decoded from the digits of a six-digit wagon number
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WagonNumberInfo {
    /// Wagon family named by the first digit
    pub family: Option<&'static str>,
    /// Axle count hinted by the third digit
    pub axle_count: Option<u32>,
}

impl fmt::Display for WagonNumberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![];
        if let Some(family) = self.family {
            parts.push(format!("Type: {family}"));
        }
        if let Some(axles) = self.axle_count {
            parts.push(format!("Axles: {axles}"));
        }
        if parts.is_empty() {
            write!(f, "...")
        } else {
            write!(f, "{}", parts.join(" | "))
        }
    }
}

fn family(digit: u8) -> Option<&'static str> {
    match digit {
        b'1' => Some("Covered"),
        b'2' => Some("Open-Short"),
        b'3' => Some("Open-High"),
        b'4' => Some("Flat"),
        b'5' => Some("Tank"),
        b'6' => Some("Rail Carrier"),
        b'7' => Some("Fridge"),
        b'8' => Some("Ballast"),
        b'9' => Some("Bulk"),
        _ => None,
    }
}

fn axle_count(digit: u8) -> Option<u32> {
    match digit {
        b'0' => Some(3),
        b'1' => Some(2),
        b'2' | b'3' | b'4' => Some(4),
        b'8' | b'9' => Some(6),
        _ => None,
    }
}

/// Decodes whatever digits of a (possibly partial) wagon number are present
pub fn decode_wagon_number(digits: &str) -> WagonNumberInfo {
    let bytes = digits.trim().as_bytes();
    WagonNumberInfo {
        family: bytes.first().and_then(|d| family(*d)),
        axle_count: bytes.get(2).and_then(|d| axle_count(*d)),
    }
}

/// Parses a complete wagon number, which must be exactly six digits
pub fn parse_wagon_number(text: &str) -> anyhow::Result<u32> {
    let text = text.trim();
    if text.len() != 6 || !text.bytes().all(|b| b.is_ascii_digit()) {
        bail!(Error::InvalidWagonNumber(text.to_string()));
    }
    Ok(text.parse()?)
}
