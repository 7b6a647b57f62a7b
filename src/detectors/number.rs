use crate::detectors::{DetectError, DetectionInput, Detector};
use crate::schema::{DetectorId, NumberPreview, Preview};
use num_bigint::BigUint;
use num_traits::Num;
use regex::Regex;
use std::sync::LazyLock;

static DECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("static regex"));
static HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]+$").expect("static regex"));
static BINARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^0b[01]+$").expect("static regex"));

/// Values wider than this round to infinity as an IEEE double.
const FINITE_BITS: u64 = 1024;

/// Parse a decimal, `0x` hex or `0b` binary literal. `Ok(None)` when the text
/// is not an integer literal, or when its value is too large to be a finite
/// double.
pub fn parse_integer_literal(val: &str) -> Result<Option<BigUint>, DetectError> {
    let (digits, radix) = if HEX.is_match(val) {
        (&val[2..], 16)
    } else if BINARY.is_match(val) {
        (&val[2..], 2)
    } else if DECIMAL.is_match(val) {
        (val, 10)
    } else {
        return Ok(None);
    };

    // Reject on digit count before paying for a huge parse.
    let significant = digits.trim_start_matches('0');
    let max_digits = match radix {
        16 => FINITE_BITS / 4,
        2 => FINITE_BITS,
        _ => 309,
    };
    if significant.len() as u64 > max_digits {
        return Ok(None);
    }
    if significant.is_empty() {
        return Ok(Some(BigUint::default()));
    }

    let parsed = BigUint::from_str_radix(significant, radix)?;
    if parsed.bits() > FINITE_BITS {
        return Ok(None);
    }
    Ok(Some(parsed))
}

impl From<BigUint> for NumberPreview {
    fn from(n: BigUint) -> Self {
        Self {
            decimal: n.to_string(),
            hexadecimal: format!("0x{:X}", n),
            octal: format!("0o{:o}", n),
            binary: format!("0b{:b}", n),
        }
    }
}

/// Overlaps with the timestamp detector on digit runs; both may fire.
#[derive(Default)]
pub struct NumberBaseDetector;

impl NumberBaseDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for NumberBaseDetector {
    fn id(&self) -> DetectorId {
        DetectorId::NumberBase
    }

    fn detect(&self, input: &DetectionInput) -> Result<Option<Preview>, DetectError> {
        Ok(parse_integer_literal(input.as_str())?.map(|n| Preview::NumberBase(n.into())))
    }
}
