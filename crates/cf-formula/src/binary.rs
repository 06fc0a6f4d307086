//! Two's-complement conversion for 4/8/16/32-bit signed integers.
//!
//! Both directions record the textbook procedure as steps: pad, invert, add
//! one (or subtract one, invert, negate when decoding).

use serde::{Deserialize, Serialize};

use crate::error::{SolveError, SolveResult};

/// Supported register widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BitWidth {
    Four,
    Eight,
    Sixteen,
    ThirtyTwo,
}

impl BitWidth {
    pub const ALL: [BitWidth; 4] = [Self::Four, Self::Eight, Self::Sixteen, Self::ThirtyTwo];

    pub fn bits(self) -> u32 {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
            Self::Sixteen => 16,
            Self::ThirtyTwo => 32,
        }
    }

    pub fn min(self) -> i64 {
        -(1i64 << (self.bits() - 1))
    }

    pub fn max(self) -> i64 {
        (1i64 << (self.bits() - 1)) - 1
    }

    fn mask(self) -> u64 {
        (1u64 << self.bits()) - 1
    }

    fn width(self) -> usize {
        self.bits() as usize
    }
}

impl TryFrom<u32> for BitWidth {
    type Error = SolveError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|w| w.bits() == bits)
            .ok_or(SolveError::InvalidBitWidth { bits })
    }
}

impl From<BitWidth> for u32 {
    fn from(width: BitWidth) -> Self {
        width.bits()
    }
}

/// A value in both notations plus the steps that connect them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwosComplement {
    pub decimal: i64,
    pub binary: String,
    pub width: BitWidth,
    /// The bit pattern read as an unsigned integer.
    pub unsigned: u64,
    pub sign_bit: u8,
    pub steps: Vec<String>,
}

/// Parse decimal text and encode it.
pub fn encode(text: &str, width: BitWidth) -> SolveResult<TwosComplement> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SolveError::Incomplete {
            expected: "a decimal number".to_string(),
        });
    }
    let value: i64 = trimmed.parse().map_err(|_| SolveError::InvalidNumber {
        quantity: "Decimal value",
    })?;
    encode_value(value, width)
}

pub fn encode_value(value: i64, width: BitWidth) -> SolveResult<TwosComplement> {
    if value < width.min() || value > width.max() {
        return Err(SolveError::OutOfRange {
            value: value.to_string(),
            bits: width.bits(),
            min: width.min(),
            max: width.max(),
        });
    }

    let n = width.width();
    let mut steps = Vec::new();
    let binary = if value >= 0 {
        let raw = format!("{value:b}");
        let padded = format!("{value:0n$b}");
        steps.push("Number is positive (or zero), so convert directly to binary".to_string());
        steps.push(format!("Binary: {raw}"));
        steps.push(format!("Padded to {n} bits: {padded}"));
        padded
    } else {
        let magnitude = value.unsigned_abs();
        let padded = format!("{magnitude:0n$b}");
        let inverted = invert(&padded);
        let inverted_value = !magnitude & width.mask();
        let result = format!("{:0n$b}", (inverted_value + 1) & width.mask());
        steps.push("Number is negative, so use two's complement".to_string());
        steps.push(format!("Absolute value: {magnitude}"));
        steps.push(format!("Binary of {magnitude}: {magnitude:b}"));
        steps.push(format!("Padded to {n} bits: {padded}"));
        steps.push(format!("Invert all bits: {inverted}"));
        steps.push(format!("Add 1: {result}"));
        result
    };

    let unsigned = (value as u64) & width.mask();
    steps.push(format!("Result: {value} = {binary} ({n}-bit two's complement)"));

    Ok(TwosComplement {
        decimal: value,
        sign_bit: sign_bit(&binary),
        binary,
        width,
        unsigned,
        steps,
    })
}

/// Decode a bit string (shorter strings are zero-padded on the left).
pub fn decode(text: &str, width: BitWidth) -> SolveResult<TwosComplement> {
    let bits = text.trim();
    if bits.is_empty() {
        return Err(SolveError::Incomplete {
            expected: "a binary number".to_string(),
        });
    }
    if !bits.chars().all(|c| c == '0' || c == '1') {
        return Err(SolveError::InvalidBinary);
    }
    if bits.len() > width.width() {
        return Err(SolveError::TooManyBits {
            len: bits.len(),
            bits: width.bits(),
        });
    }

    let n = width.width();
    let padded = format!("{bits:0>n$}");
    let unsigned = u64::from_str_radix(&padded, 2).map_err(|_| SolveError::InvalidBinary)?;

    let mut steps = vec![format!("Input: {bits}")];
    if padded.len() != bits.len() {
        steps.push(format!("Padded to {n} bits: {padded}"));
    }

    let sign = sign_bit(&padded);
    let decimal = if sign == 0 {
        steps.push("Sign bit is 0, so the number is positive".to_string());
        steps.push(format!("Value: {unsigned}"));
        unsigned as i64
    } else {
        let minus_one = (unsigned - 1) & width.mask();
        let minus_one_text = format!("{minus_one:0n$b}");
        let inverted = invert(&minus_one_text);
        let magnitude = !minus_one & width.mask();
        steps.push("Sign bit is 1, so the number is negative".to_string());
        steps.push(format!("Subtract 1: {minus_one_text}"));
        steps.push(format!("Invert all bits: {inverted}"));
        steps.push(format!("Magnitude: {magnitude}"));
        -(magnitude as i64)
    };
    steps.push(format!("Result: {padded} = {decimal}"));

    Ok(TwosComplement {
        decimal,
        binary: padded,
        width,
        unsigned,
        sign_bit: sign,
        steps,
    })
}

fn invert(bits: &str) -> String {
    bits.chars()
        .map(|c| if c == '0' { '1' } else { '0' })
        .collect()
}

fn sign_bit(bits: &str) -> u8 {
    u8::from(bits.starts_with('1'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn negative_42_in_8_bits() {
        let out = encode("-42", BitWidth::Eight).unwrap();
        assert_eq!(out.binary, "11010110");
        assert_eq!(out.unsigned, 214);
        assert_eq!(out.sign_bit, 1);
        assert!(out.steps.contains(&"Padded to 8 bits: 00101010".to_string()));
        assert!(out.steps.contains(&"Invert all bits: 11010101".to_string()));
        assert!(out.steps.contains(&"Add 1: 11010110".to_string()));

        let back = decode(&out.binary, BitWidth::Eight).unwrap();
        assert_eq!(back.decimal, -42);
    }

    #[test]
    fn positive_values_are_zero_padded() {
        let out = encode_value(5, BitWidth::Eight).unwrap();
        assert_eq!(out.binary, "00000101");
        assert_eq!(out.sign_bit, 0);
        assert_eq!(out.unsigned, 5);
    }

    #[test]
    fn range_edges() {
        for width in BitWidth::ALL {
            let min = encode_value(width.min(), width).unwrap();
            assert_eq!(min.binary, format!("1{}", "0".repeat(width.width() - 1)));
            let max = encode_value(width.max(), width).unwrap();
            assert_eq!(max.binary, format!("0{}", "1".repeat(width.width() - 1)));
            assert_eq!(encode_value(-1, width).unwrap().binary, "1".repeat(width.width()));
        }
    }

    #[test]
    fn out_of_range_is_domain_error() {
        let err = encode_value(128, BitWidth::Eight).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert_eq!(err.to_string(), "128 is outside the 8-bit range -128 to 127");
        assert!(encode_value(-9, BitWidth::Four).is_err());
    }

    #[test]
    fn non_integer_decimal_is_validity_error() {
        assert_eq!(
            encode("12.5", BitWidth::Eight).unwrap_err(),
            SolveError::InvalidNumber {
                quantity: "Decimal value"
            }
        );
        assert_eq!(
            encode("  ", BitWidth::Eight).unwrap_err().kind(),
            ErrorKind::Completeness
        );
    }

    #[test]
    fn decode_validates_input() {
        assert_eq!(
            decode("10201", BitWidth::Eight).unwrap_err(),
            SolveError::InvalidBinary
        );
        assert_eq!(
            decode("101010101", BitWidth::Eight).unwrap_err(),
            SolveError::TooManyBits { len: 9, bits: 8 }
        );
    }

    #[test]
    fn decode_pads_short_input() {
        let out = decode("101", BitWidth::Eight).unwrap();
        assert_eq!(out.binary, "00000101");
        assert_eq!(out.decimal, 5);
        assert!(out.steps.contains(&"Padded to 8 bits: 00000101".to_string()));

        // Full width keeps the sign bit.
        let out = decode("1011", BitWidth::Four).unwrap();
        assert_eq!(out.decimal, -5);
    }

    #[test]
    fn thirty_two_bit_extremes() {
        let out = decode(&"1".repeat(32), BitWidth::ThirtyTwo).unwrap();
        assert_eq!(out.decimal, -1);
        let out = decode(&format!("1{}", "0".repeat(31)), BitWidth::ThirtyTwo).unwrap();
        assert_eq!(out.decimal, i64::from(i32::MIN));
    }

    #[test]
    fn bit_width_from_u32() {
        assert_eq!(BitWidth::try_from(16).unwrap(), BitWidth::Sixteen);
        assert_eq!(
            BitWidth::try_from(12).unwrap_err(),
            SolveError::InvalidBitWidth { bits: 12 }
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn encode_then_decode_is_identity(v in i64::from(i32::MIN)..=i64::from(i32::MAX)) {
                let width = BitWidth::ThirtyTwo;
                let encoded = encode_value(v, width).unwrap();
                prop_assert_eq!(encoded.binary.len(), 32);
                prop_assert_eq!(decode(&encoded.binary, width).unwrap().decimal, v);
            }
        }
    }
}
