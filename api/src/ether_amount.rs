//! Provides a safe, self-contained type for representing ether amounts.

use std::fmt;

use thiserror::Error;

/// Number of decimal places between ether and wei.
pub const ETHER_DECIMALS: u32 = 18;

const WEI_PER_ETHER: u128 = 10_u128.pow(ETHER_DECIMALS);

/// An error that can occur when parsing a string into an `EtherAmount`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseEtherError {
    /// The string is not in a valid numeric format (e.g., "abc", "1.2.3", "-1").
    #[error("invalid ether amount format")]
    InvalidFormat,
    /// The string has more than 18 decimal places.
    #[error("too many decimal places for ether")]
    TooManyDecimals,
    /// The amount does not fit in 128 bits of wei.
    #[error("ether amount is too large")]
    Overflow,
}

/// An amount of ether.
///
/// Internally, the amount is stored as an unsigned 128-bit integer in wei, the
/// smallest unit, so no floating-point arithmetic is ever involved. The
/// default `Display` implementation formats it as a decimal ether string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EtherAmount {
    wei: u128,
}

impl EtherAmount {
    /// Creates a new `EtherAmount` directly from wei.
    pub fn from_wei(wei: u128) -> Self {
        Self { wei }
    }

    /// Returns the raw amount in wei.
    pub fn as_wei(&self) -> u128 {
        self.wei
    }

    /// Parses a decimal ether string such as `"0.25"` into wei.
    ///
    /// Surrounding whitespace is ignored. Signs, exponents and more than
    /// 18 fractional digits are rejected.
    ///
    /// # Examples
    /// ```
    /// use api::ether_amount::EtherAmount;
    ///
    /// let amount = EtherAmount::from_ether_str("1.5").unwrap();
    /// assert_eq!(amount.as_wei(), 1_500_000_000_000_000_000);
    /// ```
    pub fn from_ether_str(s: &str) -> Result<Self, ParseEtherError> {
        let s = s.trim();

        let mut parts = s.split('.');
        let whole_str = parts.next().unwrap_or("");
        let frac_str = parts.next().unwrap_or("");

        if parts.next().is_some() || (whole_str.is_empty() && frac_str.is_empty()) {
            return Err(ParseEtherError::InvalidFormat);
        }

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole_str) || !all_digits(frac_str) {
            return Err(ParseEtherError::InvalidFormat);
        }

        if frac_str.len() > ETHER_DECIMALS as usize {
            return Err(ParseEtherError::TooManyDecimals);
        }

        let whole = if whole_str.is_empty() {
            0
        } else {
            whole_str
                .parse::<u128>()
                .map_err(|_| ParseEtherError::Overflow)?
        };

        let frac = if frac_str.is_empty() {
            0
        } else {
            // at most 18 digits, always fits.
            frac_str
                .parse::<u128>()
                .map_err(|_| ParseEtherError::InvalidFormat)?
                * 10_u128.pow(ETHER_DECIMALS - frac_str.len() as u32)
        };

        let wei = whole
            .checked_mul(WEI_PER_ETHER)
            .and_then(|w| w.checked_add(frac))
            .ok_or(ParseEtherError::Overflow)?;

        Ok(Self { wei })
    }

    /// Formats the amount as a JSON-RPC hex quantity, e.g. `0xde0b6b3a7640000`
    /// for one ether. Zero is `0x0`.
    pub fn to_hex_quantity(&self) -> String {
        format!("{:#x}", self.wei)
    }

    /// The amount as a 32-byte big-endian ABI `uint256` word.
    pub fn to_abi_word(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[16..].copy_from_slice(&self.wei.to_be_bytes());
        word
    }

    /// Formats the amount with its unit (e.g., "0.5 ETH").
    pub fn to_string_with_unit(&self) -> String {
        format!("{} ETH", self)
    }
}

/// Formats as decimal ether with trailing fractional zeros removed ("1", "0.05").
impl fmt::Display for EtherAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.wei / WEI_PER_ETHER;
        let frac = self.wei % WEI_PER_ETHER;

        if frac == 0 {
            return write!(f, "{}", whole);
        }

        let frac_str = format!("{:0width$}", frac, width = ETHER_DECIMALS as usize);
        write!(f, "{}.{}", whole, frac_str.trim_end_matches('0'))
    }
}

impl std::str::FromStr for EtherAmount {
    type Err = ParseEtherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ether_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_ether() {
        assert_eq!(
            EtherAmount::from_ether_str("2").unwrap().as_wei(),
            2 * WEI_PER_ETHER
        );
        assert_eq!(
            EtherAmount::from_ether_str("0.001").unwrap().as_wei(),
            1_000_000_000_000_000
        );
        assert_eq!(
            EtherAmount::from_ether_str(".5").unwrap().as_wei(),
            WEI_PER_ETHER / 2
        );
        assert_eq!(
            EtherAmount::from_ether_str("3.").unwrap().as_wei(),
            3 * WEI_PER_ETHER
        );
        assert_eq!(
            EtherAmount::from_ether_str(" 0.000000000000000001 ").unwrap().as_wei(),
            1
        );
    }

    #[test]
    fn rejects_malformed_amounts() {
        for bad in ["", ".", "abc", "1.2.3", "-1", "+1", "1e18", "1,5", "0x10"] {
            assert_eq!(
                EtherAmount::from_ether_str(bad),
                Err(ParseEtherError::InvalidFormat),
                "input {bad:?}"
            );
        }
        assert_eq!(
            EtherAmount::from_ether_str("0.0000000000000000001"),
            Err(ParseEtherError::TooManyDecimals)
        );
        assert_eq!(
            EtherAmount::from_ether_str("999999999999999999999999"),
            Err(ParseEtherError::Overflow)
        );
    }

    #[test]
    fn displays_trimmed_decimal_ether() {
        assert_eq!(EtherAmount::from_wei(0).to_string(), "0");
        assert_eq!(EtherAmount::from_wei(WEI_PER_ETHER).to_string(), "1");
        assert_eq!(
            EtherAmount::from_ether_str("12.0500").unwrap().to_string(),
            "12.05"
        );
        assert_eq!(EtherAmount::from_wei(1).to_string(), "0.000000000000000001");
        assert_eq!(
            EtherAmount::from_ether_str("0.25").unwrap().to_string_with_unit(),
            "0.25 ETH"
        );
    }

    #[test]
    fn encodes_hex_quantity_and_abi_word() {
        assert_eq!(EtherAmount::default().to_hex_quantity(), "0x0");
        assert_eq!(
            EtherAmount::from_wei(WEI_PER_ETHER).to_hex_quantity(),
            "0xde0b6b3a7640000"
        );

        let word = EtherAmount::from_wei(0x0102).to_abi_word();
        assert!(word[..30].iter().all(|b| *b == 0));
        assert_eq!(&word[30..], &[0x01, 0x02]);
    }
}
