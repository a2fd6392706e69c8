//! Address format validation.
//!
//! Pure shape checks: prefix, length and alphabet. No checksum or network
//! lookups are performed, so a well-formed but unused address is still valid.

use std::fmt;

use crate::error::DetectError;

/// Which Bitcoin address encoding an input matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitcoinKind {
    /// Legacy pay-to-pubkey-hash, `1…`.
    P2pkh,
    /// Pay-to-script-hash, `3…`.
    P2sh,
    /// Native SegWit v0, `bc1q…`.
    SegWit,
    /// Taproot (SegWit v1), `bc1p…`.
    Taproot,
}

/// The address format an input was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFormat {
    Evm,
    Svm,
    Bitcoin(BitcoinKind),
}

impl fmt::Display for AddressFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Evm => write!(f, "EVM"),
            Self::Svm => write!(f, "SVM (Solana)"),
            Self::Bitcoin(BitcoinKind::P2pkh) => write!(f, "Bitcoin legacy (P2PKH)"),
            Self::Bitcoin(BitcoinKind::P2sh) => write!(f, "Bitcoin script (P2SH)"),
            Self::Bitcoin(BitcoinKind::SegWit) => write!(f, "Bitcoin native SegWit"),
            Self::Bitcoin(BitcoinKind::Taproot) => write!(f, "Bitcoin Taproot"),
        }
    }
}

/// Base58 excludes `0`, `I`, `O` and `l`.
fn is_base58_char(c: char) -> bool {
    matches!(c, '1'..='9' | 'A'..='H' | 'J'..='N' | 'P'..='Z' | 'a'..='k' | 'm'..='z')
}

fn is_lower_alnum(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

// All accepted alphabets are ASCII, so byte length equals character count
// whenever the alphabet check passes.
fn body_matches(body: &str, min: usize, max: usize, allowed: fn(char) -> bool) -> bool {
    (min..=max).contains(&body.len()) && body.chars().all(allowed)
}

/// `0x` followed by exactly 40 hex digits, any letter case.
pub fn is_valid_evm_address(input: &str) -> bool {
    input
        .strip_prefix("0x")
        .is_some_and(|hex| body_matches(hex, 40, 40, |c| c.is_ascii_hexdigit()))
}

/// 32 to 44 base58 characters.
pub fn is_valid_svm_address(input: &str) -> bool {
    body_matches(input, 32, 44, is_base58_char)
}

pub fn is_valid_p2pkh_address(input: &str) -> bool {
    input
        .strip_prefix('1')
        .is_some_and(|body| body_matches(body, 24, 33, is_base58_char))
}

pub fn is_valid_p2sh_address(input: &str) -> bool {
    input
        .strip_prefix('3')
        .is_some_and(|body| body_matches(body, 24, 33, is_base58_char))
}

pub fn is_valid_segwit_address(input: &str) -> bool {
    input
        .strip_prefix("bc1q")
        .is_some_and(|body| body_matches(body, 38, 58, is_lower_alnum))
}

pub fn is_valid_taproot_address(input: &str) -> bool {
    input
        .strip_prefix("bc1p")
        .is_some_and(|body| body_matches(body, 58, 58, is_lower_alnum))
}

/// Which Bitcoin variant `input` matches, if any.
pub fn bitcoin_kind(input: &str) -> Option<BitcoinKind> {
    if is_valid_p2pkh_address(input) {
        Some(BitcoinKind::P2pkh)
    } else if is_valid_p2sh_address(input) {
        Some(BitcoinKind::P2sh)
    } else if is_valid_segwit_address(input) {
        Some(BitcoinKind::SegWit)
    } else if is_valid_taproot_address(input) {
        Some(BitcoinKind::Taproot)
    } else {
        None
    }
}

/// Any of the four Bitcoin address variants.
pub fn is_valid_bvm_address(input: &str) -> bool {
    bitcoin_kind(input).is_some()
}

/// Classify `input` as one of the supported formats.
///
/// EVM is checked first, then Bitcoin, then SVM: legacy Bitcoin addresses
/// are also valid base58 strings and would otherwise be reported as SVM.
pub fn classify(input: &str) -> Option<AddressFormat> {
    if is_valid_evm_address(input) {
        Some(AddressFormat::Evm)
    } else if let Some(kind) = bitcoin_kind(input) {
        Some(AddressFormat::Bitcoin(kind))
    } else if is_valid_svm_address(input) {
        Some(AddressFormat::Svm)
    } else {
        None
    }
}

/// `true` if `input` is a well-formed address in any supported format.
pub fn is_valid_address(input: &str) -> bool {
    is_valid_evm_address(input) || is_valid_svm_address(input) || is_valid_bvm_address(input)
}

/// Trim user input and reject it unless it is a well-formed address.
///
/// Returns the trimmed address, which is what detection runs against.
pub fn validate_input(raw: &str) -> Result<&str, DetectError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DetectError::EmptyInput);
    }
    if !is_valid_address(trimmed) {
        return Err(DetectError::InvalidAddress {
            input: trimmed.to_string(),
        });
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVM: &str = "0xa4C123B1612dD272D1371c17149d439536B3216f";
    const SOLANA: &str = "6ASe3S2LLhF6eawqAjznsyfRqMoYAKogiA3uvnzZhUom";
    const P2PKH: &str = "1BoatSLRHtKNngkdXEeobR76b53LETtpyT";
    const P2SH: &str = "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy";
    const SEGWIT: &str = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";
    const TAPROOT: &str = "bc1p5d7rjq7g6rdk2yhzks9smlaqtedr4dekq08ge8ztwac72sfr9rusxg3297";

    #[test]
    fn evm_any_case() {
        assert!(is_valid_evm_address(EVM));
        assert!(is_valid_evm_address(&EVM.to_lowercase()));
        assert!(is_valid_evm_address(&format!("0x{}", EVM[2..].to_uppercase())));
        assert!(is_valid_evm_address(&format!("0x{}", "AB".repeat(20))));
        assert!(is_valid_address(EVM));
    }

    #[test]
    fn evm_rejects_bad_prefix_length_alphabet() {
        assert!(!is_valid_evm_address(&EVM[2..]));
        assert!(!is_valid_evm_address(&EVM.replacen("0x", "0X", 1)));
        assert!(!is_valid_evm_address(&EVM[..41]));
        assert!(!is_valid_evm_address(&format!("{EVM}0")));
        assert!(!is_valid_evm_address(&format!("0x{}", "g".repeat(40))));
        assert!(!is_valid_address(&format!("0x{}", "g".repeat(40))));
    }

    #[test]
    fn svm_length_bounds() {
        assert!(is_valid_svm_address(SOLANA));
        assert!(is_valid_svm_address(&"2".repeat(32)));
        assert!(is_valid_svm_address(&"z".repeat(44)));
        assert!(!is_valid_svm_address(&"2".repeat(31)));
        assert!(!is_valid_svm_address(&"2".repeat(45)));
    }

    #[test]
    fn svm_rejects_ambiguous_characters() {
        for bad in ['0', 'I', 'O', 'l'] {
            let candidate = format!("{}{bad}", "a".repeat(35));
            assert!(!is_valid_svm_address(&candidate), "accepted {bad}");
            assert!(!is_valid_address(&candidate), "accepted {bad}");
        }
    }

    #[test]
    fn bitcoin_variants() {
        assert_eq!(bitcoin_kind(P2PKH), Some(BitcoinKind::P2pkh));
        assert_eq!(bitcoin_kind(P2SH), Some(BitcoinKind::P2sh));
        assert_eq!(bitcoin_kind(SEGWIT), Some(BitcoinKind::SegWit));
        assert_eq!(bitcoin_kind(TAPROOT), Some(BitcoinKind::Taproot));
        for addr in [P2PKH, P2SH, SEGWIT, TAPROOT] {
            assert!(is_valid_bvm_address(addr));
            assert!(is_valid_address(addr));
        }
    }

    #[test]
    fn taproot_requires_exactly_58() {
        let short = &TAPROOT[..TAPROOT.len() - 1];
        let long = format!("{TAPROOT}q");
        assert!(!is_valid_taproot_address(short));
        assert!(!is_valid_taproot_address(&long));
        assert!(!is_valid_address(short));
        assert!(!is_valid_address(&long));
    }

    #[test]
    fn segwit_rejects_uppercase_and_short_bodies() {
        assert!(!is_valid_segwit_address(&SEGWIT.to_uppercase()));
        assert!(!is_valid_segwit_address(&SEGWIT[..SEGWIT.len() - 1]));
        assert!(!is_valid_segwit_address(&format!("bc1q{}", "q".repeat(59))));
    }

    #[test]
    fn legacy_body_length_bounds() {
        assert!(is_valid_p2pkh_address(&format!("1{}", "2".repeat(24))));
        assert!(!is_valid_p2pkh_address(&format!("1{}", "2".repeat(23))));
        assert!(!is_valid_p2sh_address(&format!("3{}", "2".repeat(34))));
    }

    #[test]
    fn classify_precedence() {
        assert_eq!(classify(EVM), Some(AddressFormat::Evm));
        assert_eq!(classify(P2PKH), Some(AddressFormat::Bitcoin(BitcoinKind::P2pkh)));
        assert_eq!(classify(SOLANA), Some(AddressFormat::Svm));
        assert_eq!(classify("hello"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn validate_input_trims_and_rejects() {
        assert_eq!(validate_input(&format!("  {EVM}\n")).unwrap(), EVM);
        assert!(matches!(validate_input("   "), Err(DetectError::EmptyInput)));
        assert!(matches!(
            validate_input("0x1234"),
            Err(DetectError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn never_panics_on_odd_input() {
        let wide = "ü".repeat(40);
        for input in ["", "0x", "bc1", "bc1p", "1", wide.as_str(), "\0\0\0"] {
            let _ = is_valid_address(input);
            let _ = classify(input);
        }
    }
}
