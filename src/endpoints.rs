use crate::config::PathEncoding;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

pub const CREDITS: &str = "account/credits";
pub const VALIDATE_IBAN: &str = "validate_iban";
pub const CALCULATE_IBAN: &str = "calculate_iban";
pub const VALIDATE_BIC: &str = "validate_bic";
pub const FIND_BANK: &str = "find_bank";

// RFC 3986 path segment: everything outside pchar is escaped.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Joins an endpoint with its arguments using a single `/` between parts.
/// The endpoint itself is never encoded.
pub fn build_path(endpoint: &str, segments: &[&str], encoding: PathEncoding) -> String {
    let mut parts = Vec::with_capacity(segments.len() + 1);
    parts.push(endpoint.to_string());
    for segment in segments {
        let part = match encoding {
            PathEncoding::Verbatim => segment.to_string(),
            PathEncoding::PercentEncode => utf8_percent_encode(segment, PATH_SEGMENT).to_string(),
        };
        parts.push(part);
    }
    parts.join("/")
}

pub fn validate_iban(iban: &str, encoding: PathEncoding) -> String {
    build_path(VALIDATE_IBAN, &[iban], encoding)
}

/// The check digit is appended only when present and non-empty.
pub fn calculate_iban(
    country: &str,
    bank_code: &str,
    account: &str,
    check_digit: Option<&str>,
    encoding: PathEncoding,
) -> String {
    let mut segments = vec![country, bank_code, account];
    if let Some(digit) = check_digit.filter(|d| !d.is_empty()) {
        segments.push(digit);
    }
    build_path(CALCULATE_IBAN, &segments, encoding)
}

pub fn validate_bic(bic: &str, encoding: PathEncoding) -> String {
    build_path(VALIDATE_BIC, &[bic], encoding)
}

pub fn find_bank(country: &str, bank_code: &str, encoding: PathEncoding) -> String {
    build_path(FIND_BANK, &[country, bank_code], encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: PathEncoding = PathEncoding::Verbatim;
    const ENCODED: PathEncoding = PathEncoding::PercentEncode;

    #[test]
    fn single_segment_paths() {
        assert_eq!(
            validate_iban("DE02600501010002034304", RAW),
            "validate_iban/DE02600501010002034304"
        );
        assert_eq!(validate_bic("BFSWDE33BER", RAW), "validate_bic/BFSWDE33BER");
        assert_eq!(find_bank("CH", "100", RAW), "find_bank/CH/100");
    }

    #[test]
    fn calculate_iban_check_digit_is_optional() {
        assert_eq!(
            calculate_iban("AT", "12000", "703447144", None, RAW),
            "calculate_iban/AT/12000/703447144"
        );
        assert_eq!(
            calculate_iban("AT", "12000", "703447144", Some(""), RAW),
            "calculate_iban/AT/12000/703447144"
        );
        assert_eq!(
            calculate_iban("BE", "539", "0075470", Some("34"), RAW),
            "calculate_iban/BE/539/0075470/34"
        );
    }

    #[test]
    fn verbatim_keeps_reserved_characters() {
        assert_eq!(validate_iban("DE02 6005/0101", RAW), "validate_iban/DE02 6005/0101");
        assert_eq!(validate_iban("", RAW), "validate_iban/");
    }

    #[test]
    fn percent_encode_escapes_each_segment() {
        assert_eq!(
            validate_iban("DE02 6005/0101", ENCODED),
            "validate_iban/DE02%206005%2F0101"
        );
        assert_eq!(find_bank("CH", "10?0", ENCODED), "find_bank/CH/10%3F0");
        assert_eq!(
            calculate_iban("AT", "12000", "703447144", Some(""), ENCODED),
            "calculate_iban/AT/12000/703447144"
        );
    }

    #[test]
    fn credits_endpoint_is_not_split() {
        assert_eq!(build_path(CREDITS, &[], ENCODED), "account/credits");
    }
}
