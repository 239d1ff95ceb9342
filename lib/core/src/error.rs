//! Error handling foundation for paygate.
//!
//! Provider traits return plain error enums so callers can branch on the
//! variant. Layer boundaries (gate evaluation, startup credential loading)
//! return this `Result`, which carries a rootcause `Report`; `?` lifts the
//! plain enum into the report.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct LookupFailed;

    impl fmt::Display for LookupFailed {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "lookup failed")
        }
    }

    impl std::error::Error for LookupFailed {}

    fn lookup(ok: bool) -> std::result::Result<u8, LookupFailed> {
        if ok { Ok(7) } else { Err(LookupFailed) }
    }

    fn boundary(ok: bool) -> Result<u8, LookupFailed> {
        Ok(lookup(ok)?)
    }

    #[test]
    fn question_mark_lifts_plain_errors() {
        assert_eq!(boundary(true).expect("ok"), 7);
        let report = boundary(false).unwrap_err();
        assert!(report.to_string().contains("lookup failed"));
    }
}
