use std::error::Error as StdError;
use std::fmt;

/// A marker type to indicate that a connect or TLS handshake timed out.
#[derive(Debug)]
pub struct TimedOut;

impl fmt::Display for TimedOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("timed out")
    }
}

impl StdError for TimedOut {}

/// Displays an error followed by its chain of sources, separated by `": "`.
///
/// Used for one-line diagnostics where the source carries the detail.
pub struct ErrorChain<'a>(pub &'a (dyn StdError + 'static));

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(err) = source {
            write!(f, ": {err}")?;
            source = err.source();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error;

    #[test]
    fn chain_includes_sources() {
        let err = error::record("missing plan_id").with_location("index.json.gz");
        assert_eq!(
            ErrorChain(&err).to_string(),
            "malformed record for index.json.gz: missing plan_id"
        );
    }

    #[test]
    fn timeouts_are_detectable() {
        let err = error::transport(TimedOut);
        assert!(err.is_timeout());
        assert!(!error::transport("refused").is_timeout());
    }
}
