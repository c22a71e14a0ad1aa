use thiserror::Error;

pub type CbResult<T> = Result<T, CbError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CbError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = CbError::NonFinite {
            what: "pressure",
            value: f64::INFINITY,
        };
        let msg = err.to_string();
        assert!(msg.contains("pressure"));
        assert!(msg.contains("inf"));

        let err = CbError::InvalidArg {
            what: "mass flow must be positive".into(),
        };
        assert!(err.to_string().starts_with("Invalid argument"));
    }
}
