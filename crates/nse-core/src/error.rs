use thiserror::Error;

pub type NseResult<T> = Result<T, NseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NseError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Domain error: {what} = {value} ({requirement})")]
    Domain {
        what: &'static str,
        value: f64,
        requirement: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_names_the_input() {
        let err = NseError::Domain {
            what: "temperature",
            value: -1.0,
            requirement: "must be > 0",
        };
        let msg = err.to_string();
        assert!(msg.contains("temperature"));
        assert!(msg.contains("-1"));
    }
}
