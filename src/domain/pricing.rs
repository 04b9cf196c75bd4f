use std::str::FromStr;

use bigdecimal::{BigDecimal, Signed};

use super::errors::DomainError;
use super::order::Service;

impl Service {
    /// Price per kilogram in whole currency units.
    pub fn unit_price(&self) -> u32 {
        match self {
            Service::Wash => 5,
            Service::Iron => 3,
            Service::Full => 7,
        }
    }
}

/// Parse the weight field of the form. Zero is a valid weight.
pub fn parse_weight(text: &str) -> Result<BigDecimal, DomainError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation("weight is required".to_string()));
    }
    let weight =
        BigDecimal::from_str(trimmed).map_err(|_| DomainError::Parse(trimmed.to_string()))?;
    if weight.is_negative() {
        return Err(DomainError::Validation(format!(
            "weight must not be negative, got {}",
            trimmed
        )));
    }
    Ok(weight)
}

pub fn total_for(service: Service, weight: &BigDecimal) -> BigDecimal {
    weight * BigDecimal::from(service.unit_price())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn totals_follow_the_price_table() {
        assert_eq!(total_for(Service::Wash, &dec("10")), dec("50"));
        assert_eq!(total_for(Service::Iron, &dec("1.5")), dec("4.5"));
        assert_eq!(total_for(Service::Full, &dec("2")), dec("14"));
    }

    #[test]
    fn zero_weight_costs_nothing() {
        for service in Service::ALL {
            assert_eq!(total_for(service, &parse_weight("0").unwrap()), dec("0"));
        }
    }

    #[test]
    fn weight_is_trimmed() {
        assert_eq!(parse_weight(" 3.25 ").unwrap(), dec("3.25"));
    }

    #[test]
    fn empty_weight_is_a_validation_error() {
        assert!(matches!(parse_weight(""), Err(DomainError::Validation(_))));
        assert!(matches!(parse_weight("   "), Err(DomainError::Validation(_))));
    }

    #[test]
    fn non_numeric_weight_is_a_parse_error() {
        assert!(matches!(parse_weight("ten"), Err(DomainError::Parse(s)) if s == "ten"));
        assert!(matches!(parse_weight("10kg"), Err(DomainError::Parse(_))));
    }

    #[test]
    fn negative_weight_is_rejected() {
        assert!(matches!(parse_weight("-1"), Err(DomainError::Validation(_))));
    }
}
