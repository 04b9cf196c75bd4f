use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// The three fixed laundry offerings, each billed per kilogram.
///
/// The Spanish aliases are the spellings written by the first version of the
/// form; slots containing them still load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    #[default]
    #[serde(alias = "lavado")]
    Wash,
    #[serde(alias = "planchado")]
    Iron,
    #[serde(alias = "completo")]
    Full,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Wash, Service::Iron, Service::Full];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Wash => "wash",
            Service::Iron => "iron",
            Service::Full => "full",
        }
    }

    /// Label shown in the form's service menu, e.g. `Wash (S/5 x kg)`.
    pub fn menu_label(&self, currency: &str) -> String {
        let name = match self {
            Service::Wash => "Wash",
            Service::Iron => "Iron",
            Service::Full => "Full service",
        };
        format!("{} ({}{} x kg)", name, currency, self.unit_price())
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wash" | "lavado" => Ok(Service::Wash),
            "iron" | "planchado" => Ok(Service::Iron),
            "full" | "completo" => Ok(Service::Full),
            other => Err(DomainError::Validation(format!(
                "unknown service '{}', expected wash, iron or full",
                other
            ))),
        }
    }
}

/// Lifecycle tag of an order. Any status may be set from any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    #[serde(alias = "pendiente")]
    Pending,
    #[serde(alias = "en_proceso")]
    InProgress,
    #[serde(alias = "completado")]
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::InProgress,
        OrderStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pending" | "pendiente" => Ok(OrderStatus::Pending),
            "in_progress" | "en_proceso" => Ok(OrderStatus::InProgress),
            "completed" | "completado" => Ok(OrderStatus::Completed),
            other => Err(DomainError::Validation(format!(
                "unknown status '{}', expected pending, in_progress or completed",
                other
            ))),
        }
    }
}

/// A persisted laundry order. Only `status` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub customer_name: String,
    pub service: Service,
    #[serde(deserialize_with = "decimal_text::deserialize")]
    pub weight: BigDecimal,
    #[serde(deserialize_with = "decimal_text::deserialize")]
    pub total: BigDecimal,
    pub status: OrderStatus,
    pub date: String,
}

/// Reads decimals written either as strings or as JSON numbers.
///
/// A number is parsed from its shortest decimal text, so `1.1` stays `1.1`
/// rather than becoming the exact expansion of the nearest `f64`. `null` is
/// rejected.
mod decimal_text {
    use std::fmt;
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use serde::de::{self, Deserializer, Visitor};

    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = BigDecimal;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a decimal number or decimal string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<BigDecimal, E> {
            BigDecimal::from_str(v.trim())
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<BigDecimal, E> {
            Ok(BigDecimal::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<BigDecimal, E> {
            Ok(BigDecimal::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<BigDecimal, E> {
            if !v.is_finite() {
                return Err(E::invalid_value(de::Unexpected::Float(v), &self));
            }
            // `Display` for f64 gives the shortest text that round-trips.
            BigDecimal::from_str(&v.to_string())
                .map_err(|_| E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DecimalVisitor)
    }
}

/// Raw form input for a new order, before validation.
#[derive(Debug, Clone, Default)]
pub struct NewOrder {
    pub customer_name: String,
    pub service: Service,
    pub weight_text: String,
}

impl NewOrder {
    pub fn new(
        customer_name: impl Into<String>,
        service: Service,
        weight_text: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            service,
            weight_text: weight_text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_parses_canonical_and_legacy_names() {
        assert_eq!("wash".parse::<Service>().unwrap(), Service::Wash);
        assert_eq!(" IRON ".parse::<Service>().unwrap(), Service::Iron);
        assert_eq!("completo".parse::<Service>().unwrap(), Service::Full);
        assert!(matches!(
            "dry".parse::<Service>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn status_parses_dashes_and_legacy_names() {
        assert_eq!(
            "in-progress".parse::<OrderStatus>().unwrap(),
            OrderStatus::InProgress
        );
        assert_eq!(
            "completado".parse::<OrderStatus>().unwrap(),
            OrderStatus::Completed
        );
        assert!("done".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn menu_label_includes_price_and_currency() {
        assert_eq!(Service::Wash.menu_label("S/"), "Wash (S/5 x kg)");
        assert_eq!(Service::Full.menu_label("$"), "Full service ($7 x kg)");
    }

    #[test]
    fn order_serializes_with_camel_case_keys() {
        let order = Order {
            id: 1,
            customer_name: "Maria".to_string(),
            service: Service::Iron,
            weight: BigDecimal::from(2),
            total: BigDecimal::from(6),
            status: OrderStatus::InProgress,
            date: "3/5/2024".to_string(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["customerName"], "Maria");
        assert_eq!(json["service"], "iron");
        assert_eq!(json["status"], "in_progress");
    }

    #[test]
    fn legacy_record_deserializes() {
        let raw = r#"{"id":1709650000000,"customerName":"Luis","service":"planchado",
            "weight":2.5,"total":7.5,"status":"en_proceso","date":"5/3/2024"}"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.service, Service::Iron);
        assert_eq!(order.status, OrderStatus::InProgress);
        assert_eq!(order.total, "7.5".parse::<BigDecimal>().unwrap());
    }

    #[test]
    fn legacy_fractional_numbers_keep_their_written_digits() {
        let raw = r#"{"id":1,"customerName":"Rosa","service":"wash",
            "weight":1.1,"total":5.5,"status":"pending","date":"5/3/2024"}"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.weight.to_string(), "1.1");
        assert_eq!(order.total.to_string(), "5.5");

        let written = serde_json::to_value(&order).unwrap();
        assert_eq!(written["weight"], "1.1");
    }

    #[test]
    fn string_decimals_round_trip() {
        let raw = r#"{"id":1,"customerName":"Rosa","service":"iron",
            "weight":"0.3","total":"0.9","status":"pending","date":"5/3/2024"}"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        let again: Order = serde_json::from_str(&serde_json::to_string(&order).unwrap()).unwrap();
        assert_eq!(again, order);
        assert_eq!(again.total.to_string(), "0.9");
    }

    #[test]
    fn null_decimal_is_rejected() {
        let raw = r#"{"id":1,"customerName":"Rosa","service":"wash",
            "weight":null,"total":null,"status":"pending","date":"5/3/2024"}"#;
        assert!(serde_json::from_str::<Order>(raw).is_err());
    }
}
