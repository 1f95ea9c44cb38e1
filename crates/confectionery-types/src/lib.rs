//! Shared row types, labels, and form input types for the confectionery
//! order book.
//!
//! Row types mirror the persisted tables column for column (`clients`,
//! `desserts`, and the `orders` listing joined with its client). Input
//! types in [`forms`] carry the presence checks that the desktop forms
//! run before calling into the store.

use serde::{Deserialize, Serialize};

mod forms;

pub use forms::{NewClient, NewDessert, NewOrder, ValidationError, DESSERT_SEPARATOR};

/// A client row from the `clients` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Auto-assigned row ID.
    pub id: i64,
    /// Full name (required).
    pub full_name: String,
    /// Phone number (required, unique across clients).
    pub phone: String,
    /// Birth date as `YYYY-MM-DD`.
    pub birth_date: Option<String>,
    pub email: Option<String>,
}

impl Client {
    /// Label used by client pickers: `"{full_name} ({phone})"`.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.full_name, self.phone)
    }
}

/// A dessert row from the `desserts` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dessert {
    /// Auto-assigned row ID.
    pub id: i64,
    /// Dessert name (required, unique across desserts).
    pub name: String,
    pub price_per_kg: Option<f64>,
    pub price_per_unit: Option<f64>,
    /// Free-text list of ingredients.
    pub composition: Option<String>,
}

impl Dessert {
    /// Classifies which prices are set. Zero counts as unset.
    ///
    /// Returns `None` when neither price is set.
    pub fn pricing_mode(&self) -> Option<PricingMode> {
        let per_kg = is_set(self.price_per_kg);
        let per_unit = is_set(self.price_per_unit);
        match (per_kg, per_unit) {
            (true, true) => Some(PricingMode::Both),
            (true, false) => Some(PricingMode::PerKilogram),
            (false, true) => Some(PricingMode::PerUnit),
            (false, false) => None,
        }
    }
}

pub(crate) fn is_set(price: Option<f64>) -> bool {
    matches!(price, Some(p) if p != 0.0)
}

/// How a dessert is priced, as chosen in the dessert form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingMode {
    /// Only the per-kilogram price applies.
    PerKilogram,
    /// Only the per-unit price applies.
    PerUnit,
    /// Both prices apply.
    Both,
}

/// One row of the order listing: an order joined with its client's name
/// and phone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    /// Auto-assigned order ID.
    pub id: i64,
    pub client_name: String,
    pub client_phone: String,
    /// Comma-joined dessert names, as stored.
    pub dessert_types: String,
    /// Order date as `YYYY-MM-DD`.
    pub order_date: String,
    /// Order time as `HH:MM`.
    pub order_time: String,
    /// Raw delivery label, as stored.
    pub delivery_type: String,
    /// Photo file path; empty when no photo was attached.
    pub photo_path: String,
}

impl OrderView {
    /// Splits the stored dessert text into individual names.
    pub fn dessert_names(&self) -> Vec<&str> {
        split_dessert_names(&self.dessert_types)
    }

    /// Parses the stored delivery label. Unknown labels yield `None`.
    pub fn delivery(&self) -> Option<DeliveryType> {
        self.delivery_type.parse().ok()
    }

    /// Returns the photo path, or `None` if no photo was attached.
    pub fn photo(&self) -> Option<&str> {
        let path = self.photo_path.trim();
        (!path.is_empty()).then_some(path)
    }
}

pub(crate) fn split_dessert_names(text: &str) -> Vec<&str> {
    text.split(DESSERT_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Delivery modes offered when placing an order.
///
/// The labels are the values persisted in `orders.delivery_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryType {
    /// Courier delivery to the client.
    #[serde(rename = "Доставка")]
    Delivery,
    /// The client picks the order up.
    #[serde(rename = "Самовывоз")]
    Pickup,
}

impl DeliveryType {
    /// All delivery modes, in the order they are offered.
    pub const ALL: [DeliveryType; 2] = [Self::Delivery, Self::Pickup];

    /// Returns the persisted label for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delivery => "Доставка",
            Self::Pickup => "Самовывоз",
        }
    }
}

impl std::fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeliveryType {
    type Err = ParseDeliveryTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Доставка" => Ok(Self::Delivery),
            "Самовывоз" => Ok(Self::Pickup),
            _ => Err(ParseDeliveryTypeError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown delivery label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDeliveryTypeError(pub String);

impl std::fmt::Display for ParseDeliveryTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown delivery type: {}", self.0)
    }
}

impl std::error::Error for ParseDeliveryTypeError {}

/// Row counts of the three tables, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableCounts {
    pub clients: usize,
    pub desserts: usize,
    pub orders: usize,
}

impl TableCounts {
    /// True when every table is empty.
    pub fn is_empty(&self) -> bool {
        self.clients == 0 && self.desserts == 0 && self.orders == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dessert(per_kg: Option<f64>, per_unit: Option<f64>) -> Dessert {
        Dessert {
            id: 1,
            name: "Эклеры".to_string(),
            price_per_kg: per_kg,
            price_per_unit: per_unit,
            composition: None,
        }
    }

    #[test]
    fn delivery_type_labels_parse_back() {
        for mode in DeliveryType::ALL {
            assert_eq!(mode.as_str().parse::<DeliveryType>(), Ok(mode));
        }
    }

    #[test]
    fn delivery_type_rejects_unknown_label() {
        let err = "Курьер".parse::<DeliveryType>().unwrap_err();
        assert_eq!(err, ParseDeliveryTypeError("Курьер".to_string()));
        assert_eq!(err.to_string(), "unknown delivery type: Курьер");
    }

    #[test]
    fn pricing_mode_classification() {
        assert_eq!(
            dessert(Some(1200.0), None).pricing_mode(),
            Some(PricingMode::PerKilogram)
        );
        assert_eq!(
            dessert(None, Some(150.0)).pricing_mode(),
            Some(PricingMode::PerUnit)
        );
        assert_eq!(
            dessert(Some(900.0), Some(90.0)).pricing_mode(),
            Some(PricingMode::Both)
        );
        // Zero is treated the same as a missing price.
        assert_eq!(dessert(Some(0.0), Some(0.0)).pricing_mode(), None);
        assert_eq!(dessert(None, None).pricing_mode(), None);
    }

    #[test]
    fn order_view_helpers() {
        let order = OrderView {
            id: 7,
            client_name: "Иванов Иван Иванович".to_string(),
            client_phone: "+79161234567".to_string(),
            dessert_types: "Торт \"Наполеон\",Эклеры".to_string(),
            order_date: "2024-01-15".to_string(),
            order_time: "14:30".to_string(),
            delivery_type: "Доставка".to_string(),
            photo_path: String::new(),
        };

        assert_eq!(order.dessert_names(), vec!["Торт \"Наполеон\"", "Эклеры"]);
        assert_eq!(order.delivery(), Some(DeliveryType::Delivery));
        assert_eq!(order.photo(), None);
    }

    #[test]
    fn client_display_label() {
        let client = Client {
            id: 1,
            full_name: "Петрова Мария Сергеевна".to_string(),
            phone: "+79167654321".to_string(),
            birth_date: None,
            email: None,
        };
        assert_eq!(
            client.display_label(),
            "Петрова Мария Сергеевна (+79167654321)"
        );
    }
}
