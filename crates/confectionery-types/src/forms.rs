//! Form input types and the presence checks run before a write.
//!
//! The store enforces only what SQLite enforces (NOT NULL, UNIQUE). The
//! checks here are the ones the desktop forms perform before handing the
//! values over.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{is_set, split_dessert_names, DeliveryType, PricingMode};

/// Separator used to join dessert names into `orders.dessert_types`.
pub const DESSERT_SEPARATOR: &str = ",";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Errors reported back to the user when a form is incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("full name and phone are required")]
    MissingClientFields,

    #[error("dessert name is required")]
    MissingDessertName,

    #[error("at least one price must be set")]
    MissingPrice,

    #[error("a client must be selected")]
    MissingClient,

    #[error("at least one dessert must be selected")]
    NoDessertSelected,
}

/// Field values for adding or replacing a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub full_name: String,
    pub phone: String,
    pub birth_date: Option<String>,
    pub email: Option<String>,
}

impl NewClient {
    /// Builds client fields from raw form input.
    ///
    /// Text is trimmed, an empty email becomes `None`, and the birth date is
    /// formatted as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingClientFields`] if the full name or
    /// phone is blank.
    pub fn from_form(
        full_name: &str,
        phone: &str,
        birth_date: Option<NaiveDate>,
        email: &str,
    ) -> Result<Self, ValidationError> {
        let email = email.trim();
        let client = Self {
            full_name: full_name.trim().to_string(),
            phone: phone.trim().to_string(),
            birth_date: birth_date.map(|d| d.format(DATE_FORMAT).to_string()),
            email: (!email.is_empty()).then(|| email.to_string()),
        };
        client.validate()?;
        Ok(client)
    }

    /// Checks the required fields, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingClientFields`] if the full name or
    /// phone is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.full_name.trim().is_empty() || self.phone.trim().is_empty() {
            return Err(ValidationError::MissingClientFields);
        }
        Ok(())
    }
}

/// Field values for adding or replacing a dessert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDessert {
    pub name: String,
    pub price_per_kg: Option<f64>,
    pub price_per_unit: Option<f64>,
    pub composition: String,
}

impl NewDessert {
    /// Builds dessert fields from the dessert form.
    ///
    /// The price disabled by `mode` is dropped, and a zero price is stored
    /// as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingDessertName`] if the name is blank.
    pub fn from_form(
        name: &str,
        mode: PricingMode,
        price_per_kg: f64,
        price_per_unit: f64,
        composition: &str,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingDessertName);
        }

        let (per_kg, per_unit) = match mode {
            PricingMode::PerKilogram => (Some(price_per_kg), None),
            PricingMode::PerUnit => (None, Some(price_per_unit)),
            PricingMode::Both => (Some(price_per_kg), Some(price_per_unit)),
        };

        Ok(Self {
            name: name.to_string(),
            price_per_kg: per_kg.filter(|p| *p != 0.0),
            price_per_unit: per_unit.filter(|p| *p != 0.0),
            composition: composition.trim().to_string(),
        })
    }

    /// Checks everything the dessert form requires: a name, then at least
    /// one non-zero price.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingDessertName`] for a blank name and
    /// [`ValidationError::MissingPrice`] if neither price is set.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingDessertName);
        }
        self.require_price()
    }

    /// Checks that at least one price is set and non-zero.
    ///
    /// The store accepts a dessert without prices; callers decide whether
    /// to ask for confirmation or reject.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingPrice`] if neither price is set.
    pub fn require_price(&self) -> Result<(), ValidationError> {
        if is_set(self.price_per_kg) || is_set(self.price_per_unit) {
            Ok(())
        } else {
            Err(ValidationError::MissingPrice)
        }
    }
}

/// Field values for placing an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub client_id: i64,
    /// Comma-joined dessert names.
    pub dessert_types: String,
    /// `YYYY-MM-DD`
    pub order_date: String,
    /// Zero-padded `HH:MM`.
    pub order_time: String,
    pub delivery_type: DeliveryType,
    /// Photo file path, empty for none.
    pub photo_path: String,
}

impl NewOrder {
    /// Composes an order from the order form's selections.
    ///
    /// Selected dessert names are joined with [`DESSERT_SEPARATOR`]; date
    /// and time are formatted so that the order listing sorts correctly.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingClient`] if no client is selected,
    /// or [`ValidationError::NoDessertSelected`] if `selected` has no
    /// non-blank names.
    pub fn compose(
        client_id: Option<i64>,
        selected: &[&str],
        date: NaiveDate,
        time: NaiveTime,
        delivery_type: DeliveryType,
        photo_path: &str,
    ) -> Result<Self, ValidationError> {
        let client_id = client_id.ok_or(ValidationError::MissingClient)?;

        let names: Vec<&str> = selected
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .collect();
        if names.is_empty() {
            return Err(ValidationError::NoDessertSelected);
        }

        Ok(Self {
            client_id,
            dessert_types: names.join(DESSERT_SEPARATOR),
            order_date: date.format(DATE_FORMAT).to_string(),
            order_time: time.format(TIME_FORMAT).to_string(),
            delivery_type,
            photo_path: photo_path.trim().to_string(),
        })
    }

    /// Splits the joined dessert text into individual names.
    pub fn dessert_names(&self) -> Vec<&str> {
        split_dessert_names(&self.dessert_types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    #[test]
    fn client_requires_name_and_phone() {
        assert_eq!(
            NewClient::from_form("  ", "+79161234567", None, ""),
            Err(ValidationError::MissingClientFields)
        );
        assert_eq!(
            NewClient::from_form("Иванов Иван", "", None, ""),
            Err(ValidationError::MissingClientFields)
        );
    }

    #[test]
    fn client_form_normalizes_optional_fields() {
        let client = NewClient::from_form(
            " Сидоров Алексей Петрович ",
            "+79031112233",
            Some(date(1992, 8, 3)),
            "   ",
        )
        .expect("form should validate");

        assert_eq!(client.full_name, "Сидоров Алексей Петрович");
        assert_eq!(client.birth_date.as_deref(), Some("1992-08-03"));
        assert_eq!(client.email, None);
    }

    #[test]
    fn dessert_form_drops_disabled_price() {
        let dessert =
            NewDessert::from_form("Макаруны", PricingMode::PerUnit, 500.0, 80.0, "миндаль")
                .expect("form should validate");
        assert_eq!(dessert.price_per_kg, None);
        assert_eq!(dessert.price_per_unit, Some(80.0));
        assert!(dessert.require_price().is_ok());
    }

    #[test]
    fn dessert_form_requires_name_and_price() {
        assert_eq!(
            NewDessert::from_form(" ", PricingMode::Both, 1.0, 1.0, ""),
            Err(ValidationError::MissingDessertName)
        );

        let free = NewDessert::from_form("Пробник", PricingMode::Both, 0.0, 0.0, "")
            .expect("name is present");
        assert_eq!(free.price_per_kg, None);
        assert_eq!(free.price_per_unit, None);
        assert_eq!(free.require_price(), Err(ValidationError::MissingPrice));
    }

    #[test]
    fn client_validate_checks_edited_fields() {
        let mut client = NewClient::from_form("Петрова Анна", "+79169876543", None, "")
            .expect("form should validate");
        assert_eq!(client.validate(), Ok(()));

        client.phone = " \t".to_string();
        assert_eq!(client.validate(), Err(ValidationError::MissingClientFields));

        client.phone = "+79169876543".to_string();
        client.full_name.clear();
        assert_eq!(client.validate(), Err(ValidationError::MissingClientFields));
    }

    #[test]
    fn dessert_validate_checks_name_before_price() {
        let mut dessert = NewDessert {
            name: "  ".to_string(),
            price_per_kg: None,
            price_per_unit: Some(0.0),
            composition: String::new(),
        };
        assert_eq!(dessert.validate(), Err(ValidationError::MissingDessertName));

        dessert.name = "Чизкейк Нью-Йорк".to_string();
        assert_eq!(dessert.validate(), Err(ValidationError::MissingPrice));

        dessert.price_per_kg = Some(1800.0);
        assert_eq!(dessert.validate(), Ok(()));
    }

    #[test]
    fn order_compose_joins_and_pads() {
        let order = NewOrder::compose(
            Some(3),
            &["Торт \"Медовик\"", "Эклеры"],
            date(2024, 3, 1),
            time(9, 5),
            DeliveryType::Pickup,
            "",
        )
        .expect("order should compose");

        assert_eq!(order.dessert_types, "Торт \"Медовик\",Эклеры");
        assert_eq!(order.order_date, "2024-03-01");
        assert_eq!(order.order_time, "09:05");
        assert_eq!(order.dessert_names(), vec!["Торт \"Медовик\"", "Эклеры"]);
    }

    #[test]
    fn order_compose_requires_selections() {
        assert_eq!(
            NewOrder::compose(
                None,
                &["Эклеры"],
                date(2024, 3, 1),
                time(9, 0),
                DeliveryType::Delivery,
                ""
            ),
            Err(ValidationError::MissingClient)
        );
        assert_eq!(
            NewOrder::compose(
                Some(1),
                &[],
                date(2024, 3, 1),
                time(9, 0),
                DeliveryType::Delivery,
                ""
            ),
            Err(ValidationError::NoDessertSelected)
        );
    }
}
