//! Per-kind validation.

use intake_model::{
    Customer, EntityKind, Product, RawRecord, SaleRecord, Store, Student, fields,
};
use serde_json::Value;

use crate::clean::{
    clean_numeric, clean_string, is_valid_cpf, is_valid_email, is_valid_phone,
    is_valid_postal_code,
};
use crate::dates::parse_timestamp;

/// Outcome of validating one raw record.
///
/// `record` is `None` only when the required key was missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation<T> {
    pub record: Option<T>,
    pub errors: Vec<String>,
}

impl<T> Validation<T> {
    fn kept(record: T, errors: Vec<String>) -> Self {
        Self {
            record: Some(record),
            errors,
        }
    }

    fn rejected(errors: Vec<String>) -> Self {
        Self {
            record: None,
            errors,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validation<U> {
        Validation {
            record: self.record.map(f),
            errors: self.errors,
        }
    }
}

/// An entity that can be built from a raw record.
pub trait Validate: Sized {
    const KIND: EntityKind;

    fn validate(raw: &RawRecord) -> Validation<Self>;
}

/// A validated record of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Student(Student),
    Customer(Customer),
    Store(Store),
    Product(Product),
    Sale(SaleRecord),
}

impl Record {
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Student(_) => EntityKind::Student,
            Self::Customer(_) => EntityKind::Customer,
            Self::Store(_) => EntityKind::Store,
            Self::Product(_) => EntityKind::Product,
            Self::Sale(_) => EntityKind::Sale,
        }
    }
}

/// Validate `raw` as an entity of `kind`.
#[must_use]
pub fn validate(kind: EntityKind, raw: &RawRecord) -> Validation<Record> {
    match kind {
        EntityKind::Student => Student::validate(raw).map(Record::Student),
        EntityKind::Customer => Customer::validate(raw).map(Record::Customer),
        EntityKind::Store => Store::validate(raw).map(Record::Store),
        EntityKind::Product => Product::validate(raw).map(Record::Product),
        EntityKind::Sale => SaleRecord::validate(raw).map(Record::Sale),
    }
}

fn text(raw: &RawRecord, field: &str) -> String {
    clean_string(raw.text(field))
}

/// Clean `field` and blank it when non-empty and failing `check`.
fn checked(
    raw: &RawRecord,
    field: &str,
    check: fn(&str) -> bool,
    label: &str,
    errors: &mut Vec<String>,
) -> String {
    let value = text(raw, field);
    if !value.is_empty() && !check(&value) {
        errors.push(format!("invalid {label}: {value}"));
        return String::new();
    }
    value
}

/// Like [`checked`], but `None` when the source lacks the column.
fn checked_opt(
    raw: &RawRecord,
    field: &str,
    check: fn(&str) -> bool,
    label: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    raw.has(field)
        .then(|| checked(raw, field, check, label, errors))
}

impl Validate for Student {
    const KIND: EntityKind = EntityKind::Student;

    fn validate(raw: &RawRecord) -> Validation<Self> {
        let mut errors = Vec::new();
        let name = text(raw, fields::NAME);
        if name.is_empty() {
            errors.push("name is required".to_string());
        }
        let email = checked(raw, fields::EMAIL, is_valid_email, "email", &mut errors);
        let postal_code = checked(
            raw,
            fields::POSTAL_CODE,
            is_valid_postal_code,
            "postal code",
            &mut errors,
        );
        if name.is_empty() {
            return Validation::rejected(errors);
        }
        Validation::kept(
            Student {
                name,
                email,
                grade: text(raw, fields::GRADE),
                roll_number: text(raw, fields::ROLL_NUMBER),
                postal_code,
                street: text(raw, fields::STREET),
                district: text(raw, fields::DISTRICT),
                street_number: text(raw, fields::STREET_NUMBER),
                city: text(raw, fields::CITY),
            },
            errors,
        )
    }
}

impl Validate for Customer {
    const KIND: EntityKind = EntityKind::Customer;

    fn validate(raw: &RawRecord) -> Validation<Self> {
        let mut errors = Vec::new();
        let name = text(raw, fields::NAME);
        if name.is_empty() {
            errors.push("name is required".to_string());
        }
        let email = checked_opt(raw, fields::EMAIL, is_valid_email, "email", &mut errors);
        let cpf = checked_opt(raw, fields::CPF, is_valid_cpf, "CPF", &mut errors);
        let phone = checked_opt(raw, fields::PHONE, is_valid_phone, "phone", &mut errors);
        let address = raw
            .has(fields::ADDRESS)
            .then(|| text(raw, fields::ADDRESS));
        if name.is_empty() {
            return Validation::rejected(errors);
        }
        Validation::kept(
            Customer {
                name,
                email,
                cpf,
                phone,
                address,
            },
            errors,
        )
    }
}

impl Validate for Store {
    const KIND: EntityKind = EntityKind::Store;

    fn validate(raw: &RawRecord) -> Validation<Self> {
        let mut errors = Vec::new();
        let name = text(raw, fields::NAME);
        if name.is_empty() {
            errors.push("name is required".to_string());
            return Validation::rejected(errors);
        }
        let phone = text(raw, fields::PHONE);
        let phone = if !phone.is_empty() && !is_valid_phone(&phone) {
            errors.push(format!("invalid phone for store {name}: {phone}"));
            String::new()
        } else {
            phone
        };
        Validation::kept(
            Store {
                code: text(raw, fields::CODE),
                address: text(raw, fields::ADDRESS),
                postal_code: text(raw, fields::POSTAL_CODE),
                phone,
                region: text(raw, fields::REGION),
                district: text(raw, fields::DISTRICT),
                municipality: text(raw, fields::MUNICIPALITY),
                mesoregion: text(raw, fields::MESOREGION),
                state: text(raw, fields::STATE),
                geographic_region: text(raw, fields::GEOGRAPHIC_REGION),
                latitude: text(raw, fields::LATITUDE),
                longitude: text(raw, fields::LONGITUDE),
                name,
            },
            errors,
        )
    }
}

impl Validate for Product {
    const KIND: EntityKind = EntityKind::Product;

    /// An absent price field means "no price listed" and reads as 0.0
    /// without complaint; a present but unusable one is an error.
    fn validate(raw: &RawRecord) -> Validation<Self> {
        let mut errors = Vec::new();
        let name = text(raw, fields::NAME);
        if name.is_empty() {
            errors.push("name is required".to_string());
        }
        let price = match raw.get(fields::PRICE) {
            None => 0.0,
            Some(value) => match clean_numeric(value) {
                Some(price) if price >= 0.0 => price,
                _ => {
                    errors.push(format!("invalid price for product {name}"));
                    0.0
                }
            },
        };
        if name.is_empty() {
            return Validation::rejected(errors);
        }
        Validation::kept(
            Product {
                name,
                code: text(raw, fields::CODE),
                weight: text(raw, fields::WEIGHT),
                price,
            },
            errors,
        )
    }
}

impl Validate for SaleRecord {
    const KIND: EntityKind = EntityKind::Sale;

    fn validate(raw: &RawRecord) -> Validation<Self> {
        let mut errors = Vec::new();
        let order_id = text(raw, fields::ORDER_ID);
        if order_id.is_empty() {
            errors.push("order id is required".to_string());
            return Validation::rejected(errors);
        }

        let total_text = text(raw, fields::TOTAL);
        let total = if total_text.is_empty() {
            0.0
        } else {
            clean_numeric(&total_text).unwrap_or_else(|| {
                errors.push(format!("invalid total for order {order_id}: {total_text}"));
                0.0
            })
        };

        let items_text = raw.text(fields::ITEMS).trim();
        let (items, items_raw) = if items_text.is_empty() {
            (Vec::new(), None)
        } else {
            match serde_json::from_str::<Value>(items_text) {
                Ok(Value::Array(items)) => (items, None),
                _ => (Vec::new(), Some(items_text.to_string())),
            }
        };

        let placed_at = text(raw, fields::PLACED_AT);
        Validation::kept(
            SaleRecord {
                date: parse_timestamp(&placed_at),
                placed_at,
                student_room: text(raw, fields::STUDENT_ROOM),
                student_name: text(raw, fields::STUDENT_NAME),
                student_email: text(raw, fields::STUDENT_EMAIL),
                customer_name: text(raw, fields::CUSTOMER_NAME),
                customer_email: text(raw, fields::CUSTOMER_EMAIL),
                customer_cpf: text(raw, fields::CUSTOMER_CPF),
                customer_phone: text(raw, fields::CUSTOMER_PHONE),
                delivery_type: text(raw, fields::DELIVERY_TYPE),
                pickup_store: text(raw, fields::PICKUP_STORE),
                pickup_store_address: text(raw, fields::PICKUP_STORE_ADDRESS),
                delivery_address: text(raw, fields::DELIVERY_ADDRESS),
                delivery_date: text(raw, fields::DELIVERY_DATE),
                delivery_condition: text(raw, fields::DELIVERY_CONDITION),
                payment_method: text(raw, fields::PAYMENT_METHOD),
                items,
                items_raw,
                total,
                notes: text(raw, fields::NOTES),
                order_id,
            },
            errors,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(name: &str, email: &str) -> RawRecord {
        RawRecord::new()
            .with(fields::NAME, name)
            .with(fields::EMAIL, email)
    }

    #[test]
    fn invalid_student_email_is_blanked_and_reported() {
        let result = Student::validate(&student("Ana Costa", "not-an-email"));
        let kept = result.record.expect("record kept");
        assert_eq!(kept.email, "");
        assert_eq!(result.errors, vec!["invalid email: not-an-email"]);
    }

    #[test]
    fn student_without_name_is_dropped() {
        let result = Student::validate(&student("   ", "ana@escola.edu.br"));
        assert!(result.record.is_none());
        assert_eq!(result.errors, vec!["name is required"]);
    }

    #[test]
    fn valid_postal_code_keeps_its_punctuation() {
        let raw = student("Ana", "").with(fields::POSTAL_CODE, " 01234-567 ");
        let kept = Student::validate(&raw).record.expect("record kept");
        assert_eq!(kept.postal_code, "01234-567");
    }

    #[test]
    fn customer_fields_track_column_presence() {
        let raw = RawRecord::new()
            .with(fields::NAME, "Ana")
            .with(fields::CPF, "123")
            .with(fields::PHONE, "");
        let result = Customer::validate(&raw);
        let kept = result.record.expect("record kept");
        assert_eq!(kept.email, None);
        assert_eq!(kept.cpf.as_deref(), Some(""));
        assert_eq!(kept.phone.as_deref(), Some(""));
        assert_eq!(kept.address, None);
        assert_eq!(result.errors, vec!["invalid CPF: 123"]);
    }

    #[test]
    fn product_price_uses_decimal_comma() {
        let raw = RawRecord::new()
            .with(fields::NAME, "Pizza Margherita")
            .with(fields::CODE, "X1")
            .with(fields::PRICE, "12,50");
        let result = Product::validate(&raw);
        assert_eq!(result.record.map(|p| p.price), Some(12.5));
        assert!(result.errors.is_empty());
    }

    #[test]
    fn product_without_price_field_costs_zero_silently() {
        let raw = RawRecord::new().with(fields::NAME, "Pizza");
        let result = Product::validate(&raw);
        assert_eq!(result.record.map(|p| p.price), Some(0.0));
        assert!(result.errors.is_empty());
    }

    #[test]
    fn negative_or_blank_price_is_an_error() {
        for price in ["-4", "", "grátis"] {
            let raw = RawRecord::new()
                .with(fields::NAME, "Pizza")
                .with(fields::PRICE, price);
            let result = Product::validate(&raw);
            assert_eq!(result.record.map(|p| p.price), Some(0.0), "price {price:?}");
            assert_eq!(result.errors, vec!["invalid price for product Pizza"]);
        }
    }

    #[test]
    fn store_phone_error_names_the_store() {
        let raw = RawRecord::new()
            .with(fields::NAME, "Loja Centro")
            .with(fields::PHONE, "123");
        let result = Store::validate(&raw);
        assert_eq!(result.record.map(|s| s.phone), Some(String::new()));
        assert_eq!(result.errors, vec!["invalid phone for store Loja Centro: 123"]);
    }

    #[test]
    fn sale_items_fall_back_to_raw_text() {
        let raw = RawRecord::new()
            .with(fields::ORDER_ID, "A1B2C3D4")
            .with(fields::PLACED_AT, "2025-01-01 10:00:00")
            .with(fields::ITEMS, "2x pizza")
            .with(fields::TOTAL, "65.00");
        let result = SaleRecord::validate(&raw);
        let sale = result.record.expect("sale kept");
        assert!(sale.items.is_empty());
        assert_eq!(sale.items_raw.as_deref(), Some("2x pizza"));
        assert_eq!(sale.total, 65.0);
        assert!(sale.date.is_some());
    }

    #[test]
    fn sale_without_order_id_is_dropped() {
        let raw = RawRecord::new().with(fields::STUDENT_NAME, "Ana");
        let result = SaleRecord::validate(&raw);
        assert!(result.record.is_none());
    }

    #[test]
    fn dispatch_matches_kind() {
        let raw = student("Ana", "ana@escola.edu.br");
        for kind in EntityKind::ALL {
            let result = validate(kind, &raw);
            if let Some(record) = result.record {
                assert_eq!(record.kind(), kind);
            }
        }
        assert!(validate(EntityKind::Sale, &raw).record.is_none());
    }
}
