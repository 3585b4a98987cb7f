//! Canonical field names.
//!
//! Source layouts map spreadsheet headers onto these names so that the
//! validator never sees a raw header string.

pub const NAME: &str = "name";
pub const EMAIL: &str = "email";

// Students
pub const GRADE: &str = "grade";
pub const ROLL_NUMBER: &str = "roll_number";
pub const POSTAL_CODE: &str = "postal_code";
pub const STREET: &str = "street";
pub const DISTRICT: &str = "district";
pub const STREET_NUMBER: &str = "street_number";
pub const CITY: &str = "city";

// Customers
pub const CPF: &str = "cpf";
pub const PHONE: &str = "phone";
pub const ADDRESS: &str = "address";

// Stores
pub const CODE: &str = "code";
pub const REGION: &str = "region";
pub const MUNICIPALITY: &str = "municipality";
pub const MESOREGION: &str = "mesoregion";
pub const STATE: &str = "state";
pub const GEOGRAPHIC_REGION: &str = "geographic_region";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

// Products and prices
pub const WEIGHT: &str = "weight";
pub const PRICE: &str = "price";

// Sales log
pub const ORDER_ID: &str = "order_id";
pub const PLACED_AT: &str = "placed_at";
pub const STUDENT_ROOM: &str = "student_room";
pub const STUDENT_NAME: &str = "student_name";
pub const STUDENT_EMAIL: &str = "student_email";
pub const CUSTOMER_NAME: &str = "customer_name";
pub const CUSTOMER_EMAIL: &str = "customer_email";
pub const CUSTOMER_CPF: &str = "customer_cpf";
pub const CUSTOMER_PHONE: &str = "customer_phone";
pub const DELIVERY_TYPE: &str = "delivery_type";
pub const PICKUP_STORE: &str = "pickup_store";
pub const PICKUP_STORE_ADDRESS: &str = "pickup_store_address";
pub const DELIVERY_ADDRESS: &str = "delivery_address";
pub const DELIVERY_DATE: &str = "delivery_date";
pub const DELIVERY_CONDITION: &str = "delivery_condition";
pub const PAYMENT_METHOD: &str = "payment_method";
pub const ITEMS: &str = "items";
pub const TOTAL: &str = "total";
pub const NOTES: &str = "notes";
