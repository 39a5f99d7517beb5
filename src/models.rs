use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A cash account of the current user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub iban: Option<String>,
    pub balance: Option<Decimal>,
    #[serde(rename = "productDescription")]
    pub product_description: Option<String>,
}

pub type Accounts = Vec<Account>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressType {
    MailingAddress,
    RegistrationAddress,
    #[serde(other)]
    Unknown,
}

/// A postal address of the current user.
///
/// Users usually have one `MAILING_ADDRESS` and one `REGISTRATION_ADDRESS`,
/// which are often identical.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    #[serde(
        rename = "houseNumber",
        default,
        deserialize_with = "deserialize_numeric_opt"
    )]
    pub house_number: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_numeric_opt")]
    pub zip: Option<i64>,
    pub city: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "type")]
    pub address_type: Option<AddressType>,
}

pub type Addresses = Vec<Address>;

/// A booking on one of the user's accounts.
///
/// A positive amount is money received, a negative amount money spent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Option<Decimal>,
    #[serde(rename = "counterPartyName")]
    pub counter_party_name: Option<String>,
    #[serde(rename = "counterPartyIban")]
    pub counter_party_iban: Option<String>,
    pub usage: Option<String>,
    #[serde(rename = "bookingDate", alias = "date")]
    pub booking_date: Option<String>,
    #[serde(rename = "originIban")]
    pub origin_iban: Option<String>,
}

pub type Transactions = Vec<Transaction>;

impl Transaction {
    pub fn is_inflow(&self) -> bool {
        self.amount.is_some_and(|amount| amount.is_sign_positive() && !amount.is_zero())
    }

    /// Booking date as a calendar date, if it is in `YYYY-MM-DD` form.
    pub fn booked_on(&self) -> Option<NaiveDate> {
        self.booking_date.as_deref().and_then(parse_date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    #[serde(other)]
    Unknown,
}

/// Personal information about the current user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
}

impl UserInfo {
    pub fn born_on(&self) -> Option<NaiveDate> {
        self.date_of_birth.as_deref().and_then(parse_date)
    }
}

// Numbers arrive either as JSON numbers or as numeric strings ("19").
fn deserialize_numeric_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid numeric string {s:?}"))),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom("number out of range")),
        Some(other) => Err(D::Error::custom(format!(
            "expected number or numeric string, got {other}"
        ))),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.get(0..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}
