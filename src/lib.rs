//! Rust client for the Deutsche Bank sandbox REST API.
//!
//! Wraps the read-only `cashAccounts`, `addresses`, `transactions` and
//! `userInfo` endpoints and decodes their JSON into typed records. The
//! client only carries a bearer token; obtaining one through the OAuth2
//! flow is left to the caller.
//!
//! ```no_run
//! # async fn run() -> Result<(), dbapi::DbError> {
//! let client = dbapi::Client::new([dbapi::set_token("1234567890abcdefghijklmnopqrstuvwxyz")])?;
//! let accounts = client.accounts().get_all().await.into_result()?;
//! for account in &accounts {
//!     println!("{:?} {:?}", account.iban, account.balance);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod options;
pub mod response;
pub mod services;

#[cfg(test)]
mod test_support;

pub use auth::Authentication;
pub use client::{Client, USER_AGENT, check_response};
pub use error::{ApiError, DbError};
pub use models::{
    Account, Accounts, Address, AddressType, Addresses, Gender, Transaction, Transactions,
    UserInfo,
};
pub use options::{
    ClientOption, DEFAULT_URL, DEFAULT_VERSION, Version, set_token, set_transport, set_url,
    set_version,
};
pub use response::{Destination, Discard, Json, Outcome, Raw, Response};
pub use services::{
    AccountsService, AddressesService, FilteredResource, Resource, Service, TransactionsService,
    UserInfoService,
};
