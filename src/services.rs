//! Read access to the REST resources of the API.
//!
//! Every resource is fetched the same way: a `GET` on a fixed path, optionally
//! filtered by one query parameter, decoded as JSON. [`Service`] does that
//! once for all of them; [`Resource`] says where a record lives.

use crate::client::Client;
use crate::models::{Account, Accounts, Address, Addresses, Transaction, Transactions, UserInfo};
use crate::response::{Json, Outcome};
use log::debug;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use url::form_urlencoded;

/// A record type served by the API.
pub trait Resource {
    /// Path relative to base URL and version.
    const PATH: &'static str;

    /// What the endpoint returns, a list or a single record.
    type Output: DeserializeOwned;

    /// Number of records in a decoded output.
    fn count(_output: &Self::Output) -> usize {
        1
    }
}

/// A resource the server can filter by a single query parameter.
pub trait FilteredResource: Resource {
    const FILTER_KEY: &'static str;
}

impl Resource for Account {
    const PATH: &'static str = "cashAccounts";
    type Output = Accounts;

    fn count(output: &Accounts) -> usize {
        output.len()
    }
}

impl FilteredResource for Account {
    const FILTER_KEY: &'static str = "iban";
}

impl Resource for Address {
    const PATH: &'static str = "addresses";
    type Output = Addresses;

    fn count(output: &Addresses) -> usize {
        output.len()
    }
}

impl Resource for Transaction {
    const PATH: &'static str = "transactions";
    type Output = Transactions;

    fn count(output: &Transactions) -> usize {
        output.len()
    }
}

impl FilteredResource for Transaction {
    const FILTER_KEY: &'static str = "iban";
}

impl Resource for UserInfo {
    const PATH: &'static str = "userInfo";
    type Output = UserInfo;
}

/// Handle to one resource, borrowed from a [`Client`].
#[derive(Debug)]
pub struct Service<'c, R> {
    client: &'c Client,
    resource: PhantomData<fn() -> R>,
}

pub type AccountsService<'c> = Service<'c, Account>;
pub type AddressesService<'c> = Service<'c, Address>;
pub type TransactionsService<'c> = Service<'c, Transaction>;
pub type UserInfoService<'c> = Service<'c, UserInfo>;

impl<R> Clone for Service<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Service<'_, R> {}

impl<'c, R: Resource> Service<'c, R> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self {
            client,
            resource: PhantomData,
        }
    }

    pub fn path(&self) -> &'static str {
        R::PATH
    }

    /// Fetch everything the current user has under this resource.
    pub async fn get_all(&self) -> Outcome<R::Output> {
        debug!("Fetching all of /{}", R::PATH);
        self.fetch(R::PATH).await
    }

    async fn fetch(&self, path: &str) -> Outcome<R::Output> {
        let outcome = self
            .client
            .call(Method::GET, path, None::<&()>, Json::new())
            .await;
        if let Some(output) = outcome.value() {
            debug!("Decoded {} records from /{}", R::count(output), R::PATH);
        }
        outcome
    }
}

impl<R: FilteredResource> Service<'_, R> {
    /// Fetch the records matching `key`, e.g. an IBAN.
    ///
    /// Filtering happens on the server. A key that matches nothing owned by
    /// the current user yields an empty result, not an error.
    pub async fn get(&self, key: &str) -> Outcome<R::Output> {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(R::FILTER_KEY, key)
            .finish();
        debug!("Fetching /{} filtered by {}", R::PATH, R::FILTER_KEY);
        self.fetch(&format!("{}?{}", R::PATH, query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::models::{AddressType, Gender};
    use crate::test_support::setup;
    use reqwest::StatusCode;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    fn account(iban: &str, balance: &str) -> Account {
        Account {
            iban: Some(iban.to_string()),
            balance: Some(Decimal::from_str(balance).unwrap()),
            product_description: Some("persönliches Konto".to_string()),
        }
    }

    fn json_body(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body, "application/json")
    }

    #[tokio::test]
    async fn accounts_get_all() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/v1/cashAccounts"))
            .respond_with(json_body(
                r#"[{"iban":"DE10000000000000000453","balance":31236.95,"productDescription":"persönliches Konto"},{"iban":"DE10000000000000000454","balance":250,"productDescription":"persönliches Konto"},{"iban":"DE10000000000000000455","balance":100,"productDescription":"persönliches Konto"}]"#,
            ))
            .mount(&server)
            .await;

        let accounts = client.accounts().get_all().await.into_result().unwrap();
        assert_eq!(
            accounts,
            vec![
                account("DE10000000000000000453", "31236.95"),
                account("DE10000000000000000454", "250"),
                account("DE10000000000000000455", "100"),
            ]
        );
    }

    #[tokio::test]
    async fn accounts_get_by_iban() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/v1/cashAccounts"))
            .and(query_param("iban", "DE10000000000000000454"))
            .respond_with(json_body(
                r#"[{"iban":"DE10000000000000000454","balance":250,"productDescription":"persönliches Konto"}]"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let accounts = client
            .accounts()
            .get("DE10000000000000000454")
            .await
            .into_result()
            .unwrap();
        assert_eq!(accounts, vec![account("DE10000000000000000454", "250")]);
    }

    #[tokio::test]
    async fn filter_values_are_url_encoded() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/v1/transactions"))
            .and(query_param("iban", "DE 10&x=1"))
            .respond_with(json_body("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client.transactions().get("DE 10&x=1").await;
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn addresses_get_all() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/v1/addresses"))
            .respond_with(json_body(
                r#"[{"city":"Frankfurt","houseNumber":"19","street":"Große Bockenheimer Straße","type":"MAILING_ADDRESS","zip":"60311"},{"city":"Frankfurt","houseNumber":"19","street":"Große Bockenheimer Straße","type":"REGISTRATION_ADDRESS","zip":"60311"}]"#,
            ))
            .mount(&server)
            .await;

        let addresses = client.addresses().get_all().await.into_result().unwrap();
        let kinds: Vec<_> = addresses.iter().map(|a| a.address_type).collect();
        assert_eq!(
            kinds,
            vec![
                Some(AddressType::MailingAddress),
                Some(AddressType::RegistrationAddress)
            ]
        );
        for address in &addresses {
            assert_eq!(address.city.as_deref(), Some("Frankfurt"));
            assert_eq!(address.house_number, Some(19));
            assert_eq!(address.zip, Some(60311));
        }
    }

    #[tokio::test]
    async fn transactions_get_all() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/v1/transactions"))
            .respond_with(json_body(
                r#"[{"amount":-35.56,"counterPartyName":"Netto","usage":"POS MIT PIN. Einkauf","bookingDate":"2016-10-27"},{"amount":-1500,"counterPartyName":"Schwäbisch Hall","usage":"Ref. 58974-8765889","bookingDate":"2016-10-21"}]"#,
            ))
            .mount(&server)
            .await;

        let txns = client.transactions().get_all().await.into_result().unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].counter_party_name.as_deref(), Some("Netto"));
        assert_eq!(txns[0].amount, Some(Decimal::from_str("-35.56").unwrap()));
        assert_eq!(txns[1].amount, Some(Decimal::from(-1500)));
        assert_eq!(txns[1].booking_date.as_deref(), Some("2016-10-21"));
    }

    #[tokio::test]
    async fn transactions_unknown_iban_is_empty_not_error() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/v1/transactions"))
            .and(query_param("iban", "DE00000000000000000000"))
            .respond_with(json_body("[]"))
            .mount(&server)
            .await;

        let outcome = client.transactions().get("DE00000000000000000000").await;
        assert_eq!(outcome.status(), Some(StatusCode::OK));
        assert!(outcome.error().is_none());
        assert_eq!(outcome.into_result().unwrap(), Transactions::new());
    }

    #[tokio::test]
    async fn user_info_get_all() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/v1/userInfo"))
            .respond_with(json_body(
                r#"{"dateOfBirth":"1977-03-02","firstName":"Claudia","gender":"FEMALE","lastName":"Klar"}"#,
            ))
            .mount(&server)
            .await;

        let info = client.user_info().get_all().await.into_result().unwrap();
        assert_eq!(
            info,
            UserInfo {
                date_of_birth: Some("1977-03-02".into()),
                first_name: Some("Claudia".into()),
                last_name: Some("Klar".into()),
                gender: Some(Gender::Female),
            }
        );
    }

    #[tokio::test]
    async fn rejected_call_returns_error_and_response() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/v1/cashAccounts"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"code":401}"#))
            .mount(&server)
            .await;

        let outcome = client.accounts().get_all().await;
        assert_eq!(outcome.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(outcome.value().is_none());
        match outcome.into_result() {
            Err(DbError::Api(err)) => assert!(err.is_unauthorized()),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn counts_records_per_output() {
        assert_eq!(Account::count(&vec![Account::default(); 3]), 3);
        assert_eq!(Address::count(&Addresses::new()), 0);
        assert_eq!(Transaction::count(&vec![Transaction::default()]), 1);
        assert_eq!(UserInfo::count(&UserInfo::default()), 1);
    }

    #[test]
    fn services_know_their_paths() {
        let client = Client::new([]).unwrap();
        assert_eq!(client.accounts().path(), "cashAccounts");
        assert_eq!(client.addresses().path(), "addresses");
        assert_eq!(client.transactions().path(), "transactions");
        assert_eq!(client.user_info().path(), "userInfo");
    }
}
