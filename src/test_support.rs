use crate::client::Client;
use crate::options::{set_token, set_url};
use wiremock::MockServer;

pub(crate) const TEST_ACCESS_TOKEN: &str = "1234567890abcdefghijklmnopqrstuvwxyz";

/// Starts a mock server and a client that talks to it.
pub(crate) async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = Client::new([set_token(TEST_ACCESS_TOKEN), set_url(server.uri())])
        .expect("client should build against mock server");
    (server, client)
}
