#![allow(dead_code)]

use satim::SatimClient;
use satim::application::client::{Credentials, TEST_ENDPOINT};
use satim::domain::order::OrderDetails;
use satim::domain::ports::HttpBackendBox;
use satim::infrastructure::in_memory::InMemoryBackend;
use std::collections::BTreeMap;
use url::Url;

pub const USERNAME: &str = "SAT2201000001";
pub const PASSWORD: &str = "satim120";
pub const TERMINAL_ID: &str = "E010901571";

pub fn client_with(backend: &InMemoryBackend) -> SatimClient {
    client_over(Box::new(backend.clone()))
}

pub fn client_over(backend: HttpBackendBox) -> SatimClient {
    SatimClient::with_backend(
        Credentials::new(USERNAME, PASSWORD, TERMINAL_ID),
        TEST_ENDPOINT,
        backend,
    )
    .expect("test endpoint is a valid URL")
}

pub fn valid_order(client: &SatimClient, order_number: &str) -> OrderDetails {
    let draft = client.new_order();
    draft
        .with_order_number(order_number)
        .with_amount(10000)
        .with_return_url("https://shop.example/return")
        .with_fail_url("https://shop.example/fail");
    draft
        .generate_order_details()
        .expect("draft satisfies every rule")
}

pub fn query_of(url: &Url) -> BTreeMap<String, String> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
