#![cfg(feature = "http")]

use http::{HeaderName, HeaderValue};
use proxy_chain::TrustStore;
use rstest::*;
use serde::Deserialize;
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct ConfigJson {
    trusted: Option<Vec<String>>,
    #[serde(default)]
    empty: bool,
}

#[derive(Debug, Deserialize)]
struct Expected {
    ip: Option<IpAddr>,
    hops: Vec<String>,
}

#[rstest]
fn fixture(
    #[files("**/*.test")]
    #[base_dir = "tests/fixtures"]
    path: PathBuf,
) {
    let content = std::fs::read_to_string(&path).unwrap();
    let split = content
        .split("-----------------------\n")
        .collect::<Vec<&str>>();

    let ip_addr_str = split.first().expect("no ip address");
    let plain_http_request = split.get(1).expect("no plain http request");
    let config_str = split.get(2).expect("no config");
    let expected_str = split.get(3).expect("no expected");

    let mut headers = [httparse::EMPTY_HEADER; 64];
    let mut parsed_request = httparse::Request::new(&mut headers);

    parsed_request.parse(plain_http_request.as_bytes()).unwrap();

    let mut request = http::Request::new(());

    for header in parsed_request.headers.iter() {
        let header_name = HeaderName::from_bytes(header.name.as_bytes()).unwrap();
        let header_value = HeaderValue::from_bytes(header.value).unwrap();

        request.headers_mut().append(header_name, header_value);
    }

    let ip_addr = ip_addr_str.trim().parse::<IpAddr>().unwrap();
    let config_json = serde_json::from_str::<ConfigJson>(config_str).unwrap();
    let expected =
        serde_json::from_str::<Expected>(expected_str).expect("failed to parse expected");

    let mut store = if config_json.empty {
        TrustStore::new()
    } else {
        TrustStore::new_local()
    };

    for spec in config_json.trusted.unwrap_or_default() {
        store.add_trusted(&spec).unwrap();
    }

    let chain = store.evaluator().evaluate_request(ip_addr, &request);

    assert_eq!(chain.client_ip(), expected.ip, "{}", path.display());
    assert_eq!(
        chain.hops().map(|hop| hop.to_string()).collect::<Vec<_>>(),
        expected.hops,
        "{}",
        path.display()
    );
}
