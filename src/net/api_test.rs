use super::*;

#[test]
fn login_path_encodes_credentials() {
    let path = endpoint_path(Endpoint::Login, &login_params("user1", "p@ss"));
    assert_eq!(path, "Login?username=user1&password=p%40ss");
}

#[test]
fn token_params_encode_token() {
    assert_eq!(token_params("a b&c").encode(), "token=a%20b%26c");
}

#[test]
fn mfa_params_put_token_then_action_first() {
    let extra = QueryParams::new().with("mfaCode", "1");
    let query = mfa_params("t", &MfaAction::Validate, &extra);
    assert_eq!(query.encode(), "token=t&action=validMFA&mfaCode=1");
}

#[test]
fn mfa_params_drop_absent_custom_values() {
    let extra: QueryParams = [("a", Some("1")), ("b", None), ("c", None)].into_iter().collect();
    let query = mfa_params("t", &MfaAction::from("customAction"), &extra);
    assert_eq!(query.encode(), "token=t&action=customAction&a=1");
}

#[test]
fn mfa_params_encode_custom_action() {
    let query = mfa_params("t", &MfaAction::Custom("a&b".to_owned()), &QueryParams::new());
    assert_eq!(query.encode(), "token=t&action=a%26b");
}

#[test]
fn url_joins_base_and_path() {
    let client = ApiClient::with_http(ApiConfig::with_base_url("http://localhost:1/ym/api/"), reqwest::Client::new());
    assert_eq!(client.base_url(), "http://localhost:1/ym/api");
    assert_eq!(client.url("GetSession?token=t"), "http://localhost:1/ym/api/GetSession?token=t");
}

#[test]
fn new_applies_default_base_url() {
    let client = ApiClient::default_client().unwrap();
    assert_eq!(client.base_url(), crate::config::DEFAULT_BASE_URL);
}
