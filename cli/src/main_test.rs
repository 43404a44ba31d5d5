use super::*;

fn context(token: Option<&str>, dir: &tempfile::TempDir) -> CliContext {
    CliContext {
        api: ApiClient::default_client().unwrap(),
        store: TokenStore::new(FileStorage::new(dir.path().join("token.json"))),
        token: token.map(ToOwned::to_owned),
    }
}

#[test]
fn parse_key_value_splits_on_first_equals() {
    assert_eq!(parse_key_value("a=b=c").unwrap(), ("a".to_owned(), "b=c".to_owned()));
    assert_eq!(parse_key_value("note=").unwrap(), ("note".to_owned(), String::new()));
}

#[test]
fn parse_key_value_rejects_malformed_input() {
    assert!(parse_key_value("novalue").is_err());
    assert!(parse_key_value("=x").is_err());
}

#[test]
fn upload_contents_prefers_json_when_given() {
    let contents = upload_contents(None, Some(r#"{"a":1}"#)).unwrap();
    assert_eq!(contents.into_wire(), r#"{"a":1}"#);
}

#[test]
fn upload_contents_rejects_invalid_json() {
    assert!(matches!(upload_contents(None, Some("{nope")), Err(CliError::InvalidJson(_))));
}

#[test]
fn upload_contents_keeps_text() {
    let contents = upload_contents(Some("raw text".to_owned()), None).unwrap();
    assert_eq!(contents.into_wire(), "raw text");
}

#[test]
fn resolve_token_prefers_flag() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(Some("flag"), &dir);
    ctx.store.set_stored_token("stored").unwrap();
    assert_eq!(resolve_token(&ctx).unwrap(), "flag");
}

#[test]
fn resolve_token_falls_back_to_store() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(Some(""), &dir);
    ctx.store.set_stored_token("stored").unwrap();
    assert_eq!(resolve_token(&ctx).unwrap(), "stored");
}

#[test]
fn resolve_token_errors_when_nothing_available() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(None, &dir);
    assert!(matches!(resolve_token(&ctx), Err(CliError::MissingToken)));
}

#[test]
fn cli_parses_mfa_action_params() {
    let cli = Cli::try_parse_from([
        "ym-cli", "mfa", "action", "customAction", "--param", "a=1", "--param", "b=two",
    ])
    .unwrap();
    let Command::Mfa(MfaCommand { command: MfaSubcommand::Action { action, params } }) = cli.command else {
        panic!("expected mfa action");
    };
    assert_eq!(action, "customAction");
    assert_eq!(params, [("a".to_owned(), "1".to_owned()), ("b".to_owned(), "two".to_owned())]);
}

#[test]
fn cli_upload_requires_contents_or_json() {
    assert!(Cli::try_parse_from(["ym-cli", "text-file", "upload", "ivr2:/a.txt"]).is_err());
    assert!(
        Cli::try_parse_from(["ym-cli", "text-file", "upload", "ivr2:/a.txt", "--contents", "x", "--json", "1"]).is_err()
    );
}

#[test]
fn cli_mfa_send_defaults_lang() {
    let cli = Cli::try_parse_from(["ym-cli", "mfa", "send", "--mfa-id", "7", "--send-type", "SMS"]).unwrap();
    let Command::Mfa(MfaCommand { command: MfaSubcommand::Send { lang, auto_otp_hostname, .. } }) = cli.command else {
        panic!("expected mfa send");
    };
    assert_eq!(lang, "HE");
    assert_eq!(auto_otp_hostname, None);
}

#[test]
fn logout_clears_stored_token() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(None, &dir);
    ctx.store.set_stored_token("stored").unwrap();
    run_logout(&ctx).unwrap();
    assert_eq!(ctx.store.get_stored_token().unwrap(), "");
    assert!(matches!(resolve_token(&ctx), Err(CliError::MissingToken)));
}

#[test]
fn logout_recovers_from_damaged_token_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("token.json"), r#"{"apiToken": "ab"#).unwrap();
    let ctx = context(None, &dir);
    run_logout(&ctx).unwrap();
    assert_eq!(ctx.store.get_stored_token().unwrap(), "");
}
