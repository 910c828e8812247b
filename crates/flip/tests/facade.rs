use flip::domain::config::ApiConfig;
use flip::strategy::builtin::{CLIENT_FILTER, RELEASE_DATE, SERVER_FILTER};

#[test]
fn catalog_exposes_builtins() {
    let catalog = flip::catalog();
    for name in [CLIENT_FILTER, SERVER_FILTER, RELEASE_DATE] {
        assert!(catalog.contains(name), "{name} missing");
    }
}

#[test]
fn codec_honours_namespace_config() {
    let mut config = ApiConfig::default();
    config.strategy.allowed_namespaces = vec!["acme.".to_owned()];

    let doc = format!(
        r#"{{"uid":"F1","flippingStrategy":{{"classType":"{CLIENT_FILTER}","initParams":{{"grantedClients":"pc1"}}}}}}"#
    );
    assert!(flip::codec(&ApiConfig::default()).parse_feature(&doc).is_ok());
    assert!(flip::codec(&config).parse_feature(&doc).is_err());
}

#[test]
fn server_flag_matches_build() {
    assert_eq!(flip::is_enabled("server"), cfg!(feature = "server"));
}
