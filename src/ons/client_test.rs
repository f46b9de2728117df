use super::*;
use time::macros::datetime;

#[test]
fn since_is_lookback_before_now_in_utc() {
    let now = datetime!(2024-05-02 09:30:15 UTC);
    assert_eq!(since_timestamp(now, 24).unwrap(), "2024-05-01T09:30:15");
    assert_eq!(since_timestamp(now, 0).unwrap(), "2024-05-02T09:30:15");
}

#[test]
fn huge_lookback_is_an_error_not_a_panic() {
    let now = datetime!(2024-05-02 09:30:15 UTC);
    for hours in [10_000_000_000, u64::MAX] {
        let err = since_timestamp(now, hours).unwrap_err();
        assert!(matches!(err, OnsError::LookbackOutOfRange { hours: h } if h == hours));
        assert!(!err.retryable());
    }
}

#[tokio::test]
async fn huge_lookback_fails_fetch_before_any_request() {
    let config = OnsConfig {
        base_url: "http://127.0.0.1:9/api".into(),
        lookback_hours: u64::MAX,
        ..OnsConfig::default()
    };
    let client = OnsClient::new(config).unwrap();
    let err = client.fetch_sin_data().await.unwrap_err();
    assert!(matches!(err, OnsError::LookbackOutOfRange { .. }), "{err:?}");
}

#[test]
fn sql_for_plain_and_submarket_queries() {
    assert_eq!(
        build_sql(LOAD_RESOURCE, "2024-05-01T00:00:00", None),
        "SELECT * from \"72a8da6c-67b1-4d37-8588-a734a7a1343a\" WHERE din_instante >= '2024-05-01T00:00:00' \
         ORDER BY din_instante ASC"
    );
    let price = build_sql(PRICE_RESOURCE, "2024-05-01T00:00:00", Some("SE"));
    assert!(price.contains("AND id_submercado = 'SE' ORDER BY"));
    assert!(price.contains(PRICE_RESOURCE));
}

#[test]
fn parse_records_reads_result_rows() {
    let json = serde_json::json!({
        "success": true,
        "result": { "records": [
            { "din_instante": "2024-05-01T10:00:00", "val_pld": 61.07, "id_submercado": "SE" }
        ] }
    })
    .to_string();
    let rows: Vec<PriceRecord> = parse_records(PRICE_RESOURCE, &json).unwrap();
    assert_eq!(rows.len(), 1);
    assert!((rows[0].val_pld - 61.07).abs() < 1e-9);
}

#[test]
fn parse_records_rejects_failed_query_and_bad_json() {
    let err = parse_records::<LoadRecord>(LOAD_RESOURCE, r#"{ "success": false }"#).unwrap_err();
    assert!(matches!(err, OnsError::QueryRejected { resource } if resource == LOAD_RESOURCE));

    let err = parse_records::<LoadRecord>(LOAD_RESOURCE, "<html>busy</html>").unwrap_err();
    assert!(matches!(err, OnsError::ApiParse(_)));
}

#[tokio::test]
async fn unreachable_portal_is_a_request_error() {
    let config = OnsConfig {
        base_url: "http://127.0.0.1:9/api".into(),
        timeouts: crate::ons::config::OnsTimeouts { request_secs: 2, connect_secs: 1 },
        ..OnsConfig::default()
    };
    let client = OnsClient::new(config).unwrap();
    let err = client.fetch_sin_data().await.unwrap_err();
    assert!(matches!(err, OnsError::ApiRequest(_)), "{err:?}");
}
