use super::*;

#[test]
fn records_accept_numbers_strings_and_nulls() {
    let json = r#"{
        "success": true,
        "result": { "records": [
            { "din_instante": "2024-05-01T10:00:00", "val_geracao_hidraulica": 1200.5,
              "val_geracao_termica": "300,25", "val_geracao_nuclear": null, "val_geracao_solar": "x" }
        ] }
    }"#;
    let envelope: Envelope<GenerationRecord> = serde_json::from_str(json).unwrap();
    let rows = envelope.result.unwrap().records;
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert!((row.val_geracao_hidraulica - 1200.5).abs() < 1e-9);
    assert!((row.val_geracao_termica - 300.25).abs() < 1e-9);
    assert!(row.val_geracao_nuclear.abs() < f64::EPSILON);
    assert!(row.val_geracao_solar.abs() < f64::EPSILON);
    assert!(row.val_geracao_eolica.abs() < f64::EPSILON);
}

#[test]
fn missing_records_and_success_flag() {
    let envelope: Envelope<LoadRecord> = serde_json::from_str(r#"{ "result": {} }"#).unwrap();
    assert!(envelope.success);
    assert!(envelope.result.unwrap().records.is_empty());

    let rejected: Envelope<LoadRecord> = serde_json::from_str(r#"{ "success": false, "error": {} }"#).unwrap();
    assert!(!rejected.success);
    assert!(rejected.result.is_none());
}

#[test]
fn retryable_errors() {
    assert!(OnsError::ApiRequest("timeout".into()).retryable());
    assert!(OnsError::ApiResponse { status: 503, body: String::new() }.retryable());
    assert!(!OnsError::ApiResponse { status: 404, body: String::new() }.retryable());
    assert!(!OnsError::NoValidData.retryable());
}
