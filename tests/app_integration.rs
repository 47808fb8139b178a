use std::fs;
use tripspend::core::LedgerError;

mod test_utils {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const RATE_KEY: &str = "rate-key";

    pub async fn create_rates_mock_server(home: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/v6/{RATE_KEY}/latest/{home}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;
        mock_server
    }

    pub async fn create_sheets_mock_server(daily: &str, one_off: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        for (sheet, body) in [("Daily", daily), ("OneOff", one_off)] {
            Mock::given(method("GET"))
                .and(path(format!("/v2/sheets/{sheet}")))
                .and(header("X-Spreadsheet-Id", "sheet-123"))
                .respond_with(ResponseTemplate::new(200).set_body_string(body))
                .mount(&mock_server)
                .await;
        }
        mock_server
    }

    pub fn write_config(rates_uri: &str, sheets_uri: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
home_currency: "GBP"
providers:
  exchange_rate:
    base_url: {rates_uri}
    api_key: {RATE_KEY}
  sheetson:
    base_url: {sheets_uri}
    spreadsheet_id: "sheet-123"
    api_key: "sheet-key"
"#
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }
}

fn daily_rows() -> String {
    let today = chrono::Local::now().date_naive();
    format!(
        r#"{{"results": [
            {{"id": 1, "country": "FR", "date": "2025-06-01", "total": 10}},
            {{"id": 2, "country": "FR", "date": "2025-06-02", "total": 20}},
            {{"id": 3, "country": "JP", "date": "{today}", "total": 1000}}
        ]}}"#
    )
}

const ONE_OFF_ROWS: &str = r#"{"results": [{"country": "FR", "total": 117}]}"#;

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let rates = test_utils::create_rates_mock_server(
        "GBP",
        r#"{"result": "success", "conversion_rates": {"GBP": 1, "EUR": 1.17, "JPY": 190.0}}"#,
    )
    .await;
    let sheets = test_utils::create_sheets_mock_server(&daily_rows(), ONE_OFF_ROWS).await;
    let config_file = test_utils::write_config(&rates.uri(), &sheets.uri());
    let config_path = config_file.path().to_str().unwrap();

    let result =
        tripspend::run_command(tripspend::AppCommand::Summary { json: false }, Some(config_path))
            .await;
    assert!(result.is_ok(), "Summary failed with: {:?}", result.err());

    let result =
        tripspend::run_command(tripspend::AppCommand::Summary { json: true }, Some(config_path))
            .await;
    assert!(result.is_ok(), "JSON summary failed with: {:?}", result.err());

    let result = tripspend::run_command(tripspend::AppCommand::Recent, Some(config_path)).await;
    assert!(result.is_ok(), "Recent failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_missing_currency_aborts_summary() {
    let rates = test_utils::create_rates_mock_server(
        "GBP",
        r#"{"result": "success", "conversion_rates": {"GBP": 1, "EUR": 1.17}}"#,
    )
    .await;
    let sheets = test_utils::create_sheets_mock_server(&daily_rows(), ONE_OFF_ROWS).await;
    let config_file = test_utils::write_config(&rates.uri(), &sheets.uri());

    let err = tripspend::run_command(
        tripspend::AppCommand::Summary { json: false },
        Some(config_file.path().to_str().unwrap()),
    )
    .await
    .unwrap_err();

    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::MissingCurrency(vec!["JPY".to_string()]))
    );
}

#[test_log::test(tokio::test)]
async fn test_country_lookup_with_custom_dataset() {
    let countries = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(
        countries.path(),
        r#"[{"countryCode": "XK", "currencyCode": "EUR", "countryName": "Kosovo"}]"#,
    )
    .expect("Failed to write countries file");

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
home_currency: "GBP"
countries_path: "{}"
providers:
  exchange_rate:
    api_key: "unused"
  sheetson:
    spreadsheet_id: "unused"
    api_key: "unused"
"#,
        countries.path().display()
    );
    fs::write(config_file.path(), config_content).expect("Failed to write config file");
    let config_path = config_file.path().to_str().unwrap();

    let result = tripspend::run_command(
        tripspend::AppCommand::Country {
            code: "XK".to_string(),
        },
        Some(config_path),
    )
    .await;
    assert!(result.is_ok(), "Country lookup failed with: {:?}", result.err());

    let err = tripspend::run_command(
        tripspend::AppCommand::Country {
            code: "FR".to_string(),
        },
        Some(config_path),
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("FR"));
}
