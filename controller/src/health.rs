use crate::error::{
    FetchError,
    PollError,
    SchemaError,
};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Only this entry of the health `data` array carries the WAN numbers.
const WAN_ENTRY: usize = 2;

const LATENCY: &str = "latency";
const UPLOAD: &str = "tx_bytes-r";
const DOWNLOAD: &str = "rx_bytes-r";

/// One reading of the controller's health endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub latency_ms: f64,
    /// Bytes per second.
    pub upload_bps: f64,
    /// Bytes per second.
    pub download_bps: f64,
}

/// Queries the health resource and decodes it into a [`Sample`].
pub async fn fetch(http: &reqwest::Client, url: Url, timeout: Duration) -> Result<Sample, PollError> {
    trace!(%url, "querying health");
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|err| FetchError::from_reqwest(err, timeout))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status).into());
    }

    let body = response
        .text()
        .await
        .map_err(|err| FetchError::from_reqwest(err, timeout))?;
    parse_health(&body)
}

/// Expects `{"data": [_, _, {"latency": n, "tx_bytes-r": n, "rx_bytes-r": n, ...}, ...]}`.
pub fn parse_health(body: &str) -> Result<Sample, PollError> {
    let document: Value = serde_json::from_str(body)?;

    let data = document
        .get("data")
        .ok_or(SchemaError::MissingData)?
        .as_array()
        .ok_or(SchemaError::NotAnArray)?;
    let entry = data
        .get(WAN_ENTRY)
        .ok_or(SchemaError::TooShort { len: data.len() })?;

    Ok(Sample {
        latency_ms: number(entry, LATENCY)?,
        upload_bps: number(entry, UPLOAD)?,
        download_bps: number(entry, DOWNLOAD)?,
    })
}

fn number(entry: &Value, field: &'static str) -> Result<f64, SchemaError> {
    match entry.get(field) {
        None | Some(Value::Null) => Err(SchemaError::MissingField(field)),
        Some(value) => value.as_f64().ok_or(SchemaError::NotNumeric(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schema_error(body: &str) -> SchemaError {
        match parse_health(body) {
            Err(PollError::Schema(err)) => err,
            other => panic!("expected a schema error, got {other:?}"),
        }
    }

    #[test]
    fn reads_the_third_entry() {
        let body = r#"{
            "meta": {"rc": "ok"},
            "data": [
                {"subsystem": "wlan"},
                {"subsystem": "lan", "tx_bytes-r": 1},
                {"subsystem": "wan", "latency": 12, "tx_bytes-r": 2097152, "rx_bytes-r": 1048576.5},
                {"subsystem": "www"}
            ]
        }"#;
        let sample = parse_health(body).unwrap();
        assert_eq!(
            sample,
            Sample {
                latency_ms: 12.0,
                upload_bps: 2_097_152.0,
                download_bps: 1_048_576.5,
            }
        );
    }

    #[test]
    fn non_json_is_a_parse_error() {
        assert!(matches!(parse_health("<html>502</html>"), Err(PollError::Parse(_))));
        assert!(matches!(parse_health(""), Err(PollError::Parse(_))));
    }

    #[test]
    fn data_shape_is_validated() {
        assert_eq!(schema_error(r#"{"meta": {}}"#), SchemaError::MissingData);
        assert_eq!(schema_error(r#"[1, 2, 3]"#), SchemaError::MissingData);
        assert_eq!(schema_error(r#"{"data": {"latency": 1}}"#), SchemaError::NotAnArray);
        assert_eq!(schema_error(r#"{"data": [{}, {}]}"#), SchemaError::TooShort { len: 2 });
        assert_eq!(schema_error(r#"{"data": []}"#), SchemaError::TooShort { len: 0 });
    }

    #[test]
    fn fields_are_validated() {
        assert_eq!(
            schema_error(r#"{"data": [{}, {}, {"latency": 1, "rx_bytes-r": 2}]}"#),
            SchemaError::MissingField(UPLOAD)
        );
        assert_eq!(
            schema_error(r#"{"data": [{}, {}, {"latency": null, "tx_bytes-r": 1, "rx_bytes-r": 2}]}"#),
            SchemaError::MissingField(LATENCY)
        );
        assert_eq!(
            schema_error(r#"{"data": [{}, {}, {"latency": 1, "tx_bytes-r": 1, "rx_bytes-r": "2"}]}"#),
            SchemaError::NotNumeric(DOWNLOAD)
        );
        assert_eq!(schema_error(r#"{"data": [{}, {}, "wan"]}"#), SchemaError::MissingField(LATENCY));
    }
}
