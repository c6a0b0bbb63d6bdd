use serde::Deserialize;
use serde_json::{Map, Value};

use super::Protocol;
use crate::error::{Error, Result};

/// One OpenTSDB JSON data point. Only the shape is checked here; value
/// typing is left to the server.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct DataPoint {
    metric: String,
    timestamp: Value,
    value: Value,
    tags: Map<String, Value>,
}

/// Turns a raw payload into the line list handed to the driver.
pub(crate) fn prepare(payload: &str, protocol: Protocol) -> Result<Vec<String>> {
    let invalid = |reason: String| Error::Payload {
        protocol: protocol.name(),
        reason,
    };

    if payload.trim().is_empty() {
        return Err(invalid("payload is empty".into()));
    }

    match protocol {
        Protocol::OpenTsdbJson => {
            let value: Value =
                serde_json::from_str(payload).map_err(|err| invalid(err.to_string()))?;
            let points = match value {
                Value::Array(points) if points.is_empty() => {
                    return Err(invalid("no data points".into()))
                }
                Value::Array(points) => points,
                point @ Value::Object(_) => vec![point],
                _ => return Err(invalid("expected an object or an array of objects".into())),
            };
            for point in points {
                let point: DataPoint =
                    serde_json::from_value(point).map_err(|err| invalid(err.to_string()))?;
                if point.metric.is_empty() {
                    return Err(invalid("metric name is empty".into()));
                }
            }
            Ok(vec![payload.to_string()])
        }
        Protocol::InfluxDbLine | Protocol::OpenTsdbTelnet => Ok(payload
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()),
    }
}
