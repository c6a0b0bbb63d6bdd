//! Sample payloads, one per schemaless format.

use crate::schemaless::Protocol;

pub const INFLUXDB_LINE: &str = "meters,groupid=2,location=California.SanFrancisco current=10.3000002f64,voltage=219i32,phase=0.31f64 1626006833639";

pub const OPENTSDB_TELNET: &str = "metric_telnet 1707095283260 4 host=host0 interface=eth0";

/// Timestamp is in seconds.
pub const OPENTSDB_JSON: &str = r#"{"metric": "metric_json","timestamp": 1626846400,"value": 10.3, "tags": {"groupid": 2, "location": "California.SanFrancisco", "id": "d1001"}}"#;

/// Payload, format and timestamp unit of each sample, in insertion order.
pub const INSERTS: [(&str, Protocol, &str); 3] = [
    (INFLUXDB_LINE, Protocol::InfluxDbLine, "ms"),
    (OPENTSDB_TELNET, Protocol::OpenTsdbTelnet, "ms"),
    (OPENTSDB_JSON, Protocol::OpenTsdbJson, "s"),
];
