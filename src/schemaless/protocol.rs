use std::fmt;
use std::str::FromStr;

use taos::taos_query::common::{SchemalessPrecision, SchemalessProtocol};

use crate::error::Error;

/// Wire format of a schemaless payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// `measurement,tag=v field=v ts`
    InfluxDbLine,
    /// `metric ts value tag=v`
    OpenTsdbTelnet,
    OpenTsdbJson,
}

impl Protocol {
    pub fn name(self) -> &'static str {
        match self {
            Protocol::InfluxDbLine => "influxdb line protocol",
            Protocol::OpenTsdbTelnet => "opentsdb telnet line protocol",
            Protocol::OpenTsdbJson => "opentsdb json format protocol",
        }
    }

    pub(crate) fn to_driver(self) -> SchemalessProtocol {
        match self {
            Protocol::InfluxDbLine => SchemalessProtocol::Line,
            Protocol::OpenTsdbTelnet => SchemalessProtocol::Telnet,
            Protocol::OpenTsdbJson => SchemalessProtocol::Json,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Timestamp unit of the payload, parsed from the short textual form
/// (`"ms"`, `"s"`, ...). An empty string leaves it to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Precision {
    #[default]
    NotConfigured,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl Precision {
    pub fn as_str(self) -> &'static str {
        match self {
            Precision::NotConfigured => "",
            Precision::Hours => "h",
            Precision::Minutes => "m",
            Precision::Seconds => "s",
            Precision::Milliseconds => "ms",
            Precision::Microseconds => "u",
            Precision::Nanoseconds => "ns",
        }
    }

    pub(crate) fn to_driver(self) -> SchemalessPrecision {
        match self {
            Precision::NotConfigured => SchemalessPrecision::NonConfigured,
            Precision::Hours => SchemalessPrecision::Hours,
            Precision::Minutes => SchemalessPrecision::Minutes,
            Precision::Seconds => SchemalessPrecision::Seconds,
            Precision::Milliseconds => SchemalessPrecision::Millisecond,
            Precision::Microseconds => SchemalessPrecision::Microsecond,
            Precision::Nanoseconds => SchemalessPrecision::Nanosecond,
        }
    }
}

impl FromStr for Precision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "" => Precision::NotConfigured,
            "h" => Precision::Hours,
            "m" => Precision::Minutes,
            "s" => Precision::Seconds,
            "ms" => Precision::Milliseconds,
            "u" | "us" => Precision::Microseconds,
            "ns" => Precision::Nanoseconds,
            other => return Err(Error::Precision(other.to_string())),
        })
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_units() {
        assert_eq!("ms".parse::<Precision>().unwrap(), Precision::Milliseconds);
        assert_eq!("s".parse::<Precision>().unwrap(), Precision::Seconds);
        assert_eq!("us".parse::<Precision>().unwrap(), Precision::Microseconds);
        assert_eq!("".parse::<Precision>().unwrap(), Precision::NotConfigured);
        assert!(matches!("sec".parse::<Precision>(), Err(Error::Precision(p)) if p == "sec"));
    }

    #[test]
    fn maps_onto_driver_enums() {
        assert!(matches!(Precision::Seconds.to_driver(), SchemalessPrecision::Seconds));
        assert!(matches!(Precision::Milliseconds.to_driver(), SchemalessPrecision::Millisecond));
        assert!(matches!(Protocol::InfluxDbLine.to_driver(), SchemalessProtocol::Line));
        assert!(matches!(Protocol::OpenTsdbTelnet.to_driver(), SchemalessProtocol::Telnet));
        assert!(matches!(Protocol::OpenTsdbJson.to_driver(), SchemalessProtocol::Json));
    }

    #[test]
    fn display_round_trips_units() {
        for unit in ["h", "m", "s", "ms", "u", "ns"] {
            assert_eq!(unit.parse::<Precision>().unwrap().to_string(), unit);
        }
    }
}
