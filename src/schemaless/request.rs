use taos::taos_query::common::{SmlData, SmlDataBuilder};

use super::{payload, Precision, Protocol};
use crate::error::{Error, Result};

/// A validated insert, ready to be handed to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertRequest {
    lines: Vec<String>,
    protocol: Protocol,
    precision: Precision,
    ttl: i32,
    req_id: u64,
}

impl InsertRequest {
    /// Fails when the payload is empty or, for OpenTSDB JSON, malformed.
    pub fn new(
        payload: &str,
        protocol: Protocol,
        precision: Precision,
        ttl: i32,
        req_id: u64,
    ) -> Result<Self> {
        Ok(InsertRequest {
            lines: payload::prepare(payload, protocol)?,
            protocol,
            precision,
            ttl,
            req_id,
        })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn ttl(&self) -> i32 {
        self.ttl
    }

    pub fn req_id(&self) -> u64 {
        self.req_id
    }

    pub(crate) fn to_sml_data(&self) -> Result<SmlData> {
        SmlDataBuilder::default()
            .protocol(self.protocol.to_driver())
            .precision(self.precision.to_driver())
            .data(self.lines.clone())
            .ttl(self.ttl)
            .req_id(self.req_id)
            .build()
            .map_err(|err| Error::Config(err.to_string()))
    }
}
