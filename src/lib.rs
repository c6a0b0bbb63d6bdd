//! Schemaless ingestion into TDengine over the WebSocket transport.
//!
//! [`run`] connects, makes sure the target database exists and writes one
//! sample in each of the three schemaless formats.

pub mod config;
pub mod dsn;
pub mod error;
pub mod req_id;
pub mod samples;
pub mod schemaless;
pub mod sql;

use anyhow::Context;
use log::{debug, info};
use taos::{AsyncQueryable, AsyncTBuilder, TaosBuilder};

pub use config::Args;
pub use error::{Error, Result};
pub use schemaless::{InsertRequest, Precision, Protocol, Schemaless};

pub async fn run(args: &Args) -> anyhow::Result<()> {
    let dsn = args.sql_dsn();
    debug!("dsn: {}", dsn.to_taos_dsn());

    let taos = TaosBuilder::from_dsn(dsn.to_taos_dsn())
        .context("failed to connect TDengine")?
        .build()
        .await
        .context("failed to connect TDengine")?;
    debug!("sql connection to {}:{} opened", dsn.host, dsn.port);

    taos.exec(sql::create_database(&args.database))
        .await
        .context("failed to create database")?;
    info!("database {} is ready", args.database);

    let client = Schemaless::new(args.schemaless_config())
        .await
        .context("failed to create schemaless connection")?;

    for request in sample_requests()? {
        client
            .send(&request)
            .await
            .with_context(|| format!("failed to insert {}", request.protocol()))?;
        info!("inserted {} data", request.protocol());
    }

    client.close();
    drop(taos);
    debug!("connection to {}:{} closed", dsn.host, dsn.port);
    Ok(())
}

/// One request per sample, each with ttl 0 and its own request id.
pub fn sample_requests() -> Result<Vec<InsertRequest>> {
    samples::INSERTS
        .iter()
        .map(|&(lines, protocol, precision)| {
            InsertRequest::new(lines, protocol, precision.parse()?, 0, req_id::generate())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn samples_use_their_own_format_and_unit() {
        let requests = sample_requests().unwrap();
        let pairs: Vec<_> = requests
            .iter()
            .map(|request| (request.protocol(), request.precision()))
            .collect();
        assert_eq!(
            pairs,
            [
                (Protocol::InfluxDbLine, Precision::Milliseconds),
                (Protocol::OpenTsdbTelnet, Precision::Milliseconds),
                (Protocol::OpenTsdbJson, Precision::Seconds),
            ]
        );

        for request in &requests {
            assert_eq!(request.ttl(), 0);
            assert_eq!(request.lines().len(), 1);
            assert!(request.to_sml_data().is_ok());
        }

        let ids: HashSet<u64> = requests.iter().map(InsertRequest::req_id).collect();
        assert_eq!(ids.len(), 3);
        assert!(!ids.contains(&0));
    }
}
