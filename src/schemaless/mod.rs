//! Schemaless ingestion over the WebSocket transport.
//!
//! A [`Schemaless`] client owns its own connection, bound to one database.
//! Payloads are handed to the driver unparsed apart from a shape check.

mod payload;
mod protocol;
mod request;

use std::time::Duration;

use log::{debug, info};
use taos::{AsyncQueryable, AsyncTBuilder, Taos, TaosBuilder};
use tokio::sync::{Semaphore, SemaphorePermit};
use tokio::time::timeout;

pub use protocol::{Precision, Protocol};
pub use request::InsertRequest;

use crate::dsn::{DriverDsn, DEFAULT_WS_PORT};
use crate::error::{Error, Result};
use crate::sql;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Client options. Built with [`Config::new`] and the chained setters.
#[derive(Debug, Clone)]
pub struct Config {
    endpoint: String,
    version: usize,
    db: Option<String>,
    read_timeout: Duration,
    write_timeout: Duration,
    user: String,
    password: String,
}

impl Config {
    /// `version` is the protocol version tag; it also caps how many inserts
    /// may be in flight on one client.
    pub fn new(endpoint: impl Into<String>, version: usize) -> Self {
        Config {
            endpoint: endpoint.into(),
            version,
            db: None,
            read_timeout: DEFAULT_TIMEOUT,
            write_timeout: DEFAULT_TIMEOUT,
            user: "root".to_string(),
            password: "taosdata".to_string(),
        }
    }

    pub fn db(mut self, db: impl Into<String>) -> Self {
        self.db = Some(db.into());
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn max_in_flight(&self) -> usize {
        self.version.max(1)
    }

    /// Connection settings derived from the endpoint URL and credentials.
    fn driver_dsn(&self) -> Result<DriverDsn> {
        let (rest, secure) = if let Some(rest) = self.endpoint.strip_prefix("wss://") {
            (rest, true)
        } else if let Some(rest) = self.endpoint.strip_prefix("ws://") {
            (rest, false)
        } else {
            return Err(Error::Config(format!(
                "endpoint `{}` must start with ws:// or wss://",
                self.endpoint
            )));
        };

        let authority = rest.split('/').next().unwrap_or_default();
        if authority.contains('@') {
            return Err(Error::Config(
                "credentials belong in user/password, not the endpoint".into(),
            ));
        }
        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse().map_err(|_| {
                    Error::Config(format!("bad port in endpoint `{}`", self.endpoint))
                })?;
                (host, port)
            }
            None => (authority, DEFAULT_WS_PORT),
        };
        if host.is_empty() {
            return Err(Error::Config(format!("no host in endpoint `{}`", self.endpoint)));
        }

        let mut dsn = DriverDsn::new(&self.user, &self.password, host, port);
        dsn.secure = secure;
        Ok(dsn)
    }
}

pub struct Schemaless {
    client: Taos,
    endpoint: String,
    in_flight: InFlight,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl Schemaless {
    pub async fn new(config: Config) -> Result<Self> {
        let dsn = config.driver_dsn()?;
        let builder =
            TaosBuilder::from_dsn(dsn.to_taos_dsn()).map_err(Error::driver("invalid dsn"))?;

        debug!("schemaless connecting to {}", config.endpoint);
        // `build` is lazy; the first statement performs the handshake
        let connect = async {
            let client = builder.build().await.map_err(Error::driver("failed to connect"))?;
            match &config.db {
                Some(db) => {
                    client
                        .exec(sql::use_database(db))
                        .await
                        .map_err(Error::driver("failed to select database"))?;
                }
                None => {
                    client
                        .query(sql::SERVER_VERSION)
                        .await
                        .map_err(Error::driver("failed to connect"))?;
                }
            }
            Ok::<_, Error>(client)
        };
        let client = timeout(config.write_timeout, connect)
            .await
            .map_err(|_| Error::ConnectTimeout {
                endpoint: config.endpoint.clone(),
                elapsed: config.write_timeout,
            })??;

        info!(
            "schemaless client ready on {} (db: {})",
            config.endpoint,
            config.db.as_deref().unwrap_or("<none>")
        );
        Ok(Schemaless {
            client,
            in_flight: InFlight::new(config.max_in_flight()),
            endpoint: config.endpoint,
            read_timeout: config.read_timeout,
            write_timeout: config.write_timeout,
        })
    }

    /// Inserts `lines` written in `protocol`. A `ttl` of 0 keeps the
    /// database default.
    pub async fn insert(
        &self,
        lines: &str,
        protocol: Protocol,
        precision: Precision,
        ttl: i32,
        req_id: u64,
    ) -> Result<()> {
        let request = InsertRequest::new(lines, protocol, precision, ttl, req_id)?;
        self.send(&request).await
    }

    pub async fn send(&self, request: &InsertRequest) -> Result<()> {
        let sml = request.to_sml_data()?;
        let req_id = request.req_id();

        let _permit = self.in_flight.enter().await?;
        let budget = self.write_timeout + self.read_timeout;
        timeout(budget, self.client.put(&sml))
            .await
            .map_err(|_| Error::Timeout {
                req_id,
                elapsed: budget,
            })?
            .map_err(Error::driver("schemaless insert failed"))?;

        debug!(
            "{}: {} line(s) written, req_id {req_id:#x}",
            request.protocol(),
            request.lines().len()
        );
        Ok(())
    }

    /// Rejects inserts from now on, including those waiting for a slot.
    /// The connection itself is released on drop.
    pub fn close(&self) {
        self.in_flight.close();
        debug!("schemaless client on {} closed", self.endpoint);
    }
}

/// Caps concurrent inserts on one client.
#[derive(Debug)]
struct InFlight(Semaphore);

impl InFlight {
    fn new(limit: usize) -> Self {
        InFlight(Semaphore::new(limit))
    }

    async fn enter(&self) -> Result<SemaphorePermit<'_>> {
        self.0.acquire().await.map_err(|_| Error::Closed)
    }

    fn close(&self) {
        self.0.close();
    }
}
