//! Driver connection strings of the form `user:password@ws(host:port)/database`.

use std::fmt;
use std::str::FromStr;

use urlencoding::encode;

use crate::error::{Error, Result};

pub const DEFAULT_WS_PORT: u16 = 6041;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverDsn {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    /// `wss` instead of `ws`.
    pub secure: bool,
    pub database: Option<String>,
}

impl DriverDsn {
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        DriverDsn {
            user: user.into(),
            password: password.into(),
            host: host.into(),
            port,
            secure: false,
            database: None,
        }
    }

    pub fn parse(dsn: &str) -> Result<Self> {
        let invalid = |reason| Error::Dsn {
            dsn: dsn.to_string(),
            reason,
        };

        // the password may itself contain `@`, so split on the last transport marker
        let (creds, rest, secure) = if let Some(at) = dsn.rfind("@wss(") {
            (&dsn[..at], &dsn[at + "@wss(".len()..], true)
        } else if let Some(at) = dsn.rfind("@ws(") {
            (&dsn[..at], &dsn[at + "@ws(".len()..], false)
        } else {
            return Err(invalid("expected `@ws(host:port)`"));
        };

        let (user, password) = creds.split_once(':').unwrap_or((creds, ""));
        if user.is_empty() {
            return Err(invalid("missing user"));
        }

        let (addr, path) = rest.split_once(')').ok_or_else(|| invalid("unclosed `ws(`"))?;
        let (host, port) = addr.rsplit_once(':').ok_or_else(|| invalid("missing port"))?;
        if host.is_empty() {
            return Err(invalid("missing host"));
        }
        let port = port.parse::<u16>().map_err(|_| invalid("port is not a number"))?;

        let database = match path {
            "" | "/" => None,
            path => match path.strip_prefix('/') {
                Some(db) => Some(db.to_string()),
                None => return Err(invalid("expected `/` after the address")),
            },
        };

        Ok(DriverDsn {
            user: user.to_string(),
            password: password.to_string(),
            host: host.to_string(),
            port,
            secure,
            database,
        })
    }

    /// DSN understood by `taos::TaosBuilder::from_dsn`. Credentials are
    /// percent-encoded.
    pub fn to_taos_dsn(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        let mut dsn = format!(
            "{scheme}://{}:{}@{}:{}",
            encode(&self.user),
            encode(&self.password),
            self.host,
            self.port
        );
        if let Some(db) = &self.database {
            dsn.push('/');
            dsn.push_str(db);
        }
        dsn
    }
}

impl FromStr for DriverDsn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DriverDsn::parse(s)
    }
}

impl fmt::Display for DriverDsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let transport = if self.secure { "wss" } else { "ws" };
        write!(
            f,
            "{}:{}@{transport}({}:{})/{}",
            self.user,
            self.password,
            self.host,
            self.port,
            self.database.as_deref().unwrap_or_default()
        )
    }
}
