use std::time::Duration;

use clap::Parser;

use crate::dsn::{DriverDsn, DEFAULT_WS_PORT};
use crate::schemaless;

/// Protocol version tag passed to the schemaless client.
pub const SCHEMALESS_VERSION: usize = 1;

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "ws-schemaless")]
#[command(about = "Schemaless writes to TDengine over WebSocket")]
pub struct Args {
    /// taosAdapter host
    #[arg(long, env = "TDENGINE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// taosAdapter WebSocket port
    #[arg(short, long, default_value_t = DEFAULT_WS_PORT)]
    pub port: u16,

    #[arg(short, long, default_value = "root")]
    pub user: String,

    #[arg(long, default_value = "taosdata")]
    pub password: String,

    /// Database created and written to
    #[arg(short, long, default_value = "power")]
    pub database: String,

    /// Read and write timeout of the schemaless client, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

impl Args {
    /// SQL connection, not bound to any database.
    pub fn sql_dsn(&self) -> DriverDsn {
        DriverDsn::new(&self.user, &self.password, &self.host, self.port)
    }

    pub fn schemaless_config(&self) -> schemaless::Config {
        let timeout = Duration::from_secs(self.timeout_secs);
        schemaless::Config::new(format!("ws://{}:{}", self.host, self.port), SCHEMALESS_VERSION)
            .db(&self.database)
            .read_timeout(timeout)
            .write_timeout(timeout)
            .user(&self.user)
            .password(&self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_local_server() {
        let args = Args::parse_from(["ws-schemaless", "--host", "127.0.0.1"]);
        assert_eq!(args.sql_dsn().to_string(), "root:taosdata@ws(127.0.0.1:6041)/");
        assert_eq!(args.database, "power");
        assert_eq!(args.schemaless_config().endpoint(), "ws://127.0.0.1:6041");
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "ws-schemaless",
            "--host",
            "td1",
            "-p",
            "16041",
            "--password",
            "pw",
            "-d",
            "metrics",
        ]);
        assert_eq!(args.sql_dsn().to_taos_dsn(), "ws://root:pw@td1:16041");
        assert_eq!(args.database, "metrics");
    }
}
