//! Runs against a taosAdapter listening on `TDENGINE_HOST` (default
//! 127.0.0.1), port 6041: `cargo test -- --ignored`.

use std::time::Duration;

use clap::Parser;
use taos::*;
use ws_schemaless::{req_id, samples, sql, Args, Error, Precision, Protocol, Schemaless};

#[tokio::test]
#[ignore = "needs a running TDengine with taosAdapter"]
async fn writes_all_three_formats() -> anyhow::Result<()> {
    let args = Args::parse_from(["ws-schemaless", "--database", "ws_schemaless_live"]);
    ws_schemaless::run(&args).await?;

    let taos = TaosBuilder::from_dsn(args.sql_dsn().to_taos_dsn())?.build().await?;
    for table in ["meters", "metric_telnet", "metric_json"] {
        let mut result = taos
            .query(format!("SELECT COUNT(*) FROM ws_schemaless_live.`{table}`"))
            .await?;
        let counts: Vec<(i64,)> = result.deserialize::<(i64,)>().try_collect().await?;
        assert_eq!(counts, vec![(1,)], "{table}");
    }
    taos.exec("DROP DATABASE IF EXISTS ws_schemaless_live").await?;
    Ok(())
}

#[tokio::test]
#[ignore = "needs a running TDengine with taosAdapter"]
async fn rejects_before_sending() -> anyhow::Result<()> {
    let args = Args::parse_from(["ws-schemaless"]);
    let taos = TaosBuilder::from_dsn(args.sql_dsn().to_taos_dsn())?.build().await?;
    taos.exec(sql::create_database("power")).await?;

    let config = args.schemaless_config().read_timeout(Duration::from_secs(2));
    let client = Schemaless::new(config).await?;
    let err = client
        .insert("{", Protocol::OpenTsdbJson, Precision::Seconds, 0, req_id::generate())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Payload { .. }));

    let telnet = samples::OPENTSDB_TELNET;
    client
        .insert(telnet, Protocol::OpenTsdbTelnet, Precision::Milliseconds, 0, req_id::generate())
        .await?;

    client.close();
    let err = client
        .insert(telnet, Protocol::OpenTsdbTelnet, Precision::Milliseconds, 0, req_id::generate())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Closed));
    Ok(())
}
