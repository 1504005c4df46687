use clap::{Parser, ValueEnum};
use common::status::Status;
use gnss::network_source::SessionConfig;
use ingest::{Format, framing::DEFAULT_MAX_FRAME_LEN};
use sink::{SinkError, SinkTarget};
use std::{path::PathBuf, time::Duration};

/// Default rosbridge TCP port.
const BRIDGE_PORT: u16 = 9090;
/// Default port of NMEA over TCP servers.
const NMEA_PORT: u16 = 10110;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Wire format of the position source, `block` is read from stdin.
    #[arg(short, long, value_enum)]
    pub format: SourceFormat,
    #[arg(long, default_value = "localhost")]
    pub host: String,
    /// Defaults to 9090 for rosbridge and 10110 for NMEA.
    #[arg(short, long)]
    pub port: Option<u16>,
    /// rosbridge topic publishing the NavSatFix messages.
    #[arg(short, long, default_value = "/navsat/fix")]
    pub topic: String,
    /// Id of the document receiving the position updates.
    #[arg(long)]
    pub target: String,
    #[arg(short, long, value_enum, default_value_t = StatusArg::InMotion)]
    pub status: StatusArg,
    #[arg(long, default_value_t = 5)]
    pub retry_delay_secs: u64,
    #[arg(long, default_value_t = DEFAULT_MAX_FRAME_LEN)]
    pub max_frame_bytes: usize,
    /// Write the position document into this folder instead of only logging it.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    Bridge,
    Nmea,
    Block,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusArg {
    Idle,
    InUse,
    InMotion,
    Dispatching,
}

impl From<StatusArg> for Status {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Idle => Status::Idle,
            StatusArg::InUse => Status::InUse,
            StatusArg::InMotion => Status::InMotion,
            StatusArg::Dispatching => Status::Dispatching,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Target(#[from] SinkError),
    #[error("max frame bytes must be greater than zero")]
    MaxFrameLen,
}

/// Where the positions come from.
#[derive(Debug, Clone)]
pub enum SourceConfig {
    Network {
        session: SessionConfig,
        retry_delay: Duration,
    },
    Stdin {
        format: Format,
        max_frame_len: usize,
    },
}

/// The validated startup configuration of the process.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub source: SourceConfig,
    pub target: SinkTarget,
    pub status: Status,
    pub output_dir: Option<PathBuf>,
}

impl TryFrom<Cli> for IngestConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if cli.max_frame_bytes == 0 {
            return Err(ConfigError::MaxFrameLen);
        }
        let target = SinkTarget::new(&cli.target)?;
        let network = |format: Format, default_port: u16| SourceConfig::Network {
            session: SessionConfig {
                address: format!("{}:{}", cli.host, cli.port.unwrap_or(default_port)),
                format,
                max_frame_len: cli.max_frame_bytes,
            },
            retry_delay: Duration::from_secs(cli.retry_delay_secs),
        };
        let source = match cli.format {
            SourceFormat::Bridge => network(
                Format::BridgeJson {
                    topic: cli.topic.clone(),
                },
                BRIDGE_PORT,
            ),
            SourceFormat::Nmea => network(Format::Nmea, NMEA_PORT),
            SourceFormat::Block => SourceConfig::Stdin {
                format: Format::StructuredBlock,
                max_frame_len: cli.max_frame_bytes,
            },
        };
        Ok(IngestConfig {
            source,
            target,
            status: cli.status.into(),
            output_dir: cli.output_dir,
        })
    }
}
