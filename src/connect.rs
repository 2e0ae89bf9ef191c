use crate::logger;
use anyhow::{Context, Result};
use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};

/// Resolved connection parameters for one Redis endpoint.
#[derive(Debug, Clone)]
pub struct EndpointOptions {
    pub host: String,
    pub port: u16,
    pub db: i64,
    pub ssl: bool,
    pub password: Option<String>,
}

impl EndpointOptions {
    pub fn connection_info(&self) -> ConnectionInfo {
        let addr = if self.ssl {
            ConnectionAddr::TcpTls {
                host: self.host.clone(),
                port: self.port,
                insecure: false,
                tls_params: None,
            }
        } else {
            ConnectionAddr::Tcp(self.host.clone(), self.port)
        };
        ConnectionInfo {
            addr,
            redis: RedisConnectionInfo {
                db: self.db,
                username: None,
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }

    /// Password-free label for console output and errors.
    pub fn describe(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.db)
    }
}

pub fn connect(opts: &EndpointOptions) -> Result<redis::Connection> {
    logger::debug(&format!("connecting to {}", opts.describe()));
    let client = redis::Client::open(opts.connection_info())
        .with_context(|| format!("Invalid Redis endpoint {}", opts.describe()))?;
    let con = client
        .get_connection()
        .with_context(|| format!("Failed to connect to {}", opts.describe()))?;
    Ok(con)
}
