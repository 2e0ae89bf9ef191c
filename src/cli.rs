use clap::Parser;

/// Copies every key (or a pattern-matched subset) from one Redis instance to
/// another, preserving TTLs, using pipelined DUMP/RESTORE instead of MIGRATE.
#[derive(Parser)]
#[command(
    name = "keyferry",
    about = "Copy keys between Redis instances using pipelined DUMP/RESTORE."
)]
pub struct Cli {
    /// Source Redis host
    pub src_host: String,

    /// Source port
    #[arg(long = "src_port", default_value_t = 6379)]
    pub src_port: u16,

    /// Source db number
    #[arg(long = "src_db", default_value_t = 0)]
    pub src_db: i64,

    /// SSL connection to source?
    #[arg(long = "src_ssl")]
    pub src_ssl: bool,

    /// Source password
    #[arg(long = "src_pass")]
    pub src_pass: Option<String>,

    /// Destination Redis host
    pub dst_host: String,

    /// Destination port
    #[arg(long = "dst_port", default_value_t = 6379)]
    pub dst_port: u16,

    /// Destination db number
    #[arg(long = "dst_db", default_value_t = 0)]
    pub dst_db: i64,

    /// SSL connection to destination?
    #[arg(long = "dst_ssl")]
    pub dst_ssl: bool,

    /// Destination password
    #[arg(long = "dst_pass")]
    pub dst_pass: Option<String>,

    /// Flush destination before migration?
    #[arg(long)]
    pub flush: bool,

    /// Pattern of key names to migrate
    #[arg(long, default_value = "*")]
    pub pattern: String,

    /// Replace existing keys in destination?
    #[arg(long)]
    pub replace: bool,

    /// Print debug output to stderr
    #[arg(long)]
    pub debug: bool,
}
