use anyhow::{Context, Result, anyhow};
use redis::{Connection, RedisError, Value};

/// One key as read from the source: remaining TTL plus the DUMP payload.
/// `payload` is `None` when the key vanished between SCAN and DUMP; its TTL
/// reply carries the PTTL missing-key sentinel (-2) and is discarded later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRecord {
    pub key: Vec<u8>,
    pub ttl_ms: i64,
    pub payload: Option<Vec<u8>>,
}

/// A key ready to be written to the destination: vanished keys filtered out,
/// TTL already normalized to `max(ttl, 0)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreEntry {
    pub key: Vec<u8>,
    pub ttl_ms: i64,
    pub payload: Vec<u8>,
}

/// Per-key result of one RESTORE inside a pipelined round trip. Server-side
/// errors stay per key; transport failures never appear here.
#[derive(Debug)]
pub enum RestoreReply {
    Ok,
    Error(RedisError),
}

/// Read side of a keyspace. The redis implementation lives below; tests
/// drive the engine with in-memory fakes instead.
pub trait SourceStore {
    /// One SCAN page: the next cursor (0 once exhausted) plus the keys found.
    fn scan_page(&mut self, pattern: &str, cursor: u64) -> Result<(u64, Vec<Vec<u8>>)>;

    /// Pipelined PTTL + DUMP for every key, one round trip, replies in key
    /// order. A missing key is a `None` payload, never an error.
    fn fetch_batch(&mut self, keys: &[Vec<u8>]) -> Result<Vec<KeyRecord>>;

    /// Total keys in the selected database, used only to size the progress bar.
    fn key_count(&mut self) -> Result<u64>;
}

/// Write side of a keyspace.
pub trait DestStore {
    /// Pipelined RESTORE for every entry, one round trip, one reply per entry
    /// in order. Returns `Err` only when the round trip itself fails.
    fn restore_batch(&mut self, entries: &[RestoreEntry], replace: bool)
    -> Result<Vec<RestoreReply>>;

    /// FLUSHDB on the selected database.
    fn flush_db(&mut self) -> Result<()>;
}

/// How many keys to ask for per SCAN call. A hint, not a guarantee; the
/// server may return more or fewer.
const SCAN_COUNT: usize = 500;

pub struct RedisSource {
    con: Connection,
}

impl RedisSource {
    pub fn new(con: Connection) -> Self {
        Self { con }
    }
}

impl SourceStore for RedisSource {
    fn scan_page(&mut self, pattern: &str, cursor: u64) -> Result<(u64, Vec<Vec<u8>>)> {
        let (next, keys): (u64, Vec<Vec<u8>>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(SCAN_COUNT)
            .query(&mut self.con)
            .context("SCAN failed on the source")?;
        Ok((next, keys))
    }

    fn fetch_batch(&mut self, keys: &[Vec<u8>]) -> Result<Vec<KeyRecord>> {
        let mut pipe = redis::pipe();
        for key in keys {
            pipe.cmd("PTTL").arg(key);
            pipe.cmd("DUMP").arg(key);
        }
        let replies: Vec<Value> = pipe
            .query(&mut self.con)
            .context("PTTL/DUMP pipeline failed on the source")?;
        if replies.len() != keys.len() * 2 {
            return Err(anyhow!(
                "source pipeline returned {} replies for {} keys",
                replies.len(),
                keys.len()
            ));
        }
        let mut records = Vec::with_capacity(keys.len());
        for (key, pair) in keys.iter().zip(replies.chunks_exact(2)) {
            let ttl_ms: i64 = redis::from_redis_value(&pair[0])
                .with_context(|| format!("unexpected PTTL reply {:?}", pair[0]))?;
            let payload: Option<Vec<u8>> = redis::from_redis_value(&pair[1])
                .context("unexpected DUMP reply")?;
            records.push(KeyRecord {
                key: key.clone(),
                ttl_ms,
                payload,
            });
        }
        Ok(records)
    }

    fn key_count(&mut self) -> Result<u64> {
        redis::cmd("DBSIZE")
            .query(&mut self.con)
            .context("DBSIZE failed on the source")
    }
}

pub struct RedisDest {
    con: Connection,
}

impl RedisDest {
    pub fn new(con: Connection) -> Self {
        Self { con }
    }
}

impl DestStore for RedisDest {
    fn restore_batch(
        &mut self,
        entries: &[RestoreEntry],
        replace: bool,
    ) -> Result<Vec<RestoreReply>> {
        // Pack every RESTORE into one write so the batch is a single round
        // trip, then read one reply per command. redis::Pipeline would stop
        // at the first error reply, which loses the per-key outcomes.
        let mut packed = Vec::new();
        for entry in entries {
            let mut cmd = redis::cmd("RESTORE");
            cmd.arg(&entry.key).arg(entry.ttl_ms).arg(&entry.payload);
            if replace {
                cmd.arg("REPLACE");
            }
            packed.extend_from_slice(&cmd.get_packed_command());
        }
        self.con
            .send_packed_command(&packed)
            .context("RESTORE pipeline could not be sent to the destination")?;

        let mut replies = Vec::with_capacity(entries.len());
        for _ in entries {
            match self.con.recv_response() {
                Ok(Value::ServerError(err)) => replies.push(RestoreReply::Error(err.into())),
                Ok(_) => replies.push(RestoreReply::Ok),
                Err(err) if is_transport_error(&err) => {
                    return Err(anyhow::Error::new(err)
                        .context("lost the destination connection mid-batch"));
                }
                Err(err) => replies.push(RestoreReply::Error(err)),
            }
        }
        Ok(replies)
    }

    fn flush_db(&mut self) -> Result<()> {
        redis::cmd("FLUSHDB")
            .query::<()>(&mut self.con)
            .context("FLUSHDB failed on the destination")?;
        Ok(())
    }
}

/// True for failures of the round trip itself rather than of one command.
pub fn is_transport_error(err: &RedisError) -> bool {
    err.is_io_error() || err.is_connection_dropped() || err.is_timeout()
}
