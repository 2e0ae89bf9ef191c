use crate::logger;
use crate::store::{DestStore, RestoreEntry, RestoreReply, SourceStore};
use anyhow::{Result, anyhow};
use redis::RedisError;

/// Outcome counts for one completed batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub scanned: u64,
    pub migrated: u64,
    pub vanished: u64,
    pub already_existing: u64,
}

/// Structured code current servers attach to a RESTORE key conflict.
const EXISTING_KEY_CODE: &str = "BUSYKEY";

/// The destination's "key already exists" responses; the second message is
/// what servers before 3.0 sent, without any error code.
const EXISTING_KEY_MESSAGES: [&str; 2] = [
    "BUSYKEY Target key name already exists.",
    "Target key name is busy.",
];

/// Classifies a RESTORE error as "the key was already there". Consults the
/// structured error code first and falls back to the exact message text.
pub fn is_existing_key_error(err: &RedisError) -> bool {
    if err.code() == Some(EXISTING_KEY_CODE) {
        return true;
    }
    let text = err.to_string();
    EXISTING_KEY_MESSAGES.iter().any(|msg| text.contains(msg))
}

/// Copies one batch: pipelined fetch from the source, vanish filtering and
/// TTL normalization, pipelined restore into the destination, per-key
/// classification. An unclassified RESTORE error aborts the whole run;
/// earlier keys in the same round trip that succeeded stay written.
pub fn copy_batch<S, D>(
    src: &mut S,
    dst: &mut D,
    keys: &[Vec<u8>],
    replace: bool,
) -> Result<BatchOutcome>
where
    S: SourceStore,
    D: DestStore,
{
    let mut outcome = BatchOutcome {
        scanned: keys.len() as u64,
        ..Default::default()
    };
    if keys.is_empty() {
        return Ok(outcome);
    }

    let records = src.fetch_batch(keys)?;
    if records.len() != keys.len() {
        return Err(anyhow!(
            "source returned {} records for a batch of {} keys",
            records.len(),
            keys.len()
        ));
    }

    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        match record.payload {
            Some(payload) => entries.push(RestoreEntry {
                key: record.key,
                // PTTL reports -1 for "no expiry" and -2 for "gone"; RESTORE
                // only accepts 0 for "keep forever".
                ttl_ms: record.ttl_ms.max(0),
                payload,
            }),
            None => {
                logger::debug(&format!(
                    "key {} vanished before DUMP",
                    display_key(&record.key)
                ));
                outcome.vanished += 1;
            }
        }
    }
    if entries.is_empty() {
        return Ok(outcome);
    }

    let replies = dst.restore_batch(&entries, replace)?;
    if replies.len() != entries.len() {
        return Err(anyhow!(
            "destination returned {} replies for {} restores",
            replies.len(),
            entries.len()
        ));
    }
    for (entry, reply) in entries.iter().zip(replies) {
        match reply {
            RestoreReply::Ok => outcome.migrated += 1,
            RestoreReply::Error(err) if is_existing_key_error(&err) => {
                outcome.already_existing += 1;
            }
            RestoreReply::Error(err) => {
                return Err(anyhow!(err).context(format!(
                    "RESTORE failed for key {} (payload {} bytes: {})",
                    display_key(&entry.key),
                    entry.payload.len(),
                    payload_preview(&entry.payload)
                )));
            }
        }
    }
    Ok(outcome)
}

/// Key names are raw bytes; show them quoted and escaped.
pub fn display_key(key: &[u8]) -> String {
    format!("{:?}", String::from_utf8_lossy(key))
}

fn payload_preview(payload: &[u8]) -> String {
    const PREVIEW: usize = 16;
    let head: String = payload
        .iter()
        .take(PREVIEW)
        .map(|b| format!("{b:02x}"))
        .collect();
    if payload.len() > PREVIEW {
        format!("{head}..")
    } else {
        head
    }
}
