use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use keyferry::cli::Cli;
use keyferry::connect::{self, EndpointOptions};
use keyferry::logger;
use keyferry::migrate::{self, MigrateOptions};
use keyferry::store::{DestStore, RedisDest, RedisSource, SourceStore};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logger::set_debug(cli.debug);

    let src_opts = EndpointOptions {
        host: cli.src_host,
        port: cli.src_port,
        db: cli.src_db,
        ssl: cli.src_ssl,
        password: cli.src_pass,
    };
    let dst_opts = EndpointOptions {
        host: cli.dst_host,
        port: cli.dst_port,
        db: cli.dst_db,
        ssl: cli.dst_ssl,
        password: cli.dst_pass,
    };

    println!("Connecting to Redis instances...");
    let mut src = RedisSource::new(connect::connect(&src_opts)?);
    let mut dst = RedisDest::new(connect::connect(&dst_opts)?);

    if cli.flush {
        println!("Flushing destination {}...", dst_opts.describe());
        dst.flush_db()?;
    }

    let progress = match build_progress(&mut src, &cli.pattern)? {
        Some(progress) => progress,
        None => {
            println!("No keys found, exiting.");
            return Ok(());
        }
    };

    let opts = MigrateOptions {
        pattern: cli.pattern.clone(),
        replace: cli.replace,
        ..Default::default()
    };
    let result = migrate::run_migration(&mut src, &mut dst, &opts, |scanned| {
        progress.set_position(scanned)
    });
    progress.finish_and_clear();
    let summary = result?;

    if summary.scanned == 0 {
        println!("No keys matched pattern {:?}.", cli.pattern);
        return Ok(());
    }
    println!("{}", summary.render_table());
    Ok(())
}

/// A sized bar when the whole keyspace is migrated (DBSIZE is exact then),
/// a counting spinner otherwise. KEYS would give an exact total for a
/// pattern but blocks the server, so it is never used. Returns `None` when
/// the source database is empty.
fn build_progress(src: &mut RedisSource, pattern: &str) -> Result<Option<ProgressBar>> {
    if pattern == "*" {
        let total = src.key_count().context("Failed to count source keys")?;
        if total == 0 {
            return Ok(None);
        }
        println!("Found {total} keys to migrate.");
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} keys ({eta})")
                .expect("static template"),
        );
        Ok(Some(bar))
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {pos} keys copied").expect("static template"),
        );
        Ok(Some(bar))
    }
}
