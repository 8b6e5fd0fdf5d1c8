//! File logging example
//!
//! Writes newline-delimited JSON to a file from several threads.
//!
//! Run with: cargo run --example file_logging

use logstash_encoder::log_event;
use logstash_encoder::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Logstash Encoder - File Logging Example ===\n");

    let config = EncoderConfig::new()
        .with_immediate_flush(false)
        .with_time_zone(EventTimeZone::Utc);
    let appender = FileAppender::open("application.json", Schema::Nested, config)?;
    let appender = Arc::new(LockedAppender::new(appender));

    let handles: Vec<_> = (1..=4)
        .map(|worker| {
            let appender = Arc::clone(&appender);
            std::thread::spawn(move || -> Result<()> {
                let _worker = mdc::put_scoped("worker", worker.to_string());
                for item in 1..=5 {
                    appender.append(&log_event!(
                        LogLevel::Info,
                        "demo.worker",
                        "Processed item {}/5",
                        item
                    ))?;
                }
                Ok(())
            })
        })
        .collect();

    for handle in handles {
        handle
            .join()
            .map_err(|_| EncoderError::other("worker thread panicked"))??;
    }

    let encoded = appender.with_inner(|inner| {
        let metrics = inner.metrics();
        inner.stop().map(|()| metrics.events_encoded())
    })?;

    println!("Wrote {} events to 'application.json'", encoded);
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
