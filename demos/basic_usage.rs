//! Basic encoder usage example
//!
//! Encodes a few events to standard output in both schemas.
//!
//! Run with: cargo run --example basic_usage

use logstash_encoder::log_event;
use logstash_encoder::prelude::*;

fn main() -> Result<()> {
    println!("=== Logstash Encoder - Basic Usage Example ===\n");

    let context = EncoderContext::new("demo");
    context.put_property("service", "checkout");
    context.put_property("env", "staging");

    println!("1. Nested schema with context properties:");
    let mut nested = ConsoleAppender::stdout(Schema::Nested, EncoderConfig::default())?;
    nested.encoder_mut().set_context(context);

    let _request = mdc::put_scoped("request_id", "req-1001");
    let _env = mdc::put_scoped("env", "prod");
    nested.append(&log_event!(LogLevel::Info, "demo.orders", "Order {} accepted", 42))?;

    let marker = Marker::new("AUDIT").with_reference(Marker::new("PAYMENT"));
    nested.append(&log_event!(LogLevel::Warn, "demo.payments", "Card declined").with_marker(marker))?;

    println!("\n2. Flat schema without caller info:");
    let config = EncoderConfig::new().with_include_caller_info(false);
    let mut flat = ConsoleAppender::stdout(Schema::Flat, config)?;

    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timed out");
    let event = log_event!(LogLevel::Error, "demo.gateway", "Upstream call failed")
        .with_throwable(ThrowableProxy::from_error(&err));
    flat.append(&event)?;

    nested.stop()?;
    flat.stop()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
