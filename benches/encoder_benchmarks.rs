//! Criterion benchmarks for logstash_encoder

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use logstash_encoder::prelude::*;
use std::io::{self, Sink};

fn sample_event() -> LogEvent {
    LogEvent::new(LogLevel::Info, "Request processed in 12ms")
        .with_logger_name("app.http")
        .with_caller_data(vec![CallerFrame::new("app::http", "handle", "http.rs", 120)])
        .with_mdc_property("request_id", "abc-123")
        .with_mdc_property("user", "alice")
}

fn encoder_for(schema: Schema, config: EncoderConfig) -> Box<dyn Encoder<Sink>> {
    let mut encoder = schema.build_encoder(config).unwrap();
    encoder.start(io::sink());
    encoder
}

// ============================================================================
// Schema Benchmarks
// ============================================================================

fn bench_schemas(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Elements(1));

    let event = sample_event();
    for schema in [Schema::Nested, Schema::Flat] {
        let mut encoder = encoder_for(schema, EncoderConfig::default());
        group.bench_function(schema.to_str(), |b| {
            b.iter(|| encoder.do_encode(black_box(&event)).unwrap());
        });
    }

    group.finish();
}

// ============================================================================
// Caller Info Benchmarks
// ============================================================================

fn bench_caller_info(c: &mut Criterion) {
    let mut group = c.benchmark_group("caller_info");
    group.throughput(Throughput::Elements(1));

    group.bench_function("capture_macro", |b| {
        b.iter(|| black_box(logstash_encoder::caller_frame!()));
    });

    let event = sample_event();
    for include in [true, false] {
        let config = EncoderConfig::new().with_include_caller_info(include);
        let mut encoder = encoder_for(Schema::Nested, config);
        let name = if include { "included" } else { "excluded" };
        group.bench_function(name, |b| {
            b.iter(|| encoder.do_encode(black_box(&event)).unwrap());
        });
    }

    group.finish();
}

// ============================================================================
// Serialization Benchmarks
// ============================================================================

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");

    let encoder = LogstashEncoder::<Sink>::new(EncoderConfig::default());
    let ascii = sample_event();
    let unicode = LogEvent {
        message: "Zahlung f\u{fc}r Bestellung \u{2116} 42 erhalten \u{2713}".to_string(),
        ..sample_event()
    };

    group.bench_function("ascii_message", |b| {
        b.iter(|| {
            let doc = encoder.build_document(black_box(&ascii));
            logstash_encoder::encoder::json::to_ascii_vec(&doc).unwrap()
        });
    });

    group.bench_function("escaped_message", |b| {
        b.iter(|| {
            let doc = encoder.build_document(black_box(&unicode));
            logstash_encoder::encoder::json::to_ascii_vec(&doc).unwrap()
        });
    });

    let throwable = ThrowableProxy::new("QueryError")
        .with_message("deadlock detected")
        .with_frames((0..20).map(|i| CallerFrame::new("app::db", "step", "db.rs", i)).collect())
        .with_cause(ThrowableProxy::new("LockTimeout").with_frames(
            (5..20).map(|i| CallerFrame::new("app::db", "step", "db.rs", i)).collect(),
        ));
    group.bench_function("stack_trace_render", |b| {
        b.iter(|| black_box(&throwable).render());
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(benches, bench_schemas, bench_caller_info, bench_serialization);

criterion_main!(benches);
