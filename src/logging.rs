// Centralized logging setup for tracing with runtime log level, file logging, and structured output
use std::env;
use std::fs;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::OnceLock; // For global file guard
use std::time::{Duration, Instant};
use tracing::{debug, field::Field, field::Visit, span, Id, Subscriber};
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::{Context, Layer, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter,
};

static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Builds the filter directive for one output: everything else at warn,
/// the library and the running binary at the requested level.
pub fn filter_directive(bin_name: &str, level: &str) -> String {
    format!("warn,usdc_price_feeds={level},{bin_name}={level}")
}

pub fn init_logging(bin_name: String) -> eyre::Result<()> {
    // Load log levels for console and file from env
    let console_log_level = env::var("CONSOLE_LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string());
    let file_log_level = env::var("FILE_LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string());

    // Load file log flag from env
    let log_to_file = env::var("LOG_TO_FILE").unwrap_or_else(|_| "false".to_string()) == "true";

    let env_filter_console = EnvFilter::try_new(filter_directive(&bin_name, &console_log_level))
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&bin_name, "info")));

    let env_filter_file = EnvFilter::try_new(filter_directive(&bin_name, &file_log_level))
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&bin_name, "info")));

    // Console layer: diagnostics share stdout with the report output, so colour only on a terminal
    let console_layer = console_layer(std::io::stdout, std::io::stdout().is_terminal())
        .with_filter(env_filter_console);

    let timing_layer = SpanTimingLayer;

    if log_to_file {
        let timestamp = chrono::Local::now().format("%Y-%m-%d_%H:%M:%S").to_string();
        let log_dir = Path::new("logs");
        fs::create_dir_all(log_dir)?;
        let log_file_name = format!("{}_{}.log", bin_name, timestamp);

        let file_appender = tracing_appender::rolling::never(log_dir, log_file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        FILE_GUARD.set(guard).ok(); // Store the guard globally

        // File layer: structured JSON logs with UTC timestamps
        let file_layer = fmt::Layer::new()
            .json()
            .with_writer(non_blocking)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_filter(env_filter_file);

        tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .with(timing_layer)
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(console_layer)
            .with(timing_layer)
            .try_init()?;
    }

    Ok(())
}

fn console_layer<S, W>(make_writer: W, ansi: bool) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::Layer::new()
        .compact()
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(make_writer)
}

// Tracks span timing for spans declared with the field `on_close = true`
struct SpanTimingLayer;

struct StartInstant(Instant);
struct LastInstant(Instant);
struct BusyTime(Duration);
struct IdleTime(Duration);

struct OnCloseVisitor<'a> {
    on_close: &'a mut bool,
}

impl Visit for OnCloseVisitor<'_> {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "on_close" {
            *self.on_close = value;
        }
    }
    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
}

impl<S> Layer<S> for SpanTimingLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &span::Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let mut on_close = false;
            attrs.record(&mut OnCloseVisitor { on_close: &mut on_close });
            if on_close {
                let mut extensions = span.extensions_mut();
                let now = Instant::now();
                extensions.insert(StartInstant(now));
                extensions.insert(LastInstant(now));
                extensions.insert(BusyTime(Duration::ZERO));
                extensions.insert(IdleTime(Duration::ZERO));
            }
        }
    }

    // Time between an exit and the next enter is idle; between enter and exit is busy
    fn on_enter(&self, id: &Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let mut exts = span.extensions_mut();
            if exts.get_mut::<StartInstant>().is_none() {
                return;
            }
            let last_instant = exts.remove::<LastInstant>().map(|li| li.0).unwrap_or_else(Instant::now);
            let mut idle_time = exts.remove::<IdleTime>().map(|it| it.0).unwrap_or(Duration::ZERO);
            idle_time += last_instant.elapsed();
            exts.insert(IdleTime(idle_time));
            exts.insert(LastInstant(Instant::now()));
        }
    }

    fn on_exit(&self, id: &Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let mut exts = span.extensions_mut();
            if exts.get_mut::<StartInstant>().is_none() {
                return;
            }
            let last_instant = exts.remove::<LastInstant>().map(|li| li.0).unwrap_or_else(Instant::now);
            let mut busy_time = exts.remove::<BusyTime>().map(|bt| bt.0).unwrap_or(Duration::ZERO);
            busy_time += last_instant.elapsed();
            exts.insert(BusyTime(busy_time));
            exts.insert(LastInstant(Instant::now()));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(&id) {
            let mut exts = span.extensions_mut();
            if let Some(StartInstant(start)) = exts.remove::<StartInstant>() {
                let total_duration = start.elapsed();
                let busy_time = exts.remove::<BusyTime>().map(|bt| bt.0).unwrap_or(Duration::ZERO);
                let idle_time = exts.remove::<IdleTime>().map(|it| it.0).unwrap_or(Duration::ZERO);
                debug!(
                    span = span.name(),
                    busy_time = ?busy_time,
                    idle_time = ?idle_time,
                    total_time = ?total_duration,
                    "span closed"
                );
            }
        }
    }
}
