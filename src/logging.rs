//! Terminal logging
//!
//! Events go to stderr as `wheel <level> <message>`. The level filter is
//! installed behind a reload handle: startup begins at the level named by
//! `LOG_LEVEL` and switches once `--debug` has been parsed.

use crate::domain::LogLevel;
use colored::{ColoredString, Colorize};
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{reload, EnvFilter, Registry};

/// Prefix printed before every log line
pub const HEADING: &str = "wheel";

/// Event formatter printing the heading and a short coloured level label
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingFormat;

impl<S, N> FormatEvent<S, N> for HeadingFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} {} ",
            HEADING.blue().bold(),
            level_label(event.metadata().level())
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Short label for a level, npm style
pub fn level_label(level: &Level) -> ColoredString {
    match *level {
        Level::ERROR => "ERR!".red().bold(),
        Level::WARN => "WARN".black().on_yellow(),
        Level::INFO => "info".green(),
        Level::DEBUG => "verb".cyan(),
        Level::TRACE => "sill".dimmed(),
    }
}

/// Filter directive for a verbosity
pub fn filter_directive(level: LogLevel) -> String {
    let max = match level {
        LogLevel::Info => "info",
        LogLevel::Verbose => "debug",
    };
    format!("{}={}", env!("CARGO_CRATE_NAME"), max)
}

/// Handle for changing the verbosity after initialization
#[derive(Clone)]
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// Switch the active verbosity
    pub fn set_level(&self, level: LogLevel) -> Result<(), reload::Error> {
        self.handle.reload(EnvFilter::new(filter_directive(level)))
    }
}

/// Install the global subscriber at the given verbosity
pub fn init(level: LogLevel) -> Result<LogHandle, TryInitError> {
    let (filter, handle) = reload::Layer::new(EnvFilter::new(filter_directive(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(HeadingFormat)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(LogHandle { handle })
}
