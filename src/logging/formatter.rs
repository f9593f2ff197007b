use std::fmt;

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Event format for the file sink
/// Format: [TIMESTAMP] LEVEL in COMPONENT (line N): MESSAGE
pub struct FileFormatter;

impl<S, N> FormatEvent<S, N> for FileFormatter
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
        let metadata = event.metadata();

        // Full timestamp in brackets
        let now = chrono::Local::now();
        write!(writer, "[{}] ", now.format("%Y-%m-%d %H:%M:%S%.3f"))?;

        // Severity and originating component
        write!(writer, "{} in {} ", metadata.level(), metadata.target())?;

        // Line number of the emitting call site
        match metadata.line() {
            Some(line) => write!(writer, "(line {}): ", line)?,
            None => write!(writer, "(line ?): ")?,
        }

        // Write the message
        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Event format for the console sink, shorter than the file format
/// Format: [HH:MM:SS] LEVEL - MESSAGE
pub struct ConsoleFormatter;

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
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
        // Time-only timestamp in brackets
        let now = chrono::Local::now();
        write!(writer, "[{}] ", now.format("%H:%M:%S"))?;

        write!(writer, "{} - ", event.metadata().level())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::info;
    use tracing_subscriber::prelude::*;

    /// Collects formatted output in memory so tests can assert on it.
    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl CaptureWriter {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CaptureWriter {
        type Writer = CaptureWriter;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_file_formatter_layout() {
        let writer = CaptureWriter::default();
        let capture = writer.clone();

        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .event_format(FileFormatter)
                .with_writer(writer)
                .with_ansi(false),
        );

        tracing::subscriber::with_default(subscriber, || {
            info!("model checkpoint saved");
        });

        let output = capture.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 1);

        let line = lines[0];
        assert!(line.starts_with('['));
        assert!(line.contains("] INFO in mlproject::logging::formatter::tests (line "));
        assert!(line.ends_with("): model checkpoint saved"));
    }

    #[test]
    fn test_console_formatter_layout() {
        let writer = CaptureWriter::default();
        let capture = writer.clone();

        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .event_format(ConsoleFormatter)
                .with_writer(writer)
                .with_ansi(false),
        );

        tracing::subscriber::with_default(subscriber, || {
            info!("training started");
        });

        let output = capture.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 1);

        let line = lines[0];
        // [HH:MM:SS] is exactly ten characters
        assert_eq!(&line[10..], " INFO - training started");
        let stamp = &line[1..9];
        assert_eq!(&stamp[2..3], ":");
        assert_eq!(&stamp[5..6], ":");
    }

    #[test]
    fn test_one_line_per_event_per_sink() {
        let file_writer = CaptureWriter::default();
        let console_writer = CaptureWriter::default();
        let file_capture = file_writer.clone();
        let console_capture = console_writer.clone();

        let subscriber = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(FileFormatter)
                    .with_writer(file_writer)
                    .with_ansi(false),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(ConsoleFormatter)
                    .with_writer(console_writer)
                    .with_ansi(false),
            );

        tracing::subscriber::with_default(subscriber, || {
            info!("epoch 1 complete");
            info!("epoch 2 complete");
        });

        assert_eq!(file_capture.contents().lines().count(), 2);
        assert_eq!(console_capture.contents().lines().count(), 2);
    }
}
