use crate::config;

/// Initialize tracing
pub fn init_tracing(
    stdout: bool,
    filter: tracing::Level,
) -> tracing_appender::non_blocking::WorkerGuard {
    let log_dir = config::get_log_folder();
    let log_file = config::get_log_file();

    // Decide which output should be used
    let (writer, guard) = if stdout {
        tracing_appender::non_blocking(std::io::stdout())
    } else {
        let file_appender = tracing_appender::rolling::daily(&log_dir, &log_file);
        tracing_appender::non_blocking(file_appender)
    };

    // try_init so a second call (tests, repeated commands) is a no-op
    let _ = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(filter)
        .with_ansi(stdout)
        .with_target(false)
        .with_file(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .try_init();

    guard
}
