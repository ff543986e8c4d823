use ::log::LevelFilter;
use env_logger::Builder;
use std::io::Write;

const LEVELS: [LevelFilter; 6] = [
    LevelFilter::Off,
    LevelFilter::Error,
    LevelFilter::Warn,
    LevelFilter::Info,
    LevelFilter::Debug,
    LevelFilter::Trace,
];

/// Installs an `env_logger` writing to stderr with the given default level; `RUST_LOG`
/// overrides it. Later calls (e.g. from several tests) are ignored.
pub fn build_logger_for_level(level: LevelFilter) {
    let _ = Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            writeln!(
                buf,
                "c [{:>5} {}] {}",
                record.level(),
                buf.timestamp_millis(),
                record.args()
            )
        })
        .try_init();
}

/// Raises `base` by one level per `-v` given on the command line
pub fn build_logger_for_verbosity(base: LevelFilter, verbosity: usize) {
    let base_index = LEVELS.iter().position(|&l| l == base).unwrap_or(2);
    let level = LEVELS[(base_index + verbosity).min(LEVELS.len() - 1)];
    build_logger_for_level(level);
}
