use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter, Record};
use std::io::Write;

/// Level for this crate's own targets; dependencies stay at Warn.
fn crate_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// `[tocsv] msg` for info/debug, `[tocsv WARN module] msg` for problems.
fn format_line(record: &Record) -> String {
    let name = env!("CARGO_PKG_NAME").cyan();
    let tag = match record.level() {
        Level::Error => "ERROR".red(),
        Level::Warn => "WARN".yellow(),
        Level::Debug | Level::Trace => {
            return format!("[{} {}] {}", name, "debug".dimmed(), record.args());
        }
        Level::Info => return format!("[{}] {}", name, record.args()),
    };
    format!(
        "[{} {} {}] {}",
        name,
        tag,
        record.target().white(),
        record.args()
    )
}

/// Install the crate logger (`RUST_LOG` still applies). Later calls are ignored, so tests and
/// the CLI can both call it.
pub fn setup_logging(verbose: bool) {
    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), crate_level(verbose))
        .format(|buf, record| writeln!(buf, "{}", format_line(record)))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_level() {
        assert_eq!(crate_level(true), LevelFilter::Debug);
        assert_eq!(crate_level(false), LevelFilter::Info);
    }

    #[test]
    fn test_warn_line_names_target() {
        colored::control::set_override(false);
        let line = format_line(
            &Record::builder()
                .level(Level::Warn)
                .target("tocsv::engine::cli")
                .args(format_args!("ignoring config file"))
                .build(),
        );
        assert_eq!(line, "[tocsv WARN tocsv::engine::cli] ignoring config file");
    }
}
