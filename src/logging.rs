use log::{LevelFilter, SetLoggerError};
use simple_logger::SimpleLogger;

/// Log level for the command line: warnings by default, debug output with `--verbose`.
pub fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Initialize logging. Records go to stderr so stdout only carries the page.
pub fn init_logging(verbose: bool) -> Result<(), SetLoggerError> {
    SimpleLogger::new().with_level(log_level(verbose)).init()
}
