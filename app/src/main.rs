//! FILENAME: app/src/main.rs
// PURPOSE: Command-line entry point. JSON goes to stdout, unified log lines to stderr.
// FORMAT: seq|level|category|message

fn main() {
    if let Err(e) = app_lib::run() {
        app_lib::log_error!("SYS", "{}", e);
        std::process::exit(1);
    }
}
