use entitle_logger::{LevelFilter, Logger};

#[test]
fn init_console_only_has_no_guard() {
    let logger = Logger::builder("integration-console-only")
        .level(LevelFilter::INFO)
        .init()
        .expect("logger should initialize");

    assert!(logger.guard().is_none(), "console-only logger should not create a file guard");
}

#[test]
fn no_outputs_is_rejected() {
    let err = Logger::builder("no-outputs").console(false).init().unwrap_err();
    assert!(matches!(err, entitle_logger::LoggerError::InvalidConfiguration { .. }));
}
