use entitle_logger::{Logger, LoggerError};
use serial_test::serial;

#[test]
#[serial]
fn second_init_in_the_same_process_fails() {
    let _logger = Logger::builder("integration-init-once").init().expect("first init succeeds");

    let err = Logger::builder("integration-init-twice").init().unwrap_err();
    assert!(matches!(err, LoggerError::Subscriber { .. }));
}
