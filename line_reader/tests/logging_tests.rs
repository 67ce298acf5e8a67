// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The engine's tracing events, captured while a line is read.

use r3bl_line_reader::{DisplayPreference, LineReader, OutputDevice, ReadlineEvent,
                       ScriptedKeySource, StdoutMock, TracingConfig, WriterConfig,
                       try_initialize_logging_global, try_initialize_logging_thread_local};
use serial_test::serial;
use tracing::level_filters::LevelFilter;

fn read_one(keys: &str) -> ReadlineEvent {
    let (output, _) = OutputDevice::new_mock();
    let mut reader = LineReader::builder()
        .set_key_source(ScriptedKeySource::from_text(keys).with_width(80))
        .set_output_device(output)
        .build()
        .unwrap();
    reader.read_line(Some("> "), None, None, None).unwrap()
}

#[test]
#[serial]
fn test_read_line_events_go_to_thread_local_buffer() {
    let stdout_mock = StdoutMock::new();
    let config = TracingConfig::new_display(
        DisplayPreference::Buffer(stdout_mock.clone()),
        LevelFilter::DEBUG,
    );
    let guard = try_initialize_logging_thread_local(config).unwrap();
    assert_eq!(read_one("hi\r"), ReadlineEvent::Line("hi".to_string()));
    drop(guard);

    let log = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert!(log.contains("read line"), "{log}");
    assert!(log.contains("line accepted"), "{log}");
}

#[test]
#[serial]
fn test_global_file_logging() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("line_reader.log");
    let config = TracingConfig {
        writer_config: WriterConfig::File(log_file.to_string_lossy().to_string()),
        level_filter: LevelFilter::DEBUG,
    };
    assert!(try_initialize_logging_global(config.clone()).unwrap());
    // Only one global subscriber per process.
    assert!(try_initialize_logging_global(config).is_err());

    assert_eq!(read_one("\x04"), ReadlineEvent::Eof);
    let log = std::fs::read_to_string(&log_file).unwrap();
    assert!(log.contains("end of input"), "{log}");
}
