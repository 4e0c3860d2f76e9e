mod common;

use std::io::Write;
use std::path::Path;

use common::*;
use up::capture::{CaptureBuffer, CaptureStatus};
use up::process::{ProcessHandle, ProcessState};

#[test]
fn filters_root_input_through_shell() {
    let rt = runtime();
    let root = complete_root("1\n2\n3\n", 1024);

    let handle = ProcessHandle::start(rt.handle(), &sh(), "grep 3", &root, noop());
    assert_eq!(handle.command(), "grep 3");
    assert_eq!(handle.output().capacity(), root.capacity());

    assert!(wait_complete(handle.output()));
    assert_eq!(text(handle.output()), "3\n");
    assert!(wait_until(TIMEOUT, || handle.state()
        == ProcessState::Completed { exit_code: Some(0) }));
    assert!(handle.pid().is_some());
}

#[test]
fn stdout_and_stderr_share_the_output_buffer() {
    let rt = runtime();
    let root = complete_root("", 1024);

    let handle = ProcessHandle::start(rt.handle(), &sh(), "echo out; echo err >&2", &root, noop());
    assert!(wait_complete(handle.output()));
    let content = text(handle.output());
    assert!(content.contains("out\n"), "{content}");
    assert!(content.contains("err\n"), "{content}");
}

#[test]
fn non_zero_exit_is_appended_as_advisory_text() {
    let rt = runtime();
    let root = complete_root("", 1024);

    let handle = ProcessHandle::start(rt.handle(), &sh(), "echo partial; exit 3", &root, noop());
    assert!(wait_complete(handle.output()));
    assert_eq!(text(handle.output()), "partial\nup: exit status: 3\n");
    assert_eq!(
        handle.state(),
        ProcessState::Completed { exit_code: Some(3) }
    );
}

#[test]
fn launch_failure_becomes_output_content() {
    let rt = runtime();
    let root = complete_root("data\n", 1024);

    let handle = ProcessHandle::start(
        rt.handle(),
        Path::new("/nonexistent/up-test-shell"),
        "cat",
        &root,
        noop(),
    );
    assert_eq!(handle.state(), ProcessState::Failed);
    assert!(handle.pid().is_none());
    assert!(wait_complete(handle.output()));
    assert!(text(handle.output()).starts_with("up: "));

    // Killing a handle that never started changes nothing.
    handle.kill();
    assert_eq!(handle.state(), ProcessState::Failed);
}

#[test]
fn kill_is_idempotent_and_closes_output() {
    let rt = runtime();
    let root = complete_root("", 1024);

    let handle = ProcessHandle::start(rt.handle(), &sh(), "exec sleep 30", &root, noop());
    assert_eq!(handle.state(), ProcessState::Running);

    handle.kill();
    handle.kill();
    assert_eq!(handle.state(), ProcessState::Killed);

    assert!(wait_complete(handle.output()));
    assert_eq!(handle.state(), ProcessState::Killed);
    // A killed child gets no exit advisory.
    assert_eq!(text(handle.output()), "");
}

#[test]
fn streams_live_input_to_the_child() {
    let rt = runtime();
    let (reader, mut writer) = pipe_source();
    let root = CaptureBuffer::new(1024).start_capturing(reader, noop());

    let handle = ProcessHandle::start(rt.handle(), &sh(), "cat", &root, noop());
    writer.write_all(b"a\n").unwrap();
    assert!(wait_until(TIMEOUT, || text(handle.output()) == "a\n"));
    assert_eq!(handle.output().status(), CaptureStatus::Capturing);

    writer.write_all(b"b\n").unwrap();
    drop(writer);
    assert!(wait_complete(handle.output()));
    assert_eq!(text(handle.output()), "a\nb\n");
}

#[test]
fn dropping_the_handle_kills_the_child() {
    let rt = runtime();
    let root = complete_root("", 1024);

    let handle = ProcessHandle::start(rt.handle(), &sh(), "exec sleep 30", &root, noop());
    let output = handle.output().clone();
    drop(handle);
    assert!(wait_complete(&output));
}
