mod common;

use std::io::Write;

use common::*;
use up::capture::{CaptureBuffer, CaptureStatus};
use up::pipeline::{ExecutionMode, PipelineController};
use up::process::ProcessState;

fn controller(
    rt: &tokio::runtime::Runtime,
    mode: ExecutionMode,
    root: CaptureBuffer,
) -> PipelineController {
    PipelineController::new(mode, sh(), root, rt.handle().clone(), noop())
}

#[test]
fn starts_with_root_displayed() {
    let rt = runtime();
    let root = complete_root("x\n", 64);
    let pipeline = controller(&rt, ExecutionMode::Safe, root.clone());

    assert!(pipeline.displayed().same_buffer(&root));
    assert!(pipeline.current().is_none());
    assert_eq!(pipeline.last_executed(), "");
}

#[test]
fn unsafe_mode_runs_every_change() {
    let rt = runtime();
    let root = complete_root("1\n2\n3\n", 1024);
    let mut pipeline = controller(&rt, ExecutionMode::Unsafe, root.clone());

    assert!(pipeline.evaluate("grep 3"));
    let output = pipeline.displayed().clone();
    assert!(!output.same_buffer(&root));
    assert!(wait_complete(&output));
    assert_eq!(text(&output), "3\n");
    let current = pipeline.current().unwrap();
    assert!(wait_until(TIMEOUT, || current.state()
        == ProcessState::Completed { exit_code: Some(0) }));

    // Unchanged text does not restart.
    assert!(!pipeline.evaluate("grep 3"));
    assert!(pipeline.displayed().same_buffer(&output));

    assert!(pipeline.evaluate("grep 2"));
    assert!(!pipeline.displayed().same_buffer(&output));
    assert!(wait_complete(pipeline.displayed()));
    assert_eq!(text(pipeline.displayed()), "2\n");
}

#[test]
fn safe_mode_waits_for_confirmation() {
    let rt = runtime();
    let root = complete_root("a\nb\n", 1024);
    let mut pipeline = controller(&rt, ExecutionMode::Safe, root.clone());

    assert!(!pipeline.evaluate("grep a"));
    assert!(pipeline.is_pending("grep a"));
    assert!(pipeline.displayed().same_buffer(&root));

    pipeline.request_restart();
    assert!(pipeline.evaluate("grep a"));
    assert!(!pipeline.is_pending("grep a"));
    assert!(wait_complete(pipeline.displayed()));
    assert_eq!(text(pipeline.displayed()), "a\n");

    // A confirmed rerun of the same text still restarts.
    let first = pipeline.displayed().clone();
    pipeline.request_restart();
    assert!(pipeline.evaluate("grep a"));
    assert!(!pipeline.displayed().same_buffer(&first));
}

#[test]
fn empty_command_shows_root_and_kills_current() {
    let rt = runtime();
    let root = complete_root("data\n", 1024);
    let mut pipeline = controller(&rt, ExecutionMode::Unsafe, root.clone());

    assert!(pipeline.evaluate("exec sleep 30"));
    let output = pipeline.displayed().clone();

    assert!(pipeline.evaluate(""));
    assert!(pipeline.displayed().same_buffer(&root));
    assert!(pipeline.current().is_none());
    assert_eq!(pipeline.last_executed(), "");
    assert!(wait_complete(&output));
}

#[test]
fn replacing_a_forked_stage_over_idle_input_completes_its_output() {
    let rt = runtime();
    let (reader, _writer) = pipe_source();
    let root = CaptureBuffer::new(1024).start_capturing(reader, noop());
    let mut pipeline = controller(&rt, ExecutionMode::Unsafe, root.clone());

    assert!(pipeline.evaluate("cat | cat"));
    let first = pipeline.displayed().clone();
    assert!(pipeline.evaluate("cat | cat | cat"));
    assert!(wait_complete(&first));

    let second = pipeline.displayed().clone();
    pipeline.shutdown();
    assert!(wait_complete(&second));
    assert_eq!(root.status(), CaptureStatus::Capturing);
}

#[test]
fn pause_lets_child_finish_and_resume_restarts() {
    let rt = runtime();
    let (reader, mut writer) = pipe_source();
    let root = CaptureBuffer::new(1024).start_capturing(reader, noop());
    let mut pipeline = controller(&rt, ExecutionMode::Unsafe, root.clone());

    writer.write_all(b"partial").unwrap();
    assert!(wait_until(TIMEOUT, || root.len() == 7));
    assert!(pipeline.evaluate("cat"));
    let first = pipeline.displayed().clone();
    assert!(wait_until(TIMEOUT, || text(&first) == "partial"));

    assert!(pipeline.pause_input());
    assert!(pipeline.is_input_paused());
    assert_eq!(root.status(), CaptureStatus::Paused);
    assert!(wait_complete(&first));
    assert_eq!(text(&first), "partial");
    let current = pipeline.current().unwrap();
    assert!(wait_until(TIMEOUT, || current.state()
        == ProcessState::Completed { exit_code: Some(0) }));

    // Pausing alone does not restart anything.
    assert!(!pipeline.evaluate("cat"));

    assert!(pipeline.resume_input());
    writer.write_all(b" and more").unwrap();
    assert!(pipeline.evaluate("cat"));
    let second = pipeline.displayed().clone();
    assert!(!second.same_buffer(&first));
    assert!(wait_until(TIMEOUT, || text(&second) == "partial and more"));

    drop(writer);
    assert!(wait_complete(&second));
    pipeline.shutdown();
    assert!(pipeline.current().is_none());
}
