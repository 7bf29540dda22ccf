//! JSON event stream produced by a full run.

use std::io::{self, Write};

use improver_core::{
    Engagement, EngagementAreas, Goals, ImproveAgent, ImprovementArea, ImprovementBundle,
    JsonLinesSink, ProcessFault, RepositoryInfo, StreamEvent,
};

fn bundle() -> ImprovementBundle {
    ImprovementBundle::new(
        RepositoryInfo::new("landing", "acme/landing", "", "https://github.com/acme/landing"),
        Goals::default(),
        Engagement {
            engagement_areas: EngagementAreas::new().with(ImprovementArea::Forms, true),
            ..Engagement::default()
        },
    )
}

fn parse_events(bytes: &[u8]) -> Vec<StreamEvent> {
    String::from_utf8(bytes.to_vec())
        .expect("utf-8 output")
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid event"))
        .collect()
}

/// Writer whose reader has gone away.
struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn successful_run_streams_log_events_then_complete() {
    let mut sink = JsonLinesSink::new(Vec::new());
    ImproveAgent::new(bundle(), &mut sink)
        .run()
        .expect("run failed");
    sink.complete().expect("complete");

    let events = parse_events(&sink.into_inner());
    assert_eq!(events.len(), 5 + 3 + 1 + 1);
    assert_eq!(events.last(), Some(&StreamEvent::Complete));

    match &events[7] {
        StreamEvent::Log {
            message,
            step,
            total,
            ..
        } => {
            assert_eq!(message, "[8/2] ✓ Form improvements completed");
            assert_eq!(*step, 8);
            assert_eq!(*total, 2);
        }
        other => panic!("expected log event, got {:?}", other),
    }
}

#[test]
fn write_failure_surfaces_as_io_fault() {
    let err = ImproveAgent::new(bundle(), JsonLinesSink::new(BrokenPipe))
        .run()
        .expect_err("run should fail");

    assert!(matches!(err, ProcessFault::Io(_) | ProcessFault::Serialization(_)));
    assert!(err.to_string().contains("reader went away"));
}
