use crate::session_script::SessionScriptPlayer;
use anyhow::{Context, Result};
use arplace_core::NodeParent;
use arplace_host::{RecordingHaptics, SceneGraph, SessionDriver, SimulatedSession};
use arplace_testkit::{CommandRecord, JsonlSink};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Seconds per simulated host frame.
const FRAME_SECONDS: f64 = 1.0 / 60.0;

pub type HeadlessDriver = SessionDriver<SimulatedSession, SceneGraph, RecordingHaptics>;

pub struct HeadlessConfig {
    pub script: SessionScriptPlayer,
    pub command_log: PathBuf,
    pub max_frames: Option<u64>,
}

/// Totals reported once a replay finishes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: u64,
    pub events: usize,
    pub commands: usize,
    pub skipped: usize,
}

/// Replay a session script against `driver`, logging every applied command.
pub fn run(driver: &mut HeadlessDriver, cfg: HeadlessConfig) -> Result<ReplaySummary> {
    let HeadlessConfig {
        mut script,
        command_log,
        max_frames,
    } = cfg;
    let mut sink = JsonlSink::create(&command_log)
        .with_context(|| format!("failed to create command log {}", command_log.display()))?;

    let last_frame = script.last_frame().unwrap_or(0);
    let frame_limit = max_frames.map_or(last_frame, |max| max.min(last_frame));
    let mut summary = ReplaySummary::default();

    for frame in 0..=frame_limit {
        let timestamp = Duration::from_secs_f64(frame as f64 * FRAME_SECONDS);
        for step in script.drain_ready(frame) {
            let event = step
                .event
                .into_host_event(|name| driver.session().reference_image(name))
                .with_context(|| format!("invalid scripted event at frame {}", step.frame))?;
            summary.events += 1;

            let commands = driver
                .handle(&event, timestamp)
                .with_context(|| format!("frame {frame}: {}", event.label()))?;
            for command in &commands {
                sink.write(&CommandRecord {
                    frame,
                    cause: event.label(),
                    command,
                })?;
            }
            summary.commands += commands.len();
        }
        summary.frames = frame + 1;
    }
    sink.flush()?;
    summary.skipped = driver.dropped_events();

    if !script.is_finished() {
        warn!(
            max_frames = frame_limit,
            "Stopped before the session script finished"
        );
    }

    info!(
        frames = summary.frames,
        events = summary.events,
        skipped = summary.skipped,
        commands = summary.commands,
        cubes = driver.scene().children_of(NodeParent::Root).count(),
        vibrations = driver.haptics().vibrations(),
        anchors = driver.session().anchors().len(),
        pending_detections = driver.router().pending_detections(),
        log = %command_log.display(),
        "Replay finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arplace_host::{ArCamera, RunOptions, SessionConfiguration};
    use arplace_router::AnchorEventRouter;
    use arplace_testkit::test_cube_materials;
    use std::fs;

    fn driver() -> HeadlessDriver {
        let mut driver = SessionDriver::new(
            AnchorEventRouter::new(test_cube_materials()),
            SimulatedSession::new(ArCamera::default()),
            SceneGraph::new(),
            RecordingHaptics::new(),
        );
        driver.start(SessionConfiguration::default(), RunOptions::default());
        driver
    }

    #[test]
    fn replay_writes_one_record_per_command() {
        let dir = tempfile::tempdir().expect("temp dir");
        let log = dir.path().join("out").join("commands.jsonl");
        let script = SessionScriptPlayer::from_str(
            r#"{"steps": [
                {"frame": 0, "event": "plane_added", "anchor": 1, "extent": [0.5, 0.0, 0.3]},
                {"frame": 3, "event": "plane_updated", "anchor": 1, "extent": [0.6, 0.0, 0.4]},
                {"frame": 5, "event": "unknown_added", "anchor": 2}
            ]}"#,
        )
        .expect("script parses");

        let mut driver = driver();
        let summary = run(
            &mut driver,
            HeadlessConfig {
                script,
                command_log: log.clone(),
                max_frames: None,
            },
        )
        .expect("replay runs");

        assert_eq!(summary.frames, 6);
        assert_eq!(summary.events, 3);
        assert_eq!(summary.commands, 3);
        let lines: Vec<serde_json::Value> = fs::read_to_string(&log)
            .expect("log written")
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["cause"], "anchor_added");
        assert_eq!(lines[2]["cause"], "anchor_updated");
        assert_eq!(lines[2]["frame"], 3);
        assert_eq!(lines[2]["command"]["target"], "log");
    }

    #[test]
    fn unconfigured_image_aborts_replay() {
        let dir = tempfile::tempdir().expect("temp dir");
        let script = SessionScriptPlayer::from_str(
            r#"{"steps": [
                {"frame": 1, "event": "image_added", "anchor": 7, "translation": [0.0, 0.0, 0.0], "image": "poster"}
            ]}"#,
        )
        .expect("script parses");
        let mut driver = driver();
        let err = run(
            &mut driver,
            HeadlessConfig {
                script,
                command_log: dir.path().join("commands.jsonl"),
                max_frames: None,
            },
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("poster"));
    }

    #[test]
    fn max_frames_stops_early() {
        let dir = tempfile::tempdir().expect("temp dir");
        let script = SessionScriptPlayer::from_str(
            r#"{"steps": [
                {"frame": 0, "event": "plane_added", "anchor": 1, "extent": [0.5, 0.0, 0.3]},
                {"frame": 100, "event": "anchor_removed", "anchor": 1}
            ]}"#,
        )
        .expect("script parses");
        let mut driver = driver();
        let summary = run(
            &mut driver,
            HeadlessConfig {
                script,
                command_log: dir.path().join("commands.jsonl"),
                max_frames: Some(10),
            },
        )
        .expect("replay runs");
        assert_eq!(summary.frames, 11);
        assert_eq!(summary.events, 1);
        assert_eq!(driver.scene().len(), 2);
    }
}
