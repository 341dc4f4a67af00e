use anyhow::Result;
use arplace_core::{Anchor, AnchorId, HostEvent, PlaneExtent, ReferenceImageInfo};
use glam::{Mat4, Quat, Vec2, Vec3};
use serde::Deserialize;
use std::{collections::VecDeque, fs, path::Path};

#[derive(Debug, Deserialize)]
struct SessionScriptFile {
    steps: Vec<SessionScriptStepDef>,
}

#[derive(Debug, Clone, Deserialize)]
struct SessionScriptStepDef {
    frame: u64,
    #[serde(flatten)]
    event: ScriptEvent,
}

/// Host events as written in a script file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    PlaneAdded {
        anchor: u64,
        #[serde(default)]
        translation: [f32; 3],
        #[serde(default)]
        yaw_degrees: f32,
        extent: [f32; 3],
    },
    PlaneUpdated {
        anchor: u64,
        #[serde(default)]
        translation: [f32; 3],
        #[serde(default)]
        yaw_degrees: f32,
        extent: [f32; 3],
    },
    ImageAdded {
        anchor: u64,
        translation: [f32; 3],
        image: String,
    },
    UnknownAdded {
        anchor: u64,
        #[serde(default)]
        translation: [f32; 3],
    },
    AnchorRemoved {
        anchor: u64,
    },
    Touch {
        x: f32,
        y: f32,
    },
}

impl ScriptEvent {
    /// Build the host event. Image anchors need the session's metadata for
    /// the named reference image.
    pub fn into_host_event<F>(self, reference_image: F) -> Result<HostEvent>
    where
        F: FnOnce(&str) -> Option<ReferenceImageInfo>,
    {
        let event = match self {
            ScriptEvent::PlaneAdded {
                anchor,
                translation,
                yaw_degrees,
                extent,
            } => HostEvent::AnchorAdded {
                anchor: plane(anchor, translation, yaw_degrees, extent),
            },
            ScriptEvent::PlaneUpdated {
                anchor,
                translation,
                yaw_degrees,
                extent,
            } => HostEvent::AnchorUpdated {
                anchor: plane(anchor, translation, yaw_degrees, extent),
            },
            ScriptEvent::ImageAdded {
                anchor,
                translation,
                image,
            } => {
                let Some(reference) = reference_image(&image) else {
                    anyhow::bail!("'{image}' is not a configured detection image");
                };
                HostEvent::AnchorAdded {
                    anchor: Anchor::image(
                        AnchorId(anchor),
                        Mat4::from_translation(Vec3::from(translation)),
                        reference,
                    ),
                }
            }
            ScriptEvent::UnknownAdded {
                anchor,
                translation,
            } => HostEvent::AnchorAdded {
                anchor: Anchor::unknown(
                    AnchorId(anchor),
                    Mat4::from_translation(Vec3::from(translation)),
                ),
            },
            ScriptEvent::AnchorRemoved { anchor } => HostEvent::AnchorRemoved {
                id: AnchorId(anchor),
            },
            ScriptEvent::Touch { x, y } => HostEvent::Touch {
                point: Vec2::new(x, y),
            },
        };
        Ok(event)
    }
}

fn plane(id: u64, translation: [f32; 3], yaw_degrees: f32, extent: [f32; 3]) -> Anchor {
    let transform = Mat4::from_rotation_translation(
        Quat::from_rotation_y(yaw_degrees.to_radians()),
        Vec3::from(translation),
    );
    Anchor::plane(
        AnchorId(id),
        transform,
        PlaneExtent::new(extent[0], extent[1], extent[2]),
    )
}

/// A scripted event due at a given frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedEvent {
    pub frame: u64,
    pub event: ScriptEvent,
}

/// Frame-ordered session script.
///
/// Scripts are a list of `{frame, event, ...}` steps, replayed in file order.
#[derive(Debug)]
pub struct SessionScriptPlayer {
    pending: VecDeque<ScriptedEvent>,
}

impl SessionScriptPlayer {
    /// Load a session script from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Load a session script from an in-memory JSON string.
    pub fn from_str(contents: &str) -> Result<Self> {
        let file: SessionScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("session script contains no steps");
        }

        let mut pending = VecDeque::with_capacity(file.steps.len());
        let mut last_frame: Option<u64> = None;
        for step in file.steps {
            if let Some(prev) = last_frame {
                if step.frame < prev {
                    anyhow::bail!("session script steps must be sorted by frame");
                }
            }
            last_frame = Some(step.frame);
            pending.push_back(ScriptedEvent {
                frame: step.frame,
                event: step.event,
            });
        }

        Ok(Self { pending })
    }

    /// Drain and return all events scheduled for frames `<= frame`.
    pub fn drain_ready(&mut self, frame: u64) -> Vec<ScriptedEvent> {
        let mut ready = Vec::new();
        while self.pending.front().is_some_and(|step| step.frame <= frame) {
            if let Some(step) = self.pending.pop_front() {
                ready.push(step);
            }
        }
        ready
    }

    /// Frame of the last scripted event, if any remain.
    pub fn last_frame(&self) -> Option<u64> {
        self.pending.back().map(|step| step.frame)
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_script_rejects_unsorted_frames() {
        let json = r#"{
            "steps": [
                {"frame": 2, "event": "touch", "x": 1.0, "y": 1.0},
                {"frame": 1, "event": "touch", "x": 2.0, "y": 2.0}
            ]
        }"#;
        let err = SessionScriptPlayer::from_str(json).unwrap_err();
        assert!(
            err.to_string().contains("sorted by frame"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn session_script_rejects_empty() {
        assert!(SessionScriptPlayer::from_str(r#"{"steps": []}"#).is_err());
    }

    #[test]
    fn session_script_drains_in_order() {
        let json = r#"{
            "steps": [
                {"frame": 1, "event": "plane_added", "anchor": 1, "extent": [0.5, 0.0, 0.3]},
                {"frame": 1, "event": "touch", "x": 195.0, "y": 600.0},
                {"frame": 4, "event": "anchor_removed", "anchor": 1}
            ]
        }"#;
        let mut script = SessionScriptPlayer::from_str(json).expect("script should parse");
        assert_eq!(script.last_frame(), Some(4));

        assert!(script.drain_ready(0).is_empty());
        let first = script.drain_ready(1);
        assert_eq!(first.len(), 2);
        assert!(matches!(first[0].event, ScriptEvent::PlaneAdded { anchor: 1, .. }));
        assert_eq!(first[1].event, ScriptEvent::Touch { x: 195.0, y: 600.0 });
        assert!(script.drain_ready(3).is_empty());
        assert_eq!(script.drain_ready(10).len(), 1);
        assert!(script.is_finished());
    }

    #[test]
    fn image_events_need_a_configured_reference() {
        let event = ScriptEvent::ImageAdded {
            anchor: 2,
            translation: [1.0, 0.0, 2.0],
            image: "poster".into(),
        };
        assert!(event.clone().into_host_event(|_| None).is_err());

        let host = event
            .into_host_event(|name| {
                Some(ReferenceImageInfo {
                    name: name.to_string(),
                    physical_width: 0.07,
                    physical_height: 0.07,
                })
            })
            .expect("reference known");
        match host {
            HostEvent::AnchorAdded { anchor } => {
                assert!(anchor.is_image());
                assert_eq!(anchor.translation(), Vec3::new(1.0, 0.0, 2.0));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn plane_events_apply_yaw_and_translation() {
        let event = ScriptEvent::PlaneAdded {
            anchor: 1,
            translation: [0.0, -1.0, -2.0],
            yaw_degrees: 90.0,
            extent: [1.0, 0.0, 0.5],
        };
        let HostEvent::AnchorAdded { anchor } =
            event.into_host_event(|_| None).expect("planes need no lookup")
        else {
            panic!("plane_added maps to AnchorAdded");
        };
        assert_eq!(anchor.translation(), Vec3::new(0.0, -1.0, -2.0));
        assert_eq!(anchor.plane_extent(), Some(PlaneExtent::new(1.0, 0.0, 0.5)));
    }

    #[test]
    fn demo_script_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/session.json");
        let mut script = SessionScriptPlayer::from_path(&path).expect("demo script parses");
        let all = script.drain_ready(u64::MAX);
        assert!(all
            .iter()
            .any(|step| matches!(step.event, ScriptEvent::ImageAdded { .. })));
        assert!(script.is_finished());
    }
}
