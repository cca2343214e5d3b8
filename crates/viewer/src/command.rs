//! JSON command protocol for scripted control.
//!
//! Every rig operation plus frame, inspection and state import/export is
//! reachable as one tagged JSON object. Commands are fully parsed before
//! anything runs, so a bad selector never touches the rig.

use serde::{Deserialize, Serialize};
use shared::{Axis, BodyPart, JointTier, Pose};

use crate::harness::TestHarness;
use crate::state::{RigOp, RigSnapshot};

/// Pose given either by index (reduced mod 5) or by name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PoseRef {
    Index(u64),
    Name(String),
}

/// A command a script can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum RigCommand {
    /// Set the active joint tier.
    SelectTier { tier: JointTier },
    /// Set the active rotation axis.
    SelectAxis { axis: Axis },
    /// Flip a body part in the toggled set.
    TogglePart { part: BodyPart },
    /// Rotate toggled parts by -1 degree, `times` times.
    StepForward {
        #[serde(default = "one")]
        times: u32,
    },
    /// Rotate toggled parts by +1 degree, `times` times.
    StepBackward {
        #[serde(default = "one")]
        times: u32,
    },
    /// Apply a canned pose.
    ApplyPose { index: PoseRef },
    /// Apply the pose the command counter points at.
    NextPose,
    /// Zero every angle and offset.
    Reset,
    /// Rebuild if dirty and draw one frame.
    Frame,
    /// Report selection, angles and cache state.
    Inspect,
    /// Export the rig state as JSON.
    ExportState,
    /// Replace the rig state.
    LoadState { state: RigSnapshot },
}

fn one() -> u32 {
    1
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: RigCommand) -> CommandResponse {
    match cmd {
        RigCommand::SelectTier { tier } => {
            harness.select_tier(tier);
            CommandResponse::ok_with_data(serde_json::json!({ "tier": tier }))
        }

        RigCommand::SelectAxis { axis } => {
            harness.select_axis(axis);
            CommandResponse::ok_with_data(serde_json::json!({ "axis": axis }))
        }

        RigCommand::TogglePart { part } => {
            let active = harness.toggle(part);
            CommandResponse::ok_with_data(serde_json::json!({ "part": part, "active": active }))
        }

        RigCommand::StepForward { times } => {
            harness.step_forward(times);
            CommandResponse::ok_with_data(serde_json::json!({ "version": harness.rig().version() }))
        }

        RigCommand::StepBackward { times } => {
            harness.step_backward(times);
            CommandResponse::ok_with_data(serde_json::json!({ "version": harness.rig().version() }))
        }

        RigCommand::ApplyPose { index } => {
            let index = match index {
                PoseRef::Index(i) => i,
                PoseRef::Name(name) => match name.parse::<Pose>() {
                    Ok(pose) => pose as u64,
                    Err(e) => return CommandResponse::err(e.to_string()),
                },
            };
            let pose = harness.apply_pose(index);
            pose_response(harness, pose)
        }

        RigCommand::NextPose => {
            let pose = harness.next_pose();
            pose_response(harness, pose)
        }

        RigCommand::Reset => {
            harness.reset();
            CommandResponse::ok()
        }

        RigCommand::Frame => {
            let stats = harness.frame();
            CommandResponse::ok_with_data(serde_json::json!({
                "rebuilt": stats.rebuilt,
                "version": stats.version,
                "queued_ops": stats.queued_ops,
                "drawn": harness.drawn_count(),
                "rebuild_count": harness.rebuild_count(),
            }))
        }

        RigCommand::Inspect => {
            let rig = harness.rig();
            let selection = rig.selection();
            let parts: Vec<BodyPart> = selection.parts().parts().collect();
            let snapshot = rig.snapshot();
            CommandResponse::ok_with_data(serde_json::json!({
                "version": rig.version(),
                "pose_counter": rig.pose_counter(),
                "compat": rig.compat(),
                "dirty": harness.session().cache().is_stale(rig),
                "selection": {
                    "parts": parts,
                    "tier": selection.tier(),
                    "axis": selection.axis(),
                },
                "angles": snapshot.angles,
                "offsets": snapshot.offsets,
            }))
        }

        RigCommand::ExportState => match harness.export_state_json() {
            Ok(json) => CommandResponse::ok_with_data(serde_json::json!({ "state_json": json })),
            Err(e) => CommandResponse::err(e),
        },

        RigCommand::LoadState { state } => match harness.load_state(&state) {
            Ok(()) => CommandResponse::ok(),
            Err(e) => CommandResponse::err(e),
        },
    }
}

fn pose_response(harness: &TestHarness, pose: Pose) -> CommandResponse {
    CommandResponse::ok_with_data(serde_json::json!({
        "pose": pose.name(),
        "pose_counter": harness.rig().pose_counter(),
    }))
}

impl RigCommand {
    /// The queueable op this command maps onto, if it maps onto exactly one
    pub fn as_rig_op(&self) -> Option<RigOp> {
        match *self {
            RigCommand::SelectTier { tier } => Some(RigOp::SelectTier { tier }),
            RigCommand::SelectAxis { axis } => Some(RigOp::SelectAxis { axis }),
            RigCommand::TogglePart { part } => Some(RigOp::TogglePart { part }),
            RigCommand::StepForward { times: 1 } => Some(RigOp::StepForward),
            RigCommand::StepBackward { times: 1 } => Some(RigOp::StepBackward),
            RigCommand::ApplyPose {
                index: PoseRef::Index(index),
            } => Some(RigOp::ApplyPose { index }),
            RigCommand::NextPose => Some(RigOp::NextPose),
            RigCommand::Reset => Some(RigOp::Reset),
            _ => None,
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: RigCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
///
/// Nothing runs unless the whole array parses.
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<RigCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
