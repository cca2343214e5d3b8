//! Integration tests for the JSON command protocol, settings and export.

use dog_viewer_lib::command::{execute_json, execute_json_batch};
use dog_viewer_lib::fixtures::{light_harness, sit_and_lift_script};
use dog_viewer_lib::harness::TestHarness;
use dog_viewer_lib::state::{CompatMode, ViewerSettings};
use shared::{Axis, BodyPart, Segment};

#[test]
fn test_sit_and_lift_script() {
    let mut h = light_harness();
    let responses = execute_json_batch(&mut h, sit_and_lift_script()).unwrap();
    assert_eq!(responses.len(), 6);
    assert!(responses.iter().all(|r| r.success));

    // sit puts the rear left upper at 65, outside its range, so stepping is refused
    assert_eq!(h.angle(Segment::RearLeftUpper, Axis::Z), 65);
    assert_eq!(h.angle(Segment::RearLeftLower, Axis::Z), -60);

    let frame = responses[5].data.as_ref().unwrap();
    assert_eq!(frame["drawn"], 16);
    assert_eq!(frame["rebuilt"], true);
}

#[test]
fn test_script_steps_from_neutral() {
    let mut h = light_harness();
    let script = r#"[
        {"command": "toggle_part", "part": "rear_left_leg"},
        {"command": "select_tier", "tier": "upper"},
        {"command": "select_axis", "axis": "z"},
        {"command": "step_backward", "times": 20}
    ]"#;
    execute_json_batch(&mut h, script).unwrap();
    for seg in [
        Segment::RearLeftUpper,
        Segment::RearLeftLower,
        Segment::RearLeftPaw,
    ] {
        assert_eq!(h.angle(seg, Axis::Z), 19, "{seg:?}");
    }
}

#[test]
fn test_invalid_selector_leaves_version() {
    let mut h = light_harness();
    execute_json(&mut h, r#"{"command": "toggle_part", "part": "neck"}"#).unwrap();
    let version = h.rig().version();
    for bad in [
        r#"{"command": "select_axis", "axis": "xy"}"#,
        r#"{"command": "select_tier", "tier": "hip"}"#,
        r#"{"command": "toggle_part", "part": "left_ear"}"#,
        r#"{"command": "wag"}"#,
    ] {
        assert!(execute_json(&mut h, bad).is_err(), "{bad}");
    }
    assert_eq!(h.rig().version(), version);
    assert!(h.rig().selection().is_toggled(BodyPart::Neck));
}

#[test]
fn test_next_pose_command_uses_counter() {
    let mut h = light_harness();
    execute_json(&mut h, r#"{"command": "apply_pose", "index": 3}"#).unwrap();
    let resp = execute_json(&mut h, r#"{"command": "next_pose"}"#).unwrap();
    // counter is 1 after one pose command
    assert_eq!(resp.data.unwrap()["pose"], "roll over");
}

#[test]
fn test_legacy_settings_from_file() {
    let dir = std::env::temp_dir().join(format!("dog_viewer_cmd_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("settings.json");
    std::fs::write(
        &path,
        r#"{"compat": "legacy", "tessellation": {"slices": 8, "stacks": 4}}"#,
    )
    .unwrap();

    let settings = ViewerSettings::load_from(&path);
    assert_eq!(settings.compat, CompatMode::Legacy);

    let mut h = TestHarness::with_settings(settings);
    let script = r#"[
        {"command": "toggle_part", "part": "front_left_leg"},
        {"command": "select_tier", "tier": "lower"},
        {"command": "select_axis", "axis": "z"},
        {"command": "step_backward"}
    ]"#;
    execute_json_batch(&mut h, script).unwrap();
    assert_eq!(h.angle(Segment::FrontLeftLower, Axis::Z), 0);
    assert_eq!(h.angle(Segment::FrontLeftPaw, Axis::Z), 2);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_export_glb_of_frame() {
    let mut h = light_harness();
    execute_json(&mut h, r#"{"command": "apply_pose", "index": "beg"}"#).unwrap();
    assert!(h.export_glb().is_err(), "nothing drawn yet");

    h.frame();
    let glb = h.export_glb().unwrap();
    assert_eq!(&glb[0..4], b"glTF");
    let total = u32::from_le_bytes([glb[8], glb[9], glb[10], glb[11]]) as usize;
    assert_eq!(total, glb.len());

    let json_len = u32::from_le_bytes([glb[12], glb[13], glb[14], glb[15]]) as usize;
    let doc: serde_json::Value = serde_json::from_slice(&glb[20..20 + json_len]).unwrap();
    assert_eq!(doc["nodes"].as_array().unwrap().len(), Segment::COUNT);
    assert_eq!(doc["nodes"][0]["name"], "body");
}

#[test]
fn test_load_state_command_rejects_unknown_segment() {
    let mut h = light_harness();
    let version = h.rig().version();
    let cmd = r#"{"command": "load_state", "state": {
        "angles": {"wing": [1, 2, 3]}, "tier": "paw", "axis": "x"
    }}"#;
    let resp = execute_json(&mut h, cmd).unwrap();
    assert!(!resp.success);
    assert_eq!(h.rig().version(), version);
    assert!(h.rig().is_neutral());
}

#[test]
fn test_step_after_loading_extreme_angles() {
    let mut h = light_harness();
    let load = r#"{"command": "load_state", "state": {
        "angles": {"tail": [2147483647, 0, 0], "rear_left_lower": [0, 0, 2147483647]},
        "selected": ["tail", "rear_left_leg"], "tier": "upper", "axis": "x"
    }}"#;
    assert!(execute_json(&mut h, load).unwrap().success);

    let resp = execute_json(&mut h, r#"{"command": "step_backward"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(h.angle(Segment::Tail, Axis::X), i32::MAX);

    execute_json(&mut h, r#"{"command": "select_axis", "axis": "z"}"#).unwrap();
    execute_json(&mut h, r#"{"command": "step_backward", "times": 2}"#).unwrap();
    assert_eq!(h.angle(Segment::RearLeftUpper, Axis::Z), 2);
    assert_eq!(h.angle(Segment::RearLeftLower, Axis::Z), i32::MAX);
    assert_eq!(h.angle(Segment::RearLeftPaw, Axis::Z), 2);
}
