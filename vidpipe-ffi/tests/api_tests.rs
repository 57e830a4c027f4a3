// SPDX-FileCopyrightText: 2026 Contributors to the vidpipe project.
// SPDX-License-Identifier: Apache-2.0

//! Smoke tests for the C entry points, called the way a host runtime would.
//!
//! The pipeline graph is configured from GStreamer core elements so the
//! tests run without codec plugins installed.

use std::ffi::CString;

use vidpipe_ffi::{
    vidpipe_init, vidpipe_player_build, vidpipe_player_free, vidpipe_player_new,
    vidpipe_player_play, vidpipe_player_stop, vidpipe_sum, vidpipe_surface_attach_player,
    vidpipe_surface_bind, vidpipe_surface_unbind,
};

fn init() {
    let level = CString::new("info").unwrap();
    assert_eq!(unsafe { vidpipe_init(level.as_ptr()) }, 0);
}

fn new_core_player() -> i32 {
    let config = CString::new(
        r#"{
            "source": {"location": "/dev/null"},
            "graph": {
                "demux": "identity",
                "parser": "identity",
                "decoder": "identity",
                "sink": "fakesink"
            }
        }"#,
    )
    .unwrap();
    let handle = unsafe { vidpipe_player_new(config.as_ptr()) };
    assert!(handle > 0, "player_new returned {handle}");
    handle
}

#[test]
fn init_is_idempotent() {
    init();
    // A second call must not re-initialize anything; it reports the first
    // call's outcome.
    assert_eq!(unsafe { vidpipe_init(std::ptr::null()) }, 0);
}

#[test]
fn player_lifecycle_round_trip() {
    init();
    let player = new_core_player();

    assert_eq!(vidpipe_player_build(player), 0);
    assert_eq!(vidpipe_player_stop(player), 0);
    assert_eq!(vidpipe_player_free(player), 0);

    // The handle is dead now.
    assert!(vidpipe_player_build(player) < 0);
    assert!(vidpipe_player_free(player) < 0);
}

#[test]
fn invalid_handles_report_codes_not_crashes() {
    init();
    assert!(vidpipe_player_build(0) < 0);
    assert!(vidpipe_player_play(-7) < 0);
    assert!(vidpipe_player_stop(9999) < 0);
    assert!(vidpipe_surface_unbind(0) < 0);
    assert!(vidpipe_surface_attach_player(9999) < 0);
}

#[test]
fn bad_configuration_is_a_negative_code() {
    init();
    let not_json = CString::new("not json").unwrap();
    assert!(unsafe { vidpipe_player_new(not_json.as_ptr()) } < 0);

    let empty_parser = CString::new(r#"{"graph": {"parser": ""}}"#).unwrap();
    assert!(unsafe { vidpipe_player_new(empty_parser.as_ptr()) } < 0);
}

#[test]
fn default_config_is_accepted_for_null_and_empty() {
    init();
    let player = unsafe { vidpipe_player_new(std::ptr::null()) };
    assert!(player > 0);
    assert_eq!(vidpipe_player_free(player), 0);

    let empty = CString::new("").unwrap();
    let player = unsafe { vidpipe_player_new(empty.as_ptr()) };
    assert!(player > 0);
    assert_eq!(vidpipe_player_free(player), 0);
}

#[test]
fn surface_calls_respect_pipeline_state() {
    init();
    let player = new_core_player();

    // No pipeline yet.
    assert!(vidpipe_surface_unbind(player) < 0);
    assert!(unsafe { vidpipe_surface_bind(player, std::ptr::null_mut()) } < 0);

    assert_eq!(vidpipe_player_build(player), 0);

    // fakesink has no overlay interface; the bind must fail with a code,
    // not reach a missing capability.
    let fake_window = 0x5afe as *mut std::ffi::c_void;
    assert!(unsafe { vidpipe_surface_bind(player, fake_window) } < 0);

    assert_eq!(vidpipe_player_free(player), 0);
}

#[test]
fn play_without_build_is_rejected() {
    init();
    let player = new_core_player();
    assert!(vidpipe_player_play(player) < 0);
    assert_eq!(vidpipe_player_free(player), 0);
}

#[test]
fn arithmetic_helpers_add() {
    assert_eq!(vidpipe_sum(2, 40), 42);
    assert_eq!(vidpipe_sum(-5, 5), 0);
    // vidpipe_sum_long_running blocks its thread for five seconds and is
    // deliberately not exercised here.
}
