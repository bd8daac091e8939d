// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn action_for_key_transport_keys() {
    assert_eq!(action_for_key(" "), Some(KeyAction::ToggleStart));
    assert_eq!(action_for_key("r"), Some(KeyAction::Reset));
    assert_eq!(action_for_key("R"), Some(KeyAction::Reset));
    assert_eq!(action_for_key("m"), Some(KeyAction::ToggleMute));
    assert_eq!(action_for_key("M"), Some(KeyAction::ToggleMute));
}

#[test]
fn action_for_key_fullscreen_and_help() {
    assert_eq!(action_for_key("f"), Some(KeyAction::Fullscreen));
    assert_eq!(action_for_key("F"), Some(KeyAction::Fullscreen));
    assert_eq!(action_for_key("Enter"), Some(KeyAction::Fullscreen));
    assert_eq!(action_for_key("h"), Some(KeyAction::Help));
    assert_eq!(action_for_key("?"), Some(KeyAction::Help));
}

#[test]
fn action_for_key_digits_select_themes_by_position() {
    assert_eq!(action_for_key("1"), Some(KeyAction::Theme(0)));
    assert_eq!(action_for_key("3"), Some(KeyAction::Theme(2)));
    assert_eq!(action_for_key("5"), Some(KeyAction::Theme(4)));
    // only five themes exist
    assert_eq!(action_for_key("0"), None);
    assert_eq!(action_for_key("6"), None);
}

#[test]
fn action_for_key_volume_arrows() {
    assert_eq!(action_for_key("ArrowUp"), Some(KeyAction::VolumeUp));
    assert_eq!(action_for_key("ArrowDown"), Some(KeyAction::VolumeDown));
    assert_eq!(action_for_key("ArrowLeft"), None);
}

#[test]
fn action_for_key_edge_cases() {
    assert_eq!(action_for_key(""), None);
    assert_eq!(action_for_key("notakey"), None);
    assert_eq!(action_for_key("Escape"), None);
    assert_eq!(action_for_key("  "), None);
}
