/// Keyboard accelerators mirroring the on-screen controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleStart,
    Reset,
    ToggleMute,
    Fullscreen,
    Help,
    Theme(usize),
    VolumeUp,
    VolumeDown,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        " " => Some(KeyAction::ToggleStart),
        "r" | "R" => Some(KeyAction::Reset),
        "m" | "M" => Some(KeyAction::ToggleMute),
        "f" | "F" | "Enter" => Some(KeyAction::Fullscreen),
        "h" | "H" | "?" => Some(KeyAction::Help),
        "ArrowUp" => Some(KeyAction::VolumeUp),
        "ArrowDown" => Some(KeyAction::VolumeDown),
        "1" | "2" | "3" | "4" | "5" => key
            .parse::<usize>()
            .ok()
            .map(|d| KeyAction::Theme(d - 1)),
        _ => None,
    }
}
