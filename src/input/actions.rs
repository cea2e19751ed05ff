//! Game action definitions

use macroquad::input::KeyCode;

/// Everything the player can ask for from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Fire,

    // System
    ToggleDebug,
    Quit,
}

impl Action {
    #[cfg(test)]
    pub const ALL: [Action; 6] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::Fire,
        Action::ToggleDebug,
        Action::Quit,
    ];
}

/// Default key for each action. An action may have several keys.
pub fn default_bindings() -> Vec<(Action, KeyCode)> {
    vec![
        (Action::MoveLeft, KeyCode::A),
        (Action::MoveLeft, KeyCode::Left),
        (Action::MoveRight, KeyCode::D),
        (Action::MoveRight, KeyCode::Right),
        (Action::Jump, KeyCode::K),
        (Action::Jump, KeyCode::Space),
        (Action::Fire, KeyCode::J),
        (Action::ToggleDebug, KeyCode::F2),
        (Action::Quit, KeyCode::Escape),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_is_bound() {
        let bindings = default_bindings();
        for action in Action::ALL {
            assert!(
                bindings.iter().any(|(a, _)| *a == action),
                "{:?} has no key",
                action
            );
        }
    }

    #[test]
    fn test_no_key_is_bound_twice() {
        let bindings = default_bindings();
        for (i, (_, key)) in bindings.iter().enumerate() {
            assert!(bindings[i + 1..].iter().all(|(_, other)| other != key));
        }
    }
}
