//! Terminal key events → physical key codes understood by the dispatcher.

use crossterm::event::KeyCode;

const LETTERS: [&str; 26] = [
    "KeyA", "KeyB", "KeyC", "KeyD", "KeyE", "KeyF", "KeyG", "KeyH", "KeyI", "KeyJ", "KeyK", "KeyL",
    "KeyM", "KeyN", "KeyO", "KeyP", "KeyQ", "KeyR", "KeyS", "KeyT", "KeyU", "KeyV", "KeyW", "KeyX",
    "KeyY", "KeyZ",
];

const DIGITS: [&str; 10] = [
    "Digit0", "Digit1", "Digit2", "Digit3", "Digit4", "Digit5", "Digit6", "Digit7", "Digit8",
    "Digit9",
];

/// Map a terminal key to the code of the physical key that produced it.
///
/// Terminals report characters, not positions, so shifted characters are
/// folded back onto their US-layout key (`Z` → `KeyZ`, `!` → `Digit1`).
pub fn dom_code(key: KeyCode) -> Option<&'static str> {
    match key {
        KeyCode::Up => Some("ArrowUp"),
        KeyCode::Down => Some("ArrowDown"),
        KeyCode::Char(c) => char_code(c),
        _ => None,
    }
}

fn char_code(c: char) -> Option<&'static str> {
    let c = c.to_ascii_lowercase();
    match c {
        'a'..='z' => Some(LETTERS[(c as u8 - b'a') as usize]),
        '0'..='9' => Some(DIGITS[(c as u8 - b'0') as usize]),
        ')' => Some("Digit0"),
        '!' => Some("Digit1"),
        '#' => Some("Digit3"),
        '$' => Some("Digit4"),
        '%' => Some("Digit5"),
        '&' => Some("Digit7"),
        '*' => Some("Digit8"),
        ',' | '<' => Some("Comma"),
        '.' | '>' => Some("Period"),
        '/' | '?' => Some("Slash"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saavy_piano::input::note_for_code;

    #[test]
    fn letters_and_digits() {
        assert_eq!(dom_code(KeyCode::Char('z')), Some("KeyZ"));
        assert_eq!(dom_code(KeyCode::Char('Z')), Some("KeyZ"));
        assert_eq!(dom_code(KeyCode::Char('1')), Some("Digit1"));
        assert_eq!(dom_code(KeyCode::Char('!')), Some("Digit1"));
    }

    #[test]
    fn punctuation_and_arrows() {
        assert_eq!(dom_code(KeyCode::Char(',')), Some("Comma"));
        assert_eq!(dom_code(KeyCode::Char('?')), Some("Slash"));
        assert_eq!(dom_code(KeyCode::Up), Some("ArrowUp"));
        assert_eq!(dom_code(KeyCode::Esc), None);
        assert_eq!(dom_code(KeyCode::Char('-')), None);
    }

    #[test]
    fn every_letter_row_key_reaches_a_note() {
        for c in "zxcvbnm,./qwertyuiopsdghjl1345780".chars() {
            let code = dom_code(KeyCode::Char(c)).unwrap();
            assert!(note_for_code(code).is_some(), "{c} -> {code}");
        }
    }
}
