//! Keyboard-driven grading.
//!
//! A fixed key table per grading scale. The mapping must never fire while
//! focus sits in a text-entry control, so the caller reports that flag and
//! gets `None` back unconditionally when it is set.

use super::GradingScale;

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    ToggleReveal,
    Grade(u8),
}

/// Map a key to a session command under the given scale.
///
/// Space toggles reveal in both scales. On the 3-point scale the three
/// buttons `1`/`2`/`3` grade hard/good/easy as qualities 2/3/5; on the
/// 5-point scale digits grade literally and `s` skips with quality 2.
/// Returns `None` for unmapped keys and always when `in_text_entry` is set.
pub fn map_key(key: char, scale: GradingScale, in_text_entry: bool) -> Option<SessionCommand> {
    if in_text_entry {
        return None;
    }
    if key == ' ' {
        return Some(SessionCommand::ToggleReveal);
    }
    let quality = match scale {
        GradingScale::ThreePoint => match key {
            '1' => 2,
            '2' => 3,
            '3' => 5,
            _ => return None,
        },
        GradingScale::FivePoint => match key {
            '1'..='5' => key as u8 - b'0',
            's' | 'S' => 2,
            _ => return None,
        },
    };
    Some(SessionCommand::Grade(quality))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_point_table() {
        let scale = GradingScale::ThreePoint;
        assert_eq!(map_key('1', scale, false), Some(SessionCommand::Grade(2)));
        assert_eq!(map_key('2', scale, false), Some(SessionCommand::Grade(3)));
        assert_eq!(map_key('3', scale, false), Some(SessionCommand::Grade(5)));
        assert_eq!(map_key('4', scale, false), None);
        assert_eq!(map_key('s', scale, false), None);
    }

    #[test]
    fn five_point_table() {
        let scale = GradingScale::FivePoint;
        for (key, quality) in [('1', 1), ('2', 2), ('3', 3), ('4', 4), ('5', 5)] {
            assert_eq!(map_key(key, scale, false), Some(SessionCommand::Grade(quality)));
        }
        assert_eq!(map_key('s', scale, false), Some(SessionCommand::Grade(2)));
        assert_eq!(map_key('S', scale, false), Some(SessionCommand::Grade(2)));
        assert_eq!(map_key('6', scale, false), None);
    }

    #[test]
    fn space_toggles_reveal() {
        assert_eq!(
            map_key(' ', GradingScale::ThreePoint, false),
            Some(SessionCommand::ToggleReveal)
        );
        assert_eq!(
            map_key(' ', GradingScale::FivePoint, false),
            Some(SessionCommand::ToggleReveal)
        );
    }

    #[test]
    fn text_entry_suppresses_everything() {
        for key in [' ', '1', '2', '3', '5', 's'] {
            assert_eq!(map_key(key, GradingScale::ThreePoint, true), None);
            assert_eq!(map_key(key, GradingScale::FivePoint, true), None);
        }
    }
}
