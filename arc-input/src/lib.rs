/// Commands that can be sent to a running progress view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Jump or animate to an absolute progress value.
    SetProgress { value: f32, animated: bool },
    /// Move the progress by a relative amount, animated.
    Nudge(f32),
    /// Rotate the gap to the next side (bottom, left, top, right).
    Rotate,
    /// Flip between clockwise and counter-clockwise drawing.
    ToggleDirection,
    Shutdown,
}

impl Command {
    /// Step used by the keyboard bindings of the simulators.
    pub const NUDGE_STEP: f32 = 0.1;

    /// Maps the shared keyboard layout of the simulators to commands.
    ///
    /// `+`/`-` nudge, digits jump to tenths (`0` is 100%), `r` rotates,
    /// `d` flips the direction and `q` quits.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '+' | '=' => Some(Command::Nudge(Self::NUDGE_STEP)),
            '-' | '_' => Some(Command::Nudge(-Self::NUDGE_STEP)),
            'r' | 'R' => Some(Command::Rotate),
            'd' | 'D' => Some(Command::ToggleDirection),
            'q' | 'Q' => Some(Command::Shutdown),
            '0' => Some(Command::SetProgress {
                value: 1.0,
                animated: true,
            }),
            c @ '1'..='9' => c.to_digit(10).map(|d| Command::SetProgress {
                value: d as f32 / 10.0,
                animated: true,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_tenths() {
        assert_eq!(
            Command::from_key('3'),
            Some(Command::SetProgress {
                value: 0.3,
                animated: true
            })
        );
        assert_eq!(
            Command::from_key('0'),
            Some(Command::SetProgress {
                value: 1.0,
                animated: true
            })
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert_eq!(Command::from_key('x'), None);
        assert_eq!(Command::from_key('q'), Some(Command::Shutdown));
    }
}
