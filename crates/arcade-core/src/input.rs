use serde::{Deserialize, Serialize};

/// Held directional keys plus the one-shot pointer press for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Set on the frame a pointer/tap went down. Consumed once.
    pub pointer_pressed: bool,
}

impl InputState {
    /// Fold a newer sample into this one.
    ///
    /// Held keys always take the newest value. The pointer press is an edge,
    /// so it accumulates until a tick consumes it; otherwise a press in frame
    /// N would be lost to a release in frame N+1 before the tick runs.
    pub fn merge(&mut self, newer: &InputState) {
        self.left = newer.left;
        self.right = newer.right;
        self.up = newer.up;
        self.down = newer.down;
        if newer.pointer_pressed {
            self.pointer_pressed = true;
        }
    }

    /// Return and clear the pointer press.
    pub fn take_pointer_press(&mut self) -> bool {
        std::mem::take(&mut self.pointer_pressed)
    }

    pub fn encode(&self) -> Vec<u8> {
        rmp_serde::to_vec(self).unwrap_or_default()
    }

    pub fn decode(data: &[u8]) -> Option<Self> {
        rmp_serde::from_slice(data).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_pointer_edge() {
        let mut pending = InputState {
            pointer_pressed: true,
            ..Default::default()
        };
        pending.merge(&InputState {
            right: true,
            ..Default::default()
        });
        assert!(pending.right);
        assert!(pending.pointer_pressed, "press must survive a later release");
    }

    #[test]
    fn merge_overwrites_held_keys() {
        let mut pending = InputState {
            left: true,
            up: true,
            ..Default::default()
        };
        pending.merge(&InputState::default());
        assert!(!pending.left);
        assert!(!pending.up);
    }

    #[test]
    fn take_pointer_press_clears() {
        let mut input = InputState {
            pointer_pressed: true,
            ..Default::default()
        };
        assert!(input.take_pointer_press());
        assert!(!input.take_pointer_press());
    }

    #[test]
    fn encoded_input_decodes() {
        let input = InputState {
            right: true,
            up: true,
            ..Default::default()
        };
        assert_eq!(InputState::decode(&input.encode()), Some(input));
    }

    #[test]
    fn garbage_does_not_decode() {
        assert_eq!(InputState::decode(&[0xc1, 0xff, 0x00]), None);
    }
}
