// minifb only gives us polled mouse state once per frame.
// PointerSampler diffs consecutive samples into down/move/up events for the canvas.

use crate::pen::Buttons;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Down { x: i32, y: i32, buttons: Buttons },
    Move { x: i32, y: i32, buttons: Buttons },
    Up,
}

#[derive(Default)]
pub struct PointerSampler {
    held: Buttons,
    down_sent: bool, // a Down went out for the current press
    last_pos: Option<(i32, i32)>,
}

impl PointerSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's mouse state. `pos` is None when the window reports no position.
    pub fn sample(&mut self, pos: Option<(i32, i32)>, buttons: Buttons) -> Option<PointerEvent> {
        let was_held = !self.held.is_empty();
        let is_held = !buttons.is_empty();
        self.held = buttons;

        let event = match (is_held, pos) {
            (false, _) if was_held => {
                self.down_sent = false;
                Some(PointerEvent::Up)
            }
            (true, Some((x, y))) if !self.down_sent => {
                self.down_sent = true;
                Some(PointerEvent::Down { x, y, buttons })
            }
            (true, Some((x, y))) if self.last_pos != Some((x, y)) => {
                Some(PointerEvent::Move { x, y, buttons })
            }
            _ => None,
        };
        if pos.is_some() {
            self.last_pos = pos;
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_drag_release() {
        let mut s = PointerSampler::new();
        assert_eq!(s.sample(Some((1, 1)), Buttons::NONE), None);
        assert_eq!(
            s.sample(Some((1, 1)), Buttons::LEFT),
            Some(PointerEvent::Down { x: 1, y: 1, buttons: Buttons::LEFT })
        );
        assert_eq!(s.sample(Some((1, 1)), Buttons::LEFT), None, "no move without motion");
        assert_eq!(
            s.sample(Some((4, 2)), Buttons::LEFT),
            Some(PointerEvent::Move { x: 4, y: 2, buttons: Buttons::LEFT })
        );
        assert_eq!(s.sample(Some((4, 2)), Buttons::NONE), Some(PointerEvent::Up));
        assert_eq!(s.sample(Some((9, 9)), Buttons::NONE), None);
    }

    #[test]
    fn release_is_reported_even_without_position() {
        let mut s = PointerSampler::new();
        s.sample(Some((0, 0)), Buttons::RIGHT);
        assert_eq!(s.sample(None, Buttons::NONE), Some(PointerEvent::Up));
    }

    #[test]
    fn press_without_position_waits_for_one() {
        let mut s = PointerSampler::new();
        assert_eq!(s.sample(None, Buttons::LEFT), None);
        // button still held, the press starts where the pointer first shows up
        assert_eq!(
            s.sample(Some((3, 3)), Buttons::LEFT),
            Some(PointerEvent::Down { x: 3, y: 3, buttons: Buttons::LEFT })
        );
    }
}
