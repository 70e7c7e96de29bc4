//! Debounced player-button events.
//!
//! The pin-change handlers push into this queue; the main loop drains it
//! once per round and re-arms. A button that fired stays dead until its
//! re-arm, so a bouncing contact cannot double-count one physical press.

use heapless::Deque;
use ufmt::derive::uDebug;

#[derive(Clone, Copy, PartialEq, Eq, Debug, uDebug)]
pub enum PlayerButton {
    Attack,
    Dodge,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, uDebug)]
pub struct ButtonEvent {
    pub button: PlayerButton,
    pub at_ms: u32,
}

pub const QUEUE_DEPTH: usize = 8;

pub struct ButtonQueue {
    events: Deque<ButtonEvent, QUEUE_DEPTH>,
    armed: [bool; 2],
}

impl ButtonQueue {
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
            armed: [true; 2],
        }
    }

    /// Handler side. Returns whether the press was taken; a disarmed
    /// button or a full queue drops it.
    pub fn record(&mut self, button: PlayerButton, now_ms: u32) -> bool {
        let slot = button as usize;
        if !self.armed[slot] {
            return false;
        }
        self.armed[slot] = false;
        self.events.push_back(ButtonEvent { button, at_ms: now_ms }).is_ok()
    }

    /// Main-loop side, oldest press first.
    pub fn pop(&mut self) -> Option<ButtonEvent> {
        self.events.pop_front()
    }

    pub fn is_armed(&self, button: PlayerButton) -> bool {
        self.armed[button as usize]
    }

    pub fn rearm(&mut self, button: PlayerButton) {
        self.armed[button as usize] = true;
    }

    pub fn rearm_all(&mut self) {
        self.armed = [true; 2];
    }

    /// Drop anything pending and accept presses again.
    pub fn clear(&mut self) {
        self.events.clear();
        self.rearm_all();
    }
}

impl Default for ButtonQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_press_is_taken_once_until_rearmed() {
        let mut q = ButtonQueue::new();
        assert!(q.record(PlayerButton::Attack, 10));
        // Contact bounce: same button again, no re-arm in between.
        assert!(!q.record(PlayerButton::Attack, 11));
        assert!(!q.record(PlayerButton::Attack, 12));

        assert_eq!(
            q.pop(),
            Some(ButtonEvent { button: PlayerButton::Attack, at_ms: 10 })
        );
        assert_eq!(q.pop(), None);

        q.rearm(PlayerButton::Attack);
        assert!(q.record(PlayerButton::Attack, 50));
        assert_eq!(
            q.pop(),
            Some(ButtonEvent { button: PlayerButton::Attack, at_ms: 50 })
        );
    }

    #[test]
    fn buttons_arm_independently() {
        let mut q = ButtonQueue::new();
        assert!(q.record(PlayerButton::Attack, 1));
        assert!(q.record(PlayerButton::Dodge, 2));
        assert!(!q.record(PlayerButton::Dodge, 3));
        assert!(!q.is_armed(PlayerButton::Attack));
        assert!(!q.is_armed(PlayerButton::Dodge));

        // Oldest first, timestamps kept.
        assert_eq!(q.pop().unwrap().at_ms, 1);
        assert_eq!(q.pop().unwrap().button, PlayerButton::Dodge);
    }

    #[test]
    fn a_full_queue_drops_the_press() {
        let mut q = ButtonQueue::new();
        for n in 0..QUEUE_DEPTH as u32 {
            q.rearm_all();
            assert!(q.record(PlayerButton::Attack, n));
        }
        q.rearm_all();
        assert!(!q.record(PlayerButton::Attack, 99));
    }

    #[test]
    fn clear_empties_and_rearms() {
        let mut q = ButtonQueue::new();
        q.record(PlayerButton::Attack, 1);
        q.record(PlayerButton::Dodge, 2);
        q.clear();
        assert_eq!(q.pop(), None);
        assert!(q.is_armed(PlayerButton::Attack));
        assert!(q.is_armed(PlayerButton::Dodge));
    }
}
