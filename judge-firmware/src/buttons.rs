use crate::clock;
use arduino_hal::hal::port::Dynamic;
use arduino_hal::port::mode::{Input, PullUp};
use arduino_hal::port::Pin;
use avr_device::atmega2560::EXINT;
use avr_device::interrupt;
use core::cell::{Cell, RefCell};
use judge_core::buttons::{ButtonEvent, ButtonQueue, PlayerButton};

type Mutex<T> = interrupt::Mutex<T>;

/// Attack button, pin 15 (PJ0 / PCINT9)
static ATTACK_PIN: Mutex<Cell<Option<Pin<Input<PullUp>, Dynamic>>>> = Mutex::new(Cell::new(None));

/// Dodge button, pin 14 (PJ1 / PCINT10)
static DODGE_PIN: Mutex<Cell<Option<Pin<Input<PullUp>, Dynamic>>>> = Mutex::new(Cell::new(None));

/// External interrupt control block, shared with the handler so it can
/// mask a button that just fired.
static EXINT_REG: Mutex<RefCell<Option<EXINT>>> = Mutex::new(RefCell::new(None));

/// Debounced press events, handler-fed, main-loop-drained.
static QUEUE: Mutex<RefCell<ButtonQueue>> = Mutex::new(RefCell::new(ButtonQueue::new()));

const ATTACK_MASK: u8 = 1 << 1; // PCINT9
const DODGE_MASK: u8 = 1 << 2; // PCINT10

/**
Registers both button pins and enables their pin change interrupt bank.
*/
pub fn init(exint: EXINT, attack: Pin<Input<PullUp>, Dynamic>, dodge: Pin<Input<PullUp>, Dynamic>) {
    interrupt::free(|cs| {
        exint
            .pcmsk1
            .modify(|r, w| unsafe { w.bits(r.bits() | ATTACK_MASK | DODGE_MASK) });
        // PCIE1 turns the bank on
        exint.pcicr.modify(|r, w| unsafe { w.bits(r.bits() | 0b010) });

        ATTACK_PIN.borrow(cs).set(Some(attack));
        DODGE_PIN.borrow(cs).set(Some(dodge));
        EXINT_REG.borrow(cs).replace(Some(exint));
    });
}

/// Oldest pending press, if any.
pub fn next_event() -> Option<ButtonEvent> {
    interrupt::free(|cs| QUEUE.borrow(cs).borrow_mut().pop())
}

/// Accept presses again after the main loop handled the pending ones.
pub fn rearm_all() {
    interrupt::free(|cs| {
        QUEUE.borrow(cs).borrow_mut().rearm_all();
        unmask(cs, ATTACK_MASK | DODGE_MASK);
    });
}

/// Drop anything pending, e.g. presses made between sessions.
pub fn clear() {
    interrupt::free(|cs| {
        QUEUE.borrow(cs).borrow_mut().clear();
        unmask(cs, ATTACK_MASK | DODGE_MASK);
    });
}

fn unmask(cs: interrupt::CriticalSection, bits: u8) {
    if let Some(exint) = EXINT_REG.borrow(cs).borrow().as_ref() {
        exint.pcmsk1.modify(|r, w| unsafe { w.bits(r.bits() | bits) });
    }
}

fn mask(cs: interrupt::CriticalSection, bits: u8) {
    if let Some(exint) = EXINT_REG.borrow(cs).borrow().as_ref() {
        exint.pcmsk1.modify(|r, w| unsafe { w.bits(r.bits() & !bits) });
    }
}

/**
Pin change interrupt for the two player buttons. Records the press with
its timestamp and masks the button so contact bounce cannot fire again
before the main loop re-arms it.
*/
#[avr_device::interrupt(atmega2560)]
#[allow(non_snake_case)]
fn PCINT1() {
    interrupt::free(|cs| {
        let now = clock::millis();
        let mut queue = QUEUE.borrow(cs).borrow_mut();

        if let Some(pin) = ATTACK_PIN.borrow(cs).take() {
            if pin.is_low() && queue.record(PlayerButton::Attack, now) {
                mask(cs, ATTACK_MASK);
            }
            ATTACK_PIN.borrow(cs).set(Some(pin));
        }

        if let Some(pin) = DODGE_PIN.borrow(cs).take() {
            if pin.is_low() && queue.record(PlayerButton::Dodge, now) {
                mask(cs, DODGE_MASK);
            }
            DODGE_PIN.borrow(cs).set(Some(pin));
        }
    });
}
