use avr_device::atmega2560::TC0;
use core::cell::{Cell, RefCell};
use judge_core::io::Clock;

// Type alias for avr_device::interrupt::Mutex to Mutex
type Mutex<T> = avr_device::interrupt::Mutex<T>;

/// Millisecond counter, bumped by the TC0 compare-match interrupt.
static MILLIS: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

/// The timer peripheral stays reachable so `jitter` can read its raw
/// counter byte.
static TICK_TC0: Mutex<RefCell<Option<TC0>>> = Mutex::new(RefCell::new(None));

/**
Ticker with millisecond precision behind `millis`, driving every timeout
and timestamp in the firmware.

16 MHz / 64 gives 250 kHz; counting to 250 makes the compare match fire
every millisecond.
*/
pub struct MillisTicker;

impl MillisTicker {
    pub fn init(tc0: TC0) {
        // enable CTC (clear timer on compare match)
        tc0.tccr0a.write(|w| w.wgm0().ctc());
        // match every 250 ticks
        tc0.ocr0a.write(|w| unsafe { w.bits(249) });
        // choose the prescaler of the counter register
        tc0.tccr0b.write(|w| w.cs0().prescale_64());
        // enable compare match interrupt
        tc0.timsk0.write(|w| w.ocie0a().set_bit());

        avr_device::interrupt::free(|cs| {
            TICK_TC0.borrow(cs).replace(Some(tc0));
        })
    }
}

/// Milliseconds since `MillisTicker::init`. Wraps after ~49 days, far past
/// any party.
pub fn millis() -> u32 {
    avr_device::interrupt::free(|cs| MILLIS.borrow(cs).get())
}

/// Raw counter byte. Two boards never read the same value at the "same"
/// moment, which makes this a usable seed source.
pub fn jitter() -> u8 {
    avr_device::interrupt::free(|cs| {
        TICK_TC0
            .borrow(cs)
            .borrow()
            .as_ref()
            .map(|tc0| tc0.tcnt0.read().bits())
            .unwrap_or(0)
    })
}

/**
Interrupt triggered every millisecond
*/
#[avr_device::interrupt(atmega2560)]
#[allow(non_snake_case)]
fn TIMER0_COMPA() {
    avr_device::interrupt::free(|cs| {
        let counter = MILLIS.borrow(cs);
        counter.set(counter.get().wrapping_add(1));
    });
}

/// `judge_core` clock over the ticker and the busy-wait delay.
pub struct BoardClock;

impl Clock for BoardClock {
    fn now_ms(&self) -> u32 {
        millis()
    }

    fn delay_ms(&mut self, ms: u16) {
        arduino_hal::delay_ms(ms);
    }
}
