use arduino_hal::hal::port::PE3;
use arduino_hal::port::mode::PwmOutput;
use arduino_hal::port::Pin;
use arduino_hal::simple_pwm::Timer3Pwm;
use judge_core::io::ScoreMeter;

// Timer 3 runs at prescale 1024: a full 8-bit sweep every ~16.4 ms, close
// enough to the 20 ms servo frame. One duty count is ~64 us of pulse.
const PULSE_MIN_DUTY: u8 = 16; // ~1.0 ms, hard left
const PULSE_MAX_DUTY: u8 = 31; // ~2.0 ms, hard right
const SWEEP_DEG: u16 = 180;

/// Time the servo gets to physically reach a new position.
const SETTLE_MS: u16 = 200;

/**
The servo score meter on the timer 3 PWM pin.

Positions are degrees; the calibrated playing arc is 10..=170 so the
pointer never hits the housing.
*/
pub struct ServoMeter {
    pin: Pin<PwmOutput<Timer3Pwm>, PE3>,
}

impl ServoMeter {
    pub fn new(mut pin: Pin<PwmOutput<Timer3Pwm>, PE3>) -> Self {
        pin.enable();
        Self { pin }
    }
}

impl ScoreMeter for ServoMeter {
    fn set_position(&mut self, deg: u8) {
        let span = (PULSE_MAX_DUTY - PULSE_MIN_DUTY) as u16;
        let duty = PULSE_MIN_DUTY as u16 + (deg as u16 * span) / SWEEP_DEG;
        self.pin.set_duty(duty as u8);
        // let the horn get there before anything else happens
        arduino_hal::delay_ms(SETTLE_MS);
    }
}
