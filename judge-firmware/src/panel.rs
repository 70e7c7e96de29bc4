use arduino_hal::hal::port::{Dynamic, PH3};
use arduino_hal::port::mode::{Output, PwmOutput};
use arduino_hal::port::Pin;
use arduino_hal::simple_pwm::Timer4Pwm;
use judge_core::io::{IndicatorPanel, PlayerSide};

/**
The LED cluster: the 4-bit bank, the two round-end player indicators and
the analog glow LED on the timer 4 PWM pin.
*/
pub struct LedPanel {
    bank: [Pin<Output, Dynamic>; 4],
    local: Pin<Output, Dynamic>,
    peer: Pin<Output, Dynamic>,
    glow: Pin<PwmOutput<Timer4Pwm>, PH3>,
}

impl LedPanel {
    pub fn new(
        bank: [Pin<Output, Dynamic>; 4],
        local: Pin<Output, Dynamic>,
        peer: Pin<Output, Dynamic>,
        mut glow: Pin<PwmOutput<Timer4Pwm>, PH3>,
    ) -> Self {
        glow.enable();
        glow.set_duty(0);
        let mut panel = Self { bank, local, peer, glow };
        panel.clear();
        panel
    }
}

impl IndicatorPanel for LedPanel {
    fn set_bank(&mut self, bits: u8) {
        for (index, led) in self.bank.iter_mut().enumerate() {
            if bits & (1 << index) != 0 {
                led.set_high();
            } else {
                led.set_low();
            }
        }
    }

    fn set_player(&mut self, side: PlayerSide, on: bool) {
        let led = match side {
            PlayerSide::Local => &mut self.local,
            PlayerSide::Peer => &mut self.peer,
        };
        if on {
            led.set_high();
        } else {
            led.set_low();
        }
    }

    fn set_glow(&mut self, level: u8) {
        self.glow.set_duty(level);
    }

    fn clear(&mut self) {
        self.set_bank(0);
        self.local.set_low();
        self.peer.set_low();
        self.glow.set_duty(0);
    }
}
