//! Main file for the judge boards
//!
//! Two of these run the party game against each other over the serial
//! link; every round they agree on a microgame, score it and swing the
//! servo meter.

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

mod buttons;
mod clock;
mod link;
mod meter;
mod panel;
mod picker;
mod rng;
mod sound;

#[allow(unused_imports)]
use panic_halt as _;

use arduino_hal::prelude::*;
use arduino_hal::simple_pwm::Prescaler::{Prescale1024, Prescale64};
use arduino_hal::simple_pwm::{IntoPwmPin, Timer3Pwm, Timer4Pwm};
use ufmt::uwriteln;

use judge_core::io::{BoardIo, IndicatorPanel, PeerLink, SoundCue, Sounder};
use judge_core::round::play_round;
use judge_core::score::ScoreRules;
use judge_core::session::Session;

use crate::clock::{BoardClock, MillisTicker};
use crate::link::LinkPort;
use crate::meter::ServoMeter;
use crate::panel::LedPanel;
use crate::picker::SeededPicker;
use crate::sound::Piezo;

type Console = arduino_hal::hal::usart::Usart0<arduino_hal::DefaultClock>;

/*
PIN Configuration:

Arduino Mega2560 rev3

INPUT:
    Player Buttons (PCINT1)
        1. Attack: 15 PCINT9
        2. Dodge: 14 PCINT10

    Peer Link (USART1)
        1. RX1: 19
        2. TX1: 18

OUTPUT:
    Score Meter
        1. Servo signal: 5 (PWM, OC3A)

    LED Bank
        1. Bit 0: 22
        2. Bit 1: 23
        3. Bit 2: 24
        4. Bit 3: 25

    Player Indicators
        1. Local: 30
        2. Peer: 31

    Glow LED
        1. Level: 6 (PWM, OC4A)

    Piezo
        1. Speaker: 8
*/

/**
Entrypoint for the Program
*/
#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);

    // initialize the millisecond ticker
    MillisTicker::init(dp.TC0);

    // create a serial connection with the console output
    let mut console: Console = arduino_hal::default_serial!(dp, pins, 57600);

    // the peer board hangs off the second UART
    let peer_port = arduino_hal::Usart::new(
        dp.USART1,
        pins.d19,
        pins.d18.into_output(),
        9600.into_baudrate(),
    );

    let timer3 = Timer3Pwm::new(dp.TC3, Prescale1024);
    let timer4 = Timer4Pwm::new(dp.TC4, Prescale64);

    let mut io = BoardIo {
        meter: ServoMeter::new(pins.d5.into_output().into_pwm(&timer3)),
        panel: LedPanel::new(
            [
                pins.d22.into_output().downgrade(),
                pins.d23.into_output().downgrade(),
                pins.d24.into_output().downgrade(),
                pins.d25.into_output().downgrade(),
            ],
            pins.d30.into_output().downgrade(),
            pins.d31.into_output().downgrade(),
            pins.d6.into_output().into_pwm(&timer4),
        ),
        sounder: Piezo::new(pins.d8.into_output().downgrade()),
        clock: BoardClock,
    };

    buttons::init(
        dp.EXINT,
        pins.d15.into_pull_up_input().downgrade(),
        pins.d14.into_pull_up_input().downgrade(),
    );

    // enable interrupts for the device
    unsafe { avr_device::interrupt::enable() };

    let mut link = LinkPort::new(peer_port);
    let mut session = Session::new(ScoreRules::default());

    loop {
        let handshake = match link.handshake() {
            Ok(handshake) => handshake,
            Err(err) => {
                uwriteln!(&mut console, "handshake failed: {:?}", err).unwrap_infallible();
                io.sounder.play(SoundCue::LinkTrouble);
                arduino_hal::delay_ms(500);
                continue;
            }
        };
        uwriteln!(
            &mut console,
            "linked: first={} seed={}",
            handshake.first,
            handshake.seed
        )
        .unwrap_infallible();

        let mut game_picker = SeededPicker::new(handshake.seed);
        session.reset();
        session.update_display(&mut io.meter);
        io.panel.clear();
        buttons::clear();

        loop {
            // presses from the previous round, then open for new ones
            while let Some(event) = buttons::next_event() {
                uwriteln!(&mut console, "press: {:?}", event).unwrap_infallible();
            }
            buttons::rearm_all();

            if let Err(err) = play_round(&mut session, &mut io, &mut link, &mut game_picker) {
                uwriteln!(&mut console, "round aborted: {:?}", err).unwrap_infallible();
                session.abort_round();
                io.panel.clear();
                io.sounder.play(SoundCue::LinkTrouble);
                break;
            }

            let took = clock::millis().wrapping_sub(session.round_started_at());
            uwriteln!(
                &mut console,
                "round {}: score {} ({} ms)",
                session.rounds_played(),
                session.score(),
                took
            )
            .unwrap_infallible();
        }
    }
}
