#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;
use rtic::app;

use alarm_clock::Effect;

#[app(device = rp_pico::hal::pac, peripherals = true, dispatchers = [I2C0_IRQ])]
mod app {
    use super::*;
    use alarm_clock::{
        banner::{self, MessageSink},
        board::IoBoard,
        config::{SAMPLE_PERIOD_US, TICK_PERIOD_US, TONE_HZ},
        render::{brightness_duty, PinPort, Renderer},
        AlarmSetting, Controller,
    };
    use embedded_hal::adc::OneShot;
    use embedded_hal::digital::v2::ToggleableOutputPin;
    use embedded_hal::PwmPin;
    use hd44780_driver::{bus::I2CBus, Cursor, HD44780};
    use rp_pico::hal::{
        adc::{Adc, AdcPin},
        clocks::{init_clocks_and_plls, Clock},
        fugit::{ExtU32, RateExtU32},
        gpio::{
            bank0::{Gpio14, Gpio16, Gpio17, Gpio18, Gpio19, Gpio2, Gpio25, Gpio26, Gpio3},
            DynPinId, FunctionI2C, FunctionSioInput, FunctionSioOutput, FunctionSpi, Pin,
            PullDown, PullNone, PullUp,
        },
        pac::{I2C1, SPI0},
        pwm::{FreeRunning, Pwm0, Pwm2, Slice, Slices},
        sio::Sio,
        spi::{Enabled, Spi},
        timer::{Alarm, Alarm0, Alarm1, Timer},
        watchdog::Watchdog,
        I2C,
    };

    type OutPin<Id> = Pin<Id, FunctionSioOutput, PullDown>;
    type SegmentPin = Pin<DynPinId, FunctionSioOutput, PullDown>;

    // SPI0 to the shift-register I/O board
    type Spi0 = Spi<
        Enabled,
        SPI0,
        (
            Pin<Gpio19, FunctionSpi, PullDown>,
            Pin<Gpio16, FunctionSpi, PullDown>,
            Pin<Gpio18, FunctionSpi, PullDown>,
        ),
    >;
    type Board = IoBoard<Spi0, OutPin<Gpio17>, OutPin<Gpio14>>;
    type I2c1 = I2C<I2C1, (Pin<Gpio2, FunctionI2C, PullUp>, Pin<Gpio3, FunctionI2C, PullUp>)>;
    type LightPin = AdcPin<Pin<Gpio26, FunctionSioInput, PullNone>>;

    // Counter steps per tone period.
    const TONE_STEPS: u32 = 1_000;
    const DIMMER_TOP: u16 = u16::MAX;
    const LCD_ADDRESS: u8 = 0x27;

    /// Character LCD behind a PCF8574 backpack.
    pub struct Lcd {
        driver: HD44780<I2CBus<I2c1>>,
        delay: Timer,
    }

    impl MessageSink for Lcd {
        type Error = hd44780_driver::error::Error;

        fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error> {
            self.driver.set_cursor_pos(row * 0x40 + col, &mut self.delay)
        }

        fn write_str(&mut self, text: &str) -> Result<(), Self::Error> {
            self.driver.write_str(text, &mut self.delay)
        }
    }

    #[shared]
    struct Shared {
        controller: Controller,
        tick_alarm: Alarm0,
        buzzer: Slice<Pwm2, FreeRunning>,
    }

    #[local]
    struct Local {
        led: OutPin<Gpio25>,
        sample_alarm: Alarm1,
        board: Board,
        adc: Adc,
        light: LightPin,
        dimmer: Slice<Pwm0, FreeRunning>,
        lcd: Lcd,
        renderer: Renderer<PinPort<SegmentPin>, Timer>,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let external_xtal_freq_hz = 12_000_000u32;
        let clocks = init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut tick_alarm = timer.alarm_0().unwrap();
        tick_alarm.schedule(TICK_PERIOD_US.micros()).unwrap();
        tick_alarm.enable_interrupt();

        let mut sample_alarm = timer.alarm_1().unwrap();
        sample_alarm.schedule(SAMPLE_PERIOD_US.micros()).unwrap();
        sample_alarm.enable_interrupt();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let led = pins.led.into_push_pull_output();

        // Display: segments a..g and dot on gpio6..13, cell select on gpio20..22.
        let segments = [
            pins.gpio6.into_push_pull_output().into_dyn_pin(),
            pins.gpio7.into_push_pull_output().into_dyn_pin(),
            pins.gpio8.into_push_pull_output().into_dyn_pin(),
            pins.gpio9.into_push_pull_output().into_dyn_pin(),
            pins.gpio10.into_push_pull_output().into_dyn_pin(),
            pins.gpio11.into_push_pull_output().into_dyn_pin(),
            pins.gpio12.into_push_pull_output().into_dyn_pin(),
            pins.gpio13.into_push_pull_output().into_dyn_pin(),
        ];
        let select = [
            pins.gpio20.into_push_pull_output().into_dyn_pin(),
            pins.gpio21.into_push_pull_output().into_dyn_pin(),
            pins.gpio22.into_push_pull_output().into_dyn_pin(),
        ];
        let renderer = Renderer::new(PinPort::new(segments, select), timer);

        let mosi = pins.gpio19.into_function::<FunctionSpi>();
        let sck = pins.gpio18.into_function::<FunctionSpi>();
        let miso = pins.gpio16.into_function::<FunctionSpi>();
        let load = pins.gpio17.into_push_pull_output();
        let latch = pins.gpio14.into_push_pull_output();

        let spi = Spi::<_, _, _, 8>::new(pac.SPI0, (mosi, miso, sck));
        let spi = spi.init(
            &mut pac.RESETS,
            clocks.peripheral_clock.freq(),
            2_000_000u32.Hz(),
            &embedded_hal::spi::MODE_0,
        );
        let board = IoBoard::new(spi, load, latch).unwrap();

        let adc = Adc::new(pac.ADC, &mut pac.RESETS);
        let light = AdcPin::new(pins.gpio26.into_floating_input()).unwrap();

        let slices = Slices::new(pac.PWM, &mut pac.RESETS);
        let mut dimmer = slices.pwm0;
        dimmer.set_top(DIMMER_TOP);
        dimmer.enable();
        dimmer.channel_a.output_to(pins.gpio0);
        dimmer.channel_a.set_duty(DIMMER_TOP);

        let mut buzzer = slices.pwm2;
        let divider = clocks.system_clock.freq().to_Hz() / (TONE_HZ * TONE_STEPS);
        buzzer.set_div_int(divider as u8);
        buzzer.set_top((TONE_STEPS - 1) as u16);
        buzzer.enable();
        buzzer.channel_a.output_to(pins.gpio4);
        buzzer.channel_a.set_duty(0);

        let sda = pins.gpio2.into_function::<FunctionI2C>().into_pull_type::<PullUp>();
        let scl = pins.gpio3.into_function::<FunctionI2C>().into_pull_type::<PullUp>();
        let i2c = I2C::i2c1(
            pac.I2C1,
            sda,
            scl,
            100.kHz(),
            &mut pac.RESETS,
            clocks.system_clock.freq(),
        );
        let mut delay = timer;
        let mut driver = HD44780::new_i2c(i2c, LCD_ADDRESS, &mut delay).unwrap();
        driver.reset(&mut delay).unwrap();
        driver.clear(&mut delay).unwrap();
        driver.set_cursor_visibility(Cursor::Invisible, &mut delay).unwrap();
        let lcd = Lcd { driver, delay };

        defmt::info!("alarm clock up");

        (
            Shared {
                controller: Controller::new(),
                tick_alarm,
                buzzer,
            },
            Local {
                led,
                sample_alarm,
                board,
                adc,
                light,
                dimmer,
                lcd,
                renderer,
            },
            init::Monotonics(),
        )
    }

    // Time Base: 1 Hz
    #[task(binds = TIMER_IRQ_0, priority = 2, shared = [controller, tick_alarm, buzzer], local = [led])]
    fn tick(mut ctx: tick::Context) {
        ctx.shared.tick_alarm.lock(|alarm| {
            alarm.clear_interrupt();
            alarm.schedule(TICK_PERIOD_US.micros()).ok();
        });
        ctx.local.led.toggle().ok();

        let effects = ctx.shared.controller.lock(|c| c.tick());
        for effect in effects {
            log(&effect);
            if let Effect::Tone(on) = effect {
                ctx.shared.buzzer.lock(|b| sound(b, on));
            }
        }
    }

    // Sampling cycle: 1 kHz
    #[task(
        binds = TIMER_IRQ_1,
        priority = 1,
        shared = [controller, tick_alarm, buzzer],
        local = [sample_alarm, board, adc, light, dimmer]
    )]
    fn sample(mut ctx: sample::Context) {
        ctx.local.sample_alarm.clear_interrupt();
        ctx.local.sample_alarm.schedule(SAMPLE_PERIOD_US.micros()).ok();

        let reading: Result<u16, _> = nb::block!(ctx.local.adc.read(&mut *ctx.local.light));
        if let Ok(raw) = reading {
            // 12-bit sample
            let duty = brightness_duty((raw >> 4) as u8, DIMMER_TOP);
            ctx.local.dimmer.channel_a.set_duty(duty);
        }

        let indicator = ctx.shared.controller.lock(|c| c.indicator());
        let inputs = match ctx.local.board.exchange(indicator) {
            Ok(inputs) => inputs,
            Err(e) => {
                defmt::error!("i/o board: {}", e);
                return;
            }
        };

        let effects = ctx.shared.controller.lock(|c| c.sample_inputs(inputs));
        for effect in effects {
            log(&effect);
            match effect {
                Effect::TimeBase(run) => ctx.shared.tick_alarm.lock(|alarm| {
                    if run {
                        alarm.clear_interrupt();
                        alarm.schedule(TICK_PERIOD_US.micros()).ok();
                        alarm.enable_interrupt();
                    } else {
                        alarm.disable_interrupt();
                    }
                }),
                Effect::Tone(on) => ctx.shared.buzzer.lock(|b| sound(b, on)),
                Effect::Banner => {
                    let alarm = ctx.shared.controller.lock(|c| c.alarm());
                    if refresh_banner::spawn(alarm).is_err() {
                        defmt::warn!("banner refresh dropped");
                    }
                }
                _ => {}
            }
        }
    }

    #[task(priority = 1, capacity = 2, local = [lcd])]
    fn refresh_banner(ctx: refresh_banner::Context, alarm: AlarmSetting) {
        if let Err(e) = banner::show(ctx.local.lcd, &alarm) {
            defmt::error!("banner: {}", e);
        }
    }

    // Render Loop
    #[idle(shared = [controller], local = [renderer])]
    fn idle(mut ctx: idle::Context) -> ! {
        loop {
            let cells = ctx.shared.controller.lock(|c| c.display_cells());
            if let Err(e) = ctx.local.renderer.refresh(&cells) {
                defmt::error!("render: {}", e);
            }
        }
    }

    fn sound(buzzer: &mut Slice<Pwm2, FreeRunning>, on: bool) {
        let duty = if on { (TONE_STEPS / 2) as u16 } else { 0 };
        buzzer.channel_a.set_duty(duty);
    }
}

fn log(effect: &Effect) {
    match effect {
        Effect::ModeChanged { from, to } => defmt::info!("mode {} -> {}", from, to),
        Effect::TimeBase(run) => defmt::debug!("time base running: {}", run),
        Effect::Tone(on) => defmt::trace!("tone {}", on),
        Effect::AlarmTriggered => defmt::info!("alarm!"),
        Effect::Snoozed(next) => defmt::info!("snoozed until {}", next),
        Effect::Dismissed => defmt::info!("alarm dismissed"),
        Effect::Banner => defmt::debug!("banner refresh"),
    }
}
