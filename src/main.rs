#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel, signal::Signal};
use embassy_time::{Duration, Ticker, Timer};
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{
    battery::Battery,
    display::{BacklightPins, Display},
    vibrator::Vibrator,
};
use system::{
    bluetooth::{self, Server},
    host::FirmwareHost,
    time::TimeManager,
};

// Watchface
use pinetime_watchface::{
    config::{BATTERY_POLL_SECS, UTC_OFFSET_SECS},
    dispatch,
    ui::assets::Assets,
    BatteryState, Event, Host, TickTimer, Watchface, WatchfaceConfig,
};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

// Communication channels
static BATTERY_STATE: Signal<ThreadModeRawMutex, BatteryState> = Signal::new();
static LINK_STATE: Channel<ThreadModeRawMutex, bool, 4> = Channel::new();
static VIBRATE: Signal<ThreadModeRawMutex, ()> = Signal::new();

static SERVER: StaticCell<Server> = StaticCell::new();

/// Run the vibration motor whenever an alert is signaled
#[embassy_executor::task(pool_size = 1)]
async fn notify(mut vibrator: Vibrator) {
    loop {
        VIBRATE.wait().await;
        vibrator.double_pulse().await;
    }
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery, server: &'static Server) {
    loop {
        match battery.update().await {
            Ok(true) => {
                let state = battery.state();
                defmt::info!(
                    "Battery status: {}% ({})",
                    state.percent,
                    if state.charging {
                        "charging"
                    } else {
                        "discharging"
                    }
                );
                bluetooth::publish_battery_level(server, state.percent);
                BATTERY_STATE.signal(state);
            }
            Ok(false) => {}
            Err(e) => defmt::warn!("Battery measurement rejected: {}", e),
        }

        // Re-schedule the timer interrupt
        Timer::after(Duration::from_secs(BATTERY_POLL_SECS)).await;
    }
}

#[embassy_executor::task(pool_size = 1)]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task(pool_size = 1)]
async fn bluetooth_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    bluetooth::run(sd, server, &LINK_STATE).await
}

/// Owns the display and the watchface; all host events end up here.
#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(mut display: Display, mut host: FirmwareHost) {
    let mut face = Watchface::load(
        display.bounds(),
        WatchfaceConfig::DEFAULT,
        Assets::builtin(),
        &mut host,
    );
    let mut ticks = TickTimer::new(host.now());
    let mut tick = Ticker::every(Duration::from_secs(1));

    loop {
        if BATTERY_STATE.signaled() {
            let state = BATTERY_STATE.wait().await;
            host.set_battery(state);
            dispatch(&mut face, &mut host, Event::BatteryChanged(state));
        }

        // Drain all transitions so a short link loss still alerts
        while let Ok(connected) = LINK_STATE.try_receive() {
            host.set_connected(connected);
            dispatch(&mut face, &mut host, Event::ConnectivityChanged(connected));
        }

        let now = host.now();
        let units = ticks.poll(now);
        dispatch(&mut face, &mut host, Event::Tick(now, units));

        match face.render(display.lcd()) {
            Ok(true) => defmt::trace!("Watchface redrawn"),
            Ok(false) => {}
            Err(_) => defmt::warn!("Redraw failed, retrying on next tick"),
        }

        // Re-schedule the timer interrupt in 1s
        tick.next().await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut p = embassy_nrf::init(system::config::embassy_config());
    defmt::info!("Initializing");

    // Before any driver enables its interrupt
    system::config::set_app_interrupt_priorities();

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(&mut p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Battery
    let battery = Battery::init(saadc, Input::new(p.P0_12, Pull::None)).await;

    // Initialize vibration motor
    let vibrator = Vibrator::init(Output::new(p.P0_16, Level::High, OutputDrive::Standard));

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let backlight = BacklightPins::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
    );
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
        backlight,
    ));

    // Initialize Bluetooth
    let sd = Softdevice::enable(&bluetooth::softdevice_config());
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));
    let sd: &'static Softdevice = sd;

    let host = FirmwareHost::new(
        TimeManager::init(UTC_EPOCH, UTC_OFFSET_SECS),
        battery.state(),
        &VIBRATE,
    );

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(bluetooth_task(sd, server)));
    unwrap!(spawner.spawn(update_battery_status(battery, server)));
    unwrap!(spawner.spawn(notify(vibrator)));
    unwrap!(spawner.spawn(update_lcd(display, host)));
}
