//! TDC Diagnostics Application
//!
//! Entry point for the TDC bring-up firmware. Resets the core, then
//! periodically runs the ring oscillator self-test inside a debug freeze
//! and logs a frozen histogram of every channel over defmt.

#![no_std]
#![no_main]

use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tdc_firmware::prelude::*;

/// Driver as wired on this board: MMIO bank, bounded sleeping poll
type BoardTdc = Tdc<MmioCsrBank, DelayBackoff<Delay>>;

static TDC: StaticCell<BoardTdc> = StaticCell::new();

/// Histogram bins sampled per self-test round
const HIST_SAMPLE_BINS: usize = 16;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("TDC Diagnostics Firmware v{}", env!("CARGO_PKG_VERSION"));

    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // Status LED (PA5 on Nucleo boards)
    let led = Output::new(p.PA5, Level::Low, Speed::Low);

    // FMC bank 1 is mapped by board bring-up before this binary runs.
    // SAFETY: TDC_CSR_BASE is the TDC bank and this is its only accessor.
    let bank = unsafe { MmioCsrBank::new(TDC_CSR_BASE) };
    let policy = DelayBackoff::new(Delay, SELFTEST_POLL_INTERVAL_US)
        .with_max_polls(SELFTEST_MAX_POLLS);
    let tdc = TDC.init(Tdc::with_policy(bank, policy));

    info!("TDC CSR bank at {=usize:#x}", TDC_CSR_BASE);

    spawner.spawn(heartbeat_task(led)).unwrap();
    spawner.spawn(selftest_task(tdc)).unwrap();

    info!("Tasks spawned");
}

/// Self-test task - resets the core, then samples it every 10 s
#[embassy_executor::task]
async fn selftest_task(tdc: &'static mut BoardTdc) {
    if let Err(e) = tdc.reset() {
        error!("TDC reset failed: {}", e);
        return;
    }
    tdc.reset_coarse_counter();
    info!("TDC ready");

    loop {
        if let Err(e) = selftest_round(tdc) {
            warn!("TDC self-test failed: {}", e);
        }
        Timer::after(Duration::from_secs(10)).await;
    }
}

fn selftest_round(tdc: &mut BoardTdc) -> Result<()> {
    let mut session = tdc.debug_session()?;
    let osc = session.ringosc_measure()?;
    session.finish();
    info!("Ring oscillator: {}", osc);

    for channel in 0..CHANNEL_COUNT {
        let hist = tdc.channel_histogram(channel)?;
        let total = hist.iter().fold(0u32, |acc, &n| acc.saturating_add(n));
        info!(
            "Channel {} histogram: {} hits, bins[0..{}] = {}",
            channel,
            total,
            HIST_SAMPLE_BINS,
            &hist[..HIST_SAMPLE_BINS]
        );
    }
    Ok(())
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}
