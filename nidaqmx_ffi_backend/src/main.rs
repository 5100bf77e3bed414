//! Lists the devices of the local system, then streams a few blocks of analog
//! input from the first one.
//!
//! Usage: `nidaqmx_ffi_backend_bin [DEVICE] [CONFIG.toml]`. Set `RUST_LOG` to
//! see driver calls, e.g. `RUST_LOG=nidaqmx_backend=debug,nidaqmx_ffi_backend=trace`.

use crossbeam::channel::{bounded, RecvTimeoutError};
use ndarray::{Array2, Axis};
use nidaqmx_backend::*;
use nidaqmx_ffi_backend::{local_system_with_config, NativeConfig};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SAMPLE_RATE: f64 = 1e4;
const BLOCK: u32 = 1000;
const BLOCKS: usize = 5;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let device_arg = args.next();
    let config = match args.next() {
        Some(path) => NativeConfig::load(path)?,
        None => NativeConfig::default(),
    };
    let system = local_system_with_config(config);

    info!("NI-DAQmx {}", system.driver_version()?);
    let devices = system.devices().items()?;
    for device in &devices {
        info!(
            "{} ({}): {} AI channels",
            device.name(),
            device.product_type()?,
            device.ai_physical_chans().len()?
        );
    }
    let device = match (device_arg, devices.first()) {
        (Some(name), _) => name,
        (None, Some(device)) => device.name().to_string(),
        (None, None) => {
            warn!("No devices found");
            return Ok(());
        }
    };

    let (sender, receiver) = bounded::<Array2<f64>>(BLOCKS);
    Task::scoped(system.interpreter().clone(), "demo_ai", |task| {
        task.ai_channels().add_ai_voltage_chan(
            &format!("{device}/ai0:1"),
            "",
            AiVoltageParams::default(),
        )?;
        task.timing().cfg_samp_clk_timing(
            SAMPLE_RATE,
            "",
            Edge::Rising,
            AcquisitionType::Continuous,
            u64::from(BLOCK) * 10,
        )?;
        task.register_every_n_samples_acquired_into_buffer_event(
            BLOCK,
            Some(Box::new(
                move |task: &TaskCore, _: EveryNSamplesEventType, num_samples: u32| {
                    match task.read(Some(num_samples as usize), 0.0) {
                        Ok(ReadData::Analog(block)) => {
                            if sender.try_send(block).is_err() {
                                warn!("Demo receiver is behind, dropping a block");
                            }
                        }
                        Ok(other) => warn!("Unexpected {} channel read", other.num_channels()),
                        Err(err) => warn!("Read in callback failed: {err}"),
                    }
                },
            )),
        )?;
        task.start()?;

        for block in 0..BLOCKS {
            match receiver.recv_timeout(Duration::from_secs(2)) {
                Ok(data) => {
                    let means = data.mean_axis(Axis(1)).unwrap_or_default();
                    info!("block {block}: {} samples, channel means {means}", data.ncols());
                }
                Err(RecvTimeoutError::Timeout) => {
                    warn!("No data within 2 s");
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        task.stop()
    })?;
    Ok(())
}
