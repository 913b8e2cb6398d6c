use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info};

use pixelstrom_client::cli::Cli;
use pixelstrom_client::config::ClientConfig;
use pixelstrom_client::core::{establish, DrawScheduler, Session};
use pixelstrom_client::load_image;
use pixelstrom_client::transport::TcpTransport;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let cancel = Arc::new(AtomicBool::new(false));

    match run(&cli, cancel.clone()) {
        Ok(()) => ExitCode::SUCCESS,
        // an interrupt may surface as a broken handshake; stay quiet
        Err(_) if cancel.load(Ordering::SeqCst) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, cancel: Arc<AtomicBool>) -> Result<()> {
    let config = ClientConfig::from_cli(cli)?;
    let image = load_image(&config.image)?;

    let address = config.address();
    let mut transport = TcpTransport::connect(&address, config.read_timeout)
        .with_context(|| format!("Failed to connect to {address}"))?;

    let handle = transport.interrupt_handle()?;
    let flag = cancel.clone();
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        handle.interrupt();
    })
    .context("Failed to install interrupt handler")?;

    let canvas = establish(&mut transport, &config.credentials)?;
    info!("Canvas size: {}x{}", canvas.width, canvas.height);

    let rng = match config.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let scheduler = DrawScheduler::new(image, canvas, rng);
    let mut session = Session::new(transport, scheduler).with_cancel(cancel.clone());

    let summary = session.run()?;
    if cancel.load(Ordering::SeqCst) {
        debug!("Interrupted: {:?}", summary);
        return Ok(());
    }

    info!(
        "Session finished: {} bursts, {} pixels drawn ({} acknowledged), {} passes, {} server errors",
        summary.bursts,
        summary.pixels_drawn,
        summary.pixels_acknowledged,
        summary.passes_started,
        summary.server_errors
    );
    Ok(())
}
