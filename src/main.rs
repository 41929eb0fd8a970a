use std::env;
use std::path::PathBuf;
use std::thread;

use crossbeam_channel::bounded;
use dotenv::dotenv;
use log::{error, info, warn};

use shake_observer::config::ConfigManager;
use shake_observer::logger;
use shake_observer::replay::{self, run_sample_reader, SAMPLE_CHANNEL_CAPACITY};
use shake_observer::ShakeObserver;

fn main() {
    dotenv().ok(); // 加载 .env 文件
    logger::init_logger();
    info!("shake-replay starting");

    if let Err(e) = run() {
        error!("Replay failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ConfigManager::from_env()?;
    let config = *manager.get_config();
    match manager.config_path() {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => info!("Using default config"),
    }
    info!(
        "threshold={} interval={}ms lazy={}",
        config.threshold, config.interval, config.lazy
    );

    if !ShakeObserver::workable() {
        warn!("No motion sensor on this host, replaying recorded samples only");
    }

    // 第一个参数为样本文件，缺省读取标准输入
    let source = env::args_os().nth(1).map(PathBuf::from);
    let (sample_sender, sample_receiver) = bounded(SAMPLE_CHANNEL_CAPACITY);

    let reader_handle = thread::spawn(move || run_sample_reader(source, sample_sender));

    let summary = replay::replay(sample_receiver, config);

    match reader_handle.join() {
        Ok(Ok(stats)) => info!(
            "Reader finished: {} samples parsed, {} skipped",
            stats.parsed, stats.skipped
        ),
        Ok(Err(e)) => return Err(e.into()),
        Err(e) => error!("Reader thread panicked: {:?}", e),
    }

    info!(
        "Replay finished: {} samples dispatched, {} shakes detected",
        summary.dispatched, summary.shakes
    );

    Ok(())
}
