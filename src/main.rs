use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use tagscan::NfcSupport;
use tagscan::core::config;

#[derive(Parser)]
#[command(name = "tagscan", about = "NFC tag and QR code reader screens")]
struct Args {
    /// How the simulated NFC reader answers the support probe
    #[arg(long, value_enum)]
    nfc_support: Option<NfcSupport>,

    /// Delay before the support probe answers, in milliseconds
    #[arg(long)]
    probe_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Ignoring config file: {e}");
            config::TagscanConfig::default()
        }
    };
    let resolved = config::resolve(&file_config, args.nfc_support, args.probe_delay_ms);

    // Initialize file logger - writes to tagscan.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("tagscan.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "Tagscan starting up (nfc support: {}, probe delay: {}ms)",
        resolved.nfc_support.as_str(),
        resolved.probe_delay_ms
    );

    tagscan::tui::run(resolved)
}
