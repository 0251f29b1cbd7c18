pub mod cli;
pub mod config;
pub mod session;
pub mod store;

use aging_effect::Preset;
use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use session::Session;
use std::fs;
use store::ParamStore;

/// Initializes the logger.
///
/// Sets up a custom logger format with timestamp, log level, file name, line number,
/// and log message. Defaults to `info` unless `RUST_LOG` says otherwise.
pub fn init_logger() {
    use std::io::Write;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

pub fn run(args: Args) -> Result<()> {
    if args.list_presets {
        for preset in Preset::all_presets() {
            let p = preset.params();
            println!(
                "{:<8} age={} exposure={} tint={} vignette={} damage={}",
                preset.name(),
                p.age,
                p.exposure,
                p.tint,
                p.vignette,
                p.damage
            );
        }
        return Ok(());
    }

    let config = Config::init(args.config.as_deref())?;

    let mut store = ParamStore::new(config.sliders);
    let preset = match &args.preset {
        Some(name) => Some(name.parse::<Preset>()?),
        None => config.preset()?,
    };
    if let Some(preset) = preset {
        store.apply_preset(preset);
    }
    args.apply_sliders(&mut store);

    let input = args.input.as_deref().context("no input image given")?;
    let session = Session::open(input, store)?
        .with_jpeg_quality(args.quality.unwrap_or(config.output.jpeg_quality))
        .with_seed(args.seed);

    log::info!("sliders: {:?}", session.store().snapshot());
    let bytes = session.render()?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| cli::default_output_path(input, &config.output.suffix));
    fs::write(&output, &bytes).with_context(|| output.to_string_lossy().to_string())?;
    log::info!("saved {} ({} bytes)", output.display(), bytes.len());

    Ok(())
}
