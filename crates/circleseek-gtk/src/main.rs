use circleseek::CircleSeekBar;
use circleseek_gtk::config;
use circleseek_gtk::gui::app::AppModel;
use circleseek_gtk::sys::runtime;
use clap::Parser;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "circleseek", version, about, long_about = None)]
struct Cli {
    /// Config file to load and watch (defaults to the user config directory)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the documented default config to the config path and exit
    #[arg(long)]
    write_default_config: bool,

    /// Initial value, overriding the config
    #[arg(short = 'v', long, allow_negative_numbers = true)]
    value: Option<i32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };

    if cli.write_default_config {
        config::write_default_config(&config_path)?;
        println!("{}", config_path.display());
        return Ok(());
    }

    let mut config = config::load_or_default(&config_path);
    if let Some(value) = cli.value {
        config.value = value;
    }
    let bar = CircleSeekBar::new(config);

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(config_path.clone(), tx);

    // clap already consumed the command line
    let app = RelmApp::new("org.circleseek.demo").with_args(Vec::new());

    app.run::<AppModel>((bar, config_path, rx));
    Ok(())
}
