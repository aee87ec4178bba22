use std::{io, path::PathBuf, sync::Arc};

use anyhow::Result;
use app::{App, AppMessage};
use clap::Parser;
use common::network::NetworkClient;
use iced::Theme;
use settings::{Config, ThemeKind};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app;
mod settings;
mod submission;

const DARK_THEME: Theme = Theme::TokyoNight;
const LIGHT_THEME: Theme = Theme::Light;

#[derive(Parser, Debug)]
#[command(
    version,
    name = "Scopus Export",
    about = "Request a publication export for a year or a quarter of a year."
)]
struct Args {
    #[arg(long, short)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(io::stdout)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gui=info,common=info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    // reqwest and hyper log through the `log` facade
    tracing_log::LogTracer::init()?;

    let args = Args::parse();
    let config = match args.config {
        Some(p) => Config::load(&p).unwrap_or_else(|e| {
            error!("{:#}, using defaults", e);
            Config::default()
        }),
        None => Config::default(),
    };
    info!("Using backend at {}", config.server);

    let network = Arc::new(NetworkClient::new(config.server.clone())?);
    let dark_mode = config.theme == ThemeKind::Dark;

    iced::application(
        move || {
            (
                App::new(network.clone(), dark_mode),
                iced::Task::<AppMessage>::none(),
            )
        },
        App::update,
        App::view,
    )
    .antialiasing(true)
    .window_size((640.0, 480.0))
    .theme(theme)
    .title("Scopus Export")
    .run()?;
    Ok(())
}

pub fn theme(app: &App) -> Theme {
    match app.dark_mode {
        true => DARK_THEME,
        false => LIGHT_THEME,
    }
}
