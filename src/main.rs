use clap::Parser;
use spindle::{
    cli::{Cli, Command},
    config::Settings,
    logging, server,
    ui::app::App,
    util::hook::set_panic_hook,
};

fn main() -> color_eyre::Result<()> {
    setup()?;

    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli)?;

    match cli.command {
        Some(Command::Serve(_)) => {
            let _guard = logging::init_server(settings.log_filter.clone());
            actix_web::rt::System::new().block_on(server::run(settings))?;
            Ok(())
        }
        None => {
            let _guard = logging::init_player(&settings.data_dir, settings.log_filter.clone());
            set_panic_hook();
            run_player(settings)
        }
    }
}

fn setup() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    Ok(())
}

fn run_player(settings: Settings) -> color_eyre::Result<()> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()?
        .block_on(async { App::new(settings)?.run().await })
}
