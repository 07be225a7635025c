use clap::Parser;
use color_eyre::Result;
use std::rc::Rc;

use crownmem::cli::{Cli, Commands};
use crownmem::store::{CapsuleStore, DailyTaskStore, MemoryStore};
use crownmem::{Config, Profile, Storage};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    let config = Config::load_with_profile(profile)?;

    // Logs go to a file in the data dir; the TUI owns the terminal
    if let Some(data_dir) = crownmem::utils::get_data_dir(profile) {
        if let Err(e) = crownmem::logging::init(data_dir.join("logs")) {
            eprintln!("Warning: failed to initialize logging: {}", e);
        }
    }

    let storage_path = config.get_storage_path();
    let storage = Rc::new(Storage::open(storage_path.to_str().ok_or_else(
        || color_eyre::eyre::eyre!("Storage path contains invalid UTF-8"),
    )?)?);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let memories = MemoryStore::load(Rc::clone(&storage))?;
            let capsules = CapsuleStore::load(Rc::clone(&storage))?;
            let daily_task = DailyTaskStore::load(Rc::clone(&storage))?;
            let app = crownmem::tui::App::new(config, storage, memories, capsules, daily_task)?;
            crownmem::tui::run_event_loop(app)?;
        }
        Commands::AddMemory {
            title,
            photo,
            desc,
            date,
            time,
        } => {
            let mut memories = MemoryStore::load(storage)?;
            crownmem::cli::handle_add_memory(title, photo, desc, date, time, &mut memories)?;
        }
        Commands::AddCapsule {
            title,
            photo,
            open_date,
            open_time,
            text,
        } => {
            let mut capsules = CapsuleStore::load(storage)?;
            crownmem::cli::handle_add_capsule(
                title, photo, open_date, open_time, text, &mut capsules,
            )?;
        }
    }

    Ok(())
}
