//! navpanel: personal start page and bookmark dashboard.
//!
//! Console front: loads the dashboard from the configured backend (or the
//! in-memory sample backend with `--demo`) and prints a summary. See
//! `navpanel --help` for the subcommands.

use std::process::ExitCode;

use clap::Parser;
use navpanel::app::App;
use navpanel::cli::{Cli, Command};
use navpanel::config::AppConfig;
use navpanel::logging;
use navpanel::services::reconcile::ungrouped;
use navpanel::store::AppStore;

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn print_dashboard(store: &AppStore) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                    navpanel v{:<10}                      ║", env!("CARGO_PKG_VERSION"));
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    section("Search");
    let settings = store.settings();
    for engine in &settings.search.engines {
        let marker = if Some(engine.id.as_str()) == store.current_engine_id() {
            "*"
        } else {
            " "
        };
        println!("  {} {:<12} {}", marker, engine.name, engine.url);
    }
    println!(
        "  default: {}  new tab: {}",
        settings.search.default_engine_id, settings.search.open_in_new_tab
    );

    for entry in store.groups_with_websites() {
        let fold = if entry.group.is_collapsed { "▸" } else { "▾" };
        section(&format!("{} {} ({})", fold, entry.group.name, entry.websites.len()));
        if entry.group.is_collapsed {
            continue;
        }
        for site in &entry.websites {
            println!("  {:<24} {}", site.name, site.url);
        }
    }

    let loose = ungrouped(store.sites());
    if !loose.is_empty() {
        section(&format!("Ungrouped ({})", loose.len()));
        for site in loose {
            println!("  {:<24} {}", site.name, site.url);
        }
    }
    println!();
}

async fn run(app: &mut App, command: Option<Command>) -> Result<(), String> {
    let loaded = app.startup().await;

    match command {
        None => {
            if let Err(e) = loaded {
                eprintln!("warning: {}", e);
            }
            print_dashboard(&app.store);
            Ok(())
        }
        Some(Command::Export { dir }) => {
            loaded.map_err(|e| e.to_string())?;
            let dir = dir.unwrap_or_else(|| app.config.export_dir());
            let path = app
                .store
                .export_data(&dir)
                .await
                .map_err(|e| e.to_string())?;
            println!("Exported to {}", path.display());
            Ok(())
        }
        Some(Command::Import { file }) => {
            app.store
                .import_file(&file)
                .await
                .map_err(|e| e.to_string())?;
            println!(
                "Imported {}: {} websites, {} search engines",
                file.display(),
                app.store.sites().len(),
                app.store.search_engines().len()
            );
            Ok(())
        }
        Some(Command::Search { query, engine }) => {
            match app.store.perform_search(&query, engine.as_deref()) {
                Some(url) => {
                    println!("{}", url);
                    Ok(())
                }
                None => Err(format!("nothing to search for {:?}", query)),
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.log_filter);

    let mut app = App::new(config);
    let outcome = run(&mut app, cli.command).await;
    app.shutdown();

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
