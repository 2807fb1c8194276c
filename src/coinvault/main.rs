use clap::Parser;
use coinvault::api::{configure, ConfigAction, VaultApi};
use coinvault::commands::{ImageSources, VaultPaths};
use coinvault::error::{Result, VaultError};
use coinvault::store::fs::FileBackend;
use directories::ProjectDirs;
use std::path::PathBuf;

mod args;
mod print;
use args::{Cli, Commands, ImageArgs};
use print::{
    print_coins, print_config, print_fields, print_full_coins, print_messages, print_statistics,
};

/// Environment variable naming the vault directory.
const VAULT_HOME_ENV: &str = "COINVAULT_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: VaultApi<FileBackend>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Needs no vault
    if let Some(Commands::Fields) = cli.command {
        print_fields();
        return Ok(());
    }

    // Must stay usable when the collection file is broken
    if let Some(Commands::Config { key, value }) = cli.command.as_ref() {
        let paths = VaultPaths::new(resolve_vault_dir(&cli)?);
        return handle_config(&paths, key.clone(), value.clone());
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { set, images }) => handle_add(&mut ctx, set, images),
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::View { id }) => handle_view(&ctx, id),
        Some(Commands::Search { text, criteria }) => handle_search(&ctx, text, criteria),
        Some(Commands::Update { id, set, images }) => handle_update(&mut ctx, id, set, images),
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, id),
        Some(Commands::Stats { json }) => handle_stats(&ctx, json),
        Some(Commands::Config { .. }) | Some(Commands::Fields) => Ok(()),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let root = resolve_vault_dir(cli)?;
    log::debug!("Using vault at {}", root.display());
    let api = VaultApi::open(VaultPaths::new(root))?;
    Ok(AppContext { api })
}

/// `--dir`, then `$COINVAULT_HOME`, then the user data directory when
/// `--global` is given, then the current directory.
fn resolve_vault_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.dir {
        return Ok(dir.clone());
    }
    if let Some(home) = std::env::var_os(VAULT_HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    if cli.global {
        let proj_dirs = ProjectDirs::from("com", "coinvault", "coinvault").ok_or_else(|| {
            VaultError::Api("Could not determine the user data directory".into())
        })?;
        return Ok(proj_dirs.data_dir().to_path_buf());
    }
    Ok(std::env::current_dir()?)
}

fn image_sources(images: ImageArgs) -> ImageSources {
    ImageSources {
        obverse: images.obverse,
        reverse: images.reverse,
        flag: images.flag,
        shield: images.shield,
    }
}

fn handle_add(ctx: &mut AppContext, set: Vec<String>, images: ImageArgs) -> Result<()> {
    let result = ctx.api.add_coin(&set, &image_sources(images))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_coins()?;
    print_coins(&result.listed_coins);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, id: String) -> Result<()> {
    let result = ctx.api.view_coin(&id)?;
    print_full_coins(&result.listed_coins);
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, text: Option<String>, criteria: Vec<String>) -> Result<()> {
    let result = match text {
        Some(text) => ctx.api.search_coins(&text)?,
        None => ctx.api.search_where(&criteria)?,
    };
    print_coins(&result.listed_coins);
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(
    ctx: &mut AppContext,
    id: String,
    set: Vec<String>,
    images: ImageArgs,
) -> Result<()> {
    let result = ctx.api.update_coin(&id, &set, &image_sources(images))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: String) -> Result<()> {
    let result = ctx.api.delete_coin(&id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &AppContext, json: bool) -> Result<()> {
    let result = ctx.api.statistics()?;
    if let Some(stats) = &result.statistics {
        if json {
            println!("{}", serde_json::to_string_pretty(stats)?);
            return Ok(());
        }
        print_statistics(stats);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(paths: &VaultPaths, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = configure(paths, action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
