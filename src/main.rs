use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use weekly_menu::catalog::CatalogCache;
use weekly_menu::cli::{parse_args, Command, COMMAND_HELP};
use weekly_menu::config::MenuConfig;
use weekly_menu::error::PlanError;
use weekly_menu::logging::init_logging;
use weekly_menu::render::{
    render_catalog, render_plan, render_recipe, render_shopping_list, PlanSnapshot,
};
use weekly_menu::session::MenuSession;

fn print_plan(session: &MenuSession) {
    println!("{}", render_plan(session.plan(), session.catalog()));
}

fn print_shopping_list(session: &MenuSession) {
    print!("{}", render_shopping_list(&session.shopping_list()));
}

/// Applies one command. Returns `false` when the user asked to leave.
async fn run_command(command: Command, session: &mut MenuSession, cache: &mut CatalogCache) -> bool {
    match command {
        Command::Show => print_plan(session),
        Command::Toggle(day, moment) => {
            session.toggle(day, moment);
            print_plan(session);
        }
        Command::Reroll(day, moment) => {
            match session.reroll(day, moment) {
                Ok(_) => print_plan(session),
                Err(PlanError::SlotInactive { .. }) => println!(
                    "{} {} is switched off. Switch it on first with 'toggle {} {}'.",
                    day,
                    moment,
                    day.name().to_lowercase(),
                    moment
                ),
                Err(PlanError::NoCandidateAvailable { .. }) => {
                    println!("No other recipe available for {} {}.", day, moment);
                    print_plan(session);
                }
            }
        }
        Command::Pick(day, moment, id) => {
            if session.manual_select(day, moment, id) {
                print_plan(session);
            } else {
                println!("There is no recipe #{}. Type 'recipes' to list them.", id);
            }
        }
        Command::Reset => {
            session.reset();
            print_plan(session);
        }
        Command::ResetAssignments => {
            session.reset_assignments();
            print_plan(session);
        }
        Command::Shop => print_shopping_list(session),
        Command::Recipe(id) => match session.catalog().get(id) {
            Some(recipe) => print!("{}", render_recipe(recipe, session.catalog().extra_headers())),
            None => println!("There is no recipe #{}.", id),
        },
        Command::Recipes => print!("{}", render_catalog(session.catalog())),
        Command::Refresh => match cache.refresh().await {
            Ok(catalog) => {
                session.replace_catalog(catalog);
                print_plan(session);
            }
            Err(e) => println!("Could not refresh the recipe table from {}: {}", cache.source(), e),
        },
        Command::Help => println!("{}", COMMAND_HELP),
        Command::Quit => return false,
    }
    true
}

async fn interactive_loop(session: &mut MenuSession, cache: &mut CatalogCache) -> Result<()> {
    println!("{}", COMMAND_HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                // Re-read the catalog first if its TTL has run out.
                if command != Command::Refresh {
                    if let Err(e) = session.sync_catalog(cache).await {
                        println!("Could not reload the recipe table from {}: {}", cache.source(), e);
                    }
                }
                if !run_command(command, session, cache).await {
                    break;
                }
            }
            Err(e) => println!("{:#}. Type 'help' for the list of commands.", e),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let cli_args = parse_args();
    let config = MenuConfig::resolve(&cli_args).context("Invalid configuration")?;
    info!(source = %config.source, "Starting weekly menu");

    let mut cache = CatalogCache::new(config.source.clone(), config.cache_ttl, config.fetch_timeout);
    let catalog = match cache.get().await {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Unable to read the recipe table: {}", e);
            eprintln!("Check that the source is a CSV export (for a Google Sheet: File > Share > Publish to web > CSV).");
            std::process::exit(1);
        }
    };

    let mut session = MenuSession::with_seed(catalog, config.seed);

    if cli_args.json {
        let snapshot = PlanSnapshot::build(session.plan(), session.catalog(), session.shopping_list());
        let json = serde_json::to_string_pretty(&snapshot).context("Failed to serialize plan")?;
        println!("{}", json);
    } else {
        print_plan(&session);
        print_shopping_list(&session);
    }

    if cli_args.interactive {
        interactive_loop(&mut session, &mut cache).await?;
    }

    Ok(())
}
