use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use crate::catalog::RecipeId;
use crate::plan::{Day, Moment};

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Recipe table: a published CSV link (http/https) or a local CSV file
    #[arg(short, long)]
    pub source: Option<String>,

    /// Seed for reproducible plans
    #[arg(long)]
    pub seed: Option<u64>,

    /// How long a fetched catalog stays fresh, in seconds
    #[arg(long)]
    pub cache_ttl_secs: Option<u64>,

    /// Timeout for fetching the catalog, in seconds
    #[arg(long)]
    pub fetch_timeout_secs: Option<u64>,

    /// Print the plan and shopping list as JSON
    #[arg(long)]
    pub json: bool,

    /// Keep reading commands from stdin after printing the plan
    #[arg(short, long)]
    pub interactive: bool,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

/// One line typed in interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Toggle(Day, Moment),
    Reroll(Day, Moment),
    Pick(Day, Moment, RecipeId),
    Reset,
    ResetAssignments,
    Shop,
    Recipe(RecipeId),
    Recipes,
    Refresh,
    Help,
    Quit,
}

pub const COMMAND_HELP: &str = "\
Commands:
  show                          print the weekly plan
  toggle <day> <moment>         switch a meal on or off
  reroll <day> <moment>         draw another recipe for a meal
  pick <day> <moment> <id>      choose a recipe yourself
  reset                         new week with default meals
  reset-assignments             new recipes, same meals
  shop                          print the shopping list
  recipe <id>                   show ingredients and instructions
  recipes                       list every recipe with its id
  refresh                       re-fetch the recipe table
  help                          this text
  quit                          leave";

fn parse_arg<T>(parts: &[&str], index: usize, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = parts
        .get(index)
        .ok_or_else(|| anyhow!("Missing {}", what))?;
    raw.parse::<T>()
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("Invalid {} '{}'", what, raw))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(keyword) = parts.first() else {
            return Err(anyhow!("Empty command"));
        };

        let command = match keyword.to_lowercase().as_str() {
            "show" | "plan" => Command::Show,
            "toggle" => Command::Toggle(
                parse_arg(&parts, 1, "day")?,
                parse_arg(&parts, 2, "moment")?,
            ),
            "reroll" => Command::Reroll(
                parse_arg(&parts, 1, "day")?,
                parse_arg(&parts, 2, "moment")?,
            ),
            "pick" => Command::Pick(
                parse_arg(&parts, 1, "day")?,
                parse_arg(&parts, 2, "moment")?,
                parse_arg(&parts, 3, "recipe id")?,
            ),
            "reset" => Command::Reset,
            "reset-assignments" => Command::ResetAssignments,
            "shop" | "shopping" => Command::Shop,
            "recipe" => Command::Recipe(parse_arg(&parts, 1, "recipe id")?),
            "recipes" => Command::Recipes,
            "refresh" => Command::Refresh,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(anyhow!("Unknown command '{}'", other)),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slot_commands() {
        assert_eq!(
            "toggle lundi midi".parse::<Command>().unwrap(),
            Command::Toggle(Day::Monday, Moment::Midday)
        );
        assert_eq!(
            "reroll Saturday evening".parse::<Command>().unwrap(),
            Command::Reroll(Day::Saturday, Moment::Evening)
        );
        assert_eq!(
            "pick sun dinner 4".parse::<Command>().unwrap(),
            Command::Pick(Day::Sunday, Moment::Evening, 4)
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("  SHOW ".parse::<Command>().unwrap(), Command::Show);
        assert_eq!("reset".parse::<Command>().unwrap(), Command::Reset);
        assert_eq!(
            "reset-assignments".parse::<Command>().unwrap(),
            Command::ResetAssignments
        );
        assert_eq!("recipe 2".parse::<Command>().unwrap(), Command::Recipe(2));
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<Command>().is_err());
        assert!("toggle monday".parse::<Command>().is_err());
        assert!("pick monday evening soup".parse::<Command>().is_err());
        let err = "dance".parse::<Command>().unwrap_err();
        assert!(err.to_string().contains("Unknown command"));
    }
}
