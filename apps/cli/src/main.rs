mod args;
mod config;
mod dirs;
mod output;

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use meter_app::{
    AppPaths, AppState, YearParams, ensure_app_data_dir, format_yearly, parse_reading_date,
    resolve_years,
};
use meter_core::CategoryConfig;
use tracing::Level;

use crate::args::{CategoryCommand, Cli, Command};
use crate::config::CliConfig;
use crate::output::CategoryView;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::load_or_create().map_err(anyhow::Error::msg)?;
    if config.created {
        tracing::info!(path = %config.file.display(), "created config");
    }

    let data_dir = resolve_data_dir(cli.data_dir.clone(), &config.config)?;
    let paths = AppPaths::new(data_dir);
    ensure_app_data_dir(&paths)
        .with_context(|| format!("create data dir {}", paths.app_data_dir.display()))?;

    let state = AppState::new(paths.db_path);
    state.initialize()?;

    let user = resolve_user(cli.user.as_deref(), &config.config, &state)?;
    tracing::debug!(user = %user, "resolved user");

    let text = run(&state, &user, cli.json, cli.command)?;
    if !text.is_empty() {
        println!("{text}");
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn resolve_data_dir(flag: Option<PathBuf>, config: &CliConfig) -> anyhow::Result<PathBuf> {
    if let Some(dir) = flag.or_else(|| config.data_dir.clone()) {
        return Ok(dir);
    }
    let resolved = dirs::resolve_data_dir().map_err(anyhow::Error::msg)?;
    if resolved.matched_existing {
        tracing::debug!(dir = %resolved.dir.display(), "using existing data dir");
    } else {
        tracing::debug!(dir = %resolved.dir.display(), "using data dir");
    }
    Ok(resolved.dir)
}

/// `--user` wins over the config file, which wins over the stored default.
fn resolve_user(flag: Option<&str>, config: &CliConfig, state: &AppState) -> anyhow::Result<String> {
    let explicit = flag
        .and_then(non_blank)
        .or_else(|| config.default_user.as_deref().and_then(non_blank));
    match explicit {
        Some(user) => Ok(user.to_string()),
        None => Ok(state.services.settings.get()?.default_user),
    }
}

fn non_blank(user: &str) -> Option<&str> {
    Some(user.trim()).filter(|user| !user.is_empty())
}

fn run(state: &AppState, user: &str, json: bool, command: Command) -> anyhow::Result<String> {
    let services = &state.services;
    match command {
        Command::Categories => {
            let categories = services.categories.list(user)?;
            if json {
                let views: Vec<CategoryView> = categories.iter().map(CategoryView::from).collect();
                return output::json(&views);
            }
            Ok(output::categories(&categories))
        }
        Command::Category { command } => run_category(state, user, json, command),
        Command::Add {
            category,
            date,
            value,
        } => {
            let sample = services.readings.add(user, &category, &date, value)?;
            if json {
                return output::json(&sample);
            }
            Ok(format!("recorded {} = {} for {}", sample.date, sample.value, category))
        }
        Command::Delete { category, date } => {
            let date = parse_reading_date(&date)?;
            services.readings.delete(user, &category, date)?;
            Ok(format!("deleted reading of {} on {}", category, date))
        }
        Command::Readings { category } => {
            let samples = services.readings.list(user, &category)?;
            if json {
                return output::json(&samples);
            }
            let unit = services.categories.get(user, &category)?.config.unit;
            Ok(output::readings(&samples, &unit))
        }
        Command::Import { file } => {
            let stats = if file.as_os_str() == "-" {
                services.readings.import_json(user, io::stdin().lock())?
            } else {
                let reader = File::open(&file)
                    .with_context(|| format!("open import file {}", file.display()))?;
                services.readings.import_json(user, io::BufReader::new(reader))?
            };
            if json {
                return output::json(&stats);
            }
            Ok(output::import(&stats))
        }
        Command::Monthly { category, years } => {
            let years = resolve_years(&YearParams::from(&years))?;
            let report = services.analytics.category_report(user, &category, years)?;
            if json {
                return output::json(&report.monthly);
            }
            Ok(output::monthly(&report))
        }
        Command::Yearly { category, years } => {
            let years = resolve_years(&YearParams::from(&years))?;
            let report = services.analytics.category_report(user, &category, years)?;
            if json {
                return output::json(&report.yearly);
            }
            Ok(format_yearly(&report))
        }
        Command::Compare { category, years } => {
            let years = resolve_years(&YearParams::from(&years))?;
            let rows = services.analytics.year_over_year(user, &category, years)?;
            if json {
                return output::json(&rows);
            }
            Ok(output::compare(&rows))
        }
        Command::Trend { category, years } => {
            let years = resolve_years(&YearParams::from(&years))?;
            let trend = services.analytics.trend(user, &category, years)?;
            if json {
                return output::json(&trend);
            }
            let unit = services.categories.get(user, &category)?.config.unit;
            Ok(output::trend(trend.as_ref(), &unit))
        }
        Command::Report { years } => {
            let years = resolve_years(&YearParams::from(&years))?;
            if json {
                return output::json(&services.analytics.overview(user, years)?);
            }
            Ok(services.analytics.report_text(user, years)?)
        }
        Command::DefaultUser { user: new_user } => match new_user {
            Some(new_user) => {
                services.settings.update(Some(&new_user))?;
                Ok(format!("default user set to {}", new_user.trim()))
            }
            None => Ok(services.settings.get()?.default_user),
        },
    }
}

fn run_category(
    state: &AppState,
    user: &str,
    json: bool,
    command: CategoryCommand,
) -> anyhow::Result<String> {
    let categories = &state.services.categories;
    match command {
        CategoryCommand::Add {
            name,
            unit,
            mode,
            title,
        } => {
            let mut config = CategoryConfig::default();
            if let Some(unit) = unit {
                config.unit = unit;
            }
            if let Some(mode) = mode {
                config.mode = mode.into();
            }
            let category = categories.add(user, &name, &config, title.as_deref())?;
            if json {
                return output::json(&CategoryView::from(&category));
            }
            Ok(format!(
                "added {} ({}, {})",
                category.name, category.config.unit, category.config.mode
            ))
        }
        CategoryCommand::Configure {
            name,
            unit,
            mode,
            title,
            clear_title,
        } => {
            let mut category = categories.get(user, &name)?;
            if unit.is_some() || mode.is_some() {
                if let Some(unit) = unit {
                    category.config.unit = unit;
                }
                if let Some(mode) = mode {
                    category.config.mode = mode.into();
                }
                categories.configure(user, &name, &category.config)?;
            }
            if clear_title {
                categories.set_title(user, &name, None)?;
            } else if let Some(title) = title.as_deref() {
                categories.set_title(user, &name, Some(title))?;
            }
            let category = categories.get(user, &name)?;
            if json {
                return output::json(&CategoryView::from(&category));
            }
            Ok(output::categories(std::slice::from_ref(&category)))
        }
        CategoryCommand::Move { name, direction } => {
            let moved = categories.move_category(user, &name, direction.into())?;
            if !moved {
                tracing::info!(category = %name, "category is already at the edge");
            }
            if json {
                let listing = categories.list(user)?;
                let views: Vec<CategoryView> = listing.iter().map(CategoryView::from).collect();
                return output::json(&views);
            }
            Ok(output::categories(&categories.list(user)?))
        }
        CategoryCommand::Remove { name } => {
            categories.remove(user, &name)?;
            Ok(format!("removed {}", name))
        }
    }
}
