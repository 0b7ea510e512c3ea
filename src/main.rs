use chrono::Local;
use clap::Parser;
use daybook::application::{
    backup::backup_journal, init::init, stats::journal_stats, ConfigService, DayEditor,
    EntryService, NewEntryRequest, NewEntryService, SearchService,
};
use daybook::cli::{self, Cli, Commands};
use daybook::domain::template::available_templates;
use daybook::domain::{DateRef, DayNaming, SearchPredicate};
use daybook::error::{DaybookError, Result};
use daybook::infrastructure::config::settings_path;
use daybook::infrastructure::{logging, BackupOutcome, DayStore, ExternalEditor, FileSystemStore, Settings};
use std::io::Read;
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn resolve_date(input: &str, naming: &DayNaming) -> Result<chrono::NaiveDate> {
    Ok(DateRef::parse(input, naming)?.resolve(Local::now().date_naive()))
}

fn day_filename(input: &str, naming: &DayNaming) -> Result<String> {
    Ok(naming.filename_for_date(resolve_date(input, naming)?))
}

fn run(cli: Cli) -> Result<()> {
    let path = settings_path(cli.settings.as_deref())?;

    match cli.command {
        Commands::Init => run_init(&path),
        Commands::Config {
            key,
            value,
            list,
            reset,
            yes,
        } => run_config(&path, key, value, list, reset, yes),
        command => run_journal(&path, command),
    }
}

fn run_journal(path: &Path, command: Commands) -> Result<()> {
    let settings = Settings::load(path)?;
    let store = FileSystemStore::from_settings(&settings)?;
    let naming = store.naming().clone();
    let now = Local::now().naive_local();

    match command {
        Commands::New {
            title,
            body,
            tags,
            template,
        } => {
            let body = match body.as_deref() {
                Some("-") => {
                    let mut text = String::new();
                    std::io::stdin().read_to_string(&mut text)?;
                    text
                }
                Some(text) => text.to_string(),
                None => String::new(),
            };

            let request = NewEntryRequest {
                title,
                tags,
                body,
                template,
            };
            let entry = NewEntryService::new(&store, &settings).execute(&request, now)?;
            println!("Added entry #{} to {}: {}", entry.entry_index, entry.day, entry.title);
        }
        Commands::Days { limit } => {
            let mut days = store.list_days()?;
            if let Some(n) = limit {
                days.truncate(n);
            }
            print!("{}", cli::format_day_list(&days));
        }
        Commands::Show { date } => {
            let filename = day_filename(&date, &naming)?;
            let text = store.read_day_file(&filename)?;
            println!("{}", text.trim_end());
        }
        Commands::Entries { date } => {
            let service = EntryService::new(&store, &settings);
            let entries = match date {
                Some(date) => service.entries_for_day(&day_filename(&date, &naming)?)?,
                None => service.all_entries()?,
            };
            print!("{}", cli::format_entry_list(&entries));
        }
        Commands::Edit { date, entry } => {
            let filename = day_filename(&date, &naming)?;
            let editor = ExternalEditor::new(settings.get_editor());
            let service = DayEditor::new(&store, &settings);

            let changed = match entry {
                Some(index) => service.edit_entry_external(&filename, index, &editor)?,
                None => service.edit_day_external(&filename, &editor)?,
            };
            if changed {
                println!("Saved {}", filename);
            } else {
                println!("No changes to {}", filename);
            }
        }
        Commands::Search {
            text,
            case_sensitive,
            tags,
            from,
            to,
            min_words,
            max_words,
            regex,
        } => {
            let mut predicates = Vec::new();

            if let Some(text) = &text {
                predicates.push(SearchPredicate::substring(text, case_sensitive));
            }
            if !tags.is_empty() {
                predicates.push(SearchPredicate::tags(&tags));
            }
            if from.is_some() || to.is_some() {
                let start = match &from {
                    Some(d) => resolve_date(d, &naming)?,
                    None => chrono::NaiveDate::MIN,
                };
                let end = match &to {
                    Some(d) => resolve_date(d, &naming)?,
                    None => chrono::NaiveDate::MAX,
                };
                predicates.push(SearchPredicate::date_range(start, end)?);
            }
            if min_words.is_some() || max_words.is_some() {
                predicates.push(SearchPredicate::length_range(min_words.unwrap_or(0), max_words)?);
            }
            if let Some(pattern) = &regex {
                predicates.push(SearchPredicate::regex(pattern)?);
            }

            let hits = SearchService::new(&store, &settings).search(&SearchPredicate::All(predicates))?;
            print!("{}", cli::format_search_results(&hits, text.as_deref()));
        }
        Commands::DeleteEntry { date, index, title } => {
            let filename = day_filename(&date, &naming)?;
            let removed =
                EntryService::new(&store, &settings).delete_entry(&filename, index, title.as_deref())?;
            println!("Deleted entry #{} '{}' from {}", index, removed.title, filename);
        }
        Commands::DeleteDay { date, yes } => {
            let filename = day_filename(&date, &naming)?;
            if !yes {
                return Err(DaybookError::Config(format!(
                    "Refusing to delete {} without --yes",
                    filename
                )));
            }
            store.delete_day(&filename)?;
            println!("Deleted {}", filename);
        }
        Commands::Backup { force } => {
            let outcome = backup_journal(&settings, force, now);
            println!("{}", cli::format_backup_outcome(&outcome));
            if let BackupOutcome::Failed(reason) = outcome {
                return Err(DaybookError::Io(std::io::Error::other(reason)));
            }
        }
        Commands::Stats => {
            let stats = journal_stats(&store, &settings, now.date())?;
            print!("{}", cli::format_stats(&stats));
        }
        Commands::Templates => {
            let templates = available_templates(&settings.templates_dir())?;
            print!("{}", cli::format_template_list(&templates));
        }
        Commands::Init | Commands::Config { .. } => unreachable!("handled before loading settings"),
    }

    Ok(())
}

fn run_init(path: &Path) -> Result<()> {
    let (settings, report) = init(path)?;

    if report.settings_written {
        println!("Wrote default settings to {}", path.display());
    } else {
        println!("Using existing settings at {}", path.display());
    }
    for dir in &report.created_dirs {
        println!("Created {}", dir.display());
    }
    println!("Journal directory: {}", settings.journal_dir().display());
    Ok(())
}

fn run_config(
    path: &Path,
    key: Option<String>,
    value: Option<String>,
    list: bool,
    reset: bool,
    yes: bool,
) -> Result<()> {
    let service = ConfigService::new(path.to_path_buf());

    if reset {
        if !yes {
            return Err(DaybookError::Config(
                "Refusing to reset settings without --yes".to_string(),
            ));
        }
        service.reset()?;
        println!("Settings reset to defaults: {}", path.display());
    } else if list {
        for (key, value) in service.list()? {
            println!("{} = {}", key, value);
        }
    } else if let Some(k) = key {
        if let Some(v) = value {
            service.set(&k, &v)?;
            println!("Set {} = {}", k, v);
        } else {
            println!("{}", service.get(&k)?);
        }
    } else {
        println!("Usage: daybook config [--list | --reset --yes | <key> [<value>]]");
        println!("Settings file: {}", path.display());
    }
    Ok(())
}
