//! Command handlers

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::cli::{Cli, Commands};
use crate::output::output_rows;
use maint_app::config::Config;
use maint_app::export::{export_file_name, export_file_stem, export_to_excel, prepare_export};
use maint_domain::model::{ColumnMap, SheetRecord};
use maint_domain::repository::{CellWriter, PlateListSource, SheetSource};
use maint_domain::service::classifier::{ClassifyContext, DelayRules};
use maint_domain::service::duplicates::{detect_duplicates, DuplicateIndex};
use maint_domain::service::filter::{apply_filter, count_by_mode};
use maint_domain::service::generate_maintenance_report;
use maint_domain::state::{reduce, Action, SheetState};
use maint_infra::{CsvCellWriter, CsvPlateListSource, CsvSheetSource};
use maint_types::{Error, FilterMode, OutputFormat, Result};

pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::List {
            sheet,
            plates,
            filter,
            search,
        } => cmd_list(
            &config,
            &sheet,
            plates.as_deref(),
            filter,
            search.as_deref().unwrap_or(""),
            output_format,
        ),
        Commands::Summary { sheet, plates } => cmd_summary(&config, &sheet, plates.as_deref()),
        Commands::Export {
            sheet,
            plates,
            filter,
            search,
            output,
        } => cmd_export(
            &config,
            &sheet,
            plates.as_deref(),
            filter,
            search.as_deref().unwrap_or(""),
            output,
        ),
        Commands::Edit {
            sheet,
            row,
            column,
            value,
        } => cmd_edit(&sheet, row, &column, &value),
        Commands::Config {
            show,
            set_output,
            set_accident_days,
            set_oil_days,
            set_default_days,
            set_search_overrides,
            set_strict_not_ready,
            reset,
        } => cmd_config(
            show,
            set_output,
            set_accident_days,
            set_oil_days,
            set_default_days,
            set_search_overrides,
            set_strict_not_ready,
            reset,
        ),
    }
}

/// Sheet data plus everything derived from it at load time
struct LoadedSheet {
    records: Vec<SheetRecord>,
    columns: ColumnMap,
    duplicates: DuplicateIndex,
    invygo: HashSet<String>,
}

impl LoadedSheet {
    fn ctx<'a>(&'a self, rules: &'a DelayRules, today: NaiveDate) -> ClassifyContext<'a> {
        ClassifyContext {
            columns: &self.columns,
            duplicates: &self.duplicates,
            invygo_plates: &self.invygo,
            today,
            rules,
        }
    }
}

fn load_sheet(config: &Config, sheet: &Path, plates: Option<&Path>) -> Result<LoadedSheet> {
    println!("Loading sheet from: {}", sheet.display());
    let records = CsvSheetSource::new(sheet).load()?;
    println!("  Loaded {} records", records.len());

    let invygo = match plates {
        Some(path) => {
            println!("Loading reference plates from: {}", path.display());
            let set = CsvPlateListSource::new(path).load()?;
            println!("  Loaded {} plates", set.len());
            set
        }
        None => {
            eprintln!("Warning: no reference plate list given; every car classifies as Other");
            HashSet::new()
        }
    };

    let columns = ColumnMap::from_records(&records, &config.columns);
    let duplicates = detect_duplicates(&records, &columns);
    Ok(LoadedSheet {
        records,
        columns,
        duplicates,
        invygo,
    })
}

fn cmd_list(
    config: &Config,
    sheet: &Path,
    plates: Option<&Path>,
    filter: FilterMode,
    search: &str,
    output_format: OutputFormat,
) -> Result<()> {
    let loaded = load_sheet(config, sheet, plates)?;
    let today = Local::now().date_naive();
    let ctx = loaded.ctx(&config.delay_rules, today);

    let rows = apply_filter(&loaded.records, filter, search, &ctx, &config.filter);
    output_rows(output_format, &rows, &loaded.columns)?;

    let counts = count_by_mode(&loaded.records, &ctx, &config.filter);
    if counts.delayed > 0 {
        eprintln!("\nWarning: {} delayed vehicle(s) in the workshop", counts.delayed);
    }
    Ok(())
}

fn cmd_summary(config: &Config, sheet: &Path, plates: Option<&Path>) -> Result<()> {
    let loaded = load_sheet(config, sheet, plates)?;
    let today = Local::now().date_naive();
    let ctx = loaded.ctx(&config.delay_rules, today);

    let report = generate_maintenance_report(&loaded.records, &ctx, &config.filter);
    println!("\n{}", report);
    Ok(())
}

fn cmd_export(
    config: &Config,
    sheet: &Path,
    plates: Option<&Path>,
    filter: FilterMode,
    search: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let loaded = load_sheet(config, sheet, plates)?;
    let today = Local::now().date_naive();
    let ctx = loaded.ctx(&config.delay_rules, today);

    let rows = apply_filter(&loaded.records, filter, search, &ctx, &config.filter);
    let export = prepare_export(&rows);
    let output_path =
        output.unwrap_or_else(|| PathBuf::from(export_file_name(filter, search, today)));
    export_to_excel(&export, &export_file_stem(filter, search), &output_path)?;
    println!("Exported {} row(s) to {}", rows.len(), output_path.display());
    Ok(())
}

fn cmd_edit(sheet: &Path, row: u32, column: &str, value: &str) -> Result<()> {
    println!("Loading sheet from: {}", sheet.display());
    let records = CsvSheetSource::new(sheet).load()?;
    println!("  Loaded {} records", records.len());

    if row == 0 || row as usize > records.len() {
        return Err(Error::InvalidCell(format!(
            "row {} out of range (sheet has {} rows)",
            row,
            records.len()
        )));
    }

    let state = reduce(&SheetState::default(), Action::Load(records));
    let state = reduce(
        &state,
        Action::EditCell {
            row,
            column: column.to_string(),
            value: value.to_string(),
        },
    );
    let edited = &state.current[row as usize - 1];
    println!("Row {}: {} = '{}'", row, column, edited.get(column).unwrap_or(""));

    // The edit stands even when the write-back fails; local and remote
    // state may diverge until corrected.
    if let Err(e) = CsvCellWriter::new(sheet).write_cell(row, column, value) {
        eprintln!("Warning: failed to write edit back to the sheet: {}", e);
    } else {
        println!("Saved to {}", sheet.display());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    show: bool,
    set_output: Option<OutputFormat>,
    set_accident_days: Option<i64>,
    set_oil_days: Option<i64>,
    set_default_days: Option<i64>,
    set_search_overrides: Option<bool>,
    set_strict_not_ready: Option<bool>,
    reset: bool,
) -> Result<()> {
    if reset {
        Config::reset()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut changed = false;

    if let Some(format) = set_output {
        config.output_format = format;
        changed = true;
    }
    if let Some(days) = set_accident_days {
        config.delay_rules.accident_days = days;
        changed = true;
    }
    if let Some(days) = set_oil_days {
        config.delay_rules.oil_days = days;
        changed = true;
    }
    if let Some(days) = set_default_days {
        config.delay_rules.default_days = days;
        changed = true;
    }
    if let Some(v) = set_search_overrides {
        config.filter.search_overrides_filter = v;
        changed = true;
    }
    if let Some(v) = set_strict_not_ready {
        config.filter.not_ready_requires_date_out = v;
        changed = true;
    }

    if changed {
        config.save()?;
        println!("Configuration saved");
    }

    if show || !changed {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }
    Ok(())
}
