use clap::{Parser, Subcommand};
use fm_analysis::{InclusionMode, MixReport, needs_normalization, total_inclusion};
use fm_feed::{IngredientCategory, ReportKey, catalog};
use fm_project::{Formulation, ProjectError};
use fm_recommend::{
    AssessmentRow, ChartPoint, DisplayGroup, GrowthPhase, chart_points, convert, out_of_spec,
};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fm-cli")]
#[command(about = "FeedMix CLI - poultry feed formulation analyzer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a formulation from the catalog starter mix
    New {
        /// Output formulation file (.yaml or .json)
        path: PathBuf,
        /// Formulation name (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,
        /// Growth phase to evaluate against
        #[arg(long, default_value_t = GrowthPhase::Starter)]
        phase: GrowthPhase,
    },
    /// Validate formulation file syntax and values
    Validate {
        /// Path to the formulation file
        path: PathBuf,
    },
    /// Analyze a formulation and compare it with the phase recommendations
    Analyze {
        /// Path to the formulation file
        path: PathBuf,
        /// Evaluate against this phase instead of the saved one
        #[arg(long)]
        phase: Option<GrowthPhase>,
        /// Also list every nutrient in the report
        #[arg(long)]
        all: bool,
        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scale inclusions so they sum to 100%
    Normalize {
        /// Path to the formulation file
        path: PathBuf,
        /// Output file (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Browse the ingredient and enzyme catalog
    Catalog {
        /// Filter by name or description
        #[arg(short, long)]
        query: Option<String>,
        /// Filter by category (Energy, Protein, AminoAcids, ...)
        #[arg(short, long)]
        category: Option<IngredientCategory>,
        /// List enzymes instead of ingredients
        #[arg(long)]
        enzymes: bool,
        /// Show default inclusions in kg/ton instead of percent
        #[arg(long)]
        kg_per_ton: bool,
    },
    /// Import ingredients from CSV into a formulation
    ImportCsv {
        /// CSV file with a name column
        csv_path: PathBuf,
        /// Formulation to append to; created when missing
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Export the ingredients of a formulation as CSV
    ExportCsv {
        /// Path to the formulation file
        path: PathBuf,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::New { path, name, phase } => cmd_new(&path, name, phase),
        Commands::Validate { path } => cmd_validate(&path),
        Commands::Analyze {
            path,
            phase,
            all,
            json,
        } => cmd_analyze(&path, phase, all, json),
        Commands::Normalize { path, output } => cmd_normalize(&path, output.as_deref()),
        Commands::Catalog {
            query,
            category,
            enzymes,
            kg_per_ton,
        } => {
            let mode = if kg_per_ton {
                InclusionMode::KgPerTon
            } else {
                InclusionMode::Percent
            };
            cmd_catalog(query.as_deref(), category, enzymes, mode)
        }
        Commands::ImportCsv { csv_path, output } => cmd_import_csv(&csv_path, &output),
        Commands::ExportCsv { path, output } => cmd_export_csv(&path, output.as_deref()),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}

fn cmd_new(path: &Path, name: Option<String>, phase: GrowthPhase) -> CliResult<()> {
    let mut formulation = Formulation::starter(name.unwrap_or_else(|| file_stem(path)));
    formulation.phase = phase;
    fm_project::save(path, &formulation)?;
    debug!(path = %path.display(), %phase, "formulation created");
    println!(
        "✓ Created {} ({} ingredients, {}, {})",
        path.display(),
        formulation.ingredients.len(),
        phase,
        phase.age_range()
    );
    Ok(())
}

fn cmd_validate(path: &Path) -> CliResult<()> {
    println!("Validating formulation: {}", path.display());
    let formulation = fm_project::load(path)?;
    println!("✓ Formulation is valid");
    println!("  Name: {}", formulation.name);
    println!(
        "  Phase: {} ({})",
        formulation.phase,
        formulation.phase.age_range()
    );
    let (total, unit) = formulation.display_inclusion(total_inclusion(&formulation.ingredients));
    println!(
        "  Ingredients: {} (total {:.2} {})",
        formulation.ingredients.len(),
        total,
        unit
    );
    println!(
        "  Enzymes: {} ({} dosed)",
        formulation.enzymes.len(),
        formulation.enzymes.iter().filter(|e| e.is_active()).count()
    );
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisOutput<'a> {
    name: &'a str,
    phase: GrowthPhase,
    report: &'a MixReport,
    assessment: &'a [AssessmentRow],
    out_of_spec: Vec<ReportKey>,
    chart: Vec<ChartPoint>,
}

fn cmd_analyze(
    path: &Path,
    phase: Option<GrowthPhase>,
    all: bool,
    json: bool,
) -> CliResult<()> {
    let mut formulation = fm_project::load(path)?;
    if let Some(phase) = phase {
        debug!(saved = %formulation.phase, %phase, "phase overridden from the command line");
        formulation.phase = phase;
    }

    let report = formulation.analyze();
    let profile = formulation.profile();
    let rows = formulation.assess(&report);
    let failing = out_of_spec(&report, &profile);

    if json {
        let output = AnalysisOutput {
            name: &formulation.name,
            phase: formulation.phase,
            report: &report,
            assessment: &rows,
            out_of_spec: failing,
            chart: chart_points(&report, &profile),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} ({}, {})",
        formulation.name,
        formulation.phase,
        formulation.phase.age_range()
    );
    if report.is_empty() {
        println!("  No ingredients");
        return Ok(());
    }

    let (total, unit) = formulation.display_inclusion(report.total_inclusion);
    println!("  Total inclusion: {:.2} {}", total, unit);
    if needs_normalization(report.total_inclusion) {
        let (full, _) = formulation.display_inclusion(100.0);
        println!(
            "  ⚠ Inclusions sum to {:.2} {}, run `fm-cli normalize` to scale them to {:.0} {}",
            total, unit, full, unit
        );
    }
    for key in [ReportKey::TotalCostPerTon, ReportKey::TotalCostPer100kg] {
        if let Some(value) = report.value(key) {
            let (shown, unit) = convert(value, key, formulation.units.unit_for(key));
            println!("  Cost: {:.2} {}", shown, unit);
        }
    }

    for group in DisplayGroup::ALL {
        let group_rows: Vec<&AssessmentRow> = rows.iter().filter(|r| r.group == group).collect();
        if group_rows.is_empty() {
            continue;
        }
        println!();
        println!("{}", group.label());
        for row in group_rows {
            print_row(row);
        }
    }

    println!();
    if failing.is_empty() {
        println!("✓ All {} targets met", profile.len());
    } else {
        println!("✗ {} of {} targets out of range:", failing.len(), profile.len());
        for key in &failing {
            println!("  {}", key.display_name());
        }
    }

    if all {
        println!();
        println!("Ingredients");
        for ing in &formulation.ingredients {
            let (shown, unit) = formulation.display_inclusion(ing.inclusion_pct);
            println!("  {:>3} {:<36} {:>10.2} {}", ing.id, ing.name, shown, unit);
        }
        println!();
        println!("Nutrients");
        for (key, value) in report.entries() {
            let (shown, unit) = convert(value, key, formulation.units.unit_for(key));
            println!("  {:<32} {:>10.3} {}", key.display_name(), shown, unit);
        }
    }
    Ok(())
}

fn print_row(row: &AssessmentRow) {
    let range = if row.display_max.is_infinite() {
        format!("min {:.2}", row.display_min)
    } else {
        format!("{:.2} - {:.2}", row.display_min, row.display_max)
    };
    let marker = if row.overridden { "*" } else { " " };
    println!(
        "  {:<28} {:>10.2} {:<8} {:>20}{} {:<22} {} {:.2}",
        row.label,
        row.display_value,
        row.unit,
        range,
        marker,
        row.status_label,
        row.direction.arrow(),
        row.display_deviation.abs()
    );
}

fn cmd_normalize(path: &Path, output: Option<&Path>) -> CliResult<()> {
    let formulation = fm_project::load(path)?;
    let normalized = formulation.normalized();
    let (before, unit) = formulation.display_inclusion(total_inclusion(&formulation.ingredients));
    let (after, _) = normalized.display_inclusion(total_inclusion(&normalized.ingredients));

    let target = output.unwrap_or(path);
    fm_project::save(target, &normalized)?;
    debug!(path = %target.display(), "normalized formulation saved");
    println!(
        "✓ Normalized {:.2} {} -> {:.2} {}, saved to {}",
        before,
        unit,
        after,
        unit,
        target.display()
    );
    Ok(())
}

fn cmd_catalog(
    query: Option<&str>,
    category: Option<IngredientCategory>,
    enzymes: bool,
    mode: InclusionMode,
) -> CliResult<()> {
    if enzymes {
        println!("Enzymes:");
        for entry in catalog::enzyme_catalog() {
            println!(
                "  {:<10} {:<24} {:>6.0} g/t  {:>8.0} $/ton",
                entry.id, entry.name, entry.standard_dosage_g_per_ton, entry.price_usd_per_ton
            );
        }
        return Ok(());
    }

    let query = query.unwrap_or_default();
    let entries: Vec<_> = match category {
        Some(category) => catalog::by_category(category)
            .filter(|e| e.matches_query(query))
            .collect(),
        None => catalog::search(query).collect(),
    };
    debug!(query, ?category, matches = entries.len(), "catalog searched");
    if entries.is_empty() {
        println!("No catalog ingredients match");
        return Ok(());
    }

    println!("Catalog ingredients:");
    for entry in entries {
        println!(
            "  {:>3} {:<36} {:<20} {:>8.2} {:<6} {:>8.0} $/ton",
            entry.id,
            entry.name,
            entry.category.label(),
            mode.from_percent(entry.default_inclusion_pct),
            mode.unit(),
            entry.price_usd_per_ton
        );
    }
    Ok(())
}

fn cmd_import_csv(csv_path: &Path, output: &Path) -> CliResult<()> {
    let mut formulation = if output.exists() {
        fm_project::load(output)?
    } else {
        Formulation::new(file_stem(output))
    };

    let imported = fm_project::read_csv(csv_path, &formulation.ingredients)?;
    let count = imported.len();
    debug!(
        csv = %csv_path.display(),
        existing = formulation.ingredients.len(),
        imported = count,
        "ingredients appended"
    );
    formulation.ingredients.extend(imported);
    fm_project::save(output, &formulation)?;

    println!("✓ Imported {} ingredients into {}", count, output.display());
    Ok(())
}

fn cmd_export_csv(path: &Path, output: Option<&Path>) -> CliResult<()> {
    let formulation = fm_project::load(path)?;
    match output {
        Some(out) => {
            fm_project::write_csv(out, &formulation.ingredients)?;
            debug!(csv = %out.display(), rows = formulation.ingredients.len(), "CSV written");
            println!(
                "✓ Exported {} ingredients to {}",
                formulation.ingredients.len(),
                out.display()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            fm_project::export_ingredients(&mut stdout, &formulation.ingredients)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
