use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, eyre};
use color_eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wear_inspector::export::{export_wear_csv, save_assessment_json};
use wear_inspector::loader::{load_assessment, load_defects, load_solutions};
use wear_inspector::model::{BuildingType, WearAssessment};
use wear_inspector::report::{generate_unified_report, ReportInputs, ReportMeta};
use wear_inspector::sync::{SyncConfig, SyncDispatcher};

#[derive(Parser, Debug)]
#[command(name = "wear-inspector")]
#[command(about = "Wear Inspector - physical wear calculation, inspection reports and report sync")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate physical wear for a building
    Wear {
        /// Building preset: residential, office or industrial
        #[arg(long, default_value = "residential", conflicts_with = "load")]
        template: BuildingType,

        /// Load a saved assessment instead of a preset
        #[arg(long, value_name = "FILE")]
        load: Option<PathBuf>,

        /// Switch the loaded assessment to another preset, keeping matching wear values
        #[arg(long, value_name = "TYPE", requires = "load")]
        switch_to: Option<BuildingType>,

        /// Element wear as NAME=PERCENT (repeatable)
        #[arg(long = "set", value_name = "NAME=PERCENT")]
        set: Vec<String>,

        /// Save the assessment as JSON
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,

        /// Export the wear table to CSV
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },

    /// Generate the unified DOCX report
    Report {
        /// Defect records JSON (photo analysis results)
        #[arg(long, value_name = "FILE")]
        defects: Option<PathBuf>,

        /// Saved wear assessment JSON
        #[arg(long, value_name = "FILE")]
        wear: Option<PathBuf>,

        /// Constructive solutions JSON
        #[arg(long, value_name = "FILE")]
        solutions: Option<PathBuf>,

        /// Output DOCX path
        #[arg(long, short, value_name = "FILE")]
        output: PathBuf,

        #[arg(long, default_value = "")]
        object_name: String,

        #[arg(long, default_value = "")]
        address: String,

        #[arg(long, default_value = "")]
        project: String,
    },

    /// Upload reports through the configured transport
    Sync {
        /// Sync configuration JSON (defaults to the user config directory)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Single report to upload
        #[arg(long, value_name = "FILE", conflicts_with = "dir")]
        file: Option<PathBuf>,

        /// Project name for a single upload
        #[arg(long, default_value = "", requires = "file")]
        project: String,

        /// Upload every report in a project directory
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Only probe the selected transport
        #[arg(long)]
        test: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wear_inspector=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match Args::parse().command {
        Command::Wear {
            template,
            load,
            switch_to,
            set,
            save,
            csv,
        } => run_wear(template, load, switch_to, &set, save, csv),
        Command::Report {
            defects,
            wear,
            solutions,
            output,
            object_name,
            address,
            project,
        } => {
            let defects = defects.map(load_defects).transpose()?;
            let solutions = solutions.map(load_solutions).transpose()?;
            let wear = wear.map(load_assessment).transpose()?.map(|a| a.report());

            let inputs = ReportInputs {
                defects: defects.as_deref(),
                wear: wear.as_ref(),
                solutions: solutions.as_deref(),
            };
            let meta = ReportMeta {
                object_name,
                address,
                project_name: project,
            };
            if !generate_unified_report(&inputs, &meta, &output) {
                bail!("failed to generate report {}", output.display());
            }
            println!("Report written: {}", output.display());
            Ok(())
        }
        Command::Sync {
            config,
            file,
            project,
            dir,
            test,
        } => {
            let config = match config {
                Some(path) => SyncConfig::load_from_file(&path)?,
                None => SyncConfig::load()?,
            };
            let method = config.sync_method;
            let dispatcher = SyncDispatcher::from_config(config);

            if test {
                let ok = dispatcher.test_connection(method);
                println!("{method}: {}", if ok { "reachable" } else { "unreachable" });
                return Ok(());
            }

            if let Some(file) = file {
                let outcome = dispatcher.sync_file(&file, &project);
                println!("{}", serde_json::to_string(&outcome.to_map())?);
                if !outcome.is_success() {
                    bail!("sync of {} failed", file.display());
                }
                return Ok(());
            }

            if let Some(dir) = dir {
                let result = dispatcher.sync_project_reports(&dir)?;
                for path in &result.synced {
                    println!("synced  {}", path.display());
                }
                for path in &result.failed {
                    println!("failed  {}", path.display());
                }
                return Ok(());
            }

            Err(eyre!("nothing to do: pass --file, --dir or --test"))
        }
    }
}

fn run_wear(
    template: BuildingType,
    load: Option<PathBuf>,
    switch_to: Option<BuildingType>,
    set: &[String],
    save: Option<PathBuf>,
    csv: Option<PathBuf>,
) -> Result<()> {
    let mut assessment = match load {
        Some(path) => load_assessment(&path)?,
        None => WearAssessment::new(template),
    };
    if let Some(building_type) = switch_to {
        assessment.switch_template(building_type, true);
    }

    for pair in set {
        let (name, value) = pair
            .rsplit_once('=')
            .ok_or_else(|| eyre!("expected NAME=PERCENT, got '{pair}'"))?;
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|e| eyre!("invalid wear value in '{pair}': {e}"))?;
        if !assessment.update_element_wear(name.trim(), value) {
            eprintln!("Rejected: '{pair}' (unknown element or value outside 0..100)");
        }
    }

    for element in assessment.elements() {
        println!(
            "{:<40} {:>6.1} {:>6.1} {:>7.2}",
            element.name,
            element.weight_percent,
            element.wear_percent,
            element.weighted_wear()
        );
    }
    let condition = assessment.technical_condition();
    println!("Total wear: {:.1}%", assessment.total_wear());
    println!(
        "Technical condition: {} - {}",
        condition.category, condition.recommendation
    );
    if !assessment.weights_are_balanced() {
        eprintln!(
            "Warning: element weights sum to {:.1}, not 100",
            assessment.weight_sum()
        );
    }

    let report = assessment.report();
    if let Some(path) = &save {
        save_assessment_json(&report, path)?;
        println!("Saved to JSON: {}", path.display());
    }
    if let Some(path) = &csv {
        export_wear_csv(&report, path)?;
        println!("Exported to CSV: {}", path.display());
    }
    Ok(())
}
