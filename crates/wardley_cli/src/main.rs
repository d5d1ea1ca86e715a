//! Command-line driver for the map core.
//!
//! # Responsibility
//! - Run analysis, export, import and version-store flows against snapshot
//!   files so the core can be exercised without a UI host.
//! - Keep output deterministic for scripted checks.

use log::info;
use pico_args::Arguments;
use std::error::Error;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use wardley_core::classify::strategic_guidance;
use wardley_core::import::{ImageFormat, ImageInfo, ImportSession, PlaceholderDetector};
use wardley_core::map::nested_chain::ChainRow;
use wardley_core::{
    analyze, build_nested_chain, db, export, CanvasGeometry, EditorConfig, ExportFormat, MapModel,
    MapService, MapSnapshot, SqliteMapRepository,
};

type CliResult<T> = Result<T, Box<dyn Error>>;

const USAGE: &str = "\
wardley: value-chain map tools

USAGE:
    wardley                                   print core ping/version
    wardley analyze PATH [--config FILE]      classify components and print metrics
    wardley export PATH --format json|svg [--output FILE]
    wardley import-demo --width W --height H  run placeholder detection into an empty map
    wardley chain OUTLINE                     build a map from an indented outline (2 spaces per level)
    wardley create --db FILE PATH             store PATH as a new map
    wardley save --db FILE --map ID PATH [--comment TEXT]
    wardley history --db FILE --map ID        list versions, newest first
    wardley diff --db FILE --map ID --version N PATH

ENV:
    WARDLEY_LOG_DIR    absolute directory for rolling log files
    WARDLEY_LOG_LEVEL  trace|debug|info|warn|error
";

fn main() -> ExitCode {
    if let Err(err) = wardley_core::init_logging_from_env() {
        eprintln!("warning: logging disabled: {err}");
    }
    match run(Arguments::from_env()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(mut args: Arguments) -> CliResult<()> {
    if args.contains(["-h", "--help"]) {
        print!("{USAGE}");
        return Ok(());
    }
    let config = match args.opt_value_from_str::<_, PathBuf>("--config")? {
        Some(path) => EditorConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => EditorConfig::default(),
    };
    let geometry = config.canvas;

    let Some(subcommand) = args.subcommand()? else {
        println!("wardley_core ping={}", wardley_core::ping());
        println!("wardley_core version={}", wardley_core::core_version());
        return Ok(());
    };
    info!("event=cli_run module=cli status=start command={subcommand}");

    match subcommand.as_str() {
        "analyze" => {
            let snapshot = read_snapshot(&free_path(args)?)?;
            print_analysis(&snapshot, &geometry);
        }
        "export" => {
            let format: ExportFormat = args.value_from_str("--format")?;
            let output: Option<PathBuf> = args.opt_value_from_str("--output")?;
            let snapshot = read_snapshot(&free_path(args)?)?;
            let rendered = export(format, &snapshot, &geometry)?;
            match output {
                Some(path) => std::fs::write(path, rendered)?,
                None => print!("{rendered}"),
            }
        }
        "import-demo" => {
            let width: f64 = args.value_from_str("--width")?;
            let height: f64 = args.value_from_str("--height")?;
            finish(args)?;
            let snapshot = import_demo(width, height, geometry)?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        "chain" => {
            let outline = std::fs::read_to_string(free_path(args)?)?;
            let snapshot = build_nested_chain(&parse_outline(&outline), geometry);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        "create" | "save" | "history" | "diff" => run_store(&subcommand, args)?,
        other => return Err(format!("unknown subcommand `{other}`\n\n{USAGE}").into()),
    }
    Ok(())
}

fn run_store(subcommand: &str, mut args: Arguments) -> CliResult<()> {
    let db_path: PathBuf = args.value_from_str("--db")?;
    let map_id: Option<String> = args.opt_value_from_str("--map")?;
    let comment: Option<String> = args.opt_value_from_str("--comment")?;
    let version: Option<u32> = args.opt_value_from_str("--version")?;
    let rest = args.finish();

    let conn = db::open_db(&db_path)?;
    let mut service = MapService::new(SqliteMapRepository::try_new(&conn)?);
    if let Some(raw) = map_id.as_deref() {
        service.select_map(raw)?;
    }

    match subcommand {
        "create" => {
            let snapshot = read_snapshot(&single_path(rest)?)?;
            let map_id = service.create_map(&snapshot)?;
            println!("map {map_id} created");
        }
        "save" => {
            let snapshot = read_snapshot(&single_path(rest)?)?;
            let summary = service.save_version(&snapshot, comment)?;
            println!("version {} saved: {}", summary.version, summary.comment);
        }
        "history" => {
            for summary in &service.state().versions {
                println!(
                    "v{}\t{}\t{}",
                    summary.version, summary.created_at, summary.comment
                );
            }
        }
        _ => {
            let version = version.ok_or("--version is required")?;
            let snapshot = read_snapshot(&single_path(rest)?)?;
            let diff = service.compare_version(version, &snapshot)?;
            for component in &diff.added_components {
                println!("+ component {} {}", component.id, component.name);
            }
            for component in &diff.removed_components {
                println!("- component {} {}", component.id, component.name);
            }
            for moved in &diff.moved_components {
                println!(
                    "~ component {} ({:.1},{:.1}) -> ({:.1},{:.1})",
                    moved.id, moved.from.x, moved.from.y, moved.to.x, moved.to.y
                );
            }
            for rel in &diff.added_relationships {
                println!("+ relationship {} -> {} {}", rel.source, rel.target, rel.kind);
            }
            for rel in &diff.removed_relationships {
                println!("- relationship {} -> {} {}", rel.source, rel.target, rel.kind);
            }
        }
    }
    Ok(())
}

fn print_analysis(snapshot: &MapSnapshot, geometry: &CanvasGeometry) {
    let metrics = analyze(snapshot, geometry);
    println!(
        "components={} relationships={} density={}% connections_per_component={:.1}",
        metrics.component_count,
        metrics.relationship_count,
        metrics.density.percent(),
        metrics.density.connections_per_component
    );
    for entry in &metrics.components {
        let classification = &entry.classification;
        println!(
            "{}\t{}\t{}\tevolution={}% visibility={}%",
            entry.component.label(),
            classification.evolution_stage,
            classification.visibility_level,
            classification.evolution_percent(),
            classification.visibility_percent()
        );
        if let Some(first) = strategic_guidance(classification).recommendations.first() {
            println!("\t> {first}");
        }
    }
    println!("evolution:");
    for bucket in &metrics.evolution {
        println!("  {}\t{}\t{}%", bucket.key, bucket.count, bucket.percent());
    }
    println!("visibility:");
    for bucket in &metrics.visibility {
        println!("  {}\t{}\t{}%", bucket.key, bucket.count, bucket.percent());
    }
    println!("top connected:");
    for rank in metrics.top_connected(wardley_core::metrics::TOP_CONNECTED_LIMIT) {
        println!("  {}\t{}", rank.name, rank.dependency_count);
    }
    for insight in &metrics.insights {
        println!("insight: {}", insight.title);
    }
    for recommendation in &metrics.recommendations {
        let name = snapshot
            .component(&recommendation.component_id)
            .map_or("?", |component| component.label());
        println!(
            "recommend: [{:?}] {}\t{}",
            recommendation.priority, name, recommendation.recommendation
        );
    }
}

fn import_demo(width: f64, height: f64, geometry: CanvasGeometry) -> CliResult<MapSnapshot> {
    let mut session = ImportSession::new();
    session.load_image(ImageInfo::new(width, height, ImageFormat::Png)?);
    session.begin_detection()?;
    session.complete_detection(&PlaceholderDetector)?;
    let mut model = MapModel::new(geometry);
    let outcome = session.commit(&mut model)?;
    eprintln!(
        "imported components={} relationships={}",
        outcome.added_components.len(),
        outcome.added_relationships
    );
    Ok(model.snapshot())
}

/// One row per non-blank line; two leading spaces (or one tab) per level.
fn parse_outline(text: &str) -> Vec<ChainRow> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let width: usize = line
                .chars()
                .take_while(|ch| ch.is_whitespace())
                .map(|ch| if ch == '\t' { 2 } else { 1 })
                .sum();
            ChainRow::new(line.trim(), u32::try_from(width / 2).unwrap_or(u32::MAX))
        })
        .collect()
}

fn read_snapshot(path: &Path) -> CliResult<MapSnapshot> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read `{}`: {err}", path.display()))?;
    Ok(MapSnapshot::from_json_str(&text)?)
}

fn free_path(args: Arguments) -> CliResult<PathBuf> {
    single_path(args.finish())
}

fn single_path(rest: Vec<OsString>) -> CliResult<PathBuf> {
    match rest.as_slice() {
        [path] => Ok(PathBuf::from(path)),
        [] => Err("input path required".into()),
        _ => Err(format!("unexpected arguments: {rest:?}").into()),
    }
}

fn finish(args: Arguments) -> CliResult<()> {
    let rest = args.finish();
    if rest.is_empty() {
        Ok(())
    } else {
        Err(format!("unexpected arguments: {rest:?}").into())
    }
}
