mod host;

use clap::{Parser, Subcommand};
use futures::executor::block_on;
use host::{FileExporter, FileStore};
use serde_json::Value;
use std::path::{Path, PathBuf};
use stylelift_codegen::plugin::validate_selection;
use stylelift_codegen::{Converter, NoExporter, OutputFormat, Plugin, VectorExporter};
use stylelift_scene::{Loader, SceneNode};

const DEFAULT_SETTINGS: &str = "stylelift.json";

#[derive(Parser)]
#[command(name = "stylelift")]
#[command(about = "stylelift: turn design scene graphs into HTML, CSS and design tokens")]
#[command(version)]
struct Cli {
    /// Settings file
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a scene snapshot to HTML, CSS and the enabled JSON extracts
    Build {
        /// Scene snapshot (.json)
        path: String,

        /// Print a single format (HTML, CSS, DESIGN_TOKENS, LAYOUT_INFO,
        /// COMPONENT_INFO, AI_PACKAGE) instead of writing files
        #[arg(long)]
        format: Option<String>,

        /// Output directory, defaults to the snapshot's directory
        #[arg(long)]
        out: Option<PathBuf>,

        /// Directory of exported vectors named `<layer-name>.svg`
        #[arg(long)]
        svg_dir: Option<PathBuf>,
    },

    /// Print the component JSON for a selection snapshot
    Json {
        /// Selection snapshot: one node or an array of nodes
        path: String,

        /// Directory of exported vectors named `<layer-name>.svg`
        #[arg(long)]
        svg_dir: Option<PathBuf>,
    },

    /// Check a scene snapshot without writing output
    Check {
        /// Scene snapshot (.json)
        path: String,
    },

    /// Show or change the settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective settings
    Show,

    /// Set one option, e.g. `cssUnits rem`
    Set {
        key: String,
        /// JSON value; bare words are taken as strings
        value: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let plugin = Plugin::load(FileStore::new(&cli.settings));

    match cli.command {
        Command::Build {
            path,
            format,
            out,
            svg_dir,
        } => {
            let converter = plugin.converter();
            match svg_dir {
                Some(dir) => cmd_build(&converter, &path, format, out, &FileExporter::new(dir)),
                None => cmd_build(&converter, &path, format, out, &NoExporter),
            }
        }
        Command::Json { path, svg_dir } => {
            let converter = plugin.converter();
            match svg_dir {
                Some(dir) => cmd_json(&converter, &path, &FileExporter::new(dir)),
                None => cmd_json(&converter, &path, &NoExporter),
            }
        }
        Command::Check { path } => cmd_check(&plugin.converter(), &path),
        Command::Config { action } => cmd_config(plugin, action),
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        fail(format!("Error: file not found: {path}"));
    }
    std::fs::read_to_string(p).unwrap_or_else(|e| fail(format!("Error reading {path}: {e}")))
}

fn load_root(path: &str) -> SceneNode {
    Loader::load(&read_source(path)).unwrap_or_else(|e| fail(format!("Load error: {e}")))
}

fn write_file(path: &Path, contents: &str) {
    if let Err(e) = std::fs::write(path, contents) {
        fail(format!("Error writing {}: {e}", path.display()));
    }
    eprintln!("Built: {}", path.display());
}

fn cmd_build<E: VectorExporter>(
    converter: &Converter,
    path: &str,
    format: Option<String>,
    out: Option<PathBuf>,
    exporter: &E,
) {
    let root = load_root(path);

    if let Some(format) = format {
        let result = block_on(converter.generate(&root, &format, exporter));
        println!("{}", result.code);
        return;
    }

    let outputs = block_on(converter.generate_all(&root, exporter))
        .unwrap_or_else(|e| fail(format!("Codegen error: {e}")));

    let source = Path::new(path);
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("index");
    let dir = out.unwrap_or_else(|| source.parent().unwrap_or(Path::new(".")).to_path_buf());
    if let Err(e) = std::fs::create_dir_all(&dir) {
        fail(format!("Error creating {}: {e}", dir.display()));
    }

    let config = converter.config();
    for (format, code) in &outputs {
        let suffix = match format {
            OutputFormat::Html => {
                write_file(&dir.join(format!("{stem}.html")), &standalone_page(stem, &outputs));
                continue;
            }
            OutputFormat::Css => "",
            OutputFormat::DesignTokens if config.extract_design_tokens => ".tokens",
            OutputFormat::LayoutInfo if config.extract_layout_info => ".layout",
            OutputFormat::ComponentInfo if config.extract_component_info => ".components",
            _ => continue,
        };
        write_file(
            &dir.join(format!("{stem}{suffix}.{}", format.extension())),
            code,
        );
    }
}

/// HTML document with the stylesheet inlined.
fn standalone_page(title: &str, outputs: &[(OutputFormat, String)]) -> String {
    let code = |wanted: OutputFormat| {
        outputs
            .iter()
            .find(|(format, _)| *format == wanted)
            .map(|(_, code)| code.as_str())
            .unwrap_or_default()
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n");
    html.push_str(&format!("  <title>{title}</title>\n"));
    html.push_str(&format!("  <style>\n{}  </style>\n", code(OutputFormat::Css)));
    html.push_str("</head>\n<body>\n");
    html.push_str(code(OutputFormat::Html));
    html.push_str("</body>\n</html>\n");
    html
}

fn cmd_json<E: VectorExporter>(converter: &Converter, path: &str, exporter: &E) {
    let source = read_source(path);
    let selection = if source.trim_start().starts_with('[') {
        Loader::load_selection(&source)
    } else {
        Loader::load(&source).map(|root| vec![root])
    }
    .unwrap_or_else(|e| fail(format!("Load error: {e}")));

    let data = block_on(converter.generate_json(&selection, exporter))
        .unwrap_or_else(|e| fail(e));
    match serde_json::to_string_pretty(&data) {
        Ok(json) => println!("{json}"),
        Err(e) => fail(format!("Error: {e}")),
    }
}

fn cmd_check(converter: &Converter, path: &str) {
    let root = load_root(path);
    if let Err(e) = validate_selection(std::slice::from_ref(&root)) {
        log::warn!("{e}");
    }
    if let Err(e) = converter.convert_with_exports(&root, &Default::default()) {
        fail(format!("Codegen error: {e}"));
    }
    eprintln!("OK: {path}");
}

fn cmd_config(mut plugin: Plugin<FileStore>, action: ConfigAction) {
    match action {
        ConfigAction::Show => {}
        ConfigAction::Set { key, value } => {
            if let Err(e) = plugin.set_option(&key, parse_value(&value)) {
                fail(format!("Error: {e}"));
            }
            eprintln!("Saved: {}", plugin.store().path().display());
        }
    }
    match serde_json::to_string_pretty(plugin.config()) {
        Ok(json) => println!("{json}"),
        Err(e) => fail(format!("Error: {e}")),
    }
}

/// A JSON literal, or the raw text as a string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
