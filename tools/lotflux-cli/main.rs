use clap::{Parser, ValueEnum};
use lotflux::ast::Duration;
use lotflux::compiler::{Compiler, CompilerBuilder, CompilerOptions};
use lotflux::editor::{InputFormat, parse_workspace};
use lotflux::error::CompileError;
use lotflux::parser::Parser as DslParser;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    Blockly,
    Canonical,
}

/// Compiles a saved block workspace into LOT Flux DSL text
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the serialized block workspace (JSON)
    blocks_path: PathBuf,

    /// Document to replace with the generated program; printed to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Serialization format of the workspace file
    #[arg(short, long, value_enum, default_value = "blockly")]
    format: FormatCli,

    /// Optional JSON file with compiler options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Name of the action wrapping loose top-level blocks (overrides the config file)
    #[arg(long)]
    action_name: Option<String>,

    /// Trigger interval of the default action, e.g. 15s, 500ms, 5m
    #[arg(long)]
    every: Option<Duration>,

    /// Spaces per nesting level (overrides the config file)
    #[arg(long)]
    indent: Option<usize>,

    /// Print the lowered program as a tree on stderr
    #[arg(long)]
    tree: bool,

    /// Re-read the generated text and confirm it matches before writing
    #[arg(long)]
    verify: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let cli = Cli::parse();
    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Configuration ---
    let options = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read config '{}': {}", path.display(), e))
            });
            CompilerOptions::from_json(&json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to parse config '{}': {}", path.display(), e))
            })
        }
        None => CompilerOptions::default(),
    };
    let compiler = build_compiler(options, &cli)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid configuration: {}", e)));

    // --- 2. Loading ---
    let json = fs::read_to_string(&cli.blocks_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read workspace '{}': {}",
            cli.blocks_path.display(),
            e
        ))
    });
    let format = match cli.format {
        FormatCli::Blockly => InputFormat::Blockly,
        FormatCli::Canonical => InputFormat::Canonical,
    };
    let workspace = parse_workspace(format, &json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load workspace: {}", e)));

    // --- 3. Compilation ---
    // The program is lowered and emitted in full before anything is written.
    let compile_start = Instant::now();
    let program = compiler
        .lower(&workspace)
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    let code = compiler.emit(&program);
    let compile_duration = compile_start.elapsed();

    if cli.tree {
        eprint!("{}", program.display_tree());
    }

    if cli.verify {
        let reread = DslParser::new()
            .with_indent(compiler.indent_width())
            .parse(&code)
            .unwrap_or_else(|e| exit_with_error(&format!("Generated text does not parse: {}", e)));
        if reread != program {
            exit_with_error("Generated text does not read back as the compiled program");
        }
    }

    // --- 4. Output ---
    match &cli.output {
        Some(path) => {
            fs::write(path, &code).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", path.display(), e))
            });
            eprintln!(
                "Wrote {} action(s), {} bytes to '{}'",
                program.actions.len(),
                code.len(),
                path.display()
            );
        }
        None => print!("{}", code),
    }

    tracing::info!(
        compile = ?compile_duration,
        total = ?total_start.elapsed(),
        "lotflux-cli finished"
    );
}

fn build_compiler(mut options: CompilerOptions, cli: &Cli) -> Result<Compiler, CompileError> {
    if let Some(action_name) = &cli.action_name {
        options.default_action_name = action_name.clone();
    }
    if let Some(every) = cli.every {
        options.default_trigger = every;
    }
    if let Some(indent) = cli.indent {
        options.indent_width = indent;
    }
    Ok(CompilerBuilder::from_options(options)?.build())
}

/// `RUST_LOG` when it is set and valid, otherwise warnings only.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn bare_level_in_rust_log_is_honored() {
        assert_eq!(log_filter(Some("info")).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn unset_rust_log_shows_warnings() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn indent_override_is_validated() {
        let cli = Cli::parse_from(["lotflux-cli", "blocks.json", "--indent", "64"]);
        let err = build_compiler(CompilerOptions::default(), &cli).unwrap_err();
        assert!(matches!(err, CompileError::InvalidConfiguration(_)));

        let cli = Cli::parse_from(["lotflux-cli", "blocks.json", "--indent", "4", "--action-name", "Loop"]);
        let compiler = build_compiler(CompilerOptions::default(), &cli).unwrap();
        assert_eq!(compiler.indent_width(), 4);
    }
}
