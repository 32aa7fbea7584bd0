use abi_gen::{describe_interface_with_options, EventPolicy, InterfaceOptions};
use abi_loader::{declared_name, AbiInterfaceResolver, FileResolver, SourceResolver};
use abi_types::Abi;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "abi")]
#[command(about = "Solidity interface generation from contract ABI JSON")]
#[command(version)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Solidity interface files from ABI JSON files
    Codegen {
        /// Input ABI files (`Name.json` or `Name.abi.json`)
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Output directory for generated interfaces
        #[arg(
            short = 'o',
            long = "output",
            value_name = "DIR",
            default_value = "generated"
        )]
        output_dir: PathBuf,

        /// Declare events inside the generated interfaces
        #[arg(long = "events")]
        events: bool,
    },

    /// Resolve a single import the way a compiler import callback would
    ///
    /// Prints the body handed back to the compiler: the generated interface
    /// when the file is a JSON ABI, otherwise the raw file content. Prints
    /// nothing when the import is not a `.json` file or cannot be read.
    Resolve {
        /// Import path as written in the importing source
        import_path: String,

        /// Path of the importing source, passed through to the delegate
        #[arg(long = "imported-from", default_value = "")]
        imported_from: String,

        /// Declare events inside the generated interface
        #[arg(long = "events")]
        events: bool,
    },
}

fn event_policy(events: bool) -> EventPolicy {
    if events {
        EventPolicy::Declare
    } else {
        EventPolicy::Omit
    }
}

fn init_tracing(verbose: bool) {
    /* RUST_LOG takes precedence over the verbose flag */
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Codegen {
            files,
            output_dir,
            events,
        } => {
            run_codegen(&files, &output_dir, event_policy(events))?;
        }

        Commands::Resolve {
            import_path,
            imported_from,
            events,
        } => {
            if let Some(body) = run_resolve(&import_path, &imported_from, event_policy(events)) {
                println!("{}", body);
            }
        }
    }

    Ok(())
}

/* Generate `<output_dir>/<Name>.sol` for each input; returns the written paths */
fn run_codegen(
    files: &[PathBuf],
    output_dir: &Path,
    event_policy: EventPolicy,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            output_dir.display()
        )
    })?;

    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let body = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let name = declared_name(&file.to_string_lossy());

        let abi = Abi::from_json(&body)
            .with_context(|| format!("{} is not a contract ABI", file.display()))?;
        let options = InterfaceOptions::new(&name).with_event_policy(event_policy);
        let source = describe_interface_with_options(options, &abi)
            .with_context(|| format!("Failed to generate interface for {}", file.display()))?;

        let output_path = output_dir.join(format!("{}.sol", name));
        std::fs::write(&output_path, source)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;

        info!(
            "[✓] Generated interface {} -> {}",
            name,
            output_path.display()
        );
        written.push(output_path);
    }

    Ok(written)
}

fn run_resolve(import_path: &str, imported_from: &str, event_policy: EventPolicy) -> Option<String> {
    let resolver = AbiInterfaceResolver::new(FileResolver::new()).with_event_policy(event_policy);

    match resolver.resolve(import_path, imported_from) {
        Some(resolved) => {
            info!("[✓] Resolved {} -> {}", import_path, resolved.file_path);
            Some(resolved.body)
        }
        None => {
            info!("[~] Import {} not handled", import_path);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ABI: &str = r#"[
        {"type":"function","name":"get","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
        {"type":"event","name":"Ping","inputs":[],"anonymous":false}
    ]"#;

    #[test]
    fn test_cli_parses_codegen() {
        let cli = Cli::try_parse_from(["abi", "codegen", "-f", "A.json", "-f", "B.abi.json", "--events"])
            .unwrap();
        let Commands::Codegen {
            files,
            output_dir,
            events,
        } = cli.command
        else {
            panic!("expected codegen command");
        };
        assert_eq!(files, vec![PathBuf::from("A.json"), PathBuf::from("B.abi.json")]);
        assert_eq!(output_dir, PathBuf::from("generated"));
        assert!(events);
    }

    #[test]
    fn test_cli_parses_resolve() {
        let cli = Cli::try_parse_from(["abi", "-v", "resolve", "Token.json"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Resolve { ref import_path, ref imported_from, events: false }
                if import_path == "Token.json" && imported_from.is_empty()
        ));
    }

    #[test]
    fn test_run_codegen_writes_interfaces() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("Counter.abi.json");
        std::fs::write(&input, ABI).unwrap();
        let output_dir = temp_dir.path().join("out");

        let written = run_codegen(&[input], &output_dir, EventPolicy::Declare).unwrap();

        assert_eq!(written, vec![output_dir.join("Counter.sol")]);
        let source = std::fs::read_to_string(&written[0]).unwrap();
        assert!(source.contains("interface Counter {"));
        assert!(source.contains("event Ping()"));
    }

    #[test]
    fn test_run_codegen_rejects_non_abi() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("Broken.json");
        std::fs::write(&input, "{}").unwrap();

        let result = run_codegen(&[input], temp_dir.path(), EventPolicy::Omit);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_resolve() {
        let temp_dir = TempDir::new().unwrap();
        let abi_path = temp_dir.path().join("Counter.json");
        std::fs::write(&abi_path, ABI).unwrap();
        let raw_path = temp_dir.path().join("notes.json");
        std::fs::write(&raw_path, "not an abi").unwrap();

        let body = run_resolve(abi_path.to_str().unwrap(), "", EventPolicy::Omit).unwrap();
        assert!(body.contains("interface Counter {"));
        assert!(!body.contains("Ping"));

        let raw = run_resolve(raw_path.to_str().unwrap(), "", EventPolicy::Omit).unwrap();
        assert_eq!(raw, "not an abi");

        assert_eq!(run_resolve("Counter.sol", "", EventPolicy::Omit), None);
    }
}
