use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::{generate, Shell};
use console::style;
use dialoguer::{theme::ColorfulTheme, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use morph_genetics::{
    estimate_het, FileParser, GeneCalculator, GeneDefinition, GeneRegistry, InheritanceType,
    ReportFormat, ReportGenerator,
};

/// Offspring morph calculator for reptile breeding crosses
#[derive(Parser, Debug)]
#[command(
    name = "morph-genetics",
    version,
    about = "Single-gene Punnett crosses for reptile morph breeding",
    long_about = r#"
Calculates offspring genotype and phenotype percentages for a pairing:
- Recessive, codominant and dominant genes
- Normal / het / visual / super breakdown per cross
- Cross matrices over every legal pairing
- Probable-het estimates for possible-het parents

Gene tables can be extended or replaced from TOML, JSON, CSV or TSV files.
"#
)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Gene id (see the `genes` subcommand)
    #[arg(short, long, value_name = "GENE")]
    gene: Option<String>,

    /// Sire state: normal, het, visual or super depending on the gene
    #[arg(short, long, value_name = "STATE")]
    sire: Option<String>,

    /// Dam state: normal, het, visual or super depending on the gene
    #[arg(short, long, value_name = "STATE")]
    dam: Option<String>,

    /// Interactive mode with prompts for gene and parent states
    #[arg(short, long)]
    interactive: bool,

    /// Gene table file (.toml, .json, .csv, .tsv)
    #[arg(
        short,
        long,
        value_name = "FILE",
        value_hint = ValueHint::FilePath,
        env = "MORPH_GENETICS_REGISTRY",
        global = true
    )]
    registry: Option<PathBuf>,

    /// Use only the genes from --registry instead of merging them over the builtin set
    #[arg(long, requires = "registry", global = true)]
    replace_builtin: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// Write reports into this directory instead of stdout
    #[arg(short, long, value_name = "DIR", value_hint = ValueHint::DirPath, global = true)]
    output: Option<PathBuf>,

    /// Number of threads (0 = auto-detect)
    #[arg(short, long, default_value = "0", global = true)]
    threads: usize,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Generate shell completions
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions
    Completions { shell: Shell },
    /// List available genes
    Genes {
        /// Only genes with this mode of inheritance
        #[arg(long = "type", value_enum)]
        inheritance: Option<InheritanceType>,
    },
    /// Estimate the probable-het percentage of offspring
    Het {
        /// Sire probable-het percentage
        sire: Option<f64>,
        /// Dam probable-het percentage
        dam: Option<f64>,
    },
    /// Cross every legal pairing of one gene, or of all genes
    Matrix {
        /// Gene id (all genes when omitted)
        gene: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
    Tsv,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> ReportFormat {
        match format {
            OutputFormat::Table => ReportFormat::Table,
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Csv => ReportFormat::Csv,
            OutputFormat::Tsv => ReportFormat::Tsv,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completions
    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return Ok(());
    }

    if let Some(Commands::Completions { shell }) = cli.command {
        generate_completions(shell);
        return Ok(());
    }

    // Initialize logging
    init_logging(cli.verbose);

    let registry = load_registry(cli.registry.as_deref(), cli.replace_builtin)?;
    let generator = ReportGenerator::new(cli.output.as_deref());
    let format = ReportFormat::from(cli.format);

    match &cli.command {
        Some(Commands::Genes { inheritance }) => {
            let genes: Vec<&GeneDefinition> = match inheritance {
                Some(inheritance) => registry.by_type(*inheritance).collect(),
                None => registry.iter().collect(),
            };
            report_written(generator.generate_registry(&genes, format)?);
        }
        Some(Commands::Het { sire, dam }) => {
            let estimate = estimate_het(*sire, *dam);
            report_written(generator.generate_het(*sire, *dam, estimate, format)?);
        }
        Some(Commands::Matrix { gene }) => {
            init_thread_pool(cli.threads)?;
            run_matrix(&registry, gene.as_deref(), &generator, format)?;
        }
        Some(Commands::Completions { shell }) => generate_completions(*shell),
        None => {
            let config = if cli.interactive {
                run_interactive_mode(&registry)?
            } else {
                AppConfig::from_cli(&cli)?
            };
            run_cross(&registry, &config, &generator, format)?;
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("morph_genetics={}", level))
        .with_writer(io::stderr)
        .init();
}

fn init_thread_pool(threads: usize) -> Result<()> {
    let num_threads = if threads == 0 {
        num_cpus::get()
    } else {
        threads
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .map_err(|e| anyhow::anyhow!("Failed to initialize thread pool: {}", e))?;

    Ok(())
}

fn load_registry(path: Option<&Path>, replace_builtin: bool) -> Result<GeneRegistry> {
    let Some(path) = path else {
        return Ok(GeneRegistry::builtin());
    };

    let loaded = FileParser::new().load_registry(path)?;
    let registry = if replace_builtin {
        loaded
    } else {
        GeneRegistry::builtin().merge(loaded)
    };

    info!("Registry holds {} genes", registry.len());
    Ok(registry)
}

fn run_cross(
    registry: &GeneRegistry,
    config: &AppConfig,
    generator: &ReportGenerator,
    format: ReportFormat,
) -> Result<()> {
    debug!("Crossing {:?}", config);

    let calculator = GeneCalculator::new(registry);
    let report = calculator
        .calculate(&config.gene, &config.sire, &config.dam)
        .with_context(|| {
            format!(
                "Cannot cross {} x {} for gene '{}'",
                config.sire, config.dam, config.gene
            )
        })?;

    report_written(generator.generate_report(&report, format)?);
    Ok(())
}

fn run_matrix(
    registry: &GeneRegistry,
    gene: Option<&str>,
    generator: &ReportGenerator,
    format: ReportFormat,
) -> Result<()> {
    let calculator = GeneCalculator::new(registry);

    let matrices = match gene {
        Some(gene_id) => vec![calculator.cross_matrix(gene_id)?],
        None => {
            info!("Using {} threads", rayon::current_num_threads());

            let pb = ProgressBar::new(registry.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                    .progress_chars("#>-"),
            );
            pb.set_message("Crossing genes...");

            let matrices = calculator.cross_matrix_all_with(|_| pb.inc(1))?;
            pb.finish_and_clear();
            matrices
        }
    };

    report_written(generator.generate_matrices(&matrices, registry, format)?);
    Ok(())
}

fn report_written(path: Option<PathBuf>) {
    if let Some(path) = path {
        println!(
            "{} Report saved to: {}",
            style("✓").green().bold(),
            style(path.display()).cyan()
        );
    }
}

fn run_interactive_mode(registry: &GeneRegistry) -> Result<AppConfig> {
    println!(
        "{}",
        style("╔══════════════════════════════════════════════════════════════╗").cyan()
    );
    println!(
        "{}",
        style("║          Morph Genetics Calculator - Interactive Mode        ║")
            .cyan()
            .bold()
    );
    println!(
        "{}",
        style("╚══════════════════════════════════════════════════════════════╝").cyan()
    );
    println!();

    if registry.is_empty() {
        bail!("No genes available");
    }

    let theme = ColorfulTheme::default();

    // Gene selection
    let genes: Vec<&GeneDefinition> = registry.iter().collect();
    let gene_labels: Vec<String> = genes
        .iter()
        .map(|gene| format!("{} ({})", gene.name, gene.inheritance))
        .collect();

    let gene_idx = Select::with_theme(&theme)
        .with_prompt("Select gene")
        .default(0)
        .items(&gene_labels)
        .interact()?;
    let gene = genes[gene_idx];

    // Parent states, limited to the ones legal for this gene
    let states = gene.inheritance.valid_states();
    let state_labels: Vec<&str> = states.iter().map(|state| state.as_str()).collect();

    let sire_idx = Select::with_theme(&theme)
        .with_prompt("Sire state")
        .default(0)
        .items(&state_labels)
        .interact()?;

    let dam_idx = Select::with_theme(&theme)
        .with_prompt("Dam state")
        .default(0)
        .items(&state_labels)
        .interact()?;

    Ok(AppConfig {
        gene: gene.id.clone(),
        sire: state_labels[sire_idx].to_string(),
        dam: state_labels[dam_idx].to_string(),
    })
}

#[derive(Debug)]
struct AppConfig {
    gene: String,
    sire: String,
    dam: String,
}

impl AppConfig {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let (Some(gene), Some(sire), Some(dam)) = (&cli.gene, &cli.sire, &cli.dam) else {
            bail!("--gene, --sire and --dam are required (or use --interactive)");
        };

        Ok(Self {
            gene: gene.clone(),
            sire: sire.clone(),
            dam: dam.clone(),
        })
    }
}
