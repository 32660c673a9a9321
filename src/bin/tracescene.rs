use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tracescene::{
    DecodeOptions, FormatHint, FsSource, LoadOptions, LoadReport, SceneLoader, Source,
    XmlTextMode,
};

#[derive(Parser, Debug)]
#[command(name = "tracescene", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode scene files and summarize them.
    Inspect(InspectArgs),
    /// Print a document's normalized generic tree as JSON.
    Tree(TreeArgs),
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Input dialect: json, xml or auto (extension, then content sniffing).
    #[arg(long, default_value = "auto")]
    format: FormatHint,

    /// Top-level key holding the scene body.
    #[arg(long, default_value = tracescene::DEFAULT_ROOT_KEY)]
    root: String,

    /// Accept nan/inf in numeric fields.
    #[arg(long, default_value_t = false)]
    allow_non_finite: bool,

    /// Collapse XML elements carrying attributes and text to bare text.
    #[arg(long, default_value_t = false)]
    lossy_xml_text: bool,

    /// Reject input files larger than this many bytes (0 disables the cap).
    #[arg(long, default_value_t = tracescene::DEFAULT_MAX_BYTES)]
    max_bytes: u64,
}

impl CommonArgs {
    fn loader(&self, threads: Option<usize>) -> SceneLoader {
        let source = FsSource {
            max_bytes: (self.max_bytes > 0).then_some(self.max_bytes),
            ..FsSource::default()
        };
        let options = LoadOptions {
            decode: DecodeOptions {
                root_key: self.root.clone(),
                allow_non_finite: self.allow_non_finite,
                xml_text: if self.lossy_xml_text {
                    XmlTextMode::LossyText
                } else {
                    XmlTextMode::PreserveAttributes
                },
            },
            format: self.format,
            threads,
        };
        SceneLoader::with_source(source, options)
    }
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Scene files (JSON or XML).
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,

    /// Print each assembled scene as JSON instead of a summary.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Print non-fatal notices (defaults applied, data ignored).
    #[arg(long, default_value_t = false)]
    diagnostics: bool,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct TreeArgs {
    /// Input scene file.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Tree(args) => cmd_tree(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "tracescene=debug",
        _ => "tracescene=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let loader = args.common.loader(args.threads);
    let reports = loader.load_all(&args.files)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0usize;
    for report in &reports {
        if report_one(&mut out, report, args.json, args.diagnostics)? {
            failed += 1;
        }
    }
    out.flush().context("flush stdout")?;

    if failed > 0 {
        anyhow::bail!("{failed} of {} scene(s) failed to load", reports.len());
    }
    Ok(())
}

/// Writes one report; returns whether the document failed.
fn report_one(
    out: &mut impl std::io::Write,
    report: &LoadReport,
    json: bool,
    diagnostics: bool,
) -> anyhow::Result<bool> {
    let name = report.path.display();
    let failed = match &report.result {
        Ok(scene) if json => {
            serde_json::to_writer_pretty(&mut *out, scene)
                .with_context(|| format!("serialize scene '{name}'"))?;
            writeln!(out)?;
            false
        }
        Ok(scene) => {
            writeln!(out, "{name}")?;
            writeln!(out, "  cameras:   {}", scene.cameras.len())?;
            writeln!(out, "  lights:    {}", scene.lights.point_lights.len())?;
            writeln!(out, "  materials: {}", scene.materials.len())?;
            writeln!(out, "  vertices:  {}", scene.vertex_data.len())?;
            for (tag, n) in scene.object_counts() {
                writeln!(out, "  {tag}: {n}")?;
            }
            false
        }
        Err(e) => {
            eprintln!("{name}: {e}");
            true
        }
    };

    if diagnostics {
        for issue in report.diagnostics.issues() {
            eprintln!("{name}: {issue}");
        }
    }
    Ok(failed)
}

fn cmd_tree(args: TreeArgs) -> anyhow::Result<()> {
    let loader = args.common.loader(None);
    let tree = loader
        .load_tree(Source::Path(&args.in_path))
        .with_context(|| format!("read scene tree '{}'", args.in_path.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &tree).context("serialize tree")?;
    writeln!(out)?;
    Ok(())
}
