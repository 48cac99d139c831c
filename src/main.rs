use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use redactor::config::{
    default_config_path, find_config_file, load_config, read_config_file, save_config, Config,
    LoggingConfig,
};
use redactor::export::{export, ExportFormat, Layout};
use redactor::models::{ArticleBuilder, CitationRequest, SourceKind, Variant};
use redactor::ui::{self, Status};
use redactor::utils::{
    format_request, recognize_text, Session, SessionStore, TesseractRecognizer,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Redactor - Draft scientific articles and export them to Word and LaTeX
#[derive(Parser, Debug)]
#[command(name = "redactor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Draft scientific articles, manage an APA bibliography and export to Word and LaTeX", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Session file path (overrides the configured location)
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for listings
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Abstract language variant
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum VariantArg {
    /// RESUMEN only
    Monolingual,
    /// RESUMEN and ABSTRACT
    Bilingual,
}

impl From<VariantArg> for Variant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Monolingual => Variant::Monolingual,
            VariantArg::Bilingual => Variant::Bilingual,
        }
    }
}

/// Export targets
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum FormatArg {
    /// Word document
    Docx,
    /// LaTeX source
    Tex,
    /// Both files
    Both,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Docx => ExportFormat::Docx,
            FormatArg::Tex => ExportFormat::Tex,
            FormatArg::Both => ExportFormat::Both,
        }
    }
}

/// Kind of cited work
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum KindArg {
    /// Book (publisher = publishing house, URL ignored)
    Book,
    /// Journal article
    Journal,
    /// Web site
    Website,
    /// Official report
    Report,
}

impl From<KindArg> for SourceKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Book => SourceKind::Book,
            KindArg::Journal => SourceKind::Journal,
            KindArg::Website => SourceKind::Website,
            KindArg::Report => SourceKind::Report,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage the session bibliography
    #[command(alias = "c")]
    Cite {
        #[command(subcommand)]
        command: CiteCommands,
    },

    /// Extract text from a photographed page
    Ocr {
        /// Image file (PNG, JPEG, TIFF...)
        image: PathBuf,

        /// Tesseract language code (default from config, "spa")
        #[arg(long, short)]
        lang: Option<String>,
    },

    /// Assemble the article and write the Word / LaTeX files
    #[command(alias = "e")]
    Export {
        /// Article title (also the output file name)
        #[arg(long, short)]
        title: String,

        /// Methodology label
        #[arg(long, short, default_value = "")]
        methodology: String,

        /// Spanish abstract (RESUMEN)
        #[arg(long, short, default_value = "")]
        resumen: String,

        /// English abstract (ABSTRACT, bilingual variant)
        #[arg(long, default_value = "")]
        abstract_en: String,

        /// Results / body text
        #[arg(long, short, conflicts_with = "body_file")]
        body: Option<String>,

        /// Read the results / body text from a file
        #[arg(long)]
        body_file: Option<PathBuf>,

        /// Run OCR on this image and add the text to the body
        #[arg(long)]
        ocr_image: Option<PathBuf>,

        /// Abstract variant (default from config)
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,

        /// Files to produce (default from config)
        #[arg(long, short, value_enum)]
        format: Option<FormatArg>,

        /// Directory to write into (default from config)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Inspect or end the current session
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum CiteCommands {
    /// Format a reference and add it to the bibliography
    Add {
        /// Author(s), e.g. "Saldaña, M. Y."
        #[arg(long, short)]
        author: String,

        /// Title of the work
        #[arg(long, short)]
        title: String,

        /// Publication year (default: current year)
        #[arg(long, short)]
        year: Option<String>,

        /// Kind of work
        #[arg(long, short, value_enum, default_value_t = KindArg::Book)]
        kind: KindArg,

        /// Publisher, journal or institution
        #[arg(long, short, default_value = "")]
        publisher: String,

        /// URL (ignored for books)
        #[arg(long, short, default_value = "")]
        url: String,
    },

    /// List the bibliography in sorted order
    #[command(alias = "ls")]
    List {
        /// Print one newline-separated block, ready to copy
        #[arg(long, short)]
        block: bool,
    },
}

#[derive(Subcommand, Debug)]
enum SessionCommands {
    /// Show the session contents
    Show,
    /// Discard the session (bibliography and draft)
    Reset,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the effective configuration
    Show {
        /// Print only what the config file contains, without environment overrides
        #[arg(long)]
        file: bool,
    },
    /// Write a configuration file with default values
    Init {
        /// Where to write (default: user config directory)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::print_status(Status::Error, &error_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// Error with its context chain on one line
fn error_message(e: &anyhow::Error) -> String {
    format!("{e:#}")
}

fn run(cli: Cli) -> Result<()> {

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let config = load_config(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("Failed to load config file {}", path.display()),
        None => "Failed to load configuration from environment".to_string(),
    })?;

    init_tracing(&cli, &config.logging);
    if let Some(path) = &config_path {
        tracing::debug!("Using config file: {}", path.display());
    }

    let store = match cli.session.clone().or_else(|| config.session.path.clone()) {
        Some(path) => SessionStore::with_path(path),
        None => SessionStore::new(),
    };

    match cli.command {
        Some(Commands::Cite { command }) => match command {
            CiteCommands::Add {
                author,
                title,
                year,
                kind,
                publisher,
                url,
            } => {
                let year = year.unwrap_or_else(|| chrono::Local::now().year().to_string());
                let request = CitationRequest::new(kind.into(), author, year, title)
                    .publisher(publisher)
                    .url(url);
                let citation = format_request(&request);

                let mut session = store.load()?;
                session.add_citation(citation.clone());
                store.save(&session)?;

                if !cli.quiet {
                    ui::print_status(
                        Status::Success,
                        &format!("Referencia añadida ({} en total)", session.bibliography.len()),
                    );
                }
                println!("{}", citation);
            }
            CiteCommands::List { block } => {
                let session = store.load()?;
                let bibliography = &session.bibliography;
                if bibliography.is_empty() {
                    if !cli.quiet {
                        ui::print_status(Status::Info, "La bibliografía está vacía");
                    }
                    return Ok(());
                }

                let format = if block {
                    OutputFormat::Plain
                } else {
                    resolve_output(cli.output)
                };
                let sorted = bibliography.sorted_view();
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sorted)?),
                    OutputFormat::Plain => println!("{}", bibliography.render_as_block()),
                    OutputFormat::Table | OutputFormat::Auto => {
                        ui::print_section("BIBLIOGRAFÍA");
                        println!("{}", ui::citation_table(&sorted));
                    }
                }
            }
        },

        Some(Commands::Ocr { image, lang }) => {
            let recognizer = recognizer_from(&config, lang.as_deref());
            let text = run_ocr(&recognizer, &image, cli.quiet)?;
            if text.is_empty() {
                if !cli.quiet {
                    ui::print_status(Status::Warning, "No se reconoció texto en la imagen");
                }
            } else {
                println!("{}", text);
            }
        }

        Some(Commands::Export {
            title,
            methodology,
            resumen,
            abstract_en,
            body,
            body_file,
            ocr_image,
            variant,
            format,
            output_dir,
        }) => {
            let body = match (body, body_file) {
                (Some(body), _) => body,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => String::new(),
            };

            let mut article = ArticleBuilder::new(title)
                .methodology(methodology)
                .resumen(resumen)
                .abstract_en(abstract_en)
                .body(body)
                .build();

            if let Some(image) = ocr_image {
                if config.ocr.enabled {
                    let recognizer = recognizer_from(&config, None);
                    let text = run_ocr(&recognizer, &image, cli.quiet)?;
                    article.append_recognized_text(&text);
                } else if !cli.quiet {
                    ui::print_status(
                        Status::Warning,
                        "OCR desactivado en la configuración; se omite la imagen",
                    );
                }
            }

            let variant: Variant = variant.map(Into::into).unwrap_or(config.export.variant);
            let format: ExportFormat = format.map(Into::into).unwrap_or(config.export.format);
            let output_dir = output_dir.unwrap_or_else(|| config.export.output_dir.clone());
            let layout = Layout::for_variant(variant);

            let mut session = store.load()?;
            let article = session.submit(article).clone();
            let artifacts = export(&article, &session.bibliography, &layout, format)?;

            for artifact in &artifacts {
                let path = artifact.write_to(&output_dir)?;
                if !cli.quiet {
                    ui::print_status(
                        Status::Success,
                        &format!(
                            "{} ({})",
                            path.display(),
                            ui::format_file_size(artifact.bytes.len() as u64)
                        ),
                    );
                }
            }
            store.save(&session)?;
        }

        Some(Commands::Session { command }) => match command {
            SessionCommands::Show => {
                let session = store.load()?;
                print_session(&session, store.path(), resolve_output(cli.output))?;
            }
            SessionCommands::Reset => {
                store.reset()?;
                if !cli.quiet {
                    ui::print_status(Status::Success, "Sesión descartada");
                }
            }
        },

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show { file } => {
                let shown = if file {
                    let Some(path) = &config_path else {
                        bail!("No config file found; run `redactor config init` first");
                    };
                    read_config_file(path)?
                } else {
                    config
                };
                print!("{}", toml::to_string_pretty(&shown)?);
            }
            ConfigCommands::Init { path, force } => {
                let Some(path) = path.or_else(default_config_path) else {
                    bail!("No config directory available; pass a path explicitly");
                };
                if path.exists() && !force {
                    bail!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    );
                }
                save_config(&Config::default(), &path)?;
                if !cli.quiet {
                    ui::print_status(
                        Status::Success,
                        &format!("Configuración escrita en {}", path.display()),
                    );
                }
            }
        },

        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "redactor",
                &mut std::io::stdout(),
            );
        }

        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Initialize tracing based on verbosity, config and RUST_LOG
fn init_tracing(cli: &Cli, logging: &LoggingConfig) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("redactor={}", level)),
    );
    let registry = tracing_subscriber::registry().with(env_filter);

    if logging.format.as_deref() == Some("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn resolve_output(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if ui::is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn recognizer_from(config: &Config, lang: Option<&str>) -> TesseractRecognizer {
    let language = lang.unwrap_or(&config.ocr.language);
    TesseractRecognizer::new(config.ocr.binary.as_str(), language)
        .with_max_image_bytes(config.ocr.max_image_size_mb.saturating_mul(1024 * 1024))
}

/// Run OCR on an image file. Failure aborts the current command only.
fn run_ocr(recognizer: &TesseractRecognizer, image: &Path, quiet: bool) -> Result<String> {
    let bytes =
        std::fs::read(image).with_context(|| format!("Failed to read {}", image.display()))?;

    if !recognizer.is_available() {
        bail!(
            "OCR not available: install tesseract-ocr or set [ocr] binary in the configuration"
        );
    }

    let spinner = ui::Spinner::new("Reconociendo texto...", quiet);
    let result = recognize_text(recognizer, &bytes);
    spinner.finish();

    result.with_context(|| format!("OCR failed for {}", image.display()))
}

fn print_session(session: &Session, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(session)?),
        _ => {
            println!("Archivo:      {}", path.display());
            println!("Referencias:  {}", session.bibliography.len());
            println!(
                "Borrador:     {}",
                session
                    .draft
                    .as_ref()
                    .map(|a| a.title.as_str())
                    .unwrap_or("(ninguno)")
            );
            println!("Enviado:      {}", if session.submitted { "sí" } else { "no" });
        }
    }
    Ok(())
}
