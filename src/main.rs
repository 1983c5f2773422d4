use clap::{Parser, ValueEnum};
use log::debug;
use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::process;
use xlsxhtml::{SheetSelector, TransformKind, TransformerBuilder, XlsxToHtmlError};

#[derive(Parser)]
#[command(name = "xlsxhtml")]
#[command(about = "Turn spreadsheet rows into Bootstrap accordion documents and table fragments")]
#[command(long_about = "xlsxhtml - Spreadsheet rows to HTML

KINDS:
  social      - Title/Description rows -> one accordion item per row
  calendar    - StartDate/EndDate/Description on sheet 'Events' -> monthly accordion
  presidents  - Year/Name pairs -> 4-column table fragment
  officers    - Name/Office pairs on sheet 'Officers' -> 1-column table fragment

Output files are never overwritten: an existing name gets _1, _2, ... appended.

EXAMPLES:
  xlsxhtml calendar Calendar.xlsx                 # writes output/Calendar.html
  xlsxhtml presidents Presidents.xlsx --columns 3
  xlsxhtml social upload.tmp --name SocialList.xlsx --json

Set XLSXHTML_LOG=debug for pipeline logging.")]
#[command(version)]
struct Cli {
    /// Transformation to run
    #[arg(value_enum)]
    kind: KindArg,

    /// Input spreadsheet (.xlsx, .xls, .ods)
    input: PathBuf,

    /// Directory to write the generated file into
    #[arg(short, long, default_value = xlsxhtml::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Name used for the output file instead of the input file name
    #[arg(short, long)]
    name: Option<String>,

    /// Sheet to read instead of the default for the kind
    #[arg(short, long)]
    sheet: Option<String>,

    /// Number of column pairs (table kinds only)
    #[arg(short, long)]
    columns: Option<usize>,

    /// Accordion container id (accordion kinds only)
    #[arg(long)]
    accordion_id: Option<String>,

    /// Document title (accordion kinds only)
    #[arg(long)]
    title: Option<String>,

    /// Print the generated HTML instead of writing a file
    #[arg(long, conflicts_with = "json")]
    stdout: bool,

    /// Print a JSON report of the written file
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Social,
    Calendar,
    Presidents,
    Officers,
}

impl From<KindArg> for TransformKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Social => TransformKind::SocialAccordion,
            KindArg::Calendar => TransformKind::CalendarAccordion,
            KindArg::Presidents => TransformKind::PresidentsTable,
            KindArg::Officers => TransformKind::OfficersTable,
        }
    }
}

fn setup_logging() {
    if env::var("XLSXHTML_LOG").is_err() {
        env::set_var("XLSXHTML_LOG", "xlsxhtml=warn");
    }

    pretty_env_logger::init_custom_env("XLSXHTML_LOG");
}

fn main() {
    setup_logging();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", describe(&e));
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), XlsxToHtmlError> {
    let kind = TransformKind::from(cli.kind);

    let mut builder = TransformerBuilder::new(kind).with_output_dir(cli.output_dir);
    if let Some(sheet) = cli.sheet {
        builder = builder.with_sheet_selector(SheetSelector::Name(sheet));
    }
    if let Some(columns) = cli.columns {
        builder = builder.with_columns(columns);
    }
    if let Some(id) = cli.accordion_id {
        builder = builder.with_accordion_id(id);
    }
    if let Some(title) = cli.title {
        builder = builder.with_title(title);
    }
    let transformer = builder.build()?;
    debug!("running {} on {}", kind, cli.input.display());

    if cli.stdout {
        let html = transformer.render_to_string(File::open(&cli.input)?)?;
        print!("{}", html);
        return Ok(());
    }

    let report = transformer.transform_with_report(&cli.input, cli.name.as_deref())?;
    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| XlsxToHtmlError::Io(std::io::Error::other(e)))?;
        println!("{}", json);
    } else {
        println!(
            "✅ {} ({} records) -> {}",
            kind.label(),
            report.records,
            report.output.display()
        );
    }
    Ok(())
}

fn describe(error: &XlsxToHtmlError) -> String {
    match error {
        XlsxToHtmlError::Io(e) => format!("❌ File error: {}", e),
        XlsxToHtmlError::Parse(e) => format!("❌ Could not read spreadsheet: {}", e),
        XlsxToHtmlError::SheetNotFound { .. }
        | XlsxToHtmlError::MissingColumn { .. }
        | XlsxToHtmlError::EmptySheet(_) => format!("❌ Unexpected spreadsheet layout: {}", error),
        XlsxToHtmlError::Config(msg) => format!("❌ Invalid option: {}", msg),
        XlsxToHtmlError::SecurityViolation(msg) => format!("❌ Rejected: {}", msg),
    }
}
