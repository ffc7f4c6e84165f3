mod logger;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::Level;
use logger::CliLogger;
use pdf_nup::layout::{Rect, output_page_pixels, output_page_points};
use pdf_nup::{
    LopdfSource, Navigator, NupError, Orientation, PageSize, PageSource, PdfSheetSurface,
    PrintProgress, PrintRoute, Rotation, ViewState,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pdfnup", about = "N-up PDF viewer and printer", version)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the computed sheet layout as JSON
    Plan {
        /// Input PDF file
        input: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show how the document splits into sheets
    Stats {
        /// Input PDF file
        input: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Render the on-screen sheet at a page to PNG
    View {
        /// Input PDF file
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Zero-based sheet (adaptive) or page (single) to show
        #[arg(long, default_value = "0")]
        position: usize,

        /// Fit the sheet into a WIDTHxHEIGHT window
        #[arg(long, value_parser = parse_window)]
        fit: Option<(f32, f32)>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Print all sheets to a PDF file
    Print {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Printer resolution in dots per inch
        #[arg(long, default_value = "300")]
        dpi: f32,

        /// Draw cells directly on the sheets instead of through a device buffer
        #[arg(long)]
        preview: bool,

        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Args)]
struct ViewArgs {
    /// JSON view configuration to start from
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective view configuration to this JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Output page size (A0-A6, Letter, Legal, Tabloid)
    #[arg(long)]
    size: Option<String>,

    /// Output orientation (defaults to the first page's shape)
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Pages per sheet (1, 2, 3, 4, 6, 9 or 16)
    #[arg(long)]
    pages_per_sheet: Option<usize>,

    /// Content zoom in percent
    #[arg(long)]
    zoom: Option<f32>,

    /// Clockwise rotation in degrees (0, 90, 180, 270)
    #[arg(long, value_parser = parse_rotation)]
    rotate: Option<Rotation>,

    /// One page per view, with a margin
    #[arg(long)]
    single: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

fn parse_rotation(s: &str) -> std::result::Result<Rotation, String> {
    let degrees: i32 = s.parse().map_err(|_| format!("not a number: {}", s))?;
    Rotation::from_degrees(degrees).ok_or_else(|| "rotation must be 0, 90, 180 or 270".to_string())
}

fn parse_window(s: &str) -> std::result::Result<(f32, f32), String> {
    let (width, height) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {}", s))?;
    let width = width.parse().map_err(|_| format!("bad width: {}", width))?;
    let height = height.parse().map_err(|_| format!("bad height: {}", height))?;
    Ok((width, height))
}

impl ViewArgs {
    /// Build the view: config file (or the document defaults), then explicit flags
    async fn resolve(&self, first_page_size: Option<(f32, f32)>) -> Result<ViewState> {
        let mut view = match &self.config {
            Some(path) => ViewState::load(path)
                .await
                .with_context(|| format!("loading {}", path.display()))?,
            None => {
                let mut view = ViewState::default();
                view.reset_for_document(first_page_size);
                view
            }
        };

        if let Some(size) = &self.size {
            view.page_size = PageSize::from_name(size);
            if !view.page_size.name().eq_ignore_ascii_case(size) {
                log::warn!("Unknown page size {}, using {}", size, view.page_size.name());
            }
        }
        if let Some(orientation) = self.orientation {
            view.orientation = orientation.into();
        }
        if let Some(pages_per_sheet) = self.pages_per_sheet {
            if !pdf_nup::layout::is_supported_pages_per_sheet(pages_per_sheet) {
                log::warn!(
                    "{} pages per sheet has no grid; laying out one page per sheet",
                    pages_per_sheet
                );
            }
            view.pages_per_sheet = pages_per_sheet;
        }
        if let Some(zoom) = self.zoom {
            view.set_zoom_percent(zoom)?;
        }
        if let Some(rotation) = self.rotate {
            view.rotation = rotation;
        }
        if self.single {
            view.adaptive_mode = false;
        }
        view.validate()?;

        if let Some(path) = &self.save_config {
            view.save(path).await?;
            log::info!("Saved view configuration to {}", path.display());
        }
        Ok(view)
    }
}

async fn load_geometry(input: &Path) -> Result<LopdfSource> {
    let doc = pdf_nup::load_pdf(input)
        .await
        .with_context(|| format!("loading {}", input.display()))?;
    Ok(LopdfSource::new(&doc)?)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let logger = CliLogger::new(200, CliLogger::level_for_verbosity(cli.verbose));
    logger.clone().init()?;

    match cli.command {
        Commands::Plan { input, view } => {
            let source = load_geometry(&input).await?;
            let view = view.resolve(source.page_size(0)).await?;

            let (width, height) =
                output_page_pixels(view.page_size, view.orientation, source.page_size(0));
            let target = Rect::from_size(width as f32, height as f32);
            let plans = pdf_nup::plan_document(&source, &view, &target);
            println!("{}", serde_json::to_string_pretty(&plans)?);
        }

        Commands::Stats { input, view } => {
            let source = load_geometry(&input).await?;
            let view = view.resolve(source.page_size(0)).await?;

            let stats = pdf_nup::calculate_statistics(source.page_count(), &view)?;
            println!("Layout Statistics:");
            println!("  Source pages: {}", stats.source_pages);
            println!(
                "  Grid: {}x{} ({} pages per sheet)",
                stats.rows, stats.cols, stats.pages_per_sheet
            );
            println!("  Output sheets: {}", stats.output_sheets);
            println!("  Filled cells: {}", stats.filled_cells);
            println!("  Blank cells: {}", stats.blank_cells);
            let navigator = Navigator::new(source.page_count(), &view);
            println!("  Screen positions: {}", navigator.total_positions());
        }

        Commands::View {
            input,
            output,
            position,
            fit,
            view,
        } => {
            #[cfg(feature = "pdfium")]
            let pdfium = pdf_nup::source::init_pdfium()?;
            #[cfg(feature = "pdfium")]
            let source = pdf_nup::source::PdfiumSource::open(&pdfium, &input)?;
            #[cfg(not(feature = "pdfium"))]
            let source = {
                log::warn!("Built without pdfium; pages render blank");
                load_geometry(&input).await?
            };

            let mut view = view.resolve(source.page_size(0)).await?;
            let mut navigator = Navigator::new(source.page_count(), &view);
            navigator.seek(position);
            let page = navigator.current_page();

            if let Some(window) = fit {
                let natural = pdf_nup::natural_display_size(&source, &view, page);
                view.display_scale_factor = pdf_nup::fit_to_window_scale(natural, window);
            }

            let Some(sheet) = pdf_nup::render_screen(&source, &view, page)? else {
                bail!("{} has no pages", input.display());
            };
            sheet
                .save(&output)
                .with_context(|| format!("writing {}", output.display()))?;
            let (current, total) = navigator.label();
            println!("Sheet {} of {} → {}", current, total, output.display());
        }

        Commands::Print {
            input,
            output,
            dpi,
            preview,
            view,
        } => {
            #[cfg(feature = "pdfium")]
            let pdfium = pdf_nup::source::init_pdfium()?;
            #[cfg(feature = "pdfium")]
            let source = pdf_nup::source::PdfiumSource::open(&pdfium, &input)?;
            #[cfg(not(feature = "pdfium"))]
            let source = {
                log::warn!("Built without pdfium; pages render blank");
                load_geometry(&input).await?
            };

            let view = view.resolve(source.page_size(0)).await?;
            let (width_pt, height_pt) =
                output_page_points(view.page_size, view.orientation, source.page_size(0));
            let mut surface = PdfSheetSurface::new(width_pt, height_pt, dpi)?;

            let route = if preview {
                PrintRoute::Preview
            } else {
                PrintRoute::Device
            };
            let mut pump = |progress: PrintProgress| {
                eprint!("\rPrinting sheet {}/{}", progress.sheet, progress.total_sheets);
            };
            let warnings_before = logger.total(Level::Warn);
            let result = pdf_nup::print_document(&mut surface, &source, &view, route, &mut pump);
            eprintln!();

            // An aborted job was already logged; anything else failed before printing began
            let aborted = match result {
                Ok(_) => false,
                Err(NupError::PrintAborted { .. }) => true,
                Err(e) => return Err(e.into()),
            };

            let warnings = logger.total(Level::Warn) - warnings_before;
            if warnings > 0 {
                if let Some(last) = logger.latest_message(Level::Warn) {
                    println!("{} warnings during print; last: {}", warnings, last);
                }
            }

            let doc = surface.finish()?;
            let sheets_written = doc.get_pages().len();
            pdf_nup::save_pdf(doc, &output)
                .await
                .with_context(|| format!("writing {}", output.display()))?;

            if aborted {
                println!("Kept {} sheets → {}", sheets_written, output.display());
                return Ok(ExitCode::FAILURE);
            }
            println!("Printed {} sheets → {}", sheets_written, output.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}
