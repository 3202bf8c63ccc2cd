use badge_sheet::{
    load_records, sample_records, BadgeSheetBuilder, Image, Info, PdfSurface, SheetConfig,
};
use clap::Parser;
use std::path::PathBuf;

/// Filler badges printed when no records file is given
const DEFAULT_SAMPLE: usize = 250;

#[derive(Parser)]
#[command(name = "badge-sheet", version)]
#[command(about = "Lay out conference badges on printable, cut-marked PDF sheets")]
struct Cli {
    /// TOML sheet configuration (built-in A4 layout if omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON array of badge records
    #[arg(long, conflicts_with = "sample")]
    records: Option<PathBuf>,

    /// Print this many lorem ipsum filler badges instead of real records
    #[arg(long)]
    sample: Option<usize>,

    /// Organisation printed on filler badges
    #[arg(long, default_value = "RDW-ICT")]
    sample_organisation: String,

    /// PDF to write
    #[arg(long, short, default_value = "badges.pdf")]
    output: PathBuf,

    /// Document title
    #[arg(long)]
    title: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SheetConfig::load(path)?,
        None => SheetConfig::default(),
    };
    let geometry = config.geometry()?;

    let records = match &cli.records {
        Some(path) => load_records(path)?,
        None => sample_records(cli.sample.unwrap_or(DEFAULT_SAMPLE), &cli.sample_organisation),
    };

    let fonts = config.load_fonts()?;
    let mut surface = PdfSurface::create(&cli.output, geometry.page_size(), fonts)?;
    let banner_image = match config.banner_image_path() {
        Some(path) => Some(surface.add_image(Image::from_file(path)?)),
        None => None,
    };

    let mut info = Info::new();
    info.batch(records.len(), geometry.page_count(records.len()));
    if let Some(title) = &cli.title {
        info.title(title);
    }
    surface.set_info(info);

    let mut builder = BadgeSheetBuilder::new(surface, geometry, config.options(banner_image))?;
    builder.add_all(&records)?;
    let pages = builder.page_count();
    let path = builder.finish()?;

    println!(
        "{} badges on {} sheets written to {}",
        records.len(),
        pages,
        path.display()
    );
    Ok(())
}
