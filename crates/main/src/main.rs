use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use flowdoc::output::CollisionPolicy;
use flowdoc::summary::{self, SummaryOptions};

/// Generates the Unity Game Builder project summary PDF.
///
/// With no arguments the report is written to
/// `Unity_Game_Builder_Project_Summary_<YYYYMMDD>.pdf` in the current directory, replacing a
/// report generated earlier the same day. Fonts are looked up in `FLOWDOC_FONTS_DIR`, in
/// `assets/fonts` and in the usual system font directories.
#[derive(Parser)]
#[command(author, version, about = "Render the project summary report")]
struct Cli {
    /// Write the report to this path instead of the dated default file name.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Fail instead of overwriting an existing report.
    #[arg(long)]
    no_clobber: bool,

    /// Print a page number at the bottom of every page.
    #[arg(long)]
    page_numbers: bool,

    /// Directory containing LiberationSans-{Regular,Bold,Italic,BoldItalic}.ttf.
    #[arg(long, value_name = "DIR")]
    fonts_dir: Option<PathBuf>,

    /// Embed a PDF outline of the report sections.
    #[cfg(feature = "bookmarks")]
    #[arg(long)]
    outline: bool,
}

impl Cli {
    fn options(self) -> SummaryOptions {
        SummaryOptions {
            output: self.output,
            collision: if self.no_clobber {
                CollisionPolicy::Fail
            } else {
                CollisionPolicy::Overwrite
            },
            page_numbers: self.page_numbers,
            fonts_dir: self.fonts_dir,
            #[cfg(feature = "bookmarks")]
            outline: self.outline,
            ..SummaryOptions::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let options = Cli::parse().options();

    match summary::generate_project_summary(&options) {
        Ok(artifact) => {
            println!("PDF generated successfully: {}", artifact.path().display());
            log::info!(
                "{} pages, {} bytes",
                artifact.page_count(),
                artifact.byte_len()
            );
        }
        Err(err) => {
            eprintln!("Error generating PDF: {}", err);
            if let Some(guidance) = err.guidance() {
                eprintln!("{}", guidance);
            }
            print_error_sources(&err);
            std::process::exit(1);
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
