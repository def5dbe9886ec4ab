use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use pixelscope_core::pipeline::analysis_logger::StdoutAnalysisLogger;
use pixelscope_core::pipeline::analyze_video_use_case::VideoAnalyzer;
use pixelscope_core::pipeline::video_frame_series::VideoFrameSeries;
use pixelscope_core::shared::constants::{
    is_image, CHANNEL_NAMES, DEFAULT_IMAGE_NAME, DEFAULT_WINDOW_RADIUS,
};
use pixelscope_core::shared::region::Region;
use pixelscope_core::statistics::frame_stats::FrameStats;
use pixelscope_core::statistics::histogram::Histogram;
use pixelscope_core::statistics::window_stats::{luma, pixel_at, window_stats};
use pixelscope_core::video::domain::video_reader::VideoReader;
use pixelscope_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use pixelscope_core::video::infrastructure::image_file_reader::{load_image, ImageFileReader};

/// Pixel and window statistics for images, per-frame statistics for videos.
#[derive(Parser)]
#[command(name = "pixelscope")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the pixel under a point and statistics of the window around it.
    Inspect {
        /// Image file (defaults to image.jpg in the working directory).
        image: Option<PathBuf>,

        /// Column of the probed pixel (defaults to the image centre).
        #[arg(long)]
        x: Option<u32>,

        /// Row of the probed pixel (defaults to the image centre).
        #[arg(long)]
        y: Option<u32>,

        /// Half-size of the statistics window in pixels.
        #[arg(long, default_value_t = DEFAULT_WINDOW_RADIUS)]
        radius: u32,

        /// Also print the non-empty histogram bins of the window.
        #[arg(long)]
        histogram: bool,
    },
    /// Print mean, standard deviation and contrast of every frame.
    Video {
        /// Video file (a still image is treated as a one-frame video).
        input: PathBuf,

        /// Emit comma-separated values instead of an aligned table.
        #[arg(long)]
        csv: bool,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    match Cli::parse().command {
        Command::Inspect {
            image,
            x,
            y,
            radius,
            histogram,
        } => {
            let path = image.unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_NAME));
            run_inspect(&path, x, y, radius, histogram)
        }
        Command::Video { input, csv } => run_video(&input, csv),
    }
}

fn run_inspect(
    path: &Path,
    x: Option<u32>,
    y: Option<u32>,
    radius: u32,
    show_histogram: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame = load_image(path)?;
    let x = x.unwrap_or(frame.width() / 2);
    let y = y.unwrap_or(frame.height() / 2);

    let pixel = pixel_at(&frame, x, y)?;
    let window = Region::around(x, y, radius, frame.width(), frame.height());
    let stats = window_stats(&frame, &window)?;

    println!("image     {} ({}x{})", path.display(), frame.width(), frame.height());
    println!("cursor    ({x}, {y})");
    println!("pixel     R={} G={} B={}", pixel[0], pixel[1], pixel[2]);
    println!("intensity {}", luma(pixel));
    println!(
        "window    ({}, {}, {}, {}) {} px",
        window.left(),
        window.upper(),
        window.right(),
        window.bottom(),
        stats.pixel_count
    );
    println!("mean      {}", format_triple(&stats.mean));
    println!("variance  {}", format_triple(&stats.variance));

    if show_histogram {
        let hist = Histogram::compute(&frame, &window)?;
        for (c, name) in CHANNEL_NAMES.iter().enumerate() {
            let bins: Vec<String> = hist
                .channel(c)
                .iter()
                .enumerate()
                .filter(|(_, count)| **count > 0)
                .map(|(value, count)| format!("{value}:{count}"))
                .collect();
            println!("hist {name}    {}", bins.join(" "));
        }
    }
    Ok(())
}

fn run_video(input: &Path, csv: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }
    let reader: Box<dyn VideoReader> = if is_image(input) {
        Box::new(ImageFileReader::new())
    } else {
        Box::new(FfmpegReader::new())
    };

    let mut logger = StdoutAnalysisLogger::default();
    let analyzer = VideoAnalyzer::open(reader, input, &mut logger)?;
    let series = analyzer.series();

    if csv {
        println!("frame,mean_r,mean_g,mean_b,std_r,std_g,std_b,contrast");
    } else {
        println!(
            "{:>6}  {:>24}  {:>24}  {:>8}",
            "frame", "mean (R G B)", "std dev (R G B)", "contrast"
        );
    }
    for i in 0..series.len() {
        if let Some(stats) = series.frame(i) {
            let line = if csv {
                format_csv_row(i, &stats)
            } else {
                format_table_row(i, &stats)
            };
            println!("{line}");
        }
    }

    if !csv {
        print_distances(series);
    }
    Ok(())
}

fn print_distances(series: &VideoFrameSeries) {
    match series.channel_distances() {
        Ok(d) => println!(
            "L1 distance of normalized std dev from contrast: R={:.3} G={:.3} B={:.3}",
            d[0], d[1], d[2]
        ),
        Err(e) => log::warn!("Normalized comparison unavailable: {e}"),
    }
}

fn format_triple(v: &[f64; 3]) -> String {
    format!("{:8.2} {:8.2} {:8.2}", v[0], v[1], v[2])
}

fn format_table_row(index: usize, stats: &FrameStats) -> String {
    format!(
        "{index:>6}  {}  {}  {:8.2}",
        format_triple(&stats.mean),
        format_triple(&stats.std_dev),
        stats.contrast
    )
}

fn format_csv_row(index: usize, stats: &FrameStats) -> String {
    let values: Vec<String> = stats
        .mean
        .iter()
        .chain(stats.std_dev.iter())
        .chain(std::iter::once(&stats.contrast))
        .map(|v| format!("{v:.4}"))
        .collect();
    format!("{index},{}", values.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn sample() -> FrameStats {
        FrameStats {
            mean: [1.0, 2.5, 3.0],
            std_dev: [0.0, 0.5, 10.0],
            contrast: 4.25,
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_inspect_defaults() {
        let cli = Cli::try_parse_from(["pixelscope", "inspect"]).unwrap();
        match cli.command {
            Command::Inspect {
                image, x, radius, ..
            } => {
                assert!(image.is_none());
                assert!(x.is_none());
                assert_eq!(radius, DEFAULT_WINDOW_RADIUS);
            }
            Command::Video { .. } => panic!("expected inspect"),
        }
    }

    #[test]
    fn test_video_requires_input() {
        assert!(Cli::try_parse_from(["pixelscope", "video"]).is_err());
    }

    #[test]
    fn test_csv_row() {
        assert_eq!(
            format_csv_row(7, &sample()),
            "7,1.0000,2.5000,3.0000,0.0000,0.5000,10.0000,4.2500"
        );
    }

    #[test]
    fn test_table_row_starts_with_index() {
        let row = format_table_row(12, &sample());
        assert!(row.trim_start().starts_with("12"));
        assert!(row.ends_with("4.25"));
    }
}
