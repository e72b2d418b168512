use crate::chart::OrgChart;
use crate::config::load_config;
use crate::ir::parse_records;
use crate::layout_dump::LayoutDump;
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "orgc", version, about = "Collapsible organization chart layout")]
pub struct Args {
    /// Employee list (JSON array) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (json/svg/png). Defaults to stdout for JSON and SVG.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Config file (JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Toggle a node before output; repeat to queue several
    #[arg(short = 't', long = "toggle")]
    pub toggles: Vec<String>,

    /// Override the depth expanded by default
    #[arg(short = 'd', long = "defaultExpandedDepth")]
    pub default_expanded_depth: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(depth) = args.default_expanded_depth {
        config.layout.default_expanded_depth = depth;
    }

    let input = read_input(args.input.as_deref())?;
    let records = parse_records(&input).context("invalid employee list")?;
    let mut chart = OrgChart::from_records(config.layout.clone(), records, ())?;

    for (id, result) in args.toggles.iter().zip(chart.toggle_all(&args.toggles)) {
        if let Err(err) = result {
            warn!(node = %id, "skipping toggle: {err}");
        }
    }

    match args.output_format {
        OutputFormat::Json => {
            let dump = LayoutDump::from_layout(chart.frame(), chart.tree());
            let json = dump.to_json()?;
            match args.output.as_deref() {
                Some(path) => std::fs::write(path, json)?,
                None => println!("{json}"),
            }
        }
        OutputFormat::Svg => {
            let svg = render_svg(chart.frame(), chart.tree(), &config.theme);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(chart.frame(), chart.tree(), &config.theme);
            write_output_png(&svg, &output, &config.render)?;
        }
    }

    Ok(())
}

fn init_tracing() {
    // Logs go to stderr so stdout stays usable for JSON/SVG output.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_toggles() {
        let args = Args::try_parse_from([
            "orgc", "-i", "org.json", "-t", "12", "--toggle", "7", "-e", "svg",
        ])
        .unwrap();
        assert_eq!(args.toggles, vec!["12", "7"]);
        assert!(matches!(args.output_format, OutputFormat::Svg));
        assert_eq!(args.default_expanded_depth, None);
    }

    #[test]
    fn png_requires_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        let path = PathBuf::from("chart.png");
        assert_eq!(ensure_output(&Some(path.clone()), "png").unwrap(), path);
    }
}
