use crate::config::toml_config::RequestFile;
use crate::config::AnalysisRequest;
use crate::render::OutputFormat;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "finratio")]
#[command(about = "Compute financial ratios by category")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every ratio category
    List,
    /// Show the input fields of one category
    Describe {
        /// Category key, e.g. valuation
        category: String,
    },
    /// Compute the ratios of one category
    Analyze(AnalyzeArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct AnalyzeArgs {
    /// Category key; overrides the request file
    pub category: Option<String>,

    /// Input value as key=value; repeatable, overrides the request file
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// TOML request file
    #[arg(short, long)]
    pub request: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Skip the bar chart under the table
    #[arg(long)]
    pub no_chart: bool,

    #[arg(long)]
    pub chart_width: Option<usize>,
}

impl AnalyzeArgs {
    /// Merges the request file (if any) with command-line overrides.
    pub fn resolve(&self) -> Result<AnalysisRequest> {
        let mut request = match &self.request {
            Some(path) => {
                tracing::info!("📁 Loading request from: {}", path.display());
                RequestFile::from_file(path)?.into_request()?
            }
            None => AnalysisRequest::default(),
        };

        if let Some(category) = &self.category {
            request.category = Some(category.clone());
        }
        for assignment in &self.set {
            request.inputs.parse_assignment(assignment)?;
        }
        if let Some(format) = self.format {
            request.output.format = format;
        }
        if self.no_chart {
            request.output.chart = false;
        }
        if let Some(width) = self.chart_width {
            request.output.chart_width = width;
        }

        Ok(request)
    }
}
