use clap::Parser;
use finratio::config::cli::{AnalyzeArgs, Command, LogFormat};
use finratio::core::{registry, Renderer};
use finratio::render::{table, BarChart, CsvRenderer, JsonRenderer, OutputFormat, TableRenderer};
use finratio::utils::error::RatioError;
use finratio::utils::{logger, validation::Validate};
use finratio::{CliConfig, RatioEngine};

const NOTHING_COMPUTED: &str =
    "No ratios could be computed. Please fill the required fields with valid numbers.";

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }
    tracing::debug!("CLI config: {:?}", config);

    let result = match &config.command {
        Command::List => {
            println!("{}", table::category_table(registry::categories()));
            Ok(())
        }
        Command::Describe { category } => RatioEngine::new().category(category).map(|c| {
            println!("{}", table::field_table(c));
        }),
        Command::Analyze(args) => analyze(args),
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ finratio failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        std::process::exit(e.severity().exit_code());
    }
}

fn analyze(args: &AnalyzeArgs) -> Result<(), RatioError> {
    let request = args.resolve()?;

    if let Err(e) = request.validate() {
        tracing::error!("❌ Request validation failed: {}", e);
        return Err(e);
    }

    let engine = RatioEngine::new();
    let analysis = engine.run(&request)?;

    if analysis.is_empty() {
        // 沒有可計算的比率不算錯誤
        eprintln!("⚠️ {}", NOTHING_COMPUTED);
        return Ok(());
    }
    tracing::info!(
        "✅ Computed {} ratio(s) for {}",
        analysis.ratios.len(),
        analysis.category.title
    );

    let output = match request.output.format {
        OutputFormat::Table => TableRenderer::new().render(&analysis)?,
        OutputFormat::Json => JsonRenderer::new(true).render(&analysis)?,
        OutputFormat::Csv => CsvRenderer::new().render(&analysis)?,
    };
    println!("{}", output.trim_end());

    if request.output.format == OutputFormat::Table && request.output.chart {
        println!();
        print!("{}", BarChart::new(request.output.chart_width).render(&analysis)?);
    }

    Ok(())
}
