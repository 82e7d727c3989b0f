use anyhow::Result;
use finratio::core::formulas::names;
use finratio::core::{registry, Renderer};
use finratio::render::{BarChart, ChartData, CsvRenderer, JsonRenderer, OutputFormat, TableRenderer};
use finratio::utils::validation::Validate;
use finratio::{Analysis, ComputedRatios, RatioEngine, RatioError, RequestFile};
use tempfile::TempDir;

/// 測試從 TOML 請求檔到表格輸出的完整流程
#[test]
fn test_request_file_to_table() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("liquidity.toml");
    std::fs::write(
        &path,
        r#"
category = "liquidity"

[inputs]
currentAssets = 800
currentLiabilities = 400
inventory = "200"
cashAndEquivalents = 150

[output]
format = "table"
chart_width = 20
"#,
    )?;

    let request = RequestFile::from_file(&path)?.into_request()?;
    request.validate()?;
    assert_eq!(request.output.chart_width, 20);

    let analysis = RatioEngine::new().run(&request)?;
    assert_eq!(
        analysis.ratios.labels(),
        vec![names::CURRENT_RATIO, names::QUICK_RATIO, names::CASH_RATIO]
    );

    let table = TableRenderer::new().render(&analysis)?;
    assert!(table.contains("Liquidity Ratios"));
    assert!(table.contains("Quick Ratio"));
    assert!(table.contains("0.3750"));

    let chart = BarChart::new(request.output.chart_width).render(&analysis)?;
    assert!(chart.lines().nth(1).unwrap().starts_with(names::CURRENT_RATIO));
    Ok(())
}

#[test]
fn test_request_file_json_and_csv() -> Result<()> {
    let file = RequestFile::from_toml_str(
        r#"
category = "cashflow"

[inputs]
operatingCashFlow = 400
capitalExpenditures = 150
marketCap = 5000

[output]
format = "csv"
"#,
    )?;
    assert_eq!(file.output_settings()?.format, OutputFormat::Csv);

    let request = file.into_request()?;
    assert_eq!(request.output.format, OutputFormat::Csv);
    let analysis = RatioEngine::new().run(&request)?;
    let csv = CsvRenderer::new().render(&analysis)?;
    assert_eq!(csv, "ratio,value\nFree Cash Flow (FCF),250\nFCF Yield,0.05\n");

    let json: serde_json::Value = serde_json::from_str(&JsonRenderer::new(true).render(&analysis)?)?;
    assert_eq!(json["category"], "cashflow");
    assert_eq!(json["ratios"][1]["name"], names::FCF_YIELD);
    Ok(())
}

#[test]
fn test_unknown_input_key_fails_validation() -> Result<()> {
    let file = RequestFile::from_toml_str("category = \"market\"\n[inputs]\nmarketPrice = 1\n")?;
    assert!(matches!(
        file.validate(),
        Err(RatioError::InvalidConfigValueError { .. })
    ));
    Ok(())
}

#[test]
fn test_missing_request_file() {
    let err = RequestFile::from_file("/nonexistent/finratio.toml").unwrap_err();
    assert!(matches!(err, RatioError::IoError(_)));
}

#[test]
fn test_chart_treats_non_finite_as_zero() {
    let mut ratios = ComputedRatios::new();
    ratios.insert("A", f64::INFINITY);
    ratios.insert("B", 2.0);
    let analysis = Analysis {
        category: registry::get(finratio::CategoryKey::Market),
        ratios,
    };

    let data = ChartData::from_analysis(&analysis);
    assert_eq!(data.labels, vec!["A", "B"]);
    assert_eq!(data.values, vec![0.0, 2.0]);
}
