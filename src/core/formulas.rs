//! Ratio formulas, one pure function per category.
//!
//! Every formula is guarded on its own: a ratio is produced only when all of
//! its operands are present, every divisor is non-zero and the result is
//! finite. Anything else is skipped without an error.

use crate::domain::model::{CategoryKey, ComputedRatios};
use crate::utils::validation::{is_valid, parse_number_list};
use std::collections::HashMap;

pub mod names {
    pub const PE: &str = "P/E";
    pub const FORWARD_PE: &str = "Forward P/E";
    pub const PB: &str = "P/B";
    pub const PS: &str = "P/S (MarketCap/Revenue)";
    pub const PCF: &str = "P/CF (MarketCap/OperatingCF)";
    pub const EV_EBITDA: &str = "EV/EBITDA";
    pub const PEG: &str = "PEG (P/E ÷ Growth)";
    pub const DIVIDEND_YIELD: &str = "Dividend Yield";
    pub const EARNINGS_YIELD: &str = "Earnings Yield";

    pub const GROSS_MARGIN: &str = "Gross Margin";
    pub const OPERATING_MARGIN: &str = "Operating Margin";
    pub const NET_MARGIN: &str = "Net Profit Margin";
    pub const ROE: &str = "ROE (Return on Equity)";
    pub const ROA: &str = "ROA (Return on Assets)";
    pub const ROIC: &str = "ROIC";
    pub const ROCE: &str = "ROCE";

    pub const CURRENT_RATIO: &str = "Current Ratio";
    pub const QUICK_RATIO: &str = "Quick Ratio";
    pub const CASH_RATIO: &str = "Cash Ratio";
    pub const OCF_RATIO: &str = "Operating Cash Flow Ratio";

    pub const DEBT_TO_EQUITY: &str = "Debt-to-Equity";
    pub const DEBT_TO_ASSETS: &str = "Debt-to-Assets";
    pub const EQUITY_RATIO: &str = "Equity Ratio";
    pub const INTEREST_COVERAGE: &str = "Interest Coverage (EBIT/Interest)";
    pub const DSCR: &str = "Debt Service Coverage Ratio";
    pub const NET_DEBT_EBITDA: &str = "Net Debt / EBITDA";

    pub const ASSET_TURNOVER: &str = "Asset Turnover";
    pub const INVENTORY_TURNOVER: &str = "Inventory Turnover";
    pub const RECEIVABLES_TURNOVER: &str = "Receivables Turnover";
    pub const DSO: &str = "DSO (Days Sales Outstanding)";
    pub const DIO: &str = "DIO (Days Inventory Outstanding)";
    pub const CCC: &str = "Cash Conversion Cycle (CCC)";

    pub const BETA: &str = "Beta (β)";
    pub const ALPHA: &str = "Alpha (α)";
    pub const SHARPE: &str = "Sharpe Ratio";
    pub const SORTINO: &str = "Sortino Ratio";
    pub const TREYNOR: &str = "Treynor Ratio";
    pub const MAX_DRAWDOWN: &str = "Maximum Drawdown";

    pub const FCF: &str = "Free Cash Flow (FCF)";
    pub const FCF_YIELD: &str = "FCF Yield";
    pub const DIVIDEND_PAYOUT: &str = "Dividend Payout Ratio";
    pub const DIVIDEND_COVERAGE: &str = "Dividend Coverage Ratio";
    pub const CASH_FLOW_TO_DEBT: &str = "Cash Flow to Debt Ratio";

    pub const DCF: &str = "DCF (present value)";
    pub const EVA: &str = "EVA";
    pub const WACC_CALCULATED: &str = "WACC (calculated)";
    pub const WACC_INPUT: &str = "WACC (input)";
}

use names::*;

const DAYS_PER_YEAR: f64 = 365.0;

/// Inputs after coercion: numbers that passed the validity predicate and
/// raw text for list fields.
#[derive(Debug, Clone, Default)]
pub struct FormulaInputs {
    numbers: HashMap<&'static str, f64>,
    lists: HashMap<&'static str, String>,
}

impl FormulaInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_number(&mut self, key: &'static str, value: f64) {
        if is_valid(Some(value)) {
            self.numbers.insert(key, value);
        }
    }

    pub fn set_list(&mut self, key: &'static str, raw: String) {
        self.lists.insert(key, raw);
    }

    pub fn num(&self, key: &str) -> Option<f64> {
        self.numbers.get(key).copied()
    }

    pub fn list(&self, key: &str) -> Option<&str> {
        self.lists
            .get(key)
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

fn div(numerator: Option<f64>, divisor: Option<f64>) -> Option<f64> {
    let (n, d) = (numerator?, divisor?);
    if d == 0.0 {
        return None;
    }
    Some(n / d)
}

fn sub(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? - b?)
}

fn put(res: &mut ComputedRatios, name: &str, value: Option<f64>) {
    if let Some(v) = value.filter(|v| v.is_finite()) {
        res.insert(name, v);
    }
}

pub fn compute(key: CategoryKey, inputs: &FormulaInputs) -> ComputedRatios {
    match key {
        CategoryKey::Valuation => valuation(inputs),
        CategoryKey::Profitability => profitability(inputs),
        CategoryKey::Liquidity => liquidity(inputs),
        CategoryKey::Leverage => leverage(inputs),
        CategoryKey::Efficiency => efficiency(inputs),
        CategoryKey::Market => market(inputs),
        CategoryKey::Cashflow => cashflow(inputs),
        CategoryKey::Intrinsic => intrinsic(inputs),
    }
}

fn valuation(v: &FormulaInputs) -> ComputedRatios {
    let mut res = ComputedRatios::new();
    let mp = v.num("marketPrice");
    let eps = v.num("eps");
    let mcap = v.num("marketCap");

    put(&mut res, PE, div(mp, eps));
    put(&mut res, FORWARD_PE, div(mp, v.num("forecastEps")));
    put(&mut res, PB, div(mp, v.num("bookValuePerShare")));
    put(&mut res, PS, div(mcap, v.num("revenue")));
    put(&mut res, PCF, div(mcap, v.num("operatingCashFlow")));
    put(&mut res, EV_EBITDA, div(v.num("enterpriseValue"), v.num("ebitda")));
    put(&mut res, PEG, div(div(mp, eps), v.num("earningsGrowthRate")));
    put(
        &mut res,
        DIVIDEND_YIELD,
        div(v.num("annualDividendPerShare"), v.num("sharePrice")),
    );
    put(&mut res, EARNINGS_YIELD, div(eps, mp));
    res
}

fn profitability(v: &FormulaInputs) -> ComputedRatios {
    let mut res = ComputedRatios::new();
    let rev = v.num("revenue");
    let net = v.num("netIncome");

    put(&mut res, GROSS_MARGIN, div(sub(rev, v.num("cogs")), rev));
    put(&mut res, OPERATING_MARGIN, div(v.num("operatingIncome"), rev));
    put(&mut res, NET_MARGIN, div(net, rev));
    put(&mut res, ROE, div(net, v.num("shareholdersEquity")));
    put(&mut res, ROA, div(net, v.num("totalAssets")));
    put(&mut res, ROIC, div(v.num("nopat"), v.num("investedCapital")));
    put(&mut res, ROCE, div(v.num("ebit"), v.num("capitalEmployed")));
    res
}

fn liquidity(v: &FormulaInputs) -> ComputedRatios {
    let mut res = ComputedRatios::new();
    let ca = v.num("currentAssets");
    let cl = v.num("currentLiabilities");

    put(&mut res, CURRENT_RATIO, div(ca, cl));
    put(&mut res, QUICK_RATIO, div(sub(ca, v.num("inventory")), cl));
    put(&mut res, CASH_RATIO, div(v.num("cashAndEquivalents"), cl));
    put(&mut res, OCF_RATIO, div(v.num("operatingCashFlow"), cl));
    res
}

fn leverage(v: &FormulaInputs) -> ComputedRatios {
    let mut res = ComputedRatios::new();
    let debt = v.num("totalDebt");
    let equity = v.num("shareholdersEquity");
    let assets = v.num("totalAssets");

    put(&mut res, DEBT_TO_EQUITY, div(debt, equity));
    put(&mut res, DEBT_TO_ASSETS, div(debt, assets));
    put(&mut res, EQUITY_RATIO, div(equity, assets));
    put(
        &mut res,
        INTEREST_COVERAGE,
        div(v.num("ebit"), v.num("interestExpense")),
    );
    put(
        &mut res,
        DSCR,
        div(v.num("operatingIncome"), v.num("totalDebtService")),
    );
    put(
        &mut res,
        NET_DEBT_EBITDA,
        div(sub(debt, v.num("cash")), v.num("ebitda")),
    );
    res
}

fn efficiency(v: &FormulaInputs) -> ComputedRatios {
    let mut res = ComputedRatios::new();
    let rev = v.num("revenue");
    let cogs = v.num("cogs");

    put(&mut res, ASSET_TURNOVER, div(rev, v.num("totalAssets")));
    put(&mut res, INVENTORY_TURNOVER, div(cogs, v.num("avgInventory")));
    put(
        &mut res,
        RECEIVABLES_TURNOVER,
        div(rev, v.num("avgAccountsReceivable")),
    );
    put(
        &mut res,
        DSO,
        div(v.num("accountsReceivable"), rev).map(|x| x * DAYS_PER_YEAR),
    );
    put(
        &mut res,
        DIO,
        div(v.num("inventory"), cogs).map(|x| x * DAYS_PER_YEAR),
    );

    // 只用已經算出的 DSO/DIO
    let ccc = match (res.get(DSO), res.get(DIO), v.num("daysPayablesOutstanding")) {
        (Some(dso), Some(dio), Some(dpo)) => Some(dso + dio - dpo),
        _ => None,
    };
    put(&mut res, CCC, ccc);
    res
}

fn market(v: &FormulaInputs) -> ComputedRatios {
    let mut res = ComputedRatios::new();
    let excess = sub(v.num("returnVal"), v.num("riskFreeRate"));

    put(&mut res, BETA, div(v.num("covariance"), v.num("varianceMarket")));
    put(
        &mut res,
        ALPHA,
        sub(v.num("actualReturn"), v.num("expectedReturn")),
    );
    put(&mut res, SHARPE, div(excess, v.num("stdDev")));
    put(&mut res, SORTINO, div(excess, v.num("downsideDeviation")));

    let beta = res.get(BETA).or_else(|| v.num("beta"));
    put(&mut res, TREYNOR, div(excess, beta));

    let peak = v.num("peakValue");
    put(&mut res, MAX_DRAWDOWN, div(sub(peak, v.num("troughValue")), peak));
    res
}

fn cashflow(v: &FormulaInputs) -> ComputedRatios {
    let mut res = ComputedRatios::new();
    let ocf = v.num("operatingCashFlow");
    let dividends = v.num("dividends");
    let net = v.num("netIncome");

    put(&mut res, FCF, sub(ocf, v.num("capitalExpenditures")));
    let fcf = res.get(FCF);
    put(&mut res, FCF_YIELD, div(fcf, v.num("marketCap")));
    put(&mut res, DIVIDEND_PAYOUT, div(dividends, net));
    put(&mut res, DIVIDEND_COVERAGE, div(net, dividends));
    put(&mut res, CASH_FLOW_TO_DEBT, div(ocf, v.num("totalDebt")));
    res
}

/// Present value of `flows` discounted at `rate`, the first flow at t = 1.
/// An empty series is worth 0.
pub fn discounted_cash_flow(flows: &[f64], rate: f64) -> Option<f64> {
    if flows.is_empty() {
        return Some(0.0);
    }
    let base = 1.0 + rate;
    if base == 0.0 {
        return None;
    }
    let pv: f64 = flows
        .iter()
        .zip(1..)
        .map(|(cf, t)| cf / base.powi(t))
        .sum();
    Some(pv)
}

fn weighted_cost_of_capital(v: &FormulaInputs) -> Option<f64> {
    let value = v.num("V")?;
    if value == 0.0 {
        return None;
    }
    let (equity, re) = (v.num("E")?, v.num("Re")?);
    let (debt, rd) = (v.num("D")?, v.num("Rd")?);
    let tax = v.num("taxRate")?;
    Some(equity / value * re + debt / value * rd * (1.0 - tax))
}

fn intrinsic(v: &FormulaInputs) -> ComputedRatios {
    let mut res = ComputedRatios::new();

    let dcf = match (v.list("cfSeries"), v.num("discountRate")) {
        (Some(series), Some(rate)) => discounted_cash_flow(&parse_number_list(series), rate),
        _ => None,
    };
    put(&mut res, DCF, dcf);

    let wacc = v.num("wacc");
    let eva = match (v.num("nopat"), wacc, v.num("investedCapital")) {
        (Some(nopat), Some(w), Some(capital)) => Some(nopat - w * capital),
        _ => None,
    };
    put(&mut res, EVA, eva);

    // 計算值優先，算不出來才顯示輸入值
    match weighted_cost_of_capital(v).filter(|w| w.is_finite()) {
        Some(calculated) => put(&mut res, WACC_CALCULATED, Some(calculated)),
        None => put(&mut res, WACC_INPUT, wacc),
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pairs: &[(&'static str, f64)]) -> FormulaInputs {
        let mut v = FormulaInputs::new();
        for &(key, value) in pairs {
            v.set_number(key, value);
        }
        v
    }

    #[test]
    fn test_div_guards_zero_and_missing() {
        assert_eq!(div(Some(10.0), Some(2.0)), Some(5.0));
        assert_eq!(div(Some(10.0), Some(0.0)), None);
        assert_eq!(div(None, Some(2.0)), None);
        assert_eq!(div(Some(1.0), None), None);
    }

    #[test]
    fn test_valuation_price_and_eps_only() {
        let res = valuation(&inputs(&[("marketPrice", 50.0), ("eps", 5.0)]));
        assert_eq!(res.labels(), vec![PE, EARNINGS_YIELD]);
        assert_eq!(res.get(PE), Some(10.0));
        assert_eq!(res.get(EARNINGS_YIELD), Some(0.1));
    }

    #[test]
    fn test_peg_needs_non_zero_growth() {
        let base = [("marketPrice", 50.0), ("eps", 5.0)];
        let mut with_growth = base.to_vec();
        with_growth.push(("earningsGrowthRate", 0.2));
        assert!((valuation(&inputs(&with_growth)).get(PEG).unwrap() - 50.0).abs() < 1e-9);

        let mut zero_growth = base.to_vec();
        zero_growth.push(("earningsGrowthRate", 0.0));
        let res = valuation(&inputs(&zero_growth));
        assert!(!res.contains(PEG));
        assert!(res.contains(PE));
    }

    #[test]
    fn test_zero_eps_drops_only_dependent_ratios() {
        let res = valuation(&inputs(&[
            ("marketPrice", 50.0),
            ("eps", 0.0),
            ("bookValuePerShare", 25.0),
        ]));
        assert!(!res.contains(PE));
        assert_eq!(res.get(EARNINGS_YIELD), Some(0.0));
        assert_eq!(res.get(PB), Some(2.0));
    }

    #[test]
    fn test_ccc_requires_dso_dio_and_dpo() {
        let full = [
            ("revenue", 1000.0),
            ("cogs", 600.0),
            ("accountsReceivable", 100.0),
            ("inventory", 60.0),
            ("daysPayablesOutstanding", 30.0),
        ];
        let res = efficiency(&inputs(&full));
        let dso = 100.0 / 1000.0 * 365.0;
        let dio = 60.0 / 600.0 * 365.0;
        assert!((res.get(CCC).unwrap() - (dso + dio - 30.0)).abs() < 1e-9);

        let no_dpo = &full[..4];
        assert!(!efficiency(&inputs(no_dpo)).contains(CCC));

        let no_dio = [
            ("revenue", 1000.0),
            ("cogs", 0.0),
            ("accountsReceivable", 100.0),
            ("inventory", 60.0),
            ("daysPayablesOutstanding", 30.0),
        ];
        let res = efficiency(&inputs(&no_dio));
        assert!(res.contains(DSO));
        assert!(!res.contains(DIO));
        assert!(!res.contains(CCC));
    }

    #[test]
    fn test_treynor_prefers_computed_beta() {
        let res = market(&inputs(&[
            ("covariance", 0.02),
            ("varianceMarket", 0.01),
            ("returnVal", 0.12),
            ("riskFreeRate", 0.02),
            ("beta", 5.0),
        ]));
        assert!((res.get(BETA).unwrap() - 2.0).abs() < 1e-12);
        assert!((res.get(TREYNOR).unwrap() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_treynor_falls_back_to_user_beta() {
        let res = market(&inputs(&[
            ("covariance", 0.02),
            ("varianceMarket", 0.0),
            ("returnVal", 0.12),
            ("riskFreeRate", 0.02),
            ("beta", 0.5),
        ]));
        assert!(!res.contains(BETA));
        assert!((res.get(TREYNOR).unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_fcf_yield_requires_fcf() {
        let res = cashflow(&inputs(&[("operatingCashFlow", 500.0), ("marketCap", 1000.0)]));
        assert!(!res.contains(FCF));
        assert!(!res.contains(FCF_YIELD));

        let res = cashflow(&inputs(&[
            ("operatingCashFlow", 500.0),
            ("capitalExpenditures", 200.0),
            ("marketCap", 1000.0),
        ]));
        assert_eq!(res.get(FCF), Some(300.0));
        assert_eq!(res.get(FCF_YIELD), Some(0.3));
    }

    #[test]
    fn test_discounted_cash_flow() {
        let pv = discounted_cash_flow(&[100.0, 200.0, 300.0], 0.1).unwrap();
        let expected = 100.0 / 1.1 + 200.0 / 1.1_f64.powi(2) + 300.0 / 1.1_f64.powi(3);
        assert!((pv - expected).abs() < 1e-9);
        assert_eq!(discounted_cash_flow(&[], 0.1), Some(0.0));
        assert_eq!(discounted_cash_flow(&[100.0], -1.0), None);
    }

    #[test]
    fn test_wacc_calculated_hides_input() {
        let res = intrinsic(&inputs(&[
            ("E", 600.0),
            ("V", 1000.0),
            ("Re", 0.1),
            ("D", 400.0),
            ("Rd", 0.05),
            ("taxRate", 0.25),
            ("wacc", 0.09),
        ]));
        let expected = 0.6 * 0.1 + 0.4 * 0.05 * 0.75;
        assert!((res.get(WACC_CALCULATED).unwrap() - expected).abs() < 1e-12);
        assert!(!res.contains(WACC_INPUT));
    }

    #[test]
    fn test_wacc_input_when_calculation_incomplete() {
        let res = intrinsic(&inputs(&[("E", 600.0), ("V", 1000.0), ("wacc", 0.09)]));
        assert!(!res.contains(WACC_CALCULATED));
        assert_eq!(res.get(WACC_INPUT), Some(0.09));
    }

    #[test]
    fn test_eva() {
        let res = intrinsic(&inputs(&[
            ("nopat", 150.0),
            ("wacc", 0.1),
            ("investedCapital", 1000.0),
        ]));
        assert_eq!(res.get(EVA), Some(50.0));
        assert_eq!(res.labels(), vec![EVA, WACC_INPUT]);
    }

    #[test]
    fn test_blank_series_skips_dcf() {
        let mut v = inputs(&[("discountRate", 0.1)]);
        v.set_list("cfSeries", "   ".to_string());
        assert!(!intrinsic(&v).contains(DCF));
    }

    #[test]
    fn test_all_invalid_series_discounts_to_zero() {
        let mut v = inputs(&[("discountRate", 0.1)]);
        v.set_list("cfSeries", "bad, worse".to_string());
        assert_eq!(intrinsic(&v).get(DCF), Some(0.0));

        let mut no_rate = inputs(&[]);
        no_rate.set_list("cfSeries", "bad, worse".to_string());
        assert!(!intrinsic(&no_rate).contains(DCF));
    }
}
