use crate::domain::model::{Category, CategoryKey, FieldDef};

const VALUATION_FIELDS: &[FieldDef] = &[
    FieldDef::number("marketPrice", "Market Price per Share"),
    FieldDef::number("eps", "Earnings per Share (EPS)"),
    FieldDef::number("forecastEps", "Forecast EPS"),
    FieldDef::number("bookValuePerShare", "Book Value per Share"),
    FieldDef::number("marketCap", "Market Capitalization"),
    FieldDef::number("revenue", "Revenue"),
    FieldDef::number("operatingCashFlow", "Operating Cash Flow"),
    FieldDef::number("enterpriseValue", "Enterprise Value (EV)"),
    FieldDef::number("ebitda", "EBITDA"),
    FieldDef::stepped(
        "earningsGrowthRate",
        "Earnings Growth Rate (as decimal, e.g. 0.2)",
        0.01,
    ),
    FieldDef::number("annualDividendPerShare", "Annual Dividend per Share"),
    FieldDef::number("sharePrice", "Share Price (for Dividend Yield)"),
];

const PROFITABILITY_FIELDS: &[FieldDef] = &[
    FieldDef::number("revenue", "Revenue"),
    FieldDef::number("cogs", "Cost of Goods Sold (COGS)"),
    FieldDef::number("operatingIncome", "Operating Income"),
    FieldDef::number("netIncome", "Net Income"),
    FieldDef::number("shareholdersEquity", "Shareholders' Equity"),
    FieldDef::number("totalAssets", "Total Assets"),
    FieldDef::number("nopat", "NOPAT (Net Operating Profit After Taxes)"),
    FieldDef::number("investedCapital", "Invested Capital"),
    FieldDef::number("ebit", "EBIT"),
    FieldDef::number("capitalEmployed", "Capital Employed"),
];

const LIQUIDITY_FIELDS: &[FieldDef] = &[
    FieldDef::number("currentAssets", "Current Assets"),
    FieldDef::number("currentLiabilities", "Current Liabilities"),
    FieldDef::number("inventory", "Inventory"),
    FieldDef::number("cashAndEquivalents", "Cash & Cash Equivalents"),
    FieldDef::number("operatingCashFlow", "Operating Cash Flow"),
];

const LEVERAGE_FIELDS: &[FieldDef] = &[
    FieldDef::number("totalDebt", "Total Debt"),
    FieldDef::number("shareholdersEquity", "Shareholders' Equity"),
    FieldDef::number("totalAssets", "Total Assets"),
    FieldDef::number("ebit", "EBIT"),
    FieldDef::number("interestExpense", "Interest Expense"),
    FieldDef::number("operatingIncome", "Operating Income"),
    FieldDef::number("totalDebtService", "Total Debt Service"),
    FieldDef::number("cash", "Cash"),
    FieldDef::number("ebitda", "EBITDA (optional for Net Debt/EBITDA)"),
];

const EFFICIENCY_FIELDS: &[FieldDef] = &[
    FieldDef::number("revenue", "Revenue"),
    FieldDef::number("totalAssets", "Total Assets"),
    FieldDef::number("avgInventory", "Average Inventory"),
    FieldDef::number("cogs", "Cost of Goods Sold (COGS)"),
    FieldDef::number("avgAccountsReceivable", "Average Accounts Receivable"),
    FieldDef::number("accountsReceivable", "Accounts Receivable (current)"),
    FieldDef::number("inventory", "Inventory (current)"),
    FieldDef::number("daysPayablesOutstanding", "Days Payables Outstanding (DPO)"),
];

const MARKET_FIELDS: &[FieldDef] = &[
    FieldDef::number("covariance", "Covariance (Stock, Market)"),
    FieldDef::number("varianceMarket", "Variance (Market)"),
    FieldDef::number("actualReturn", "Actual Return (decimal e.g. 0.12)"),
    FieldDef::number("expectedReturn", "Expected Return (CAPM)"),
    FieldDef::number("returnVal", "Return (decimal)"),
    FieldDef::number("riskFreeRate", "Risk-Free Rate (decimal)"),
    FieldDef::number("stdDev", "Standard Deviation"),
    FieldDef::number("downsideDeviation", "Downside Deviation"),
    FieldDef::number("beta", "Beta (optional)"),
    FieldDef::number("peakValue", "Peak Value"),
    FieldDef::number("troughValue", "Trough Value"),
];

const CASHFLOW_FIELDS: &[FieldDef] = &[
    FieldDef::number("operatingCashFlow", "Operating Cash Flow"),
    FieldDef::number("capitalExpenditures", "Capital Expenditures"),
    FieldDef::number("marketCap", "Market Capitalization"),
    FieldDef::number("dividends", "Dividends"),
    FieldDef::number("netIncome", "Net Income"),
    FieldDef::number("totalDebt", "Total Debt"),
];

const INTRINSIC_FIELDS: &[FieldDef] = &[
    FieldDef::list("cfSeries", "Cash Flows (comma-separated, CF₁,CF₂,...)"),
    FieldDef::stepped("discountRate", "Discount Rate r (decimal)", 0.001),
    FieldDef::number("nopat", "NOPAT"),
    FieldDef::number("wacc", "WACC (decimal)"),
    FieldDef::number("investedCapital", "Invested Capital"),
    FieldDef::number("E", "E (Equity)"),
    FieldDef::number("V", "V (Total Value)"),
    FieldDef::number("Re", "Cost of Equity (Re)"),
    FieldDef::number("D", "Debt (D)"),
    FieldDef::number("Rd", "Cost of Debt (Rd)"),
    FieldDef::stepped("taxRate", "Tax Rate (decimal)", 0.01),
];

static CATEGORIES: [Category; 8] = [
    Category {
        key: CategoryKey::Valuation,
        title: "Valuation Ratios",
        description: "P/E, Forward P/E, P/B, EV/EBITDA, PEG, Dividend Yield, Earnings Yield",
        fields: VALUATION_FIELDS,
    },
    Category {
        key: CategoryKey::Profitability,
        title: "Profitability Ratios",
        description: "Gross Margin, Operating Margin, Net Profit Margin, ROE, ROA, ROIC, ROCE",
        fields: PROFITABILITY_FIELDS,
    },
    Category {
        key: CategoryKey::Liquidity,
        title: "Liquidity Ratios",
        description: "Current Ratio, Quick Ratio, Cash Ratio, Operating Cash Flow Ratio",
        fields: LIQUIDITY_FIELDS,
    },
    Category {
        key: CategoryKey::Leverage,
        title: "Leverage & Solvency",
        description: "Debt-to-Equity, Debt-to-Assets, Equity Ratio, Interest Coverage, DSCR, Net Debt to EBITDA",
        fields: LEVERAGE_FIELDS,
    },
    Category {
        key: CategoryKey::Efficiency,
        title: "Efficiency / Activity Ratios",
        description: "Asset Turnover, Inventory Turnover, Receivables Turnover, DSO, DIO, CCC",
        fields: EFFICIENCY_FIELDS,
    },
    Category {
        key: CategoryKey::Market,
        title: "Market Performance & Risk",
        description: "Beta, Alpha, Sharpe, Sortino, Treynor, Max Drawdown",
        fields: MARKET_FIELDS,
    },
    Category {
        key: CategoryKey::Cashflow,
        title: "Cash Flow & Dividend Sustainability",
        description: "Free Cash Flow, FCF Yield, Dividend Payout, Dividend Coverage, Cash Flow to Debt",
        fields: CASHFLOW_FIELDS,
    },
    Category {
        key: CategoryKey::Intrinsic,
        title: "Intrinsic Value Metrics",
        description: "DCF, EVA, WACC",
        fields: INTRINSIC_FIELDS,
    },
];

/// Every category, in display order.
pub fn categories() -> &'static [Category] {
    &CATEGORIES
}

pub fn get(key: CategoryKey) -> &'static Category {
    // CATEGORIES 與 CategoryKey::ALL 同序
    &CATEGORIES[key as usize]
}

pub fn find(key: &str) -> Option<&'static Category> {
    key.parse::<CategoryKey>().ok().map(get)
}
