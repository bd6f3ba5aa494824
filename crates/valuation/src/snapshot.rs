//! Loading one company's data through a [`MarketDataClient`].
//!
//! [`load_snapshot`] is the single place where client failures are absorbed.
//! A failed load yields the all-zero [`FinancialsSnapshot`] and the default
//! [`MarketQuote`] so that every formula downstream still evaluates. The
//! failure is logged once and carried on the result for the caller to
//! report.

use tracing::{debug, instrument, warn};

use valuation_core::{
    CompanyProfile, FinancialsSnapshot, MarketDataClient, MarketQuote, Symbol,
    ValuationAssumptions,
};
use valuation_models::{
    AssetBasedInputs, CapmInputs, ComparablesInputs, DcfInputs, DdmInputs, EvEbitdaInputs,
    TerminalValueMethod,
};

/// Data loaded for one company, ready to seed valuation inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedSnapshot {
    /// Requested symbol.
    pub symbol: Symbol,
    /// Company profile, or the ticker-only fallback.
    pub profile: CompanyProfile,
    /// Latest quote, or the default quote after a failure.
    pub quote: MarketQuote,
    /// Normalised financials, or all zeros after a failure.
    pub financials: FinancialsSnapshot,
    /// Description of the retrieval failure, if any.
    pub failure: Option<String>,
}

impl LoadedSnapshot {
    /// The degraded snapshot used when retrieval fails.
    #[must_use]
    pub fn degraded(symbol: Symbol, failure: impl Into<String>) -> Self {
        Self {
            profile: CompanyProfile::fallback(&symbol),
            symbol,
            quote: MarketQuote::default(),
            financials: FinancialsSnapshot::zeroed(),
            failure: Some(failure.into()),
        }
    }

    /// Whether retrieval failed and the data is the zero fallback.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.failure.is_some()
    }

    /// Market capitalization from the quote.
    #[must_use]
    pub fn market_cap(&self) -> f64 {
        self.quote.market_cap()
    }

    /// Comparable-multiples inputs using this company's fundamentals.
    #[must_use]
    pub fn comparables_inputs(&self, ev_to_revenue: f64, ev_to_ebitda: f64) -> ComparablesInputs {
        ComparablesInputs {
            revenue: self.financials.revenue(),
            ebitda: self.financials.ebitda(),
            ev_to_revenue,
            ev_to_ebitda,
            net_debt: self.financials.net_debt(),
            shares_outstanding: self.quote.shares_outstanding,
        }
    }

    /// DCF inputs seeded with the latest free cash flow and balance sheet.
    #[must_use]
    pub fn dcf_inputs(
        &self,
        assumptions: &ValuationAssumptions,
        terminal: TerminalValueMethod,
    ) -> DcfInputs {
        DcfInputs {
            base_free_cash_flow: self.financials.free_cash_flow(),
            growth_rate: assumptions.growth_rate,
            discount_rate: assumptions.discount_rate,
            forecast_years: assumptions.forecast_years,
            terminal,
            total_debt: self.financials.total_debt(),
            cash: self.financials.cash(),
            shares_outstanding: self.quote.shares_outstanding,
        }
    }

    /// Dividend-discount inputs from the quote and dividend yield.
    #[must_use]
    pub fn ddm_inputs(&self, assumptions: &ValuationAssumptions) -> DdmInputs {
        DdmInputs {
            price: self.quote.price,
            dividend_yield: self.financials.dividend_yield(),
            growth_rate: assumptions.growth_rate,
            discount_rate: assumptions.discount_rate,
        }
    }

    /// Net-asset-value inputs, per share when shares are known.
    #[must_use]
    pub fn asset_based_inputs(&self) -> AssetBasedInputs {
        AssetBasedInputs {
            total_assets: self.financials.total_assets(),
            total_liabilities: self.financials.total_liabilities(),
            shares_outstanding: Some(self.quote.shares_outstanding),
        }
    }

    /// EV/EBITDA inputs from the quote and balance sheet.
    #[must_use]
    pub fn ev_ebitda_inputs(&self) -> EvEbitdaInputs {
        EvEbitdaInputs {
            market_cap: self.market_cap(),
            total_debt: self.financials.total_debt(),
            cash: self.financials.cash(),
            ebitda: self.financials.ebitda(),
        }
    }

    /// CAPM inputs using the reported beta.
    #[must_use]
    pub fn capm_inputs(&self, risk_free_rate: f64, equity_risk_premium: f64) -> CapmInputs {
        CapmInputs {
            risk_free_rate,
            beta: self.financials.beta(),
            equity_risk_premium,
        }
    }
}

/// Loads quote, financials and profile for `symbol`.
///
/// The quote lookup runs concurrently with
/// [`get_financials_and_profile`](MarketDataClient::get_financials_and_profile).
/// A failed quote or financials lookup degrades the whole result via
/// [`LoadedSnapshot::degraded`] and emits one warning, the only report of
/// the failure. A failed profile lookup only falls back to the ticker as the
/// display name.
#[instrument(skip(client), fields(client = client.name(), symbol = %symbol))]
pub async fn load_snapshot(client: &dyn MarketDataClient, symbol: &Symbol) -> LoadedSnapshot {
    let (quote, (financials, profile)) = tokio::join!(
        client.get_quote(symbol),
        client.get_financials_and_profile(symbol),
    );

    let (quote, financials) = match (quote, financials) {
        (Ok(quote), Ok(financials)) => (quote, FinancialsSnapshot::from_financials(&financials)),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "Market data unavailable, using zero financials");
            return LoadedSnapshot::degraded(symbol.clone(), e.to_string());
        }
    };

    let profile = profile.unwrap_or_else(|e| {
        debug!(error = %e, "Profile unavailable, using ticker as name");
        CompanyProfile::fallback(symbol)
    });

    LoadedSnapshot {
        symbol: symbol.clone(),
        profile,
        quote,
        financials,
        failure: None,
    }
}
