//! Asset-based (net asset value) valuation.

use serde::{Deserialize, Serialize};

use crate::math::{finite_or_zero, per_share};
use crate::result::{Metric, ValuationResult};

/// Inputs for an asset-based valuation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetBasedInputs {
    /// Total assets.
    pub total_assets: f64,
    /// Total liabilities.
    pub total_liabilities: f64,
    /// Shares outstanding, when a per-share figure is wanted.
    #[serde(default)]
    pub shares_outstanding: Option<f64>,
}

/// Output of [`asset_based`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetBasedValuation {
    /// Assets minus liabilities.
    pub net_asset_value: f64,
    /// Net asset value per share, if shares were supplied.
    pub per_share: Option<f64>,
}

/// Assets minus liabilities.
#[must_use]
pub fn net_asset_value(total_assets: f64, total_liabilities: f64) -> f64 {
    finite_or_zero(total_assets - total_liabilities)
}

/// Values a company at its book net assets.
#[must_use]
pub fn asset_based(inputs: &AssetBasedInputs) -> AssetBasedValuation {
    let nav = net_asset_value(inputs.total_assets, inputs.total_liabilities);
    AssetBasedValuation {
        net_asset_value: nav,
        per_share: inputs.shares_outstanding.map(|shares| per_share(nav, shares)),
    }
}

impl From<&AssetBasedValuation> for ValuationResult {
    fn from(v: &AssetBasedValuation) -> Self {
        let result = Self::new().with(Metric::NetAssetValue, v.net_asset_value);
        match v.per_share {
            Some(per_share) => result.with(Metric::NetAssetValuePerShare, per_share),
            None => result,
        }
    }
}
