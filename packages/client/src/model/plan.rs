use serde::{Deserialize, Serialize};

use super::lenient::scalar_text;

/// Plan descriptor as published in the index
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlanEntry {
    #[serde(default, deserialize_with = "scalar_text")]
    pub plan_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub plan_id_type: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub plan_id: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub plan_market_type: Option<String>,
}

/// Plan descriptor carrying a `plan_id`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReportingPlan {
    pub plan_name: Option<String>,
    pub plan_id_type: Option<String>,
    pub plan_id: String,
    pub plan_market_type: Option<String>,
}

impl TryFrom<PlanEntry> for ReportingPlan {
    type Error = crate::Error;

    fn try_from(entry: PlanEntry) -> crate::Result<Self> {
        let Some(plan_id) = entry.plan_id else {
            return Err(crate::error::record(format!(
                "Malformed reporting plan: missing plan_id (plan_name: {})",
                entry.plan_name.as_deref().unwrap_or("<none>")
            )));
        };
        Ok(ReportingPlan {
            plan_name: entry.plan_name,
            plan_id_type: entry.plan_id_type,
            plan_id,
            plan_market_type: entry.plan_market_type,
        })
    }
}
