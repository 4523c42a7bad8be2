//! Quick actions and chart links attached to assistant replies.
//!
//! Every known action label maps to a canned feedback toast. Labels outside
//! the known set are carried verbatim in [`QuickAction::Other`] and get the
//! generic "Executing action" feedback.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Page the dashboard navigates to after the `View Dashboard` action.
pub const DASHBOARD_PAGE: &str = "index.html";

// =============================================================================
// QuickAction
// =============================================================================

/// An action button offered alongside a reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuickAction {
    ViewDetailedReport,
    SetAlertThreshold,
    ExportData,
    ScheduleMaintenance,
    ViewEquipmentDetails,
    GenerateWorkOrder,
    GenerateRcaReport,
    CreateCapa,
    ScheduleReviewMeeting,
    SetPredictionAlerts,
    ViewModelDetails,
    ExportForecast,
    ViewCorrelationMatrix,
    SetMonitoringRules,
    GenerateAnalysisReport,
    ViewFullLineage,
    DownloadAuditReport,
    CheckDataQuality,
    ViewDashboard,
    BrowseKnowledgeBase,
    ContactSupport,
    /// A label with no canned feedback.
    Other(String),
}

/// Result of performing a quick action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Toast text shown to the user.
    pub message: String,
    /// Page to navigate to once the toast is dismissed, if any.
    pub navigate_to: Option<&'static str>,
}

impl QuickAction {
    /// Button label as shown to the user.
    pub fn label(&self) -> &str {
        match self {
            QuickAction::ViewDetailedReport => "View Detailed Report",
            QuickAction::SetAlertThreshold => "Set Alert Threshold",
            QuickAction::ExportData => "Export Data",
            QuickAction::ScheduleMaintenance => "Schedule Maintenance",
            QuickAction::ViewEquipmentDetails => "View Equipment Details",
            QuickAction::GenerateWorkOrder => "Generate Work Order",
            QuickAction::GenerateRcaReport => "Generate RCA Report",
            QuickAction::CreateCapa => "Create CAPA",
            QuickAction::ScheduleReviewMeeting => "Schedule Review Meeting",
            QuickAction::SetPredictionAlerts => "Set Prediction Alerts",
            QuickAction::ViewModelDetails => "View Model Details",
            QuickAction::ExportForecast => "Export Forecast",
            QuickAction::ViewCorrelationMatrix => "View Correlation Matrix",
            QuickAction::SetMonitoringRules => "Set Monitoring Rules",
            QuickAction::GenerateAnalysisReport => "Generate Analysis Report",
            QuickAction::ViewFullLineage => "View Full Lineage",
            QuickAction::DownloadAuditReport => "Download Audit Report",
            QuickAction::CheckDataQuality => "Check Data Quality",
            QuickAction::ViewDashboard => "View Dashboard",
            QuickAction::BrowseKnowledgeBase => "Browse Knowledge Base",
            QuickAction::ContactSupport => "Contact Support",
            QuickAction::Other(label) => label,
        }
    }

    /// Canned toast text for this action.
    pub fn feedback(&self) -> String {
        let canned = match self {
            QuickAction::ViewDetailedReport => "Opening detailed analytics report...",
            QuickAction::SetAlertThreshold => "Configuring alert thresholds...",
            QuickAction::ExportData => "Preparing data export...",
            QuickAction::ScheduleMaintenance => "Opening maintenance scheduler...",
            QuickAction::ViewEquipmentDetails => "Loading equipment diagnostics...",
            QuickAction::GenerateWorkOrder => "Creating maintenance work order...",
            QuickAction::GenerateRcaReport => "Generating root cause analysis report...",
            QuickAction::CreateCapa => "Opening CAPA (Corrective and Preventive Action) form...",
            QuickAction::ScheduleReviewMeeting => "Scheduling review meeting with stakeholders...",
            QuickAction::SetPredictionAlerts => "Configuring prediction-based alerts...",
            QuickAction::ViewModelDetails => "Opening ML model performance dashboard...",
            QuickAction::ExportForecast => "Exporting forecast data...",
            QuickAction::ViewCorrelationMatrix => "Opening correlation analysis dashboard...",
            QuickAction::SetMonitoringRules => "Configuring real-time monitoring rules...",
            QuickAction::GenerateAnalysisReport => "Generating comprehensive analysis report...",
            QuickAction::ViewFullLineage => "Opening complete data lineage visualization...",
            QuickAction::DownloadAuditReport => "Preparing audit trail report...",
            QuickAction::CheckDataQuality => "Running data quality assessment...",
            QuickAction::ViewDashboard => "Redirecting to main dashboard...",
            QuickAction::BrowseKnowledgeBase => "Opening knowledge base search...",
            QuickAction::ContactSupport => "Opening support ticket system...",
            QuickAction::Other(label) => return format!("Executing action: {}", label),
        };
        canned.to_string()
    }

    /// Perform the action: produce its toast and any navigation side effect.
    pub fn perform(&self) -> ActionOutcome {
        let navigate_to = match self {
            QuickAction::ViewDashboard => Some(DASHBOARD_PAGE),
            _ => None,
        };
        tracing::info!(action = %self, navigate = ?navigate_to, "Quick action performed");
        ActionOutcome {
            message: self.feedback(),
            navigate_to,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, QuickAction::Other(_))
    }
}

impl From<&str> for QuickAction {
    fn from(label: &str) -> Self {
        match label {
            "View Detailed Report" => QuickAction::ViewDetailedReport,
            "Set Alert Threshold" => QuickAction::SetAlertThreshold,
            "Export Data" => QuickAction::ExportData,
            "Schedule Maintenance" => QuickAction::ScheduleMaintenance,
            "View Equipment Details" => QuickAction::ViewEquipmentDetails,
            "Generate Work Order" => QuickAction::GenerateWorkOrder,
            "Generate RCA Report" => QuickAction::GenerateRcaReport,
            "Create CAPA" => QuickAction::CreateCapa,
            "Schedule Review Meeting" => QuickAction::ScheduleReviewMeeting,
            "Set Prediction Alerts" => QuickAction::SetPredictionAlerts,
            "View Model Details" => QuickAction::ViewModelDetails,
            "Export Forecast" => QuickAction::ExportForecast,
            "View Correlation Matrix" => QuickAction::ViewCorrelationMatrix,
            "Set Monitoring Rules" => QuickAction::SetMonitoringRules,
            "Generate Analysis Report" => QuickAction::GenerateAnalysisReport,
            "View Full Lineage" => QuickAction::ViewFullLineage,
            "Download Audit Report" => QuickAction::DownloadAuditReport,
            "Check Data Quality" => QuickAction::CheckDataQuality,
            "View Dashboard" => QuickAction::ViewDashboard,
            "Browse Knowledge Base" => QuickAction::BrowseKnowledgeBase,
            "Contact Support" => QuickAction::ContactSupport,
            other => QuickAction::Other(other.to_string()),
        }
    }
}

impl From<String> for QuickAction {
    fn from(label: String) -> Self {
        QuickAction::from(label.as_str())
    }
}

impl From<QuickAction> for String {
    fn from(action: QuickAction) -> Self {
        match action {
            QuickAction::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for QuickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// ChartId
// =============================================================================

/// Opaque identifier of a related visualization, e.g. `yield-trend-24h`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartId(pub String);

impl ChartId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Button caption: first hyphen becomes a space, word initials upper-cased.
    ///
    /// `yield-trend-24h` becomes `Yield Trend-24h`.
    pub fn display_label(&self) -> String {
        let spaced = self.0.replacen('-', " ", 1);
        let mut out = String::with_capacity(spaced.len());
        let mut prev_is_word = false;
        for c in spaced.chars() {
            let is_word = c.is_ascii_alphanumeric() || c == '_';
            if is_word && !prev_is_word {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
            prev_is_word = is_word;
        }
        out
    }

    /// Placeholder notice shown when a chart link is opened.
    pub fn notice(&self) -> String {
        format!(
            "Opening chart: {}\n\nThis would display an interactive visualization showing detailed data for {}.",
            self.0,
            self.0.replacen('-', " ", 1)
        )
    }
}

impl From<&str> for ChartId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
