//! Embedded fab-analytics topic table.
//!
//! Category order matters: earlier categories win score ties.

use crate::index::{Category, Response};

pub(crate) fn categories() -> Vec<Category> {
    vec![
        builtin(
            "yield",
            &["yield", "trend", "analysis", "performance"],
            vec![Response::new(
                YIELD_REPLY,
                &["yield-trend-24h"],
                &["View Detailed Report", "Set Alert Threshold", "Export Data"],
            )],
        ),
        builtin(
            "equipment",
            &["equipment", "tool", "stepper", "etcher", "cvd", "performance", "maintenance"],
            vec![Response::new(
                EQUIPMENT_REPLY,
                &["equipment-oee", "maintenance-schedule"],
                &["Schedule Maintenance", "View Equipment Details", "Generate Work Order"],
            )],
        ),
        builtin(
            "rootcause",
            &["root cause", "defect", "failure", "analysis", "lot"],
            vec![Response::new(
                ROOTCAUSE_REPLY,
                &["defect-pareto", "wafer-map", "correlation-matrix"],
                &["Generate RCA Report", "Create CAPA", "Schedule Review Meeting"],
            )],
        ),
        builtin(
            "prediction",
            &["predict", "forecast", "future", "next", "hours", "days"],
            vec![Response::new(
                PREDICTION_REPLY,
                &["prediction-confidence", "factor-importance"],
                &["Set Prediction Alerts", "View Model Details", "Export Forecast"],
            )],
        ),
        builtin(
            "correlation",
            &["correlate", "correlation", "parameter", "relationship"],
            vec![Response::new(
                CORRELATION_REPLY,
                &["correlation-heatmap", "causal-graph"],
                &["View Correlation Matrix", "Set Monitoring Rules", "Generate Analysis Report"],
            )],
        ),
        builtin(
            "lineage",
            &["lineage", "data", "source", "trace", "origin"],
            vec![Response::new(
                LINEAGE_REPLY,
                &["lineage-flow", "quality-metrics"],
                &["View Full Lineage", "Download Audit Report", "Check Data Quality"],
            )],
        ),
    ]
}

fn builtin(name: &str, keywords: &[&str], responses: Vec<Response>) -> Category {
    Category::new(name, keywords, responses).expect("builtin category is valid")
}

const YIELD_REPLY: &str = r#"Based on the latest data analysis, here's the yield trend for the past 24 hours:

📊 **Current Status:**
- Overall yield: 94.2% (+2.1% vs yesterday)
- Peak yield: 95.1% at 14:30
- Lowest yield: 92.8% at 06:15

📈 **Trend Analysis:**
- Steady improvement since 08:00
- Strong correlation with Stepper-01 stability (r=0.87)
- CVD-02 temperature variance impacting downstream yield

🔮 **Prediction:**
- Expected to reach 95.5% by end of shift
- Confidence level: 89%
- Key risk factor: CVD-02 maintenance window

**Recommendations:**
1. Continue monitoring Stepper-01 parameters
2. Schedule CVD-02 preventive maintenance
3. Optimize recipe parameters for Lot W2024-003"#;

const EQUIPMENT_REPLY: &str = r#"🔧 **Equipment Performance Analysis**

**Critical Attention Required:**
- **CVD-02**: Temperature deviation detected (485°C vs 450°C target)
  - Status: Maintenance required
  - Impact: 0.8% yield loss potential
  - Action: Immediate calibration needed

**Performance Leaders:**
- **Stepper-01**: 92% utilization, excellent stability
- **Etcher-03**: 88% utilization, within spec

**Optimization Opportunities:**
- **Stepper-03**: Throughput 15% below target
  - Root cause: Recipe parameter drift
  - Solution: Adjust exposure time by -3%
  - Expected benefit: +12% throughput

**Maintenance Schedule:**
- CVD-02: Immediate (overdue)
- Implanter-04: Due in 3 days
- Stepper-02: Due in 7 days"#;

const ROOTCAUSE_REPLY: &str = r#"🔍 **Root Cause Analysis: Lot W2024-001**

**Multi-Modal Analysis Results:**

📊 **Statistical Analysis:**
- Defect pattern: Edge exclusion (78% of failures)
- Spatial correlation: Strong clustering in quadrant 2
- Temporal pattern: Defects increased after 10:30

🖼️ **Wafer Map Analysis:**
- Pattern type: Radial gradient
- Severity: Moderate (5.8% yield loss)
- Similar pattern detected in Lots W2024-002, W2024-003

🔗 **Causal Inference:**
- **Primary cause (87% confidence)**: CVD-02 temperature instability
- **Secondary cause (65% confidence)**: Stepper-01 focus drift
- **Contributing factor**: Recipe parameter interaction

**Evidence Chain:**
1. CVD-02 temperature spike at 10:25 (+15°C)
2. Downstream impact on film uniformity
3. Stepper exposure compensation insufficient
4. Edge die failure cascade

**Recommended Actions:**
1. Immediate CVD-02 calibration
2. Stepper-01 focus adjustment
3. Recipe optimization for edge compensation
4. Implement real-time temperature monitoring"#;

const PREDICTION_REPLY: &str = r#"🔮 **Yield Prediction Forecast**

**Next 8 Hours Prediction:**
- **Hour 1-2**: 94.5% ± 0.3% (High confidence)
- **Hour 3-4**: 94.8% ± 0.5% (High confidence)
- **Hour 5-6**: 95.1% ± 0.7% (Medium confidence)
- **Hour 7-8**: 95.3% ± 1.0% (Medium confidence)

**Model Performance:**
- Algorithm: Ensemble (XGBoost + LSTM + Causal)
- Training data: 90 days, 2.1M wafers
- Accuracy: 94.2% (±1% tolerance)
- Last update: 15 minutes ago

**Key Influencing Factors:**
1. **Equipment stability** (40% weight)
   - Stepper-01: Stable trend
   - CVD-02: Risk factor (maintenance needed)
2. **Process parameters** (35% weight)
   - Temperature variance: Within control
   - Pressure stability: Good
3. **Environmental conditions** (15% weight)
   - Cleanroom: Optimal
   - Utilities: Stable
4. **Recipe interactions** (10% weight)
   - Current recipe: Optimized

**Risk Assessment:**
- **Low risk**: Next 4 hours
- **Medium risk**: Hours 5-8 (CVD-02 dependency)
- **Mitigation**: Preventive maintenance window"#;

const CORRELATION_REPLY: &str = r#"📊 **Parameter Correlation Analysis**

**Strong Correlations Detected:**

🔴 **Negative Correlations (Yield Impact):**
1. **CVD-02 Temperature Variance ↔ Yield** (r = -0.78)
   - 1°C variance = 0.5% yield loss
   - Critical threshold: ±5°C
   - Current status: 8°C variance (ALERT)

2. **Stepper Focus Drift ↔ CD Uniformity** (r = -0.65)
   - 10nm drift = 2% CD variation
   - Impact on downstream yield: 0.3%

🟢 **Positive Correlations (Performance Drivers):**
1. **Chamber Pressure Stability ↔ Film Quality** (r = +0.82)
   - Stable pressure = uniform deposition
   - Current performance: Excellent

2. **Recipe Optimization Score ↔ Throughput** (r = +0.71)
   - Optimized recipes show 15% better throughput

**Causal Relationships:**
- CVD temperature → Film stress → Wafer bow → Stepper focus
- Pressure stability → Deposition rate → Thickness uniformity
- Recipe parameters → Process window → Yield stability

**Actionable Insights:**
1. Implement tighter CVD temperature control (±2°C)
2. Enhance stepper autofocus algorithms
3. Optimize recipe parameter interactions
4. Add real-time correlation monitoring"#;

const LINEAGE_REPLY: &str = r#"🗂️ **Data Lineage: Wafer Test Results**

**Complete Data Journey:**

**📥 Source Systems:**
1. **MES Database** → Lot tracking, recipe data
2. **WAT System** → Electrical test results
3. **FDC Sensors** → Real-time process parameters
4. **Metrology Tools** → Physical measurements

**🔄 Processing Pipeline:**
1. **Raw Data Ingestion** (Every 5 minutes)
   - Format: JSON, CSV, Binary
   - Volume: ~50GB/day
   - Quality checks: 99.8% pass rate

2. **Data Transformation** (Spark ETL)
   - Standardization to unified schema
   - Quality validation and cleansing
   - Feature engineering and enrichment

3. **Data Storage**
   - **Data Lake**: Raw and curated data (MinIO)
   - **Data Warehouse**: Structured analytics (Greenplum)
   - **Real-time**: Streaming data (Kafka)

**🎯 Current Test Result Lineage:**
- **Wafer ID**: W2024-001-15
- **Test Station**: WAT-03
- **Test Time**: 2024-01-25 14:30:15
- **Recipe**: Standard_Test_v3.2
- **Operator**: Auto (System)

**Data Quality Metrics:**
- Completeness: 99.9%
- Accuracy: 99.7%
- Timeliness: <2 minutes lag
- Consistency: 100%

**Audit Trail:**
✅ All data transformations logged
✅ Version control for all schemas
✅ Automated quality monitoring
✅ Compliance with data governance"#;
