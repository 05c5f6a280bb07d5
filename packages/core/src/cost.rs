// ABOUTME: ROI calculator and the cost analysis stored on each agent
// ABOUTME: Derived values are always computed from the five inputs, never accepted from callers

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// The five scalar inputs of the ROI form.
///
/// `session_length` and `time_saved_per_session` are minutes, the rates are
/// currency per hour, and `annual_sessions` is a count (fractional values are
/// accepted and used as-is).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiInputs {
    pub hourly_rate: f64,
    pub session_length: f64,
    pub manual_hourly_rate: f64,
    pub time_saved_per_session: f64,
    pub annual_sessions: f64,
}

impl RoiInputs {
    /// Reject negative or non-finite inputs
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("hourlyRate", self.hourly_rate),
            ("sessionLength", self.session_length),
            ("manualHourlyRate", self.manual_hourly_rate),
            ("timeSavedPerSession", self.time_saved_per_session),
            ("annualSessions", self.annual_sessions),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ValidationError::OutOfRange(
                    name.to_string(),
                    "must be a finite number".to_string(),
                ));
            }
            if value < 0.0 {
                return Err(ValidationError::OutOfRange(
                    name.to_string(),
                    format!("must be >= 0, got {}", value),
                ));
            }
        }

        Ok(())
    }

    /// Yearly cost of running the agent, in currency units
    pub fn annual_agent_cost(&self) -> f64 {
        (self.hourly_rate * self.session_length * self.annual_sessions) / 60.0
    }
}

/// Values derived from [`RoiInputs`] by [`calculate_roi`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiOutcome {
    /// Hours saved per year
    pub annual_time_saved: f64,
    /// Currency saved per year at the manual hourly rate
    pub annual_cost_saved: f64,
    /// Whole percent; 0 whenever either side of the ratio is not positive
    pub roi: i64,
    #[serde(skip)]
    pub annual_agent_cost: f64,
}

/// Derive annual savings and return on investment from the ROI form inputs.
pub fn calculate_roi(inputs: &RoiInputs) -> RoiOutcome {
    let annual_time_saved = (inputs.time_saved_per_session * inputs.annual_sessions) / 60.0;
    let annual_cost_saved = annual_time_saved * inputs.manual_hourly_rate;
    let annual_agent_cost = inputs.annual_agent_cost();

    let roi = if annual_cost_saved > 0.0 && annual_agent_cost > 0.0 {
        (annual_cost_saved / annual_agent_cost * 100.0).round() as i64
    } else {
        0
    };

    RoiOutcome {
        annual_time_saved,
        annual_cost_saved,
        roi,
        annual_agent_cost,
    }
}

/// Cost analysis block stored on an agent: the inputs plus their derived values.
///
/// Fields are private so a value with stale derived numbers cannot be built.
/// Deserialization reads the inputs only and recomputes the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoiInputs")]
pub struct CostAnalysis {
    #[serde(flatten)]
    inputs: RoiInputs,
    #[serde(flatten)]
    outcome: RoiOutcome,
}

impl CostAnalysis {
    pub fn new(inputs: RoiInputs) -> Result<Self, ValidationError> {
        inputs.validate()?;
        Ok(Self {
            inputs,
            outcome: calculate_roi(&inputs),
        })
    }

    pub fn builder() -> CostAnalysisBuilder {
        CostAnalysisBuilder::default()
    }

    /// A new analysis from the current inputs after `patch` edits them.
    /// `self` is left as it was.
    pub fn with_inputs<F>(&self, patch: F) -> Result<Self, ValidationError>
    where
        F: FnOnce(&mut RoiInputs),
    {
        let mut inputs = self.inputs;
        patch(&mut inputs);
        Self::new(inputs)
    }

    pub fn inputs(&self) -> &RoiInputs {
        &self.inputs
    }

    pub fn outcome(&self) -> &RoiOutcome {
        &self.outcome
    }

    pub fn annual_time_saved(&self) -> f64 {
        self.outcome.annual_time_saved
    }

    pub fn annual_cost_saved(&self) -> f64 {
        self.outcome.annual_cost_saved
    }

    pub fn annual_agent_cost(&self) -> f64 {
        self.outcome.annual_agent_cost
    }

    pub fn roi(&self) -> i64 {
        self.outcome.roi
    }
}

impl TryFrom<RoiInputs> for CostAnalysis {
    type Error = ValidationError;

    fn try_from(inputs: RoiInputs) -> Result<Self, Self::Error> {
        Self::new(inputs)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CostAnalysisBuilder {
    inputs: RoiInputs,
}

impl CostAnalysisBuilder {
    pub fn hourly_rate(mut self, value: f64) -> Self {
        self.inputs.hourly_rate = value;
        self
    }

    pub fn session_length(mut self, minutes: f64) -> Self {
        self.inputs.session_length = minutes;
        self
    }

    pub fn manual_hourly_rate(mut self, value: f64) -> Self {
        self.inputs.manual_hourly_rate = value;
        self
    }

    pub fn time_saved_per_session(mut self, minutes: f64) -> Self {
        self.inputs.time_saved_per_session = minutes;
        self
    }

    pub fn annual_sessions(mut self, count: f64) -> Self {
        self.inputs.annual_sessions = count;
        self
    }

    pub fn build(self) -> Result<CostAnalysis, ValidationError> {
        CostAnalysis::new(self.inputs)
    }
}
