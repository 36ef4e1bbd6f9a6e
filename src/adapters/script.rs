//! Stimulus-script adapter for the simulator.
//!
//! A script is a JSON list of input levels, each held for a duration:
//!
//! ```json
//! { "steps": [
//!     { "label": "program 0xA", "hold_ms": 50, "config": true, "switches": 10 },
//!     { "hold_ms": 50, "config": true, "validate": true, "switches": 10 },
//!     { "hold_ms": 500 }
//! ] }
//! ```
//!
//! [`ScriptedPanel`] replays it one tick at a time as an [`InputPort`] and
//! records what the service drives as an [`OutputPort`], reconstructing
//! the visible display frame the way an eye would.

use heapless::String as FrameText;
use serde::{Deserialize, Serialize};

use crate::app::ports::{InputPort, OutputPort};
use crate::board::{PanelInputs, PanelOutputs};
use crate::config::BoardConfig;
use crate::drivers::seven_seg::FrameCapture;
use crate::error::{Error, Result};
use crate::pins::{DIGIT_COUNT, SW_CODE_MASK, SW_MODE_BIT};

/// One held input level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StimulusStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub hold_ms: u32,
    #[serde(default)]
    pub validate: bool,
    #[serde(default)]
    pub config: bool,
    #[serde(default)]
    pub reset: bool,
    /// Switch bus: bits 0–3 code, bit 4 application select.
    #[serde(default)]
    pub switches: u8,
}

impl StimulusStep {
    pub fn inputs(&self) -> PanelInputs {
        PanelInputs {
            validate: self.validate,
            config: self.config,
            reset: self.reset,
            spare: false,
            switches: self.switches,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stimulus {
    pub steps: Vec<StimulusStep>,
}

impl Stimulus {
    pub fn from_json(json: &str) -> Result<Self> {
        let stimulus: Self =
            serde_json::from_str(json).map_err(|_| Error::Script("not a valid stimulus document"))?;
        stimulus.validate()?;
        Ok(stimulus)
    }

    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(Error::Script("script has no steps"));
        }
        let switch_mask = SW_CODE_MASK | (1 << SW_MODE_BIT);
        for step in &self.steps {
            if step.hold_ms == 0 {
                return Err(Error::Script("hold_ms must be non-zero"));
            }
            if step.switches & !switch_mask != 0 {
                return Err(Error::Script("switches must fit in five bits"));
            }
        }
        Ok(())
    }
}

/// What the board showed on the last tick of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub index: usize,
    pub label: Option<String>,
    pub ticks: u32,
    pub leds: u16,
    pub frame: FrameText<DIGIT_COUNT>,
}

/// Replays a [`Stimulus`] and captures the resulting outputs.
pub struct ScriptedPanel {
    steps: Vec<StimulusStep>,
    step_ticks: Vec<u32>,
    index: usize,
    ticks_left: u32,
    finishing: Option<usize>,
    capture: FrameCapture,
    last: PanelOutputs,
    report: Option<StepReport>,
}

impl ScriptedPanel {
    pub fn new(stimulus: Stimulus, config: &BoardConfig) -> Result<Self> {
        stimulus.validate()?;
        let step_ticks: Vec<u32> = stimulus
            .steps
            .iter()
            .map(|s| config.ticks_for_ms(s.hold_ms))
            .collect();
        let ticks_left = step_ticks[0];
        Ok(Self {
            steps: stimulus.steps,
            step_ticks,
            index: 0,
            ticks_left,
            finishing: None,
            capture: FrameCapture::new(),
            last: PanelOutputs::OFF,
            report: None,
        })
    }

    /// True once every step has been read.
    pub fn is_finished(&self) -> bool {
        self.index >= self.steps.len()
    }

    /// Total ticks the whole script spans.
    pub fn total_ticks(&self) -> u64 {
        self.step_ticks.iter().map(|t| u64::from(*t)).sum()
    }

    /// Report for the step whose last tick was just driven, if any.
    pub fn take_report(&mut self) -> Option<StepReport> {
        self.report.take()
    }

    pub fn last_outputs(&self) -> PanelOutputs {
        self.last
    }

    pub fn frame(&self) -> &FrameCapture {
        &self.capture
    }
}

impl InputPort for ScriptedPanel {
    fn read_inputs(&mut self) -> Result<PanelInputs> {
        let Some(step) = self.steps.get(self.index) else {
            return Err(Error::Script("script exhausted"));
        };
        let inputs = step.inputs();

        self.ticks_left -= 1;
        if self.ticks_left == 0 {
            self.finishing = Some(self.index);
            self.index += 1;
            self.ticks_left = self.step_ticks.get(self.index).copied().unwrap_or(0);
        }
        Ok(inputs)
    }
}

impl OutputPort for ScriptedPanel {
    fn drive(&mut self, outputs: &PanelOutputs) -> Result<()> {
        if outputs.display.is_blank() {
            self.capture.clear();
        } else {
            self.capture.observe(outputs.display);
        }
        self.last = *outputs;

        if let Some(index) = self.finishing.take() {
            self.report = Some(StepReport {
                index,
                label: self.steps[index].label.clone(),
                ticks: self.step_ticks[index],
                leds: outputs.leds,
                frame: self.capture.text(),
            });
        }
        Ok(())
    }
}
