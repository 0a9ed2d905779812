//! Host-independent stand-ins for UI controls.
//!
//! Sliders, toggles, dropdowns, buttons and spacers form a closed set of
//! tagged variants. Every variant answers the same questions (current value,
//! selected option, how to apply an input), so a [`Changeable`] never needs to
//! know which concrete control it is bound to.
//!
//! Range clamping happens here, at the control layer: a slider never holds a
//! value outside `[min, max]`, which keeps most domain-invalid states out of
//! the models entirely.
//!
//! [`Changeable`]: super::Changeable

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, DemoResult};

/// Numeric representation of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliderKind {
    /// Integer slider; inputs are rounded.
    Int,
    /// Floating-point slider.
    Float,
}

/// A bounded numeric slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slider {
    kind: SliderKind,
    value: f64,
    min: f64,
    max: f64,
    step: f64,
}

impl Slider {
    /// Float slider; the initial value is clamped into range. Swapped bounds
    /// are put back in order.
    #[must_use]
    pub fn float(value: f64, min: f64, max: f64, step: f64) -> Self {
        let mut slider = Self {
            kind: SliderKind::Float,
            value,
            min: min.min(max),
            max: max.max(min),
            step,
        };
        slider.value = slider.clamp(value);
        slider
    }

    /// Integer slider; the initial value is clamped into range.
    #[must_use]
    pub fn int(value: i64, min: i64, max: i64, step: i64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let mut slider = Self {
            kind: SliderKind::Int,
            value: value as f64,
            min: min.min(max) as f64,
            max: max.max(min) as f64,
            step: step as f64,
        };
        slider.value = slider.clamp(slider.value);
        slider
    }

    /// Slider representation.
    #[must_use]
    pub const fn kind(&self) -> SliderKind {
        self.kind
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Step size shown to the user.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    fn clamp(&self, value: f64) -> f64 {
        let value = match self.kind {
            SliderKind::Int => value.round(),
            SliderKind::Float => value,
        };
        value.max(self.min).min(self.max)
    }
}

/// A set of mutually exclusive options (toggle buttons or dropdown).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    options: Vec<String>,
    selected: usize,
}

impl Selector {
    /// Create a selector with the first option selected.
    #[must_use]
    pub fn new<S: AsRef<str>>(options: &[S]) -> Self {
        Self {
            options: options.iter().map(|o| o.as_ref().to_string()).collect(),
            selected: 0,
        }
    }

    /// Available options in display order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the selected option.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// Label of the selected option.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }

    fn select(&mut self, name: &str, option: &str) -> DemoResult<()> {
        let index = self
            .options
            .iter()
            .position(|o| o == option)
            .ok_or_else(|| DemoError::UnknownOption {
                name: name.to_string(),
                option: option.to_string(),
            })?;
        self.selected = index;
        Ok(())
    }
}

/// Input delivered by the host when the user manipulates a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlInput {
    /// Integer slider position.
    Int(i64),
    /// Float slider position.
    Float(f64),
    /// Option chosen on a toggle group or dropdown.
    Select(String),
    /// Button press.
    Click,
}

impl ControlInput {
    /// Parse a textual input as typed on the command line.
    ///
    /// Integers parse as [`ControlInput::Int`], other numbers as
    /// [`ControlInput::Float`], the word `click` as [`ControlInput::Click`],
    /// anything else as an option label.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Ok(i) = text.parse::<i64>() {
            return Self::Int(i);
        }
        if let Ok(f) = text.parse::<f64>() {
            return Self::Float(f);
        }
        if text.eq_ignore_ascii_case("click") {
            return Self::Click;
        }
        Self::Select(text.to_string())
    }

    /// Short kind name for error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Select(_) => "select",
            Self::Click => "click",
        }
    }
}

/// Closed set of control variants a [`Changeable`](super::Changeable) can bind to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Control {
    /// Numeric slider.
    Slider(Slider),
    /// Toggle button group.
    Toggle(Selector),
    /// Dropdown list.
    Dropdown(Selector),
    /// Push button; its value counts presses.
    Button {
        /// Caption.
        label: String,
        /// Number of presses so far.
        clicks: u64,
    },
    /// Decorative element (header, divider). Never propagates changes.
    Spacer {
        /// Text shown in place of a control.
        text: String,
    },
}

impl Control {
    /// Short kind name.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Slider(s) => match s.kind {
                SliderKind::Int => "int",
                SliderKind::Float => "float",
            },
            Self::Toggle(_) | Self::Dropdown(_) => "select",
            Self::Button { .. } => "click",
            Self::Spacer { .. } => "nothing",
        }
    }

    /// Whether this control is purely decorative.
    #[must_use]
    pub const fn is_decorative(&self) -> bool {
        matches!(self, Self::Spacer { .. })
    }

    /// Numeric value mirrored into the bound variable.
    ///
    /// Selectors report the selected index, buttons their press count.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(&self) -> f64 {
        match self {
            Self::Slider(s) => s.value,
            Self::Toggle(sel) | Self::Dropdown(sel) => sel.selected as f64,
            Self::Button { clicks, .. } => *clicks as f64,
            Self::Spacer { .. } => 0.0,
        }
    }

    /// Selected option label, for toggles and dropdowns.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::Toggle(sel) | Self::Dropdown(sel) => sel.selected(),
            _ => None,
        }
    }

    /// Apply a host input, clamping numeric values to the control's range.
    ///
    /// # Errors
    ///
    /// - [`DemoError::ControlMismatch`] if the input kind does not fit the control.
    /// - [`DemoError::UnknownOption`] if a selector does not offer the option.
    #[allow(clippy::cast_precision_loss)]
    pub fn apply(&mut self, name: &str, input: &ControlInput) -> DemoResult<()> {
        let mismatch = |expected: &'static str| DemoError::ControlMismatch {
            name: name.to_string(),
            expected,
            got: input.kind_name(),
        };

        match (self, input) {
            (Self::Slider(s), ControlInput::Int(i)) => {
                s.value = s.clamp(*i as f64);
                Ok(())
            }
            (Self::Slider(s), ControlInput::Float(f)) if f.is_finite() => {
                s.value = s.clamp(*f);
                Ok(())
            }
            (Self::Toggle(sel) | Self::Dropdown(sel), ControlInput::Select(option)) => {
                sel.select(name, option)
            }
            (Self::Button { clicks, .. }, ControlInput::Click) => {
                *clicks = clicks.saturating_add(1);
                Ok(())
            }
            (control, _) => Err(mismatch(control.kind_name())),
        }
    }

    /// One-line textual rendering of the control state.
    #[must_use]
    pub fn describe(&self, label: &str, unit: &str) -> String {
        match self {
            Self::Slider(s) => format!("{label} {} [{unit}] ({}..{})", s.value, s.min, s.max),
            Self::Toggle(sel) | Self::Dropdown(sel) => {
                let options: Vec<String> = sel
                    .options
                    .iter()
                    .enumerate()
                    .map(|(i, o)| {
                        if i == sel.selected {
                            format!("*{o}*")
                        } else {
                            o.clone()
                        }
                    })
                    .collect();
                format!("{label} [{}]", options.join(" | "))
            }
            Self::Button { label: caption, .. } => format!("[ {caption} ]"),
            Self::Spacer { text } => format!("-- {text} --"),
        }
    }
}
