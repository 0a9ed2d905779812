//! # physdemo
//!
//! Reactive parameter framework and closed-form physics models for
//! interactive teaching demos in fluid mechanics and vibration.
//!
//! - [`reactive`]: Variables, controls, Changeables and containers
//! - [`domains`]: pure physics formulas
//! - [`demos`]: models (addition, pipe, tank, elastic angle) and exercises
//! - [`engine`]: the [`Demo`](engine::Demo) orchestrator and animation tasks
//! - [`renderers`]: display surfaces (command recorder, SVG)
//!
//! ## Example
//!
//! ```rust
//! use physdemo::prelude::*;
//!
//! let config = DemoConfig::builder().animations(false).build();
//! let demo: Demo<PipeModel> = Demo::headless(PipeModel::simple(&config));
//! demo.show();
//! demo.set_control("u1", &ControlInput::Float(2.0)).unwrap();
//!
//! let u2 = demo.outcome().and_then(|o| o.get("u2").map(Variable::real));
//! assert!((u2.unwrap() - 8.0).abs() < 1e-9);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::imprecise_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,
    clippy::many_single_char_names,
)]

pub mod cli;
pub mod config;
pub mod demos;
pub mod domains;
pub mod engine;
pub mod error;
pub mod reactive;
pub mod renderers;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{DemoConfig, DemoConfigBuilder, SliderConfig};
    pub use crate::demos::{
        AdditionModel, AngleModel, DemoKind, Exercise, Model, Outcome, PipeModel, Report, Shape,
        TankModel, Verdict,
    };
    pub use crate::engine::{Demo, UpdateState};
    pub use crate::error::{DemoError, DemoResult, PhysicsError};
    pub use crate::reactive::{
        ChangeEvent, Changeable, ChangeableContainer, Control, ControlInput, Variable,
    };
    pub use crate::renderers::{CommandRecorder, DisplaySurface, SvgSurface};
}

/// Re-export for public API
pub use error::{DemoError, DemoResult};
