//! Reactive parameter framework.
//!
//! This module provides the change-propagation primitives every demo is
//! built from:
//!
//! - [`Variable`]: immutable value + unit + power-of-ten scale.
//! - [`Control`]: closed set of control variants standing in for UI widgets.
//! - [`Changeable`]: a Variable bound to a Control, with ordered subscribers.
//! - [`Subscription`]: RAII guard that detaches a subscriber on drop.
//! - [`ChangeableContainer`]: ordered group of Changeables with a pull-based
//!   view of its active members.
//!
//! # Architecture
//!
//! ```text
//! host input ──▶ Changeable::on_control_changed
//!                   │ 1. control.apply (clamp)
//!                   │ 2. variable ← control value
//!                   ▼
//!               subscribers (registration order)
//!                   ▼
//!               Demo single-flight queue ──▶ Model::update
//! ```
//!
//! Everything here is single-threaded (`Rc<RefCell<..>>`); animation threads
//! never touch Changeables.

pub mod changeable;
pub mod container;
pub mod control;
pub mod variable;

pub use changeable::{ChangeEvent, Changeable, Subscription};
pub use container::{Alignment, ChangeableContainer, ContainerView, Orientation, ViewEntry};
pub use control::{Control, ControlInput, Selector, Slider, SliderKind};
pub use variable::Variable;
