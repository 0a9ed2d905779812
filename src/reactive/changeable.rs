//! Observable variables bound to a control.
//!
//! # Design
//!
//! [`Changeable`] is a shared handle (`Rc<RefCell<..>>`) around a
//! [`Variable`], the [`Control`] it mirrors and an ordered list of subscriber
//! closures. Models keep one handle per parameter; containers and the
//! orchestrator clone the handle, so every party observes the same state.
//!
//! A control change travels through two layers:
//!
//! 1. **Internal sync**: the input is written into the control (clamped) and
//!    the control's value is copied into the variable.
//! 2. **Outward notification**: every subscriber registered through
//!    [`Changeable::subscribe`] is called, in registration order, with the
//!    resulting [`ChangeEvent`].
//!
//! The subscriber list is snapshotted before notifying, so callbacks may read
//! or even change the Changeable without hitting a `RefCell` borrow conflict.
//!
//! # Invariants
//!
//! 1. After [`Changeable::on_control_changed`] returns, `value()` equals the
//!    control's value.
//! 2. Subscribers are notified in registration order.
//! 3. Decorative Changeables (spacers) never accept subscribers and never
//!    notify.
//! 4. Dropping a [`Subscription`] removes its callback from every later
//!    notification. A notification already in progress still calls it,
//!    since the callbacks are snapshotted first.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::control::{Control, ControlInput, Selector};
use super::variable::Variable;
use crate::error::DemoResult;

type Callback = Rc<dyn Fn(&ChangeEvent)>;

struct Subscriber {
    id: u64,
    callback: Callback,
}

struct ChangeableInner {
    name: String,
    label: String,
    control: Control,
    variable: Variable,
    active: bool,
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

/// Notification emitted after a control change has been synced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Name of the Changeable that fired.
    pub name: String,
    /// Nominal value before the change.
    pub old_value: f64,
    /// Nominal value after the change.
    pub new_value: f64,
    /// Selected option after the change, for toggles and dropdowns.
    pub selection: Option<String>,
}

/// A [`Variable`] bound to a UI control, with change subscribers.
///
/// Cloning a `Changeable` yields another handle to the **same** state.
#[derive(Clone)]
pub struct Changeable {
    inner: Rc<RefCell<ChangeableInner>>,
}

impl Changeable {
    /// Bind a new variable to `control`.
    ///
    /// The variable starts with the control's current value.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        control: Control,
        scale_exponent: i32,
        unit: impl Into<String>,
    ) -> Self {
        let variable = Variable::new(control.value(), scale_exponent, unit);
        Self {
            inner: Rc::new(RefCell::new(ChangeableInner {
                name: name.into(),
                label: label.into(),
                control,
                variable,
                active: true,
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Decorative element such as a section header.
    #[must_use]
    pub fn spacer(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            name,
            "",
            Control::Spacer { text: text.into() },
            0,
            "",
        )
    }

    /// Toggle button group with the first option selected.
    #[must_use]
    pub fn toggle<S: AsRef<str>>(
        name: impl Into<String>,
        label: impl Into<String>,
        options: &[S],
    ) -> Self {
        Self::new(name, label, Control::Toggle(Selector::new(options)), 0, "")
    }

    /// Dropdown with the first option selected.
    #[must_use]
    pub fn dropdown<S: AsRef<str>>(
        name: impl Into<String>,
        label: impl Into<String>,
        options: &[S],
    ) -> Self {
        Self::new(name, label, Control::Dropdown(Selector::new(options)), 0, "")
    }

    /// Push button.
    #[must_use]
    pub fn button(name: impl Into<String>, caption: impl Into<String>) -> Self {
        let caption = caption.into();
        Self::new(
            name,
            caption.clone(),
            Control::Button {
                label: caption,
                clicks: 0,
            },
            0,
            "",
        )
    }

    /// Identifier used for lookup and in change events.
    #[must_use]
    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    /// Human-readable description shown next to the control.
    #[must_use]
    pub fn label(&self) -> String {
        self.inner.borrow().label.clone()
    }

    /// Current nominal value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.inner.borrow().variable.value()
    }

    /// Current real (scaled) value.
    #[must_use]
    pub fn real(&self) -> f64 {
        self.inner.borrow().variable.real()
    }

    /// Snapshot of the bound variable.
    #[must_use]
    pub fn variable(&self) -> Variable {
        self.inner.borrow().variable.clone()
    }

    /// Snapshot of the bound control.
    #[must_use]
    pub fn control(&self) -> Control {
        self.inner.borrow().control.clone()
    }

    /// Current value of the bound control.
    #[must_use]
    pub fn control_value(&self) -> f64 {
        self.inner.borrow().control.value()
    }

    /// Selected option, for toggles and dropdowns.
    #[must_use]
    pub fn selected(&self) -> Option<String> {
        self.inner.borrow().control.selected().map(str::to_string)
    }

    /// Whether the element is shown inside its container.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.borrow().active
    }

    /// Show or hide the element. Subscribers stay attached.
    pub fn set_active(&self, active: bool) {
        self.inner.borrow_mut().active = active;
    }

    /// Whether changes of this element propagate to the model.
    #[must_use]
    pub fn should_update(&self) -> bool {
        !self.inner.borrow().control.is_decorative()
    }

    /// Number of attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Whether two handles refer to the same Changeable.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// One-line rendering of the control state.
    #[must_use]
    pub fn describe(&self) -> String {
        let inner = self.inner.borrow();
        inner.control.describe(&inner.label, inner.variable.unit())
    }

    /// Register a callback fired after every control change.
    ///
    /// Decorative elements ignore the callback and return an inert
    /// subscription. Dropping the returned guard detaches the callback.
    pub fn subscribe(&self, callback: impl Fn(&ChangeEvent) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        if inner.control.is_decorative() {
            trace!(name = %inner.name, "subscribe ignored on decorative element");
            return Subscription::inert();
        }
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push(Subscriber {
            id,
            callback: Rc::new(callback),
        });
        debug!(name = %inner.name, id, "subscriber attached");
        Subscription {
            id,
            owner: Rc::downgrade(&self.inner),
        }
    }

    /// Single mutation path: apply a host input, sync, then notify.
    ///
    /// # Errors
    ///
    /// Returns the control's rejection (kind mismatch or unknown option); the
    /// value and subscribers are left untouched in that case.
    pub fn on_control_changed(&self, input: &ControlInput) -> DemoResult<ChangeEvent> {
        let (event, callbacks) = {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            inner.control.apply(&inner.name, input)?;

            let old_value = inner.variable.value();
            let new_value = inner.control.value();
            inner.variable = inner.variable.with_value(new_value);

            let event = ChangeEvent {
                name: inner.name.clone(),
                old_value,
                new_value,
                selection: inner.control.selected().map(str::to_string),
            };
            let callbacks: Vec<Callback> = inner
                .subscribers
                .iter()
                .map(|s| Rc::clone(&s.callback))
                .collect();
            (event, callbacks)
        };

        trace!(
            name = %event.name,
            old = event.old_value,
            new = event.new_value,
            subscribers = callbacks.len(),
            "control changed"
        );
        for callback in &callbacks {
            callback(&event);
        }
        Ok(event)
    }
}

impl fmt::Debug for Changeable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Changeable")
            .field("name", &inner.name)
            .field("variable", &inner.variable)
            .field("control", &inner.control)
            .field("active", &inner.active)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl fmt::Display for Changeable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner.borrow().variable, f)
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping it detaches the callback from its Changeable.
#[must_use = "dropping a Subscription detaches the callback immediately"]
pub struct Subscription {
    id: u64,
    owner: Weak<RefCell<ChangeableInner>>,
}

impl Subscription {
    fn inert() -> Self {
        Self {
            id: u64::MAX,
            owner: Weak::new(),
        }
    }

    /// Whether this subscription is attached to a live Changeable.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.owner
            .upgrade()
            .is_some_and(|inner| inner.borrow().subscribers.iter().any(|s| s.id == self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.owner.upgrade() {
            if let Ok(mut inner) = inner.try_borrow_mut() {
                inner.subscribers.retain(|s| s.id != self.id);
            }
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.is_attached())
            .finish()
    }
}
