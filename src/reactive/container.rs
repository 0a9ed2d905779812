//! Ordered groups of Changeables rendered together.
//!
//! A [`ChangeableContainer`] keeps its members in insertion order and
//! maintains a [`ContainerView`]: the rendered subset of currently active
//! members. The view is **pull-based**: toggling a member's activity does not
//! touch the view until [`ChangeableContainer::update`] runs. Membership
//! changes through [`add`](ChangeableContainer::add) and
//! [`remove`](ChangeableContainer::remove) refresh it immediately.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::changeable::Changeable;

/// Layout direction of a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Members stacked top to bottom.
    #[default]
    Vertical,
    /// Members laid out left to right.
    Horizontal,
}

/// Cross-axis alignment of a container's members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Align to the leading edge.
    #[default]
    Start,
    /// Center members.
    Center,
    /// Align to the trailing edge.
    End,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "flex-start",
            Self::Center => "center",
            Self::End => "flex-end",
        };
        f.write_str(s)
    }
}

/// One rendered member of a container view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewEntry {
    /// Changeable name.
    pub name: String,
    /// Rendered control text at the time of the last update.
    pub text: String,
}

/// Snapshot of a container's active members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerView {
    /// Layout direction.
    pub orientation: Orientation,
    /// Cross-axis alignment.
    pub alignment: Alignment,
    /// Active members in insertion order.
    pub entries: Vec<ViewEntry>,
}

impl ContainerView {
    /// Names of the rendered members.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Plain-text rendering: one line per member when vertical, a single
    /// `|`-separated line when horizontal.
    #[must_use]
    pub fn render(&self) -> String {
        let texts: Vec<&str> = self.entries.iter().map(|e| e.text.as_str()).collect();
        match self.orientation {
            Orientation::Vertical => texts.join("\n"),
            Orientation::Horizontal => texts.join(" | "),
        }
    }
}

/// An ordered, filterable group of [`Changeable`]s.
#[derive(Debug, Clone)]
pub struct ChangeableContainer {
    members: Vec<Changeable>,
    orientation: Orientation,
    alignment: Alignment,
    view: ContainerView,
}

impl ChangeableContainer {
    /// Vertical container holding `members` in order.
    #[must_use]
    pub fn new(members: Vec<Changeable>) -> Self {
        Self::with_layout(members, Orientation::Vertical, Alignment::Start)
    }

    /// Container with explicit layout.
    #[must_use]
    pub fn with_layout(
        members: Vec<Changeable>,
        orientation: Orientation,
        alignment: Alignment,
    ) -> Self {
        let mut container = Self {
            members,
            orientation,
            alignment,
            view: ContainerView::default(),
        };
        container.update();
        container
    }

    /// All members, active or not, in insertion order.
    #[must_use]
    pub fn members(&self) -> &[Changeable] {
        &self.members
    }

    /// Find a member by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Changeable> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// Layout direction.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Cross-axis alignment.
    #[must_use]
    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// The view produced by the last [`update`](Self::update).
    #[must_use]
    pub fn view(&self) -> &ContainerView {
        &self.view
    }

    /// Rebuild the view from the current activity flags.
    pub fn update(&mut self) {
        self.view = ContainerView {
            orientation: self.orientation,
            alignment: self.alignment,
            entries: self
                .members
                .iter()
                .filter(|m| m.is_active())
                .map(|m| ViewEntry {
                    name: m.name(),
                    text: m.describe(),
                })
                .collect(),
        };
    }

    /// Change orientation and rebuild the view.
    pub fn update_oriented(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.update();
    }

    /// Append a member and rebuild the view.
    pub fn add(&mut self, changeable: Changeable) {
        self.members.push(changeable);
        self.update();
    }

    /// Remove the first member named `name` and rebuild the view.
    pub fn remove(&mut self, name: &str) -> Option<Changeable> {
        let index = self.members.iter().position(|m| m.name() == name)?;
        let removed = self.members.remove(index);
        self.update();
        Some(removed)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::reactive::control::{Control, Slider};
    use proptest::prelude::*;

    proptest! {
        /// After update() the view is exactly the active subsequence, in order.
        #[test]
        fn prop_view_is_active_subsequence(flags in proptest::collection::vec(any::<bool>(), 0..16)) {
            let members: Vec<Changeable> = (0..flags.len())
                .map(|i| Changeable::new(
                    format!("m{i}"),
                    "",
                    Control::Slider(Slider::int(0, 0, 10, 1)),
                    0,
                    "",
                ))
                .collect();
            let mut container = ChangeableContainer::new(members.clone());
            for (member, active) in members.iter().zip(&flags) {
                member.set_active(*active);
            }
            container.update();

            let expected: Vec<String> = members
                .iter()
                .zip(&flags)
                .filter(|(_, active)| **active)
                .map(|(m, _)| m.name())
                .collect();
            let actual: Vec<String> = container.view().names().iter().map(|s| (*s).to_string()).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
