//! Shared shape of the multi-step forms.
//!
//! Both the checkout and the signup form are a fixed, linear sequence of
//! three steps. A step type lists its steps in order; moving forward from the
//! last step is not an increment but the form's terminal action, which each
//! wizard models separately.

/// A step in a linear multi-step form.
pub trait WizardStep: Copy + Eq + Sized + 'static {
    /// Every step, first to last.
    const ORDER: &'static [Self];

    /// The step a fresh form starts on.
    const FIRST: Self;

    /// Title shown in the step indicator.
    fn title(self) -> &'static str;

    /// One-based position of this step.
    fn number(self) -> usize {
        Self::ORDER
            .iter()
            .position(|step| *step == self)
            .map_or(0, |index| index + 1)
    }

    /// The following step, or `None` on the last step.
    fn next(self) -> Option<Self> {
        Self::ORDER.get(self.number()).copied()
    }

    /// The preceding step, or `None` on the first step.
    fn previous(self) -> Option<Self> {
        self.number()
            .checked_sub(2)
            .and_then(|index| Self::ORDER.get(index).copied())
    }

    /// Whether this is the last step.
    fn is_last(self) -> bool {
        self.next().is_none()
    }
}

/// Entry in a rendered step indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepMarker {
    pub number: usize,
    pub title: &'static str,
    pub current: bool,
    pub complete: bool,
}

/// Markers for every step, relative to `current`.
#[must_use]
pub fn step_markers<S: WizardStep>(current: S) -> Vec<StepMarker> {
    S::ORDER
        .iter()
        .map(|step| StepMarker {
            number: step.number(),
            title: step.title(),
            current: *step == current,
            complete: step.number() < current.number(),
        })
        .collect()
}
