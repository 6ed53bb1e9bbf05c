//! Action pipelines
//!
//! A pipeline is an ordered list of [`Action`]s, each either an atomic
//! [`MinifyAction`] or another pipeline. Nesting is flattened when the
//! pipeline runs, so `[A, [B, C]]` behaves exactly like `[A, B, C]`.

use std::sync::Arc;

use super::{ActionKind, ActionOptions, MinifyAction};
use crate::pattern::PatternSet;

/// One step of a pipeline.
#[derive(Debug, Clone)]
pub enum Action {
    /// A single transformation
    Atomic(Arc<dyn MinifyAction>),
    /// A nested pipeline, run in place
    Pipeline(ActionPipeline),
}

impl Action {
    /// Wrap a concrete action.
    pub fn atomic(action: impl MinifyAction + 'static) -> Self {
        Self::Atomic(Arc::new(action))
    }
}

impl From<Arc<dyn MinifyAction>> for Action {
    fn from(action: Arc<dyn MinifyAction>) -> Self {
        Self::Atomic(action)
    }
}

impl From<ActionPipeline> for Action {
    fn from(pipeline: ActionPipeline) -> Self {
        Self::Pipeline(pipeline)
    }
}

impl From<ActionKind> for Action {
    fn from(kind: ActionKind) -> Self {
        Self::Atomic(kind.create())
    }
}

/// Ordered, composable sequence of actions.
///
/// The order given by the caller is the order of execution; the pipeline
/// never reorders.
///
/// # Examples
///
/// ```
/// use src_slim::action::{ActionOptions, ActionPipeline, CollapseWhitespace, StripComments};
/// use src_slim::pattern::PatternSet;
///
/// let patterns = PatternSet::builder().line_comment("#").build();
/// let pipeline = ActionPipeline::empty()
///     .with(StripComments)
///     .with(CollapseWhitespace);
///
/// let out = pipeline.apply("x  =  1  # one\n", &patterns, &ActionOptions::default());
/// assert_eq!(out, "x = 1\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ActionPipeline {
    actions: Vec<Action>,
}

impl ActionPipeline {
    /// Pipeline over the given steps.
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// Pipeline with no steps; applying it returns the input unchanged.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Comments, then whitespace, then blank lines.
    pub fn standard() -> Self {
        Self::from_kinds(&[
            ActionKind::Comments,
            ActionKind::Whitespace,
            ActionKind::BlankLines,
        ])
    }

    /// Pipeline of built-in actions in the given order.
    pub fn from_kinds(kinds: &[ActionKind]) -> Self {
        Self::new(kinds.iter().map(|&kind| Action::from(kind)).collect())
    }

    /// Append a concrete action.
    pub fn with(mut self, action: impl MinifyAction + 'static) -> Self {
        self.actions.push(Action::atomic(action));
        self
    }

    /// Append another pipeline as a single nested step.
    pub fn then(mut self, other: ActionPipeline) -> Self {
        self.actions.push(Action::Pipeline(other));
        self
    }

    /// Append a step.
    pub fn push(&mut self, action: impl Into<Action>) {
        self.actions.push(action.into());
    }

    /// Top-level steps, nested pipelines not expanded.
    pub fn steps(&self) -> &[Action] {
        &self.actions
    }

    /// Atomic actions in execution order, nested pipelines expanded.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: vec![self.actions.iter()],
        }
    }

    /// Names of the atomic actions in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.leaves().map(|action| action.name()).collect()
    }

    /// Number of atomic actions.
    pub fn len(&self) -> usize {
        self.leaves().count()
    }

    /// True if applying the pipeline is the identity.
    pub fn is_empty(&self) -> bool {
        self.leaves().next().is_none()
    }

    /// Run every atomic action in order, feeding each the previous output.
    pub fn apply(&self, text: &str, patterns: &PatternSet, options: &ActionOptions) -> String {
        let mut current = text.to_string();
        for action in self.leaves() {
            let next = action.apply(&current, patterns, options);
            log::trace!(
                "{}: {} -> {} bytes",
                action.name(),
                current.len(),
                next.len()
            );
            current = next;
        }
        current
    }
}

impl MinifyAction for ActionPipeline {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn apply(&self, text: &str, patterns: &PatternSet, options: &ActionOptions) -> String {
        ActionPipeline::apply(self, text, patterns, options)
    }
}

impl FromIterator<Action> for ActionPipeline {
    fn from_iter<T: IntoIterator<Item = Action>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Depth-first iterator over the atomic actions of a pipeline.
///
/// Uses an explicit stack, so arbitrarily deep nesting cannot overflow the
/// call stack.
#[derive(Debug)]
pub struct Leaves<'a> {
    stack: Vec<std::slice::Iter<'a, Action>>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a dyn MinifyAction;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                None => {
                    self.stack.pop();
                }
                Some(Action::Atomic(action)) => return Some(action.as_ref()),
                Some(Action::Pipeline(nested)) => self.stack.push(nested.actions.iter()),
            }
        }
    }
}
