//! Per-input, per-subform, and per-form options
//!
//! Every option is optional; `Default` gives the behaviour inferred from
//! the model.

use std::fmt;
use std::sync::Arc;

use super::tag::{Attrs, Node};
use crate::config::ModelFormConfig;
use crate::model::{Record, Value};

/// Widget override for an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAs {
    /// Plain text input
    Text,
    /// Multi-line textarea
    Textarea,
    /// Select box
    Select,
    /// Radio buttons, one per choice
    Radio,
    /// Checkboxes (to-many associations) or a single checkbox (booleans)
    Checkbox,
}

type WrapFn = dyn Fn(Node, &WrapContext) -> Node + Send + Sync;
type LegendFn = dyn Fn(&Record, Option<usize>) -> String + Send + Sync;

/// What a wrapper callable gets besides the node it wraps
#[derive(Debug, Clone, Default)]
pub struct WrapContext {
    wrapper_attrs: Attrs,
}

impl WrapContext {
    /// Attributes a tag wrapper would have used (`class` holds the
    /// field's type tokens)
    #[must_use]
    pub const fn wrapper_attrs(&self) -> &Attrs {
        &self.wrapper_attrs
    }

    /// Build an element
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn tag(&self, name: &str, attrs: Attrs, children: Vec<Node>) -> Node {
        Node::tag(name, attrs, children)
    }
}

/// Surrounds an input (or each labelled choice, as a tag wrapper)
#[derive(Clone)]
pub enum Wrapper {
    /// Wrap in an element of this name, classed with the type tokens
    Tag(String),
    /// Replace the node with whatever the callable builds
    Custom(Arc<WrapFn>),
}

impl Wrapper {
    /// Wrap in an element
    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag(name.into())
    }

    /// Wrap with a callable
    #[must_use]
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Node, &WrapContext) -> Node + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Apply the wrapper; `tokens` become the wrapper's class
    #[must_use]
    pub fn wrap(&self, node: Node, tokens: &[String]) -> Node {
        let mut attrs = Attrs::new();
        if !tokens.is_empty() {
            attrs.insert("class".into(), tokens.join(" "));
        }
        match self {
            Self::Tag(name) => Node::tag(name.as_str(), attrs, vec![node]),
            Self::Custom(f) => f(node, &WrapContext { wrapper_attrs: attrs }),
        }
    }
}

impl fmt::Debug for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(name) => f.debug_tuple("Tag").field(name).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Legend of a subform fieldset
#[derive(Clone)]
pub enum Legend {
    /// Literal text
    Text(String),
    /// Built from the target record and, on multi-valued levels, its index
    Custom(Arc<LegendFn>),
}

impl Legend {
    /// Legend from a callable
    #[must_use]
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Record, Option<usize>) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    pub(crate) fn text_for(&self, record: &Record, index: Option<usize>) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Custom(f) => f(record, index),
        }
    }
}

impl From<&str> for Legend {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Legend {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl fmt::Debug for Legend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Options of a single input
///
/// # Examples
///
/// ```rust
/// use acton_modelform::forms::{InputAs, InputOptions, Wrapper};
///
/// let opts = InputOptions::new()
///     .input_as(InputAs::Radio)
///     .wrapper(Wrapper::tag("li"))
///     .required(true);
/// assert_eq!(opts.input_as, Some(InputAs::Radio));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputOptions {
    /// Widget override
    pub input_as: Option<InputAs>,
    /// Wrapper, replacing the form's default wrapper
    pub wrapper: Option<Wrapper>,
    /// Wrapper around each labelled radio button or checkbox
    pub tag_wrapper: Option<Wrapper>,
    /// Explicit `(label, value)` choices
    pub options: Option<Vec<(String, Value)>>,
    /// Method labelling associated records
    pub name_method: Option<String>,
    /// Value used instead of the record's
    pub value: Option<Value>,
    /// Label text used instead of the humanized field name
    pub label: Option<String>,
    /// Required flag used instead of the inferred one
    pub required: Option<bool>,
}

impl InputOptions {
    /// Options with nothing overridden
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the widget
    #[must_use]
    pub const fn input_as(mut self, input_as: InputAs) -> Self {
        self.input_as = Some(input_as);
        self
    }

    /// Set the wrapper
    #[must_use]
    pub fn wrapper(mut self, wrapper: Wrapper) -> Self {
        self.wrapper = Some(wrapper);
        self
    }

    /// Set the per-choice wrapper
    #[must_use]
    pub fn tag_wrapper(mut self, wrapper: Wrapper) -> Self {
        self.tag_wrapper = Some(wrapper);
        self
    }

    /// Replace the candidate list with explicit `(label, value)` pairs
    #[must_use]
    pub fn options<I, L, V>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (L, V)>,
        L: Into<String>,
        V: Into<Value>,
    {
        self.options = Some(
            options
                .into_iter()
                .map(|(label, value)| (label.into(), value.into()))
                .collect(),
        );
        self
    }

    /// Label associated records with this method
    #[must_use]
    pub fn name_method(mut self, method: impl Into<String>) -> Self {
        self.name_method = Some(method.into());
        self
    }

    /// Use this value instead of the record's
    #[must_use]
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Use this label text
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Force the required flag
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}

/// Target records of a subform given explicitly
#[derive(Debug, Clone)]
pub enum SubformObject {
    /// One record, for to-one associations
    One(Record),
    /// A sequence of records, for to-many associations
    Many(Vec<Record>),
}

impl From<Record> for SubformObject {
    fn from(record: Record) -> Self {
        Self::One(record)
    }
}

impl From<Vec<Record>> for SubformObject {
    fn from(records: Vec<Record>) -> Self {
        Self::Many(records)
    }
}

/// Options of a nested subform
#[derive(Debug, Clone, Default)]
pub struct SubformOptions {
    /// Records to render instead of the associated ones
    pub obj: Option<SubformObject>,
    /// Fields rendered inside a fieldset for each target
    pub inputs: Option<Vec<String>>,
    /// Fieldset legend used with `inputs`
    pub legend: Option<Legend>,
    /// Default wrapper for inputs of this level and the levels below it
    pub wrapper: Option<Wrapper>,
    /// Default per-choice wrapper for inputs of this level and below
    pub tag_wrapper: Option<Wrapper>,
}

impl SubformOptions {
    /// Options with nothing overridden
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render these records instead of the associated ones
    #[must_use]
    pub fn obj(mut self, obj: impl Into<SubformObject>) -> Self {
        self.obj = Some(obj.into());
        self
    }

    /// Render these fields in a fieldset for each target
    #[must_use]
    pub fn inputs<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Set the fieldset legend
    #[must_use]
    pub fn legend(mut self, legend: impl Into<Legend>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    /// Wrap inputs of the nested level
    #[must_use]
    pub fn wrapper(mut self, wrapper: Wrapper) -> Self {
        self.wrapper = Some(wrapper);
        self
    }

    /// Wrap each labelled choice of the nested level's radio and checkbox sets
    #[must_use]
    pub fn tag_wrapper(mut self, wrapper: Wrapper) -> Self {
        self.tag_wrapper = Some(wrapper);
        self
    }
}

/// Options shared by every input of a form
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    /// Wrapper applied to inputs that don't set their own
    pub wrapper: Option<Wrapper>,
    /// Class names and separators
    pub config: ModelFormConfig,
}

impl FormOptions {
    /// Default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap every input
    #[must_use]
    pub fn wrapper(mut self, wrapper: Wrapper) -> Self {
        self.wrapper = Some(wrapper);
        self
    }

    /// Use a loaded configuration
    #[must_use]
    pub fn config(mut self, config: ModelFormConfig) -> Self {
        self.config = config;
        self
    }
}

/// Attributes of the `<form>` tag
#[derive(Debug, Clone, Default)]
pub struct FormAttrs {
    /// Extra class, placed before the standard ones
    pub class: Option<String>,
    /// Method, `post` when unset
    pub method: Option<String>,
    /// Any other attributes
    pub attrs: Attrs,
}

impl FormAttrs {
    /// No overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set the method
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set another attribute
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}
