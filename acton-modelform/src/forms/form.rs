//! Forms bound to a record
//!
//! A [`Form`] renders inputs for the fields of one record and collects
//! them into a body. Nested subforms push a new scope (target record plus
//! name and id prefixes) for the duration of their block, so inputs added
//! inside the block are named after the nested level.

use tracing::trace;

use super::association::association_input;
use super::introspect::{classify, column_input, virtual_input, BuiltInput, FieldKind};
use super::options::{FormAttrs, FormOptions, InputOptions, Wrapper};
use super::tag::{Node, Tag};
use crate::config::ModelFormConfig;
use crate::error::Result;
use crate::model::Record;
use crate::store::Repository;

/// One nesting level: the record being edited and its name/id prefixes
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    pub(crate) record: Record,
    /// Prefix of `name` attributes (`album[tracks_attributes][0]`)
    pub(crate) name: String,
    /// Prefix of `id` attributes (`album_tracks_attributes_0`)
    pub(crate) id: String,
    /// Wrapper defaults set by an enclosing subform
    pub(crate) wrapper: Option<Wrapper>,
    pub(crate) tag_wrapper: Option<Wrapper>,
}

impl Scope {
    pub(crate) fn root(record: Record) -> Self {
        let key = record.model().param_key();
        Self {
            record,
            name: key.clone(),
            id: key,
            wrapper: None,
            tag_wrapper: None,
        }
    }

    pub(crate) fn field_name(&self, field: &str) -> String {
        format!("{}[{field}]", self.name)
    }

    pub(crate) fn field_id(&self, field: &str) -> String {
        format!("{}_{field}", self.id)
    }

    pub(crate) fn errors(&self, field: &str, config: &ModelFormConfig) -> Option<String> {
        self.record
            .errors()
            .messages(field, &config.errors.message_separator)
    }
}

/// A form over one record
///
/// # Examples
///
/// ```rust
/// use acton_modelform::forms::{Form, FormAttrs, InputOptions};
/// use acton_modelform::model::{Column, ColumnType, ModelSchema, Record};
/// use acton_modelform::store::MemoryStore;
///
/// let mut store = MemoryStore::new();
/// let album = store.register(
///     ModelSchema::new("Album", "albums").column(Column::new("name", ColumnType::String)),
/// );
/// let record = Record::load(album, 1).with("name", "b");
///
/// let mut form = Form::new(record, &store);
/// form.add_input("name", &InputOptions::new()).unwrap();
/// assert_eq!(
///     form.finish(&FormAttrs::new()).to_string(),
///     r#"<form class="forme album" method="post"><label>Name: <input id="album_name" name="album[name]" type="text" value="b"/></label></form>"#
/// );
/// ```
pub struct Form<'r> {
    pub(crate) repo: &'r dyn Repository,
    pub(crate) options: FormOptions,
    /// Innermost scope last; never empty
    pub(crate) scopes: Vec<Scope>,
    pub(crate) body: Vec<Node>,
}

impl std::fmt::Debug for Form<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("options", &self.options)
            .field("scopes", &self.scopes)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl<'r> Form<'r> {
    /// Create a form with default options
    #[must_use]
    pub fn new(record: Record, repo: &'r dyn Repository) -> Self {
        Self::with_options(record, repo, FormOptions::default())
    }

    /// Create a form with options shared by every input
    #[must_use]
    pub fn with_options(record: Record, repo: &'r dyn Repository, options: FormOptions) -> Self {
        Self {
            repo,
            options,
            scopes: vec![Scope::root(record)],
            body: Vec::new(),
        }
    }

    /// Render a whole form: run `block` to add inputs, then wrap the body
    /// in a `<form>` tag
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the block; no markup is produced
    /// in that case.
    pub fn render<F>(record: Record, repo: &'r dyn Repository, attrs: &FormAttrs, block: F) -> Result<String>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mut form = Self::new(record, repo);
        block(&mut form)?;
        Ok(form.finish(attrs).to_string())
    }

    pub(crate) fn scope(&self) -> &Scope {
        // `scopes` starts with the root and subforms pop what they push
        &self.scopes[self.scopes.len() - 1]
    }

    /// Record of the innermost level
    #[must_use]
    pub fn record(&self) -> &Record {
        &self.scope().record
    }

    /// Build the input for `field` of the current record
    ///
    /// The form's body is left untouched; see [`Form::add_input`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelFormError::UnknownField`](crate::error::ModelFormError::UnknownField)
    /// for fields the model doesn't have,
    /// [`ModelFormError::UnsupportedAssociation`](crate::error::ModelFormError::UnsupportedAssociation)
    /// and [`ModelFormError::NoNameMethod`](crate::error::ModelFormError::NoNameMethod)
    /// for associations that cannot be rendered, and repository errors.
    pub fn input(&self, field: &str, opts: &InputOptions) -> Result<Node> {
        let scope = self.scope();
        let model = scope.record.model();
        let config = &self.options.config;
        let kind = classify(model, field, &scope.name)?;

        let inherited;
        let opts = match (&opts.tag_wrapper, &scope.tag_wrapper) {
            (None, Some(tag_wrapper)) => {
                inherited = InputOptions {
                    tag_wrapper: Some(tag_wrapper.clone()),
                    ..opts.clone()
                };
                &inherited
            }
            _ => opts,
        };
        trace!(model = model.name(), field, kind = kind.as_str(), path = %scope.name, "classified field");

        let BuiltInput { node, tokens } = match kind {
            FieldKind::Column(column) => column_input(scope, config, column, opts),
            FieldKind::Association(association) => {
                association_input(scope, self.repo, config, association, opts)?
            }
            FieldKind::Virtual => virtual_input(scope, self.repo, config, field, opts)?,
        };

        let wrapper = opts
            .wrapper
            .as_ref()
            .or(scope.wrapper.as_ref())
            .or(self.options.wrapper.as_ref());
        Ok(match wrapper {
            Some(wrapper) => wrapper.wrap(node, &tokens),
            None => node,
        })
    }

    /// Build the input for `field` and append it to the body
    ///
    /// # Errors
    ///
    /// Same as [`Form::input`].
    pub fn add_input(&mut self, field: &str, opts: &InputOptions) -> Result<()> {
        let node = self.input(field, opts)?;
        self.body.push(node);
        Ok(())
    }

    /// Append default inputs for several fields
    ///
    /// # Errors
    ///
    /// Same as [`Form::input`]; inputs before the failing one stay in the
    /// body.
    pub fn add_inputs<I, S>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let opts = InputOptions::default();
        fields
            .into_iter()
            .try_for_each(|field| self.add_input(field.as_ref(), &opts))
    }

    /// Append arbitrary markup to the body
    pub fn add(&mut self, node: impl Into<Node>) {
        self.body.push(node.into());
    }

    /// Markup added so far
    #[must_use]
    pub fn body(&self) -> &[Node] {
        &self.body
    }

    /// The `<form>` tag around the current body
    ///
    /// The class is the optional custom class, the configured form class,
    /// then the root model's param key.
    #[must_use]
    pub fn form_tag(&self, attrs: &FormAttrs) -> Node {
        self.open_form(attrs).children(self.body.clone()).into()
    }

    /// Consume the form, returning the `<form>` tag around its body
    #[must_use]
    pub fn finish(self, attrs: &FormAttrs) -> Node {
        let tag = self.open_form(attrs);
        tag.children(self.body).into()
    }

    fn open_form(&self, attrs: &FormAttrs) -> Tag {
        let config = &self.options.config.form;
        let root = self.scopes[0].record.model().param_key();
        let class = attrs
            .class
            .iter()
            .map(String::as_str)
            .chain([config.class.as_str(), root.as_str()])
            .filter(|class| !class.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let method = attrs.method.as_deref().unwrap_or(&config.method);

        let mut tag = Tag::new("form");
        tag.attrs.clone_from(&attrs.attrs);
        tag.attr("class", class).attr("method", method)
    }
}
