//! Column introspection
//!
//! Decides what a field name refers to on a model and, for columns and
//! virtual fields, which widget represents it.

use super::field::{InputType, SelectOption, Widget};
use super::form::Scope;
use super::naming::humanize;
use super::options::{InputAs, InputOptions};
use super::render::{FieldContext, FieldRenderer};
use super::tag::Node;
use crate::config::ModelFormConfig;
use crate::error::{ModelFormError, Result};
use crate::model::{Association, Column, ColumnType, ModelSchema, Value};
use crate::store::Repository;

/// What a field name refers to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind<'m> {
    /// A declared column
    Column(&'m Column),
    /// A declared association
    Association(&'m Association),
    /// A method (or the primary key reader) without a column of its own
    Virtual,
}

impl FieldKind<'_> {
    /// Short name for logging
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Column(_) => "column",
            Self::Association(_) => "association",
            Self::Virtual => "virtual",
        }
    }
}

/// Classify `field` on `model`
///
/// Columns win over associations, associations over methods.
///
/// # Errors
///
/// Returns [`ModelFormError::UnknownField`] naming the model, the field,
/// and `path` (the name path of the form level) when nothing matches.
pub fn classify<'m>(model: &'m ModelSchema, field: &str, path: &str) -> Result<FieldKind<'m>> {
    if let Some(column) = model.column_named(field) {
        return Ok(FieldKind::Column(column));
    }
    if let Some(association) = model.association_named(field) {
        return Ok(FieldKind::Association(association));
    }
    if model.responds_to(field) {
        return Ok(FieldKind::Virtual);
    }
    Err(ModelFormError::UnknownField {
        model: model.name().to_owned(),
        field: field.to_owned(),
        path: path.to_owned(),
    })
}

/// A rendered input before wrapping
#[derive(Debug, Clone)]
pub(crate) struct BuiltInput {
    pub(crate) node: Node,
    /// Class tokens for the wrapper
    pub(crate) tokens: Vec<String>,
}

/// Whether a column input is required
///
/// Dual-state booleans are never inferred as required: their hidden
/// fallback always submits a value.
#[must_use]
pub fn is_required(column: &Column, opts: &InputOptions) -> bool {
    opts.required
        .unwrap_or(!column.allow_null && !column.is_dual_state())
}

/// Input type implied by a string column's name
#[must_use]
pub fn input_type_for_name(name: &str) -> InputType {
    match name.to_ascii_lowercase().as_str() {
        "password" => InputType::Password,
        "email" => InputType::Email,
        "phone" | "fax" => InputType::Tel,
        "url" | "uri" | "website" => InputType::Url,
        _ => InputType::Text,
    }
}

/// Widget for a column holding `value`
#[must_use]
pub fn column_widget(column: &Column, value: Option<&Value>, opts: &InputOptions) -> Widget {
    if let Some(options) = &opts.options {
        let current = value.and_then(Value::to_form_value);
        let choices: Vec<SelectOption> = options
            .iter()
            .map(|(label, choice)| {
                let choice = choice.to_string();
                let selected = current.as_deref() == Some(choice.as_str());
                SelectOption::new(choice, label.as_str()).selected_if(selected)
            })
            .collect();
        return if opts.input_as == Some(InputAs::Radio) {
            Widget::Radios(choices)
        } else {
            Widget::Select {
                options: choices,
                blank: true,
                multiple: false,
            }
        };
    }

    match opts.input_as {
        Some(InputAs::Textarea) => return Widget::Textarea,
        Some(InputAs::Text) => return Widget::Input(InputType::Text),
        _ => {}
    }

    match column.column_type {
        ColumnType::Blob => Widget::Input(InputType::File),
        ColumnType::Boolean => boolean_widget(column, value, opts.input_as),
        ColumnType::String => Widget::Input(input_type_for_name(&column.name)),
        ColumnType::Text => Widget::Textarea,
        ColumnType::Integer | ColumnType::Float | ColumnType::Decimal => {
            Widget::Input(InputType::Number)
        }
        ColumnType::Date => Widget::Input(InputType::Date),
        ColumnType::DateTime => Widget::Input(InputType::DateTime),
    }
}

fn boolean_widget(column: &Column, value: Option<&Value>, input_as: Option<InputAs>) -> Widget {
    let state = value.and_then(Value::as_bool);
    let dual = match input_as {
        Some(InputAs::Checkbox) => true,
        Some(InputAs::Select) => false,
        _ => column.is_dual_state(),
    };
    if dual {
        return Widget::DualCheckbox {
            checked: state == Some(true),
        };
    }
    Widget::Select {
        options: vec![
            SelectOption::new("t", "True").selected_if(state == Some(true)),
            SelectOption::new("f", "False").selected_if(state == Some(false)),
        ],
        blank: true,
        multiple: false,
    }
}

pub(crate) fn column_input(
    scope: &Scope,
    config: &ModelFormConfig,
    column: &Column,
    opts: &InputOptions,
) -> BuiltInput {
    let value = opts
        .value
        .clone()
        .or_else(|| scope.record.value(&column.name).cloned())
        .or_else(|| column.default.clone().filter(|_| scope.record.is_new()));
    let required = is_required(column, opts);
    let widget = column_widget(column, value.as_ref(), opts);
    let field = FieldContext {
        id: scope.field_id(&column.name),
        name: scope.field_name(&column.name),
        label: opts.label.clone().unwrap_or_else(|| humanize(&column.name)),
        value: value.as_ref().and_then(Value::to_form_value),
        required,
        error: scope.errors(&column.name, config),
    };

    let mut tokens = vec![column.column_type.as_str().to_owned()];
    if required {
        tokens.push("required".into());
    }
    BuiltInput {
        node: FieldRenderer::new(config).render(&widget, &field, opts.tag_wrapper.as_ref()),
        tokens,
    }
}

pub(crate) fn virtual_input(
    scope: &Scope,
    repo: &dyn Repository,
    config: &ModelFormConfig,
    name: &str,
    opts: &InputOptions,
) -> Result<BuiltInput> {
    let value = match &opts.value {
        Some(value) => Some(value.clone()),
        None => scope.record.model().call(name, &scope.record, repo)?,
    };
    let widget = if opts.input_as == Some(InputAs::Textarea) {
        Widget::Textarea
    } else {
        Widget::Input(InputType::Text)
    };
    let required = opts.required.unwrap_or(false);
    let field = FieldContext {
        id: scope.field_id(name),
        name: scope.field_name(name),
        label: opts.label.clone().unwrap_or_else(|| humanize(name)),
        value: value.as_ref().and_then(Value::to_form_value),
        required,
        error: scope.errors(name, config),
    };
    Ok(BuiltInput {
        node: FieldRenderer::new(config).render(&widget, &field, None),
        tokens: if required {
            vec!["required".into()]
        } else {
            Vec::new()
        },
    })
}
