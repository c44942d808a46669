//! Widget rendering
//!
//! Turns a resolved [`Widget`] plus its [`FieldContext`] into a tag tree.
//! Single controls are wrapped in a `<label>` whose text precedes the
//! control; radio and checkbox sets put the label text in front and give
//! each choice its own `<label>`.

use super::field::{InputType, SelectOption, Widget};
use super::options::Wrapper;
use super::tag::{Node, Tag};
use crate::config::ModelFormConfig;

/// Everything about a field except its widget
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldContext {
    /// `id` attribute
    pub id: String,
    /// `name` attribute
    pub name: String,
    /// Label text
    pub label: String,
    /// Current value as submitted text
    pub value: Option<String>,
    /// Whether the control carries `required="required"`
    pub required: bool,
    /// Joined validation messages
    pub error: Option<String>,
}

/// Renders widgets with the configured class names
#[derive(Debug, Clone, Copy)]
pub struct FieldRenderer<'c> {
    config: &'c ModelFormConfig,
}

impl<'c> FieldRenderer<'c> {
    /// Create a renderer
    #[must_use]
    pub const fn new(config: &'c ModelFormConfig) -> Self {
        Self { config }
    }

    /// Render a widget
    ///
    /// `tag_wrapper` surrounds each labelled choice of a radio or checkbox
    /// set and is ignored by other widgets.
    #[must_use]
    pub fn render(&self, widget: &Widget, field: &FieldContext, tag_wrapper: Option<&Wrapper>) -> Node {
        match widget {
            Widget::Input(input_type) => self.labelled(field, self.render_input(field, *input_type)),
            Widget::Textarea => self.labelled(field, self.render_textarea(field)),
            Widget::Select {
                options,
                blank,
                multiple,
            } => self.labelled(field, self.render_select(field, options, *blank, *multiple)),
            Widget::Radios(options) => {
                self.render_choices(field, InputType::Radio, options, tag_wrapper)
            }
            Widget::Checkboxes(options) => {
                self.render_choices(field, InputType::Checkbox, options, tag_wrapper)
            }
            Widget::DualCheckbox { checked } => self.render_dual_checkbox(field, *checked),
        }
    }

    fn labelled(&self, field: &FieldContext, control: Tag) -> Node {
        Tag::new("label")
            .child(format!("{}{}", field.label, self.config.inputs.label_separator))
            .child(control)
            .children(self.error_message(field))
            .into()
    }

    fn render_input(&self, field: &FieldContext, input_type: InputType) -> Tag {
        let value = field.value.clone().filter(|_| input_type.echoes_value());
        self.control("input", field)
            .attr("type", input_type.as_str())
            .attr_opt("value", value)
    }

    fn render_textarea(&self, field: &FieldContext) -> Tag {
        let control = self.control("textarea", field);
        match &field.value {
            Some(value) => control.child(value.as_str()),
            None => control,
        }
    }

    fn render_select(
        &self,
        field: &FieldContext,
        options: &[SelectOption],
        blank: bool,
        multiple: bool,
    ) -> Tag {
        let blank: Option<Node> = blank.then(|| Tag::new("option").attr("value", "").into());
        let choices = options.iter().map(|opt| -> Node {
            Tag::new("option")
                .flag("selected", opt.selected)
                .attr("value", opt.value.as_str())
                .child(opt.label.as_str())
                .into()
        });
        self.control("select", field)
            .flag("multiple", multiple)
            .children(blank.into_iter().chain(choices))
    }

    fn render_choices(
        &self,
        field: &FieldContext,
        input_type: InputType,
        options: &[SelectOption],
        tag_wrapper: Option<&Wrapper>,
    ) -> Node {
        let mut nodes = vec![Node::text(format!(
            "{}{}",
            field.label, self.config.inputs.label_separator
        ))];
        for (i, opt) in options.iter().enumerate() {
            let input = Tag::new("input")
                .attr("type", input_type.as_str())
                .attr("name", field.name.as_str())
                .attr("value", opt.value.as_str())
                .flag("checked", opt.selected)
                .flag("required", field.required && input_type == InputType::Radio && i == 0)
                .attr_opt("class", self.error_class(field));
            let label: Node = Tag::new("label")
                .child(input)
                .child(format!(" {}", opt.label))
                .into();
            nodes.push(match tag_wrapper {
                Some(wrapper) => wrapper.wrap(label, &[]),
                None => label,
            });
        }
        nodes.extend(self.error_message(field));
        Node::Fragment(nodes)
    }

    fn render_dual_checkbox(&self, field: &FieldContext, checked: bool) -> Node {
        let hidden = Tag::new("input")
            .attr("id", format!("{}{}", field.id, self.config.inputs.hidden_suffix))
            .attr("name", field.name.as_str())
            .attr("type", InputType::Hidden.as_str())
            .attr("value", "f");
        let checkbox = self
            .control("input", field)
            .attr("type", InputType::Checkbox.as_str())
            .attr("value", "t")
            .flag("checked", checked);
        Tag::new("label")
            .child(hidden)
            .child(checkbox)
            .child(format!(" {}", field.label))
            .children(self.error_message(field))
            .into()
    }

    /// Element with the attributes every single control shares
    fn control(&self, name: &str, field: &FieldContext) -> Tag {
        Tag::new(name)
            .attr("id", field.id.as_str())
            .attr("name", field.name.as_str())
            .flag("required", field.required)
            .attr_opt("class", self.error_class(field))
    }

    fn error_class(&self, field: &FieldContext) -> Option<String> {
        field
            .error
            .as_ref()
            .map(|_| self.config.errors.input_class.clone())
    }

    fn error_message(&self, field: &FieldContext) -> Option<Node> {
        field.error.as_ref().map(|message| {
            Tag::new("span")
                .attr("class", self.config.errors.message_class.as_str())
                .child(message.as_str())
                .into()
        })
    }
}
