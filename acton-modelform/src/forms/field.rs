//! Widget shapes produced by field resolution
//!
//! Column and association inputs are first resolved into a [`Widget`]
//! (what to draw) and a [`FieldContext`](super::render::FieldContext)
//! (name, id, label, value, errors), then handed to the renderer.

/// HTML input types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    /// Text input (default)
    #[default]
    Text,
    /// Email input
    Email,
    /// Password input, never echoes a value
    Password,
    /// Number input
    Number,
    /// Telephone input
    Tel,
    /// URL input
    Url,
    /// Date input
    Date,
    /// Date and time input
    DateTime,
    /// Hidden input
    Hidden,
    /// File upload, never echoes a value
    File,
    /// Checkbox
    Checkbox,
    /// Radio button
    Radio,
}

impl InputType {
    /// Get the HTML type attribute value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Hidden => "hidden",
            Self::File => "file",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
        }
    }

    /// Whether the current value is written back into the control
    #[must_use]
    pub const fn echoes_value(&self) -> bool {
        !matches!(self, Self::Password | Self::File)
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One choice of a select box, radio set, or checkbox set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Value attribute
    pub value: String,
    /// Display text
    pub label: String,
    /// Whether this choice is selected (or checked)
    pub selected: bool,
}

impl SelectOption {
    /// Create an unselected option
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }

    /// Mark the option selected when `selected` is true
    #[must_use]
    pub const fn selected_if(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// What to draw for a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// Single `<input>` of the given type
    Input(InputType),
    /// `<textarea>` holding the value
    Textarea,
    /// `<select>` box
    Select {
        /// Choices in display order
        options: Vec<SelectOption>,
        /// Emit an empty leading option
        blank: bool,
        /// Allow several selections (array field name)
        multiple: bool,
    },
    /// Labelled radio buttons sharing one name
    Radios(Vec<SelectOption>),
    /// Labelled checkboxes sharing one array name
    Checkboxes(Vec<SelectOption>),
    /// Hidden `f` fallback followed by a `t` checkbox
    DualCheckbox {
        /// Whether the checkbox starts checked
        checked: bool,
    },
}

impl Widget {
    /// Whether the widget renders a set of separately labelled controls
    #[must_use]
    pub const fn is_choice_set(&self) -> bool {
        matches!(self, Self::Radios(_) | Self::Checkboxes(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_type_as_str() {
        assert_eq!(InputType::Email.as_str(), "email");
        assert_eq!(InputType::DateTime.as_str(), "datetime");
        assert_eq!(InputType::Tel.to_string(), "tel");
    }

    #[test]
    fn test_echoes_value() {
        assert!(InputType::Text.echoes_value());
        assert!(!InputType::Password.echoes_value());
        assert!(!InputType::File.echoes_value());
    }

    #[test]
    fn test_select_option() {
        let opt = SelectOption::new("1", "a");
        assert_eq!(opt.value, "1");
        assert!(!opt.selected);
        assert!(opt.selected_if(true).selected);
    }

    #[test]
    fn test_choice_sets() {
        assert!(Widget::Radios(Vec::new()).is_choice_set());
        assert!(!Widget::Textarea.is_choice_set());
    }
}
