//! Widget implementations and the `WidgetData` tagged union a
//! [`crate::control::Control`] carries as its opaque payload.

pub mod button;
pub mod checkbox;
pub mod dropdown;
pub mod label;
pub mod list;
pub mod number_input;
pub mod progress_bar;
pub mod text_input;

/// A control's widget-specific data. Replaces the source's `void*`
/// payload with a closed sum type — dispatch matches on the variant
/// instead of trusting a caller-supplied `ControlKind` to agree with an
/// untyped pointer (see [`crate::control::Control::data`]).
#[derive(Clone, Debug, PartialEq)]
pub enum WidgetData {
    /// [`label::LabelData`].
    Label(label::LabelData),
    /// [`button::ButtonData`].
    Button(button::ButtonData),
    /// [`checkbox::CheckboxData`] tagged [`checkbox::Flavor::Checkbox`].
    Checkbox(checkbox::CheckboxData),
    /// [`checkbox::CheckboxData`] tagged [`checkbox::Flavor::Radio`].
    Radio(checkbox::CheckboxData),
    /// [`progress_bar::ProgressBarData`].
    ProgressBar(progress_bar::ProgressBarData),
    /// [`list::ListData`].
    List(list::ListData),
    /// [`dropdown::DropdownData`].
    Dropdown(dropdown::DropdownData),
    /// [`text_input::TextInputData`].
    TextInput(text_input::TextInputData),
    /// [`number_input::NumberInputData`].
    NumberInput(number_input::NumberInputData),
    /// A non-interactive container with no widget-specific state.
    Panel,
}
