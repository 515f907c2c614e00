//! Minimal interactive demo: a label, a text input, and a button wired to
//! a real terminal via [`cellstage::platform::crossterm_backend::CrosstermBackend`].
//!
//! Run with `RUST_LOG=debug cargo run --bin demo` to see the tick loop's
//! tracing output alongside the rendered UI.

use cellstage::app::Application;
use cellstage::control::{ControlFlags, ControlKind};
use cellstage::geometry::Extent;
use cellstage::platform::crossterm_backend::CrosstermBackend;
use cellstage::widget::button::ButtonData;
use cellstage::widget::label::LabelData;
use cellstage::widget::text_input::TextInputData;
use cellstage::widget::WidgetData;

fn main() -> cellstage::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut app = Application::new(CrosstermBackend::new())?;

    app.create_control(
        None,
        Extent::new(20, 1),
        ControlKind::Label,
        ControlFlags { focusable: false },
        WidgetData::Label(LabelData::new("Name:")),
    )?;

    let input = app.create_control(
        None,
        Extent::new(20, 1),
        ControlKind::TextInput,
        ControlFlags { focusable: true },
        WidgetData::TextInput(TextInputData::new(40, false)),
    )?;

    app.create_control(
        None,
        Extent::new(10, 1),
        ControlKind::Button,
        ControlFlags { focusable: true },
        WidgetData::Button(ButtonData::new("Submit")),
    )?;

    app.set_focus(input)?;
    app.run()
}
