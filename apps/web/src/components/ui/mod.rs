mod alert;
mod button;
mod code_input;
mod spinner;

pub(crate) use alert::{Alert, AlertKind};
pub(crate) use button::Button;
pub(crate) use code_input::{focus_first_code_box, CodeInput};
pub(crate) use spinner::Spinner;
