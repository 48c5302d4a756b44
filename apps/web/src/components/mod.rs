//! Shared UI components exported for routes and features.

pub(crate) mod already_signed_in;
pub(crate) mod layout;
pub(crate) mod ui;

pub(crate) use already_signed_in::AlreadySignedInPanel;
pub(crate) use layout::AppShell;
pub(crate) use ui::{focus_first_code_box, Alert, AlertKind, Button, CodeInput, Spinner};
