//! Startup gate: first-run setup or straight to the calculator.

use calcvault_types::Screen;

use crate::credentials::CredentialStore;

/// A missing or malformed setup flag counts as "not set up".
#[must_use]
pub fn determine_initial_screen(credentials: &CredentialStore) -> Screen {
    if credentials.is_setup_complete() {
        Screen::Calculator
    } else {
        Screen::InitialSetup
    }
}
