//! Native browser dialogs.

use crate::features::files::Confirmer;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserConfirmer;

impl Confirmer for BrowserConfirmer {
    fn confirm(&self, message: &str) -> bool {
        gloo::dialogs::confirm(message)
    }
}
