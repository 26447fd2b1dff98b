pub(crate) mod auth;
pub(crate) mod breadcrumbs;
pub(crate) mod pages;
pub(crate) mod shell;
pub(crate) mod status;
pub(crate) mod table;
pub(crate) mod toast;
