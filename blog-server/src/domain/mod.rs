pub(crate) mod comment;
pub(crate) mod error;
pub(crate) mod form;
pub(crate) mod pagination;
pub(crate) mod post;
