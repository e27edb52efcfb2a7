pub(crate) mod blog_service;
pub(crate) mod share_service;

#[cfg(test)]
pub(crate) mod test_support;
