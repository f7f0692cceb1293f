/// File header and top-level section listing.
pub mod info;
/// Recursive section tree.
pub mod sections;
/// Full decode summary.
pub mod show;

#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod util;
