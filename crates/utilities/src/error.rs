use std::error::Error;

/// The error type used at the boundary of the tools, every library error can
/// be converted into it using `?`.
pub type SuperpermError = Box<dyn Error>;
