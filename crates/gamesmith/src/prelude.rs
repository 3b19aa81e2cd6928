pub use crate::error::ApiError;

pub use color_eyre::eyre::{eyre, Context, OptionExt, Result};
