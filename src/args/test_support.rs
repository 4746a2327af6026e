use clap::Parser;

use crate::error::{AppError, AppResult};

use super::RankcardArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<RankcardArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    RankcardArgs::try_parse_from(args).map_err(AppError::from)
}
