use clap::Parser;

use crate::error::{AppError, AppResult};

use super::KvmarkArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<KvmarkArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    KvmarkArgs::try_parse_from(args).map_err(AppError::from)
}
