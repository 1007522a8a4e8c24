use core::{
    error,
    fmt::Display,
};

use super::{Error, tracked::location};

/// Attaches context to the error side of a [`Result`], turning it into an
/// [`Error`] whose source is the original error.
pub trait Context<T, E: error::Error + Send + Sync + 'static> {

    fn ctx_err(self, ctx: impl Display) -> Result<T, Error>;

    fn ctx_err_with<C: Display>(self, f: impl FnOnce() -> C) -> Result<T, Error>;

    #[track_caller]
    fn ctx_err_tracked(self, ctx: impl Display) -> Result<T, Error>;
}

impl<T, E: error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {

    fn ctx_err(self, ctx: impl Display) -> Result<T, Error> {
        self.map_err(|err| Error::new(ctx, err))
    }

    fn ctx_err_with<C: Display>(self, f: impl FnOnce() -> C) -> Result<T, Error> {
        self.map_err(|err| Error::new(f(), err))
    }

    #[track_caller]
    fn ctx_err_tracked(self, ctx: impl Display) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Error::new(ctx, err).with_location(location())),
        }
    }
}
