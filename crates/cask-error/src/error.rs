use core::{
    error,
    fmt::{self, Display, Debug, Formatter},
};

use compact_str::{CompactString, ToCompactString};

use super::{Location, Tracked, tracked::location};

enum Internal {
    JustContext(CompactString),
    WithSource(CompactString, Box<dyn error::Error + Send + Sync>),
}

impl Internal {

    fn context(&self) -> &str {
        match self {
            Self::JustContext(ctx) => ctx.as_str(),
            Self::WithSource(ctx, _) => ctx.as_str(),
        }
    }

    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::JustContext(_) => None,
            Self::WithSource(_, err) => Some(&**err),
        }
    }
}

/// Error carrying a context message, an optional source error and an
/// optional [`Location`] of the code that produced it.
pub struct Error {
    internal: Internal,
    loc: Option<Location>,
}

impl Error {

    #[inline(always)]
    pub fn new<C>(ctx: C, err: impl error::Error + Send + Sync + 'static) -> Self
        where C: Display,
    {
        Self::new_internal(ctx, err, None)
    }

    #[track_caller]
    pub fn new_tracked<C>(ctx: C, err: impl error::Error + Send + Sync + 'static) -> Self
        where C: Display,
    {
        Self::new_internal(ctx, err, Some(location()))
    }

    #[inline(always)]
    pub fn just_context<C>(ctx: C) -> Self
        where C: Display,
    {
        Self::just_context_internal(ctx, None)
    }

    #[track_caller]
    pub fn just_context_tracked<C>(ctx: C) -> Self
        where C: Display,
    {
        Self::just_context_internal(ctx, Some(location()))
    }

    #[inline(always)]
    pub fn context(&self) -> &str {
        self.internal.context()
    }

    /// Iterates over this error followed by every error in its source chain.
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            next: Some(self as &(dyn error::Error + 'static)),
        }
    }

    pub fn with_location(mut self, loc: Location) -> Self {
        self.loc = Some(loc);
        self
    }

    fn new_internal(
        ctx: impl Display,
        err: impl error::Error + Send + Sync + 'static,
        loc: Option<Location>,
    ) -> Self
    {
        Self {
            internal: Internal::WithSource(ctx.to_compact_string(), Box::new(err)),
            loc,
        }
    }

    fn just_context_internal(
        ctx: impl Display,
        loc: Option<Location>,
    ) -> Self
    {
        Self {
            internal: Internal::JustContext(ctx.to_compact_string()),
            loc,
        }
    }
}

impl Display for Error {

    #[inline(always)]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.internal.context())
    }
}

impl Debug for Error {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.internal {
            Internal::JustContext(ctx) => write!(f, "Error(ctx: {}, err: None", ctx)?,
            Internal::WithSource(ctx, err) => write!(f, "Error(ctx: {}, err: {:?}", ctx, err)?,
        }
        if let Some(loc) = self.loc {
            write!(f, ", loc: {}", loc)?;
        }
        write!(f, ")")
    }
}

impl error::Error for Error {

    #[inline(always)]
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.internal.source()
    }
}

impl Tracked for Error {

    #[inline(always)]
    fn location(&self) -> Option<Location> {
        self.loc
    }
}

pub struct Chain<'a> {
    next: Option<&'a (dyn error::Error + 'static)>,
}

impl<'a> Iterator for Chain<'a> {

    type Item = &'a (dyn error::Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}
