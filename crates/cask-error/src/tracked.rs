use core::fmt::{self, Debug, Display, Formatter};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location(&'static core::panic::Location<'static>);

impl Location {

    #[inline(always)]
    pub fn file(&self) -> &'static str {
        self.0.file()
    }

    #[inline(always)]
    pub fn line(&self) -> u32 {
        self.0.line()
    }
}

impl Display for Location {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for Location {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        <core::panic::Location<'_> as Debug>::fmt(self.0, f)
    }
}

#[inline(always)]
#[track_caller]
pub fn location() -> Location {
    Location(core::panic::Location::caller())
}

#[macro_export]
macro_rules! location {
    () => {
        $crate::tracked::location()
    };
}

/// Trait for types that track [`Location`]s.
pub trait Tracked {

    fn location(&self) -> Option<Location>;

    #[track_caller]
    #[inline(always)]
    fn location_or_this(&self) -> Location {
        match self.location() {
            Some(loc) => loc,
            None => location(),
        }
    }
}

impl Tracked for Location {

    #[inline(always)]
    fn location(&self) -> Option<Location> {
        Some(*self)
    }
}

impl Tracked for Option<Location> {

    #[inline(always)]
    fn location(&self) -> Option<Location> {
        *self
    }
}
