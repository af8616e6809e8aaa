use std::any::type_name;
use std::error::Error as StdError;
use std::fmt;

use crate::failure::ServerFailure;

/// Type name recorded for nested `source()` links whose concrete type was
/// erased behind `dyn Error` before capture.
pub const UNKNOWN_SOURCE_TYPE: &str = "dyn core::error::Error";

/// One link of a causal chain: either our own [`ServerFailure`] or any
/// other failure snapshotted into an [`OtherFailure`].
#[derive(Debug, Clone)]
pub enum Cause {
    Server(Box<ServerFailure>),
    Other(OtherFailure),
}

/// A failure that is not a [`ServerFailure`].
///
/// `message` distinguishes an absent message from an empty one.
#[derive(Debug, Clone)]
pub struct OtherFailure {
    type_name: String,
    message: Option<String>,
    cause: Option<Box<Cause>>,
}

impl OtherFailure {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: Some(message.into()),
            cause: None,
        }
    }

    pub fn without_message(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: None,
            cause: None,
        }
    }

    pub fn caused_by(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(Box::new(cause.into()));
        self
    }

    /// Snapshot an arbitrary error and its `source()` chain.
    ///
    /// Only the top link's concrete type is known here. Nested links are
    /// recorded as [`UNKNOWN_SOURCE_TYPE`] unless they are one of this
    /// crate's own failure types.
    pub fn capture<E: StdError + ?Sized>(err: &E) -> Self {
        Self {
            type_name: type_name::<E>().to_string(),
            message: Some(err.to_string()),
            cause: err.source().map(|src| Box::new(Cause::from_source(src))),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_deref()
    }
}

impl fmt::Display for OtherFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => f.write_str(&self.type_name),
        }
    }
}

impl StdError for OtherFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn StdError + 'static))
    }
}

impl Cause {
    /// Capture any error as a chain link, keeping this crate's own failure
    /// types as-is.
    pub fn from_error<E: StdError + 'static>(err: &E) -> Self {
        Self::known(err).unwrap_or_else(|| Self::Other(OtherFailure::capture(err)))
    }

    /// Capability check for [`Cause`], [`ServerFailure`] and [`OtherFailure`]
    /// hidden behind `dyn Error`.
    pub(crate) fn known(err: &(dyn StdError + 'static)) -> Option<Self> {
        if let Some(cause) = err.downcast_ref::<Cause>() {
            return Some(cause.clone());
        }
        if let Some(failure) = err.downcast_ref::<ServerFailure>() {
            return Some(Self::Server(Box::new(failure.clone())));
        }
        err.downcast_ref::<OtherFailure>()
            .map(|other| Self::Other(other.clone()))
    }

    fn from_source(src: &(dyn StdError + 'static)) -> Self {
        if let Some(known) = Self::known(src) {
            return known;
        }
        Self::Other(OtherFailure {
            type_name: UNKNOWN_SOURCE_TYPE.to_string(),
            message: Some(src.to_string()),
            cause: src.source().map(|next| Box::new(Self::from_source(next))),
        })
    }

    pub fn as_server_failure(&self) -> Option<&ServerFailure> {
        match self {
            Self::Server(failure) => Some(&**failure),
            Self::Other(_) => None,
        }
    }

    pub fn is_server_failure(&self) -> bool {
        self.as_server_failure().is_some()
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::Server(_) => type_name::<ServerFailure>(),
            Self::Other(other) => other.type_name(),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Server(failure) => Some(failure.message()),
            Self::Other(other) => other.message(),
        }
    }

    pub fn source_cause(&self) -> Option<&Cause> {
        match self {
            Self::Server(failure) => ServerFailure::cause(failure),
            Self::Other(other) => other.cause(),
        }
    }

    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Deepest link reachable from this one.
    ///
    /// Chains are owned `Box` trees, so they are finite and acyclic.
    pub fn root(&self) -> &Cause {
        let mut root = self;
        while let Some(next) = root.source_cause() {
            root = next;
        }
        root
    }

    /// `"<type>: <message>"`, or just the type when the message is absent.
    /// An empty message still gets the `": "` separator.
    pub fn describe(&self) -> String {
        match self.message() {
            Some(message) => format!("{}: {message}", self.type_name()),
            None => self.type_name().to_string(),
        }
    }
}

impl From<ServerFailure> for Cause {
    fn from(failure: ServerFailure) -> Self {
        Self::Server(Box::new(failure))
    }
}

impl From<OtherFailure> for Cause {
    fn from(other: OtherFailure) -> Self {
        Self::Other(other)
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server(failure) => fmt::Display::fmt(failure, f),
            Self::Other(other) => fmt::Display::fmt(other, f),
        }
    }
}

impl StdError for Cause {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source_cause().map(|c| c as &(dyn StdError + 'static))
    }
}

/// Iterator over a causal chain, starting with the link it was created from.
pub struct Chain<'a> {
    next: Option<&'a Cause>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Cause;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source_cause();
        Some(current)
    }
}
