/// Load state of a value fetched from the API
///
/// One enum instead of separate `loading`/`error` flags, so a profile can't
/// be both loaded and failed at once.
#[derive(Debug, Clone, PartialEq)]
pub enum DataState<T> {
    /// Never requested
    Pending,
    /// Request in flight and nothing cached yet
    Loading,
    Loaded(T),
    /// Last request failed
    Error(String),
}

impl<T> DataState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, DataState::Loaded(_))
    }

    /// Returns the data if loaded, None otherwise
    pub fn data(&self) -> Option<&T> {
        match self {
            DataState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DataState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

impl<T> Default for DataState<T> {
    fn default() -> Self {
        DataState::Pending
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for DataState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => DataState::Loaded(data),
            Err(err) => DataState::Error(err.to_string()),
        }
    }
}
