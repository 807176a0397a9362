use std::fmt;

use thiserror::Error;
use tracing::info;
use tracing::warn;

use crate::dimension::DimensionError;
use crate::dimension::Dimensions;
use crate::dimension::parse_dimension;
use crate::session::SessionError;
use crate::session::SessionStore;
use crate::session::X_DIMENSION_KEY;
use crate::session::Y_DIMENSION_KEY;
use crate::tower::Tower;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("Invalid {axis} dimension: {source}")]
    InvalidDimension {
        axis: Axis,
        #[source]
        source: DimensionError,
    },

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Everything the field knows between two user actions: where the applied dimensions are
/// persisted and the tower built from them.
pub struct Field<S> {
    store: S,
    tower: Option<Tower>,
}

impl<S: SessionStore> Field<S> {
    /// An empty field. Nothing is read from `store` until [`Field::restore`].
    pub fn new(store: S) -> Self {
        Self { store, tower: None }
    }

    /// Rebuild the field from the dimensions last persisted in `store`, if any.
    ///
    /// Stored values go through the same validation as fresh input. If they don't pass, the
    /// field is left empty.
    pub fn restore(store: S) -> Self {
        let mut field = Self::new(store);

        let Some(x) = field.store.get(X_DIMENSION_KEY) else {
            return field;
        };
        let y = field.store.get(Y_DIMENSION_KEY).unwrap_or_default();

        match field.apply(&x, &y) {
            Ok(dims) => info!(%dims, "restored field from session"),
            Err(e) => warn!("ignoring stored dimensions: {e}"),
        }

        field
    }

    /// Validate the raw `x_input` and `y_input`, persist them and rebuild the tower with its
    /// first two levels.
    ///
    /// Nothing is touched if either input is invalid or the session can't be written.
    pub fn apply(&mut self, x_input: &str, y_input: &str) -> Result<Dimensions, FieldError> {
        let x = parse_dimension(x_input).map_err(|source| {
            warn!(input = x_input, "rejected x dimension");
            FieldError::InvalidDimension {
                axis: Axis::X,
                source,
            }
        })?;
        let y = parse_dimension(y_input).map_err(|source| {
            warn!(input = y_input, "rejected y dimension");
            FieldError::InvalidDimension {
                axis: Axis::Y,
                source,
            }
        })?;

        let dims = Dimensions::from_checked(x, y);

        let (x_value, y_value) = (x.to_string(), y.to_string());
        self.store.set_many(&[
            (X_DIMENSION_KEY, x_value.as_str()),
            (Y_DIMENSION_KEY, y_value.as_str()),
        ])?;

        let mut tower = Tower::new(dims);
        tower.push_level();
        self.tower = Some(tower);

        info!(%dims, "applied dimensions");

        Ok(dims)
    }

    /// Build one more level on top of the current tower. Returns the index of the new level, or
    /// `None` if there is no field yet or it already reached its `1×1` level.
    pub fn next_step(&mut self) -> Option<usize> {
        let index = self.tower.as_mut()?.step()?;
        info!(index, "stepped field");

        Some(index)
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        self.tower.as_ref().map(Tower::dimensions)
    }

    pub fn tower(&self) -> Option<&Tower> {
        self.tower.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
