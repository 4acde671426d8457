//! Interactive editing state with last-write-wins rendering.

use tracing::debug;

use super::{Archetype, ArchetypeKey, ParameterValue};
use crate::error::{ParameterError, Result};
use crate::tessellation::TriangleMesh;

/// Where a [`Session`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No archetype selected.
    Idle,
    /// Parameters set, no current mesh.
    Configured,
    /// The mesh matches the current parameters.
    Built,
}

/// A snapshot of the parameters a render was started with.
///
/// Tickets can be moved to another thread, rendered there and handed back
/// through [`Session::complete`].
#[derive(Debug, Clone)]
pub struct RenderTicket {
    generation: u64,
    archetype: Archetype,
}

impl RenderTicket {
    /// The generation this ticket was issued at.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The parameters to render.
    #[must_use]
    pub fn archetype(&self) -> &Archetype {
        &self.archetype
    }

    /// Renders the snapshot.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Archetype::render`].
    pub fn render(&self) -> Result<TriangleMesh> {
        self.archetype.render()
    }
}

/// Holds the selected archetype, its parameters and the last accepted mesh.
///
/// Every selection or parameter change bumps a generation counter. A render
/// result is only accepted if no change happened since its ticket was issued.
#[derive(Debug, Default)]
pub struct Session {
    archetype: Option<Archetype>,
    generation: u64,
    mesh: Option<TriangleMesh>,
}

impl Session {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        match (&self.archetype, &self.mesh) {
            (None, _) => SessionState::Idle,
            (Some(_), None) => SessionState::Configured,
            (Some(_), Some(_)) => SessionState::Built,
        }
    }

    /// The selected archetype with its current parameters.
    #[must_use]
    pub fn archetype(&self) -> Option<&Archetype> {
        self.archetype.as_ref()
    }

    /// The mesh for the current parameters, if built.
    #[must_use]
    pub fn mesh(&self) -> Option<&TriangleMesh> {
        self.mesh.as_ref()
    }

    /// Number of changes made so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Selects an archetype at its default parameters.
    ///
    /// Values set for a previous selection are discarded.
    pub fn select(&mut self, key: ArchetypeKey) {
        self.archetype = Some(Archetype::defaults(key));
        self.invalidate();
        debug!(archetype = %key, generation = self.generation, "selected archetype");
    }

    /// Changes one parameter of the selected archetype.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NoArchetype`] when idle, or the validation
    /// error for an unknown name, wrong kind or non-finite number. A failed
    /// call leaves the session unchanged.
    pub fn set(&mut self, name: &str, value: impl Into<ParameterValue>) -> Result<()> {
        let current = self.archetype.as_ref().ok_or(ParameterError::NoArchetype)?;
        let key = current.key();
        let mut values = current.values();
        values.insert(name.to_owned(), value.into());
        self.archetype = Some(Archetype::from_values(key, &values)?);
        self.invalidate();
        Ok(())
    }

    /// Snapshots the current parameters for rendering.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NoArchetype`] when idle.
    pub fn begin_render(&self) -> Result<RenderTicket> {
        let archetype = self.archetype.ok_or(ParameterError::NoArchetype)?;
        Ok(RenderTicket {
            generation: self.generation,
            archetype,
        })
    }

    /// Accepts a finished render unless parameters changed since `ticket`
    /// was issued. Returns whether the mesh was accepted.
    pub fn complete(&mut self, ticket: RenderTicket, mesh: TriangleMesh) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale render"
            );
            return false;
        }
        self.mesh = Some(mesh);
        true
    }

    /// Renders the current parameters synchronously and stores the result.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NoArchetype`] when idle, or any render error.
    pub fn render(&mut self) -> Result<&TriangleMesh> {
        let ticket = self.begin_render()?;
        let mesh = ticket.render()?;
        let stored: &TriangleMesh = self.mesh.insert(mesh);
        Ok(stored)
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.mesh = None;
    }
}
