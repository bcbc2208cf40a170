//! Teller context threaded explicitly through the posting engine.
//!
//! Session and workstation state is supplied by the authentication
//! collaborator; the engine never reads it from ambient/global state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The acting teller and their physical posting context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TellerContext {
    /// The acting teller's user id.
    pub user_id: Uuid,
    /// Branch the teller is posting from.
    pub branch_code: String,
    /// Workstation the teller is posting from.
    pub workstation_code: String,
    /// The teller's open session.
    pub teller_session_id: Uuid,
    /// The teller's own cash drawer reference (e.g. `cash:DR-01`).
    pub drawer_reference: String,
}

impl TellerContext {
    /// Creates a new teller context.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        branch_code: impl Into<String>,
        workstation_code: impl Into<String>,
        teller_session_id: Uuid,
        drawer_reference: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            branch_code: branch_code.into(),
            workstation_code: workstation_code.into(),
            teller_session_id,
            drawer_reference: drawer_reference.into(),
        }
    }
}
