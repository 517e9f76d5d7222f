//! Team roster repository trait.

use super::model::TeamMember;
use crate::error::Result;

/// Read access to the team roster.
///
/// Roster editing lives outside the core; implementations only need to
/// return the current members in display order.
#[async_trait::async_trait]
pub trait TeamRepository: Send + Sync {
    /// Retrieves all team members.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<TeamMember>)`: Members in roster order
    /// - `Err(ChiefError)`: Error if the roster cannot be read
    async fn list_members(&self) -> Result<Vec<TeamMember>>;
}
