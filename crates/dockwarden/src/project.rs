//! Swarm connection parameters supplied by the caller.

use std::fmt;

use serde::Deserialize;

/// Collaborator interface for anything that knows how to reach a swarm
/// leader.
pub trait SwarmProject {
    /// Address of the leader node.
    fn address(&self) -> &str;
    /// Port the leader listens on for joining workers.
    fn port(&self) -> u16;
    /// Secret token admitting a worker.
    fn token(&self) -> &str;
}

/// Plain [`SwarmProject`] carrying the three join parameters.
///
/// The token is redacted from the [`Debug`] rendering.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct JoinParameters {
    address: String,
    port: u16,
    token: String,
}

impl JoinParameters {
    /// Bundles the parameters needed to join a swarm.
    #[must_use]
    pub fn new(address: impl Into<String>, port: u16, token: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            port,
            token: token.into(),
        }
    }
}

impl SwarmProject for JoinParameters {
    fn address(&self) -> &str {
        &self.address
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for JoinParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinParameters")
            .field("address", &self.address)
            .field("port", &self.port)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_parameters_through_trait() {
        let project = JoinParameters::new("10.0.0.5", 2377, "SWMTKN-1-abc");
        assert_eq!(project.address(), "10.0.0.5");
        assert_eq!(project.port(), 2377);
        assert_eq!(project.token(), "SWMTKN-1-abc");
    }

    #[test]
    fn debug_hides_token() {
        let rendered = format!("{:?}", JoinParameters::new("leader", 2377, "SWMTKN-1-abc"));
        assert!(!rendered.contains("SWMTKN"), "token leaked: {rendered}");
        assert!(rendered.contains("leader"));
    }

    #[test]
    fn deserialises_from_json() {
        let project: JoinParameters = serde_json::from_str(
            r#"{"address":"10.0.0.5","port":2377,"token":"SWMTKN-1-abc"}"#,
        )
        .expect("deserialise");
        assert_eq!(project, JoinParameters::new("10.0.0.5", 2377, "SWMTKN-1-abc"));
    }
}
