use crate::api::ClientId;

/// Who this session is to the store. Generated once when the session starts
/// and handed to everything that writes on its behalf.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Identity {
    client_id: ClientId,
}

impl Identity {
    pub fn generate() -> Identity {
        let client_id = ClientId::generate();
        tracing::debug!(%client_id, "generated session identity");
        Identity { client_id }
    }

    pub fn with_client_id(client_id: ClientId) -> Identity {
        Identity { client_id }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }
}
