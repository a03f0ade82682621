use super::{KeyProvider, KeySnapshot};

/// No-hardware key source used during bring-up.
#[derive(Default, Debug, Clone, Copy)]
pub struct MockKeys;

impl MockKeys {
    pub const fn new() -> Self {
        Self
    }
}

impl KeyProvider for MockKeys {
    type Error = core::convert::Infallible;

    fn poll(&mut self) -> Result<KeySnapshot, Self::Error> {
        Ok(KeySnapshot::default())
    }
}
