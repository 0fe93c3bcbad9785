use zeroize::Zeroizing;

/// A passphrase for locking or unlocking secret keys, either known up front
/// or produced on demand by a callback (e.g. a prompt).
#[derive(derive_more::Debug)]
pub enum Password {
    Dynamic(#[debug("Box<Fn>")] Box<dyn Fn() -> Zeroizing<Vec<u8>> + 'static + Send + Sync>),
    Static(#[debug("***")] Zeroizing<Vec<u8>>),
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self::Static(Zeroizing::new(value.into_bytes()))
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self::from(value.as_bytes())
    }
}

impl From<&[u8]> for Password {
    fn from(value: &[u8]) -> Self {
        Self::Static(Zeroizing::new(value.to_vec()))
    }
}

impl<F: Fn() -> Zeroizing<Vec<u8>> + 'static + Send + Sync> From<F> for Password {
    fn from(value: F) -> Self {
        Self::Dynamic(Box::new(value))
    }
}

impl Default for Password {
    fn default() -> Self {
        Self::empty()
    }
}

impl Password {
    pub fn empty() -> Self {
        Self::Static(Zeroizing::new(Vec::new()))
    }

    /// Returns the passphrase octets, running the callback if there is one.
    pub fn read(&self) -> Zeroizing<Vec<u8>> {
        match self {
            Self::Dynamic(f) => f(),
            Self::Static(s) => s.clone(),
        }
    }
}
